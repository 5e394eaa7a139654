/*
 * Error Module
 *
 * Errors raised while building a simulation. Ticking and rendering never fail;
 * only configuration and construction are checked.
 */

use thiserror::Error;

/// Crate-wide result type alias.
pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    /// A configuration value is out of its legal range.
    #[error("invalid parameter: {0}")]
    InvalidParam(String),

    /// The surface cannot hold a single point of the configured radius.
    #[error("surface {width}x{height} is too small for points of radius {radius}")]
    SurfaceTooSmall { width: f32, height: f32, radius: f32 },
}
