/*
 * Constellation - Module Definitions
 *
 * This file defines the module structure for the constellation application.
 * The simulation core (ball, spatial_grid, connector, simulation) draws only
 * through the Surface trait; the nannou front end lives in app, renderer and ui.
 */

// Re-export key components for easier access
pub use app::Model;
pub use ball::Ball;
pub use connector::{Connection, ProximityConnector};
pub use debug::DebugInfo;
pub use error::{Error, Result};
pub use params::SimulationParams;
pub use simulation::Simulation;
pub use spatial_grid::{CellCoord, SpatialGrid};
pub use surface::{NannouSurface, Recorder, Surface};

// Define modules
pub mod app;
pub mod ball;
pub mod connector;
pub mod debug;
pub mod error;
pub mod params;
pub mod renderer;
pub mod simulation;
pub mod spatial_grid;
pub mod surface;
pub mod ui;
