/*
 * Simulation Parameters Module
 *
 * This module defines the SimulationParams struct that contains all the
 * adjustable parameters for the constellation. These parameters can be
 * modified through the UI. It also provides validation and change detection
 * so the app knows when the simulation has to be rebuilt.
 */

use nannou::prelude::*;

use crate::error::{Error, Result};

/// Distance of the marked ball from the right edge of the surface.
pub const MARKED_INSET: f32 = 50.0;

// Parameters for the simulation that can be adjusted via UI
#[derive(Debug, Clone)]
pub struct SimulationParams {
    pub num_points: usize,
    /// Maximum connection distance, also the grid pitch.
    pub proximity_threshold: f32,
    /// Bound on each velocity component.
    pub max_speed: f32,
    pub point_radius: f32,
    pub mark_debug_point: bool,
    pub show_grid: bool,
    pub show_debug: bool,
    pub pause_simulation: bool,
    /// Fixed seed for reproducible layouts; fresh entropy when `None`.
    pub seed: Option<u64>,

    // Internal state for tracking changes
    previous_values: Option<ParamSnapshot>,
}

// A snapshot of the parameters a simulation is built from
#[derive(Debug, Clone, PartialEq)]
struct ParamSnapshot {
    num_points: usize,
    proximity_threshold: f32,
    max_speed: f32,
    point_radius: f32,
    mark_debug_point: bool,
}

impl Default for SimulationParams {
    fn default() -> Self {
        Self {
            num_points: 100,
            proximity_threshold: 200.0,
            max_speed: 1.0,
            point_radius: 3.0,
            mark_debug_point: true,
            show_grid: false,
            show_debug: true,
            pause_simulation: false,
            seed: None,
            previous_values: None,
        }
    }
}

impl SimulationParams {
    /// Check that a simulation can be built from these parameters on a `width` x `height` surface.
    pub fn validate(&self, width: f32, height: f32) -> Result<()> {
        if self.num_points == 0 {
            return Err(Error::InvalidParam("num_points must be > 0".into()));
        }
        positive("proximity_threshold", self.proximity_threshold)?;
        positive("max_speed", self.max_speed)?;
        positive("point_radius", self.point_radius)?;

        // The band a ball's centre may occupy has to be wider than one step,
        // or a bounce off one edge can carry it past the opposite one
        let diameter = 2.0 * self.point_radius;
        let fits = |extent: f32| extent.is_finite() && extent - diameter >= self.max_speed;
        if !(fits(width) && fits(height)) {
            return Err(Error::SurfaceTooSmall {
                width,
                height,
                radius: self.point_radius,
            });
        }
        Ok(())
    }

    /// Where the marked ball starts, if it is enabled.
    ///
    /// Kept inside the band a ball of `point_radius` may occupy.
    pub fn marked_position(&self, width: f32, height: f32) -> Option<Point2> {
        if !self.mark_debug_point {
            return None;
        }
        let r = self.point_radius;
        let x = (width - MARKED_INSET).clamp(r, width - r);
        let y = (height / 2.0).clamp(r, height - r);
        Some(pt2(x, y))
    }

    // Take a snapshot of current parameter values for change detection
    pub fn take_snapshot(&mut self) {
        self.previous_values = Some(self.snapshot());
    }

    fn snapshot(&self) -> ParamSnapshot {
        ParamSnapshot {
            num_points: self.num_points,
            proximity_threshold: self.proximity_threshold,
            max_speed: self.max_speed,
            point_radius: self.point_radius,
            mark_debug_point: self.mark_debug_point,
        }
    }

    // Check if the simulation has to be rebuilt since the last snapshot.
    // Display toggles (grid, debug, pause) never need a rebuild.
    pub fn detect_changes(&self) -> bool {
        // If we don't have previous values, nothing has changed
        match &self.previous_values {
            Some(prev) => self.snapshot() != *prev,
            None => false,
        }
    }

    // Get parameter ranges for UI sliders
    pub fn get_num_points_range() -> std::ops::RangeInclusive<usize> {
        1..=2000
    }

    pub fn get_threshold_range() -> std::ops::RangeInclusive<f32> {
        20.0..=400.0
    }

    pub fn get_max_speed_range() -> std::ops::RangeInclusive<f32> {
        0.1..=5.0
    }

    pub fn get_radius_range() -> std::ops::RangeInclusive<f32> {
        1.0..=10.0
    }
}

fn positive(name: &str, value: f32) -> Result<()> {
    if !value.is_finite() || value <= 0.0 {
        return Err(Error::InvalidParam(format!(
            "{name} must be finite and > 0, got {value}"
        )));
    }
    Ok(())
}
