/*
 * Debug Information Module
 *
 * This module defines the DebugInfo struct that contains performance metrics
 * and other debug information to be displayed on screen and in the UI.
 *
 * Includes metrics for:
 * - FPS (frames per second)
 * - Frame time, re-sampled twice a second so the number stays readable
 * - Ball, connection and grid cell counts
 */

use std::time::Duration;

use crate::simulation::Simulation;

/// How often the displayed frame time is refreshed.
pub const FRAME_TIME_SAMPLE_PERIOD: Duration = Duration::from_millis(500);

// Debug information to display
#[derive(Debug, Clone, Default)]
pub struct DebugInfo {
    pub fps: f32,
    pub frame_time: Duration,
    pub balls: usize,
    pub connections: usize,
    pub columns: usize,
    pub rows: usize,
    pub ticks: u64,
    // Time since frame_time was last sampled
    since_sample: Duration,
}

impl DebugInfo {
    // Record a frame's timing; frame_time only changes once per sample period
    pub fn record_frame(&mut self, fps: f32, since_last: Duration) {
        self.fps = fps;
        self.since_sample += since_last;
        if self.since_sample >= FRAME_TIME_SAMPLE_PERIOD {
            self.since_sample = Duration::ZERO;
            self.frame_time = since_last;
        }
    }

    pub fn record_simulation(&mut self, simulation: &Simulation) {
        self.balls = simulation.balls().len();
        self.connections = simulation.connections().len();
        self.columns = simulation.grid().columns;
        self.rows = simulation.grid().rows;
        self.ticks = simulation.ticks();
    }

    /// Text lines for the on-canvas overlay.
    pub fn overlay_lines(&self) -> Vec<String> {
        vec![
            format!("fps: {:.0}", self.fps),
            format!("frametime: {:.3}ms", self.frame_time.as_secs_f64() * 1000.0),
            format!("balls: {}", self.balls),
            format!("connections: {}", self.connections),
            format!("cells: {}x{}", self.columns, self.rows),
        ]
    }
}
