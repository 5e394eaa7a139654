/*
 * Renderer Module
 *
 * This module handles the rendering of the constellation.
 * Each frame it draws, in order:
 * - The grid checkerboard, when enabled
 * - The connection lines
 * - The balls
 * - The metric overlay and the egui panel
 */

use nannou::prelude::*;

use crate::app::Model;
use crate::surface::NannouSurface;
use crate::ui;

// Render the model
pub fn view(app: &App, model: &Model, frame: Frame) {
    // Begin drawing
    let draw = app.draw();

    // Clear the background
    draw.background().color(BLACK);

    let window_rect = app.window_rect();
    let mut surface = NannouSurface::new(&draw, window_rect);

    if model.params.show_grid {
        model.simulation.render_grid(&mut surface);
    }

    // Lines first so the balls sit on top of them
    model.simulation.render_connections(&mut surface);
    model.simulation.render_points(&mut surface);

    if model.params.show_debug {
        ui::draw_debug_info(&draw, &model.debug_info, window_rect);
    }

    // Finish drawing
    if let Err(e) = draw.to_frame(app, &frame) {
        log::warn!("failed to draw frame: {e:?}");
    }

    // Draw the egui UI
    if let Err(e) = model.egui.draw_to_frame(&frame) {
        log::warn!("failed to draw ui: {e:?}");
    }
}
