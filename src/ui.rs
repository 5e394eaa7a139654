/*
 * UI Module
 *
 * This module contains functions for creating and updating the user interface
 * using nannou_egui. It provides controls for adjusting simulation parameters
 * and draws the metric overlay in the top-left corner of the canvas.
 */

use nannou_egui::{egui, Egui};

use crate::debug::DebugInfo;
use crate::params::SimulationParams;

// Update the UI and return whether a rebuild was requested and whether a parameter change needs one
pub fn update_ui(
    egui: &mut Egui,
    params: &mut SimulationParams,
    debug_info: &DebugInfo,
) -> (bool, bool) {
    let mut should_rebuild = false;

    // Take a snapshot of current parameter values for change detection
    params.take_snapshot();

    let ctx = egui.begin_frame();

    egui::Window::new("Constellation")
        .default_pos([10.0, 120.0])
        .show(&ctx, |ui| {
            ui.collapsing("Points", |ui| {
                ui.add(
                    egui::Slider::new(
                        &mut params.num_points,
                        SimulationParams::get_num_points_range(),
                    )
                    .text("Number of Points"),
                );
                ui.add(
                    egui::Slider::new(
                        &mut params.max_speed,
                        SimulationParams::get_max_speed_range(),
                    )
                    .text("Max Speed"),
                );
                ui.add(
                    egui::Slider::new(
                        &mut params.point_radius,
                        SimulationParams::get_radius_range(),
                    )
                    .text("Radius"),
                );
                ui.checkbox(&mut params.mark_debug_point, "Marked Point");

                if ui.button("Rebuild").clicked() {
                    should_rebuild = true;
                }
            });

            ui.collapsing("Connections", |ui| {
                ui.add(
                    egui::Slider::new(
                        &mut params.proximity_threshold,
                        SimulationParams::get_threshold_range(),
                    )
                    .text("Proximity Threshold"),
                );
                ui.label(format!("Connections: {}", debug_info.connections));
                ui.label(format!("Grid: {}x{} cells", debug_info.columns, debug_info.rows));
                ui.checkbox(&mut params.show_grid, "Show Grid");
            });

            ui.separator();

            ui.label(format!("FPS: {:.1}", debug_info.fps));
            ui.label(format!(
                "Frame time: {:.2} ms",
                debug_info.frame_time.as_secs_f64() * 1000.0
            ));
            ui.checkbox(&mut params.show_debug, "Show Debug Info");
            ui.checkbox(&mut params.pause_simulation, "Pause Simulation");
        });

    // Detect parameter changes
    let rebuild_needed = params.detect_changes();

    (should_rebuild, rebuild_needed)
}

// Draw the metric overlay on the canvas
pub fn draw_debug_info(
    draw: &nannou::Draw,
    debug_info: &DebugInfo,
    window_rect: nannou::geom::Rect,
) {
    let margin = 10.0;
    let line_height = 20.0;
    let text_width = 300.0;

    for (i, text) in debug_info.overlay_lines().iter().enumerate() {
        let y = window_rect.top() - margin - line_height * (i as f32 + 0.5);

        // Left-align by anchoring a fixed-width box at the left margin
        draw.text(text)
            .x_y(window_rect.left() + margin + text_width / 2.0, y)
            .w(text_width)
            .left_justify()
            .color(nannou::color::WHITE)
            .font_size(16);
    }
}
