/*
 * Application Module
 *
 * This module defines the main application model and logic for the constellation.
 * It acts as the frame driver: nannou calls `update` once per frame, which
 * advances the simulation by one tick, and `view` draws the result.
 *
 * The simulation always covers the whole window. Resizing the window, or
 * changing a parameter that shapes the simulation, replaces it with a fresh one.
 */

use nannou::prelude::*;
use nannou_egui::Egui;

use crate::debug::DebugInfo;
use crate::params::SimulationParams;
use crate::renderer::view;
use crate::simulation::Simulation;
use crate::ui;

/// Window size used when no monitor can be queried.
const FALLBACK_WINDOW_SIZE: (u32, u32) = (1280, 800);

// Main model for the application
pub struct Model {
    pub simulation: Simulation,
    pub params: SimulationParams,
    pub egui: Egui,
    pub debug_info: DebugInfo,
    // Logical size of the drawing surface
    pub surface_size: Vec2,
}

// Initialize the model
pub fn model(app: &App) -> Model {
    // Calculate window size based on monitor size (80% of monitor size)
    let (window_width, window_height) = app
        .primary_monitor()
        .map(|monitor| {
            let size = monitor.size();
            ((size.width as f32 * 0.8) as u32, (size.height as f32 * 0.8) as u32)
        })
        .unwrap_or(FALLBACK_WINDOW_SIZE);

    let window_id = app
        .new_window()
        .title("Constellation")
        .size(window_width, window_height)
        .view(view)
        .resized(resized)
        .raw_event(raw_window_event)
        .build()
        .expect("failed to build the main window");

    let window = app.window(window_id).expect("main window closed during setup");
    let egui = Egui::from_window(&window);
    let surface_size = window.rect().wh();

    let params = SimulationParams::default();
    let simulation = Simulation::seeded(&params, surface_size.x, surface_size.y)
        .expect("default parameters must fit the initial window");

    let mut debug_info = DebugInfo::default();
    debug_info.record_simulation(&simulation);

    Model {
        simulation,
        params,
        egui,
        debug_info,
        surface_size,
    }
}

// Update the model
pub fn update(app: &App, model: &mut Model, update: Update) {
    model.debug_info.record_frame(app.fps(), update.since_last);
    model.egui.set_elapsed_time(update.since_start);

    let (should_rebuild, rebuild_needed) =
        ui::update_ui(&mut model.egui, &mut model.params, &model.debug_info);

    if should_rebuild || rebuild_needed {
        rebuild_simulation(model);
    }

    if !model.params.pause_simulation {
        model.simulation.advance();
    }

    model.debug_info.record_simulation(&model.simulation);
}

/// Replace the simulation with a new one for the current surface size.
///
/// An invalid combination of parameters and size keeps the current simulation.
pub fn rebuild_simulation(model: &mut Model) {
    let size = model.surface_size;
    match Simulation::seeded(&model.params, size.x, size.y) {
        Ok(simulation) => model.simulation = simulation,
        Err(e) => log::warn!("keeping the current simulation: {e}"),
    }
}

// The surface follows the window; nothing carries over to the new simulation
pub fn resized(_app: &App, model: &mut Model, size: Vec2) {
    log::debug!("window resized to {:.0}x{:.0}", size.x, size.y);
    model.surface_size = size;
    rebuild_simulation(model);
}

// Handle raw window events for egui
pub fn raw_window_event(_app: &App, model: &mut Model, event: &nannou::winit::event::WindowEvent) {
    model.egui.handle_raw_event(event);
}
