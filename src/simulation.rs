/*
 * Simulation Module
 *
 * This module owns the balls, the spatial grid and the connector, and runs
 * one tick at a time:
 * 1. Step every ball, moving it to a new grid cell when it crosses a boundary
 * 2. Once every ball has moved, collect the frame's connections
 *
 * Connections are only computed after the grid is fully up to date, so no
 * pair is judged against a stale position. A resize throws the whole
 * simulation away and builds a new one.
 */

use nannou::prelude::*;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::ball::Ball;
use crate::connector::{Connection, ProximityConnector};
use crate::error::Result;
use crate::params::SimulationParams;
use crate::spatial_grid::SpatialGrid;
use crate::surface::Surface;

#[derive(Debug, Clone)]
pub struct Simulation {
    width: f32,
    height: f32,
    balls: Vec<Ball>,
    grid: SpatialGrid,
    connector: ProximityConnector,
    // This frame's connections, rebuilt on every tick
    connections: Vec<Connection>,
    ticks: u64,
}

impl Simulation {
    /// Build a simulation for a `width` x `height` surface.
    ///
    /// Places `params.num_points` random balls, plus a marked ball at `marked`
    /// when given. The grid pitch equals the proximity threshold.
    pub fn new<R: Rng>(
        params: &SimulationParams,
        width: f32,
        height: f32,
        marked: Option<Point2>,
        rng: &mut R,
    ) -> Result<Self> {
        params.validate(width, height)?;

        let threshold = params.proximity_threshold;
        let mut grid = SpatialGrid::new(threshold, width, height)?;
        let connector = ProximityConnector::new(threshold)?;

        let radius = params.point_radius;
        let mut balls: Vec<Ball> = (0..params.num_points)
            .map(|_| Ball::random(&mut *rng, width, height, radius, params.max_speed))
            .collect();
        if let Some(position) = marked {
            balls.push(Ball::pinned(rng, position, radius, params.max_speed));
        }

        for (i, ball) in balls.iter().enumerate() {
            grid.insert(i, ball.position);
        }

        log::info!(
            "built simulation: {} balls on {:.0}x{:.0}, {}x{} cells of {:.0}",
            balls.len(),
            width,
            height,
            grid.columns,
            grid.rows,
            threshold
        );

        let mut simulation = Self {
            width,
            height,
            balls,
            grid,
            connector,
            connections: Vec::new(),
            ticks: 0,
        };
        simulation.refresh_connections();
        Ok(simulation)
    }

    /// Build with a `StdRng`, seeded from `params.seed` or from entropy.
    pub fn seeded(params: &SimulationParams, width: f32, height: f32) -> Result<Self> {
        let mut rng = match params.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        let marked = params.marked_position(width, height);
        Self::new(params, width, height, marked, &mut rng)
    }

    /// Advance one tick.
    pub fn advance(&mut self) {
        for (i, ball) in self.balls.iter_mut().enumerate() {
            let previous = ball.position;
            ball.step(self.width, self.height);
            debug_assert!(ball.is_inside(self.width, self.height), "ball {i} left the surface");
            self.grid.relocate_if_needed(i, previous, ball.position);
        }

        self.refresh_connections();
        self.ticks += 1;
    }

    fn refresh_connections(&mut self) {
        self.connector
            .connect_all(&self.grid, &self.balls, &mut self.connections);
    }

    pub fn render_connections<S: Surface + ?Sized>(&self, surface: &mut S) {
        for connection in &self.connections {
            connection.draw(surface);
        }
    }

    pub fn render_points<S: Surface + ?Sized>(&self, surface: &mut S) {
        for ball in &self.balls {
            ball.draw(surface);
        }
    }

    // Checkerboard of the grid cells, for seeing where the chunks lie
    pub fn render_grid<S: Surface + ?Sized>(&self, surface: &mut S) {
        let size = vec2(self.grid.cell_size, self.grid.cell_size);
        for (cell, _) in self.grid.cells() {
            let alpha = (if cell.y & 1 == 1 { 0.1 } else { 0.05 })
                + (if cell.x & 1 == 1 { 0.05 } else { 0.1 });
            surface.fill_rect(self.grid.cell_origin(cell), size, rgba(1.0, 1.0, 1.0, alpha));
        }
    }

    pub fn balls(&self) -> &[Ball] {
        &self.balls
    }

    pub fn grid(&self) -> &SpatialGrid {
        &self.grid
    }

    pub fn connections(&self) -> &[Connection] {
        &self.connections
    }

    pub fn width(&self) -> f32 {
        self.width
    }

    pub fn height(&self) -> f32 {
        self.height
    }

    pub fn threshold(&self) -> f32 {
        self.connector.threshold
    }

    /// Ticks advanced since construction.
    pub fn ticks(&self) -> u64 {
        self.ticks
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::surface::{DrawCall, Recorder};

    fn params(num_points: usize, threshold: f32) -> SimulationParams {
        let mut params = SimulationParams::default();
        params.num_points = num_points;
        params.proximity_threshold = threshold;
        params.seed = Some(42);
        params
    }

    fn grid_matches_positions(sim: &Simulation) -> bool {
        sim.balls().iter().enumerate().all(|(i, ball)| {
            sim.grid().locate(i) == Some(sim.grid().cell_of(ball.position))
        }) && sim.grid().len() == sim.balls().len()
    }

    #[test]
    fn construction_places_every_ball_in_the_grid() {
        let sim = Simulation::seeded(&params(100, 200.0), 800.0, 600.0).unwrap();
        // 100 random + the marked ball
        assert_eq!(sim.balls().len(), 101);
        assert!(sim.balls()[100].marked);
        assert_eq!(sim.balls()[100].position, pt2(750.0, 300.0));
        assert!(grid_matches_positions(&sim));
        assert_eq!((sim.grid().columns, sim.grid().rows), (4, 3));
        assert_eq!(sim.ticks(), 0);
    }

    #[test]
    fn marked_ball_is_optional() {
        let mut p = params(10, 100.0);
        p.mark_debug_point = false;
        let sim = Simulation::seeded(&p, 400.0, 400.0).unwrap();
        assert_eq!(sim.balls().len(), 10);
        assert!(sim.balls().iter().all(|b| !b.marked));
    }

    #[test]
    fn invalid_configuration_is_rejected() {
        assert!(Simulation::seeded(&params(0, 200.0), 800.0, 600.0).is_err());
        assert!(Simulation::seeded(&params(10, 0.0), 800.0, 600.0).is_err());
        assert!(Simulation::seeded(&params(10, 200.0), 4.0, 600.0).is_err());
    }

    #[test]
    fn narrowest_accepted_surface_keeps_balls_inside() {
        let mut p = params(5, 200.0);
        p.mark_debug_point = false;
        // One ball wide: any bounce would overshoot the far side
        assert!(Simulation::seeded(&p, 6.0, 400.0).is_err());

        let mut sim = Simulation::seeded(&p, 7.0, 400.0).unwrap();
        for _ in 0..1_000 {
            sim.advance();
            for ball in sim.balls() {
                assert!(ball.position.x >= 3.0 - 1e-3 && ball.position.x <= 4.0 + 1e-3);
            }
        }
    }

    #[test]
    fn tiny_threshold_is_rejected_instead_of_allocating() {
        let p = params(10, 1e-12);
        assert!(matches!(
            Simulation::seeded(&p, 1920.0, 1080.0),
            Err(crate::error::Error::InvalidParam(_))
        ));
    }

    #[test]
    fn same_seed_same_layout() {
        let a = Simulation::seeded(&params(50, 100.0), 640.0, 480.0).unwrap();
        let b = Simulation::seeded(&params(50, 100.0), 640.0, 480.0).unwrap();
        assert_eq!(a.balls(), b.balls());
        assert_eq!(a.connections(), b.connections());
    }

    #[test]
    fn advance_keeps_grid_consistent() {
        let mut sim = Simulation::seeded(&params(150, 60.0), 500.0, 300.0).unwrap();
        for _ in 0..500 {
            sim.advance();
            assert!(grid_matches_positions(&sim));
        }
        assert_eq!(sim.ticks(), 500);
    }

    #[test]
    fn connections_follow_post_step_positions() {
        let mut sim = Simulation::seeded(&params(80, 120.0), 600.0, 400.0).unwrap();
        sim.advance();
        for c in sim.connections() {
            assert_eq!(c.from, sim.balls()[c.a].position);
            assert_eq!(c.to, sim.balls()[c.b].position);
            assert!(c.distance <= sim.threshold());
        }
    }

    #[test]
    fn renders_points_connections_and_grid() {
        let sim = Simulation::seeded(&params(30, 100.0), 400.0, 300.0).unwrap();
        let mut recorder = Recorder::new(400.0, 300.0);

        sim.render_connections(&mut recorder);
        assert_eq!(recorder.lines().count(), sim.connections().len());

        sim.render_points(&mut recorder);
        assert_eq!(recorder.circles().count(), 31);

        recorder.clear();
        sim.render_grid(&mut recorder);
        assert_eq!(recorder.rects().count(), 12);
        match recorder.calls[0] {
            DrawCall::Rect { top_left, size, color } => {
                assert_eq!(top_left, pt2(0.0, 0.0));
                assert_eq!(size, vec2(100.0, 100.0));
                assert!((color.alpha - 0.15).abs() < 1e-6);
            }
            other => panic!("unexpected draw call: {other:?}"),
        }
    }
}
