/*
 * Connector Module
 *
 * Finds every pair of balls closer than the proximity threshold and turns each
 * pair into a line whose opacity fades with distance.
 *
 * For each occupied cell the connector pairs:
 * 1. The cell's members with each other (i < j)
 * 2. The cell's members with the balls of its half-neighbourhood
 *
 * Because the half-neighbourhood reaches each adjacent cell from exactly one
 * side, every candidate pair is evaluated once, with no visited set.
 */

use nannou::prelude::*;

use crate::ball::Ball;
use crate::error::{Error, Result};
use crate::spatial_grid::SpatialGrid;
use crate::surface::Surface;

/// Stroke width of every connection line.
pub const LINE_WEIGHT: f32 = 1.0;

/// A proximate pair of balls, valid for the frame it was computed in.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Connection {
    pub a: usize,
    pub b: usize,
    pub from: Point2,
    pub to: Point2,
    pub distance: f32,
    /// `(threshold - distance) / threshold`
    pub opacity: f32,
}

impl Connection {
    /// The pair as `(low, high)` indices.
    pub fn key(&self) -> (usize, usize) {
        (self.a.min(self.b), self.a.max(self.b))
    }

    pub fn draw<S: Surface + ?Sized>(&self, surface: &mut S) {
        surface.stroke_line(self.from, self.to, LINE_WEIGHT, rgba(1.0, 1.0, 1.0, self.opacity));
    }
}

#[derive(Debug, Clone)]
pub struct ProximityConnector {
    pub threshold: f32,
    // Half-neighbourhood members of the cell being scanned
    neighbors: Vec<usize>,
}

impl ProximityConnector {
    pub fn new(threshold: f32) -> Result<Self> {
        if !threshold.is_finite() || threshold <= 0.0 {
            return Err(Error::InvalidParam(format!(
                "proximity threshold must be finite and > 0, got {threshold}"
            )));
        }
        Ok(Self {
            threshold,
            neighbors: Vec::new(),
        })
    }

    /// Walk the grid and hand every connection to `emit`. Returns how many were emitted.
    pub fn for_each_connection<F>(
        &mut self,
        grid: &SpatialGrid,
        balls: &[Ball],
        mut emit: F,
    ) -> usize
    where
        F: FnMut(Connection),
    {
        debug_assert!(
            grid.cell_size >= self.threshold,
            "cells smaller than the threshold would miss pairs"
        );

        let threshold = self.threshold;
        let mut emitted = 0;

        for (cell, members) in grid.cells() {
            if members.is_empty() {
                continue;
            }

            // Once per cell, shared by all of its members
            grid.collect_neighbors(cell, &mut self.neighbors);

            for (i, &ball) in members.iter().enumerate() {
                for &other in &members[i + 1..] {
                    if let Some(connection) = evaluate(threshold, balls, ball, other) {
                        emit(connection);
                        emitted += 1;
                    }
                }

                for &other in &self.neighbors {
                    if let Some(connection) = evaluate(threshold, balls, ball, other) {
                        emit(connection);
                        emitted += 1;
                    }
                }
            }
        }

        emitted
    }

    /// Replace the contents of `out` with this frame's connections.
    pub fn connect_all(&mut self, grid: &SpatialGrid, balls: &[Ball], out: &mut Vec<Connection>) {
        out.clear();
        self.for_each_connection(grid, balls, |connection| out.push(connection));
    }

    /// Draw every connection straight onto `surface`. Returns the number of lines drawn.
    pub fn connect_and_draw<S: Surface + ?Sized>(
        &mut self,
        grid: &SpatialGrid,
        balls: &[Ball],
        surface: &mut S,
    ) -> usize {
        self.for_each_connection(grid, balls, |connection| connection.draw(&mut *surface))
    }
}

#[inline]
fn evaluate(threshold: f32, balls: &[Ball], a: usize, b: usize) -> Option<Connection> {
    let from = balls[a].position;
    let to = balls[b].position;
    let distance = from.distance(to);
    if distance > threshold {
        return None;
    }
    Some(Connection {
        a,
        b,
        from,
        to,
        distance,
        opacity: (threshold - distance) / threshold,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::surface::{DrawCall, Recorder};

    fn setup(points: &[(f32, f32)]) -> (SpatialGrid, Vec<Ball>) {
        let mut grid = SpatialGrid::new(100.0, 400.0, 400.0).unwrap();
        let balls: Vec<Ball> = points
            .iter()
            .map(|&(x, y)| Ball::new(pt2(x, y), Vec2::ZERO, 3.0))
            .collect();
        for (i, ball) in balls.iter().enumerate() {
            grid.insert(i, ball.position);
        }
        (grid, balls)
    }

    fn connections(points: &[(f32, f32)]) -> Vec<Connection> {
        let (grid, balls) = setup(points);
        let mut connector = ProximityConnector::new(100.0).unwrap();
        let mut out = Vec::new();
        connector.connect_all(&grid, &balls, &mut out);
        out
    }

    #[test]
    fn rejects_non_positive_threshold() {
        assert!(ProximityConnector::new(0.0).is_err());
        assert!(ProximityConnector::new(-1.0).is_err());
        assert!(ProximityConnector::new(f32::NAN).is_err());
    }

    #[test]
    fn diagonal_neighbour_too_far_is_discarded() {
        // (0,0) and (1,1) are adjacent cells, but the pair is ~127.3 apart
        let (grid, balls) = setup(&[(50.0, 50.0), (140.0, 140.0)]);
        assert_eq!(grid.cell_of(balls[1].position), crate::spatial_grid::CellCoord::new(1, 1));
        assert!(evaluate(100.0, &balls, 0, 1).is_none());
        assert!(connections(&[(50.0, 50.0), (140.0, 140.0)]).is_empty());
    }

    #[test]
    fn close_pair_in_one_cell_connects_with_fading_opacity() {
        let found = connections(&[(50.0, 50.0), (90.0, 90.0)]);
        assert_eq!(found.len(), 1);
        let c = found[0];
        assert_eq!(c.key(), (0, 1));
        assert!((c.distance - 56.5685).abs() < 1e-3);
        assert!((c.opacity - 0.434315).abs() < 1e-3);
    }

    #[test]
    fn pairs_across_every_adjacent_direction_are_found() {
        // Centre ball in cell (1,1), one partner in each of the eight surrounding cells
        let points = [
            (150.0, 150.0),
            (99.0, 99.0),   // up-left
            (150.0, 99.0),  // up
            (201.0, 99.0),  // up-right
            (99.0, 150.0),  // left
            (201.0, 150.0), // right
            (99.0, 201.0),  // down-left
            (150.0, 201.0), // down
            (201.0, 201.0), // down-right
        ];
        let found = connections(&points);
        for partner in 1..points.len() {
            let hits = found.iter().filter(|c| c.key() == (0, partner)).count();
            assert_eq!(hits, 1, "partner {partner}");
        }
    }

    #[test]
    fn each_pair_is_reported_once() {
        let points = [(95.0, 95.0), (105.0, 95.0), (95.0, 105.0), (105.0, 105.0)];
        let found = connections(&points);
        // Four balls straddling four cells, all within 15 of each other
        assert_eq!(found.len(), 6);
        let mut keys: Vec<_> = found.iter().map(Connection::key).collect();
        keys.sort_unstable();
        keys.dedup();
        assert_eq!(keys.len(), 6);
    }

    #[test]
    fn cells_two_apart_are_never_paired() {
        assert!(connections(&[(50.0, 50.0), (250.0, 50.0)]).is_empty());
    }

    #[test]
    fn exact_threshold_is_kept_with_zero_opacity() {
        let found = connections(&[(0.0, 50.0), (100.0, 50.0)]);
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].opacity, 0.0);
    }

    #[test]
    fn draws_one_line_per_connection() {
        let (grid, balls) = setup(&[(50.0, 50.0), (90.0, 90.0), (60.0, 50.0), (390.0, 390.0)]);
        let mut connector = ProximityConnector::new(100.0).unwrap();
        let mut recorder = Recorder::new(400.0, 400.0);
        let drawn = connector.connect_and_draw(&grid, &balls, &mut recorder);

        assert_eq!(drawn, 3);
        assert_eq!(recorder.lines().count(), 3);
        for call in recorder.lines() {
            if let DrawCall::Line { weight, color, .. } = call {
                assert_eq!(*weight, LINE_WEIGHT);
                assert!(color.alpha > 0.0 && color.alpha <= 1.0);
            }
        }
    }
}
