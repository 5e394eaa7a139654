/*
 * Spatial Grid Module
 *
 * This module defines the SpatialGrid struct for proximity lookups.
 * It divides the surface into square cells ("chunks") whose side equals the
 * proximity threshold, so two points closer than the threshold always sit in
 * the same cell or in adjacent ones.
 *
 * The grid only stores ball indices; balls do not know which cell they are in.
 * Membership is kept current incrementally: a ball is moved between cells
 * only on the ticks where it crosses a cell boundary.
 */

use nannou::prelude::*;

use crate::error::{Error, Result};

/// Offsets scanned from every cell to reach neighbouring cells.
///
/// Covering only these four of the eight directions (right, down-right, down,
/// down-left) visits every pair of adjacent cells exactly once.
pub const HALF_NEIGHBORHOOD: [(isize, isize); 4] = [(1, 0), (1, 1), (0, 1), (-1, 1)];

/// Upper bound on the number of cells a grid may allocate.
pub const MAX_CELLS: usize = 1 << 20;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CellCoord {
    pub x: usize,
    pub y: usize,
}

impl CellCoord {
    pub const fn new(x: usize, y: usize) -> Self {
        Self { x, y }
    }
}

#[derive(Debug, Clone)]
pub struct SpatialGrid {
    pub cell_size: f32,
    pub columns: usize,
    pub rows: usize,
    // Row-major cells, each holding ball indices in insertion order
    grid: Vec<Vec<usize>>,
}

impl SpatialGrid {
    /// Build an empty grid covering a `width` x `height` surface.
    pub fn new(cell_size: f32, width: f32, height: f32) -> Result<Self> {
        if !cell_size.is_finite() || cell_size <= 0.0 {
            return Err(Error::InvalidParam(format!(
                "cell size must be finite and > 0, got {cell_size}"
            )));
        }
        if !(width.is_finite() && height.is_finite()) || width <= 0.0 || height <= 0.0 {
            return Err(Error::InvalidParam(format!(
                "grid extent must be finite and > 0, got {width}x{height}"
            )));
        }

        // Casts saturate, so a tiny cell size shows up as an oversized count here
        let columns = (width / cell_size).ceil().max(1.0) as usize;
        let rows = (height / cell_size).ceil().max(1.0) as usize;
        let cell_count = columns
            .checked_mul(rows)
            .filter(|&count| count <= MAX_CELLS)
            .ok_or_else(|| {
                Error::InvalidParam(format!(
                    "cell size {cell_size} splits {width}x{height} into more than {MAX_CELLS} cells"
                ))
            })?;

        Ok(Self {
            cell_size,
            columns,
            rows,
            grid: vec![Vec::new(); cell_count],
        })
    }

    // Convert surface coordinates to the cell containing them
    #[inline]
    pub fn cell_of(&self, position: Point2) -> CellCoord {
        // Positions on the far edge would floor one past the last cell
        let x = (position.x / self.cell_size).floor().clamp(0.0, (self.columns - 1) as f32);
        let y = (position.y / self.cell_size).floor().clamp(0.0, (self.rows - 1) as f32);
        CellCoord::new(x as usize, y as usize)
    }

    #[inline]
    fn cell_index(&self, cell: CellCoord) -> usize {
        cell.y * self.columns + cell.x
    }

    /// Balls currently in `cell`.
    pub fn cell(&self, cell: CellCoord) -> &[usize] {
        &self.grid[self.cell_index(cell)]
    }

    // Insert a ball into the cell containing `position`
    #[inline]
    pub fn insert(&mut self, ball: usize, position: Point2) {
        let cell_index = self.cell_index(self.cell_of(position));
        self.grid[cell_index].push(ball);
    }

    /// Remove a ball from the cell containing `position`.
    ///
    /// Returns false, leaving the grid untouched, if the ball is not in that cell.
    pub fn remove(&mut self, ball: usize, position: Point2) -> bool {
        let cell_index = self.cell_index(self.cell_of(position));
        let cell = &mut self.grid[cell_index];
        match cell.iter().position(|&b| b == ball) {
            Some(i) => {
                cell.remove(i);
                true
            }
            None => false,
        }
    }

    /// Move a ball that went from `previous` to `current` if it changed cell.
    ///
    /// Returns whether the ball was moved.
    pub fn relocate_if_needed(&mut self, ball: usize, previous: Point2, current: Point2) -> bool {
        if self.cell_of(previous) == self.cell_of(current) {
            return false;
        }
        self.remove(ball, previous);
        self.insert(ball, current);
        true
    }

    /// Balls in the half-neighbourhood of `cell`, skipping offsets off the grid.
    pub fn neighbors_of(&self, cell: CellCoord) -> Vec<usize> {
        let mut result = Vec::new();
        self.collect_neighbors(cell, &mut result);
        result
    }

    // Same as neighbors_of, but reuses the caller's buffer
    pub fn collect_neighbors(&self, cell: CellCoord, out: &mut Vec<usize>) {
        out.clear();

        let columns = self.columns as isize;
        let rows = self.rows as isize;

        for (dx, dy) in HALF_NEIGHBORHOOD {
            let check_x = cell.x as isize + dx;
            let check_y = cell.y as isize + dy;

            if check_x < 0 || check_x >= columns || check_y < 0 || check_y >= rows {
                continue;
            }

            let cell_index = check_y as usize * self.columns + check_x as usize;
            out.extend_from_slice(&self.grid[cell_index]);
        }
    }

    /// Every cell with its members, row by row.
    pub fn cells(&self) -> impl Iterator<Item = (CellCoord, &[usize])> + '_ {
        let columns = self.columns;
        self.grid
            .iter()
            .enumerate()
            .map(move |(i, members)| (CellCoord::new(i % columns, i / columns), members.as_slice()))
    }

    /// The cell holding `ball`, found by scanning the whole grid.
    pub fn locate(&self, ball: usize) -> Option<CellCoord> {
        self.cells()
            .find(|(_, members)| members.contains(&ball))
            .map(|(cell, _)| cell)
    }

    /// Top-left corner of `cell` in surface coordinates.
    pub fn cell_origin(&self, cell: CellCoord) -> Point2 {
        pt2(cell.x as f32 * self.cell_size, cell.y as f32 * self.cell_size)
    }

    /// Total number of memberships across all cells.
    #[cfg(test)]
    pub(crate) fn len(&self) -> usize {
        self.grid.iter().map(Vec::len).sum()
    }

    #[cfg(test)]
    pub(crate) fn is_empty(&self) -> bool {
        self.grid.iter().all(Vec::is_empty)
    }
}
