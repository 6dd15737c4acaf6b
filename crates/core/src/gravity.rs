//! Gravity module - settling a board after a cascade pass clears cells
//!
//! [`apply_gravity`] compacts every column downward with a bottom-up two-pointer
//! scan, leaving the empties at the top. [`fill_gaps`] then draws a new deity for
//! each remaining empty, column by column, top-down. Fill makes no attempt to avoid
//! matches: new matches are what drive cascades, and the session rescans for them.
//!
//! Both report what moved or appeared so a renderer can animate it; the engine
//! itself only needs the settled grid.

use crate::grid::Grid;
use crate::source::{CellSource, Palette};
use crate::types::{Deity, Position};

/// A cell that fell from `from` to `to`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Movement {
    pub deity: Deity,
    pub from: Position,
    pub to: Position,
}

/// A cell drawn into a gap at `position`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SpawnedCell {
    pub deity: Deity,
    pub position: Position,
}

/// Compact non-empty cells to the bottom of each column
///
/// Returns one movement per cell that changed row, column by column, bottom-up.
pub fn apply_gravity(grid: &mut Grid) -> Vec<Movement> {
    let mut movements = Vec::new();

    for col in 0..grid.cols() {
        let mut write_row = grid.rows();

        // Scan from bottom to top
        for read_row in (0..grid.rows()).rev() {
            let from = Position::new(read_row, col);
            let Some(deity) = grid.deity_at(from) else {
                continue;
            };

            write_row -= 1;
            if write_row != read_row {
                let to = Position::new(write_row, col);
                grid.set(to, Some(deity));
                grid.set(from, None);
                movements.push(Movement { deity, from, to });
            }
        }
    }

    movements
}

/// Draw a deity into every empty cell, columns left to right, each top-down
pub fn fill_gaps<S>(grid: &mut Grid, palette: &Palette, source: &mut S) -> Vec<SpawnedCell>
where
    S: CellSource + ?Sized,
{
    let mut spawned = Vec::with_capacity(grid.empty_count());

    for col in 0..grid.cols() {
        for row in 0..grid.rows() {
            let position = Position::new(row, col);
            if grid.get(position) == Some(None) {
                let deity = source.draw(palette);
                grid.set(position, Some(deity));
                spawned.push(SpawnedCell { deity, position });
            }
        }
    }

    spawned
}
