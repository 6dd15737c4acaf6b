//! Board generator - fresh boards with no pre-made matches
//!
//! Cells are filled top-to-bottom, left-to-right. Each draw is rejected if it would
//! complete a run of three with the two cells already placed to its left or above it.
//! After [`GENERATION_RETRY_LIMIT`] draws the last one is kept as-is, so a board
//! straight out of [`create_board`] is not guaranteed match-free;
//! [`generate_playable_board`] is the wrapper that checks the whole board.

use tracing::{debug, warn};

use crate::grid::Grid;
use crate::matcher::{find_matches, has_valid_moves};
use crate::source::{CellSource, Palette};
use crate::types::{Deity, Position, BOARD_REGEN_LIMIT, GENERATION_RETRY_LIMIT};

/// Fill a new `rows x cols` board from `palette`, avoiding runs of three where the
/// retry budget allows
pub fn create_board<S>(rows: usize, cols: usize, palette: &Palette, source: &mut S) -> Grid
where
    S: CellSource + ?Sized,
{
    let mut grid = Grid::new(rows, cols);

    for row in 0..rows {
        for col in 0..cols {
            let pos = Position::new(row, col);
            let mut deity = source.draw(palette);
            let mut attempts = 1;
            while completes_run(&grid, pos, deity) && attempts < GENERATION_RETRY_LIMIT {
                deity = source.draw(palette);
                attempts += 1;
            }
            grid.set(pos, Some(deity));
        }
    }

    grid
}

/// Whether placing `deity` at `pos` would finish a run with the two earlier cells
/// on its left or the two earlier cells above it
fn completes_run(grid: &Grid, pos: Position, deity: Deity) -> bool {
    let same = |row: usize, col: usize| grid.deity_at(Position::new(row, col)) == Some(deity);

    let left = pos.col >= 2 && same(pos.row, pos.col - 1) && same(pos.row, pos.col - 2);
    let up = pos.row >= 2 && same(pos.row - 1, pos.col) && same(pos.row - 2, pos.col);
    left || up
}

/// A board that starts with no matches and at least one legal move
///
/// Regenerates from scratch until both hold. If [`BOARD_REGEN_LIMIT`] boards in a
/// row fail (only possible for palettes or boards too small to support a move),
/// the last candidate is returned and a warning is logged.
pub fn generate_playable_board<S>(
    rows: usize,
    cols: usize,
    palette: &Palette,
    source: &mut S,
) -> Grid
where
    S: CellSource + ?Sized,
{
    let mut grid = create_board(rows, cols, palette, source);
    for attempt in 1..=BOARD_REGEN_LIMIT {
        if is_playable(&grid) {
            if attempt > 1 {
                debug!(attempt, rows, cols, "generated playable board after retries");
            }
            return grid;
        }
        if attempt < BOARD_REGEN_LIMIT {
            grid = create_board(rows, cols, palette, source);
        }
    }

    warn!(
        rows,
        cols,
        palette = palette.len(),
        limit = BOARD_REGEN_LIMIT,
        "could not generate a playable board; using last candidate"
    );
    grid
}

/// No standing matches and at least one swap that makes one
pub fn is_playable(grid: &Grid) -> bool {
    find_matches(grid).is_empty() && has_valid_moves(grid)
}
