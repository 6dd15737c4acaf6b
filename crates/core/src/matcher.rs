//! Match detector - runs of three or more, legal-move search, bonus shapes
//!
//! A run is only started from its first cell (the cell before it in the same
//! direction is different or off the board), so every run is reported exactly once
//! with all of its cells, however long it is. Scoring depends on run length, not on
//! how many matches were found.

use std::collections::BTreeSet;

use crate::grid::Grid;
use crate::types::{BonusTier, Deity, Position, MIN_RUN};

/// Direction of a run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Orientation {
    Horizontal,
    Vertical,
}

/// One contiguous run of identical deities
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Match {
    pub deity: Deity,
    pub orientation: Orientation,
    /// Member cells in row-major order
    pub positions: Vec<Position>,
}

impl Match {
    pub fn len(&self) -> usize {
        self.positions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    pub fn contains(&self, pos: Position) -> bool {
        self.positions.contains(&pos)
    }
}

/// All horizontal and vertical runs of at least [`MIN_RUN`] identical cells
///
/// Horizontal runs are listed first (row-major by starting cell), then vertical
/// runs (row-major by starting cell). Empty cells never match.
pub fn find_matches(grid: &Grid) -> Vec<Match> {
    let mut matches = Vec::new();
    collect_runs(grid, Orientation::Horizontal, &mut matches);
    collect_runs(grid, Orientation::Vertical, &mut matches);
    matches
}

fn collect_runs(grid: &Grid, orientation: Orientation, out: &mut Vec<Match>) {
    let step = |pos: Position| match orientation {
        Orientation::Horizontal => Position::new(pos.row, pos.col + 1),
        Orientation::Vertical => Position::new(pos.row + 1, pos.col),
    };
    let previous = |pos: Position| match orientation {
        Orientation::Horizontal => pos.col.checked_sub(1).map(|c| Position::new(pos.row, c)),
        Orientation::Vertical => pos.row.checked_sub(1).map(|r| Position::new(r, pos.col)),
    };

    for start in grid.positions() {
        let Some(deity) = grid.deity_at(start) else {
            continue;
        };

        // Interior cells belong to the run that starts earlier.
        if let Some(prev) = previous(start) {
            if grid.deity_at(prev) == Some(deity) {
                continue;
            }
        }

        let mut positions = vec![start];
        let mut next = step(start);
        while grid.deity_at(next) == Some(deity) {
            positions.push(next);
            next = step(next);
        }

        if positions.len() >= MIN_RUN {
            out.push(Match {
                deity,
                orientation,
                positions,
            });
        }
    }
}

/// Union of every matched cell, deduplicated, row-major
pub fn get_all_match_positions(matches: &[Match]) -> BTreeSet<Position> {
    matches
        .iter()
        .flat_map(|m| m.positions.iter().copied())
        .collect()
}

/// First swap (row-major, right neighbour before down neighbour) that produces a match
///
/// Every pair of adjacent, occupied, different cells is tried on a scratch copy of
/// the grid with a full rescan, so the answer is exact.
pub fn find_valid_swap(grid: &Grid) -> Option<(Position, Position)> {
    let mut scratch = grid.clone();

    for pos in grid.positions() {
        if grid.deity_at(pos).is_none() {
            continue;
        }
        for other in [
            Position::new(pos.row, pos.col + 1),
            Position::new(pos.row + 1, pos.col),
        ] {
            let Some(other_deity) = grid.deity_at(other) else {
                continue;
            };
            if grid.deity_at(pos) == Some(other_deity) {
                continue;
            }

            scratch.swap(pos, other);
            let matched = !find_matches(&scratch).is_empty();
            scratch.swap(pos, other);

            if matched {
                return Some((pos, other));
            }
        }
    }

    None
}

/// Whether any legal swap exists
pub fn has_valid_moves(grid: &Grid) -> bool {
    find_valid_swap(grid).is_some()
}

/// Feedback tier for one cascade pass
///
/// Highest applicable tier wins: any run of five or more, then a same-deity
/// horizontal/vertical crossing (L or T), then any run of exactly four.
pub fn classify_bonus(matches: &[Match]) -> BonusTier {
    if matches.iter().any(|m| m.len() >= 5) {
        return BonusTier::Grand;
    }

    let crossing = matches
        .iter()
        .filter(|h| h.orientation == Orientation::Horizontal)
        .any(|h| {
            matches.iter().any(|v| {
                v.orientation == Orientation::Vertical
                    && v.deity == h.deity
                    && v.positions.iter().any(|p| h.contains(*p))
            })
        });
    if crossing {
        return BonusTier::Shape;
    }

    if matches.iter().any(|m| m.len() == 4) {
        return BonusTier::Four;
    }

    BonusTier::None
}
