//! Scoring module - cascade points and star ratings
//!
//! Points for a cascade pass are `floor(cells * BASE_SCORE * (1 + (combo - 1) * 0.5))`,
//! where `cells` sums the length of every match in the pass (a long run scores by
//! length, not as one match) and `combo` is 1 for the pass the swap itself made and
//! grows by one for each chained pass after a refill.
//!
//! Everything is computed in integers: the multiplier is `(combo + 1) / 2`, applied
//! after the multiplication so the floor is exact.

use crate::matcher::Match;
use crate::types::{BASE_SCORE, THREE_STAR_MOVES_LEFT, THREE_STAR_RATIO, TWO_STAR_RATIO};

/// Score for one cascade pass
///
/// # Examples
///
/// ```
/// use japa_match_core::{calculate_score, Grid, find_matches};
///
/// let grid = Grid::from_digits(&["000", "123", "231"]).unwrap();
/// let matches = find_matches(&grid);
/// assert_eq!(calculate_score(&matches, 1), 180);
/// assert_eq!(calculate_score(&matches, 2), 270);
/// ```
pub fn calculate_score(matches: &[Match], combo_level: u32) -> u32 {
    let cells: u32 = matches.iter().map(|m| m.len() as u32).sum();
    score_for_cells(cells, combo_level)
}

/// Score for `cells` matched cells at `combo_level`
pub fn score_for_cells(cells: u32, combo_level: u32) -> u32 {
    let base = cells.saturating_mul(BASE_SCORE);
    let scaled = (base as u64) * (combo_level as u64 + 1) / 2;
    scaled.min(u32::MAX as u64) as u32
}

/// Star rating for a finished level
///
/// - 0 if the objective was not reached
/// - 3 if completed at least twice the target, or with at least 10 moves left
/// - 2 if completed at least one and a half times the target
/// - 1 otherwise
pub fn get_stars(objective_completed: u32, objective_target: u32, moves_remaining: u32) -> u8 {
    if objective_completed < objective_target {
        return 0;
    }

    let completed = objective_completed as u64;
    let target = objective_target as u64;
    let reaches = |(num, den): (u32, u32)| completed * den as u64 >= target * num as u64;

    if reaches(THREE_STAR_RATIO) || moves_remaining >= THREE_STAR_MOVES_LEFT {
        3
    } else if reaches(TWO_STAR_RATIO) {
        2
    } else {
        1
    }
}
