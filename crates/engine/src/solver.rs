use derive_more::{Display, Error};
use tracing::debug;

use crate::core::{
    calculate_score, classify_bonus, find_matches, get_all_match_positions, CellSource, Grid,
    NoHooks, Session, SessionHooks, SwapResult,
};
use crate::types::{BonusTier, Deity, GameMode, Position};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, Error)]
pub enum SolveError {
    #[display("session is not playable")]
    NotPlayable,
    #[display("no swap on the board makes a match")]
    NoMoves,
}

impl SolveError {
    pub fn code(self) -> &'static str {
        match self {
            SolveError::NotPlayable => "not_playable",
            SolveError::NoMoves => "no_moves",
        }
    }

    pub fn message(self) -> &'static str {
        match self {
            SolveError::NotPlayable => "session is not playable",
            SolveError::NoMoves => "no swap on the board makes a match",
        }
    }
}

/// A legal swap and what its first pass would do
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SwapCandidate {
    pub a: Position,
    pub b: Position,
    /// Distinct deities matched that the mode counts
    pub objective_units: u32,
    pub bonus: BonusTier,
    /// Cells the first pass would clear
    pub cleared: usize,
    /// Score of the first pass (combo 1); refills can only add to it
    pub score: u32,
}

impl SwapCandidate {
    fn rank(&self) -> (u32, BonusTier, usize) {
        (self.objective_units, self.bonus, self.cleared)
    }
}

/// Every swap that makes a match, in row-major order (right neighbour before down)
pub fn candidate_swaps(grid: &Grid, mode: GameMode) -> Vec<SwapCandidate> {
    let mut scratch = grid.clone();
    let mut out = Vec::new();

    for a in grid.positions() {
        let Some(deity) = grid.deity_at(a) else {
            continue;
        };
        for b in [
            Position::new(a.row, a.col + 1),
            Position::new(a.row + 1, a.col),
        ] {
            match grid.deity_at(b) {
                Some(other) if other != deity => {}
                _ => continue,
            }

            scratch.swap(a, b);
            let matches = find_matches(&scratch);
            scratch.swap(a, b);
            if matches.is_empty() {
                continue;
            }

            let mut counted: Vec<Deity> = Vec::new();
            for m in &matches {
                if mode.counts(m.deity) && !counted.contains(&m.deity) {
                    counted.push(m.deity);
                }
            }

            out.push(SwapCandidate {
                a,
                b,
                objective_units: counted.len() as u32,
                bonus: classify_bonus(&matches),
                cleared: get_all_match_positions(&matches).len(),
                score: calculate_score(&matches, 1),
            });
        }
    }

    out
}

/// The strongest candidate: most objective units, then highest bonus tier, then
/// most cells cleared; ties go to the earliest in row-major order
pub fn best_swap(grid: &Grid, mode: GameMode) -> Option<SwapCandidate> {
    candidate_swaps(grid, mode)
        .into_iter()
        .fold(None, |best, candidate| match best {
            Some(best) if best.rank() >= candidate.rank() => Some(best),
            _ => Some(candidate),
        })
}

/// Play the [`best_swap`] on `session`
pub fn play_best_swap<S: CellSource>(session: &mut Session<S>) -> Result<SwapResult, SolveError> {
    play_best_swap_observed(session, &mut NoHooks)
}

/// [`play_best_swap`], reporting the swap's events to `hooks`
pub fn play_best_swap_observed<S: CellSource>(
    session: &mut Session<S>,
    hooks: &mut dyn SessionHooks,
) -> Result<SwapResult, SolveError> {
    if session.status().is_terminal() || session.moves_remaining() == 0 {
        return Err(SolveError::NotPlayable);
    }

    let Some(candidate) = best_swap(session.grid(), session.mode()) else {
        return Err(SolveError::NoMoves);
    };
    debug!(
        a = ?candidate.a,
        b = ?candidate.b,
        units = candidate.objective_units,
        cleared = candidate.cleared,
        "playing best swap"
    );

    Ok(session.swap_observed(candidate.a, candidate.b, hooks))
}
