//! Session module - one level being played
//!
//! A [`Session`] owns the grid, the move budget, the score and the per-deity
//! objective counters, and only changes through [`Session::swap`]. A swap that makes
//! no match is undone and costs nothing; a swap that does costs one move and is
//! resolved to a settled board in one call:
//!
//! 1. clear every matched cell, drop the survivors, refill the gaps
//! 2. rescan; repeat with the combo level one higher while new matches appear
//! 3. add the objective units and pass scores, then regenerate the board if no
//!    legal move is left (free of charge)
//! 4. `Won` if the objective is met, else `Lost` if the budget is spent
//!
//! Hooks see the finished result afterwards and cannot influence it.

use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing::{debug, info, instrument, warn};

use crate::events::{
    CascadePass, DeityCounts, LevelResult, NoHooks, ProgressUpdate, SessionHooks, SwapOutcome,
    SwapResult,
};
use crate::generator::generate_playable_board;
use crate::gravity::{apply_gravity, fill_gaps};
use crate::grid::Grid;
use crate::level::{LevelConfig, LevelError};
use crate::matcher::{
    classify_bonus, find_matches, find_valid_swap, get_all_match_positions, has_valid_moves, Match,
};
use crate::scoring::{calculate_score, get_stars};
use crate::snapshot::SessionSnapshot;
use crate::source::{CellSource, Palette};
use crate::types::{Deity, GameMode, GameStatus, Position, MAX_CASCADE_PASSES};

/// A level in play
#[derive(Debug, Clone)]
pub struct Session<S: CellSource = StdRng> {
    level: LevelConfig,
    mode: GameMode,
    palette: Palette,
    grid: Grid,
    score: u32,
    moves_remaining: u32,
    counts: DeityCounts,
    status: GameStatus,
    combo: u32,
    last_swap: Option<(Deity, Deity)>,
    source: S,
}

impl Session<StdRng> {
    /// Start `level` with an entropy-seeded RNG
    pub fn new(level: &LevelConfig, mode: GameMode) -> Result<Self, LevelError> {
        Self::with_source(level, mode, StdRng::from_entropy())
    }

    /// Start `level` with a seeded RNG; the same seed replays the same game
    pub fn with_seed(level: &LevelConfig, mode: GameMode, seed: u64) -> Result<Self, LevelError> {
        Self::with_source(level, mode, StdRng::seed_from_u64(seed))
    }
}

impl<S: CellSource> Session<S> {
    /// Start `level` drawing every new cell from `source`
    #[instrument(skip(level, source), fields(level_id = level.id))]
    pub fn with_source(
        level: &LevelConfig,
        mode: GameMode,
        mut source: S,
    ) -> Result<Self, LevelError> {
        let palette = checked_palette(level, mode)?;
        let grid = generate_playable_board(level.rows, level.cols, &palette, &mut source);
        info!(
            rows = level.rows,
            cols = level.cols,
            target = level.japa_target,
            moves = level.moves,
            "session started"
        );

        Ok(Self {
            level: level.clone(),
            mode,
            palette,
            grid,
            score: 0,
            moves_remaining: level.moves,
            counts: DeityCounts::new(),
            status: GameStatus::Playing,
            combo: 0,
            last_swap: None,
            source,
        })
    }

    /// Resume from a snapshot, taken as-is
    ///
    /// Counters and status are not re-derived and the grid is not re-checked. The
    /// level is still validated, since refills draw from its palette.
    #[instrument(skip(level, snapshot, source), fields(level_id = level.id))]
    pub fn restore(
        level: &LevelConfig,
        mode: GameMode,
        snapshot: SessionSnapshot,
        source: S,
    ) -> Result<Self, LevelError> {
        let palette = checked_palette(level, mode)?;
        if snapshot.level_id != level.id {
            warn!(
                snapshot_level = snapshot.level_id,
                "restoring a snapshot taken on another level"
            );
        }
        info!(
            status = snapshot.status.as_str(),
            moves = snapshot.moves_remaining,
            "session restored"
        );

        Ok(Self {
            level: level.clone(),
            mode,
            palette,
            grid: snapshot.grid,
            score: snapshot.score,
            moves_remaining: snapshot.moves_remaining,
            counts: snapshot.counts,
            status: snapshot.status,
            combo: snapshot.combo,
            last_swap: None,
            source,
        })
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn moves_remaining(&self) -> u32 {
        self.moves_remaining
    }

    pub fn status(&self) -> GameStatus {
        self.status
    }

    /// Objective units counted so far, per deity
    pub fn counts(&self) -> &DeityCounts {
        &self.counts
    }

    pub fn objective_completed(&self) -> u32 {
        self.counts.total()
    }

    pub fn objective_target(&self) -> u32 {
        self.level.japa_target
    }

    pub fn mode(&self) -> GameMode {
        self.mode
    }

    pub fn level(&self) -> &LevelConfig {
        &self.level
    }

    pub fn palette(&self) -> &Palette {
        &self.palette
    }

    /// Combo depth of the last resolved swap, 0 before the first
    pub fn combo(&self) -> u32 {
        self.combo
    }

    /// The two deities of the last resolved swap, in request order
    pub fn last_swap(&self) -> Option<(Deity, Deity)> {
        self.last_swap
    }

    /// Star rating for the current progress (0 until won)
    pub fn stars(&self) -> u8 {
        if self.status == GameStatus::Won {
            get_stars(
                self.objective_completed(),
                self.level.japa_target,
                self.moves_remaining,
            )
        } else {
            0
        }
    }

    /// First legal swap on the current board, if any
    pub fn hint(&self) -> Option<(Position, Position)> {
        find_valid_swap(&self.grid)
    }

    pub fn snapshot(&self) -> SessionSnapshot {
        SessionSnapshot {
            level_id: self.level.id,
            grid: self.grid.clone(),
            score: self.score,
            moves_remaining: self.moves_remaining,
            counts: self.counts,
            status: self.status,
            combo: self.combo,
        }
    }

    /// Swap two adjacent cells and resolve the result
    pub fn swap(&mut self, a: Position, b: Position) -> SwapResult {
        self.swap_observed(a, b, &mut NoHooks)
    }

    /// [`swap`](Self::swap), reporting cascade passes, progress and a win to `hooks`
    #[instrument(skip(self, hooks), fields(level_id = self.level.id))]
    pub fn swap_observed(
        &mut self,
        a: Position,
        b: Position,
        hooks: &mut dyn SessionHooks,
    ) -> SwapResult {
        let Some((deity_a, deity_b)) = self.swap_pair(a, b) else {
            debug!("swap rejected");
            return self.result(SwapOutcome::Rejected, DeityCounts::new(), Vec::new(), false);
        };

        self.grid.swap(a, b);
        let first = find_matches(&self.grid);
        if first.is_empty() {
            self.grid.swap(a, b);
            debug!("swap made no match; reverted");
            return self.result(SwapOutcome::Reverted, DeityCounts::new(), Vec::new(), false);
        }

        self.moves_remaining -= 1;
        self.last_swap = Some((deity_a, deity_b));

        let passes = self.resolve_cascade(first);

        let mut matched = DeityCounts::new();
        let mut counted = DeityCounts::new();
        for pass in &passes {
            for &deity in &pass.deities {
                matched.add(deity, 1);
                if self.mode.counts(deity) {
                    counted.add(deity, 1);
                }
            }
            self.score = self.score.saturating_add(pass.score);
        }
        self.counts.merge(&counted);
        self.combo = passes.last().map(|p| p.combo).unwrap_or(0);

        let rescued = self.rescue_if_stuck();
        self.update_status();

        let result = self.result(SwapOutcome::Resolved, matched, passes, rescued);
        self.notify(hooks, &result, counted);
        result
    }

    /// Both deities if `a`/`b` is a legal request right now
    fn swap_pair(&self, a: Position, b: Position) -> Option<(Deity, Deity)> {
        if self.status.is_terminal() || self.moves_remaining == 0 || !a.is_adjacent(b) {
            return None;
        }
        Some((self.grid.deity_at(a)?, self.grid.deity_at(b)?))
    }

    fn resolve_cascade(&mut self, first: Vec<Match>) -> Vec<CascadePass> {
        let mut passes = Vec::new();
        let mut matches = first;
        let mut combo = 1u32;

        loop {
            let cleared = get_all_match_positions(&matches);
            let deities = distinct_deities(&matches);
            let bonus = classify_bonus(&matches);
            let score = calculate_score(&matches, combo);

            for &pos in &cleared {
                self.grid.set(pos, None);
            }
            let movements = apply_gravity(&mut self.grid);
            let spawned = fill_gaps(&mut self.grid, &self.palette, &mut self.source);

            debug!(
                combo,
                matches = matches.len(),
                cleared = cleared.len(),
                score,
                bonus = ?bonus,
                "cascade pass"
            );

            passes.push(CascadePass {
                combo,
                matches,
                cleared,
                deities,
                bonus,
                score,
                movements,
                spawned,
            });

            matches = find_matches(&self.grid);
            if matches.is_empty() {
                break;
            }
            if combo >= MAX_CASCADE_PASSES {
                warn!(
                    passes = passes.len(),
                    pending = matches.len(),
                    "cascade pass limit reached; leaving remaining matches on the board"
                );
                break;
            }
            combo += 1;
        }

        passes
    }

    /// Replace a board with no legal move; costs no move and no score
    fn rescue_if_stuck(&mut self) -> bool {
        if has_valid_moves(&self.grid) {
            return false;
        }
        info!("no legal moves left; regenerating board");
        self.grid = generate_playable_board(
            self.level.rows,
            self.level.cols,
            &self.palette,
            &mut self.source,
        );
        true
    }

    fn update_status(&mut self) {
        let completed = self.objective_completed();
        if completed >= self.level.japa_target {
            self.status = GameStatus::Won;
            info!(
                completed,
                score = self.score,
                moves_left = self.moves_remaining,
                "level won"
            );
        } else if self.moves_remaining == 0 {
            self.status = GameStatus::Lost;
            info!(
                completed,
                target = self.level.japa_target,
                score = self.score,
                "level lost"
            );
        }
    }

    fn result(
        &self,
        outcome: SwapOutcome,
        matched: DeityCounts,
        passes: Vec<CascadePass>,
        rescued: bool,
    ) -> SwapResult {
        let won_now = outcome == SwapOutcome::Resolved && self.status == GameStatus::Won;
        SwapResult {
            outcome,
            matched,
            passes,
            rescued,
            status: self.status,
            score: self.score,
            moves_remaining: self.moves_remaining,
            objective_completed: self.objective_completed(),
            stars: won_now.then(|| self.stars()),
        }
    }

    fn notify(&self, hooks: &mut dyn SessionHooks, result: &SwapResult, counted: DeityCounts) {
        for pass in &result.passes {
            if let Err(err) = hooks.on_cascade_pass(pass) {
                warn!(error = %err, combo = pass.combo, "cascade hook failed");
            }
        }

        let update = ProgressUpdate {
            counted,
            totals: self.counts,
            objective_completed: self.objective_completed(),
            objective_target: self.level.japa_target,
        };
        if let Err(err) = hooks.on_progress(&update) {
            warn!(error = %err, "progress hook failed");
        }

        if let Some(stars) = result.stars {
            let level_result = LevelResult {
                level_id: self.level.id,
                stars,
                objective_completed: self.objective_completed(),
                best_score: self.score,
            };
            if let Err(err) = hooks.on_level_complete(&level_result) {
                warn!(error = %err, "level completion hook failed");
            }
        }
    }
}

/// Validate the level and check the mode's target deity can appear on its board
fn checked_palette(level: &LevelConfig, mode: GameMode) -> Result<Palette, LevelError> {
    level.validate()?;
    let palette = level.palette();
    if let GameMode::Deity(deity) = mode {
        if !palette.contains(deity) {
            return Err(LevelError::DeityOutsidePalette {
                level: level.id,
                deity,
                max_gem_types: level.max_gem_types,
            });
        }
    }
    Ok(palette)
}

/// Deities in the pass, first appearance order, each once
fn distinct_deities(matches: &[Match]) -> Vec<Deity> {
    let mut deities = Vec::with_capacity(matches.len());
    for m in matches {
        if !deities.contains(&m.deity) {
            deities.push(m.deity);
        }
    }
    deities
}
