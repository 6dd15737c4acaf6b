//! Events module - what a swap reports back, and the hooks that receive it
//!
//! A resolved swap produces one [`CascadePass`] per round of clearing, a
//! [`ProgressUpdate`] once the cascade settles, and a [`LevelResult`] if the level
//! was won. The session returns all of it in a [`SwapResult`] and also hands it to
//! an optional [`SessionHooks`] implementation (audio cues, animation, progress
//! persistence).
//!
//! Hooks are fire-and-forget: an `Err` from a hook is logged and otherwise ignored,
//! it never changes or rolls back the session.

use std::collections::BTreeMap;
use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::gravity::{Movement, SpawnedCell};
use crate::matcher::Match;
use crate::types::{BonusTier, Deity, GameStatus, Position, DEITY_COUNT};

/// A count per deity
///
/// Serialized as a map from deity name to count, omitting zeros.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(from = "BTreeMap<Deity, u32>", into = "BTreeMap<Deity, u32>")]
pub struct DeityCounts {
    counts: [u32; DEITY_COUNT],
}

impl DeityCounts {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, deity: Deity) -> u32 {
        self.counts[deity.index()]
    }

    pub fn add(&mut self, deity: Deity, amount: u32) {
        let slot = &mut self.counts[deity.index()];
        *slot = slot.saturating_add(amount);
    }

    /// Sum over all deities
    pub fn total(&self) -> u32 {
        self.counts.iter().fold(0u32, |acc, c| acc.saturating_add(*c))
    }

    pub fn is_empty(&self) -> bool {
        self.counts.iter().all(|&c| c == 0)
    }

    /// Non-zero entries in palette order
    pub fn iter(&self) -> impl Iterator<Item = (Deity, u32)> + '_ {
        Deity::ALL
            .iter()
            .map(|&d| (d, self.counts[d.index()]))
            .filter(|&(_, c)| c > 0)
    }

    /// Add every count from `other`
    pub fn merge(&mut self, other: &DeityCounts) {
        for (deity, count) in other.iter() {
            self.add(deity, count);
        }
    }
}

impl From<BTreeMap<Deity, u32>> for DeityCounts {
    fn from(map: BTreeMap<Deity, u32>) -> Self {
        let mut counts = Self::default();
        for (deity, count) in map {
            counts.add(deity, count);
        }
        counts
    }
}

impl From<DeityCounts> for BTreeMap<Deity, u32> {
    fn from(counts: DeityCounts) -> Self {
        counts.iter().collect()
    }
}

/// One round of clear, gravity and refill inside a swap's resolution
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CascadePass {
    /// 1 for the matches the swap made, +1 per chained pass
    pub combo: u32,
    pub matches: Vec<Match>,
    /// Every cell cleared this pass
    pub cleared: BTreeSet<Position>,
    /// Distinct deities matched this pass (one objective unit each)
    pub deities: Vec<Deity>,
    pub bonus: BonusTier,
    pub score: u32,
    pub movements: Vec<Movement>,
    pub spawned: Vec<SpawnedCell>,
}

/// Objective progress after a cascade settles
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProgressUpdate {
    /// Units this swap added to the objective (after the mode filter)
    pub counted: DeityCounts,
    /// Running per-deity totals for the session
    pub totals: DeityCounts,
    pub objective_completed: u32,
    pub objective_target: u32,
}

/// Reported once when a level is won, for the caller to persist
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LevelResult {
    pub level_id: u32,
    pub stars: u8,
    pub objective_completed: u32,
    pub best_score: u32,
}

/// What happened to a requested swap
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SwapOutcome {
    /// Not a legal request (terminal session, no moves, out of range,
    /// not adjacent, or an empty cell); nothing was touched
    Rejected,
    /// Legal, but made no match; swapped back, no move used
    Reverted,
    /// Made at least one match; one move used and the cascade resolved
    Resolved,
}

/// Everything a swap did
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SwapResult {
    pub outcome: SwapOutcome,
    /// Objective units per deity matched by this swap, before the mode filter
    pub matched: DeityCounts,
    pub passes: Vec<CascadePass>,
    /// The settled board had no legal move and was regenerated
    pub rescued: bool,
    pub status: GameStatus,
    pub score: u32,
    pub moves_remaining: u32,
    pub objective_completed: u32,
    /// Set when this swap won the level
    pub stars: Option<u8>,
}

impl SwapResult {
    pub fn is_resolved(&self) -> bool {
        self.outcome == SwapOutcome::Resolved
    }

    /// Points this swap earned
    pub fn points(&self) -> u32 {
        self.passes
            .iter()
            .fold(0u32, |acc, p| acc.saturating_add(p.score))
    }

    /// Deepest combo level reached, 0 if nothing matched
    pub fn max_combo(&self) -> u32 {
        self.passes.last().map(|p| p.combo).unwrap_or(0)
    }
}

/// Receiver for session events
///
/// All methods default to doing nothing.
pub trait SessionHooks {
    /// Called for every cascade pass, in order, after the cascade settles
    fn on_cascade_pass(&mut self, _pass: &CascadePass) -> anyhow::Result<()> {
        Ok(())
    }

    /// Called once per resolved swap with the updated objective counters
    fn on_progress(&mut self, _update: &ProgressUpdate) -> anyhow::Result<()> {
        Ok(())
    }

    /// Called once when the level is won
    fn on_level_complete(&mut self, _result: &LevelResult) -> anyhow::Result<()> {
        Ok(())
    }
}

/// Hooks that ignore every event
#[derive(Debug, Clone, Copy, Default)]
pub struct NoHooks;

impl SessionHooks for NoHooks {}
