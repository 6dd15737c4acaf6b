//! Session snapshot - everything needed to pause a level and resume it later
//!
//! The snapshot is plain data. [`Session::restore`](crate::Session::restore) takes it
//! as-is: counters are not re-derived from the grid and the grid is not re-checked
//! for matches or moves.

use serde::{Deserialize, Serialize};

use crate::events::DeityCounts;
use crate::grid::Grid;
use crate::types::GameStatus;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionSnapshot {
    pub level_id: u32,
    pub grid: Grid,
    pub score: u32,
    pub moves_remaining: u32,
    /// Objective units counted so far, per deity
    pub counts: DeityCounts,
    pub status: GameStatus,
    /// Combo depth of the last resolved swap
    #[serde(default)]
    pub combo: u32,
}

impl SessionSnapshot {
    /// Serialize to a JSON string
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }

    /// Parse from a JSON string
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    pub fn objective_completed(&self) -> u32 {
        self.counts.total()
    }

    pub fn playable(&self) -> bool {
        !self.status.is_terminal() && self.moves_remaining > 0
    }
}
