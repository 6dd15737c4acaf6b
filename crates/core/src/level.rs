//! Level configuration - the read-only level table the session is built from
//!
//! Levels are numbered from 1. A table is either the built-in progression
//! ([`LevelTable::builtin`]) or loaded from JSON supplied by the embedding
//! application ([`LevelTable::from_json`]); both are validated before use and never
//! mutated by the engine.
//!
//! JSON uses camelCase field names:
//!
//! ```json
//! [{ "id": 1, "japaTarget": 9, "moves": 30, "rows": 8, "cols": 8, "maxGemTypes": 4 },
//!  { "id": 2, "japaTarget": 12, "moves": 28, "rows": 8, "cols": 8, "maxGemTypes": 5,
//!    "deityTarget": "hanuman" }]
//! ```

use derive_more::{Display, Error, From};
use serde::{Deserialize, Serialize};

use crate::source::Palette;
use crate::types::{
    Deity, GameMode, DEFAULT_COLS, DEFAULT_ROWS, MAX_PALETTE, MIN_BOARD_DIM, MIN_PALETTE,
};

/// Why a level or level table was rejected
#[derive(Debug, Display, Error, From)]
pub enum LevelError {
    #[display("level {level}: japaTarget must be at least 1")]
    ZeroTarget { level: u32 },
    #[display("level {level}: move budget must be at least 1")]
    ZeroMoves { level: u32 },
    #[display("level {level}: board {rows}x{cols} is smaller than 3x3")]
    BoardTooSmall { level: u32, rows: usize, cols: usize },
    #[display("level {level}: maxGemTypes {max_gem_types} outside 4..=8")]
    PaletteSize { level: u32, max_gem_types: usize },
    #[display("level {level}: deityTarget {} is not in its {max_gem_types}-deity palette", deity.as_str())]
    DeityOutsidePalette {
        level: u32,
        deity: Deity,
        max_gem_types: usize,
    },
    #[display("level table is empty")]
    EmptyTable,
    #[display("no level {number} (table has {len})")]
    UnknownLevel { number: u32, len: usize },
    #[display("invalid level JSON: {_0}")]
    #[from]
    Json(serde_json::Error),
}

impl LevelError {
    /// Stable machine-readable code
    pub fn code(&self) -> &'static str {
        match self {
            LevelError::ZeroTarget { .. }
            | LevelError::ZeroMoves { .. }
            | LevelError::BoardTooSmall { .. }
            | LevelError::PaletteSize { .. }
            | LevelError::DeityOutsidePalette { .. } => "invalid_level",
            LevelError::EmptyTable => "empty_table",
            LevelError::UnknownLevel { .. } => "unknown_level",
            LevelError::Json(_) => "invalid_json",
        }
    }
}

/// One level definition
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LevelConfig {
    pub id: u32,
    /// Objective units needed to win
    pub japa_target: u32,
    /// Move budget
    pub moves: u32,
    #[serde(default = "default_rows")]
    pub rows: usize,
    #[serde(default = "default_cols")]
    pub cols: usize,
    /// Active palette size (prefix of the deity order)
    pub max_gem_types: usize,
    /// Only this deity counts toward the objective, when set
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub deity_target: Option<Deity>,
}

fn default_rows() -> usize {
    DEFAULT_ROWS
}

fn default_cols() -> usize {
    DEFAULT_COLS
}

impl LevelConfig {
    /// An 8x8 general-mode level
    pub fn new(id: u32, japa_target: u32, moves: u32, max_gem_types: usize) -> Self {
        Self {
            id,
            japa_target,
            moves,
            rows: DEFAULT_ROWS,
            cols: DEFAULT_COLS,
            max_gem_types,
            deity_target: None,
        }
    }

    pub fn with_size(mut self, rows: usize, cols: usize) -> Self {
        self.rows = rows;
        self.cols = cols;
        self
    }

    pub fn with_deity_target(mut self, deity: Deity) -> Self {
        self.deity_target = Some(deity);
        self
    }

    /// The mode this level is played in unless the caller overrides it
    pub fn default_mode(&self) -> GameMode {
        match self.deity_target {
            Some(deity) => GameMode::Deity(deity),
            None => GameMode::General,
        }
    }

    /// Palette new cells are drawn from
    pub fn palette(&self) -> Palette {
        Palette::prefix(self.max_gem_types)
    }

    /// Check every field against the ranges the engine supports
    pub fn validate(&self) -> Result<(), LevelError> {
        let level = self.id;
        if self.japa_target == 0 {
            return Err(LevelError::ZeroTarget { level });
        }
        if self.moves == 0 {
            return Err(LevelError::ZeroMoves { level });
        }
        if self.rows < MIN_BOARD_DIM || self.cols < MIN_BOARD_DIM {
            return Err(LevelError::BoardTooSmall {
                level,
                rows: self.rows,
                cols: self.cols,
            });
        }
        if !(MIN_PALETTE..=MAX_PALETTE).contains(&self.max_gem_types) {
            return Err(LevelError::PaletteSize {
                level,
                max_gem_types: self.max_gem_types,
            });
        }
        if let Some(deity) = self.deity_target {
            if deity.index() >= self.max_gem_types {
                return Err(LevelError::DeityOutsidePalette {
                    level,
                    deity,
                    max_gem_types: self.max_gem_types,
                });
            }
        }
        Ok(())
    }
}

/// Ordered level definitions, indexed by level number from 1
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct LevelTable {
    levels: Vec<LevelConfig>,
}

impl LevelTable {
    /// Validate and wrap a list of levels
    pub fn new(levels: Vec<LevelConfig>) -> Result<Self, LevelError> {
        if levels.is_empty() {
            return Err(LevelError::EmptyTable);
        }
        for level in &levels {
            level.validate()?;
        }
        Ok(Self { levels })
    }

    /// Parse and validate a JSON array of levels
    pub fn from_json(json: &str) -> Result<Self, LevelError> {
        let levels: Vec<LevelConfig> = serde_json::from_str(json)?;
        Self::new(levels)
    }

    /// The built-in progression: targets grow toward a full mala of 108 while the
    /// palette widens and the move budget tightens. Every third level from 3 on is
    /// a single-deity level.
    pub fn builtin() -> Self {
        const PROGRESSION: [(u32, u32, usize, Option<Deity>); 10] = [
            (9, 30, 4, None),
            (12, 30, 4, None),
            (6, 28, 4, Some(Deity::Ganesha)),
            (18, 28, 5, None),
            (27, 26, 5, None),
            (9, 26, 5, Some(Deity::Hanuman)),
            (36, 25, 6, None),
            (54, 25, 6, None),
            (12, 24, 7, Some(Deity::Lakshmi)),
            (108, 40, 8, None),
        ];

        let levels = PROGRESSION
            .iter()
            .zip(1u32..)
            .map(|(&(target, moves, palette, deity), id)| {
                let level = LevelConfig::new(id, target, moves, palette);
                match deity {
                    Some(deity) => level.with_deity_target(deity),
                    None => level,
                }
            })
            .collect();

        Self { levels }
    }

    /// Level by 1-based number
    pub fn get(&self, number: u32) -> Result<&LevelConfig, LevelError> {
        (number as usize)
            .checked_sub(1)
            .and_then(|i| self.levels.get(i))
            .ok_or(LevelError::UnknownLevel {
                number,
                len: self.levels.len(),
            })
    }

    pub fn len(&self) -> usize {
        self.levels.len()
    }

    /// Always false for a constructed table
    pub fn is_empty(&self) -> bool {
        self.levels.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &LevelConfig> {
        self.levels.iter()
    }
}
