//! Core types module - shared data structures and constants
//!
//! This module defines the fundamental types used throughout the engine.
//! All types are plain data (with serde derives for the embedding application),
//! usable in any context: core logic, solvers, persistence snapshots.
//!
//! # Board Dimensions
//!
//! The standard playfield is 8x8; levels may choose any size of at least 3x3.
//!
//! - **Rows**: indexed from 0 at the top
//! - **Columns**: indexed from 0 at the left
//!
//! # Engine Constants
//!
//! | Constant | Value | Description |
//! |----------|-------|-------------|
//! | `BASE_SCORE` | 60 | Points per matched cell at combo level 1 |
//! | `MIN_RUN` | 3 | Shortest run that counts as a match |
//! | `GENERATION_RETRY_LIMIT` | 20 | Draws per cell before the generator accepts the last one |
//! | `BOARD_REGEN_LIMIT` | 100 | Whole-board regenerations before giving up on a playable board |
//! | `MAX_CASCADE_PASSES` | 20 | Cascade passes resolved per swap |
//! | `THREE_STAR_MOVES_LEFT` | 10 | Moves left that alone earn three stars |
//!
//! # Examples
//!
//! ```
//! use japa_match_types::{Deity, Position, DEITY_COUNT};
//!
//! let deity = Deity::from_str("Krishna").unwrap();
//! assert_eq!(deity, Deity::Krishna);
//! assert_eq!(deity.index(), 2);
//! assert_eq!(Deity::from_index(2), Some(Deity::Krishna));
//! assert_eq!(DEITY_COUNT, 8);
//!
//! let a = Position::new(3, 4);
//! assert!(a.is_adjacent(Position::new(3, 5)));
//! assert!(!a.is_adjacent(Position::new(4, 5)));
//! ```

use serde::{Deserialize, Serialize};

/// Default board height (8 rows)
pub const DEFAULT_ROWS: usize = 8;

/// Default board width (8 columns)
pub const DEFAULT_COLS: usize = 8;

/// Number of deity symbols in the full palette
pub const DEITY_COUNT: usize = 8;

/// Smallest palette a level may use
pub const MIN_PALETTE: usize = 4;

/// Largest palette a level may use
pub const MAX_PALETTE: usize = DEITY_COUNT;

/// Smallest board dimension the engine supports
pub const MIN_BOARD_DIM: usize = 3;

/// Shortest run of identical cells that forms a match
pub const MIN_RUN: usize = 3;

/// Points per matched cell before the combo multiplier
pub const BASE_SCORE: u32 = 60;

/// Draws per cell before the generator accepts whatever it drew last
pub const GENERATION_RETRY_LIMIT: u32 = 20;

/// Whole-board regenerations attempted before returning the last candidate
pub const BOARD_REGEN_LIMIT: u32 = 100;

/// Upper bound on cascade passes resolved by a single swap
pub const MAX_CASCADE_PASSES: u32 = 20;

/// Completion ratio (numerator / denominator) that earns three stars
pub const THREE_STAR_RATIO: (u32, u32) = (2, 1);

/// Completion ratio (numerator / denominator) that earns two stars
pub const TWO_STAR_RATIO: (u32, u32) = (3, 2);

/// Moves left at the win that earn three stars on their own
pub const THREE_STAR_MOVES_LEFT: u32 = 10;

/// The eight deity symbols, in palette order
///
/// Levels restrict the active palette to a prefix of this order, so a level
/// with `maxGemTypes = 4` draws only Ganesha, Shiva, Krishna and Rama.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Deity {
    Ganesha,
    Shiva,
    Krishna,
    Rama,
    Hanuman,
    Durga,
    Lakshmi,
    Saraswati,
}

impl Deity {
    /// All deities in palette order
    pub const ALL: [Deity; DEITY_COUNT] = [
        Deity::Ganesha,
        Deity::Shiva,
        Deity::Krishna,
        Deity::Rama,
        Deity::Hanuman,
        Deity::Durga,
        Deity::Lakshmi,
        Deity::Saraswati,
    ];

    /// Position of this deity in the palette (0..8)
    pub fn index(self) -> usize {
        self as usize
    }

    /// Deity at a palette index
    pub fn from_index(index: usize) -> Option<Self> {
        Self::ALL.get(index).copied()
    }

    /// Parse deity from string (case-insensitive)
    ///
    /// # Examples
    ///
    /// ```
    /// use japa_match_types::Deity;
    ///
    /// assert_eq!(Deity::from_str("ganesha"), Some(Deity::Ganesha));
    /// assert_eq!(Deity::from_str("HANUMAN"), Some(Deity::Hanuman));
    /// assert_eq!(Deity::from_str("zeus"), None);
    /// ```
    pub fn from_str(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "ganesha" => Some(Deity::Ganesha),
            "shiva" => Some(Deity::Shiva),
            "krishna" => Some(Deity::Krishna),
            "rama" => Some(Deity::Rama),
            "hanuman" => Some(Deity::Hanuman),
            "durga" => Some(Deity::Durga),
            "lakshmi" => Some(Deity::Lakshmi),
            "saraswati" => Some(Deity::Saraswati),
            _ => None,
        }
    }

    /// Lowercase string form, as used by level tables and snapshots
    pub fn as_str(&self) -> &'static str {
        match self {
            Deity::Ganesha => "ganesha",
            Deity::Shiva => "shiva",
            Deity::Krishna => "krishna",
            Deity::Rama => "rama",
            Deity::Hanuman => "hanuman",
            Deity::Durga => "durga",
            Deity::Lakshmi => "lakshmi",
            Deity::Saraswati => "saraswati",
        }
    }
}

/// A cell on the board
///
/// - `None`: empty (only between clearing and refilling)
/// - `Some(Deity)`: occupied by that deity symbol
pub type Cell = Option<Deity>;

/// Board coordinate, row-major ordered
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize,
)]
pub struct Position {
    pub row: usize,
    pub col: usize,
}

impl Position {
    pub const fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }

    /// True when `other` shares an edge with this position
    pub fn is_adjacent(self, other: Position) -> bool {
        self.row.abs_diff(other.row) + self.col.abs_diff(other.col) == 1
    }
}

/// Session lifecycle state
///
/// `Won` and `Lost` are terminal; only a new session leaves them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GameStatus {
    #[default]
    Playing,
    Won,
    Lost,
}

impl GameStatus {
    pub fn is_terminal(self) -> bool {
        !matches!(self, GameStatus::Playing)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            GameStatus::Playing => "playing",
            GameStatus::Won => "won",
            GameStatus::Lost => "lost",
        }
    }
}

/// Which matches count toward the level objective
///
/// - **General**: every matched deity counts
/// - **Deity**: only matches of the named deity count
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase", tag = "kind", content = "deity")]
pub enum GameMode {
    #[default]
    General,
    Deity(Deity),
}

impl GameMode {
    /// Whether matches of `deity` advance the objective in this mode
    pub fn counts(self, deity: Deity) -> bool {
        match self {
            GameMode::General => true,
            GameMode::Deity(target) => target == deity,
        }
    }

    /// Parse `"general"` or a deity name (case-insensitive)
    pub fn from_str(s: &str) -> Option<Self> {
        if s.trim().eq_ignore_ascii_case("general") {
            return Some(GameMode::General);
        }
        Deity::from_str(s).map(GameMode::Deity)
    }
}

/// Feedback tier for a cascade pass, consumed by audio/animation collaborators
///
/// Ordered by priority: a pass reports the highest tier it qualifies for.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum BonusTier {
    /// Plain three-runs only
    #[default]
    None,
    /// A run of exactly four
    Four,
    /// Same-deity horizontal and vertical runs crossing (L or T shape)
    Shape,
    /// A run of five or more
    Grand,
}

impl BonusTier {
    pub fn as_str(&self) -> Option<&'static str> {
        match self {
            BonusTier::None => None,
            BonusTier::Four => Some("four"),
            BonusTier::Shape => Some("shape"),
            BonusTier::Grand => Some("grand"),
        }
    }
}
