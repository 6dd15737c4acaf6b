//! Core game logic - pure, deterministic, and testable
//!
//! This crate holds every rule of the devotional match-3 game: board generation,
//! match detection, gravity and refill, scoring, level configuration, and the
//! session that ties them together. It does no I/O and never reads the clock:
//!
//! - **Deterministic**: all randomness flows through a [`CellSource`]; a seeded
//!   `StdRng` replays the same game
//! - **Testable**: scripted sources make cascades reproducible cell by cell
//! - **Portable**: embedders (UI, audio, persistence) plug in through [`SessionHooks`]
//!
//! # Module Structure
//!
//! - [`grid`]: rows x cols arena of optional deity cells
//! - [`source`]: palettes and the [`CellSource`] trait
//! - [`generator`]: match-free, playable starting boards
//! - [`matcher`]: runs, legal-move search, bonus shapes
//! - [`gravity`]: compaction and refill after a clear
//! - [`scoring`]: cascade points and star ratings
//! - [`level`]: level definitions and the level table
//! - [`session`]: the swap/cascade state machine
//! - [`events`]: swap results, hook payloads, and the hook trait
//! - [`snapshot`]: pause/resume state
//!
//! # Example
//!
//! ```
//! use japa_match_core::{GameMode, LevelConfig, Session, SwapOutcome};
//!
//! let level = LevelConfig::new(1, 9, 30, 4);
//! let mut session = Session::with_seed(&level, GameMode::General, 12345).unwrap();
//!
//! // A fresh board always has a legal move.
//! let (a, b) = session.hint().unwrap();
//! let result = session.swap(a, b);
//!
//! assert_eq!(result.outcome, SwapOutcome::Resolved);
//! assert_eq!(session.moves_remaining(), 29);
//! assert!(session.score() >= 180);
//! ```

pub mod events;
pub mod generator;
pub mod gravity;
pub mod grid;
pub mod level;
pub mod matcher;
pub mod scoring;
pub mod session;
pub mod snapshot;
pub mod source;

pub use japa_match_types as types;

// Re-export commonly used types for convenience
pub use events::{
    CascadePass, DeityCounts, LevelResult, NoHooks, ProgressUpdate, SessionHooks, SwapOutcome,
    SwapResult,
};
pub use generator::{create_board, generate_playable_board, is_playable};
pub use gravity::{apply_gravity, fill_gaps, Movement, SpawnedCell};
pub use grid::{Grid, GridError};
pub use level::{LevelConfig, LevelError, LevelTable};
pub use matcher::{
    classify_bonus, find_matches, find_valid_swap, get_all_match_positions, has_valid_moves,
    Match, Orientation,
};
pub use scoring::{calculate_score, get_stars, score_for_cells};
pub use session::Session;
pub use snapshot::SessionSnapshot;
pub use source::{CellSource, Palette};
pub use types::{BonusTier, Cell, Deity, GameMode, GameStatus, Position};
