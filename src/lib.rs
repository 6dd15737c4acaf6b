//! Japa Match (workspace facade crate).
//!
//! Re-exports the game crates under `japa_match::{core,engine,types}` so embedders and
//! the integration tests depend on one package, plus the runner's env configuration.

pub mod config;

pub use japa_match_core as core;
pub use japa_match_engine as engine;
pub use japa_match_types as types;
