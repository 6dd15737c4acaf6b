//! Move solver for japa-match sessions.
//!
//! Scores every legal swap on a board by what its first pass would clear and picks
//! the best one for the session's mode. Used by the headless runner for autoplay
//! and usable by embedders for hints stronger than the first-found swap.

pub mod solver;

pub use japa_match_core as core;
pub use japa_match_types as types;

pub use solver::{
    best_swap, candidate_swaps, play_best_swap, play_best_swap_observed, SolveError,
    SwapCandidate,
};
