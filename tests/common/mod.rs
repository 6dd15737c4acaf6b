//! Shared fixtures for the integration tests

#![allow(dead_code)]

use std::collections::VecDeque;

use rand::rngs::StdRng;
use rand::SeedableRng;

use japa_match::core::{CellSource, Grid, Palette};
use japa_match::types::Deity;

/// Replays queued deities, then falls back to a seeded RNG
#[derive(Debug, Clone)]
pub struct ScriptedSource {
    queue: VecDeque<Deity>,
    fallback: StdRng,
}

impl ScriptedSource {
    /// Queue of palette indices (0 = Ganesha, 1 = Shiva, ...)
    pub fn new(indices: &[usize], seed: u64) -> Self {
        Self {
            queue: indices
                .iter()
                .map(|&i| Deity::from_index(i).unwrap())
                .collect(),
            fallback: StdRng::seed_from_u64(seed),
        }
    }

    pub fn remaining(&self) -> usize {
        self.queue.len()
    }
}

impl CellSource for ScriptedSource {
    fn draw(&mut self, palette: &Palette) -> Deity {
        match self.queue.pop_front() {
            Some(deity) => deity,
            None => self.fallback.draw(palette),
        }
    }
}

/// Row `r` of the repeating no-move pattern: cell (r, c) holds (c + 2r) mod 4
pub fn dead_row(row: usize, cols: usize) -> String {
    (0..cols)
        .map(|col| char::from(b'0' + ((col + 2 * row) % 4) as u8))
        .collect()
}

/// A board with no match and no legal move
pub fn dead_board(rows: usize, cols: usize) -> Grid {
    let rows: Vec<String> = (0..rows).map(|r| dead_row(r, cols)).collect();
    let refs: Vec<&str> = rows.iter().map(String::as_str).collect();
    Grid::from_digits(&refs).unwrap()
}

/// The dead pattern with row 0 replaced
pub fn dead_board_with_top(top: &str, rows: usize) -> Grid {
    let cols = top.len();
    let mut all = vec![top.to_string()];
    all.extend((1..rows).map(|r| dead_row(r, cols)));
    let refs: Vec<&str> = all.iter().map(String::as_str).collect();
    Grid::from_digits(&refs).unwrap()
}
