//! Cell source module - where new deity symbols come from
//!
//! Every random draw the engine makes (initial boards, refills after a cascade,
//! rescue regenerations) goes through a [`CellSource`]. Any `rand::Rng` is a
//! source that draws uniformly from the active [`Palette`]; sessions default to a
//! seedable [`StdRng`](rand::rngs::StdRng) so the same seed replays the same game.
//!
//! Tests and tools can supply their own source (for example a scripted queue) to
//! make refills deterministic.

use arrayvec::ArrayVec;
use rand::Rng;

use crate::types::{Deity, DEITY_COUNT};

/// The set of deities a level draws from
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Palette {
    deities: ArrayVec<Deity, DEITY_COUNT>,
}

impl Palette {
    /// The first `size` deities in palette order, clamped to 1..=8
    pub fn prefix(size: usize) -> Self {
        let size = size.clamp(1, DEITY_COUNT);
        Self {
            deities: Deity::ALL[..size].iter().copied().collect(),
        }
    }

    /// A palette of exactly one deity
    pub fn single(deity: Deity) -> Self {
        let mut deities = ArrayVec::new();
        deities.push(deity);
        Self { deities }
    }

    /// Palette for a level: the single `restrict_to` deity if given, otherwise the prefix
    pub fn for_level(max_gem_types: usize, restrict_to: Option<Deity>) -> Self {
        match restrict_to {
            Some(deity) => Self::single(deity),
            None => Self::prefix(max_gem_types),
        }
    }

    pub fn len(&self) -> usize {
        self.deities.len()
    }

    /// Always false; palettes hold at least one deity
    pub fn is_empty(&self) -> bool {
        self.deities.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<Deity> {
        self.deities.get(index).copied()
    }

    pub fn contains(&self, deity: Deity) -> bool {
        self.deities.contains(&deity)
    }

    pub fn deities(&self) -> &[Deity] {
        &self.deities
    }
}

/// Supplier of new cells
pub trait CellSource {
    /// Draw one deity from `palette`
    fn draw(&mut self, palette: &Palette) -> Deity;
}

impl<R: Rng> CellSource for R {
    fn draw(&mut self, palette: &Palette) -> Deity {
        let index = self.gen_range(0..palette.len());
        palette.deities[index]
    }
}
