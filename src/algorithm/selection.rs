use crate::algorithm::bitset::TileBitset;
use rand::{Rng, SeedableRng, rngs::StdRng};

/// Seeded random selector for reproducible stochastic choices
pub struct RandomSelector {
    rng: StdRng,
}

impl RandomSelector {
    /// Create a deterministic random selector
    pub fn new(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// Pick one member of `candidates` uniformly at random
    ///
    /// Returns `None` for an empty set.
    pub fn choose_tile(&mut self, candidates: &TileBitset) -> Option<usize> {
        let count = candidates.count();
        if count == 0 {
            return None;
        }
        candidates.nth(self.rng.random_range(0..count))
    }
}

/// Frontier-growth heuristic state for one scan of the grid
///
/// Remembers the undecided cell with the most off-grid or decided neighbours.
/// Ties keep the earliest cell in scan order. The first undecided cell seen is
/// also kept as the seed fallback for scans where no cell has any pressure.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct PressureFrontier {
    best: Option<([usize; 2], usize)>,
    first_undecided: Option<[usize; 2]>,
}

impl PressureFrontier {
    /// Start an empty scan
    pub const fn new() -> Self {
        Self {
            best: None,
            first_undecided: None,
        }
    }

    /// Record the pressure of an undecided cell
    pub fn observe(&mut self, position: [usize; 2], pressure: usize) {
        if self.first_undecided.is_none() {
            self.first_undecided = Some(position);
        }
        if pressure > self.max_pressure() {
            self.best = Some((position, pressure));
        }
    }

    /// Highest pressure seen so far, 0 if none
    pub fn max_pressure(&self) -> usize {
        self.best.map_or(0, |(_, pressure)| pressure)
    }

    /// Cell to collapse once the scan is over
    ///
    /// The highest-pressure cell wins. Without any pressure the first undecided
    /// cell in scan order seeds the grid. `None` means no undecided cell was seen.
    pub fn choice(&self) -> Option<[usize; 2]> {
        self.best
            .map(|(position, _)| position)
            .or(self.first_undecided)
    }
}
