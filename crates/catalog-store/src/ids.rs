//! Auto-increment ID issuance.
//!
//! Each entity kind gets its own counter. The default seeds sit above the IDs
//! used by the bulk data files, so generated IDs don't collide with loaded ones.

use serde::{Deserialize, Serialize};

/// Monotonic counter that hands out IDs as strings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IdSequence {
    next: u64,
}

impl IdSequence {
    pub fn starting_at(seed: u64) -> Self {
        Self { next: seed }
    }

    /// Returns the current value and advances the counter.
    pub fn next_id(&mut self) -> String {
        let id = self.next;
        self.next += 1;
        id.to_string()
    }
}

/// Starting values for the three ID sequences of a catalog.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct IdSeeds {
    pub product: u64,
    pub customer: u64,
    pub order: u64,
}

impl Default for IdSeeds {
    fn default() -> Self {
        Self {
            product: 151,
            customer: 231,
            order: 501,
        }
    }
}
