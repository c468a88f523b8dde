// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Entity identity.
//!
//! Ids are dense nonzero integers drawn uniformly from the positive 63-bit
//! range and checked for uniqueness against [`crate::state::State`]'s entity
//! map at allocation time. Zero is reserved to mean "unassigned", matching
//! the source's use of a sentinel id before an entity has been placed into a
//! `State`.

use std::fmt;
use std::num::NonZeroU64;

use rand::Rng;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EntityId(NonZeroU64);

impl EntityId {
    /// Wraps an already-known id value. Returns `None` for zero.
    pub fn new(value: u64) -> Option<Self> {
        NonZeroU64::new(value).map(Self)
    }

    pub fn get(self) -> u64 {
        self.0.get()
    }

    /// Draws a uniformly random id from the positive 63-bit range.
    ///
    /// Uniqueness against a `State`'s entity map is the caller's
    /// responsibility (see `State::generate_entity_id`).
    pub fn draw(rng: &mut impl Rng) -> Self {
        loop {
            let candidate = rng.gen_range(1..=i64::MAX as u64);
            if let Some(value) = NonZeroU64::new(candidate) {
                return Self(value);
            }
        }
    }
}

impl fmt::Display for EntityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
#[path = "id_tests.rs"]
mod tests;
