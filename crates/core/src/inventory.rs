// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! The slotted container every `inventory`-featured entity carries: two
//! named hands and a row of indexed pockets.

use serde::{Deserialize, Serialize};

use crate::essence::Essence;
use crate::id::EntityId;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Hand {
    Left,
    Right,
}

impl Hand {
    pub fn other(self) -> Self {
        match self {
            Hand::Left => Hand::Right,
            Hand::Right => Hand::Left,
        }
    }
}

/// A view of an entity as it sits inside someone's inventory: enough to
/// describe it on the wire without re-fetching the entity itself.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EntityInfo {
    pub id: EntityId,
    pub essence: Essence,
    pub quantity: i64,
    pub item_volume: i64,
    pub max_volume: i64,
    pub codename: String,
}

impl EntityInfo {
    pub fn set_quantity(&mut self, quantity: i64) {
        self.quantity = quantity;
    }

    /// How many units of an item with the given per-unit volume this entry's
    /// pocket could hold, given its `max_volume`.
    pub fn calc_max_quantity_for_item_volume(&self, item_volume: i64) -> i64 {
        if item_volume <= 0 {
            self.max_volume
        } else {
            self.max_volume / item_volume
        }
    }
}

const POCKET_COUNT: usize = 8;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Inventory {
    left: Option<EntityInfo>,
    right: Option<EntityInfo>,
    pockets: Vec<Option<EntityInfo>>,
}

impl Default for Inventory {
    fn default() -> Self {
        Self::new()
    }
}

impl Inventory {
    pub fn new() -> Self {
        Self {
            left: None,
            right: None,
            pockets: vec![None; POCKET_COUNT],
        }
    }

    fn hand_slot(&self, hand: Hand) -> &Option<EntityInfo> {
        match hand {
            Hand::Left => &self.left,
            Hand::Right => &self.right,
        }
    }

    fn hand_slot_mut(&mut self, hand: Hand) -> &mut Option<EntityInfo> {
        match hand {
            Hand::Left => &mut self.left,
            Hand::Right => &mut self.right,
        }
    }

    pub fn get_hand_entry(&self, hand: Hand) -> Option<&EntityInfo> {
        self.hand_slot(hand).as_ref()
    }

    /// The id of whatever is held in `hand`, if anything.
    pub fn get_hand(&self, hand: Hand) -> Option<EntityId> {
        self.hand_slot(hand).as_ref().map(|entry| entry.id)
    }

    pub fn store_entry(&mut self, hand: Hand, entry: Option<EntityInfo>) {
        *self.hand_slot_mut(hand) = entry;
    }

    /// Returns `preferred` if it is free, else the other hand if that is
    /// free, else `None`.
    pub fn get_free_hand(&self, preferred: Hand) -> Option<Hand> {
        if self.hand_slot(preferred).is_none() {
            Some(preferred)
        } else if self.hand_slot(preferred.other()).is_none() {
            Some(preferred.other())
        } else {
            None
        }
    }

    pub fn get_pocket_entry(&self, index: usize) -> Option<&EntityInfo> {
        self.pockets.get(index).and_then(|slot| slot.as_ref())
    }

    pub fn set_pocket_entry(&mut self, index: usize, entry: Option<EntityInfo>) {
        if let Some(slot) = self.pockets.get_mut(index) {
            *slot = entry;
        }
    }

    pub fn find_entity_with_entity_id(&self, id: EntityId) -> Option<&EntityInfo> {
        [&self.left, &self.right]
            .into_iter()
            .chain(self.pockets.iter())
            .flatten()
            .find(|entry| entry.id == id)
    }

    pub fn remove_with_entity_id(&mut self, id: EntityId) {
        for slot in [&mut self.left, &mut self.right] {
            if slot.as_ref().is_some_and(|entry| entry.id == id) {
                *slot = None;
            }
        }
        for slot in self.pockets.iter_mut() {
            if slot.as_ref().is_some_and(|entry| entry.id == id) {
                *slot = None;
            }
        }
    }

    /// Swaps whatever is held in `hand` with the pocket at `pocket_index`.
    /// A no-op if the pocket index is out of range.
    pub fn swap(&mut self, hand: Hand, pocket_index: usize) {
        if let Some(slot) = self.pockets.get_mut(pocket_index) {
            let hand_slot = self.hand_slot_mut(hand);
            std::mem::swap(hand_slot, slot);
        }
    }
}

#[cfg(test)]
#[path = "inventory_tests.rs"]
mod tests;
