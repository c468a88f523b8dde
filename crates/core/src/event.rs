// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Inbound signals addressed to a specific entity. Events are purely
//! internal to the engine — they never cross the wire directly, only the
//! `Move`s they are decoded from (server crate) and the `Action`s they
//! eventually produce do.

use serde::{Deserialize, Serialize};

use crate::features::DamageVariant;
use crate::id::EntityId;
use crate::inventory::Hand;
use crate::registry::Assembly;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UpdateVariant {
    Swap,
    Merge,
}

#[derive(Debug, Clone)]
pub enum Event {
    Craft {
        receiver_id: EntityId,
        assembly: Assembly,
    },
    Damage {
        receiver_id: EntityId,
        dealer_id: EntityId,
        damage_amount: f64,
        damage_variant: DamageVariant,
    },
    Disconnection {
        receiver_id: EntityId,
    },
    Finished {
        receiver_id: EntityId,
    },
    HandActivation {
        receiver_id: EntityId,
        hand: Hand,
        object_id: Option<EntityId>,
    },
    InventoryUpdate {
        receiver_id: EntityId,
        hand: Hand,
        inventory_index: usize,
        update_variant: UpdateVariant,
    },
    Resume {
        receiver_id: EntityId,
    },
    MotionStart {
        receiver_id: EntityId,
        bearing: f64,
    },
    MotionStop {
        receiver_id: EntityId,
    },
    Grow {
        receiver_id: EntityId,
    },
    /// Emitted immediately when a harvest/pick interaction begins; the
    /// matching `Finished` follows once the task's job completes.
    PickStart {
        receiver_id: EntityId,
        item_id: EntityId,
    },
}

impl Event {
    pub fn receiver_id(&self) -> EntityId {
        match self {
            Event::Craft { receiver_id, .. }
            | Event::Damage { receiver_id, .. }
            | Event::Disconnection { receiver_id }
            | Event::Finished { receiver_id }
            | Event::HandActivation { receiver_id, .. }
            | Event::InventoryUpdate { receiver_id, .. }
            | Event::Resume { receiver_id }
            | Event::MotionStart { receiver_id, .. }
            | Event::MotionStop { receiver_id }
            | Event::Grow { receiver_id }
            | Event::PickStart { receiver_id, .. } => *receiver_id,
        }
    }
}
