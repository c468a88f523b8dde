// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Outbound messages describing world changes. Actions are the only thing
//! the engine hands to the [`crate::state::State`]-external `Gateway`; the
//! wire codec (server crate) serializes them to newline-delimited JSON.

use serde::{Deserialize, Serialize};

use crate::features::{DamageVariant, Stats};
use crate::geometry::Point;
use crate::id::EntityId;
use crate::inventory::{Hand, Inventory};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Actor {
    pub id: EntityId,
    pub codename: String,
    pub position: Option<Point>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Action {
    #[serde(rename = "action:actor_creation")]
    ActorCreation { actors: Vec<Actor> },

    #[serde(rename = "action:actor_update")]
    ActorUpdate { actor_id: EntityId, state_name: String },

    #[serde(rename = "action:actor_deletion")]
    ActorDeletion { actor_ids: Vec<EntityId> },

    #[serde(rename = "action:configuration")]
    Configuration { actor_id: EntityId, radius: f64 },

    #[serde(rename = "action:idle")]
    Idle { actor_id: EntityId },

    #[serde(rename = "action:motion")]
    Motion {
        actor_id: EntityId,
        speed: f64,
        bearing: f64,
        timeout: f64,
    },

    #[serde(rename = "action:localization")]
    Localization {
        actor_id: EntityId,
        position: Point,
    },

    #[serde(rename = "action:pick_begin")]
    PickBegin { who_id: EntityId, what_id: EntityId },

    #[serde(rename = "action:pick_end")]
    PickEnd { who_id: EntityId },

    #[serde(rename = "action:harvest_begin")]
    HarvestBegin { who_id: EntityId, what_id: EntityId },

    #[serde(rename = "action:harvest_end")]
    HarvestEnd { who_id: EntityId },

    #[serde(rename = "action:eat_begin")]
    EatBegin { eater_id: EntityId },

    #[serde(rename = "action:eat_end")]
    EatEnd { eater_id: EntityId },

    #[serde(rename = "action:craft_begin")]
    CraftBegin { crafter_id: EntityId },

    #[serde(rename = "action:craft_end")]
    CraftEnd { crafter_id: EntityId },

    #[serde(rename = "action:damage")]
    Damage {
        dealer_id: EntityId,
        receiver_id: EntityId,
        variant: DamageVariant,
        hand: Hand,
    },

    #[serde(rename = "action:inventory_update")]
    InventoryUpdate {
        actor_id: EntityId,
        inventory: Inventory,
    },

    #[serde(rename = "action:stat_update")]
    StatUpdate { actor_id: EntityId, stats: Stats },
}
