// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! The entity behavior table (spec.md §4.4): a pure function of
//! `(current state, event, features)` mapping an `EntityKind` and an
//! `Event` to the `Task` that entity should adopt next. Kept as a free
//! function rather than a method on `Entity` so `core` stays behavior-free
//! and this crate owns every concrete `Task`/`Job` the table can produce.
//!
//! Returns `None` when the event leaves the entity's current task in
//! place (e.g. a Warrior surviving a hit) — the caller (the `Engine`)
//! only runs the finish/start/cancel/enter transition sequence when this
//! returns `Some`.

use std::f64::consts::PI;
use std::time::Duration;

use rand::Rng;

use edgin_sim_core::{Entity, EntityKind, Event, State, Task};

use crate::tasks::{
    CraftTask, DieAndDropTask, GrowTask, HarvestTask, IdleTask, InventoryUpdateTask, MotionTask,
    StateChangeTask, UseItemTask, WalkTask,
};

const HERO_SPEED: f64 = 1.0;
const WARRIOR_SPEED: f64 = 1.0;
const WARRIOR_WALK_DURATION: Duration = Duration::from_secs(1);
const BERRY_BUSH_GROW_INTERVAL: Duration = Duration::from_secs(5);
const BERRY_BUSH_STATE_THRESHOLD: i64 = 10;

pub(crate) fn state_for_amount(amount: i64) -> &'static str {
    if amount < BERRY_BUSH_STATE_THRESHOLD {
        "bare"
    } else {
        "covered"
    }
}

fn drop_at(state: &State, kind: EntityKind, position: Option<edgin_sim_core::Point>) -> Entity {
    Entity::new(state.generate_entity_id(), kind, position)
}

fn drops(state: &State, kind: EntityKind, position: Option<edgin_sim_core::Point>, count: usize) -> Vec<Entity> {
    (0..count).map(|_| drop_at(state, kind, position)).collect()
}

/// Computes the next task for `receiver_id` given `event`, or `None` to
/// keep the entity's current task unchanged.
pub fn dispatch(state: &mut State, event: Event) -> Option<Box<dyn Task>> {
    let receiver_id = event.receiver_id();
    let kind = state.get_entity(receiver_id)?.kind();

    match (kind, event) {
        (EntityKind::Hero, Event::Resume { .. })
        | (EntityKind::Hero, Event::Finished { .. })
        | (EntityKind::Hero, Event::MotionStop { .. }) => {
            Some(Box::new(IdleTask::new(receiver_id)))
        }

        (EntityKind::Hero, Event::MotionStart { bearing, .. }) => {
            Some(Box::new(MotionTask::new(receiver_id, HERO_SPEED, bearing)))
        }

        (EntityKind::Hero, Event::HandActivation { hand, object_id, .. }) => {
            let held = state
                .get_entity(receiver_id)
                .and_then(|hero| hero.features.inventory.as_ref())
                .and_then(|inventory| inventory.get().get_hand(hand));
            match held {
                Some(item_id) => Some(Box::new(UseItemTask::new(receiver_id, item_id, object_id, hand))),
                None => Some(Box::new(HarvestTask::new(receiver_id, object_id, hand))),
            }
        }

        (
            EntityKind::Hero,
            Event::InventoryUpdate { hand, inventory_index, update_variant, .. },
        ) => Some(Box::new(InventoryUpdateTask::new(
            receiver_id,
            hand,
            inventory_index,
            update_variant,
        ))),

        (EntityKind::Hero, Event::Craft { assembly, .. }) => {
            Some(Box::new(CraftTask::new(receiver_id, assembly)))
        }

        (EntityKind::Hero, Event::Disconnection { .. }) => {
            Some(Box::new(DieAndDropTask::new(receiver_id, Vec::new())))
        }

        (EntityKind::Warrior, Event::Resume { .. }) | (EntityKind::Warrior, Event::Finished { .. }) => {
            let bearing = rand::thread_rng().gen_range(-PI..PI);
            Some(Box::new(WalkTask::new(
                receiver_id,
                WARRIOR_SPEED,
                bearing,
                WARRIOR_WALK_DURATION,
            )))
        }

        (EntityKind::Warrior, Event::Damage { damage_amount, .. }) => {
            let alive = state
                .get_entity_mut(receiver_id)?
                .features
                .damageable
                .as_mut()?
                .handle_damage(damage_amount);
            if alive {
                None
            } else {
                let position = state.get_entity(receiver_id)?.position();
                Some(Box::new(DieAndDropTask::new(
                    receiver_id,
                    drops(state, EntityKind::RawMeat, position, 4),
                )))
            }
        }

        (EntityKind::BerryBush, Event::Resume { .. })
        | (EntityKind::BerryBush, Event::Finished { .. }) => {
            Some(Box::new(GrowTask::new(receiver_id, BERRY_BUSH_GROW_INTERVAL)))
        }

        (EntityKind::BerryBush, Event::Grow { .. }) => {
            let bush = state.get_entity_mut(receiver_id)?;
            let harvestable = bush.features.harvestable.as_mut()?;
            let (_, new_amount) = harvestable.grow();
            let new_state = state_for_amount(new_amount);
            let current_state = bush.features.stateful.as_ref().map(|s| s.state_name());
            if current_state == Some(new_state) {
                None
            } else {
                Some(Box::new(StateChangeTask::new(receiver_id, new_state)))
            }
        }

        (EntityKind::BerryBush, Event::Damage { damage_amount, .. })
        | (EntityKind::Spruce, Event::Damage { damage_amount, .. }) => {
            let alive = state
                .get_entity_mut(receiver_id)?
                .features
                .damageable
                .as_mut()?
                .handle_damage(damage_amount);
            if alive {
                None
            } else {
                let position = state.get_entity(receiver_id)?.position();
                let drop_kind = if kind == EntityKind::Spruce {
                    EntityKind::Log
                } else {
                    EntityKind::Twig
                };
                Some(Box::new(DieAndDropTask::new(
                    receiver_id,
                    drops(state, drop_kind, position, 3),
                )))
            }
        }

        _ => None,
    }
}

#[cfg(test)]
#[path = "dispatch_tests.rs"]
mod tests;
