// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Concrete tasks: one per distinct intent an entity can carry (§4.5). Each
//! pairs a `start`/`finish` action pair with the job (if any) that drives
//! it between those two points. `now` is threaded in from the engine's
//! [`edgin_sim_core::Clock`] rather than read directly, so task timing is
//! as deterministic under test as job timing already is.

use std::time::{Duration, Instant};

use edgin_sim_core::{
    Action, Assembly, Claim, Entity, EntityId, Event, Hand, Job, State, Task, TaskStart,
    UpdateVariant,
};

use crate::jobs::{DamageJob, DieJob, GrowJob, MotionJob, WaitJob};

pub struct CraftTask {
    crafter_id: EntityId,
    assembly: Assembly,
}

impl CraftTask {
    pub const CRAFT_DURATION: Duration = Duration::from_secs(1);

    pub fn new(crafter_id: EntityId, assembly: Assembly) -> Self {
        Self { crafter_id, assembly }
    }
}

impl Task for CraftTask {
    fn start(&mut self, state: &mut State, now: Instant) -> TaskStart {
        let Some(crafter) = state.get_entity(self.crafter_id) else {
            return TaskStart::new(Vec::new());
        };
        let Some(inventory_feature) = &crafter.features.inventory else {
            return TaskStart::new(Vec::new());
        };
        if inventory_feature.get().get_free_hand(Hand::Left).is_none() {
            return TaskStart::new(Vec::new());
        }
        if !state.validate_assembly(&self.assembly, inventory_feature.get()) {
            return TaskStart::new(Vec::new());
        }

        let job = WaitJob::new(
            Self::CRAFT_DURATION,
            vec![Event::Finished {
                receiver_id: self.crafter_id,
            }],
            now,
        );
        TaskStart::with_job(
            vec![Action::CraftBegin {
                crafter_id: self.crafter_id,
            }],
            Box::new(job),
        )
    }

    fn finish(&mut self, state: &mut State, _now: Instant, _last_tick: Option<Instant>) -> Vec<Action> {
        let Some(crafter) = state.get_entity(self.crafter_id) else {
            return vec![Action::CraftEnd {
                crafter_id: self.crafter_id,
            }];
        };
        if crafter.features.inventory.is_none() {
            return vec![Action::CraftEnd {
                crafter_id: self.crafter_id,
            }];
        }

        let mut inventory = crafter
            .features
            .inventory
            .as_ref()
            .map_or_else(Default::default, |f| f.get().clone());
        let craft_result = state.craft_entity(&self.assembly, &mut inventory);

        if let Some(entity) = state.get_entity_mut(self.crafter_id) {
            if let Some(inventory_feature) = entity.features.inventory.as_mut() {
                *inventory_feature.get_mut() = inventory.clone();
            }
        }

        vec![
            Action::ActorCreation {
                actors: craft_result.created,
            },
            Action::ActorDeletion {
                actor_ids: craft_result.deleted,
            },
            Action::InventoryUpdate {
                actor_id: self.crafter_id,
                inventory,
            },
            Action::CraftEnd {
                crafter_id: self.crafter_id,
            },
        ]
    }
}

pub struct DieAndDropTask {
    dier_id: EntityId,
    drops: Vec<Entity>,
}

impl DieAndDropTask {
    pub fn new(dier_id: EntityId, drops: Vec<Entity>) -> Self {
        Self { dier_id, drops }
    }
}

impl Task for DieAndDropTask {
    fn start(&mut self, state: &mut State, now: Instant) -> TaskStart {
        if state.get_entity(self.dier_id).is_none() {
            return TaskStart::new(Vec::new());
        }

        let actors: Vec<_> = self.drops.iter().map(|drop| drop.as_actor()).collect();
        for drop in self.drops.drain(..) {
            state.add_entity(drop);
        }

        TaskStart::with_job(
            vec![
                Action::ActorCreation { actors },
                Action::ActorDeletion {
                    actor_ids: vec![self.dier_id],
                },
            ],
            Box::new(DieJob::new(self.dier_id, now)),
        )
    }

    fn finish(&mut self, _state: &mut State, _now: Instant, _last_tick: Option<Instant>) -> Vec<Action> {
        Vec::new()
    }
}

pub struct IdleTask {
    actor_id: EntityId,
}

impl IdleTask {
    pub fn new(actor_id: EntityId) -> Self {
        Self { actor_id }
    }
}

impl Task for IdleTask {
    fn start(&mut self, _state: &mut State, _now: Instant) -> TaskStart {
        TaskStart::new(vec![Action::Idle {
            actor_id: self.actor_id,
        }])
    }

    fn finish(&mut self, _state: &mut State, _now: Instant, _last_tick: Option<Instant>) -> Vec<Action> {
        Vec::new()
    }
}

pub struct InventoryUpdateTask {
    performer_id: EntityId,
    hand: Hand,
    inventory_index: usize,
    update_variant: UpdateVariant,
}

impl InventoryUpdateTask {
    pub const SWAP_DURATION: Duration = Duration::from_millis(10);

    pub fn new(
        performer_id: EntityId,
        hand: Hand,
        inventory_index: usize,
        update_variant: UpdateVariant,
    ) -> Self {
        Self {
            performer_id,
            hand,
            inventory_index,
            update_variant,
        }
    }
}

impl Task for InventoryUpdateTask {
    fn start(&mut self, _state: &mut State, now: Instant) -> TaskStart {
        TaskStart::with_job(
            Vec::new(),
            Box::new(WaitJob::new(
                Self::SWAP_DURATION,
                vec![Event::Finished {
                    receiver_id: self.performer_id,
                }],
                now,
            )),
        )
    }

    fn finish(&mut self, state: &mut State, _now: Instant, _last_tick: Option<Instant>) -> Vec<Action> {
        let Some(performer) = state.get_entity(self.performer_id) else {
            return Vec::new();
        };
        if performer.features.inventory.is_none() {
            return Vec::new();
        }

        let mut inventory = performer
            .features
            .inventory
            .as_ref()
            .map_or_else(Default::default, |f| f.get().clone());

        match self.update_variant {
            UpdateVariant::Swap => inventory.swap(self.hand, self.inventory_index),
            UpdateVariant::Merge => state.merge_entities(&mut inventory, self.hand, self.inventory_index),
        }

        if let Some(entity) = state.get_entity_mut(self.performer_id) {
            if let Some(inventory_feature) = entity.features.inventory.as_mut() {
                *inventory_feature.get_mut() = inventory.clone();
            }
        }

        vec![Action::InventoryUpdate {
            actor_id: self.performer_id,
            inventory,
        }]
    }
}

pub struct MotionTask {
    entity_id: EntityId,
    speed: f64,
    bearing: f64,
}

impl MotionTask {
    pub const TIMEOUT: Duration = Duration::from_secs(20);

    pub fn new(entity_id: EntityId, speed: f64, bearing: f64) -> Self {
        Self {
            entity_id,
            speed,
            bearing,
        }
    }
}

impl Task for MotionTask {
    fn start(&mut self, _state: &mut State, now: Instant) -> TaskStart {
        let job = MotionJob::new(self.entity_id, self.speed, self.bearing, Self::TIMEOUT, Vec::new(), now);
        TaskStart::with_job(
            vec![Action::Motion {
                actor_id: self.entity_id,
                speed: self.speed,
                bearing: self.bearing,
                timeout: Self::TIMEOUT.as_secs_f64(),
            }],
            Box::new(job),
        )
    }

    fn finish(&mut self, state: &mut State, now: Instant, last_tick: Option<Instant>) -> Vec<Action> {
        if state.get_entity(self.entity_id).is_none() {
            return Vec::new();
        }

        if let Some(last_tick) = last_tick {
            let elapsed = now.saturating_duration_since(last_tick).as_secs_f64();
            let radius = state.get_radius();
            if let Some(entity) = state.get_entity_mut(self.entity_id) {
                entity.move_by(self.speed * elapsed, self.bearing, radius);
            }
        }

        let Some(position) = state.get_entity(self.entity_id).and_then(|e| e.position()) else {
            return Vec::new();
        };
        vec![Action::Localization {
            actor_id: self.entity_id,
            position,
        }]
    }
}

/// Picks/harvests an item or a renewable resource in one motion, branching
/// at `finish` on whether the target is a plain inventorable item or a
/// harvestable resource. Subsumes the source's separate `PickItemTask` —
/// the dispatch table (§4.4) never produces a plain pick without a harvest
/// fallback, so one task covers both.
pub struct HarvestTask {
    who_id: EntityId,
    what_id: Option<EntityId>,
    hand: Hand,
}

impl HarvestTask {
    pub const MAX_DISTANCE: f64 = 1.0;
    pub const HARVEST_DURATION: Duration = Duration::from_secs(1);

    pub fn new(who_id: EntityId, what_id: Option<EntityId>, hand: Hand) -> Self {
        Self { who_id, what_id, hand }
    }
}

impl Task for HarvestTask {
    fn start(&mut self, state: &mut State, now: Instant) -> TaskStart {
        if self.what_id.is_none() {
            self.what_id =
                state.find_closest_delivering_within(self.who_id, [Claim::Cargo, Claim::Harvest]);
        }
        let Some(what_id) = self.what_id else {
            return TaskStart::new(Vec::new());
        };

        let (Some(entity), Some(item)) = (state.get_entity(self.who_id), state.get_entity(what_id))
        else {
            return TaskStart::new(Vec::new());
        };
        match state.calculate_distance(entity, item) {
            Some(distance) if distance <= Self::MAX_DISTANCE => {}
            _ => return TaskStart::new(Vec::new()),
        }

        let action = if item.features.harvestable.is_some() {
            Action::HarvestBegin {
                who_id: self.who_id,
                what_id,
            }
        } else {
            Action::PickBegin {
                who_id: self.who_id,
                what_id,
            }
        };

        let job = WaitJob::new(
            Duration::ZERO,
            vec![Event::PickStart { receiver_id: self.who_id, item_id: what_id }],
            now,
        )
        .and_then(Self::HARVEST_DURATION, vec![Event::Finished { receiver_id: self.who_id }]);

        TaskStart::with_job(vec![action], Box::new(job))
    }

    fn finish(&mut self, state: &mut State, _now: Instant, _last_tick: Option<Instant>) -> Vec<Action> {
        let Some(what_id) = self.what_id else {
            return Vec::new();
        };

        let (Some(entity), Some(item)) = (state.get_entity(self.who_id), state.get_entity(what_id))
        else {
            return Vec::new();
        };
        match state.calculate_distance(entity, item) {
            Some(distance) if distance <= Self::MAX_DISTANCE => {}
            _ => return Vec::new(),
        }

        if item.features.harvestable.is_some() {
            self.finish_harvest(state, what_id)
        } else if item.features.inventorable.is_some() {
            self.finish_pick(state, what_id)
        } else {
            Vec::new()
        }
    }
}

impl HarvestTask {
    fn finish_pick(&self, state: &mut State, what_id: EntityId) -> Vec<Action> {
        let info = match state.get_entity(what_id) {
            Some(item) => item.as_info(),
            None => return Vec::new(),
        };

        if let Some(item) = state.get_entity_mut(what_id) {
            if let Some(inventorable) = item.features.inventorable.as_mut() {
                inventorable.set_stored_by(self.who_id);
            }
            item.set_position(None);
        }

        let Some(inventory) = state.get_entity_mut(self.who_id).and_then(|entity| {
            entity.features.inventory.as_mut().map(|inventory_feature| {
                inventory_feature.get_mut().store_entry(self.hand, Some(info));
                inventory_feature.get().clone()
            })
        }) else {
            return Vec::new();
        };

        vec![
            Action::PickEnd { who_id: self.who_id },
            Action::InventoryUpdate {
                actor_id: self.who_id,
                inventory,
            },
        ]
    }

    fn finish_harvest(&self, state: &mut State, what_id: EntityId) -> Vec<Action> {
        let Some(item) = state.get_entity_mut(what_id) else {
            return Vec::new();
        };
        let Some(harvestable) = item.features.harvestable.as_mut() else {
            return Vec::new();
        };
        let harvested_amount = harvestable.harvest();
        if harvested_amount <= 0 {
            return vec![Action::HarvestEnd { who_id: self.who_id }];
        }

        let position = item.position();
        let mut actors = Vec::new();
        let mut single_drop: Option<Entity> = None;

        for _ in 0..harvested_amount {
            let new_id = state.generate_entity_id();
            if let Some(mut drop) = edgin_sim_core::registry::construct_entity("twig", new_id, position) {
                drop.features.set_stackable(1);
                actors.push(drop.as_actor());
                if harvested_amount == 1 {
                    single_drop = Some(drop);
                } else {
                    state.add_entity(drop);
                }
            }
        }

        let mut inventory = None;
        if harvested_amount == 1 {
            if let Some(drop) = single_drop {
                let info = drop.as_info();
                state.add_entity(drop);
                inventory = state.get_entity_mut(self.who_id).and_then(|entity| {
                    entity.features.inventory.as_mut().map(|inventory_feature| {
                        inventory_feature.get_mut().store_entry(self.hand, Some(info));
                        inventory_feature.get().clone()
                    })
                });
            }
        }

        let mut actions = vec![
            Action::HarvestEnd { who_id: self.who_id },
            Action::ActorCreation { actors },
        ];
        if let Some(inventory) = inventory {
            actions.push(Action::InventoryUpdate {
                actor_id: self.who_id,
                inventory,
            });
        }
        actions.extend(self.pick_finish(state, what_id));
        actions
    }

    /// Mirrors the dispatch table's BerryBush `PickFinish` row (§4.4):
    /// a harvest that crosses the bare/covered threshold updates the
    /// resource's visual state immediately, rather than waiting for its
    /// next scheduled `GrowTask` tick to notice. The resource's own task
    /// (and scheduler entry) are left untouched — only its `stateful`
    /// feature and the action stream reflect the crossing.
    fn pick_finish(&self, state: &mut State, what_id: EntityId) -> Vec<Action> {
        let Some(item) = state.get_entity_mut(what_id) else {
            return Vec::new();
        };
        let Some(current) = item.features.harvestable.as_ref().map(|h| h.current_amount()) else {
            return Vec::new();
        };
        let new_state = crate::dispatch::state_for_amount(current);
        let current_state = item.features.stateful.as_ref().map(|s| s.state_name().to_string());
        if current_state.as_deref() == Some(new_state) {
            return Vec::new();
        }
        match item.features.stateful.as_mut() {
            Some(stateful) => stateful.set_state_name(new_state),
            None => item.features.set_stateful(new_state),
        }
        vec![Action::ActorUpdate {
            actor_id: what_id,
            state_name: new_state.to_string(),
        }]
    }
}

pub struct UseItemTask {
    performer_id: EntityId,
    item_id: EntityId,
    receiver_id: Option<EntityId>,
    hand: Hand,
    emit_eat_begin: bool,
}

impl UseItemTask {
    pub const MAX_DISTANCE: f64 = 1.0;

    pub fn new(performer_id: EntityId, item_id: EntityId, receiver_id: Option<EntityId>, hand: Hand) -> Self {
        Self {
            performer_id,
            item_id,
            receiver_id,
            hand,
            emit_eat_begin: false,
        }
    }
}

impl Task for UseItemTask {
    fn start(&mut self, state: &mut State, now: Instant) -> TaskStart {
        let (Some(performer), Some(item)) =
            (state.get_entity(self.performer_id), state.get_entity(self.item_id))
        else {
            return TaskStart::new(Vec::new());
        };

        let claims: Vec<Claim> = item.features.delivery_claims().to_vec();

        // Resolve the receiver: the explicit object of the hand activation,
        // or the performer themself (e.g. eating a held food item in place).
        let receiver_id = self.receiver_id.unwrap_or(self.performer_id);
        self.receiver_id = Some(receiver_id);
        let Some(receiver) = state.get_entity(receiver_id) else {
            return TaskStart::new(Vec::new());
        };

        match state.calculate_distance(performer, receiver) {
            Some(distance) if distance <= Self::MAX_DISTANCE => {}
            None if receiver_id == self.performer_id => {}
            _ => return TaskStart::new(Vec::new()),
        }

        match receiver.features.get_first_absorbed(claims) {
            Some(Claim::Pain) => {
                let job = DamageJob::new(
                    self.performer_id,
                    receiver_id,
                    self.item_id,
                    self.hand,
                    vec![Event::Finished {
                        receiver_id: self.performer_id,
                    }],
                    now,
                );
                TaskStart::with_job(Vec::new(), Box::new(job))
            }
            Some(Claim::Food) => {
                self.emit_eat_begin = true;
                let job = crate::jobs::EatJob::new(
                    receiver_id,
                    self.hand,
                    self.item_id,
                    vec![Event::Finished {
                        receiver_id: self.performer_id,
                    }],
                    now,
                );
                TaskStart::with_job(
                    vec![Action::EatBegin { eater_id: receiver_id }],
                    Box::new(job),
                )
            }
            // CARGO / HARVEST / no absorbable claim: giving and harvest-transfer
            // are not part of this engine's scope yet.
            _ => TaskStart::new(Vec::new()),
        }
    }

    fn finish(&mut self, _state: &mut State, _now: Instant, _last_tick: Option<Instant>) -> Vec<Action> {
        if self.emit_eat_begin {
            vec![Action::EatEnd {
                eater_id: self.receiver_id.unwrap_or(self.performer_id),
            }]
        } else {
            Vec::new()
        }
    }
}

pub struct WalkTask {
    entity_id: EntityId,
    speed: f64,
    bearing: f64,
    duration: Duration,
}

impl WalkTask {
    pub fn new(entity_id: EntityId, speed: f64, bearing: f64, duration: Duration) -> Self {
        Self {
            entity_id,
            speed,
            bearing,
            duration,
        }
    }
}

impl Task for WalkTask {
    fn start(&mut self, _state: &mut State, now: Instant) -> TaskStart {
        let job = MotionJob::new(
            self.entity_id,
            self.speed,
            self.bearing,
            self.duration,
            vec![Event::Finished {
                receiver_id: self.entity_id,
            }],
            now,
        );
        TaskStart::with_job(
            vec![Action::Motion {
                actor_id: self.entity_id,
                speed: self.speed,
                bearing: self.bearing,
                timeout: self.duration.as_secs_f64(),
            }],
            Box::new(job),
        )
    }

    fn finish(&mut self, state: &mut State, _now: Instant, _last_tick: Option<Instant>) -> Vec<Action> {
        let Some(position) = state.get_entity(self.entity_id).and_then(|e| e.position()) else {
            return Vec::new();
        };
        vec![Action::Localization {
            actor_id: self.entity_id,
            position,
        }]
    }
}

pub struct GrowTask {
    id: EntityId,
    interval: Duration,
}

impl GrowTask {
    pub fn new(id: EntityId, interval: Duration) -> Self {
        Self { id, interval }
    }
}

impl Task for GrowTask {
    fn start(&mut self, _state: &mut State, now: Instant) -> TaskStart {
        TaskStart::with_job(
            Vec::new(),
            Box::new(GrowJob::new(self.id, self.interval, now)),
        )
    }

    fn finish(&mut self, _state: &mut State, _now: Instant, _last_tick: Option<Instant>) -> Vec<Action> {
        Vec::new()
    }
}

pub struct StateChangeTask {
    id: EntityId,
    state_name: String,
}

impl StateChangeTask {
    pub fn new(id: EntityId, state_name: impl Into<String>) -> Self {
        Self {
            id,
            state_name: state_name.into(),
        }
    }
}

impl Task for StateChangeTask {
    fn start(&mut self, state: &mut State, now: Instant) -> TaskStart {
        if let Some(entity) = state.get_entity_mut(self.id) {
            match entity.features.stateful.as_mut() {
                Some(stateful) => stateful.set_state_name(self.state_name.clone()),
                None => entity.features.set_stateful(self.state_name.clone()),
            }
        }

        TaskStart::with_job(
            vec![Action::ActorUpdate {
                actor_id: self.id,
                state_name: self.state_name.clone(),
            }],
            Box::new(WaitJob::new(
                Duration::ZERO,
                vec![Event::Finished { receiver_id: self.id }],
                now,
            )),
        )
    }

    fn finish(&mut self, _state: &mut State, _now: Instant, _last_tick: Option<Instant>) -> Vec<Action> {
        Vec::new()
    }
}

#[cfg(test)]
#[path = "tasks_tests.rs"]
mod tests;
