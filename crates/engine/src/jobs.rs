// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Concrete jobs: the deferred side of every task that needs to do more
//! than fire once on start/finish.

use std::time::{Duration, Instant};

use edgin_sim_core::{Action, Event, Hand, Job, JobResult, State};

/// Repeatedly ticks a tool-on-receiver damage exchange until concluded (by
/// the performer superseding their task) or the receiver stops being
/// damageable (dies, is removed).
pub struct DamageJob {
    dealer_id: edgin_sim_core::EntityId,
    receiver_id: edgin_sim_core::EntityId,
    tool_id: edgin_sim_core::EntityId,
    hand: Hand,
    finish_events: Vec<Event>,
    last_tick: Instant,
    concluded: bool,
}

impl DamageJob {
    pub const REPEAT_INTERVAL: Duration = Duration::from_secs(1);

    pub fn new(
        dealer_id: edgin_sim_core::EntityId,
        receiver_id: edgin_sim_core::EntityId,
        tool_id: edgin_sim_core::EntityId,
        hand: Hand,
        finish_events: Vec<Event>,
        now: Instant,
    ) -> Self {
        Self {
            dealer_id,
            receiver_id,
            tool_id,
            hand,
            finish_events,
            last_tick: now,
            concluded: false,
        }
    }
}

impl Job for DamageJob {
    fn get_start_delay(&self) -> Duration {
        Self::REPEAT_INTERVAL
    }

    fn execute(&mut self, state: &mut State, _now: Instant) -> JobResult {
        let finish = JobResult {
            events: self.finish_events.clone(),
            ..JobResult::empty()
        };

        if self.should_conclude() {
            return finish;
        }

        let Some(dealer) = state.get_entity(self.dealer_id) else {
            return finish;
        };
        if dealer.features.inventory.is_none() {
            return finish;
        }

        let Some(receiver) = state.get_entity(self.receiver_id) else {
            return finish;
        };
        let Some(damageable) = &receiver.features.damageable else {
            return finish;
        };
        let damage_variant = damageable.damage_variant();

        let Some(tool) = state.get_entity(self.tool_id) else {
            return finish;
        };
        let Some(tool_feature) = &tool.features.tool_or_weapon else {
            return finish;
        };
        let damage_amount = tool_feature.get_damage(damage_variant);

        JobResult {
            events: vec![Event::Damage {
                receiver_id: self.receiver_id,
                dealer_id: self.dealer_id,
                damage_amount,
                damage_variant,
            }],
            actions: vec![Action::Damage {
                dealer_id: self.dealer_id,
                receiver_id: self.receiver_id,
                variant: damage_variant,
                hand: self.hand,
            }],
            repeat: Some(Self::REPEAT_INTERVAL),
        }
    }

    fn last_tick(&self) -> Instant {
        self.last_tick
    }

    fn set_last_tick(&mut self, now: Instant) {
        self.last_tick = now;
    }

    fn conclude(&mut self) {
        self.concluded = true;
    }

    fn should_conclude(&self) -> bool {
        self.concluded
    }
}

/// Removes the dying entity from state after a zero-delay tick, giving the
/// dropped actors one scheduler turn to exist before their origin vanishes.
pub struct DieJob {
    dier_id: edgin_sim_core::EntityId,
    last_tick: Instant,
}

impl DieJob {
    pub fn new(dier_id: edgin_sim_core::EntityId, now: Instant) -> Self {
        Self { dier_id, last_tick: now }
    }
}

impl Job for DieJob {
    fn get_start_delay(&self) -> Duration {
        Duration::ZERO
    }

    fn execute(&mut self, state: &mut State, _now: Instant) -> JobResult {
        state.delete_entity(self.dier_id);
        JobResult::empty()
    }

    fn last_tick(&self) -> Instant {
        self.last_tick
    }

    fn set_last_tick(&mut self, now: Instant) {
        self.last_tick = now;
    }
}

/// Absorbs a food item's nutrients into an eater, then removes the food.
pub struct EatJob {
    eater_id: edgin_sim_core::EntityId,
    eater_hand: Hand,
    food_id: edgin_sim_core::EntityId,
    finish_events: Vec<Event>,
    last_tick: Instant,
}

impl EatJob {
    pub const START_DELAY: Duration = Duration::from_millis(500);

    pub fn new(
        eater_id: edgin_sim_core::EntityId,
        eater_hand: Hand,
        food_id: edgin_sim_core::EntityId,
        finish_events: Vec<Event>,
        now: Instant,
    ) -> Self {
        Self {
            eater_id,
            eater_hand,
            food_id,
            finish_events,
            last_tick: now,
        }
    }
}

impl Job for EatJob {
    fn get_start_delay(&self) -> Duration {
        Self::START_DELAY
    }

    fn execute(&mut self, state: &mut State, _now: Instant) -> JobResult {
        let finish = JobResult {
            events: self.finish_events.clone(),
            ..JobResult::empty()
        };

        let Some(food) = state.get_entity(self.food_id) else {
            return finish;
        };
        let Some(edible) = &food.features.edible else {
            return finish;
        };
        let nutrients = edible.nutrients() * food.features.get_quantity();

        let Some(eater) = state.get_entity_mut(self.eater_id) else {
            return finish;
        };
        if eater.features.inventory.is_none() {
            return finish;
        }
        let Some(eater_feature) = eater.features.eater.as_mut() else {
            return finish;
        };
        if !eater_feature.absorb(nutrients) {
            return JobResult::empty();
        }
        let stats = eater_feature.gather_stats();

        if let Some(inventory_feature) = eater.features.inventory.as_mut() {
            inventory_feature.get_mut().store_entry(self.eater_hand, None);
        }

        state.delete_entity(self.food_id);

        let eater_id = self.eater_id;
        let inventory = state
            .get_entity(eater_id)
            .and_then(|e| e.features.inventory.as_ref())
            .map(|f| f.get().clone());

        let mut actions = Vec::new();
        if let Some(inventory) = inventory {
            actions.push(Action::InventoryUpdate {
                actor_id: eater_id,
                inventory,
            });
        }
        actions.push(Action::ActorDeletion {
            actor_ids: vec![self.food_id],
        });
        actions.push(Action::StatUpdate {
            actor_id: eater_id,
            stats,
        });

        JobResult {
            events: Vec::new(),
            actions,
            repeat: None,
        }
    }

    fn last_tick(&self) -> Instant {
        self.last_tick
    }

    fn set_last_tick(&mut self, now: Instant) {
        self.last_tick = now;
    }
}

/// Periodically emits a `Grow` event for a renewable resource.
pub struct GrowJob {
    grower_id: edgin_sim_core::EntityId,
    grow_interval: Duration,
    last_tick: Instant,
}

impl GrowJob {
    pub fn new(grower_id: edgin_sim_core::EntityId, grow_interval: Duration, now: Instant) -> Self {
        Self {
            grower_id,
            grow_interval,
            last_tick: now,
        }
    }
}

impl Job for GrowJob {
    fn get_start_delay(&self) -> Duration {
        self.grow_interval
    }

    fn execute(&mut self, _state: &mut State, _now: Instant) -> JobResult {
        JobResult {
            events: vec![Event::Grow {
                receiver_id: self.grower_id,
            }],
            actions: Vec::new(),
            repeat: Some(self.grow_interval),
        }
    }

    fn last_tick(&self) -> Instant {
        self.last_tick
    }

    fn set_last_tick(&mut self, now: Instant) {
        self.last_tick = now;
    }
}

/// Drains one unit of hunger capacity per tick and reports stats.
pub struct HungerDrainJob {
    entity_id: edgin_sim_core::EntityId,
    last_tick: Instant,
}

impl HungerDrainJob {
    pub const INTERVAL: Duration = Duration::from_secs(1);

    pub fn new(entity_id: edgin_sim_core::EntityId, now: Instant) -> Self {
        Self { entity_id, last_tick: now }
    }
}

impl Job for HungerDrainJob {
    fn get_start_delay(&self) -> Duration {
        Self::INTERVAL
    }

    fn execute(&mut self, state: &mut State, _now: Instant) -> JobResult {
        let Some(entity) = state.get_entity_mut(self.entity_id) else {
            return JobResult::empty();
        };
        let Some(eater) = entity.features.eater.as_mut() else {
            return JobResult::empty();
        };
        eater.deduce(1.0);
        let stats = eater.gather_stats();

        JobResult {
            events: Vec::new(),
            actions: vec![Action::StatUpdate {
                actor_id: self.entity_id,
                stats,
            }],
            repeat: Some(Self::INTERVAL),
        }
    }

    fn last_tick(&self) -> Instant {
        self.last_tick
    }

    fn set_last_tick(&mut self, now: Instant) {
        self.last_tick = now;
    }
}

/// Advances an entity along a great circle every tick, bounded by
/// `duration`; emits `finish_events` on natural timeout.
pub struct MotionJob {
    entity_id: edgin_sim_core::EntityId,
    speed: f64,
    bearing: f64,
    duration: Duration,
    finish_events: Vec<Event>,
    start_time: Instant,
    last_tick: Instant,
}

impl MotionJob {
    pub const INTERVAL: Duration = Duration::from_millis(100);

    pub fn new(
        entity_id: edgin_sim_core::EntityId,
        speed: f64,
        bearing: f64,
        duration: Duration,
        finish_events: Vec<Event>,
        now: Instant,
    ) -> Self {
        Self {
            entity_id,
            speed,
            bearing,
            duration,
            finish_events,
            start_time: now,
            last_tick: now,
        }
    }

    pub fn bearing(&self) -> f64 {
        self.bearing
    }
}

impl Job for MotionJob {
    fn get_start_delay(&self) -> Duration {
        Self::INTERVAL
    }

    fn execute(&mut self, state: &mut State, now: Instant) -> JobResult {
        let Some(entity) = state.get_entity_mut(self.entity_id) else {
            return JobResult {
                events: self.finish_events.clone(),
                ..JobResult::empty()
            };
        };

        let interval_secs = Self::INTERVAL.as_secs_f64();
        entity.move_by(self.speed * interval_secs, self.bearing, state.get_radius());

        if now >= self.start_time + self.duration {
            JobResult {
                events: self.finish_events.clone(),
                ..JobResult::empty()
            }
        } else {
            JobResult {
                events: Vec::new(),
                actions: Vec::new(),
                repeat: Some(Self::INTERVAL),
            }
        }
    }

    fn last_tick(&self) -> Instant {
        self.last_tick
    }

    fn set_last_tick(&mut self, now: Instant) {
        self.last_tick = now;
    }
}

/// A single wait stage, optionally chained to a follow-up stage via
/// `and_then` — the source's way of expressing "wait, then wait again with
/// different events" without a second scheduler entry.
struct WaitStage {
    duration: Duration,
    events: Vec<Event>,
}

pub struct WaitJob {
    duration: Duration,
    events: Vec<Event>,
    next: Option<Box<WaitStage>>,
    last_tick: Instant,
}

impl WaitJob {
    pub fn new(duration: Duration, events: Vec<Event>, now: Instant) -> Self {
        Self {
            duration,
            events,
            next: None,
            last_tick: now,
        }
    }

    /// Chains a follow-up wait stage, fired immediately after this one
    /// completes. Returns `self` for call-site chaining.
    pub fn and_then(mut self, duration: Duration, events: Vec<Event>) -> Self {
        self.next = Some(Box::new(WaitStage { duration, events }));
        self
    }
}

impl Job for WaitJob {
    fn get_start_delay(&self) -> Duration {
        self.duration
    }

    fn execute(&mut self, _state: &mut State, _now: Instant) -> JobResult {
        match self.next.take() {
            Some(stage) => {
                let result = JobResult {
                    events: self.events.clone(),
                    actions: Vec::new(),
                    repeat: Some(stage.duration),
                };
                self.duration = stage.duration;
                self.events = stage.events;
                result
            }
            None => JobResult {
                events: self.events.clone(),
                actions: Vec::new(),
                repeat: None,
            },
        }
    }

    fn last_tick(&self) -> Instant {
        self.last_tick
    }

    fn set_last_tick(&mut self, now: Instant) {
        self.last_tick = now;
    }
}

#[cfg(test)]
#[path = "jobs_tests.rs"]
mod tests;
