// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! The `Engine` (spec.md §4.3's "Processor") and its `Runner` loop
//! (§4.2). `Engine` owns the one and only `State` plus the `Scheduler`
//! behind a single lock (§5: "the engine must hold a single global lock
//! for the whole of one event- or job-handling step"), so event handling
//! and job firing never interleave mid-step. `Gateway` sends happen after
//! the lock is released — `parking_lot::MutexGuard` is not `Send`, so
//! nothing awaits while holding it.

use std::sync::Arc;
use std::time::{Duration, Instant};

use parking_lot::Mutex;
use tracing::{debug, trace};

use edgin_sim_core::{
    Action, Actor, Clock, EmptyTask, Entity, EntityId, EntityKind, Event, Point, Scheduler, State,
    Task, Trigger,
};

use crate::dispatch::dispatch;
use crate::gateway::Gateway;
use crate::jobs::HungerDrainJob;

/// Starting position assigned to every newly connected hero (spec.md §8 S1).
fn hero_spawn_position() -> Point {
    Point::new(std::f64::consts::FRAC_PI_2, 0.0)
}

struct Inner {
    state: State,
    scheduler: Scheduler,
}

/// Consumes decoded client events and scheduler firings, enforcing the
/// task-transition and job-rescheduling rules of spec.md §4.3.
pub struct Engine<C: Clock> {
    clock: C,
    gateway: Arc<dyn Gateway>,
    inner: Mutex<Inner>,
    /// Woken whenever a new scheduler entry might precede whatever the
    /// `Runner` is currently sleeping on.
    woken: tokio::sync::Notify,
}

impl<C: Clock> Engine<C> {
    pub fn new(state: State, clock: C, gateway: Arc<dyn Gateway>) -> Self {
        Self {
            clock,
            gateway,
            inner: Mutex::new(Inner {
                state,
                scheduler: Scheduler::new(),
            }),
            woken: tokio::sync::Notify::new(),
        }
    }

    /// The deadline of the earliest pending scheduler entry, if any — the
    /// `Runner`'s sleep target.
    pub fn next_deadline(&self) -> Option<Instant> {
        self.inner.lock().scheduler.next_deadline()
    }

    /// A future that resolves when a new scheduler entry has been entered,
    /// so the `Runner` can recompute its sleep target instead of oversleeping
    /// past an entry that arrived after it last checked.
    pub async fn woken(&self) {
        self.woken.notified().await;
    }

    /// Entry point for a client move decoded into an `Event` (spec.md §4.3).
    pub async fn handle_event(&self, event: Event) {
        let actions = {
            let mut inner = self.inner.lock();
            let now = self.clock.now();
            transition_event(&mut inner.state, &mut inner.scheduler, now, event)
        };
        self.woken.notify_waiters();
        if !actions.is_empty() {
            self.gateway.broadcast(actions).await;
        }
    }

    /// Pops and processes the single earliest scheduler entry, if one is
    /// due. Returns whether anything fired.
    pub async fn run_due(&self) -> bool {
        let now = self.clock.now();
        let processed = {
            let mut inner = self.inner.lock();
            match inner.scheduler.pop_due(now) {
                Some((_, Trigger::Event(event))) => {
                    Some(transition_event(&mut inner.state, &mut inner.scheduler, now, event))
                }
                Some((handle, Trigger::Job(job))) => {
                    Some(process_job(&mut inner.state, &mut inner.scheduler, handle, job, now))
                }
                None => None,
            }
        };
        match processed {
            Some(actions) => {
                self.woken.notify_waiters();
                if !actions.is_empty() {
                    self.gateway.broadcast(actions).await;
                }
                true
            }
            None => false,
        }
    }

    /// Connection hook (spec.md §4.3): creates a hero, wires its starting
    /// broadcast/unicast sequence, and runs its connect-time autonomous
    /// triggers. Returns the new hero's id.
    ///
    /// `associate` runs synchronously right after the hero id is known but
    /// before any Gateway send — the source's `handle_connection` binds the
    /// socket association before its first `send_actor_creation` call, so a
    /// caller's `Gateway::send_to(hero_id, ..)` during this method can
    /// already resolve a destination. Pass a no-op for a `Gateway` that
    /// doesn't route per-connection (e.g. a test collector).
    pub async fn connect_hero(&self, associate: impl FnOnce(EntityId)) -> EntityId {
        let (hero_id, hero_actor, existing_actors, radius, inventory, entity_actions) = {
            let mut inner = self.inner.lock();
            let now = self.clock.now();

            let existing_actors: Vec<Actor> = inner.state.get_entities().map(Entity::as_actor).collect();

            let hero_id = inner.state.generate_entity_id();
            let hero = Entity::new(hero_id, EntityKind::Hero, Some(hero_spawn_position()));
            let hero_actor = hero.as_actor();
            inner.state.add_entity(hero);

            let radius = inner.state.get_radius();
            let inventory = inner
                .state
                .get_entity(hero_id)
                .and_then(|hero| hero.features.inventory.as_ref())
                .map(|feature| feature.get().clone())
                .unwrap_or_default();

            let entity_actions = handle_entity_added(&mut inner.state, &mut inner.scheduler, now, hero_id);

            (hero_id, hero_actor, existing_actors, radius, inventory, entity_actions)
        };
        self.woken.notify_waiters();
        associate(hero_id);

        self.gateway
            .send_to(hero_id, vec![Action::ActorCreation { actors: existing_actors }])
            .await;
        self.gateway
            .broadcast(vec![Action::ActorCreation { actors: vec![hero_actor] }])
            .await;
        self.gateway
            .send_to(hero_id, vec![Action::Configuration { actor_id: hero_id, radius }])
            .await;
        self.gateway
            .send_to(hero_id, vec![Action::InventoryUpdate { actor_id: hero_id, inventory }])
            .await;
        if !entity_actions.is_empty() {
            self.gateway.broadcast(entity_actions).await;
        }

        debug!(entity_id = %hero_id, "hero connected");
        hero_id
    }

    /// Disconnection hook (spec.md §4.3): the hero's own `Disconnection`
    /// handler turns this into a `DieAndDropTask` with no drops.
    pub async fn disconnect_hero(&self, hero_id: EntityId) {
        debug!(entity_id = %hero_id, "hero disconnected");
        self.handle_event(Event::Disconnection { receiver_id: hero_id }).await;
    }
}

/// Runs every entity already in `State` through the connect-time hook, for
/// world-generated entities (warriors, berry bushes) that need their
/// autonomous behavior kicked off without a client connection.
pub fn prime_world<C: Clock>(engine: &Engine<C>) -> Vec<Action> {
    let mut inner = engine.inner.lock();
    let now = engine.clock.now();
    let ids: Vec<EntityId> = inner.state.get_entities().map(Entity::id).collect();
    let mut actions = Vec::new();
    for id in ids {
        actions.extend(handle_entity_added(&mut inner.state, &mut inner.scheduler, now, id));
    }
    actions
}

/// Mirrors the source's `_handle_entity`: a freshly added entity's
/// connect-time triggers run immediately, inline with the step that added
/// it, rather than being scheduled for later.
fn handle_entity_added(
    state: &mut State,
    scheduler: &mut Scheduler,
    now: Instant,
    entity_id: EntityId,
) -> Vec<Action> {
    let Some(entity) = state.get_entity(entity_id) else {
        return Vec::new();
    };
    // A harvestable entity (e.g. a berry bush) has no performer of its own
    // but still needs its periodic GrowTask cycle kicked off once, the same
    // way a performer's first task is.
    let has_performer = entity.features.performer.is_some() || entity.features.harvestable.is_some();
    let has_eater = entity.features.eater.is_some();

    let mut actions = Vec::new();
    if has_performer {
        actions.extend(transition_event(
            state,
            scheduler,
            now,
            Event::Resume { receiver_id: entity_id },
        ));
    }
    if has_eater {
        let job: Box<dyn edgin_sim_core::Job> = Box::new(HungerDrainJob::new(entity_id, now));
        actions.extend(process_job(state, scheduler, Some(entity_id), job, now));
    }
    actions
}

/// The event-handling algorithm of spec.md §4.3: dispatch a new task,
/// finish the old one, start the new one, and swap the scheduler entry.
fn transition_event(state: &mut State, scheduler: &mut Scheduler, now: Instant, event: Event) -> Vec<Action> {
    let receiver_id = event.receiver_id();
    if state.get_entity(receiver_id).is_none() {
        trace!(entity_id = %receiver_id, "event dropped: entity missing");
        return Vec::new();
    }

    let last_tick = scheduler.job_last_tick(receiver_id);
    let Some(mut new_task) = dispatch(state, event) else {
        return Vec::new();
    };

    let Some(mut old_task) = take_task(state, receiver_id) else {
        return Vec::new();
    };

    let mut actions = old_task.finish(state, now, last_tick);
    let start = new_task.start(state, now);
    actions.extend(start.actions);

    if let Some(entity) = state.get_entity_mut(receiver_id) {
        entity.task = new_task;
    }

    scheduler.cancel(receiver_id);
    if let Some(job) = start.job {
        scheduler.enter(Some(receiver_id), now, job.get_start_delay(), Trigger::Job(job));
    }

    debug!(entity_id = %receiver_id, "task transition");
    actions
}

/// Detaches `entity_id`'s current task, leaving `EmptyTask` in its place,
/// so `finish`/`start` can borrow `State` mutably without aliasing the
/// entity's own task field.
fn take_task(state: &mut State, entity_id: EntityId) -> Option<Box<dyn Task>> {
    let entity = state.get_entity_mut(entity_id)?;
    Some(std::mem::replace(&mut entity.task, Box::new(EmptyTask)))
}

/// The job-firing algorithm of spec.md §4.3: execute, broadcast actions,
/// loop events back through the scheduler at delay 0, and reschedule if
/// the job asked to repeat.
fn process_job(
    state: &mut State,
    scheduler: &mut Scheduler,
    handle: Option<EntityId>,
    mut job: Box<dyn edgin_sim_core::Job>,
    now: Instant,
) -> Vec<Action> {
    let result = job.execute(state, now);

    for event in result.events {
        scheduler.enter(None, now, Duration::ZERO, Trigger::Event(event));
    }

    if let Some(repeat) = result.repeat {
        job.set_last_tick(now);
        scheduler.enter(handle, now, repeat, Trigger::Job(job));
    }

    result.actions
}

#[cfg(test)]
#[path = "engine_tests.rs"]
mod tests;
