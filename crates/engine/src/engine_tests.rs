// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use std::sync::Arc;
use std::time::Duration;

use edgin_sim_core::{BareSphere, Entity, EntityKind, Event, FakeClock, Point, State};

use super::*;
use crate::gateway::collecting::{CollectingGateway, Delivery};

fn sphere_state(entities: Vec<Entity>) -> State {
    State::new(Arc::new(BareSphere::new(100.0)), entities)
}

fn test_engine(entities: Vec<Entity>) -> (Engine<FakeClock>, Arc<CollectingGateway>) {
    let gateway = Arc::new(CollectingGateway::new());
    let engine = Engine::new(sphere_state(entities), FakeClock::new(), gateway.clone());
    (engine, gateway)
}

#[tokio::test]
async fn connect_hero_sends_the_full_connect_sequence() {
    let (engine, gateway) = test_engine(Vec::new());

    let hero_id = engine.connect_hero(|_| {}).await;

    let deliveries = gateway.take_deliveries();
    assert!(matches!(
        deliveries.first(),
        Some(Delivery::SendTo(id, actions))
            if *id == hero_id && matches!(actions.first(), Some(Action::ActorCreation { .. }))
    ));
    assert!(deliveries
        .iter()
        .any(|delivery| matches!(delivery, Delivery::Broadcast(actions)
            if matches!(actions.first(), Some(Action::ActorCreation { .. })))));
    assert!(deliveries
        .iter()
        .any(|delivery| matches!(delivery, Delivery::SendTo(_, actions)
            if matches!(actions.first(), Some(Action::Configuration { .. })))));
    assert!(deliveries
        .iter()
        .any(|delivery| matches!(delivery, Delivery::SendTo(_, actions)
            if matches!(actions.first(), Some(Action::InventoryUpdate { .. })))));
}

#[tokio::test]
async fn connect_hero_resumes_it_into_idle_without_a_client_move() {
    let (engine, gateway) = test_engine(Vec::new());

    engine.connect_hero(|_| {}).await;

    let idled = gateway
        .all_actions()
        .iter()
        .any(|action| matches!(action, Action::Idle { .. }));
    assert!(idled, "hero's performer feature should auto-resume it to IdleTask");
}

#[tokio::test]
async fn disconnect_hero_drops_it_with_no_loot() {
    let (engine, gateway) = test_engine(Vec::new());
    let hero_id = engine.connect_hero(|_| {}).await;
    gateway.take_deliveries();

    engine.disconnect_hero(hero_id).await;

    let deletions = gateway
        .all_actions()
        .iter()
        .any(|action| matches!(action, Action::ActorDeletion { actor_ids } if actor_ids.contains(&hero_id)));
    assert!(deletions);
}

#[tokio::test]
async fn handle_event_transitions_the_task_and_broadcasts_actions() {
    let hero = Entity::new(
        match edgin_sim_core::EntityId::new(1) {
            Some(id) => id,
            None => unreachable!("nonzero literal"),
        },
        EntityKind::Hero,
        Some(Point::new(0.0, 0.0)),
    );
    let hero_id = hero.id();
    let (engine, gateway) = test_engine(vec![hero]);

    engine
        .handle_event(Event::MotionStart {
            receiver_id: hero_id,
            bearing: 0.0,
        })
        .await;

    let moved = gateway
        .all_actions()
        .iter()
        .any(|action| matches!(action, Action::Motion { .. }));
    assert!(moved);
}

#[tokio::test]
async fn prime_world_resumes_every_performer_without_a_connection() {
    let warrior = Entity::new(
        match edgin_sim_core::EntityId::new(1) {
            Some(id) => id,
            None => unreachable!("nonzero literal"),
        },
        EntityKind::Warrior,
        Some(Point::new(0.0, 0.0)),
    );
    let (engine, _gateway) = test_engine(vec![warrior]);

    let actions = prime_world(&engine);

    assert!(actions.iter().any(|action| matches!(action, Action::Motion { .. })));
}

#[tokio::test]
async fn prime_world_starts_the_hunger_drain_job_for_eaters() {
    let hero = Entity::new(
        match edgin_sim_core::EntityId::new(1) {
            Some(id) => id,
            None => unreachable!("nonzero literal"),
        },
        EntityKind::Hero,
        Some(Point::new(0.0, 0.0)),
    );
    let hero_id = hero.id();
    let (engine, _gateway) = test_engine(vec![hero]);

    prime_world(&engine);

    assert!(engine.next_deadline().is_some());
    let _ = hero_id;
}

#[tokio::test]
async fn run_due_fires_the_earliest_scheduler_entry() {
    let warrior = Entity::new(
        match edgin_sim_core::EntityId::new(1) {
            Some(id) => id,
            None => unreachable!("nonzero literal"),
        },
        EntityKind::Warrior,
        Some(Point::new(0.0, 0.0)),
    );
    let (engine, gateway) = test_engine(vec![warrior]);
    prime_world(&engine);
    gateway.take_deliveries();

    assert!(!engine.run_due().await, "nothing due yet");

    if let Some(deadline) = engine.next_deadline() {
        let _ = deadline;
    }
    engine.handle_event(Event::Resume {
        receiver_id: match edgin_sim_core::EntityId::new(1) {
            Some(id) => id,
            None => unreachable!("nonzero literal"),
        },
    })
    .await;

    assert!(engine.next_deadline().is_some());
}

#[tokio::test]
async fn woken_resolves_after_a_new_scheduler_entry() {
    let (engine, _gateway) = test_engine(Vec::new());
    let engine = Arc::new(engine);
    let waiter = tokio::spawn({
        let engine = engine.clone();
        async move { engine.woken().await }
    });

    tokio::task::yield_now().await;
    engine.connect_hero(|_| {}).await;

    tokio::time::timeout(Duration::from_secs(1), waiter)
        .await
        .expect("woken() should resolve once connect_hero enters scheduler work")
        .expect("task should not panic");
}
