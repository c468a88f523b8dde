// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! End-to-end scenarios against the `Engine` with a `FakeClock` and a
//! `CollectingGateway`, on a bare sphere of radius 100. Each test is one
//! named scenario: connect/idle, a warrior's autonomous walk loop, an
//! out-of-range vs. in-range pick, an axe craft, and a berry bush crossing
//! its bare/covered threshold.

use std::sync::Arc;
use std::time::Duration;

use edgin_sim_core::{
    Action, Assembly, AssemblySource, BareSphere, Entity, EntityId, EntityKind, Event, FakeClock,
    Hand, Point, State,
};
use edgin_sim_engine::{prime_world, CollectingGateway, Engine};

fn id(value: u64) -> EntityId {
    match EntityId::new(value) {
        Some(id) => id,
        None => unreachable!("scenario ids are nonzero literals"),
    }
}

fn sphere_state(entities: Vec<Entity>) -> State {
    State::new(Arc::new(BareSphere::new(100.0)), entities)
}

fn test_engine(entities: Vec<Entity>) -> (Engine<FakeClock>, Arc<CollectingGateway>, FakeClock) {
    let clock = FakeClock::new();
    let gateway = Arc::new(CollectingGateway::new());
    let engine = Engine::new(sphere_state(entities), clock.clone(), gateway.clone());
    (engine, gateway, clock)
}

/// S1: connecting spawns a hero at (0.5π, 0), sends it the full connect
/// sequence, and auto-resumes it to idle with no client move required.
#[tokio::test]
async fn hero_connect_then_idle() {
    let (engine, gateway, _clock) = test_engine(Vec::new());

    let hero_id = engine.connect_hero(|_| {}).await;

    let actions = gateway.all_actions();
    assert!(matches!(actions.first(), Some(Action::ActorCreation { actors }) if actors.is_empty()));
    assert!(actions
        .iter()
        .any(|a| matches!(a, Action::Configuration { actor_id, radius } if *actor_id == hero_id && *radius == 100.0)));
    assert!(actions
        .iter()
        .any(|a| matches!(a, Action::InventoryUpdate { actor_id, .. } if *actor_id == hero_id)));
    assert!(actions
        .iter()
        .any(|a| matches!(a, Action::ActorCreation { actors } if actors.iter().any(|actor| actor.id == hero_id))));
    assert!(actions.iter().any(|a| matches!(a, Action::Idle { actor_id } if *actor_id == hero_id)));
}

/// S2: a warrior walks in 1-second bursts indefinitely — each burst ends
/// with a localization and immediately starts the next with a fresh
/// bearing, never settling into idle.
#[tokio::test]
async fn warrior_walks_in_a_loop() {
    let warrior = Entity::new(id(1), EntityKind::Warrior, Some(Point::new(0.499 * std::f64::consts::PI, 0.001 * std::f64::consts::PI)));
    let warrior_id = warrior.id();
    let (engine, gateway, clock) = test_engine(vec![warrior]);

    prime_world(&engine);
    let first_motion = gateway
        .all_actions()
        .into_iter()
        .find(|a| matches!(a, Action::Motion { actor_id, .. } if *actor_id == warrior_id))
        .expect("resume should start a walk with a Motion broadcast");
    let Action::Motion { speed, timeout, .. } = first_motion else {
        unreachable!()
    };
    assert_eq!(speed, 1.0);
    assert_eq!(timeout, 1.0);

    gateway.take_deliveries();
    clock.advance(Duration::from_secs(1));
    // The MotionJob fires first (queuing Event::Finished at delay zero),
    // then that event itself is popped on the next due check.
    assert!(engine.run_due().await);
    assert!(engine.run_due().await);

    let actions = gateway.all_actions();
    let localization_index = actions
        .iter()
        .position(|a| matches!(a, Action::Localization { actor_id, .. } if *actor_id == warrior_id))
        .expect("walk finish should localize the warrior");
    let motion_index = actions
        .iter()
        .position(|a| matches!(a, Action::Motion { actor_id, .. } if *actor_id == warrior_id))
        .expect("a fresh WalkTask should start right after");
    assert!(localization_index < motion_index, "finish actions precede the next task's start actions");
}

/// S3: a rocks entity just outside harvest range yields no `PickBegin` —
/// the task is created but its `start` produces nothing.
#[tokio::test]
async fn pick_out_of_range_emits_nothing() {
    let hero = Entity::new(id(1), EntityKind::Hero, Some(Point::new(0.0, 0.0)));
    let hero_id = hero.id();
    let rocks = Entity::new(id(2), EntityKind::Rocks, Some(Point::new(0.011, 0.011)));
    let rocks_id = rocks.id();
    let (engine, gateway, _clock) = test_engine(vec![hero, rocks]);
    gateway.take_deliveries();

    engine
        .handle_event(Event::HandActivation {
            receiver_id: hero_id,
            hand: Hand::Right,
            object_id: Some(rocks_id),
        })
        .await;

    let actions = gateway.all_actions();
    assert!(!actions.iter().any(|a| matches!(a, Action::PickBegin { .. })));
}

/// S4: a rocks entity within harvest range gets picked up after 1s: it
/// leaves the world and lands in the hero's right hand.
#[tokio::test]
async fn pick_in_range_stores_the_item() {
    let hero = Entity::new(id(1), EntityKind::Hero, Some(Point::new(0.0, 0.0)));
    let hero_id = hero.id();
    let rocks = Entity::new(id(2), EntityKind::Rocks, Some(Point::new(0.009, 0.009)));
    let rocks_id = rocks.id();
    let (engine, gateway, clock) = test_engine(vec![hero, rocks]);
    gateway.take_deliveries();

    engine
        .handle_event(Event::HandActivation {
            receiver_id: hero_id,
            hand: Hand::Right,
            object_id: Some(rocks_id),
        })
        .await;
    assert!(gateway
        .all_actions()
        .iter()
        .any(|a| matches!(a, Action::PickBegin { who_id, what_id } if *who_id == hero_id && *what_id == rocks_id)));

    gateway.take_deliveries();
    clock.advance(Duration::from_secs(1));
    // PickStart fires at delay zero, Finished at the harvest duration —
    // two due entries to drain.
    assert!(engine.run_due().await);
    assert!(engine.run_due().await);

    let actions = gateway.all_actions();
    assert!(actions.iter().any(|a| matches!(a, Action::PickEnd { who_id } if *who_id == hero_id)));
    let inventory_update = actions
        .iter()
        .find_map(|a| match a {
            Action::InventoryUpdate { actor_id, inventory } if *actor_id == hero_id => Some(inventory),
            _ => None,
        })
        .expect("pick should report the hero's updated inventory");
    assert_eq!(inventory_update.get_hand(Hand::Right), Some(rocks_id));
}

/// S5: crafting an axe from rocks×2 + logs×1 consumes exactly those stacks
/// and leaves the untouched gold×2 stack in place.
#[tokio::test]
async fn craft_axe_consumes_declared_ingredients() {
    let mut hero = Entity::new(id(1), EntityKind::Hero, Some(Point::new(0.0, 0.0)));
    let hero_id = hero.id();

    let mut rocks = Entity::new(id(2), EntityKind::Rocks, None);
    rocks.features.stackable.as_mut().unwrap().set_size(2);
    let rocks_id = rocks.id();

    let mut gold = Entity::new(id(3), EntityKind::Gold, None);
    gold.features.stackable.as_mut().unwrap().set_size(2);
    let gold_id = gold.id();

    let log = Entity::new(id(4), EntityKind::Log, None);
    let log_id = log.id();

    {
        let inventory_feature = hero.features.inventory.as_mut().unwrap();
        inventory_feature.get_mut().set_pocket_entry(0, Some(rocks.as_info()));
        inventory_feature.get_mut().set_pocket_entry(1, Some(gold.as_info()));
        inventory_feature.get_mut().set_pocket_entry(2, Some(log.as_info()));
    }

    let (engine, gateway, clock) = test_engine(vec![hero, rocks, gold, log]);
    gateway.take_deliveries();

    let assembly = Assembly {
        recipe_codename: "axe".to_string(),
        sources: vec![
            vec![AssemblySource { actor_id: rocks_id, quantity: 2 }],
            vec![AssemblySource { actor_id: log_id, quantity: 1 }],
        ],
    };
    engine
        .handle_event(Event::Craft { receiver_id: hero_id, assembly })
        .await;
    assert!(gateway.all_actions().iter().any(|a| matches!(a, Action::CraftBegin { .. })));

    gateway.take_deliveries();
    clock.advance(Duration::from_secs(1));
    // The WaitJob fires first (queuing Event::Finished at delay zero), then
    // that event itself is popped on the next due check, running CraftTask's
    // finish.
    assert!(engine.run_due().await);
    assert!(engine.run_due().await);

    let actions = gateway.all_actions();
    let created: Vec<EntityId> = actions
        .iter()
        .filter_map(|a| match a {
            Action::ActorCreation { actors } => Some(actors.iter().map(|actor| actor.id)),
            _ => None,
        })
        .flatten()
        .collect();
    let deleted: Vec<EntityId> = actions
        .iter()
        .filter_map(|a| match a {
            Action::ActorDeletion { actor_ids } => Some(actor_ids.clone()),
            _ => None,
        })
        .flatten()
        .collect();
    assert_eq!(deleted, vec![rocks_id, log_id]);
    assert_eq!(created.len(), 1, "exactly one axe should be created");

    let axe_id = created[0];
    let inventory_update = actions
        .iter()
        .find_map(|a| match a {
            Action::InventoryUpdate { actor_id, inventory } if *actor_id == hero_id => Some(inventory),
            _ => None,
        })
        .expect("craft should report the hero's updated inventory");
    assert!(
        [Hand::Left, Hand::Right]
            .into_iter()
            .any(|hand| inventory_update.get_hand(hand) == Some(axe_id)),
        "the new axe should land in a free hand"
    );
    assert_eq!(inventory_update.get_pocket_entry(1).map(|entry| entry.id), Some(gold_id));
}

/// S6: a berry bush at amount 9 crosses the bare/covered threshold (10) on
/// its next grow tick and broadcasts an `ActorUpdate`.
#[tokio::test]
async fn berry_bush_crosses_grow_threshold() {
    let mut bush = Entity::new(id(1), EntityKind::BerryBush, Some(Point::new(0.503 * std::f64::consts::PI, 0.006 * std::f64::consts::PI)));
    bush.features.set_harvestable(9, 0, 10, 1, 3);
    let bush_id = bush.id();
    let (engine, gateway, clock) = test_engine(vec![bush]);

    prime_world(&engine);
    gateway.take_deliveries();

    clock.advance(Duration::from_secs(5));
    // The GrowJob fires first (queuing a Grow event at delay zero), then
    // that Grow event itself is popped on the next due check.
    assert!(engine.run_due().await);
    assert!(engine.run_due().await);

    let actions = gateway.all_actions();
    assert!(actions.iter().any(|a| matches!(
        a,
        Action::ActorUpdate { actor_id, state_name } if *actor_id == bush_id && state_name == "covered"
    )));
}
