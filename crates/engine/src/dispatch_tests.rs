// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use std::sync::Arc;

use edgin_sim_core::{BareSphere, Entity, EntityId, EntityKind, Event, Hand, Point, State};

use super::*;

fn id(value: u64) -> EntityId {
    match EntityId::new(value) {
        Some(id) => id,
        None => unreachable!("test ids are nonzero literals"),
    }
}

fn sphere_state(entities: Vec<Entity>) -> State {
    State::new(Arc::new(BareSphere::new(100.0)), entities)
}

#[test]
fn hero_resume_becomes_idle() {
    let hero = Entity::new(id(1), EntityKind::Hero, Some(Point::new(0.0, 0.0)));
    let mut state = sphere_state(vec![hero]);

    let task = dispatch(&mut state, Event::Resume { receiver_id: id(1) });
    assert!(task.is_some());
}

#[test]
fn hero_hand_activation_without_held_item_harvests() {
    let hero = Entity::new(id(1), EntityKind::Hero, Some(Point::new(0.0, 0.0)));
    let rocks = Entity::new(id(2), EntityKind::Rocks, Some(Point::new(0.009, 0.009)));
    let mut state = sphere_state(vec![hero, rocks]);

    let task = dispatch(
        &mut state,
        Event::HandActivation {
            receiver_id: id(1),
            hand: Hand::Right,
            object_id: Some(id(2)),
        },
    );
    assert!(task.is_some());
}

#[test]
fn hero_hand_activation_with_held_item_uses_item() {
    let mut hero = Entity::new(id(1), EntityKind::Hero, Some(Point::new(0.0, 0.0)));
    let spruce = Entity::new(id(2), EntityKind::Spruce, Some(Point::new(0.0, 0.0)));
    let axe = Entity::new(id(3), EntityKind::Axe, None);
    if let Some(inventory) = hero.features.inventory.as_mut() {
        inventory.get_mut().store_entry(Hand::Right, Some(axe.as_info()));
    }
    let mut state = sphere_state(vec![hero, spruce, axe]);

    let task = dispatch(
        &mut state,
        Event::HandActivation {
            receiver_id: id(1),
            hand: Hand::Right,
            object_id: Some(id(2)),
        },
    );
    assert!(task.is_some());
}

#[test]
fn warrior_survives_damage_and_keeps_its_task() {
    let warrior = Entity::new(id(1), EntityKind::Warrior, Some(Point::new(0.0, 0.0)));
    let mut state = sphere_state(vec![warrior]);

    let task = dispatch(
        &mut state,
        Event::Damage {
            receiver_id: id(1),
            dealer_id: id(2),
            damage_amount: 50.0,
            damage_variant: edgin_sim_core::DamageVariant::Attack,
        },
    );
    assert!(task.is_none());
    let warrior = match state.get_entity(id(1)) {
        Some(w) => w,
        None => unreachable!("warrior survives sub-lethal damage"),
    };
    assert_eq!(warrior.features.damageable.as_ref().map(|d| d.health()), Some(150.0));
}

#[test]
fn warrior_dies_and_drops_raw_meat() {
    let warrior = Entity::new(id(1), EntityKind::Warrior, Some(Point::new(0.0, 0.0)));
    let mut state = sphere_state(vec![warrior]);

    let task = dispatch(
        &mut state,
        Event::Damage {
            receiver_id: id(1),
            dealer_id: id(2),
            damage_amount: 500.0,
            damage_variant: edgin_sim_core::DamageVariant::Attack,
        },
    );
    assert!(task.is_some());
}

#[test]
fn berry_bush_grow_past_threshold_changes_state() {
    let mut bush = Entity::new(id(1), EntityKind::BerryBush, Some(Point::new(0.0, 0.0)));
    bush.features.set_stateful("bare");
    if let Some(harvestable) = bush.features.harvestable.as_mut() {
        // Start one grow tick away from the threshold (bush starts at 5).
        for _ in 0..4 {
            harvestable.grow();
        }
    }
    let mut state = sphere_state(vec![bush]);

    let task = dispatch(&mut state, Event::Grow { receiver_id: id(1) });
    assert!(task.is_some());
}

#[test]
fn berry_bush_grow_before_threshold_keeps_current_task() {
    let mut bush = Entity::new(id(1), EntityKind::BerryBush, Some(Point::new(0.0, 0.0)));
    bush.features.set_stateful("bare");
    let mut state = sphere_state(vec![bush]);

    let task = dispatch(&mut state, Event::Grow { receiver_id: id(1) });
    assert!(task.is_none());
}

#[test]
fn spruce_dies_and_drops_logs() {
    let spruce = Entity::new(id(1), EntityKind::Spruce, Some(Point::new(0.0, 0.0)));
    let mut state = sphere_state(vec![spruce]);

    let task = dispatch(
        &mut state,
        Event::Damage {
            receiver_id: id(1),
            dealer_id: id(2),
            damage_amount: 1000.0,
            damage_variant: edgin_sim_core::DamageVariant::Chop,
        },
    );
    assert!(task.is_some());
}
