// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use std::sync::Arc;

use super::*;
use crate::entity::EntityKind;
use crate::geometry::{BareSphere, Point};
use crate::inventory::Hand;
use crate::registry::AssemblySource;

fn id(value: u64) -> EntityId {
    match EntityId::new(value) {
        Some(id) => id,
        None => unreachable!("test ids are nonzero literals"),
    }
}

fn sphere() -> Arc<dyn crate::geometry::Elevation> {
    Arc::new(BareSphere::new(100.0))
}

#[test]
fn distance_is_none_without_both_positions() {
    let a = Entity::new(id(1), EntityKind::Rocks, Some(Point::new(0.0, 0.0)));
    let b = Entity::new(id(2), EntityKind::Gold, None);
    let state = State::new(sphere(), vec![]);
    assert_eq!(state.calculate_distance(&a, &b), None);
}

#[test]
fn find_closest_delivering_picks_nearest_matching_entity() {
    let origin = Point::new(std::f64::consts::FRAC_PI_2, 0.0);
    let hero = Entity::new(id(1), EntityKind::Hero, Some(origin));
    let near = Entity::new(id(2), EntityKind::RawMeat, Some(origin.moved_by(1.0, 0.0, 100.0)));
    let far = Entity::new(id(3), EntityKind::RawMeat, Some(origin.moved_by(50.0, 0.0, 100.0)));

    let state = State::new(sphere(), vec![hero, near, far]);
    let closest = state.find_closest_delivering_within(id(1), [Claim::Food]);
    assert_eq!(closest, Some(id(2)));
}

#[test]
fn generate_entity_id_avoids_existing_ids() {
    let state = State::new(sphere(), vec![Entity::new(id(1), EntityKind::Rocks, None)]);
    for _ in 0..100 {
        assert_ne!(state.generate_entity_id(), id(1));
    }
}

fn info_for(state: &State, id: EntityId, quantity: i64) -> crate::inventory::EntityInfo {
    match state.get_entity(id) {
        Some(entity) => {
            let mut info = entity.as_info();
            info.set_quantity(quantity);
            info
        }
        None => unreachable!("test fixture always has the entity"),
    }
}

#[test]
fn validate_assembly_fails_when_an_ingredient_is_missing_from_inventory() {
    let rocks = Entity::new(id(10), EntityKind::Rocks, None);
    let mut state = State::new(sphere(), vec![rocks]);
    if let Some(entity) = state.get_entity_mut(id(10)) {
        if let Some(stackable) = entity.features.stackable.as_mut() {
            stackable.set_size(2);
        }
    }

    let mut inventory = Inventory::new();
    inventory.store_entry(Hand::Right, Some(info_for(&state, id(10), 2)));

    let assembly = registry::Assembly {
        recipe_codename: "axe".to_string(),
        sources: vec![
            vec![AssemblySource { actor_id: id(10), quantity: 2 }],
            vec![AssemblySource { actor_id: id(11), quantity: 1 }],
        ],
    };

    assert!(!state.validate_assembly(&assembly, &inventory));
}

#[test]
fn craft_entity_consumes_ingredients_and_produces_an_axe() {
    let rocks = Entity::new(id(10), EntityKind::Rocks, None);
    let log = Entity::new(id(11), EntityKind::Log, None);
    let mut state = State::new(sphere(), vec![rocks, log]);
    if let Some(entity) = state.get_entity_mut(id(10)) {
        if let Some(stackable) = entity.features.stackable.as_mut() {
            stackable.set_size(2);
        }
    }

    let mut inventory = Inventory::new();
    inventory.set_pocket_entry(0, Some(info_for(&state, id(10), 2)));
    inventory.set_pocket_entry(1, Some(info_for(&state, id(11), 1)));

    let assembly = registry::Assembly {
        recipe_codename: "axe".to_string(),
        sources: vec![
            vec![AssemblySource { actor_id: id(10), quantity: 2 }],
            vec![AssemblySource { actor_id: id(11), quantity: 1 }],
        ],
    };

    assert!(state.validate_assembly(&assembly, &inventory));
    let result = state.craft_entity(&assembly, &mut inventory);

    assert_eq!(result.created.len(), 1);
    assert_eq!(result.deleted.len(), 2);
    assert!(state.get_entity(id(10)).is_none());
    assert!(state.get_entity(id(11)).is_none());
}

#[test]
fn delete_and_add_entity_round_trip() {
    let mut state = State::new(sphere(), vec![]);
    let entity = Entity::new(id(5), EntityKind::Gold, None);
    state.add_entity(entity);
    assert!(state.get_entity(id(5)).is_some());
    state.delete_entity(id(5));
    assert!(state.get_entity(id(5)).is_none());
}
