// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;

fn id(value: u64) -> EntityId {
    match EntityId::new(value) {
        Some(id) => id,
        None => unreachable!("test ids are nonzero literals"),
    }
}

fn entry(entity_id: u64, quantity: i64) -> EntityInfo {
    EntityInfo {
        id: id(entity_id),
        essence: Essence::Rocks,
        quantity,
        item_volume: 5,
        max_volume: 100,
        codename: "rocks".to_string(),
    }
}

#[test]
fn fresh_inventory_has_both_hands_free() {
    let inventory = Inventory::new();
    assert_eq!(inventory.get_free_hand(Hand::Right), Some(Hand::Right));
}

#[test]
fn storing_in_preferred_hand_frees_only_the_other() {
    let mut inventory = Inventory::new();
    inventory.store_entry(Hand::Right, Some(entry(1, 1)));
    assert_eq!(inventory.get_free_hand(Hand::Right), Some(Hand::Left));
    assert_eq!(inventory.get_hand(Hand::Right), Some(id(1)));
}

#[test]
fn both_hands_full_reports_no_free_hand() {
    let mut inventory = Inventory::new();
    inventory.store_entry(Hand::Left, Some(entry(1, 1)));
    inventory.store_entry(Hand::Right, Some(entry(2, 1)));
    assert_eq!(inventory.get_free_hand(Hand::Right), None);
}

#[test]
fn find_and_remove_by_entity_id() {
    let mut inventory = Inventory::new();
    inventory.store_entry(Hand::Right, Some(entry(9, 1)));
    assert!(inventory.find_entity_with_entity_id(id(9)).is_some());
    inventory.remove_with_entity_id(id(9));
    assert!(inventory.find_entity_with_entity_id(id(9)).is_none());
}

#[test]
fn swap_exchanges_hand_and_pocket() {
    let mut inventory = Inventory::new();
    inventory.store_entry(Hand::Right, Some(entry(1, 1)));
    inventory.swap(Hand::Right, 0);
    assert_eq!(inventory.get_hand(Hand::Right), None);
    assert_eq!(inventory.get_pocket_entry(0).map(|e| e.id), Some(id(1)));
}

#[test]
fn max_quantity_for_item_volume_floors() {
    let e = entry(1, 1);
    assert_eq!(e.calc_max_quantity_for_item_volume(30), 3);
}
