// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;

#[test]
fn claim_priority_follows_setter_call_order() {
    let mut features = Features::new();
    features.set_edible(Nutrients { hunger: 10 });
    features.set_inventorable(5);
    assert_eq!(features.delivery_claims(), &[Claim::Food, Claim::Cargo]);
}

#[test]
fn deliver_and_absorb_use_correct_set_membership() {
    let mut source = Features::new();
    source.set_tool_or_weapon(1.0, 2.0, 3.0, 4.0);

    let mut target = Features::new();
    target.set_damageable(100.0, 100.0, DamageVariant::Attack);

    assert!(source.deliver([Claim::Pain]));
    assert!(target.absorb(source.delivery_claims().iter().copied()));
    assert!(!target.absorb([Claim::Food]));
}

#[test]
fn get_first_absorbed_respects_claim_priority() {
    let mut target = Features::new();
    target.set_eater(100.0, 0.0);
    target.set_inventory();

    let claims = [Claim::Pain, Claim::Food, Claim::Cargo];
    assert_eq!(target.get_first_absorbed(claims), Some(Claim::Food));
}

#[test]
fn damageable_health_clamped_to_zero_minimum() {
    let mut damageable = DamageableFeature::new(10.0, 10.0, DamageVariant::Hit);
    assert!(!damageable.handle_damage(100.0));
    assert_eq!(damageable.health(), 0.0);
}

#[test]
fn harvestable_grow_and_harvest_stay_within_bounds() {
    let mut harvestable = HarvestableFeature::new(9, 0, 10, 1, 5);
    let (old, new) = harvestable.grow();
    assert_eq!((old, new), (9, 10));
    assert!(harvestable.current_amount() >= 0);

    let harvested = harvestable.harvest();
    assert_eq!(harvested, 5);
    assert_eq!(harvestable.current_amount(), 5);
}

#[test]
fn get_quantity_defaults_to_one_without_stackable() {
    let features = Features::new();
    assert_eq!(features.get_quantity(), 1);
}
