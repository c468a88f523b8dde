// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! The pure world-generation factory (spec.md §2 "Out of scope... world
//! generation (a pure factory returning an initial `State`)"). Kept a
//! straight port of the source's `WorldGenerator.generate`: fixed ids and
//! positions for a handful of named entities, plus a scattered stand of
//! spruces, all on a featureless sphere of the given radius.

use std::f64::consts::PI;
use std::sync::Arc;

use rand::Rng;

use edgin_sim_core::{BareSphere, Entity, EntityId, EntityKind, Point, State};

fn id(value: u64) -> EntityId {
    match EntityId::new(value) {
        Some(id) => id,
        None => unreachable!("worldgen ids are nonzero literals"),
    }
}

/// An empty world on a bare sphere of `radius` — the source's
/// `generate_basic`, useful for a server started with no scenery.
pub fn generate_basic(radius: f64) -> State {
    State::new(Arc::new(BareSphere::new(radius)), Vec::new())
}

/// The source's `generate`: a fixed starter cast plus forty-some randomly
/// scattered spruces, all named ids so a returning client can expect the
/// same world shape every run (spec.md §6 "Persistence: none. State is
/// rebuilt from the world generator on each start.").
pub fn generate(radius: f64) -> State {
    let mut entities = vec![
        Entity::new(id(1), EntityKind::Axe, Some(Point::new(0.505 * PI, -0.005 * PI))),
        Entity::new(id(2), EntityKind::Warrior, Some(Point::new(0.499 * PI, 0.001 * PI))),
        Entity::new(id(3), EntityKind::Warrior, Some(Point::new(0.498 * PI, 0.002 * PI))),
        Entity::new(id(4), EntityKind::Rocks, Some(Point::new(0.497 * PI, 0.003 * PI))),
        Entity::new(id(5), EntityKind::Rocks, Some(Point::new(0.490 * PI, 0.010 * PI))),
        Entity::new(id(6), EntityKind::Gold, Some(Point::new(0.496 * PI, 0.004 * PI))),
        Entity::new(id(7), EntityKind::BerryBush, Some(Point::new(0.503 * PI, 0.006 * PI))),
    ];

    let mut rng = rand::thread_rng();
    for i in 8..50 {
        let phi = rng.gen_range(0.4 * PI..0.6 * PI);
        let theta = rng.gen_range(-0.1 * PI..0.1 * PI);
        entities.push(Entity::new(id(i), EntityKind::Spruce, Some(Point::new(phi, theta))));
    }

    State::new(Arc::new(BareSphere::new(radius)), entities)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn generate_basic_is_empty() {
        let state = generate_basic(100.0);
        assert_eq!(state.get_entities().count(), 0);
        assert_eq!(state.get_radius(), 100.0);
    }

    #[test]
    fn generate_populates_fixed_starter_cast() {
        let state = generate(100.0);
        assert!(state.get_entities().count() >= 7);
        assert!(state.get_entity(id(2)).is_some());
        assert_eq!(state.get_entity(id(2)).map(|e| e.kind()), Some(EntityKind::Warrior));
    }
}
