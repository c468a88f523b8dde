// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Entities: a `kind` tag, an optional position, a feature bundle, and the
//! task currently driving it. Behavior — which task a kind reacts to an
//! event with — lives in the engine crate; this type is data only.

use serde::{Deserialize, Serialize};

use crate::action::Actor;
use crate::essence::Essence;
use crate::features::Features;
use crate::geometry::Point;
use crate::id::EntityId;
use crate::inventory::EntityInfo;
use crate::task::{EmptyTask, Task};

/// Reference pocket volume used for inventory entries whose holder has no
/// `inventorable` feature of its own to size against.
pub const BIG_VOLUME: i64 = 25;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EntityKind {
    Hero,
    Warrior,
    BerryBush,
    Spruce,
    Rocks,
    Gold,
    Log,
    Axe,
    RawMeat,
    Twig,
}

impl EntityKind {
    pub fn codename(self) -> &'static str {
        match self {
            EntityKind::Hero => "pirate",
            EntityKind::Warrior => "warrior",
            EntityKind::BerryBush => "berry_bush",
            EntityKind::Spruce => "spruce",
            EntityKind::Rocks => "rocks",
            EntityKind::Gold => "gold",
            EntityKind::Log => "log",
            EntityKind::Axe => "axe",
            EntityKind::RawMeat => "raw_meat",
            EntityKind::Twig => "twig",
        }
    }

    pub fn essence(self) -> Essence {
        match self {
            EntityKind::Hero | EntityKind::Warrior => Essence::Hero,
            EntityKind::BerryBush | EntityKind::Spruce => Essence::Plant,
            EntityKind::Rocks => Essence::Rocks,
            EntityKind::Gold => Essence::Gold,
            EntityKind::Log => Essence::Logs,
            EntityKind::Axe => Essence::Tool,
            EntityKind::RawMeat => Essence::Meat,
            EntityKind::Twig => Essence::Sticks,
        }
    }
}

pub struct Entity {
    id: EntityId,
    kind: EntityKind,
    position: Option<Point>,
    pub features: Features,
    pub task: Box<dyn Task>,
}

impl Entity {
    /// Builds an entity of `kind` with its feature bundle set up the way
    /// the corresponding class in the source does in its constructor.
    /// Behavior (event handling) is assigned separately by the engine.
    pub fn new(id: EntityId, kind: EntityKind, position: Option<Point>) -> Self {
        let mut features = Features::new();
        match kind {
            EntityKind::Rocks | EntityKind::Gold => {
                features.set_inventorable(5);
                features.set_stackable(1);
            }
            EntityKind::RawMeat => {
                // Edible so Hero can restore hunger by activating a hand
                // holding it; the source defines EdibleFeature/EatJob but
                // never wires a concrete entity to them (see DESIGN.md).
                features.set_edible(crate::features::Nutrients { hunger: 20 });
                features.set_inventorable(5);
                features.set_stackable(1);
            }
            EntityKind::Log => {
                features.set_inventorable(100);
            }
            EntityKind::Axe => {
                features.set_inventorable(10);
                features.set_tool_or_weapon(10.0, 100.0, 20.0, 50.0);
            }
            EntityKind::Twig => {
                features.set_inventorable(1);
                features.set_stackable(1);
            }
            EntityKind::Spruce => {
                features.set_damageable(200.0, 400.0, crate::features::DamageVariant::Chop);
            }
            EntityKind::BerryBush => {
                features.set_harvestable(5, 0, 10, 1, 3);
                features.set_damageable(50.0, 50.0, crate::features::DamageVariant::Chop);
            }
            EntityKind::Warrior => {
                features.set_performer();
                features.set_damageable(200.0, 200.0, crate::features::DamageVariant::Attack);
            }
            EntityKind::Hero => {
                // Unlike the source's Pirate (which has no performer feature
                // and relies on the client's first move), Hero also gets
                // `performer` so the engine's generic connect-time entity
                // hook auto-resumes it into IdleTask without needing a
                // client-issued move first.
                features.set_performer();
                features.set_inventory();
                features.set_eater(100.0, 50.0);
            }
        }

        Self {
            id,
            kind,
            position,
            features,
            task: Box::new(EmptyTask),
        }
    }

    pub fn id(&self) -> EntityId {
        self.id
    }

    pub fn kind(&self) -> EntityKind {
        self.kind
    }

    pub fn essence(&self) -> Essence {
        self.kind.essence()
    }

    pub fn codename(&self) -> &'static str {
        self.kind.codename()
    }

    pub fn position(&self) -> Option<Point> {
        self.position
    }

    pub fn set_position(&mut self, position: Option<Point>) {
        self.position = position;
    }

    pub fn move_by(&mut self, distance: f64, bearing: f64, radius: f64) {
        if let Some(position) = self.position {
            self.position = Some(position.moved_by(distance, bearing, radius));
        }
    }

    pub fn as_actor(&self) -> Actor {
        Actor {
            id: self.id,
            codename: self.codename().to_string(),
            position: self.position,
        }
    }

    /// Quantity-aware view of this entity as a craftable ingredient.
    pub fn get_quantity(&self) -> i64 {
        self.features.get_quantity()
    }

    /// This entity as it would sit inside someone else's inventory.
    pub fn as_info(&self) -> EntityInfo {
        let item_volume = self
            .features
            .inventorable
            .as_ref()
            .map_or(1, |inventorable| inventorable.volume());

        EntityInfo {
            id: self.id,
            essence: self.essence(),
            quantity: self.features.get_quantity(),
            item_volume,
            max_volume: BIG_VOLUME,
            codename: self.codename().to_string(),
        }
    }
}

#[cfg(test)]
#[path = "entity_tests.rs"]
mod tests;
