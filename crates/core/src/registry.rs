// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! The static recipe catalog and entity-constructor registry. Both are
//! plain data/functions — no I/O, no mutable global state — so `State` can
//! consult them without needing a handle to anything beyond itself.

use serde::{Deserialize, Serialize};

use crate::entity::{Entity, EntityKind};
use crate::essence::Essence;
use crate::geometry::Point;
use crate::id::EntityId;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Material {
    Mineral,
    Wood,
    Leather,
    Ornament,
    Gadget,
}

impl Material {
    /// Whether an ingredient item's essence satisfies this material.
    pub fn matches(self, essence: Essence) -> bool {
        match self {
            Material::Mineral => matches!(essence, Essence::Rocks | Essence::Gold),
            Material::Wood => matches!(essence, Essence::Logs | Essence::Sticks),
            Material::Leather | Material::Ornament | Material::Gadget => false,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Ingredient {
    pub material: Material,
    pub quantity: i64,
}

impl Ingredient {
    pub fn new(material: Material, quantity: i64) -> Self {
        Self { material, quantity }
    }

    pub fn match_essence(&self, essence: Essence) -> bool {
        self.material.matches(essence)
    }
}

#[derive(Debug, Clone)]
pub struct Recipe {
    codename: &'static str,
    description: &'static str,
    ingredients: Vec<Ingredient>,
}

impl Recipe {
    pub fn codename(&self) -> &str {
        self.codename
    }

    pub fn description(&self) -> &str {
        self.description
    }

    pub fn ingredients(&self) -> &[Ingredient] {
        &self.ingredients
    }

    /// Whether `assembly` cites this recipe and supplies one source group
    /// per ingredient.
    pub fn validate_assembly(&self, assembly: &Assembly) -> bool {
        assembly.recipe_codename == self.codename && assembly.sources.len() == self.ingredients.len()
    }
}

/// One item offered toward an ingredient slot of an [`Assembly`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssemblySource {
    pub actor_id: EntityId,
    pub quantity: i64,
}

/// A concrete crafting attempt: a recipe codename plus, for each ingredient
/// slot (in recipe order), the inventory items offered to satisfy it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Assembly {
    pub recipe_codename: String,
    pub sources: Vec<Vec<AssemblySource>>,
}

/// The recipe catalog. A `Vec` rather than a `HashMap` because lookups are
/// rare (once per craft attempt) and the catalog is tiny.
pub fn recipes() -> Vec<Recipe> {
    vec![Recipe {
        codename: "axe",
        description: "Axe",
        ingredients: vec![
            Ingredient::new(Material::Mineral, 2),
            Ingredient::new(Material::Wood, 1),
        ],
    }]
}

pub fn find_recipe_by_codename(codename: &str) -> Option<Recipe> {
    recipes().into_iter().find(|recipe| recipe.codename() == codename)
}

/// Builds the entity a recipe codename names, if any recipe or world
/// entity goes by that codename. Positions are caller-assigned.
pub fn construct_entity(codename: &str, id: EntityId, position: Option<Point>) -> Option<Entity> {
    let kind = match codename {
        "pirate" => EntityKind::Hero,
        "warrior" => EntityKind::Warrior,
        "berry_bush" => EntityKind::BerryBush,
        "spruce" => EntityKind::Spruce,
        "rocks" => EntityKind::Rocks,
        "gold" => EntityKind::Gold,
        "log" => EntityKind::Log,
        "axe" => EntityKind::Axe,
        "raw_meat" => EntityKind::RawMeat,
        "twig" => EntityKind::Twig,
        _ => return None,
    };
    Some(Entity::new(id, kind, position))
}

#[cfg(test)]
#[path = "registry_tests.rs"]
mod tests;
