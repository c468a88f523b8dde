// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! The authoritative world: every entity plus the elevation function, and
//! the spatial/crafting/inventory operations that only make sense with a
//! view of the whole world.

use std::collections::HashMap;
use std::sync::Arc;

use crate::action::Actor;
use crate::entity::Entity;
use crate::features::Claim;
use crate::geometry::Elevation;
use crate::id::EntityId;
use crate::inventory::Inventory;
use crate::registry;

/// What crafting (or draining a renewable drop-off) changed, for the
/// engine to translate into actions.
#[derive(Debug, Default)]
pub struct CraftResult {
    pub created: Vec<Actor>,
    pub deleted: Vec<EntityId>,
}

impl CraftResult {
    pub fn add_for_creation(&mut self, actor: Actor) {
        self.created.push(actor);
    }

    pub fn add_for_deletion(&mut self, id: EntityId) {
        self.deleted.push(id);
    }
}

pub struct State {
    elevation: Arc<dyn Elevation>,
    entities: HashMap<EntityId, Entity>,
}

impl State {
    pub fn new(elevation: Arc<dyn Elevation>, entities: Vec<Entity>) -> Self {
        Self {
            elevation,
            entities: entities.into_iter().map(|e| (e.id(), e)).collect(),
        }
    }

    pub fn get_entities(&self) -> impl Iterator<Item = &Entity> {
        self.entities.values()
    }

    pub fn get_entity(&self, id: EntityId) -> Option<&Entity> {
        self.entities.get(&id)
    }

    pub fn get_entity_mut(&mut self, id: EntityId) -> Option<&mut Entity> {
        self.entities.get_mut(&id)
    }

    pub fn get_radius(&self) -> f64 {
        self.elevation.radius()
    }

    pub fn calculate_distance(&self, lhs: &Entity, rhs: &Entity) -> Option<f64> {
        match (lhs.position(), rhs.position()) {
            (Some(a), Some(b)) => Some(a.great_circle_distance_to(&b, self.get_radius())),
            _ => None,
        }
    }

    fn find_closest(
        &self,
        reference_id: EntityId,
        matches: impl Fn(&Entity) -> bool,
    ) -> Option<EntityId> {
        let reference = self.get_entity(reference_id)?;
        let mut best: Option<(EntityId, f64)> = None;

        for entity in self.entities.values() {
            if entity.id() == reference_id || !matches(entity) {
                continue;
            }
            if let Some(distance) = self.calculate_distance(reference, entity) {
                let is_closer = match best {
                    Some((_, best_distance)) => distance < best_distance,
                    None => true,
                };
                if is_closer {
                    best = Some((entity.id(), distance));
                }
            }
        }

        best.map(|(id, _)| id)
    }

    /// Closest entity (other than `reference_id`) whose delivery claims
    /// intersect `claims`.
    pub fn find_closest_delivering_within(
        &self,
        reference_id: EntityId,
        claims: impl IntoIterator<Item = Claim> + Clone,
    ) -> Option<EntityId> {
        self.find_closest(reference_id, |entity| entity.features.deliver(claims.clone()))
    }

    /// Closest entity (other than `reference_id`) whose absorption claims
    /// intersect `claims`.
    pub fn find_closest_absorbing_within(
        &self,
        reference_id: EntityId,
        claims: impl IntoIterator<Item = Claim> + Clone,
    ) -> Option<EntityId> {
        self.find_closest(reference_id, |entity| entity.features.absorb(claims.clone()))
    }

    /// Inserts `entity`, assigning it the id it already carries.
    pub fn add_entity(&mut self, entity: Entity) {
        self.entities.insert(entity.id(), entity);
    }

    pub fn delete_entity(&mut self, id: EntityId) {
        self.entities.remove(&id);
    }

    pub fn generate_entity_id(&self) -> EntityId {
        loop {
            let candidate = EntityId::draw(&mut rand::thread_rng());
            if !self.entities.contains_key(&candidate) {
                return candidate;
            }
        }
    }

    /// Whether `assembly` cites a real recipe and every offered source item
    /// exists, matches its ingredient's material, and carries enough
    /// quantity.
    pub fn validate_assembly(&self, assembly: &registry::Assembly, inventory: &Inventory) -> bool {
        let recipe = match registry::find_recipe_by_codename(&assembly.recipe_codename) {
            Some(recipe) => recipe,
            None => return false,
        };
        if !recipe.validate_assembly(assembly) {
            return false;
        }

        for (ingredient, sources) in recipe.ingredients().iter().zip(assembly.sources.iter()) {
            for source in sources {
                let entry = match inventory.find_entity_with_entity_id(source.actor_id) {
                    Some(entry) => entry,
                    None => return false,
                };
                let entity = match self.get_entity(entry.id) {
                    Some(entity) => entity,
                    None => return false,
                };
                if !ingredient.match_essence(entity.essence()) {
                    return false;
                }
                match &entity.features.stackable {
                    Some(stackable) if stackable.get_size() < source.quantity => return false,
                    None if source.quantity > 1 => return false,
                    _ => {}
                }
            }
        }

        true
    }

    /// Validates `assembly`, then applies it if valid. A no-op (empty
    /// result) otherwise.
    pub fn craft_entity(&mut self, assembly: &registry::Assembly, inventory: &mut Inventory) -> CraftResult {
        if self.validate_assembly(assembly, inventory) {
            self.craft(assembly, inventory)
        } else {
            CraftResult::default()
        }
    }

    fn craft(&mut self, assembly: &registry::Assembly, inventory: &mut Inventory) -> CraftResult {
        let mut result = CraftResult::default();

        let recipe = match registry::find_recipe_by_codename(&assembly.recipe_codename) {
            Some(recipe) => recipe,
            None => return result,
        };

        let free_hand = match inventory.get_free_hand(crate::inventory::Hand::Left) {
            Some(hand) => hand,
            None => return result,
        };

        let new_id = self.generate_entity_id();
        let new_entity = match registry::construct_entity(recipe.codename(), new_id, None) {
            Some(entity) => entity,
            None => return result,
        };

        for sources in &assembly.sources {
            for source in sources {
                let entry = match inventory.find_entity_with_entity_id(source.actor_id) {
                    Some(entry) => entry.clone(),
                    None => continue,
                };
                let Some(entity) = self.get_entity_mut(entry.id) else {
                    continue;
                };

                let fully_consumed = match &mut entity.features.stackable {
                    Some(stackable) if stackable.get_size() == source.quantity => true,
                    Some(stackable) => {
                        stackable.decrease(source.quantity);
                        false
                    }
                    None => true,
                };

                if fully_consumed {
                    inventory.remove_with_entity_id(entry.id);
                    result.add_for_deletion(entry.id);
                    self.delete_entity(entry.id);
                }
            }
        }

        if new_entity.features.inventorable.is_some() {
            inventory.store_entry(free_hand, Some(new_entity.as_info()));
        }

        result.add_for_creation(new_entity.as_actor());
        self.add_entity(new_entity);
        result
    }

    /// Merges a stackable item held in `hand` into the stack in the pocket
    /// at `pocket_index`, overflow remaining in `hand`. A no-op unless both
    /// slots hold stackable, inventorable items of like kind.
    pub fn merge_entities(&mut self, inventory: &mut Inventory, hand: crate::inventory::Hand, pocket_index: usize) {
        let Some(source_entry) = inventory.get_hand_entry(hand).cloned() else {
            return;
        };
        let Some(target_entry) = inventory.get_pocket_entry(pocket_index).cloned() else {
            return;
        };
        if source_entry.essence != target_entry.essence {
            return;
        }

        let Some(source_entity) = self.get_entity(source_entry.id) else {
            return;
        };
        let Some(target_entity) = self.get_entity(target_entry.id) else {
            return;
        };
        if source_entity.features.stackable.is_none() || target_entity.features.stackable.is_none() {
            return;
        }
        if source_entity.features.inventorable.is_none() || target_entity.features.inventorable.is_none() {
            return;
        }

        let item_volume = source_entity
            .features
            .inventorable
            .as_ref()
            .map_or(0, |f| f.volume());
        let max_target_quantity = target_entry.calc_max_quantity_for_item_volume(item_volume);

        let source_size = self
            .get_entity(source_entry.id)
            .and_then(|e| e.features.stackable.as_ref())
            .map_or(0, |s| s.get_size());
        let target_size = self
            .get_entity(target_entry.id)
            .and_then(|e| e.features.stackable.as_ref())
            .map_or(0, |s| s.get_size());

        let combined = source_size + target_size;
        let new_target_quantity = combined.min(max_target_quantity);
        let new_source_quantity = combined - new_target_quantity;

        if let Some(entity) = self.get_entity_mut(target_entry.id) {
            if let Some(stackable) = entity.features.stackable.as_mut() {
                stackable.set_size(new_target_quantity);
            }
        }
        let mut target_entry = target_entry;
        target_entry.set_quantity(new_target_quantity);
        inventory.set_pocket_entry(pocket_index, Some(target_entry));

        if new_source_quantity > 0 {
            if let Some(entity) = self.get_entity_mut(source_entry.id) {
                if let Some(stackable) = entity.features.stackable.as_mut() {
                    stackable.set_size(new_source_quantity);
                }
            }
            let mut source_entry = source_entry;
            source_entry.set_quantity(new_source_quantity);
            inventory.store_entry(hand, Some(source_entry));
        } else {
            self.delete_entity(source_entry.id);
            inventory.remove_with_entity_id(source_entry.id);
        }
    }
}

#[cfg(test)]
#[path = "state_tests.rs"]
mod tests;
