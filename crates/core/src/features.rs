// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Orthogonal capability bundles carried by entities. Each slot is optional
//! and set only once, at construction, by the entity's own constructor.
//!
//! `delivery_claims` is append-ordered (the order `set_*` is called defines
//! interaction priority); `absorption_claims` is an unordered set, since
//! only membership — not priority — matters for what an entity can absorb.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Claim {
    Pain,
    Food,
    Cargo,
    Harvest,
}

#[derive(Debug, Clone, Copy)]
pub struct PerformerFeature;

#[derive(Debug, Clone)]
pub struct StatefulFeature {
    state_name: String,
}

impl StatefulFeature {
    pub fn new(state_name: impl Into<String>) -> Self {
        Self {
            state_name: state_name.into(),
        }
    }

    pub fn state_name(&self) -> &str {
        &self.state_name
    }

    pub fn set_state_name(&mut self, state_name: impl Into<String>) {
        self.state_name = state_name.into();
    }
}

#[derive(Debug, Clone, Copy)]
pub struct StackableFeature {
    stack_size: i64,
}

impl StackableFeature {
    pub fn new(stack_size: i64) -> Self {
        Self { stack_size }
    }

    pub fn get_size(&self) -> i64 {
        self.stack_size
    }

    pub fn increase(&mut self, amount: i64) {
        self.stack_size += amount;
    }

    pub fn decrease(&mut self, amount: i64) {
        self.stack_size -= amount;
    }

    pub fn set_size(&mut self, amount: i64) {
        self.stack_size = amount;
    }
}

#[derive(Debug, Clone)]
pub struct InventorableFeature {
    volume: i64,
    stored_by: Option<crate::id::EntityId>,
}

impl InventorableFeature {
    pub fn new(volume: i64) -> Self {
        Self {
            volume,
            stored_by: None,
        }
    }

    pub fn volume(&self) -> i64 {
        self.volume
    }

    pub fn stored_by(&self) -> Option<crate::id::EntityId> {
        self.stored_by
    }

    pub fn set_stored_by(&mut self, id: crate::id::EntityId) {
        self.stored_by = Some(id);
    }

    pub fn clear_stored_by(&mut self) {
        self.stored_by = None;
    }
}

#[derive(Debug, Default, Clone)]
pub struct InventoryFeature {
    inventory: crate::inventory::Inventory,
}

impl InventoryFeature {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self) -> &crate::inventory::Inventory {
        &self.inventory
    }

    pub fn get_mut(&mut self) -> &mut crate::inventory::Inventory {
        &mut self.inventory
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DamageVariant {
    Hit,
    Chop,
    Smash,
    Attack,
}

#[derive(Debug, Clone, Copy)]
pub struct ToolOrWeaponFeature {
    hit_damage: f64,
    chop_damage: f64,
    smash_damage: f64,
    attack_damage: f64,
}

impl ToolOrWeaponFeature {
    pub fn new(hit_damage: f64, chop_damage: f64, smash_damage: f64, attack_damage: f64) -> Self {
        Self {
            hit_damage,
            chop_damage,
            smash_damage,
            attack_damage,
        }
    }

    pub fn get_damage(&self, variant: DamageVariant) -> f64 {
        match variant {
            DamageVariant::Hit => self.hit_damage,
            DamageVariant::Chop => self.chop_damage,
            DamageVariant::Smash => self.smash_damage,
            DamageVariant::Attack => self.attack_damage,
        }
    }
}

#[derive(Debug, Clone, Copy)]
pub struct DamageableFeature {
    health: f64,
    max_health: f64,
    damage_variant: DamageVariant,
}

impl DamageableFeature {
    pub fn new(start_health: f64, max_health: f64, damage_variant: DamageVariant) -> Self {
        Self {
            health: start_health,
            max_health,
            damage_variant,
        }
    }

    pub fn health(&self) -> f64 {
        self.health
    }

    pub fn max_health(&self) -> f64 {
        self.max_health
    }

    pub fn damage_variant(&self) -> DamageVariant {
        self.damage_variant
    }

    /// Applies damage, clamping health to `[0, max_health]`. Returns
    /// whether the entity is still alive.
    pub fn handle_damage(&mut self, damage_amount: f64) -> bool {
        self.health = (self.health - damage_amount).clamp(0.0, self.max_health);
        self.health != 0.0
    }
}

#[derive(Debug, Clone, Copy)]
pub struct Nutrients {
    pub hunger: i64,
}

impl std::ops::Mul<i64> for Nutrients {
    type Output = Nutrients;

    fn mul(self, rhs: i64) -> Nutrients {
        Nutrients {
            hunger: self.hunger * rhs,
        }
    }
}

#[derive(Debug, Clone, Copy)]
pub struct EdibleFeature {
    nutrients: Nutrients,
}

impl EdibleFeature {
    pub fn new(nutrients: Nutrients) -> Self {
        Self { nutrients }
    }

    pub fn nutrients(&self) -> Nutrients {
        self.nutrients
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Stats {
    pub hunger: f64,
    pub max_hunger: f64,
}

#[derive(Debug, Clone, Copy)]
pub struct EaterFeature {
    max_capacity: f64,
    hunger_value: f64,
}

impl EaterFeature {
    pub fn new(max_capacity: f64, hunger_value: f64) -> Self {
        Self {
            max_capacity,
            hunger_value,
        }
    }

    pub fn deduce(&mut self, value: f64) {
        self.hunger_value = (self.hunger_value - value).max(0.0);
    }

    pub fn absorb(&mut self, nutrients: Nutrients) -> bool {
        self.hunger_value += nutrients.hunger as f64;
        true
    }

    pub fn hunger(&self) -> f64 {
        self.hunger_value
    }

    pub fn gather_stats(&self) -> Stats {
        Stats {
            hunger: self.hunger_value,
            max_hunger: self.max_capacity,
        }
    }
}

/// Grow/harvest math for a renewable resource (a berry bush, for instance).
/// `entity_constructor` is supplied by the owning entity's constructor and
/// builds the dropped entities for a harvested amount.
pub struct HarvestableFeature {
    current_amount: i64,
    min_amount: i64,
    max_amount: i64,
    grow_amount: i64,
    pick_amount: i64,
}

impl std::fmt::Debug for HarvestableFeature {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HarvestableFeature")
            .field("current_amount", &self.current_amount)
            .field("min_amount", &self.min_amount)
            .field("max_amount", &self.max_amount)
            .finish()
    }
}

impl Clone for HarvestableFeature {
    fn clone(&self) -> Self {
        Self {
            current_amount: self.current_amount,
            min_amount: self.min_amount,
            max_amount: self.max_amount,
            grow_amount: self.grow_amount,
            pick_amount: self.pick_amount,
        }
    }
}

impl HarvestableFeature {
    pub fn new(
        start_amount: i64,
        min_amount: i64,
        max_amount: i64,
        grow_amount: i64,
        pick_amount: i64,
    ) -> Self {
        Self {
            current_amount: start_amount,
            min_amount,
            max_amount,
            grow_amount,
            pick_amount,
        }
    }

    pub fn current_amount(&self) -> i64 {
        self.current_amount
    }

    /// Advances growth by `grow_amount`, clamped to `[min, max]`. Returns
    /// `(old_amount, new_amount)`.
    pub fn grow(&mut self) -> (i64, i64) {
        let old_amount = self.current_amount;
        let new_amount = (self.current_amount + self.grow_amount).clamp(self.min_amount, self.max_amount);
        self.current_amount = new_amount;
        (old_amount, new_amount)
    }

    /// Removes up to `pick_amount`, never going below `min_amount`. Returns
    /// the amount actually harvested.
    pub fn harvest(&mut self) -> i64 {
        let harvested = (self.current_amount - self.min_amount)
            .clamp(0, self.pick_amount)
            .max(0);
        self.current_amount = (self.current_amount - self.pick_amount).max(0);
        harvested
    }
}

/// Bundles all feature slots an entity may carry. Each slot is set exactly
/// once by the owning entity's constructor; everything else only reads.
#[derive(Debug, Default, Clone)]
pub struct Features {
    delivery_claims: Vec<Claim>,
    absorption_claims: HashSet<Claim>,

    pub stateful: Option<StatefulFeature>,
    pub performer: Option<PerformerFeature>,
    pub stackable: Option<StackableFeature>,

    pub tool_or_weapon: Option<ToolOrWeaponFeature>,
    pub damageable: Option<DamageableFeature>,

    pub edible: Option<EdibleFeature>,
    pub eater: Option<EaterFeature>,

    pub inventorable: Option<InventorableFeature>,
    pub inventory: Option<InventoryFeature>,
    pub harvestable: Option<HarvestableFeature>,
}

impl Features {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn delivery_claims(&self) -> &[Claim] {
        &self.delivery_claims
    }

    /// Whether this entity's delivery claims intersect `claims`.
    pub fn deliver(&self, claims: impl IntoIterator<Item = Claim>) -> bool {
        claims.into_iter().any(|c| self.delivery_claims.contains(&c))
    }

    /// Whether this entity's absorption claims intersect `claims`.
    pub fn absorb(&self, claims: impl IntoIterator<Item = Claim>) -> bool {
        claims.into_iter().any(|c| self.absorption_claims.contains(&c))
    }

    /// The first claim (by caller-supplied iteration order, i.e. priority)
    /// this entity can absorb.
    pub fn get_first_absorbed(&self, claims: impl IntoIterator<Item = Claim>) -> Option<Claim> {
        claims
            .into_iter()
            .find(|c| self.absorption_claims.contains(c))
    }

    pub fn set_performer(&mut self) {
        self.performer = Some(PerformerFeature);
    }

    pub fn set_tool_or_weapon(
        &mut self,
        hit_damage: f64,
        chop_damage: f64,
        smash_damage: f64,
        attack_damage: f64,
    ) {
        self.delivery_claims.push(Claim::Pain);
        self.tool_or_weapon = Some(ToolOrWeaponFeature::new(
            hit_damage,
            chop_damage,
            smash_damage,
            attack_damage,
        ));
    }

    pub fn set_damageable(&mut self, start_health: f64, max_health: f64, variant: DamageVariant) {
        self.absorption_claims.insert(Claim::Pain);
        self.damageable = Some(DamageableFeature::new(start_health, max_health, variant));
    }

    pub fn set_edible(&mut self, nutrients: Nutrients) {
        self.delivery_claims.push(Claim::Food);
        self.edible = Some(EdibleFeature::new(nutrients));
    }

    pub fn set_eater(&mut self, max_capacity: f64, hunger_value: f64) {
        self.absorption_claims.insert(Claim::Food);
        self.eater = Some(EaterFeature::new(max_capacity, hunger_value));
    }

    pub fn set_inventorable(&mut self, volume: i64) {
        self.delivery_claims.push(Claim::Cargo);
        self.inventorable = Some(InventorableFeature::new(volume));
    }

    pub fn set_inventory(&mut self) {
        self.absorption_claims.insert(Claim::Cargo);
        self.inventory = Some(InventoryFeature::new());
    }

    pub fn set_harvestable(
        &mut self,
        start_amount: i64,
        min_amount: i64,
        max_amount: i64,
        grow_amount: i64,
        pick_amount: i64,
    ) {
        self.absorption_claims.insert(Claim::Harvest);
        self.harvestable = Some(HarvestableFeature::new(
            start_amount,
            min_amount,
            max_amount,
            grow_amount,
            pick_amount,
        ));
    }

    pub fn set_stackable(&mut self, amount: i64) {
        self.stackable = Some(StackableFeature::new(amount));
    }

    pub fn set_stateful(&mut self, state_name: impl Into<String>) {
        self.stateful = Some(StatefulFeature::new(state_name));
    }

    /// Quantity to report for wire purposes: stack size if stackable, else 1.
    pub fn get_quantity(&self) -> i64 {
        self.stackable.as_ref().map_or(1, |s| s.get_size())
    }
}

#[cfg(test)]
#[path = "features_tests.rs"]
mod tests;
