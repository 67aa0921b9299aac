//! Combatant templates - the static side of a player or enemy.

use super::stats::{Attributes, EquippedWeapon, Resistances, StatSnapshot};
use crate::catalog::AbilityId;

/// Authored combatant: stats at full health plus the abilities it carries.
///
/// Templates are turned into a live [`CombatantState`](crate::state::CombatantState)
/// with `CombatantState::from_template`.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CombatantTemplate {
    pub id: String,
    #[cfg_attr(feature = "serde", serde(default))]
    pub name: String,
    pub max_hp: u32,
    #[cfg_attr(feature = "serde", serde(default))]
    pub max_energy: u32,
    #[cfg_attr(feature = "serde", serde(default))]
    pub attributes: Attributes,
    #[cfg_attr(feature = "serde", serde(default))]
    pub weapon: Option<EquippedWeapon>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub resistances: Resistances,
    #[cfg_attr(feature = "serde", serde(default))]
    pub abilities: Vec<AbilityId>,
}

impl CombatantTemplate {
    pub fn new(id: impl Into<String>, max_hp: u32, max_energy: u32) -> Self {
        let id = id.into();
        Self {
            name: id.clone(),
            id,
            max_hp,
            max_energy,
            attributes: Attributes::default(),
            weapon: None,
            resistances: Resistances::default(),
            abilities: Vec::new(),
        }
    }

    pub fn with_attributes(mut self, attributes: Attributes) -> Self {
        self.attributes = attributes;
        self
    }

    pub fn with_resistances(mut self, resistances: Resistances) -> Self {
        self.resistances = resistances;
        self
    }

    pub fn with_ability(mut self, ability: impl Into<AbilityId>) -> Self {
        self.abilities.push(ability.into());
        self
    }

    /// Stats at full HP and full energy.
    pub fn snapshot(&self) -> StatSnapshot {
        StatSnapshot {
            attributes: self.attributes,
            weapon: self.weapon,
            resistances: self.resistances,
            energy: self.max_energy,
            max_hp: self.max_hp,
            current_hp: self.max_hp,
        }
    }
}
