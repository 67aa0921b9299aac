//! Card definitions - static card data.
//!
//! `CardDefinition` holds the immutable properties of a card: its base
//! numbers, how it scales, what it requires, and what it does besides dealing
//! damage. Attached embossings live on [`CardInstance`](super::CardInstance).

use super::ability::{CounterDelta, StackKind};
use super::ids::CardId;
use super::types::{
    AttributeKind, AttributeScaling, DamageType, WeaponScaling, WeaponType, WeaponTypes,
};
use crate::status::StatusKind;

/// Minimum caster attributes and allowed weapons for playing a card.
///
/// Embossings carry the same shape; the strictest threshold wins.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct Requirements {
    pub strength: u32,
    pub dexterity: u32,
    pub intelligence: u32,
    pub level: u32,
    /// Weapon types the card can be played with. `None` means any weapon,
    /// `Some` of an empty set means none at all.
    pub weapons: Option<WeaponTypes>,
}

impl Requirements {
    pub const NONE: Self = Self {
        strength: 0,
        dexterity: 0,
        intelligence: 0,
        level: 0,
        weapons: None,
    };

    pub fn threshold(&self, attribute: AttributeKind) -> u32 {
        match attribute {
            AttributeKind::Strength => self.strength,
            AttributeKind::Dexterity => self.dexterity,
            AttributeKind::Intelligence => self.intelligence,
            AttributeKind::Level => self.level,
        }
    }

    /// Whether `weapon` satisfies the weapon restriction, if any.
    pub fn allows_weapon(&self, weapon: Option<WeaponType>) -> bool {
        self.weapons.is_none_or(|allowed| allowed.allows(weapon))
    }

    /// Combines two requirement sets, keeping the higher threshold of each
    /// attribute. Weapon restrictions intersect, and disjoint restrictions
    /// leave no playable weapon.
    pub fn strictest(&self, other: &Requirements) -> Requirements {
        let weapons = match (self.weapons, other.weapons) {
            (None, weapons) | (weapons, None) => weapons,
            (Some(a), Some(b)) => Some(a & b),
        };
        Requirements {
            strength: self.strength.max(other.strength),
            dexterity: self.dexterity.max(other.dexterity),
            intelligence: self.intelligence.max(other.intelligence),
            level: self.level.max(other.level),
            weapons,
        }
    }
}

/// Who an intrinsic card effect lands on.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum EffectTarget {
    Caster,
    Defender,
}

/// Effects a card applies on play, in declaration order, besides its
/// resolved damage and guard.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum CardEffect {
    ApplyStatus {
        status: StatusKind,
        magnitude: u32,
        duration: u32,
        target: EffectTarget,
    },
    Cleanse {
        status: StatusKind,
        target: EffectTarget,
    },
    AdjustStack {
        counter: StackKind,
        delta: CounterDelta,
    },
    RestoreEnergy(u32),
}

/// Combo metadata. A card continues a combo when its `group` matches the
/// `partner` of the card played just before it in the same turn.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct ComboInfo {
    pub group: Option<String>,
    pub partner: Option<String>,
    pub bonus: Option<String>,
}

/// Static card definition.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CardDefinition {
    pub id: CardId,
    pub name: String,

    pub base_damage: u32,
    #[cfg_attr(feature = "serde", serde(default))]
    pub base_guard: u32,
    pub mana_cost: u32,

    pub damage_type: DamageType,
    /// Extra damage types; the scaled total is split evenly across the
    /// primary and these before conversion.
    #[cfg_attr(feature = "serde", serde(default))]
    pub extra_damage_types: Vec<DamageType>,

    #[cfg_attr(feature = "serde", serde(default))]
    pub damage_scaling: AttributeScaling,
    #[cfg_attr(feature = "serde", serde(default))]
    pub guard_scaling: AttributeScaling,
    #[cfg_attr(feature = "serde", serde(default))]
    pub weapon_scaling: WeaponScaling,

    #[cfg_attr(feature = "serde", serde(default))]
    pub area_of_effect: bool,
    #[cfg_attr(feature = "serde", serde(default = "default_aoe_targets"))]
    pub aoe_targets: u8,

    #[cfg_attr(feature = "serde", serde(default))]
    pub requirements: Requirements,
    #[cfg_attr(feature = "serde", serde(default))]
    pub embossing_slots: u8,

    #[cfg_attr(feature = "serde", serde(default))]
    pub effects: Vec<CardEffect>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub combo: ComboInfo,
}

#[cfg(feature = "serde")]
fn default_aoe_targets() -> u8 {
    1
}

impl CardDefinition {
    /// Create an attack card with the given base damage and cost.
    pub fn attack(
        id: impl Into<CardId>,
        name: impl Into<String>,
        base_damage: u32,
        mana_cost: u32,
        damage_type: DamageType,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            base_damage,
            base_guard: 0,
            mana_cost,
            damage_type,
            extra_damage_types: Vec::new(),
            damage_scaling: AttributeScaling::NONE,
            guard_scaling: AttributeScaling::NONE,
            weapon_scaling: WeaponScaling::empty(),
            area_of_effect: false,
            aoe_targets: 1,
            requirements: Requirements::NONE,
            embossing_slots: 0,
            effects: Vec::new(),
            combo: ComboInfo::default(),
        }
    }

    /// Create a guard card with the given base guard and cost.
    pub fn guard(
        id: impl Into<CardId>,
        name: impl Into<String>,
        base_guard: u32,
        mana_cost: u32,
    ) -> Self {
        Self {
            base_guard,
            ..Self::attack(id, name, 0, mana_cost, DamageType::Physical)
        }
    }

    pub fn with_damage_scaling(mut self, scaling: AttributeScaling) -> Self {
        self.damage_scaling = scaling;
        self
    }

    pub fn with_guard_scaling(mut self, scaling: AttributeScaling) -> Self {
        self.guard_scaling = scaling;
        self
    }

    pub fn with_weapon_scaling(mut self, scaling: WeaponScaling) -> Self {
        self.weapon_scaling = scaling;
        self
    }

    pub fn with_extra_damage_type(mut self, damage_type: DamageType) -> Self {
        self.extra_damage_types.push(damage_type);
        self
    }

    pub fn with_area(mut self, targets: u8) -> Self {
        self.area_of_effect = true;
        self.aoe_targets = targets.max(1);
        self
    }

    pub fn with_requirements(mut self, requirements: Requirements) -> Self {
        self.requirements = requirements;
        self
    }

    pub fn with_slots(mut self, slots: u8) -> Self {
        self.embossing_slots = slots;
        self
    }

    pub fn with_effect(mut self, effect: CardEffect) -> Self {
        self.effects.push(effect);
        self
    }

    pub fn with_combo(mut self, group: impl Into<String>, partner: impl Into<String>) -> Self {
        self.combo.group = Some(group.into());
        self.combo.partner = Some(partner.into());
        self
    }

    /// Whether this card deals damage (as opposed to only granting guard).
    pub fn deals_damage(&self) -> bool {
        self.base_damage > 0 || !self.damage_scaling.is_empty() || !self.weapon_scaling.is_empty()
    }

    /// Whether this card produces guard.
    pub fn grants_guard(&self) -> bool {
        self.base_guard > 0 || !self.guard_scaling.is_empty()
    }

    /// Damage types the scaled total is split across, primary first.
    pub fn damage_types(&self) -> impl Iterator<Item = DamageType> + '_ {
        core::iter::once(self.damage_type).chain(self.extra_damage_types.iter().copied())
    }

    /// Whether playing `self` right after `previous` continues a combo.
    pub fn continues_combo_from(&self, previous: &CardDefinition) -> bool {
        match (&self.combo.group, &previous.combo.partner) {
            (Some(group), Some(partner)) => group == partner,
            _ => false,
        }
    }
}
