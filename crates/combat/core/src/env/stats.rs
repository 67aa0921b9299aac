//! Stat provider - read-only combatant attributes at resolution time.
//!
//! The character/enemy systems own how attributes, equipment and resistances
//! come about; the combat core only reads them through [`StatProvider`].
//! [`StatSnapshot`] is a plain-value implementation that callers build once
//! per resolution, locking the values the resolver sees.

use std::collections::BTreeMap;

use strum::{EnumCount, IntoEnumIterator};

use crate::catalog::{AttributeKind, DamageType, WeaponClass, WeaponType};

/// Read-only view of a combatant's stats.
pub trait StatProvider {
    fn attribute(&self, kind: AttributeKind) -> u32;

    /// Weapon damage added by cards scaling with `class`. Zero when the
    /// equipped weapon is of another class or nothing is equipped.
    fn weapon_scaling(&self, class: WeaponClass) -> f64;

    /// Resistance fraction. Negative values amplify damage.
    fn resistance(&self, damage_type: DamageType) -> f64;

    /// Current mana/energy available for paying card costs.
    fn energy(&self) -> u32;

    fn max_hp(&self) -> u32;

    fn current_hp(&self) -> u32;

    fn equipped_weapon(&self) -> Option<WeaponType>;

    /// Current HP as a fraction of maximum. A zero maximum reads as empty.
    fn hp_fraction(&self) -> f64 {
        let max = self.max_hp();
        if max == 0 {
            return 0.0;
        }
        f64::from(self.current_hp()) / f64::from(max)
    }
}

/// Attribute block.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct Attributes {
    pub strength: u32,
    pub dexterity: u32,
    pub intelligence: u32,
    pub level: u32,
}

impl Attributes {
    pub fn new(strength: u32, dexterity: u32, intelligence: u32, level: u32) -> Self {
        Self {
            strength,
            dexterity,
            intelligence,
            level,
        }
    }

    pub fn get(&self, kind: AttributeKind) -> u32 {
        match kind {
            AttributeKind::Strength => self.strength,
            AttributeKind::Dexterity => self.dexterity,
            AttributeKind::Intelligence => self.intelligence,
            AttributeKind::Level => self.level,
        }
    }
}

/// An equipped weapon and the damage it contributes to scaling cards.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EquippedWeapon {
    pub weapon_type: WeaponType,
    pub damage: f64,
}

/// Resistance per damage type.
///
/// Serialized as a map from damage type to fraction; absent types read 0.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(
    feature = "serde",
    serde(
        from = "BTreeMap<DamageType, f64>",
        into = "BTreeMap<DamageType, f64>"
    )
)]
pub struct Resistances([f64; DamageType::COUNT]);

impl Resistances {
    pub fn get(&self, damage_type: DamageType) -> f64 {
        self.0[damage_type.index()]
    }

    pub fn set(&mut self, damage_type: DamageType, value: f64) {
        self.0[damage_type.index()] = value;
    }

    pub fn with(mut self, damage_type: DamageType, value: f64) -> Self {
        self.set(damage_type, value);
        self
    }
}

impl From<BTreeMap<DamageType, f64>> for Resistances {
    fn from(map: BTreeMap<DamageType, f64>) -> Self {
        map.into_iter()
            .fold(Self::default(), |acc, (damage_type, value)| acc.with(damage_type, value))
    }
}

impl From<Resistances> for BTreeMap<DamageType, f64> {
    fn from(resistances: Resistances) -> Self {
        DamageType::iter()
            .filter(|t| resistances.get(*t) != 0.0)
            .map(|t| (t, resistances.get(t)))
            .collect()
    }
}

/// Complete stat snapshot at a point in time.
///
/// Current HP is clamped to the maximum on build, so a snapshot never reports
/// more HP than the combatant can hold.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct StatSnapshot {
    pub attributes: Attributes,
    pub weapon: Option<EquippedWeapon>,
    pub resistances: Resistances,
    pub energy: u32,
    pub max_hp: u32,
    pub current_hp: u32,
}

impl StatSnapshot {
    pub fn builder() -> StatSnapshotBuilder {
        StatSnapshotBuilder::new()
    }
}

impl StatProvider for StatSnapshot {
    fn attribute(&self, kind: AttributeKind) -> u32 {
        self.attributes.get(kind)
    }

    fn weapon_scaling(&self, class: WeaponClass) -> f64 {
        match self.weapon {
            Some(weapon) if weapon.weapon_type.class() == class => weapon.damage.max(0.0),
            _ => 0.0,
        }
    }

    fn resistance(&self, damage_type: DamageType) -> f64 {
        self.resistances.get(damage_type)
    }

    fn energy(&self) -> u32 {
        self.energy
    }

    fn max_hp(&self) -> u32 {
        self.max_hp
    }

    fn current_hp(&self) -> u32 {
        self.current_hp
    }

    fn equipped_weapon(&self) -> Option<WeaponType> {
        self.weapon.map(|w| w.weapon_type)
    }
}

/// Builder for constructing stat snapshots with a fluent API.
#[derive(Clone, Debug, Default)]
pub struct StatSnapshotBuilder {
    snapshot: StatSnapshot,
    hp_set: bool,
}

impl StatSnapshotBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn attributes(mut self, attributes: Attributes) -> Self {
        self.snapshot.attributes = attributes;
        self
    }

    pub fn strength(mut self, value: u32) -> Self {
        self.snapshot.attributes.strength = value;
        self
    }

    pub fn dexterity(mut self, value: u32) -> Self {
        self.snapshot.attributes.dexterity = value;
        self
    }

    pub fn intelligence(mut self, value: u32) -> Self {
        self.snapshot.attributes.intelligence = value;
        self
    }

    pub fn level(mut self, value: u32) -> Self {
        self.snapshot.attributes.level = value;
        self
    }

    pub fn weapon(mut self, weapon_type: WeaponType, damage: f64) -> Self {
        self.snapshot.weapon = Some(EquippedWeapon {
            weapon_type,
            damage,
        });
        self
    }

    pub fn resistance(mut self, damage_type: DamageType, value: f64) -> Self {
        self.snapshot.resistances.set(damage_type, value);
        self
    }

    pub fn energy(mut self, energy: u32) -> Self {
        self.snapshot.energy = energy;
        self
    }

    /// Sets maximum HP and, unless `hp` was called, current HP to match.
    pub fn max_hp(mut self, max_hp: u32) -> Self {
        self.snapshot.max_hp = max_hp;
        self
    }

    pub fn hp(mut self, current: u32) -> Self {
        self.snapshot.current_hp = current;
        self.hp_set = true;
        self
    }

    pub fn build(self) -> StatSnapshot {
        let mut snapshot = self.snapshot;
        if self.hp_set {
            snapshot.current_hp = snapshot.current_hp.min(snapshot.max_hp);
        } else {
            snapshot.current_hp = snapshot.max_hp;
        }
        snapshot
    }
}
