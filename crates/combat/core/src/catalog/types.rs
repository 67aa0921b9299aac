//! Enumerations shared by card, embossing and ability definitions.

use bitflags::bitflags;

// ============================================================================
// Damage Type
// ============================================================================

/// Damage type for resistances, conversion and typed damage buckets.
#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    strum::Display,
    strum::EnumString,
    strum::AsRefStr,
    strum::EnumIter,
    strum::EnumCount,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum DamageType {
    Physical,
    Fire,
    Cold,
    Lightning,
    Poison,
    Arcane,
}

impl DamageType {
    /// Dense index used by typed buckets.
    pub const fn index(self) -> usize {
        self as usize
    }
}

// ============================================================================
// Attributes
// ============================================================================

/// Caster attributes read through the stat provider.
///
/// `Level` is not scaled on, but it is gated on like the three core
/// attributes, so it shares the same lookup.
#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    Hash,
    strum::Display,
    strum::EnumString,
    strum::AsRefStr,
    strum::EnumIter,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum AttributeKind {
    Strength,
    Dexterity,
    Intelligence,
    Level,
}

/// Per-attribute scaling coefficients (`damage += attribute × coefficient`).
#[derive(Clone, Copy, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct AttributeScaling {
    pub strength: f64,
    pub dexterity: f64,
    pub intelligence: f64,
}

impl AttributeScaling {
    pub const NONE: Self = Self {
        strength: 0.0,
        dexterity: 0.0,
        intelligence: 0.0,
    };

    pub fn strength(coefficient: f64) -> Self {
        Self {
            strength: coefficient,
            ..Self::NONE
        }
    }

    pub fn dexterity(coefficient: f64) -> Self {
        Self {
            dexterity: coefficient,
            ..Self::NONE
        }
    }

    pub fn intelligence(coefficient: f64) -> Self {
        Self {
            intelligence: coefficient,
            ..Self::NONE
        }
    }

    /// Pairs of (attribute, coefficient) in a fixed order.
    pub fn pairs(&self) -> [(AttributeKind, f64); 3] {
        [
            (AttributeKind::Strength, self.strength),
            (AttributeKind::Dexterity, self.dexterity),
            (AttributeKind::Intelligence, self.intelligence),
        ]
    }

    pub fn is_empty(&self) -> bool {
        self.pairs().iter().all(|(_, c)| *c == 0.0)
    }
}

// ============================================================================
// Weapons
// ============================================================================

/// Broad weapon class a card may scale with.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display, strum::EnumIter, strum::AsRefStr,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case")]
pub enum WeaponClass {
    Melee,
    Projectile,
    Spell,
}

bitflags! {
    /// Weapon classes a card adds the caster's weapon damage for.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
    #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
    #[cfg_attr(feature = "serde", serde(transparent))]
    pub struct WeaponScaling: u8 {
        const MELEE      = 1 << 0;
        const PROJECTILE = 1 << 1;
        const SPELL      = 1 << 2;
    }
}

impl WeaponScaling {
    /// Iterates the weapon classes contained in this set.
    pub fn classes(self) -> impl Iterator<Item = WeaponClass> {
        [
            (WeaponScaling::MELEE, WeaponClass::Melee),
            (WeaponScaling::PROJECTILE, WeaponClass::Projectile),
            (WeaponScaling::SPELL, WeaponClass::Spell),
        ]
        .into_iter()
        .filter(move |(flag, _)| self.contains(*flag))
        .map(|(_, class)| class)
    }
}

/// Concrete equipped weapon type.
#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    Hash,
    strum::Display,
    strum::EnumString,
    strum::AsRefStr,
    strum::EnumIter,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum WeaponType {
    Sword,
    Axe,
    Mace,
    Dagger,
    Spear,
    Bow,
    Crossbow,
    Staff,
    Wand,
    Tome,
}

impl WeaponType {
    pub fn class(self) -> WeaponClass {
        match self {
            WeaponType::Sword
            | WeaponType::Axe
            | WeaponType::Mace
            | WeaponType::Dagger
            | WeaponType::Spear => WeaponClass::Melee,
            WeaponType::Bow | WeaponType::Crossbow => WeaponClass::Projectile,
            WeaponType::Staff | WeaponType::Wand | WeaponType::Tome => WeaponClass::Spell,
        }
    }
}

bitflags! {
    /// Set of weapon types a card may be played with.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
    #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
    #[cfg_attr(feature = "serde", serde(transparent))]
    pub struct WeaponTypes: u16 {
        const SWORD    = 1 << 0;
        const AXE      = 1 << 1;
        const MACE     = 1 << 2;
        const DAGGER   = 1 << 3;
        const SPEAR    = 1 << 4;
        const BOW      = 1 << 5;
        const CROSSBOW = 1 << 6;
        const STAFF    = 1 << 7;
        const WAND     = 1 << 8;
        const TOME     = 1 << 9;
    }
}

impl From<WeaponType> for WeaponTypes {
    fn from(weapon: WeaponType) -> Self {
        match weapon {
            WeaponType::Sword => WeaponTypes::SWORD,
            WeaponType::Axe => WeaponTypes::AXE,
            WeaponType::Mace => WeaponTypes::MACE,
            WeaponType::Dagger => WeaponTypes::DAGGER,
            WeaponType::Spear => WeaponTypes::SPEAR,
            WeaponType::Bow => WeaponTypes::BOW,
            WeaponType::Crossbow => WeaponTypes::CROSSBOW,
            WeaponType::Staff => WeaponTypes::STAFF,
            WeaponType::Wand => WeaponTypes::WAND,
            WeaponType::Tome => WeaponTypes::TOME,
        }
    }
}

impl WeaponTypes {
    /// Whether `weapon` is in this set. Being unarmed never matches.
    pub fn allows(self, weapon: Option<WeaponType>) -> bool {
        weapon.is_some_and(|w| self.contains(WeaponTypes::from(w)))
    }
}
