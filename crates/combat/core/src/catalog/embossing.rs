//! Embossing definitions - modifiers attached to cards.
//!
//! Every embossing carries exactly one [`EmbossingKind`]. The kinds form a
//! closed set, and the damage resolver matches on them directly to decide
//! which pass of the pipeline each one feeds.

use super::ability::StackKind;
use super::card::Requirements;
use super::ids::EmbossingId;
use super::types::DamageType;
use crate::status::StatusKind;

/// Authoring category of an embossing. Informational for the resolver.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display, strum::EnumString)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum EmbossingCategory {
    Damage,
    Scaling,
    Utility,
    Defensive,
    Combo,
    Ailment,
    Conversion,
}

#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, strum::Display, strum::EnumString,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum Rarity {
    #[default]
    Common,
    Uncommon,
    Rare,
    Epic,
    Legendary,
}

/// What an embossing does. `value` and `secondary` refer to the fields of
/// the owning [`EmbossingDefinition`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum EmbossingKind {
    // ========================================================================
    // Flat (added to the running total)
    // ========================================================================
    /// `+value` damage.
    FlatDamage,
    /// `+value` guard.
    FlatGuard,

    // ========================================================================
    // Increased (summed, applied once)
    // ========================================================================
    /// `+value` increased damage.
    IncreasedDamage,
    /// `+value` increased guard.
    IncreasedGuard,
    /// `+value` increased damage, only on area-of-effect cards.
    IncreasedAreaDamage,
    /// `floor(strength / breakpoint) × value` increased damage and guard.
    StrengthScaling,
    /// `floor(dexterity / breakpoint) × value` increased damage and guard.
    DexterityScaling,
    /// `floor(intelligence / breakpoint) × value` increased damage and guard.
    IntelligenceScaling,
    /// `combo_count × value` increased damage and guard.
    ComboScaling,
    /// `+value` increased damage while the caster's HP fraction is at or
    /// below `secondary` (config default otherwise).
    Desperation,

    // ========================================================================
    // More (applied one by one, in attachment order)
    // ========================================================================
    /// `× (1 + value)`.
    MoreDamage,
    /// `× (1 - value)`.
    LessDamage,
    /// With chance `value`, `× secondary` (config default otherwise).
    CriticalStrike,
    /// `× (1 + value)` against a defender at or below `secondary` HP fraction.
    Execute,
    /// `× (1 + value)` while the caster is at full HP.
    FullHealth,

    // ========================================================================
    // Conversion (typed buckets, in attachment order)
    // ========================================================================
    /// Move `value` of the `from` bucket into `to`.
    Conversion { from: DamageType, to: DamageType },
    /// Add `value` of the `from` bucket to `to` without removing it.
    ExtraAs { from: DamageType, to: DamageType },

    // ========================================================================
    // Fan-out
    // ========================================================================
    /// `+value` targets on area-of-effect cards.
    ExtraTargets,
    /// With chance `value`, the hit is repeated once.
    Duplicate,

    // ========================================================================
    // Mitigation
    // ========================================================================
    /// Reduces the defender's resistance to the given type by `value`.
    Penetration(DamageType),

    // ========================================================================
    // Post-resolution hooks (read the final total)
    // ========================================================================
    /// Heal `value × final total`.
    Leech,
    /// Heal `value` per hit.
    LifeOnHit,
    /// Restore `value` energy per hit.
    ManaOnHit,
    /// Gain `value + secondary × final total` guard.
    GuardOnPlay,
    /// Per hit, with chance `value`, inflict `status` with magnitude
    /// `secondary` (config default otherwise) for `duration` turns.
    Ailment { status: StatusKind, duration: u32 },

    // ========================================================================
    // Play outcomes
    // ========================================================================
    /// Adjust a caster stack counter by `value` flat and `secondary` increased.
    StackAdjustment(StackKind),
    /// Remove the given status from the caster.
    CleanseOnPlay(StatusKind),
    /// Restore `value` energy once.
    EnergyOnPlay,
}

impl EmbossingKind {
    /// Whether applying this kind consumes a random draw.
    pub fn rolls(&self) -> bool {
        matches!(
            self,
            EmbossingKind::CriticalStrike | EmbossingKind::Duplicate | EmbossingKind::Ailment { .. }
        )
    }
}

/// Static embossing definition.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EmbossingDefinition {
    pub id: EmbossingId,
    pub name: String,
    pub category: EmbossingCategory,
    #[cfg_attr(feature = "serde", serde(default))]
    pub rarity: Rarity,
    /// Additive fraction applied to the host card's mana cost.
    #[cfg_attr(feature = "serde", serde(default))]
    pub mana_cost_multiplier: f64,
    #[cfg_attr(feature = "serde", serde(default))]
    pub requirements: Requirements,
    pub kind: EmbossingKind,
    pub value: f64,
    #[cfg_attr(feature = "serde", serde(default))]
    pub secondary: Option<f64>,
}

impl EmbossingDefinition {
    pub fn new(
        id: impl Into<EmbossingId>,
        category: EmbossingCategory,
        kind: EmbossingKind,
        value: f64,
    ) -> Self {
        let id = id.into();
        Self {
            name: id.as_str().to_string(),
            id,
            category,
            rarity: Rarity::Common,
            mana_cost_multiplier: 0.0,
            requirements: Requirements::NONE,
            kind,
            value,
            secondary: None,
        }
    }

    pub fn with_secondary(mut self, secondary: f64) -> Self {
        self.secondary = Some(secondary);
        self
    }

    pub fn with_cost_multiplier(mut self, multiplier: f64) -> Self {
        self.mana_cost_multiplier = multiplier;
        self
    }

    pub fn with_requirements(mut self, requirements: Requirements) -> Self {
        self.requirements = requirements;
        self
    }

    pub fn with_rarity(mut self, rarity: Rarity) -> Self {
        self.rarity = rarity;
        self
    }

    /// `secondary`, or `default` when the definition leaves it unset.
    pub fn secondary_or(&self, default: f64) -> f64 {
        self.secondary.unwrap_or(default)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_chance_kinds_roll() {
        assert!(EmbossingKind::CriticalStrike.rolls());
        assert!(EmbossingKind::Duplicate.rolls());
        assert!(!EmbossingKind::MoreDamage.rolls());
        assert!(!EmbossingKind::Leech.rolls());
    }

    #[test]
    fn secondary_falls_back_to_default() {
        let crit = EmbossingDefinition::new(
            "keen_edge",
            EmbossingCategory::Damage,
            EmbossingKind::CriticalStrike,
            0.2,
        );
        assert_eq!(crit.secondary_or(1.5), 1.5);
        assert_eq!(crit.with_secondary(2.0).secondary_or(1.5), 2.0);
    }
}
