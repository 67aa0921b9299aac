use crate::catalog::DamageType;

/// Types of status effects.
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
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum StatusKind {
    // ========================================================================
    // Damage over time
    // ========================================================================
    /// Fire damage each turn.
    Burning,
    /// Poison damage each turn.
    Poisoned,
    /// Physical damage each turn.
    Bleeding,

    // ========================================================================
    // Buffs
    // ========================================================================
    /// Heals each turn.
    Regenerating,
    /// Offensive buff; magnitude read by the turn loop.
    Strengthened,
    /// Defensive buff; magnitude read by the turn loop.
    Fortified,

    // ========================================================================
    // Debuffs
    // ========================================================================
    Chilled,
    Shocked,
    Weakened,
    Vulnerable,
    /// Skips the next action.
    Stunned,
}

/// How re-applying an active status combines magnitudes.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StackingPolicy {
    /// Magnitudes add up.
    Accumulate,
    /// The higher magnitude wins.
    Strongest,
}

/// What a status does at each tick besides counting down.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TurnEffect {
    None,
    /// Deals `magnitude` damage of the type, bypassing resistances and guard.
    Damage(DamageType),
    /// Heals `magnitude`.
    Heal,
}

impl StatusKind {
    pub fn is_debuff(self) -> bool {
        use StatusKind::*;
        matches!(
            self,
            Burning | Poisoned | Bleeding | Chilled | Shocked | Weakened | Vulnerable | Stunned
        )
    }

    pub fn stacking(self) -> StackingPolicy {
        use StatusKind::*;
        match self {
            Burning | Poisoned | Bleeding | Regenerating | Strengthened => {
                StackingPolicy::Accumulate
            }
            Fortified | Chilled | Shocked | Weakened | Vulnerable | Stunned => {
                StackingPolicy::Strongest
            }
        }
    }

    pub fn turn_effect(self) -> TurnEffect {
        match self {
            StatusKind::Burning => TurnEffect::Damage(DamageType::Fire),
            StatusKind::Poisoned => TurnEffect::Damage(DamageType::Poison),
            StatusKind::Bleeding => TurnEffect::Damage(DamageType::Physical),
            StatusKind::Regenerating => TurnEffect::Heal,
            _ => TurnEffect::None,
        }
    }
}
