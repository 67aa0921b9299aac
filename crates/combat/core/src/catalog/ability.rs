//! Ability definitions for combatants.
//!
//! Abilities fire on combat events rather than being played. Each definition
//! pairs a trigger with cooldown/energy gating and an ordered effect list;
//! the per-combatant runtime state lives in [`AbilitySlot`](crate::state::AbilitySlot).

use super::ids::AbilityId;
use super::types::DamageType;
use crate::status::StatusKind;

/// Combat event an ability listens to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display, strum::EnumString)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum TriggerKind {
    OnTurnStart,
    OnAttack,
    OnDamaged,
    OnDeath,
    /// Fires once when HP falls to or below `phase_threshold`.
    PhaseGate,
}

/// Who an ability's damage and status effects land on.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum TargetSelector {
    /// The combatant that owns the ability.
    Caster,
    /// The current opponent.
    #[default]
    Opponent,
    /// Every opponent in combat.
    AllOpponents,
}

impl TargetSelector {
    pub fn is_caster(self) -> bool {
        matches!(self, TargetSelector::Caster)
    }
}

/// The three named buildup counters.
#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    Hash,
    strum::Display,
    strum::EnumString,
    strum::EnumIter,
    strum::AsRefStr,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum StackKind {
    Agitate,
    Tolerance,
    Potential,
}

/// Change to one stack counter: a flat delta and an increased-percent delta
/// applied to the counter's potency.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct CounterDelta {
    pub flat: i32,
    pub increased: f64,
}

impl CounterDelta {
    pub const ZERO: Self = Self {
        flat: 0,
        increased: 0.0,
    };

    pub fn flat(flat: i32) -> Self {
        Self {
            flat,
            increased: 0.0,
        }
    }

    pub fn new(flat: i32, increased: f64) -> Self {
        Self { flat, increased }
    }

    pub fn is_zero(&self) -> bool {
        self.flat == 0 && self.increased == 0.0
    }
}

/// One step of an ability.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum AbilityEffect {
    /// Deal `flat + percent_max_hp × target max HP` of the given type.
    Damage {
        damage_type: DamageType,
        flat: u32,
        #[cfg_attr(feature = "serde", serde(default))]
        percent_max_hp: f64,
    },
    Status {
        kind: StatusKind,
        magnitude: u32,
        duration: u32,
        is_debuff: bool,
    },
    /// Always lands on the ability's owner.
    StackAdjustment {
        #[cfg_attr(feature = "serde", serde(default))]
        agitate: CounterDelta,
        #[cfg_attr(feature = "serde", serde(default))]
        tolerance: CounterDelta,
        #[cfg_attr(feature = "serde", serde(default))]
        potential: CounterDelta,
    },
}

impl AbilityEffect {
    pub fn damage(damage_type: DamageType, flat: u32) -> Self {
        AbilityEffect::Damage {
            damage_type,
            flat,
            percent_max_hp: 0.0,
        }
    }

    pub fn status(kind: StatusKind, magnitude: u32, duration: u32) -> Self {
        AbilityEffect::Status {
            kind,
            magnitude,
            duration,
            is_debuff: kind.is_debuff(),
        }
    }

    pub fn stacks(agitate: CounterDelta, tolerance: CounterDelta, potential: CounterDelta) -> Self {
        AbilityEffect::StackAdjustment {
            agitate,
            tolerance,
            potential,
        }
    }
}

/// Static ability definition.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AbilityDefinition {
    pub id: AbilityId,
    pub name: String,
    pub trigger: TriggerKind,
    #[cfg_attr(feature = "serde", serde(default))]
    pub cooldown_turns: u32,
    #[cfg_attr(feature = "serde", serde(default))]
    pub initial_cooldown: u32,
    #[cfg_attr(feature = "serde", serde(default))]
    pub consumes_turn: bool,
    #[cfg_attr(feature = "serde", serde(default))]
    pub target: TargetSelector,
    #[cfg_attr(feature = "serde", serde(default))]
    pub energy_cost: u32,
    /// HP fraction for `PhaseGate` abilities.
    #[cfg_attr(feature = "serde", serde(default))]
    pub phase_threshold: Option<f64>,
    pub effects: Vec<AbilityEffect>,
}

impl AbilityDefinition {
    pub fn new(id: impl Into<AbilityId>, trigger: TriggerKind) -> Self {
        let id = id.into();
        Self {
            name: id.as_str().to_string(),
            id,
            trigger,
            cooldown_turns: 0,
            initial_cooldown: 0,
            consumes_turn: false,
            target: TargetSelector::Opponent,
            energy_cost: 0,
            phase_threshold: None,
            effects: Vec::new(),
        }
    }

    /// Phase-gate ability firing when HP drops to or below `threshold`.
    pub fn phase_gate(id: impl Into<AbilityId>, threshold: f64) -> Self {
        Self {
            phase_threshold: Some(threshold),
            ..Self::new(id, TriggerKind::PhaseGate)
        }
    }

    pub fn with_cooldown(mut self, turns: u32, initial: u32) -> Self {
        self.cooldown_turns = turns;
        self.initial_cooldown = initial;
        self
    }

    pub fn with_energy_cost(mut self, cost: u32) -> Self {
        self.energy_cost = cost;
        self
    }

    pub fn with_target(mut self, target: TargetSelector) -> Self {
        self.target = target;
        self
    }

    pub fn consuming_turn(mut self) -> Self {
        self.consumes_turn = true;
        self
    }

    pub fn with_effect(mut self, effect: AbilityEffect) -> Self {
        self.effects.push(effect);
        self
    }

    /// Phase threshold, clamped to `[0, 1]`. `None` for non-gate abilities.
    pub fn threshold(&self) -> Option<f64> {
        match self.trigger {
            TriggerKind::PhaseGate => self.phase_threshold.map(|t| t.clamp(0.0, 1.0)),
            _ => None,
        }
    }
}
