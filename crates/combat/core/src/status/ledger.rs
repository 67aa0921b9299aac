use arrayvec::ArrayVec;

use super::kind::{StackingPolicy, StatusKind, TurnEffect};
use crate::catalog::DamageType;
use crate::config::CombatConfig;

/// A single active status.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct StatusEffectInstance {
    pub kind: StatusKind,
    pub magnitude: u32,
    /// Ticks left before the status expires.
    pub remaining: u32,
    /// Times the kind was applied while this instance was active.
    pub stacks: u32,
    pub is_debuff: bool,
}

/// Per-tick outcome of a [`StatusLedger::tick`].
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct TickReport {
    /// Damage-over-time hits as `(source, damage type, amount)`.
    pub damage: ArrayVec<(StatusKind, DamageType, u32), { CombatConfig::MAX_STATUS_EFFECTS }>,
    pub healing: u32,
    /// Kinds that ran out this tick.
    pub expired: ArrayVec<StatusKind, { CombatConfig::MAX_STATUS_EFFECTS }>,
}

impl TickReport {
    pub fn total_damage(&self) -> u32 {
        self.damage
            .iter()
            .fold(0u32, |acc, (_, _, amount)| acc.saturating_add(*amount))
    }

    pub fn is_empty(&self) -> bool {
        self.damage.is_empty() && self.healing == 0 && self.expired.is_empty()
    }
}

/// Active statuses of one combatant.
///
/// The ledger only tracks numbers. It never touches HP itself; the trigger
/// engine routes a [`TickReport`] into damage and healing so that damage
/// over time can start `OnDamaged` abilities.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct StatusLedger {
    effects: ArrayVec<StatusEffectInstance, { CombatConfig::MAX_STATUS_EFFECTS }>,
}

impl StatusLedger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Applies a status, merging with an active instance of the same kind.
    ///
    /// Duration becomes the longer of the two. Magnitude is summed for
    /// accumulating kinds and maxed otherwise. A zero duration applies
    /// nothing. Returns false when nothing was applied.
    pub fn apply(&mut self, kind: StatusKind, magnitude: u32, duration: u32, is_debuff: bool) -> bool {
        if duration == 0 {
            return false;
        }

        if let Some(existing) = self.effects.iter_mut().find(|e| e.kind == kind) {
            existing.remaining = existing.remaining.max(duration);
            existing.magnitude = match kind.stacking() {
                StackingPolicy::Accumulate => existing.magnitude.saturating_add(magnitude),
                StackingPolicy::Strongest => existing.magnitude.max(magnitude),
            };
            existing.stacks = existing.stacks.saturating_add(1);
            existing.is_debuff |= is_debuff;
            return true;
        }

        self.effects
            .try_push(StatusEffectInstance {
                kind,
                magnitude,
                remaining: duration,
                stacks: 1,
                is_debuff,
            })
            .is_ok()
    }

    /// Runs one turn boundary.
    ///
    /// Per-turn effects of every active instance are collected first, then
    /// every duration drops by one and instances reaching zero are removed.
    pub fn tick(&mut self) -> TickReport {
        let mut report = TickReport::default();

        for effect in &self.effects {
            match effect.kind.turn_effect() {
                TurnEffect::Damage(damage_type) if effect.magnitude > 0 => {
                    report.damage.push((effect.kind, damage_type, effect.magnitude));
                }
                TurnEffect::Heal => {
                    report.healing = report.healing.saturating_add(effect.magnitude);
                }
                _ => {}
            }
        }

        for effect in &mut self.effects {
            effect.remaining = effect.remaining.saturating_sub(1);
            if effect.remaining == 0 {
                report.expired.push(effect.kind);
            }
        }
        self.effects.retain(|e| e.remaining > 0);

        report
    }

    /// Removes the kind. Returns whether it was active.
    pub fn clear(&mut self, kind: StatusKind) -> bool {
        let before = self.effects.len();
        self.effects.retain(|e| e.kind != kind);
        self.effects.len() != before
    }

    /// Removes every debuff. Returns how many were removed.
    pub fn clear_debuffs(&mut self) -> usize {
        let before = self.effects.len();
        self.effects.retain(|e| !e.is_debuff);
        before - self.effects.len()
    }

    pub fn get(&self, kind: StatusKind) -> Option<&StatusEffectInstance> {
        self.effects.iter().find(|e| e.kind == kind)
    }

    pub fn has(&self, kind: StatusKind) -> bool {
        self.get(kind).is_some()
    }

    /// Magnitude of the kind, zero when inactive.
    pub fn magnitude(&self, kind: StatusKind) -> u32 {
        self.get(kind).map_or(0, |e| e.magnitude)
    }

    pub fn iter(&self) -> impl Iterator<Item = &StatusEffectInstance> {
        self.effects.iter()
    }

    pub fn len(&self) -> usize {
        self.effects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.effects.is_empty()
    }
}
