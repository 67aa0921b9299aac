//! Ability trigger engine.
//!
//! Per ability and combatant the engine runs a small state machine:
//!
//! ```text
//!            advance_turn (cooldown - 1)
//!   OnCooldown ───────────────────────────► Ready
//!       ▲                                     │
//!       └──────── fire (cooldown = N) ◄───────┘
//! ```
//!
//! Combat events (`advance_turn`, `on_attack_performed`, `on_damage_taken`,
//! `on_death`) fire every ready ability listening to the event whose energy
//! cost is affordable. Effects aimed at the owner are applied immediately;
//! effects aimed at opponents come back as [`OutgoingEffect`]s for the turn
//! loop to [`deliver`](TriggerEngine::deliver).

use std::sync::Arc;

use crate::catalog::{AbilityEffect, AbilityId, StackKind, TargetSelector, TriggerKind};
use crate::config::CombatConfig;
use crate::env::StatProvider;
use crate::resolve::resolve_ability_damage;
use crate::state::{CombatantState, DamageTaken};
use crate::status::TickReport;

use super::error::AbilityError;

/// An ability effect aimed at one or more opponents.
#[derive(Clone, Debug, PartialEq)]
pub struct OutgoingEffect {
    pub source: AbilityId,
    pub target: TargetSelector,
    pub effect: AbilityEffect,
}

/// What happened while processing one combat event.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct TriggerReport {
    /// Abilities fired, in firing order.
    pub fired: Vec<AbilityId>,
    pub outgoing: Vec<OutgoingEffect>,
    /// A fired ability ends the owner's action this turn.
    pub turn_consumed: bool,
    pub absorbed: u32,
    pub hp_lost: u32,
    pub healed: u32,
    /// HP reached zero during the event.
    pub died: bool,
}

impl TriggerReport {
    pub fn merge(&mut self, other: TriggerReport) {
        self.fired.extend(other.fired);
        self.outgoing.extend(other.outgoing);
        self.turn_consumed |= other.turn_consumed;
        self.absorbed = self.absorbed.saturating_add(other.absorbed);
        self.hp_lost = self.hp_lost.saturating_add(other.hp_lost);
        self.healed = self.healed.saturating_add(other.healed);
        self.died |= other.died;
    }

    pub fn has_fired(&self, ability: &AbilityId) -> bool {
        self.fired.contains(ability)
    }

    fn record(&mut self, taken: DamageTaken) {
        self.absorbed = self.absorbed.saturating_add(taken.absorbed);
        self.hp_lost = self.hp_lost.saturating_add(taken.hp_lost);
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum FireMode {
    /// Sets cooldown and pays energy.
    Normal,
    /// Like `Normal`, but reached without a cooldown check.
    PhaseGate,
    /// Neither cooldown nor energy.
    Death,
}

/// Evaluates and fires abilities on combat events.
#[derive(Clone, Debug, Default)]
pub struct TriggerEngine {
    config: CombatConfig,
}

impl TriggerEngine {
    pub fn new(config: CombatConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &CombatConfig {
        &self.config
    }

    /// Starts the combatant's next turn.
    ///
    /// Advances the turn counter, resets the combo tracker, ticks every
    /// cooldown down by one and then fires ready `OnTurnStart` abilities.
    pub fn advance_turn(
        &self,
        state: &mut CombatantState,
        stats: &dyn StatProvider,
    ) -> TriggerReport {
        state.turn += 1;
        state.combo.reset();
        for slot in state.abilities_mut() {
            slot.cooldown_remaining = slot.cooldown_remaining.saturating_sub(1);
        }

        let mut report = TriggerReport::default();
        if state.is_alive() {
            self.evaluate(TriggerKind::OnTurnStart, state, stats, 0, &mut report);
        }
        tracing::debug!(
            target: "combat::abilities",
            turn = state.turn,
            fired = ?report.fired,
            turn_consumed = report.turn_consumed,
            "turn started"
        );
        report
    }

    /// Fires ready `OnAttack` abilities after the combatant attacked.
    pub fn on_attack_performed(
        &self,
        state: &mut CombatantState,
        stats: &dyn StatProvider,
    ) -> TriggerReport {
        let mut report = TriggerReport::default();
        if state.is_alive() {
            self.evaluate(TriggerKind::OnAttack, state, stats, 0, &mut report);
        }
        report
    }

    /// Applies incoming damage and runs `OnDamaged` and phase-gate abilities.
    ///
    /// `depth` is 0 for damage from outside. Damage an ability deals to its
    /// own owner re-enters here one level deeper, and only while the depth
    /// stays below `max_trigger_depth`; past that it lands without triggers.
    pub fn on_damage_taken(
        &self,
        state: &mut CombatantState,
        stats: &dyn StatProvider,
        amount: u32,
        depth: u32,
    ) -> TriggerReport {
        self.receive(state, stats, amount, depth, true)
    }

    /// Fires every `OnDeath` ability once, ignoring cooldown and energy.
    /// Later calls do nothing.
    pub fn on_death(&self, state: &mut CombatantState, stats: &dyn StatProvider) -> TriggerReport {
        let mut report = TriggerReport::default();
        if state.death_handled {
            return report;
        }
        state.death_handled = true;

        let indices = slots_with(state, TriggerKind::OnDeath);
        for index in indices {
            self.fire_slot(index, state, stats, 0, FireMode::Death, &mut report);
        }
        report.died = !state.is_alive();
        report
    }

    /// Fires one ability on request.
    ///
    /// A phase gate fired this way counts as fired for the current descent
    /// and stays spent until a heal lifts HP back above its threshold.
    ///
    /// # Errors
    ///
    /// `AbilityNotFound`, `OnCooldown` or `InsufficientEnergy`; the state is
    /// untouched in every case.
    pub fn fire(
        &self,
        ability: &AbilityId,
        state: &mut CombatantState,
        stats: &dyn StatProvider,
    ) -> Result<TriggerReport, AbilityError> {
        let index = state
            .ability_index(ability)
            .ok_or_else(|| AbilityError::AbilityNotFound(ability.clone()))?;

        let slot = &state.abilities()[index];
        if !slot.is_ready() {
            return Err(AbilityError::OnCooldown {
                ability: ability.clone(),
                remaining: slot.cooldown_remaining,
            });
        }
        if slot.definition.energy_cost > state.energy {
            return Err(AbilityError::InsufficientEnergy {
                ability: ability.clone(),
                required: slot.definition.energy_cost,
                available: state.energy,
            });
        }

        let mut report = TriggerReport::default();
        if slot.definition.trigger == TriggerKind::PhaseGate {
            state.abilities_mut()[index].phase_fired = true;
        }
        self.fire_slot(index, state, stats, 0, FireMode::Normal, &mut report);
        Ok(report)
    }

    /// Applies an opponent-targeted effect to `target`.
    ///
    /// Percent-of-max-HP damage reads the target's maximum HP now, and the
    /// damage goes through [`on_damage_taken`](Self::on_damage_taken) so the
    /// target's own abilities react.
    pub fn deliver(
        &self,
        target: &mut CombatantState,
        target_stats: &dyn StatProvider,
        outgoing: &OutgoingEffect,
    ) -> TriggerReport {
        match &outgoing.effect {
            AbilityEffect::Damage {
                damage_type,
                flat,
                percent_max_hp,
            } => {
                let amount = resolve_ability_damage(
                    *damage_type,
                    *flat,
                    *percent_max_hp,
                    &target.live(target_stats),
                )
                .total();
                self.on_damage_taken(target, target_stats, amount, 0)
            }
            AbilityEffect::Status {
                kind,
                magnitude,
                duration,
                is_debuff,
            } => {
                target.statuses.apply(*kind, *magnitude, *duration, *is_debuff);
                TriggerReport::default()
            }
            AbilityEffect::StackAdjustment { .. } => TriggerReport::default(),
        }
    }

    /// Restores HP and re-arms phase gates whose threshold HP is back above.
    /// Returns the amount healed.
    pub fn heal(&self, state: &mut CombatantState, amount: u32) -> u32 {
        let healed = state.restore_hp(amount);
        let fraction = state.hp_fraction();
        for slot in state.abilities_mut() {
            if slot.phase_fired && slot.definition.threshold().is_some_and(|t| fraction > t) {
                tracing::debug!(
                    target: "combat::abilities",
                    ability = %slot.definition.id,
                    hp_fraction = fraction,
                    "phase gate re-armed"
                );
                slot.phase_fired = false;
            }
        }
        healed
    }

    /// Ticks the status ledger and applies its damage and healing.
    ///
    /// Damage over time ignores guard and resistances but still counts as
    /// damage taken for `OnDamaged` and phase gates.
    pub fn tick_statuses(
        &self,
        state: &mut CombatantState,
        stats: &dyn StatProvider,
    ) -> (TickReport, TriggerReport) {
        let tick = state.statuses.tick();
        let mut report = self.receive(state, stats, tick.total_damage(), 0, false);
        if state.is_alive() && tick.healing > 0 {
            report.healed = report.healed.saturating_add(self.heal(state, tick.healing));
        }
        (tick, report)
    }

    fn receive(
        &self,
        state: &mut CombatantState,
        stats: &dyn StatProvider,
        amount: u32,
        depth: u32,
        guarded: bool,
    ) -> TriggerReport {
        let mut report = TriggerReport::default();
        if amount == 0 || !state.is_alive() {
            return report;
        }

        let before = state.hp_fraction();
        let taken = if guarded {
            state.take_damage(amount)
        } else {
            state.take_unguarded_damage(amount)
        };
        report.record(taken);
        if !state.is_alive() {
            tracing::debug!(
                target: "combat::abilities",
                amount,
                hp_lost = taken.hp_lost,
                "combatant died"
            );
            report.died = true;
            return report;
        }
        let after = state.hp_fraction();

        self.evaluate(TriggerKind::OnDamaged, state, stats, depth, &mut report);
        self.check_phase_gates(state, stats, before, after, depth, &mut report);
        report
    }

    fn evaluate(
        &self,
        trigger: TriggerKind,
        state: &mut CombatantState,
        stats: &dyn StatProvider,
        depth: u32,
        report: &mut TriggerReport,
    ) {
        for index in slots_with(state, trigger) {
            if !state.is_alive() {
                break;
            }
            let slot = &state.abilities()[index];
            if !slot.is_ready() {
                continue;
            }
            if slot.definition.energy_cost > state.energy {
                tracing::debug!(
                    target: "combat::abilities",
                    ability = %slot.definition.id,
                    required = slot.definition.energy_cost,
                    available = state.energy,
                    "ready but short on energy"
                );
                continue;
            }
            self.fire_slot(index, state, stats, depth, FireMode::Normal, report);
        }
    }

    fn check_phase_gates(
        &self,
        state: &mut CombatantState,
        stats: &dyn StatProvider,
        before: f64,
        after: f64,
        depth: u32,
        report: &mut TriggerReport,
    ) {
        for index in slots_with(state, TriggerKind::PhaseGate) {
            if !state.is_alive() {
                break;
            }
            let slot = &state.abilities()[index];
            let Some(threshold) = slot.definition.threshold() else {
                continue;
            };
            let crossed = before > threshold && after <= threshold;
            if slot.phase_fired || !crossed {
                continue;
            }
            if slot.definition.energy_cost > state.energy {
                tracing::debug!(
                    target: "combat::abilities",
                    ability = %slot.definition.id,
                    threshold,
                    "phase gate crossed without energy"
                );
                continue;
            }
            state.abilities_mut()[index].phase_fired = true;
            self.fire_slot(index, state, stats, depth, FireMode::PhaseGate, report);
        }
    }

    fn fire_slot(
        &self,
        index: usize,
        state: &mut CombatantState,
        stats: &dyn StatProvider,
        depth: u32,
        mode: FireMode,
        report: &mut TriggerReport,
    ) {
        let definition = {
            let slot = &mut state.abilities_mut()[index];
            if mode != FireMode::Death {
                slot.cooldown_remaining = slot.definition.cooldown_turns;
            }
            Arc::clone(&slot.definition)
        };
        if mode != FireMode::Death {
            state.spend_energy(definition.energy_cost);
        }

        tracing::debug!(
            target: "combat::abilities",
            ability = %definition.id,
            mode = ?mode,
            depth,
            "ability fired"
        );
        report.fired.push(definition.id.clone());
        report.turn_consumed |= definition.consumes_turn;

        let on_self = definition.target.is_caster();
        for effect in &definition.effects {
            match effect {
                AbilityEffect::StackAdjustment {
                    agitate,
                    tolerance,
                    potential,
                } => {
                    state.stacks.adjust(StackKind::Agitate, *agitate);
                    state.stacks.adjust(StackKind::Tolerance, *tolerance);
                    state.stacks.adjust(StackKind::Potential, *potential);
                }
                AbilityEffect::Damage {
                    damage_type,
                    flat,
                    percent_max_hp,
                } if on_self => {
                    let amount = resolve_ability_damage(
                        *damage_type,
                        *flat,
                        *percent_max_hp,
                        &state.live(stats),
                    )
                    .total();
                    if mode != FireMode::Death && depth < self.config.max_trigger_depth {
                        let nested = self.receive(state, stats, amount, depth + 1, true);
                        report.merge(nested);
                    } else {
                        report.record(state.take_damage(amount));
                        report.died |= !state.is_alive();
                    }
                }
                AbilityEffect::Status {
                    kind,
                    magnitude,
                    duration,
                    is_debuff,
                } if on_self => {
                    state.statuses.apply(*kind, *magnitude, *duration, *is_debuff);
                }
                _ => report.outgoing.push(OutgoingEffect {
                    source: definition.id.clone(),
                    target: definition.target,
                    effect: effect.clone(),
                }),
            }
        }
    }
}

fn slots_with(state: &CombatantState, trigger: TriggerKind) -> Vec<usize> {
    state
        .abilities()
        .iter()
        .enumerate()
        .filter(|(_, slot)| slot.trigger() == trigger)
        .map(|(index, _)| index)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{AbilityDefinition, CounterDelta, DamageType};
    use crate::env::StatSnapshot;
    use crate::status::StatusKind;

    fn engine() -> TriggerEngine {
        TriggerEngine::new(CombatConfig::default())
    }

    fn stats() -> StatSnapshot {
        StatSnapshot::builder().max_hp(100).build()
    }

    #[test]
    fn turn_start_abilities_follow_cooldown() {
        let roar = AbilityDefinition::new("roar", TriggerKind::OnTurnStart)
            .with_cooldown(2, 0)
            .with_effect(AbilityEffect::stacks(
                CounterDelta::flat(1),
                CounterDelta::ZERO,
                CounterDelta::ZERO,
            ));
        let mut state = CombatantState::new(100, 0).with_ability(roar).unwrap();
        let engine = engine();

        let fired: Vec<bool> = (0..4)
            .map(|_| !engine.advance_turn(&mut state, &stats()).fired.is_empty())
            .collect();
        assert_eq!(fired, vec![true, false, true, false]);
        assert_eq!(state.stacks.agitate.value, 2);
        assert_eq!(state.turn, 5);
    }

    #[test]
    fn unaffordable_abilities_wait() {
        let blast = AbilityDefinition::new("blast", TriggerKind::OnAttack)
            .with_energy_cost(3)
            .with_effect(AbilityEffect::damage(DamageType::Fire, 5));
        let mut state = CombatantState::new(50, 2).with_ability(blast).unwrap();

        let report = engine().on_attack_performed(&mut state, &stats());
        assert!(report.fired.is_empty());
        assert_eq!(state.energy, 2);

        state.energy = 3;
        let report = engine().on_attack_performed(&mut state, &stats());
        assert_eq!(report.fired.len(), 1);
        assert_eq!(state.energy, 0);
        assert_eq!(report.outgoing.len(), 1);
        assert_eq!(report.outgoing[0].target, TargetSelector::Opponent);
    }

    #[test]
    fn fire_rejections_leave_state_untouched() {
        let smash = AbilityDefinition::new("smash", TriggerKind::OnTurnStart)
            .with_cooldown(2, 1)
            .with_energy_cost(2);
        let mut state = CombatantState::new(50, 1).with_ability(smash).unwrap();
        let before = state.clone();
        let id = AbilityId::new("smash");

        assert_eq!(
            engine().fire(&id, &mut state, &stats()),
            Err(AbilityError::OnCooldown {
                ability: id.clone(),
                remaining: 1
            })
        );
        assert_eq!(state, before);

        state.abilities_mut()[0].cooldown_remaining = 0;
        let before = state.clone();
        assert!(matches!(
            engine().fire(&id, &mut state, &stats()),
            Err(AbilityError::InsufficientEnergy { required: 2, available: 1, .. })
        ));
        assert_eq!(state, before);

        assert!(matches!(
            engine().fire(&AbilityId::new("other"), &mut state, &stats()),
            Err(AbilityError::AbilityNotFound(_))
        ));
    }

    #[test]
    fn self_targeted_effects_apply_immediately() {
        let harden = AbilityDefinition::new("harden", TriggerKind::OnDamaged)
            .with_target(TargetSelector::Caster)
            .with_effect(AbilityEffect::status(StatusKind::Fortified, 2, 2));
        let mut state = CombatantState::new(50, 0).with_ability(harden).unwrap();

        let report = engine().on_damage_taken(&mut state, &stats(), 5, 0);
        assert!(report.has_fired(&AbilityId::new("harden")));
        assert!(report.outgoing.is_empty());
        assert!(state.statuses.has(StatusKind::Fortified));
        assert_eq!(state.hp, 45);
    }

    #[test]
    fn self_damage_recursion_is_bounded() {
        let thorns = AbilityDefinition::new("self_harm", TriggerKind::OnDamaged)
            .with_target(TargetSelector::Caster)
            .with_effect(AbilityEffect::damage(DamageType::Physical, 1));
        let mut state = CombatantState::new(100, 0).with_ability(thorns).unwrap();

        let report = engine().on_damage_taken(&mut state, &stats(), 10, 0);
        // original hit fires at depth 0, nested hit fires at depth 1,
        // whose own damage lands without triggers
        assert_eq!(report.fired.len(), 2);
        assert_eq!(report.hp_lost, 12);
        assert_eq!(state.hp, 88);
    }

    #[test]
    fn deeper_trigger_limit_allows_more_nesting() {
        let thorns = AbilityDefinition::new("self_harm", TriggerKind::OnDamaged)
            .with_target(TargetSelector::Caster)
            .with_effect(AbilityEffect::damage(DamageType::Physical, 1));
        let mut state = CombatantState::new(100, 0).with_ability(thorns).unwrap();
        let engine = TriggerEngine::new(CombatConfig::default().with_max_trigger_depth(3));

        let report = engine.on_damage_taken(&mut state, &stats(), 10, 0);
        assert_eq!(report.fired.len(), 4);
        assert_eq!(state.hp, 86);
    }

    #[test]
    fn phase_gate_needs_energy() {
        let gate = AbilityDefinition::phase_gate("enrage", 0.5).with_energy_cost(2);
        let mut state = CombatantState::new(100, 1).with_ability(gate).unwrap();

        let report = engine().on_damage_taken(&mut state, &stats(), 60, 0);
        assert!(report.fired.is_empty());
        assert!(!state.abilities()[0].phase_fired);
    }

    #[test]
    fn phase_gate_ignores_cooldown() {
        let gate = AbilityDefinition::phase_gate("enrage", 0.5).with_cooldown(5, 5);
        let mut state = CombatantState::new(100, 0).with_ability(gate).unwrap();

        let report = engine().on_damage_taken(&mut state, &stats(), 50, 0);
        assert_eq!(report.fired, vec![AbilityId::new("enrage")]);
    }

    #[test]
    fn manual_phase_gate_stays_spent_for_the_descent() {
        let gate = AbilityDefinition::phase_gate("enrage", 0.5);
        let mut state = CombatantState::new(100, 0).with_ability(gate).unwrap();
        let engine = engine();
        let id = AbilityId::new("enrage");

        let report = engine.fire(&id, &mut state, &stats()).unwrap();
        assert_eq!(report.fired, vec![id.clone()]);
        assert!(state.abilities()[0].phase_fired);

        let report = engine.on_damage_taken(&mut state, &stats(), 60, 0);
        assert!(report.fired.is_empty());

        engine.heal(&mut state, 30);
        assert!(!state.abilities()[0].phase_fired);
        let report = engine.on_damage_taken(&mut state, &stats(), 30, 0);
        assert_eq!(report.fired, vec![id]);
    }

    #[test]
    fn turn_consuming_ability_is_reported() {
        let stomp = AbilityDefinition::new("stomp", TriggerKind::OnTurnStart)
            .consuming_turn()
            .with_effect(AbilityEffect::damage(DamageType::Physical, 4));
        let mut state = CombatantState::new(100, 0).with_ability(stomp).unwrap();

        let report = engine().advance_turn(&mut state, &stats());
        assert!(report.has_fired(&AbilityId::new("stomp")));
        assert!(report.turn_consumed);
    }

    #[test]
    fn ordinary_ability_leaves_the_turn_free() {
        let roar = AbilityDefinition::new("roar", TriggerKind::OnTurnStart).with_effect(
            AbilityEffect::stacks(CounterDelta::flat(1), CounterDelta::ZERO, CounterDelta::ZERO),
        );
        let mut state = CombatantState::new(100, 0).with_ability(roar).unwrap();

        let report = engine().advance_turn(&mut state, &stats());
        assert!(report.has_fired(&AbilityId::new("roar")));
        assert!(!report.turn_consumed);
    }

    #[test]
    fn on_death_fires_once_without_gates() {
        let last_words = AbilityDefinition::new("curse", TriggerKind::OnDeath)
            .with_cooldown(9, 9)
            .with_energy_cost(50)
            .with_effect(AbilityEffect::status(StatusKind::Weakened, 2, 3));
        let mut state = CombatantState::new(10, 0).with_ability(last_words).unwrap();
        let engine = engine();

        let report = engine.on_damage_taken(&mut state, &stats(), 10, 0);
        assert!(report.died);
        assert!(report.fired.is_empty());

        let report = engine.on_death(&mut state, &stats());
        assert_eq!(report.fired.len(), 1);
        assert_eq!(report.outgoing.len(), 1);
        assert_eq!(state.energy, 0);

        assert!(engine.on_death(&mut state, &stats()).fired.is_empty());
    }

    #[test]
    fn deliver_resolves_percent_damage_against_target() {
        let engine = engine();
        let mut target = CombatantState::new(200, 0);
        let target_stats = StatSnapshot::builder()
            .max_hp(200)
            .resistance(DamageType::Cold, 0.5)
            .build();
        let outgoing = OutgoingEffect {
            source: AbilityId::new("frost"),
            target: TargetSelector::Opponent,
            effect: AbilityEffect::Damage {
                damage_type: DamageType::Cold,
                flat: 10,
                percent_max_hp: 0.1,
            },
        };
        let report = engine.deliver(&mut target, &target_stats, &outgoing);
        assert_eq!(report.hp_lost, 15);
        assert_eq!(target.hp, 185);

        let chill = OutgoingEffect {
            effect: AbilityEffect::status(StatusKind::Chilled, 1, 2),
            ..outgoing
        };
        engine.deliver(&mut target, &target_stats, &chill);
        assert!(target.statuses.has(StatusKind::Chilled));
    }

    #[test]
    fn status_ticks_bypass_guard() {
        let engine = engine();
        let mut state = CombatantState::new(40, 0);
        state.gain_guard(10);
        state.statuses.apply(StatusKind::Burning, 4, 2, true);
        state.statuses.apply(StatusKind::Regenerating, 1, 1, false);

        let (tick, report) = engine.tick_statuses(&mut state, &stats());
        assert_eq!(tick.total_damage(), 4);
        assert_eq!(report.hp_lost, 4);
        assert_eq!(report.healed, 1);
        assert_eq!(state.guard, 10);
        assert_eq!(state.hp, 37);
    }
}
