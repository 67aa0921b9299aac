//! Playing a card: gate, resolve, pay, apply.

use tracing::debug;

use crate::abilities::{TriggerEngine, TriggerReport};
use crate::catalog::{CardEffect, CardInstance, EffectTarget};
use crate::env::{CombatRng, StatProvider};
use crate::error::CombatError;
use crate::resolve::{Resolution, ResolveContext, effective_cost, is_playable, resolve};
use crate::state::CombatantState;

/// A combatant's live state paired with its fixed stats.
pub struct Combatant<'a> {
    pub state: &'a mut CombatantState,
    pub stats: &'a dyn StatProvider,
}

impl<'a> Combatant<'a> {
    pub fn new(state: &'a mut CombatantState, stats: &'a dyn StatProvider) -> Self {
        Self { state, stats }
    }
}

/// Everything a successful play changed.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct PlayOutcome {
    pub cost: u32,
    pub resolution: Resolution,
    pub combo_continued: bool,
    /// Caster-side triggers, including `OnAttack`.
    pub caster_report: TriggerReport,
    /// Damage events on the defender, one per hit.
    pub defender_report: TriggerReport,
}

/// Plays `card` from `caster` onto an optional single `defender`.
///
/// Order: requirement gate, resolution against the defender's live stats,
/// cost payment, caster-side outcomes (guard, life, mana, statuses, stacks,
/// cleanses), defender statuses, one damage event per hit on the defender,
/// combo bookkeeping and finally `OnAttack` for damaging cards.
///
/// Area cards report their target count in the resolution; hitting the
/// remaining targets is left to the caller.
///
/// # Errors
///
/// Returns `CombatError::Play` when the gate rejects the card. Nothing is
/// changed in that case.
pub fn play_card(
    card: &CardInstance,
    caster: Combatant<'_>,
    defender: Option<Combatant<'_>>,
    engine: &TriggerEngine,
    rng: &mut dyn CombatRng,
) -> Result<PlayOutcome, CombatError> {
    let Combatant {
        state: caster_state,
        stats: caster_stats,
    } = caster;
    let definition = card.definition();

    is_playable(card, &caster_state.live(caster_stats))?;
    let cost = effective_cost(card);

    let combo_count = caster_state.combo.peek(definition);
    let resolution = {
        let caster_view = caster_state.live(caster_stats);
        let defender_view = defender.as_ref().map(|d| d.state.live(d.stats));
        let mut ctx = ResolveContext::new(engine.config(), rng).with_combo_count(combo_count);
        resolve(
            card,
            &caster_view,
            defender_view.as_ref().map(|v| v as &dyn StatProvider),
            &mut ctx,
        )
    };

    caster_state.spend_energy(cost);

    let mut caster_report = TriggerReport::default();
    caster_state.gain_guard(resolution.total_guard());
    caster_report.healed = engine.heal(caster_state, resolution.life_gained);
    caster_state.restore_energy(resolution.mana_gained);
    for status in &resolution.cleanses {
        caster_state.statuses.clear(*status);
    }
    for (counter, delta) in &resolution.stack_adjustments {
        caster_state.stacks.adjust(*counter, *delta);
    }

    let mut defender = defender;
    for effect in &definition.effects {
        match effect {
            CardEffect::ApplyStatus {
                status,
                magnitude,
                duration,
                target,
            } => {
                let ledger = match (target, defender.as_mut()) {
                    (EffectTarget::Caster, _) => Some(&mut caster_state.statuses),
                    (EffectTarget::Defender, Some(d)) => Some(&mut d.state.statuses),
                    (EffectTarget::Defender, None) => None,
                };
                if let Some(ledger) = ledger {
                    ledger.apply(*status, *magnitude, *duration, status.is_debuff());
                }
            }
            CardEffect::Cleanse { status, target } => match (target, defender.as_mut()) {
                (EffectTarget::Caster, _) => {
                    caster_state.statuses.clear(*status);
                }
                (EffectTarget::Defender, Some(d)) => {
                    d.state.statuses.clear(*status);
                }
                (EffectTarget::Defender, None) => {}
            },
            CardEffect::AdjustStack { counter, delta } => caster_state.stacks.adjust(*counter, *delta),
            CardEffect::RestoreEnergy(amount) => {
                caster_state.restore_energy(*amount);
            }
        }
    }

    let mut defender_report = TriggerReport::default();
    if let Some(defender) = defender {
        for ailment in &resolution.ailments {
            defender.state.statuses.apply(
                ailment.status,
                ailment.magnitude,
                ailment.duration,
                ailment.status.is_debuff(),
            );
        }
        let per_hit = resolution.damage.total();
        for _ in 0..resolution.hits {
            if !defender.state.is_alive() {
                break;
            }
            let report = engine.on_damage_taken(defender.state, defender.stats, per_hit, 0);
            defender_report.merge(report);
        }
    }

    let combo_continued = caster_state.combo.record(card.shared_definition());

    if definition.deals_damage() {
        let report = engine.on_attack_performed(caster_state, caster_stats);
        caster_report.merge(report);
    }

    debug!(
        target: "combat::play",
        card = %definition.id,
        cost,
        damage = resolution.damage_per_target(),
        combo = combo_count,
        "card played"
    );

    Ok(PlayOutcome {
        cost,
        resolution,
        combo_continued,
        caster_report,
        defender_report,
    })
}
