//! Damage and guard resolution.
//!
//! A played card resolves in a fixed order. Each step works on the running
//! total produced by the previous one:
//!
//! ```text
//!  1. base damage
//!  2. + Σ attribute × coefficient
//!  3. + weapon damage for each flagged weapon class
//!  4. + flat embossings
//!  5. × (1 + Σ increased)            derived scaling included
//!  6. × each more/conditional factor in attachment order
//!  7. split across damage types, then conversions in attachment order
//!  8. fan-out: targets and duplicated hits
//!  9. × max(0, 1 - (resistance - penetration)) per type
//! 10. floor every bucket, then post-hit hooks read the final total
//! ```
//!
//! The running total is clamped at zero after each of steps 2 to 4, so a
//! negative coefficient cannot eat into later flat bonuses. Guard skips
//! steps 3 and 6 to 9.

use std::sync::Arc;

use strum::{EnumCount, IntoEnumIterator};
use tracing::{debug, trace};

use super::amounts::{DamageBundle, TypedAmounts, floor_amount};
use super::context::ResolveContext;
use super::stack::{Modifier, ModifierStack};
use crate::catalog::{
    AttributeKind, AttributeScaling, CardDefinition, CardInstance, CounterDelta, DamageType,
    EmbossingDefinition, EmbossingKind, StackKind,
};
use crate::env::StatProvider;
use crate::status::StatusKind;

/// Ailment rolled onto the defender by an ailment embossing.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct AilmentApplication {
    pub status: StatusKind,
    pub magnitude: u32,
    pub duration: u32,
}

/// Outcome of resolving one card.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Resolution {
    /// Damage of a single hit on a single target, after mitigation.
    pub damage: DamageBundle,
    /// Guard produced by the card itself.
    pub guard: u32,
    pub targets: u32,
    pub hits: u32,
    pub critical: bool,

    pub life_gained: u32,
    /// Mana/energy restored to the caster.
    pub mana_gained: u32,
    /// Guard granted by on-play embossings, on top of `guard`.
    pub guard_gained: u32,
    pub ailments: Vec<AilmentApplication>,

    /// Statuses to remove from the caster.
    pub cleanses: Vec<StatusKind>,
    pub stack_adjustments: Vec<(StackKind, CounterDelta)>,
}

impl Resolution {
    /// Damage dealt to one target across all hits.
    pub fn damage_per_target(&self) -> u32 {
        self.damage.total().saturating_mul(self.hits)
    }

    pub fn total_guard(&self) -> u32 {
        self.guard.saturating_add(self.guard_gained)
    }
}

/// Resolves a card against an optional defender.
///
/// Without a defender nothing is mitigated and conditions on the defender
/// (execute) never apply. Random draws happen in attachment order, one per
/// chance strictly between 0 and 1.
pub fn resolve(
    card: &CardInstance,
    caster: &dyn StatProvider,
    defender: Option<&dyn StatProvider>,
    ctx: &mut ResolveContext<'_>,
) -> Resolution {
    let definition = card.definition();
    let embossings = card.embossings();
    let mut resolution = Resolution {
        hits: 1,
        ..Resolution::default()
    };

    // Steps 1-6
    let total = scaled_damage(definition, embossings, caster, defender, ctx, &mut resolution);

    // Step 7
    let mut amounts = split(definition, total);
    convert(&mut amounts, embossings);
    trace!(target: "combat::resolve", ?amounts, "after conversion");

    // Step 8
    resolution.targets = target_count(definition, embossings);
    for embossing in embossings {
        if embossing.kind == EmbossingKind::Duplicate && ctx.rng.roll(embossing.value) {
            resolution.hits = 2;
            break;
        }
    }

    // Step 9
    if let Some(defender) = defender {
        mitigate(&mut amounts, defender, embossings);
    }

    // Step 10
    resolution.damage = amounts.finalize();
    resolution.guard = resolve_guard(definition, embossings, caster, ctx);
    post_hit(embossings, ctx, &mut resolution);

    debug!(
        target: "combat::resolve",
        card = %definition.id,
        damage = resolution.damage.total(),
        guard = resolution.guard,
        targets = resolution.targets,
        hits = resolution.hits,
        critical = resolution.critical,
        "card resolved"
    );

    resolution
}

/// Resolves only the guard a card produces.
///
/// `base guard + Σ attribute × guard coefficient + flat guard`, clamped at
/// zero after each addition, then increased guard and derived scaling,
/// floored.
pub fn resolve_guard(
    definition: &CardDefinition,
    embossings: &[Arc<EmbossingDefinition>],
    caster: &dyn StatProvider,
    ctx: &ResolveContext<'_>,
) -> u32 {
    let mut attributes = ModifierStack::new();
    attributes.extend(attribute_flats(&definition.guard_scaling, caster));
    let mut flats = ModifierStack::new();
    let mut stack = ModifierStack::new();

    for embossing in embossings {
        match embossing.kind {
            EmbossingKind::FlatGuard => flats.add(Modifier::Flat(embossing.value)),
            EmbossingKind::IncreasedGuard => stack.add(Modifier::Increased(embossing.value)),
            kind => {
                if let Some(derived) = derived_increased(kind, embossing.value, caster, ctx) {
                    stack.add(Modifier::Increased(derived));
                }
            }
        }
    }

    floor_amount(stack.apply_layered(f64::from(definition.base_guard), &[attributes, flats]))
}

/// Damage from an ability effect: `flat + percent × target max HP`,
/// mitigated by the target's resistance to the type, floored.
///
/// Abilities never scale with attributes or embossings.
pub fn resolve_ability_damage(
    damage_type: DamageType,
    flat: u32,
    percent_max_hp: f64,
    target: &dyn StatProvider,
) -> DamageBundle {
    let base = f64::from(flat) + percent_max_hp.max(0.0) * f64::from(target.max_hp());
    let factor = (1.0 - target.resistance(damage_type)).max(0.0);
    DamageBundle::single(damage_type, floor_amount(base * factor))
}

fn attribute_flats(scaling: &AttributeScaling, caster: &dyn StatProvider) -> Vec<Modifier> {
    scaling
        .pairs()
        .into_iter()
        .filter(|(_, coefficient)| *coefficient != 0.0)
        .map(|(attribute, coefficient)| {
            Modifier::Flat(f64::from(caster.attribute(attribute)) * coefficient)
        })
        .collect()
}

/// Increased fraction contributed by attribute and combo scaling kinds.
fn derived_increased(
    kind: EmbossingKind,
    value: f64,
    caster: &dyn StatProvider,
    ctx: &ResolveContext<'_>,
) -> Option<f64> {
    let attribute = match kind {
        EmbossingKind::StrengthScaling => AttributeKind::Strength,
        EmbossingKind::DexterityScaling => AttributeKind::Dexterity,
        EmbossingKind::IntelligenceScaling => AttributeKind::Intelligence,
        EmbossingKind::ComboScaling => return Some(f64::from(ctx.combo_count) * value),
        _ => return None,
    };
    let steps = ctx.config.breakpoints(f64::from(caster.attribute(attribute)));
    Some(steps * value)
}

fn scaled_damage(
    definition: &CardDefinition,
    embossings: &[Arc<EmbossingDefinition>],
    caster: &dyn StatProvider,
    defender: Option<&dyn StatProvider>,
    ctx: &mut ResolveContext<'_>,
    resolution: &mut Resolution,
) -> f64 {
    let mut attributes = ModifierStack::new();
    attributes.extend(attribute_flats(&definition.damage_scaling, caster));
    let mut weapons = ModifierStack::new();
    for class in definition.weapon_scaling.classes() {
        weapons.add(Modifier::Flat(caster.weapon_scaling(class)));
    }
    let mut flats = ModifierStack::new();
    let mut stack = ModifierStack::new();

    for embossing in embossings {
        let value = embossing.value;
        match embossing.kind {
            EmbossingKind::FlatDamage => flats.add(Modifier::Flat(value)),
            EmbossingKind::IncreasedDamage => stack.add(Modifier::Increased(value)),
            EmbossingKind::IncreasedAreaDamage if definition.area_of_effect => {
                stack.add(Modifier::Increased(value))
            }
            EmbossingKind::Desperation => {
                let threshold = embossing.secondary_or(ctx.config.desperation_threshold);
                if caster.hp_fraction() <= threshold {
                    stack.add(Modifier::Increased(value));
                }
            }
            kind => {
                if let Some(derived) = derived_increased(kind, value, caster, ctx) {
                    stack.add(Modifier::Increased(derived));
                }
            }
        }
    }

    let layers = [attributes, weapons, flats];
    trace!(
        target: "combat::resolve",
        flat = layers.iter().map(ModifierStack::flat_sum).sum::<f64>(),
        increased = stack.increased_sum(),
        "additive layers"
    );

    for embossing in embossings {
        let value = embossing.value;
        let factor = match embossing.kind {
            EmbossingKind::MoreDamage => Some(1.0 + value),
            EmbossingKind::LessDamage => Some(1.0 - value),
            EmbossingKind::CriticalStrike => {
                if ctx.rng.roll(value) {
                    resolution.critical = true;
                    Some(embossing.secondary_or(ctx.config.default_crit_multiplier))
                } else {
                    None
                }
            }
            EmbossingKind::Execute => {
                let threshold = embossing.secondary_or(ctx.config.execute_threshold);
                defender
                    .filter(|d| d.hp_fraction() <= threshold)
                    .map(|_| 1.0 + value)
            }
            EmbossingKind::FullHealth => {
                let full = caster.max_hp() > 0 && caster.current_hp() >= caster.max_hp();
                full.then_some(1.0 + value)
            }
            _ => None,
        };
        if let Some(factor) = factor {
            trace!(target: "combat::resolve", embossing = %embossing.id, factor, "more");
            stack.add(Modifier::More(factor));
        }
    }

    stack.apply_layered(f64::from(definition.base_damage), &layers)
}

/// Splits the total evenly across the primary and additional types.
fn split(definition: &CardDefinition, total: f64) -> TypedAmounts {
    let mut amounts = TypedAmounts::new();
    let types = 1 + definition.extra_damage_types.len();
    let share = total / types as f64;
    for damage_type in definition.damage_types() {
        amounts.add(damage_type, share);
    }
    amounts
}

/// Runs conversion and gain-as-extra embossings in attachment order.
///
/// The first conversion out of a type fixes that type's basis. Later
/// conversions out of the same type take their fraction of that basis, but
/// never more than the fraction still unconverted.
fn convert(amounts: &mut TypedAmounts, embossings: &[Arc<EmbossingDefinition>]) {
    let mut basis: [Option<f64>; DamageType::COUNT] = [None; DamageType::COUNT];
    let mut converted = [0.0f64; DamageType::COUNT];

    for embossing in embossings {
        match embossing.kind {
            EmbossingKind::Conversion { from, to } if from != to => {
                let base = *basis[from.index()].get_or_insert(amounts.get(from));
                let remaining = (1.0 - converted[from.index()]).max(0.0);
                let fraction = embossing.value.clamp(0.0, 1.0).min(remaining);
                converted[from.index()] += fraction;

                let moved = amounts.take(from, base * fraction);
                amounts.add(to, moved);
            }
            EmbossingKind::ExtraAs { from, to } => {
                let gained = amounts.get(from) * embossing.value.max(0.0);
                amounts.add(to, gained);
            }
            _ => {}
        }
    }
}

fn target_count(
    definition: &CardDefinition,
    embossings: &[Arc<EmbossingDefinition>],
) -> u32 {
    if !definition.area_of_effect {
        return 1;
    }
    let extra: f64 = embossings
        .iter()
        .filter(|e| e.kind == EmbossingKind::ExtraTargets)
        .map(|e| e.value)
        .sum();
    u32::from(definition.aoe_targets.max(1)).saturating_add(floor_amount(extra))
}

fn mitigate(
    amounts: &mut TypedAmounts,
    defender: &dyn StatProvider,
    embossings: &[Arc<EmbossingDefinition>],
) {
    for damage_type in DamageType::iter() {
        let penetration: f64 = embossings
            .iter()
            .filter(|e| e.kind == EmbossingKind::Penetration(damage_type))
            .map(|e| e.value)
            .sum();
        let resistance = defender.resistance(damage_type) - penetration;
        amounts.scale(damage_type, (1.0 - resistance).max(0.0));
    }
}

fn post_hit(
    embossings: &[Arc<EmbossingDefinition>],
    ctx: &mut ResolveContext<'_>,
    resolution: &mut Resolution,
) {
    let total = f64::from(resolution.damage_per_target());
    let hits = f64::from(resolution.hits);

    let mut life = 0.0;
    let mut mana = 0.0;
    let mut guard = 0.0;

    for embossing in embossings {
        let value = embossing.value;
        match embossing.kind {
            EmbossingKind::Leech => life += value * total,
            EmbossingKind::LifeOnHit => life += value * hits,
            EmbossingKind::ManaOnHit => mana += value * hits,
            EmbossingKind::EnergyOnPlay => mana += value,
            EmbossingKind::GuardOnPlay => guard += value + embossing.secondary_or(0.0) * total,
            EmbossingKind::Ailment { status, duration } => {
                let magnitude =
                    floor_amount(embossing.secondary_or(f64::from(ctx.config.default_ailment_magnitude)));
                for _ in 0..resolution.hits {
                    if ctx.rng.roll(value) {
                        resolution.ailments.push(AilmentApplication {
                            status,
                            magnitude,
                            duration,
                        });
                    }
                }
            }
            EmbossingKind::StackAdjustment(counter) => {
                let delta = CounterDelta::new(value.round() as i32, embossing.secondary_or(0.0));
                resolution.stack_adjustments.push((counter, delta));
            }
            EmbossingKind::CleanseOnPlay(status) => resolution.cleanses.push(status),
            _ => {}
        }
    }

    resolution.life_gained = floor_amount(life);
    resolution.mana_gained = floor_amount(mana);
    resolution.guard_gained = floor_amount(guard);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{EmbossingCategory, WeaponScaling, WeaponType};
    use crate::config::CombatConfig;
    use crate::env::{CombatRng, StatSnapshot};

    /// Returns the same raw value forever. 0 rolls every chance, `u32::MAX`
    /// rolls none.
    struct Fixed(u32);

    impl CombatRng for Fixed {
        fn next_u32(&mut self) -> u32 {
            self.0
        }
    }

    fn emboss(id: &str, kind: EmbossingKind, value: f64) -> Arc<EmbossingDefinition> {
        Arc::new(EmbossingDefinition::new(id, EmbossingCategory::Damage, kind, value))
    }

    fn instance(card: CardDefinition, embossings: Vec<Arc<EmbossingDefinition>>) -> CardInstance {
        let mut instance = CardInstance::new(Arc::new(card.with_slots(6)));
        for e in embossings {
            instance.attach(e).unwrap();
        }
        instance
    }

    fn run(
        card: &CardInstance,
        caster: &StatSnapshot,
        defender: Option<&StatSnapshot>,
        raw: u32,
    ) -> Resolution {
        let config = CombatConfig::default();
        let mut rng = Fixed(raw);
        let mut ctx = ResolveContext::new(&config, &mut rng);
        resolve(
            card,
            caster,
            defender.map(|d| d as &dyn StatProvider),
            &mut ctx,
        )
    }

    #[test]
    fn worked_example_floors_after_increased() {
        let card = instance(
            CardDefinition::attack("slash", "Slash", 8, 1, DamageType::Physical)
                .with_damage_scaling(AttributeScaling::strength(0.5)),
            vec![
                emboss("edge", EmbossingKind::FlatDamage, 2.0),
                emboss("fury", EmbossingKind::IncreasedDamage, 0.35),
            ],
        );
        let caster = StatSnapshot::builder().strength(30).build();
        let result = run(&card, &caster, None, 0);
        assert_eq!(result.damage.get(DamageType::Physical), 33);
        assert_eq!(result.targets, 1);
        assert_eq!(result.hits, 1);
    }

    #[test]
    fn weapon_scaling_adds_matching_class() {
        let card = instance(
            CardDefinition::attack("shot", "Shot", 3, 1, DamageType::Physical)
                .with_weapon_scaling(WeaponScaling::PROJECTILE),
            vec![],
        );
        let archer = StatSnapshot::builder().weapon(WeaponType::Bow, 6.0).build();
        let brawler = StatSnapshot::builder().weapon(WeaponType::Mace, 6.0).build();
        assert_eq!(run(&card, &archer, None, 0).damage.total(), 9);
        assert_eq!(run(&card, &brawler, None, 0).damage.total(), 3);
    }

    #[test]
    fn conversion_then_resistance() {
        let card = instance(
            CardDefinition::attack("brand", "Brand", 20, 1, DamageType::Physical),
            vec![emboss(
                "ember",
                EmbossingKind::Conversion {
                    from: DamageType::Physical,
                    to: DamageType::Fire,
                },
                0.5,
            )],
        );
        let caster = StatSnapshot::default();
        let defender = StatSnapshot::builder()
            .max_hp(100)
            .resistance(DamageType::Physical, 0.5)
            .build();
        let result = run(&card, &caster, Some(&defender), 0);
        assert_eq!(result.damage.get(DamageType::Physical), 5);
        assert_eq!(result.damage.get(DamageType::Fire), 10);
        assert_eq!(result.damage.total(), 15);
    }

    #[test]
    fn later_conversions_take_only_what_is_left() {
        let to_fire = EmbossingKind::Conversion {
            from: DamageType::Physical,
            to: DamageType::Fire,
        };
        let to_cold = EmbossingKind::Conversion {
            from: DamageType::Physical,
            to: DamageType::Cold,
        };
        let card = instance(
            CardDefinition::attack("prism", "Prism", 20, 1, DamageType::Physical),
            vec![emboss("a", to_fire, 0.75), emboss("b", to_cold, 0.5)],
        );
        let result = run(&card, &StatSnapshot::default(), None, 0);
        assert_eq!(result.damage.get(DamageType::Fire), 15);
        assert_eq!(result.damage.get(DamageType::Cold), 5);
        assert_eq!(result.damage.get(DamageType::Physical), 0);
    }

    #[test]
    fn extra_as_adds_without_removing() {
        let card = instance(
            CardDefinition::attack("spark", "Spark", 10, 1, DamageType::Physical),
            vec![emboss(
                "static",
                EmbossingKind::ExtraAs {
                    from: DamageType::Physical,
                    to: DamageType::Lightning,
                },
                0.3,
            )],
        );
        let result = run(&card, &StatSnapshot::default(), None, 0);
        assert_eq!(result.damage.get(DamageType::Physical), 10);
        assert_eq!(result.damage.get(DamageType::Lightning), 3);
    }

    #[test]
    fn extra_types_split_evenly() {
        let card = instance(
            CardDefinition::attack("storm", "Storm", 9, 1, DamageType::Cold)
                .with_extra_damage_type(DamageType::Lightning)
                .with_extra_damage_type(DamageType::Fire),
            vec![],
        );
        let result = run(&card, &StatSnapshot::default(), None, 0);
        assert_eq!(result.damage.get(DamageType::Cold), 3);
        assert_eq!(result.damage.get(DamageType::Lightning), 3);
        assert_eq!(result.damage.get(DamageType::Fire), 3);
    }

    #[test]
    fn critical_uses_secondary_multiplier() {
        let crit = Arc::new(
            EmbossingDefinition::new(
                "keen",
                EmbossingCategory::Damage,
                EmbossingKind::CriticalStrike,
                0.5,
            )
            .with_secondary(2.0),
        );
        let card = instance(
            CardDefinition::attack("stab", "Stab", 10, 1, DamageType::Physical),
            vec![crit],
        );
        let hit = run(&card, &StatSnapshot::default(), None, 0);
        assert!(hit.critical);
        assert_eq!(hit.damage.total(), 20);

        let miss = run(&card, &StatSnapshot::default(), None, u32::MAX);
        assert!(!miss.critical);
        assert_eq!(miss.damage.total(), 10);
    }

    #[test]
    fn more_and_less_apply_in_sequence() {
        let card = instance(
            CardDefinition::attack("maul", "Maul", 10, 1, DamageType::Physical),
            vec![
                emboss("more", EmbossingKind::MoreDamage, 0.5),
                emboss("less", EmbossingKind::LessDamage, 0.2),
            ],
        );
        // 10 × 1.5 × 0.8
        assert_eq!(run(&card, &StatSnapshot::default(), None, 0).damage.total(), 12);
    }

    #[test]
    fn execute_needs_a_wounded_defender() {
        let card = instance(
            CardDefinition::attack("finish", "Finish", 10, 1, DamageType::Physical),
            vec![emboss("exec", EmbossingKind::Execute, 1.0)],
        );
        let caster = StatSnapshot::default();
        let healthy = StatSnapshot::builder().max_hp(100).build();
        let wounded = StatSnapshot::builder().max_hp(100).hp(20).build();
        assert_eq!(run(&card, &caster, Some(&healthy), 0).damage.total(), 10);
        assert_eq!(run(&card, &caster, Some(&wounded), 0).damage.total(), 20);
        assert_eq!(run(&card, &caster, None, 0).damage.total(), 10);
    }

    #[test]
    fn attribute_scaling_embossing_counts_breakpoints() {
        let card = instance(
            CardDefinition::attack("bash", "Bash", 10, 1, DamageType::Physical),
            vec![emboss("brute", EmbossingKind::StrengthScaling, 0.1)],
        );
        let caster = StatSnapshot::builder().strength(120).build();
        // 2 breakpoints × 10%
        assert_eq!(run(&card, &caster, None, 0).damage.total(), 12);
    }

    #[test]
    fn combo_scaling_reads_context() {
        let card = instance(
            CardDefinition::attack("flurry", "Flurry", 10, 1, DamageType::Physical),
            vec![emboss("chain", EmbossingKind::ComboScaling, 0.25)],
        );
        let config = CombatConfig::default();
        let mut rng = Fixed(0);
        let mut ctx = ResolveContext::new(&config, &mut rng).with_combo_count(2);
        let result = resolve(&card, &StatSnapshot::default(), None, &mut ctx);
        assert_eq!(result.damage.total(), 15);
    }

    #[test]
    fn area_cards_fan_out_and_duplicates_repeat() {
        let card = instance(
            CardDefinition::attack("nova", "Nova", 6, 2, DamageType::Arcane).with_area(3),
            vec![
                emboss("wide", EmbossingKind::ExtraTargets, 1.0),
                emboss("echo", EmbossingKind::Duplicate, 0.5),
                emboss("area", EmbossingKind::IncreasedAreaDamage, 0.5),
            ],
        );
        let result = run(&card, &StatSnapshot::default(), None, 0);
        assert_eq!(result.targets, 4);
        assert_eq!(result.hits, 2);
        assert_eq!(result.damage.total(), 9);
        assert_eq!(result.damage_per_target(), 18);
    }

    #[test]
    fn penetration_offsets_resistance() {
        let card = instance(
            CardDefinition::attack("pierce", "Pierce", 10, 1, DamageType::Cold),
            vec![emboss("drill", EmbossingKind::Penetration(DamageType::Cold), 0.25)],
        );
        let defender = StatSnapshot::builder()
            .max_hp(50)
            .resistance(DamageType::Cold, 0.75)
            .build();
        let result = run(&card, &StatSnapshot::default(), Some(&defender), 0);
        assert_eq!(result.damage.total(), 5);
    }

    #[test]
    fn resistance_above_one_zeroes_damage() {
        let card = instance(
            CardDefinition::attack("singe", "Singe", 10, 1, DamageType::Fire),
            vec![],
        );
        let defender = StatSnapshot::builder()
            .max_hp(50)
            .resistance(DamageType::Fire, 1.5)
            .build();
        assert_eq!(
            run(&card, &StatSnapshot::default(), Some(&defender), 0).damage.total(),
            0
        );
    }

    #[test]
    fn negative_resistance_amplifies_damage() {
        let card = instance(
            CardDefinition::attack("frost", "Frost", 10, 1, DamageType::Cold),
            vec![],
        );
        let defender = StatSnapshot::builder()
            .max_hp(50)
            .resistance(DamageType::Cold, -0.5)
            .build();
        let result = run(&card, &StatSnapshot::default(), Some(&defender), 0);
        assert_eq!(result.damage.get(DamageType::Cold), 15);
    }

    #[test]
    fn negative_attribute_scaling_cannot_cancel_flat_bonuses() {
        let card = instance(
            CardDefinition::attack("stumble", "Stumble", 5, 1, DamageType::Physical)
                .with_damage_scaling(AttributeScaling::strength(-1.0)),
            vec![emboss("spike", EmbossingKind::FlatDamage, 10.0)],
        );
        let caster = StatSnapshot::builder().strength(10).build();
        // max(0, 5 - 10) + 10
        assert_eq!(run(&card, &caster, None, 0).damage.total(), 10);
    }

    #[test]
    fn post_hit_hooks_read_final_total() {
        let guard_on_play = Arc::new(
            EmbossingDefinition::new(
                "bulwark",
                EmbossingCategory::Defensive,
                EmbossingKind::GuardOnPlay,
                2.0,
            )
            .with_secondary(0.5),
        );
        let card = instance(
            CardDefinition::attack("drain", "Drain", 10, 1, DamageType::Physical),
            vec![
                emboss("leech", EmbossingKind::Leech, 0.2),
                emboss("vamp", EmbossingKind::LifeOnHit, 1.0),
                emboss("siphon", EmbossingKind::ManaOnHit, 1.0),
                guard_on_play,
            ],
        );
        let result = run(&card, &StatSnapshot::default(), None, 0);
        assert_eq!(result.life_gained, 3);
        assert_eq!(result.mana_gained, 1);
        assert_eq!(result.guard_gained, 7);
    }

    #[test]
    fn ailments_roll_per_hit() {
        let venom = Arc::new(
            EmbossingDefinition::new(
                "venom",
                EmbossingCategory::Ailment,
                EmbossingKind::Ailment {
                    status: StatusKind::Poisoned,
                    duration: 3,
                },
                0.5,
            )
            .with_secondary(4.0),
        );
        let card = instance(
            CardDefinition::attack("fang", "Fang", 4, 1, DamageType::Poison),
            vec![venom, emboss("echo", EmbossingKind::Duplicate, 1.0)],
        );
        let result = run(&card, &StatSnapshot::default(), None, 0);
        assert_eq!(result.ailments.len(), 2);
        assert_eq!(
            result.ailments[0],
            AilmentApplication {
                status: StatusKind::Poisoned,
                magnitude: 4,
                duration: 3
            }
        );

        let result = run(&card, &StatSnapshot::default(), None, u32::MAX);
        assert!(result.ailments.is_empty());
    }

    #[test]
    fn guard_pipeline_ignores_more_multipliers() {
        let card = instance(
            CardDefinition::guard("brace", "Brace", 5, 1)
                .with_guard_scaling(AttributeScaling::dexterity(0.2)),
            vec![
                emboss("plate", EmbossingKind::FlatGuard, 3.0),
                emboss("wall", EmbossingKind::IncreasedGuard, 0.5),
                emboss("more", EmbossingKind::MoreDamage, 1.0),
            ],
        );
        let caster = StatSnapshot::builder().dexterity(10).build();
        let result = run(&card, &caster, None, 0);
        // (5 + 2 + 3) × 1.5
        assert_eq!(result.guard, 15);
        assert_eq!(result.damage.total(), 0);
    }

    #[test]
    fn negative_guard_scaling_clamps_before_flat_guard() {
        let card = instance(
            CardDefinition::guard("falter", "Falter", 4, 1)
                .with_guard_scaling(AttributeScaling::dexterity(-1.0)),
            vec![emboss("plate", EmbossingKind::FlatGuard, 6.0)],
        );
        let caster = StatSnapshot::builder().dexterity(10).build();
        // max(0, 4 - 10) + 6
        assert_eq!(run(&card, &caster, None, 0).guard, 6);
    }

    #[test]
    fn ability_damage_uses_percent_of_max_hp() {
        let target = StatSnapshot::builder()
            .max_hp(200)
            .resistance(DamageType::Fire, 0.5)
            .build();
        let bundle = resolve_ability_damage(DamageType::Fire, 10, 0.1, &target);
        assert_eq!(bundle.get(DamageType::Fire), 15);
    }
}
