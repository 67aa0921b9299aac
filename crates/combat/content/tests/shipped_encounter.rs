//! Plays the shipped content end to end.

use combat_content::ContentFactory;
use combat_core::{
    AbilityId, CardInstance, CardInstanceSpec, Combatant, DamageType, PcgRng, TriggerEngine,
    play_card,
};

fn factory() -> ContentFactory {
    ContentFactory::new(concat!(env!("CARGO_MANIFEST_DIR"), "/data"))
}

fn instance(content: &combat_content::CombatContent, card: &str, embossings: &[&str]) -> CardInstance {
    CardInstance::from_spec(
        &CardInstanceSpec {
            card: card.into(),
            embossings: embossings.iter().map(|&id| id.into()).collect(),
        },
        &content.catalog,
    )
    .expect("shipped card ids resolve")
}

/// Feint into a chain-flowed lunge: the lunge continues the combo and gains
/// 15% increased damage per combo step.
///
/// ```text
/// feint: 4 + 0.3 × 14           = 8.2   × 0.9 phys res → 7
/// lunge: (8 + 0.6 × 14) × 1.15  = 18.86 × 0.9 phys res → 16
/// ```
#[test]
fn feint_lunge_combo_against_warden() {
    let content = factory().load_all().unwrap();
    let engine = TriggerEngine::new(content.config.clone());
    let mut rng = PcgRng::for_session(2024, 1, 0);

    let hero_stats = content.combatant("hero").unwrap().snapshot();
    let warden_stats = content.combatant("ashen_warden").unwrap().snapshot();
    let mut hero = content.spawn("hero").unwrap();
    let mut warden = content.spawn("ashen_warden").unwrap();

    let feint = instance(&content, "feint", &[]);
    let lunge = instance(&content, "lunge", &["chain_flow"]);

    // ========================================================================
    // Feint opens, spite answers
    // ========================================================================
    let opened = play_card(
        &feint,
        Combatant::new(&mut hero, &hero_stats),
        Some(Combatant::new(&mut warden, &warden_stats)),
        &engine,
        &mut rng,
    )
    .unwrap();
    assert_eq!(opened.resolution.damage.get(DamageType::Physical), 7);
    assert!(!opened.combo_continued);
    assert_eq!(warden.hp, 113);
    assert!(opened.defender_report.has_fired(&AbilityId::new("spite")));

    for outgoing in &opened.defender_report.outgoing {
        engine.deliver(&mut hero, &hero_stats, outgoing);
    }
    assert_eq!(hero.hp, 37);

    // ========================================================================
    // Lunge continues the combo
    // ========================================================================
    let followed = play_card(
        &lunge,
        Combatant::new(&mut hero, &hero_stats),
        Some(Combatant::new(&mut warden, &warden_stats)),
        &engine,
        &mut rng,
    )
    .unwrap();
    assert!(followed.combo_continued);
    assert_eq!(followed.resolution.damage.total(), 16);
    assert_eq!(warden.hp, 97);
    assert_eq!(hero.energy, 2);
    assert!(followed.defender_report.fired.is_empty());
}

/// The hero's fixed stats do not reach the prismatic ray's level gate.
#[test]
fn gated_card_is_rejected_without_cost() {
    let content = factory().load_all().unwrap();
    let engine = TriggerEngine::new(content.config.clone());
    let hero_stats = content.combatant("hero").unwrap().snapshot();
    let mut hero = content.spawn("hero").unwrap();
    let before = hero.clone();

    let ray = instance(&content, "prismatic_ray", &[]);
    let result = play_card(
        &ray,
        Combatant::new(&mut hero, &hero_stats),
        None,
        &engine,
        &mut PcgRng::new(1),
    );
    assert!(result.is_err());
    assert_eq!(hero, before);
}
