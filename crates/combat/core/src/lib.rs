//! Deterministic combat resolution for a card-based RPG.
//!
//! `combat-core` turns declarative data (a played card, its embossings, the
//! caster's attributes and equipment, a combatant's abilities) into concrete
//! outcomes: typed damage, guard, mana spent, statuses applied and ability
//! cooldown state. It performs no I/O and keeps no global state; catalogs and
//! stats arrive through the traits in [`env`], and mutable combat state is
//! lent in by the caller for the duration of one call.
pub mod abilities;
pub mod catalog;
pub mod config;
pub mod env;
pub mod error;
pub mod play;
pub mod resolve;
pub mod state;
pub mod status;

pub use abilities::{
    AbilityError, OutgoingEffect, StackCounter, StackCounters, TriggerEngine, TriggerReport,
};
pub use catalog::{
    AbilityDefinition, AbilityEffect, AbilityId, AttributeKind, AttributeScaling, CardDefinition,
    CardEffect, CardError, CardId, CardInstance, CardInstanceSpec, ComboInfo, CounterDelta,
    DamageType, EffectTarget, EmbossingCategory, EmbossingDefinition, EmbossingId, EmbossingKind,
    ModifierId, Rarity, Requirements, StackKind, TargetSelector, TriggerKind,
    WeaponClass, WeaponScaling, WeaponType, WeaponTypes,
};
pub use config::CombatConfig;
pub use env::{
    Attributes, CatalogSnapshot, CombatRng, CombatantTemplate, EquippedWeapon, ModifierCatalog,
    OracleError, PcgRng, Resistances, StatProvider, StatSnapshot, StatSnapshotBuilder,
    compute_seed,
};
pub use error::{CombatError, ErrorSeverity, GameError};
pub use play::{Combatant, PlayOutcome, play_card};
pub use resolve::{
    AilmentApplication, DamageBundle, PlayError, Resolution, ResolveContext, effective_cost,
    is_playable, resolve, resolve_ability_damage, resolve_guard,
};
pub use state::{AbilitySlot, ComboTracker, CombatantState, DamageTaken, LiveStats};
pub use status::{StatusEffectInstance, StatusKind, StatusLedger, TickReport};
