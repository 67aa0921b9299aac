//! Modifier catalog data model: cards, embossings and abilities.
//!
//! Everything here is immutable once loaded. Definitions are authored
//! externally (see the `combat-content` crate), shared through `Arc`, and
//! looked up through [`ModifierCatalog`](crate::env::ModifierCatalog).

pub mod ability;
pub mod card;
pub mod embossing;
pub mod ids;
pub mod instance;
pub mod types;

pub use ability::{
    AbilityDefinition, AbilityEffect, CounterDelta, StackKind, TargetSelector, TriggerKind,
};
pub use card::{CardDefinition, CardEffect, ComboInfo, EffectTarget, Requirements};
pub use embossing::{EmbossingCategory, EmbossingDefinition, EmbossingKind, Rarity};
pub use ids::{AbilityId, CardId, EmbossingId, ModifierId};
pub use instance::{CardError, CardInstance, CardInstanceSpec};
pub use types::{
    AttributeKind, AttributeScaling, DamageType, WeaponClass, WeaponScaling, WeaponType,
    WeaponTypes,
};
