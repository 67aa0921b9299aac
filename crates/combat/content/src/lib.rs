//! Data-driven combat content and loaders.
//!
//! Reads the modifier catalog, combatant templates and combat configuration
//! from RON/TOML files:
//! - Cards, embossings and abilities (RON)
//! - Combatant templates (RON)
//! - Combat configuration (TOML)
//!
//! Every cross-reference is checked at load time, so a catalog handed to
//! `combat-core` never produces an unknown-id lookup during resolution.

#[cfg(feature = "loaders")]
pub mod loaders;

#[cfg(feature = "loaders")]
pub use loaders::{
    AbilityLoader, CardLoader, CombatContent, CombatantLoader, ConfigLoader, ContentFactory,
    EmbossingLoader, LoadResult,
};
