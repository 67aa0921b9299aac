//! Environment consumed by the combat core.
//!
//! The resolver and trigger engine never own game data. Everything they read
//! arrives through the traits in this module:
//!
//! - [`StatProvider`]: caster/defender attributes, equipment and resistances
//! - [`ModifierCatalog`]: card, embossing and ability definitions
//! - [`CombatRng`]: the session's seeded random source

mod catalog;
mod combatants;
mod error;
mod rng;
mod stats;

pub use catalog::{CatalogSnapshot, ModifierCatalog};
pub use combatants::CombatantTemplate;
pub use error::OracleError;
pub use rng::{CombatRng, PcgRng, compute_seed};
pub use stats::{
    Attributes, EquippedWeapon, Resistances, StatProvider, StatSnapshot, StatSnapshotBuilder,
};
