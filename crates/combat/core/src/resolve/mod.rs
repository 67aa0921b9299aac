//! Card resolution: requirement gate, mana cost, damage and guard.
//!
//! Every function here is pure apart from random draws on the context's
//! [`CombatRng`](crate::env::CombatRng). Applying a [`Resolution`] to
//! combatants is the job of [`play_card`](crate::play::play_card).

mod amounts;
mod context;
mod cost;
mod damage;
mod requirements;
mod stack;

pub use amounts::{DamageBundle, TypedAmounts};
pub use context::ResolveContext;
pub use cost::effective_cost;
pub use damage::{
    AilmentApplication, Resolution, resolve, resolve_ability_damage, resolve_guard,
};
pub use requirements::{PlayError, is_playable};
pub use stack::{Modifier, ModifierStack};
