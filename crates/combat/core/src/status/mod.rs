//! Status effects carried by combatants.
//!
//! A [`StatusLedger`] holds at most one [`StatusEffectInstance`] per
//! [`StatusKind`]; re-applying a kind merges into the existing instance.

mod kind;
mod ledger;

pub use kind::{StackingPolicy, StatusKind, TurnEffect};
pub use ledger::{StatusEffectInstance, StatusLedger, TickReport};
