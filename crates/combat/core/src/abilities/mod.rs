//! Combatant abilities: trigger evaluation, cooldowns and stack counters.

mod engine;
mod error;
mod stacks;

pub use engine::{OutgoingEffect, TriggerEngine, TriggerReport};
pub use error::AbilityError;
pub use stacks::{StackCounter, StackCounters};
