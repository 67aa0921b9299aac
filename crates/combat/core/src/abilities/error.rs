use crate::catalog::AbilityId;
use crate::error::{ErrorSeverity, GameError};

/// Why an ability could not fire.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum AbilityError {
    #[error("{ability} needs {required} energy, {available} available")]
    InsufficientEnergy {
        ability: AbilityId,
        required: u32,
        available: u32,
    },

    #[error("{ability} is on cooldown for {remaining} more turns")]
    OnCooldown { ability: AbilityId, remaining: u32 },

    #[error("combatant has no ability {0}")]
    AbilityNotFound(AbilityId),

    #[error("combatant already carries {capacity} abilities")]
    SlotsFull { capacity: usize },
}

impl GameError for AbilityError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            AbilityError::InsufficientEnergy { .. } | AbilityError::OnCooldown { .. } => {
                ErrorSeverity::Recoverable
            }
            AbilityError::AbilityNotFound(_) | AbilityError::SlotsFull { .. } => {
                ErrorSeverity::Validation
            }
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            AbilityError::InsufficientEnergy { .. } => "ABILITY_INSUFFICIENT_ENERGY",
            AbilityError::OnCooldown { .. } => "ABILITY_ON_COOLDOWN",
            AbilityError::AbilityNotFound(_) => "ABILITY_NOT_FOUND",
            AbilityError::SlotsFull { .. } => "ABILITY_SLOTS_FULL",
        }
    }
}
