//! Requirement gate - can this caster play this card right now?

use super::cost::effective_cost;
use crate::catalog::{AttributeKind, CardInstance, WeaponType, WeaponTypes};
use crate::env::StatProvider;
use crate::error::{ErrorSeverity, GameError};

/// Why a card cannot be played.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum PlayError {
    #[error("{attribute} {actual} is below the required {required}")]
    InsufficientAttribute {
        attribute: AttributeKind,
        required: u32,
        actual: u32,
    },

    #[error("equipped weapon {equipped:?} is not one of {allowed:?}")]
    WrongWeaponType {
        equipped: Option<WeaponType>,
        allowed: WeaponTypes,
    },

    #[error("card costs {required} mana, {available} available")]
    InsufficientMana { required: u32, available: u32 },
}

impl GameError for PlayError {
    fn severity(&self) -> ErrorSeverity {
        ErrorSeverity::Recoverable
    }

    fn error_code(&self) -> &'static str {
        match self {
            PlayError::InsufficientAttribute { .. } => "PLAY_INSUFFICIENT_ATTRIBUTE",
            PlayError::WrongWeaponType { .. } => "PLAY_WRONG_WEAPON_TYPE",
            PlayError::InsufficientMana { .. } => "PLAY_INSUFFICIENT_MANA",
        }
    }
}

const GATED_ATTRIBUTES: [AttributeKind; 4] = [
    AttributeKind::Strength,
    AttributeKind::Dexterity,
    AttributeKind::Intelligence,
    AttributeKind::Level,
];

/// Checks attributes, then weapon, then mana. The first failure wins.
///
/// Thresholds come from the card merged with every attached embossing.
pub fn is_playable(card: &CardInstance, stats: &dyn StatProvider) -> Result<(), PlayError> {
    let requirements = card.requirements();

    for attribute in GATED_ATTRIBUTES {
        let required = requirements.threshold(attribute);
        let actual = stats.attribute(attribute);
        if actual < required {
            return Err(PlayError::InsufficientAttribute {
                attribute,
                required,
                actual,
            });
        }
    }

    let equipped = stats.equipped_weapon();
    if !requirements.allows_weapon(equipped) {
        return Err(PlayError::WrongWeaponType {
            equipped,
            allowed: requirements.weapons.unwrap_or_default(),
        });
    }

    let required = effective_cost(card);
    let available = stats.energy();
    if required > available {
        return Err(PlayError::InsufficientMana {
            required,
            available,
        });
    }

    Ok(())
}
