//! Common error infrastructure for combat-core.
//!
//! Domain-specific errors (`PlayError`, `AbilityError`, `CardError`,
//! `OracleError`) live next to the operations that produce them. This module
//! holds the shared severity classification, the [`GameError`] trait they all
//! implement, and the [`CombatError`] umbrella used by the card play flow.
//!
//! Every error here is recoverable from the caller's point of view: a rejected
//! operation leaves combat state untouched.

use crate::abilities::AbilityError;
use crate::catalog::CardError;
use crate::env::OracleError;
use crate::resolve::PlayError;

/// Severity level of an error, used for categorization and recovery strategies.
///
/// - **Recoverable**: the action may succeed later (cooldown, energy, mana)
/// - **Validation**: the request itself is invalid for the current inputs
/// - **Internal**: unexpected state inconsistency
/// - **Fatal**: content data is broken and should have failed at load time
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ErrorSeverity {
    Recoverable,
    Validation,
    Internal,
    Fatal,
}

impl ErrorSeverity {
    /// Returns a human-readable description of this severity level.
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Recoverable => "recoverable",
            Self::Validation => "validation",
            Self::Internal => "internal",
            Self::Fatal => "fatal",
        }
    }

    /// Returns true if this error is potentially recoverable.
    pub const fn is_recoverable(&self) -> bool {
        matches!(self, Self::Recoverable)
    }

    /// Returns true if this error indicates a content or logic bug.
    pub const fn is_internal(&self) -> bool {
        matches!(self, Self::Internal | Self::Fatal)
    }
}

/// Common trait for all combat-core errors.
///
/// # Implementation Guidelines
///
/// - Use `#[derive(thiserror::Error)]` for Display/Error impl
/// - Classify severity based on recoverability, not impact
/// - Error codes are stable SCREAMING_SNAKE identifiers for UI and tests
pub trait GameError: core::fmt::Display + core::fmt::Debug {
    /// Returns the severity level of this error.
    fn severity(&self) -> ErrorSeverity;

    /// Returns a static string identifier for this error variant.
    fn error_code(&self) -> &'static str {
        core::any::type_name::<Self>()
    }
}

/// Any error surfaced by the combat core.
#[derive(Clone, Debug, PartialEq, thiserror::Error)]
pub enum CombatError {
    #[error("card is not playable: {0}")]
    Play(#[from] PlayError),

    #[error("ability rejected: {0}")]
    Ability(#[from] AbilityError),

    #[error("card instance rejected: {0}")]
    Card(#[from] CardError),

    #[error("catalog lookup failed: {0}")]
    Oracle(#[from] OracleError),
}

impl GameError for CombatError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            CombatError::Play(e) => e.severity(),
            CombatError::Ability(e) => e.severity(),
            CombatError::Card(e) => e.severity(),
            CombatError::Oracle(e) => e.severity(),
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            CombatError::Play(e) => e.error_code(),
            CombatError::Ability(e) => e.error_code(),
            CombatError::Card(e) => e.error_code(),
            CombatError::Oracle(e) => e.error_code(),
        }
    }
}
