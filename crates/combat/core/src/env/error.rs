//! Oracle access errors.

use crate::catalog::ModifierId;
use crate::error::{ErrorSeverity, GameError};

/// Errors that occur when looking up catalog data.
///
/// A miss means content references an id that was never loaded. Loaders
/// validate references up front, so seeing this during resolution points at
/// a content bug rather than a player mistake.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum OracleError {
    /// Catalog has no definition for the id.
    #[error("unknown modifier id {0}")]
    UnknownModifierId(ModifierId),

    /// Two definitions share an id.
    #[error("duplicate modifier id {0}")]
    DuplicateModifierId(ModifierId),
}

impl GameError for OracleError {
    fn severity(&self) -> ErrorSeverity {
        ErrorSeverity::Fatal
    }

    fn error_code(&self) -> &'static str {
        match self {
            OracleError::UnknownModifierId(_) => "ORACLE_UNKNOWN_MODIFIER_ID",
            OracleError::DuplicateModifierId(_) => "ORACLE_DUPLICATE_MODIFIER_ID",
        }
    }
}
