//! Content loaders for reading combat data from files.
//!
//! Each loader turns one file into `combat-core` types;
//! [`ContentFactory`] ties them together and validates references.

pub mod ability;
pub mod card;
pub mod combatant;
pub mod config;
pub mod embossing;
pub mod factory;

pub use ability::AbilityLoader;
pub use card::CardLoader;
pub use combatant::CombatantLoader;
pub use config::ConfigLoader;
pub use embossing::EmbossingLoader;
pub use factory::{CombatContent, ContentFactory};

use std::path::Path;

/// Common result type for loaders.
pub type LoadResult<T> = anyhow::Result<T>;

/// Helper function to read file contents.
pub(crate) fn read_file(path: &Path) -> LoadResult<String> {
    std::fs::read_to_string(path)
        .map_err(|e| anyhow::anyhow!("Failed to read file {}: {}", path.display(), e))
}
