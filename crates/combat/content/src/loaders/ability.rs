//! Ability catalog loader.

use std::path::Path;

use combat_core::{AbilityDefinition, TriggerKind};
use serde::{Deserialize, Serialize};

use crate::loaders::{LoadResult, read_file};

/// Ability catalog structure for RON files.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AbilityCatalog {
    pub abilities: Vec<AbilityDefinition>,
}

/// Loader for ability definitions from RON files.
pub struct AbilityLoader;

impl AbilityLoader {
    /// Load ability definitions from a RON file.
    ///
    /// Phase-gate abilities must declare a threshold in `[0, 1]`.
    pub fn load(path: &Path) -> LoadResult<Vec<AbilityDefinition>> {
        let content = read_file(path)?;
        let catalog: AbilityCatalog = ron::from_str(&content)
            .map_err(|e| anyhow::anyhow!("Failed to parse ability catalog RON: {}", e))?;

        for ability in &catalog.abilities {
            if ability.trigger != TriggerKind::PhaseGate {
                continue;
            }
            match ability.phase_threshold {
                Some(t) if (0.0..=1.0).contains(&t) => {}
                Some(t) => anyhow::bail!(
                    "Phase gate '{}' threshold {} outside [0, 1]",
                    ability.id.as_str(),
                    t
                ),
                None => anyhow::bail!("Phase gate '{}' has no threshold", ability.id.as_str()),
            }
        }

        Ok(catalog.abilities)
    }
}
