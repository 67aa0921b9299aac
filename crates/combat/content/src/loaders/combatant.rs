//! Combatant template loader.

use std::path::Path;

use combat_core::CombatantTemplate;
use serde::{Deserialize, Serialize};

use crate::loaders::{LoadResult, read_file};

/// Combatant roster structure for RON files.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CombatantRoster {
    pub combatants: Vec<CombatantTemplate>,
}

/// Loader for combatant templates from RON files.
///
/// Ability references are checked by [`ContentFactory`](super::ContentFactory),
/// which has the catalog at hand.
pub struct CombatantLoader;

impl CombatantLoader {
    pub fn load(path: &Path) -> LoadResult<Vec<CombatantTemplate>> {
        let content = read_file(path)?;
        let roster: CombatantRoster = ron::from_str(&content)
            .map_err(|e| anyhow::anyhow!("Failed to parse combatant roster RON: {}", e))?;

        for template in &roster.combatants {
            if template.max_hp == 0 {
                anyhow::bail!("Combatant '{}' has zero max HP", template.id);
            }
        }

        Ok(roster.combatants)
    }
}
