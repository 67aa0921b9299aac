//! Card catalog loader.

use std::path::Path;

use combat_core::{CardDefinition, CombatConfig};
use serde::{Deserialize, Serialize};

use crate::loaders::{LoadResult, read_file};

/// Card catalog structure for RON files.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CardCatalog {
    pub cards: Vec<CardDefinition>,
}

/// Loader for card definitions from RON files.
pub struct CardLoader;

impl CardLoader {
    /// Load card definitions from a RON file.
    ///
    /// Rejects cards declaring more embossing slots than any card may hold,
    /// area cards with zero targets, and negative or non-finite scaling
    /// coefficients.
    pub fn load(path: &Path) -> LoadResult<Vec<CardDefinition>> {
        let content = read_file(path)?;
        let catalog: CardCatalog = ron::from_str(&content)
            .map_err(|e| anyhow::anyhow!("Failed to parse card catalog RON: {}", e))?;

        for card in &catalog.cards {
            if usize::from(card.embossing_slots) > CombatConfig::MAX_EMBOSSING_SLOTS {
                anyhow::bail!(
                    "Card '{}' declares {} embossing slots, at most {} allowed",
                    card.id.as_str(),
                    card.embossing_slots,
                    CombatConfig::MAX_EMBOSSING_SLOTS
                );
            }
            if card.area_of_effect && card.aoe_targets == 0 {
                anyhow::bail!("Area card '{}' has no targets", card.id.as_str());
            }
            let coefficients = card
                .damage_scaling
                .pairs()
                .into_iter()
                .chain(card.guard_scaling.pairs());
            for (attribute, coefficient) in coefficients {
                if !coefficient.is_finite() || coefficient < 0.0 {
                    anyhow::bail!(
                        "Card '{}' has invalid {} scaling coefficient {}",
                        card.id.as_str(),
                        attribute,
                        coefficient
                    );
                }
            }
        }

        Ok(catalog.cards)
    }
}
