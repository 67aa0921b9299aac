//! Content factory for building the combat catalog from data files.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use combat_core::{
    AbilityDefinition, CardDefinition, CatalogSnapshot, CombatConfig, CombatError,
    CombatantState, CombatantTemplate, EmbossingDefinition, ModifierCatalog,
};

use crate::loaders::{
    AbilityLoader, CardLoader, CombatantLoader, ConfigLoader, EmbossingLoader, LoadResult,
};

/// Everything the combat core needs, loaded and cross-checked.
#[derive(Clone, Debug)]
pub struct CombatContent {
    pub config: CombatConfig,
    pub catalog: CatalogSnapshot,
    pub combatants: BTreeMap<String, CombatantTemplate>,
}

impl CombatContent {
    pub fn combatant(&self, id: &str) -> Option<&CombatantTemplate> {
        self.combatants.get(id)
    }

    /// Builds a fresh state for the named combatant.
    pub fn spawn(&self, id: &str) -> LoadResult<CombatantState> {
        let template = self
            .combatant(id)
            .ok_or_else(|| anyhow::anyhow!("Unknown combatant '{}'", id))?;
        CombatantState::from_template(template, &self.catalog)
            .map_err(|e: CombatError| anyhow::anyhow!("Failed to spawn '{}': {}", id, e))
    }
}

/// Content factory that loads all combat content from a data directory.
///
/// # Directory Structure
///
/// ```text
/// data_dir/
/// ├── config.toml       (optional, defaults when absent)
/// ├── cards.ron
/// ├── embossings.ron
/// ├── abilities.ron
/// └── combatants.ron
/// ```
pub struct ContentFactory {
    data_dir: PathBuf,
}

impl ContentFactory {
    /// Creates a new content factory pointing to a data directory.
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
        }
    }

    /// Load combat configuration from `config.toml`, or defaults when the
    /// file does not exist.
    pub fn load_config(&self) -> LoadResult<CombatConfig> {
        let path = self.data_dir.join("config.toml");
        if !path.exists() {
            tracing::info!("No {} found, using default combat config", path.display());
            return Ok(CombatConfig::default());
        }
        ConfigLoader::load(&path)
    }

    /// Load card definitions from `cards.ron`.
    pub fn load_cards(&self) -> LoadResult<Vec<CardDefinition>> {
        CardLoader::load(&self.data_dir.join("cards.ron"))
    }

    /// Load embossing definitions from `embossings.ron`.
    pub fn load_embossings(&self) -> LoadResult<Vec<EmbossingDefinition>> {
        EmbossingLoader::load(&self.data_dir.join("embossings.ron"))
    }

    /// Load ability definitions from `abilities.ron`.
    pub fn load_abilities(&self) -> LoadResult<Vec<AbilityDefinition>> {
        AbilityLoader::load(&self.data_dir.join("abilities.ron"))
    }

    /// Load combatant templates from `combatants.ron`.
    pub fn load_combatants(&self) -> LoadResult<Vec<CombatantTemplate>> {
        CombatantLoader::load(&self.data_dir.join("combatants.ron"))
    }

    /// Load the modifier catalog: cards, embossings and abilities.
    pub fn load_catalog(&self) -> LoadResult<CatalogSnapshot> {
        let catalog = CatalogSnapshot::from_definitions(
            self.load_cards()?,
            self.load_embossings()?,
            self.load_abilities()?,
        )
        .map_err(|e| anyhow::anyhow!("Invalid catalog in {}: {}", self.data_dir.display(), e))?;

        let (cards, embossings, abilities) = catalog.counts();
        tracing::info!(
            "Loaded catalog: {} cards, {} embossings, {} abilities",
            cards,
            embossings,
            abilities
        );
        Ok(catalog)
    }

    /// Load everything and check that every combatant's abilities exist.
    ///
    /// A dangling ability id fails the whole load with the
    /// `UnknownModifierId` it would have caused at spawn time.
    pub fn load_all(&self) -> LoadResult<CombatContent> {
        let config = self.load_config()?;
        let catalog = self.load_catalog()?;

        let mut combatants = BTreeMap::new();
        for template in self.load_combatants()? {
            if template.abilities.len() > CombatConfig::MAX_ABILITIES {
                anyhow::bail!(
                    "Combatant '{}' carries {} abilities, at most {} allowed",
                    template.id,
                    template.abilities.len(),
                    CombatConfig::MAX_ABILITIES
                );
            }
            for ability in &template.abilities {
                catalog.require_ability(ability).map_err(|e| {
                    anyhow::anyhow!("Combatant '{}' references {}", template.id, e)
                })?;
            }
            if combatants.contains_key(&template.id) {
                anyhow::bail!("Duplicate combatant id '{}'", template.id);
            }
            combatants.insert(template.id.clone(), template);
        }
        tracing::info!("Loaded {} combatants", combatants.len());

        Ok(CombatContent {
            config,
            catalog,
            combatants,
        })
    }

    /// Returns the data directory path.
    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }
}
