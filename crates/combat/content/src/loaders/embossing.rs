//! Embossing catalog loader.

use std::path::Path;

use combat_core::{EmbossingDefinition, EmbossingKind};
use serde::{Deserialize, Serialize};

use crate::loaders::{LoadResult, read_file};

/// Embossing catalog structure for RON files.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EmbossingCatalog {
    pub embossings: Vec<EmbossingDefinition>,
}

/// Loader for embossing definitions from RON files.
pub struct EmbossingLoader;

impl EmbossingLoader {
    /// Load embossing definitions from a RON file.
    ///
    /// Chance-based embossings must carry a probability in `[0, 1]`, and
    /// conversions a fraction in the same range.
    pub fn load(path: &Path) -> LoadResult<Vec<EmbossingDefinition>> {
        let content = read_file(path)?;
        let catalog: EmbossingCatalog = ron::from_str(&content)
            .map_err(|e| anyhow::anyhow!("Failed to parse embossing catalog RON: {}", e))?;

        for embossing in &catalog.embossings {
            let bounded = embossing.kind.rolls()
                || matches!(embossing.kind, EmbossingKind::Conversion { .. });
            if bounded && !(0.0..=1.0).contains(&embossing.value) {
                anyhow::bail!(
                    "Embossing '{}' value {} outside [0, 1]",
                    embossing.id.as_str(),
                    embossing.value
                );
            }
            if !embossing.value.is_finite() || !embossing.mana_cost_multiplier.is_finite() {
                anyhow::bail!("Embossing '{}' has a non-finite value", embossing.id.as_str());
            }
        }

        Ok(catalog.embossings)
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use combat_core::{DamageType, Rarity, StatusKind};

    use super::*;

    fn write(content: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file
    }

    #[test]
    fn parses_struct_and_tuple_kinds() {
        let file = write(
            r#"(
                embossings: [
                    (
                        id: "ember_brand",
                        name: "Ember Brand",
                        category: Conversion,
                        rarity: Rare,
                        kind: Conversion(from: Physical, to: Fire),
                        value: 0.5,
                    ),
                    (
                        id: "venom_edge",
                        name: "Venom Edge",
                        category: Ailment,
                        kind: Ailment(status: Poisoned, duration: 3),
                        value: 0.25,
                        secondary: Some(2.0),
                    ),
                ],
            )"#,
        );

        let embossings = EmbossingLoader::load(file.path()).unwrap();
        assert_eq!(
            embossings[0].kind,
            EmbossingKind::Conversion {
                from: DamageType::Physical,
                to: DamageType::Fire
            }
        );
        assert_eq!(embossings[0].rarity, Rarity::Rare);
        assert_eq!(
            embossings[1].kind,
            EmbossingKind::Ailment {
                status: StatusKind::Poisoned,
                duration: 3
            }
        );
        assert_eq!(embossings[1].secondary, Some(2.0));
        assert_eq!(embossings[1].mana_cost_multiplier, 0.0);
    }

    #[test]
    fn rejects_chances_above_one() {
        let file = write(
            r#"(embossings: [(id: "lucky", name: "Lucky", category: Damage,
                kind: CriticalStrike, value: 1.5)])"#,
        );
        assert!(EmbossingLoader::load(file.path()).is_err());
    }
}
