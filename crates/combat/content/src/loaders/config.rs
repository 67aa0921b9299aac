//! Combat configuration loader.

use std::path::Path;

use combat_core::CombatConfig;

use crate::loaders::{LoadResult, read_file};

/// Loader for combat configuration from TOML files.
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load config data from a TOML file.
    ///
    /// Keys missing from the file keep their defaults.
    pub fn load(path: &Path) -> LoadResult<CombatConfig> {
        let content = read_file(path)?;
        let config: CombatConfig = toml::from_str(&content)
            .map_err(|e| anyhow::anyhow!("Failed to parse config TOML: {}", e))?;

        if config.attribute_breakpoint == 0 {
            anyhow::bail!("attribute_breakpoint must be positive");
        }

        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;

    #[test]
    fn partial_file_keeps_defaults() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "max_trigger_depth = 3").unwrap();
        writeln!(file, "default_crit_multiplier = 2.0").unwrap();

        let config = ConfigLoader::load(file.path()).unwrap();
        assert_eq!(config.max_trigger_depth, 3);
        assert_eq!(config.default_crit_multiplier, 2.0);
        assert_eq!(
            config.attribute_breakpoint,
            CombatConfig::DEFAULT_ATTRIBUTE_BREAKPOINT
        );
    }

    #[test]
    fn zero_breakpoint_is_rejected() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "attribute_breakpoint = 0").unwrap();
        assert!(ConfigLoader::load(file.path()).is_err());
    }
}
