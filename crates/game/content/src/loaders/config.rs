//! Progression tuning loader.

use std::path::Path;

use progression_core::ProgressionConfig;

use crate::loaders::{LoadResult, read_file};

/// Loader for progression tuning from TOML files.
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load tuning data from a TOML file.
    ///
    /// Every table is optional; missing keys keep their built-in defaults.
    pub fn load(path: &Path) -> LoadResult<ProgressionConfig> {
        let content = read_file(path)?;
        Self::parse(&content)
    }

    pub fn parse(content: &str) -> LoadResult<ProgressionConfig> {
        let config: ProgressionConfig = toml::from_str(content)
            .map_err(|e| anyhow::anyhow!("Failed to parse config TOML: {}", e))?;

        if config.max_level == 0 {
            anyhow::bail!("max_level must be at least 1");
        }
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use progression_core::Multiplier;

    #[test]
    fn empty_document_keeps_defaults() {
        let config = ConfigLoader::parse("").unwrap();
        assert_eq!(config, ProgressionConfig::default());
    }

    #[test]
    fn overrides_nested_tables() {
        let config = ConfigLoader::parse(
            r#"
            max_level = 150
            global_xp = 20000

            [combo]
            window_ticks = 300

            [cap_proximity]
            far_bonus = 10000
            "#,
        )
        .unwrap();

        assert_eq!(config.max_level, 150);
        assert_eq!(config.global_xp, Multiplier::from_percent(200));
        assert_eq!(config.combo.window_ticks, 300);
        assert_eq!(config.combo.max, ProgressionConfig::default().combo.max);
        assert_eq!(config.cap_proximity.far_bonus, Multiplier::ONE);
    }

    #[test]
    fn rejects_zero_max_level() {
        assert!(ConfigLoader::parse("max_level = 0").is_err());
    }
}
