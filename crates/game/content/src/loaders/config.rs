//! Game configuration loader.

use std::path::Path;

use game_core::GameConfig;

use crate::loaders::{LoadResult, read_file};

/// Loader for game configuration from TOML files.
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load config data from a TOML file.
    ///
    /// Missing keys fall back to [`GameConfig::default`]. A physics step
    /// that is not finite and positive is rejected.
    pub fn load(path: &Path) -> LoadResult<GameConfig> {
        let content = read_file(path)?;
        Self::parse(&content)
    }

    /// Parse config data from a TOML string.
    pub fn parse(content: &str) -> LoadResult<GameConfig> {
        let config: GameConfig = toml::from_str(content)
            .map_err(|e| anyhow::anyhow!("Failed to parse config TOML: {}", e))?;

        anyhow::ensure!(
            config.fixed_timestep.is_finite() && config.fixed_timestep > 0.0,
            "fixed_timestep must be finite and positive (got {})",
            config.fixed_timestep
        );
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn partial_file_keeps_defaults() {
        let config = ConfigLoader::parse(
            r#"
            contact_radius = 48.0

            [player]
            health_total = 30
            "#,
        )
        .unwrap();

        assert_eq!(config.contact_radius, 48.0);
        assert_eq!(config.player.health_total, 30);
        assert_eq!(
            config.player.damage_taken,
            game_core::PlayerConfig::DEFAULT_DAMAGE_TAKEN
        );
        assert_eq!(config.fixed_timestep, GameConfig::DEFAULT_FIXED_TIMESTEP);
    }

    #[test]
    fn rejects_zero_timestep() {
        let err = ConfigLoader::parse("fixed_timestep = 0.0").unwrap_err();
        assert!(err.to_string().contains("fixed_timestep"));
    }

    #[test]
    fn rejects_infinite_timestep() {
        let err = ConfigLoader::parse("fixed_timestep = inf").unwrap_err();
        assert!(err.to_string().contains("fixed_timestep"));
    }

    #[test]
    fn load_reads_from_disk() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "fixed_timestep = 0.01").unwrap();

        let config = ConfigLoader::load(file.path()).unwrap();

        assert_eq!(config.fixed_timestep, 0.01);
    }

    #[test]
    fn missing_file_names_the_path() {
        let err = ConfigLoader::load(Path::new("/nonexistent/config.toml")).unwrap_err();
        assert!(err.to_string().contains("/nonexistent/config.toml"));
    }
}
