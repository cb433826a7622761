//! Enemy roster loader.
//!
//! Loads the enemies to spawn from a RON list of [`SpawnSpec`] entries.

use std::path::Path;

use crate::SpawnSpec;
use crate::loaders::{LoadResult, read_file};

/// Loader for enemy rosters from RON files.
pub struct RosterLoader;

impl RosterLoader {
    /// Load a roster from a RON file.
    ///
    /// RON format: `[(name: "...", position: (x, y), config: (kind: slime, ...)), ...]`
    pub fn load(path: &Path) -> LoadResult<Vec<SpawnSpec>> {
        let content = read_file(path)?;
        Self::parse(&content)
    }

    /// Parse a roster from a RON string.
    ///
    /// Entries with non-positive slime timings are rejected, since a zero
    /// delay would flip state on every frame.
    pub fn parse(content: &str) -> LoadResult<Vec<SpawnSpec>> {
        let roster: Vec<SpawnSpec> = ron::from_str(content)
            .map_err(|e| anyhow::anyhow!("Failed to parse roster RON: {}", e))?;

        for spec in &roster {
            anyhow::ensure!(
                spec.config.move_delay > 0.0 && spec.config.move_length > 0.0,
                "enemy '{}' has non-positive hop timing (delay {}, length {})",
                spec.name,
                spec.config.move_delay,
                spec.config.move_length
            );
        }

        tracing::debug!(count = roster.len(), "roster parsed");
        Ok(roster)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use game_core::{EnemyConfig, EnemyKind};
    use glam::Vec2;

    #[test]
    fn parses_mixed_roster() {
        let roster = RosterLoader::parse(
            r#"[
                (
                    name: "slime_a",
                    position: (120.0, 40.0),
                    config: (kind: slime, move_delay: 1.0, move_length: 0.5),
                ),
                (
                    name: "grunt",
                    position: (-80.0, 0.0),
                ),
            ]"#,
        )
        .unwrap();

        assert_eq!(roster.len(), 2);
        assert_eq!(roster[0].config.kind, EnemyKind::Slime);
        assert_eq!(roster[0].position(), Vec2::new(120.0, 40.0));
        assert_eq!(
            roster[0].config.health_total,
            EnemyConfig::DEFAULT_HEALTH_TOTAL
        );
        assert_eq!(roster[1].config, EnemyConfig::default());
    }

    #[test]
    fn rejects_zero_hop_timing() {
        let err = RosterLoader::parse(
            r#"[(name: "broken", position: (0.0, 0.0), config: (kind: slime, move_delay: 0.0))]"#,
        )
        .unwrap_err();

        assert!(err.to_string().contains("broken"));
    }

    #[test]
    fn reports_syntax_errors() {
        let err = RosterLoader::parse("[(name: ").unwrap_err();
        assert!(err.to_string().contains("roster"));
    }
}
