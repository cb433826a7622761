//! Content factory for loading a whole session from a data directory.

use std::path::{Path, PathBuf};

use game_core::GameConfig;

use crate::SpawnSpec;
use crate::loaders::{ConfigLoader, LoadResult, RosterLoader};

/// Content factory that loads session content from a data directory.
///
/// # Directory Structure
///
/// ```text
/// data_dir/
/// ├── config.toml
/// └── roster.ron
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

    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    /// Load game configuration from `config.toml`.
    pub fn load_config(&self) -> LoadResult<GameConfig> {
        let path = self.data_dir.join("config.toml");
        ConfigLoader::load(&path)
    }

    /// Load the enemy roster from `roster.ron`.
    pub fn load_roster(&self) -> LoadResult<Vec<SpawnSpec>> {
        let path = self.data_dir.join("roster.ron");
        RosterLoader::load(&path)
    }
}
