//! Client configuration read from the environment.

use std::env;
use std::path::PathBuf;

/// Settings for one headless simulation run.
#[derive(Clone, Debug, PartialEq)]
pub struct ClientConfig {
    /// Directory holding `config.toml` and `roster.ron`.
    pub data_dir: Option<PathBuf>,
    /// TOML game configuration. Overrides `data_dir`.
    pub config_path: Option<PathBuf>,
    /// RON enemy roster. Overrides `data_dir`.
    pub roster_path: Option<PathBuf>,
    /// Simulated seconds to run before stopping.
    pub duration_secs: f32,
    /// Render frames per simulated second.
    pub frame_rate: u32,
    /// Root directory for session logs. Platform cache directory when unset.
    pub log_dir: Option<PathBuf>,
    pub session_id: Option<String>,
}

impl ClientConfig {
    pub const DEFAULT_DURATION_SECS: f32 = 10.0;
    pub const DEFAULT_FRAME_RATE: u32 = 60;

    /// Reads `SIM_*` variables, falling back to defaults for missing or
    /// unparsable values.
    pub fn from_env() -> Self {
        let mut config = Self::default();

        config.data_dir = env::var_os("SIM_DATA_DIR").map(PathBuf::from);
        config.config_path = env::var_os("SIM_CONFIG").map(PathBuf::from);
        config.roster_path = env::var_os("SIM_ROSTER").map(PathBuf::from);
        config.log_dir = env::var_os("SIM_LOG_DIR").map(PathBuf::from);
        config.session_id = env::var("SIM_SESSION_ID").ok().filter(|id| !id.is_empty());

        if let Some(duration) = read_env::<f32>("SIM_DURATION_SECS") {
            config.duration_secs = duration.max(0.0);
        }

        if let Some(rate) = read_env::<u32>("SIM_FRAME_RATE") {
            config.frame_rate = rate.max(1);
        }

        config
    }

    /// Length of one render frame in seconds.
    pub fn frame_dt(&self) -> f32 {
        1.0 / self.frame_rate as f32
    }

    /// Number of frames covering the configured duration.
    pub fn frame_count(&self) -> u64 {
        (self.duration_secs * self.frame_rate as f32).ceil() as u64
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            data_dir: None,
            config_path: None,
            roster_path: None,
            duration_secs: Self::DEFAULT_DURATION_SECS,
            frame_rate: Self::DEFAULT_FRAME_RATE,
            log_dir: None,
            session_id: None,
        }
    }
}

fn read_env<T>(key: &str) -> Option<T>
where
    T: std::str::FromStr,
{
    env::var(key).ok()?.parse().ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn frame_math_follows_rate() {
        let config = ClientConfig {
            duration_secs: 2.0,
            frame_rate: 50,
            ..ClientConfig::default()
        };

        assert_eq!(config.frame_count(), 100);
        assert_eq!(config.frame_dt(), 0.02);
    }

    #[test]
    fn defaults_run_ten_seconds_at_sixty_hz() {
        let config = ClientConfig::default();
        assert_eq!(config.frame_count(), 600);
        assert!(config.config_path.is_none());
    }
}
