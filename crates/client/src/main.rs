//! Headless actor simulation.
//!
//! Loads game configuration and an enemy roster, puts them on a
//! [`runtime::Stage`], and plays a scripted input timeline against the
//! player until the configured duration runs out or the player dies.
//!
//! # Environment
//!
//! | Variable            | Meaning                                  |
//! |---------------------|------------------------------------------|
//! | `SIM_DATA_DIR`      | Directory with config and roster files   |
//! | `SIM_CONFIG`        | TOML game configuration                  |
//! | `SIM_ROSTER`        | RON enemy roster                         |
//! | `SIM_DURATION_SECS` | Simulated seconds (default 10)           |
//! | `SIM_FRAME_RATE`    | Frames per second (default 60)           |
//! | `SIM_LOG_DIR`       | Log root (default: platform cache dir)   |
//! | `SIM_SESSION_ID`    | Log subdirectory (default: timestamp)    |
//! | `RUST_LOG`          | Log filter (default `info`)              |

mod config;
mod logging;
mod script;

use anyhow::{Context, Result};
use game_content::{ConfigLoader, ContentFactory, RosterLoader, SpawnSpec};
use game_core::{EnemyConfig, EnemyKind, GameConfig};
use glam::Vec2;
use runtime::{Outcome, Stage};

use config::ClientConfig;
use script::Script;

fn main() -> Result<()> {
    // Load .env file if it exists (silently ignore if not found)
    let _ = dotenvy::dotenv();

    let config = ClientConfig::from_env();
    let _guard = logging::setup_logging(config.log_dir.as_deref(), config.session_id.as_deref())?;

    tracing::info!(
        duration = config.duration_secs,
        frame_rate = config.frame_rate,
        "Starting actor simulation"
    );

    let (game_config, roster) = load_content(&config)?;

    let mut stage = Stage::new(game_config, Vec2::ZERO)?;
    for spec in roster {
        stage.spawn(spec.name.clone(), spec.config.clone(), spec.position())?;
    }

    let outcome = run(&mut stage, &config, Script::demo())?;
    report(&stage, outcome);
    Ok(())
}

/// Plays `script` against the stage frame by frame.
fn run(stage: &mut Stage, config: &ClientConfig, mut script: Script) -> Result<Outcome> {
    let dt = config.frame_dt();
    let mut outcome = stage.outcome();

    for frame in 0..config.frame_count() {
        let now = frame as f32 * dt;
        for cue in script.due(now) {
            tracing::debug!(at = cue.at, input = ?cue.input, "input");
            cue.input.apply(stage.player_mut());
        }

        outcome = stage.frame(dt)?;
        if outcome.is_over() {
            tracing::info!(frame, "session ended early");
            break;
        }
    }

    if !script.is_finished() {
        tracing::debug!("run ended before the input script did");
    }
    Ok(outcome)
}

fn report(stage: &Stage, outcome: Outcome) {
    let player = stage.player();
    let position = player.kinematics().position;
    tracing::info!(
        %outcome,
        frames = stage.frames(),
        health = player.health().current(),
        state = ?player.state(),
        x = position.x,
        y = position.y,
        "Simulation finished"
    );

    for (handle, enemy) in stage.enemies() {
        let position = enemy.kinematics().position;
        tracing::info!(
            %handle,
            name = stage.enemy_name(handle).unwrap_or_default(),
            kind = %enemy.kind(),
            health = enemy.health().current(),
            state = ?enemy.state(),
            x = position.x,
            y = position.y,
            "enemy remaining"
        );
    }
}

/// Resolves game config and roster.
///
/// An explicit file path wins over the data directory; with neither, the
/// built-in defaults and demo roster are used.
fn load_content(config: &ClientConfig) -> Result<(GameConfig, Vec<SpawnSpec>)> {
    let factory = config.data_dir.as_deref().map(ContentFactory::new);

    let game_config = match (&config.config_path, &factory) {
        (Some(path), _) => ConfigLoader::load(path)
            .with_context(|| format!("loading game config from {}", path.display()))?,
        (None, Some(factory)) => factory.load_config()?,
        (None, None) => GameConfig::default(),
    };
    let roster = match (&config.roster_path, &factory) {
        (Some(path), _) => RosterLoader::load(path)
            .with_context(|| format!("loading roster from {}", path.display()))?,
        (None, Some(factory)) => factory.load_roster()?,
        (None, None) => demo_roster(),
    };

    tracing::info!(enemies = roster.len(), "content loaded");
    Ok((game_config, roster))
}

fn demo_roster() -> Vec<SpawnSpec> {
    let slime = EnemyConfig::slime(
        EnemyConfig::DEFAULT_MOVE_DELAY,
        EnemyConfig::DEFAULT_MOVE_LENGTH,
    );
    let chaser = EnemyConfig::new(EnemyKind::Chaser);
    vec![
        SpawnSpec::new("slime", Vec2::new(300.0, 0.0), slime),
        SpawnSpec::new("chaser", Vec2::new(0.0, 400.0), chaser),
    ]
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use super::*;

    fn sample_data() -> PathBuf {
        PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("data")
    }

    #[test]
    fn data_dir_loads_bundled_content() {
        let config = ClientConfig {
            data_dir: Some(sample_data()),
            ..ClientConfig::default()
        };

        let (game_config, roster) = load_content(&config).unwrap();

        assert_eq!(game_config.fixed_timestep, 0.02);
        let names: Vec<&str> = roster.iter().map(|spec| spec.name.as_str()).collect();
        assert_eq!(names, ["slime_east", "chaser_north"]);
        assert_eq!(roster[0].config.kind, EnemyKind::Slime);
    }

    #[test]
    fn explicit_roster_overrides_data_dir() {
        let dir = tempfile::tempdir().unwrap();
        let roster_path = dir.path().join("solo.ron");
        std::fs::write(&roster_path, r#"[(name: "solo", position: (5.0, 5.0))]"#).unwrap();

        let config = ClientConfig {
            data_dir: Some(sample_data()),
            roster_path: Some(roster_path),
            ..ClientConfig::default()
        };

        let (_, roster) = load_content(&config).unwrap();

        assert_eq!(roster.len(), 1);
        assert_eq!(roster[0].name, "solo");
    }

    #[test]
    fn no_sources_fall_back_to_demo() {
        let (game_config, roster) = load_content(&ClientConfig::default()).unwrap();

        assert_eq!(game_config, GameConfig::default());
        assert_eq!(roster.len(), 2);
    }
}
