//! Versioned TOML configuration for a run.

use std::{fs, path::Path, time::Duration};

use anyhow::{bail, Context, Result};
use maze_escape_core::Position;
use maze_escape_system_countdown::DEFAULT_TIME_BUDGET;
use maze_escape_system_interactions::Config as PropsConfig;
use maze_escape_world::WorldConfig;
use serde::Deserialize;

const SUPPORTED_CONFIG_VERSION: u32 = 1;

/// Fully resolved settings for a run.
#[derive(Clone, Copy, Debug, PartialEq)]
pub(crate) struct GameConfig {
    /// Parameters of the authoritative world.
    pub(crate) world: WorldConfig,
    /// Time budget of a playthrough.
    pub(crate) time_budget: Duration,
    /// Placement and timing of interactive props.
    pub(crate) props: PropsConfig,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            world: WorldConfig::default(),
            time_budget: DEFAULT_TIME_BUDGET,
            props: PropsConfig::default(),
        }
    }
}

impl GameConfig {
    /// Reads and resolves the configuration file at `path`.
    pub(crate) fn load(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path)
            .with_context(|| format!("failed to read config at {}", path.display()))?;
        Self::from_toml_str(&contents)
            .with_context(|| format!("invalid config at {}", path.display()))
    }

    /// Parses a configuration document, filling omitted keys with defaults.
    pub(crate) fn from_toml_str(contents: &str) -> Result<Self> {
        let file: ConfigFile =
            toml::from_str(contents).context("failed to parse config toml contents")?;
        if file.version != SUPPORTED_CONFIG_VERSION {
            bail!(
                "unsupported config version {}; expected {}",
                file.version,
                SUPPORTED_CONFIG_VERSION
            );
        }

        let mut config = Self::default();
        file.apply(&mut config)?;
        config
            .world
            .validate()
            .context("config describes an invalid world")?;
        Ok(config)
    }
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct ConfigFile {
    version: u32,
    #[serde(default)]
    timer: TimerSection,
    #[serde(default)]
    player: PlayerSection,
    #[serde(default)]
    pursuer: PursuerSection,
    #[serde(default)]
    capture: CaptureSection,
    #[serde(default)]
    props: PropsSection,
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct TimerSection {
    seconds: Option<f32>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct PlayerSection {
    spawn: Option<[f32; 2]>,
    speed: Option<f32>,
    boosted_speed: Option<f32>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct PursuerSection {
    spawn: Option<[f32; 2]>,
    alternate_spawn: Option<[f32; 2]>,
    speed: Option<f32>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct CaptureSection {
    radius: Option<f32>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct PropsSection {
    locker: Option<[f32; 2]>,
    friend: Option<[f32; 2]>,
    boost_seconds: Option<f32>,
    message_seconds: Option<f32>,
}

impl ConfigFile {
    fn apply(self, config: &mut GameConfig) -> Result<()> {
        if let Some(seconds) = self.timer.seconds {
            config.time_budget = seconds_to_duration("timer.seconds", seconds)?;
        }

        let world = &mut config.world;
        if let Some(spawn) = self.player.spawn {
            world.player_spawn = position(spawn);
        }
        if let Some(speed) = self.player.speed {
            world.player_speed = speed;
        }
        if let Some(speed) = self.player.boosted_speed {
            world.boosted_player_speed = speed;
        }
        if let Some(spawn) = self.pursuer.spawn {
            world.pursuer_spawn = position(spawn);
        }
        if let Some(spawn) = self.pursuer.alternate_spawn {
            world.pursuer_alternate_spawn = position(spawn);
        }
        if let Some(speed) = self.pursuer.speed {
            world.pursuer_speed = speed;
        }
        if let Some(radius) = self.capture.radius {
            world.capture_radius = radius;
        }

        let props = &mut config.props;
        if let Some(locker) = self.props.locker {
            props.locker = position(locker);
        }
        if let Some(friend) = self.props.friend {
            props.friend = position(friend);
        }
        if let Some(seconds) = self.props.boost_seconds {
            props.boost_duration = seconds_to_duration("props.boost_seconds", seconds)?;
        }
        if let Some(seconds) = self.props.message_seconds {
            props.message_duration = seconds_to_duration("props.message_seconds", seconds)?;
        }
        Ok(())
    }
}

fn position([x, y]: [f32; 2]) -> Position {
    Position::new(x, y)
}

fn seconds_to_duration(key: &str, seconds: f32) -> Result<Duration> {
    Duration::try_from_secs_f32(seconds)
        .with_context(|| format!("`{key}` must be a non-negative number of seconds, got {seconds}"))
}
