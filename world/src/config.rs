//! Tunable parameters for the authoritative world.

use maze_escape_core::{Footprint, Position, ENTITY_FOOTPRINT};
use thiserror::Error;

const DEFAULT_PLAYER_SPAWN: Position = Position::new(145.0, 70.0);
const DEFAULT_PURSUER_SPAWN: Position = Position::new(90.0, 450.0);
const DEFAULT_PURSUER_ALTERNATE_SPAWN: Position = Position::new(390.0, 400.0);
const DEFAULT_PLAYER_SPEED: f32 = 1.0;
const DEFAULT_BOOSTED_PLAYER_SPEED: f32 = 2.0;
const DEFAULT_PURSUER_SPEED: f32 = 0.7;
const DEFAULT_CAPTURE_RADIUS: f32 = 16.0;

/// Parameters that shape a playthrough.
///
/// Speeds are distances per tick, not per second: a tick moves an entity by
/// exactly its speed along an unobstructed direction.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct WorldConfig {
    /// Where the player starts and where captures send them back to.
    pub player_spawn: Position,
    /// Player step length without a speed boost.
    pub player_speed: f32,
    /// Player step length while a speed boost is active.
    pub boosted_player_speed: f32,
    /// Pursuer start position and respawn point after even captures.
    pub pursuer_spawn: Position,
    /// Pursuer respawn point after odd captures.
    pub pursuer_alternate_spawn: Position,
    /// Pursuer step length.
    pub pursuer_speed: f32,
    /// Distance below which the pursuer catches the player.
    pub capture_radius: f32,
    /// Footprint shared by every moving entity.
    pub footprint: Footprint,
}

impl Default for WorldConfig {
    fn default() -> Self {
        Self {
            player_spawn: DEFAULT_PLAYER_SPAWN,
            player_speed: DEFAULT_PLAYER_SPEED,
            boosted_player_speed: DEFAULT_BOOSTED_PLAYER_SPEED,
            pursuer_spawn: DEFAULT_PURSUER_SPAWN,
            pursuer_alternate_spawn: DEFAULT_PURSUER_ALTERNATE_SPAWN,
            pursuer_speed: DEFAULT_PURSUER_SPEED,
            capture_radius: DEFAULT_CAPTURE_RADIUS,
            footprint: ENTITY_FOOTPRINT,
        }
    }
}

/// Reasons a [`WorldConfig`] is rejected.
#[derive(Clone, Debug, PartialEq, Error)]
pub enum ConfigError {
    /// A speed was zero, negative or not finite.
    #[error("{field} must be a positive finite speed, got {value}")]
    InvalidSpeed {
        /// Name of the offending field.
        field: &'static str,
        /// Value supplied.
        value: f32,
    },
    /// A length was zero, negative or not finite.
    #[error("{field} must be a positive finite length, got {value}")]
    InvalidLength {
        /// Name of the offending field.
        field: &'static str,
        /// Value supplied.
        value: f32,
    },
    /// A spawn point had a non-finite coordinate.
    #[error("{field} must have finite coordinates, got ({x}, {y})")]
    InvalidSpawn {
        /// Name of the offending field.
        field: &'static str,
        /// Horizontal coordinate supplied.
        x: f32,
        /// Vertical coordinate supplied.
        y: f32,
    },
    /// A pursuer spawn sits close enough to the player spawn to recapture immediately.
    #[error("{field} is {distance} units from the player spawn, within the capture radius {radius}")]
    SpawnWithinCaptureRadius {
        /// Name of the offending pursuer spawn.
        field: &'static str,
        /// Distance to the player spawn.
        distance: f32,
        /// Configured capture radius.
        radius: f32,
    },
}

impl WorldConfig {
    /// Checks every parameter, returning the first violation found.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when a speed or length is not positive and
    /// finite, a spawn is not finite, or a pursuer respawn point lies within
    /// the capture radius of the player spawn.
    pub fn validate(&self) -> Result<(), ConfigError> {
        for (field, value) in [
            ("player_speed", self.player_speed),
            ("boosted_player_speed", self.boosted_player_speed),
            ("pursuer_speed", self.pursuer_speed),
        ] {
            if !is_positive(value) {
                return Err(ConfigError::InvalidSpeed { field, value });
            }
        }

        for (field, value) in [
            ("capture_radius", self.capture_radius),
            ("footprint", self.footprint.side()),
        ] {
            if !is_positive(value) {
                return Err(ConfigError::InvalidLength { field, value });
            }
        }

        for (field, spawn) in [
            ("player_spawn", self.player_spawn),
            ("pursuer_spawn", self.pursuer_spawn),
            ("pursuer_alternate_spawn", self.pursuer_alternate_spawn),
        ] {
            if !(spawn.x().is_finite() && spawn.y().is_finite()) {
                return Err(ConfigError::InvalidSpawn {
                    field,
                    x: spawn.x(),
                    y: spawn.y(),
                });
            }
        }

        for (field, spawn) in [
            ("pursuer_spawn", self.pursuer_spawn),
            ("pursuer_alternate_spawn", self.pursuer_alternate_spawn),
        ] {
            let distance = spawn.distance(self.player_spawn);
            if distance <= self.capture_radius {
                return Err(ConfigError::SpawnWithinCaptureRadius {
                    field,
                    distance,
                    radius: self.capture_radius,
                });
            }
        }

        Ok(())
    }
}

fn is_positive(value: f32) -> bool {
    value.is_finite() && value > 0.0
}
