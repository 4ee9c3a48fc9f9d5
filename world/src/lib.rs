#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Authoritative world state management for Maze Escape.

mod collision;
mod config;
mod movement;
mod pursuit;

use std::time::Duration;

use log::{debug, info, warn};
use maze_escape_core::{Actor, Command, Event, Phase, Position, TileGrid, Trigger};

pub use collision::TileCollisionMap;
pub use config::{ConfigError, WorldConfig};
pub use movement::{MoveOutcome, MovementResolver, Resolution};
pub use pursuit::{Capture, PursuitAgent, ResetTable};

/// Represents the authoritative Maze Escape world state.
#[derive(Debug)]
pub struct World {
    phase: Phase,
    config: WorldConfig,
    collision: TileCollisionMap,
    player: Player,
    pursuer: PursuitAgent,
    tick_index: u64,
}

impl World {
    /// Creates a world over the loaded grid, starting at the menu.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when the configuration fails validation.
    pub fn new(grid: TileGrid, config: WorldConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self {
            phase: Phase::Menu,
            collision: TileCollisionMap::new(grid),
            player: Player::at(config.player_spawn),
            pursuer: PursuitAgent::new(
                ResetTable::new(config.pursuer_spawn, config.pursuer_alternate_spawn),
                config.pursuer_speed,
            ),
            config,
            tick_index: 0,
        })
    }

    fn start_playthrough(&mut self) {
        self.player = Player::at(self.config.player_spawn);
        self.pursuer.reset();
        self.tick_index = 0;
        info!("playthrough started");
    }

    fn player_speed(&self) -> f32 {
        if self.player.boost_remaining.is_zero() {
            self.config.player_speed
        } else {
            self.config.boosted_player_speed
        }
    }
}

#[derive(Clone, Copy, Debug)]
struct Player {
    position: Position,
    boost_remaining: Duration,
}

impl Player {
    fn at(position: Position) -> Self {
        Self {
            position,
            boost_remaining: Duration::ZERO,
        }
    }
}

/// Applies the provided command to the world, mutating state deterministically.
///
/// Movement, boosts and ticks are ignored unless the world is in
/// [`Phase::Playing`], so pausing freezes the whole simulation.
pub fn apply(world: &mut World, command: Command, out_events: &mut Vec<Event>) {
    match command {
        Command::Transition { trigger } => apply_transition(world, trigger, out_events),
        _ if !world.phase.is_simulating() => {}
        Command::Tick { dt } => {
            world.tick_index = world.tick_index.saturating_add(1);
            out_events.push(Event::TimeAdvanced { dt });

            let boost = &mut world.player.boost_remaining;
            if !boost.is_zero() {
                *boost = boost.saturating_sub(dt);
                if boost.is_zero() {
                    out_events.push(Event::SpeedBoostExpired);
                }
            }
        }
        Command::MovePlayer { heading } => {
            let speed = world.player_speed();
            let resolver = MovementResolver::new(&world.collision, world.config.footprint);
            let from = world.player.position;
            let resolution = resolver.step(from, heading.unit(), speed);
            world.player.position = resolution.position;
            record_move(Actor::Player, from, resolution, out_events);
        }
        Command::SteerPursuer { dx, dy } => {
            let resolver = MovementResolver::new(&world.collision, world.config.footprint);
            let from = world.pursuer.position();
            let resolution = world.pursuer.advance(&resolver, (dx, dy));
            record_move(Actor::Pursuer, from, resolution, out_events);

            if let Some(capture) = world.pursuer.check_capture(
                &mut world.player.position,
                world.config.player_spawn,
                world.config.capture_radius,
            ) {
                debug!(
                    "player caught (capture {}), pursuer reset to {:?}",
                    capture.captures, capture.pursuer_reset
                );
                out_events.push(Event::PlayerCaught {
                    captures: capture.captures,
                    player_reset: capture.target_reset,
                    pursuer_reset: capture.pursuer_reset,
                });
            }
        }
        Command::GrantSpeedBoost { duration } => {
            world.player.boost_remaining = duration;
            out_events.push(Event::SpeedBoostGranted { duration });
        }
    }
}

fn apply_transition(world: &mut World, trigger: Trigger, out_events: &mut Vec<Event>) {
    let from = world.phase;
    let Some(to) = from.next(trigger) else {
        warn!("trigger {trigger:?} rejected in phase {from:?}");
        out_events.push(Event::TransitionRejected {
            phase: from,
            trigger,
        });
        return;
    };

    world.phase = to;
    debug!("phase {from:?} -> {to:?} on {trigger:?}");
    out_events.push(Event::PhaseChanged { from, to });

    if trigger.starts_playthrough() {
        world.start_playthrough();
        out_events.push(Event::PlaythroughStarted);
    }
}

fn record_move(actor: Actor, from: Position, resolution: Resolution, out_events: &mut Vec<Event>) {
    if resolution.outcome == MoveOutcome::Blocked {
        debug!("{actor:?} blocked at {from:?}");
        out_events.push(Event::MoveBlocked { actor, at: from });
    } else if resolution.position != from {
        out_events.push(Event::ActorMoved {
            actor,
            from,
            to: resolution.position,
        });
    }
}

/// Query functions that provide read-only access to the world state.
pub mod query {
    use std::time::Duration;

    use maze_escape_core::{Actor, Phase, Position, TileGrid};

    use super::{MovementResolver, World, WorldConfig};

    /// Current phase of the game state machine.
    #[must_use]
    pub fn phase(world: &World) -> Phase {
        world.phase
    }

    /// Configuration the world was created with.
    #[must_use]
    pub fn config(world: &World) -> &WorldConfig {
        &world.config
    }

    /// Provides read-only access to the loaded tile grid.
    #[must_use]
    pub fn tile_grid(world: &World) -> &TileGrid {
        world.collision.grid()
    }

    /// Reports whether a standard-sized entity anchored at `(x, y)` collides.
    #[must_use]
    pub fn is_cell_blocked(world: &World, x: f32, y: f32) -> bool {
        world.collision.is_cell_blocked(x, y)
    }

    /// Current position of the provided actor.
    #[must_use]
    pub fn position(world: &World, actor: Actor) -> Position {
        match actor {
            Actor::Player => world.player.position,
            Actor::Pursuer => world.pursuer.position(),
        }
    }

    /// Position the actor would reach by attempting `(dx, dy)`, without moving it.
    #[must_use]
    pub fn attempt_move(world: &World, actor: Actor, dx: f32, dy: f32) -> Position {
        MovementResolver::new(&world.collision, world.config.footprint).attempt_move(
            position(world, actor),
            dx,
            dy,
        )
    }

    /// Captures made by the pursuer during the current playthrough.
    #[must_use]
    pub fn captures(world: &World) -> u32 {
        world.pursuer.captures()
    }

    /// Player step length for the next move, accounting for an active boost.
    #[must_use]
    pub fn player_speed(world: &World) -> f32 {
        world.player_speed()
    }

    /// Remaining duration of the active speed boost, zero when none is active.
    #[must_use]
    pub fn boost_remaining(world: &World) -> Duration {
        world.player.boost_remaining
    }

    /// Number of ticks simulated during the current playthrough.
    #[must_use]
    pub fn tick_index(world: &World) -> u64 {
        world.tick_index
    }
}
