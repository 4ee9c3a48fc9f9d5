#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Deterministic pursuit system that steers the enemy straight at the player.

use glam::Vec2;
use maze_escape_core::{Command, Event, Position};

/// Pure system that reacts to world ticks and emits steering commands.
///
/// The pursuer always heads along the straight line toward its target. Walls
/// are handled by the world's movement resolver sliding it along them; there
/// is no path planning.
#[derive(Debug, Default)]
pub struct Pursuit;

impl Pursuit {
    /// Consumes world events and positions to emit one steer command per tick.
    ///
    /// A command is emitted even when the pursuer already stands on its target
    /// so the world still runs its capture check for that tick.
    ///
    /// The direction is aimed from the positions passed in, so every command
    /// of one call shares it. Callers pump one tick per call; a batch holding
    /// several ticks steers the later ones along the first tick's heading.
    pub fn handle(
        &mut self,
        events: &[Event],
        pursuer: Position,
        target: Position,
        out: &mut Vec<Command>,
    ) {
        let ticks = events
            .iter()
            .filter(|event| matches!(event, Event::TimeAdvanced { .. }))
            .count();

        let (dx, dy) = direction_toward(pursuer, target);
        for _ in 0..ticks {
            out.push(Command::SteerPursuer { dx, dy });
        }
    }
}

/// Unit vector pointing from `from` toward `to`.
///
/// Coincident or non-finite inputs yield the zero vector instead of NaN.
#[must_use]
pub fn direction_toward(from: Position, to: Position) -> (f32, f32) {
    let delta = Vec2::new(to.x() - from.x(), to.y() - from.y());
    let unit = delta.normalize_or_zero();
    (unit.x, unit.y)
}
