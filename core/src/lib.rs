#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Core contracts shared across the Maze Escape engine.
//!
//! This crate defines the message surface that connects adapters, the
//! authoritative world, and pure systems. Adapters submit [`Command`] values
//! describing desired mutations, the world executes those commands via its
//! `apply` entry point, and then broadcasts [`Event`] values for systems to
//! react to deterministically. Systems consume event streams, query immutable
//! snapshots, and respond exclusively with new command batches.
//!
//! World coordinates are expressed in `f32` world units with the y axis
//! growing upwards, matching the row order of [`TileLayer`] cells.

mod flow;
mod grid;

use std::time::Duration;

use serde::{Deserialize, Serialize};

pub use flow::{Phase, Trigger};
pub use grid::{EventRegion, GridError, Layer, ObjectLayer, Tile, TileGrid, TileLayer};

/// Canonical banner emitted when the experience boots.
pub const WELCOME_BANNER: &str = "Welcome to Maze Escape.";

/// Square footprint shared by every entity for collision sampling and capture checks.
pub const ENTITY_FOOTPRINT: Footprint = Footprint::new(16.0);

/// Points deducted from the final score for every capture.
pub const CAPTURE_PENALTY: u32 = 5;

/// Location of an entity expressed in world units.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Position {
    x: f32,
    y: f32,
}

impl Position {
    /// Creates a new world position.
    #[must_use]
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// Horizontal component of the position.
    #[must_use]
    pub const fn x(&self) -> f32 {
        self.x
    }

    /// Vertical component of the position.
    #[must_use]
    pub const fn y(&self) -> f32 {
        self.y
    }

    /// Returns the position shifted by the provided displacement.
    #[must_use]
    pub fn offset(self, dx: f32, dy: f32) -> Self {
        Self::new(self.x + dx, self.y + dy)
    }

    /// Euclidean distance between two positions.
    #[must_use]
    pub fn distance(self, other: Position) -> f32 {
        let dx = other.x - self.x;
        let dy = other.y - self.y;
        (dx * dx + dy * dy).sqrt()
    }
}

/// Side length of the square region an entity occupies.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Footprint(f32);

impl Footprint {
    /// Creates a footprint with the provided side length in world units.
    #[must_use]
    pub const fn new(side: f32) -> Self {
        Self(side)
    }

    /// Side length of the footprint.
    #[must_use]
    pub const fn side(&self) -> f32 {
        self.0
    }

    /// Half of the side length; offsets a corner-anchored position to its centre.
    #[must_use]
    pub fn half(&self) -> f32 {
        self.0 * 0.5
    }

    /// Rectangle covered by the footprint when anchored at `position`.
    #[must_use]
    pub const fn bounds_at(&self, position: Position) -> Rect {
        Rect::new(position.x, position.y, self.0, self.0)
    }
}

/// Axis-aligned rectangle expressed in world units.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    x: f32,
    y: f32,
    width: f32,
    height: f32,
}

impl Rect {
    /// Creates a rectangle anchored at its lower-left corner.
    #[must_use]
    pub const fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Lower-left corner of the rectangle.
    #[must_use]
    pub const fn origin(&self) -> Position {
        Position::new(self.x, self.y)
    }

    /// Width of the rectangle.
    #[must_use]
    pub const fn width(&self) -> f32 {
        self.width
    }

    /// Height of the rectangle.
    #[must_use]
    pub const fn height(&self) -> f32 {
        self.height
    }

    /// Reports whether two rectangles share any interior area.
    #[must_use]
    pub fn overlaps(&self, other: &Rect) -> bool {
        self.x < other.x + other.width
            && self.x + self.width > other.x
            && self.y < other.y + other.height
            && self.y + self.height > other.y
    }
}

/// Moving entities that the world simulates.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Actor {
    /// Entity steered by player input.
    Player,
    /// Autonomous enemy chasing the player.
    Pursuer,
}

/// Single-axis movement directions available to the player.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Heading {
    /// Movement toward increasing y.
    Up,
    /// Movement toward decreasing y.
    Down,
    /// Movement toward decreasing x.
    Left,
    /// Movement toward increasing x.
    Right,
}

impl Heading {
    /// Unit displacement `(dx, dy)` associated with the heading.
    #[must_use]
    pub const fn unit(self) -> (f32, f32) {
        match self {
            Self::Up => (0.0, 1.0),
            Self::Down => (0.0, -1.0),
            Self::Left => (-1.0, 0.0),
            Self::Right => (1.0, 0.0),
        }
    }
}

/// Snapshot of the player's controls for a single frame.
///
/// Movement flags report keys that are held; the remaining flags report
/// presses that happened during the frame.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PlayerInput {
    /// Move toward increasing y.
    pub up: bool,
    /// Move toward decreasing y.
    pub down: bool,
    /// Move toward decreasing x.
    pub left: bool,
    /// Move toward increasing x.
    pub right: bool,
    /// Interact with whatever is nearby.
    pub interact: bool,
    /// Pause or resume gameplay.
    pub pause: bool,
    /// Confirm the current screen.
    pub confirm: bool,
    /// Step back or quit.
    pub back: bool,
    /// Open the leaderboard.
    pub leaderboard: bool,
}

impl PlayerInput {
    /// Heading selected by the held movement keys.
    ///
    /// Only one axis moves per frame; when several keys are held the first of
    /// up, down, left and right wins.
    #[must_use]
    pub const fn heading(&self) -> Option<Heading> {
        if self.up {
            Some(Heading::Up)
        } else if self.down {
            Some(Heading::Down)
        } else if self.left {
            Some(Heading::Left)
        } else if self.right {
            Some(Heading::Right)
        } else {
            None
        }
    }

    /// Whether any movement key is held.
    #[must_use]
    pub const fn is_moving(&self) -> bool {
        self.heading().is_some()
    }
}

/// Commands that express all permissible world mutations.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum Command {
    /// Advances the simulation clock by the provided delta time.
    Tick {
        /// Duration of simulated time that elapsed since the previous tick.
        dt: Duration,
    },
    /// Requests that the player move one step along the heading.
    MovePlayer {
        /// Direction of travel for the attempted step.
        heading: Heading,
    },
    /// Requests that the pursuer advance along a unit direction.
    ///
    /// The world scales the direction by the pursuer's speed and runs the
    /// capture check afterwards, so exactly one steer command is expected per
    /// tick even when the direction is zero.
    SteerPursuer {
        /// Horizontal component of the unit direction.
        dx: f32,
        /// Vertical component of the unit direction.
        dy: f32,
    },
    /// Grants the player a temporary speed boost.
    GrantSpeedBoost {
        /// Length of the boost in simulated time.
        duration: Duration,
    },
    /// Requests a transition of the game phase state machine.
    Transition {
        /// Trigger fed into the transition table.
        trigger: Trigger,
    },
}

/// Events broadcast by the world after processing commands.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum Event {
    /// Indicates that the simulation clock advanced while playing.
    TimeAdvanced {
        /// Duration of simulated time that elapsed in the tick.
        dt: Duration,
    },
    /// Confirms that an actor moved.
    ActorMoved {
        /// Actor that moved.
        actor: Actor,
        /// Position before the move.
        from: Position,
        /// Position after the move.
        to: Position,
    },
    /// Reports that every candidate of a requested move was blocked.
    MoveBlocked {
        /// Actor that attempted to move.
        actor: Actor,
        /// Position the actor remains at.
        at: Position,
    },
    /// Announces that the pursuer caught the player.
    PlayerCaught {
        /// Total captures in the current playthrough, including this one.
        captures: u32,
        /// Position the player was reset to.
        player_reset: Position,
        /// Position the pursuer was reset to.
        pursuer_reset: Position,
    },
    /// Confirms that a speed boost became active.
    SpeedBoostGranted {
        /// Length of the boost.
        duration: Duration,
    },
    /// Announces that the active speed boost ran out.
    SpeedBoostExpired,
    /// Announces that the phase state machine moved to a new phase.
    PhaseChanged {
        /// Phase before the transition.
        from: Phase,
        /// Phase after the transition.
        to: Phase,
    },
    /// Reports that a trigger has no transition from the current phase.
    TransitionRejected {
        /// Phase that remained active.
        phase: Phase,
        /// Trigger that was rejected.
        trigger: Trigger,
    },
    /// Announces that a fresh playthrough began with reset entities.
    PlaythroughStarted,
}

/// Computes the final score from the remaining time and the capture count.
///
/// The remaining time is read as a clock face: 3:24 left scores 324 before
/// the capture penalty is deducted. The result never drops below zero.
#[must_use]
pub fn final_score(seconds_left: u32, captures: u32) -> u32 {
    let minutes = seconds_left / 60;
    let seconds = seconds_left % 60;
    let time_score = minutes * 100 + seconds;
    time_score.saturating_sub(captures.saturating_mul(CAPTURE_PENALTY))
}
