//! Authoritative pursuer state: position, capture counter and respawn policy.

use maze_escape_core::Position;

use crate::movement::{MovementResolver, Resolution};

/// Two respawn points for the pursuer, indexed by capture parity.
///
/// Slot zero holds the primary spawn and slot one the alternate spawn. After
/// a capture the counter has already been incremented, so odd counts send the
/// pursuer to the alternate spawn and even counts back to the primary one.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ResetTable([Position; 2]);

impl ResetTable {
    /// Creates a table from the primary and alternate spawn points.
    #[must_use]
    pub const fn new(primary: Position, alternate: Position) -> Self {
        Self([primary, alternate])
    }

    /// Spawn used at the start of a playthrough and after even captures.
    #[must_use]
    pub const fn primary(&self) -> Position {
        self.0[0]
    }

    /// Spawn used after odd captures.
    #[must_use]
    pub const fn alternate(&self) -> Position {
        self.0[1]
    }

    /// Respawn point for the provided post-increment capture count.
    #[must_use]
    pub const fn for_captures(&self, captures: u32) -> Position {
        self.0[(captures % 2) as usize]
    }
}

/// Outcome of a successful capture check.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Capture {
    /// Capture count after this capture.
    pub captures: u32,
    /// Position the target was reset to.
    pub target_reset: Position,
    /// Position the pursuer was reset to.
    pub pursuer_reset: Position,
}

/// Enemy controller that always chases its target.
#[derive(Clone, Debug)]
pub struct PursuitAgent {
    position: Position,
    speed: f32,
    captures: u32,
    resets: ResetTable,
}

impl PursuitAgent {
    /// Creates an agent at the primary spawn with a zeroed capture counter.
    #[must_use]
    pub const fn new(resets: ResetTable, speed: f32) -> Self {
        Self {
            position: resets.primary(),
            speed,
            captures: 0,
            resets,
        }
    }

    /// Current position of the agent.
    #[must_use]
    pub const fn position(&self) -> Position {
        self.position
    }

    /// Distance travelled per tick along an unobstructed direction.
    #[must_use]
    pub const fn speed(&self) -> f32 {
        self.speed
    }

    /// Captures made during the current playthrough.
    #[must_use]
    pub const fn captures(&self) -> u32 {
        self.captures
    }

    /// Respawn table used after captures.
    #[must_use]
    pub const fn resets(&self) -> ResetTable {
        self.resets
    }

    /// Moves along a unit `direction` at the agent's speed through the resolver.
    pub fn advance(
        &mut self,
        resolver: &MovementResolver<'_>,
        direction: (f32, f32),
    ) -> Resolution {
        let resolution = resolver.step(self.position, direction, self.speed);
        self.position = resolution.position;
        resolution
    }

    /// Runs the capture check against `target` using Euclidean distance.
    ///
    /// On capture the target is moved to `target_spawn`, the counter
    /// increments, and the agent respawns according to the reset table.
    pub fn check_capture(
        &mut self,
        target: &mut Position,
        target_spawn: Position,
        radius: f32,
    ) -> Option<Capture> {
        if self.position.distance(*target) >= radius {
            return None;
        }

        *target = target_spawn;
        self.captures = self.captures.saturating_add(1);
        self.position = self.resets.for_captures(self.captures);

        Some(Capture {
            captures: self.captures,
            target_reset: target_spawn,
            pursuer_reset: self.position,
        })
    }

    /// Returns the agent to the primary spawn and clears the capture counter.
    pub fn reset(&mut self) {
        self.position = self.resets.primary();
        self.captures = 0;
    }
}
