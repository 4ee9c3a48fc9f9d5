//! Frame pump wiring the world to its systems.

use std::time::Duration;

use anyhow::{Context, Result};
use log::info;
use maze_escape_core::{
    final_score, Actor, Command, Event, Phase, PlayerInput, Position, TileGrid,
};
use maze_escape_system_control::Control;
use maze_escape_system_countdown::Countdown;
use maze_escape_system_interactions::{Encounters, Interactions, Layout, TicketState};
use maze_escape_system_pursuit::Pursuit;
use maze_escape_world::{self as world, query, World};

use crate::config::GameConfig;

/// Owns the world and every system, advancing them one frame at a time.
#[derive(Debug)]
pub(crate) struct Simulation {
    world: World,
    control: Control,
    pursuit: Pursuit,
    interactions: Interactions,
    countdown: Countdown,
    frames: u64,
}

/// Snapshot of a run reported to the user.
#[derive(Clone, Debug, PartialEq)]
pub(crate) struct Summary {
    /// Phase the world ended in.
    pub(crate) phase: Phase,
    /// Frames pumped.
    pub(crate) frames: u64,
    /// Times the pursuer caught the player.
    pub(crate) captures: u32,
    /// Remaining countdown rendered as `MM : SS`.
    pub(crate) time_left: String,
    /// Final score, only awarded for a win.
    pub(crate) score: Option<u32>,
    /// Progress of the bus ticket.
    pub(crate) ticket: TicketState,
    /// Event-encounter checklist.
    pub(crate) encounters: Encounters,
    /// Where the player stands.
    pub(crate) player: Position,
}

impl Simulation {
    /// Builds the world over `grid` and wires the systems from `config`.
    pub(crate) fn new(grid: TileGrid, config: &GameConfig) -> Result<Self> {
        let world = World::new(grid, config.world).context("failed to create world")?;
        let layout = Layout::from_grid(query::tile_grid(&world));
        Ok(Self {
            world,
            control: Control,
            pursuit: Pursuit,
            interactions: Interactions::new(config.props, layout),
            countdown: Countdown::new(config.time_budget),
            frames: 0,
        })
    }

    /// Current phase of the game.
    pub(crate) fn phase(&self) -> Phase {
        query::phase(&self.world)
    }

    /// Reports whether the run reached an outcome or the player quit.
    pub(crate) fn is_over(&self) -> bool {
        let phase = self.phase();
        phase.is_result() || phase.is_terminal()
    }

    /// Advances one frame of `dt` with the provided input, returning every world event.
    ///
    /// Within a frame: input, clock, pursuit and capture, interactions, countdown.
    pub(crate) fn frame(&mut self, input: &PlayerInput, dt: Duration) -> Vec<Event> {
        self.frames = self.frames.saturating_add(1);
        let mut events = Vec::new();
        let mut commands = Vec::new();

        self.control
            .handle(query::phase(&self.world), input, &mut commands);
        self.submit(&mut commands, &mut events);

        world::apply(&mut self.world, Command::Tick { dt }, &mut events);

        self.pursuit.handle(
            &events,
            query::position(&self.world, Actor::Pursuer),
            query::position(&self.world, Actor::Player),
            &mut commands,
        );
        self.submit(&mut commands, &mut events);

        self.interactions.handle(
            &events,
            query::position(&self.world, Actor::Player),
            input,
            &mut commands,
        );
        self.submit(&mut commands, &mut events);

        self.countdown.handle(&events, &mut commands);
        self.submit(&mut commands, &mut events);

        for event in &events {
            if let Event::PhaseChanged { from, to } = event {
                info!("{from:?} -> {to:?} after {} frames", self.frames);
            }
        }
        events
    }

    fn submit(&mut self, commands: &mut Vec<Command>, events: &mut Vec<Event>) {
        for command in commands.drain(..) {
            world::apply(&mut self.world, command, events);
        }
    }

    /// Summarises the run so far.
    pub(crate) fn summary(&self) -> Summary {
        let phase = query::phase(&self.world);
        let captures = query::captures(&self.world);
        let seconds_left = self.countdown.time_left().as_secs();
        let score = (phase == Phase::Won)
            .then(|| final_score(u32::try_from(seconds_left).unwrap_or(u32::MAX), captures));
        Summary {
            phase,
            frames: self.frames,
            captures,
            time_left: self.countdown.to_string(),
            score,
            ticket: self.interactions.ticket(),
            encounters: self.interactions.encounters(),
            player: query::position(&self.world, Actor::Player),
        }
    }
}
