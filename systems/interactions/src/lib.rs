#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Interaction system covering the bus ticket, the bus, the locker and the friend.

use std::time::Duration;

use log::{debug, info, warn};
use maze_escape_core::{
    Command, Event, Footprint, PlayerInput, Position, Rect, TileGrid, Trigger, ENTITY_FOOTPRINT,
};

/// Name of the map region marking where the bus ticket lies.
pub const TICKET_REGION: &str = "BusTicket";

/// Name of the map region the player must stand in to board the bus.
pub const BUS_REGION: &str = "Bus";

/// Text shown after searching the locker.
pub const LOCKER_MESSAGE: &str = "You found a sweet treat, enjoy the sugar rush!";

/// Text shown while talking to the friend.
pub const FRIEND_DIALOGUE: &str =
    "Hey friend! Don't forget your bus ticket, you always drop it near your room.";

/// Tunable placement and timing of the interactive props.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Config {
    /// Position of the locker granting the speed boost.
    pub locker: Position,
    /// Position of the friend offering a hint.
    pub friend: Position,
    /// Distance below which the ticket is discovered.
    pub discovery_radius: f32,
    /// Distance below which the locker and the friend respond to interaction.
    pub interact_radius: f32,
    /// Distance beyond which the friend's dialogue closes.
    pub dialogue_radius: f32,
    /// Length of the speed boost found in the locker.
    pub boost_duration: Duration,
    /// How long the locker message stays visible.
    pub message_duration: Duration,
    /// Footprint of the player used for the bus overlap test.
    pub footprint: Footprint,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            locker: Position::new(495.0, 575.0),
            friend: Position::new(560.0, 300.0),
            discovery_radius: 16.0,
            interact_radius: 50.0,
            dialogue_radius: 60.0,
            boost_duration: Duration::from_secs(10),
            message_duration: Duration::from_secs(5),
            footprint: ENTITY_FOOTPRINT,
        }
    }
}

/// Where the map-authored props live.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Layout {
    ticket: Option<Position>,
    bus_zone: Option<Rect>,
}

impl Layout {
    /// Creates a layout from explicit ticket and bus placements.
    #[must_use]
    pub const fn new(ticket: Option<Position>, bus_zone: Option<Rect>) -> Self {
        Self { ticket, bus_zone }
    }

    /// Reads the ticket and bus regions from the grid's object layers.
    ///
    /// A missing region leaves the corresponding prop absent, which makes the
    /// playthrough unwinnable; this is logged rather than rejected.
    #[must_use]
    pub fn from_grid(grid: &TileGrid) -> Self {
        let ticket = grid
            .region(TICKET_REGION)
            .map(|region| region.bounds().origin());
        let bus_zone = grid.region(BUS_REGION).map(|region| region.bounds());
        if ticket.is_none() {
            warn!("map has no `{TICKET_REGION}` region; the ticket cannot be found");
        }
        if bus_zone.is_none() {
            warn!("map has no `{BUS_REGION}` region; the bus cannot be boarded");
        }
        Self::new(ticket, bus_zone)
    }

    /// Position of the ticket, if the map places one.
    #[must_use]
    pub const fn ticket(&self) -> Option<Position> {
        self.ticket
    }

    /// Boarding area of the bus, if the map places one.
    #[must_use]
    pub const fn bus_zone(&self) -> Option<Rect> {
        self.bus_zone
    }
}

/// Progress of the bus ticket through a playthrough.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum TicketState {
    /// The player has not been near the ticket yet.
    #[default]
    Hidden,
    /// The ticket is visible and can be picked up.
    Discovered,
    /// The ticket is in the player's inventory.
    Collected,
}

/// Prompt offered to the player for the current frame.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Prompt {
    /// The player stands on the ticket.
    PickUpTicket,
    /// The player holds the ticket and stands at the bus.
    BoardBus,
}

/// Checklist of the three event kinds a playthrough can encounter.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Encounters {
    /// The locker's speed boost is currently active.
    pub positive: bool,
    /// The pursuer caught the player at least once.
    pub negative: bool,
    /// The ticket has been collected.
    pub hidden: bool,
}

/// Pure system reacting to the player's proximity and interaction presses.
#[derive(Debug)]
pub struct Interactions {
    config: Config,
    layout: Layout,
    ticket: TicketState,
    prompt: Option<Prompt>,
    locker_searched: bool,
    locker_message: Duration,
    dialogue_open: bool,
    boost_active: bool,
    caught: bool,
}

impl Interactions {
    /// Creates the system for the provided props.
    #[must_use]
    pub fn new(config: Config, layout: Layout) -> Self {
        Self {
            config,
            layout,
            ticket: TicketState::Hidden,
            prompt: None,
            locker_searched: false,
            locker_message: Duration::ZERO,
            dialogue_open: false,
            boost_active: false,
            caught: false,
        }
    }

    /// Consumes world events and the frame's input to emit interaction commands.
    ///
    /// Proximity is only evaluated on frames where simulated time advanced,
    /// so presses made while paused or on other screens are ignored.
    pub fn handle(
        &mut self,
        events: &[Event],
        player: Position,
        input: &PlayerInput,
        out: &mut Vec<Command>,
    ) {
        let mut elapsed = Duration::ZERO;
        let mut advanced = false;
        for event in events {
            match event {
                Event::PlaythroughStarted => self.reset(),
                Event::PlayerCaught { .. } => self.caught = true,
                Event::SpeedBoostGranted { .. } => self.boost_active = true,
                Event::SpeedBoostExpired => self.boost_active = false,
                Event::TimeAdvanced { dt } => {
                    elapsed = elapsed.saturating_add(*dt);
                    advanced = true;
                }
                _ => {}
            }
        }

        if !advanced {
            return;
        }

        self.locker_message = self.locker_message.saturating_sub(elapsed);
        self.update_ticket_and_bus(player, input, out);
        self.update_locker(player, input, out);
        self.update_friend(player, input);
    }

    fn update_ticket_and_bus(
        &mut self,
        player: Position,
        input: &PlayerInput,
        out: &mut Vec<Command>,
    ) {
        self.prompt = None;

        if self.ticket == TicketState::Collected {
            let Some(bus_zone) = self.layout.bus_zone else {
                return;
            };
            if self.config.footprint.bounds_at(player).overlaps(&bus_zone) {
                self.prompt = Some(Prompt::BoardBus);
                if input.interact {
                    info!("player boards the bus");
                    out.push(Command::Transition {
                        trigger: Trigger::BoardBus,
                    });
                }
            }
            return;
        }

        let Some(ticket) = self.layout.ticket else {
            return;
        };
        if player.distance(ticket) >= self.config.discovery_radius {
            return;
        }

        if self.ticket == TicketState::Hidden {
            debug!("ticket discovered at {ticket:?}");
            self.ticket = TicketState::Discovered;
        }

        if input.interact && !input.is_moving() {
            info!("ticket collected");
            self.ticket = TicketState::Collected;
        } else {
            self.prompt = Some(Prompt::PickUpTicket);
        }
    }

    fn update_locker(&mut self, player: Position, input: &PlayerInput, out: &mut Vec<Command>) {
        if self.locker_searched || !input.interact {
            return;
        }
        if player.distance(self.config.locker) >= self.config.interact_radius {
            return;
        }

        info!("locker searched, speed boost granted");
        self.locker_searched = true;
        self.locker_message = self.config.message_duration;
        self.boost_active = true;
        out.push(Command::GrantSpeedBoost {
            duration: self.config.boost_duration,
        });
    }

    fn update_friend(&mut self, player: Position, input: &PlayerInput) {
        let distance = player.distance(self.config.friend);
        if input.interact && distance < self.config.interact_radius {
            self.dialogue_open = true;
        }
        if self.dialogue_open && distance > self.config.dialogue_radius {
            self.dialogue_open = false;
        }
    }

    fn reset(&mut self) {
        *self = Self::new(self.config, self.layout);
    }

    /// Current progress of the bus ticket.
    #[must_use]
    pub const fn ticket(&self) -> TicketState {
        self.ticket
    }

    /// Prompt shown to the player, if any.
    #[must_use]
    pub const fn prompt(&self) -> Option<Prompt> {
        self.prompt
    }

    /// Whether the locker has been searched during this playthrough.
    #[must_use]
    pub const fn locker_searched(&self) -> bool {
        self.locker_searched
    }

    /// Locker message to display, while it is still visible.
    #[must_use]
    pub fn locker_message(&self) -> Option<&'static str> {
        (!self.locker_message.is_zero()).then_some(LOCKER_MESSAGE)
    }

    /// Friend dialogue to display, while it is open.
    #[must_use]
    pub fn dialogue(&self) -> Option<&'static str> {
        self.dialogue_open.then_some(FRIEND_DIALOGUE)
    }

    /// Event-encounter checklist for the current playthrough.
    #[must_use]
    pub fn encounters(&self) -> Encounters {
        Encounters {
            positive: self.boost_active,
            negative: self.caught,
            hidden: self.ticket == TicketState::Collected,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const TICKET: Position = Position::new(300.0, 300.0);
    const BUS: Rect = Rect::new(600.0, 40.0, 32.0, 48.0);

    fn system() -> Interactions {
        Interactions::new(Config::default(), Layout::new(Some(TICKET), Some(BUS)))
    }

    fn tick() -> Event {
        Event::TimeAdvanced {
            dt: Duration::from_millis(100),
        }
    }

    fn interact() -> PlayerInput {
        PlayerInput {
            interact: true,
            ..PlayerInput::default()
        }
    }

    #[test]
    fn ticket_stays_hidden_until_player_is_close() {
        let mut system = system();
        let mut out = Vec::new();

        system.handle(&[tick()], TICKET.offset(16.0, 0.0), &interact(), &mut out);
        assert_eq!(system.ticket(), TicketState::Hidden);
        assert_eq!(system.prompt(), None);

        system.handle(
            &[tick()],
            TICKET.offset(15.0, 0.0),
            &PlayerInput::default(),
            &mut out,
        );
        assert_eq!(system.ticket(), TicketState::Discovered);
        assert_eq!(system.prompt(), Some(Prompt::PickUpTicket));
        assert!(out.is_empty());
    }

    #[test]
    fn ticket_is_not_collected_while_moving() {
        let mut system = system();
        let mut out = Vec::new();
        let moving = PlayerInput {
            interact: true,
            left: true,
            ..PlayerInput::default()
        };

        system.handle(&[tick()], TICKET, &moving, &mut out);
        assert_eq!(system.ticket(), TicketState::Discovered);

        system.handle(&[tick()], TICKET, &interact(), &mut out);
        assert_eq!(system.ticket(), TicketState::Collected);
        assert!(system.encounters().hidden);
    }

    #[test]
    fn boarding_requires_ticket_and_overlap() {
        let mut system = system();
        let mut out = Vec::new();
        let at_bus = Position::new(590.0, 50.0);

        system.handle(&[tick()], at_bus, &interact(), &mut out);
        assert!(out.is_empty());

        system.handle(&[tick()], TICKET, &interact(), &mut out);
        system.handle(&[tick()], Position::new(580.0, 50.0), &interact(), &mut out);
        assert!(out.is_empty());
        assert_eq!(system.prompt(), None);

        system.handle(&[tick()], at_bus, &PlayerInput::default(), &mut out);
        assert_eq!(system.prompt(), Some(Prompt::BoardBus));
        assert!(out.is_empty());

        system.handle(&[tick()], at_bus, &interact(), &mut out);
        assert_eq!(
            out,
            vec![Command::Transition {
                trigger: Trigger::BoardBus
            }]
        );
    }

    #[test]
    fn locker_grants_one_boost_per_playthrough() {
        let mut system = system();
        let mut out = Vec::new();
        let near_locker = Config::default().locker.offset(30.0, 0.0);

        system.handle(&[tick()], near_locker, &interact(), &mut out);
        system.handle(&[tick()], near_locker, &interact(), &mut out);

        assert_eq!(
            out,
            vec![Command::GrantSpeedBoost {
                duration: Duration::from_secs(10)
            }]
        );
        assert!(system.locker_searched());
        assert_eq!(system.locker_message(), Some(LOCKER_MESSAGE));

        out.clear();
        system.handle(&[Event::PlaythroughStarted, tick()], near_locker, &interact(), &mut out);
        assert_eq!(out.len(), 1);
    }

    #[test]
    fn locker_message_fades_after_its_duration() {
        let mut system = system();
        let mut out = Vec::new();
        let locker = Config::default().locker;
        system.handle(&[tick()], locker, &interact(), &mut out);

        let five_seconds = Event::TimeAdvanced {
            dt: Duration::from_secs(5),
        };
        system.handle(&[five_seconds], locker, &PlayerInput::default(), &mut out);

        assert_eq!(system.locker_message(), None);
    }

    #[test]
    fn friend_dialogue_opens_nearby_and_closes_far_away() {
        let mut system = system();
        let mut out = Vec::new();
        let friend = Config::default().friend;

        system.handle(&[tick()], friend.offset(55.0, 0.0), &interact(), &mut out);
        assert_eq!(system.dialogue(), None);

        system.handle(&[tick()], friend.offset(49.0, 0.0), &interact(), &mut out);
        assert_eq!(system.dialogue(), Some(FRIEND_DIALOGUE));

        system.handle(
            &[tick()],
            friend.offset(58.0, 0.0),
            &PlayerInput::default(),
            &mut out,
        );
        assert_eq!(system.dialogue(), Some(FRIEND_DIALOGUE));

        system.handle(
            &[tick()],
            friend.offset(61.0, 0.0),
            &PlayerInput::default(),
            &mut out,
        );
        assert_eq!(system.dialogue(), None);
    }

    #[test]
    fn presses_without_time_advancing_are_ignored() {
        let mut system = system();
        let mut out = Vec::new();

        system.handle(&[], TICKET, &interact(), &mut out);

        assert_eq!(system.ticket(), TicketState::Hidden);
    }

    #[test]
    fn encounters_track_boost_and_captures() {
        let mut system = system();
        let mut out = Vec::new();
        let far = Position::new(0.0, 0.0);

        system.handle(
            &[
                Event::SpeedBoostGranted {
                    duration: Duration::from_secs(10),
                },
                Event::PlayerCaught {
                    captures: 1,
                    player_reset: far,
                    pursuer_reset: far,
                },
            ],
            far,
            &PlayerInput::default(),
            &mut out,
        );
        assert_eq!(
            system.encounters(),
            Encounters {
                positive: true,
                negative: true,
                hidden: false,
            }
        );

        system.handle(&[Event::SpeedBoostExpired], far, &PlayerInput::default(), &mut out);
        assert!(!system.encounters().positive);
        assert!(system.encounters().negative);
    }
}
