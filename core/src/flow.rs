//! Explicit state machine describing which screen-level phase the game is in.

use serde::{Deserialize, Serialize};

/// Screen-level phases the game moves through.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Phase {
    /// Title menu shown at boot.
    Menu,
    /// Instructions shown before a playthrough begins.
    Tutorial,
    /// Active gameplay; the only phase in which simulated time advances.
    Playing,
    /// Gameplay frozen until unpaused.
    Paused,
    /// The player boarded the bus.
    Won,
    /// The countdown ran out.
    Lost,
    /// High-score table shown after a win.
    Leaderboard,
    /// The player quit from the menu.
    Exited,
}

/// Inputs that drive the phase state machine.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Trigger {
    /// Leave the menu for the tutorial.
    Start,
    /// Leave the tutorial and begin a fresh playthrough.
    Begin,
    /// Step back towards the menu.
    Back,
    /// Quit from the menu.
    Exit,
    /// Pause or resume gameplay.
    TogglePause,
    /// Board the bus with the ticket in hand.
    BoardBus,
    /// The countdown expired.
    TimeUp,
    /// Open the leaderboard after a win.
    ShowLeaderboard,
    /// Return to the menu from a result screen.
    ReturnToMenu,
}

const TRANSITIONS: [(Phase, Trigger, Phase); 13] = [
    (Phase::Menu, Trigger::Start, Phase::Tutorial),
    (Phase::Menu, Trigger::Exit, Phase::Exited),
    (Phase::Tutorial, Trigger::Begin, Phase::Playing),
    (Phase::Tutorial, Trigger::Back, Phase::Menu),
    (Phase::Playing, Trigger::TogglePause, Phase::Paused),
    (Phase::Paused, Trigger::TogglePause, Phase::Playing),
    (Phase::Playing, Trigger::Back, Phase::Menu),
    (Phase::Playing, Trigger::BoardBus, Phase::Won),
    (Phase::Playing, Trigger::TimeUp, Phase::Lost),
    (Phase::Won, Trigger::ShowLeaderboard, Phase::Leaderboard),
    (Phase::Won, Trigger::ReturnToMenu, Phase::Menu),
    (Phase::Lost, Trigger::ReturnToMenu, Phase::Menu),
    (Phase::Leaderboard, Trigger::ReturnToMenu, Phase::Menu),
];

impl Phase {
    /// Looks up the phase reached by applying `trigger`, if the table allows it.
    #[must_use]
    pub fn next(self, trigger: Trigger) -> Option<Phase> {
        TRANSITIONS
            .iter()
            .find(|(from, candidate, _)| *from == self && *candidate == trigger)
            .map(|(_, _, to)| *to)
    }

    /// Reports whether simulated time advances in this phase.
    #[must_use]
    pub const fn is_simulating(self) -> bool {
        matches!(self, Self::Playing)
    }

    /// Reports whether no further transitions are possible.
    #[must_use]
    pub fn is_terminal(self) -> bool {
        TRANSITIONS.iter().all(|(from, _, _)| *from != self)
    }

    /// Reports whether the phase shows the outcome of a playthrough.
    #[must_use]
    pub const fn is_result(self) -> bool {
        matches!(self, Self::Won | Self::Lost)
    }
}

impl Trigger {
    /// Reports whether a successful transition on this trigger starts a new playthrough.
    #[must_use]
    pub const fn starts_playthrough(self) -> bool {
        matches!(self, Self::Begin)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn happy_path_reaches_leaderboard_and_back() {
        let mut phase = Phase::Menu;
        for trigger in [
            Trigger::Start,
            Trigger::Begin,
            Trigger::TogglePause,
            Trigger::TogglePause,
            Trigger::BoardBus,
            Trigger::ShowLeaderboard,
            Trigger::ReturnToMenu,
        ] {
            phase = phase.next(trigger).expect("transition allowed");
        }
        assert_eq!(phase, Phase::Menu);
    }

    #[test]
    fn time_up_only_applies_while_playing() {
        assert_eq!(Phase::Playing.next(Trigger::TimeUp), Some(Phase::Lost));
        assert_eq!(Phase::Paused.next(Trigger::TimeUp), None);
        assert_eq!(Phase::Menu.next(Trigger::TimeUp), None);
    }

    #[test]
    fn exited_is_the_only_terminal_phase() {
        let phases = [
            Phase::Menu,
            Phase::Tutorial,
            Phase::Playing,
            Phase::Paused,
            Phase::Won,
            Phase::Lost,
            Phase::Leaderboard,
            Phase::Exited,
        ];
        let terminal: Vec<_> = phases.into_iter().filter(|p| p.is_terminal()).collect();
        assert_eq!(terminal, vec![Phase::Exited]);
    }

    #[test]
    fn won_and_lost_are_results_but_not_terminal() {
        assert!(Phase::Won.is_result());
        assert!(Phase::Lost.is_result());
        assert!(!Phase::Leaderboard.is_result());
        assert!(!Phase::Exited.is_result());
        assert!(!Phase::Won.is_terminal());
    }

    #[test]
    fn only_playing_simulates() {
        assert!(Phase::Playing.is_simulating());
        assert!(!Phase::Paused.is_simulating());
    }
}
