#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Control system that turns per-frame player input into world commands.

use maze_escape_core::{Command, Phase, PlayerInput, Trigger};

/// Pure system translating input snapshots into movement and phase commands.
#[derive(Debug, Default)]
pub struct Control;

impl Control {
    /// Emits the commands requested by `input` in the provided phase.
    ///
    /// Phase triggers are emitted before movement, and movement is only
    /// requested while playing, so a frame that pauses the game never moves
    /// the player.
    pub fn handle(&mut self, phase: Phase, input: &PlayerInput, out: &mut Vec<Command>) {
        if let Some(trigger) = trigger_for(phase, input) {
            out.push(Command::Transition { trigger });
            return;
        }

        if phase == Phase::Playing {
            if let Some(heading) = input.heading() {
                out.push(Command::MovePlayer { heading });
            }
        }
    }
}

fn trigger_for(phase: Phase, input: &PlayerInput) -> Option<Trigger> {
    match phase {
        Phase::Menu if input.confirm => Some(Trigger::Start),
        Phase::Menu if input.back => Some(Trigger::Exit),
        Phase::Tutorial if input.confirm => Some(Trigger::Begin),
        Phase::Tutorial if input.back => Some(Trigger::Back),
        Phase::Playing if input.back => Some(Trigger::Back),
        Phase::Playing | Phase::Paused if input.pause => Some(Trigger::TogglePause),
        Phase::Won if input.leaderboard => Some(Trigger::ShowLeaderboard),
        Phase::Won | Phase::Lost | Phase::Leaderboard if input.confirm => {
            Some(Trigger::ReturnToMenu)
        }
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use maze_escape_core::Heading;

    fn commands_for(phase: Phase, input: PlayerInput) -> Vec<Command> {
        let mut out = Vec::new();
        Control.handle(phase, &input, &mut out);
        out
    }

    #[test]
    fn movement_is_single_axis_with_fixed_priority() {
        let input = PlayerInput {
            left: true,
            down: true,
            ..PlayerInput::default()
        };

        assert_eq!(
            commands_for(Phase::Playing, input),
            vec![Command::MovePlayer {
                heading: Heading::Down
            }]
        );
    }

    #[test]
    fn movement_is_ignored_outside_play() {
        let input = PlayerInput {
            right: true,
            ..PlayerInput::default()
        };

        assert!(commands_for(Phase::Paused, input).is_empty());
        assert!(commands_for(Phase::Menu, input).is_empty());
    }

    #[test]
    fn confirm_follows_the_phase() {
        let confirm = PlayerInput {
            confirm: true,
            ..PlayerInput::default()
        };
        let expected = [
            (Phase::Menu, Some(Trigger::Start)),
            (Phase::Tutorial, Some(Trigger::Begin)),
            (Phase::Playing, None),
            (Phase::Won, Some(Trigger::ReturnToMenu)),
            (Phase::Lost, Some(Trigger::ReturnToMenu)),
            (Phase::Leaderboard, Some(Trigger::ReturnToMenu)),
            (Phase::Exited, None),
        ];

        for (phase, trigger) in expected {
            assert_eq!(trigger_for(phase, &confirm), trigger, "phase {phase:?}");
        }
    }

    #[test]
    fn back_quits_from_menu_and_steps_back_elsewhere() {
        let back = PlayerInput {
            back: true,
            ..PlayerInput::default()
        };

        assert_eq!(trigger_for(Phase::Menu, &back), Some(Trigger::Exit));
        assert_eq!(trigger_for(Phase::Tutorial, &back), Some(Trigger::Back));
        assert_eq!(trigger_for(Phase::Playing, &back), Some(Trigger::Back));
        assert_eq!(trigger_for(Phase::Paused, &back), None);
    }

    #[test]
    fn pause_toggles_and_suppresses_movement() {
        let input = PlayerInput {
            pause: true,
            up: true,
            ..PlayerInput::default()
        };

        assert_eq!(
            commands_for(Phase::Playing, input),
            vec![Command::Transition {
                trigger: Trigger::TogglePause
            }]
        );
        assert_eq!(
            trigger_for(Phase::Paused, &input),
            Some(Trigger::TogglePause)
        );
    }

    #[test]
    fn leaderboard_only_opens_after_a_win() {
        let input = PlayerInput {
            leaderboard: true,
            ..PlayerInput::default()
        };

        assert_eq!(
            trigger_for(Phase::Won, &input),
            Some(Trigger::ShowLeaderboard)
        );
        assert_eq!(trigger_for(Phase::Lost, &input), None);
    }
}
