//! Seeded stand-in for a human at the keyboard.

use maze_escape_core::{Phase, PlayerInput};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

const MIN_HOLD_FRAMES: u32 = 8;
const MAX_HOLD_FRAMES: u32 = 90;
const INTERACT_PROBABILITY: f64 = 0.05;

/// Produces deterministic pseudo-random input from a seed.
///
/// Screens are confirmed straight away. During play a random direction is
/// held for a random number of frames, with the occasional interaction press.
#[derive(Debug)]
pub(crate) struct Autopilot {
    rng: ChaCha8Rng,
    held: PlayerInput,
    frames_left: u32,
}

impl Autopilot {
    /// Creates an autopilot whose choices are fully determined by `seed`.
    pub(crate) fn new(seed: u64) -> Self {
        Self {
            rng: ChaCha8Rng::seed_from_u64(seed),
            held: PlayerInput::default(),
            frames_left: 0,
        }
    }

    /// Chooses the input for the next frame in the provided phase.
    pub(crate) fn next_input(&mut self, phase: Phase) -> PlayerInput {
        match phase {
            Phase::Menu | Phase::Tutorial => PlayerInput {
                confirm: true,
                ..PlayerInput::default()
            },
            Phase::Playing => {
                if self.frames_left == 0 {
                    self.held = self.pick_direction();
                    self.frames_left = self.rng.gen_range(MIN_HOLD_FRAMES..=MAX_HOLD_FRAMES);
                }
                self.frames_left -= 1;
                PlayerInput {
                    interact: self.rng.gen_bool(INTERACT_PROBABILITY),
                    ..self.held
                }
            }
            Phase::Paused | Phase::Won | Phase::Lost | Phase::Leaderboard | Phase::Exited => {
                PlayerInput::default()
            }
        }
    }

    fn pick_direction(&mut self) -> PlayerInput {
        let mut input = PlayerInput::default();
        match self.rng.gen_range(0..5) {
            0 => input.up = true,
            1 => input.down = true,
            2 => input.left = true,
            3 => input.right = true,
            _ => {}
        }
        input
    }
}
