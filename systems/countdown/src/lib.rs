#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Countdown system that ends a playthrough when its time budget runs out.

use std::{fmt, time::Duration};

use log::info;
use maze_escape_core::{Command, Event, Trigger};

/// Time budget granted to a playthrough when none is configured.
pub const DEFAULT_TIME_BUDGET: Duration = Duration::from_secs(300);

/// Saturating countdown with an edge-triggered expiry.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Countdown {
    budget: Duration,
    remaining: Duration,
    fired: bool,
}

impl Countdown {
    /// Creates a countdown holding the provided time budget.
    #[must_use]
    pub const fn new(budget: Duration) -> Self {
        Self {
            budget,
            remaining: budget,
            fired: false,
        }
    }

    /// Subtracts `dt`, saturating at zero.
    ///
    /// Returns `true` exactly once: on the call that first observes the
    /// countdown at zero. A zero budget therefore expires on its first
    /// decrement.
    pub fn decrement(&mut self, dt: Duration) -> bool {
        self.remaining = self.remaining.saturating_sub(dt);
        if self.remaining.is_zero() && !self.fired {
            self.fired = true;
            return true;
        }
        false
    }

    /// Time left before expiry.
    #[must_use]
    pub const fn time_left(&self) -> Duration {
        self.remaining
    }

    /// Time left before expiry in fractional seconds.
    #[must_use]
    pub fn seconds_left(&self) -> f32 {
        self.remaining.as_secs_f32()
    }

    /// Whether the remaining time has reached zero.
    #[must_use]
    pub const fn is_expired(&self) -> bool {
        self.remaining.is_zero()
    }

    /// Refills the budget and re-arms the expiry edge.
    pub fn reset(&mut self) {
        self.remaining = self.budget;
        self.fired = false;
    }

    /// Consumes world events and emits a time-up transition once on expiry.
    ///
    /// A new playthrough refills the countdown before any ticks in the same
    /// batch are counted.
    pub fn handle(&mut self, events: &[Event], out: &mut Vec<Command>) {
        for event in events {
            match event {
                Event::PlaythroughStarted => self.reset(),
                Event::TimeAdvanced { dt } => {
                    if self.decrement(*dt) {
                        info!("countdown expired");
                        out.push(Command::Transition {
                            trigger: Trigger::TimeUp,
                        });
                    }
                }
                _ => {}
            }
        }
    }
}

impl Default for Countdown {
    fn default() -> Self {
        Self::new(DEFAULT_TIME_BUDGET)
    }
}

impl fmt::Display for Countdown {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let seconds = self.remaining.as_secs();
        write!(f, "{:02} : {:02}", seconds / 60, seconds % 60)
    }
}
