//! Turns the hotkey's repeating pulse into an on/off toggle.
//!
//! The shell reports every key-down, auto-repeat included, and never the
//! key-up.  A pulse while OFF always switches ON.  A pulse while ON only
//! switches OFF when at least [`QUIET_GAP`] has passed since the previous
//! pulse; anything quicker is taken as repeat of the same press.  Every
//! pulse refreshes the timestamp, so holding the key keeps the mode ON.

use std::fmt;
use std::time::{Duration, Instant};

/// Minimum pause between pulses for the second one to count as a new press.
pub const QUIET_GAP: Duration = Duration::from_millis(300);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ToggleState {
    #[default]
    Off,
    On,
}

impl fmt::Display for ToggleState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ToggleState::Off => write!(f, "off"),
            ToggleState::On => write!(f, "on"),
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct ToggleDebouncer {
    state: ToggleState,
    last_pulse: Option<Instant>,
}

impl ToggleDebouncer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> ToggleState {
        self.state
    }

    pub fn is_on(&self) -> bool {
        self.state == ToggleState::On
    }

    /// Feed one pulse received at `now`.
    ///
    /// Returns the new state when the pulse caused a transition, `None`
    /// when it was absorbed as key repeat.
    pub fn pulse(&mut self, now: Instant) -> Option<ToggleState> {
        let previous = self.last_pulse.replace(now);
        match self.state {
            ToggleState::Off => {
                self.state = ToggleState::On;
                Some(ToggleState::On)
            }
            ToggleState::On => {
                let gap = previous
                    .map(|last| now.saturating_duration_since(last))
                    .unwrap_or(Duration::MAX);
                if gap >= QUIET_GAP {
                    self.state = ToggleState::Off;
                    Some(ToggleState::Off)
                } else {
                    None
                }
            }
        }
    }
}
