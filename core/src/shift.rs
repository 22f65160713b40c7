//! Shift / caps-lock state machine.
//!
//! A single shift tap arms a one-shot shift that clears after the next
//! character. Two taps closer together than the double-tap window toggle
//! caps lock, which stays on until shift is tapped again.

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Default window for detecting a double tap.
pub const DEFAULT_DOUBLE_TAP_WINDOW: Duration = Duration::from_millis(300);

/// Current shift state shown on the shift key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ShiftState {
    /// Lowercase (subject to auto-capitalization)
    Off,
    /// Uppercase for the next character only
    Shift,
    /// Uppercase until toggled off
    CapsLock,
}

impl Default for ShiftState {
    fn default() -> Self {
        Self::Off
    }
}

impl ShiftState {
    /// Whether this state forces uppercase by itself.
    pub fn is_active(self) -> bool {
        self != ShiftState::Off
    }
}

/// Shift state plus the timestamp needed for double-tap detection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ShiftStateMachine {
    state: ShiftState,
    last_press: Option<Duration>,
    double_tap_window: Duration,
}

impl ShiftStateMachine {
    pub fn new() -> Self {
        Self::with_window(DEFAULT_DOUBLE_TAP_WINDOW)
    }

    /// Create a state machine with a custom double-tap window.
    pub fn with_window(double_tap_window: Duration) -> Self {
        Self {
            state: ShiftState::Off,
            last_press: None,
            double_tap_window,
        }
    }

    pub fn state(&self) -> ShiftState {
        self.state
    }

    pub fn double_tap_window(&self) -> Duration {
        self.double_tap_window
    }

    /// Handle a shift key press at `now` and return the new state.
    pub fn press(&mut self, now: Duration) -> ShiftState {
        let double_tap = self
            .last_press
            .map(|prev| now.saturating_sub(prev) < self.double_tap_window)
            .unwrap_or(false);
        self.last_press = Some(now);

        self.state = if double_tap {
            match self.state {
                ShiftState::CapsLock => ShiftState::Off,
                _ => ShiftState::CapsLock,
            }
        } else {
            match self.state {
                ShiftState::Off => ShiftState::Shift,
                ShiftState::Shift | ShiftState::CapsLock => ShiftState::Off,
            }
        };
        self.state
    }

    /// A character key was consumed. Clears a one-shot shift.
    ///
    /// Returns true if the state changed.
    pub fn consume_character(&mut self) -> bool {
        if self.state == ShiftState::Shift {
            self.state = ShiftState::Off;
            true
        } else {
            false
        }
    }

    /// Force the state to Off, e.g. on a layout mode switch.
    ///
    /// The last press timestamp is kept; only the shift key itself moves it.
    pub fn reset(&mut self) {
        self.state = ShiftState::Off;
    }
}

impl Default for ShiftStateMachine {
    fn default() -> Self {
        Self::new()
    }
}
