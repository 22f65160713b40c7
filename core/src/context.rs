//! Keyboard context for host communication.
//!
//! The `KeyboardContext` struct is a plain data container with public fields.
//! After every event the dispatcher refreshes it, and the host reads it to
//! update the preview, the suggestion strip and the shift key visuals.

use crate::dispatcher::KeyboardState;
use crate::layout::LayoutMode;
use crate::shift::ShiftState;
use crate::shortcut::ReplacementEntry;

/// Snapshot of everything a host renders besides key rectangles.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct KeyboardContext {
    /// Current buffer text
    pub buffer_text: String,

    /// Trailing word of the buffer, used for suggestions
    pub last_word: String,

    /// Shift key state
    pub shift_state: ShiftState,

    /// Active key set
    pub layout_mode: LayoutMode,

    /// Whether auto-capitalization is armed for the next letter
    pub auto_capitalize: bool,

    /// Whether the next letter will be typed uppercase
    pub uppercase_next: bool,

    /// Shortcut suggestions for `last_word`, in table order
    pub suggestions: Vec<ReplacementEntry>,
}

impl KeyboardContext {
    pub fn new() -> Self {
        Self::default()
    }

    /// Refresh every field from `state` and the current suggestions.
    pub fn sync(&mut self, state: &KeyboardState, suggestions: &[&ReplacementEntry]) {
        self.buffer_text.clear();
        self.buffer_text.push_str(state.buffer().text());
        self.last_word.clear();
        self.last_word.push_str(state.buffer().last_word());
        self.shift_state = state.shift_state();
        self.layout_mode = state.mode();
        self.auto_capitalize = state.auto_capitalize();
        self.uppercase_next = state.uppercase_next();
        self.suggestions = suggestions.iter().map(|e| (*e).clone()).collect();
    }
}
