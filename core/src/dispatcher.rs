//! Key dispatch state machine.
//!
//! `KeyboardState` is the plain session state (buffer, shift, layout mode,
//! auto-capitalization) and `handle_event` is the pure transition function
//! over it. `KeyDispatcher` wraps both with a clock, the layout table, the
//! replacement table and the current geometry, and keeps a `KeyboardContext`
//! up to date for the host.

use std::time::Duration;

use crate::autocap::AutoCapitalizationPolicy;
use crate::clock::{Clock, SystemClock};
use crate::context::KeyboardContext;
use crate::geometry::{compute_geometry, KeyboardGeometry};
use crate::layout::{LayoutMode, LayoutTable, SpecialKey};
use crate::shift::{ShiftState, ShiftStateMachine};
use crate::shortcut::{ReplacementEntry, ReplacementTable, ShortcutMatcher};
use crate::text_buffer::TextBuffer;
use crate::Config;

/// Notification key used when the host overwrites the buffer.
pub const SET_TEXT_KEY: &str = "set_text";

/// Notification key used when the last word is replaced.
pub const REPLACE_KEY: &str = "suggestion";

/// Raw key event as delivered by the host.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyEvent {
    pub key_id: String,
    pub is_special: bool,
}

impl KeyEvent {
    pub fn new<T: Into<String>>(key_id: T, is_special: bool) -> Self {
        Self {
            key_id: key_id.into(),
            is_special,
        }
    }

    /// A plain character key.
    pub fn character<T: Into<String>>(key_id: T) -> Self {
        Self::new(key_id, false)
    }

    /// A special key.
    pub fn special(key: SpecialKey) -> Self {
        Self::new(key.id(), true)
    }

    /// Interpret the event.
    ///
    /// Special events whose identifier is not a known special key are typed
    /// as literal text.
    pub fn action(&self) -> KeyAction<'_> {
        if self.is_special {
            if let Some(key) = SpecialKey::from_id(&self.key_id) {
                return KeyAction::Special(key);
            }
        }
        KeyAction::Text(&self.key_id)
    }
}

/// Parsed meaning of a key event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyAction<'a> {
    Text(&'a str),
    Special(SpecialKey),
}

/// Events accepted by the pure transition function.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputEvent {
    /// A key press
    Key(KeyEvent),
    /// Host overwrites the buffer (existing field content, external rewrite)
    SetText(String),
    /// Replace the trailing word, e.g. with an accepted suggestion
    ReplaceLastWord(String),
}

/// Buffer mutation the host should mirror into its own text field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BufferMutation {
    pub key: String,
    pub resulting_text: String,
}

/// Output of the dispatcher, in the order the changes happened.
#[derive(Debug, Clone, PartialEq)]
pub enum Notification {
    BufferChanged(BufferMutation),
    ShiftChanged(ShiftState),
    ModeChanged(LayoutMode),
    /// Globe or emoji key: the host should switch input method / panel
    InputSwitch(SpecialKey),
    /// Key rectangles were recomputed
    GeometryChanged,
}

/// Session state of the keyboard.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyboardState {
    buffer: TextBuffer,
    shift: ShiftStateMachine,
    mode: LayoutMode,
    autocap: AutoCapitalizationPolicy,
    last_space: Option<Duration>,
    double_space_period: bool,
}

impl KeyboardState {
    /// Fresh session: empty buffer, letters layout, shift off.
    pub fn new(config: &Config) -> Self {
        Self::with_text(config, "")
    }

    /// Session starting from the host field's existing content.
    pub fn with_text<T: Into<String>>(config: &Config, text: T) -> Self {
        let buffer = TextBuffer::from_text(text);
        let mut autocap = AutoCapitalizationPolicy::new(config.auto_capitalize);
        autocap.evaluate(buffer.text());
        Self {
            buffer,
            shift: ShiftStateMachine::with_window(config.double_tap_window()),
            mode: LayoutMode::Letters,
            autocap,
            last_space: None,
            double_space_period: config.double_space_period,
        }
    }

    pub fn buffer(&self) -> &TextBuffer {
        &self.buffer
    }

    pub fn shift_state(&self) -> ShiftState {
        self.shift.state()
    }

    pub fn mode(&self) -> LayoutMode {
        self.mode
    }

    pub fn auto_capitalize(&self) -> bool {
        self.autocap.is_armed()
    }

    /// Whether the next character key will be typed uppercase.
    pub fn uppercase_next(&self) -> bool {
        self.shift.state().is_active() || self.autocap.is_armed()
    }

    /// Apply one event at time `now`, returning what changed.
    pub fn apply(&mut self, event: &InputEvent, now: Duration) -> Vec<Notification> {
        let mut notes = Vec::new();
        match event {
            InputEvent::Key(key) => self.apply_key(key, now, &mut notes),
            InputEvent::SetText(text) => {
                self.last_space = None;
                self.buffer.set_text(text.as_str());
                self.buffer_changed(SET_TEXT_KEY, &mut notes);
            }
            InputEvent::ReplaceLastWord(replacement) => {
                self.last_space = None;
                self.buffer.replace_last_word(replacement);
                self.buffer_changed(REPLACE_KEY, &mut notes);
            }
        }
        notes
    }

    fn apply_key(&mut self, key: &KeyEvent, now: Duration, notes: &mut Vec<Notification>) {
        tracing::trace!(key = %key.key_id, special = key.is_special, "key event");

        match key.action() {
            KeyAction::Text(text) => {
                let typed = if self.uppercase_next() {
                    text.to_uppercase()
                } else {
                    text.to_lowercase()
                };
                self.buffer.append_text(&typed);
                if self.shift.consume_character() {
                    notes.push(Notification::ShiftChanged(self.shift.state()));
                }
                self.buffer_changed(&key.key_id, notes);
            }
            KeyAction::Special(SpecialKey::Delete) => {
                self.buffer.delete_last();
                self.buffer_changed(&key.key_id, notes);
            }
            KeyAction::Special(SpecialKey::Space) => {
                if self.is_double_space(now) {
                    if self.buffer.text().ends_with(' ') {
                        self.buffer.delete_last();
                    }
                    self.buffer.append_text(". ");
                    tracing::debug!("double space converted to period");
                } else {
                    self.buffer.append_text(" ");
                }
                self.last_space = Some(now);
                self.buffer_changed(&key.key_id, notes);
            }
            KeyAction::Special(special @ (SpecialKey::Dot | SpecialKey::Enter)) => {
                if let Some(literal) = special.literal() {
                    self.buffer.append_text(literal);
                }
                self.buffer_changed(&key.key_id, notes);
            }
            KeyAction::Special(SpecialKey::Shift) => {
                let state = self.shift.press(now);
                tracing::debug!(?state, "shift pressed");
                notes.push(Notification::ShiftChanged(state));
            }
            KeyAction::Special(
                special @ (SpecialKey::Numbers | SpecialKey::Symbols | SpecialKey::Letters),
            ) => {
                if let Some(mode) = special.target_mode() {
                    self.switch_mode(mode, notes);
                }
            }
            KeyAction::Special(special @ (SpecialKey::Globe | SpecialKey::Emoji)) => {
                notes.push(Notification::InputSwitch(special));
            }
        }
    }

    fn switch_mode(&mut self, mode: LayoutMode, notes: &mut Vec<Notification>) {
        let shift_was_active = self.shift.state().is_active();
        self.shift.reset();
        if self.mode != mode {
            tracing::debug!(from = ?self.mode, to = ?mode, "layout mode switch");
            self.mode = mode;
            notes.push(Notification::ModeChanged(mode));
        }
        if shift_was_active {
            notes.push(Notification::ShiftChanged(ShiftState::Off));
        }
    }

    /// Space pressed within the double-tap window of the previous space.
    ///
    /// The space timestamp is independent of shift and other keys.
    fn is_double_space(&self, now: Duration) -> bool {
        if !self.double_space_period {
            return false;
        }
        match self.last_space {
            Some(prev) => now.saturating_sub(prev) < self.shift.double_tap_window(),
            None => false,
        }
    }

    fn buffer_changed(&mut self, key: &str, notes: &mut Vec<Notification>) {
        self.autocap.evaluate(self.buffer.text());
        notes.push(Notification::BufferChanged(BufferMutation {
            key: key.to_string(),
            resulting_text: self.buffer.text().to_string(),
        }));
    }
}

impl Default for KeyboardState {
    fn default() -> Self {
        Self::new(&Config::default())
    }
}

/// Pure transition: consume `state` and `event`, return the next state and
/// the notifications the host should act on.
pub fn handle_event<C: Clock + ?Sized>(
    mut state: KeyboardState,
    event: &InputEvent,
    clock: &C,
) -> (KeyboardState, Vec<Notification>) {
    let notes = state.apply(event, clock.now());
    (state, notes)
}

/// Keyboard engine driven by host events.
///
/// # Example
///
/// ```
/// use softkey_core::{Config, KeyDispatcher, KeyEvent, SpecialKey};
///
/// let mut keyboard = KeyDispatcher::new(Config::default());
/// keyboard.process_key(KeyEvent::character("h"));
/// keyboard.process_key(KeyEvent::character("i"));
/// keyboard.process_key(KeyEvent::special(SpecialKey::Space));
/// assert_eq!(keyboard.context().buffer_text, "Hi ");
/// ```
#[derive(Debug)]
pub struct KeyDispatcher<C: Clock = SystemClock> {
    state: KeyboardState,
    clock: C,
    config: Config,
    layout: LayoutTable,
    shortcuts: ReplacementTable,
    matcher: ShortcutMatcher,
    container_width: f32,
    geometry: KeyboardGeometry,
    context: KeyboardContext,
}

impl KeyDispatcher<SystemClock> {
    /// Dispatcher with the system clock and the default QWERTY table.
    pub fn new(config: Config) -> Self {
        let layout = LayoutTable::qwerty(&config.weights);
        Self::with_clock(config, layout, SystemClock::new())
    }
}

impl<C: Clock> KeyDispatcher<C> {
    /// Dispatcher with an explicit layout table and time source.
    pub fn with_clock(config: Config, layout: LayoutTable, clock: C) -> Self {
        let state = KeyboardState::new(&config);
        let geometry = compute_geometry(0.0, state.mode(), &layout, &config.geometry_params());
        let matcher = ShortcutMatcher::with_limit(config.max_suggestions);
        let mut dispatcher = Self {
            state,
            clock,
            config,
            layout,
            shortcuts: ReplacementTable::new(),
            matcher,
            container_width: 0.0,
            geometry,
            context: KeyboardContext::new(),
        };
        dispatcher.sync_context();
        dispatcher
    }

    pub fn context(&self) -> &KeyboardContext {
        &self.context
    }

    pub fn state(&self) -> &KeyboardState {
        &self.state
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn layout(&self) -> &LayoutTable {
        &self.layout
    }

    pub fn clock(&self) -> &C {
        &self.clock
    }

    /// Key rectangles for the current width and mode.
    pub fn geometry(&self) -> &KeyboardGeometry {
        &self.geometry
    }

    pub fn container_width(&self) -> f32 {
        self.container_width
    }

    pub fn shortcuts(&self) -> &ReplacementTable {
        &self.shortcuts
    }

    /// Install the replacement table supplied by the host's settings store.
    pub fn set_replacement_table(&mut self, table: ReplacementTable) {
        tracing::debug!(entries = table.len(), "replacement table installed");
        self.shortcuts = table;
        self.sync_context();
    }

    /// Current suggestions for the last word.
    pub fn suggestions(&self) -> Vec<&ReplacementEntry> {
        self.matcher
            .find_matches(&self.shortcuts, self.state.buffer().last_word())
    }

    /// Process one key event.
    pub fn process_key(&mut self, key: KeyEvent) -> Vec<Notification> {
        self.process_event(InputEvent::Key(key))
    }

    /// Process any input event.
    pub fn process_event(&mut self, event: InputEvent) -> Vec<Notification> {
        let mut notes = self.state.apply(&event, self.clock.now());
        if notes
            .iter()
            .any(|n| matches!(n, Notification::ModeChanged(_)))
        {
            self.recompute_geometry();
            notes.push(Notification::GeometryChanged);
        }
        self.sync_context();
        notes
    }

    /// Overwrite the buffer with host-owned content.
    pub fn set_text<T: Into<String>>(&mut self, text: T) -> Vec<Notification> {
        self.process_event(InputEvent::SetText(text.into()))
    }

    /// Replace the last word with the replacement of suggestion `index`.
    ///
    /// Returns no notifications when `index` is out of range.
    pub fn apply_suggestion(&mut self, index: usize) -> Vec<Notification> {
        let replacement = match self.suggestions().get(index) {
            Some(entry) => entry.replacement.clone(),
            None => return Vec::new(),
        };
        self.process_event(InputEvent::ReplaceLastWord(replacement))
    }

    /// Container width changed: recompute all key rectangles.
    pub fn set_container_width(&mut self, width: f32) -> Vec<Notification> {
        self.container_width = width;
        self.recompute_geometry();
        vec![Notification::GeometryChanged]
    }

    /// Start a new session, discarding the buffer.
    pub fn reset(&mut self) -> Vec<Notification> {
        let previous_mode = self.state.mode();
        self.state = KeyboardState::new(&self.config);
        let mut notes = Vec::new();
        if previous_mode != self.state.mode() {
            self.recompute_geometry();
            notes.push(Notification::GeometryChanged);
        }
        self.sync_context();
        notes
    }

    fn recompute_geometry(&mut self) {
        self.geometry = compute_geometry(
            self.container_width,
            self.state.mode(),
            &self.layout,
            &self.config.geometry_params(),
        );
    }

    fn sync_context(&mut self) {
        let suggestions = self
            .matcher
            .find_matches(&self.shortcuts, self.state.buffer().last_word());
        self.context.sync(&self.state, &suggestions);
    }
}
