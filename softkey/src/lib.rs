//! softkey crate root
//!
//! Front end over `softkey-core`: named letter layouts, a keyboard config
//! that extends the core `Config`, and a factory that wires a ready-to-use
//! `KeyDispatcher` from them.
//!
//! Public API exported here:
//! - `KeyboardConfig` from `config`
//! - `letter_rows` / `layout_table` / `LAYOUT_NAMES` from `layouts`
//! - `create_keyboard` / `create_keyboard_with_clock` from `keyboard`

pub mod config;
pub mod keyboard;
pub mod layouts;

// Engine types used by callers.
pub use softkey_core::{
    BufferMutation, Clock, Config, InputEvent, KeyDispatcher, KeyEvent, KeyboardContext,
    KeyboardGeometry, LayoutMode, LayoutTable, ManualClock, Notification, ReplacementEntry,
    ReplacementTable, ShiftState, SpecialKey, SystemClock,
};

pub use config::KeyboardConfig;
pub use keyboard::{create_keyboard, create_keyboard_with_clock};
pub use layouts::{layout_table, letter_rows, LAYOUT_NAMES};
