//! softkey-core
//!
//! Input engine for soft keyboards embedded in a host text field: session
//! text buffer, shift/caps-lock state machine, auto-capitalization, key
//! geometry and text-replacement shortcuts. Front-end crates (see `softkey`)
//! add concrete layouts and wiring.
//!
//! The engine is synchronous and single-threaded. It never touches the host's
//! text field; every buffer change is reported as a `Notification` for the
//! host to mirror.
//!
//! Public API:
//! - `KeyDispatcher` - Event-driven engine owning the session state
//! - `KeyboardState` / `handle_event` - Pure state + transition function
//! - `TextBuffer` - Session text with last-word tracking
//! - `ShiftStateMachine` - Shift / caps-lock with double-tap detection
//! - `compute_geometry` - Key rectangles for a container width
//! - `ShortcutMatcher` / `ReplacementTable` - Shortcut suggestions
//! - `Config` - Configuration and feature flags
use serde::{Deserialize, Serialize};
use std::time::Duration;

pub mod clock;
pub use clock::{Clock, ManualClock, SystemClock};

pub mod text_buffer;
pub use text_buffer::TextBuffer;

pub mod autocap;
pub use autocap::{should_capitalize, AutoCapitalizationPolicy};

pub mod shift;
pub use shift::{ShiftState, ShiftStateMachine};

pub mod layout;
pub use layout::{KeyDefinition, KeyWeights, LayoutMode, LayoutTable, SpecialKey};

pub mod geometry;
pub use geometry::{compute_geometry, GeometryParams, KeyGeometry, KeyboardGeometry, Rect};

pub mod shortcut;
pub use shortcut::{ReplacementEntry, ReplacementTable, ShortcutMatcher};

pub mod context;
pub use context::KeyboardContext;

pub mod dispatcher;
pub use dispatcher::{
    handle_event, BufferMutation, InputEvent, KeyAction, KeyDispatcher, KeyEvent, KeyboardState,
    Notification,
};

/// Generic configuration for the keyboard engine.
///
/// Front-end crates flatten this into their own config (see
/// `softkey::KeyboardConfig`).
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct Config {
    /// Window for shift and space double taps, in milliseconds
    pub double_tap_window_ms: u64,

    /// Maximum number of shortcut suggestions
    pub max_suggestions: usize,

    /// Capitalize the first letter of each sentence
    pub auto_capitalize: bool,

    /// Turn two quick spaces after a word into ". "
    pub double_space_period: bool,

    // Geometry
    /// Height of every key
    pub key_height: f32,
    /// Vertical gap between rows
    pub row_spacing: f32,
    /// Horizontal gap between keys
    pub key_spacing: f32,
    pub top_padding: f32,
    pub bottom_padding: f32,

    /// Relative widths of non-letter keys
    pub weights: KeyWeights,
}

impl Default for Config {
    fn default() -> Self {
        let geometry = GeometryParams::default();
        Self {
            double_tap_window_ms: 300,
            max_suggestions: shortcut::DEFAULT_MAX_SUGGESTIONS,
            auto_capitalize: true,
            double_space_period: true,
            key_height: geometry.key_height,
            row_spacing: geometry.row_spacing,
            key_spacing: geometry.key_spacing,
            top_padding: geometry.top_padding,
            bottom_padding: geometry.bottom_padding,
            weights: KeyWeights::default(),
        }
    }
}

impl Config {
    /// Load configuration from a TOML file.
    pub fn load_toml<P: AsRef<std::path::Path>>(path: P) -> anyhow::Result<Self> {
        use anyhow::Context;

        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("read config {}", path.display()))?;
        let config = toml::from_str(&content)
            .with_context(|| format!("parse config {}", path.display()))?;
        Ok(config)
    }

    /// Save configuration to a TOML file.
    pub fn save_toml<P: AsRef<std::path::Path>>(&self, path: P) -> anyhow::Result<()> {
        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Load configuration from TOML string.
    pub fn from_toml_str(content: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(content)
    }

    /// Serialize configuration to TOML string.
    pub fn to_toml_string(&self) -> Result<String, toml::ser::Error> {
        toml::to_string_pretty(self)
    }

    /// Double-tap window as a `Duration`.
    pub fn double_tap_window(&self) -> Duration {
        Duration::from_millis(self.double_tap_window_ms)
    }

    /// Geometry parameters for `compute_geometry`.
    pub fn geometry_params(&self) -> GeometryParams {
        GeometryParams {
            key_height: self.key_height,
            row_spacing: self.row_spacing,
            key_spacing: self.key_spacing,
            top_padding: self.top_padding,
            bottom_padding: self.bottom_padding,
        }
    }
}

/// Utility helpers.
pub mod utils {
    /// NFC-normalize and trim, used for stored shortcut keys.
    pub fn normalize(s: &str) -> String {
        use unicode_normalization::UnicodeNormalization;
        s.nfc().collect::<String>().trim().to_string()
    }

    /// Case-fold for matching: NFC, then lowercase.
    ///
    /// Composed and decomposed spellings ("café" typed two ways) compare equal.
    pub fn fold(s: &str) -> String {
        use unicode_normalization::UnicodeNormalization;
        s.nfc().collect::<String>().to_lowercase()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let cfg = Config::default();
        assert_eq!(cfg.double_tap_window(), Duration::from_millis(300));
        assert_eq!(cfg.max_suggestions, 5);
        assert!(cfg.auto_capitalize);
        assert_eq!(cfg.geometry_params(), GeometryParams::default());
    }

    #[test]
    fn test_toml_round_trip() {
        let mut cfg = Config::default();
        cfg.key_spacing = 4.0;
        cfg.weights.space = 4.0;

        let text = cfg.to_toml_string().expect("serialize");
        let back = Config::from_toml_str(&text).expect("parse");
        assert_eq!(back, cfg);
    }

    #[test]
    fn test_partial_toml_uses_defaults() {
        let cfg = Config::from_toml_str("auto_capitalize = false\n").expect("parse");
        assert!(!cfg.auto_capitalize);
        assert_eq!(cfg.max_suggestions, 5);
        assert_eq!(cfg.weights, KeyWeights::default());
    }

    #[test]
    fn test_fold_matches_decomposed() {
        assert_eq!(utils::fold("CAFE\u{301}"), utils::fold("café"));
        assert_eq!(utils::normalize("  e\u{301} "), "\u{e9}");
    }
}
