//! Keyboard configuration.

use std::path::{Path, PathBuf};

use anyhow::Context;
use serde::{Deserialize, Serialize};

/// Keyboard front-end configuration that extends the base `Config` from core.
///
/// This configuration includes:
/// - All generic options from `softkey_core::Config` (flattened via serde)
/// - The letter layout name ("qwerty", "azerty" or "qwertz")
/// - An optional replacement table file loaded at startup
///
/// # Example
///
/// ```rust
/// use softkey::KeyboardConfig;
///
/// let config = KeyboardConfig::from_toml_str(r#"
///     letter_layout = "azerty"
///     double_tap_window_ms = 250
/// "#).unwrap();
/// assert_eq!(config.letter_layout, "azerty");
/// assert_eq!(config.base().double_tap_window_ms, 250);
/// ```
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct KeyboardConfig {
    /// Engine options (timing, suggestions, geometry, weights)
    #[serde(flatten)]
    pub base: softkey_core::Config,

    /// Letter layout name
    pub letter_layout: String,

    /// JSON replacement table to install at startup
    #[serde(skip_serializing_if = "Option::is_none")]
    pub shortcuts_path: Option<PathBuf>,
}

impl Default for KeyboardConfig {
    fn default() -> Self {
        Self {
            base: softkey_core::Config::default(),
            letter_layout: "qwerty".to_string(),
            shortcuts_path: None,
        }
    }
}

impl KeyboardConfig {
    /// Convert into the base config used by `KeyDispatcher`.
    pub fn into_base(self) -> softkey_core::Config {
        self.base
    }

    pub fn base(&self) -> &softkey_core::Config {
        &self.base
    }

    pub fn base_mut(&mut self) -> &mut softkey_core::Config {
        &mut self.base
    }

    pub fn from_toml_str(content: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(content)
    }

    pub fn to_toml_string(&self) -> Result<String, toml::ser::Error> {
        toml::to_string_pretty(self)
    }

    /// Load from a TOML file.
    ///
    /// A relative `shortcuts_path` is resolved against the config file's
    /// directory.
    pub fn load_toml<P: AsRef<Path>>(path: P) -> anyhow::Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("read config {}", path.display()))?;
        let mut config = Self::from_toml_str(&content)
            .with_context(|| format!("parse config {}", path.display()))?;

        if let (Some(shortcuts), Some(dir)) = (config.shortcuts_path.as_ref(), path.parent()) {
            if shortcuts.is_relative() {
                config.shortcuts_path = Some(dir.join(shortcuts));
            }
        }
        tracing::debug!(path = %path.display(), layout = %config.letter_layout, "loaded keyboard config");
        Ok(config)
    }

    pub fn save_toml<P: AsRef<Path>>(&self, path: P) -> anyhow::Result<()> {
        let path = path.as_ref();
        let content = self.to_toml_string()?;
        std::fs::write(path, content).with_context(|| format!("write config {}", path.display()))?;
        Ok(())
    }
}
