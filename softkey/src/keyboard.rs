//! Factories that assemble a `KeyDispatcher` from a `KeyboardConfig`.

use softkey_core::{Clock, KeyDispatcher, ReplacementTable, SystemClock};

use crate::config::KeyboardConfig;
use crate::layouts::{layout_table, LAYOUT_NAMES};

/// Build a keyboard on the system clock.
///
/// Fails when the layout name is unknown or the shortcuts file cannot be
/// read.
pub fn create_keyboard(config: KeyboardConfig) -> anyhow::Result<KeyDispatcher<SystemClock>> {
    create_keyboard_with_clock(config, SystemClock::new())
}

/// Build a keyboard with an explicit time source.
pub fn create_keyboard_with_clock<C: Clock>(
    config: KeyboardConfig,
    clock: C,
) -> anyhow::Result<KeyDispatcher<C>> {
    let Some(layout) = layout_table(&config.letter_layout, &config.base.weights) else {
        anyhow::bail!(
            "unknown letter layout '{}' (expected one of: {})",
            config.letter_layout,
            LAYOUT_NAMES.join(", ")
        );
    };

    let shortcuts = match &config.shortcuts_path {
        Some(path) => ReplacementTable::load_json(path)?,
        None => ReplacementTable::new(),
    };

    tracing::info!(
        layout = %config.letter_layout,
        shortcuts = shortcuts.len(),
        "keyboard created"
    );

    let mut keyboard = KeyDispatcher::with_clock(config.into_base(), layout, clock);
    if !shortcuts.is_empty() {
        keyboard.set_replacement_table(shortcuts);
    }
    Ok(keyboard)
}
