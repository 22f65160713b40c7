//! Key definitions and per-mode layout tables.
//!
//! This module is static data: which keys exist in each layout mode, in what
//! rows, and how wide each key is relative to a letter key. The geometry
//! engine turns these tables into rectangles.

use serde::{Deserialize, Serialize};

/// Key set currently shown on the keyboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LayoutMode {
    Letters,
    Numbers,
    Symbols,
}

impl Default for LayoutMode {
    fn default() -> Self {
        Self::Letters
    }
}

/// Keys with non-literal behaviour.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SpecialKey {
    Shift,
    Delete,
    Enter,
    Space,
    Dot,
    Globe,
    Emoji,
    Numbers,
    Symbols,
    Letters,
}

impl SpecialKey {
    pub const ALL: [SpecialKey; 10] = [
        SpecialKey::Shift,
        SpecialKey::Delete,
        SpecialKey::Enter,
        SpecialKey::Space,
        SpecialKey::Dot,
        SpecialKey::Globe,
        SpecialKey::Emoji,
        SpecialKey::Numbers,
        SpecialKey::Symbols,
        SpecialKey::Letters,
    ];

    /// Parse a host key identifier. Matching ignores ASCII case.
    ///
    /// Returns None for identifiers that are not special keys; callers treat
    /// those as literal text.
    pub fn from_id(id: &str) -> Option<Self> {
        Self::ALL
            .iter()
            .copied()
            .find(|key| key.id().eq_ignore_ascii_case(id))
    }

    /// Canonical identifier.
    pub fn id(self) -> &'static str {
        match self {
            SpecialKey::Shift => "shift",
            SpecialKey::Delete => "delete",
            SpecialKey::Enter => "enter",
            SpecialKey::Space => "space",
            SpecialKey::Dot => "dot",
            SpecialKey::Globe => "globe",
            SpecialKey::Emoji => "emoji",
            SpecialKey::Numbers => "numbers",
            SpecialKey::Symbols => "symbols",
            SpecialKey::Letters => "letters",
        }
    }

    /// Text inserted by this key, if it inserts any.
    pub fn literal(self) -> Option<&'static str> {
        match self {
            SpecialKey::Space => Some(" "),
            SpecialKey::Dot => Some("."),
            SpecialKey::Enter => Some("\n"),
            _ => None,
        }
    }

    /// Layout mode this key switches to, for mode-switch keys.
    pub fn target_mode(self) -> Option<LayoutMode> {
        match self {
            SpecialKey::Numbers => Some(LayoutMode::Numbers),
            SpecialKey::Symbols => Some(LayoutMode::Symbols),
            SpecialKey::Letters => Some(LayoutMode::Letters),
            _ => None,
        }
    }

    /// Whether this key gets the wide "function key" weight.
    pub fn is_function_key(self) -> bool {
        matches!(
            self,
            SpecialKey::Shift
                | SpecialKey::Delete
                | SpecialKey::Enter
                | SpecialKey::Numbers
                | SpecialKey::Symbols
                | SpecialKey::Letters
        )
    }
}

/// Relative key widths, in letter-key units.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct KeyWeights {
    /// Space bar
    pub space: f32,
    /// Shift, delete, enter and the mode-switch keys
    pub function: f32,
    /// Anything else that is not a single character
    pub default: f32,
}

impl Default for KeyWeights {
    fn default() -> Self {
        Self {
            space: 5.0,
            function: 1.5,
            default: 1.0,
        }
    }
}

impl KeyWeights {
    /// Weight for a key. Single-character keys are always exactly one unit.
    pub fn weight_for(&self, id: &str, special: Option<SpecialKey>) -> f32 {
        match special {
            Some(SpecialKey::Space) => self.space,
            Some(key) if key.is_function_key() => self.function,
            Some(_) => self.default,
            None if id.chars().count() == 1 => 1.0,
            None => self.default,
        }
    }
}

/// One key in a layout row.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KeyDefinition {
    pub id: String,
    pub special: Option<SpecialKey>,
    pub weight: f32,
}

impl KeyDefinition {
    /// A key that types its identifier.
    pub fn character<T: Into<String>>(id: T, weights: &KeyWeights) -> Self {
        let id = id.into();
        let weight = weights.weight_for(&id, None);
        Self {
            id,
            special: None,
            weight,
        }
    }

    /// A special key.
    pub fn special(key: SpecialKey, weights: &KeyWeights) -> Self {
        Self {
            id: key.id().to_string(),
            special: Some(key),
            weight: weights.weight_for(key.id(), Some(key)),
        }
    }

    pub fn is_special(&self) -> bool {
        self.special.is_some()
    }

    /// Weight used for layout: single-character keys are one unit whatever
    /// the stored weight says, negative weights count as zero.
    pub fn layout_weight(&self) -> f32 {
        if self.special.is_none() && self.id.chars().count() == 1 {
            1.0
        } else {
            self.weight.max(0.0)
        }
    }
}

/// Rows of keys for every layout mode.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LayoutTable {
    pub letters: Vec<Vec<KeyDefinition>>,
    pub numbers: Vec<Vec<KeyDefinition>>,
    pub symbols: Vec<Vec<KeyDefinition>>,
}

const QWERTY_ROWS: [&str; 3] = ["qwertyuiop", "asdfghjkl", "zxcvbnm"];

const NUMBER_ROWS: [&[&str]; 3] = [
    &["1", "2", "3", "4", "5", "6", "7", "8", "9", "0"],
    &["-", "/", ":", ";", "(", ")", "$", "&", "@", "\""],
    &[".", ",", "?", "!", "'"],
];

const SYMBOL_ROWS: [&[&str]; 3] = [
    &["[", "]", "{", "}", "#", "%", "^", "*", "+", "="],
    &["_", "\\", "|", "~", "<", ">", "€", "£", "¥", "•"],
    &[".", ",", "?", "!", "'"],
];

/// Number of keys in the reference letter row used to size a key unit.
pub const REFERENCE_ROW_KEYS: usize = 10;

impl LayoutTable {
    /// US QWERTY with the given weights.
    pub fn qwerty(weights: &KeyWeights) -> Self {
        Self::from_letter_rows(&QWERTY_ROWS, weights)
    }

    /// Build a table from three rows of letters.
    ///
    /// The third row gets shift and delete around it; every mode gets the
    /// shared bottom row. Numbers and symbols use the standard tables.
    pub fn from_letter_rows(rows: &[&str; 3], weights: &KeyWeights) -> Self {
        let chars = |row: &str| -> Vec<KeyDefinition> {
            row.chars()
                .map(|c| KeyDefinition::character(c.to_string(), weights))
                .collect()
        };

        let mut third = vec![KeyDefinition::special(SpecialKey::Shift, weights)];
        third.extend(chars(rows[2]));
        third.push(KeyDefinition::special(SpecialKey::Delete, weights));

        let letters = vec![
            chars(rows[0]),
            chars(rows[1]),
            third,
            bottom_row(SpecialKey::Numbers, SpecialKey::Globe, weights),
        ];

        Self {
            letters,
            numbers: punctuation_rows(&NUMBER_ROWS, SpecialKey::Symbols, weights),
            symbols: punctuation_rows(&SYMBOL_ROWS, SpecialKey::Numbers, weights),
        }
    }

    /// Rows for `mode`.
    pub fn rows(&self, mode: LayoutMode) -> &[Vec<KeyDefinition>] {
        match mode {
            LayoutMode::Letters => &self.letters,
            LayoutMode::Numbers => &self.numbers,
            LayoutMode::Symbols => &self.symbols,
        }
    }

    /// Number of keys in the letters reference row (the first letters row).
    ///
    /// Falls back to the standard ten when the table has no letter rows.
    pub fn reference_row_len(&self) -> usize {
        self.letters
            .first()
            .map(|row| row.len())
            .filter(|&len| len > 0)
            .unwrap_or(REFERENCE_ROW_KEYS)
    }

    /// Look up a key definition by identifier in `mode`.
    pub fn find(&self, mode: LayoutMode, id: &str) -> Option<&KeyDefinition> {
        self.rows(mode).iter().flatten().find(|key| key.id == id)
    }
}

impl Default for LayoutTable {
    fn default() -> Self {
        Self::qwerty(&KeyWeights::default())
    }
}

fn bottom_row(switch: SpecialKey, extra: SpecialKey, weights: &KeyWeights) -> Vec<KeyDefinition> {
    vec![
        KeyDefinition::special(switch, weights),
        KeyDefinition::special(extra, weights),
        KeyDefinition::special(SpecialKey::Space, weights),
        KeyDefinition::special(SpecialKey::Dot, weights),
        KeyDefinition::special(SpecialKey::Enter, weights),
    ]
}

fn punctuation_rows(
    rows: &[&[&str]; 3],
    switch: SpecialKey,
    weights: &KeyWeights,
) -> Vec<Vec<KeyDefinition>> {
    let keys = |row: &[&str]| -> Vec<KeyDefinition> {
        row.iter()
            .map(|id| KeyDefinition::character(*id, weights))
            .collect()
    };

    let mut third = vec![KeyDefinition::special(switch, weights)];
    third.extend(keys(rows[2]));
    third.push(KeyDefinition::special(SpecialKey::Delete, weights));

    vec![
        keys(rows[0]),
        keys(rows[1]),
        third,
        bottom_row(SpecialKey::Letters, SpecialKey::Emoji, weights),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_special_key_ids_round_trip() {
        for key in SpecialKey::ALL {
            assert_eq!(SpecialKey::from_id(key.id()), Some(key));
        }
        assert_eq!(SpecialKey::from_id("SHIFT"), Some(SpecialKey::Shift));
        assert_eq!(SpecialKey::from_id("tab"), None);
        assert_eq!(SpecialKey::from_id("a"), None);
    }

    #[test]
    fn test_literals_and_targets() {
        assert_eq!(SpecialKey::Space.literal(), Some(" "));
        assert_eq!(SpecialKey::Dot.literal(), Some("."));
        assert_eq!(SpecialKey::Enter.literal(), Some("\n"));
        assert_eq!(SpecialKey::Shift.literal(), None);

        assert_eq!(SpecialKey::Numbers.target_mode(), Some(LayoutMode::Numbers));
        assert_eq!(SpecialKey::Letters.target_mode(), Some(LayoutMode::Letters));
        assert_eq!(SpecialKey::Globe.target_mode(), None);
    }

    #[test]
    fn test_default_weights() {
        let weights = KeyWeights::default();
        assert_eq!(weights.weight_for("q", None), 1.0);
        assert_eq!(weights.weight_for("space", Some(SpecialKey::Space)), 5.0);
        assert_eq!(weights.weight_for("shift", Some(SpecialKey::Shift)), 1.5);
        assert_eq!(weights.weight_for("symbols", Some(SpecialKey::Symbols)), 1.5);
        assert_eq!(weights.weight_for("globe", Some(SpecialKey::Globe)), 1.0);
        assert_eq!(weights.weight_for(".com", None), 1.0);
    }

    #[test]
    fn test_single_letters_ignore_default_weight() {
        let weights = KeyWeights {
            default: 2.0,
            ..KeyWeights::default()
        };
        assert_eq!(weights.weight_for("x", None), 1.0);
        assert_eq!(weights.weight_for(".com", None), 2.0);
    }

    #[test]
    fn test_qwerty_shape() {
        let table = LayoutTable::default();
        assert_eq!(table.reference_row_len(), 10);

        let letters = table.rows(LayoutMode::Letters);
        assert_eq!(letters.len(), 4);
        assert_eq!(letters[0].len(), 10);
        assert_eq!(letters[1].len(), 9);
        assert_eq!(letters[2].first().and_then(|k| k.special), Some(SpecialKey::Shift));
        assert_eq!(letters[2].last().and_then(|k| k.special), Some(SpecialKey::Delete));

        for mode in [LayoutMode::Numbers, LayoutMode::Symbols] {
            let rows = table.rows(mode);
            assert_eq!(rows.len(), 4);
            assert_eq!(rows[0].len(), 10);
            assert!(rows[3].iter().any(|k| k.special == Some(SpecialKey::Letters)));
        }
    }

    #[test]
    fn test_find_key() {
        let table = LayoutTable::default();
        assert!(table.find(LayoutMode::Letters, "q").is_some());
        assert!(table.find(LayoutMode::Numbers, "q").is_none());
        assert_eq!(
            table.find(LayoutMode::Numbers, "symbols").and_then(|k| k.special),
            Some(SpecialKey::Symbols)
        );
    }
}
