//! Named letter layouts.
//!
//! Only the three letter rows differ between layouts; the function keys,
//! number and symbol pages come from `LayoutTable::from_letter_rows`.

use softkey_core::{KeyWeights, LayoutTable};

/// Layout names accepted by `layout_table`.
pub const LAYOUT_NAMES: [&str; 3] = ["qwerty", "azerty", "qwertz"];

const QWERTY: [&str; 3] = ["qwertyuiop", "asdfghjkl", "zxcvbnm"];
const AZERTY: [&str; 3] = ["azertyuiop", "qsdfghjklm", "wxcvbn"];
const QWERTZ: [&str; 3] = ["qwertzuiop", "asdfghjkl", "yxcvbnm"];

/// Letter rows for a layout name, ignoring case.
pub fn letter_rows(name: &str) -> Option<&'static [&'static str; 3]> {
    match name.trim().to_ascii_lowercase().as_str() {
        "qwerty" => Some(&QWERTY),
        "azerty" => Some(&AZERTY),
        "qwertz" => Some(&QWERTZ),
        _ => None,
    }
}

/// Full layout table for a layout name.
pub fn layout_table(name: &str, weights: &KeyWeights) -> Option<LayoutTable> {
    letter_rows(name).map(|rows| LayoutTable::from_letter_rows(rows, weights))
}

#[cfg(test)]
mod tests {
    use super::*;
    use softkey_core::LayoutMode;

    fn ids(table: &LayoutTable, row: usize) -> Vec<String> {
        table.rows(LayoutMode::Letters)[row]
            .iter()
            .map(|k| k.id.clone())
            .collect()
    }

    #[test]
    fn test_qwerty_matches_core_default() {
        let weights = KeyWeights::default();
        let table = layout_table("qwerty", &weights).expect("known layout");
        assert_eq!(table, LayoutTable::qwerty(&weights));
    }

    #[test]
    fn test_azerty_rows() {
        let table = layout_table("AZERTY", &KeyWeights::default()).expect("known layout");
        assert_eq!(ids(&table, 0).concat(), "azertyuiop");
        assert_eq!(ids(&table, 1).concat(), "qsdfghjklm");

        let third = ids(&table, 2);
        assert_eq!(third.first().map(String::as_str), Some("shift"));
        assert_eq!(third.last().map(String::as_str), Some("delete"));
        assert_eq!(third[1..third.len() - 1].concat(), "wxcvbn");
    }

    #[test]
    fn test_qwertz_swaps_y_and_z() {
        let table = layout_table("qwertz", &KeyWeights::default()).expect("known layout");
        assert_eq!(ids(&table, 0).concat(), "qwertzuiop");
        assert!(ids(&table, 2).contains(&"y".to_string()));
    }

    #[test]
    fn test_unknown_layout() {
        assert!(layout_table("dvorak", &KeyWeights::default()).is_none());
        for name in LAYOUT_NAMES {
            assert!(letter_rows(name).is_some());
        }
    }
}
