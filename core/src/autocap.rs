//! Sentence-start auto-capitalization.

/// Characters that end a sentence.
pub const SENTENCE_TERMINATORS: [char; 3] = ['.', '!', '?'];

/// Whether the next typed letter should be uppercase, judged from `text` alone.
///
/// True at the very start of input (empty or whitespace-only text) and after
/// a sentence terminator followed by whitespace. False mid-word, directly
/// after a terminator with no whitespace yet, and after ordinary words.
pub fn should_capitalize(text: &str) -> bool {
    let trimmed = text.trim_end();
    if trimmed.is_empty() {
        return true;
    }
    if trimmed.len() == text.len() {
        return false;
    }
    trimmed.ends_with(SENTENCE_TERMINATORS)
}

/// Auto-capitalization state kept by the dispatcher.
///
/// Holds the last evaluation so hosts can render the shift key as "armed"
/// without recomputing, and a switch to turn the behaviour off entirely.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AutoCapitalizationPolicy {
    enabled: bool,
    armed: bool,
}

impl AutoCapitalizationPolicy {
    /// A policy armed for an empty buffer.
    pub fn new(enabled: bool) -> Self {
        Self {
            enabled,
            armed: enabled,
        }
    }

    /// Re-evaluate against the current buffer content and return the result.
    pub fn evaluate(&mut self, text: &str) -> bool {
        self.armed = self.enabled && should_capitalize(text);
        self.armed
    }

    /// Result of the last evaluation.
    pub fn is_armed(&self) -> bool {
        self.armed
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Turn the policy on or off, re-evaluating against `text`.
    pub fn set_enabled(&mut self, enabled: bool, text: &str) {
        self.enabled = enabled;
        self.evaluate(text);
    }
}

impl Default for AutoCapitalizationPolicy {
    fn default() -> Self {
        Self::new(true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_text_capitalizes() {
        assert!(should_capitalize(""));
        assert!(should_capitalize("   "));
        assert!(should_capitalize("\n"));
    }

    #[test]
    fn test_after_sentence_end() {
        assert!(should_capitalize("Hello. "));
        assert!(should_capitalize("Really? "));
        assert!(should_capitalize("Wow!\n"));
        assert!(should_capitalize("Done.  "));
    }

    #[test]
    fn test_not_after_plain_word() {
        assert!(!should_capitalize("Hello "));
        assert!(!should_capitalize("Hel"));
        assert!(!should_capitalize("Hello."));
        assert!(!should_capitalize("e.g, "));
    }

    #[test]
    fn test_policy_tracks_evaluation() {
        let mut policy = AutoCapitalizationPolicy::new(true);
        assert!(policy.is_armed());

        assert!(!policy.evaluate("H"));
        assert!(!policy.is_armed());

        assert!(policy.evaluate(""));
        assert!(policy.is_armed());
    }

    #[test]
    fn test_disabled_policy_never_arms() {
        let mut policy = AutoCapitalizationPolicy::new(false);
        assert!(!policy.is_armed());
        assert!(!policy.evaluate(""));
        assert!(!policy.evaluate("Hello. "));

        policy.set_enabled(true, "Hello. ");
        assert!(policy.is_armed());
    }
}
