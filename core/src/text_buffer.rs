//! Session text buffer with last-word tracking.
//!
//! The buffer mirrors what the user has typed into the host field during the
//! current keyboard session. It only supports operations a soft keyboard can
//! perform without a cursor: append at the end, delete from the end, replace
//! the trailing word, or overwrite everything.

use unicode_segmentation::UnicodeSegmentation;

/// Engine-owned text for one keyboard session.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TextBuffer {
    text: String,
}

impl TextBuffer {
    /// Create a new empty buffer.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a buffer holding `text`, e.g. the host field's existing content.
    pub fn from_text<T: Into<String>>(text: T) -> Self {
        Self { text: text.into() }
    }

    /// Get the buffer text.
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Length in bytes.
    pub fn len(&self) -> usize {
        self.text.len()
    }

    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    /// Append text at the end of the buffer.
    pub fn append_text(&mut self, s: &str) {
        self.text.push_str(s);
    }

    /// Delete the last user-perceived character.
    ///
    /// Removes a whole extended grapheme cluster so that emoji sequences and
    /// combining marks disappear with one backspace. Returns false (and does
    /// nothing) when the buffer is already empty.
    pub fn delete_last(&mut self) -> bool {
        match self.text.grapheme_indices(true).next_back() {
            Some((start, _)) => {
                self.text.truncate(start);
                true
            }
            None => false,
        }
    }

    /// Replace the whole buffer.
    pub fn set_text<T: Into<String>>(&mut self, text: T) {
        self.text = text.into();
    }

    /// The trailing whitespace-delimited word, ignoring trailing whitespace.
    ///
    /// Returns "" when the buffer is empty or whitespace only.
    pub fn last_word(&self) -> &str {
        last_word(&self.text)
    }

    /// Replace the trailing word with `replacement`.
    ///
    /// Earlier words are kept and re-joined with single spaces. When the
    /// buffer had trailing whitespace before the edit, the result keeps one
    /// trailing space so typing can continue straight away.
    pub fn replace_last_word(&mut self, replacement: &str) {
        if self.text.is_empty() {
            self.text = replacement.to_string();
            return;
        }

        let trimmed = self.text.trim_end();
        let had_trailing_space = trimmed.len() != self.text.len();

        let words: Vec<&str> = trimmed.split_whitespace().collect();
        let mut replaced = if words.len() > 1 {
            let mut kept = words[..words.len() - 1].join(" ");
            kept.push(' ');
            kept.push_str(replacement);
            kept
        } else {
            replacement.to_string()
        };

        if had_trailing_space && !replaced.ends_with(' ') {
            replaced.push(' ');
        }

        self.text = replaced;
    }
}

/// Last word of arbitrary text, with the same rules as [`TextBuffer::last_word`].
pub fn last_word(text: &str) -> &str {
    text.trim_end().split_whitespace().next_back().unwrap_or("")
}
