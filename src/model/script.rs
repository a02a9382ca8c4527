//! Script text supplied to the prompter.

use std::sync::Arc;

/// Script shown by the prompter.
///
/// The text is normalized on construction (CRLF and lone CR become LF) and shared
/// behind an `Arc`, so cloning a script for the layout provider or the renderer is cheap.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Script {
    text: Arc<str>,
    label: Option<String>,
}

impl Script {
    /// Create a script from raw text, normalizing line endings.
    ///
    /// # Examples
    ///
    /// ```
    /// use tprompt::model::Script;
    ///
    /// let script = Script::new("one\r\ntwo\rthree");
    /// assert_eq!(script.text(), "one\ntwo\nthree");
    /// ```
    pub fn new(text: impl AsRef<str>) -> Self {
        let normalized = text.as_ref().replace("\r\n", "\n").replace('\r', "\n");
        Self {
            text: Arc::from(normalized),
            label: None,
        }
    }

    /// Attach a display label (usually the file name).
    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    /// The normalized script text.
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Optional display label.
    pub fn label(&self) -> Option<&str> {
        self.label.as_deref()
    }

    /// True when the script has no visible characters.
    pub fn is_blank(&self) -> bool {
        self.text.trim().is_empty()
    }

    /// Number of words, used for the status line's reading-rate hint.
    pub fn word_count(&self) -> usize {
        self.text.split_whitespace().count()
    }
}

impl Default for Script {
    fn default() -> Self {
        Self::new("")
    }
}
