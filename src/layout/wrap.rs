//! Greedy word wrapping by display width.

use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

/// Wrap `text` into lines no wider than `columns` display cells.
///
/// Each input line is a paragraph. Blank paragraphs are kept as empty lines,
/// runs of whitespace collapse to a single space, and a word wider than a whole
/// line is split across lines.
///
/// ```
/// use tprompt::layout::wrap::wrap_text;
///
/// let lines = wrap_text("the quick brown fox\n\njumps", 10);
/// assert_eq!(lines, vec!["the quick", "brown fox", "", "jumps"]);
/// ```
pub fn wrap_text(text: &str, columns: usize) -> Vec<String> {
    let columns = columns.max(1);
    let mut lines = Vec::new();

    for paragraph in text.lines() {
        let mut current = String::new();
        let mut current_width = 0usize;

        for word in paragraph.split_whitespace() {
            let width = word.width();

            if width > columns {
                if !current.is_empty() {
                    lines.push(std::mem::take(&mut current));
                }
                let (mut chunks, tail_width) = split_word(word, columns);
                current = chunks.pop().unwrap_or_default();
                current_width = tail_width;
                lines.extend(chunks);
                continue;
            }

            if current.is_empty() {
                current.push_str(word);
                current_width = width;
            } else if current_width + 1 + width <= columns {
                current.push(' ');
                current.push_str(word);
                current_width += 1 + width;
            } else {
                lines.push(std::mem::replace(&mut current, word.to_string()));
                current_width = width;
            }
        }

        lines.push(current);
    }

    lines
}

/// Split an over-long word into chunks of at most `columns` cells.
///
/// Returns the chunks and the width of the last one.
fn split_word(word: &str, columns: usize) -> (Vec<String>, usize) {
    let mut chunks = Vec::new();
    let mut chunk = String::new();
    let mut width = 0usize;

    for ch in word.chars() {
        let w = ch.width().unwrap_or(0);
        if width + w > columns && !chunk.is_empty() {
            chunks.push(std::mem::take(&mut chunk));
            width = 0;
        }
        chunk.push(ch);
        width += w;
    }
    chunks.push(chunk);
    (chunks, width)
}
