//! Input sanitization and tokenization
//!
//! Device exports arrive with terminal control codes, pagination artifacts,
//! and non-ASCII whitespace. Everything here degrades instead of failing:
//! a line always sanitizes to a string and always tokenizes to a list.

use crate::limits::MAX_LINE_LENGTH;

/// Remove control characters, fold Unicode spaces to ASCII, and trim.
///
/// Tab (0x09) is preserved so indentation-based parsing still sees it;
/// the stripped set is 0x00–0x08, 0x0B, 0x0C, 0x0E–0x1F, and 0x7F.
#[must_use]
pub fn sanitize_line(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '\u{00}'..='\u{08}' | '\u{0B}' | '\u{0C}' | '\u{0E}'..='\u{1F}' | '\u{7F}' => {}
            '\u{A0}' | '\u{2000}'..='\u{200A}' | '\u{202F}' | '\u{205F}' | '\u{3000}' => {
                out.push(' ');
            }
            other => out.push(other),
        }
    }
    out.trim().to_string()
}

/// Split a canonical line into parameters, honoring paired quotes.
///
/// Quote pairing is non-nesting: the first `"` or `'` opens and the next
/// matching character closes; quote characters are consumed, not emitted.
/// An unmatched final quote consumes the remainder as one token. Inputs
/// longer than [`MAX_LINE_LENGTH`] are truncated and returned as a single
/// token, which keeps direct callers safe from pathological lines.
#[must_use]
pub fn tokenize_params(line: &str) -> Vec<String> {
    if line.chars().count() > MAX_LINE_LENGTH {
        let truncated: String = line.chars().take(MAX_LINE_LENGTH).collect();
        return vec![truncated];
    }

    let mut params = Vec::new();
    let mut current = String::new();
    let mut quote: Option<char> = None;

    for ch in line.chars() {
        match quote {
            Some(open) => {
                if ch == open {
                    quote = None;
                } else {
                    current.push(ch);
                }
            }
            None => {
                if ch == '"' || ch == '\'' {
                    quote = Some(ch);
                } else if ch.is_ascii_whitespace() {
                    if !current.is_empty() {
                        params.push(std::mem::take(&mut current));
                    }
                } else {
                    current.push(ch);
                }
            }
        }
    }
    if !current.is_empty() {
        params.push(current);
    }

    params
}
