//! Line parser
//!
//! Splits a line into a trimmed key and value. Borrows from the input;
//! the store copies whatever it keeps.

use super::DELIMITER;

/// Split `line` at its first `=` and trim both halves
///
/// Returns `None` for lines with no delimiter.
pub fn parse_line(line: &str) -> Option<(&str, &str)> {
    let (key, value) = line.split_once(DELIMITER)?;
    Some((trim(key), trim(value)))
}

/// Strip leading and trailing C-locale whitespace
///
/// Matches `isspace` in the "C" locale: space, `\t`, `\n`, `\v`, `\f`, `\r`.
/// Non-ASCII whitespace is left alone.
pub fn trim(text: &str) -> &str {
    text.trim_matches(is_space)
}

pub(crate) fn is_space(c: char) -> bool {
    matches!(c, ' ' | '\t' | '\n' | '\x0b' | '\x0c' | '\r')
}
