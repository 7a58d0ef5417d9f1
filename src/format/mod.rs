//! Settings file format
//!
//! One entry per line:
//!
//! ```text
//! key name = some value
//! another key = a value = with more equals signs
//! ```
//!
//! - The first `=` on a line splits key from value; later ones belong to the value
//! - Whitespace around key and value is trimmed, interior whitespace is kept
//! - Lines without `=` are ignored
//! - No quoting, escaping, comments or sections
//!
//! Saving writes `key = value\n` for every entry, in insertion order.

pub mod numeric;
pub mod parser;
pub mod serializer;

pub use parser::{parse_line, trim};
pub use serializer::{write_entries, write_entry};

/// Separates key from value
pub const DELIMITER: char = '=';

/// Written between key and value on save
pub const SEPARATOR: &str = " = ";
