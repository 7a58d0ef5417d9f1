//! Serializer
//!
//! Writes entries back out in the line format. Values are written verbatim;
//! nothing is escaped.

use std::io::Write;

use crate::error::Result;
use crate::map::Entry;

use super::SEPARATOR;

/// Write a single `key = value\n` line
pub fn write_entry<W: Write + ?Sized>(writer: &mut W, key: &str, value: &str) -> Result<()> {
    writer.write_all(key.as_bytes())?;
    writer.write_all(SEPARATOR.as_bytes())?;
    writer.write_all(value.as_bytes())?;
    writer.write_all(b"\n")?;
    Ok(())
}

/// Write every entry in iteration order, returning how many were written
pub fn write_entries<'a, W, I>(writer: &mut W, entries: I) -> Result<usize>
where
    W: Write + ?Sized,
    I: IntoIterator<Item = &'a Entry>,
{
    let mut written = 0;
    for entry in entries {
        write_entry(writer, entry.key(), entry.value())?;
        written += 1;
    }
    Ok(written)
}
