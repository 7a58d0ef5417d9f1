//! Ordered Map Module
//!
//! Unique-key, insertion-ordered collection of text/text pairs.
//!
//! ## Responsibilities
//! - Keep keys unique (setting an existing key updates it in place)
//! - Preserve first-insertion order across updates and removals
//! - Own every key and value buffer exclusively
//!
//! ## Data Structure Choice
//! A doubly-linked list laid out in an arena:
//! - Slots live in a `Vec` and are addressed by index
//! - `prev`/`next` links are indices, so removal cannot leave dangling links
//! - Freed slots go on a free list and are reused by later inserts
//! - Lookup is a linear scan; settings files hold dozens of keys, not millions

mod ordered;

pub use ordered::{Iter, OrderedMap};

/// A single key/value pair held by the map
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Entry {
    key: String,
    value: String,
}

impl Entry {
    pub(crate) fn new(key: String, value: String) -> Self {
        Self { key, value }
    }

    /// The entry's key
    pub fn key(&self) -> &str {
        &self.key
    }

    /// The entry's value
    pub fn value(&self) -> &str {
        &self.value
    }

    /// Swap in already-built buffers, returning the old ones
    pub(crate) fn replace(&mut self, key: String, value: String) -> (String, String) {
        let old_key = std::mem::replace(&mut self.key, key);
        let old_value = std::mem::replace(&mut self.value, value);
        (old_key, old_value)
    }
}
