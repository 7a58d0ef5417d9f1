//! OrderedMap implementation
//!
//! Arena-backed doubly-linked list with linear-scan lookup.

use std::fmt;
use std::iter::FusedIterator;
use std::sync::Arc;

use crate::alloc::{self, BufferAllocator};
use crate::error::Result;

use super::Entry;

/// One arena slot: an entry plus its neighbours in iteration order
#[derive(Debug)]
struct Node {
    entry: Entry,
    prev: Option<usize>,
    next: Option<usize>,
}

/// Insertion-ordered map with unique keys
pub struct OrderedMap {
    /// Arena of nodes; `None` marks a freed slot
    slots: Vec<Option<Node>>,
    /// Indices of freed slots, reused before the arena grows
    free: Vec<usize>,
    first: Option<usize>,
    last: Option<usize>,
    len: usize,
    alloc: Arc<dyn BufferAllocator>,
}

impl OrderedMap {
    /// Create an empty map that allocates through `alloc`
    pub fn new(alloc: Arc<dyn BufferAllocator>) -> Self {
        Self {
            slots: Vec::new(),
            free: Vec::new(),
            first: None,
            last: None,
            len: 0,
            alloc,
        }
    }

    // =========================================================================
    // Lookup
    // =========================================================================

    /// Find the entry for `key` by walking the list front to back
    pub fn find(&self, key: &str) -> Option<&Entry> {
        self.position(key).map(|idx| &self.node(idx).entry)
    }

    /// Get the value for `key`
    pub fn get(&self, key: &str) -> Option<&str> {
        self.find(key).map(Entry::value)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.position(key).is_some()
    }

    /// First entry in iteration order
    pub fn first(&self) -> Option<&Entry> {
        self.first.map(|idx| &self.node(idx).entry)
    }

    /// Last entry in iteration order
    pub fn last(&self) -> Option<&Entry> {
        self.last.map(|idx| &self.node(idx).entry)
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Iterate entries in insertion order
    pub fn iter(&self) -> Iter<'_> {
        Iter {
            map: self,
            front: self.first,
            back: self.last,
            remaining: self.len,
        }
    }

    // =========================================================================
    // Mutation
    // =========================================================================

    /// Insert or update `key`
    ///
    /// An existing key keeps its position; its key and value buffers are
    /// rebuilt first and only swapped in once both copies succeed. A new key
    /// is appended after the current last entry. On error the map is left
    /// exactly as it was.
    pub fn set(&mut self, key: &str, value: &str) -> Result<()> {
        if let Some(idx) = self.position(key) {
            let new_key = alloc::copy_text(self.alloc.as_ref(), key)?;
            let new_value = alloc::copy_text(self.alloc.as_ref(), value)?;

            let node = self.node_mut(idx);
            node.entry.replace(new_key, new_value);
            return Ok(());
        }

        // Make room for the slot before building the entry so a refused
        // slot never leaves owned buffers behind
        if self.free.is_empty() {
            alloc::reserve_slot(self.alloc.as_ref(), &mut self.slots)?;
        } else {
            self.alloc.allocate(std::mem::size_of::<Node>())?;
        }

        let new_key = alloc::copy_text(self.alloc.as_ref(), key)?;
        let new_value = alloc::copy_text(self.alloc.as_ref(), value)?;

        let node = Node {
            entry: Entry::new(new_key, new_value),
            prev: self.last,
            next: None,
        };

        let idx = match self.free.pop() {
            Some(idx) => {
                self.slots[idx] = Some(node);
                idx
            }
            None => {
                self.slots.push(Some(node));
                self.slots.len() - 1
            }
        };

        match self.last {
            Some(last) => self.node_mut(last).next = Some(idx),
            None => self.first = Some(idx),
        }
        self.last = Some(idx);
        self.len += 1;

        Ok(())
    }

    /// Remove `key`, returning whether it was present
    pub fn remove(&mut self, key: &str) -> bool {
        let Some(idx) = self.position(key) else {
            return false;
        };

        let Some(node) = self.slots[idx].take() else {
            return false;
        };

        match node.next {
            Some(next) => self.node_mut(next).prev = node.prev,
            None => self.last = node.prev,
        }
        match node.prev {
            Some(prev) => self.node_mut(prev).next = node.next,
            None => self.first = node.next,
        }

        // A failed push only means the slot is not recycled
        if self.free.try_reserve(1).is_ok() {
            self.free.push(idx);
        }
        self.len -= 1;

        true
    }

    /// Remove every entry
    pub fn clear(&mut self) {
        self.slots.clear();
        self.free.clear();
        self.first = None;
        self.last = None;
        self.len = 0;
    }

    // =========================================================================
    // Internal Helpers
    // =========================================================================

    fn position(&self, key: &str) -> Option<usize> {
        let mut cursor = self.first;
        while let Some(idx) = cursor {
            let node = self.node(idx);
            if node.entry.key().as_bytes() == key.as_bytes() {
                return Some(idx);
            }
            cursor = node.next;
        }
        None
    }

    // Linked indices always point at occupied slots.
    fn node(&self, idx: usize) -> &Node {
        match &self.slots[idx] {
            Some(node) => node,
            None => unreachable!("linked index {} points at a free slot", idx),
        }
    }

    fn node_mut(&mut self, idx: usize) -> &mut Node {
        match &mut self.slots[idx] {
            Some(node) => node,
            None => unreachable!("linked index {} points at a free slot", idx),
        }
    }

    #[cfg(test)]
    fn slot_count(&self) -> usize {
        self.slots.len()
    }
}

impl fmt::Debug for OrderedMap {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map()
            .entries(self.iter().map(|e| (e.key(), e.value())))
            .finish()
    }
}

impl<'a> IntoIterator for &'a OrderedMap {
    type Item = &'a Entry;
    type IntoIter = Iter<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Iterator over map entries in insertion order
pub struct Iter<'a> {
    map: &'a OrderedMap,
    front: Option<usize>,
    back: Option<usize>,
    remaining: usize,
}

impl<'a> Iterator for Iter<'a> {
    type Item = &'a Entry;

    fn next(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }
        let node = self.map.node(self.front?);
        self.front = node.next;
        self.remaining -= 1;
        Some(&node.entry)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<'a> DoubleEndedIterator for Iter<'a> {
    fn next_back(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }
        let node = self.map.node(self.back?);
        self.back = node.prev;
        self.remaining -= 1;
        Some(&node.entry)
    }
}

impl ExactSizeIterator for Iter<'_> {}

impl FusedIterator for Iter<'_> {}
