//! Slot states of the open-addressed array.

/// An owned key/value pair stored in an occupied slot.
#[derive(Clone, Debug, Eq, PartialEq, Hash)]
pub struct Entry {
    pub(crate) key: String,
    pub(crate) value: String,
}

impl Entry {
    pub fn new(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            value: value.into(),
        }
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn value(&self) -> &str {
        &self.value
    }
}

/// State of a single slot.
///
/// `Tombstone` marks a slot whose entry was deleted. Lookups keep probing
/// past it; inserts may reuse it.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub enum Slot {
    #[default]
    Empty,
    Tombstone,
    Occupied(Entry),
}

impl Slot {
    #[inline]
    pub fn is_tombstone(&self) -> bool {
        matches!(self, Slot::Tombstone)
    }

    #[inline]
    pub fn entry(&self) -> Option<&Entry> {
        match self {
            Slot::Occupied(e) => Some(e),
            _ => None,
        }
    }

    /// True if the slot holds an entry for `key`.
    #[inline]
    pub(crate) fn holds(&self, key: &str) -> bool {
        self.entry().is_some_and(|e| e.key == key)
    }

    /// Replace the slot with a tombstone, returning the entry it held.
    pub(crate) fn bury(&mut self) -> Option<Entry> {
        match std::mem::replace(self, Slot::Tombstone) {
            Slot::Occupied(e) => Some(e),
            other => {
                *self = other;
                None
            }
        }
    }
}
