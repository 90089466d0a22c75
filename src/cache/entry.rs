//! Cache Entry Module
//!
//! Defines the arena node holding a cached key/value pair and the
//! generation-checked handle that addresses it.

// == Position ==
/// Handle to an entry's slot in the recency arena.
///
/// A position is only valid while the entry it was issued for is alive.
/// Slots are reused after eviction, so the handle carries the slot's
/// generation and the arena rejects handles whose generation is stale.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Position {
    pub(crate) index: usize,
    pub(crate) generation: u64,
}

// == Entry ==
/// A cached key/value pair plus its links in the recency order.
#[derive(Debug)]
pub(crate) struct Entry<K, V> {
    pub key: K,
    pub value: V,
    pub prev: usize,
    pub next: usize,
}

impl<K, V> Entry<K, V> {
    // == Constructor ==
    /// Creates an unlinked entry.
    pub fn new(key: K, value: V) -> Self {
        Self {
            key,
            value,
            prev: 0,
            next: 0,
        }
    }
}

// == Slot ==
/// One arena cell: sentinel, live entry, or free.
#[derive(Debug)]
pub(crate) enum Slot<K, V> {
    /// Head or tail boundary marker; only carries links
    Sentinel { prev: usize, next: usize },
    /// Live entry
    Occupied(Entry<K, V>),
    /// Free slot, chained to the next free index
    Vacant { next_free: Option<usize> },
}

impl<K, V> Slot<K, V> {
    pub fn prev(&self) -> usize {
        match self {
            Slot::Sentinel { prev, .. } => *prev,
            Slot::Occupied(entry) => entry.prev,
            Slot::Vacant { .. } => unreachable!("vacant slot is never linked"),
        }
    }

    pub fn next(&self) -> usize {
        match self {
            Slot::Sentinel { next, .. } => *next,
            Slot::Occupied(entry) => entry.next,
            Slot::Vacant { .. } => unreachable!("vacant slot is never linked"),
        }
    }

    pub fn set_prev(&mut self, index: usize) {
        match self {
            Slot::Sentinel { prev, .. } => *prev = index,
            Slot::Occupied(entry) => entry.prev = index,
            Slot::Vacant { .. } => unreachable!("vacant slot is never linked"),
        }
    }

    pub fn set_next(&mut self, index: usize) {
        match self {
            Slot::Sentinel { next, .. } => *next = index,
            Slot::Occupied(entry) => entry.next = index,
            Slot::Vacant { .. } => unreachable!("vacant slot is never linked"),
        }
    }
}

// == Unit Tests ==
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_entry_new_is_unlinked() {
        let entry = Entry::new("key", 1);
        assert_eq!(entry.key, "key");
        assert_eq!(entry.value, 1);
        assert_eq!(entry.prev, 0);
        assert_eq!(entry.next, 0);
    }

    #[test]
    fn test_slot_links() {
        let mut slot: Slot<&str, i32> = Slot::Occupied(Entry::new("a", 1));
        slot.set_prev(4);
        slot.set_next(7);
        assert_eq!(slot.prev(), 4);
        assert_eq!(slot.next(), 7);

        let mut sentinel: Slot<&str, i32> = Slot::Sentinel { prev: 0, next: 1 };
        sentinel.set_next(9);
        assert_eq!(sentinel.next(), 9);
        assert_eq!(sentinel.prev(), 0);
    }
}
