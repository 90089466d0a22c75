//! Recency List Module
//!
//! Tracks access order for LRU eviction as a doubly linked list stored in
//! an arena and linked by slot index.
//!
//! ```text
//!   slots[0] = HEAD ─► [MRU] ◄──► ... ◄──► [LRU] ◄── slots[1] = TAIL
//! ```
//!
//! The two sentinels are permanent and never count toward `len()`.
//! Every live entry is addressed by a [`Position`]; freed slots are reused
//! and their generation is bumped, so a handle outliving its entry is
//! rejected instead of aliasing whatever entry took the slot over.

use crate::cache::entry::{Entry, Position, Slot};

const HEAD: usize = 0;
const TAIL: usize = 1;

// == Recency List ==
/// Arena-backed recency order.
///
/// - Front = Most recently used
/// - Back = Least recently used
#[derive(Debug)]
pub struct RecencyList<K, V> {
    slots: Vec<Slot<K, V>>,
    generations: Vec<u64>,
    free_head: Option<usize>,
    len: usize,
}

impl<K, V> RecencyList<K, V> {
    // == Constructor ==
    /// Creates an empty list containing only the two sentinels, with room
    /// for `capacity` entries.
    pub fn with_capacity(capacity: usize) -> Self {
        let mut slots = Vec::with_capacity(capacity + 2);
        slots.push(Slot::Sentinel {
            prev: HEAD,
            next: TAIL,
        });
        slots.push(Slot::Sentinel {
            prev: HEAD,
            next: TAIL,
        });
        let mut generations = Vec::with_capacity(capacity + 2);
        generations.extend([0, 0]);

        Self {
            slots,
            generations,
            free_head: None,
            len: 0,
        }
    }

    // == Push Front ==
    /// Inserts a new entry at the most-recently-used end.
    pub fn push_front(&mut self, key: K, value: V) -> Position {
        let entry = Slot::Occupied(Entry::new(key, value));
        let index = match self.free_head {
            Some(index) => {
                let next_free = match self.slots[index] {
                    Slot::Vacant { next_free } => next_free,
                    _ => unreachable!("free list points at a live slot"),
                };
                self.free_head = next_free;
                self.slots[index] = entry;
                index
            }
            None => {
                self.slots.push(entry);
                self.generations.push(0);
                self.slots.len() - 1
            }
        };

        self.attach_front(index);
        self.len += 1;

        Position {
            index,
            generation: self.generations[index],
        }
    }

    // == Move To Front ==
    /// Marks the entry at `position` as most recently used.
    ///
    /// Returns `false` and leaves the order untouched if the handle is stale.
    pub fn move_to_front(&mut self, position: Position) -> bool {
        if !self.is_live(position) {
            return false;
        }
        if self.slots[HEAD].next() != position.index {
            self.detach(position.index);
            self.attach_front(position.index);
        }
        true
    }

    // == Pop Back ==
    /// Removes and returns the least recently used entry.
    ///
    /// Returns None if the list is empty.
    pub fn pop_back(&mut self) -> Option<(K, V)> {
        if self.len == 0 {
            return None;
        }
        let index = self.slots[TAIL].prev();
        self.detach(index);
        self.len -= 1;

        self.generations[index] += 1;
        let slot = std::mem::replace(
            &mut self.slots[index],
            Slot::Vacant {
                next_free: self.free_head,
            },
        );
        self.free_head = Some(index);

        match slot {
            Slot::Occupied(entry) => Some((entry.key, entry.value)),
            _ => unreachable!("tail sentinel linked to a non-entry slot"),
        }
    }

    // == Accessors ==
    /// Returns the value stored at `position`, if the handle is live.
    pub fn get(&self, position: Position) -> Option<&V> {
        if !self.is_live(position) {
            return None;
        }
        match &self.slots[position.index] {
            Slot::Occupied(entry) => Some(&entry.value),
            _ => None,
        }
    }

    /// Returns a mutable reference to the value stored at `position`.
    pub fn get_mut(&mut self, position: Position) -> Option<&mut V> {
        if !self.is_live(position) {
            return None;
        }
        match &mut self.slots[position.index] {
            Slot::Occupied(entry) => Some(&mut entry.value),
            _ => None,
        }
    }

    /// Returns the most recently used entry.
    pub fn front(&self) -> Option<(&K, &V)> {
        self.entry_at(self.slots[HEAD].next())
    }

    /// Returns the least recently used entry.
    pub fn back(&self) -> Option<(&K, &V)> {
        self.entry_at(self.slots[TAIL].prev())
    }

    /// Iterates entries from most to least recently used.
    pub fn iter(&self) -> Iter<'_, K, V> {
        Iter {
            list: self,
            current: self.slots[HEAD].next(),
            remaining: self.len,
        }
    }

    // == Length ==
    /// Returns the number of live entries.
    pub fn len(&self) -> usize {
        self.len
    }

    // == Is Empty ==
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    fn is_live(&self, position: Position) -> bool {
        position.index > TAIL
            && position.index < self.slots.len()
            && self.generations[position.index] == position.generation
            && matches!(self.slots[position.index], Slot::Occupied(_))
    }

    fn entry_at(&self, index: usize) -> Option<(&K, &V)> {
        match &self.slots[index] {
            Slot::Occupied(entry) => Some((&entry.key, &entry.value)),
            _ => None,
        }
    }

    fn detach(&mut self, index: usize) {
        let prev = self.slots[index].prev();
        let next = self.slots[index].next();
        self.slots[prev].set_next(next);
        self.slots[next].set_prev(prev);
    }

    fn attach_front(&mut self, index: usize) {
        let first = self.slots[HEAD].next();
        self.slots[index].set_prev(HEAD);
        self.slots[index].set_next(first);
        self.slots[HEAD].set_next(index);
        self.slots[first].set_prev(index);
    }

    /// Walks the links in both directions and checks them against `len`.
    #[cfg(test)]
    pub(crate) fn validate_invariants(&self) {
        let mut forward = 0;
        let mut index = self.slots[HEAD].next();
        let mut prev = HEAD;
        while index != TAIL {
            assert!(matches!(self.slots[index], Slot::Occupied(_)));
            assert_eq!(self.slots[index].prev(), prev, "broken back link");
            prev = index;
            index = self.slots[index].next();
            forward += 1;
            assert!(forward <= self.len, "cycle in recency list");
        }
        assert_eq!(self.slots[TAIL].prev(), prev);
        assert_eq!(forward, self.len);
    }
}

// == Iterator ==
/// Iterator over a [`RecencyList`] from MRU to LRU.
pub struct Iter<'a, K, V> {
    list: &'a RecencyList<K, V>,
    current: usize,
    remaining: usize,
}

impl<'a, K, V> Iterator for Iter<'a, K, V> {
    type Item = (&'a K, &'a V);

    fn next(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }
        let item = self.list.entry_at(self.current)?;
        self.current = self.list.slots[self.current].next();
        self.remaining -= 1;
        Some(item)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

// == Unit Tests ==
#[cfg(test)]
mod tests {
    use super::*;

    fn keys(list: &RecencyList<&'static str, i32>) -> Vec<&'static str> {
        list.iter().map(|(k, _)| *k).collect()
    }

    #[test]
    fn test_recency_new() {
        let list: RecencyList<&str, i32> = RecencyList::with_capacity(4);
        assert!(list.is_empty());
        assert_eq!(list.len(), 0);
        assert!(list.front().is_none());
        assert!(list.back().is_none());
        list.validate_invariants();
    }

    #[test]
    fn test_push_front_orders_mru_first() {
        let mut list = RecencyList::with_capacity(4);
        list.push_front("a", 1);
        list.push_front("b", 2);
        list.push_front("c", 3);

        assert_eq!(list.len(), 3);
        assert_eq!(keys(&list), vec!["c", "b", "a"]);
        assert_eq!(list.front(), Some((&"c", &3)));
        assert_eq!(list.back(), Some((&"a", &1)));
        list.validate_invariants();
    }

    #[test]
    fn test_move_to_front() {
        let mut list = RecencyList::with_capacity(4);
        let a = list.push_front("a", 1);
        list.push_front("b", 2);
        list.push_front("c", 3);

        assert!(list.move_to_front(a));
        assert_eq!(keys(&list), vec!["a", "c", "b"]);
        assert_eq!(list.len(), 3);
        list.validate_invariants();
    }

    #[test]
    fn test_move_to_front_when_already_front() {
        let mut list = RecencyList::with_capacity(4);
        list.push_front("a", 1);
        let b = list.push_front("b", 2);

        assert!(list.move_to_front(b));
        assert_eq!(keys(&list), vec!["b", "a"]);
        list.validate_invariants();
    }

    #[test]
    fn test_pop_back_returns_lru() {
        let mut list = RecencyList::with_capacity(4);
        list.push_front("a", 1);
        list.push_front("b", 2);

        assert_eq!(list.pop_back(), Some(("a", 1)));
        assert_eq!(list.pop_back(), Some(("b", 2)));
        assert_eq!(list.pop_back(), None);
        assert!(list.is_empty());
        list.validate_invariants();
    }

    #[test]
    fn test_stale_position_rejected_after_slot_reuse() {
        let mut list = RecencyList::with_capacity(4);
        let a = list.push_front("a", 1);
        list.push_front("b", 2);

        assert_eq!(list.pop_back(), Some(("a", 1)));
        let c = list.push_front("c", 3);

        // "c" reuses the slot freed by "a"
        assert_eq!(c.index, a.index);
        assert_ne!(c.generation, a.generation);

        assert!(!list.move_to_front(a));
        assert!(list.get(a).is_none());
        assert_eq!(list.get(c), Some(&3));
        assert_eq!(keys(&list), vec!["c", "b"]);
        list.validate_invariants();
    }

    #[test]
    fn test_sentinel_positions_rejected() {
        let mut list: RecencyList<&str, i32> = RecencyList::with_capacity(4);
        let head = Position {
            index: HEAD,
            generation: 0,
        };
        let out_of_range = Position {
            index: 42,
            generation: 0,
        };
        assert!(!list.move_to_front(head));
        assert!(!list.move_to_front(out_of_range));
        list.validate_invariants();
    }

    #[test]
    fn test_get_mut_updates_value() {
        let mut list = RecencyList::with_capacity(4);
        let a = list.push_front("a", 1);
        if let Some(value) = list.get_mut(a) {
            *value = 10;
        }
        assert_eq!(list.get(a), Some(&10));
    }

    #[test]
    fn test_order_after_multiple_touches() {
        let mut list = RecencyList::with_capacity(4);
        let a = list.push_front("a", 1);
        let b = list.push_front("b", 2);
        let c = list.push_front("c", 3);

        list.move_to_front(a);
        list.move_to_front(c);
        list.move_to_front(b);

        // front=[b, c, a]=back
        assert_eq!(list.pop_back(), Some(("a", 1)));
        assert_eq!(list.pop_back(), Some(("c", 3)));
        assert_eq!(list.pop_back(), Some(("b", 2)));
        list.validate_invariants();
    }

    #[test]
    fn test_iter_size_hint() {
        let mut list = RecencyList::with_capacity(4);
        list.push_front("a", 1);
        list.push_front("b", 2);
        assert_eq!(list.iter().size_hint(), (2, Some(2)));
        assert_eq!(list.iter().count(), 2);
    }
}
