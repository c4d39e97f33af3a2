//! # Sequential List
//!
//! [`SequentialList`] is the only collection the catalog uses for its master
//! lists, review lists and order histories.
//!
//! ## Contract
//!
//! | Operation             | Cost             |
//! |-----------------------|------------------|
//! | [`append`]            | O(1) amortized   |
//! | [`get`]               | O(n)             |
//! | [`remove_at`]         | O(n)             |
//! | [`len`] / [`is_empty`]| O(1)             |
//!
//! Iteration always follows insertion order (minus removed elements) and can be
//! restarted any number of times without side effects.
//!
//! ## Layout
//!
//! Nodes live in an arena of slots and are chained through `next` indices, so
//! the list keeps explicit `head` / `tail` links exactly like a pointer-based
//! singly-linked list, without `unsafe`. Freed slots are recycled by later
//! appends.
//!
//! [`append`]: SequentialList::append
//! [`get`]: SequentialList::get
//! [`remove_at`]: SequentialList::remove_at
//! [`len`]: SequentialList::len
//! [`is_empty`]: SequentialList::is_empty

use crate::error::CatalogError;
use std::fmt;

#[derive(Clone)]
struct Node<T> {
    value: T,
    next: Option<usize>,
}

/// Append-optimized, index-addressable singly-linked sequence.
#[derive(Clone)]
pub struct SequentialList<T> {
    slots: Vec<Option<Node<T>>>,
    free: Vec<usize>,
    head: Option<usize>,
    tail: Option<usize>,
    len: usize,
}

impl<T> SequentialList<T> {
    /// Creates an empty list.
    pub fn new() -> Self {
        Self {
            slots: Vec::new(),
            free: Vec::new(),
            head: None,
            tail: None,
            len: 0,
        }
    }

    /// Links `value` after the current tail.
    pub fn append(&mut self, value: T) {
        let slot = self.alloc(Node { value, next: None });

        match self.tail.and_then(|tail| self.node_mut(tail)) {
            Some(tail) => tail.next = Some(slot),
            None => self.head = Some(slot),
        }
        self.tail = Some(slot);
        self.len += 1;
    }

    /// Returns the element at `index`, or `None` when `index >= len()`.
    pub fn get(&self, index: usize) -> Option<&T> {
        let slot = self.slot_at(index)?;
        self.node(slot).map(|node| &node.value)
    }

    /// Unlinks and returns the element at `index`.
    ///
    /// # Errors
    /// [`CatalogError::IndexOutOfRange`] when `index >= len()`; the list is
    /// left untouched.
    pub fn remove_at(&mut self, index: usize) -> Result<T, CatalogError> {
        let out_of_range = CatalogError::IndexOutOfRange {
            index,
            len: self.len,
        };
        if index >= self.len {
            return Err(out_of_range);
        }

        let (prev, target) = if index == 0 {
            (None, self.head)
        } else {
            let prev = self.slot_at(index - 1);
            let target = prev.and_then(|slot| self.node(slot)).and_then(|node| node.next);
            (prev, target)
        };

        let Some(slot) = target else {
            return Err(out_of_range);
        };
        let Some(node) = self.slots.get_mut(slot).and_then(Option::take) else {
            return Err(out_of_range);
        };

        match prev {
            None => self.head = node.next,
            Some(prev) => {
                if let Some(prev_node) = self.node_mut(prev) {
                    prev_node.next = node.next;
                }
            }
        }
        // Removed the tail: the predecessor (or nothing) becomes the tail.
        if node.next.is_none() {
            self.tail = prev;
        }

        self.len -= 1;
        if self.len == 0 {
            self.slots.clear();
            self.free.clear();
        } else {
            self.free.push(slot);
        }
        Ok(node.value)
    }

    /// Number of linked elements.
    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Forward iterator in insertion order.
    pub fn iter(&self) -> Iter<'_, T> {
        Iter {
            list: self,
            cursor: self.head,
            remaining: self.len,
        }
    }

    /// Position of the first element matching `predicate`.
    pub fn position<P>(&self, predicate: P) -> Option<usize>
    where
        P: FnMut(&T) -> bool,
    {
        self.iter().position(predicate)
    }

    /// First element matching `predicate`, borrowed mutably.
    pub fn find_mut<P>(&mut self, mut predicate: P) -> Option<&mut T>
    where
        P: FnMut(&T) -> bool,
    {
        let mut cursor = self.head;
        while let Some(slot) = cursor {
            let (matched, next) = {
                let node = self.node(slot)?;
                (predicate(&node.value), node.next)
            };
            if matched {
                return self.node_mut(slot).map(|node| &mut node.value);
            }
            cursor = next;
        }
        None
    }

    fn alloc(&mut self, node: Node<T>) -> usize {
        if let Some(slot) = self.free.pop() {
            if let Some(cell) = self.slots.get_mut(slot) {
                *cell = Some(node);
                return slot;
            }
        }
        self.slots.push(Some(node));
        self.slots.len() - 1
    }

    fn slot_at(&self, index: usize) -> Option<usize> {
        if index >= self.len {
            return None;
        }
        let mut cursor = self.head;
        for _ in 0..index {
            cursor = cursor.and_then(|slot| self.node(slot)).and_then(|node| node.next);
        }
        cursor
    }

    fn node(&self, slot: usize) -> Option<&Node<T>> {
        self.slots.get(slot).and_then(Option::as_ref)
    }

    fn node_mut(&mut self, slot: usize) -> Option<&mut Node<T>> {
        self.slots.get_mut(slot).and_then(Option::as_mut)
    }
}

impl<T> Default for SequentialList<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: fmt::Debug> fmt::Debug for SequentialList<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.iter()).finish()
    }
}

impl<T: PartialEq> PartialEq for SequentialList<T> {
    fn eq(&self, other: &Self) -> bool {
        self.len == other.len && self.iter().eq(other.iter())
    }
}

impl<T> FromIterator<T> for SequentialList<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut list = Self::new();
        list.extend(iter);
        list
    }
}

impl<T> Extend<T> for SequentialList<T> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        for value in iter {
            self.append(value);
        }
    }
}

impl<'a, T> IntoIterator for &'a SequentialList<T> {
    type Item = &'a T;
    type IntoIter = Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Borrowing iterator returned by [`SequentialList::iter`].
pub struct Iter<'a, T> {
    list: &'a SequentialList<T>,
    cursor: Option<usize>,
    remaining: usize,
}

impl<'a, T> Iterator for Iter<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.list.node(self.cursor?)?;
        self.cursor = node.next;
        self.remaining = self.remaining.saturating_sub(1);
        Some(&node.value)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<T> ExactSizeIterator for Iter<'_, T> {}
