use std::cmp::Ordering;

use crate::HeapEntry;

/// Error returned by [`MinHeapCore::copy_into`] when the destination window
/// `dst[offset..]` cannot hold every entry currently in the heap.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("copy destination holds {available} slots from offset {offset}, need {needed}")]
pub struct CopyError {
    pub needed: usize,
    pub offset: usize,
    pub available: usize,
}

/// Array-backed binary min-heap without any synchronization.
///
/// The backing vector is an implicit complete binary tree: zero-based, with
/// the parent of `i` at `(i - 1) / 2` and children at `2i + 1` and `2i + 2`.
/// Two invariants hold after every `&mut self` operation:
///
/// - min-heap property: every entry's priority is `<=` its children's,
/// - completeness: `len()` equals the number of occupied slots, no gaps.
///
/// This type is the guarded core behind [`crate::IndexedMinHeap`]. It never
/// locks; the wrapper acquires its mutex exactly once per public operation
/// and calls in here with the lock already held.
///
/// Priorities are compared through [`PartialOrd`]. Values that are not
/// totally ordered among themselves (a `NaN` priority, for instance) are a
/// caller error: they are never moved by the sift routines and can leave the
/// heap mis-ordered, though never structurally broken.
#[derive(Debug, Clone)]
pub struct MinHeapCore<P, V> {
    entries: Vec<HeapEntry<P, V>>,
}

fn priority_lt<P: PartialOrd>(a: &P, b: &P) -> bool {
    matches!(a.partial_cmp(b), Some(Ordering::Less))
}

impl<P: PartialOrd, V> MinHeapCore<P, V> {
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            entries: Vec::with_capacity(capacity),
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.entries.capacity()
    }

    /// Returns the minimum-priority entry without removing it.
    pub fn peek_min(&self) -> Option<&HeapEntry<P, V>> {
        self.entries.first()
    }

    /// All current entries, in storage order.
    ///
    /// Slot 0 (if any) is the current minimum; the order of everything
    /// after it is unspecified and callers must not rely on it.
    pub fn as_slice(&self) -> &[HeapEntry<P, V>] {
        &self.entries
    }

    /// Adds an entry, keeping the heap property. O(log n).
    pub fn insert(&mut self, priority: P, value: V) {
        self.entries.push(HeapEntry::new(priority, value));
        self.sift_up(self.entries.len() - 1);
    }

    /// Removes and returns the minimum-priority entry, or `None` when empty.
    ///
    /// The last entry moves into the vacated root slot and sifts down. O(log n).
    pub fn extract_min(&mut self) -> Option<HeapEntry<P, V>> {
        if self.entries.is_empty() {
            return None;
        }
        let last = self.entries.len() - 1;
        self.entries.swap(0, last);
        let min = self.entries.pop();
        if !self.entries.is_empty() {
            self.sift_down(0);
        }
        min
    }

    /// Removes the first entry equal to `target` (priority and value both).
    /// Returns `false` when no such entry is present. O(n) scan plus one
    /// O(log n) repair.
    pub fn remove(&mut self, target: &HeapEntry<P, V>) -> bool
    where
        P: PartialEq,
        V: PartialEq,
    {
        let Some(index) = self.entries.iter().position(|entry| entry == target) else {
            return false;
        };

        let last = self.entries.len() - 1;
        if index == last {
            self.entries.pop();
            return true;
        }

        self.entries.swap(index, last);
        self.entries.pop();

        // The replacement entry may belong further up or further down, never
        // both. Probe upward first; only an unmoved entry gets sifted down.
        if self.sift_up(index) == index {
            self.sift_down(index);
        }
        true
    }

    pub fn contains(&self, target: &HeapEntry<P, V>) -> bool
    where
        P: PartialEq,
        V: PartialEq,
    {
        self.entries.iter().any(|entry| entry == target)
    }

    /// Copies every entry into `dst[offset..offset + len()]`, leaving all
    /// other slots of `dst` untouched. The copy carries no order guarantee
    /// beyond slot `offset` receiving the current minimum.
    ///
    /// Fails without mutating `dst` when the window does not fit.
    pub fn copy_into(&self, dst: &mut [HeapEntry<P, V>], offset: usize) -> Result<(), CopyError>
    where
        P: Clone,
        V: Clone,
    {
        let needed = self.entries.len();
        let available = dst.len().saturating_sub(offset);
        // An offset past the end of `dst` is invalid even for an empty heap.
        let Some(window) = dst.get_mut(offset..).and_then(|tail| tail.get_mut(..needed)) else {
            return Err(CopyError {
                needed,
                offset,
                available,
            });
        };
        window.clone_from_slice(&self.entries);
        Ok(())
    }

    /// Drops every entry. Capacity is retained.
    pub fn clear(&mut self) {
        self.entries.clear();
    }

    // region:    --- Sift routines

    /// Moves the entry at `index` toward the root until its parent is no
    /// longer larger. Returns the entry's final index so callers can tell
    /// whether anything moved.
    fn sift_up(&mut self, mut index: usize) -> usize {
        debug_assert!(index < self.entries.len());
        while index > 0 {
            let parent = (index - 1) / 2;
            if priority_lt(&self.entries[index].priority, &self.entries[parent].priority) {
                self.entries.swap(index, parent);
                index = parent;
            } else {
                break;
            }
        }
        index
    }

    /// Moves the entry at `index` toward the leaves until it is no larger
    /// than either child.
    fn sift_down(&mut self, mut index: usize) {
        debug_assert!(index < self.entries.len());
        loop {
            let left = 2 * index + 1;
            let right = left + 1;
            let mut smallest = index;

            if left < self.entries.len()
                && priority_lt(&self.entries[left].priority, &self.entries[smallest].priority)
            {
                smallest = left;
            }
            if right < self.entries.len()
                && priority_lt(&self.entries[right].priority, &self.entries[smallest].priority)
            {
                smallest = right;
            }

            if smallest == index {
                break;
            }
            self.entries.swap(index, smallest);
            index = smallest;
        }
    }

    // endregion: --- Sift routines
}

impl<P: PartialOrd, V> Default for MinHeapCore<P, V> {
    fn default() -> Self {
        Self::new()
    }
}
