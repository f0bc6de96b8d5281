use std::sync::Mutex;

use crate::{CopyError, HeapEntry, MinHeapCore};

/// Thread-safe wrapper around one [`MinHeapCore`].
///
/// The whole backing store sits behind a single mutex; every public method
/// acquires it exactly once, for the duration of that operation, and the
/// core it guards never locks anything itself. That makes each operation
/// atomic with respect to every other operation on the same instance
/// (linearizable per instance), and keeps a thread from ever re-acquiring
/// its own lock through a nested call.
///
/// Returned entries are owned copies of heap state, never references into
/// the backing store.
#[derive(Debug)]
pub struct IndexedMinHeap<P, V> {
    core: Mutex<MinHeapCore<P, V>>,
}

impl<P: PartialOrd, V> IndexedMinHeap<P, V> {
    pub fn new() -> Self {
        Self {
            core: Mutex::new(MinHeapCore::new()),
        }
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            core: Mutex::new(MinHeapCore::with_capacity(capacity)),
        }
    }

    pub fn len(&self) -> usize {
        self.core.lock().unwrap().len()
    }

    pub fn is_empty(&self) -> bool {
        self.core.lock().unwrap().is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.core.lock().unwrap().capacity()
    }

    /// Copy of the minimum-priority entry, or `None` when empty.
    pub fn peek_min(&self) -> Option<HeapEntry<P, V>>
    where
        P: Clone,
        V: Clone,
    {
        self.core.lock().unwrap().peek_min().cloned()
    }

    pub fn insert(&self, priority: P, value: V) {
        self.core.lock().unwrap().insert(priority, value);
    }

    pub fn extract_min(&self) -> Option<HeapEntry<P, V>> {
        self.core.lock().unwrap().extract_min()
    }

    /// Removes the first entry equal to `target`. `false` when absent.
    pub fn remove(&self, target: &HeapEntry<P, V>) -> bool
    where
        P: PartialEq,
        V: PartialEq,
    {
        self.core.lock().unwrap().remove(target)
    }

    pub fn contains(&self, target: &HeapEntry<P, V>) -> bool
    where
        P: PartialEq,
        V: PartialEq,
    {
        self.core.lock().unwrap().contains(target)
    }

    /// Copies all entries into `dst[offset..]`; see [`MinHeapCore::copy_into`].
    pub fn copy_into(&self, dst: &mut [HeapEntry<P, V>], offset: usize) -> Result<(), CopyError>
    where
        P: Clone,
        V: Clone,
    {
        self.core.lock().unwrap().copy_into(dst, offset)
    }

    /// Consistent copy of all current entries.
    ///
    /// Slot 0 (if any) is the current minimum; the order of the rest is
    /// unspecified.
    pub fn snapshot(&self) -> Vec<HeapEntry<P, V>>
    where
        P: Clone,
        V: Clone,
    {
        self.core.lock().unwrap().as_slice().to_vec()
    }

    pub fn clear(&self) {
        self.core.lock().unwrap().clear();
    }
}

impl<P: PartialOrd, V> Default for IndexedMinHeap<P, V> {
    fn default() -> Self {
        Self::new()
    }
}
