use minheap::{CopyError, HeapEntry, MinHeapCore};

/// Amount added to a nominal priority per enqueue since the last reset, so
/// that equal-priority entries dequeue in arrival order: in a min-first
/// queue a later arrival must sort slightly *above* an earlier one.
///
/// The scheme is approximate and has a documented precision budget rather
/// than an enforced limit: with caller priorities at least 100 apart and the
/// queue drained to empty now and then, roughly 10^11 enqueues fit between
/// resets before the accumulated adjustment reaches a full priority step.
/// Exceeding the budget silently degrades FIFO ordering among equal
/// priorities; it never affects ordering across distinct priority levels of
/// that spacing, and never breaks the queue structurally.
pub const TIE_BREAK_EPSILON: f64 = 1e-11;

/// Min-heap plus the FIFO tie-break state, without any synchronization.
///
/// This is the guarded core shared by the lock-based and channel-based
/// queues: [`crate::PriorityQueue`] keeps one instance behind its mutex and
/// calls in here with the lock held, [`crate::ChanneledQueue`]'s storage
/// thread owns one outright. Nothing in here locks, so a single top-level
/// critical section per public queue operation is enough.
#[derive(Debug)]
pub(crate) struct TieBreakHeap<V> {
    heap: MinHeapCore<f64, V>,
    /// Enqueues since the queue was last observed empty. Only resettable
    /// while the heap is empty; a reset with entries still resident would
    /// reorder them relative to future arrivals.
    enqueued_since_reset: u64,
}

impl<V> TieBreakHeap<V> {
    pub fn new() -> Self {
        Self {
            heap: MinHeapCore::new(),
            enqueued_since_reset: 0,
        }
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            heap: MinHeapCore::with_capacity(capacity),
            enqueued_since_reset: 0,
        }
    }

    /// Stores `value` under `priority` plus the current adjustment.
    ///
    /// The adjustment applies exactly once, at this moment; stored entries
    /// are never re-adjusted.
    pub fn enqueue(&mut self, priority: f64, value: V) {
        let adjusted = priority + TIE_BREAK_EPSILON * self.enqueued_since_reset as f64;
        self.enqueued_since_reset += 1;
        self.heap.insert(adjusted, value);
    }

    pub fn dequeue(&mut self) -> Option<HeapEntry<f64, V>> {
        let entry = self.heap.extract_min();
        self.reset_if_empty();
        entry
    }

    pub fn drain(&mut self, n: usize) -> Vec<HeapEntry<f64, V>> {
        let mut items = Vec::with_capacity(n.min(self.heap.len()));
        for _ in 0..n {
            let Some(entry) = self.heap.extract_min() else {
                break;
            };
            items.push(entry);
        }
        self.reset_if_empty();
        items
    }

    pub fn peek(&self) -> Option<&HeapEntry<f64, V>> {
        self.heap.peek_min()
    }

    /// Removes the first entry matching `target` by effective priority and
    /// value. `false` when absent.
    pub fn remove(&mut self, target: &HeapEntry<f64, V>) -> bool
    where
        V: PartialEq,
    {
        let removed = self.heap.remove(target);
        self.reset_if_empty();
        removed
    }

    pub fn contains(&self, target: &HeapEntry<f64, V>) -> bool
    where
        V: PartialEq,
    {
        self.heap.contains(target)
    }

    pub fn clear(&mut self) {
        self.heap.clear();
        self.enqueued_since_reset = 0;
    }

    pub fn len(&self) -> usize {
        self.heap.len()
    }

    pub fn is_empty(&self) -> bool {
        self.heap.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.heap.capacity()
    }

    pub fn as_slice(&self) -> &[HeapEntry<f64, V>] {
        self.heap.as_slice()
    }

    pub fn copy_into(&self, dst: &mut [HeapEntry<f64, V>], offset: usize) -> Result<(), CopyError>
    where
        V: Clone,
    {
        self.heap.copy_into(dst, offset)
    }

    /// An empty heap is the only state in which the adjustment can restart
    /// without perturbing the relative order of anything still queued.
    fn reset_if_empty(&mut self) {
        if self.heap.is_empty() {
            self.enqueued_since_reset = 0;
        }
    }
}
