use std::sync::Mutex;

use minheap::{CopyError, HeapEntry};

use crate::SharedQueue;
use crate::tie_break::TieBreakHeap;

/// Thread-safe min-priority queue with FIFO ordering among equal priorities.
///
/// One mutex guards the heap and the tie-break counter together; every
/// public method acquires it exactly once and the guarded core never locks,
/// so no call path can re-acquire the lock it already holds. Operations are
/// linearizable per instance and block only on lock acquisition.
///
/// Entries returned by [`dequeue`](Self::dequeue), [`peek`](Self::peek) and
/// friends carry the effective priority (nominal plus the tie-break
/// adjustment at enqueue time) and are owned copies, never references into
/// queue storage. [`remove`](Self::remove) and [`contains`](Self::contains)
/// match stored entries by effective priority and value, so look up with an
/// entry obtained from [`peek`](Self::peek) or [`snapshot`](Self::snapshot).
#[derive(Debug)]
pub struct PriorityQueue<V> {
    core: Mutex<TieBreakHeap<V>>,
}

impl<V> PriorityQueue<V> {
    pub fn new() -> Self {
        Self {
            core: Mutex::new(TieBreakHeap::new()),
        }
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            core: Mutex::new(TieBreakHeap::with_capacity(capacity)),
        }
    }

    pub fn enqueue(&self, priority: f64, value: V) {
        self.core.lock().unwrap().enqueue(priority, value);
    }

    pub fn dequeue(&self) -> Option<HeapEntry<f64, V>> {
        self.core.lock().unwrap().dequeue()
    }

    /// Removes up to `n` entries in priority order, in one critical section.
    pub fn drain(&self, n: usize) -> Vec<HeapEntry<f64, V>> {
        self.core.lock().unwrap().drain(n)
    }

    pub fn peek(&self) -> Option<HeapEntry<f64, V>>
    where
        V: Clone,
    {
        self.core.lock().unwrap().peek().cloned()
    }

    pub fn remove(&self, target: &HeapEntry<f64, V>) -> bool
    where
        V: PartialEq,
    {
        self.core.lock().unwrap().remove(target)
    }

    pub fn contains(&self, target: &HeapEntry<f64, V>) -> bool
    where
        V: PartialEq,
    {
        self.core.lock().unwrap().contains(target)
    }

    /// Empties the queue and unconditionally restarts the tie-break
    /// adjustment.
    pub fn clear(&self) {
        self.core.lock().unwrap().clear();
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

    /// Consistent copy of all current entries; slot 0 (if any) is the
    /// current minimum, further order unspecified.
    pub fn snapshot(&self) -> Vec<HeapEntry<f64, V>>
    where
        V: Clone,
    {
        self.core.lock().unwrap().as_slice().to_vec()
    }

    /// Copies all current entries into `dst[offset..]`, leaving every other
    /// slot untouched. Fails without mutation when the window is too small.
    pub fn copy_into(&self, dst: &mut [HeapEntry<f64, V>], offset: usize) -> Result<(), CopyError>
    where
        V: Clone,
    {
        self.core.lock().unwrap().copy_into(dst, offset)
    }
}

impl<V> Default for PriorityQueue<V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<V: Send + 'static> SharedQueue<V> for PriorityQueue<V> {
    fn enqueue(&self, priority: f64, value: V) {
        PriorityQueue::enqueue(self, priority, value);
    }

    fn drain(&self, n: usize) -> Vec<HeapEntry<f64, V>> {
        PriorityQueue::drain(self, n)
    }

    fn dequeue(&self) -> Option<HeapEntry<f64, V>> {
        PriorityQueue::dequeue(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn peek_and_dequeue_agree_on_the_minimum() {
        let queue = PriorityQueue::with_capacity(16);
        queue.enqueue(300.0, "c");
        queue.enqueue(100.0, "a");
        queue.enqueue(200.0, "b");

        let peeked = queue.peek().unwrap();
        assert_eq!(peeked.value, "a");
        assert_eq!(peeked.priority, 100.0);

        // Peek did not consume.
        assert_eq!(queue.len(), 3);
        assert_eq!(queue.dequeue().unwrap(), peeked);
        assert_eq!(queue.len(), 2);
    }

    #[test]
    fn remove_via_peeked_entry() {
        let queue = PriorityQueue::new();
        queue.enqueue(100.0, "a");
        queue.enqueue(200.0, "b");

        let head = queue.peek().unwrap();
        assert!(queue.contains(&head));
        assert!(queue.remove(&head));
        assert!(!queue.contains(&head));
        assert_eq!(queue.len(), 1);
        assert_eq!(queue.dequeue().map(|e| e.value), Some("b"));
    }

    #[test]
    fn clear_resets_everything() {
        let queue = PriorityQueue::new();
        queue.enqueue(200.0, "a");
        queue.enqueue(200.0, "b");
        queue.clear();

        assert!(queue.is_empty());

        // Fresh adjustment after the clear.
        queue.enqueue(200.0, "c");
        assert_eq!(queue.peek().map(|e| e.priority), Some(200.0));
    }

    #[test]
    fn snapshot_and_copy_into_see_the_same_entries() {
        let queue = PriorityQueue::new();
        queue.enqueue(300.0, "c");
        queue.enqueue(100.0, "a");
        queue.enqueue(200.0, "b");

        let snapshot = queue.snapshot();
        assert_eq!(snapshot[0].value, "a");

        let mut dst = vec![minheap::HeapEntry::new(0.0, "pad"); 5];
        queue.copy_into(&mut dst, 1).unwrap();
        assert_eq!(dst[0].value, "pad");
        assert_eq!(dst[4].value, "pad");

        let mut copied: Vec<&str> = dst[1..4].iter().map(|e| e.value).collect();
        copied.sort_unstable();
        assert_eq!(copied, vec!["a", "b", "c"]);

        let err = queue.copy_into(&mut dst, 3).unwrap_err();
        assert_eq!(err.needed, 3);
        assert_eq!(err.available, 2);
    }
}

#[cfg(test)]
mod test_suite {
    use crate::PriorityQueue;
    use crate::test::suite;

    struct LockedTester;

    impl suite::Tester<PriorityQueue<String>> for LockedTester {
        fn create_queue(&self) -> PriorityQueue<String> {
            PriorityQueue::with_capacity(500_000)
        }
    }

    #[test]
    fn min_first_ordering() {
        suite::test_min_first_ordering(LockedTester);
    }

    #[test]
    fn fifo_within_equal_priority() {
        suite::test_fifo_within_equal_priority(LockedTester);
    }

    #[test]
    fn adjustment_resets_when_drained_empty() {
        suite::test_adjustment_resets_when_drained_empty(LockedTester);
    }

    #[test]
    fn concurrent_enqueue() {
        suite::test_concurrent_enqueue(LockedTester);
    }

    #[test]
    fn concurrent_enqueue_and_drain() {
        suite::test_concurrent_enqueue_and_drain(LockedTester);
    }
}
