use std::cmp::Ordering;
use std::sync::Mutex;

use minheap::HeapEntry;

use crate::SharedQueue;
use crate::tie_break::TIE_BREAK_EPSILON;

/// Naive queue that keeps all entries linearly in a vector, sorted on every
/// enqueue. No optimizations are attempted with this implementation; it is
/// the correctness and performance baseline for the heap-backed queues.
pub struct NaiveQueue<V> {
    core: Mutex<NaiveCore<V>>,
}

struct NaiveCore<V> {
    /// Sorted descending by effective priority, so the current minimum sits
    /// at the end and can simply be popped on drain.
    entries: Vec<HeapEntry<f64, V>>,
    enqueued_since_reset: u64,
}

impl<V> NaiveQueue<V> {
    pub fn new(capacity: usize) -> Self {
        Self {
            core: Mutex::new(NaiveCore {
                entries: Vec::with_capacity(capacity),
                enqueued_since_reset: 0,
            }),
        }
    }

    pub fn len(&self) -> usize {
        self.core.lock().unwrap().entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.core.lock().unwrap().entries.is_empty()
    }
}

impl<V: Send + 'static> SharedQueue<V> for NaiveQueue<V> {
    /// Very expensive addition to the queue (~O(n log n) due to the sort on
    /// every enqueue).
    fn enqueue(&self, priority: f64, value: V) {
        let mut core = self.core.lock().unwrap();

        let adjusted = priority + TIE_BREAK_EPSILON * core.enqueued_since_reset as f64;
        core.enqueued_since_reset += 1;
        core.entries.push(HeapEntry::new(adjusted, value));
        core.entries.sort_by(|a, b| {
            b.priority
                .partial_cmp(&a.priority)
                .unwrap_or(Ordering::Equal)
        });
    }

    fn drain(&self, n: usize) -> Vec<HeapEntry<f64, V>> {
        let mut core = self.core.lock().unwrap();

        let mut items = Vec::with_capacity(n.min(core.entries.len()));
        for _ in 0..n {
            let Some(entry) = core.entries.pop() else {
                break;
            };
            items.push(entry);
        }

        if core.entries.is_empty() {
            core.enqueued_since_reset = 0;
        }

        items
    }
}

#[cfg(test)]
mod test_suite {
    use crate::NaiveQueue;
    use crate::test::suite;

    struct NaiveTester;

    impl suite::Tester<NaiveQueue<String>> for NaiveTester {
        fn create_queue(&self) -> NaiveQueue<String> {
            NaiveQueue::new(50_000)
        }
    }

    #[test]
    fn min_first_ordering() {
        suite::test_min_first_ordering(NaiveTester);
    }

    #[test]
    fn fifo_within_equal_priority() {
        suite::test_fifo_within_equal_priority(NaiveTester);
    }

    #[test]
    fn adjustment_resets_when_drained_empty() {
        suite::test_adjustment_resets_when_drained_empty(NaiveTester);
    }

    #[test]
    fn concurrent_enqueue() {
        suite::test_concurrent_enqueue(NaiveTester);
    }

    #[test]
    fn concurrent_enqueue_and_drain() {
        suite::test_concurrent_enqueue_and_drain(NaiveTester);
    }
}
