use minheap::HeapEntry;

/// A queue that can be shared across threads and always hands out the
/// lowest-priority entry first, with arrival order breaking ties.
///
/// Every implementation in this crate is safe to call from any number of
/// threads without external synchronization. Returned entries carry the
/// *effective* priority, i.e. the nominal priority plus the tie-break
/// adjustment that was in force when the entry was enqueued.
pub trait SharedQueue<V>: Send + Sync + 'static {
    fn enqueue(&self, priority: f64, value: V);

    /// Removes and returns up to `n` entries in priority order. Returns
    /// fewer (possibly zero) entries when the queue holds fewer.
    fn drain(&self, n: usize) -> Vec<HeapEntry<f64, V>>;

    /// Removes and returns the lowest-priority entry, or `None` when empty.
    fn dequeue(&self) -> Option<HeapEntry<f64, V>> {
        self.drain(1).into_iter().next()
    }
}
