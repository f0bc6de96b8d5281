/// A priority/value pair as stored in (and returned by) the heap.
///
/// Entries are plain owned data. Everything handed back by `peek`/`extract`
/// is an independent copy with no aliasing into heap storage, so callers can
/// mutate a returned entry without touching the heap.
///
/// Equality covers *both* fields and is the single contract used by
/// `contains` and `remove` lookups at every layer. Ordering is intentionally
/// not implemented here: the heap orders by priority alone, which would be
/// inconsistent with the two-field equality.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HeapEntry<P, V> {
    pub priority: P,
    pub value: V,
}

impl<P, V> HeapEntry<P, V> {
    pub fn new(priority: P, value: V) -> Self {
        Self { priority, value }
    }
}
