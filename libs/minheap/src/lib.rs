mod entry;
mod heap;
mod locked;

// region:    --- Exports
pub use entry::HeapEntry;
pub use heap::{CopyError, MinHeapCore};
pub use locked::IndexedMinHeap;
// endregion: --- Exports
