mod channel_based;
mod lock_based;
mod naive;
mod shared;
mod tie_break;
pub mod test;

// region:    --- Exports
pub use channel_based::ChanneledQueue;
pub use lock_based::PriorityQueue;
pub use naive::NaiveQueue;
pub use shared::SharedQueue;
pub use tie_break::TIE_BREAK_EPSILON;
// endregion: --- Exports
