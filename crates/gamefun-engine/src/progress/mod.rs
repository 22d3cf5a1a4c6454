pub mod state;
pub mod storage;
pub mod store;

pub use state::{CompletionRecord, OverrideFlag, Overrides, ProgressState};
pub use storage::{MemoryStorage, ProgressStorage};
pub use store::ProgressStore;
