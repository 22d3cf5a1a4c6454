pub mod api;
pub mod catalog;
pub mod progress;
pub mod rules;
pub mod time;
#[cfg(feature = "i18n")]
pub mod i18n;

// Re-export key types at crate root for convenience
pub use api::engine::{EngineConfig, ProgressionEngine};
pub use api::error::ProgressError;
pub use api::types::{Category, Difficulty, LevelId, LevelState, ProgressSummary, Stars};
pub use catalog::{LevelCatalog, LevelDescriptor};
pub use progress::{
    CompletionRecord, MemoryStorage, OverrideFlag, Overrides, ProgressState, ProgressStorage,
    ProgressStore,
};
pub use rules::{
    menu_stars, score_message, session_progress, star_rating, CompletionOutcome, ProgressionRules,
    ScoreTier,
};
pub use time::{Clock, FixedClock, SystemClock};

#[cfg(feature = "i18n")]
pub use i18n::{lookup, translate, Locale};
