pub mod progression;
pub mod scoring;

pub use progression::{CompletionOutcome, ProgressionRules};
pub use scoring::{menu_stars, score_message, session_progress, star_rating, ScoreTier};
