//! Score-to-stars and score-to-message policy.
//!
//! Thresholds are compared in exact integer arithmetic:
//!
//! | ratio            | stars | message                           |
//! |------------------|-------|-----------------------------------|
//! | `== 1`           | 3     | "Perfect! Amazing work!"          |
//! | `>= 0.8`         | 2     | "Great job! Well done!"           |
//! | `>= 0.5`         | 1     | "Good effort! Keep practicing!"   |
//! | below            | 0     | "Good effort! Keep practicing!"   |

use crate::api::types::Stars;

pub const MESSAGE_PERFECT: &str = "Perfect! Amazing work!";
pub const MESSAGE_GREAT: &str = "Great job! Well done!";
pub const MESSAGE_GOOD_EFFORT: &str = "Good effort! Keep practicing!";

/// `GREAT` threshold as a fraction: 8/10.
const GREAT_NUM: u64 = 8;
const GREAT_DEN: u64 = 10;
/// `PASS` threshold as a fraction: 1/2.
const PASS_NUM: u64 = 1;
const PASS_DEN: u64 = 2;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ScoreTier {
    NeedsPractice,
    Pass,
    Great,
    Perfect,
}

impl ScoreTier {
    /// Classify `score / total`. A zero total lands in the lowest tier.
    pub fn of(score: u32, total: u32) -> Self {
        let (score, total) = (u64::from(score), u64::from(total));
        if total == 0 {
            ScoreTier::NeedsPractice
        } else if score >= total {
            ScoreTier::Perfect
        } else if score * GREAT_DEN >= total * GREAT_NUM {
            ScoreTier::Great
        } else if score * PASS_DEN >= total * PASS_NUM {
            ScoreTier::Pass
        } else {
            ScoreTier::NeedsPractice
        }
    }

    pub fn stars(self) -> Stars {
        match self {
            ScoreTier::Perfect => Stars(3),
            ScoreTier::Great => Stars(2),
            ScoreTier::Pass => Stars(1),
            ScoreTier::NeedsPractice => Stars(0),
        }
    }

    /// Three-tier message scale; `Pass` and `NeedsPractice` share a message.
    pub fn message(self) -> &'static str {
        match self {
            ScoreTier::Perfect => MESSAGE_PERFECT,
            ScoreTier::Great => MESSAGE_GREAT,
            ScoreTier::Pass | ScoreTier::NeedsPractice => MESSAGE_GOOD_EFFORT,
        }
    }
}

pub fn star_rating(score: u32, total: u32) -> Stars {
    ScoreTier::of(score, total).stars()
}

pub fn score_message(score: u32, total: u32) -> &'static str {
    ScoreTier::of(score, total).message()
}

/// Completed levels per menu star.
const LEVELS_PER_MENU_STAR: usize = 3;

/// Overall rating shown in the level-menu header.
pub fn menu_stars(completed_count: usize) -> Stars {
    let stars = completed_count.div_ceil(LEVELS_PER_MENU_STAR).min(usize::from(Stars::MAX.0));
    Stars(stars as u8)
}

/// Progress bar value for an in-flight session, in whole percent.
/// `answered` counts the current item once its feedback is showing.
pub fn session_progress(current_index: u32, total: u32, answered: bool) -> u32 {
    if total == 0 {
        return 0;
    }
    let done = f64::from(current_index) + if answered { 1.0 } else { 0.0 };
    (done / f64::from(total) * 100.0).round() as u32
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stars_follow_thresholds() {
        assert_eq!(star_rating(5, 5), Stars(3));
        assert_eq!(star_rating(4, 5), Stars(2));
        assert_eq!(star_rating(3, 5), Stars(1));
        assert_eq!(star_rating(1, 5), Stars(0));
        assert_eq!(star_rating(0, 5), Stars(0));
    }

    #[test]
    fn exact_boundaries() {
        // 8/10 and 1/2 sit exactly on the thresholds.
        assert_eq!(star_rating(8, 10), Stars(2));
        assert_eq!(star_rating(79, 100), Stars(1));
        assert_eq!(star_rating(1, 2), Stars(1));
        assert_eq!(star_rating(49, 100), Stars(0));
        assert_eq!(star_rating(u32::MAX - 1, u32::MAX), Stars(2));
    }

    #[test]
    fn messages_collapse_lower_tiers() {
        assert_eq!(score_message(5, 5), "Perfect! Amazing work!");
        assert_eq!(score_message(4, 5), "Great job! Well done!");
        assert_eq!(score_message(3, 5), "Good effort! Keep practicing!");
        assert_eq!(score_message(2, 5), "Good effort! Keep practicing!");
    }

    #[test]
    fn star_and_message_scales_differ_below_great() {
        assert_ne!(star_rating(3, 5), star_rating(1, 5));
        assert_eq!(score_message(3, 5), score_message(1, 5));
    }

    #[test]
    fn zero_total_is_lowest_tier() {
        assert_eq!(ScoreTier::of(0, 0), ScoreTier::NeedsPractice);
    }

    #[test]
    fn menu_stars_round_up_per_three_levels() {
        assert_eq!(menu_stars(0), Stars(0));
        assert_eq!(menu_stars(1), Stars(1));
        assert_eq!(menu_stars(3), Stars(1));
        assert_eq!(menu_stars(4), Stars(2));
        assert_eq!(menu_stars(7), Stars(3));
        assert_eq!(menu_stars(9), Stars(3));
        assert_eq!(menu_stars(12), Stars(3));
    }

    #[test]
    fn session_progress_counts_answered_item() {
        assert_eq!(session_progress(2, 5, true), 60);
        assert_eq!(session_progress(2, 5, false), 40);
        assert_eq!(session_progress(0, 3, true), 33);
        assert_eq!(session_progress(1, 3, true), 67);
        assert_eq!(session_progress(0, 0, true), 0);
    }
}
