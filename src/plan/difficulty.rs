// src/plan/difficulty.rs

//! Difficulty adaptation from quiz performance and failure history.

use tracing::debug;

use crate::plan::model::Topic;
use crate::types::DifficultyTier;

/// More failures than this make a topic Hard.
pub const FAILURE_LIMIT: u32 = 2;

/// Average quiz scores below this make a topic Hard.
pub const STRUGGLING_SCORE: f64 = 40.0;

/// Average quiz scores above this make a topic Easy (unless it is Hard).
pub const MASTERY_SCORE: f64 = 80.0;

/// Tier a topic should carry given its performance signals.
///
/// Topics that are neither struggling nor mastered keep the tier the caller
/// supplied.
pub fn adapted_tier(topic: &Topic) -> DifficultyTier {
    if topic.failure_count > FAILURE_LIMIT || topic.avg_quiz_score < STRUGGLING_SCORE {
        DifficultyTier::Hard
    } else if topic.avg_quiz_score > MASTERY_SCORE {
        DifficultyTier::Easy
    } else {
        topic.difficulty
    }
}

/// Overwrite every topic's tier in place. Returns how many tiers changed.
pub fn adapt_difficulty(topics: &mut [Topic]) -> usize {
    let mut changed = 0;
    for topic in topics.iter_mut() {
        let tier = adapted_tier(topic);
        if tier != topic.difficulty {
            debug!(
                topic = %topic.id,
                from = %topic.difficulty,
                to = %tier,
                "adapted difficulty"
            );
            topic.difficulty = tier;
            changed += 1;
        }
    }
    changed
}
