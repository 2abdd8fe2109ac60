// ABOUTME: Classifier configuration for outcome scoring and bucketing
// ABOUTME: Indicator weights, classification thresholds, and engagement weights
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Parley Conversation Intelligence

//! Classifier Configuration
//!
//! Weights and thresholds for the weighted-indicator outcome scoring
//! described in the classifier module. The indicator weights sum to 1.0 so
//! the resulting score always lands in [0, 100].

use parley_core::constants::{classification, engagement, scoring};
use serde::{Deserialize, Serialize};

/// Classifier Configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ClassifierConfig {
    /// Weights applied to each success indicator
    pub weights: IndicatorWeights,
    /// Classification score thresholds
    pub thresholds: ClassificationThresholds,
    /// Transcript heuristics feeding the indicators
    pub transcript: TranscriptHeuristics,
    /// Engagement score component weights
    pub engagement: EngagementWeights,
}

/// Weights applied to each success indicator; expected to sum to 1.0
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IndicatorWeights {
    /// Weight of the user-returned indicator
    pub user_returned: f64,
    /// Weight of the expressed-thanks indicator
    pub expressed_thanks: f64,
    /// Weight of the got-answer indicator
    pub got_answer: f64,
    /// Weight of the had-follow-up indicator
    pub had_follow_up: f64,
    /// Weight of the ended-positively indicator
    pub ended_positively: f64,
}

impl IndicatorWeights {
    /// Sum of all indicator weights (the scoring denominator)
    #[must_use]
    pub fn total(&self) -> f64 {
        self.user_returned
            + self.expressed_thanks
            + self.got_answer
            + self.had_follow_up
            + self.ended_positively
    }
}

/// Score thresholds separating the outcome buckets
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClassificationThresholds {
    /// Minimum score for the successful bucket
    pub successful_min_score: u8,
    /// Minimum score for the partial bucket
    pub partial_min_score: u8,
    /// Maximum score for one-exchange transcripts to read as abandoned
    pub abandoned_max_score: u8,
}

/// Transcript heuristics feeding the success indicators
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TranscriptHeuristics {
    /// Minimum characters for a final assistant message to count as an answer
    pub min_answer_chars: usize,
    /// Minimum messages for the follow-up indicator
    pub follow_up_min_messages: usize,
    /// Timestamp gap establishing a session boundary, in minutes
    pub session_gap_minutes: i64,
}

/// Engagement score component weights and saturation caps
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EngagementWeights {
    /// Weight of transcript length
    pub message_count_weight: f64,
    /// Message count at which the length component saturates
    pub message_count_cap: usize,
    /// Weight of user participation
    pub user_message_weight: f64,
    /// User message count at which the participation component saturates
    pub user_message_cap: usize,
    /// Weight of topical breadth
    pub topic_breadth_weight: f64,
    /// Topic count at which the breadth component saturates
    pub topic_breadth_cap: usize,
}

impl Default for IndicatorWeights {
    fn default() -> Self {
        Self {
            user_returned: scoring::USER_RETURNED_WEIGHT,
            expressed_thanks: scoring::EXPRESSED_THANKS_WEIGHT,
            got_answer: scoring::GOT_ANSWER_WEIGHT,
            had_follow_up: scoring::HAD_FOLLOW_UP_WEIGHT,
            ended_positively: scoring::ENDED_POSITIVELY_WEIGHT,
        }
    }
}

impl Default for ClassificationThresholds {
    fn default() -> Self {
        Self {
            successful_min_score: classification::SUCCESSFUL_MIN_SCORE,
            partial_min_score: classification::PARTIAL_MIN_SCORE,
            abandoned_max_score: classification::ABANDONED_MAX_SCORE,
        }
    }
}

impl Default for TranscriptHeuristics {
    fn default() -> Self {
        Self {
            min_answer_chars: classification::MIN_ANSWER_CHARS,
            follow_up_min_messages: classification::FOLLOW_UP_MIN_MESSAGES,
            session_gap_minutes: classification::SESSION_GAP_MINUTES,
        }
    }
}

impl Default for EngagementWeights {
    fn default() -> Self {
        Self {
            message_count_weight: engagement::MESSAGE_COUNT_WEIGHT,
            message_count_cap: engagement::MESSAGE_COUNT_CAP,
            user_message_weight: engagement::USER_MESSAGE_WEIGHT,
            user_message_cap: engagement::USER_MESSAGE_CAP,
            topic_breadth_weight: engagement::TOPIC_BREADTH_WEIGHT,
            topic_breadth_cap: engagement::TOPIC_BREADTH_CAP,
        }
    }
}
