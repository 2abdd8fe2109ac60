// ABOUTME: Heuristic constants for conversation evaluation organized by domain
// ABOUTME: Named defaults behind the overridable evaluation configuration tree
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Parley Conversation Intelligence

//! Named heuristic constants used across the evaluation engine.
//!
//! These values are hand-tuned product heuristics, not provable invariants.
//! They are the defaults behind the evaluation configuration tree; callers
//! override them through configuration rather than editing this module.

/// Indicator weights for conversation outcome scoring; the five weights sum to 1.0
pub mod scoring {
    /// Weight of an informative final assistant answer
    pub const GOT_ANSWER_WEIGHT: f64 = 0.35;
    /// Weight of an explicit user thank-you
    pub const EXPRESSED_THANKS_WEIGHT: f64 = 0.2;
    /// Weight of at least two user/assistant round-trips
    pub const HAD_FOLLOW_UP_WEIGHT: f64 = 0.2;
    /// Weight of a non-negative ending with the assistant speaking last
    pub const ENDED_POSITIVELY_WEIGHT: f64 = 0.15;
    /// Weight of the user returning across a session boundary
    pub const USER_RETURNED_WEIGHT: f64 = 0.1;
}

/// Outcome classification thresholds and transcript heuristics
pub mod classification {
    /// Minimum score for the successful bucket
    pub const SUCCESSFUL_MIN_SCORE: u8 = 70;
    /// Minimum score for the partial bucket
    pub const PARTIAL_MIN_SCORE: u8 = 40;
    /// Scores below this on a one-exchange transcript mean abandonment
    pub const ABANDONED_MAX_SCORE: u8 = 20;
    /// Minimum characters for a final assistant message to count as an answer
    pub const MIN_ANSWER_CHARS: usize = 50;
    /// Minimum messages for the follow-up indicator
    pub const FOLLOW_UP_MIN_MESSAGES: usize = 4;
    /// Timestamp gap that establishes a session boundary, in minutes
    pub const SESSION_GAP_MINUTES: i64 = 30;
}

/// Engagement score component weights and caps
pub mod engagement {
    /// Weight of transcript length in the engagement score
    pub const MESSAGE_COUNT_WEIGHT: f64 = 0.5;
    /// Message count at which the length component saturates
    pub const MESSAGE_COUNT_CAP: usize = 10;
    /// Weight of user participation in the engagement score
    pub const USER_MESSAGE_WEIGHT: f64 = 0.3;
    /// User message count at which the participation component saturates
    pub const USER_MESSAGE_CAP: usize = 5;
    /// Weight of topical breadth in the engagement score
    pub const TOPIC_BREADTH_WEIGHT: f64 = 0.2;
    /// Topic count at which the breadth component saturates
    pub const TOPIC_BREADTH_CAP: usize = 4;
}

/// Conversation depth bucketing thresholds
pub mod depth {
    /// Maximum messages for the shallow bucket
    pub const SHALLOW_MAX_MESSAGES: usize = 2;
    /// Maximum messages for the moderate bucket
    pub const MODERATE_MAX_MESSAGES: usize = 5;
}

/// Assistant response length bands, in characters
pub mod response_length {
    /// Responses below this are too short to be informative
    pub const TOO_SHORT_BELOW_CHARS: usize = 50;
    /// Responses above this are too long for a chat surface
    pub const TOO_LONG_ABOVE_CHARS: usize = 500;
    /// Lower edge of the tight band earning the full quality-score bonus
    pub const TIGHT_BAND_MIN_CHARS: f64 = 100.0;
    /// Upper edge of the tight band earning the full quality-score bonus
    pub const TIGHT_BAND_MAX_CHARS: f64 = 400.0;
    /// Lower edge of the wide band earning the reduced quality-score bonus
    pub const WIDE_BAND_MIN_CHARS: f64 = 50.0;
    /// Upper edge of the wide band earning the reduced quality-score bonus
    pub const WIDE_BAND_MAX_CHARS: f64 = 600.0;
}

/// Thresholds for the insight rule table, expressed as percentages
pub mod insight_thresholds {
    /// Too-short response share that triggers a quality warning
    pub const TOO_SHORT_WARN_PERCENT: f64 = 20.0;
    /// Too-short response share that escalates the warning to critical
    pub const TOO_SHORT_CRITICAL_PERCENT: f64 = 40.0;
    /// Shallow conversation share that triggers an engagement warning
    pub const SHALLOW_WARN_PERCENT: f64 = 60.0;
    /// Active-user share below which retention is flagged
    pub const ACTIVE_USERS_MIN_PERCENT: f64 = 5.0;
    /// Abandoned conversation share that triggers an engagement warning
    pub const ABANDONED_WARN_PERCENT: f64 = 25.0;
    /// Failed conversation share that triggers a quality warning
    pub const FAILED_WARN_PERCENT: f64 = 15.0;
}

/// Snapshot quality-score formula components
pub mod quality_score {
    /// Score every snapshot starts from
    pub const BASE_SCORE: f64 = 50.0;
    /// Maximum contribution of the deep conversation ratio
    pub const DEEP_RATIO_WEIGHT: f64 = 25.0;
    /// Maximum contribution of the moderate conversation ratio
    pub const MODERATE_RATIO_WEIGHT: f64 = 15.0;
    /// Bonus when mean response length falls in the tight band
    pub const TIGHT_BAND_BONUS: f64 = 15.0;
    /// Bonus when mean response length falls in the wide band only
    pub const WIDE_BAND_BONUS: f64 = 8.0;
    /// Points added per positive insight
    pub const POSITIVE_INSIGHT_POINTS: f64 = 3.0;
    /// Points subtracted per negative insight
    pub const NEGATIVE_INSIGHT_PENALTY: f64 = 5.0;
}

/// Trend direction thresholds and rolling statistics defaults
pub mod trend {
    /// Quality-score rise beyond which the trend reads improving
    pub const IMPROVING_DELTA: f64 = 5.0;
    /// Quality-score fall beyond which the trend reads declining
    pub const DECLINING_DELTA: f64 = -5.0;
    /// Default rolling-average window over snapshots
    pub const DEFAULT_ROLLING_WINDOW: usize = 3;
}

/// Engagement funnel stage estimation factors
pub mod funnel {
    /// Share of shallow conversations estimated to have engaged
    pub const ENGAGED_SHALLOW_FACTOR: f64 = 0.3;
    /// Share of moderate conversations estimated to have gone deep
    pub const DEEP_DIVE_MODERATE_FACTOR: f64 = 0.4;
    /// Share of deep conversations estimated to be power usage
    pub const POWER_DEEP_FACTOR: f64 = 0.6;
    /// Drop-off percentage below which retention reads as healthy
    pub const GOOD_RETENTION_MAX_DROP_OFF_PERCENT: u8 = 30;
}

/// Signal extraction limits
pub mod signals {
    /// Maximum stored example excerpts per detected topic
    pub const MAX_EXAMPLES_PER_TOPIC: usize = 5;
    /// Maximum characters kept per stored example excerpt
    pub const MAX_EXAMPLE_CHARS: usize = 120;
}
