// ABOUTME: Trend analysis configuration for quality scoring and direction detection
// ABOUTME: Quality-score formula weights, direction deltas, and rolling window
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Parley Conversation Intelligence

use parley_core::constants::{quality_score, response_length, trend};
use serde::{Deserialize, Serialize};

/// Trend Analysis Configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TrendConfig {
    /// Quality-score formula weights
    pub quality: QualityScoreWeights,
    /// Trend direction thresholds and rolling statistics
    pub direction: DirectionThresholds,
}

/// Quality-score formula weights
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QualityScoreWeights {
    /// Score every snapshot starts from
    pub base_score: f64,
    /// Maximum contribution of the deep conversation ratio
    pub deep_ratio_weight: f64,
    /// Maximum contribution of the moderate conversation ratio
    pub moderate_ratio_weight: f64,
    /// Bonus when mean response length falls in the tight band
    pub tight_band_bonus: f64,
    /// Lower edge of the tight band, characters
    pub tight_band_min_chars: f64,
    /// Upper edge of the tight band, characters
    pub tight_band_max_chars: f64,
    /// Bonus when mean response length falls in the wide band only
    pub wide_band_bonus: f64,
    /// Lower edge of the wide band, characters
    pub wide_band_min_chars: f64,
    /// Upper edge of the wide band, characters
    pub wide_band_max_chars: f64,
    /// Points added per positive insight
    pub positive_insight_points: f64,
    /// Points subtracted per negative insight
    pub negative_insight_penalty: f64,
}

/// Trend direction thresholds and rolling statistics
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DirectionThresholds {
    /// Quality-score rise beyond which the trend reads improving
    pub improving_delta: f64,
    /// Quality-score fall beyond which the trend reads declining
    pub declining_delta: f64,
    /// Rolling-average window over snapshots
    pub rolling_window: usize,
}

impl Default for QualityScoreWeights {
    fn default() -> Self {
        Self {
            base_score: quality_score::BASE_SCORE,
            deep_ratio_weight: quality_score::DEEP_RATIO_WEIGHT,
            moderate_ratio_weight: quality_score::MODERATE_RATIO_WEIGHT,
            tight_band_bonus: quality_score::TIGHT_BAND_BONUS,
            tight_band_min_chars: response_length::TIGHT_BAND_MIN_CHARS,
            tight_band_max_chars: response_length::TIGHT_BAND_MAX_CHARS,
            wide_band_bonus: quality_score::WIDE_BAND_BONUS,
            wide_band_min_chars: response_length::WIDE_BAND_MIN_CHARS,
            wide_band_max_chars: response_length::WIDE_BAND_MAX_CHARS,
            positive_insight_points: quality_score::POSITIVE_INSIGHT_POINTS,
            negative_insight_penalty: quality_score::NEGATIVE_INSIGHT_PENALTY,
        }
    }
}

impl Default for DirectionThresholds {
    fn default() -> Self {
        Self {
            improving_delta: trend::IMPROVING_DELTA,
            declining_delta: trend::DECLINING_DELTA,
            rolling_window: trend::DEFAULT_ROLLING_WINDOW,
        }
    }
}
