// ABOUTME: Snapshot quality scoring, rolling trend statistics, and pairwise comparison
// ABOUTME: Pure read-only analysis over stored snapshots with polarity-aware assessments
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Parley Conversation Intelligence

//! Trend Analysis
//!
//! Computes a derived quality score per snapshot, rolling statistics over a
//! snapshot series, trend direction, and polarity-aware pairwise comparison
//! between two selected snapshots. Everything here is pure and read-only;
//! missing or insufficient input produces a clearly-marked empty result,
//! never an error.

use crate::config::evaluation::TrendConfig;
use crate::config::EvaluationConfig;
use chrono::NaiveDate;
use parley_core::models::{AiMetrics, Insight, InsightType, Snapshot};
use serde::{Deserialize, Serialize};

/// Direction of the quality trend over a snapshot series
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum TrendDirection {
    /// Latest quality exceeds the first by more than the improving delta
    Improving,
    /// Quality is moving within the stable band
    Stable,
    /// Latest quality trails the first by more than the declining delta
    Declining,
}

/// One snapshot's contribution to a trend series
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TrendPoint {
    /// Snapshot date key
    pub date: NaiveDate,
    /// Quality score for the snapshot
    pub quality_score: u8,
    /// Rolling average ending at this point
    pub rolling_average: f64,
}

/// Trend statistics over an ordered snapshot series
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TrendResult {
    /// Chronological data points with rolling averages
    pub points: Vec<TrendPoint>,
    /// Mean quality score over the series
    pub average_quality: f64,
    /// Population standard deviation of quality scores
    pub volatility: f64,
    /// Overall direction of the series
    pub direction: TrendDirection,
    /// True when fewer than two dated snapshots were available
    pub insufficient_data: bool,
}

/// Whether movement in a metric is good, bad, or neither
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum MetricPolarity {
    /// Increases are improvements
    HigherIsBetter,
    /// Decreases are improvements
    LowerIsBetter,
    /// No single healthy direction
    Neutral,
}

/// Assessment of one metric's movement between two snapshots
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum ChangeAssessment {
    /// Moved in the healthy direction
    Improved,
    /// Moved in the unhealthy direction
    Regressed,
    /// No movement
    Unchanged,
    /// The metric has no single healthy direction
    Neutral,
}

/// One tracked metric's movement between two snapshots
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MetricComparison {
    /// Metric name
    pub metric: String,
    /// Value in the current snapshot
    pub current: f64,
    /// Value in the previous snapshot
    pub previous: f64,
    /// current − previous
    pub change: f64,
    /// Percent change against the previous value, with 0-denominator convention
    pub change_percent: i64,
    /// Whether movement in this metric is good, bad, or neither
    pub polarity: MetricPolarity,
    /// Assessment of the movement under that polarity
    pub assessment: ChangeAssessment,
}

/// Pairwise comparison between two snapshots
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ComparisonResult {
    /// Id of the current-side snapshot
    pub current_id: String,
    /// Id of the previous-side snapshot
    pub previous_id: String,
    /// Tracked metric movements
    pub metrics: Vec<MetricComparison>,
    /// True when either snapshot id was not found
    pub insufficient_data: bool,
}

/// One row of the tracked-metric comparison table
struct TrackedMetric {
    name: &'static str,
    polarity: MetricPolarity,
    value: fn(&Snapshot) -> f64,
}

#[allow(clippy::cast_precision_loss)]
const TRACKED_METRICS: &[TrackedMetric] = &[
    TrackedMetric {
        name: "quality_score",
        polarity: MetricPolarity::HigherIsBetter,
        value: |s| f64::from(s.quality_score),
    },
    TrackedMetric {
        name: "conversations_analyzed",
        polarity: MetricPolarity::HigherIsBetter,
        value: |s| s.conversations_analyzed as f64,
    },
    TrackedMetric {
        name: "successful_conversations",
        polarity: MetricPolarity::HigherIsBetter,
        value: |s| s.ai_metrics.outcomes.successful as f64,
    },
    TrackedMetric {
        name: "abandoned_conversations",
        polarity: MetricPolarity::LowerIsBetter,
        value: |s| s.ai_metrics.outcomes.abandoned as f64,
    },
    TrackedMetric {
        name: "too_short_responses",
        polarity: MetricPolarity::LowerIsBetter,
        value: |s| s.ai_metrics.response_quality.too_short as f64,
    },
    TrackedMetric {
        name: "mean_response_chars",
        polarity: MetricPolarity::Neutral,
        value: |s| s.ai_metrics.mean_response_chars,
    },
    TrackedMetric {
        name: "active_users_24h",
        polarity: MetricPolarity::HigherIsBetter,
        value: |s| s.user_metrics.active_users_24h as f64,
    },
];

/// Computes quality scores, trend statistics, and snapshot comparisons
pub struct TrendAnalyzer {
    config: TrendConfig,
}

impl Default for TrendAnalyzer {
    fn default() -> Self {
        Self::new()
    }
}

impl TrendAnalyzer {
    /// Create an analyzer with the global config
    #[must_use]
    pub fn new() -> Self {
        Self {
            config: EvaluationConfig::global().trends.clone(),
        }
    }

    /// Create an analyzer with explicit config
    #[must_use]
    pub const fn with_config(config: TrendConfig) -> Self {
        Self { config }
    }

    /// Derived quality score for one snapshot's metrics and insights
    ///
    /// Used when no externally supplied score exists: base score plus depth
    /// ratios, a response-length band bonus, and insight polarity points,
    /// clamped to [0, 100].
    #[must_use]
    pub fn quality_score(&self, ai: &AiMetrics, insights: &[Insight]) -> u8 {
        let weights = &self.config.quality;
        let mut score = weights.base_score;

        if ai.conversations_analyzed > 0 {
            #[allow(clippy::cast_precision_loss)]
            let analyzed = ai.conversations_analyzed as f64;
            #[allow(clippy::cast_precision_loss)]
            let deep_ratio = ai.depth.deep as f64 / analyzed;
            #[allow(clippy::cast_precision_loss)]
            let moderate_ratio = ai.depth.moderate as f64 / analyzed;
            score += deep_ratio * weights.deep_ratio_weight;
            score += moderate_ratio * weights.moderate_ratio_weight;
        }

        let mean = ai.mean_response_chars;
        if ai.total_assistant_messages > 0 {
            if mean >= weights.tight_band_min_chars && mean <= weights.tight_band_max_chars {
                score += weights.tight_band_bonus;
            } else if mean >= weights.wide_band_min_chars && mean <= weights.wide_band_max_chars {
                score += weights.wide_band_bonus;
            }
        }

        let positive = insights
            .iter()
            .filter(|i| i.insight_type == InsightType::Positive)
            .count();
        let negative = insights
            .iter()
            .filter(|i| i.insight_type == InsightType::Negative)
            .count();
        #[allow(clippy::cast_precision_loss)]
        {
            score += positive as f64 * weights.positive_insight_points;
            score -= negative as f64 * weights.negative_insight_penalty;
        }

        #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
        {
            score.round().clamp(0.0, 100.0) as u8
        }
    }

    /// Rolling statistics and direction over a snapshot series
    ///
    /// Only dated snapshots participate; fewer than two of them yields an
    /// insufficient-data result rather than an error.
    #[must_use]
    pub fn trend(&self, snapshots: &[Snapshot]) -> TrendResult {
        let mut dated: Vec<(&Snapshot, NaiveDate)> = snapshots
            .iter()
            .filter_map(|s| s.date.map(|d| (s, d)))
            .collect();
        dated.sort_by_key(|(_, date)| *date);

        if dated.len() < 2 {
            return TrendResult {
                points: Vec::new(),
                average_quality: 0.0,
                volatility: 0.0,
                direction: TrendDirection::Stable,
                insufficient_data: true,
            };
        }

        let scores: Vec<f64> = dated
            .iter()
            .map(|(s, _)| f64::from(s.quality_score))
            .collect();

        let window = self.config.direction.rolling_window.max(1);
        let points: Vec<TrendPoint> = dated
            .iter()
            .enumerate()
            .map(|(i, (snapshot, date))| {
                let start = (i + 1).saturating_sub(window);
                let slice = &scores[start..=i];
                #[allow(clippy::cast_precision_loss)]
                let rolling_average = slice.iter().sum::<f64>() / slice.len() as f64;
                TrendPoint {
                    date: *date,
                    quality_score: snapshot.quality_score,
                    rolling_average,
                }
            })
            .collect();

        #[allow(clippy::cast_precision_loss)]
        let count = scores.len() as f64;
        let average_quality = scores.iter().sum::<f64>() / count;
        let variance = scores
            .iter()
            .map(|s| (s - average_quality).powi(2))
            .sum::<f64>()
            / count;
        let volatility = variance.sqrt();

        let delta = scores[scores.len() - 1] - scores[0];
        let direction = if delta > self.config.direction.improving_delta {
            TrendDirection::Improving
        } else if delta < self.config.direction.declining_delta {
            TrendDirection::Declining
        } else {
            TrendDirection::Stable
        };

        TrendResult {
            points,
            average_quality,
            volatility,
            direction,
            insufficient_data: false,
        }
    }

    /// Pairwise comparison of two snapshots selected by id
    ///
    /// `id_a` is the current side, `id_b` the previous. An unknown id on
    /// either side yields an insufficient-data result rather than an error.
    #[must_use]
    pub fn compare(&self, snapshots: &[Snapshot], id_a: &str, id_b: &str) -> ComparisonResult {
        let current = snapshots.iter().find(|s| s.id == id_a);
        let previous = snapshots.iter().find(|s| s.id == id_b);

        let (Some(current), Some(previous)) = (current, previous) else {
            return ComparisonResult {
                current_id: id_a.to_owned(),
                previous_id: id_b.to_owned(),
                metrics: Vec::new(),
                insufficient_data: true,
            };
        };

        let metrics = TRACKED_METRICS
            .iter()
            .map(|tracked| {
                let current_value = (tracked.value)(current);
                let previous_value = (tracked.value)(previous);
                let change = current_value - previous_value;
                let change_percent = change_percent(current_value, previous_value);
                MetricComparison {
                    metric: tracked.name.to_owned(),
                    current: current_value,
                    previous: previous_value,
                    change,
                    change_percent,
                    polarity: tracked.polarity,
                    assessment: assess(change, tracked.polarity),
                }
            })
            .collect();

        ComparisonResult {
            current_id: id_a.to_owned(),
            previous_id: id_b.to_owned(),
            metrics,
            insufficient_data: false,
        }
    }
}

/// Percent change with the zero-denominator convention
fn change_percent(current: f64, previous: f64) -> i64 {
    if previous == 0.0 {
        return i64::from(current > 0.0) * 100;
    }
    #[allow(clippy::cast_possible_truncation)]
    {
        ((current - previous) / previous * 100.0).round() as i64
    }
}

/// Assess a movement under a metric's polarity
fn assess(change: f64, polarity: MetricPolarity) -> ChangeAssessment {
    if matches!(polarity, MetricPolarity::Neutral) {
        return ChangeAssessment::Neutral;
    }
    if change == 0.0 {
        return ChangeAssessment::Unchanged;
    }
    let got_better = match polarity {
        MetricPolarity::HigherIsBetter => change > 0.0,
        MetricPolarity::LowerIsBetter => change < 0.0,
        MetricPolarity::Neutral => false,
    };
    if got_better {
        ChangeAssessment::Improved
    } else {
        ChangeAssessment::Regressed
    }
}
