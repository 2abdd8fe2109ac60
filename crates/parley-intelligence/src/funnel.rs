// ABOUTME: Engagement-depth funnel analysis with stage drop-off and remediation
// ABOUTME: Estimates Started/Engaged/DeepDive/PowerUsers stages from depth buckets
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Parley Conversation Intelligence

//! Funnel Analysis
//!
//! Projects the conversation-depth distribution onto a four-stage engagement
//! funnel and computes stage-to-stage drop-off with a fixed remediation
//! suggestion keyed by the worst transition. Pure and read-only; an all-zero
//! depth distribution yields zero counts and zero drop-offs.

use crate::config::evaluation::FunnelConfig;
use crate::config::EvaluationConfig;
use parley_core::models::{DepthBuckets, FunnelAnalysis, FunnelStage, StageDropOff};

/// Funnel stage names in order
const STAGE_NAMES: [&str; 4] = ["Started", "Engaged", "DeepDive", "PowerUsers"];

/// Remediation suggestions keyed by transition index (stage N to N+1)
const TRANSITION_SUGGESTIONS: [&str; 3] = [
    "Improve first-response engagement: most conversations never make it past the opener",
    "Improve mid-conversation personalization to carry engaged users into deeper sessions",
    "Add proactive follow-ups so deep-dive users develop a power-usage habit",
];

/// Message shown when every transition retains well
const GOOD_RETENTION_MESSAGE: &str =
    "Retention through the funnel is healthy; no transition needs intervention";

/// Computes the engagement funnel from depth buckets
pub struct FunnelAnalyzer {
    config: FunnelConfig,
}

impl Default for FunnelAnalyzer {
    fn default() -> Self {
        Self::new()
    }
}

impl FunnelAnalyzer {
    /// Create an analyzer with the global config
    #[must_use]
    pub fn new() -> Self {
        Self {
            config: EvaluationConfig::global().funnel.clone(),
        }
    }

    /// Create an analyzer with explicit config
    #[must_use]
    pub const fn with_config(config: FunnelConfig) -> Self {
        Self { config }
    }

    /// Build the four-stage funnel from a depth distribution
    #[must_use]
    pub fn analyze(&self, depth: &DepthBuckets) -> FunnelAnalysis {
        let started = depth.total();
        let engaged =
            depth.moderate + depth.deep + scaled(depth.shallow, self.config.engaged_shallow_factor);
        let deep_dive = depth.deep + scaled(depth.moderate, self.config.deep_dive_moderate_factor);
        let power = scaled(depth.deep, self.config.power_deep_factor);

        let counts = [started, engaged, deep_dive, power];

        let stages: Vec<FunnelStage> = STAGE_NAMES
            .iter()
            .zip(counts)
            .map(|(name, count)| FunnelStage {
                name: (*name).to_owned(),
                count,
                retention_percent: ratio_percent(count, started),
            })
            .collect();

        let drop_offs: Vec<StageDropOff> = counts
            .windows(2)
            .enumerate()
            .map(|(i, pair)| StageDropOff {
                from_stage: STAGE_NAMES[i].to_owned(),
                to_stage: STAGE_NAMES[i + 1].to_owned(),
                drop_off_percent: ratio_percent(pair[0].saturating_sub(pair[1]), pair[0]),
            })
            .collect();

        let suggestion = self.select_suggestion(&drop_offs);

        FunnelAnalysis {
            stages,
            drop_offs,
            suggestion,
        }
    }

    /// Pick the remediation message for the worst transition
    ///
    /// Ties resolve to the earliest transition so the output is stable.
    fn select_suggestion(&self, drop_offs: &[StageDropOff]) -> String {
        let worst = drop_offs
            .iter()
            .enumerate()
            .max_by(|(i, a), (j, b)| {
                a.drop_off_percent
                    .cmp(&b.drop_off_percent)
                    .then_with(|| j.cmp(i))
            })
            .map(|(i, d)| (i, d.drop_off_percent));

        match worst {
            Some((_, percent)) if percent < self.config.good_retention_max_drop_off_percent => {
                GOOD_RETENTION_MESSAGE.to_owned()
            }
            Some((index, _)) => TRANSITION_SUGGESTIONS[index].to_owned(),
            None => GOOD_RETENTION_MESSAGE.to_owned(),
        }
    }
}

/// Floor of a count scaled by an estimation factor
fn scaled(count: u64, factor: f64) -> u64 {
    #[allow(clippy::cast_precision_loss, clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    {
        (count as f64 * factor).floor().max(0.0) as u64
    }
}

/// Rounded percentage with the x/0 = 0 convention, bounded to [0, 100]
fn ratio_percent(numerator: u64, denominator: u64) -> u8 {
    if denominator == 0 {
        return 0;
    }
    #[allow(clippy::cast_precision_loss, clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    {
        (numerator as f64 / denominator as f64 * 100.0)
            .round()
            .clamp(0.0, 100.0) as u8
    }
}
