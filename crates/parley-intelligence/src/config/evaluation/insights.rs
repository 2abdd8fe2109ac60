// ABOUTME: Insight rule-table thresholds for aggregate metric warnings
// ABOUTME: Percentage cutoffs that decide when each rule row fires
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Parley Conversation Intelligence

use parley_core::constants::insight_thresholds;
use serde::{Deserialize, Serialize};

/// Insight Rule Thresholds
///
/// Each field gates one row of the insight rule table. All rows run on every
/// evaluation; multiple rows may fire.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InsightRulesConfig {
    /// Too-short response share that triggers a quality warning, percent
    pub too_short_warn_percent: f64,
    /// Too-short response share that escalates to critical, percent
    pub too_short_critical_percent: f64,
    /// Shallow conversation share that triggers an engagement warning, percent
    pub shallow_warn_percent: f64,
    /// Active-user share below which retention is flagged, percent
    pub active_users_min_percent: f64,
    /// Abandoned conversation share that triggers an engagement warning, percent
    pub abandoned_warn_percent: f64,
    /// Failed conversation share that triggers a quality warning, percent
    pub failed_warn_percent: f64,
}

impl Default for InsightRulesConfig {
    fn default() -> Self {
        Self {
            too_short_warn_percent: insight_thresholds::TOO_SHORT_WARN_PERCENT,
            too_short_critical_percent: insight_thresholds::TOO_SHORT_CRITICAL_PERCENT,
            shallow_warn_percent: insight_thresholds::SHALLOW_WARN_PERCENT,
            active_users_min_percent: insight_thresholds::ACTIVE_USERS_MIN_PERCENT,
            abandoned_warn_percent: insight_thresholds::ABANDONED_WARN_PERCENT,
            failed_warn_percent: insight_thresholds::FAILED_WARN_PERCENT,
        }
    }
}
