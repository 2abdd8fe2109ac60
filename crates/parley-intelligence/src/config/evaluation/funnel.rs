// ABOUTME: Funnel analysis configuration for stage estimation and retention
// ABOUTME: Hand-tuned stage factors preserved as overridable values
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Parley Conversation Intelligence

use parley_core::constants::funnel;
use serde::{Deserialize, Serialize};

/// Funnel Analysis Configuration
///
/// The stage factors are hand-tuned product heuristics with no documented
/// derivation; they are configuration, not invariants.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FunnelConfig {
    /// Share of shallow conversations estimated to have engaged
    pub engaged_shallow_factor: f64,
    /// Share of moderate conversations estimated to have gone deep
    pub deep_dive_moderate_factor: f64,
    /// Share of deep conversations estimated to be power usage
    pub power_deep_factor: f64,
    /// Drop-off percentage below which retention reads as healthy
    pub good_retention_max_drop_off_percent: u8,
}

impl Default for FunnelConfig {
    fn default() -> Self {
        Self {
            engaged_shallow_factor: funnel::ENGAGED_SHALLOW_FACTOR,
            deep_dive_moderate_factor: funnel::DEEP_DIVE_MODERATE_FACTOR,
            power_deep_factor: funnel::POWER_DEEP_FACTOR,
            good_retention_max_drop_off_percent: funnel::GOOD_RETENTION_MAX_DROP_OFF_PERCENT,
        }
    }
}
