// ABOUTME: Evaluation configuration tree combining all component configs
// ABOUTME: Process-wide defaults reachable through EvaluationConfig::global()
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Parley Conversation Intelligence

//! Evaluation Configuration
//!
//! Every hand-tuned heuristic in the engine lives here as an overridable
//! value whose default references a named constant in `parley_core::constants`.
//! Components accept an explicit config through `with_config` constructors;
//! `EvaluationConfig::global()` provides the process-wide default tree.

use serde::{Deserialize, Serialize};
use std::sync::OnceLock;

/// Conversation depth and response length bucketing configuration
pub mod aggregator;
/// Outcome scoring weights and classification thresholds
pub mod classifier;
/// Funnel stage estimation factors and retention thresholds
pub mod funnel;
/// Insight rule-table thresholds
pub mod insights;
/// Topic/sentiment extraction limits
pub mod signals;
/// Quality-score formula weights and trend thresholds
pub mod trends;

pub use aggregator::AggregatorConfig;
pub use classifier::{ClassifierConfig, EngagementWeights, IndicatorWeights};
pub use funnel::FunnelConfig;
pub use insights::InsightRulesConfig;
pub use signals::SignalConfig;
pub use trends::TrendConfig;

static EVALUATION_CONFIG: OnceLock<EvaluationConfig> = OnceLock::new();

/// Full configuration tree for the evaluation engine
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EvaluationConfig {
    /// Signal extraction settings
    pub signals: SignalConfig,
    /// Outcome classification settings
    pub classifier: ClassifierConfig,
    /// Metrics aggregation settings
    pub aggregator: AggregatorConfig,
    /// Insight rule thresholds
    pub insights: InsightRulesConfig,
    /// Trend analysis settings
    pub trends: TrendConfig,
    /// Funnel analysis settings
    pub funnel: FunnelConfig,
}

impl EvaluationConfig {
    /// Process-wide default configuration
    pub fn global() -> &'static Self {
        EVALUATION_CONFIG.get_or_init(Self::default)
    }
}
