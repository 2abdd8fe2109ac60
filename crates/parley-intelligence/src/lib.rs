// ABOUTME: Conversation evaluation algorithms, metrics, and insight engine
// ABOUTME: Extracted from the dashboard service for parallel compilation and modularity
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Parley Conversation Intelligence

#![deny(unsafe_code)]

//! # Parley Intelligence
//!
//! The conversation evaluation engine for the Parley platform. Turns a batch
//! of raw multi-turn transcripts plus aggregate usage counters into
//! per-conversation classifications, aggregate quality metrics, ranked
//! actionable insights, and period-over-period trend and funnel analysis.
//!
//! The pipeline runs leaf-first: signal extraction feeds classification,
//! classification feeds aggregation, and aggregation feeds the insight,
//! funnel, and quality-score stages. [`engine::EvaluationEngine`] wires the
//! stages together; [`store::SnapshotStore`] is the persistence boundary the
//! caller drives.

/// Folds classified conversations and usage counters into aggregate metrics
pub mod aggregator;
/// Conversation outcome classification via weighted indicator scoring
pub mod classifier;
/// Evaluation configuration tree with process-wide defaults
pub mod config;
/// Full-pipeline evaluation facade
pub mod engine;
/// Engagement-depth funnel analysis
pub mod funnel;
/// Threshold rule table producing insights and ranked action items
pub mod insights;
/// Topic, sentiment, and language extraction from message text
pub mod signals;
/// Snapshot persistence trait and in-memory reference store
pub mod store;
/// Quality scoring, rolling trend statistics, and snapshot comparison
pub mod trends;

pub use aggregator::MetricsAggregator;
pub use classifier::ConversationClassifier;
pub use config::EvaluationConfig;
pub use engine::EvaluationEngine;
pub use funnel::FunnelAnalyzer;
pub use insights::{InsightGenerator, InsightReport};
pub use signals::{
    ExtractedSignals, GratitudeMatcher, KeywordTopicMatcher, LexiconSentimentScorer,
    PhraseGratitudeMatcher, SentimentHits, SentimentScorer, TextSignalExtractor, TopicLexicon,
    TopicMatcher,
};
pub use store::{MemorySnapshotStore, SnapshotStore};
pub use trends::{
    ChangeAssessment, ComparisonResult, MetricComparison, MetricPolarity, TrendAnalyzer,
    TrendDirection, TrendPoint, TrendResult,
};
