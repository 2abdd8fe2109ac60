// ABOUTME: Evaluation facade running the full pipeline from raw transcripts to a snapshot
// ABOUTME: Parallel classification fan with order-preserving fan-in and malformed-record skipping
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Parley Conversation Intelligence

//! Evaluation Engine
//!
//! The facade the dashboard layer calls. `evaluate` runs signal extraction,
//! classification, aggregation, insight generation, and funnel analysis over
//! one batch and returns a snapshot; storing it is the caller's move.
//! `compare` and `trend` are pure functions over stored snapshots.
//!
//! Classification is embarrassingly parallel: each conversation is classified
//! independently and the fan-in preserves input order, so identical input
//! yields byte-identical output apart from `generated_at`.

use crate::aggregator::MetricsAggregator;
use crate::classifier::ConversationClassifier;
use crate::funnel::FunnelAnalyzer;
use crate::insights::InsightGenerator;
use crate::signals::{ExtractedSignals, TextSignalExtractor};
use crate::trends::{ComparisonResult, TrendAnalyzer, TrendResult};
use chrono::{NaiveDate, Utc};
use parley_core::errors::AppResult;
use parley_core::models::{Conversation, RawConversation, Snapshot, UsageCounters};
use rayon::prelude::*;
use tracing::{debug, warn};

/// Full-pipeline evaluation facade with default strategies
///
/// Callers needing custom matching strategies or configs compose the
/// component types directly; this facade wires the defaults together.
pub struct EvaluationEngine {
    extractor: TextSignalExtractor,
    classifier: ConversationClassifier,
    aggregator: MetricsAggregator,
    insights: InsightGenerator,
    trends: TrendAnalyzer,
    funnel: FunnelAnalyzer,
}

impl Default for EvaluationEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl EvaluationEngine {
    /// Create an engine with default strategies and the global config
    #[must_use]
    pub fn new() -> Self {
        Self {
            extractor: TextSignalExtractor::new(),
            classifier: ConversationClassifier::new(),
            aggregator: MetricsAggregator::new(),
            insights: InsightGenerator::new(),
            trends: TrendAnalyzer::new(),
            funnel: FunnelAnalyzer::new(),
        }
    }

    /// Run the full evaluation pipeline over one batch
    ///
    /// Malformed records are skipped with a recorded count and never abort
    /// the run. The returned snapshot is keyed by `date` (`None` = all-time);
    /// persisting it through a [`crate::store::SnapshotStore`] is the
    /// caller's responsibility.
    #[must_use]
    pub fn evaluate(
        &self,
        conversations: &[RawConversation],
        counters: UsageCounters,
        date: Option<NaiveDate>,
        prior: Option<&Snapshot>,
    ) -> Snapshot {
        let mut valid = Vec::with_capacity(conversations.len());
        let mut skipped: u64 = 0;

        for raw in conversations {
            match raw.validate() {
                Ok(()) => valid.push(raw),
                Err(error) => {
                    skipped += 1;
                    warn!(conversation = %raw.id, %error, "skipping malformed conversation");
                }
            }
        }

        let results: Vec<AppResult<Conversation>> = valid
            .par_iter()
            .map(|raw| self.classify_one(raw))
            .collect();

        let mut classified = Vec::with_capacity(results.len());
        for result in results {
            match result {
                Ok(conversation) => classified.push(conversation),
                Err(error) => {
                    skipped += 1;
                    warn!(%error, "skipping unclassifiable conversation");
                }
            }
        }

        debug!(
            submitted = conversations.len(),
            classified = classified.len(),
            skipped,
            "classified conversation batch"
        );

        let metrics = self.aggregator.aggregate(&classified, counters, skipped);
        let report = self.insights.generate(&metrics, prior);
        let funnel = self.funnel.analyze(&metrics.ai.depth);
        let quality_score = self.trends.quality_score(&metrics.ai, &report.insights);

        Snapshot {
            id: Snapshot::natural_id(date),
            date,
            generated_at: Utc::now(),
            sample_size: conversations.len() as u64,
            conversations_analyzed: metrics.ai.conversations_analyzed,
            user_metrics: metrics.user,
            ai_metrics: metrics.ai,
            insights: report.insights,
            action_items: report.action_items,
            funnel,
            quality_score,
        }
    }

    /// Pairwise comparison over stored snapshots; see [`TrendAnalyzer::compare`]
    #[must_use]
    pub fn compare(&self, snapshots: &[Snapshot], id_a: &str, id_b: &str) -> ComparisonResult {
        self.trends.compare(snapshots, id_a, id_b)
    }

    /// Trend statistics over stored snapshots; see [`TrendAnalyzer::trend`]
    #[must_use]
    pub fn trend(&self, snapshots: &[Snapshot]) -> TrendResult {
        self.trends.trend(snapshots)
    }

    /// Extract signals and classify one validated conversation
    fn classify_one(&self, raw: &RawConversation) -> AppResult<Conversation> {
        let signals = self.extractor.extract(&raw.messages, raw.locale.as_deref());
        let outcome = self.classifier.classify(raw, &signals)?;
        let engagement_score = self.classifier.engagement_score(raw, &signals);
        let ExtractedSignals {
            topics,
            topic_details,
            sentiment,
            language,
        } = signals;

        Ok(Conversation {
            id: raw.id.clone(),
            user_id: raw.user_id.clone(),
            messages: raw.messages.clone(),
            created_at: raw.created_at,
            last_message_at: raw.last_message_at,
            language,
            topics,
            topic_details,
            success: outcome,
            sentiment,
            engagement_score,
        })
    }
}
