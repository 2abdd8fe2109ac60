// ABOUTME: Folds classified conversations and raw usage counters into aggregate metrics
// ABOUTME: Depth buckets, response-quality buckets, hourly histogram, and topic counts
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Parley Conversation Intelligence

//! Metrics Aggregation
//!
//! Folds a classified batch plus externally supplied usage counters into one
//! [`AggregateMetrics`]. Bucket sums are conserved: depth buckets sum to the
//! number of conversations analyzed and response-quality buckets sum to the
//! number of assistant messages; skipped records appear in no bucket.

use crate::config::evaluation::AggregatorConfig;
use crate::config::EvaluationConfig;
use chrono::Timelike;
use parley_core::models::{
    AggregateMetrics, AiMetrics, Conversation, DepthBuckets, ResponseQualityBuckets, TopicCount,
    UsageCounters, UserMetrics,
};
use std::collections::BTreeMap;
use tracing::debug;

/// Aggregates a classified batch into snapshot metrics
pub struct MetricsAggregator {
    config: AggregatorConfig,
}

impl Default for MetricsAggregator {
    fn default() -> Self {
        Self::new()
    }
}

impl MetricsAggregator {
    /// Create an aggregator with the global config
    #[must_use]
    pub fn new() -> Self {
        Self {
            config: EvaluationConfig::global().aggregator.clone(),
        }
    }

    /// Create an aggregator with explicit config
    #[must_use]
    pub const fn with_config(config: AggregatorConfig) -> Self {
        Self { config }
    }

    /// Fold a classified batch and usage counters into aggregate metrics
    ///
    /// `skipped` is the count of malformed records excluded before
    /// classification; it is surfaced on the AI metrics and nowhere else.
    #[must_use]
    pub fn aggregate(
        &self,
        conversations: &[Conversation],
        counters: UsageCounters,
        skipped: u64,
    ) -> AggregateMetrics {
        let mut ai = AiMetrics {
            conversations_analyzed: conversations.len() as u64,
            conversations_skipped: skipped,
            ..AiMetrics::default()
        };

        let mut depth = DepthBuckets::default();
        let mut quality = ResponseQualityBuckets::default();
        let mut topic_counts: BTreeMap<&str, u64> = BTreeMap::new();
        let mut assistant_chars: u64 = 0;

        for conversation in conversations {
            depth = self.record_depth(depth, conversation.message_count());
            ai.total_messages += conversation.messages.len() as u64;

            for message in conversation.assistant_messages() {
                let chars = message.char_count();
                assistant_chars += chars as u64;
                ai.total_assistant_messages += 1;
                quality = self.record_response_quality(quality, chars);
            }

            if let Some(created_at) = conversation.created_at {
                ai.hourly_activity[created_at.hour() as usize] += 1;
            }

            for topic in &conversation.topics {
                *topic_counts.entry(topic.as_str()).or_insert(0) += 1;
            }

            ai.outcomes.record(conversation.success.classification);
            ai.sentiment.record(conversation.sentiment);
        }

        ai.depth = depth;
        ai.response_quality = quality;
        ai.topic_counts = Self::rank_topics(topic_counts);
        ai.mean_response_chars = if ai.total_assistant_messages == 0 {
            0.0
        } else {
            #[allow(clippy::cast_precision_loss)]
            {
                assistant_chars as f64 / ai.total_assistant_messages as f64
            }
        };

        debug!(
            analyzed = ai.conversations_analyzed,
            skipped = ai.conversations_skipped,
            assistant_messages = ai.total_assistant_messages,
            "aggregated conversation batch"
        );

        AggregateMetrics {
            user: UserMetrics::from(counters),
            ai,
        }
    }

    /// Add one conversation to the depth distribution
    fn record_depth(&self, mut buckets: DepthBuckets, message_count: usize) -> DepthBuckets {
        let edges = &self.config.depth;
        if message_count <= edges.shallow_max_messages {
            buckets.shallow += 1;
        } else if message_count <= edges.moderate_max_messages {
            buckets.moderate += 1;
        } else {
            buckets.deep += 1;
        }
        buckets
    }

    /// Add one assistant response to the length distribution
    fn record_response_quality(
        &self,
        mut buckets: ResponseQualityBuckets,
        chars: usize,
    ) -> ResponseQualityBuckets {
        let bands = &self.config.response_length;
        if chars < bands.too_short_below_chars {
            buckets.too_short += 1;
        } else if chars <= bands.too_long_above_chars {
            buckets.appropriate += 1;
        } else {
            buckets.too_long += 1;
        }
        buckets
    }

    /// Order topic frequencies: descending by count, ties ascending by name
    fn rank_topics(topic_counts: BTreeMap<&str, u64>) -> Vec<TopicCount> {
        let mut ranked: Vec<TopicCount> = topic_counts
            .into_iter()
            .map(|(topic, count)| TopicCount {
                topic: topic.to_owned(),
                count,
            })
            .collect();
        ranked.sort_by(|a, b| b.count.cmp(&a.count).then_with(|| a.topic.cmp(&b.topic)));
        ranked
    }
}
