// ABOUTME: Unit tests for metrics aggregation over classified batches
// ABOUTME: Covers bucket conservation, hourly histogram exclusion, and topic ordering
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Parley Conversation Intelligence

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]

use chrono::{DateTime, TimeZone, Utc};
use parley_core::models::{
    Conversation, ConversationOutcome, Message, OutcomeClassification, Sentiment,
    SuccessIndicators, UsageCounters,
};
use parley_intelligence::MetricsAggregator;
use std::collections::BTreeSet;

fn classified(
    id: &str,
    messages: Vec<Message>,
    topics: &[&str],
    classification: OutcomeClassification,
    created_at: Option<DateTime<Utc>>,
) -> Conversation {
    Conversation {
        id: id.to_owned(),
        user_id: "user-1".to_owned(),
        messages,
        created_at,
        last_message_at: created_at,
        language: "en".to_owned(),
        topics: topics.iter().map(|t| (*t).to_owned()).collect::<BTreeSet<_>>(),
        topic_details: Vec::new(),
        success: ConversationOutcome {
            score: 50,
            classification,
            reasons: Vec::new(),
            indicators: SuccessIndicators::default(),
        },
        sentiment: Sentiment::Neutral,
        engagement_score: 50,
    }
}

fn exchange(turns: usize, assistant_chars: usize) -> Vec<Message> {
    let reply = "a".repeat(assistant_chars);
    let mut messages = Vec::new();
    for _ in 0..turns {
        messages.push(Message::user("question"));
        messages.push(Message::assistant(reply.clone()));
    }
    messages
}

#[test]
fn test_depth_buckets_conserve_conversation_count() {
    let aggregator = MetricsAggregator::new();
    let batch = vec![
        classified("c1", exchange(1, 100), &[], OutcomeClassification::Partial, None),
        classified("c2", exchange(2, 100), &[], OutcomeClassification::Partial, None),
        classified("c3", exchange(3, 100), &[], OutcomeClassification::Successful, None),
        classified("c4", exchange(4, 100), &[], OutcomeClassification::Successful, None),
        classified("c5", vec![Message::user("hi")], &[], OutcomeClassification::Abandoned, None),
    ];

    let metrics = aggregator.aggregate(&batch, UsageCounters::default(), 0);

    let depth = metrics.ai.depth;
    assert_eq!(depth.shallow, 2, "1-2 message conversations");
    assert_eq!(depth.moderate, 1, "3-5 message conversations");
    assert_eq!(depth.deep, 2, "6+ message conversations");
    assert_eq!(depth.total(), metrics.ai.conversations_analyzed);
}

#[test]
fn test_response_quality_buckets_conserve_assistant_count() {
    let aggregator = MetricsAggregator::new();
    let batch = vec![
        classified("c1", exchange(1, 10), &[], OutcomeClassification::Failed, None),
        classified("c2", exchange(1, 50), &[], OutcomeClassification::Partial, None),
        classified("c3", exchange(1, 500), &[], OutcomeClassification::Partial, None),
        classified("c4", exchange(1, 501), &[], OutcomeClassification::Partial, None),
    ];

    let metrics = aggregator.aggregate(&batch, UsageCounters::default(), 0);

    let quality = metrics.ai.response_quality;
    assert_eq!(quality.too_short, 1);
    assert_eq!(quality.appropriate, 2, "50 and 500 chars are both inclusive");
    assert_eq!(quality.too_long, 1);
    assert_eq!(quality.total(), metrics.ai.total_assistant_messages);
}

#[test]
fn test_hourly_histogram_excludes_missing_timestamps() {
    let aggregator = MetricsAggregator::new();
    let at_13 = Utc.with_ymd_and_hms(2025, 6, 1, 13, 30, 0).unwrap();
    let batch = vec![
        classified("c1", exchange(1, 100), &[], OutcomeClassification::Partial, Some(at_13)),
        classified("c2", exchange(1, 100), &[], OutcomeClassification::Partial, Some(at_13)),
        classified("c3", exchange(1, 100), &[], OutcomeClassification::Partial, None),
    ];

    let metrics = aggregator.aggregate(&batch, UsageCounters::default(), 0);

    assert_eq!(metrics.ai.hourly_activity[13], 2);
    let histogram_total: u64 = metrics.ai.hourly_activity.iter().sum();
    assert_eq!(histogram_total, 2, "untimestamped conversation is excluded");
    assert_eq!(metrics.ai.conversations_analyzed, 3, "but still counted elsewhere");
}

#[test]
fn test_topic_counts_sorted_by_count_then_name() {
    let aggregator = MetricsAggregator::new();
    let batch = vec![
        classified("c1", exchange(1, 100), &["coding", "travel"], OutcomeClassification::Partial, None),
        classified("c2", exchange(1, 100), &["coding", "finance"], OutcomeClassification::Partial, None),
        classified("c3", exchange(1, 100), &["travel"], OutcomeClassification::Partial, None),
    ];

    let metrics = aggregator.aggregate(&batch, UsageCounters::default(), 0);

    let order: Vec<(&str, u64)> = metrics
        .ai
        .topic_counts
        .iter()
        .map(|t| (t.topic.as_str(), t.count))
        .collect();
    assert_eq!(
        order,
        vec![("coding", 2), ("travel", 2), ("finance", 1)],
        "descending by count, ties ascending by name"
    );
}

#[test]
fn test_outcome_and_sentiment_tallies() {
    let aggregator = MetricsAggregator::new();
    let batch = vec![
        classified("c1", exchange(1, 100), &[], OutcomeClassification::Successful, None),
        classified("c2", exchange(1, 100), &[], OutcomeClassification::Abandoned, None),
        classified("c3", exchange(1, 100), &[], OutcomeClassification::Abandoned, None),
    ];

    let metrics = aggregator.aggregate(&batch, UsageCounters::default(), 0);

    assert_eq!(metrics.ai.outcomes.successful, 1);
    assert_eq!(metrics.ai.outcomes.abandoned, 2);
    assert_eq!(metrics.ai.outcomes.total(), 3);
    assert_eq!(metrics.ai.sentiment.neutral, 3);
}

#[test]
fn test_empty_batch_produces_zeroed_metrics() {
    let aggregator = MetricsAggregator::new();

    let metrics = aggregator.aggregate(&[], UsageCounters::default(), 2);

    assert_eq!(metrics.ai.conversations_analyzed, 0);
    assert_eq!(metrics.ai.conversations_skipped, 2);
    assert_eq!(metrics.ai.mean_response_chars, 0.0, "no NaN on empty input");
    assert_eq!(metrics.ai.depth.total(), 0);
}

#[test]
fn test_usage_counters_pass_through() {
    let aggregator = MetricsAggregator::new();
    let counters = UsageCounters {
        total_users: 250,
        active_users_24h: 40,
        app_opens: 900,
        ..UsageCounters::default()
    };

    let metrics = aggregator.aggregate(&[], counters, 0);

    assert_eq!(metrics.user.total_users, 250);
    assert_eq!(metrics.user.active_users_24h, 40);
    assert_eq!(metrics.user.app_opens, 900);
}

#[test]
fn test_mean_response_chars() {
    let aggregator = MetricsAggregator::new();
    let batch = vec![
        classified("c1", exchange(1, 100), &[], OutcomeClassification::Partial, None),
        classified("c2", exchange(1, 200), &[], OutcomeClassification::Partial, None),
    ];

    let metrics = aggregator.aggregate(&batch, UsageCounters::default(), 0);

    assert!((metrics.ai.mean_response_chars - 150.0).abs() < f64::EPSILON);
}
