// ABOUTME: Integration tests for the full evaluation pipeline facade
// ABOUTME: Covers the end-to-end example batch, determinism, and malformed-record skipping
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Parley Conversation Intelligence

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]

use chrono::{NaiveDate, TimeZone, Utc};
use parley_core::models::{
    InsightCategory, InsightType, Message, Priority, RawConversation, Snapshot, UsageCounters,
};
use parley_intelligence::EvaluationEngine;

const LONG_ANSWER: &str =
    "Ownership means every value has a single owner, and the value is dropped when \
     that owner goes out of scope, which is how memory stays safe.";

fn counters() -> UsageCounters {
    UsageCounters {
        total_users: 100,
        active_users_24h: 40,
        app_opens: 500,
        ..UsageCounters::default()
    }
}

fn shallow_conversation(id: &str) -> RawConversation {
    RawConversation {
        id: id.to_owned(),
        user_id: format!("user-{id}"),
        messages: vec![Message::user("Hello")],
        created_at: None,
        last_message_at: None,
        locale: Some("en-US".to_owned()),
    }
}

fn deep_conversation(id: &str) -> RawConversation {
    let started = Utc.with_ymd_and_hms(2025, 6, 1, 14, 0, 0).unwrap();
    RawConversation {
        id: id.to_owned(),
        user_id: format!("user-{id}"),
        messages: vec![
            Message::user("Can you explain how rust ownership works?"),
            Message::assistant(LONG_ANSWER),
            Message::user("What about borrowing?"),
            Message::assistant(LONG_ANSWER),
            Message::user("thanks, that was helpful"),
            Message::assistant(LONG_ANSWER),
        ],
        created_at: Some(started),
        last_message_at: Some(started),
        locale: Some("en-US".to_owned()),
    }
}

fn example_batch() -> Vec<RawConversation> {
    let mut batch: Vec<RawConversation> =
        (0..6).map(|i| shallow_conversation(&format!("s{i}"))).collect();
    batch.extend((0..4).map(|i| deep_conversation(&format!("d{i}"))));
    batch
}

#[test]
fn test_example_batch_classification_and_aggregation() {
    let engine = EvaluationEngine::new();
    let date = NaiveDate::from_ymd_opt(2025, 6, 1).unwrap();

    let snapshot = engine.evaluate(&example_batch(), counters(), Some(date), None);

    assert_eq!(snapshot.id, "snapshot-2025-06-01");
    assert_eq!(snapshot.sample_size, 10);
    assert_eq!(snapshot.conversations_analyzed, 10);

    let depth = snapshot.ai_metrics.depth;
    assert_eq!(depth.shallow, 6);
    assert_eq!(depth.moderate, 0);
    assert_eq!(depth.deep, 4);
    assert_eq!(depth.total(), snapshot.conversations_analyzed);

    let outcomes = snapshot.ai_metrics.outcomes;
    assert_eq!(outcomes.successful, 4, "deep thankful conversations succeed");
    assert_eq!(outcomes.abandoned, 6, "lone openers are abandoned");
    assert_eq!(outcomes.partial, 0);
    assert_eq!(outcomes.failed, 0);

    // 12 assistant replies, all in the appropriate band
    let quality = snapshot.ai_metrics.response_quality;
    assert_eq!(quality.total(), snapshot.ai_metrics.total_assistant_messages);
    assert_eq!(quality.appropriate, 12);

    // Only the deep conversations carry timestamps; all start at hour 14
    assert_eq!(snapshot.ai_metrics.hourly_activity[14], 4);
    assert_eq!(snapshot.ai_metrics.hourly_activity.iter().sum::<u64>(), 4);
}

#[test]
fn test_example_batch_fires_abandonment_insight() {
    let engine = EvaluationEngine::new();

    let snapshot = engine.evaluate(&example_batch(), counters(), None, None);

    let negatives: Vec<_> = snapshot
        .insights
        .iter()
        .filter(|i| i.insight_type == InsightType::Negative)
        .collect();
    assert_eq!(negatives.len(), 1, "only abandonment crosses its threshold");
    assert_eq!(negatives[0].category, InsightCategory::Engagement);
    assert!(negatives[0].finding.contains("60.0%"));

    assert_eq!(snapshot.action_items.len(), 1);
    assert_eq!(snapshot.action_items[0].priority, Priority::High);
}

#[test]
fn test_example_batch_quality_score_and_funnel() {
    let engine = EvaluationEngine::new();

    let snapshot = engine.evaluate(&example_batch(), counters(), None, None);

    // base 50 + deep ratio 10 + tight band 15 - one negative insight 5
    assert_eq!(snapshot.quality_score, 70);

    let counts: Vec<u64> = snapshot.funnel.stages.iter().map(|s| s.count).collect();
    assert_eq!(counts, vec![10, 5, 4, 2]);
}

#[test]
fn test_evaluate_is_deterministic_apart_from_generated_at() {
    let engine = EvaluationEngine::new();
    let date = NaiveDate::from_ymd_opt(2025, 6, 1).unwrap();
    let batch = example_batch();

    let first = engine.evaluate(&batch, counters(), Some(date), None);
    let mut second = engine.evaluate(&batch, counters(), Some(date), None);
    second.generated_at = first.generated_at;

    let first_json = serde_json::to_string(&first).unwrap();
    let second_json = serde_json::to_string(&second).unwrap();
    assert_eq!(first_json, second_json);
}

#[test]
fn test_malformed_records_are_skipped_not_fatal() {
    let engine = EvaluationEngine::new();
    let mut batch = example_batch();
    batch.push(RawConversation {
        id: "broken".to_owned(),
        user_id: "user-x".to_owned(),
        messages: Vec::new(),
        created_at: None,
        last_message_at: None,
        locale: None,
    });
    batch.push(RawConversation {
        id: String::new(),
        user_id: "user-y".to_owned(),
        messages: vec![Message::user("hi")],
        created_at: None,
        last_message_at: None,
        locale: None,
    });

    let snapshot = engine.evaluate(&batch, counters(), None, None);

    assert_eq!(snapshot.sample_size, 12, "submitted records all count");
    assert_eq!(snapshot.conversations_analyzed, 10);
    assert_eq!(snapshot.ai_metrics.conversations_skipped, 2);
    assert_eq!(snapshot.ai_metrics.depth.total(), 10, "skips join no bucket");
}

#[test]
fn test_empty_batch_yields_insufficient_data_snapshot() {
    let engine = EvaluationEngine::new();

    let snapshot = engine.evaluate(&[], counters(), None, None);

    assert_eq!(snapshot.id, "snapshot-all-time");
    assert_eq!(snapshot.conversations_analyzed, 0);
    assert_eq!(snapshot.insights.len(), 1);
    assert_eq!(snapshot.insights[0].insight_type, InsightType::Neutral);
    assert!(snapshot.action_items.is_empty());
    assert_eq!(snapshot.quality_score, 50, "base score with no signal");
}

#[test]
fn test_compare_and_trend_delegate_over_snapshots() {
    let engine = EvaluationEngine::new();
    let batch = example_batch();

    let mut a = engine.evaluate(
        &batch,
        counters(),
        NaiveDate::from_ymd_opt(2025, 6, 1),
        None,
    );
    let mut b = engine.evaluate(
        &batch,
        counters(),
        NaiveDate::from_ymd_opt(2025, 6, 2),
        None,
    );
    a.quality_score = 65;
    b.quality_score = 72;
    let snapshots: Vec<Snapshot> = vec![a.clone(), b.clone()];

    let comparison = engine.compare(&snapshots, &b.id, &a.id);
    assert!(!comparison.insufficient_data);

    let trend = engine.trend(&snapshots);
    assert!(!trend.insufficient_data);
    assert_eq!(trend.points.len(), 2);
}
