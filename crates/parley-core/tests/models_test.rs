// ABOUTME: Unit tests for core model types and validation
// ABOUTME: Covers the input contract, tallies, ranking helpers, and serialized shapes
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Parley Conversation Intelligence

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]

use chrono::NaiveDate;
use parley_core::errors::ErrorCode;
use parley_core::models::{
    ActionItem, ActionStatus, Effort, Impact, Message, OutcomeClassification, Priority,
    RawConversation, Sentiment, Snapshot, SuccessIndicators,
};

fn raw(messages: Vec<Message>) -> RawConversation {
    RawConversation {
        id: "c1".to_owned(),
        user_id: "u1".to_owned(),
        messages,
        created_at: None,
        last_message_at: None,
        locale: None,
    }
}

#[test]
fn test_validate_rejects_empty_transcript() {
    let conversation = raw(Vec::new());

    let error = conversation.validate().unwrap_err();
    assert_eq!(error.code, ErrorCode::InvalidInput);
}

#[test]
fn test_validate_rejects_blank_ids() {
    let mut conversation = raw(vec![Message::user("hi")]);
    conversation.id = "  ".to_owned();

    let error = conversation.validate().unwrap_err();
    assert_eq!(error.code, ErrorCode::MissingRequiredField);
}

#[test]
fn test_validate_accepts_minimal_record() {
    assert!(raw(vec![Message::user("hi")]).validate().is_ok());
}

#[test]
fn test_transcript_accessors() {
    let conversation = raw(vec![
        Message::user("question"),
        Message::assistant("short"),
        Message::assistant("the real answer"),
    ]);

    assert_eq!(conversation.message_count(), 3);
    assert_eq!(conversation.user_message_count(), 1);
    assert_eq!(
        conversation.final_assistant_message().unwrap().content,
        "the real answer"
    );
}

#[test]
fn test_indicator_names_keep_evaluation_order() {
    let indicators = SuccessIndicators {
        got_answer: true,
        ..SuccessIndicators::default()
    };

    let named = indicators.named_values();
    assert_eq!(named[0].0, "user_returned");
    assert_eq!(named[2], ("got_answer", true));
    assert_eq!(named[4].0, "ended_positively");
}

#[test]
fn test_priority_rank_ordering() {
    assert!(Priority::Critical.rank() < Priority::High.rank());
    assert!(Priority::High.rank() < Priority::Medium.rank());
    assert!(Priority::Medium.rank() < Priority::Low.rank());
}

#[test]
fn test_quick_win_scoring() {
    let item = ActionItem {
        id: "action-01-quality".to_owned(),
        insight_ref: "finding".to_owned(),
        action: "do the thing".to_owned(),
        priority: Priority::High,
        effort: Effort::Quick,
        impact: Impact::High,
        status: ActionStatus::Pending,
    };

    assert_eq!(item.quick_win_score(), 4);
    assert!(item.is_quick_win());

    let slog = ActionItem {
        effort: Effort::Significant,
        impact: Impact::Medium,
        ..item
    };
    assert_eq!(slog.quick_win_score(), 1);
    assert!(!slog.is_quick_win());
}

#[test]
fn test_snapshot_natural_id() {
    let day = NaiveDate::from_ymd_opt(2025, 6, 1).unwrap();
    assert_eq!(Snapshot::natural_id(Some(day)), "snapshot-2025-06-01");
    assert_eq!(Snapshot::natural_id(None), "snapshot-all-time");
}

#[test]
fn test_enums_serialize_snake_case() {
    assert_eq!(
        serde_json::to_string(&OutcomeClassification::Successful).unwrap(),
        "\"successful\""
    );
    assert_eq!(
        serde_json::to_string(&Sentiment::Unknown).unwrap(),
        "\"unknown\""
    );
    assert_eq!(
        serde_json::to_string(&ActionStatus::InProgress).unwrap(),
        "\"in_progress\""
    );
    assert_eq!(serde_json::to_string(&Effort::Quick).unwrap(), "\"quick\"");
}
