// ABOUTME: Unit tests for conversation outcome classification
// ABOUTME: Covers indicators, weighted scoring, threshold buckets, and audit reasons
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Parley Conversation Intelligence

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]

use chrono::{Duration, TimeZone, Utc};
use parley_core::models::{Message, OutcomeClassification, RawConversation};
use parley_intelligence::{ConversationClassifier, TextSignalExtractor};

const LONG_ANSWER: &str =
    "Ownership means every value has a single owner, and the value is dropped when \
     that owner goes out of scope.";

fn conversation(id: &str, messages: Vec<Message>) -> RawConversation {
    RawConversation {
        id: id.to_owned(),
        user_id: "user-1".to_owned(),
        messages,
        created_at: None,
        last_message_at: None,
        locale: None,
    }
}

fn classify(raw: &RawConversation) -> parley_core::models::ConversationOutcome {
    let extractor = TextSignalExtractor::new();
    let classifier = ConversationClassifier::new();
    let signals = extractor.extract(&raw.messages, raw.locale.as_deref());
    classifier.classify(raw, &signals).expect("classification")
}

#[test]
fn test_thankful_deep_conversation_is_successful() {
    let raw = conversation(
        "c1",
        vec![
            Message::user("Can you explain how rust ownership works?"),
            Message::assistant(LONG_ANSWER),
            Message::user("What about borrowing?"),
            Message::assistant(LONG_ANSWER),
            Message::user("thanks, that was helpful"),
            Message::assistant(LONG_ANSWER),
        ],
    );

    let outcome = classify(&raw);

    assert!(outcome.indicators.got_answer);
    assert!(outcome.indicators.expressed_thanks);
    assert!(outcome.indicators.had_follow_up);
    assert!(outcome.indicators.ended_positively);
    assert!(!outcome.indicators.user_returned);
    // got_answer + expressed_thanks + had_follow_up + ended_positively = 0.90
    assert_eq!(outcome.score, 90);
    assert_eq!(outcome.classification, OutcomeClassification::Successful);
}

#[test]
fn test_lone_user_message_is_abandoned() {
    let raw = conversation("c2", vec![Message::user("Hello")]);

    let outcome = classify(&raw);

    assert_eq!(outcome.classification, OutcomeClassification::Abandoned);
    assert_eq!(outcome.score, 0);
}

#[test]
fn test_one_exchange_with_low_score_is_abandoned() {
    let raw = conversation(
        "c3",
        vec![Message::user("help"), Message::user("anyone there")],
    );

    let outcome = classify(&raw);

    assert!(outcome.score < 20);
    assert_eq!(outcome.classification, OutcomeClassification::Abandoned);
}

#[test]
fn test_longer_low_score_conversation_is_failed() {
    let raw = conversation(
        "c4",
        vec![
            Message::user("how do I fix this"),
            Message::assistant("No."),
            Message::user("that answer was useless and wrong"),
        ],
    );

    let outcome = classify(&raw);

    assert!(outcome.score < 40);
    assert_eq!(outcome.classification, OutcomeClassification::Failed);
    // Negative outcomes list the indicators that were false, in fixed order
    assert_eq!(
        outcome.reasons,
        vec![
            "user_returned",
            "expressed_thanks",
            "got_answer",
            "had_follow_up",
            "ended_positively",
        ]
    );
}

#[test]
fn test_answered_opener_is_partial() {
    let raw = conversation(
        "c5",
        vec![
            Message::user("What is the capital of Australia?"),
            Message::assistant(LONG_ANSWER),
        ],
    );

    let outcome = classify(&raw);

    // got_answer (0.35) + ended_positively (0.15) = 50
    assert_eq!(outcome.score, 50);
    assert_eq!(outcome.classification, OutcomeClassification::Partial);
    assert_eq!(outcome.reasons, vec!["got_answer", "ended_positively"]);
}

#[test]
fn test_clarifying_question_does_not_count_as_answer() {
    let raw = conversation(
        "c6",
        vec![
            Message::user("fix my thing"),
            Message::assistant(
                "Could you tell me a bit more about which thing you mean and what it is doing?",
            ),
        ],
    );

    let outcome = classify(&raw);

    assert!(!outcome.indicators.got_answer);
}

#[test]
fn test_user_returning_across_session_boundary() {
    let start = Utc.with_ymd_and_hms(2025, 6, 1, 9, 0, 0).unwrap();
    let raw = conversation(
        "c7",
        vec![
            Message::user("Can you outline a workout plan?").at(start),
            Message::assistant(LONG_ANSWER).at(start + Duration::minutes(1)),
            Message::user("Back again, what about rest days?").at(start + Duration::minutes(45)),
            Message::assistant(LONG_ANSWER).at(start + Duration::minutes(46)),
        ],
    );

    let outcome = classify(&raw);

    assert!(outcome.indicators.user_returned);
    // user_returned + got_answer + had_follow_up + ended_positively = 0.80
    assert_eq!(outcome.score, 80);
    assert_eq!(outcome.classification, OutcomeClassification::Successful);
}

#[test]
fn test_short_gap_is_not_a_session_boundary() {
    let start = Utc.with_ymd_and_hms(2025, 6, 1, 9, 0, 0).unwrap();
    let raw = conversation(
        "c8",
        vec![
            Message::user("Can you outline a workout plan?").at(start),
            Message::assistant(LONG_ANSWER).at(start + Duration::minutes(1)),
            Message::user("what about rest days?").at(start + Duration::minutes(10)),
            Message::assistant(LONG_ANSWER).at(start + Duration::minutes(11)),
        ],
    );

    let outcome = classify(&raw);

    assert!(!outcome.indicators.user_returned);
}

#[test]
fn test_score_is_always_bounded() {
    let raws = [
        conversation("b1", vec![Message::user("x")]),
        conversation(
            "b2",
            vec![
                Message::user("thanks so much, this is great"),
                Message::assistant(LONG_ANSWER),
                Message::user("thanks again"),
                Message::assistant(LONG_ANSWER),
            ],
        ),
    ];

    for raw in &raws {
        let outcome = classify(raw);
        assert!(outcome.score <= 100);
    }
}

#[test]
fn test_empty_conversation_is_rejected() {
    let raw = conversation("c9", Vec::new());
    let extractor = TextSignalExtractor::new();
    let classifier = ConversationClassifier::new();
    let signals = extractor.extract(&raw.messages, None);

    assert!(raw.validate().is_err());
    assert!(classifier.classify(&raw, &signals).is_err());
}

#[test]
fn test_engagement_score_scales_with_depth_and_breadth() {
    let extractor = TextSignalExtractor::new();
    let classifier = ConversationClassifier::new();

    let shallow = conversation("e1", vec![Message::user("qwerty")]);
    let shallow_signals = extractor.extract(&shallow.messages, None);
    let shallow_score = classifier.engagement_score(&shallow, &shallow_signals);

    let mut deep_messages = Vec::new();
    for _ in 0..5 {
        deep_messages.push(Message::user(
            "hello, my budget for the trip depends on this python code bug",
        ));
        deep_messages.push(Message::assistant(LONG_ANSWER));
    }
    let deep = conversation("e2", deep_messages);
    let deep_signals = extractor.extract(&deep.messages, None);
    let deep_score = classifier.engagement_score(&deep, &deep_signals);

    assert!(shallow_score < deep_score);
    // 10+ messages, 5 user messages, and 4+ topics saturate every component
    assert_eq!(deep_score, 100);
    assert!(shallow_score <= 100);
}
