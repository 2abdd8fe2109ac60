// ABOUTME: Unit tests for the text signal extraction module
// ABOUTME: Covers topic detection, sentiment classification, language passthrough, and determinism
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Parley Conversation Intelligence

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]

use parley_core::models::{Message, Sentiment};
use parley_intelligence::TextSignalExtractor;

fn messages(texts: &[(&str, bool)]) -> Vec<Message> {
    texts
        .iter()
        .map(|(content, is_user)| {
            if *is_user {
                Message::user(*content)
            } else {
                Message::assistant(*content)
            }
        })
        .collect()
}

#[test]
fn test_topic_detection_with_confidence() {
    let extractor = TextSignalExtractor::new();
    let transcript = messages(&[
        ("My python code has a bug I cannot find", true),
        ("Let's walk through the function together", false),
    ]);

    let signals = extractor.extract(&transcript, None);

    assert!(signals.topics.contains("coding"));
    let detail = signals
        .topic_details
        .iter()
        .find(|d| d.topic == "coding")
        .expect("coding topic detail");
    // Coding lexicon has 10 keywords; the first message matches 3 of them
    assert!((detail.confidence - 0.3).abs() < 1e-9);
    assert!(!detail.examples.is_empty());
}

#[test]
fn test_confidence_is_max_across_messages() {
    let extractor = TextSignalExtractor::new();
    let transcript = messages(&[
        ("there is a bug", true),
        ("the code has a bug in this function", true),
    ]);

    let signals = extractor.extract(&transcript, None);

    let detail = signals
        .topic_details
        .iter()
        .find(|d| d.topic == "coding")
        .expect("coding topic detail");
    // Second message matches 3 of 10 keywords; first matches only 1
    assert!((detail.confidence - 0.3).abs() < 1e-9);
}

#[test]
fn test_message_can_match_multiple_topics() {
    let extractor = TextSignalExtractor::new();
    let transcript = messages(&[(
        "Hello! Can you help me budget for a trip and fix my python code?",
        true,
    )]);

    let signals = extractor.extract(&transcript, None);

    assert!(signals.topics.contains("greeting"));
    assert!(signals.topics.contains("finance"));
    assert!(signals.topics.contains("travel"));
    assert!(signals.topics.contains("coding"));
}

#[test]
fn test_examples_capped_at_configured_max() {
    let extractor = TextSignalExtractor::new();
    let transcript: Vec<Message> = (0..8)
        .map(|i| Message::user(format!("bug number {i} in my code")))
        .collect();

    let signals = extractor.extract(&transcript, None);

    let detail = signals
        .topic_details
        .iter()
        .find(|d| d.topic == "coding")
        .expect("coding topic detail");
    assert_eq!(detail.examples.len(), 5, "examples should cap at 5");
}

#[test]
fn test_positive_sentiment() {
    let extractor = TextSignalExtractor::new();
    let transcript = messages(&[("This is great, the answer was really helpful", true)]);

    let signals = extractor.extract(&transcript, None);

    assert_eq!(signals.sentiment, Sentiment::Positive);
}

#[test]
fn test_negative_sentiment() {
    let extractor = TextSignalExtractor::new();
    let transcript = messages(&[("That answer was wrong and the app is broken", true)]);

    let signals = extractor.extract(&transcript, None);

    assert_eq!(signals.sentiment, Sentiment::Negative);
}

#[test]
fn test_assistant_text_does_not_drive_sentiment() {
    let extractor = TextSignalExtractor::new();
    let transcript = messages(&[
        ("tell me about my trip options", true),
        ("What a great and awesome question, excellent choice!", false),
    ]);

    let signals = extractor.extract(&transcript, None);

    // Only user messages carry sentiment; topic signal keeps this neutral
    assert_eq!(signals.sentiment, Sentiment::Neutral);
}

#[test]
fn test_unknown_sentiment_when_no_signal_at_all() {
    let extractor = TextSignalExtractor::new();
    let transcript = messages(&[("qwerty asdf", true)]);

    let signals = extractor.extract(&transcript, None);

    assert!(signals.topics.is_empty());
    assert_eq!(signals.sentiment, Sentiment::Unknown);
}

#[test]
fn test_balanced_hits_read_neutral() {
    let extractor = TextSignalExtractor::new();
    let transcript = messages(&[("the good parts were good but the bad parts were bad", true)]);

    let signals = extractor.extract(&transcript, None);

    assert_eq!(signals.sentiment, Sentiment::Neutral);
}

#[test]
fn test_language_from_locale_hint() {
    let extractor = TextSignalExtractor::new();
    let transcript = messages(&[("hello", true)]);

    assert_eq!(extractor.extract(&transcript, Some("en-US")).language, "en");
    assert_eq!(extractor.extract(&transcript, Some("pt_BR")).language, "pt");
    assert_eq!(extractor.extract(&transcript, None).language, "unknown");
}

#[test]
fn test_empty_transcript_yields_defaults() {
    let extractor = TextSignalExtractor::new();

    let signals = extractor.extract(&[], None);

    assert!(signals.topics.is_empty());
    assert!(signals.topic_details.is_empty());
    assert_eq!(signals.sentiment, Sentiment::Unknown);
    assert_eq!(signals.language, "unknown");
}

#[test]
fn test_extraction_is_deterministic() {
    let extractor = TextSignalExtractor::new();
    let transcript = messages(&[
        ("Hello, my code has a bug and I hate how confusing it is", true),
        ("Let's debug the function step by step", false),
        ("thanks, that was helpful and clear", true),
    ]);

    let first = extractor.extract(&transcript, Some("en-GB"));
    let second = extractor.extract(&transcript, Some("en-GB"));

    assert_eq!(first, second);
}
