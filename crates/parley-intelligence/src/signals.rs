// ABOUTME: Text signal extraction for topics, sentiment, and language detection
// ABOUTME: Keyword-dictionary matching behind swappable TopicMatcher/SentimentScorer strategies
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Parley Conversation Intelligence

//! Text Signal Extraction
//!
//! Pulls topic tags, sentiment, and language from raw message text using
//! keyword and phrase dictionaries. The dictionaries are injected
//! capabilities so a statistical classifier can replace the rule tables
//! without changing the classifier's contract.
//!
//! Extraction never fails: absence of matches yields empty/unknown defaults,
//! and identical input always produces identical output.

use crate::config::evaluation::SignalConfig;
use crate::config::EvaluationConfig;
use parley_core::models::{Message, Sentiment, TopicDetail};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

/// A topic label with the keyword dictionary that detects it
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TopicLexicon {
    /// Topic label (e.g. "coding")
    pub label: String,
    /// Lowercase keywords and phrases that signal the topic
    pub keywords: Vec<String>,
}

impl TopicLexicon {
    /// Create a lexicon from a label and keyword list
    pub fn new(label: impl Into<String>, keywords: &[&str]) -> Self {
        Self {
            label: label.into(),
            keywords: keywords.iter().map(|k| (*k).to_owned()).collect(),
        }
    }
}

/// Positive/negative word hit counts for one text
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SentimentHits {
    /// Positive-word hits
    pub positive: usize,
    /// Negative-word hits
    pub negative: usize,
}

/// Strategy for detecting topics in message text
pub trait TopicMatcher: Send + Sync {
    /// The ordered lexicon list; order is fixed for deterministic extraction
    fn lexicons(&self) -> &[TopicLexicon];
}

/// Strategy for scoring sentiment in message text
pub trait SentimentScorer: Send + Sync {
    /// Count positive and negative word hits in the text
    fn score(&self, text: &str) -> SentimentHits;
}

/// Strategy for recognizing gratitude phrases in user messages
pub trait GratitudeMatcher: Send + Sync {
    /// Whether the text contains a gratitude phrase
    fn matches(&self, text: &str) -> bool;
}

/// Default keyword-dictionary topic matcher
pub struct KeywordTopicMatcher {
    lexicons: Vec<TopicLexicon>,
}

impl Default for KeywordTopicMatcher {
    fn default() -> Self {
        Self::new()
    }
}

impl KeywordTopicMatcher {
    /// Create the matcher with the built-in topic dictionaries
    #[must_use]
    pub fn new() -> Self {
        Self {
            lexicons: vec![
                TopicLexicon::new(
                    "greeting",
                    &[
                        "hello",
                        "hey",
                        "good morning",
                        "good afternoon",
                        "good evening",
                        "howdy",
                        "greetings",
                    ],
                ),
                TopicLexicon::new(
                    "coding",
                    &[
                        "code",
                        "function",
                        "bug",
                        "compile",
                        "debug",
                        "python",
                        "rust",
                        "javascript",
                        "api",
                        "error message",
                    ],
                ),
                TopicLexicon::new(
                    "writing",
                    &[
                        "essay",
                        "draft",
                        "rewrite",
                        "proofread",
                        "paragraph",
                        "summarize",
                        "blog post",
                    ],
                ),
                TopicLexicon::new(
                    "health",
                    &[
                        "workout",
                        "diet",
                        "sleep",
                        "exercise",
                        "calories",
                        "stress",
                        "meditation",
                    ],
                ),
                TopicLexicon::new(
                    "finance",
                    &[
                        "budget",
                        "invest",
                        "savings",
                        "taxes",
                        "mortgage",
                        "stock",
                        "crypto",
                    ],
                ),
                TopicLexicon::new(
                    "travel",
                    &[
                        "flight",
                        "hotel",
                        "itinerary",
                        "visa",
                        "vacation",
                        "trip",
                        "booking",
                    ],
                ),
                TopicLexicon::new(
                    "entertainment",
                    &["movie", "music", "game", "series", "playlist", "concert"],
                ),
                TopicLexicon::new(
                    "support",
                    &[
                        "not working",
                        "crash",
                        "refund",
                        "cancel",
                        "subscription",
                        "login",
                        "password",
                    ],
                ),
            ],
        }
    }

    /// Create a matcher from custom lexicons (kept in the given order)
    #[must_use]
    pub const fn with_lexicons(lexicons: Vec<TopicLexicon>) -> Self {
        Self { lexicons }
    }
}

impl TopicMatcher for KeywordTopicMatcher {
    fn lexicons(&self) -> &[TopicLexicon] {
        &self.lexicons
    }
}

/// Default word-list sentiment scorer
pub struct LexiconSentimentScorer {
    positive: Vec<String>,
    negative: Vec<String>,
}

const POSITIVE_WORDS: &[&str] = &[
    "great", "good", "awesome", "perfect", "excellent", "amazing", "love", "helpful", "wonderful",
    "fantastic", "nice", "brilliant", "useful", "clear",
];

const NEGATIVE_WORDS: &[&str] = &[
    "bad",
    "wrong",
    "terrible",
    "awful",
    "useless",
    "hate",
    "confusing",
    "frustrating",
    "broken",
    "worse",
    "horrible",
    "disappointing",
    "slow",
];

impl Default for LexiconSentimentScorer {
    fn default() -> Self {
        Self::new()
    }
}

impl LexiconSentimentScorer {
    /// Create the scorer with the built-in word lists
    #[must_use]
    pub fn new() -> Self {
        Self {
            positive: POSITIVE_WORDS.iter().map(|w| (*w).to_owned()).collect(),
            negative: NEGATIVE_WORDS.iter().map(|w| (*w).to_owned()).collect(),
        }
    }
}

impl SentimentScorer for LexiconSentimentScorer {
    fn score(&self, text: &str) -> SentimentHits {
        let lower = text.to_lowercase();
        let words = word_set(&lower);
        SentimentHits {
            positive: self.positive.iter().filter(|w| words.contains(w.as_str())).count(),
            negative: self.negative.iter().filter(|w| words.contains(w.as_str())).count(),
        }
    }
}

/// Default gratitude-phrase matcher
pub struct PhraseGratitudeMatcher {
    phrases: Vec<String>,
}

const GRATITUDE_PHRASES: &[&str] = &[
    "thank you",
    "thanks",
    "thx",
    "thank u",
    "much appreciated",
    "appreciate it",
    "grateful",
    "you're a lifesaver",
];

impl Default for PhraseGratitudeMatcher {
    fn default() -> Self {
        Self::new()
    }
}

impl PhraseGratitudeMatcher {
    /// Create the matcher with the built-in phrase list
    #[must_use]
    pub fn new() -> Self {
        Self {
            phrases: GRATITUDE_PHRASES.iter().map(|p| (*p).to_owned()).collect(),
        }
    }
}

impl GratitudeMatcher for PhraseGratitudeMatcher {
    fn matches(&self, text: &str) -> bool {
        let lower = text.to_lowercase();
        let words = word_set(&lower);
        self.phrases.iter().any(|p| {
            if p.contains(' ') {
                lower.contains(p.as_str())
            } else {
                words.contains(p.as_str())
            }
        })
    }
}

/// Signals extracted from one conversation transcript
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ExtractedSignals {
    /// Union of detected topic labels
    pub topics: BTreeSet<String>,
    /// Per-topic confidence and examples, ascending by topic label
    pub topic_details: Vec<TopicDetail>,
    /// Sentiment over user messages
    pub sentiment: Sentiment,
    /// Locale primary subtag, or "unknown"
    pub language: String,
}

/// Text signal extractor with swappable matching strategies
pub struct TextSignalExtractor<M = KeywordTopicMatcher, S = LexiconSentimentScorer> {
    matcher: M,
    scorer: S,
    config: SignalConfig,
}

impl Default for TextSignalExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl TextSignalExtractor {
    /// Create an extractor with the default dictionaries and global config
    #[must_use]
    pub fn new() -> Self {
        Self {
            matcher: KeywordTopicMatcher::new(),
            scorer: LexiconSentimentScorer::new(),
            config: EvaluationConfig::global().signals.clone(),
        }
    }
}

impl<M: TopicMatcher, S: SentimentScorer> TextSignalExtractor<M, S> {
    /// Create an extractor with custom strategies and the global config
    #[must_use]
    pub fn with_strategies(matcher: M, scorer: S) -> Self {
        Self {
            matcher,
            scorer,
            config: EvaluationConfig::global().signals.clone(),
        }
    }

    /// Create an extractor with custom strategies and explicit config
    #[must_use]
    pub const fn with_config(matcher: M, scorer: S, config: SignalConfig) -> Self {
        Self {
            matcher,
            scorer,
            config,
        }
    }

    /// Extract topics, sentiment, and language from a transcript
    ///
    /// Never fails; a transcript with no matches yields empty topics and
    /// `Sentiment::Unknown`.
    #[must_use]
    pub fn extract(&self, messages: &[Message], locale_hint: Option<&str>) -> ExtractedSignals {
        let mut details: BTreeMap<String, TopicDetail> = BTreeMap::new();

        for message in messages {
            let lower = message.content.to_lowercase();
            let words = word_set(&lower);

            for lexicon in self.matcher.lexicons() {
                if lexicon.keywords.is_empty() {
                    continue;
                }
                let matched = lexicon
                    .keywords
                    .iter()
                    .filter(|k| {
                        if k.contains(' ') {
                            lower.contains(k.as_str())
                        } else {
                            words.contains(k.as_str())
                        }
                    })
                    .count();
                if matched == 0 {
                    continue;
                }

                #[allow(clippy::cast_precision_loss)]
                let confidence = (matched as f64 / lexicon.keywords.len() as f64).clamp(0.0, 1.0);

                let entry = details
                    .entry(lexicon.label.clone())
                    .or_insert_with(|| TopicDetail {
                        topic: lexicon.label.clone(),
                        confidence: 0.0,
                        examples: Vec::new(),
                    });
                entry.confidence = entry.confidence.max(confidence);
                if entry.examples.len() < self.config.max_examples_per_topic {
                    entry.examples.push(excerpt(
                        &message.content,
                        self.config.max_example_chars,
                    ));
                }
            }
        }

        let mut hits = SentimentHits::default();
        for message in messages.iter().filter(|m| m.role.is_user()) {
            let message_hits = self.scorer.score(&message.content);
            hits.positive += message_hits.positive;
            hits.negative += message_hits.negative;
        }

        let sentiment = if hits.positive > hits.negative {
            Sentiment::Positive
        } else if hits.negative > hits.positive {
            Sentiment::Negative
        } else if hits.positive + hits.negative > 0 || !details.is_empty() {
            Sentiment::Neutral
        } else {
            Sentiment::Unknown
        };

        let topics: BTreeSet<String> = details.keys().cloned().collect();
        let topic_details: Vec<TopicDetail> = details.into_values().collect();

        ExtractedSignals {
            topics,
            topic_details,
            sentiment,
            language: normalize_locale(locale_hint),
        }
    }
}

/// Lowercased word set for whole-word keyword lookup
fn word_set(text: &str) -> BTreeSet<&str> {
    text.split(|c: char| !c.is_alphanumeric() && c != '\'')
        .filter(|w| !w.is_empty())
        .collect()
}

/// Truncate message content to an example excerpt on a character boundary
fn excerpt(content: &str, max_chars: usize) -> String {
    if content.chars().count() <= max_chars {
        content.to_owned()
    } else {
        content.chars().take(max_chars).collect()
    }
}

/// Reduce a locale hint to its lowercase primary subtag
fn normalize_locale(locale_hint: Option<&str>) -> String {
    locale_hint
        .map(|l| {
            l.split(['-', '_'])
                .next()
                .unwrap_or(l)
                .trim()
                .to_lowercase()
        })
        .filter(|l| !l.is_empty())
        .unwrap_or_else(|| "unknown".to_owned())
}
