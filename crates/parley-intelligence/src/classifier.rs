// ABOUTME: Conversation outcome classification via weighted indicator scoring
// ABOUTME: Computes success indicators, bounded scores, and audit reasons per conversation
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Parley Conversation Intelligence

//! Conversation Outcome Classification
//!
//! Turns one validated transcript plus its extracted signals into a
//! [`ConversationOutcome`]: five boolean success indicators, a weighted
//! score in [0, 100], a threshold-bucketed classification, and the ordered
//! reason list used for audit and UI display.
//!
//! Classification is deterministic and order-independent across a batch;
//! each conversation is scored in isolation, which is what makes the batch
//! embarrassingly parallel.

use crate::config::evaluation::ClassifierConfig;
use crate::config::EvaluationConfig;
use crate::signals::{ExtractedSignals, GratitudeMatcher, PhraseGratitudeMatcher};
use chrono::Duration;
use parley_core::errors::{AppError, AppResult};
use parley_core::models::{
    ConversationOutcome, Message, OutcomeClassification, RawConversation, Sentiment,
    SuccessIndicators,
};

/// Outcome classifier with a swappable gratitude-phrase strategy
pub struct ConversationClassifier<G = PhraseGratitudeMatcher> {
    gratitude: G,
    config: ClassifierConfig,
}

impl Default for ConversationClassifier {
    fn default() -> Self {
        Self::new()
    }
}

impl ConversationClassifier {
    /// Create a classifier with the default gratitude dictionary and global config
    #[must_use]
    pub fn new() -> Self {
        Self {
            gratitude: PhraseGratitudeMatcher::new(),
            config: EvaluationConfig::global().classifier.clone(),
        }
    }
}

impl<G: GratitudeMatcher> ConversationClassifier<G> {
    /// Create a classifier with a custom gratitude strategy and the global config
    #[must_use]
    pub fn with_strategy(gratitude: G) -> Self {
        Self {
            gratitude,
            config: EvaluationConfig::global().classifier.clone(),
        }
    }

    /// Create a classifier with a custom strategy and explicit config
    #[must_use]
    pub const fn with_config(gratitude: G, config: ClassifierConfig) -> Self {
        Self { gratitude, config }
    }

    /// Classify one conversation from its transcript and extracted signals
    ///
    /// # Errors
    /// Returns `InvalidInput` for an empty transcript; such records belong to
    /// the skip-count, not to any aggregate.
    pub fn classify(
        &self,
        conversation: &RawConversation,
        signals: &ExtractedSignals,
    ) -> AppResult<ConversationOutcome> {
        if conversation.messages.is_empty() {
            return Err(AppError::invalid_input(format!(
                "conversation {} has no messages to classify",
                conversation.id
            )));
        }

        let indicators = self.compute_indicators(conversation, signals);
        let score = self.score(indicators);
        let classification = self.classify_score(conversation, score);
        let reasons = Self::reasons(indicators, classification);

        Ok(ConversationOutcome {
            score,
            classification,
            reasons,
            indicators,
        })
    }

    /// Engagement score for one conversation, in [0, 100]
    ///
    /// Blends transcript length, user participation, and topical breadth,
    /// each saturating at a configured cap.
    #[must_use]
    pub fn engagement_score(
        &self,
        conversation: &RawConversation,
        signals: &ExtractedSignals,
    ) -> u8 {
        let weights = &self.config.engagement;

        let saturating_ratio = |value: usize, cap: usize| -> f64 {
            if cap == 0 {
                return 0.0;
            }
            #[allow(clippy::cast_precision_loss)]
            {
                (value.min(cap) as f64) / (cap as f64)
            }
        };

        let blended = weights.message_count_weight
            * saturating_ratio(conversation.message_count(), weights.message_count_cap)
            + weights.user_message_weight
                * saturating_ratio(conversation.user_message_count(), weights.user_message_cap)
            + weights.topic_breadth_weight
                * saturating_ratio(signals.topics.len(), weights.topic_breadth_cap);

        #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
        {
            (blended * 100.0).round().clamp(0.0, 100.0) as u8
        }
    }

    /// Compute the five success indicators in fixed evaluation order
    fn compute_indicators(
        &self,
        conversation: &RawConversation,
        signals: &ExtractedSignals,
    ) -> SuccessIndicators {
        let user_returned = self.detect_session_return(&conversation.messages);

        let expressed_thanks = conversation
            .messages
            .iter()
            .filter(|m| m.role.is_user())
            .any(|m| self.gratitude.matches(&m.content));

        let got_answer = conversation.final_assistant_message().is_some_and(|m| {
            m.char_count() >= self.config.transcript.min_answer_chars
                && !m.content.trim_end().ends_with('?')
        });

        let had_follow_up =
            conversation.message_count() >= self.config.transcript.follow_up_min_messages;

        let ended_positively = signals.sentiment != Sentiment::Negative
            && conversation
                .last_message()
                .is_some_and(|m| m.role.is_assistant());

        SuccessIndicators {
            user_returned,
            expressed_thanks,
            got_answer,
            had_follow_up,
            ended_positively,
        }
    }

    /// Whether a user message follows an assistant reply across a session boundary
    ///
    /// Messages without timestamps never establish a boundary.
    fn detect_session_return(&self, messages: &[Message]) -> bool {
        let gap = Duration::minutes(self.config.transcript.session_gap_minutes);
        let mut seen_assistant = false;

        for pair in messages.windows(2) {
            let (previous, current) = (&pair[0], &pair[1]);
            if previous.role.is_assistant() {
                seen_assistant = true;
            }
            if seen_assistant && current.role.is_user() {
                if let (Some(prev_ts), Some(cur_ts)) = (previous.timestamp, current.timestamp) {
                    if cur_ts - prev_ts >= gap {
                        return true;
                    }
                }
            }
        }
        false
    }

    /// Weighted indicator score, rounded into [0, 100]
    fn score(&self, indicators: SuccessIndicators) -> u8 {
        let weights = &self.config.weights;
        let total = weights.total();
        if total <= 0.0 {
            return 0;
        }

        let mut sum = 0.0;
        if indicators.user_returned {
            sum += weights.user_returned;
        }
        if indicators.expressed_thanks {
            sum += weights.expressed_thanks;
        }
        if indicators.got_answer {
            sum += weights.got_answer;
        }
        if indicators.had_follow_up {
            sum += weights.had_follow_up;
        }
        if indicators.ended_positively {
            sum += weights.ended_positively;
        }

        #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
        {
            (sum / total * 100.0).round().clamp(0.0, 100.0) as u8
        }
    }

    /// Bucket a score into an outcome classification
    ///
    /// Ties break toward the stricter bucket; one-sided openers read as
    /// abandoned regardless of score.
    fn classify_score(&self, conversation: &RawConversation, score: u8) -> OutcomeClassification {
        let thresholds = &self.config.thresholds;

        let assistant_replies = conversation.assistant_messages().count();
        if conversation.user_message_count() == 1 && assistant_replies == 0 {
            return OutcomeClassification::Abandoned;
        }

        if score >= thresholds.successful_min_score {
            OutcomeClassification::Successful
        } else if score >= thresholds.partial_min_score {
            OutcomeClassification::Partial
        } else if conversation.message_count() <= 2 && score < thresholds.abandoned_max_score {
            OutcomeClassification::Abandoned
        } else {
            OutcomeClassification::Failed
        }
    }

    /// Audit reasons: true indicators for positive outcomes, false for negative
    fn reasons(
        indicators: SuccessIndicators,
        classification: OutcomeClassification,
    ) -> Vec<String> {
        let keep_true = matches!(
            classification,
            OutcomeClassification::Successful | OutcomeClassification::Partial
        );

        indicators
            .named_values()
            .iter()
            .filter(|(_, value)| *value == keep_true)
            .map(|(name, _)| (*name).to_owned())
            .collect()
    }
}
