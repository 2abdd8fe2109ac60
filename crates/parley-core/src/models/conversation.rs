// ABOUTME: Conversation transcript and classification outcome record types
// ABOUTME: Inbound RawConversation contract plus the immutable classified Conversation
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Parley Conversation Intelligence

use crate::errors::{AppError, AppResult};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Role of a message sender within a conversation
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum MessageRole {
    /// Human end user
    User,
    /// AI assistant
    Assistant,
    /// System message (prompts, notices)
    System,
}

impl MessageRole {
    /// Whether this role is the human user
    #[must_use]
    pub const fn is_user(self) -> bool {
        matches!(self, Self::User)
    }

    /// Whether this role is the AI assistant
    #[must_use]
    pub const fn is_assistant(self) -> bool {
        matches!(self, Self::Assistant)
    }
}

/// A single message within a conversation transcript
///
/// Immutable once recorded; ordered by position within the conversation.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Message {
    /// Who sent the message
    pub role: MessageRole,
    /// Message text content
    pub content: String,
    /// When the message was sent, if the source recorded it
    pub timestamp: Option<DateTime<Utc>>,
}

impl Message {
    /// Create a user message without a timestamp
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: MessageRole::User,
            content: content.into(),
            timestamp: None,
        }
    }

    /// Create an assistant message without a timestamp
    pub fn assistant(content: impl Into<String>) -> Self {
        Self {
            role: MessageRole::Assistant,
            content: content.into(),
            timestamp: None,
        }
    }

    /// Attach a timestamp to this message
    #[must_use]
    pub fn at(mut self, timestamp: DateTime<Utc>) -> Self {
        self.timestamp = Some(timestamp);
        self
    }

    /// Content length in characters (not bytes)
    #[must_use]
    pub fn char_count(&self) -> usize {
        self.content.chars().count()
    }
}

/// Inbound conversation record at the engine boundary
///
/// Whatever shape the source sends is converted into this closed contract
/// before evaluation. Records that fail [`RawConversation::validate`] are
/// excluded from the batch with a recorded skip-count; they never abort a run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RawConversation {
    /// Source-assigned conversation ID
    pub id: String,
    /// ID of the user who owns the conversation
    pub user_id: String,
    /// Ordered message transcript
    pub messages: Vec<Message>,
    /// When the conversation started, if recorded
    pub created_at: Option<DateTime<Utc>>,
    /// When the last message arrived, if recorded
    pub last_message_at: Option<DateTime<Utc>>,
    /// Locale hint attached by the client (e.g. "en-US")
    pub locale: Option<String>,
}

impl RawConversation {
    /// Validate the record against the engine's input contract
    ///
    /// # Errors
    /// Returns `InvalidInput` for an empty transcript and
    /// `MissingRequiredField` for a blank conversation or user ID.
    pub fn validate(&self) -> AppResult<()> {
        if self.id.trim().is_empty() {
            return Err(AppError::missing_field("conversation id is empty"));
        }
        if self.user_id.trim().is_empty() {
            return Err(AppError::missing_field(format!(
                "conversation {} has no user id",
                self.id
            )));
        }
        if self.messages.is_empty() {
            return Err(AppError::invalid_input(format!(
                "conversation {} has no messages",
                self.id
            )));
        }
        Ok(())
    }

    /// Number of messages in the transcript
    #[must_use]
    pub fn message_count(&self) -> usize {
        self.messages.len()
    }

    /// Number of user messages in the transcript
    #[must_use]
    pub fn user_message_count(&self) -> usize {
        self.messages.iter().filter(|m| m.role.is_user()).count()
    }

    /// Iterator over assistant messages in order
    pub fn assistant_messages(&self) -> impl Iterator<Item = &Message> {
        self.messages.iter().filter(|m| m.role.is_assistant())
    }

    /// The final message of the transcript, if any
    #[must_use]
    pub fn last_message(&self) -> Option<&Message> {
        self.messages.last()
    }

    /// The final assistant message of the transcript, if any
    #[must_use]
    pub fn final_assistant_message(&self) -> Option<&Message> {
        self.messages.iter().rev().find(|m| m.role.is_assistant())
    }
}

/// Per-topic detection detail with confidence and supporting examples
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TopicDetail {
    /// Topic label (e.g. "coding")
    pub topic: String,
    /// Detection confidence in [0, 1]
    pub confidence: f64,
    /// Example message excerpts that matched, capped by configuration
    pub examples: Vec<String>,
}

/// Boolean success indicators computed from a conversation transcript
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct SuccessIndicators {
    /// A user message appeared after a session boundary following an assistant reply
    pub user_returned: bool,
    /// A user message matched a gratitude phrase
    pub expressed_thanks: bool,
    /// The final assistant message was informative rather than a clarifying question
    pub got_answer: bool,
    /// The transcript contains at least two user/assistant round-trips
    pub had_follow_up: bool,
    /// Sentiment was not negative and the assistant had the last word
    pub ended_positively: bool,
}

impl SuccessIndicators {
    /// Indicator names in fixed evaluation order, used for audit `reasons` lists
    pub const NAMES: [&'static str; 5] = [
        "user_returned",
        "expressed_thanks",
        "got_answer",
        "had_follow_up",
        "ended_positively",
    ];

    /// Indicator values paired with their names, in fixed evaluation order
    #[must_use]
    pub const fn named_values(&self) -> [(&'static str, bool); 5] {
        [
            (Self::NAMES[0], self.user_returned),
            (Self::NAMES[1], self.expressed_thanks),
            (Self::NAMES[2], self.got_answer),
            (Self::NAMES[3], self.had_follow_up),
            (Self::NAMES[4], self.ended_positively),
        ]
    }
}

/// Outcome classification assigned to a conversation
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum OutcomeClassification {
    /// The user got what they came for
    Successful,
    /// Some value delivered, but the exchange fell short
    Partial,
    /// The exchange ran long enough to fail on the merits
    Failed,
    /// The user left before the conversation went anywhere
    Abandoned,
}

/// Overall sentiment detected across a conversation's user messages
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum Sentiment {
    /// More positive than negative signal
    Positive,
    /// Balanced or weak signal
    Neutral,
    /// More negative than positive signal
    Negative,
    /// No signal of any kind in the transcript
    Unknown,
}

/// Classification outcome with score, audit reasons, and raw indicators
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ConversationOutcome {
    /// Weighted indicator score in [0, 100]
    pub score: u8,
    /// Bucketed classification derived from indicators and score
    pub classification: OutcomeClassification,
    /// Indicator names that drove the classification, in fixed evaluation order
    pub reasons: Vec<String>,
    /// Raw indicator values
    pub indicators: SuccessIndicators,
}

/// A fully classified conversation record
///
/// Created once per classification pass and immutable after scoring;
/// re-evaluation produces a new record rather than mutating history.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Conversation {
    /// Source-assigned conversation ID
    pub id: String,
    /// ID of the user who owns the conversation
    pub user_id: String,
    /// Ordered message transcript
    pub messages: Vec<Message>,
    /// When the conversation started, if recorded
    pub created_at: Option<DateTime<Utc>>,
    /// When the last message arrived, if recorded
    pub last_message_at: Option<DateTime<Utc>>,
    /// Detected language (locale primary subtag, or "unknown")
    pub language: String,
    /// Union of detected topic labels
    pub topics: BTreeSet<String>,
    /// Per-topic confidence and examples; `topics` equals this list's labels
    pub topic_details: Vec<TopicDetail>,
    /// Classification outcome
    pub success: ConversationOutcome,
    /// Detected sentiment
    pub sentiment: Sentiment,
    /// Engagement score in [0, 100]
    pub engagement_score: u8,
}

impl Conversation {
    /// Number of messages in the transcript
    #[must_use]
    pub fn message_count(&self) -> usize {
        self.messages.len()
    }

    /// Iterator over assistant messages in order
    pub fn assistant_messages(&self) -> impl Iterator<Item = &Message> {
        self.messages.iter().filter(|m| m.role.is_assistant())
    }
}
