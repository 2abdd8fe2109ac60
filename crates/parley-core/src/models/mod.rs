// ABOUTME: Core data models for the Parley conversation evaluation engine
// ABOUTME: Re-exports conversation and snapshot record types
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Parley Conversation Intelligence

//! Core data models shared across the engine.
//!
//! Conversation-side types model the inbound transcript contract and the
//! classified record produced from it; snapshot-side types model one
//! evaluation run's full output.

/// Message, conversation, and outcome types
pub mod conversation;

/// Aggregate metrics, insights, action items, funnel, and snapshot types
pub mod snapshot;

pub use conversation::{
    Conversation, ConversationOutcome, Message, MessageRole, OutcomeClassification,
    RawConversation, Sentiment, SuccessIndicators, TopicDetail,
};
pub use snapshot::{
    ActionItem, ActionStatus, AggregateMetrics, AiMetrics, DepthBuckets, Effort, FunnelAnalysis,
    FunnelStage, Impact, Insight, InsightCategory, InsightType, OutcomeTally, Priority,
    ResponseQualityBuckets, SentimentTally, Snapshot, StageDropOff, TopicCount, UsageCounters,
    UserMetrics,
};
