// ABOUTME: Aggregate metrics, insight, action item, funnel, and snapshot record types
// ABOUTME: One Snapshot captures the full output of a single evaluation run
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Parley Conversation Intelligence

use crate::models::conversation::{OutcomeClassification, Sentiment};
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Raw per-user counters supplied by the caller alongside the transcript batch
///
/// The engine does not derive these; they arrive from the usage pipeline and
/// pass through into the snapshot's user metrics.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UsageCounters {
    /// Total registered users
    pub total_users: u64,
    /// Users active within the trailing 24 hours
    pub active_users_24h: u64,
    /// App open events
    pub app_opens: u64,
    /// Images generated
    pub images_generated: u64,
    /// Voice sessions started
    pub voice_sessions: u64,
    /// User counts keyed by locale
    pub by_locale: BTreeMap<String, u64>,
    /// User counts keyed by device class
    pub by_device: BTreeMap<String, u64>,
    /// User counts keyed by app version
    pub by_app_version: BTreeMap<String, u64>,
}

/// User-side aggregate metrics for one snapshot
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct UserMetrics {
    /// Total registered users
    pub total_users: u64,
    /// Users active within the trailing 24 hours
    pub active_users_24h: u64,
    /// App open events
    pub app_opens: u64,
    /// Images generated
    pub images_generated: u64,
    /// Voice sessions started
    pub voice_sessions: u64,
    /// User counts keyed by locale
    pub by_locale: BTreeMap<String, u64>,
    /// User counts keyed by device class
    pub by_device: BTreeMap<String, u64>,
    /// User counts keyed by app version
    pub by_app_version: BTreeMap<String, u64>,
}

impl From<UsageCounters> for UserMetrics {
    fn from(counters: UsageCounters) -> Self {
        Self {
            total_users: counters.total_users,
            active_users_24h: counters.active_users_24h,
            app_opens: counters.app_opens,
            images_generated: counters.images_generated,
            voice_sessions: counters.voice_sessions,
            by_locale: counters.by_locale,
            by_device: counters.by_device,
            by_app_version: counters.by_app_version,
        }
    }
}

/// Conversation-depth distribution over one classified batch
///
/// Invariant: the three buckets sum to the number of conversations analyzed.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct DepthBuckets {
    /// Conversations with at most two messages
    pub shallow: u64,
    /// Conversations with three to five messages
    pub moderate: u64,
    /// Conversations with six or more messages
    pub deep: u64,
}

impl DepthBuckets {
    /// Total conversations across all depth buckets
    #[must_use]
    pub const fn total(&self) -> u64 {
        self.shallow + self.moderate + self.deep
    }
}

/// Assistant response length distribution over one classified batch
///
/// Invariant: the three buckets sum to the number of assistant messages.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct ResponseQualityBuckets {
    /// Responses below the minimum informative length
    pub too_short: u64,
    /// Responses within the appropriate length band
    pub appropriate: u64,
    /// Responses above the appropriate length band
    pub too_long: u64,
}

impl ResponseQualityBuckets {
    /// Total assistant responses across all quality buckets
    #[must_use]
    pub const fn total(&self) -> u64 {
        self.too_short + self.appropriate + self.too_long
    }
}

/// Frequency of a single topic across a classified batch
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct TopicCount {
    /// Topic label
    pub topic: String,
    /// Number of conversations in which the topic appeared
    pub count: u64,
}

/// Outcome classification tally for one classified batch
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct OutcomeTally {
    /// Conversations classified successful
    pub successful: u64,
    /// Conversations classified partial
    pub partial: u64,
    /// Conversations classified failed
    pub failed: u64,
    /// Conversations classified abandoned
    pub abandoned: u64,
}

impl OutcomeTally {
    /// Record one classification in the tally
    pub fn record(&mut self, classification: OutcomeClassification) {
        match classification {
            OutcomeClassification::Successful => self.successful += 1,
            OutcomeClassification::Partial => self.partial += 1,
            OutcomeClassification::Failed => self.failed += 1,
            OutcomeClassification::Abandoned => self.abandoned += 1,
        }
    }

    /// Total conversations across all outcomes
    #[must_use]
    pub const fn total(&self) -> u64 {
        self.successful + self.partial + self.failed + self.abandoned
    }
}

/// Sentiment tally for one classified batch
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct SentimentTally {
    /// Conversations with positive sentiment
    pub positive: u64,
    /// Conversations with neutral sentiment
    pub neutral: u64,
    /// Conversations with negative sentiment
    pub negative: u64,
    /// Conversations with no sentiment signal
    pub unknown: u64,
}

impl SentimentTally {
    /// Record one sentiment in the tally
    pub fn record(&mut self, sentiment: Sentiment) {
        match sentiment {
            Sentiment::Positive => self.positive += 1,
            Sentiment::Neutral => self.neutral += 1,
            Sentiment::Negative => self.negative += 1,
            Sentiment::Unknown => self.unknown += 1,
        }
    }
}

/// AI-side aggregate metrics for one snapshot
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct AiMetrics {
    /// Conversations that passed validation and were classified
    pub conversations_analyzed: u64,
    /// Malformed conversations excluded from every aggregate
    pub conversations_skipped: u64,
    /// Total messages across analyzed conversations
    pub total_messages: u64,
    /// Total assistant messages across analyzed conversations
    pub total_assistant_messages: u64,
    /// Conversation-depth distribution
    pub depth: DepthBuckets,
    /// Assistant response length distribution
    pub response_quality: ResponseQualityBuckets,
    /// Conversations started per hour of day (UTC); conversations without a
    /// timestamp are excluded from this histogram but counted elsewhere
    pub hourly_activity: [u64; 24],
    /// Topic frequencies, descending by count, ties ascending by name
    pub topic_counts: Vec<TopicCount>,
    /// Outcome classification tally
    pub outcomes: OutcomeTally,
    /// Sentiment tally
    pub sentiment: SentimentTally,
    /// Mean assistant response length in characters (0 when no responses)
    pub mean_response_chars: f64,
}

/// Polarity of an insight finding
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum InsightType {
    /// The metric is healthy
    Positive,
    /// The metric crossed a warning threshold
    Negative,
    /// Informational, no judgment attached
    Neutral,
}

/// Category an insight belongs to
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum InsightCategory {
    /// Response quality and answer completeness
    Quality,
    /// Conversation depth and user involvement
    Engagement,
    /// User return behavior
    Retention,
    /// Batch volume context relative to a prior snapshot
    Volume,
}

impl InsightCategory {
    /// Stable lowercase label for ids and references
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Quality => "quality",
            Self::Engagement => "engagement",
            Self::Retention => "retention",
            Self::Volume => "volume",
        }
    }
}

/// A single finding derived from aggregate metrics
///
/// Derived, not persisted independently; lives only inside a snapshot.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Insight {
    /// Polarity of the finding
    pub insight_type: InsightType,
    /// Category the finding belongs to
    pub category: InsightCategory,
    /// Human-readable finding
    pub finding: String,
    /// Recommended response to the finding, when one exists
    pub recommendation: Option<String>,
    /// Supporting data for the finding (observed rates, thresholds)
    pub data: Option<serde_json::Value>,
}

/// Priority of an action item
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum Priority {
    /// Requires immediate attention
    Critical,
    /// Address in the current cycle
    High,
    /// Address when capacity allows
    Medium,
    /// Nice to have
    Low,
}

impl Priority {
    /// Sort rank; lower sorts first
    #[must_use]
    pub const fn rank(&self) -> u8 {
        match self {
            Self::Critical => 0,
            Self::High => 1,
            Self::Medium => 2,
            Self::Low => 3,
        }
    }
}

/// Implementation effort estimate for an action item
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum Effort {
    /// Small, contained change
    Quick,
    /// Moderate change
    Medium,
    /// Substantial project
    Significant,
}

impl Effort {
    /// Contribution to the quick-win composite score
    #[must_use]
    pub const fn quick_win_points(&self) -> u8 {
        match self {
            Self::Quick => 2,
            Self::Medium => 1,
            Self::Significant => 0,
        }
    }
}

/// Expected impact of an action item
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum Impact {
    /// Large expected effect on the metric
    High,
    /// Moderate expected effect
    Medium,
    /// Small expected effect
    Low,
}

impl Impact {
    /// Contribution to the quick-win composite score
    #[must_use]
    pub const fn quick_win_points(&self) -> u8 {
        match self {
            Self::High => 2,
            Self::Medium => 1,
            Self::Low => 0,
        }
    }
}

/// Workflow status of an action item
///
/// Status is owned by the consuming UI. The engine always regenerates
/// `Pending`; the caller reconciles human-edited status externally.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum ActionStatus {
    /// Freshly generated, not yet triaged
    Pending,
    /// Being worked on
    InProgress,
    /// Done
    Completed,
    /// Deliberately not pursued
    Dismissed,
}

/// An actionable item derived from a negative insight
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ActionItem {
    /// Deterministic id within the snapshot
    pub id: String,
    /// Finding of the insight this item was derived from
    pub insight_ref: String,
    /// Concrete action to take
    pub action: String,
    /// Priority bucket
    pub priority: Priority,
    /// Implementation effort estimate
    pub effort: Effort,
    /// Expected impact
    pub impact: Impact,
    /// Workflow status; always `Pending` when emitted by the engine
    pub status: ActionStatus,
}

impl ActionItem {
    /// Composite quick-win score used as the secondary ranking key
    #[must_use]
    pub const fn quick_win_score(&self) -> u8 {
        self.effort.quick_win_points() + self.impact.quick_win_points()
    }

    /// Whether this item is a quick win (low effort, high expected impact)
    #[must_use]
    pub const fn is_quick_win(&self) -> bool {
        matches!(self.effort, Effort::Quick) && matches!(self.impact, Impact::High)
    }
}

/// One stage of the engagement-depth funnel
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct FunnelStage {
    /// Stage name (Started, Engaged, DeepDive, PowerUsers)
    pub name: String,
    /// Estimated conversations reaching this stage
    pub count: u64,
    /// Retention from the first stage, percent of started
    pub retention_percent: u8,
}

/// Drop-off between two adjacent funnel stages
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct StageDropOff {
    /// Name of the earlier stage
    pub from_stage: String,
    /// Name of the later stage
    pub to_stage: String,
    /// Fractional loss between the stages, percent of the earlier stage
    pub drop_off_percent: u8,
}

/// Funnel analysis output for one snapshot
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct FunnelAnalysis {
    /// Funnel stages in order
    pub stages: Vec<FunnelStage>,
    /// Drop-off rates between adjacent stages
    pub drop_offs: Vec<StageDropOff>,
    /// Remediation suggestion keyed by the worst transition
    pub suggestion: String,
}

/// Aggregate metrics for one snapshot: user side plus AI side
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct AggregateMetrics {
    /// User-side metrics (pass-through of the supplied usage counters)
    pub user: UserMetrics,
    /// AI-side metrics derived from the classified batch
    pub ai: AiMetrics,
}

/// One immutable evaluation run's full output
///
/// `date` is the natural key: a second run for the same date overwrites
/// (idempotent upsert); `date = None` is the all-time aggregate, stored
/// separately. The id derives from the key so reruns for the same key are
/// byte-identical apart from `generated_at`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Snapshot {
    /// Deterministic id derived from the date key
    pub id: String,
    /// Evaluation date key, or `None` for the all-time aggregate
    pub date: Option<NaiveDate>,
    /// When this snapshot was generated
    pub generated_at: DateTime<Utc>,
    /// Number of raw conversation records submitted for this run
    pub sample_size: u64,
    /// Number of conversations that passed validation and were classified
    pub conversations_analyzed: u64,
    /// User-side aggregate metrics
    pub user_metrics: UserMetrics,
    /// AI-side aggregate metrics
    pub ai_metrics: AiMetrics,
    /// Findings derived from the aggregate metrics
    pub insights: Vec<Insight>,
    /// Ranked action items derived from negative findings
    pub action_items: Vec<ActionItem>,
    /// Engagement-depth funnel analysis
    pub funnel: FunnelAnalysis,
    /// Aggregate health score in [0, 100]
    pub quality_score: u8,
}

impl Snapshot {
    /// Derive the deterministic snapshot id for a date key
    #[must_use]
    pub fn natural_id(date: Option<NaiveDate>) -> String {
        date.map_or_else(
            || "snapshot-all-time".to_owned(),
            |d| format!("snapshot-{d}"),
        )
    }
}
