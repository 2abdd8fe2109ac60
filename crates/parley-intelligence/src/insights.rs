// ABOUTME: Threshold rule table turning aggregate metrics into typed insights
// ABOUTME: Derives a prioritized, deduplicated action-item list with quick-win ranking
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Parley Conversation Intelligence

//! Insight Generation
//!
//! Applies a declarative rule table to aggregate metrics. Every row runs on
//! every evaluation and multiple rows may fire; each negative finding becomes
//! one action item ranked by priority and quick-win score. The table shape
//! keeps the rule set auditable and each row independently unit-testable.

use crate::config::evaluation::InsightRulesConfig;
use crate::config::EvaluationConfig;
use parley_core::models::{
    ActionItem, ActionStatus, AggregateMetrics, Effort, Impact, Insight, InsightCategory,
    InsightType, Priority, Snapshot,
};
use serde_json::json;
use std::collections::BTreeSet;
use tracing::debug;

/// Which side of the threshold fires a rule
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum RuleDirection {
    /// Fires when the observed rate exceeds the threshold
    Above,
    /// Fires when the observed rate falls below the threshold
    Below,
}

/// Observed numerator/denominator pair for one rule
struct RuleObservation {
    numerator: u64,
    denominator: u64,
}

/// One row of the threshold rule table
struct ThresholdRule {
    category: InsightCategory,
    direction: RuleDirection,
    observe: fn(&AggregateMetrics) -> RuleObservation,
    threshold: fn(&InsightRulesConfig) -> f64,
    critical: Option<fn(&InsightRulesConfig) -> f64>,
    /// Finding template; `{rate}` is replaced with the observed percentage
    finding_template: &'static str,
    recommendation: &'static str,
    action: &'static str,
}

fn observe_too_short(metrics: &AggregateMetrics) -> RuleObservation {
    RuleObservation {
        numerator: metrics.ai.response_quality.too_short,
        denominator: metrics.ai.response_quality.total(),
    }
}

fn observe_shallow(metrics: &AggregateMetrics) -> RuleObservation {
    RuleObservation {
        numerator: metrics.ai.depth.shallow,
        denominator: metrics.ai.conversations_analyzed,
    }
}

fn observe_active_users(metrics: &AggregateMetrics) -> RuleObservation {
    RuleObservation {
        numerator: metrics.user.active_users_24h,
        denominator: metrics.user.total_users,
    }
}

fn observe_abandoned(metrics: &AggregateMetrics) -> RuleObservation {
    RuleObservation {
        numerator: metrics.ai.outcomes.abandoned,
        denominator: metrics.ai.outcomes.total(),
    }
}

fn observe_failed(metrics: &AggregateMetrics) -> RuleObservation {
    RuleObservation {
        numerator: metrics.ai.outcomes.failed,
        denominator: metrics.ai.outcomes.total(),
    }
}

/// The rule table, evaluated in fixed order on every run
const RULE_TABLE: &[ThresholdRule] = &[
    ThresholdRule {
        category: InsightCategory::Quality,
        direction: RuleDirection::Above,
        observe: observe_too_short,
        threshold: |c| c.too_short_warn_percent,
        critical: Some(|c| c.too_short_critical_percent),
        finding_template: "{rate}% of assistant responses are below the informative length floor",
        recommendation: "Raise the minimum response depth so answers carry enough substance",
        action: "Tune response generation to avoid one-line answers",
    },
    ThresholdRule {
        category: InsightCategory::Engagement,
        direction: RuleDirection::Above,
        observe: observe_shallow,
        threshold: |c| c.shallow_warn_percent,
        critical: None,
        finding_template: "{rate}% of conversations end within two messages",
        recommendation: "Strengthen opening responses so users have a reason to continue",
        action: "Improve first-response hooks to extend shallow conversations",
    },
    ThresholdRule {
        category: InsightCategory::Retention,
        direction: RuleDirection::Below,
        observe: observe_active_users,
        threshold: |c| c.active_users_min_percent,
        critical: None,
        finding_template: "Only {rate}% of users were active in the last 24 hours",
        recommendation: "Give inactive users a concrete reason to come back",
        action: "Design a re-engagement touchpoint for dormant users",
    },
    ThresholdRule {
        category: InsightCategory::Engagement,
        direction: RuleDirection::Above,
        observe: observe_abandoned,
        threshold: |c| c.abandoned_warn_percent,
        critical: None,
        finding_template: "{rate}% of conversations are abandoned before any exchange lands",
        recommendation: "Look at what users see immediately before walking away",
        action: "Reduce abandonment by answering the opening message directly",
    },
    ThresholdRule {
        category: InsightCategory::Quality,
        direction: RuleDirection::Above,
        observe: observe_failed,
        threshold: |c| c.failed_warn_percent,
        critical: None,
        finding_template: "{rate}% of classified conversations fail on the merits",
        recommendation: "Review failed transcripts for the most common unmet request",
        action: "Fix the top recurring failure pattern in classified transcripts",
    },
];

/// Insights plus the ranked action items derived from them
#[derive(Debug, Clone, Default)]
pub struct InsightReport {
    /// Findings in rule-table order, trend context last
    pub insights: Vec<Insight>,
    /// Action items ranked by priority then quick-win score
    pub action_items: Vec<ActionItem>,
}

impl InsightReport {
    /// Action items that are low effort and high expected impact
    #[must_use]
    pub fn quick_wins(&self) -> Vec<&ActionItem> {
        self.action_items
            .iter()
            .filter(|item| item.is_quick_win())
            .collect()
    }
}

/// Generates insights and action items from aggregate metrics
pub struct InsightGenerator {
    config: InsightRulesConfig,
}

impl Default for InsightGenerator {
    fn default() -> Self {
        Self::new()
    }
}

impl InsightGenerator {
    /// Create a generator with the global config
    #[must_use]
    pub fn new() -> Self {
        Self {
            config: EvaluationConfig::global().insights.clone(),
        }
    }

    /// Create a generator with explicit config
    #[must_use]
    pub const fn with_config(config: InsightRulesConfig) -> Self {
        Self { config }
    }

    /// Run the rule table over one metrics set
    ///
    /// Zero analyzed conversations yields a single insufficient-data insight
    /// and no action items; no percentage is ever computed against a zero
    /// denominator.
    #[must_use]
    pub fn generate(&self, metrics: &AggregateMetrics, prior: Option<&Snapshot>) -> InsightReport {
        if metrics.ai.conversations_analyzed == 0 {
            return InsightReport {
                insights: vec![Insight {
                    insight_type: InsightType::Neutral,
                    category: InsightCategory::Quality,
                    finding: "Insufficient data: no conversations were analyzed in this period"
                        .to_owned(),
                    recommendation: None,
                    data: None,
                }],
                action_items: Vec::new(),
            };
        }

        let mut insights = Vec::new();
        let mut action_items = Vec::new();
        let mut seen_actions: BTreeSet<(&'static str, &'static str)> = BTreeSet::new();

        for rule in RULE_TABLE {
            let observation = (rule.observe)(metrics);
            if observation.denominator == 0 {
                continue;
            }

            let rate = percentage(observation.numerator, observation.denominator);
            let threshold = (rule.threshold)(&self.config);
            let fired = match rule.direction {
                RuleDirection::Above => rate > threshold,
                RuleDirection::Below => rate < threshold,
            };
            if !fired {
                continue;
            }

            let priority = match rule.critical {
                Some(critical) if rate > critical(&self.config) => Priority::Critical,
                _ => Priority::High,
            };

            let finding = rule
                .finding_template
                .replace("{rate}", &format!("{rate:.1}"));

            insights.push(Insight {
                insight_type: InsightType::Negative,
                category: rule.category,
                finding: finding.clone(),
                recommendation: Some(rule.recommendation.to_owned()),
                data: Some(json!({
                    "rate_percent": round_tenth(rate),
                    "threshold_percent": threshold,
                    "numerator": observation.numerator,
                    "denominator": observation.denominator,
                })),
            });

            if seen_actions.insert((rule.category.as_str(), rule.action)) {
                let (effort, impact) = category_effort_impact(rule.category);
                action_items.push(ActionItem {
                    id: format!(
                        "action-{:02}-{}",
                        action_items.len() + 1,
                        rule.category.as_str()
                    ),
                    insight_ref: finding,
                    action: rule.action.to_owned(),
                    priority,
                    effort,
                    impact,
                    status: ActionStatus::Pending,
                });
            }
        }

        if insights.is_empty() {
            insights.push(Insight {
                insight_type: InsightType::Positive,
                category: InsightCategory::Quality,
                finding: "All monitored thresholds are healthy for this period".to_owned(),
                recommendation: None,
                data: None,
            });
        }

        if let Some(prior) = prior {
            insights.push(Self::volume_context(metrics, prior));
        }

        rank_action_items(&mut action_items);

        debug!(
            insights = insights.len(),
            action_items = action_items.len(),
            "generated insight report"
        );

        InsightReport {
            insights,
            action_items,
        }
    }

    /// Neutral volume insight comparing this batch against the prior snapshot
    fn volume_context(metrics: &AggregateMetrics, prior: &Snapshot) -> Insight {
        let current = metrics.ai.conversations_analyzed;
        let previous = prior.conversations_analyzed;
        let change_percent = if previous == 0 {
            i64::from(current > 0) * 100
        } else {
            #[allow(clippy::cast_precision_loss, clippy::cast_possible_truncation)]
            {
                ((current as f64 - previous as f64) / previous as f64 * 100.0).round() as i64
            }
        };

        Insight {
            insight_type: InsightType::Neutral,
            category: InsightCategory::Volume,
            finding: format!(
                "Conversation volume moved {change_percent:+}% against the prior snapshot ({previous} to {current})"
            ),
            recommendation: None,
            data: Some(json!({
                "current": current,
                "previous": previous,
                "change_percent": change_percent,
            })),
        }
    }
}

/// Stable ranking: priority first, quick-win score second, insertion order on ties
fn rank_action_items(items: &mut [ActionItem]) {
    items.sort_by(|a, b| {
        a.priority
            .rank()
            .cmp(&b.priority.rank())
            .then_with(|| b.quick_win_score().cmp(&a.quick_win_score()))
    });
}

/// Effort/impact lookup per insight category
const fn category_effort_impact(category: InsightCategory) -> (Effort, Impact) {
    match category {
        InsightCategory::Quality => (Effort::Quick, Impact::High),
        InsightCategory::Engagement => (Effort::Medium, Impact::High),
        InsightCategory::Retention => (Effort::Significant, Impact::High),
        InsightCategory::Volume => (Effort::Medium, Impact::Low),
    }
}

/// Percentage with the x/0 = 0 convention
fn percentage(numerator: u64, denominator: u64) -> f64 {
    if denominator == 0 {
        return 0.0;
    }
    #[allow(clippy::cast_precision_loss)]
    {
        numerator as f64 / denominator as f64 * 100.0
    }
}

/// Round to one decimal place for stable serialized output
fn round_tenth(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}
