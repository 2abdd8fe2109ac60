// ABOUTME: Configuration module for the parley-intelligence crate
// ABOUTME: Re-exports the evaluation configuration tree
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Parley Conversation Intelligence

/// Evaluation configuration (signals, classifier, insights, trends, funnel)
pub mod evaluation;

pub use evaluation::EvaluationConfig;
