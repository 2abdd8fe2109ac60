// ABOUTME: Aggregation configuration for depth and response length bucketing
// ABOUTME: Bucket edges used when folding a classified batch into metrics
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Parley Conversation Intelligence

use parley_core::constants::{depth, response_length};
use serde::{Deserialize, Serialize};

/// Aggregation Configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AggregatorConfig {
    /// Conversation depth bucket edges
    pub depth: DepthThresholds,
    /// Assistant response length bucket edges
    pub response_length: ResponseLengthBands,
}

/// Conversation depth bucket edges, in messages
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DepthThresholds {
    /// Maximum messages for the shallow bucket
    pub shallow_max_messages: usize,
    /// Maximum messages for the moderate bucket
    pub moderate_max_messages: usize,
}

/// Assistant response length bucket edges, in characters
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResponseLengthBands {
    /// Responses below this are too short
    pub too_short_below_chars: usize,
    /// Responses above this are too long
    pub too_long_above_chars: usize,
}

impl Default for DepthThresholds {
    fn default() -> Self {
        Self {
            shallow_max_messages: depth::SHALLOW_MAX_MESSAGES,
            moderate_max_messages: depth::MODERATE_MAX_MESSAGES,
        }
    }
}

impl Default for ResponseLengthBands {
    fn default() -> Self {
        Self {
            too_short_below_chars: response_length::TOO_SHORT_BELOW_CHARS,
            too_long_above_chars: response_length::TOO_LONG_ABOVE_CHARS,
        }
    }
}
