// ABOUTME: Signal extraction configuration for topic and sentiment detection
// ABOUTME: Example caps and excerpt limits for topic details
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Parley Conversation Intelligence

use parley_core::constants::signals;
use serde::{Deserialize, Serialize};

/// Signal Extraction Configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SignalConfig {
    /// Maximum stored example excerpts per detected topic
    pub max_examples_per_topic: usize,
    /// Maximum characters kept per stored example excerpt
    pub max_example_chars: usize,
}

impl Default for SignalConfig {
    fn default() -> Self {
        Self {
            max_examples_per_topic: signals::MAX_EXAMPLES_PER_TOPIC,
            max_example_chars: signals::MAX_EXAMPLE_CHARS,
        }
    }
}
