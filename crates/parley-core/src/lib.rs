// ABOUTME: Core types and constants for the Parley conversation intelligence platform
// ABOUTME: Foundation crate with error handling, data models, and heuristic constants
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Parley Conversation Intelligence

#![deny(unsafe_code)]

//! # Parley Core
//!
//! Foundation crate providing shared types and constants for the Parley
//! conversation evaluation platform. This crate is designed to change
//! infrequently, enabling incremental compilation benefits in the workspace.
//!
//! ## Modules
//!
//! - **errors**: Unified error handling with `AppError`, `ErrorCode`, and `AppResult`
//! - **models**: Core data models (conversations, outcomes, snapshots, insights)
//! - **constants**: Heuristic constants organized by domain

/// Unified error handling system with standard error codes
pub mod errors;

/// Core data models (Message, Conversation, Snapshot, Insight, ActionItem)
pub mod models;

/// Heuristic constants organized by domain (scoring, thresholds, funnel factors)
pub mod constants;

pub use errors::{AppError, AppResult, ErrorCode};
