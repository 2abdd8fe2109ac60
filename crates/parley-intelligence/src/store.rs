// ABOUTME: Snapshot persistence abstraction with an in-memory reference implementation
// ABOUTME: Idempotent date-keyed upsert, historical listing, and a separate all-time slot
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Parley Conversation Intelligence

//! Snapshot Store
//!
//! Persistence boundary for evaluation snapshots. The engine consumes only
//! `get`, `put`, and `list`; everything else about storage (serialization,
//! retries, backoff) is the caller's concern and store failures propagate
//! without internal retry.
//!
//! `put` is an idempotent upsert keyed by date: a rerun for the same date
//! overwrites with last-writer-wins semantics, and implementations serialize
//! writers so a rerun is race-free. The `date = None` all-time snapshot lives
//! in its own slot and never appears in `list`.

use async_trait::async_trait;
use chrono::NaiveDate;
use parley_core::errors::AppResult;
use parley_core::models::Snapshot;
use std::collections::BTreeMap;
use tokio::sync::RwLock;
use tracing::debug;

/// Persistence interface for evaluation snapshots
#[async_trait]
pub trait SnapshotStore: Send + Sync {
    /// Fetch the snapshot for a date key, or the all-time snapshot for `None`
    async fn get(&self, date: Option<NaiveDate>) -> AppResult<Option<Snapshot>>;

    /// Idempotent upsert for a date key; last writer wins
    async fn put(&self, date: Option<NaiveDate>, snapshot: Snapshot) -> AppResult<()>;

    /// Dated snapshots, most recent first, at most `limit` entries
    async fn list(&self, limit: usize) -> AppResult<Vec<Snapshot>>;
}

#[derive(Default)]
struct StoreState {
    dated: BTreeMap<NaiveDate, Snapshot>,
    all_time: Option<Snapshot>,
}

/// In-memory reference implementation of [`SnapshotStore`]
///
/// The single write lock serializes writers across all keys, which is a
/// stricter guarantee than the at-most-one-writer-per-key contract requires.
#[derive(Default)]
pub struct MemorySnapshotStore {
    state: RwLock<StoreState>,
}

impl MemorySnapshotStore {
    /// Create an empty store
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl SnapshotStore for MemorySnapshotStore {
    async fn get(&self, date: Option<NaiveDate>) -> AppResult<Option<Snapshot>> {
        let state = self.state.read().await;
        Ok(match date {
            Some(date) => state.dated.get(&date).cloned(),
            None => state.all_time.clone(),
        })
    }

    async fn put(&self, date: Option<NaiveDate>, snapshot: Snapshot) -> AppResult<()> {
        let mut state = self.state.write().await;
        match date {
            Some(date) => {
                let replaced = state.dated.insert(date, snapshot).is_some();
                debug!(%date, replaced, "stored dated snapshot");
            }
            None => {
                let replaced = state.all_time.replace(snapshot).is_some();
                debug!(replaced, "stored all-time snapshot");
            }
        }
        Ok(())
    }

    async fn list(&self, limit: usize) -> AppResult<Vec<Snapshot>> {
        let state = self.state.read().await;
        Ok(state
            .dated
            .values()
            .rev()
            .take(limit)
            .cloned()
            .collect())
    }
}
