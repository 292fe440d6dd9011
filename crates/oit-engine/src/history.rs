// ABOUTME: Bounded undo/redo history of protocol snapshots
// ABOUTME: Pushing after an undo discards the redo branch; equal consecutive snapshots are skipped
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 OIT Calculator Contributors

use chrono::{DateTime, Utc};
use oit_core::models::Protocol;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Snapshots kept when no capacity is given
pub const DEFAULT_HISTORY_CAPACITY: usize = 50;

/// One recorded protocol state
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryEntry {
    /// Protocol as it was after the edit
    pub protocol: Protocol,
    /// Short description of the edit
    pub label: String,
    /// When the snapshot was taken
    pub recorded_at: DateTime<Utc>,
}

/// Linear undo/redo history with a fixed capacity
///
/// The cursor always points at the current snapshot, so the history is never
/// empty.
#[derive(Debug, Clone)]
pub struct ProtocolHistory {
    entries: Vec<HistoryEntry>,
    cursor: usize,
    capacity: usize,
}

impl ProtocolHistory {
    /// Start a history at `initial` with the default capacity
    #[must_use]
    pub fn new(initial: Protocol) -> Self {
        Self::with_capacity(initial, DEFAULT_HISTORY_CAPACITY)
    }

    /// Start a history keeping at most `capacity` snapshots (minimum one)
    #[must_use]
    pub fn with_capacity(initial: Protocol, capacity: usize) -> Self {
        Self {
            entries: vec![HistoryEntry {
                protocol: initial,
                label: "initial".to_owned(),
                recorded_at: Utc::now(),
            }],
            cursor: 0,
            capacity: capacity.max(1),
        }
    }

    /// Current protocol
    #[must_use]
    pub fn current(&self) -> &Protocol {
        &self.current_entry().protocol
    }

    /// Current snapshot with its label and timestamp
    #[must_use]
    pub fn current_entry(&self) -> &HistoryEntry {
        // cursor is kept in bounds by every mutation
        &self.entries[self.cursor]
    }

    /// Record a new state
    ///
    /// Returns `false` when `protocol` equals the current state and nothing
    /// was recorded.
    pub fn push(&mut self, protocol: Protocol, label: impl Into<String>) -> bool {
        if *self.current() == protocol {
            return false;
        }

        self.entries.truncate(self.cursor + 1);
        self.entries.push(HistoryEntry {
            protocol,
            label: label.into(),
            recorded_at: Utc::now(),
        });

        if self.entries.len() > self.capacity {
            let overflow = self.entries.len() - self.capacity;
            self.entries.drain(..overflow);
        }
        self.cursor = self.entries.len() - 1;

        debug!(
            snapshots = self.entries.len(),
            label = %self.current_entry().label,
            "Recorded protocol snapshot"
        );
        true
    }

    /// Step back one snapshot
    pub fn undo(&mut self) -> Option<&Protocol> {
        if !self.can_undo() {
            return None;
        }
        self.cursor -= 1;
        Some(self.current())
    }

    /// Step forward one snapshot
    pub fn redo(&mut self) -> Option<&Protocol> {
        if !self.can_redo() {
            return None;
        }
        self.cursor += 1;
        Some(self.current())
    }

    /// Whether an earlier snapshot exists
    #[must_use]
    pub const fn can_undo(&self) -> bool {
        self.cursor > 0
    }

    /// Whether a later snapshot exists
    #[must_use]
    pub fn can_redo(&self) -> bool {
        self.cursor + 1 < self.entries.len()
    }

    /// Number of stored snapshots
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Always `false`; a history holds at least its current snapshot
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Labels from oldest to newest
    pub fn labels(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|entry| entry.label.as_str())
    }
}
