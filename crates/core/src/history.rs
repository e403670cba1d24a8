//! Bounded undo/redo history of presentation snapshots.
//!
//! One `HistoryManager` belongs to one open document. Call [`HistoryManager::clear`]
//! whenever the document changes identity so undo never crosses documents.

use crate::types::Presentation;
use std::collections::VecDeque;

/// Default number of snapshots retained.
pub const DEFAULT_HISTORY_LIMIT: usize = 50;

/// An independent copy of editor state at one point in time.
#[derive(Debug, Clone, PartialEq)]
pub struct Snapshot {
    pub presentation: Presentation,
    pub active_slide: usize,
}

/// Snapshot list plus a cursor pointing at the current entry.
#[derive(Debug, Clone)]
pub struct HistoryManager {
    entries: VecDeque<Snapshot>,
    cursor: Option<usize>,
    limit: usize,
}

impl Default for HistoryManager {
    fn default() -> Self {
        Self::new()
    }
}

impl HistoryManager {
    /// Create a history holding up to [`DEFAULT_HISTORY_LIMIT`] snapshots.
    pub fn new() -> Self {
        Self::with_limit(DEFAULT_HISTORY_LIMIT)
    }

    /// Create a history with a custom capacity (at least 1).
    pub fn with_limit(limit: usize) -> Self {
        let limit = limit.max(1);
        Self {
            entries: VecDeque::with_capacity(limit),
            cursor: None,
            limit,
        }
    }

    /// Record a copy of `presentation`, discarding any redo entries.
    ///
    /// When full, the oldest entry is evicted and the cursor stays on the
    /// newest one.
    pub fn push(&mut self, presentation: &Presentation, active_slide: usize) {
        let keep = self.cursor.map_or(0, |c| c + 1);
        self.entries.truncate(keep);
        self.entries.push_back(Snapshot {
            presentation: presentation.clone(),
            active_slide,
        });

        if self.entries.len() > self.limit {
            self.entries.pop_front();
        }
        self.cursor = Some(self.entries.len() - 1);
        log::debug!(
            "History push: {} entries, cursor {:?}",
            self.entries.len(),
            self.cursor
        );
    }

    pub fn can_undo(&self) -> bool {
        matches!(self.cursor, Some(c) if c > 0)
    }

    pub fn can_redo(&self) -> bool {
        matches!(self.cursor, Some(c) if c + 1 < self.entries.len())
    }

    /// Step back one entry and return a copy of it.
    pub fn undo(&mut self) -> Option<Snapshot> {
        if !self.can_undo() {
            return None;
        }
        let cursor = self.cursor? - 1;
        self.cursor = Some(cursor);
        log::debug!("History undo to {}", cursor);
        self.entries.get(cursor).cloned()
    }

    /// Step forward one entry and return a copy of it.
    pub fn redo(&mut self) -> Option<Snapshot> {
        if !self.can_redo() {
            return None;
        }
        let cursor = self.cursor? + 1;
        self.cursor = Some(cursor);
        log::debug!("History redo to {}", cursor);
        self.entries.get(cursor).cloned()
    }

    /// Copy of the entry under the cursor.
    pub fn current(&self) -> Option<Snapshot> {
        self.entries.get(self.cursor?).cloned()
    }

    /// Forget everything.
    pub fn clear(&mut self) {
        self.entries.clear();
        self.cursor = None;
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn limit(&self) -> usize {
        self.limit
    }
}
