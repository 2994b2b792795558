//! Append-only history log with a movable "current" cursor.

use serde::Serialize;
use surf_types::error::{Result, SurfError};

use crate::url::clamp_url;

/// Most suggestions returned by [`HistoryLog::suggest`].
pub const MAX_SUGGESTIONS: usize = 5;

/// A history entry as shown to the user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HistoryView {
    /// 1-based position in the log.
    pub position: usize,
    pub url: String,
    pub is_current: bool,
}

/// A search hit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SearchMatch {
    /// 1-based number among the matches (what the user picks).
    pub ordinal: usize,
    /// 1-based position of the entry in the log.
    pub position: usize,
    pub url: String,
}

/// Visited URLs in visit order.
///
/// New entries only ever go on the tail. [`rewind_current`] moves the
/// cursor toward the head without removing anything, so after going back
/// the cursor can lag behind the tail.
///
/// [`rewind_current`]: HistoryLog::rewind_current
#[derive(Debug, Clone, Default)]
pub struct HistoryLog {
    entries: Vec<String>,
    current: Option<usize>,
}

impl HistoryLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a visit after the tail and make it current.
    ///
    /// Returns the 0-based position of the new entry. On allocation
    /// failure the log is left unchanged.
    pub fn append(&mut self, url: &str) -> Result<usize> {
        self.entries
            .try_reserve(1)
            .map_err(|e| SurfError::Allocation(format!("history entry: {e}")))?;
        self.entries.push(clamp_url(url));
        let pos = self.entries.len() - 1;
        self.current = Some(pos);
        Ok(pos)
    }

    /// Move the cursor to the entry before it.
    ///
    /// Returns `false` (and changes nothing) when the cursor is on the head
    /// or the log is empty.
    pub fn rewind_current(&mut self) -> bool {
        match self.current {
            Some(pos) if pos > 0 => {
                self.current = Some(pos - 1);
                true
            },
            _ => false,
        }
    }

    /// Drop every entry.
    pub fn clear(&mut self) {
        self.entries.clear();
        self.entries.shrink_to_fit();
        self.current = None;
    }

    /// Entries containing `needle` (case-sensitive), in log order.
    pub fn search(&self, needle: &str) -> Vec<SearchMatch> {
        self.entries
            .iter()
            .enumerate()
            .filter(|(_, url)| url.contains(needle))
            .enumerate()
            .map(|(i, (pos, url))| SearchMatch {
                ordinal: i + 1,
                position: pos + 1,
                url: url.clone(),
            })
            .collect()
    }

    /// Up to [`MAX_SUGGESTIONS`] URLs starting with `prefix`, scanning from
    /// the head through the current entry.
    pub fn suggest(&self, prefix: &str) -> Vec<&str> {
        let Some(cur) = self.current else {
            return Vec::new();
        };
        self.entries[..=cur]
            .iter()
            .filter(|url| url.starts_with(prefix))
            .take(MAX_SUGGESTIONS)
            .map(String::as_str)
            .collect()
    }

    /// URL of the current entry.
    pub fn current_url(&self) -> Option<&str> {
        self.current.map(|pos| self.entries[pos].as_str())
    }

    /// 0-based position of the current entry.
    pub fn current_position(&self) -> Option<usize> {
        self.current
    }

    /// URLs from head to tail.
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(String::as_str)
    }

    /// Head-to-tail listing with the current entry marked.
    pub fn entries(&self) -> Vec<HistoryView> {
        self.entries
            .iter()
            .enumerate()
            .map(|(i, url)| HistoryView {
                position: i + 1,
                url: url.clone(),
                is_current: self.current == Some(i),
            })
            .collect()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
