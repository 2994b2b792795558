//! Navigation controller: history log and back stack kept in step.
//!
//! Every visit writes one history entry and pushes one frame that remembers
//! where that entry sits in the log. Going back pops the frame of the page
//! on screen and rewinds the history cursor to the entry of the new top
//! frame, so the log and the stack always agree on what "previous" means.

use surf_types::error::Result;

use crate::history::{HistoryLog, HistoryView, SearchMatch};
use crate::stack::NavigationStack;

/// Owns the history log and the back stack.
#[derive(Debug, Clone, Default)]
pub struct Navigator {
    history: HistoryLog,
    stack: NavigationStack,
}

impl Navigator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start from a restored history. The back stack starts empty.
    pub fn with_history(history: HistoryLog) -> Self {
        Self {
            history,
            stack: NavigationStack::new(),
        }
    }

    /// Record a forward navigation.
    pub fn visit(&mut self, url: &str) -> Result<()> {
        let pos = self.history.append(url)?;
        self.stack.push(url, pos);
        Ok(())
    }

    /// Step back to the previous page, returning its URL.
    ///
    /// The top frame is the page being shown, so at least two frames are
    /// needed. With fewer, nothing changes and `None` is returned.
    pub fn go_back(&mut self) -> Option<String> {
        if self.stack.len() < 2 {
            return None;
        }
        self.stack.pop();
        let target = self.stack.peek()?;
        while self
            .history
            .current_position()
            .is_some_and(|pos| pos > target.history_position)
        {
            if !self.history.rewind_current() {
                break;
            }
        }
        Some(target.url.clone())
    }

    /// Drop the history and the back stack together; stack frames point
    /// into the log.
    pub fn clear_history(&mut self) {
        self.history.clear();
        self.stack.clear();
    }

    pub fn history(&self) -> &HistoryLog {
        &self.history
    }

    pub fn current_url(&self) -> Option<&str> {
        self.history.current_url()
    }

    pub fn search(&self, needle: &str) -> Vec<SearchMatch> {
        self.history.search(needle)
    }

    pub fn suggest(&self, prefix: &str) -> Vec<&str> {
        self.history.suggest(prefix)
    }

    pub fn entries(&self) -> Vec<HistoryView> {
        self.history.entries()
    }

    /// Number of frames on the back stack.
    pub fn depth(&self) -> usize {
        self.stack.len()
    }
}
