//! LIFO stack of visited pages backing "go back".

use crate::url::clamp_url;

/// A visit remembered on the back stack.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StackFrame {
    pub url: String,
    /// 0-based position of the history entry written by the same visit.
    pub history_position: usize,
}

/// Back-navigation stack.
#[derive(Debug, Clone, Default)]
pub struct NavigationStack {
    frames: Vec<StackFrame>,
}

impl NavigationStack {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, url: &str, history_position: usize) {
        self.frames.push(StackFrame {
            url: clamp_url(url),
            history_position,
        });
    }

    /// Remove and return the top frame, or `None` when empty.
    pub fn pop(&mut self) -> Option<StackFrame> {
        self.frames.pop()
    }

    pub fn peek(&self) -> Option<&StackFrame> {
        self.frames.last()
    }

    pub fn clear(&mut self) {
        self.frames.clear();
    }

    pub fn len(&self) -> usize {
        self.frames.len()
    }

    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }
}
