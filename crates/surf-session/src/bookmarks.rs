//! Bookmark index: a binary search tree of URLs in byte order.
//!
//! Nodes live in an arena and refer to their children by index. The raw
//! insert accepts duplicate keys (a tie goes right); only [`BookmarkIndex::add`]
//! checks membership first. Restoring from the store uses the raw insert,
//! so whatever duplicates were saved come back.

use std::cmp::Ordering;

use crate::url::clamp_url;

#[derive(Debug, Clone)]
struct BookmarkNode {
    url: String,
    left: Option<usize>,
    right: Option<usize>,
}

/// Result of [`BookmarkIndex::add`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AddOutcome {
    Added,
    AlreadyBookmarked,
}

/// Bookmarked URLs.
#[derive(Debug, Clone, Default)]
pub struct BookmarkIndex {
    nodes: Vec<BookmarkNode>,
    root: Option<usize>,
}

impl BookmarkIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Tree search for `url`, compared as stored (clamped).
    pub fn contains(&self, url: &str) -> bool {
        let url = clamp_url(url);
        let mut next = self.root;
        while let Some(id) = next {
            let node = &self.nodes[id];
            next = match url.as_str().cmp(node.url.as_str()) {
                Ordering::Equal => return true,
                Ordering::Less => node.left,
                Ordering::Greater => node.right,
            };
        }
        false
    }

    /// Insert without checking for an existing node with the same key.
    pub fn insert_unchecked(&mut self, url: &str) {
        let url = clamp_url(url);
        let id = self.nodes.len();

        let mut parent = None;
        let mut next = self.root;
        while let Some(cur) = next {
            let goes_left = url.as_str() < self.nodes[cur].url.as_str();
            parent = Some((cur, goes_left));
            next = if goes_left {
                self.nodes[cur].left
            } else {
                self.nodes[cur].right
            };
        }

        self.nodes.push(BookmarkNode {
            url,
            left: None,
            right: None,
        });
        match parent {
            None => self.root = Some(id),
            Some((p, true)) => self.nodes[p].left = Some(id),
            Some((p, false)) => self.nodes[p].right = Some(id),
        }
    }

    /// Insert `url` unless it is already bookmarked.
    pub fn add(&mut self, url: &str) -> AddOutcome {
        if self.contains(url) {
            return AddOutcome::AlreadyBookmarked;
        }
        self.insert_unchecked(url);
        AddOutcome::Added
    }

    /// Node, then left subtree, then right subtree.
    ///
    /// Walks with an explicit stack, so deep (degenerate) trees are fine.
    /// Calling it again starts a fresh traversal.
    pub fn pre_order(&self) -> PreOrder<'_> {
        PreOrder {
            index: self,
            pending: self.root.into_iter().collect(),
        }
    }

    /// Number of nodes whose key is `url`.
    pub fn count(&self, url: &str) -> usize {
        let url = clamp_url(url);
        self.nodes.iter().filter(|n| n.url == url).count()
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }
}

/// Pre-order traversal of a [`BookmarkIndex`].
pub struct PreOrder<'a> {
    index: &'a BookmarkIndex,
    pending: Vec<usize>,
}

impl<'a> Iterator for PreOrder<'a> {
    type Item = &'a str;

    fn next(&mut self) -> Option<Self::Item> {
        let id = self.pending.pop()?;
        let node = &self.index.nodes[id];
        // Right first so the left subtree is visited first.
        self.pending.extend(node.right);
        self.pending.extend(node.left);
        Some(node.url.as_str())
    }
}
