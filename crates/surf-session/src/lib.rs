//! Session-state engine for the surf terminal browser.
//!
//! Five cooperating structures hold the state of a browsing session:
//!
//! - [`HistoryLog`] -- append-only log of visits with a movable cursor.
//! - [`TabRing`] -- circular ring of open tabs, at most [`MAX_TABS`].
//! - [`ContentCache`] -- 100-bucket chained hash table of page bodies.
//! - [`NavigationStack`] -- LIFO of visits backing "go back".
//! - [`BookmarkIndex`] -- binary search tree of bookmarked URLs.
//!
//! [`Navigator`] pairs the log with the stack so "back" has one answer,
//! [`SessionStore`] persists history and bookmarks as a single snapshot,
//! and [`Session`] wires a visit through all of them.

pub mod bookmarks;
pub mod cache;
pub mod content;
pub mod history;
pub mod nav;
pub mod opener;
pub mod session;
pub mod stack;
pub mod store;
pub mod tabs;
pub mod url;

#[cfg(test)]
pub(crate) mod test_utils;

pub use bookmarks::{AddOutcome, BookmarkIndex};
pub use cache::ContentCache;
pub use content::{ContentSource, DemoContent};
pub use history::{HistoryLog, HistoryView, SearchMatch};
pub use nav::Navigator;
pub use opener::{NoopOpener, SystemOpener, UrlOpener};
pub use session::{HOME_URL, PageView, Session, SessionSummary};
pub use stack::{NavigationStack, StackFrame};
pub use store::SessionStore;
pub use tabs::{MAX_TABS, TabRing, TabView};
pub use url::{external_form, validate_url};
