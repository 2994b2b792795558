//! Session controller: one object owning every structure of a browsing
//! session and the operations the command layer calls.
//!
//! A visit flows through the navigator (history entry + back frame), the
//! tab ring, the content cache and the external opener, and then the whole
//! history/bookmark snapshot is saved. Failures that do not stop the
//! operation (a full tab ring, a failed save) are queued as warnings; the
//! in-memory state stays authoritative.

use serde::Serialize;
use surf_types::config::Launcher;
use surf_types::error::{Result, SurfError};

use crate::bookmarks::{AddOutcome, BookmarkIndex};
use crate::cache::ContentCache;
use crate::content::ContentSource;
use crate::history::{HistoryLog, HistoryView, SearchMatch};
use crate::nav::Navigator;
use crate::opener::UrlOpener;
use crate::store::SessionStore;
use crate::tabs::{TabRing, TabView};
use crate::url::validate_url;

/// Default home page.
pub const HOME_URL: &str = "home";

/// A page ready to display.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PageView {
    pub url: String,
    pub content: String,
    /// Served from the content cache rather than rendered fresh.
    pub from_cache: bool,
}

/// Serializable snapshot of the whole session.
#[derive(Debug, Clone, Serialize)]
pub struct SessionSummary {
    pub current_tab: Option<String>,
    pub tabs: Vec<TabView>,
    pub history: Vec<HistoryView>,
    pub bookmarks: Vec<String>,
    pub cached_pages: usize,
    pub back_depth: usize,
    pub store_path: String,
    pub saving: bool,
    pub launcher: Launcher,
}

/// All state of one browsing session.
pub struct Session {
    nav: Navigator,
    tabs: TabRing,
    cache: ContentCache,
    bookmarks: BookmarkIndex,
    store: SessionStore,
    content: Box<dyn ContentSource>,
    opener: Box<dyn UrlOpener>,
    home_url: String,
    warnings: Vec<SurfError>,
    /// Off when an unreadable store could not be moved aside.
    saving: bool,
}

impl Session {
    /// An empty session.
    pub fn new(
        store: SessionStore,
        content: Box<dyn ContentSource>,
        opener: Box<dyn UrlOpener>,
    ) -> Self {
        Self::from_parts(
            store,
            content,
            opener,
            HistoryLog::new(),
            BookmarkIndex::new(),
        )
    }

    /// A session seeded from the store. Nothing is saved while restoring.
    pub fn restore(
        store: SessionStore,
        content: Box<dyn ContentSource>,
        opener: Box<dyn UrlOpener>,
    ) -> Result<Self> {
        let (history, bookmarks) = store.load()?;
        Ok(Self::from_parts(store, content, opener, history, bookmarks))
    }

    fn from_parts(
        store: SessionStore,
        content: Box<dyn ContentSource>,
        opener: Box<dyn UrlOpener>,
        history: HistoryLog,
        bookmarks: BookmarkIndex,
    ) -> Self {
        Self {
            nav: Navigator::with_history(history),
            tabs: TabRing::new(),
            cache: ContentCache::new(),
            bookmarks,
            store,
            content,
            opener,
            home_url: HOME_URL.to_string(),
            warnings: Vec::new(),
            saving: true,
        }
    }

    /// Restore from the store, or start empty when it cannot be read.
    ///
    /// An unreadable store is moved aside before anything is saved over it.
    /// If it cannot be moved, saving stays off for this session. Either way
    /// the restore error is queued as a warning.
    pub fn open(
        store: SessionStore,
        content: Box<dyn ContentSource>,
        opener: Box<dyn UrlOpener>,
    ) -> Self {
        match store.load() {
            Ok((history, bookmarks)) => Self::from_parts(store, content, opener, history, bookmarks),
            Err(e) => {
                log::warn!("Starting with an empty session: {e}");
                let mut session = Self::new(store, content, opener);
                session.warnings.push(e);
                if let Err(e) = session.store.set_aside() {
                    log::warn!("Saving disabled for this session: {e}");
                    session.saving = false;
                    session.warnings.push(e);
                }
                session
            },
        }
    }

    /// Whether changes are written to the store.
    pub fn is_saving(&self) -> bool {
        self.saving
    }

    /// Use a different home page.
    pub fn with_home(mut self, url: &str) -> Self {
        self.home_url = url.to_string();
        self
    }

    pub fn home_url(&self) -> &str {
        &self.home_url
    }

    // -- Navigation --

    /// Enter a URL (also used for "new tab": every visit opens a tab).
    ///
    /// An invalid URL is rejected before anything changes.
    pub fn visit(&mut self, url: &str) -> Result<PageView> {
        validate_url(url)?;
        self.record_visit(url)
    }

    /// Visit the home page.
    pub fn go_home(&mut self) -> Result<PageView> {
        let home = self.home_url.clone();
        self.record_visit(&home)
    }

    /// Show the current tab again.
    pub fn refresh(&mut self) -> Result<PageView> {
        let url = self
            .tabs
            .current_url()
            .ok_or_else(|| SurfError::NotFound("no open tab".into()))?
            .to_string();
        Ok(self.show(&url))
    }

    /// Go back to the previous page and open it in a tab.
    ///
    /// With a full tab ring the page is still shown but no tab opens, so
    /// the current tab (and [`Session::refresh`]) stays on the old URL.
    pub fn go_back(&mut self) -> Result<PageView> {
        let url = self
            .nav
            .go_back()
            .ok_or_else(|| SurfError::NotFound("no more history to go back".into()))?;
        self.open_tab(&url);
        Ok(self.show(&url))
    }

    /// Switch to the `index`-th tab counted from the current one.
    pub fn switch_tab(&mut self, index: usize) -> Result<PageView> {
        self.tabs.switch_to(index)?;
        let url = self
            .tabs
            .current_url()
            .ok_or_else(|| SurfError::NotFound("no open tab".into()))?
            .to_string();
        Ok(self.show(&url))
    }

    // -- History --

    pub fn clear_history(&mut self) {
        self.nav.clear_history();
        self.persist();
    }

    pub fn search_history(&self, keyword: &str) -> Vec<SearchMatch> {
        self.nav.search(keyword)
    }

    /// Revisit the `ordinal`-th match (1-based) of a history search.
    pub fn visit_search_result(&mut self, keyword: &str, ordinal: usize) -> Result<PageView> {
        let hits = self.nav.search(keyword);
        let hit = ordinal
            .checked_sub(1)
            .and_then(|i| hits.get(i))
            .ok_or(SurfError::InvalidIndex {
                index: ordinal,
                max: hits.len(),
            })?;
        let url = hit.url.clone();
        self.record_visit(&url)
    }

    pub fn suggest(&self, prefix: &str) -> Vec<String> {
        self.nav
            .suggest(prefix)
            .into_iter()
            .map(str::to_string)
            .collect()
    }

    pub fn history(&self) -> Vec<HistoryView> {
        self.nav.entries()
    }

    // -- Bookmarks --

    /// Bookmark the current tab.
    pub fn add_bookmark(&mut self) -> Result<(String, AddOutcome)> {
        let url = self
            .tabs
            .current_url()
            .ok_or_else(|| SurfError::NotFound("no active tab to bookmark".into()))?
            .to_string();
        let outcome = self.bookmarks.add(&url);
        if outcome == AddOutcome::Added {
            self.persist();
        }
        Ok((url, outcome))
    }

    /// Bookmarks in pre-order.
    pub fn bookmarks(&self) -> Vec<String> {
        self.bookmarks.pre_order().map(str::to_string).collect()
    }

    /// Visit the `ordinal`-th bookmark (1-based) of [`Session::bookmarks`].
    pub fn visit_bookmark(&mut self, ordinal: usize) -> Result<PageView> {
        let url = ordinal
            .checked_sub(1)
            .and_then(|i| self.bookmarks.pre_order().nth(i))
            .ok_or(SurfError::InvalidIndex {
                index: ordinal,
                max: self.bookmarks.len(),
            })?
            .to_string();
        self.record_visit(&url)
    }

    // -- Tabs & misc --

    pub fn tabs(&self) -> Vec<TabView> {
        self.tabs.list()
    }

    pub fn current_tab(&self) -> Option<&str> {
        self.tabs.current_url()
    }

    pub fn set_launcher(&mut self, launcher: Launcher) {
        self.opener.set_launcher(launcher);
    }

    pub fn launcher(&self) -> Launcher {
        self.opener.launcher()
    }

    /// Drain the warnings queued by earlier operations.
    pub fn take_warnings(&mut self) -> Vec<SurfError> {
        std::mem::take(&mut self.warnings)
    }

    pub fn summary(&self) -> SessionSummary {
        SessionSummary {
            current_tab: self.tabs.current_url().map(str::to_string),
            tabs: self.tabs.list(),
            history: self.nav.entries(),
            bookmarks: self.bookmarks(),
            cached_pages: self.cache.len(),
            back_depth: self.nav.depth(),
            store_path: self.store.path().display().to_string(),
            saving: self.is_saving(),
            launcher: self.launcher(),
        }
    }

    #[cfg(test)]
    pub(crate) fn navigator(&self) -> &Navigator {
        &self.nav
    }

    #[cfg(test)]
    pub(crate) fn cache(&self) -> &ContentCache {
        &self.cache
    }

    #[cfg(test)]
    pub(crate) fn bookmark_index(&self) -> &BookmarkIndex {
        &self.bookmarks
    }

    // -- Internals --

    fn record_visit(&mut self, url: &str) -> Result<PageView> {
        self.nav.visit(url)?;
        self.open_tab(url);
        let page = self.show(url);
        self.persist();
        Ok(page)
    }

    fn open_tab(&mut self, url: &str) {
        if let Err(e) = self.tabs.open(url) {
            log::warn!("Tab not opened for {url}: {e}");
            self.warnings.push(e);
        }
    }

    /// Hand the page to the opener and fetch its body through the cache.
    fn show(&mut self, url: &str) -> PageView {
        if url != self.home_url {
            if let Err(e) = self.opener.open(url) {
                log::warn!("External open of {url} failed: {e}");
            }
        }

        if let Some(content) = self.cache.get(url) {
            log::debug!("cache hit for {url}");
            return PageView {
                url: url.to_string(),
                content: content.to_string(),
                from_cache: true,
            };
        }

        log::debug!("cache miss for {url}");
        let body = self.content.render(url);
        self.cache.put(url, &body);
        let content = self.cache.get(url).map_or(body, str::to_string);
        PageView {
            url: url.to_string(),
            content,
            from_cache: false,
        }
    }

    fn persist(&mut self) {
        if !self.saving {
            log::debug!("Saving is off, snapshot not written");
            return;
        }
        if let Err(e) = self.store.save(self.nav.history(), &self.bookmarks) {
            log::warn!("Failed to save session: {e}");
            self.warnings.push(e);
        }
    }
}
