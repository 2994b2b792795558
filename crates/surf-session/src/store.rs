//! Flat-file persistence for history and bookmarks.
//!
//! One record per line:
//!
//! ```text
//! H:home
//! H:google.com
//! B:google.com
//! ```
//!
//! History records come first, head to tail, then bookmark records in
//! pre-order. Every save writes the complete snapshot of both structures.

use std::fmt;
use std::io::Write;
use std::path::{Path, PathBuf};

use surf_types::error::{Result, SurfError};
use tempfile::NamedTempFile;

use crate::bookmarks::BookmarkIndex;
use crate::history::HistoryLog;

const HISTORY_TAG: &str = "H:";
const BOOKMARK_TAG: &str = "B:";

/// One line of the store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Record {
    History(String),
    Bookmark(String),
}

impl Record {
    /// Parse a line (without its newline). Returns `None` for anything that
    /// is not an `H:` or `B:` record.
    pub fn parse(line: &str) -> Option<Self> {
        let line = line.strip_suffix('\r').unwrap_or(line);
        if let Some(url) = line.strip_prefix(HISTORY_TAG) {
            Some(Self::History(url.to_string()))
        } else {
            line.strip_prefix(BOOKMARK_TAG)
                .map(|url| Self::Bookmark(url.to_string()))
        }
    }
}

impl fmt::Display for Record {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::History(url) => write!(f, "{HISTORY_TAG}{url}"),
            Self::Bookmark(url) => write!(f, "{BOOKMARK_TAG}{url}"),
        }
    }
}

/// Render the combined snapshot text.
pub fn encode_snapshot(history: &HistoryLog, bookmarks: &BookmarkIndex) -> String {
    let records = history
        .iter()
        .map(|url| Record::History(url.to_string()))
        .chain(bookmarks.pre_order().map(|url| Record::Bookmark(url.to_string())));
    let mut out = String::new();
    for record in records {
        out.push_str(&record.to_string());
        out.push('\n');
    }
    out
}

/// Rebuild history and bookmarks from snapshot bytes.
///
/// History records are replayed in order with [`HistoryLog::append`] and
/// bookmark records with [`BookmarkIndex::insert_unchecked`], so the tree
/// comes back in the saved shape, duplicates included. Each line is decoded
/// on its own: unknown records and lines that are not UTF-8 are skipped.
pub fn decode_snapshot(bytes: impl AsRef<[u8]>) -> Result<(HistoryLog, BookmarkIndex)> {
    let mut history = HistoryLog::new();
    let mut bookmarks = BookmarkIndex::new();
    for (lineno, raw) in bytes.as_ref().split(|&b| b == b'\n').enumerate() {
        let Ok(line) = std::str::from_utf8(raw) else {
            log::warn!("store line {}: not UTF-8, skipped", lineno + 1);
            continue;
        };
        match Record::parse(line) {
            Some(Record::History(url)) => {
                history.append(&url)?;
            },
            Some(Record::Bookmark(url)) => bookmarks.insert_unchecked(&url),
            None if line.trim().is_empty() => {},
            None => log::warn!("store line {}: unrecognised record skipped", lineno + 1),
        }
    }
    Ok((history, bookmarks))
}

/// The on-disk store.
#[derive(Debug, Clone)]
pub struct SessionStore {
    path: PathBuf,
}

impl SessionStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Replace the store with a snapshot of `history` and `bookmarks`.
    ///
    /// The snapshot goes to a temporary file in the same directory which is
    /// synced and then renamed over the store, so a failed save leaves the
    /// previous store untouched.
    pub fn save(&self, history: &HistoryLog, bookmarks: &BookmarkIndex) -> Result<()> {
        let text = encode_snapshot(history, bookmarks);
        let dir = match self.path.parent() {
            Some(p) if !p.as_os_str().is_empty() => p,
            _ => Path::new("."),
        };

        let mut tmp = NamedTempFile::new_in(dir).map_err(|e| SurfError::store(&self.path, e))?;
        tmp.write_all(text.as_bytes())
            .and_then(|()| tmp.as_file().sync_all())
            .map_err(|e| SurfError::store(&self.path, e))?;
        tmp.persist(&self.path)
            .map_err(|e| SurfError::store(&self.path, e.error))?;

        log::info!(
            "Saved {} history and {} bookmark records to {}",
            history.len(),
            bookmarks.len(),
            self.path.display()
        );
        Ok(())
    }

    /// Read the store. A missing file is an empty session.
    pub fn load(&self) -> Result<(HistoryLog, BookmarkIndex)> {
        let bytes = match std::fs::read(&self.path) {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                log::info!("No store at {}, starting fresh", self.path.display());
                return Ok((HistoryLog::new(), BookmarkIndex::new()));
            },
            Err(e) => return Err(SurfError::store(&self.path, e)),
        };
        let (history, bookmarks) = decode_snapshot(&bytes)?;
        log::info!(
            "Loaded {} history and {} bookmark records from {}",
            history.len(),
            bookmarks.len(),
            self.path.display()
        );
        Ok((history, bookmarks))
    }

    /// Where [`SessionStore::set_aside`] moves an unreadable store.
    pub fn set_aside_path(&self) -> PathBuf {
        let mut name = self.path.as_os_str().to_owned();
        name.push(".unreadable");
        PathBuf::from(name)
    }

    /// Move the store out of the way so the next save cannot overwrite it.
    pub fn set_aside(&self) -> Result<PathBuf> {
        let target = self.set_aside_path();
        std::fs::rename(&self.path, &target).map_err(|e| SurfError::store(&self.path, e))?;
        log::warn!(
            "Moved unreadable store {} to {}",
            self.path.display(),
            target.display()
        );
        Ok(target)
    }
}
