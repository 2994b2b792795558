//! Shared test utilities for the session engine.
//!
//! Provides a [`RecordingOpener`] that remembers every URL handed to it, and
//! helpers to build a session over a temporary store.

use std::cell::RefCell;
use std::rc::Rc;

use surf_types::config::Launcher;
use surf_types::error::{Result, SurfError};

use crate::content::DemoContent;
use crate::opener::UrlOpener;
use crate::session::Session;
use crate::store::SessionStore;

/// An opener that records calls instead of spawning anything.
#[derive(Clone, Default)]
pub struct RecordingOpener {
    pub opened: Rc<RefCell<Vec<String>>>,
    pub fail: bool,
    launcher: Launcher,
}

impl RecordingOpener {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Self::default()
        }
    }

    pub fn opened(&self) -> Vec<String> {
        self.opened.borrow().clone()
    }
}

impl UrlOpener for RecordingOpener {
    fn open(&self, url: &str) -> Result<()> {
        self.opened.borrow_mut().push(url.to_string());
        if self.fail {
            return Err(SurfError::Command("opener unavailable".into()));
        }
        Ok(())
    }

    fn set_launcher(&mut self, launcher: Launcher) {
        self.launcher = launcher;
    }

    fn launcher(&self) -> Launcher {
        self.launcher
    }
}

/// A fresh session persisting into `dir`, plus a handle on its opener.
pub fn session_in(dir: &tempfile::TempDir) -> (Session, RecordingOpener) {
    let opener = RecordingOpener::new();
    let store = SessionStore::new(dir.path().join("browser_data.txt"));
    let session = Session::new(store, Box::new(DemoContent), Box::new(opener.clone()));
    (session, opener)
}
