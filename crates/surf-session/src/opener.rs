//! Handing visited pages to an external browser.

use std::process::{Command, Stdio};

use surf_types::config::Launcher;
use surf_types::error::{Result, SurfError};

use crate::url::external_form;

/// Opens a URL outside the session. Fire-and-forget: callers only log
/// failures.
pub trait UrlOpener {
    fn open(&self, url: &str) -> Result<()>;

    /// Change the external program. Openers without a choice ignore it.
    fn set_launcher(&mut self, _launcher: Launcher) {}

    fn launcher(&self) -> Launcher {
        Launcher::None
    }
}

/// Never opens anything.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopOpener;

impl UrlOpener for NoopOpener {
    fn open(&self, _url: &str) -> Result<()> {
        Ok(())
    }
}

/// Spawns the platform opener or a named browser without waiting for it.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemOpener {
    launcher: Launcher,
}

impl SystemOpener {
    pub fn new(launcher: Launcher) -> Self {
        Self { launcher }
    }

    /// Program and arguments used to open `url`, or `None` when opening is
    /// switched off.
    pub fn command_line(&self, url: &str) -> Option<(String, Vec<String>)> {
        let url = external_form(url);
        let (program, mut args): (&str, Vec<&str>) = match self.launcher {
            Launcher::None => return None,
            Launcher::Default => default_program(),
            Launcher::Edge => edge_program(),
            Launcher::Chrome => chrome_program(),
        };
        args.push(&url);
        Some((
            program.to_string(),
            args.into_iter().map(str::to_string).collect(),
        ))
    }
}

#[cfg(target_os = "windows")]
fn default_program() -> (&'static str, Vec<&'static str>) {
    ("cmd", vec!["/C", "start", ""])
}

#[cfg(target_os = "macos")]
fn default_program() -> (&'static str, Vec<&'static str>) {
    ("open", vec![])
}

#[cfg(not(any(target_os = "windows", target_os = "macos")))]
fn default_program() -> (&'static str, Vec<&'static str>) {
    ("xdg-open", vec![])
}

#[cfg(target_os = "windows")]
fn edge_program() -> (&'static str, Vec<&'static str>) {
    ("cmd", vec!["/C", "start", "msedge"])
}

#[cfg(target_os = "macos")]
fn edge_program() -> (&'static str, Vec<&'static str>) {
    ("open", vec!["-a", "Microsoft Edge"])
}

#[cfg(not(any(target_os = "windows", target_os = "macos")))]
fn edge_program() -> (&'static str, Vec<&'static str>) {
    ("microsoft-edge", vec![])
}

#[cfg(target_os = "windows")]
fn chrome_program() -> (&'static str, Vec<&'static str>) {
    ("cmd", vec!["/C", "start", "chrome"])
}

#[cfg(target_os = "macos")]
fn chrome_program() -> (&'static str, Vec<&'static str>) {
    ("open", vec!["-a", "Google Chrome"])
}

#[cfg(not(any(target_os = "windows", target_os = "macos")))]
fn chrome_program() -> (&'static str, Vec<&'static str>) {
    ("google-chrome", vec![])
}

impl UrlOpener for SystemOpener {
    fn open(&self, url: &str) -> Result<()> {
        let Some((program, args)) = self.command_line(url) else {
            return Ok(());
        };
        log::debug!("opening {url} with {program} {args:?}");
        Command::new(&program)
            .args(&args)
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .spawn()
            .map_err(|e| SurfError::Command(format!("failed to run {program}: {e}")))?;
        Ok(())
    }

    fn set_launcher(&mut self, launcher: Launcher) {
        self.launcher = launcher;
    }

    fn launcher(&self) -> Launcher {
        self.launcher
    }
}
