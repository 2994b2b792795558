//! Session configuration loaded from `surf.toml`.
//!
//! ```toml
//! store_path = "browser_data.txt"
//! home_url = "home"
//! launcher = "default"   # default | edge | chrome | none
//! theme = "default"      # default | dark | light
//! ```

use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{Result, SurfError};

/// Default config file name looked up in the working directory.
pub const CONFIG_FILE: &str = "surf.toml";

/// Environment variable naming an explicit config file.
pub const CONFIG_ENV: &str = "SURF_CONFIG";

/// External program used to open visited pages.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Launcher {
    /// Platform default handler (`xdg-open`, `open`, `start`).
    #[default]
    Default,
    /// Microsoft Edge.
    Edge,
    /// Google Chrome.
    Chrome,
    /// Never open pages externally.
    None,
}

impl fmt::Display for Launcher {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Default => write!(f, "Default"),
            Self::Edge => write!(f, "Microsoft Edge"),
            Self::Chrome => write!(f, "Google Chrome"),
            Self::None => write!(f, "None"),
        }
    }
}

impl FromStr for Launcher {
    type Err = SurfError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "default" | "0" => Ok(Self::Default),
            "edge" | "1" => Ok(Self::Edge),
            "chrome" | "2" => Ok(Self::Chrome),
            "none" | "off" => Ok(Self::None),
            other => Err(SurfError::Config(format!("unknown launcher '{other}'"))),
        }
    }
}

/// Terminal colour theme.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    /// Cyan headers, yellow text.
    #[default]
    Default,
    /// Blue headers, cyan text.
    Dark,
    /// Green headers, magenta text.
    Light,
}

impl fmt::Display for Theme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Default => write!(f, "Default"),
            Self::Dark => write!(f, "Dark"),
            Self::Light => write!(f, "Light"),
        }
    }
}

impl FromStr for Theme {
    type Err = SurfError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "default" | "0" => Ok(Self::Default),
            "dark" | "1" => Ok(Self::Dark),
            "light" | "2" => Ok(Self::Light),
            other => Err(SurfError::Config(format!("unknown theme '{other}'"))),
        }
    }
}

/// Top-level configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SurfConfig {
    /// Path of the persisted history/bookmark store.
    #[serde(default = "default_store_path")]
    pub store_path: PathBuf,
    /// URL visited on startup and by the `home` command.
    #[serde(default = "default_home_url")]
    pub home_url: String,
    #[serde(default)]
    pub launcher: Launcher,
    #[serde(default)]
    pub theme: Theme,
}

fn default_store_path() -> PathBuf {
    PathBuf::from("browser_data.txt")
}

fn default_home_url() -> String {
    "home".to_string()
}

impl Default for SurfConfig {
    fn default() -> Self {
        Self {
            store_path: default_store_path(),
            home_url: default_home_url(),
            launcher: Launcher::default(),
            theme: Theme::default(),
        }
    }
}

impl SurfConfig {
    /// Parse a config from TOML text. Missing keys take their defaults.
    pub fn from_toml(text: &str) -> Result<Self> {
        let cfg: Self = toml::from_str(text)?;
        if cfg.home_url.is_empty() {
            return Err(SurfError::Config("home_url must not be empty".into()));
        }
        Ok(cfg)
    }

    /// Read and parse a config file.
    pub fn from_file(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)?;
        let cfg = Self::from_toml(&text)?;
        log::info!("Loaded config from {}", path.display());
        Ok(cfg)
    }

    /// Resolve the config: explicit path, then `$SURF_CONFIG`, then
    /// `surf.toml` in the working directory, else defaults.
    pub fn resolve(explicit: Option<&Path>) -> Result<Self> {
        if let Some(path) = explicit {
            return Self::from_file(path);
        }
        if let Ok(path) = std::env::var(CONFIG_ENV) {
            return Self::from_file(Path::new(&path));
        }
        let local = Path::new(CONFIG_FILE);
        if local.exists() {
            return Self::from_file(local);
        }
        log::debug!("No config file found, using defaults");
        Ok(Self::default())
    }
}
