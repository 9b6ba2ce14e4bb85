//! Settings file and data directory resolution.
//!
//! Settings are read from `--config` or the platform configuration folder:
//! - macOS: ~/Library/Application Support/org.drg-workbench.DRG Workbench/
//! - Windows: %APPDATA%/drg-workbench/DRG Workbench/config/
//! - Linux: ~/.config/drgworkbench/
//!
//! ```toml
//! data_dir = "/var/lib/drg"
//!
//! [extractor]
//! kind = "remote"
//! base_url = "https://api.openai.com/v1"
//! model = "gpt-4o-mini"
//! api_key_env = "OPENAI_API_KEY"
//! timeout_secs = 30
//! ```

use std::ffi::OsString;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Context, Result};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};

use drg_extract::{Extractor, HeuristicExtractor, RemoteConfig, RemoteExtractor};

const APP_QUALIFIER: &str = "org";
const APP_ORG: &str = "drg-workbench";
const APP_NAME: &str = "DRG Workbench";
const CONFIG_FILENAME: &str = "settings.toml";

/// Environment variable overriding the data directory.
pub const DATA_DIR_ENV: &str = "DRG_DATA_DIR";

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub data_dir: Option<PathBuf>,
    pub extractor: ExtractorSettings,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExtractorKind {
    #[default]
    Heuristic,
    Remote,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExtractorSettings {
    pub kind: ExtractorKind,
    pub base_url: String,
    pub model: String,
    /// Name of the environment variable holding the API key.
    pub api_key_env: Option<String>,
    pub timeout_secs: u64,
}

impl Default for ExtractorSettings {
    fn default() -> Self {
        Self {
            kind: ExtractorKind::Heuristic,
            base_url: "https://api.openai.com/v1".to_string(),
            model: "gpt-4o-mini".to_string(),
            api_key_env: Some("OPENAI_API_KEY".to_string()),
            timeout_secs: 30,
        }
    }
}

impl ExtractorSettings {
    /// Build the configured extractor.
    pub fn build(&self) -> Result<Box<dyn Extractor>> {
        match self.kind {
            ExtractorKind::Heuristic => Ok(Box::new(HeuristicExtractor::new())),
            ExtractorKind::Remote => {
                let api_key = self
                    .api_key_env
                    .as_deref()
                    .and_then(|name| std::env::var(name).ok())
                    .filter(|key| !key.is_empty());
                if api_key.is_none() {
                    tracing::warn!(env = ?self.api_key_env, "no API key found for remote extractor");
                }
                let extractor = RemoteExtractor::new(RemoteConfig {
                    base_url: self.base_url.clone(),
                    model: self.model.clone(),
                    api_key,
                    timeout: Duration::from_secs(self.timeout_secs),
                })
                .context("build remote extractor")?;
                Ok(Box::new(extractor))
            }
        }
    }
}

fn project_dirs() -> Option<ProjectDirs> {
    ProjectDirs::from(APP_QUALIFIER, APP_ORG, APP_NAME)
}

/// Default settings file location, if the platform has one.
pub fn settings_path() -> Option<PathBuf> {
    project_dirs().map(|dirs| dirs.config_dir().join(CONFIG_FILENAME))
}

pub fn parse_settings(text: &str) -> Result<Settings> {
    toml::from_str(text).context("parse settings")
}

/// Load settings from `explicit`, or from the default location.
///
/// An explicit path must exist. A missing default file yields defaults.
pub fn load_settings(explicit: Option<&Path>) -> Result<Settings> {
    let (path, required) = match explicit {
        Some(path) => (path.to_path_buf(), true),
        None => match settings_path() {
            Some(path) => (path, false),
            None => {
                tracing::warn!("could not determine settings path, using defaults");
                return Ok(Settings::default());
            }
        },
    };

    match fs::read_to_string(&path) {
        Ok(text) => {
            let settings =
                parse_settings(&text).with_context(|| format!("in {}", path.display()))?;
            tracing::debug!(path = %path.display(), "loaded settings");
            Ok(settings)
        }
        Err(e) if e.kind() == std::io::ErrorKind::NotFound && !required => {
            tracing::debug!(path = %path.display(), "no settings file, using defaults");
            Ok(Settings::default())
        }
        Err(e) => Err(e).with_context(|| format!("read settings {}", path.display())),
    }
}

/// Pick the data directory.
///
/// Precedence: command-line flag, `DRG_DATA_DIR`, settings file, platform
/// data folder, then `./drg-data`.
pub fn resolve_data_dir(
    flag: Option<&Path>,
    env: Option<OsString>,
    settings: &Settings,
) -> PathBuf {
    if let Some(path) = flag {
        return path.to_path_buf();
    }
    if let Some(value) = env.filter(|value| !value.is_empty()) {
        return PathBuf::from(value);
    }
    if let Some(path) = &settings.data_dir {
        return path.clone();
    }
    project_dirs()
        .map(|dirs| dirs.data_dir().to_path_buf())
        .unwrap_or_else(|| PathBuf::from("drg-data"))
}
