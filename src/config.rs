//! Configuration file support.
//!
//! TOML configuration is read from, lowest priority first:
//! - XDG config: `~/.config/wardrobe/config.toml`
//! - Project-local: `.wardrobe.toml` (searched up the directory tree)
//! - An explicit `--config` file
//!
//! CLI flags are applied on top by the command handlers.

use std::num::NonZeroUsize;
use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::Deserialize;
use tracing::{debug, info, warn};

use crate::error::AppError;

pub const DEFAULT_API_KEY_ENV: &str = "WARDROBE_API_KEY";
pub const DEFAULT_TIMEOUT_SECS: u64 = 60;
pub const DEFAULT_SELECTION_LIMIT: usize = 10;

/// Top-level configuration structure.
#[derive(Debug, Default, Clone, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Hosted classifier settings.
    pub classifier: ClassifierConfig,
    /// Local wardrobe settings.
    pub wardrobe: WardrobeConfig,
}

#[derive(Debug, Default, Clone, Deserialize)]
#[serde(default)]
pub struct ClassifierConfig {
    /// URL of the structured-object endpoint.
    pub endpoint: Option<String>,
    /// Name of the environment variable holding the API key.
    pub api_key_env: Option<String>,
    /// Per-request timeout in seconds.
    pub timeout_secs: Option<u64>,
    /// Upper bound on concurrent requests; unbounded when absent.
    pub max_concurrency: Option<usize>,
}

#[derive(Debug, Default, Clone, Deserialize)]
#[serde(default)]
pub struct WardrobeConfig {
    /// SQLite file holding the wardrobe.
    pub db_path: Option<PathBuf>,
    /// Maximum number of images accepted in one batch.
    pub selection_limit: Option<usize>,
}

impl AppConfig {
    /// Load configuration from XDG, project-local and explicit files.
    ///
    /// Missing XDG/project files are silently ignored; a missing or invalid
    /// explicit file is an error. Out-of-range values are logged and dropped.
    pub fn load(explicit: Option<&Path>) -> Result<Self, AppError> {
        let mut config = Self::default();

        if let Some(xdg_path) = xdg_config_path() {
            if xdg_path.exists() {
                info!("Loading XDG config: {}", xdg_path.display());
                if let Some(xdg_config) = load_file(&xdg_path) {
                    config = xdg_config;
                }
            } else {
                debug!("XDG config not found: {}", xdg_path.display());
            }
        }

        if let Some(project_path) = find_project_config() {
            info!("Loading project config: {}", project_path.display());
            if let Some(project_config) = load_file(&project_path) {
                config.merge(project_config);
            }
        }

        if let Some(path) = explicit {
            info!("Loading config: {}", path.display());
            let content = std::fs::read_to_string(path).map_err(|e| AppError {
                message: format!("Failed to read config file {}: {}", path.display(), e),
            })?;
            config.merge(toml::from_str(&content)?);
        }

        config.sanitize();
        Ok(config)
    }

    /// Validate configuration values are within acceptable ranges.
    fn validate(&self) -> Vec<String> {
        let mut problems = Vec::new();

        if let Some(ref endpoint) = self.classifier.endpoint {
            if !endpoint.starts_with("http://") && !endpoint.starts_with("https://") {
                problems.push(format!(
                    "classifier.endpoint must be an http(s) URL, got '{endpoint}'"
                ));
            }
        }
        if self.classifier.timeout_secs == Some(0) {
            problems.push("classifier.timeout_secs must be greater than 0".to_string());
        }
        if self.classifier.max_concurrency == Some(0) {
            problems.push("classifier.max_concurrency must be greater than 0".to_string());
        }
        if self.wardrobe.selection_limit == Some(0) {
            problems.push("wardrobe.selection_limit must be greater than 0".to_string());
        }

        problems
    }

    /// Replace invalid values with their defaults, warning about each.
    fn sanitize(&mut self) {
        for problem in self.validate() {
            warn!("{problem}; using default");
        }
        if let Some(ref endpoint) = self.classifier.endpoint {
            if !endpoint.starts_with("http://") && !endpoint.starts_with("https://") {
                self.classifier.endpoint = None;
            }
        }
        self.classifier.timeout_secs = self.classifier.timeout_secs.filter(|&t| t > 0);
        self.classifier.max_concurrency = self.classifier.max_concurrency.filter(|&n| n > 0);
        self.wardrobe.selection_limit = self.wardrobe.selection_limit.filter(|&n| n > 0);
    }

    /// Merge another config into this one.
    /// Values from `other` override values in `self` when present.
    fn merge(&mut self, other: Self) {
        self.classifier.endpoint = other
            .classifier
            .endpoint
            .or_else(|| self.classifier.endpoint.take());
        self.classifier.api_key_env = other
            .classifier
            .api_key_env
            .or_else(|| self.classifier.api_key_env.take());
        self.classifier.timeout_secs = other.classifier.timeout_secs.or(self.classifier.timeout_secs);
        self.classifier.max_concurrency = other
            .classifier
            .max_concurrency
            .or(self.classifier.max_concurrency);

        self.wardrobe.db_path = other.wardrobe.db_path.or_else(|| self.wardrobe.db_path.take());
        self.wardrobe.selection_limit = other
            .wardrobe
            .selection_limit
            .or(self.wardrobe.selection_limit);
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.classifier.timeout_secs.unwrap_or(DEFAULT_TIMEOUT_SECS))
    }

    pub fn max_concurrency(&self) -> Option<NonZeroUsize> {
        self.classifier.max_concurrency.and_then(NonZeroUsize::new)
    }

    pub fn selection_limit(&self) -> usize {
        self.wardrobe.selection_limit.unwrap_or(DEFAULT_SELECTION_LIMIT)
    }

    /// API key read from the configured environment variable, if set.
    pub fn api_key(&self) -> Option<String> {
        let var = self
            .classifier
            .api_key_env
            .as_deref()
            .unwrap_or(DEFAULT_API_KEY_ENV);
        std::env::var(var).ok()
    }

    pub fn db_path(&self) -> Result<PathBuf, AppError> {
        if let Some(ref path) = self.wardrobe.db_path {
            return Ok(path.clone());
        }
        dirs::data_dir()
            .map(|d| d.join("wardrobe").join("wardrobe.db"))
            .ok_or_else(|| "Cannot determine data directory; set wardrobe.db_path".into())
    }
}

/// Get the XDG config file path.
fn xdg_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join("wardrobe").join("config.toml"))
}

/// Find project-local config by searching up from current directory.
fn find_project_config() -> Option<PathBuf> {
    let cwd = std::env::current_dir().ok()?;
    find_config_in_parents(&cwd)
}

/// Search for `.wardrobe.toml` in the given directory and its parents.
fn find_config_in_parents(start: &Path) -> Option<PathBuf> {
    start
        .ancestors()
        .map(|dir| dir.join(".wardrobe.toml"))
        .find(|path| path.exists())
}

/// Load and parse a TOML config file.
fn load_file(path: &Path) -> Option<AppConfig> {
    let content = match std::fs::read_to_string(path) {
        Ok(c) => c,
        Err(e) => {
            warn!("Failed to read config file {}: {}", path.display(), e);
            return None;
        }
    };

    match toml::from_str(&content) {
        Ok(config) => Some(config),
        Err(e) => {
            warn!("Failed to parse config file {}: {}", path.display(), e);
            None
        }
    }
}
