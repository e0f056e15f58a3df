//! Configuration for the extraction engine.
//!
//! Settings are read from `~/.config/revex/config.toml` at startup. If the
//! file doesn't exist, a default configuration with comments is created.
//! Missing keys fall back to their defaults.

use serde::{Deserialize, Serialize};
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Engine configuration: session, redirect, scan, and fallback knobs plus
/// the structural markers used to locate review content.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Whether to run the browser in headless mode (default: true)
    pub headless: bool,

    /// How many browser sessions may exist at once (default: 2)
    pub max_sessions: usize,

    /// Maximum wait for a shortcut link's client-side redirect in seconds
    /// (default: 10)
    pub redirect_timeout_secs: u64,

    /// Poll interval for the page URL during the redirect wait in
    /// milliseconds (default: 250)
    pub redirect_poll_ms: u64,

    /// Wait after navigation before reading the DOM in milliseconds
    /// (default: 3000)
    pub settle_after_nav_ms: u64,

    /// Wait after each scroll before re-parsing the feed in milliseconds
    /// (default: 2000)
    pub settle_after_scroll_ms: u64,

    /// Upper bound on scroll-and-reparse cycles during a feed scan
    /// (default: 10)
    pub max_scroll_iterations: u32,

    /// Timeout for the static fallback fetch in seconds (default: 10)
    pub fallback_timeout_secs: u64,

    /// User-Agent for the browser and the fallback fetcher
    pub user_agent: Option<String>,

    /// CSS selector for one review block in a feed
    pub feed_block_selector: String,

    /// CSS selector for the store-name label, relative to a block
    pub store_label_selector: String,

    /// CSS selector for the review-body element
    pub review_text_selector: String,

    /// CSS selector for the visit/receipt date element
    pub visit_date_selector: String,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            headless: true,
            max_sessions: 2,
            redirect_timeout_secs: 10,
            redirect_poll_ms: 250,
            settle_after_nav_ms: 3000,
            settle_after_scroll_ms: 2000,
            max_scroll_iterations: 10,
            fallback_timeout_secs: 10,
            user_agent: Some(
                "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_7) AppleWebKit/537.36 \
                 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36"
                    .to_string(),
            ),
            feed_block_selector: "li.review-item".to_string(),
            store_label_selector: ".store-name".to_string(),
            review_text_selector: "a.review-text[role=\"button\"]".to_string(),
            visit_date_selector: "time".to_string(),
        }
    }
}

impl EngineConfig {
    pub fn redirect_timeout(&self) -> Duration {
        Duration::from_secs(self.redirect_timeout_secs)
    }

    pub fn redirect_poll(&self) -> Duration {
        Duration::from_millis(self.redirect_poll_ms)
    }

    pub fn settle_after_nav(&self) -> Duration {
        Duration::from_millis(self.settle_after_nav_ms)
    }

    pub fn settle_after_scroll(&self) -> Duration {
        Duration::from_millis(self.settle_after_scroll_ms)
    }

    pub fn fallback_timeout(&self) -> Duration {
        Duration::from_secs(self.fallback_timeout_secs)
    }

    /// Config with shorter waits, for operators who prefer speed over
    /// resilience against slow-rendering pages.
    pub fn fast() -> Self {
        Self {
            redirect_timeout_secs: 5,
            settle_after_nav_ms: 1000,
            settle_after_scroll_ms: 500,
            ..Default::default()
        }
    }

    /// Load configuration from the default path.
    ///
    /// If the config file doesn't exist, creates a default one with
    /// comments. Missing fields use default values.
    pub fn load() -> Result<Self, ConfigError> {
        let config_path = Self::default_config_path()?;
        Self::load_from(&config_path)
    }

    /// Load configuration from an explicit path, creating a commented
    /// default file there if none exists.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            Self::create_default_config(path)?;
            return Ok(Self::default());
        }

        let content = fs::read_to_string(path).map_err(|e| ConfigError::Io {
            path: path.to_path_buf(),
            source: e,
        })?;

        let config: EngineConfig = toml::from_str(&content).map_err(|e| ConfigError::Parse {
            path: path.to_path_buf(),
            source: e,
        })?;

        Ok(config)
    }

    /// Get the default config file path: `~/.config/revex/config.toml`
    pub fn default_config_path() -> Result<PathBuf, ConfigError> {
        let config_dir = dirs::config_dir().ok_or(ConfigError::NoConfigDir)?;
        Ok(config_dir.join("revex").join("config.toml"))
    }

    fn create_default_config(path: &Path) -> Result<(), ConfigError> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(|e| ConfigError::Io {
                path: parent.to_path_buf(),
                source: e,
            })?;
        }

        let default_config = Self::default_config_content();

        let mut file = fs::File::create(path).map_err(|e| ConfigError::Io {
            path: path.to_path_buf(),
            source: e,
        })?;

        file.write_all(default_config.as_bytes())
            .map_err(|e| ConfigError::Io {
                path: path.to_path_buf(),
                source: e,
            })?;

        Ok(())
    }

    /// Generate the default config file content with comments.
    fn default_config_content() -> String {
        r##"# revex configuration
#
# Extraction engine settings. Missing keys fall back to their defaults,
# so this file may list only the values you want to change.

# Run the browser in headless mode (no visible window)
headless = true

# How many browser sessions may exist at once. Each session is a whole
# browser process; jobs beyond this bound wait for a free slot.
max_sessions = 2

# Maximum wait for a shortcut link's client-side redirect (seconds)
redirect_timeout_secs = 10

# Poll interval for the page URL during the redirect wait (milliseconds)
redirect_poll_ms = 250

# Wait after navigation before reading the DOM (milliseconds)
settle_after_nav_ms = 3000

# Wait after each scroll before re-parsing the feed (milliseconds)
settle_after_scroll_ms = 2000

# Upper bound on scroll-and-reparse cycles during a feed scan
max_scroll_iterations = 10

# Timeout for the static fallback fetch (seconds)
fallback_timeout_secs = 10

# User-Agent for the browser and the fallback fetcher
# user_agent = "Mozilla/5.0 ..."

# Structural markers for review content
feed_block_selector = "li.review-item"
store_label_selector = ".store-name"
review_text_selector = "a.review-text[role=\"button\"]"
visit_date_selector = "time"
"##
        .to_string()
    }
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Could not determine config directory")]
    NoConfigDir,

    #[error("Failed to read/write config file at {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to parse config file at {path}: {source}")]
    Parse {
        path: PathBuf,
        source: toml::de::Error,
    },
}
