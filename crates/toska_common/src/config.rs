//! Toska configuration
//!
//! Configuration lives in a single TOML file. Every field has a serde
//! default so a partial (or missing) file still produces a usable config.
//!
//! Default location: ~/.config/toska/config.toml

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

const CONFIG_FILE: &str = "config.toml";

/// Application data directory name (under the platform data dir)
const DATA_SUBDIR: &str = "toska";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToskaConfig {
    /// Address the daemon binds to
    #[serde(default = "default_bind_addr")]
    pub bind_addr: String,

    /// Path to the SQLite menu database
    #[serde(default = "default_db_path")]
    pub db_path: PathBuf,

    /// Directory holding tokenizer.json, model_config.json and the
    /// model weight record
    #[serde(default = "default_model_dir")]
    pub model_dir: PathBuf,

    /// Fixed context paragraph the QA model answers from
    #[serde(default = "default_context")]
    pub context: String,

    /// Substrings of user input that trigger the canned menu reply
    /// instead of model inference
    #[serde(default = "default_trigger_keywords")]
    pub trigger_keywords: Vec<String>,

    /// Maximum answer span length in tokens
    #[serde(default = "default_max_answer_tokens")]
    pub max_answer_tokens: usize,

    /// Greeting shown on the chat page before the first question
    #[serde(default = "default_greeting")]
    pub greeting: String,
}

fn default_bind_addr() -> String {
    "127.0.0.1:7870".to_string()
}

fn default_db_path() -> PathBuf {
    data_dir().join("menu.db")
}

fn default_model_dir() -> PathBuf {
    data_dir().join("model")
}

fn default_context() -> String {
    "Our restaurant serves the best Persian and international dishes. \
     The menu includes pizza, salads, soups and a variety of desserts. \
     We are open every day from noon until midnight."
        .to_string()
}

fn default_trigger_keywords() -> Vec<String> {
    vec!["menu".to_string(), "food".to_string()]
}

fn default_max_answer_tokens() -> usize {
    30
}

fn default_greeting() -> String {
    "Please ask your questions about the restaurant's dishes.".to_string()
}

/// Resolve the platform data directory for Toska
fn data_dir() -> PathBuf {
    dirs::data_local_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(DATA_SUBDIR)
}

impl Default for ToskaConfig {
    fn default() -> Self {
        Self {
            bind_addr: default_bind_addr(),
            db_path: default_db_path(),
            model_dir: default_model_dir(),
            context: default_context(),
            trigger_keywords: default_trigger_keywords(),
            max_answer_tokens: default_max_answer_tokens(),
            greeting: default_greeting(),
        }
    }
}

impl ToskaConfig {
    /// Default config file path
    pub fn default_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(DATA_SUBDIR)
            .join(CONFIG_FILE)
    }

    /// Load configuration.
    ///
    /// A missing file yields defaults; a file that exists but fails to
    /// parse is an error so typos do not silently revert settings.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let path = path
            .map(Path::to_path_buf)
            .unwrap_or_else(Self::default_path);

        if !path.exists() {
            return Ok(Self::default());
        }

        let raw = fs::read_to_string(&path)
            .with_context(|| format!("Failed to read config: {}", path.display()))?;
        toml::from_str(&raw)
            .with_context(|| format!("Failed to parse config: {}", path.display()))
    }

    /// Write the configuration back out, creating parent directories.
    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
        }
        let raw = toml::to_string_pretty(self)?;
        fs::write(path, raw)
            .with_context(|| format!("Failed to write config: {}", path.display()))
    }
}
