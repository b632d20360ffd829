//! Application configuration management
//!
//! Handles loading and saving user settings:
//! - Chat model selection
//! - Commit message style

use std::fs;
use std::path::PathBuf;

use directories::ProjectDirs;
use serde::{Deserialize, Serialize};

use crate::ai::prompts::CommitStyle;
use crate::error::{LazyCommitError, Result};

/// Overrides the directory holding `config.toml`
pub const CONFIG_DIR_ENV: &str = "LAZYCOMMIT_CONFIG_DIR";

/// Model used when nothing is configured
pub const DEFAULT_MODEL: &str = "gpt-4o-mini";

/// Models offered by the selection command
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ChatModel {
    /// GPT-4o mini (default)
    #[default]
    Gpt4oMini,
    /// GPT-4o
    Gpt4o,
    /// GPT-4.1
    Gpt41,
    /// GPT-4.1 mini
    Gpt41Mini,
    /// GPT-4.1 nano
    Gpt41Nano,
    /// o4-mini
    O4Mini,
}

impl ChatModel {
    /// Get the API model identifier
    pub fn api_name(&self) -> &'static str {
        match self {
            ChatModel::Gpt4oMini => "gpt-4o-mini",
            ChatModel::Gpt4o => "gpt-4o",
            ChatModel::Gpt41 => "gpt-4.1",
            ChatModel::Gpt41Mini => "gpt-4.1-mini",
            ChatModel::Gpt41Nano => "gpt-4.1-nano",
            ChatModel::O4Mini => "o4-mini",
        }
    }

    /// Get a human-readable display name
    pub fn display_name(&self) -> &'static str {
        match self {
            ChatModel::Gpt4oMini => "GPT-4o mini",
            ChatModel::Gpt4o => "GPT-4o",
            ChatModel::Gpt41 => "GPT-4.1",
            ChatModel::Gpt41Mini => "GPT-4.1 mini",
            ChatModel::Gpt41Nano => "GPT-4.1 nano",
            ChatModel::O4Mini => "o4-mini",
        }
    }

    /// Parse from string
    pub fn from_str(s: &str) -> Option<Self> {
        Self::all().iter().copied().find(|m| m.api_name() == s)
    }

    /// Get all available models
    pub fn all() -> &'static [ChatModel] {
        &[
            ChatModel::Gpt4oMini,
            ChatModel::Gpt4o,
            ChatModel::Gpt41,
            ChatModel::Gpt41Mini,
            ChatModel::Gpt41Nano,
            ChatModel::O4Mini,
        ]
    }
}

impl std::fmt::Display for ChatModel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.api_name())
    }
}

/// Application configuration
///
/// Values are kept as plain strings so a hand-edited file with an unknown
/// value still loads; the typed accessors apply the fallbacks.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    /// Model identifier sent with each completion request
    #[serde(default = "default_model")]
    pub model: String,

    /// Commit style identifier (`default`, `simple` or `short`)
    #[serde(default = "default_commit_format")]
    pub commit_format: String,
}

fn default_model() -> String {
    DEFAULT_MODEL.to_string()
}

fn default_commit_format() -> String {
    CommitStyle::default().id().to_string()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            model: default_model(),
            commit_format: default_commit_format(),
        }
    }
}

impl Config {
    /// Load configuration from file, or create default if not exists
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_path()?)
    }

    /// Load configuration from an explicit file
    pub fn load_from(path: &std::path::Path) -> Result<Self> {
        if path.exists() {
            let contents = fs::read_to_string(path)?;
            let config: Config = toml::from_str(&contents)?;
            Ok(config)
        } else {
            Ok(Config::default())
        }
    }

    /// Save configuration to file
    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::config_path()?)
    }

    /// Save configuration to an explicit file
    pub fn save_to(&self, path: &std::path::Path) -> Result<()> {
        // Ensure parent directory exists
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }

        let contents = toml::to_string_pretty(self)?;
        fs::write(path, contents)?;

        Ok(())
    }

    /// Get the configuration file path
    pub fn config_path() -> Result<PathBuf> {
        Ok(Self::config_dir()?.join("config.toml"))
    }

    /// Get the configuration directory
    pub fn config_dir() -> Result<PathBuf> {
        if let Ok(dir) = std::env::var(CONFIG_DIR_ENV) {
            if !dir.is_empty() {
                return Ok(PathBuf::from(dir));
            }
        }

        let project_dirs = ProjectDirs::from("com", "lazycommit", "lazycommit").ok_or_else(|| {
            LazyCommitError::Config("Could not determine config directory".into())
        })?;

        Ok(project_dirs.config_dir().to_path_buf())
    }

    /// Configured model, or the default when the value is blank
    pub fn model(&self) -> &str {
        if self.model.trim().is_empty() {
            DEFAULT_MODEL
        } else {
            &self.model
        }
    }

    /// Configured commit style; unknown identifiers fall back to `default`
    pub fn commit_style(&self) -> CommitStyle {
        CommitStyle::from_id(&self.commit_format)
    }

    /// Set the chat model
    pub fn set_model(&mut self, model: ChatModel) {
        self.model = model.api_name().to_string();
    }

    /// Set the commit style
    pub fn set_commit_style(&mut self, style: CommitStyle) {
        self.commit_format = style.id().to_string();
    }
}

/// Where settings are read from and written to.
///
/// Settings are loaded fresh on every command.
pub trait SettingsStore {
    /// Read the current configuration
    fn load(&self) -> Result<Config>;

    /// Persist the configuration
    fn save(&self, config: &Config) -> Result<()>;
}

/// TOML file backed settings
#[derive(Debug, Clone)]
pub struct FileSettings {
    path: PathBuf,
}

impl FileSettings {
    /// Settings at the default config path
    pub fn new() -> Result<Self> {
        Ok(Self {
            path: Config::config_path()?,
        })
    }

    /// Settings at an explicit path
    pub fn at(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &std::path::Path {
        &self.path
    }
}

impl SettingsStore for FileSettings {
    fn load(&self) -> Result<Config> {
        Config::load_from(&self.path)
    }

    fn save(&self, config: &Config) -> Result<()> {
        config.save_to(&self.path)
    }
}

/// Process-local settings, used by tests and headless embedding
#[derive(Debug, Default)]
pub struct MemorySettings {
    config: std::sync::Mutex<Config>,
}

impl MemorySettings {
    pub fn new(config: Config) -> Self {
        Self {
            config: std::sync::Mutex::new(config),
        }
    }
}

impl SettingsStore for MemorySettings {
    fn load(&self) -> Result<Config> {
        self.config
            .lock()
            .map(|c| c.clone())
            .map_err(|e| LazyCommitError::Config(e.to_string()))
    }

    fn save(&self, config: &Config) -> Result<()> {
        let mut guard = self
            .config
            .lock()
            .map_err(|e| LazyCommitError::Config(e.to_string()))?;
        *guard = config.clone();
        Ok(())
    }
}
