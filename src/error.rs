//! Custom error types for lazycommit
//!
//! User-friendly error messages for all failure scenarios.

use thiserror::Error;

/// Main error type for the lazycommit application
#[derive(Error, Debug)]
pub enum LazyCommitError {
    /// Token rejected by the models catalog endpoint
    #[error("Invalid GitHub token. Please check and try again.")]
    InvalidToken,

    /// Non-success HTTP status from GitHub Models
    #[error("GitHub API Error ({status}): {body}")]
    Api {
        /// HTTP status code
        status: u16,
        /// Raw response body
        body: String,
    },

    /// Completion response had no usable content
    #[error("No response received from GitHub Models")]
    NoResponse,

    /// Credential storage error
    #[error("Cannot access secure storage: {0}\n\n  → On macOS: Make sure Keychain Access is available.\n  → On Linux: Ensure a secret service (like gnome-keyring) is running.")]
    Credential(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// IO error
    #[error("File operation failed: {0}")]
    Io(#[from] std::io::Error),

    /// Network request error
    #[error("Network request failed: {0}\n\n  → Check your internet connection.")]
    Network(#[from] reqwest::Error),

    /// JSON serialization/deserialization error
    #[error("Failed to parse response: {0}")]
    Json(#[from] serde_json::Error),

    /// TOML serialization/deserialization error
    #[error("Configuration file is invalid: {0}")]
    Toml(String),

    /// Interactive prompt failed (usually no terminal attached)
    #[error("Prompt failed: {0}\n\n  → Run lazycommit from an interactive terminal.")]
    Prompt(String),
}

/// Failure causes of the staged-changes reader.
///
/// These never reach the user; the reader collapses them into "no diff".
#[derive(Error, Debug)]
pub enum GitError {
    /// No explicit path and no workspace root to run in
    #[error("no workspace folder is open")]
    NoWorkspace,

    /// `git` is not on PATH
    #[error("git executable not found")]
    NotInstalled,

    /// Working directory is not inside a repository
    #[error("not a git repository: {0}")]
    NotRepository(String),

    /// git exited with a failure status
    #[error("git {args} failed ({status}): {stderr}")]
    CommandFailed {
        args: String,
        status: String,
        stderr: String,
    },

    /// Process could not be spawned
    #[error("failed to run git: {0}")]
    Spawn(#[from] std::io::Error),
}

impl From<keyring::Error> for LazyCommitError {
    fn from(err: keyring::Error) -> Self {
        LazyCommitError::Credential(err.to_string())
    }
}

impl From<toml::de::Error> for LazyCommitError {
    fn from(err: toml::de::Error) -> Self {
        LazyCommitError::Toml(err.to_string())
    }
}

impl From<toml::ser::Error> for LazyCommitError {
    fn from(err: toml::ser::Error) -> Self {
        LazyCommitError::Toml(err.to_string())
    }
}

impl From<dialoguer::Error> for LazyCommitError {
    fn from(err: dialoguer::Error) -> Self {
        LazyCommitError::Prompt(err.to_string())
    }
}

/// Result type alias using LazyCommitError
pub type Result<T> = std::result::Result<T, LazyCommitError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_api_error_carries_status_and_body() {
        let err = LazyCommitError::Api {
            status: 429,
            body: "rate limited".to_string(),
        };
        let msg = err.to_string();
        assert!(msg.contains("429"));
        assert!(msg.contains("rate limited"));
    }
}
