//! Host capabilities
//!
//! Everything user-facing the commands need: input prompts, selection
//! lists, notifications, a progress indicator and somewhere to put the
//! generated message. The terminal implementation lives in [`terminal`];
//! tests and other front ends provide their own.

pub mod sink;
pub mod terminal;

use std::path::PathBuf;

use crate::error::Result;

pub use sink::{FileSink, StdoutSink};
pub use terminal::TerminalHost;

/// Severity of a notification
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationLevel {
    Info,
    Warning,
    Error,
}

/// Free-text input request
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InputRequest {
    /// Question shown to the user
    pub prompt: String,
    /// Example of the expected value
    pub placeholder: Option<String>,
    /// Hide what is typed
    pub password: bool,
}

/// Indeterminate progress shown while a request is in flight
pub trait ProgressIndicator {
    fn finish(&self);
}

/// UI surface provided by the host
pub trait Host {
    /// Folders the user is working in; the first one is used for git
    fn workspace_roots(&self) -> Vec<PathBuf>;

    /// Ask for a string; `None` when cancelled or left empty
    fn prompt_input(&self, request: &InputRequest) -> Result<Option<String>>;

    /// Pick one item; returns its index, `None` when cancelled
    fn select(&self, title: &str, items: &[String], current: Option<usize>)
        -> Result<Option<usize>>;

    /// Show a message with optional action buttons; returns the chosen action
    fn notify(
        &self,
        level: NotificationLevel,
        message: &str,
        actions: &[&str],
    ) -> Result<Option<String>>;

    /// Open a URL in the browser; `false` if nothing could be launched
    fn open_external(&self, url: &str) -> bool;

    /// Start an indeterminate progress indicator
    fn begin_progress(&self, title: &str) -> Box<dyn ProgressIndicator>;
}

/// Destination for a generated commit message
pub trait MessageSink {
    fn write_message(&self, message: &str) -> Result<()>;
}
