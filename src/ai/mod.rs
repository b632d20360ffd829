//! AI integration module
//!
//! This module provides GitHub Models integration for generating commit
//! messages from staged diffs.

pub mod client;
pub mod prompts;

pub use client::ChatClient;
pub use prompts::CommitStyle;
