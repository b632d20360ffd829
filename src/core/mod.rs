//! Core functionality for lazycommit
//!
//! This module contains shared business logic including:
//! - Token storage
//! - Staged diff reading
//! - Application configuration
//! - Command orchestration

pub mod config;
pub mod credentials;
pub mod git;
pub mod session;

pub use config::Config;
pub use credentials::TokenStore;
pub use git::GitReader;
pub use session::Session;
