//! lazycommit - Conventional Commit messages from staged changes
//!
//! This library provides the pieces behind the `lazycommit` CLI: a token
//! store, a staged-diff reader, a GitHub Models chat client and the session
//! that ties them to a host UI.

pub mod ai;
pub mod cli;
pub mod core;
pub mod error;
pub mod host;

pub use error::{LazyCommitError, Result};
