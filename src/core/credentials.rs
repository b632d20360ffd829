//! Secure token storage
//!
//! The GitHub token is kept in the system keyring (macOS Keychain, Linux
//! Secret Service, Windows Credential Manager) under a single fixed key.
//!
//! ## Environment Variable Fallback
//!
//! For development and CI the token can be supplied through
//! `LAZYCOMMIT_GITHUB_TOKEN`; [`TokenStore::resolve`] prefers it over the
//! keyring.

use std::collections::HashMap;
use std::sync::Mutex;

use keyring::Entry;
use secrecy::{ExposeSecret, SecretString};
use tracing::debug;

use crate::error::{LazyCommitError, Result};

const SERVICE_NAME: &str = "lazycommit";

/// Fixed secret name holding the GitHub token
pub const TOKEN_KEY: &str = "commitGenerator.githubToken";

/// Environment variable that overrides the stored token
pub const TOKEN_ENV: &str = "LAZYCOMMIT_GITHUB_TOKEN";

/// Secret storage capability provided by the platform
pub trait SecretStore: Send + Sync {
    /// Read a secret, `None` if it was never stored
    fn get_secret(&self, key: &str) -> Result<Option<String>>;

    /// Store or overwrite a secret
    fn set_secret(&self, key: &str, value: &str) -> Result<()>;

    /// Remove a secret; removing a missing secret is not an error
    fn delete_secret(&self, key: &str) -> Result<()>;
}

/// System keyring backed secret store
#[derive(Debug, Clone)]
pub struct KeyringSecretStore {
    service: String,
}

impl KeyringSecretStore {
    pub fn new() -> Self {
        Self {
            service: SERVICE_NAME.to_string(),
        }
    }
}

impl Default for KeyringSecretStore {
    fn default() -> Self {
        Self::new()
    }
}

impl SecretStore for KeyringSecretStore {
    fn get_secret(&self, key: &str) -> Result<Option<String>> {
        let entry = Entry::new(&self.service, key)?;
        match entry.get_password() {
            Ok(password) => Ok(Some(password)),
            Err(keyring::Error::NoEntry) => Ok(None),
            Err(e) => Err(LazyCommitError::Credential(format!(
                "Cannot access system keychain. Make sure your keyring is unlocked. ({})",
                e
            ))),
        }
    }

    fn set_secret(&self, key: &str, value: &str) -> Result<()> {
        let entry = Entry::new(&self.service, key)?;
        entry.set_password(value)?;
        Ok(())
    }

    fn delete_secret(&self, key: &str) -> Result<()> {
        let entry = Entry::new(&self.service, key)?;
        match entry.delete_credential() {
            Ok(()) => Ok(()),
            Err(keyring::Error::NoEntry) => Ok(()), // Already deleted
            Err(e) => Err(LazyCommitError::Credential(e.to_string())),
        }
    }
}

/// In-memory secret store for tests and headless use
#[derive(Debug, Default)]
pub struct MemorySecretStore {
    secrets: Mutex<HashMap<String, String>>,
}

impl MemorySecretStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store pre-populated with a token under [`TOKEN_KEY`]
    pub fn with_token(token: &str) -> Self {
        let store = Self::new();
        if let Ok(mut secrets) = store.secrets.lock() {
            secrets.insert(TOKEN_KEY.to_string(), token.to_string());
        }
        store
    }

    fn lock(&self) -> Result<std::sync::MutexGuard<'_, HashMap<String, String>>> {
        self.secrets
            .lock()
            .map_err(|e| LazyCommitError::Credential(e.to_string()))
    }
}

impl SecretStore for MemorySecretStore {
    fn get_secret(&self, key: &str) -> Result<Option<String>> {
        Ok(self.lock()?.get(key).cloned())
    }

    fn set_secret(&self, key: &str, value: &str) -> Result<()> {
        self.lock()?.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn delete_secret(&self, key: &str) -> Result<()> {
        self.lock()?.remove(key);
        Ok(())
    }
}

/// Token store for the GitHub personal access token
pub struct TokenStore {
    secrets: Box<dyn SecretStore>,
}

impl TokenStore {
    pub fn new(secrets: Box<dyn SecretStore>) -> Self {
        Self { secrets }
    }

    /// Token store backed by the system keyring
    pub fn keyring() -> Self {
        Self::new(Box::new(KeyringSecretStore::new()))
    }

    /// Store the token, overwriting any previous one
    pub fn save(&self, token: &str) -> Result<()> {
        self.secrets.set_secret(TOKEN_KEY, token)
    }

    /// Retrieve the stored token
    pub fn get(&self) -> Result<Option<SecretString>> {
        Ok(self.secrets.get_secret(TOKEN_KEY)?.map(SecretString::from))
    }

    /// Delete the stored token
    pub fn delete(&self) -> Result<()> {
        self.secrets.delete_secret(TOKEN_KEY)
    }

    /// Token to use for requests
    ///
    /// Priority: environment variable > secure storage
    pub fn resolve(&self) -> Result<Option<SecretString>> {
        if let Ok(token) = std::env::var(TOKEN_ENV) {
            if !token.is_empty() {
                debug!("Using token from {}", TOKEN_ENV);
                return Ok(Some(SecretString::from(token)));
            }
        }

        self.get()
    }

    /// Get a masked version of a token for display (shows first 4 and last 4 chars)
    pub fn mask_token(token: &SecretString) -> String {
        let exposed = token.expose_secret();
        let chars: Vec<char> = exposed.chars().collect();
        if chars.len() <= 8 {
            "*".repeat(chars.len())
        } else {
            let head: String = chars[..4].iter().collect();
            let tail: String = chars[chars.len() - 4..].iter().collect();
            format!("{}...{}", head, tail)
        }
    }
}
