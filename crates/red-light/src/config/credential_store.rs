//! API key storage in the OS credential store.

use crate::{AppError, AppResult};

use std::panic::Location;

use error_location::ErrorLocation;
use keyring::Entry;
use tracing::{debug, info, instrument, warn};

const API_KEY_SERVICE: &str = "anthropic-api";
const API_KEY_ACCOUNT: &str = "red-light-green-light";
const API_KEY_ENV: &str = "ANTHROPIC_API_KEY";

/// Reads the key from the keychain, falling back to `ANTHROPIC_API_KEY`.
/// Writes go to the keychain only.
#[derive(Debug, Clone)]
pub struct CredentialStore {
    service: String,
    account: String,
    env_var: String,
}

impl CredentialStore {
    /// Store for the fixed service/account pair.
    pub fn new() -> Self {
        Self {
            service: API_KEY_SERVICE.to_string(),
            account: API_KEY_ACCOUNT.to_string(),
            env_var: API_KEY_ENV.to_string(),
        }
    }

    /// API key from the keychain or the environment, if either has one.
    #[instrument(skip(self))]
    pub fn load(&self) -> Option<String> {
        let from_env = std::env::var(&self.env_var).ok();
        let key = resolve_api_key(self.read_keychain(), from_env);

        debug!(found = key.is_some(), "API key lookup finished");

        key
    }

    /// Store `api_key` in the keychain, replacing any previous value.
    #[track_caller]
    #[instrument(skip(self, api_key))]
    pub fn save(&self, api_key: &str) -> AppResult<()> {
        self.entry()?
            .set_password(api_key)
            .map_err(|e| AppError::CredentialError {
                reason: format!("Failed to store API key: {}", e),
                location: ErrorLocation::from(Location::caller()),
            })?;

        info!(service = %self.service, "API key saved to keychain");

        Ok(())
    }

    fn read_keychain(&self) -> Option<String> {
        let entry = match self.entry() {
            Ok(entry) => entry,
            Err(e) => {
                warn!(error = %e, "Keychain unavailable");
                return None;
            }
        };

        match entry.get_password() {
            Ok(key) => Some(key),
            Err(keyring::Error::NoEntry) => None,
            Err(e) => {
                warn!(error = %e, "Failed to read API key from keychain");
                None
            }
        }
    }

    #[track_caller]
    fn entry(&self) -> AppResult<Entry> {
        Entry::new(&self.service, &self.account).map_err(|e| AppError::CredentialError {
            reason: format!("Failed to open keychain entry: {}", e),
            location: ErrorLocation::from(Location::caller()),
        })
    }
}

impl Default for CredentialStore {
    fn default() -> Self {
        Self::new()
    }
}

/// Keychain value wins; the environment is the fallback. Empty counts as absent.
pub(crate) fn resolve_api_key(keychain: Option<String>, env: Option<String>) -> Option<String> {
    keychain
        .filter(|key| !key.is_empty())
        .or_else(|| env.filter(|key| !key.is_empty()))
}
