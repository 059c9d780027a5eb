use anyhow::{Context, Result};
use keyring::Entry;

use super::ApiKey;

const SERVICE_NAME: &str = "source-api";

/// API key secrets stored in the OS keychain, keyed by key id.
pub struct CredentialStore;

impl CredentialStore {
    /// Store an API key secret in the OS keychain
    pub fn store(key: &ApiKey) -> Result<()> {
        let entry = Entry::new(SERVICE_NAME, key.id())
            .context("Failed to create keyring entry")?;
        entry
            .set_password(key.secret())
            .context("Failed to store API key secret in keychain")?;
        Ok(())
    }

    /// Load the API key for a key id from the OS keychain
    pub fn load(key_id: &str) -> Result<ApiKey> {
        let entry = Entry::new(SERVICE_NAME, key_id)
            .context("Failed to create keyring entry")?;
        let secret = entry
            .get_password()
            .context("Failed to retrieve API key secret from keychain")?;
        Ok(ApiKey::new(key_id, secret))
    }

    /// Delete the stored secret for a key id
    pub fn delete(key_id: &str) -> Result<()> {
        let entry = Entry::new(SERVICE_NAME, key_id)
            .context("Failed to create keyring entry")?;
        entry
            .delete_credential()
            .context("Failed to delete API key secret from keychain")?;
        Ok(())
    }

    /// Check if a secret exists for a key id
    pub fn has_credentials(key_id: &str) -> bool {
        if let Ok(entry) = Entry::new(SERVICE_NAME, key_id) {
            entry.get_password().is_ok()
        } else {
            false
        }
    }
}
