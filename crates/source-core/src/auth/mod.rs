//! Authentication module for Source API credentials.
//!
//! This module provides:
//! - `Authentication`: how requests are authenticated (API key or bearer token)
//! - `ApiKey`: key id plus secret, the only credential able to sign member tokens
//! - `CredentialStore`: Secure OS-level storage of API key secrets via keyring

pub mod authentication;
pub mod credentials;

pub use authentication::{ApiKey, Authentication};
pub use credentials::CredentialStore;
