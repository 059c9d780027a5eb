//! Typed client for the Source API.
//!
//! - [`api::SourceClient`]: HTTP plumbing shared by every resource
//! - [`resources`]: thin wrappers over the communication and scheduling endpoints
//! - [`token::TokenGenerator`]: mints member tokens signed with an API key
//!
//! ```ignore
//! use source_core::{Authentication, SourceClient, SourceConfiguration, TokenOptions};
//!
//! let config = SourceConfiguration::new(Authentication::api_key("key_1", "s3cr3t"));
//! let client = SourceClient::new(config)?;
//!
//! let threads = client.threads().list(None, None).await?;
//! let options = TokenOptions::expires_in("mem_123", chrono::Duration::hours(1))
//!     .expect("one hour from now is in range");
//! let token = client.token_generator().generate(&options)?;
//! ```

pub mod api;
pub mod auth;
pub mod config;
pub mod models;
pub mod resources;
pub mod token;

pub use api::{ApiError, RequestOptions, SourceClient};
pub use auth::{ApiKey, Authentication, CredentialStore};
pub use config::{Config, SourceConfiguration};
pub use token::{TokenClaims, TokenError, TokenGenerator, TokenOptions};
