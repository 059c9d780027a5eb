//! Member token generation.
//!
//! Tokens are HS256 JWTs signed with an API key secret. They let a member
//! call the API directly (for example from a patient portal) with access
//! limited to the granted scopes until the expiration time.

pub mod error;
pub mod generator;

pub use error::TokenError;
pub use generator::{TokenClaims, TokenGenerator, TokenOptions};
