//! REST API client module for the Source API.
//!
//! This module provides the `SourceClient` shared by every resource
//! wrapper, per-request `RequestOptions`, and the `ApiError` type that
//! non-success responses are mapped to.
//!
//! Requests are authenticated with either an API key or a bearer token
//! (see [`crate::auth::Authentication`]).

pub mod client;
pub mod error;
pub mod options;
pub(crate) mod query;

pub use client::SourceClient;
pub use error::ApiError;
pub use options::RequestOptions;
