//! API client for communicating with the Source REST API.
//!
//! This module provides the `SourceClient` struct. Resource wrappers
//! (`threads()`, `messages()`, `slots()`) borrow it and describe each
//! endpoint; the client owns URL building, authentication headers,
//! status checking and JSON decoding.

use anyhow::{Context, Result};
use reqwest::{header, Client, Method, Url};
use serde::{de::DeserializeOwned, Serialize};
use tracing::debug;

use crate::auth::Authentication;
use crate::config::SourceConfiguration;
use crate::resources::{MessageResource, SlotResource, ThreadResource};
use crate::token::TokenGenerator;

use super::query::to_query_pairs;
use super::{ApiError, RequestOptions};

const USER_AGENT: &str = concat!("source-rust/", env!("CARGO_PKG_VERSION"));

const IDEMPOTENCY_KEY_HEADER: &str = "idempotency-key";

/// API client for Source.
/// Clone is cheap - reqwest::Client uses Arc internally for connection pooling.
#[derive(Debug, Clone)]
pub struct SourceClient {
    client: Client,
    base_url: Url,
    authentication: Authentication,
}

impl SourceClient {
    /// Create a new API client
    pub fn new(configuration: SourceConfiguration) -> Result<Self> {
        let client = Client::builder()
            .timeout(configuration.timeout)
            .user_agent(USER_AGENT)
            .build()
            .context("Failed to build HTTP client")?;

        let base_url = Url::parse(&configuration.base_url)
            .with_context(|| format!("Invalid base URL: {}", configuration.base_url))?;
        if base_url.cannot_be_a_base() {
            anyhow::bail!("Base URL cannot have paths appended: {}", configuration.base_url);
        }

        Ok(Self {
            client,
            base_url,
            authentication: configuration.authentication,
        })
    }

    /// Create a client with different credentials, sharing the connection pool.
    /// Useful to act as a member with a freshly generated token.
    pub fn with_authentication(&self, authentication: Authentication) -> Self {
        Self {
            client: self.client.clone(), // Cheap clone, shares connection pool
            base_url: self.base_url.clone(),
            authentication,
        }
    }

    pub fn authentication(&self) -> &Authentication {
        &self.authentication
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Token generator bound to this client's credentials.
    pub fn token_generator(&self) -> TokenGenerator {
        TokenGenerator::from_authentication(self.authentication.clone())
    }

    pub fn threads(&self) -> ThreadResource<'_> {
        ThreadResource::new(self)
    }

    pub fn messages(&self) -> MessageResource<'_> {
        MessageResource::new(self)
    }

    pub fn slots(&self) -> SlotResource<'_> {
        SlotResource::new(self)
    }

    /// Append path segments to the base URL, percent-encoding each one.
    fn url(&self, segments: &[&str]) -> Result<Url> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| anyhow::anyhow!("Base URL cannot have paths appended: {}", self.base_url))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    fn headers(&self, options: Option<&RequestOptions>) -> Result<header::HeaderMap> {
        let authentication = options
            .and_then(|o| o.authentication.as_ref())
            .unwrap_or(&self.authentication);

        let mut headers = header::HeaderMap::new();
        headers.insert(header::ACCEPT, header::HeaderValue::from_static("application/json"));

        let mut auth_value = header::HeaderValue::from_str(&authentication.header_value())
            .context("Credentials contain characters not allowed in a header")?;
        auth_value.set_sensitive(true);
        headers.insert(header::AUTHORIZATION, auth_value);

        if let Some(key) = options.and_then(|o| o.idempotency_key.as_deref()) {
            headers.insert(
                IDEMPOTENCY_KEY_HEADER,
                header::HeaderValue::from_str(key).context("Invalid idempotency key")?,
            );
        }
        Ok(headers)
    }

    /// Check if response is successful, returning an error with body if not.
    async fn check_response(response: reqwest::Response) -> Result<reqwest::Response> {
        if response.status().is_success() {
            Ok(response)
        } else {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            Err(ApiError::from_status(status, &body).into())
        }
    }

    async fn send<T: DeserializeOwned>(
        &self,
        method: Method,
        segments: &[&str],
        query: Vec<(String, String)>,
        body: Option<serde_json::Value>,
        options: Option<&RequestOptions>,
    ) -> Result<T> {
        let url = self.url(segments)?;
        let path = url.path().to_string();

        let mut request = self
            .client
            .request(method.clone(), url)
            .headers(self.headers(options)?);
        if !query.is_empty() {
            request = request.query(&query);
        }
        if let Some(ref body) = body {
            request = request.json(body);
        }
        if let Some(timeout) = options.and_then(|o| o.timeout) {
            request = request.timeout(timeout);
        }

        let response = request
            .send()
            .await
            .map_err(ApiError::from)
            .with_context(|| format!("Failed to send {} request to {}", method, path))?;
        debug!(method = %method, path = %path, status = response.status().as_u16(), "Source API response");

        let response = Self::check_response(response).await?;
        response
            .json()
            .await
            .map_err(|e| ApiError::InvalidResponse(e.to_string()))
            .with_context(|| format!("Failed to parse JSON response from {}", path))
    }

    pub(crate) async fn get<T, Q>(
        &self,
        segments: &[&str],
        query: Option<&Q>,
        options: Option<&RequestOptions>,
    ) -> Result<T>
    where
        T: DeserializeOwned,
        Q: Serialize,
    {
        let query = match query {
            Some(params) => to_query_pairs(params)?,
            None => Vec::new(),
        };
        self.send(Method::GET, segments, query, None, options).await
    }

    pub(crate) async fn post<T, B>(
        &self,
        segments: &[&str],
        body: Option<&B>,
        options: Option<&RequestOptions>,
    ) -> Result<T>
    where
        T: DeserializeOwned,
        B: Serialize,
    {
        let body = body
            .map(serde_json::to_value)
            .transpose()
            .context("Failed to serialize request body")?;
        self.send(Method::POST, segments, Vec::new(), body, options).await
    }
}
