use std::time::Duration;

use crate::auth::Authentication;

/// Per-request overrides accepted by every resource method.
#[derive(Debug, Clone, Default)]
pub struct RequestOptions {
    /// Sent as `Idempotency-Key` so retried writes are applied once.
    pub idempotency_key: Option<String>,
    pub timeout: Option<Duration>,
    /// Authenticate this request differently from the client default.
    pub authentication: Option<Authentication>,
}

impl RequestOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn idempotency_key(mut self, key: impl Into<String>) -> Self {
        self.idempotency_key = Some(key.into());
        self
    }

    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    pub fn authentication(mut self, authentication: Authentication) -> Self {
        self.authentication = Some(authentication);
        self
    }
}
