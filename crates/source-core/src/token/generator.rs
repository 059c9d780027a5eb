use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::{encode, Algorithm, EncodingKey, Header};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::auth::Authentication;
use crate::config::SourceConfiguration;

use super::TokenError;

/// Options for a generated member token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TokenOptions {
    /// ID of the member the token is issued for.
    pub member: String,
    /// Point in time after which the token is rejected.
    pub expiration: DateTime<Utc>,
    /// Granted scopes. `None` is encoded as an empty list.
    pub scopes: Option<Vec<String>>,
}

impl TokenOptions {
    pub fn new(member: impl Into<String>, expiration: DateTime<Utc>) -> Self {
        Self {
            member: member.into(),
            expiration,
            scopes: None,
        }
    }

    /// Token for `member` expiring `lifetime` from now.
    ///
    /// Returns `None` when the expiration falls outside the representable
    /// date range.
    pub fn expires_in(member: impl Into<String>, lifetime: Duration) -> Option<Self> {
        Utc::now()
            .checked_add_signed(lifetime)
            .map(|expiration| Self::new(member, expiration))
    }

    pub fn with_scope(mut self, scope: impl Into<String>) -> Self {
        self.scopes.get_or_insert_with(Vec::new).push(scope.into());
        self
    }

    pub fn with_scopes<I, S>(mut self, scopes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.scopes = Some(scopes.into_iter().map(Into::into).collect());
        self
    }
}

/// Payload of a member token.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenClaims {
    pub sub: String,
    pub iat: i64,
    pub exp: i64,
    pub scopes: Vec<String>,
}

/// Signs member tokens with the API key of a configuration.
///
/// Holds only an immutable copy of the authentication, so one generator can
/// be shared freely between threads.
#[derive(Debug, Clone)]
pub struct TokenGenerator {
    authentication: Authentication,
}

impl TokenGenerator {
    pub fn new(configuration: &SourceConfiguration) -> Self {
        Self::from_authentication(configuration.authentication().clone())
    }

    pub fn from_authentication(authentication: Authentication) -> Self {
        Self { authentication }
    }

    /// Generates a JWT allowing a member to access the API.
    ///
    /// # Errors
    ///
    /// Returns [`TokenError::Configuration`] unless the generator was built
    /// with API key authentication. No signing work happens in that case.
    pub fn generate(&self, options: &TokenOptions) -> Result<String, TokenError> {
        self.generate_at(options, Utc::now())
    }

    pub(crate) fn generate_at(
        &self,
        options: &TokenOptions,
        now: DateTime<Utc>,
    ) -> Result<String, TokenError> {
        let key = self.authentication.signing_key().ok_or_else(|| {
            TokenError::Configuration(
                "You may only generate tokens when using API key authentication".to_string(),
            )
        })?;

        // timestamp() floors to whole seconds
        let claims = TokenClaims {
            sub: options.member.clone(),
            iat: now.timestamp(),
            exp: options.expiration.timestamp(),
            scopes: options.scopes.clone().unwrap_or_default(),
        };
        if claims.exp <= claims.iat {
            warn!(member = %claims.sub, exp = claims.exp, "Generating a member token that is already expired");
        }

        let mut header = Header::new(Algorithm::HS256);
        header.typ = None;
        header.kid = Some(key.id().to_string());

        let token = encode(
            &header,
            &claims,
            &EncodingKey::from_secret(key.secret().as_bytes()),
        )?;

        debug!(member = %claims.sub, kid = key.id(), scopes = claims.scopes.len(), "Generated member token");
        Ok(token)
    }
}
