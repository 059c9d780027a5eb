use std::fmt;

/// An API key issued from the Source dashboard.
///
/// The secret never leaves the process except inside the `Authorization`
/// header of API key requests. `Debug` output redacts it.
#[derive(Clone, PartialEq, Eq)]
pub struct ApiKey {
    id: String,
    secret: String,
}

impl ApiKey {
    pub fn new(id: impl Into<String>, secret: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            secret: secret.into(),
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn secret(&self) -> &str {
        &self.secret
    }
}

impl fmt::Debug for ApiKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ApiKey")
            .field("id", &self.id)
            .field("secret", &"<redacted>")
            .finish()
    }
}

/// How requests to the Source API are authenticated.
#[derive(Clone, PartialEq, Eq)]
pub enum Authentication {
    /// Full account access with an API key. Can sign member tokens.
    ApiKey(ApiKey),
    /// A user or member token issued by Source (or minted by `TokenGenerator`).
    BearerToken(String),
}

impl Authentication {
    pub fn api_key(id: impl Into<String>, secret: impl Into<String>) -> Self {
        Authentication::ApiKey(ApiKey::new(id, secret))
    }

    pub fn bearer(token: impl Into<String>) -> Self {
        Authentication::BearerToken(token.into())
    }

    /// Signing material, present only for API key authentication.
    pub fn signing_key(&self) -> Option<&ApiKey> {
        match self {
            Authentication::ApiKey(key) => Some(key),
            Authentication::BearerToken(_) => None,
        }
    }

    /// Value for the `Authorization` header.
    pub fn header_value(&self) -> String {
        match self {
            Authentication::ApiKey(key) => format!("Bearer {}:{}", key.id, key.secret),
            Authentication::BearerToken(token) => format!("Bearer {}", token),
        }
    }

    pub fn kind(&self) -> &'static str {
        match self {
            Authentication::ApiKey(_) => "api_key",
            Authentication::BearerToken(_) => "bearer_token",
        }
    }
}

impl fmt::Debug for Authentication {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Authentication::ApiKey(key) => f.debug_tuple("ApiKey").field(key).finish(),
            Authentication::BearerToken(_) => f.debug_tuple("BearerToken").field(&"<redacted>").finish(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_signing_key_only_for_api_key() {
        let auth = Authentication::api_key("key_1", "s3cr3t");
        let key = auth.signing_key().expect("api key should expose signing material");
        assert_eq!(key.id(), "key_1");
        assert_eq!(key.secret(), "s3cr3t");

        assert!(Authentication::bearer("tok").signing_key().is_none());
    }

    #[test]
    fn test_header_value() {
        assert_eq!(
            Authentication::api_key("key_1", "s3cr3t").header_value(),
            "Bearer key_1:s3cr3t"
        );
        assert_eq!(Authentication::bearer("abc.def.ghi").header_value(), "Bearer abc.def.ghi");
    }

    #[test]
    fn test_debug_redacts_secrets() {
        let rendered = format!("{:?}", Authentication::api_key("key_1", "s3cr3t"));
        assert!(rendered.contains("key_1"));
        assert!(!rendered.contains("s3cr3t"));

        let rendered = format!("{:?}", Authentication::bearer("member-token"));
        assert!(!rendered.contains("member-token"));
    }
}
