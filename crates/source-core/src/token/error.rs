use thiserror::Error;

#[derive(Error, Debug)]
pub enum TokenError {
    /// The active authentication has no secret to sign with.
    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("Failed to encode token: {0}")]
    Encoding(#[from] jsonwebtoken::errors::Error),
}
