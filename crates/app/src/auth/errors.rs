//! Auth service errors.

use jsonwebtoken::errors::Error as JwtError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AuthServiceError {
    #[error("invalid or expired token")]
    InvalidToken,

    #[error("signing secret is not configured")]
    MissingSecret,

    #[error("token processing error")]
    Token(#[source] JwtError),
}

impl From<JwtError> for AuthServiceError {
    fn from(error: JwtError) -> Self {
        Self::Token(error)
    }
}
