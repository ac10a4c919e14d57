//! Auth service.

use async_trait::async_trait;
use jiff::{SignedDuration, Timestamp};
use mockall::automock;
use tracing::debug;

use crate::auth::{AuthServiceError, Claims, LoggedInUser, SigningSecret, sign_token, verify_token};

#[derive(Debug, Clone)]
pub struct JwtAuthService {
    secret: SigningSecret,
}

impl JwtAuthService {
    /// Build a service around a shared signing secret.
    ///
    /// # Errors
    ///
    /// Returns [`AuthServiceError::MissingSecret`] for an empty secret.
    pub fn new(secret: &str) -> Result<Self, AuthServiceError> {
        let secret = SigningSecret::new(secret);

        if secret.is_empty() {
            return Err(AuthServiceError::MissingSecret);
        }

        Ok(Self { secret })
    }

    /// Issue a bearer token for the given user.
    ///
    /// # Errors
    ///
    /// Returns an error if signing fails.
    pub fn issue_token(
        &self,
        user: &LoggedInUser,
        ttl: SignedDuration,
    ) -> Result<String, AuthServiceError> {
        let claims = Claims::for_user(user, Timestamp::now(), ttl);

        sign_token(&claims, &self.secret).map_err(AuthServiceError::from)
    }
}

#[async_trait]
impl AuthService for JwtAuthService {
    async fn authenticate_bearer(
        &self,
        bearer_token: &str,
    ) -> Result<LoggedInUser, AuthServiceError> {
        let claims = verify_token(bearer_token, &self.secret).map_err(|source| {
            debug!("rejected bearer token: {source}");

            AuthServiceError::InvalidToken
        })?;

        if claims.sub.trim().is_empty() {
            return Err(AuthServiceError::InvalidToken);
        }

        Ok(claims.into())
    }
}

#[automock]
#[async_trait]
pub trait AuthService: Send + Sync {
    /// Resolve the caller behind a bearer token.
    async fn authenticate_bearer(&self, bearer_token: &str)
    -> Result<LoggedInUser, AuthServiceError>;
}
