//! Bearer token signing and verification.

use std::fmt;

use jiff::{SignedDuration, Timestamp};
use jsonwebtoken::{
    Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode, errors::Error,
};
use serde::{Deserialize, Serialize};
use zeroize::Zeroize;

use crate::auth::{LoggedInUser, UserId};

const ALGORITHM: Algorithm = Algorithm::HS256;

/// Shared HMAC secret used to sign and verify tokens.
#[derive(Clone)]
pub struct SigningSecret {
    bytes: Vec<u8>,
}

impl SigningSecret {
    #[must_use]
    pub fn new(secret: &str) -> Self {
        Self {
            bytes: secret.as_bytes().to_vec(),
        }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    fn encoding_key(&self) -> EncodingKey {
        EncodingKey::from_secret(&self.bytes)
    }

    fn decoding_key(&self) -> DecodingKey {
        DecodingKey::from_secret(&self.bytes)
    }
}

impl fmt::Debug for SigningSecret {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("SigningSecret(**redacted**)")?;
        Ok(())
    }
}

impl Drop for SigningSecret {
    fn drop(&mut self) {
        self.bytes.zeroize();
    }
}

/// Token claims.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    /// User id of the token holder.
    pub sub: String,

    /// Whether the holder has administrative privileges.
    #[serde(default)]
    pub is_admin: bool,

    pub iat: i64,
    pub exp: i64,
}

impl Claims {
    #[must_use]
    pub fn for_user(user: &LoggedInUser, issued_at: Timestamp, ttl: SignedDuration) -> Self {
        let iat = issued_at.as_second();

        Self {
            sub: user.id.to_string(),
            is_admin: user.is_admin,
            iat,
            exp: iat.saturating_add(ttl.as_secs()),
        }
    }
}

impl From<Claims> for LoggedInUser {
    fn from(claims: Claims) -> Self {
        Self {
            id: UserId::from(claims.sub),
            is_admin: claims.is_admin,
        }
    }
}

/// Sign claims into a compact token.
///
/// # Errors
///
/// Returns an error when the claims cannot be serialized or signed.
pub fn sign_token(claims: &Claims, secret: &SigningSecret) -> Result<String, Error> {
    encode(&Header::new(ALGORITHM), claims, &secret.encoding_key())
}

/// Verify signature and expiry, returning the claims.
///
/// # Errors
///
/// Returns an error for malformed, tampered, or expired tokens.
pub fn verify_token(token: &str, secret: &SigningSecret) -> Result<Claims, Error> {
    let mut validation = Validation::new(ALGORITHM);

    validation.set_required_spec_claims(&["exp", "sub"]);

    decode::<Claims>(token, &secret.decoding_key(), &validation).map(|data| data.claims)
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use super::*;

    fn user(is_admin: bool) -> LoggedInUser {
        LoggedInUser {
            id: UserId::from("u1"),
            is_admin,
        }
    }

    #[test]
    fn signed_token_verifies_with_same_secret() -> TestResult {
        let secret = SigningSecret::new("top-secret");
        let claims = Claims::for_user(&user(true), Timestamp::now(), SignedDuration::from_hours(1));

        let token = sign_token(&claims, &secret)?;

        assert_eq!(verify_token(&token, &secret)?, claims);

        Ok(())
    }

    #[test]
    fn token_signed_with_other_secret_is_rejected() -> TestResult {
        let claims = Claims::for_user(&user(false), Timestamp::now(), SignedDuration::from_hours(1));

        let token = sign_token(&claims, &SigningSecret::new("one"))?;

        assert!(
            verify_token(&token, &SigningSecret::new("two")).is_err(),
            "signature check must fail"
        );

        Ok(())
    }

    #[test]
    fn expired_token_is_rejected() -> TestResult {
        let secret = SigningSecret::new("top-secret");
        let issued_at = Timestamp::now() - SignedDuration::from_hours(3);
        let claims = Claims::for_user(&user(false), issued_at, SignedDuration::from_hours(1));

        let token = sign_token(&claims, &secret)?;

        assert!(verify_token(&token, &secret).is_err(), "expired token must fail");

        Ok(())
    }

    #[test]
    fn secret_debug_is_redacted() {
        let secret = SigningSecret::new("top-secret");

        assert_eq!(format!("{secret:?}"), "SigningSecret(**redacted**)");
    }
}
