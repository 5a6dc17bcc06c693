//! Token Codec
//!
//! Mints and verifies HS256 bearer tokens with the payload
//! `{"user":{"id","username"},"iat","exp"}`.

use chrono::{DateTime, Utc};
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use kernel::identity::AuthUser;
use serde::{Deserialize, Serialize};

use crate::application::config::AuthConfig;
use crate::error::{AuthError, AuthResult};

/// Token payload
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    pub user: AuthUser,
    /// Issued at (unix seconds)
    pub iat: i64,
    /// Expires at (unix seconds)
    pub exp: i64,
}

impl Claims {
    pub fn new(user: AuthUser, issued_at: DateTime<Utc>, ttl: std::time::Duration) -> Self {
        let iat = issued_at.timestamp();
        let ttl_secs = i64::try_from(ttl.as_secs()).unwrap_or(i64::MAX);
        Self {
            user,
            iat,
            exp: iat.saturating_add(ttl_secs),
        }
    }
}

/// HS256 token service
///
/// Holds the keys derived once from [`AuthConfig`].
#[derive(Clone)]
pub struct TokenCodec {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
    ttl: std::time::Duration,
}

impl TokenCodec {
    pub fn new(config: &AuthConfig) -> Self {
        // only HS256 is accepted; `alg` substitution fails the algorithm check
        let mut validation = Validation::new(Algorithm::HS256);
        validation.leeway = 0;
        validation.set_required_spec_claims(&["exp"]);

        Self {
            encoding_key: EncodingKey::from_secret(&config.jwt_secret),
            decoding_key: DecodingKey::from_secret(&config.jwt_secret),
            validation,
            ttl: config.token_ttl,
        }
    }

    /// Token for `user`, valid from now for the configured TTL
    pub fn mint(&self, user: AuthUser) -> AuthResult<String> {
        self.sign(&Claims::new(user, Utc::now(), self.ttl))
    }

    pub fn sign(&self, claims: &Claims) -> AuthResult<String> {
        encode(&Header::new(Algorithm::HS256), claims, &self.encoding_key)
            .map_err(AuthError::TokenSigning)
    }

    /// Verify signature, algorithm and expiry, then require a non-empty identity.
    pub fn verify(&self, token: &str) -> AuthResult<Claims> {
        let claims = decode::<Claims>(token, &self.decoding_key, &self.validation)
            .map(|data| data.claims)
            .map_err(|err| {
                tracing::debug!(error = %err, "Token rejected");
                AuthError::InvalidToken
            })?;

        if claims.user.username.is_empty() || claims.user.id.as_str().is_empty() {
            return Err(AuthError::InvalidToken);
        }
        Ok(claims)
    }
}
