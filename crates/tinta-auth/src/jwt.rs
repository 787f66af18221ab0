//! Session token issuance and validation with HS256.
//!
//! Tokens are signed and consumed by this process alone, so a shared
//! secret is sufficient; the secret lives inside [`TokenService`] and is
//! never handed out.

use crate::claims::SessionClaims;
use crate::error::AuthError;
use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};

/// Issues and validates signed, expiring bearer tokens.
///
/// Constructed once at startup from configuration and shared by
/// reference; it holds no mutable state.
#[derive(Clone)]
pub struct TokenService {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    default_ttl: Duration,
    leeway: u64,
}

impl TokenService {
    /// Create a token service from a signing secret and default lifetime.
    ///
    /// Expiry checking is strict (zero leeway) unless
    /// [`with_leeway`](Self::with_leeway) is applied.
    #[must_use]
    pub fn new(secret: &[u8], default_ttl: Duration) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(secret),
            decoding_key: DecodingKey::from_secret(secret),
            default_ttl,
            leeway: 0,
        }
    }

    /// Allow clock-skew tolerance of `leeway_secs` during validation.
    #[must_use]
    pub fn with_leeway(mut self, leeway_secs: u64) -> Self {
        self.leeway = leeway_secs;
        self
    }

    /// Sign the given claims into a compact token.
    ///
    /// The expiration is computed here as now + `ttl` (falling back to the
    /// configured default); any `exp` already present on the claims is
    /// overwritten.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::SigningFailed` if encoding fails.
    pub fn issue(&self, claims: SessionClaims, ttl: Option<Duration>) -> Result<String, AuthError> {
        let mut claims = claims;
        claims.exp = (Utc::now() + ttl.unwrap_or(self.default_ttl)).timestamp();

        encode(&Header::new(Algorithm::HS256), &claims, &self.encoding_key)
            .map_err(|e| AuthError::SigningFailed(e.to_string()))
    }

    /// Decode and validate a token.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::InvalidToken` for a bad signature, malformed
    /// structure, or expired `exp` — one error for all three, so callers
    /// cannot probe which check failed.
    pub fn validate(&self, token: &str) -> Result<SessionClaims, AuthError> {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.leeway = self.leeway;
        validation.validate_exp = true;
        validation.set_required_spec_claims(&["exp"]);

        let data = decode::<SessionClaims>(token, &self.decoding_key, &validation).map_err(|e| {
            tracing::debug!(error = %e, "Rejected bearer token");
            AuthError::InvalidToken
        })?;

        Ok(data.claims)
    }
}
