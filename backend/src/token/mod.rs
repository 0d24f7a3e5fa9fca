//! HS256 bearer-token issue and verification.
//!
//! The shared kernel both services draw on: the auth service signs tokens on
//! register/login, and anything holding the same secret can verify them. The
//! gateway performs verification in the deployed topology; the library form
//! here also backs the test suites and any deployment that skips the gateway.

use std::sync::Arc;

use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};

use crate::domain::ports::{Clock, TokenIssueError, TokenIssuer};
use crate::domain::Principal;

/// Default `iss` claim when `JWT_ISSUER` is unset.
pub const DEFAULT_ISSUER: &str = "meal-prep-auth";
/// Default `aud` claim when `JWT_AUDIENCE` is unset.
pub const DEFAULT_AUDIENCE: &str = "meal-prep-api";
/// Token lifetime in seconds (24 hours, no refresh).
pub const TOKEN_TTL_SECONDS: i64 = 24 * 60 * 60;

/// Failures loading the token configuration from the environment.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TokenConfigError {
    /// `JWT_SECRET` is unset or empty; token issuance cannot proceed.
    #[error("JWT_SECRET must be set and non-empty")]
    MissingSecret,
}

/// Signing and validation parameters shared by issue and verify.
#[derive(Debug, Clone)]
pub struct TokenConfig {
    secret: String,
    issuer: String,
    audience: String,
    ttl_seconds: i64,
}

impl TokenConfig {
    /// Build a configuration with the default issuer, audience, and TTL.
    pub fn new(secret: impl Into<String>) -> Self {
        Self {
            secret: secret.into(),
            issuer: DEFAULT_ISSUER.to_owned(),
            audience: DEFAULT_AUDIENCE.to_owned(),
            ttl_seconds: TOKEN_TTL_SECONDS,
        }
    }

    /// Load the configuration from the process environment.
    ///
    /// `JWT_SECRET` is required; absence is fatal at startup. `JWT_ISSUER`
    /// and `JWT_AUDIENCE` fall back to the crate defaults.
    pub fn from_env() -> Result<Self, TokenConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Load the configuration through an arbitrary variable lookup.
    pub fn from_lookup(
        lookup: impl Fn(&str) -> Option<String>,
    ) -> Result<Self, TokenConfigError> {
        let secret = lookup("JWT_SECRET")
            .filter(|secret| !secret.is_empty())
            .ok_or(TokenConfigError::MissingSecret)?;
        let mut config = Self::new(secret);
        if let Some(issuer) = lookup("JWT_ISSUER").filter(|issuer| !issuer.is_empty()) {
            config.issuer = issuer;
        }
        if let Some(audience) = lookup("JWT_AUDIENCE").filter(|audience| !audience.is_empty()) {
            config.audience = audience;
        }
        Ok(config)
    }

    /// Override the `iss` claim.
    #[must_use]
    pub fn with_issuer(mut self, issuer: impl Into<String>) -> Self {
        self.issuer = issuer.into();
        self
    }

    /// Override the `aud` claim.
    #[must_use]
    pub fn with_audience(mut self, audience: impl Into<String>) -> Self {
        self.audience = audience.into();
        self
    }

    /// Override the token lifetime.
    #[must_use]
    pub fn with_ttl_seconds(mut self, ttl_seconds: i64) -> Self {
        self.ttl_seconds = ttl_seconds;
        self
    }

    /// Configured `iss` claim.
    pub fn issuer(&self) -> &str {
        self.issuer.as_str()
    }

    /// Configured `aud` claim.
    pub fn audience(&self) -> &str {
        self.audience.as_str()
    }
}

/// Claim set carried by every issued token.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// The authenticated user's id.
    pub user_id: i64,
    /// The authenticated user's canonical email.
    pub email: String,
    /// Stringified `user_id`, per the registered-claim convention.
    pub sub: String,
    /// Issuing party.
    pub iss: String,
    /// Intended consumer.
    pub aud: String,
    /// Issued-at, seconds since epoch.
    pub iat: i64,
    /// Not-before, equal to `iat`.
    pub nbf: i64,
    /// Expiry, `iat + TTL`.
    pub exp: i64,
}

/// Signing adapter behind the [`TokenIssuer`] port.
///
/// The clock is injected so expiry tests are deterministic.
#[derive(Clone)]
pub struct TokenSigner {
    config: TokenConfig,
    clock: Arc<dyn Clock>,
}

impl TokenSigner {
    /// Assemble a signer from its configuration and clock.
    pub fn new(config: TokenConfig, clock: Arc<dyn Clock>) -> Self {
        Self { config, clock }
    }
}

impl TokenIssuer for TokenSigner {
    fn issue(&self, user_id: i64, email: &str) -> Result<String, TokenIssueError> {
        let iat = self.clock.now().timestamp();
        let claims = Claims {
            user_id,
            email: email.to_owned(),
            sub: user_id.to_string(),
            iss: self.config.issuer.clone(),
            aud: self.config.audience.clone(),
            iat,
            nbf: iat,
            exp: iat + self.config.ttl_seconds,
        };
        jsonwebtoken::encode(
            &Header::new(Algorithm::HS256),
            &claims,
            &EncodingKey::from_secret(self.config.secret.as_bytes()),
        )
        .map_err(|err| TokenIssueError::signing(err.to_string()))
    }
}

/// Failures verifying a presented token.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TokenVerifyError {
    /// The `exp` claim lies in the past.
    #[error("token has expired")]
    Expired,
    /// The `nbf` claim lies in the future.
    #[error("token is not yet valid")]
    Immature,
    /// Bad signature, wrong algorithm, or mismatched claims.
    #[error("token is invalid: {message}")]
    Invalid {
        /// Why validation rejected the token.
        message: String,
    },
}

/// Verify a compact token and recover the principal it names.
///
/// Only HS256 is accepted; any other declared algorithm fails, which guards
/// against `alg: none` and asymmetric-confusion attacks. Issuer, audience,
/// and every time-based claim are checked with zero leeway.
pub fn verify(token: &str, config: &TokenConfig) -> Result<Principal, TokenVerifyError> {
    let mut validation = Validation::new(Algorithm::HS256);
    validation.leeway = 0;
    validation.validate_nbf = true;
    validation.set_issuer(&[config.issuer.as_str()]);
    validation.set_audience(&[config.audience.as_str()]);

    let data = jsonwebtoken::decode::<Claims>(
        token,
        &DecodingKey::from_secret(config.secret.as_bytes()),
        &validation,
    )
    .map_err(|err| match err.kind() {
        jsonwebtoken::errors::ErrorKind::ExpiredSignature => TokenVerifyError::Expired,
        jsonwebtoken::errors::ErrorKind::ImmatureSignature => TokenVerifyError::Immature,
        _ => TokenVerifyError::Invalid {
            message: err.to_string(),
        },
    })?;

    Ok(Principal::new(data.claims.user_id, data.claims.email))
}
