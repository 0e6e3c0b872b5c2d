//! JWT token generation and validation.
//!
//! Provides HS256 access and refresh tokens.

use chrono::{Duration, Utc};
use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation, decode, encode};
use thiserror::Error;
use uuid::Uuid;

use crate::auth::{Claims, TokenKind, TokenPair};
use crate::config::JwtSettings;

/// JWT configuration.
#[derive(Debug, Clone)]
pub struct JwtConfig {
    /// Secret key for signing tokens.
    pub secret: String,
    /// Access token expiration in minutes.
    pub access_token_expires_minutes: i64,
    /// Refresh token expiration in days.
    pub refresh_token_expires_days: i64,
}

impl Default for JwtConfig {
    fn default() -> Self {
        Self {
            secret: "change-me-in-production".to_string(),
            access_token_expires_minutes: 60,
            refresh_token_expires_days: 365,
        }
    }
}

impl From<&JwtSettings> for JwtConfig {
    fn from(settings: &JwtSettings) -> Self {
        Self {
            secret: settings.secret.clone(),
            access_token_expires_minutes: i64::try_from(settings.access_token_expiry_secs / 60)
                .unwrap_or(i64::MAX),
            refresh_token_expires_days: i64::try_from(settings.refresh_token_expiry_secs / 86_400)
                .unwrap_or(i64::MAX),
        }
    }
}

/// Errors that can occur during JWT operations.
#[derive(Debug, Error)]
pub enum JwtError {
    /// Token encoding failed.
    #[error("failed to encode token: {0}")]
    EncodingError(String),

    /// Token decoding failed.
    #[error("failed to decode token: {0}")]
    DecodingError(String),

    /// Token has expired.
    #[error("token has expired")]
    Expired,

    /// Token is of the wrong kind for this use.
    #[error("expected a {expected:?} token")]
    WrongKind {
        /// Kind the caller required.
        expected: TokenKind,
    },
}

/// JWT service for token operations.
#[derive(Clone)]
pub struct JwtService {
    config: JwtConfig,
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
}

impl std::fmt::Debug for JwtService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JwtService")
            .field("access_minutes", &self.config.access_token_expires_minutes)
            .field("refresh_days", &self.config.refresh_token_expires_days)
            .field("secret", &"[hidden]")
            .finish()
    }
}

impl JwtService {
    /// Creates a new JWT service with the given configuration.
    #[must_use]
    pub fn new(config: JwtConfig) -> Self {
        let encoding_key = EncodingKey::from_secret(config.secret.as_bytes());
        let decoding_key = DecodingKey::from_secret(config.secret.as_bytes());
        Self {
            config,
            encoding_key,
            decoding_key,
        }
    }

    /// Generates an access token for a user.
    ///
    /// # Errors
    ///
    /// Returns `JwtError::EncodingError` if token generation fails.
    pub fn generate_access_token(
        &self,
        user_id: Uuid,
        username: &str,
        admin: bool,
    ) -> Result<String, JwtError> {
        let expires_at = Utc::now() + Duration::minutes(self.config.access_token_expires_minutes);
        self.encode(&Claims::new(
            user_id,
            username,
            admin,
            TokenKind::Access,
            expires_at,
        ))
    }

    /// Generates a refresh token for a user.
    ///
    /// # Errors
    ///
    /// Returns `JwtError::EncodingError` if token generation fails.
    pub fn generate_refresh_token(
        &self,
        user_id: Uuid,
        username: &str,
        admin: bool,
    ) -> Result<String, JwtError> {
        let expires_at = Utc::now() + Duration::days(self.config.refresh_token_expires_days);
        self.encode(&Claims::new(
            user_id,
            username,
            admin,
            TokenKind::Refresh,
            expires_at,
        ))
    }

    /// Issues an access/refresh token pair.
    ///
    /// # Errors
    ///
    /// Returns `JwtError::EncodingError` if either token cannot be generated.
    pub fn issue_pair(
        &self,
        user_id: Uuid,
        username: &str,
        admin: bool,
    ) -> Result<TokenPair, JwtError> {
        Ok(TokenPair {
            access_token: self.generate_access_token(user_id, username, admin)?,
            refresh_token: self.generate_refresh_token(user_id, username, admin)?,
            expires_in: self.access_token_expires_in(),
        })
    }

    /// Validates and decodes an access token.
    ///
    /// # Errors
    ///
    /// Returns `JwtError::Expired` if the token has expired, `JwtError::WrongKind`
    /// for a refresh token, and `JwtError::DecodingError` if it is malformed.
    pub fn validate_token(&self, token: &str) -> Result<Claims, JwtError> {
        self.validate_kind(token, TokenKind::Access)
    }

    /// Validates and decodes a refresh token.
    ///
    /// # Errors
    ///
    /// Same as [`Self::validate_token`], with the kinds swapped.
    pub fn validate_refresh_token(&self, token: &str) -> Result<Claims, JwtError> {
        self.validate_kind(token, TokenKind::Refresh)
    }

    /// Returns the access token expiration in seconds.
    #[must_use]
    pub const fn access_token_expires_in(&self) -> i64 {
        self.config.access_token_expires_minutes * 60
    }

    fn encode(&self, claims: &Claims) -> Result<String, JwtError> {
        encode(&Header::default(), claims, &self.encoding_key)
            .map_err(|e| JwtError::EncodingError(e.to_string()))
    }

    fn validate_kind(&self, token: &str, expected: TokenKind) -> Result<Claims, JwtError> {
        let claims = decode::<Claims>(token, &self.decoding_key, &Validation::default())
            .map(|data| data.claims)
            .map_err(|e| match e.kind() {
                jsonwebtoken::errors::ErrorKind::ExpiredSignature => JwtError::Expired,
                _ => JwtError::DecodingError(e.to_string()),
            })?;

        if claims.kind == expected {
            Ok(claims)
        } else {
            Err(JwtError::WrongKind { expected })
        }
    }
}
