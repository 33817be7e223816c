//! JWT signing and verification against per-kind secrets.

use chrono::{Duration, Utc};
use jsonwebtoken::{
    decode, encode, errors::ErrorKind, Algorithm, DecodingKey, EncodingKey, Header, Validation,
};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

use crate::config::TokenExpiry;
use crate::error::AppResult;
use crate::models::UserVerifyStatus;

/// Purpose of a token; each kind has its own secret.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TokenKind {
    AccessToken,
    RefreshToken,
    ForgotPasswordToken,
    EmailVerifyToken,
}

impl TokenKind {
    pub const ALL: [TokenKind; 4] = [
        TokenKind::AccessToken,
        TokenKind::RefreshToken,
        TokenKind::ForgotPasswordToken,
        TokenKind::EmailVerifyToken,
    ];
}

/// Decoded token payload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenPayload {
    pub user_id: Uuid,
    pub token_type: TokenKind,
    pub verify: UserVerifyStatus,
    pub iat: i64,
    pub exp: i64,
}

/// Verification failure with a human-readable, lower-case reason.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{reason}")]
pub struct TokenInvalid {
    reason: &'static str,
}

impl TokenInvalid {
    pub const EXPIRED: &'static str = "jwt expired";
    pub const INVALID_SIGNATURE: &'static str = "invalid signature";
    pub const MALFORMED: &'static str = "jwt malformed";
    pub const NOT_A_STRING: &'static str = "jwt must be a string";

    pub fn new(reason: &'static str) -> Self {
        Self { reason }
    }

    pub fn reason(&self) -> &'static str {
        self.reason
    }

    /// Reason with the first letter upper-cased and the rest lower-cased.
    pub fn capitalized(&self) -> String {
        capitalize(self.reason)
    }
}

impl From<jsonwebtoken::errors::Error> for TokenInvalid {
    fn from(e: jsonwebtoken::errors::Error) -> Self {
        let reason = match e.kind() {
            ErrorKind::ExpiredSignature => Self::EXPIRED,
            ErrorKind::InvalidSignature => Self::INVALID_SIGNATURE,
            ErrorKind::InvalidToken
            | ErrorKind::Base64(_)
            | ErrorKind::Json(_)
            | ErrorKind::Utf8(_) => Self::MALFORMED,
            ErrorKind::InvalidAlgorithm | ErrorKind::MissingAlgorithm => "invalid algorithm",
            ErrorKind::ImmatureSignature => "jwt not active",
            _ => "invalid token",
        };
        Self { reason }
    }
}

pub fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first
            .to_uppercase()
            .chain(chars.flat_map(char::to_lowercase))
            .collect(),
        None => String::new(),
    }
}

/// One signing secret per token kind.
#[derive(Clone, PartialEq, Eq)]
pub struct TokenSecrets {
    pub access: String,
    pub refresh: String,
    pub email_verify: String,
    pub forgot_password: String,
}

impl TokenSecrets {
    pub fn for_kind(&self, kind: TokenKind) -> &str {
        match kind {
            TokenKind::AccessToken => &self.access,
            TokenKind::RefreshToken => &self.refresh,
            TokenKind::EmailVerifyToken => &self.email_verify,
            TokenKind::ForgotPasswordToken => &self.forgot_password,
        }
    }
}

impl std::fmt::Debug for TokenSecrets {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("TokenSecrets(..)")
    }
}

/// Low-level HS256 sign. Deterministic for a fixed payload.
pub fn sign(payload: &TokenPayload, secret: &str) -> AppResult<String> {
    let token = encode(
        &Header::new(Algorithm::HS256),
        payload,
        &EncodingKey::from_secret(secret.as_bytes()),
    )?;
    Ok(token)
}

/// Low-level HS256 verify with expiry checked and no leeway.
pub fn verify(token: &str, secret: &str) -> Result<TokenPayload, TokenInvalid> {
    let mut validation = Validation::new(Algorithm::HS256);
    validation.validate_exp = true;
    validation.leeway = 0;
    let data = decode::<TokenPayload>(
        token,
        &DecodingKey::from_secret(secret.as_bytes()),
        &validation,
    )?;
    Ok(data.claims)
}

/// Issues and verifies tokens, selecting the secret from the token kind.
#[derive(Clone, Debug)]
pub struct TokenService {
    secrets: TokenSecrets,
    expiry: TokenExpiry,
}

impl TokenService {
    pub fn new(secrets: TokenSecrets, expiry: TokenExpiry) -> Self {
        Self { secrets, expiry }
    }

    /// Issue a token of `kind` valid from now for the configured lifetime.
    pub fn issue(
        &self,
        kind: TokenKind,
        user_id: Uuid,
        verify: UserVerifyStatus,
    ) -> AppResult<(String, TokenPayload)> {
        let now = Utc::now();
        let exp = now + self.expiry.for_kind(kind);
        self.issue_at(kind, user_id, verify, now.timestamp(), exp.timestamp())
    }

    /// Issue a token of `kind` with a fixed expiry.
    pub fn issue_until(
        &self,
        kind: TokenKind,
        user_id: Uuid,
        verify: UserVerifyStatus,
        exp: i64,
    ) -> AppResult<(String, TokenPayload)> {
        self.issue_at(kind, user_id, verify, Utc::now().timestamp(), exp)
    }

    fn issue_at(
        &self,
        kind: TokenKind,
        user_id: Uuid,
        verify: UserVerifyStatus,
        iat: i64,
        exp: i64,
    ) -> AppResult<(String, TokenPayload)> {
        let payload = TokenPayload {
            user_id,
            token_type: kind,
            verify,
            iat,
            exp,
        };
        let token = sign(&payload, self.secrets.for_kind(kind))?;
        Ok((token, payload))
    }

    pub fn verify_kind(&self, kind: TokenKind, token: &str) -> Result<TokenPayload, TokenInvalid> {
        verify(token, self.secrets.for_kind(kind))
    }

    pub fn lifetime(&self, kind: TokenKind) -> Duration {
        self.expiry.for_kind(kind)
    }
}
