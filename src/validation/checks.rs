//! Custom checks that consult the token service or the data store.

use async_trait::async_trait;
use futures::future::try_join_all;
use once_cell::sync::Lazy;
use regex::Regex;
use serde_json::Value;
use tracing::debug;
use uuid::Uuid;

use super::context::Attachment;
use super::rule::{CheckContext, CheckResult, CustomCheck, FieldFailure};
use crate::auth::{TokenInvalid, TokenKind, TokenPayload};
use crate::error::StatusError;
use crate::messages::{products, users};

static USERNAME_CHARS: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[A-Za-z0-9_]{4,15}$").expect("valid regex"));
static ALL_DIGITS: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[0-9]+$").expect("valid regex"));

/// Password length bounds in characters, inclusive.
pub const PASSWORD_MIN_LEN: usize = 8;
pub const PASSWORD_MAX_LEN: usize = 30;

/// 4 to 15 letters, digits or underscores, not digits only.
pub fn is_valid_username(s: &str) -> bool {
    USERNAME_CHARS.is_match(s) && !ALL_DIGITS.is_match(s)
}

fn rejected(e: TokenInvalid) -> FieldFailure {
    StatusError::unauthorized(e.capitalized()).into()
}

/// Token string of a token field; absence is a 401 with `required`.
fn token_str<'v>(value: &'v Value, required: &'static str) -> Result<&'v str, FieldFailure> {
    match value {
        Value::Null => Err(StatusError::unauthorized(required).into()),
        Value::String(s) if s.is_empty() => Err(StatusError::unauthorized(required).into()),
        Value::String(s) => Ok(s),
        _ => Err(rejected(TokenInvalid::new(TokenInvalid::NOT_A_STRING))),
    }
}

fn attachment_for(kind: TokenKind, payload: TokenPayload) -> Attachment {
    match kind {
        TokenKind::AccessToken => Attachment::DecodedAuthorization(payload),
        TokenKind::RefreshToken => Attachment::DecodedRefreshToken(payload),
        TokenKind::EmailVerifyToken => Attachment::DecodedEmailVerifyToken(payload),
        TokenKind::ForgotPasswordToken => Attachment::DecodedForgotPasswordToken(payload),
    }
}

/// Login: `(email, hash(password))` must match a user exactly.
///
/// Skipped while the password itself is missing or out of bounds, so its
/// own rule reports the field.
pub struct CredentialsMatch;

#[async_trait]
impl CustomCheck for CredentialsMatch {
    async fn check(&self, value: &Value, cx: &CheckContext<'_>) -> CheckResult {
        let password = cx.sibling_str("password");
        let len = password.chars().count();
        if !(PASSWORD_MIN_LEN..=PASSWORD_MAX_LEN).contains(&len) {
            return Ok(None);
        }
        let email = value.as_str().unwrap_or_default();
        let hash = cx.state.hasher.hash(password)?;
        match cx.state.users.find_by_credentials(email, &hash).await? {
            Some(user) => Ok(Some(Attachment::User(user))),
            None => Err(StatusError::unauthorized(users::EMAIL_OR_PASSWORD_IS_INCORRECT).into()),
        }
    }
}

/// Register: the email must not belong to an account yet.
pub struct EmailNotRegistered;

#[async_trait]
impl CustomCheck for EmailNotRegistered {
    async fn check(&self, value: &Value, cx: &CheckContext<'_>) -> CheckResult {
        let email = value.as_str().unwrap_or_default();
        if cx.state.users.find_by_email(email).await?.is_some() {
            return Err(FieldFailure::invalid(users::EMAIL_ALREADY_EXISTS));
        }
        Ok(None)
    }
}

/// Forgot password: the email must belong to an account, which is attached.
pub struct EmailRegistered;

#[async_trait]
impl CustomCheck for EmailRegistered {
    async fn check(&self, value: &Value, cx: &CheckContext<'_>) -> CheckResult {
        let email = value.as_str().unwrap_or_default();
        match cx.state.users.find_by_email(email).await? {
            Some(user) => Ok(Some(Attachment::User(user))),
            None => Err(StatusError::not_found(users::USER_NOT_FOUND).into()),
        }
    }
}

/// Confirm password must equal the `password` field.
pub struct SameAsPassword;

#[async_trait]
impl CustomCheck for SameAsPassword {
    async fn check(&self, value: &Value, cx: &CheckContext<'_>) -> CheckResult {
        if value.as_str() != Some(cx.sibling_str("password")) {
            return Err(FieldFailure::invalid(
                users::CONFIRM_PASSWORD_MUST_BE_THE_SAME_AS_PASSWORD,
            ));
        }
        Ok(None)
    }
}

/// A token field verified against the secret of `kind`.
pub struct SignedToken {
    pub kind: TokenKind,
    pub required: &'static str,
}

#[async_trait]
impl CustomCheck for SignedToken {
    async fn check(&self, value: &Value, cx: &CheckContext<'_>) -> CheckResult {
        let token = token_str(value, self.required)?;
        let decoded = cx.state.tokens.verify_kind(self.kind, token).map_err(rejected)?;
        Ok(Some(attachment_for(self.kind, decoded)))
    }
}

/// `Authorization: Bearer <access token>`.
pub struct BearerAccessToken;

#[async_trait]
impl CustomCheck for BearerAccessToken {
    async fn check(&self, value: &Value, cx: &CheckContext<'_>) -> CheckResult {
        let header = value.as_str().unwrap_or_default();
        let token = header.split(' ').nth(1).unwrap_or_default();
        if token.is_empty() {
            return Err(StatusError::unauthorized(users::ACCESS_TOKEN_IS_REQUIRED).into());
        }
        let decoded = cx
            .state
            .tokens
            .verify_kind(TokenKind::AccessToken, token)
            .map_err(rejected)?;
        Ok(Some(Attachment::DecodedAuthorization(decoded)))
    }
}

/// Refresh token: signature and store record are checked at the same time.
pub struct RefreshTokenCheck;

#[async_trait]
impl CustomCheck for RefreshTokenCheck {
    async fn check(&self, value: &Value, cx: &CheckContext<'_>) -> CheckResult {
        let token = token_str(value, users::REFRESH_TOKEN_IS_REQUIRED)?;
        let verify = async {
            cx.state
                .tokens
                .verify_kind(TokenKind::RefreshToken, token)
                .map_err(rejected)
        };
        let lookup = async {
            cx.state
                .refresh_tokens
                .find(token)
                .await
                .map_err(FieldFailure::from)
        };
        let (decoded, stored) = tokio::try_join!(verify, lookup)?;
        if stored.is_none() {
            debug!(user_id = %decoded.user_id, "refresh token not in store");
            return Err(StatusError::unauthorized(users::USED_REFRESH_TOKEN_OR_NOT_EXIST).into());
        }
        Ok(Some(Attachment::DecodedRefreshToken(decoded)))
    }
}

/// Forgot-password token: valid, owned by an existing user, and the one
/// currently stored on that user.
pub struct ForgotPasswordTokenCheck;

#[async_trait]
impl CustomCheck for ForgotPasswordTokenCheck {
    async fn check(&self, value: &Value, cx: &CheckContext<'_>) -> CheckResult {
        let token = token_str(value, users::FORGOT_PASSWORD_TOKEN_IS_REQUIRED)?;
        let decoded = cx
            .state
            .tokens
            .verify_kind(TokenKind::ForgotPasswordToken, token)
            .map_err(rejected)?;
        let user = cx
            .state
            .users
            .find_by_id(decoded.user_id)
            .await?
            .ok_or_else(|| StatusError::not_found(users::USER_NOT_FOUND))?;
        if user.forgot_password_token != token {
            return Err(
                StatusError::unauthorized(users::FORGOT_PASSWORD_TOKEN_IS_INCORRECT).into(),
            );
        }
        Ok(Some(Attachment::DecodedForgotPasswordToken(decoded)))
    }
}

/// Change password: `old_password` must match the authenticated user's hash.
pub struct OldPasswordMatches;

#[async_trait]
impl CustomCheck for OldPasswordMatches {
    async fn check(&self, value: &Value, cx: &CheckContext<'_>) -> CheckResult {
        let user_id = cx.context.authorization()?.user_id;
        let user = cx
            .state
            .users
            .find_by_id(user_id)
            .await?
            .ok_or_else(|| StatusError::unauthorized(users::USER_NOT_FOUND))?;
        let old = value.as_str().unwrap_or_default();
        if !cx.state.hasher.matches(old, &user.password)? {
            return Err(StatusError::unauthorized(users::OLD_PASSWORD_NOT_MATCH).into());
        }
        Ok(None)
    }
}

/// Update profile: the username must not belong to another user.
pub struct UsernameAvailable;

#[async_trait]
impl CustomCheck for UsernameAvailable {
    async fn check(&self, value: &Value, cx: &CheckContext<'_>) -> CheckResult {
        let username = value.as_str().unwrap_or_default();
        let me = cx.context.decoded_authorization.as_ref().map(|p| p.user_id);
        match cx.state.users.find_by_username(username).await? {
            Some(owner) if Some(owner.id) != me => {
                Err(FieldFailure::invalid(users::USERNAME_ALREADY_EXISTS))
            }
            _ => Ok(None),
        }
    }
}

/// Wishlist: a non-empty array of ids of existing products.
pub struct ProductsExist;

impl ProductsExist {
    fn parse_ids(value: &Value) -> Result<Vec<Uuid>, StatusError> {
        if super::rule::is_empty(value) {
            return Err(StatusError::bad_request(products::PRODUCT_ID_IS_REQUIRED));
        }
        let items = value
            .as_array()
            .ok_or_else(|| StatusError::bad_request(products::PRODUCT_ID_NOT_ARRAY))?;
        items
            .iter()
            .map(|item| {
                item.as_str()
                    .and_then(|s| Uuid::parse_str(s).ok())
                    .ok_or_else(|| StatusError::bad_request(products::PRODUCT_ID_IS_INVALID))
            })
            .collect()
    }
}

#[async_trait]
impl CustomCheck for ProductsExist {
    async fn check(&self, value: &Value, cx: &CheckContext<'_>) -> CheckResult {
        let ids = Self::parse_ids(value)?;
        let lookups = ids.iter().map(|id| async move {
            match cx.state.products.find_by_id(*id).await {
                Ok(Some(_)) => Ok(()),
                Ok(None) => Err(StatusError::not_found(products::PRODUCT_NOT_FOUND)),
                Err(e) => Err(StatusError::internal(e.to_string())),
            }
        });
        try_join_all(lookups).await?;
        Ok(None)
    }
}
