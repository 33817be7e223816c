//! Authenticated context produced by validation and consumed downstream.

use crate::auth::TokenPayload;
use crate::error::{AppError, AppResult};
use crate::models::User;

/// Derived state a custom check hands forward after it succeeds.
#[derive(Debug, Clone, PartialEq)]
pub enum Attachment {
    User(User),
    DecodedAuthorization(TokenPayload),
    DecodedRefreshToken(TokenPayload),
    DecodedEmailVerifyToken(TokenPayload),
    DecodedForgotPasswordToken(TokenPayload),
}

/// Context threaded through a route's stages and handed to its handler.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RequestContext {
    pub user: Option<User>,
    pub decoded_authorization: Option<TokenPayload>,
    pub decoded_refresh_token: Option<TokenPayload>,
    pub decoded_email_verify_token: Option<TokenPayload>,
    pub decoded_forgot_password_token: Option<TokenPayload>,
}

impl RequestContext {
    pub fn attach(&mut self, attachment: Attachment) {
        match attachment {
            Attachment::User(u) => self.user = Some(u),
            Attachment::DecodedAuthorization(p) => self.decoded_authorization = Some(p),
            Attachment::DecodedRefreshToken(p) => self.decoded_refresh_token = Some(p),
            Attachment::DecodedEmailVerifyToken(p) => self.decoded_email_verify_token = Some(p),
            Attachment::DecodedForgotPasswordToken(p) => {
                self.decoded_forgot_password_token = Some(p)
            }
        }
    }

    pub fn user(&self) -> AppResult<&User> {
        self.user.as_ref().ok_or_else(|| missing("user"))
    }

    pub fn authorization(&self) -> AppResult<&TokenPayload> {
        self.decoded_authorization
            .as_ref()
            .ok_or_else(|| missing("decoded_authorization"))
    }

    pub fn refresh_token(&self) -> AppResult<&TokenPayload> {
        self.decoded_refresh_token
            .as_ref()
            .ok_or_else(|| missing("decoded_refresh_token"))
    }

    pub fn email_verify_token(&self) -> AppResult<&TokenPayload> {
        self.decoded_email_verify_token
            .as_ref()
            .ok_or_else(|| missing("decoded_email_verify_token"))
    }

    pub fn forgot_password_token(&self) -> AppResult<&TokenPayload> {
        self.decoded_forgot_password_token
            .as_ref()
            .ok_or_else(|| missing("decoded_forgot_password_token"))
    }
}

/// A stage read context that an earlier stage should have produced.
fn missing(what: &str) -> AppError {
    AppError::Internal(anyhow::anyhow!("request context has no {}", what))
}
