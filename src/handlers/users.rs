//! User routes. Each handler runs after its pipeline has validated the request.

use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use tracing::{debug, info};
use uuid::Uuid;

use crate::auth::TokenKind;
use crate::error::{AppError, AppResult};
use crate::handlers::http::AppState;
use crate::messages::{products, users};
use crate::middleware::{verified_user, Pipeline, Stage, Validated};
use crate::models::{NewUser, ProfilePatch, RefreshToken, UserVerifyStatus};
use crate::validation::schemas;

pub struct Login;
pub struct Register;
pub struct Logout;
pub struct RefreshTokenRoute;
pub struct VerifyEmail;
pub struct ForgotPassword;
pub struct VerifyForgotPassword;
pub struct ResetPassword;
pub struct GetMe;
pub struct UpdateMe;
pub struct ChangePassword;
pub struct AddToWishlist;
pub struct RemoveFromWishlist;

impl Pipeline for Login {
    fn stages() -> Vec<Stage> {
        vec![Stage::Validate(&schemas::LOGIN)]
    }
}

impl Pipeline for Register {
    fn stages() -> Vec<Stage> {
        vec![Stage::Validate(&schemas::REGISTER)]
    }
}

impl Pipeline for Logout {
    fn stages() -> Vec<Stage> {
        vec![
            Stage::Validate(&schemas::ACCESS_TOKEN),
            Stage::Validate(&schemas::REFRESH_TOKEN),
        ]
    }
}

impl Pipeline for RefreshTokenRoute {
    fn stages() -> Vec<Stage> {
        vec![Stage::Validate(&schemas::REFRESH_TOKEN)]
    }
}

impl Pipeline for VerifyEmail {
    fn stages() -> Vec<Stage> {
        vec![Stage::Validate(&schemas::EMAIL_VERIFY_TOKEN)]
    }
}

impl Pipeline for ForgotPassword {
    fn stages() -> Vec<Stage> {
        vec![Stage::Validate(&schemas::FORGOT_PASSWORD)]
    }
}

impl Pipeline for VerifyForgotPassword {
    fn stages() -> Vec<Stage> {
        vec![Stage::Validate(&schemas::VERIFY_FORGOT_PASSWORD_TOKEN)]
    }
}

impl Pipeline for ResetPassword {
    fn stages() -> Vec<Stage> {
        vec![
            Stage::Validate(&schemas::VERIFY_FORGOT_PASSWORD_TOKEN),
            Stage::Validate(&schemas::RESET_PASSWORD),
        ]
    }
}

impl Pipeline for GetMe {
    fn stages() -> Vec<Stage> {
        vec![Stage::Validate(&schemas::ACCESS_TOKEN)]
    }
}

impl Pipeline for UpdateMe {
    fn stages() -> Vec<Stage> {
        vec![
            Stage::Validate(&schemas::ACCESS_TOKEN),
            Stage::Guard(verified_user),
            Stage::Validate(&schemas::UPDATE_ME),
        ]
    }
}

impl Pipeline for ChangePassword {
    fn stages() -> Vec<Stage> {
        vec![
            Stage::Validate(&schemas::ACCESS_TOKEN),
            Stage::Guard(verified_user),
            Stage::Validate(&schemas::CHANGE_PASSWORD),
        ]
    }
}

impl Pipeline for AddToWishlist {
    fn stages() -> Vec<Stage> {
        vec![
            Stage::Validate(&schemas::ACCESS_TOKEN),
            Stage::Guard(verified_user),
            Stage::Validate(&schemas::ADD_TO_WISHLIST),
        ]
    }
}

impl Pipeline for RemoveFromWishlist {
    fn stages() -> Vec<Stage> {
        vec![
            Stage::Validate(&schemas::ACCESS_TOKEN),
            Stage::Guard(verified_user),
            Stage::Validate(&schemas::REMOVE_FROM_WISHLIST),
        ]
    }
}

#[derive(Debug, Serialize)]
pub struct TokenPair {
    pub access_token: String,
    pub refresh_token: String,
}

#[derive(Debug, Deserialize)]
struct RegisterRequest {
    first_name: String,
    last_name: String,
    email: String,
    password: String,
    avatar: Option<String>,
}

#[derive(Debug, Deserialize)]
struct RefreshTokenRequest {
    refresh_token: String,
}

#[derive(Debug, Deserialize)]
struct PasswordRequest {
    password: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct WishlistRequest {
    product_id: Vec<Uuid>,
}

/// Issue an access/refresh pair and store the refresh token.
async fn issue_pair(
    state: &AppState,
    user_id: Uuid,
    verify: UserVerifyStatus,
) -> AppResult<TokenPair> {
    let (access_token, _) = state.tokens.issue(TokenKind::AccessToken, user_id, verify)?;
    let (refresh_token, decoded) = state.tokens.issue(TokenKind::RefreshToken, user_id, verify)?;
    state
        .refresh_tokens
        .insert(RefreshToken::new(&refresh_token, user_id, decoded.exp))
        .await?;
    Ok(TokenPair {
        access_token,
        refresh_token,
    })
}

fn message(message: &str) -> Json<Value> {
    Json(json!({ "message": message }))
}

fn message_with<T: Serialize>(message: &str, result: T) -> Json<Value> {
    Json(json!({ "message": message, "result": result }))
}

/// POST /users/login
pub async fn login(
    State(state): State<AppState>,
    validated: Validated<Login>,
) -> AppResult<Json<Value>> {
    let user = validated.context.user()?;
    let pair = issue_pair(&state, user.id, user.verify).await?;
    info!(user_id = %user.id, "user logged in");
    Ok(message_with(users::LOGIN_SUCCESS, pair))
}

/// POST /users/register
pub async fn register(
    State(state): State<AppState>,
    validated: Validated<Register>,
) -> AppResult<Json<Value>> {
    let body: RegisterRequest = validated.json()?;
    let id = Uuid::new_v4();
    let (email_verify_token, _) =
        state
            .tokens
            .issue(TokenKind::EmailVerifyToken, id, UserVerifyStatus::Unverified)?;
    let user = state
        .users
        .insert(NewUser {
            id,
            email: body.email,
            password: state.hasher.hash(&body.password)?,
            first_name: body.first_name,
            last_name: body.last_name,
            avatar: body.avatar.filter(|a| !a.is_empty()),
            email_verify_token,
        })
        .await?;
    debug!(user_id = %user.id, "email verify token issued");
    let pair = issue_pair(&state, user.id, user.verify).await?;
    info!(user_id = %user.id, "user registered");
    Ok(message_with(users::REGISTER_SUCCESS, pair))
}

/// POST /users/logout
pub async fn logout(
    State(state): State<AppState>,
    validated: Validated<Logout>,
) -> AppResult<Json<Value>> {
    let body: RefreshTokenRequest = validated.json()?;
    state.refresh_tokens.delete(&body.refresh_token).await?;
    Ok(message(users::LOGOUT_SUCCESS))
}

/// POST /users/refresh-token — the new refresh token keeps the old expiry.
pub async fn refresh_token(
    State(state): State<AppState>,
    validated: Validated<RefreshTokenRoute>,
) -> AppResult<Json<Value>> {
    let body: RefreshTokenRequest = validated.json()?;
    let decoded = validated.context.refresh_token()?;
    let (access_token, _) =
        state
            .tokens
            .issue(TokenKind::AccessToken, decoded.user_id, decoded.verify)?;
    let (refresh_token, _) = state.tokens.issue_until(
        TokenKind::RefreshToken,
        decoded.user_id,
        decoded.verify,
        decoded.exp,
    )?;
    state.refresh_tokens.delete(&body.refresh_token).await?;
    state
        .refresh_tokens
        .insert(RefreshToken::new(&refresh_token, decoded.user_id, decoded.exp))
        .await?;
    Ok(message_with(
        users::REFRESH_TOKEN_SUCCESS,
        TokenPair {
            access_token,
            refresh_token,
        },
    ))
}

/// POST /users/verify-email
pub async fn verify_email(
    State(state): State<AppState>,
    validated: Validated<VerifyEmail>,
) -> AppResult<Json<Value>> {
    let decoded = validated.context.email_verify_token()?;
    let user = state
        .users
        .find_by_id(decoded.user_id)
        .await?
        .ok_or_else(|| AppError::not_found(users::USER_NOT_FOUND))?;
    if user.email_verify_token.is_empty() {
        return Ok(message(users::EMAIL_ALREADY_VERIFIED));
    }
    state
        .users
        .set_verify(user.id, UserVerifyStatus::Verified)
        .await?;
    let pair = issue_pair(&state, user.id, UserVerifyStatus::Verified).await?;
    Ok(message_with(users::EMAIL_VERIFY_SUCCESS, pair))
}

/// POST /users/forgot-password — delivery of the token is left to the mailer.
pub async fn forgot_password(
    State(state): State<AppState>,
    validated: Validated<ForgotPassword>,
) -> AppResult<Json<Value>> {
    let user = validated.context.user()?;
    let (token, _) = state
        .tokens
        .issue(TokenKind::ForgotPasswordToken, user.id, user.verify)?;
    state.users.set_forgot_password_token(user.id, &token).await?;
    debug!(user_id = %user.id, "forgot password token issued");
    Ok(message(users::CHECK_EMAIL_TO_RESET_PASSWORD))
}

/// POST /users/verify-forgot-password
pub async fn verify_forgot_password(
    _validated: Validated<VerifyForgotPassword>,
) -> AppResult<Json<Value>> {
    Ok(message(users::VERIFY_FORGOT_PASSWORD_SUCCESS))
}

/// POST /users/reset-password
pub async fn reset_password(
    State(state): State<AppState>,
    validated: Validated<ResetPassword>,
) -> AppResult<Json<Value>> {
    let body: PasswordRequest = validated.json()?;
    let decoded = validated.context.forgot_password_token()?;
    let hash = state.hasher.hash(&body.password)?;
    state.users.set_password(decoded.user_id, &hash).await?;
    Ok(message(users::RESET_PASSWORD_SUCCESS))
}

/// GET /users/me
pub async fn get_me(
    State(state): State<AppState>,
    validated: Validated<GetMe>,
) -> AppResult<Json<Value>> {
    let user_id = validated.context.authorization()?.user_id;
    let user = state
        .users
        .find_by_id(user_id)
        .await?
        .ok_or_else(|| AppError::not_found(users::USER_NOT_FOUND))?;
    Ok(message_with(users::GET_ME_SUCCESS, user))
}

/// PATCH /users/me
pub async fn update_me(
    State(state): State<AppState>,
    validated: Validated<UpdateMe>,
) -> AppResult<Json<Value>> {
    let patch: ProfilePatch = validated.json()?;
    let user_id = validated.context.authorization()?.user_id;
    let user = state
        .users
        .update_profile(user_id, patch)
        .await?
        .ok_or_else(|| AppError::not_found(users::USER_NOT_FOUND))?;
    Ok(message_with(users::UPDATE_ME_SUCCESS, user))
}

/// PUT /users/change-password
pub async fn change_password(
    State(state): State<AppState>,
    validated: Validated<ChangePassword>,
) -> AppResult<Json<Value>> {
    let body: PasswordRequest = validated.json()?;
    let user_id = validated.context.authorization()?.user_id;
    let hash = state.hasher.hash(&body.password)?;
    state.users.set_password(user_id, &hash).await?;
    Ok(message(users::CHANGE_PASSWORD_SUCCESS))
}

/// POST /users/wishlist
pub async fn add_to_wishlist(
    State(state): State<AppState>,
    validated: Validated<AddToWishlist>,
) -> AppResult<Json<Value>> {
    let body: WishlistRequest = validated.json()?;
    let user_id = validated.context.authorization()?.user_id;
    let wishlist = state.users.add_to_wishlist(user_id, &body.product_id).await?;
    Ok(message_with(
        products::ADD_TO_WISHLIST_SUCCESS,
        json!({ "wishlist": wishlist }),
    ))
}

/// DELETE /users/wishlist
pub async fn remove_from_wishlist(
    State(state): State<AppState>,
    validated: Validated<RemoveFromWishlist>,
) -> AppResult<Json<Value>> {
    let body: WishlistRequest = validated.json()?;
    let user_id = validated.context.authorization()?.user_id;
    let wishlist = state
        .users
        .remove_from_wishlist(user_id, &body.product_id)
        .await?;
    Ok(message_with(
        products::REMOVE_FROM_WISHLIST_SUCCESS,
        json!({ "wishlist": wishlist }),
    ))
}
