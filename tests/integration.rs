//! Integration tests: the user routes end to end against the in-memory store.
//!
//! `postgres_and_redis_health` additionally needs `TEST_DATABASE_URL` and
//! `TEST_REDIS_URL`; it is skipped when they are unset.

use std::sync::Arc;

use axum::body::Body;
use axum::http::{header, Method, Request, StatusCode};
use axum::Router;
use chrono::Utc;
use serde_json::{json, Value};
use storefront_auth::auth::{
    self, PasswordHasher, TokenKind, TokenPayload, TokenSecrets, TokenService,
};
use storefront_auth::config::TokenExpiry;
use storefront_auth::db::{self, PgStore};
use storefront_auth::error::AppResult;
use storefront_auth::models::{NewUser, Product, RefreshToken, User, UserVerifyStatus};
use storefront_auth::repositories::{
    self, MemoryStore, RedisRepository, RefreshTokenRepository, UserRepository,
};
use storefront_auth::{create_app, AppError, AppState};
use tower::util::ServiceExt;
use uuid::Uuid;

const PASSWORD: &str = "correct horse";

fn token_service() -> TokenService {
    TokenService::new(
        TokenSecrets {
            access: "it-access".to_string(),
            refresh: "it-refresh".to_string(),
            email_verify: "it-email-verify".to_string(),
            forgot_password: "it-forgot-password".to_string(),
        },
        TokenExpiry::default(),
    )
}

fn hasher() -> PasswordHasher {
    PasswordHasher::new("it-password".to_string())
}

fn setup() -> (Router, MemoryStore, AppState) {
    let store = MemoryStore::new();
    let state = AppState::from_memory(store.clone(), token_service(), hasher());
    (create_app(state.clone()), store, state)
}

async fn seed_user(store: &MemoryStore, email: &str, verify: UserVerifyStatus) -> User {
    let mut user = NewUser {
        id: Uuid::new_v4(),
        email: email.to_string(),
        password: hasher().hash(PASSWORD).unwrap(),
        first_name: "Ada".to_string(),
        last_name: "Lovelace".to_string(),
        avatar: None,
        email_verify_token: String::new(),
    }
    .into_user(Utc::now());
    user.verify = verify;
    store.put_user(user.clone()).await;
    user
}

fn access_token(state: &AppState, user: &User) -> String {
    state
        .tokens
        .issue(TokenKind::AccessToken, user.id, user.verify)
        .unwrap()
        .0
}

async fn send(
    app: &Router,
    method: Method,
    uri: &str,
    authorization: Option<&str>,
    body: Option<Value>,
) -> (StatusCode, Value) {
    let mut req = Request::builder().method(method).uri(uri);
    if let Some(auth) = authorization {
        req = req.header(header::AUTHORIZATION, auth);
    }
    let req = match body {
        Some(b) => req
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(b.to_string())),
        None => req.body(Body::empty()),
    }
    .unwrap();
    let res = app.clone().oneshot(req).await.unwrap();
    let status = res.status();
    let bytes = axum::body::to_bytes(res.into_body(), usize::MAX)
        .await
        .unwrap();
    let json = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, json)
}

fn field_message<'a>(body: &'a Value, field: &str) -> Option<&'a str> {
    body["errors"]
        .as_array()?
        .iter()
        .find(|e| e["field"] == field)
        .and_then(|e| e["message"].as_str())
}

#[tokio::test]
async fn health_returns_ok() {
    let (app, _, _) = setup();
    let (status, body) = send(&app, Method::GET, "/health", None, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
}

#[tokio::test]
async fn register_with_short_password_is_422() {
    let (app, _, _) = setup();
    let (status, body) = send(
        &app,
        Method::POST,
        "/users/register",
        None,
        Some(json!({
            "first_name": "Ada",
            "last_name": "Lovelace",
            "email": "ada@example.com",
            "password": "short",
            "confirm_password": "short",
        })),
    )
    .await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["message"], "Validation error");
    assert_eq!(
        field_message(&body, "password"),
        Some("Password length must be from 8 to 30")
    );
    assert_eq!(field_message(&body, "email"), None);
}

#[tokio::test]
async fn register_with_mismatched_confirmation_is_422() {
    let (app, _, _) = setup();
    let (status, body) = send(
        &app,
        Method::POST,
        "/users/register",
        None,
        Some(json!({
            "first_name": "Ada",
            "last_name": "Lovelace",
            "email": "ada@example.com",
            "password": "password-one",
            "confirm_password": "password-two",
        })),
    )
    .await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(
        field_message(&body, "confirm_password"),
        Some("Confirm password must be the same as password")
    );
}

#[tokio::test]
async fn register_creates_unverified_user_and_rejects_duplicate_email() {
    let (app, store, _) = setup();
    let request = json!({
        "first_name": "  Ada ",
        "last_name": "Lovelace",
        "email": " ada@example.com ",
        "password": PASSWORD,
        "confirm_password": PASSWORD,
    });
    let (status, body) = send(&app, Method::POST, "/users/register", None, Some(request.clone())).await;
    assert_eq!(status, StatusCode::OK);
    assert!(body["result"]["access_token"].is_string());

    let user = store.find_by_email("ada@example.com").await.unwrap().unwrap();
    assert_eq!(user.first_name, "Ada");
    assert_eq!(user.verify, UserVerifyStatus::Unverified);
    assert!(!user.email_verify_token.is_empty());

    let (status, body) = send(&app, Method::POST, "/users/register", None, Some(request)).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(field_message(&body, "email"), Some("Email already exists"));
}

#[tokio::test]
async fn login_with_wrong_password_is_401() {
    let (app, store, _) = setup();
    seed_user(&store, "ada@example.com", UserVerifyStatus::Verified).await;
    let (status, body) = send(
        &app,
        Method::POST,
        "/users/login",
        None,
        Some(json!({ "email": "ada@example.com", "password": "wrong password" })),
    )
    .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["message"], "Email or password is incorrect");
}

#[tokio::test]
async fn login_then_fetch_profile() {
    let (app, store, _) = setup();
    let user = seed_user(&store, "ada@example.com", UserVerifyStatus::Verified).await;
    let (status, body) = send(
        &app,
        Method::POST,
        "/users/login",
        None,
        Some(json!({ "email": "ada@example.com", "password": PASSWORD })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    let access = body["result"]["access_token"].as_str().unwrap().to_string();

    let bearer = format!("Bearer {}", access);
    let (status, body) = send(&app, Method::GET, "/users/me", Some(&bearer), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["result"]["id"], user.id.to_string());
    assert!(body["result"].get("password").is_none());
}

#[tokio::test]
async fn bearer_without_token_is_401() {
    let (app, _, _) = setup();
    let (status, body) = send(&app, Method::GET, "/users/me", Some("Bearer "), None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["message"], "Access token is required");

    let (status, body) = send(&app, Method::GET, "/users/me", None, None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["message"], "Access token is required");
}

#[tokio::test]
async fn expired_access_token_reports_capitalized_reason() {
    let (app, store, state) = setup();
    let user = seed_user(&store, "ada@example.com", UserVerifyStatus::Verified).await;
    let (token, _) = state
        .tokens
        .issue_until(
            TokenKind::AccessToken,
            user.id,
            user.verify,
            Utc::now().timestamp() - 60,
        )
        .unwrap();
    let bearer = format!("Bearer {}", token);
    let (status, body) = send(&app, Method::GET, "/users/me", Some(&bearer), None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["message"], "Jwt expired");
}

#[tokio::test]
async fn refresh_token_not_in_store_is_rejected() {
    let (app, store, state) = setup();
    let user = seed_user(&store, "ada@example.com", UserVerifyStatus::Verified).await;
    let (token, _) = state
        .tokens
        .issue(TokenKind::RefreshToken, user.id, user.verify)
        .unwrap();
    let (status, body) = send(
        &app,
        Method::POST,
        "/users/refresh-token",
        None,
        Some(json!({ "refresh_token": token })),
    )
    .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["message"], "Used refresh token or not exist");
}

#[tokio::test]
async fn access_token_is_not_a_refresh_token() {
    let (app, store, state) = setup();
    let user = seed_user(&store, "ada@example.com", UserVerifyStatus::Verified).await;
    let (status, body) = send(
        &app,
        Method::POST,
        "/users/refresh-token",
        None,
        Some(json!({ "refresh_token": access_token(&state, &user) })),
    )
    .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["message"], "Invalid signature");
}

#[tokio::test]
async fn logout_consumes_the_refresh_token() {
    let (app, store, _) = setup();
    seed_user(&store, "ada@example.com", UserVerifyStatus::Verified).await;
    let (_, body) = send(
        &app,
        Method::POST,
        "/users/login",
        None,
        Some(json!({ "email": "ada@example.com", "password": PASSWORD })),
    )
    .await;
    let bearer = format!("Bearer {}", body["result"]["access_token"].as_str().unwrap());
    let refresh = body["result"]["refresh_token"].clone();

    let (status, _) = send(
        &app,
        Method::POST,
        "/users/logout",
        Some(&bearer),
        Some(json!({ "refresh_token": refresh })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let (status, body) = send(
        &app,
        Method::POST,
        "/users/logout",
        Some(&bearer),
        Some(json!({ "refresh_token": refresh })),
    )
    .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["message"], "Used refresh token or not exist");
}

#[tokio::test]
async fn forgot_password_token_cannot_be_reused() {
    let (app, store, _) = setup();
    let user = seed_user(&store, "ada@example.com", UserVerifyStatus::Verified).await;
    let (status, _) = send(
        &app,
        Method::POST,
        "/users/forgot-password",
        None,
        Some(json!({ "email": "ada@example.com" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    let token = store
        .find_by_id(user.id)
        .await
        .unwrap()
        .unwrap()
        .forgot_password_token;
    assert!(!token.is_empty());

    let reset = json!({
        "forgot_password_token": token,
        "password": "brand new pass",
        "confirm_password": "brand new pass",
    });
    let (status, _) = send(&app, Method::POST, "/users/reset-password", None, Some(reset.clone())).await;
    assert_eq!(status, StatusCode::OK);

    let (status, body) = send(&app, Method::POST, "/users/reset-password", None, Some(reset)).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["message"], "Forgot password token is incorrect");
}

#[tokio::test]
async fn forgot_password_for_unknown_email_is_404() {
    let (app, _, _) = setup();
    let (status, body) = send(
        &app,
        Method::POST,
        "/users/forgot-password",
        None,
        Some(json!({ "email": "nobody@example.com" })),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["message"], "User not found");
}

#[tokio::test]
async fn unverified_user_cannot_update_profile() {
    let (app, store, state) = setup();
    let user = seed_user(&store, "ada@example.com", UserVerifyStatus::Unverified).await;
    let bearer = format!("Bearer {}", access_token(&state, &user));
    let (status, body) = send(
        &app,
        Method::PATCH,
        "/users/me",
        Some(&bearer),
        Some(json!({ "first_name": "Grace" })),
    )
    .await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(body["message"], "User is not verified");
}

#[tokio::test]
async fn verified_user_updates_profile() {
    let (app, store, state) = setup();
    let user = seed_user(&store, "ada@example.com", UserVerifyStatus::Verified).await;
    let bearer = format!("Bearer {}", access_token(&state, &user));
    let (status, body) = send(
        &app,
        Method::PATCH,
        "/users/me",
        Some(&bearer),
        Some(json!({ "first_name": " Grace ", "username": "grace_h" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["result"]["first_name"], "Grace");
    assert_eq!(body["result"]["username"], "grace_h");
    assert_eq!(body["result"]["last_name"], "Lovelace");
}

#[tokio::test]
async fn change_password_requires_matching_old_password() {
    let (app, store, state) = setup();
    let user = seed_user(&store, "ada@example.com", UserVerifyStatus::Verified).await;
    let bearer = format!("Bearer {}", access_token(&state, &user));
    let (status, body) = send(
        &app,
        Method::PUT,
        "/users/change-password",
        Some(&bearer),
        Some(json!({
            "old_password": "not my password",
            "password": "brand new pass",
            "confirm_password": "brand new pass",
        })),
    )
    .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["message"], "Old password not match");
}

#[tokio::test]
async fn wishlist_rejects_unknown_product() {
    let (app, store, state) = setup();
    let user = seed_user(&store, "ada@example.com", UserVerifyStatus::Verified).await;
    let bearer = format!("Bearer {}", access_token(&state, &user));
    let (status, body) = send(
        &app,
        Method::POST,
        "/users/wishlist",
        Some(&bearer),
        Some(json!({ "productId": [Uuid::new_v4()] })),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["message"], "Product not found");
}

#[tokio::test]
async fn wishlist_add_and_remove() {
    let (app, store, state) = setup();
    let user = seed_user(&store, "ada@example.com", UserVerifyStatus::Verified).await;
    let product = Product {
        id: Uuid::new_v4(),
        name: "Teapot".to_string(),
    };
    store.put_product(product.clone()).await;
    let bearer = format!("Bearer {}", access_token(&state, &user));

    let (status, body) = send(
        &app,
        Method::POST,
        "/users/wishlist",
        Some(&bearer),
        Some(json!({ "productId": [product.id] })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["result"]["wishlist"], json!([product.id]));

    let (status, body) = send(
        &app,
        Method::DELETE,
        "/users/wishlist",
        Some(&bearer),
        Some(json!({ "productId": [product.id] })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["result"]["wishlist"], json!([]));
}

#[tokio::test]
async fn wishlist_requires_an_array_of_ids() {
    let (app, store, state) = setup();
    let user = seed_user(&store, "ada@example.com", UserVerifyStatus::Verified).await;
    let bearer = format!("Bearer {}", access_token(&state, &user));
    let (status, body) = send(
        &app,
        Method::POST,
        "/users/wishlist",
        Some(&bearer),
        Some(json!({ "productId": "not-an-array" })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "Product id must be an array");
}

#[tokio::test]
async fn malformed_json_is_400() {
    let (app, _, _) = setup();
    let req = Request::builder()
        .method(Method::POST)
        .uri("/users/login")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from("{not json"))
        .unwrap();
    let res = app.oneshot(req).await.unwrap();
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn login_without_password_reports_the_password_field() {
    let (app, store, _) = setup();
    seed_user(&store, "ada@example.com", UserVerifyStatus::Verified).await;

    let (status, body) = send(
        &app,
        Method::POST,
        "/users/login",
        None,
        Some(json!({ "email": "ada@example.com" })),
    )
    .await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(field_message(&body, "password"), Some("Password is required"));

    let (status, body) = send(
        &app,
        Method::POST,
        "/users/login",
        None,
        Some(json!({ "email": "ada@example.com", "password": "short" })),
    )
    .await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(
        field_message(&body, "password"),
        Some("Password length must be from 8 to 30")
    );
}

#[tokio::test]
async fn oversized_body_is_413() {
    let (app, _, _) = setup();
    let (status, _) = send(
        &app,
        Method::POST,
        "/users/login",
        None,
        Some(json!({ "email": "x".repeat(3 * 1024 * 1024), "password": PASSWORD })),
    )
    .await;
    assert_eq!(status, StatusCode::PAYLOAD_TOO_LARGE);
}

#[tokio::test]
async fn empty_optional_profile_fields_leave_the_profile_unchanged() {
    let (app, store, state) = setup();
    let user = seed_user(&store, "ada@example.com", UserVerifyStatus::Verified).await;
    let bearer = format!("Bearer {}", access_token(&state, &user));
    let (status, body) = send(
        &app,
        Method::PATCH,
        "/users/me",
        Some(&bearer),
        Some(json!({ "first_name": "", "username": "", "location": "" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["result"]["first_name"], "Ada");
    assert_eq!(body["result"]["username"], user.username.as_str());

    let stored = store.find_by_id(user.id).await.unwrap().unwrap();
    assert_eq!(stored.first_name, "Ada");
    assert_eq!(stored.username, user.username);
    assert_eq!(stored.location, None);
}

#[tokio::test]
async fn refresh_rotates_the_token_and_keeps_its_expiry() {
    let (app, store, _) = setup();
    let user = seed_user(&store, "ada@example.com", UserVerifyStatus::Verified).await;
    let now = Utc::now().timestamp();
    let exp = now + 3600;
    let old = auth::sign(
        &TokenPayload {
            user_id: user.id,
            token_type: TokenKind::RefreshToken,
            verify: user.verify,
            iat: now - 100,
            exp,
        },
        "it-refresh",
    )
    .unwrap();
    RefreshTokenRepository::insert(&store, RefreshToken::new(&old, user.id, exp))
        .await
        .unwrap();

    let (status, body) = send(
        &app,
        Method::POST,
        "/users/refresh-token",
        None,
        Some(json!({ "refresh_token": old })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Refresh token success");
    assert!(body["result"]["access_token"].is_string());
    let rotated = body["result"]["refresh_token"].as_str().unwrap().to_string();
    assert_ne!(rotated, old);
    let decoded = auth::verify(&rotated, "it-refresh").unwrap();
    assert_eq!(decoded.exp, exp);
    assert_eq!(decoded.user_id, user.id);
    assert!(RefreshTokenRepository::find(&store, &rotated)
        .await
        .unwrap()
        .is_some());

    let (status, body) = send(
        &app,
        Method::POST,
        "/users/refresh-token",
        None,
        Some(json!({ "refresh_token": old })),
    )
    .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["message"], "Used refresh token or not exist");
}

#[tokio::test]
async fn verify_email_marks_the_user_verified_once() {
    let (app, store, state) = setup();
    let mut user = seed_user(&store, "ada@example.com", UserVerifyStatus::Unverified).await;
    let (token, _) = state
        .tokens
        .issue(TokenKind::EmailVerifyToken, user.id, user.verify)
        .unwrap();
    user.email_verify_token = token.clone();
    store.put_user(user.clone()).await;

    let (status, body) = send(
        &app,
        Method::POST,
        "/users/verify-email",
        None,
        Some(json!({ "email_verify_token": access_token(&state, &user) })),
    )
    .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["message"], "Invalid signature");

    let request = json!({ "email_verify_token": token });
    let (status, body) = send(&app, Method::POST, "/users/verify-email", None, Some(request.clone())).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Email verify success");
    assert!(body["result"]["access_token"].is_string());
    let stored = store.find_by_id(user.id).await.unwrap().unwrap();
    assert_eq!(stored.verify, UserVerifyStatus::Verified);
    assert!(stored.email_verify_token.is_empty());

    let (status, body) = send(&app, Method::POST, "/users/verify-email", None, Some(request)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Email already verified");
}

#[tokio::test]
async fn change_password_then_login_with_the_new_one() {
    let (app, store, state) = setup();
    let user = seed_user(&store, "ada@example.com", UserVerifyStatus::Verified).await;
    let bearer = format!("Bearer {}", access_token(&state, &user));
    let (status, body) = send(
        &app,
        Method::PUT,
        "/users/change-password",
        Some(&bearer),
        Some(json!({
            "old_password": PASSWORD,
            "password": "brand new pass",
            "confirm_password": "brand new pass",
        })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Change password success");

    let (status, _) = send(
        &app,
        Method::POST,
        "/users/login",
        None,
        Some(json!({ "email": "ada@example.com", "password": "brand new pass" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let (status, _) = send(
        &app,
        Method::POST,
        "/users/login",
        None,
        Some(json!({ "email": "ada@example.com", "password": PASSWORD })),
    )
    .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

struct OfflineCatalog;

#[async_trait::async_trait]
impl repositories::ProductRepository for OfflineCatalog {
    async fn find_by_id(&self, _id: Uuid) -> AppResult<Option<Product>> {
        Err(AppError::Internal(anyhow::anyhow!("catalog offline")))
    }
}

#[tokio::test]
async fn wishlist_lookup_failure_is_500() {
    let store = MemoryStore::new();
    let state = AppState::new(
        Arc::new(store.clone()),
        Arc::new(store.clone()),
        Arc::new(OfflineCatalog),
        token_service(),
        hasher(),
    );
    let app = create_app(state.clone());
    let user = seed_user(&store, "ada@example.com", UserVerifyStatus::Verified).await;
    let bearer = format!("Bearer {}", access_token(&state, &user));
    let (status, body) = send(
        &app,
        Method::POST,
        "/users/wishlist",
        Some(&bearer),
        Some(json!({ "productId": [Uuid::new_v4()] })),
    )
    .await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["message"], "Internal error: catalog offline");
}

#[tokio::test]
async fn postgres_and_redis_health() {
    let database_url = match std::env::var("TEST_DATABASE_URL") {
        Ok(u) => u,
        Err(_) => {
            eprintln!("Skip integration test: set TEST_DATABASE_URL and TEST_REDIS_URL");
            return;
        }
    };
    let redis_url =
        std::env::var("TEST_REDIS_URL").unwrap_or_else(|_| "redis://127.0.0.1:6379".to_string());

    let pool = match db::create_pool(&database_url).await {
        Ok(p) => p,
        Err(e) => {
            eprintln!("Skip integration test: {}", e);
            return;
        }
    };
    db::migrate(&pool).await.unwrap();
    let pg = Arc::new(PgStore::new(pool));
    let redis = Arc::new(RedisRepository::new(&redis_url).unwrap());
    let state = AppState::new(pg.clone(), redis, pg, token_service(), hasher());

    let app = create_app(state);
    let (status, _) = send(&app, Method::GET, "/health", None, None).await;
    assert_eq!(status, StatusCode::OK);
}
