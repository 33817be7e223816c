//! Shared state and the health handler.

use std::sync::Arc;

use axum::{http::StatusCode, Json};
use serde_json::json;

use crate::auth::{PasswordHasher, TokenService};
use crate::repositories::{
    MemoryStore, ProductRepository, RefreshTokenRepository, UserRepository,
};

/// Shared application state for the user routes and their validation.
#[derive(Clone)]
pub struct AppState {
    pub users: Arc<dyn UserRepository>,
    pub refresh_tokens: Arc<dyn RefreshTokenRepository>,
    pub products: Arc<dyn ProductRepository>,
    pub tokens: TokenService,
    pub hasher: PasswordHasher,
}

impl AppState {
    pub fn new(
        users: Arc<dyn UserRepository>,
        refresh_tokens: Arc<dyn RefreshTokenRepository>,
        products: Arc<dyn ProductRepository>,
        tokens: TokenService,
        hasher: PasswordHasher,
    ) -> Self {
        Self {
            users,
            refresh_tokens,
            products,
            tokens,
            hasher,
        }
    }

    /// Every store backed by one [`MemoryStore`].
    pub fn from_memory(store: MemoryStore, tokens: TokenService, hasher: PasswordHasher) -> Self {
        let store = Arc::new(store);
        Self::new(store.clone(), store.clone(), store, tokens, hasher)
    }
}

#[cfg(test)]
impl AppState {
    pub(crate) fn in_memory() -> Self {
        Self::in_memory_with(MemoryStore::new())
    }

    pub(crate) fn in_memory_with(store: MemoryStore) -> Self {
        use crate::auth::TokenSecrets;
        use crate::config::TokenExpiry;

        let secrets = TokenSecrets {
            access: "test-access".to_string(),
            refresh: "test-refresh".to_string(),
            email_verify: "test-email-verify".to_string(),
            forgot_password: "test-forgot-password".to_string(),
        };
        Self::from_memory(
            store,
            TokenService::new(secrets, TokenExpiry::default()),
            PasswordHasher::new("test-password".to_string()),
        )
    }
}

/// GET /health: liveness check.
pub async fn health() -> (StatusCode, Json<serde_json::Value>) {
    (
        StatusCode::OK,
        Json(json!({ "status": "ok", "service": "storefront-auth" })),
    )
}
