//! In-process store for tests and local runs without Postgres/Redis.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;
use uuid::Uuid;

use super::{ProductRepository, RefreshTokenRepository, UserRepository};
use crate::error::{AppError, AppResult};
use crate::messages::users;
use crate::models::{NewUser, Product, ProfilePatch, RefreshToken, User, UserVerifyStatus};

#[derive(Clone, Default)]
pub struct MemoryStore {
    users: Arc<RwLock<HashMap<Uuid, User>>>,
    refresh_tokens: Arc<RwLock<HashMap<String, RefreshToken>>>,
    products: Arc<RwLock<HashMap<Uuid, Product>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or replace a user as-is.
    pub async fn put_user(&self, user: User) {
        self.users.write().await.insert(user.id, user);
    }

    pub async fn put_product(&self, product: Product) {
        self.products.write().await.insert(product.id, product);
    }

    async fn find_user<F>(&self, pred: F) -> Option<User>
    where
        F: Fn(&User) -> bool,
    {
        self.users.read().await.values().find(|u| pred(*u)).cloned()
    }

    async fn modify_user<F>(&self, id: Uuid, f: F) -> Option<User>
    where
        F: FnOnce(&mut User),
    {
        let mut users = self.users.write().await;
        let user = users.get_mut(&id)?;
        f(user);
        user.updated_at = Utc::now();
        Some(user.clone())
    }
}

fn user_not_found() -> AppError {
    AppError::not_found(users::USER_NOT_FOUND)
}

#[async_trait]
impl UserRepository for MemoryStore {
    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<User>> {
        Ok(self.users.read().await.get(&id).cloned())
    }

    async fn find_by_email(&self, email: &str) -> AppResult<Option<User>> {
        Ok(self.find_user(|u| u.email == email).await)
    }

    async fn find_by_credentials(
        &self,
        email: &str,
        password_hash: &str,
    ) -> AppResult<Option<User>> {
        Ok(self
            .find_user(|u| u.email == email && u.password == password_hash)
            .await)
    }

    async fn find_by_username(&self, username: &str) -> AppResult<Option<User>> {
        Ok(self.find_user(|u| u.username == username).await)
    }

    async fn insert(&self, user: NewUser) -> AppResult<User> {
        let mut users = self.users.write().await;
        if users.values().any(|u| u.email == user.email) {
            return Err(AppError::Internal(anyhow::anyhow!(
                "duplicate email on insert"
            )));
        }
        let user = user.into_user(Utc::now());
        users.insert(user.id, user.clone());
        Ok(user)
    }

    async fn set_verify(&self, id: Uuid, verify: UserVerifyStatus) -> AppResult<()> {
        self.modify_user(id, |u| {
            u.verify = verify;
            u.email_verify_token.clear();
        })
        .await
        .map(|_| ())
        .ok_or_else(user_not_found)
    }

    async fn set_forgot_password_token(&self, id: Uuid, token: &str) -> AppResult<()> {
        self.modify_user(id, |u| u.forgot_password_token = token.to_string())
            .await
            .map(|_| ())
            .ok_or_else(user_not_found)
    }

    async fn set_password(&self, id: Uuid, password_hash: &str) -> AppResult<()> {
        self.modify_user(id, |u| {
            u.password = password_hash.to_string();
            u.forgot_password_token.clear();
        })
        .await
        .map(|_| ())
        .ok_or_else(user_not_found)
    }

    async fn update_profile(&self, id: Uuid, patch: ProfilePatch) -> AppResult<Option<User>> {
        Ok(self.modify_user(id, |u| patch.apply(u)).await)
    }

    async fn add_to_wishlist(&self, id: Uuid, product_ids: &[Uuid]) -> AppResult<Vec<Uuid>> {
        let user = self
            .modify_user(id, |u| {
                for pid in product_ids {
                    if !u.wishlist.contains(pid) {
                        u.wishlist.push(*pid);
                    }
                }
            })
            .await;
        Ok(user.map(|u| u.wishlist).unwrap_or_default())
    }

    async fn remove_from_wishlist(&self, id: Uuid, product_ids: &[Uuid]) -> AppResult<Vec<Uuid>> {
        let user = self
            .modify_user(id, |u| u.wishlist.retain(|p| !product_ids.contains(p)))
            .await;
        Ok(user.map(|u| u.wishlist).unwrap_or_default())
    }
}

#[async_trait]
impl RefreshTokenRepository for MemoryStore {
    async fn find(&self, token: &str) -> AppResult<Option<RefreshToken>> {
        Ok(self.refresh_tokens.read().await.get(token).cloned())
    }

    async fn insert(&self, token: RefreshToken) -> AppResult<()> {
        self.refresh_tokens
            .write()
            .await
            .insert(token.token.clone(), token);
        Ok(())
    }

    async fn delete(&self, token: &str) -> AppResult<bool> {
        Ok(self.refresh_tokens.write().await.remove(token).is_some())
    }
}

#[async_trait]
impl ProductRepository for MemoryStore {
    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Product>> {
        Ok(self.products.read().await.get(&id).cloned())
    }
}
