//! Data store seams: users, refresh tokens, products.
//!
//! The validation layer only calls the `find_*` lookups; the writes exist for
//! the route handlers that run after validation has passed.

mod memory;
mod redis_repo;

pub use memory::MemoryStore;
pub use redis_repo::RedisRepository;

use async_trait::async_trait;
use uuid::Uuid;

use crate::error::AppResult;
use crate::models::{NewUser, Product, ProfilePatch, RefreshToken, User, UserVerifyStatus};

#[async_trait]
pub trait UserRepository: Send + Sync {
    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<User>>;

    async fn find_by_email(&self, email: &str) -> AppResult<Option<User>>;

    /// Exact match on email and stored password hash.
    async fn find_by_credentials(&self, email: &str, password_hash: &str)
        -> AppResult<Option<User>>;

    async fn find_by_username(&self, username: &str) -> AppResult<Option<User>>;

    async fn insert(&self, user: NewUser) -> AppResult<User>;

    /// Set the verification state and clear the email-verify token.
    async fn set_verify(&self, id: Uuid, verify: UserVerifyStatus) -> AppResult<()>;

    async fn set_forgot_password_token(&self, id: Uuid, token: &str) -> AppResult<()>;

    /// Store a new password hash and clear the forgot-password token.
    async fn set_password(&self, id: Uuid, password_hash: &str) -> AppResult<()>;

    async fn update_profile(&self, id: Uuid, patch: ProfilePatch) -> AppResult<Option<User>>;

    /// Add products to the wishlist, ignoring ones already present.
    async fn add_to_wishlist(&self, id: Uuid, product_ids: &[Uuid]) -> AppResult<Vec<Uuid>>;

    async fn remove_from_wishlist(&self, id: Uuid, product_ids: &[Uuid]) -> AppResult<Vec<Uuid>>;
}

#[async_trait]
pub trait RefreshTokenRepository: Send + Sync {
    async fn find(&self, token: &str) -> AppResult<Option<RefreshToken>>;

    async fn insert(&self, token: RefreshToken) -> AppResult<()>;

    /// Returns whether a record was removed.
    async fn delete(&self, token: &str) -> AppResult<bool>;
}

#[async_trait]
pub trait ProductRepository: Send + Sync {
    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Product>>;
}
