//! Repositories: users and products in PostgreSQL.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::FromRow;
use uuid::Uuid;

use super::DbPool;
use crate::error::{AppError, AppResult};
use crate::messages::users;
use crate::models::{NewUser, Product, ProfilePatch, User, UserVerifyStatus};
use crate::repositories::{ProductRepository, UserRepository};

const USER_COLUMNS: &str = "id, email, password, first_name, last_name, username, avatar, \
     location, verify, email_verify_token, forgot_password_token, wishlist, created_at, updated_at";

// ---- User ----

#[derive(Debug, FromRow)]
pub struct UserRow {
    pub id: Uuid,
    pub email: String,
    pub password: String,
    pub first_name: String,
    pub last_name: String,
    pub username: String,
    pub avatar: Option<String>,
    pub location: Option<String>,
    pub verify: i16,
    pub email_verify_token: String,
    pub forgot_password_token: String,
    pub wishlist: Vec<Uuid>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl TryFrom<UserRow> for User {
    type Error = AppError;

    fn try_from(row: UserRow) -> AppResult<Self> {
        let verify = UserVerifyStatus::from_i16(row.verify).ok_or_else(|| {
            AppError::Internal(anyhow::anyhow!(
                "user {} has unknown verify status {}",
                row.id,
                row.verify
            ))
        })?;
        Ok(User {
            id: row.id,
            email: row.email,
            password: row.password,
            first_name: row.first_name,
            last_name: row.last_name,
            username: row.username,
            avatar: row.avatar,
            location: row.location,
            verify,
            email_verify_token: row.email_verify_token,
            forgot_password_token: row.forgot_password_token,
            wishlist: row.wishlist,
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
    }
}

fn into_user(row: Option<UserRow>) -> AppResult<Option<User>> {
    row.map(User::try_from).transpose()
}

pub async fn user_find_by_id(pool: &DbPool, id: Uuid) -> AppResult<Option<User>> {
    let row = sqlx::query_as::<_, UserRow>(&format!(
        "SELECT {USER_COLUMNS} FROM users WHERE id = $1"
    ))
    .bind(id)
    .fetch_optional(pool)
    .await?;
    into_user(row)
}

pub async fn user_find_by_email(pool: &DbPool, email: &str) -> AppResult<Option<User>> {
    let row = sqlx::query_as::<_, UserRow>(&format!(
        "SELECT {USER_COLUMNS} FROM users WHERE email = $1"
    ))
    .bind(email)
    .fetch_optional(pool)
    .await?;
    into_user(row)
}

pub async fn user_find_by_credentials(
    pool: &DbPool,
    email: &str,
    password_hash: &str,
) -> AppResult<Option<User>> {
    let row = sqlx::query_as::<_, UserRow>(&format!(
        "SELECT {USER_COLUMNS} FROM users WHERE email = $1 AND password = $2"
    ))
    .bind(email)
    .bind(password_hash)
    .fetch_optional(pool)
    .await?;
    into_user(row)
}

pub async fn user_find_by_username(pool: &DbPool, username: &str) -> AppResult<Option<User>> {
    let row = sqlx::query_as::<_, UserRow>(&format!(
        "SELECT {USER_COLUMNS} FROM users WHERE username = $1"
    ))
    .bind(username)
    .fetch_optional(pool)
    .await?;
    into_user(row)
}

pub async fn user_create(pool: &DbPool, user: NewUser) -> AppResult<User> {
    let user = user.into_user(Utc::now());
    let row = sqlx::query_as::<_, UserRow>(&format!(
        r#"
        INSERT INTO users (id, email, password, first_name, last_name, username, avatar,
                           verify, email_verify_token)
        VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
        RETURNING {USER_COLUMNS}
        "#
    ))
    .bind(user.id)
    .bind(&user.email)
    .bind(&user.password)
    .bind(&user.first_name)
    .bind(&user.last_name)
    .bind(&user.username)
    .bind(&user.avatar)
    .bind(user.verify.as_i16())
    .bind(&user.email_verify_token)
    .fetch_one(pool)
    .await?;
    User::try_from(row)
}

/// Writes target one user by id; zero affected rows means it does not exist.
fn updated_one(rows: u64) -> AppResult<()> {
    if rows == 0 {
        return Err(AppError::not_found(users::USER_NOT_FOUND));
    }
    Ok(())
}

pub async fn user_set_verify(pool: &DbPool, id: Uuid, verify: UserVerifyStatus) -> AppResult<()> {
    let result = sqlx::query(
        "UPDATE users SET verify = $1, email_verify_token = '', updated_at = now() WHERE id = $2",
    )
    .bind(verify.as_i16())
    .bind(id)
    .execute(pool)
    .await?;
    updated_one(result.rows_affected())
}

pub async fn user_set_forgot_password_token(pool: &DbPool, id: Uuid, token: &str) -> AppResult<()> {
    let result = sqlx::query("UPDATE users SET forgot_password_token = $1, updated_at = now() WHERE id = $2")
        .bind(token)
        .bind(id)
        .execute(pool)
        .await?;
    updated_one(result.rows_affected())
}

pub async fn user_set_password(pool: &DbPool, id: Uuid, password_hash: &str) -> AppResult<()> {
    let result = sqlx::query(
        "UPDATE users SET password = $1, forgot_password_token = '', updated_at = now() WHERE id = $2",
    )
    .bind(password_hash)
    .bind(id)
    .execute(pool)
    .await?;
    updated_one(result.rows_affected())
}

pub async fn user_update_profile(
    pool: &DbPool,
    id: Uuid,
    patch: ProfilePatch,
) -> AppResult<Option<User>> {
    let row = sqlx::query_as::<_, UserRow>(&format!(
        r#"
        UPDATE users SET
            first_name = COALESCE($2, first_name),
            last_name = COALESCE($3, last_name),
            location = COALESCE($4, location),
            username = COALESCE($5, username),
            avatar = COALESCE($6, avatar),
            updated_at = now()
        WHERE id = $1
        RETURNING {USER_COLUMNS}
        "#
    ))
    .bind(id)
    .bind(patch.first_name)
    .bind(patch.last_name)
    .bind(patch.location)
    .bind(patch.username)
    .bind(patch.avatar)
    .fetch_optional(pool)
    .await?;
    into_user(row)
}

pub async fn user_wishlist_add(pool: &DbPool, id: Uuid, product_ids: &[Uuid]) -> AppResult<Vec<Uuid>> {
    let list: Option<Vec<Uuid>> = sqlx::query_scalar(
        r#"
        UPDATE users SET
            wishlist = wishlist || ARRAY(
                SELECT p FROM unnest($2::uuid[]) WITH ORDINALITY AS t(p, n)
                WHERE NOT p = ANY(wishlist)
                ORDER BY n
            ),
            updated_at = now()
        WHERE id = $1
        RETURNING wishlist
        "#,
    )
    .bind(id)
    .bind(product_ids)
    .fetch_optional(pool)
    .await?;
    Ok(list.unwrap_or_default())
}

pub async fn user_wishlist_remove(
    pool: &DbPool,
    id: Uuid,
    product_ids: &[Uuid],
) -> AppResult<Vec<Uuid>> {
    let list: Option<Vec<Uuid>> = sqlx::query_scalar(
        r#"
        UPDATE users SET
            wishlist = ARRAY(SELECT p FROM unnest(wishlist) AS p WHERE NOT p = ANY($2::uuid[])),
            updated_at = now()
        WHERE id = $1
        RETURNING wishlist
        "#,
    )
    .bind(id)
    .bind(product_ids)
    .fetch_optional(pool)
    .await?;
    Ok(list.unwrap_or_default())
}

// ---- Products ----

#[derive(Debug, FromRow)]
pub struct ProductRow {
    pub id: Uuid,
    pub name: String,
}

pub async fn product_find_by_id(pool: &DbPool, id: Uuid) -> AppResult<Option<Product>> {
    let row = sqlx::query_as::<_, ProductRow>("SELECT id, name FROM products WHERE id = $1")
        .bind(id)
        .fetch_optional(pool)
        .await?;
    Ok(row.map(|r| Product {
        id: r.id,
        name: r.name,
    }))
}

// ---- Trait wiring ----

/// PostgreSQL-backed user and product store.
#[derive(Clone)]
pub struct PgStore {
    pool: DbPool,
}

impl PgStore {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl UserRepository for PgStore {
    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<User>> {
        user_find_by_id(&self.pool, id).await
    }

    async fn find_by_email(&self, email: &str) -> AppResult<Option<User>> {
        user_find_by_email(&self.pool, email).await
    }

    async fn find_by_credentials(
        &self,
        email: &str,
        password_hash: &str,
    ) -> AppResult<Option<User>> {
        user_find_by_credentials(&self.pool, email, password_hash).await
    }

    async fn find_by_username(&self, username: &str) -> AppResult<Option<User>> {
        user_find_by_username(&self.pool, username).await
    }

    async fn insert(&self, user: NewUser) -> AppResult<User> {
        user_create(&self.pool, user).await
    }

    async fn set_verify(&self, id: Uuid, verify: UserVerifyStatus) -> AppResult<()> {
        user_set_verify(&self.pool, id, verify).await
    }

    async fn set_forgot_password_token(&self, id: Uuid, token: &str) -> AppResult<()> {
        user_set_forgot_password_token(&self.pool, id, token).await
    }

    async fn set_password(&self, id: Uuid, password_hash: &str) -> AppResult<()> {
        user_set_password(&self.pool, id, password_hash).await
    }

    async fn update_profile(&self, id: Uuid, patch: ProfilePatch) -> AppResult<Option<User>> {
        user_update_profile(&self.pool, id, patch).await
    }

    async fn add_to_wishlist(&self, id: Uuid, product_ids: &[Uuid]) -> AppResult<Vec<Uuid>> {
        user_wishlist_add(&self.pool, id, product_ids).await
    }

    async fn remove_from_wishlist(&self, id: Uuid, product_ids: &[Uuid]) -> AppResult<Vec<Uuid>> {
        user_wishlist_remove(&self.pool, id, product_ids).await
    }
}

#[async_trait]
impl ProductRepository for PgStore {
    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Product>> {
        product_find_by_id(&self.pool, id).await
    }
}
