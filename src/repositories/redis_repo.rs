//! Redis-backed refresh-token store.
//!
//! One key per issued refresh token, expiring together with the token.

use crate::error::{AppError, AppResult};
use crate::models::RefreshToken;
use async_trait::async_trait;
use chrono::Utc;
use redis::AsyncCommands;
use std::sync::Arc;
use tracing::debug;
use uuid::Uuid;

use super::RefreshTokenRepository;

const REFRESH_PREFIX: &str = "auth:refresh:";

fn refresh_key(token: &str) -> String {
    format!("{}{}", REFRESH_PREFIX, token)
}

#[derive(Clone)]
pub struct RedisRepository {
    client: Arc<redis::Client>,
}

impl RedisRepository {
    /// Create repository from Redis URL.
    pub fn new(redis_url: &str) -> Result<Self, AppError> {
        let client = redis::Client::open(redis_url)?;
        Ok(Self {
            client: Arc::new(client),
        })
    }

    /// Get a multiplexed connection for commands.
    pub async fn connection(&self) -> Result<redis::aio::MultiplexedConnection, AppError> {
        let conn = self.client.get_multiplexed_async_connection().await?;
        Ok(conn)
    }
}

#[async_trait]
impl RefreshTokenRepository for RedisRepository {
    async fn find(&self, token: &str) -> AppResult<Option<RefreshToken>> {
        let mut conn = self.connection().await?;
        let key = refresh_key(token);
        let (user_id, ttl): (Option<String>, i64) = redis::pipe()
            .get(&key)
            .ttl(&key)
            .query_async(&mut conn)
            .await?;
        let Some(user_id) = user_id else {
            return Ok(None);
        };
        let user_id = Uuid::parse_str(&user_id)
            .map_err(|e| AppError::Internal(anyhow::anyhow!("stored user id: {}", e)))?;
        Ok(Some(RefreshToken::new(
            token,
            user_id,
            Utc::now().timestamp() + ttl.max(0),
        )))
    }

    async fn insert(&self, token: RefreshToken) -> AppResult<()> {
        let mut conn = self.connection().await?;
        let ttl = token.ttl_secs(Utc::now());
        redis::cmd("SET")
            .arg(refresh_key(&token.token))
            .arg(token.user_id.to_string())
            .arg("EX")
            .arg(ttl)
            .query_async::<_, ()>(&mut conn)
            .await?;
        debug!(user_id = %token.user_id, ttl, "stored refresh token");
        Ok(())
    }

    async fn delete(&self, token: &str) -> AppResult<bool> {
        let mut conn = self.connection().await?;
        let removed: u64 = conn.del(refresh_key(token)).await?;
        Ok(removed > 0)
    }
}
