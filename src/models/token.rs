//! Persisted refresh token.

use chrono::{DateTime, TimeZone, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A refresh token that has been issued and not yet consumed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RefreshToken {
    pub token: String,
    pub user_id: Uuid,
    /// Expiry of the token (unix seconds), used for the store TTL.
    pub exp: i64,
}

impl RefreshToken {
    pub fn new(token: impl Into<String>, user_id: Uuid, exp: i64) -> Self {
        Self {
            token: token.into(),
            user_id,
            exp,
        }
    }

    /// Whole seconds left before expiry, at least one.
    pub fn ttl_secs(&self, now: DateTime<Utc>) -> u64 {
        let expires_at = Utc.timestamp_opt(self.exp, 0).single().unwrap_or(now);
        (expires_at - now).num_seconds().max(1) as u64
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ttl_counts_down_to_expiry() {
        let now = Utc::now();
        let rt = RefreshToken::new("t", Uuid::new_v4(), now.timestamp() + 120);
        let ttl = rt.ttl_secs(now);
        assert!((119..=120).contains(&ttl));
    }

    #[test]
    fn ttl_never_reaches_zero() {
        let now = Utc::now();
        let rt = RefreshToken::new("t", Uuid::new_v4(), now.timestamp() - 10);
        assert_eq!(rt.ttl_secs(now), 1);
    }
}
