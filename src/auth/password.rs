//! Deterministic keyed password hash.
//!
//! Login looks users up by `(email, hash)`, so the hash must be stable for a
//! given password: hex(HMAC-SHA256(secret, password)).

use crate::error::{AppError, AppResult};
use hmac::{Hmac, Mac};
use sha2::Sha256;

type HmacSha256 = Hmac<Sha256>;

#[derive(Clone)]
pub struct PasswordHasher {
    secret: String,
}

impl PasswordHasher {
    pub fn new(secret: String) -> Self {
        Self { secret }
    }

    pub fn hash(&self, password: &str) -> AppResult<String> {
        let mut mac = HmacSha256::new_from_slice(self.secret.as_bytes())
            .map_err(|e| AppError::Internal(anyhow::anyhow!("HMAC init: {}", e)))?;
        mac.update(password.as_bytes());
        Ok(hex::encode(mac.finalize().into_bytes()))
    }

    pub fn matches(&self, password: &str, hash: &str) -> AppResult<bool> {
        Ok(self.hash(password)? == hash)
    }
}
