//! User record as seen by the authentication layer.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Verification state of an account, embedded in every issued token.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UserVerifyStatus {
    Unverified,
    Verified,
    Banned,
}

impl UserVerifyStatus {
    /// Stored representation (SMALLINT column).
    pub fn as_i16(self) -> i16 {
        match self {
            UserVerifyStatus::Unverified => 0,
            UserVerifyStatus::Verified => 1,
            UserVerifyStatus::Banned => 2,
        }
    }

    pub fn from_i16(value: i16) -> Option<Self> {
        match value {
            0 => Some(UserVerifyStatus::Unverified),
            1 => Some(UserVerifyStatus::Verified),
            2 => Some(UserVerifyStatus::Banned),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct User {
    pub id: Uuid,
    pub email: String,
    #[serde(skip_serializing)]
    pub password: String,
    pub first_name: String,
    pub last_name: String,
    pub username: String,
    pub avatar: Option<String>,
    pub location: Option<String>,
    pub verify: UserVerifyStatus,
    #[serde(skip_serializing)]
    pub email_verify_token: String,
    #[serde(skip_serializing)]
    pub forgot_password_token: String,
    pub wishlist: Vec<Uuid>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Fields supplied when an account is created.
#[derive(Debug, Clone)]
pub struct NewUser {
    pub id: Uuid,
    pub email: String,
    pub password: String,
    pub first_name: String,
    pub last_name: String,
    pub avatar: Option<String>,
    pub email_verify_token: String,
}

impl NewUser {
    /// Accounts start unverified with a username derived from their id.
    pub fn into_user(self, now: DateTime<Utc>) -> User {
        User {
            username: default_username(self.id),
            id: self.id,
            email: self.email,
            password: self.password,
            first_name: self.first_name,
            last_name: self.last_name,
            avatar: self.avatar,
            location: None,
            verify: UserVerifyStatus::Unverified,
            email_verify_token: self.email_verify_token,
            forgot_password_token: String::new(),
            wishlist: Vec::new(),
            created_at: now,
            updated_at: now,
        }
    }
}

pub fn default_username(id: Uuid) -> String {
    format!("user{}", id.as_simple())
}

/// Partial profile update; `None` leaves the column untouched.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ProfilePatch {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub location: Option<String>,
    pub username: Option<String>,
    pub avatar: Option<String>,
}

impl ProfilePatch {
    pub fn apply(self, user: &mut User) {
        if let Some(v) = self.first_name {
            user.first_name = v;
        }
        if let Some(v) = self.last_name {
            user.last_name = v;
        }
        if let Some(v) = self.location {
            user.location = Some(v);
        }
        if let Some(v) = self.username {
            user.username = v;
        }
        if let Some(v) = self.avatar {
            user.avatar = Some(v);
        }
    }
}
