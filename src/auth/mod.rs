//! Authentication primitives: JWT issue/verify and password hashing.

mod jwt;
mod password;

pub use jwt::{
    capitalize, sign, verify, TokenInvalid, TokenKind, TokenPayload, TokenSecrets, TokenService,
};
pub use password::PasswordHasher;
