//! Domain models: users, products, stored refresh tokens.

mod product;
mod token;
mod user;

pub use product::Product;
pub use token::RefreshToken;
pub use user::{default_username, NewUser, ProfilePatch, User, UserVerifyStatus};
