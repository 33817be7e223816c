//! JWT authentication and declarative request validation for a storefront
//! user API.
//!
//! Every user route runs an ordered pipeline of validation schemas and guards
//! before its handler; failures short-circuit with a structured error.

pub mod auth;
pub mod config;
pub mod db;
pub mod error;
pub mod handlers;
pub mod messages;
pub mod middleware;
pub mod models;
pub mod repositories;
pub mod validation;

pub use config::Config;
pub use error::AppError;
pub use handlers::http::AppState;

use axum::routing::{get, post, put};
use handlers::{http, users};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

/// Build the API router (users, health). Used by main and by integration tests.
pub fn create_app(state: AppState) -> axum::Router {
    let user_routes = axum::Router::new()
        .route("/login", post(users::login))
        .route("/register", post(users::register))
        .route("/logout", post(users::logout))
        .route("/refresh-token", post(users::refresh_token))
        .route("/verify-email", post(users::verify_email))
        .route("/forgot-password", post(users::forgot_password))
        .route("/verify-forgot-password", post(users::verify_forgot_password))
        .route("/reset-password", post(users::reset_password))
        .route("/me", get(users::get_me).patch(users::update_me))
        .route("/change-password", put(users::change_password))
        .route(
            "/wishlist",
            post(users::add_to_wishlist).delete(users::remove_from_wishlist),
        );

    axum::Router::new()
        .route("/health", get(http::health))
        .nest("/users", user_routes)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}
