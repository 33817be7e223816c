//! Entry point: load config, wire dependencies, and run the server.

use std::sync::Arc;

use storefront_auth::auth::{PasswordHasher, TokenService};
use storefront_auth::config::Config;
use storefront_auth::db::{self, PgStore};
use storefront_auth::repositories::RedisRepository;
use storefront_auth::{create_app, AppState};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let config = Config::from_env().map_err(|e| anyhow::anyhow!("config: {}", e))?;

    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&config.log_level))?;
    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer())
        .init();

    let db_pool = db::create_pool(&config.database_url).await?;
    db::migrate(&db_pool).await?;
    let pg = Arc::new(PgStore::new(db_pool));
    let refresh_tokens = Arc::new(RedisRepository::new(&config.redis_url)?);

    let state = AppState::new(
        pg.clone(),
        refresh_tokens,
        pg,
        TokenService::new(config.token_secrets.clone(), config.token_expiry),
        PasswordHasher::new(config.password_secret.clone()),
    );

    let app = create_app(state);

    tracing::info!(addr = %config.server_addr, "listening");
    let listener = tokio::net::TcpListener::bind(config.server_addr).await?;
    axum::serve(listener, app).await?;
    Ok(())
}
