use anyhow::Result;
use cycle_wellness::{
    config::{self, Config},
    store::{PgStore, Store},
    AppState,
};
use dotenvy::dotenv;

#[tokio::main]
async fn main() -> Result<()> {
    dotenv().ok();
    let directives = std::env::var("RUST_LOG").ok();
    tracing_subscriber::fmt()
        .with_env_filter(config::log_filter(directives.as_deref()))
        .with_target(false)
        .init();

    let config = Config::from_env()?;

    let store = match &config.database_url {
        Some(url) => Store::new(PgStore::connect(url, config.max_connections).await?),
        None => {
            tracing::warn!("⚠️ DATABASE_URL not set, entries are kept in memory only");
            Store::in_memory()
        }
    };

    let state = AppState::new(store);
    state.apply_stored_settings().await?;

    let app = cycle_wellness::app(state);

    tracing::info!("🧠 Server running at {}", config.bind_addr);

    axum::serve(
        tokio::net::TcpListener::bind(config.bind_addr).await?,
        app.into_make_service(),
    )
    .await?;

    Ok(())
}
