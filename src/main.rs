use std::{error::Error, net::SocketAddr, sync::Arc, time::Duration};

use sqlx::postgres::PgPoolOptions;
use tracing_subscriber::EnvFilter;

use postboard::{
    app::env::Envy,
    posts::store::{MemoryPostStore, PgPostStore, PostStore},
    router, with_rate_limit, AppState,
};

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    // tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("postboard=debug,tower_http=info")),
        )
        .init();

    // environment
    let envy = Envy::load()?;
    tracing::info!(app_env = %envy.app_env, "configuration loaded");

    // store
    let store: Arc<dyn PostStore> = match &envy.database_url {
        Some(database_url) => {
            let pool = PgPoolOptions::new()
                .max_connections(envy.database_max_connections())
                .idle_timeout(Some(Duration::from_secs(60)))
                .connect(database_url)
                .await?;

            tracing::info!("connected to db");

            if envy.run_migrations() {
                sqlx::migrate!("./migrations").run(&pool).await?;
                tracing::info!("migrations applied");
            }

            Arc::new(PgPostStore::new(pool))
        }
        None => {
            tracing::warn!("DATABASE_URL not set, posts are kept in memory");
            Arc::new(MemoryPostStore::new())
        }
    };

    // app
    let app = with_rate_limit(
        router(AppState::new(store)),
        envy.rate_limit_per_second(),
    );

    let addr = SocketAddr::from(([0, 0, 0, 0], envy.port()));
    tracing::info!("listening on {}", addr);

    axum::Server::bind(&addr)
        .serve(app.into_make_service())
        .await?;

    Ok(())
}
