//! worldstore server: loads config, prepares the database, serves the v1 routes.

use tokio::net::TcpListener;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use worldstore::{app, connect, ensure_database_exists, run_migrations, AppState, Config, Dialect};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "worldstore=info,tower_http=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = Config::from_env()?;
    if config.dialect == Dialect::Postgres {
        ensure_database_exists(&config.database_url).await?;
    }
    let pool = connect(&config).await?;
    run_migrations(&pool, config.dialect).await?;
    tracing::info!(dialect = config.dialect.as_str(), "database ready");

    let state = AppState::new(pool.clone(), config.dialect);
    let router = app(state, pool, config.body_limit);

    let listener = TcpListener::bind(config.bind_addr()).await?;
    tracing::info!("worldstore listening on http://{}", listener.local_addr()?);
    axum::serve(listener, router).await?;
    Ok(())
}
