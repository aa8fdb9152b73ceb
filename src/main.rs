use anyhow::Result;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

use transporte_server::{config::CONFIG, db, handlers};

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("transporte_server=info,tower_http=info")),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let pool = db::init_db_pool(&CONFIG.database_url).await?;
    tracing::info!(database_url = %CONFIG.database_url, "database ready");

    let app = handlers::router(pool);
    let addr = CONFIG.server_addr();
    tracing::info!(%addr, "starting admin API server");

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
