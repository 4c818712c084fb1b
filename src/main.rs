use std::path::PathBuf;

use campfire::{db, AppState};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "campfire=info,tower_http=info".into()),
        )
        .init();

    let database_url =
        dotenv::var("DATABASE_URL").unwrap_or_else(|_| "sqlite:campfire.db".to_owned());
    let static_dir =
        PathBuf::from(dotenv::var("STATIC_DIR").unwrap_or_else(|_| "static".to_owned()));
    let bind_addr = dotenv::var("BIND_ADDR").unwrap_or_else(|_| "0.0.0.0:8080".to_owned());

    let db_pool = db::connect(&database_url).await?;
    db::migrate(&db_pool).await?;

    let app = campfire::router(AppState { db_pool, static_dir });

    let listener = tokio::net::TcpListener::bind(&bind_addr).await?;
    tracing::info!("listening on {bind_addr}");
    axum::serve(listener, app).await?;
    Ok(())
}
