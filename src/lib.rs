pub mod activity;
pub mod appresult;
pub mod auth;
pub mod db;
pub mod forms;
pub mod home;
pub mod models;
pub mod profiles;
pub mod res;
pub mod rooms;
pub mod session;
pub mod store;
pub mod topics;

use std::path::PathBuf;

use axum::{extract::FromRef, routing::get, Router};
use sqlx::SqlitePool;
use tower_http::{services::ServeDir, trace::TraceLayer};
use tower_sessions::{cookie::SameSite, Expiry, MemoryStore, SessionManagerLayer};

pub use appresult::{AppError, AppResult};

#[derive(Clone, FromRef)]
pub struct AppState {
    pub db_pool: SqlitePool,
    pub static_dir: PathBuf,
}

/// Full application router, session layer included. `main` and the
/// integration tests build the app through this.
pub fn router(state: AppState) -> Router {
    let session_store = MemoryStore::default();
    let session_layer = SessionManagerLayer::new(session_store)
        .with_secure(false)
        .with_same_site(SameSite::Lax)
        .with_expiry(Expiry::OnInactivity(time::Duration::days(7)));

    let static_dir = state.static_dir.clone();

    Router::new()
        .route("/", get(home::home))
        .route("/topics/", get(topics::topics_page))
        .route("/activity/", get(activity::activity_page))
        .merge(auth::router())
        .merge(rooms::router())
        .merge(profiles::router())
        .nest_service("/static", ServeDir::new(static_dir))
        .with_state(state)
        .layer(session_layer)
        .layer(TraceLayer::new_for_http())
}
