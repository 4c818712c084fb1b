use axum::response::{IntoResponse, Redirect, Response};
use sqlx::SqlitePool;
use tower_sessions::Session;

use crate::{models::User, store, AppResult};

pub const USER_ID: &str = "user_id";

pub async fn log_in(session: &Session, user: &User) -> AppResult<()> {
    session.insert(USER_ID, user.id.clone()).await?;
    Ok(())
}

pub async fn user_id(session: &Session) -> AppResult<Option<String>> {
    Ok(session.get::<String>(USER_ID).await?)
}

/// Resolves the session's user id against the users table. A stale id
/// (session outliving its row) reads as logged out.
pub async fn current_user(session: &Session, db_pool: &SqlitePool) -> AppResult<Option<User>> {
    let Some(id) = session.get::<String>(USER_ID).await? else {
        return Ok(None);
    };
    Ok(store::users::find(db_pool, &id).await?)
}

/// Gated routes send anonymous visitors here instead of erroring.
pub fn login_redirect() -> Response {
    Redirect::to("/login/").into_response()
}
