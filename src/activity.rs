use axum::{
    debug_handler,
    extract::State,
    response::{Html, IntoResponse, Response},
};
use sqlx::SqlitePool;

use crate::{include_res, res, store, AppResult};

#[debug_handler]
pub async fn activity_page(State(db_pool): State<SqlitePool>) -> AppResult<Response> {
    let room_messages = store::messages::recent(&db_pool).await?;

    Ok(Html(
        include_res!(str, "/pages/activity.html")
            .replace("{messages}", &res::message_items(&room_messages)),
    )
    .into_response())
}
