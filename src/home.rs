use axum::{
    debug_handler,
    extract::{Query, State},
    response::{Html, IntoResponse, Response},
};
use serde::Deserialize;
use sqlx::SqlitePool;
use tower_sessions::Session;

use crate::{include_res, res, session, store, AppResult};

#[derive(Deserialize)]
pub struct SearchQuery {
    #[serde(default)]
    pub q: String,
}

#[debug_handler]
pub async fn home(
    Query(SearchQuery { q }): Query<SearchQuery>,
    State(db_pool): State<SqlitePool>,
    session: Session,
) -> AppResult<Response> {
    let rooms = store::rooms::search(&db_pool, &q).await?;
    let topics = store::topics::search(&db_pool, "", Some(5)).await?;
    let room_messages = store::messages::matching_topic(&db_pool, &q).await?;
    let total_rooms = store::rooms::count(&db_pool).await?;
    let user = session::current_user(&session, &db_pool).await?;

    let nav = match &user {
        Some(user) => format!(
            "<a href=\"/profile/{}/\">{}</a> <a href=\"/logout/\">logout</a>",
            user.id,
            res::escape(&user.username)
        ),
        None => "<a href=\"/login/\">login</a> <a href=\"/register/\">register</a>".to_owned(),
    };

    Ok(Html(
        include_res!(str, "/pages/home.html")
            .replace("{nav}", &nav)
            .replace("{q}", &res::escape(&q))
            .replace("{room_count}", &rooms.len().to_string())
            .replace("{total_rooms}", &total_rooms.to_string())
            .replace("{topics}", &res::topic_items(&topics))
            .replace("{rooms}", &res::room_items(&rooms))
            .replace("{messages}", &res::message_items(&room_messages)),
    )
    .into_response())
}
