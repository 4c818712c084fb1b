use axum::{
    debug_handler,
    extract::{Query, State},
    response::{Html, IntoResponse, Response},
};
use sqlx::SqlitePool;

use crate::{home::SearchQuery, include_res, res, store, AppResult};

#[debug_handler]
pub async fn topics_page(
    Query(SearchQuery { q }): Query<SearchQuery>,
    State(db_pool): State<SqlitePool>,
) -> AppResult<Response> {
    let topics = store::topics::search(&db_pool, &q, None).await?;
    let total_rooms = store::rooms::count(&db_pool).await?;

    Ok(Html(
        include_res!(str, "/pages/topics.html")
            .replace("{q}", &res::escape(&q))
            .replace("{total_rooms}", &total_rooms.to_string())
            .replace("{topics}", &res::topic_items(&topics)),
    )
    .into_response())
}
