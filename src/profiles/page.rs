use axum::{
    debug_handler,
    extract::{Path, State},
    response::{Html, IntoResponse, Response},
};
use sqlx::SqlitePool;
use uuid::Uuid;

use crate::{include_res, res, store, AppError, AppResult};

#[debug_handler]
pub(crate) async fn user_profile(
    Path(id): Path<Uuid>,
    State(db_pool): State<SqlitePool>,
) -> AppResult<Response> {
    let id = id.to_string();
    let user = store::users::find(&db_pool, &id)
        .await?
        .ok_or(AppError::not_found("user"))?;

    let rooms = store::rooms::hosted_by(&db_pool, &id).await?;
    let room_messages = store::messages::by_user(&db_pool, &id).await?;
    let topics = store::topics::search(&db_pool, "", None).await?;

    Ok(Html(
        include_res!(str, "/pages/profile.html")
            .replace("{id}", &user.id)
            .replace("{username}", &res::escape(&user.username))
            .replace("{name}", &res::escape(&user.name))
            .replace("{avatar}", &user.avatar)
            .replace("{bio}", &res::escape(&user.bio))
            .replace("{topics}", &res::topic_items(&topics))
            .replace("{rooms}", &res::room_items(&rooms))
            .replace("{messages}", &res::message_items(&room_messages)),
    )
    .into_response())
}
