use axum::{
    debug_handler,
    extract::{Path, State},
    response::{Html, IntoResponse, Redirect, Response},
    Form,
};
use serde::Deserialize;
use sqlx::SqlitePool;
use tower_sessions::Session;
use uuid::Uuid;

use crate::{include_res, res, session, store, AppError, AppResult};

#[debug_handler]
pub(crate) async fn room(
    Path(id): Path<Uuid>,
    State(db_pool): State<SqlitePool>,
) -> AppResult<Response> {
    let id = id.to_string();
    let room = store::rooms::find(&db_pool, &id)
        .await?
        .ok_or(AppError::not_found("room"))?;
    let host = store::users::find(&db_pool, &room.host_id)
        .await?
        .ok_or(AppError::not_found("host"))?;
    let topic = store::topics::find(&db_pool, &room.topic_id)
        .await?
        .ok_or(AppError::not_found("topic"))?;
    let room_messages = store::messages::in_room(&db_pool, &id).await?;
    let participants = store::participants::in_room(&db_pool, &id).await?;

    let participant_items: String = participants
        .iter()
        .map(|p| {
            include_res!(str, "/pages/participant_item.html")
                .replace("{user_id}", &p.user_id)
                .replace("{username}", &res::escape(&p.username))
        })
        .collect();

    Ok(Html(
        include_res!(str, "/pages/room.html")
            .replace("{id}", &room.id)
            .replace("{name}", &res::escape(&room.name))
            .replace("{topic_name}", &res::escape(&topic.name))
            .replace("{description}", &res::escape(&room.description))
            .replace("{host_id}", &host.id)
            .replace("{host_username}", &res::escape(&host.username))
            .replace("{created_at}", &room.created_at)
            .replace("{messages}", &res::message_items(&room_messages))
            .replace("{participants}", &participant_items),
    )
    .into_response())
}

#[derive(Deserialize)]
pub(crate) struct MessageForm {
    #[serde(default)]
    pub body: String,
}

#[debug_handler]
pub(crate) async fn post_message(
    Path(id): Path<Uuid>,
    State(db_pool): State<SqlitePool>,
    session: Session,
    Form(MessageForm { body }): Form<MessageForm>,
) -> AppResult<Response> {
    let id = id.to_string();
    let Some(user) = session::current_user(&session, &db_pool).await? else {
        return Ok(session::login_redirect());
    };
    if store::rooms::find(&db_pool, &id).await?.is_none() {
        return Err(AppError::not_found("room"));
    }

    let body = body.trim();
    if !body.is_empty() {
        store::messages::create(&db_pool, &user.id, &id, body).await?;
        store::participants::add(&db_pool, &id, &user.id).await?;
    }

    Ok(Redirect::to(&format!("/room/{id}/")).into_response())
}
