use axum::{
    debug_handler,
    extract::{Path, State},
    response::{Html, IntoResponse, Redirect, Response},
};
use sqlx::SqlitePool;
use tower_sessions::Session;
use uuid::Uuid;

use crate::{include_res, res, session, store, AppError, AppResult};

fn render_confirm(what: &str, action: &str) -> Response {
    Html(
        include_res!(str, "/pages/delete.html")
            .replace("{obj}", &res::escape(what))
            .replace("{action}", action),
    )
    .into_response()
}

#[debug_handler]
pub(crate) async fn delete_room_page(
    Path(id): Path<Uuid>,
    State(db_pool): State<SqlitePool>,
    session: Session,
) -> AppResult<Response> {
    let id = id.to_string();
    let Some(user) = session::current_user(&session, &db_pool).await? else {
        return Ok(session::login_redirect());
    };
    let room = store::rooms::find(&db_pool, &id)
        .await?
        .ok_or(AppError::not_found("room"))?;
    if room.host_id != user.id {
        return Ok(super::not_allowed());
    }
    Ok(render_confirm(&room.name, &format!("/delete-room/{id}/")))
}

#[debug_handler]
pub(crate) async fn delete_room(
    Path(id): Path<Uuid>,
    State(db_pool): State<SqlitePool>,
    session: Session,
) -> AppResult<Response> {
    let id = id.to_string();
    let Some(user) = session::current_user(&session, &db_pool).await? else {
        return Ok(session::login_redirect());
    };
    let room = store::rooms::find(&db_pool, &id)
        .await?
        .ok_or(AppError::not_found("room"))?;
    if room.host_id != user.id {
        return Ok(super::not_allowed());
    }

    store::rooms::delete(&db_pool, &id).await?;
    Ok(Redirect::to("/").into_response())
}

#[debug_handler]
pub(crate) async fn delete_message_page(
    Path(id): Path<Uuid>,
    State(db_pool): State<SqlitePool>,
    session: Session,
) -> AppResult<Response> {
    let id = id.to_string();
    let Some(user) = session::current_user(&session, &db_pool).await? else {
        return Ok(session::login_redirect());
    };
    let message = store::messages::find(&db_pool, &id)
        .await?
        .ok_or(AppError::not_found("message"))?;
    if message.user_id != user.id {
        return Ok(super::not_allowed());
    }
    Ok(render_confirm(&message.body, &format!("/delete-message/{id}/")))
}

#[debug_handler]
pub(crate) async fn delete_message(
    Path(id): Path<Uuid>,
    State(db_pool): State<SqlitePool>,
    session: Session,
) -> AppResult<Response> {
    let id = id.to_string();
    let Some(user) = session::current_user(&session, &db_pool).await? else {
        return Ok(session::login_redirect());
    };
    let message = store::messages::find(&db_pool, &id)
        .await?
        .ok_or(AppError::not_found("message"))?;
    if message.user_id != user.id {
        return Ok(super::not_allowed());
    }

    store::messages::delete(&db_pool, &id).await?;
    Ok(Redirect::to("/").into_response())
}
