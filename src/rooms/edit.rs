use axum::{
    debug_handler,
    extract::{Path, State},
    response::{IntoResponse, Redirect, Response},
    Form,
};
use sqlx::SqlitePool;
use tower_sessions::Session;
use uuid::Uuid;

use crate::{
    forms::{self, RoomForm},
    res, session, store, AppError, AppResult,
};

use super::new::render_form;

#[debug_handler]
pub(crate) async fn update_room_page(
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

    let topic = store::topics::find(&db_pool, &room.topic_id)
        .await?
        .ok_or(AppError::not_found("topic"))?;
    let topics = store::topics::search(&db_pool, "", None).await?;

    let form = RoomForm {
        name: room.name,
        topic: topic.name,
        description: room.description,
    };
    Ok(render_form(
        "",
        &form,
        &res::topic_options(&topics),
        &format!("/update-room/{id}/"),
    ))
}

#[debug_handler]
pub(crate) async fn update_room(
    Path(id): Path<Uuid>,
    State(db_pool): State<SqlitePool>,
    session: Session,
    Form(form): Form<RoomForm>,
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

    let fields = match forms::room(&form) {
        Ok(fields) => fields,
        Err(errors) => {
            let topics = store::topics::search(&db_pool, "", None).await?;
            return Ok(render_form(
                &res::field_errors(&errors),
                &form,
                &res::topic_options(&topics),
                &format!("/update-room/{id}/"),
            ));
        }
    };

    let topic = store::topics::get_or_create(&db_pool, &fields.topic).await?;
    store::rooms::update(&db_pool, &id, &topic.id, &fields.name, &fields.description).await?;

    Ok(Redirect::to("/").into_response())
}
