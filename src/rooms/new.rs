use axum::{
    debug_handler,
    extract::State,
    response::{Html, IntoResponse, Redirect, Response},
    Form,
};
use sqlx::SqlitePool;
use tower_sessions::Session;

use crate::{
    forms::{self, RoomForm},
    include_res, res, session, store, AppResult,
};

pub(crate) fn render_form(
    notices_html: &str,
    form: &RoomForm,
    topics_html: &str,
    action: &str,
) -> Response {
    Html(
        include_res!(str, "/pages/room_form.html")
            .replace("{notices}", notices_html)
            .replace("{action}", action)
            .replace("{name}", &res::escape(&form.name))
            .replace("{topic}", &res::escape(&form.topic))
            .replace("{description}", &res::escape(&form.description))
            .replace("{topics}", topics_html),
    )
    .into_response()
}

#[debug_handler]
pub(crate) async fn create_room_page(
    State(db_pool): State<SqlitePool>,
    session: Session,
) -> AppResult<Response> {
    if session::user_id(&session).await?.is_none() {
        return Ok(session::login_redirect());
    }
    let topics = store::topics::search(&db_pool, "", None).await?;
    Ok(render_form(
        "",
        &RoomForm::default(),
        &res::topic_options(&topics),
        "/create-room/",
    ))
}

#[debug_handler]
pub(crate) async fn create_room(
    State(db_pool): State<SqlitePool>,
    session: Session,
    Form(form): Form<RoomForm>,
) -> AppResult<Response> {
    let Some(user) = session::current_user(&session, &db_pool).await? else {
        return Ok(session::login_redirect());
    };

    let fields = match forms::room(&form) {
        Ok(fields) => fields,
        Err(errors) => {
            let topics = store::topics::search(&db_pool, "", None).await?;
            return Ok(render_form(
                &res::field_errors(&errors),
                &form,
                &res::topic_options(&topics),
                "/create-room/",
            ));
        }
    };

    let topic = store::topics::get_or_create(&db_pool, &fields.topic).await?;
    store::rooms::create(&db_pool, &user.id, &topic.id, &fields.name, &fields.description)
        .await?;

    Ok(Redirect::to("/").into_response())
}
