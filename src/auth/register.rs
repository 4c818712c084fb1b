use axum::{
    debug_handler,
    extract::State,
    response::{Html, IntoResponse, Redirect, Response},
    Form,
};
use sqlx::SqlitePool;
use tower_sessions::Session;

use crate::{
    forms::{self, RegisterForm},
    include_res, res, session,
    store::{self, users::NewUser},
    AppResult,
};

fn render(notices_html: &str, form: &RegisterForm) -> Response {
    Html(
        include_res!(str, "/pages/register.html")
            .replace("{notices}", notices_html)
            .replace("{name}", &res::escape(&form.name))
            .replace("{username}", &res::escape(&form.username))
            .replace("{email}", &res::escape(&form.email)),
    )
    .into_response()
}

#[debug_handler]
pub(crate) async fn register_page() -> Response {
    render("", &RegisterForm::default())
}

#[debug_handler]
pub(crate) async fn register(
    State(db_pool): State<SqlitePool>,
    session: Session,
    Form(form): Form<RegisterForm>,
) -> AppResult<Response> {
    let mut fields = match forms::register(&form) {
        Ok(fields) => fields,
        Err(errors) => {
            let notices = res::notices(&["Enter valid data."]) + &res::field_errors(&errors);
            return Ok(render(&notices, &form));
        }
    };

    let mut errors = forms::FieldErrors::default();
    if store::users::username_taken(&db_pool, &fields.username).await? {
        errors.push("username", "That username is already taken.");
    }
    if store::users::email_taken(&db_pool, &fields.email).await? {
        errors.push("email", "An account with that email already exists.");
    }
    if !errors.is_empty() {
        let notices = res::notices(&["Enter valid data."]) + &res::field_errors(&errors);
        return Ok(render(&notices, &form));
    }

    let password_hash = bcrypt::hash(&fields.password, bcrypt::DEFAULT_COST)?;
    fields.password.clear();

    let user = store::users::create(
        &db_pool,
        NewUser {
            name: &fields.name,
            username: &fields.username,
            email: &fields.email,
            password_hash: &password_hash,
        },
    )
    .await?;

    session::log_in(&session, &user).await?;
    Ok(Redirect::to("/").into_response())
}
