use axum::{
    debug_handler,
    extract::State,
    response::{Html, IntoResponse, Redirect, Response},
    Form,
};
use sqlx::SqlitePool;
use tower_sessions::Session;

use crate::{forms::LoginForm, include_res, res, session, store, AppResult};

fn render(notice_lines: &[&str], email: &str) -> Response {
    Html(
        include_res!(str, "/pages/login.html")
            .replace("{notices}", &res::notices(notice_lines))
            .replace("{email}", &res::escape(email)),
    )
    .into_response()
}

#[debug_handler]
pub(crate) async fn login_page(session: Session) -> AppResult<Response> {
    if session::user_id(&session).await?.is_some() {
        return Ok(Redirect::to("/").into_response());
    }
    Ok(render(&[], ""))
}

#[debug_handler]
pub(crate) async fn login(
    State(db_pool): State<SqlitePool>,
    session: Session,
    Form(LoginForm { email, password }): Form<LoginForm>,
) -> AppResult<Response> {
    if session::user_id(&session).await?.is_some() {
        return Ok(Redirect::to("/").into_response());
    }

    let email = email.trim().to_lowercase();
    let mut notice_lines = Vec::new();

    let user = store::users::find_by_email(&db_pool, &email).await?;
    if user.is_none() {
        notice_lines.push("User does not exist.");
    }

    // A missing user still falls through to verification, which then fails
    // and stacks the second notice on top. Kept as-is on purpose; see
    // DESIGN.md before changing this flow.
    if let Some(user) = user {
        if bcrypt::verify(&password, &user.password_hash)? {
            session::log_in(&session, &user).await?;
            tracing::info!(username = user.username, "logged in");
            return Ok(Redirect::to("/").into_response());
        }
    }

    notice_lines.push("Username or Password does not match");
    Ok(render(&notice_lines, &email))
}
