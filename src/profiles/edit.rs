use std::path::PathBuf;

use axum::{
    debug_handler,
    extract::{Multipart, State},
    response::{Html, IntoResponse, Redirect, Response},
};
use sqlx::SqlitePool;
use tower_sessions::Session;

use crate::{
    forms::{self, ProfileForm},
    include_res, res, session, store, AppResult, AppState,
};

const ALLOWED_AVATAR_EXTS: &[&str] = &["png", "jpg", "jpeg", "gif", "webp"];

fn render(notices_html: &str, form: &ProfileForm) -> Response {
    Html(
        include_res!(str, "/pages/update_user.html")
            .replace("{notices}", notices_html)
            .replace("{name}", &res::escape(&form.name))
            .replace("{username}", &res::escape(&form.username))
            .replace("{email}", &res::escape(&form.email))
            .replace("{bio}", &res::escape(&form.bio)),
    )
    .into_response()
}

#[debug_handler]
pub(crate) async fn update_user_page(
    State(db_pool): State<SqlitePool>,
    session: Session,
) -> AppResult<Response> {
    let Some(user) = session::current_user(&session, &db_pool).await? else {
        return Ok(session::login_redirect());
    };
    let form = ProfileForm {
        name: user.name,
        username: user.username,
        email: user.email,
        bio: user.bio,
    };
    Ok(render("", &form))
}

#[debug_handler(state = AppState)]
pub(crate) async fn update_user(
    State(db_pool): State<SqlitePool>,
    State(static_dir): State<PathBuf>,
    session: Session,
    mut multipart: Multipart,
) -> AppResult<Response> {
    let Some(user) = session::current_user(&session, &db_pool).await? else {
        return Ok(session::login_redirect());
    };

    let mut form = ProfileForm::default();
    let mut avatar_upload: Option<(String, Vec<u8>)> = None;

    while let Some(field) = multipart.next_field().await? {
        let name = field.name().unwrap_or_default().to_owned();
        match name.as_str() {
            "name" => form.name = field.text().await?,
            "username" => form.username = field.text().await?,
            "email" => form.email = field.text().await?,
            "bio" => form.bio = field.text().await?,
            "avatar" => {
                let file_name = field.file_name().unwrap_or_default().to_owned();
                let bytes = field.bytes().await?;
                if !file_name.is_empty() && !bytes.is_empty() {
                    avatar_upload = Some((file_name, bytes.to_vec()));
                }
            }
            _ => {}
        }
    }

    let fields = match forms::profile(&form) {
        Ok(fields) => fields,
        Err(errors) => return Ok(render(&res::field_errors(&errors), &form)),
    };

    let mut errors = forms::FieldErrors::default();
    if fields.username != user.username
        && store::users::username_taken(&db_pool, &fields.username).await?
    {
        errors.push("username", "That username is already taken.");
    }
    if fields.email != user.email && store::users::email_taken(&db_pool, &fields.email).await? {
        errors.push("email", "An account with that email already exists.");
    }

    let staged_ext = match &avatar_upload {
        Some((file_name, _)) => match avatar_ext(file_name) {
            Some(ext) => Some(ext),
            None => {
                errors.push("avatar", "Unsupported image type.");
                None
            }
        },
        None => None,
    };

    // Nothing touches disk until the whole update is known good.
    if !errors.is_empty() {
        return Ok(render(&res::field_errors(&errors), &form));
    }

    let avatar = match (&avatar_upload, staged_ext) {
        (Some((_, bytes)), Some(ext)) => {
            Some(save_avatar(&static_dir, &user.id, &ext, bytes).await?)
        }
        _ => None,
    };

    store::users::update_profile(&db_pool, &user.id, &fields, avatar.as_deref()).await?;
    Ok(Redirect::to(&format!("/profile/{}/", user.id)).into_response())
}

fn avatar_ext(file_name: &str) -> Option<String> {
    let ext = file_name
        .rsplit_once('.')
        .map(|(_, ext)| ext.to_lowercase())?;
    ALLOWED_AVATAR_EXTS.contains(&ext.as_str()).then_some(ext)
}

/// Writes the upload under `<static>/avatars/<user_id>.<ext>` and returns
/// the URL path to store.
async fn save_avatar(
    static_dir: &PathBuf,
    user_id: &str,
    ext: &str,
    bytes: &[u8],
) -> AppResult<String> {
    let dir = static_dir.join("avatars");
    tokio::fs::create_dir_all(&dir).await?;
    let file = format!("{user_id}.{ext}");
    tokio::fs::write(dir.join(&file), bytes).await?;
    Ok(format!("/static/avatars/{file}"))
}
