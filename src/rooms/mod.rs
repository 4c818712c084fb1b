mod delete;
mod edit;
mod new;
mod page;

use axum::{
    response::{Html, IntoResponse, Response},
    routing::get,
    Router,
};

use crate::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/room/{id}/", get(page::room).post(page::post_message))
        .route("/create-room/", get(new::create_room_page).post(new::create_room))
        .route("/update-room/{id}/", get(edit::update_room_page).post(edit::update_room))
        .route("/delete-room/{id}/", get(delete::delete_room_page).post(delete::delete_room))
        .route(
            "/delete-message/{id}/",
            get(delete::delete_message_page).post(delete::delete_message),
        )
}

// Ownership denials are an ordinary page, not a 403.
pub(crate) fn not_allowed() -> Response {
    Html("You are not allowed here!!").into_response()
}
