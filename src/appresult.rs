use axum::{
    http::StatusCode,
    response::{Html, IntoResponse, Response},
};

pub type AppResult<T> = Result<T, AppError>;

pub enum AppError {
    /// A path parameter pointed at a row that doesn't exist.
    NotFound(&'static str),
    Internal(anyhow::Error),
}

impl AppError {
    pub fn not_found(what: &'static str) -> Self {
        Self::NotFound(what)
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        match self {
            Self::NotFound(what) => (
                StatusCode::NOT_FOUND,
                Html(format!("<h1>{what} not found</h1><a href=\"/\">go home</a>")),
            )
                .into_response(),
            Self::Internal(err) => {
                tracing::error!("unhandled error: {err:#}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Html("<h1>something went wrong</h1><a href=\"/\">go home</a>".to_owned()),
                )
                    .into_response()
            }
        }
    }
}

impl<E> From<E> for AppError
where
    E: Into<anyhow::Error>,
{
    fn from(err: E) -> Self {
        Self::Internal(err.into())
    }
}
