use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use findmy_model::ApiMessage;
use thiserror::Error;

#[derive(Error, Debug, PartialEq)]
pub enum AppError {
    #[error("{0}")]
    Validation(String),

    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("Invalid token")]
    InvalidToken,

    #[error("User already exists")]
    EmailTaken,

    #[error("Item not found")]
    ItemNotFound,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = match self {
            AppError::Validation { .. } | AppError::EmailTaken => StatusCode::BAD_REQUEST,
            AppError::InvalidCredentials | AppError::InvalidToken => StatusCode::UNAUTHORIZED,
            AppError::ItemNotFound => StatusCode::NOT_FOUND,
        };

        let body = Json(ApiMessage {
            message: self.to_string(),
        });

        (status, body).into_response()
    }
}
