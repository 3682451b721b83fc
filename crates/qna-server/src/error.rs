//! HTTP-facing error type

use axum::{
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use qna_core::{Id, QnaError, ValidationErrors};
use serde_json::json;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ApiError {
    #[error("Invalid request body: {0}")]
    InvalidBody(String),

    #[error(transparent)]
    Validation(#[from] ValidationErrors),

    #[error("Invalid question ID: {0}")]
    InvalidQuestionId(String),

    #[error("User not found: {0}")]
    UserNotFound(String),

    #[error("Question not found: {0}")]
    QuestionNotFound(Id),

    #[error(transparent)]
    Storage(#[from] QnaError),
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::InvalidBody(_)
            | ApiError::Validation(_)
            | ApiError::InvalidQuestionId(_) => StatusCode::BAD_REQUEST,
            ApiError::UserNotFound(_) | ApiError::QuestionNotFound(_) => StatusCode::NOT_FOUND,
            ApiError::Storage(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError::InvalidBody(rejection.body_text())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let body = match &self {
            ApiError::InvalidBody(reason) => json!({
                "message": "Invalid request body",
                "errors": [{ "field": "body", "message": reason }],
            }),
            ApiError::Validation(errors) => json!({
                "message": "Invalid request body",
                "errors": errors,
            }),
            ApiError::InvalidQuestionId(_) => json!({ "message": "Invalid question ID" }),
            ApiError::UserNotFound(_) => json!({ "message": "User not found" }),
            ApiError::QuestionNotFound(_) => json!({ "message": "Question not found" }),
            ApiError::Storage(e) => {
                tracing::error!("Storage error: {}", e);
                json!({ "message": "Server error while processing request" })
            }
        };
        (status, Json(body)).into_response()
    }
}
