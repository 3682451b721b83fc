//! User handlers

use crate::error::ApiError;
use crate::AppState;
use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::StatusCode,
    Json,
};
use qna_core::{NewUser, QuestionWithAnswerCount, User};

/// `POST /api/user`: log in, registering the username on first use
pub async fn login(
    State(state): State<AppState>,
    payload: Result<Json<NewUser>, JsonRejection>,
) -> Result<(StatusCode, Json<User>), ApiError> {
    let Json(request) = payload?;
    let login = state.users.login(&request).await?;

    let status = if login.created {
        StatusCode::CREATED
    } else {
        StatusCode::OK
    };
    Ok((status, Json(login.user)))
}

pub async fn questions(
    State(state): State<AppState>,
    Path(username): Path<String>,
) -> Result<Json<Vec<QuestionWithAnswerCount>>, ApiError> {
    let questions = state.users.questions_of(&username).await?;
    Ok(Json(questions))
}
