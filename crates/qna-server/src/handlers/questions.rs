//! Question and answer handlers

use crate::error::ApiError;
use crate::AppState;
use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::StatusCode,
    Json,
};
use qna_core::{
    Answer, AnswerInput, Id, NewQuestion, Question, QuestionDetail, QuestionWithAnswerCount,
};

/// Path ids must be plain decimal integers. Well-formed ids that cannot
/// exist (zero, negative) are left to the lookup and end up as 404.
fn parse_question_id(raw: &str) -> Result<Id, ApiError> {
    raw.parse::<Id>()
        .map_err(|_| ApiError::InvalidQuestionId(raw.to_string()))
}

pub async fn create(
    State(state): State<AppState>,
    payload: Result<Json<NewQuestion>, JsonRejection>,
) -> Result<(StatusCode, Json<Question>), ApiError> {
    let Json(request) = payload?;
    let question = state.qna.ask(&request).await?;
    Ok((StatusCode::CREATED, Json(question)))
}

pub async fn list(
    State(state): State<AppState>,
) -> Result<Json<Vec<QuestionWithAnswerCount>>, ApiError> {
    Ok(Json(state.qna.list().await?))
}

pub async fn get(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<QuestionDetail>, ApiError> {
    let id = parse_question_id(&id)?;
    Ok(Json(state.qna.detail(id).await?))
}

pub async fn answer(
    State(state): State<AppState>,
    Path(id): Path<String>,
    payload: Result<Json<AnswerInput>, JsonRejection>,
) -> Result<(StatusCode, Json<Answer>), ApiError> {
    let id = parse_question_id(&id)?;
    let input = payload.map(|Json(input)| input).map_err(ApiError::from);
    let answer = state.qna.answer(id, input).await?;
    Ok((StatusCode::CREATED, Json(answer)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_question_id() {
        assert_eq!(parse_question_id("42").unwrap(), 42);
        assert_eq!(parse_question_id("-3").unwrap(), -3);
        for raw in ["abc", "1.5", "", "12abc", " 7"] {
            assert!(
                matches!(parse_question_id(raw), Err(ApiError::InvalidQuestionId(_))),
                "{:?} should be rejected",
                raw
            );
        }
    }
}
