//! Question and answer service

use crate::error::ApiError;
use futures::future::try_join_all;
use qna_core::{
    Answer, AnswerInput, Id, NewQuestion, Question, QuestionDetail, QuestionWithAnswerCount,
    Storage,
};
use std::sync::Arc;
use tracing::info;

pub struct QnaService {
    storage: Arc<dyn Storage>,
}

impl QnaService {
    pub fn new(storage: Arc<dyn Storage>) -> Self {
        Self { storage }
    }

    /// Post a question on behalf of an existing user
    pub async fn ask(&self, request: &NewQuestion) -> Result<Question, ApiError> {
        request.validate()?;
        self.require_user(&request.username).await?;

        let question = self.storage.create_question(request).await?;
        info!(
            "Question {} asked by {}: {}",
            question.id, question.username, question.title
        );
        Ok(question)
    }

    /// Every question, oldest first, with answer counts
    pub async fn list(&self) -> Result<Vec<QuestionWithAnswerCount>, ApiError> {
        let questions = self.storage.get_questions().await?;
        Ok(with_answer_counts(self.storage.as_ref(), questions).await?)
    }

    pub async fn detail(&self, id: Id) -> Result<QuestionDetail, ApiError> {
        let question = self.require_question(id).await?;
        let answers = self.storage.get_answers_by_question_id(id).await?;
        Ok(QuestionDetail { question, answers })
    }

    /// Answer question `question_id`.
    ///
    /// `input` is the already-extracted request body. It is only inspected
    /// once the question is known to exist, so an unknown question is
    /// reported as such even when the body is malformed.
    pub async fn answer(
        &self,
        question_id: Id,
        input: Result<AnswerInput, ApiError>,
    ) -> Result<Answer, ApiError> {
        self.require_question(question_id).await?;

        let input = input?;
        input.validate()?;
        self.require_user(&input.username).await?;

        let answer = self
            .storage
            .create_answer(&input.for_question(question_id))
            .await?;
        info!(
            "Answer {} to question {} by {}",
            answer.id, question_id, answer.username
        );
        Ok(answer)
    }

    async fn require_user(&self, username: &str) -> Result<(), ApiError> {
        match self.storage.get_user_by_username(username).await? {
            Some(_) => Ok(()),
            None => Err(ApiError::UserNotFound(username.to_string())),
        }
    }

    async fn require_question(&self, id: Id) -> Result<Question, ApiError> {
        self.storage
            .get_question_by_id(id)
            .await?
            .ok_or(ApiError::QuestionNotFound(id))
    }
}

/// Attach answer counts, one count lookup per question, issued concurrently
pub(crate) async fn with_answer_counts(
    storage: &dyn Storage,
    questions: Vec<Question>,
) -> qna_core::Result<Vec<QuestionWithAnswerCount>> {
    let counts = try_join_all(
        questions
            .iter()
            .map(|q| storage.get_answers_count_by_question_id(q.id)),
    )
    .await?;

    Ok(questions
        .into_iter()
        .zip(counts)
        .map(|(question, answer_count)| QuestionWithAnswerCount {
            question,
            answer_count,
        })
        .collect())
}
