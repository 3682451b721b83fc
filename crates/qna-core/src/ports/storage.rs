//! Storage trait for persistence

use crate::Result;
use async_trait::async_trait;
use qna_types::{Answer, Id, NewAnswer, NewQuestion, NewUser, Question, User};

/// Storage backend for users, questions and answers.
///
/// Every backend must behave identically:
/// - lookups of a missing id or username return `Ok(None)`, never an error;
/// - username matching is case-sensitive;
/// - question listings and answer threads are ordered oldest first
///   (`created_at` ascending, ties broken by ascending id);
/// - `get_answers_count_by_question_id(q)` always equals
///   `get_answers_by_question_id(q).len()`.
///
/// Create operations do not check that referenced users or questions exist;
/// that is the caller's job.
#[async_trait]
pub trait Storage: Send + Sync {
    /// Short backend name, used in logs and the health endpoint
    fn name(&self) -> &'static str;

    // User operations
    async fn get_user(&self, id: Id) -> Result<Option<User>>;
    async fn get_user_by_username(&self, username: &str) -> Result<Option<User>>;

    /// Create a user with a fresh, monotonically increasing id.
    ///
    /// Fails with [`QnaError::DuplicateUsername`](crate::QnaError::DuplicateUsername)
    /// if the username is taken. The check and the insert are atomic.
    async fn create_user(&self, user: &NewUser) -> Result<User>;

    // Question operations
    async fn get_questions(&self) -> Result<Vec<Question>>;
    async fn get_question_by_id(&self, id: Id) -> Result<Option<Question>>;
    async fn get_questions_by_username(&self, username: &str) -> Result<Vec<Question>>;

    /// Create a question stamped with the current time
    async fn create_question(&self, question: &NewQuestion) -> Result<Question>;

    // Answer operations
    async fn get_answers_by_question_id(&self, question_id: Id) -> Result<Vec<Answer>>;

    /// Create an answer stamped with the current time
    async fn create_answer(&self, answer: &NewAnswer) -> Result<Answer>;
    async fn get_answers_count_by_question_id(&self, question_id: Id) -> Result<u64>;

    /// Release backend resources at shutdown
    async fn close(&self) {}
}
