//! Answer types

use crate::validation::ValidationErrors;
use crate::Id;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// An answer to a question
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Answer {
    pub id: Id,
    pub question_id: Id,
    pub body: String,
    pub username: String,
    pub created_at: DateTime<Utc>,
}

/// Answer body as posted to `POST /api/questions/:id/answers`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnswerInput {
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub body: String,
}

impl AnswerInput {
    pub fn validate(&self) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::new();
        errors.require_text("username", &self.username);
        errors.require_text("body", &self.body);
        errors.into_result()
    }

    /// Attach the question id taken from the request path
    pub fn for_question(self, question_id: Id) -> NewAnswer {
        NewAnswer {
            question_id,
            body: self.body,
            username: self.username,
        }
    }
}

/// Answer creation record handed to storage
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewAnswer {
    pub question_id: Id,
    pub body: String,
    pub username: String,
}

impl NewAnswer {
    pub fn new(question_id: Id, username: impl Into<String>, body: impl Into<String>) -> Self {
        Self {
            question_id,
            body: body.into(),
            username: username.into(),
        }
    }

    pub fn validate(&self) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::new();
        if self.question_id <= 0 {
            errors.push("questionId", "questionId must be a positive integer");
        }
        errors.require_text("username", &self.username);
        errors.require_text("body", &self.body);
        errors.into_result()
    }
}
