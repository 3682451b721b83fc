//! Question types

use crate::answer::Answer;
use crate::validation::ValidationErrors;
use crate::Id;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A question posted by a user
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Question {
    pub id: Id,
    pub title: String,
    pub body: String,
    /// Author's username (not a user id)
    pub username: String,
    pub created_at: DateTime<Utc>,
}

/// Question creation request (`POST /api/questions`)
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewQuestion {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub body: String,
    #[serde(default)]
    pub username: String,
}

impl NewQuestion {
    pub fn new(
        username: impl Into<String>,
        title: impl Into<String>,
        body: impl Into<String>,
    ) -> Self {
        Self {
            title: title.into(),
            body: body.into(),
            username: username.into(),
        }
    }

    pub fn validate(&self) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::new();
        errors.require_text("username", &self.username);
        errors.require_text("title", &self.title);
        errors.require_text("body", &self.body);
        errors.into_result()
    }
}

/// Question listing entry with its number of answers
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuestionWithAnswerCount {
    #[serde(flatten)]
    pub question: Question,
    pub answer_count: u64,
}

/// A question together with its answer thread
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuestionDetail {
    pub question: Question,
    pub answers: Vec<Answer>,
}
