//! User service: login-or-register and per-user question listings

use crate::error::ApiError;
use crate::services::qna::with_answer_counts;
use qna_core::{NewUser, QnaError, QuestionWithAnswerCount, Storage, User};
use std::sync::Arc;
use tracing::{debug, info};

pub struct UserService {
    storage: Arc<dyn Storage>,
}

/// Result of a login attempt
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Login {
    pub user: User,
    /// `true` when this call registered the user
    pub created: bool,
}

impl UserService {
    pub fn new(storage: Arc<dyn Storage>) -> Self {
        Self { storage }
    }

    /// Register `username`, or return the existing user if it is taken.
    ///
    /// Uniqueness is left to the storage insert; a duplicate signal is
    /// answered with the stored record instead of an error.
    pub async fn login(&self, request: &NewUser) -> Result<Login, ApiError> {
        request.validate()?;

        match self.storage.create_user(request).await {
            Ok(user) => {
                info!("Registered user {} (id={})", user.username, user.id);
                Ok(Login {
                    user,
                    created: true,
                })
            }
            Err(QnaError::DuplicateUsername(username)) => {
                debug!("User {} already exists, returning stored record", username);
                let user = self
                    .storage
                    .get_user_by_username(&username)
                    .await?
                    .ok_or_else(|| {
                        QnaError::Database(format!(
                            "user {} reported as duplicate but not found",
                            username
                        ))
                    })?;
                Ok(Login {
                    user,
                    created: false,
                })
            }
            Err(e) => Err(e.into()),
        }
    }

    /// Questions asked by `username`, each with its answer count
    pub async fn questions_of(
        &self,
        username: &str,
    ) -> Result<Vec<QuestionWithAnswerCount>, ApiError> {
        if self.storage.get_user_by_username(username).await?.is_none() {
            return Err(ApiError::UserNotFound(username.to_string()));
        }

        let questions = self.storage.get_questions_by_username(username).await?;
        Ok(with_answer_counts(self.storage.as_ref(), questions).await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryStorage;
    use qna_core::{NewAnswer, NewQuestion};

    fn service() -> (UserService, Arc<dyn Storage>) {
        let storage: Arc<dyn Storage> = Arc::new(MemoryStorage::new());
        (UserService::new(storage.clone()), storage)
    }

    #[tokio::test]
    async fn test_login_twice_returns_same_user() {
        let (users, _) = service();

        let first = users.login(&NewUser::new("alice")).await.unwrap();
        let second = users.login(&NewUser::new("alice")).await.unwrap();

        assert!(first.created);
        assert!(!second.created);
        assert_eq!(first.user, second.user);
    }

    #[tokio::test]
    async fn test_login_rejects_blank_username() {
        let (users, storage) = service();

        let err = users.login(&NewUser::new("  ")).await.unwrap_err();

        assert!(matches!(err, ApiError::Validation(_)));
        assert!(storage.get_user(1).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_questions_of_unknown_user() {
        let (users, _) = service();

        let err = users.questions_of("ghost").await.unwrap_err();

        assert!(matches!(err, ApiError::UserNotFound(name) if name == "ghost"));
    }

    #[tokio::test]
    async fn test_questions_of_includes_counts() {
        let (users, storage) = service();
        users.login(&NewUser::new("alice")).await.unwrap();
        let asked = storage
            .create_question(&NewQuestion::new("alice", "Title", "Body"))
            .await
            .unwrap();
        storage
            .create_question(&NewQuestion::new("bob", "Other", "Body"))
            .await
            .unwrap();
        storage
            .create_answer(&NewAnswer::new(asked.id, "bob", "Reply"))
            .await
            .unwrap();

        let listed = users.questions_of("alice").await.unwrap();

        assert_eq!(listed.len(), 1);
        assert_eq!(listed[0].question, asked);
        assert_eq!(listed[0].answer_count, 1);
    }
}
