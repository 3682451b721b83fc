//! User types

use crate::validation::ValidationErrors;
use crate::Id;
use serde::{Deserialize, Serialize};

/// Forum user, identified by a unique username
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: Id,
    pub username: String,
}

/// User creation request (`POST /api/user`)
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewUser {
    #[serde(default)]
    pub username: String,
}

impl NewUser {
    pub fn new(username: impl Into<String>) -> Self {
        Self {
            username: username.into(),
        }
    }

    pub fn validate(&self) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::new();
        errors.require_text("username", &self.username);
        errors.into_result()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_username_is_invalid() {
        let user: NewUser = serde_json::from_str("{}").unwrap();
        let errors = user.validate().unwrap_err();
        assert_eq!(errors.errors[0].field, "username");
    }

    #[test]
    fn test_user_json_shape() {
        let user = User {
            id: 7,
            username: "alice".to_string(),
        };
        assert_eq!(
            serde_json::to_value(&user).unwrap(),
            serde_json::json!({ "id": 7, "username": "alice" })
        );
    }
}
