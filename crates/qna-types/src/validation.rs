//! Field-level validation for incoming records

use serde::Serialize;
use thiserror::Error;

/// A single rejected field
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Error)]
#[error("{field}: {message}")]
pub struct ValidationError {
    pub field: String,
    pub message: String,
}

/// All fields rejected while validating one record
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Error)]
#[error("invalid request body ({} field errors)", .errors.len())]
#[serde(transparent)]
pub struct ValidationErrors {
    pub errors: Vec<ValidationError>,
}

impl ValidationErrors {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record an error when `value` is missing or only whitespace
    pub fn require_text(&mut self, field: &str, value: &str) {
        if value.trim().is_empty() {
            self.errors.push(ValidationError {
                field: field.to_string(),
                message: format!("{} must not be empty", field),
            });
        }
    }

    pub fn push(&mut self, field: &str, message: impl Into<String>) {
        self.errors.push(ValidationError {
            field: field.to_string(),
            message: message.into(),
        });
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    /// Convert into a `Result`, failing when at least one field was rejected
    pub fn into_result(self) -> Result<(), ValidationErrors> {
        if self.is_empty() {
            Ok(())
        } else {
            Err(self)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_require_text() {
        let mut errors = ValidationErrors::new();
        errors.require_text("title", "How do lifetimes work?");
        assert!(errors.is_empty());

        errors.require_text("body", "   \n\t");
        errors.require_text("username", "");
        assert_eq!(errors.errors.len(), 2);
        assert_eq!(errors.errors[0].field, "body");
        assert_eq!(errors.errors[1].message, "username must not be empty");
        assert!(errors.into_result().is_err());
    }

    #[test]
    fn test_serializes_as_list() {
        let mut errors = ValidationErrors::new();
        errors.push("username", "username is required");

        let json = serde_json::to_value(&errors).unwrap();
        assert_eq!(
            json,
            serde_json::json!([{ "field": "username", "message": "username is required" }])
        );
    }
}
