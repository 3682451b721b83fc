//! Q&A Types - Pure entity definitions
//!
//! This crate contains only data types and their validation rules, with no
//! async runtime or storage dependencies.

pub mod answer;
pub mod question;
pub mod user;
pub mod validation;

pub use answer::*;
pub use question::*;
pub use user::*;
pub use validation::{ValidationError, ValidationErrors};

/// Identifier type shared by all entities
pub type Id = i64;
