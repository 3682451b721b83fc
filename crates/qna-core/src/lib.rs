//! Q&A Core Library
//!
//! Storage port and error taxonomy shared by every backend of the Q&A forum.

// Re-export pure types from qna-types
pub use qna_types::*;

pub mod error;
pub mod ports;

pub use error::{QnaError, Result};
pub use ports::Storage;
