//! Business logic services

pub mod qna;
pub mod users;

pub use qna::QnaService;
pub use users::{Login, UserService};
