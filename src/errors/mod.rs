//! 에러 타입 모듈
//!
//! [`AppError`](errors::AppError)와 HTTP 응답 매핑을 제공합니다.

pub mod errors;

pub use errors::{AppError, AppResult, ErrorContext};
