//! # 사용자 관련 요청 DTO 모듈
//!
//! 클라이언트로부터 받은 JSON 데이터를 구조화된 Rust 타입으로 변환하고
//! `validator` 크레이트로 검증합니다.
//!
//! ## 에러 핸들링
//!
//! - JSON 구문/타입/누락 필드 오류: `JsonConfig` 에러 핸들러에서 400
//! - 형식 검증 실패: `AppError::ValidationError` (400)

pub mod login_request;
pub mod signup_request;
pub mod update_user_request;

pub use login_request::LoginRequest;
pub use signup_request::SignupRequest;
pub use update_user_request::UpdateUserRequest;
