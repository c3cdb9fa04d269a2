//! 회원가입 요청 DTO
//!
//! 로컬 계정 생성을 위한 HTTP 요청 데이터 구조를 정의합니다.
use serde::Deserialize;
use validator::{Validate, ValidationError};

/// `POST /api/users` 요청 본문
///
/// 네 필드 모두 필수입니다. 필드가 빠지면 JSON 역직렬화 단계에서 400 이 됩니다.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct SignupRequest {
    /// 표시 이름 (1-100자)
    #[validate(length(max = 100, message = "Name must be at most 100 characters"))]
    #[validate(custom(function = "validate_not_blank"))]
    pub name: String,

    /// 이메일 주소 (저장 전 정규화)
    #[validate(email(message = "A valid email address is required"))]
    pub email: String,

    #[validate(range(max = 150, message = "Age must be between 0 and 150"))]
    pub age: u32,

    /// bcrypt 입력 한도(72바이트) 이내
    #[validate(length(min = 1, max = 72, message = "Password must be 1-72 characters"))]
    pub password: String,
}

/// 공백만 있는 값 거부
fn validate_not_blank(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::new("blank").with_message("Name is required".into()));
    }
    Ok(())
}
