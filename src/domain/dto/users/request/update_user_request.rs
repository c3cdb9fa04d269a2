//! 사용자 정보 수정 요청 DTO
use serde::Deserialize;
use validator::Validate;

use crate::domain::entities::accounts::AccountUpdate;
use crate::utils::string_utils::deserialize_optional_string;

/// `PUT /api/users/{id}` 요청 본문
///
/// `name`, `email`, `age` 만 반영합니다. 그 외 필드(비밀번호, 프로바이더 연결 등)는
/// 역직렬화 단계에서 무시됩니다.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct UpdateUserRequest {
    #[serde(default, deserialize_with = "deserialize_optional_string")]
    #[validate(length(max = 100, message = "Name must be at most 100 characters"))]
    pub name: Option<String>,

    #[serde(default, deserialize_with = "deserialize_optional_string")]
    #[validate(email(message = "A valid email address is required"))]
    pub email: Option<String>,

    #[serde(default)]
    #[validate(range(max = 150, message = "Age must be between 0 and 150"))]
    pub age: Option<u32>,
}

impl From<UpdateUserRequest> for AccountUpdate {
    fn from(request: UpdateUserRequest) -> Self {
        AccountUpdate {
            name: request.name,
            email: request.email,
            age: request.age,
        }
    }
}
