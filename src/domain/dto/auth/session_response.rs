use serde::{Deserialize, Serialize};

use crate::domain::dto::users::UserResponse;

/// `GET /auth/check` 응답
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionCheckResponse {
    pub valid: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user: Option<UserResponse>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl SessionCheckResponse {
    pub fn valid(user: UserResponse) -> Self {
        Self {
            valid: true,
            user: Some(user),
            message: None,
        }
    }

    pub fn invalid(message: impl Into<String>) -> Self {
        Self {
            valid: false,
            user: None,
            message: Some(message.into()),
        }
    }
}
