//! OAuth 토큰 교환 응답
//!
//! Google 과 GitHub 모두 같은 형태로 응답합니다. GitHub 는 잘못된 code 에 대해서도
//! 200 과 함께 `error` 필드를 돌려주므로 `access_token` 은 선택 필드입니다.

use serde::Deserialize;

use crate::errors::{AppError, AppResult};

#[derive(Debug, Clone, Deserialize)]
pub struct OAuthTokenResponse {
    #[serde(default)]
    pub access_token: Option<String>,
    #[serde(default)]
    pub token_type: Option<String>,
    #[serde(default)]
    pub scope: Option<String>,
    #[serde(default)]
    pub error: Option<String>,
    #[serde(default)]
    pub error_description: Option<String>,
}

impl OAuthTokenResponse {
    /// 액세스 토큰을 꺼냅니다. 프로바이더 에러 응답이면 인증 에러입니다.
    pub fn into_access_token(self) -> AppResult<String> {
        if let Some(error) = self.error {
            let detail = self.error_description.unwrap_or_default();
            return Err(AppError::AuthenticationError(format!(
                "Token exchange rejected: {} {}",
                error, detail
            )));
        }

        self.access_token
            .filter(|token| !token.is_empty())
            .ok_or_else(|| {
                AppError::ExternalServiceError("Token response without access_token".to_string())
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_access_token_extracted() {
        let response: OAuthTokenResponse = serde_json::from_str(
            r#"{"access_token":"gho_abc","token_type":"bearer","scope":"user:email"}"#,
        )
        .unwrap();

        assert_eq!(response.into_access_token().unwrap(), "gho_abc");
    }

    #[test]
    fn test_github_error_payload_is_rejected() {
        let response: OAuthTokenResponse = serde_json::from_str(
            r#"{"error":"bad_verification_code","error_description":"The code passed is incorrect or expired."}"#,
        )
        .unwrap();

        assert!(matches!(
            response.into_access_token(),
            Err(AppError::AuthenticationError(_))
        ));
    }

    #[test]
    fn test_missing_access_token() {
        let response: OAuthTokenResponse = serde_json::from_str(r#"{}"#).unwrap();
        assert!(matches!(
            response.into_access_token(),
            Err(AppError::ExternalServiceError(_))
        ));
    }
}
