use serde::{Deserialize, Serialize};

use crate::config::AuthProvider;
use crate::domain::entities::accounts::Account;

/// 사용자 응답 DTO
///
/// 비밀번호 해시와 프로바이더 사용자 ID는 노출하지 않습니다.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserResponse {
    pub id: String,
    pub name: String,
    pub email: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub age: Option<u32>,
    /// 연결된 OAuth 프로바이더 목록
    pub providers: Vec<AuthProvider>,
    /// 로컬 비밀번호 로그인 가능 여부
    pub has_password: bool,
    /// RFC 3339
    pub created_at: String,
    pub updated_at: String,
}

impl From<Account> for UserResponse {
    fn from(account: Account) -> Self {
        let providers = account.providers();
        let has_password = account.has_password();

        Self {
            id: account.id_string().unwrap_or_default(),
            name: account.name,
            email: account.email,
            age: account.age,
            providers,
            has_password,
            created_at: account.created_at.try_to_rfc3339_string().unwrap_or_default(),
            updated_at: account.updated_at.try_to_rfc3339_string().unwrap_or_default(),
        }
    }
}

/// 로그인 응답 DTO
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginResponse {
    pub message: String,
    /// 세션 토큰 (쿠키와 동일한 값)
    pub token: String,
    pub user: UserResponse,
}

impl LoginResponse {
    pub fn new(account: Account, token: String) -> Self {
        Self {
            message: "Login successful".to_string(),
            token,
            user: UserResponse::from(account),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::accounts::{NewAccount, ProviderLink};
    use mongodb::bson::oid::ObjectId;

    #[test]
    fn test_user_response_hides_secrets() {
        let mut account = Account::from_new(NewAccount::local(
            "Jane".to_string(),
            "jane@example.com".to_string(),
            30,
            "$2b$04$secret-hash".to_string(),
        ));
        account.id = Some(ObjectId::new());
        account
            .provider_links
            .push(ProviderLink::new(AuthProvider::Google, "g-123"));

        let response = UserResponse::from(account.clone());
        let json = serde_json::to_string(&response).unwrap();

        assert_eq!(response.id, account.id_string().unwrap());
        assert!(response.has_password);
        assert_eq!(response.providers, vec![AuthProvider::Google]);
        assert!(!json.contains("secret-hash"));
        assert!(!json.contains("g-123"));
        assert!(json.contains("\"providers\":[\"google\"]"));
    }
}
