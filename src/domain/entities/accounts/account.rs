//! Account Entity Implementation
//!
//! 로컬 가입(이메일/비밀번호)과 OAuth 로그인을 하나의 계정으로 묶는 엔티티입니다.

use mongodb::bson::{oid::ObjectId, DateTime};
use serde::{Deserialize, Serialize};

use crate::config::AuthProvider;

/// 외부 프로바이더 계정 연결 정보
///
/// `(provider, provider_user_id)` 쌍은 전체 컬렉션에서 유일합니다.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProviderLink {
    pub provider: AuthProvider,
    pub provider_user_id: String,
}

impl ProviderLink {
    pub fn new(provider: AuthProvider, provider_user_id: impl Into<String>) -> Self {
        Self {
            provider,
            provider_user_id: provider_user_id.into(),
        }
    }

    /// 유니크 인덱스용 단일 문자열 키 (`google:1234`)
    pub fn key(&self) -> String {
        format!("{}:{}", self.provider, self.provider_user_id)
    }
}

/// 계정 엔티티 (`accounts` 컬렉션)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Account {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,
    /// 표시 이름
    pub name: String,
    /// 정규화된 이메일 (unique)
    pub email: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub age: Option<u32>,
    /// bcrypt 해시 (로컬 가입 계정만 보유)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub password_hash: Option<String>,
    /// 프로바이더당 최대 1개
    #[serde(default)]
    pub provider_links: Vec<ProviderLink>,
    /// `provider_links` 의 [`ProviderLink::key`] 목록 (유니크 인덱스 대상)
    #[serde(default)]
    pub link_keys: Vec<String>,
    pub created_at: DateTime,
    pub updated_at: DateTime,
}

impl Account {
    /// 저장 전 엔티티를 생성합니다. `id` 는 저장소가 할당합니다.
    pub fn from_new(new_account: NewAccount) -> Self {
        let now = DateTime::now();
        let link_keys = new_account.provider_links.iter().map(ProviderLink::key).collect();

        Self {
            id: None,
            name: new_account.name,
            email: new_account.email,
            age: new_account.age,
            password_hash: new_account.password_hash,
            provider_links: new_account.provider_links,
            link_keys,
            created_at: now,
            updated_at: now,
        }
    }

    /// 연결을 추가합니다. 호출자는 같은 프로바이더 연결이 없음을 확인해야 합니다.
    pub fn push_link(&mut self, link: ProviderLink) {
        self.link_keys.push(link.key());
        self.provider_links.push(link);
        self.updated_at = DateTime::now();
    }

    /// ID 문자열로 변환
    pub fn id_string(&self) -> Option<String> {
        self.id.as_ref().map(|id| id.to_hex())
    }

    /// 비밀번호 인증이 가능한 계정인지 확인
    pub fn has_password(&self) -> bool {
        self.password_hash.is_some()
    }

    pub fn link_for(&self, provider: AuthProvider) -> Option<&ProviderLink> {
        self.provider_links.iter().find(|link| link.provider == provider)
    }

    pub fn has_link(&self, link: &ProviderLink) -> bool {
        self.provider_links.contains(link)
    }

    pub fn providers(&self) -> Vec<AuthProvider> {
        self.provider_links.iter().map(|link| link.provider).collect()
    }
}

/// 계정 생성 요청 (저장소 입력)
#[derive(Debug, Clone)]
pub struct NewAccount {
    pub name: String,
    pub email: String,
    pub age: Option<u32>,
    pub password_hash: Option<String>,
    pub provider_links: Vec<ProviderLink>,
}

impl NewAccount {
    /// 로컬 가입 계정 (해시 있음, 연결 없음)
    pub fn local(name: String, email: String, age: u32, password_hash: String) -> Self {
        Self {
            name,
            email,
            age: Some(age),
            password_hash: Some(password_hash),
            provider_links: Vec::new(),
        }
    }

    /// 첫 OAuth 로그인으로 생성되는 계정 (연결 1개, 해시 없음)
    pub fn linked(name: String, email: String, link: ProviderLink) -> Self {
        Self {
            name,
            email,
            age: None,
            password_hash: None,
            provider_links: vec![link],
        }
    }
}

/// 프로필 갱신 요청
///
/// 비밀번호 해시와 프로바이더 연결은 이 경로로 바뀌지 않습니다.
#[derive(Debug, Clone, Default)]
pub struct AccountUpdate {
    pub name: Option<String>,
    pub email: Option<String>,
    pub age: Option<u32>,
}

impl AccountUpdate {
    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.email.is_none() && self.age.is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_local_account_has_password_and_no_links() {
        let account = Account::from_new(NewAccount::local(
            "Jane".to_string(),
            "jane@example.com".to_string(),
            30,
            "$2b$04$hash".to_string(),
        ));

        assert!(account.id.is_none());
        assert!(account.has_password());
        assert!(account.provider_links.is_empty());
        assert_eq!(account.created_at, account.updated_at);
    }

    #[test]
    fn test_linked_account_lookup_helpers() {
        let link = ProviderLink::new(AuthProvider::GitHub, "42");
        let account = Account::from_new(NewAccount::linked(
            "octocat".to_string(),
            "octo@example.com".to_string(),
            link.clone(),
        ));

        assert!(!account.has_password());
        assert!(account.has_link(&link));
        assert_eq!(account.link_keys, vec!["github:42".to_string()]);
        assert_eq!(account.link_for(AuthProvider::GitHub), Some(&link));
        assert!(account.link_for(AuthProvider::Google).is_none());
        assert_eq!(account.providers(), vec![AuthProvider::GitHub]);
    }

    #[test]
    fn test_push_link_keeps_keys_in_sync() {
        let mut account = Account::from_new(NewAccount::linked(
            "Jane".to_string(),
            "jane@example.com".to_string(),
            ProviderLink::new(AuthProvider::Google, "g-1"),
        ));
        account.push_link(ProviderLink::new(AuthProvider::GitHub, "7"));

        assert_eq!(account.providers(), vec![AuthProvider::Google, AuthProvider::GitHub]);
        assert_eq!(account.link_keys, vec!["google:g-1".to_string(), "github:7".to_string()]);
    }

    #[test]
    fn test_empty_update() {
        assert!(AccountUpdate::default().is_empty());
        assert!(!AccountUpdate {
            age: Some(3),
            ..Default::default()
        }
        .is_empty());
    }
}
