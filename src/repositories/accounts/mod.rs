//! # 계정 저장소
//!
//! 계정 조회/생성/연결/수정/삭제를 위한 [`AccountStore`] 인터페이스와
//! MongoDB, 인메모리 구현을 제공합니다.
//!
//! ## 유일성 보장
//!
//! `email` 과 `(provider, provider_user_id)` 유일성은 저장소가 원자적으로 보장합니다.
//! 위반 시 [`StoreError::DuplicateEmail`] / [`StoreError::DuplicateIdentity`] 를
//! 반환하고, 호출자(계정 연결 로직)가 재조회 후 재시도합니다.
//!
//! 전달되는 이메일은 이미 정규화되어 있다고 가정합니다.

pub mod memory_account_repo;
pub mod mongo_account_repo;

pub use memory_account_repo::InMemoryAccountStore;
pub use mongo_account_repo::MongoAccountStore;

use async_trait::async_trait;
use mongodb::bson::oid::ObjectId;
use thiserror::Error;

use crate::config::AuthProvider;
use crate::domain::entities::accounts::{Account, AccountUpdate, NewAccount, ProviderLink};
use crate::errors::AppError;

/// 저장소 계층 에러
#[derive(Debug, Clone, PartialEq, Error)]
pub enum StoreError {
    #[error("email already in use")]
    DuplicateEmail,

    #[error("provider identity already linked to an account")]
    DuplicateIdentity,

    /// 계정에 같은 프로바이더의 다른 ID가 이미 연결되어 있음
    #[error("account already linked to a different {0} identity")]
    ProviderAlreadyLinked(AuthProvider),

    #[error("account not found")]
    NotFound,

    #[error("account store unavailable: {0}")]
    Unavailable(String),
}

impl From<StoreError> for AppError {
    fn from(error: StoreError) -> Self {
        match error {
            StoreError::DuplicateEmail => AppError::DuplicateEmail,
            StoreError::DuplicateIdentity => AppError::DuplicateIdentity,
            StoreError::ProviderAlreadyLinked(provider) => AppError::ConflictError(format!(
                "Account is already linked to a different {} identity",
                provider
            )),
            StoreError::NotFound => AppError::NotFound("User not found".to_string()),
            StoreError::Unavailable(message) => AppError::StoreUnavailable(message),
        }
    }
}

pub type StoreResult<T> = Result<T, StoreError>;

/// 계정 저장소 인터페이스
#[async_trait]
pub trait AccountStore: Send + Sync {
    async fn find_by_id(&self, id: &ObjectId) -> StoreResult<Option<Account>>;

    async fn find_by_provider_link(&self, link: &ProviderLink) -> StoreResult<Option<Account>>;

    async fn find_by_email(&self, email: &str) -> StoreResult<Option<Account>>;

    /// 최근 생성 순
    async fn list(&self) -> StoreResult<Vec<Account>>;

    /// 새 계정을 저장하고 ID가 할당된 계정을 반환합니다.
    ///
    /// 이메일 또는 연결이 이미 존재하면 아무것도 저장하지 않고 실패합니다.
    async fn insert(&self, new_account: NewAccount) -> StoreResult<Account>;

    /// 계정에 연결을 원자적으로 추가합니다.
    ///
    /// - 이미 같은 연결이 있으면 그대로 반환
    /// - 같은 프로바이더의 다른 연결이 있으면 `ProviderAlreadyLinked`
    /// - 연결이 다른 계정에 있으면 `DuplicateIdentity`
    /// - 계정이 없으면 `NotFound`
    async fn attach_provider_link(&self, id: &ObjectId, link: ProviderLink) -> StoreResult<Account>;

    /// 이름/이메일/나이만 갱신합니다. 계정이 없으면 `None`.
    async fn update_profile(&self, id: &ObjectId, update: AccountUpdate) -> StoreResult<Option<Account>>;

    async fn delete(&self, id: &ObjectId) -> StoreResult<bool>;
}
