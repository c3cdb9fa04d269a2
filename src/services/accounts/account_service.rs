//! 계정 조회/수정/삭제 (관리용 CRUD)

use std::sync::Arc;

use mongodb::bson::oid::ObjectId;

use super::credential_service::normalize_account_email;
use crate::domain::entities::accounts::{Account, AccountUpdate};
use crate::errors::{AppError, AppResult};
use crate::repositories::accounts::AccountStore;
use crate::utils::string_utils::validate_required_string;

/// 경로 파라미터의 계정 ID 파싱
pub(crate) fn parse_account_id(id: &str) -> AppResult<ObjectId> {
    ObjectId::parse_str(id).map_err(|_| AppError::ValidationError("Invalid user id".to_string()))
}

fn not_found() -> AppError {
    AppError::NotFound("User not found".to_string())
}

pub struct AccountService {
    store: Arc<dyn AccountStore>,
}

impl AccountService {
    pub fn new(store: Arc<dyn AccountStore>) -> Self {
        Self { store }
    }

    pub async fn list(&self) -> AppResult<Vec<Account>> {
        Ok(self.store.list().await?)
    }

    pub async fn get(&self, id: &str) -> AppResult<Account> {
        let object_id = parse_account_id(id)?;
        self.store.find_by_id(&object_id).await?.ok_or_else(not_found)
    }

    /// 이름/이메일/나이 갱신
    ///
    /// 비어 있는 요청은 현재 계정을 그대로 반환합니다.
    /// 이메일은 정규화되며 다른 계정이 사용 중이면 `DuplicateEmail` 입니다.
    pub async fn update(&self, id: &str, update: AccountUpdate) -> AppResult<Account> {
        let object_id = parse_account_id(id)?;

        if update.is_empty() {
            return self.store.find_by_id(&object_id).await?.ok_or_else(not_found);
        }

        let update = AccountUpdate {
            name: update
                .name
                .map(|name| validate_required_string(&name, "name"))
                .transpose()?,
            email: update
                .email
                .map(|email| normalize_account_email(&email))
                .transpose()?,
            age: update.age,
        };

        let account = self
            .store
            .update_profile(&object_id, update)
            .await?
            .ok_or_else(not_found)?;

        log::info!("✏️ 계정 수정: {}", object_id.to_hex());
        Ok(account)
    }

    pub async fn delete(&self, id: &str) -> AppResult<()> {
        let object_id = parse_account_id(id)?;

        if !self.store.delete(&object_id).await? {
            return Err(not_found());
        }

        log::info!("🗑️ 계정 삭제: {}", object_id.to_hex());
        Ok(())
    }
}
