//! # 인메모리 계정 저장소
//!
//! 개발 환경(`ACCOUNT_STORE=memory`)과 테스트에서 사용합니다.
//! 하나의 뮤텍스 안에서 검사와 쓰기를 함께 수행하므로
//! 유일성 보장은 MongoDB 구현과 동일합니다.

use std::sync::Mutex;

use async_trait::async_trait;
use mongodb::bson::{oid::ObjectId, DateTime};

use super::{AccountStore, StoreError, StoreResult};
use crate::domain::entities::accounts::{Account, AccountUpdate, NewAccount, ProviderLink};

#[derive(Default)]
pub struct InMemoryAccountStore {
    accounts: Mutex<Vec<Account>>,
}

impl InMemoryAccountStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> StoreResult<std::sync::MutexGuard<'_, Vec<Account>>> {
        self.accounts
            .lock()
            .map_err(|_| StoreError::Unavailable("account store lock poisoned".to_string()))
    }
}

#[async_trait]
impl AccountStore for InMemoryAccountStore {
    async fn find_by_id(&self, id: &ObjectId) -> StoreResult<Option<Account>> {
        let accounts = self.lock()?;
        Ok(accounts.iter().find(|a| a.id.as_ref() == Some(id)).cloned())
    }

    async fn find_by_provider_link(&self, link: &ProviderLink) -> StoreResult<Option<Account>> {
        let accounts = self.lock()?;
        Ok(accounts.iter().find(|a| a.has_link(link)).cloned())
    }

    async fn find_by_email(&self, email: &str) -> StoreResult<Option<Account>> {
        let accounts = self.lock()?;
        Ok(accounts.iter().find(|a| a.email == email).cloned())
    }

    async fn list(&self) -> StoreResult<Vec<Account>> {
        let accounts = self.lock()?;
        let mut listed: Vec<Account> = accounts.iter().rev().cloned().collect();
        listed.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(listed)
    }

    async fn insert(&self, new_account: NewAccount) -> StoreResult<Account> {
        let mut accounts = self.lock()?;

        if accounts.iter().any(|a| a.email == new_account.email) {
            return Err(StoreError::DuplicateEmail);
        }
        let linked_elsewhere = new_account
            .provider_links
            .iter()
            .any(|link| accounts.iter().any(|a| a.has_link(link)));
        if linked_elsewhere {
            return Err(StoreError::DuplicateIdentity);
        }

        let mut account = Account::from_new(new_account);
        account.id = Some(ObjectId::new());
        accounts.push(account.clone());

        Ok(account)
    }

    async fn attach_provider_link(&self, id: &ObjectId, link: ProviderLink) -> StoreResult<Account> {
        let mut accounts = self.lock()?;

        let owner = accounts
            .iter()
            .find(|a| a.has_link(&link))
            .and_then(|a| a.id);
        if let Some(owner) = owner {
            if &owner != id {
                return Err(StoreError::DuplicateIdentity);
            }
        }

        let account = accounts
            .iter_mut()
            .find(|a| a.id.as_ref() == Some(id))
            .ok_or(StoreError::NotFound)?;

        if account.has_link(&link) {
            return Ok(account.clone());
        }
        if account.link_for(link.provider).is_some() {
            return Err(StoreError::ProviderAlreadyLinked(link.provider));
        }

        account.push_link(link);
        Ok(account.clone())
    }

    async fn update_profile(&self, id: &ObjectId, update: AccountUpdate) -> StoreResult<Option<Account>> {
        let mut accounts = self.lock()?;

        if let Some(email) = &update.email {
            let taken = accounts
                .iter()
                .any(|a| &a.email == email && a.id.as_ref() != Some(id));
            if taken {
                return Err(StoreError::DuplicateEmail);
            }
        }

        let Some(account) = accounts.iter_mut().find(|a| a.id.as_ref() == Some(id)) else {
            return Ok(None);
        };

        if let Some(name) = update.name {
            account.name = name;
        }
        if let Some(email) = update.email {
            account.email = email;
        }
        if let Some(age) = update.age {
            account.age = Some(age);
        }
        account.updated_at = DateTime::now();

        Ok(Some(account.clone()))
    }

    async fn delete(&self, id: &ObjectId) -> StoreResult<bool> {
        let mut accounts = self.lock()?;
        let before = accounts.len();
        accounts.retain(|a| a.id.as_ref() != Some(id));
        Ok(accounts.len() < before)
    }
}
