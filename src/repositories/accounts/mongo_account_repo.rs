//! # MongoDB 계정 저장소
//!
//! `accounts` 컬렉션에 계정을 저장합니다.
//!
//! ## 인덱스
//!
//! | 이름 | 키 | 옵션 |
//! |------|----|------|
//! | `email_unique` | `email: 1` | unique |
//! | `link_keys_unique` | `link_keys: 1` | unique, partial (`$type: "string"`) |
//! | `created_at_desc` | `created_at: -1` | |
//!
//! `link_keys` 는 배열 필드라 multikey 인덱스가 되며, 연결이 없는 계정은
//! partial filter 로 인덱스에서 제외됩니다.

use async_trait::async_trait;
use futures_util::TryStreamExt;
use log::{debug, info};
use mongodb::{
    bson::{doc, oid::ObjectId, DateTime, Document},
    error::{Error as MongoError, ErrorKind, WriteFailure},
    options::{FindOneAndUpdateOptions, IndexOptions, ReturnDocument},
    Collection, IndexModel,
};

use super::{AccountStore, StoreError, StoreResult};
use crate::db::Database;
use crate::domain::entities::accounts::{Account, AccountUpdate, NewAccount, ProviderLink};

const COLLECTION_NAME: &str = "accounts";
const DUPLICATE_KEY_CODE: i32 = 11000;
const LINK_KEYS_INDEX: &str = "link_keys_unique";

pub struct MongoAccountStore {
    collection: Collection<Account>,
}

impl MongoAccountStore {
    pub fn new(database: &Database) -> Self {
        Self {
            collection: database.get_database().collection::<Account>(COLLECTION_NAME),
        }
    }

    /// 유니크 인덱스를 생성합니다. 서버 시작 시 한 번 호출합니다.
    ///
    /// 기존 데이터에 중복이 있으면 실패하며 서버는 기동하지 않습니다.
    pub async fn create_indexes(&self) -> StoreResult<()> {
        self.collection
            .create_indexes(index_models())
            .await
            .map_err(unavailable)?;

        info!("✅ accounts 컬렉션 인덱스 준비 완료");
        Ok(())
    }
}

fn index_models() -> Vec<IndexModel> {
    let email_index = IndexModel::builder()
        .keys(doc! { "email": 1 })
        .options(IndexOptions::builder()
            .unique(true)
            .name("email_unique".to_string())
            .build())
        .build();

    let link_keys_index = IndexModel::builder()
        .keys(doc! { "link_keys": 1 })
        .options(IndexOptions::builder()
            .unique(true)
            .name(LINK_KEYS_INDEX.to_string())
            .partial_filter_expression(doc! { "link_keys": { "$type": "string" } })
            .build())
        .build();

    let created_at_index = IndexModel::builder()
        .keys(doc! { "created_at": -1 })
        .options(IndexOptions::builder()
            .name("created_at_desc".to_string())
            .build())
        .build();

    vec![email_index, link_keys_index, created_at_index]
}

fn unavailable(error: MongoError) -> StoreError {
    StoreError::Unavailable(error.to_string())
}

/// 쓰기 에러를 분류합니다. 중복 키(11000)는 위반된 인덱스 이름으로 구분합니다.
fn classify_write_error(error: MongoError) -> StoreError {
    let duplicate_message = match error.kind.as_ref() {
        ErrorKind::Write(WriteFailure::WriteError(write_error))
            if write_error.code == DUPLICATE_KEY_CODE =>
        {
            Some(write_error.message.clone())
        }
        ErrorKind::Command(command_error) if command_error.code == DUPLICATE_KEY_CODE => {
            Some(command_error.message.clone())
        }
        _ => None,
    };

    match duplicate_message {
        Some(message) => classify_duplicate_key(&message),
        None => unavailable(error),
    }
}

fn classify_duplicate_key(message: &str) -> StoreError {
    if message.contains(LINK_KEYS_INDEX) {
        StoreError::DuplicateIdentity
    } else {
        StoreError::DuplicateEmail
    }
}

fn link_document(link: &ProviderLink) -> Document {
    doc! {
        "provider": link.provider.as_str(),
        "provider_user_id": &link.provider_user_id,
    }
}

fn update_document(update: &AccountUpdate) -> Document {
    let mut set = doc! { "updated_at": DateTime::now() };
    if let Some(name) = &update.name {
        set.insert("name", name);
    }
    if let Some(email) = &update.email {
        set.insert("email", email);
    }
    if let Some(age) = update.age {
        set.insert("age", i64::from(age));
    }
    set
}

#[async_trait]
impl AccountStore for MongoAccountStore {
    async fn find_by_id(&self, id: &ObjectId) -> StoreResult<Option<Account>> {
        self.collection
            .find_one(doc! { "_id": id })
            .await
            .map_err(unavailable)
    }

    async fn find_by_provider_link(&self, link: &ProviderLink) -> StoreResult<Option<Account>> {
        self.collection
            .find_one(doc! { "link_keys": link.key() })
            .await
            .map_err(unavailable)
    }

    async fn find_by_email(&self, email: &str) -> StoreResult<Option<Account>> {
        self.collection
            .find_one(doc! { "email": email })
            .await
            .map_err(unavailable)
    }

    async fn list(&self) -> StoreResult<Vec<Account>> {
        let cursor = self.collection
            .find(doc! {})
            .sort(doc! { "created_at": -1 })
            .await
            .map_err(unavailable)?;

        cursor.try_collect().await.map_err(unavailable)
    }

    async fn insert(&self, new_account: NewAccount) -> StoreResult<Account> {
        let mut account = Account::from_new(new_account);

        let result = self.collection
            .insert_one(&account)
            .await
            .map_err(classify_write_error)?;

        let id = result.inserted_id.as_object_id().ok_or_else(|| {
            StoreError::Unavailable("inserted_id is not an ObjectId".to_string())
        })?;
        account.id = Some(id);

        debug!("계정 저장: {} ({})", id.to_hex(), account.email);
        Ok(account)
    }

    async fn attach_provider_link(&self, id: &ObjectId, link: ProviderLink) -> StoreResult<Account> {
        let options = FindOneAndUpdateOptions::builder()
            .return_document(ReturnDocument::After)
            .build();

        // 같은 프로바이더 연결이 없는 경우에만 추가
        let updated = self.collection
            .find_one_and_update(
                doc! {
                    "_id": id,
                    "provider_links.provider": { "$ne": link.provider.as_str() },
                },
                doc! {
                    "$push": {
                        "provider_links": link_document(&link),
                        "link_keys": link.key(),
                    },
                    "$set": { "updated_at": DateTime::now() },
                },
            )
            .with_options(options)
            .await
            .map_err(classify_write_error)?;

        if let Some(account) = updated {
            return Ok(account);
        }

        let account = self.find_by_id(id).await?.ok_or(StoreError::NotFound)?;

        if account.has_link(&link) {
            Ok(account)
        } else if account.link_for(link.provider).is_some() {
            Err(StoreError::ProviderAlreadyLinked(link.provider))
        } else {
            // 조건 평가와 재조회 사이에 계정이 바뀜. 호출자가 재시도합니다.
            Err(StoreError::DuplicateIdentity)
        }
    }

    async fn update_profile(&self, id: &ObjectId, update: AccountUpdate) -> StoreResult<Option<Account>> {
        let options = FindOneAndUpdateOptions::builder()
            .return_document(ReturnDocument::After)
            .build();

        self.collection
            .find_one_and_update(
                doc! { "_id": id },
                doc! { "$set": update_document(&update) },
            )
            .with_options(options)
            .await
            .map_err(classify_write_error)
    }

    async fn delete(&self, id: &ObjectId) -> StoreResult<bool> {
        let result = self.collection
            .delete_one(doc! { "_id": id })
            .await
            .map_err(unavailable)?;

        Ok(result.deleted_count > 0)
    }
}
