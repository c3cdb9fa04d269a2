//! # 프로바이더 신원 → 계정 연결
//!
//! OAuth 핸드셰이크가 끝난 뒤 받은 [`ProviderIdentity`] 를 정확히 하나의
//! [`Account`] 로 매핑합니다.
//!
//! ## 결정 순서
//!
//! ```text
//! 1. (provider, provider_user_id) 로 조회 ── 있음 ──► Existing (변경 없음)
//!        │ 없음
//!        ▼
//! 2. 후보 이메일 있음? ── 예 ──► 이메일로 조회 ── 있음 ──► 연결 추가 ──► Linked
//!        │                              │ 없음
//!        │                              ▼
//!        │                         새 계정 (이메일 + 연결) ──► Created
//!        │ 아니오
//!        ▼
//! 3. 합성 이메일로 새 계정 ──► Created
//! ```
//!
//! 연결이 한 번 만들어지면 이후 로그인에서 프로바이더가 보낸 이름/이메일은
//! 계정에 반영하지 않습니다.
//!
//! ## 동시성
//!
//! 같은 신원으로 두 콜백이 동시에 들어오면 저장소의 유니크 제약이 한쪽을
//! 거절합니다. 거절된 쪽은 처음부터 다시 조회하여 이미 만들어진 계정으로
//! 수렴합니다. 재시도 횟수는 `ReconcilerConfig::max_attempts` 로 제한됩니다.

use std::sync::Arc;

use log::{info, warn};

use crate::config::ReconcilerConfig;
use crate::domain::entities::accounts::{Account, NewAccount};
use crate::domain::models::identity::ProviderIdentity;
use crate::errors::{AppError, AppResult};
use crate::repositories::accounts::{AccountStore, StoreError, StoreResult};

/// 연결 결과와 선택된 분기
#[derive(Debug, Clone)]
pub enum Resolution {
    /// 이미 연결된 계정
    Existing(Account),
    /// 이메일이 같은 기존 계정에 연결 추가
    Linked(Account),
    /// 새 계정 생성
    Created(Account),
}

impl Resolution {
    pub fn account(&self) -> &Account {
        match self {
            Resolution::Existing(account)
            | Resolution::Linked(account)
            | Resolution::Created(account) => account,
        }
    }

    pub fn into_account(self) -> Account {
        match self {
            Resolution::Existing(account)
            | Resolution::Linked(account)
            | Resolution::Created(account) => account,
        }
    }
}

pub struct IdentityReconciler {
    store: Arc<dyn AccountStore>,
    config: ReconcilerConfig,
}

impl IdentityReconciler {
    pub fn new(store: Arc<dyn AccountStore>, config: ReconcilerConfig) -> Self {
        Self { store, config }
    }

    /// 신원을 계정으로 해석합니다.
    pub async fn resolve(&self, identity: &ProviderIdentity) -> AppResult<Account> {
        self.reconcile(identity).await.map(Resolution::into_account)
    }

    /// 신원을 계정으로 해석하고 어떤 분기를 거쳤는지 함께 반환합니다.
    ///
    /// # Errors
    ///
    /// * `ConflictError` - 이메일이 같은 계정에 같은 프로바이더의 다른 ID가 이미
    ///   연결되어 있거나, 유니크 충돌 재시도를 모두 소진함
    /// * `StoreUnavailable` - 저장소 장애
    pub async fn reconcile(&self, identity: &ProviderIdentity) -> AppResult<Resolution> {
        let max_attempts = self.config.max_attempts.max(1);

        for attempt in 1..=max_attempts {
            match self.attempt(identity).await {
                Ok(resolution) => return Ok(resolution),
                Err(error @ (StoreError::DuplicateEmail | StoreError::DuplicateIdentity)) => {
                    warn!(
                        "⚠️ 계정 연결 충돌 ({}:{}), 재시도 {}/{}: {}",
                        identity.provider, identity.provider_user_id, attempt, max_attempts, error
                    );
                }
                Err(error) => return Err(error.into()),
            }
        }

        Err(AppError::ConflictError(
            "Could not resolve account for provider identity".to_string(),
        ))
    }

    async fn attempt(&self, identity: &ProviderIdentity) -> StoreResult<Resolution> {
        let link = identity.link();

        if let Some(account) = self.store.find_by_provider_link(&link).await? {
            info!("🔑 연결된 계정으로 로그인: {} ({})", link.key(), account.id_string().unwrap_or_default());
            return Ok(Resolution::Existing(account));
        }

        let name = identity.display_name_or_placeholder();

        let Some(email) = identity.candidate_email(self.config.require_verified_email) else {
            let account = self
                .store
                .insert(NewAccount::linked(name, identity.synthetic_email(), link))
                .await?;
            info!("🆕 이메일 없는 신원으로 계정 생성: {}", account.email);
            return Ok(Resolution::Created(account));
        };

        match self.store.find_by_email(&email).await? {
            Some(existing) => {
                let id = existing.id.ok_or(StoreError::NotFound)?;
                let account = self.store.attach_provider_link(&id, link.clone()).await?;
                info!("🔗 기존 계정에 {} 연결: {}", link.provider, account.email);
                Ok(Resolution::Linked(account))
            }
            None => {
                let account = self.store.insert(NewAccount::linked(name, email, link)).await?;
                info!("🆕 {} 로그인으로 계정 생성: {}", identity.provider, account.email);
                Ok(Resolution::Created(account))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::AuthProvider;
    use crate::domain::entities::accounts::{AccountUpdate, ProviderLink};
    use crate::repositories::accounts::InMemoryAccountStore;
    use async_trait::async_trait;
    use mongodb::bson::oid::ObjectId;
    use std::sync::atomic::{AtomicBool, Ordering};

    fn reconciler(store: Arc<dyn AccountStore>) -> IdentityReconciler {
        IdentityReconciler::new(store, ReconcilerConfig::default())
    }

    fn google(id: &str, email: Option<&str>, verified: bool) -> ProviderIdentity {
        ProviderIdentity::new(AuthProvider::Google, id)
            .with_email(email.map(str::to_string), verified)
            .with_display_name(Some("Alice".to_string()))
    }

    async fn local_account(store: &InMemoryAccountStore, email: &str) -> Account {
        store
            .insert(NewAccount::local("Alice".to_string(), email.to_string(), 30, "$2b$04$hash".to_string()))
            .await
            .unwrap()
    }

    #[actix_web::test]
    async fn test_resolve_is_idempotent() {
        let store = Arc::new(InMemoryAccountStore::new());
        let reconciler = reconciler(store.clone());
        let identity = google("g-1", Some("alice@x.com"), true);

        let first = reconciler.reconcile(&identity).await.unwrap();
        let second = reconciler.reconcile(&identity).await.unwrap();

        assert!(matches!(first, Resolution::Created(_)));
        assert!(matches!(second, Resolution::Existing(_)));
        assert_eq!(first.account().id, second.account().id);
        assert_eq!(store.list().await.unwrap().len(), 1);
    }

    #[actix_web::test]
    async fn test_verified_email_links_to_local_account() {
        let store = Arc::new(InMemoryAccountStore::new());
        let local = local_account(&store, "alice@x.com").await;

        let resolution = reconciler(store.clone())
            .reconcile(&google("g-1", Some("Alice@X.com"), true))
            .await
            .unwrap();

        let Resolution::Linked(account) = resolution else {
            panic!("expected Linked");
        };
        assert_eq!(account.id, local.id);
        assert!(account.has_password());
        assert!(account.has_link(&ProviderLink::new(AuthProvider::Google, "g-1")));
        assert_eq!(store.list().await.unwrap().len(), 1);
    }

    #[actix_web::test]
    async fn test_link_takes_priority_and_profile_is_not_overwritten() {
        let store = Arc::new(InMemoryAccountStore::new());
        let reconciler = reconciler(store.clone());
        let created = reconciler.resolve(&google("g-1", Some("alice@x.com"), true)).await.unwrap();
        let bob = local_account(&store, "bob@x.com").await;

        // 같은 신원이 다른 이메일/이름을 보고해도 기존 계정 그대로
        let renamed = ProviderIdentity::new(AuthProvider::Google, "g-1")
            .with_email(Some("bob@x.com".to_string()), true)
            .with_display_name(Some("Someone Else".to_string()));
        let resolution = reconciler.reconcile(&renamed).await.unwrap();

        assert!(matches!(resolution, Resolution::Existing(_)));
        let account = resolution.into_account();
        assert_eq!(account.id, created.id);
        assert_eq!(account.email, "alice@x.com");
        assert_eq!(account.name, "Alice");
        assert!(store.find_by_id(&bob.id.unwrap()).await.unwrap().unwrap().provider_links.is_empty());
    }

    #[actix_web::test]
    async fn test_missing_email_creates_distinct_synthetic_accounts() {
        let store = Arc::new(InMemoryAccountStore::new());
        let reconciler = reconciler(store.clone());

        let first = reconciler
            .resolve(&ProviderIdentity::new(AuthProvider::GitHub, "1"))
            .await
            .unwrap();
        let second = reconciler
            .resolve(&ProviderIdentity::new(AuthProvider::GitHub, "2"))
            .await
            .unwrap();

        assert!(first.email.ends_with("@oauth.invalid"));
        assert_ne!(first.email, second.email);
        assert!(!first.name.is_empty());
        assert_eq!(store.list().await.unwrap().len(), 2);
    }

    #[actix_web::test]
    async fn test_unverified_email_never_links() {
        let store = Arc::new(InMemoryAccountStore::new());
        let local = local_account(&store, "alice@x.com").await;

        let account = reconciler(store.clone())
            .resolve(&google("g-evil", Some("alice@x.com"), false))
            .await
            .unwrap();

        assert_ne!(account.id, local.id);
        assert!(account.email.ends_with("@oauth.invalid"));
        assert!(store.find_by_id(&local.id.unwrap()).await.unwrap().unwrap().provider_links.is_empty());
    }

    #[actix_web::test]
    async fn test_unverified_email_trusted_when_policy_disabled() {
        let store = Arc::new(InMemoryAccountStore::new());
        let local = local_account(&store, "alice@x.com").await;
        let config = ReconcilerConfig {
            require_verified_email: false,
            ..ReconcilerConfig::default()
        };

        let account = IdentityReconciler::new(store.clone(), config)
            .resolve(&google("g-1", Some("alice@x.com"), false))
            .await
            .unwrap();

        assert_eq!(account.id, local.id);
    }

    #[actix_web::test]
    async fn test_same_provider_different_id_is_conflict() {
        let store = Arc::new(InMemoryAccountStore::new());
        let reconciler = reconciler(store.clone());
        reconciler.resolve(&google("g-1", Some("alice@x.com"), true)).await.unwrap();

        let result = reconciler.resolve(&google("g-2", Some("alice@x.com"), true)).await;

        assert!(matches!(result, Err(AppError::ConflictError(_))));
        assert_eq!(store.list().await.unwrap().len(), 1);
    }

    /// 첫 `insert` 직전에 다른 요청이 계정을 먼저 만든 상황을 재현합니다.
    ///
    /// `rival` 이 없으면 같은 신원의 계정이, 있으면 그 계정이 먼저 저장됩니다.
    struct RacingStore {
        inner: InMemoryAccountStore,
        raced: AtomicBool,
        rival: Option<NewAccount>,
    }

    impl RacingStore {
        fn new(rival: Option<NewAccount>) -> Self {
            Self {
                inner: InMemoryAccountStore::new(),
                raced: AtomicBool::new(false),
                rival,
            }
        }
    }

    #[async_trait]
    impl AccountStore for RacingStore {
        async fn find_by_id(&self, id: &ObjectId) -> StoreResult<Option<Account>> {
            self.inner.find_by_id(id).await
        }
        async fn find_by_provider_link(&self, link: &ProviderLink) -> StoreResult<Option<Account>> {
            self.inner.find_by_provider_link(link).await
        }
        async fn find_by_email(&self, email: &str) -> StoreResult<Option<Account>> {
            self.inner.find_by_email(email).await
        }
        async fn list(&self) -> StoreResult<Vec<Account>> {
            self.inner.list().await
        }
        async fn insert(&self, new_account: NewAccount) -> StoreResult<Account> {
            if !self.raced.swap(true, Ordering::SeqCst) {
                let first = self.rival.clone().unwrap_or_else(|| new_account.clone());
                self.inner.insert(first).await?;
            }
            self.inner.insert(new_account).await
        }
        async fn attach_provider_link(&self, id: &ObjectId, link: ProviderLink) -> StoreResult<Account> {
            self.inner.attach_provider_link(id, link).await
        }
        async fn update_profile(&self, id: &ObjectId, update: AccountUpdate) -> StoreResult<Option<Account>> {
            self.inner.update_profile(id, update).await
        }
        async fn delete(&self, id: &ObjectId) -> StoreResult<bool> {
            self.inner.delete(id).await
        }
    }

    #[actix_web::test]
    async fn test_uniqueness_violation_reruns_lookup() {
        let store = Arc::new(RacingStore::new(None));

        let resolution = reconciler(store.clone())
            .reconcile(&google("g-1", Some("alice@x.com"), true))
            .await
            .unwrap();

        assert!(matches!(resolution, Resolution::Existing(_)));
        assert_eq!(store.list().await.unwrap().len(), 1);
    }

    #[actix_web::test]
    async fn test_local_signup_race_converges_to_link() {
        let local = NewAccount::local(
            "Alice".to_string(),
            "alice@x.com".to_string(),
            30,
            "$2b$04$hash".to_string(),
        );
        let store = Arc::new(RacingStore::new(Some(local)));

        let resolution = reconciler(store.clone())
            .reconcile(&google("g-1", Some("alice@x.com"), true))
            .await
            .unwrap();

        let Resolution::Linked(account) = resolution else {
            panic!("expected Linked");
        };
        assert!(account.has_password());
        assert!(account.has_link(&ProviderLink::new(AuthProvider::Google, "g-1")));

        let accounts = store.list().await.unwrap();
        assert_eq!(accounts.len(), 1);
        assert_eq!(accounts[0].id, account.id);
    }

    /// 항상 유니크 충돌을 보고하는 저장소
    struct AlwaysConflictingStore;

    #[async_trait]
    impl AccountStore for AlwaysConflictingStore {
        async fn find_by_id(&self, _: &ObjectId) -> StoreResult<Option<Account>> {
            Ok(None)
        }
        async fn find_by_provider_link(&self, _: &ProviderLink) -> StoreResult<Option<Account>> {
            Ok(None)
        }
        async fn find_by_email(&self, _: &str) -> StoreResult<Option<Account>> {
            Ok(None)
        }
        async fn list(&self) -> StoreResult<Vec<Account>> {
            Ok(Vec::new())
        }
        async fn insert(&self, _: NewAccount) -> StoreResult<Account> {
            Err(StoreError::DuplicateIdentity)
        }
        async fn attach_provider_link(&self, _: &ObjectId, _: ProviderLink) -> StoreResult<Account> {
            Err(StoreError::DuplicateIdentity)
        }
        async fn update_profile(&self, _: &ObjectId, _: AccountUpdate) -> StoreResult<Option<Account>> {
            Ok(None)
        }
        async fn delete(&self, _: &ObjectId) -> StoreResult<bool> {
            Ok(false)
        }
    }

    #[actix_web::test]
    async fn test_retry_is_bounded() {
        let result = reconciler(Arc::new(AlwaysConflictingStore))
            .resolve(&google("g-1", Some("alice@x.com"), true))
            .await;

        assert!(matches!(result, Err(AppError::ConflictError(_))));
    }

    /// 모든 호출이 실패하는 저장소
    struct UnavailableStore;

    #[async_trait]
    impl AccountStore for UnavailableStore {
        async fn find_by_id(&self, _: &ObjectId) -> StoreResult<Option<Account>> {
            Err(StoreError::Unavailable("down".to_string()))
        }
        async fn find_by_provider_link(&self, _: &ProviderLink) -> StoreResult<Option<Account>> {
            Err(StoreError::Unavailable("down".to_string()))
        }
        async fn find_by_email(&self, _: &str) -> StoreResult<Option<Account>> {
            Err(StoreError::Unavailable("down".to_string()))
        }
        async fn list(&self) -> StoreResult<Vec<Account>> {
            Err(StoreError::Unavailable("down".to_string()))
        }
        async fn insert(&self, _: NewAccount) -> StoreResult<Account> {
            Err(StoreError::Unavailable("down".to_string()))
        }
        async fn attach_provider_link(&self, _: &ObjectId, _: ProviderLink) -> StoreResult<Account> {
            Err(StoreError::Unavailable("down".to_string()))
        }
        async fn update_profile(&self, _: &ObjectId, _: AccountUpdate) -> StoreResult<Option<Account>> {
            Err(StoreError::Unavailable("down".to_string()))
        }
        async fn delete(&self, _: &ObjectId) -> StoreResult<bool> {
            Err(StoreError::Unavailable("down".to_string()))
        }
    }

    #[actix_web::test]
    async fn test_store_failure_surfaces_unavailable() {
        let result = reconciler(Arc::new(UnavailableStore))
            .resolve(&google("g-1", None, false))
            .await;

        assert!(matches!(result, Err(AppError::StoreUnavailable(_))));
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_concurrent_resolve_creates_single_account() {
        let store = Arc::new(InMemoryAccountStore::new());
        let reconciler = Arc::new(reconciler(store.clone()));
        let barrier = Arc::new(tokio::sync::Barrier::new(8));

        let handles: Vec<_> = (0..8)
            .map(|_| {
                let reconciler = reconciler.clone();
                let barrier = barrier.clone();
                tokio::spawn(async move {
                    barrier.wait().await;
                    reconciler
                        .resolve(&google("g-race", Some("race@x.com"), true))
                        .await
                })
            })
            .collect();

        let mut ids = Vec::new();
        for handle in handles {
            ids.push(handle.await.unwrap().unwrap().id);
        }

        ids.dedup();
        assert_eq!(ids.len(), 1);
        assert_eq!(store.list().await.unwrap().len(), 1);
    }
}
