//! 로컬(이메일/비밀번호) 가입과 로그인

use std::sync::Arc;

use bcrypt::{hash, verify};
use validator::ValidateEmail;

use crate::config::PasswordConfig;
use crate::domain::entities::accounts::{Account, NewAccount};
use crate::domain::models::identity::is_synthetic_email;
use crate::errors::{AppError, AppResult, ErrorContext};
use crate::repositories::accounts::{AccountStore, StoreError};
use crate::utils::string_utils::{normalize_email, validate_required_string};

/// 사용자가 입력한 이메일을 정규화하고 검증합니다.
///
/// 합성 이메일 도메인은 OAuth 계정 전용이므로 거절합니다.
pub(crate) fn normalize_account_email(raw: &str) -> AppResult<String> {
    let email = normalize_email(raw);

    if email.is_empty() {
        return Err(AppError::ValidationError("email is required".to_string()));
    }
    if !email.validate_email() {
        return Err(AppError::ValidationError("Invalid email format".to_string()));
    }
    if is_synthetic_email(&email) {
        return Err(AppError::ValidationError(
            "Email domain is reserved".to_string(),
        ));
    }

    Ok(email)
}

pub struct CredentialService {
    store: Arc<dyn AccountStore>,
    password: PasswordConfig,
}

impl CredentialService {
    pub fn new(store: Arc<dyn AccountStore>, password: PasswordConfig) -> Self {
        Self { store, password }
    }

    /// 로컬 계정 생성
    ///
    /// 비밀번호는 환경별 cost 의 bcrypt 해시로만 저장됩니다.
    ///
    /// # Errors
    ///
    /// * `ValidationError` - 이름/비밀번호 누락, 잘못된 이메일
    /// * `DuplicateEmail` - 이미 사용 중인 이메일
    pub async fn register(&self, name: &str, email: &str, age: u32, password: &str) -> AppResult<Account> {
        let name = validate_required_string(name, "name")?;
        let email = normalize_account_email(email)?;
        if password.is_empty() {
            return Err(AppError::ValidationError("password is required".to_string()));
        }

        if self.store.find_by_email(&email).await?.is_some() {
            return Err(AppError::DuplicateEmail);
        }

        let hash_start = std::time::Instant::now();
        let password_hash = hash(password, self.password.bcrypt_cost)
            .context("비밀번호 해싱 실패")?;
        log::debug!("Password hashing took: {:?}", hash_start.elapsed());

        let account = self
            .store
            .insert(NewAccount::local(name, email, age, password_hash))
            .await
            .map_err(|e| match e {
                // 동시 가입으로 인한 유니크 충돌
                StoreError::DuplicateEmail | StoreError::DuplicateIdentity => AppError::DuplicateEmail,
                other => other.into(),
            })?;

        log::info!("✅ 로컬 계정 생성: {}", account.email);
        Ok(account)
    }

    /// 이메일/비밀번호 로그인
    ///
    /// 이메일이 없거나, 비밀번호가 없는 OAuth 전용 계정이거나, 해시가 다르면
    /// 모두 같은 [`AppError::InvalidCredentials`] 를 반환합니다.
    pub async fn authenticate(&self, email: &str, password: &str) -> AppResult<Account> {
        let email = normalize_email(email);

        let account = self
            .store
            .find_by_email(&email)
            .await?
            .ok_or(AppError::InvalidCredentials)?;

        let Some(password_hash) = account.password_hash.as_deref() else {
            return Err(AppError::InvalidCredentials);
        };

        // 손상된 해시도 자격 증명 실패로 취급
        let matches = verify(password, password_hash).unwrap_or(false);
        if !matches {
            return Err(AppError::InvalidCredentials);
        }

        log::info!("🔓 로컬 로그인: {}", account.email);
        Ok(account)
    }
}
