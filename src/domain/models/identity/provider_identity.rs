//! 프로바이더 신원 주장 (Provider Identity Assertion)
//!
//! OAuth 핸드셰이크가 성공한 뒤 프로바이더가 알려준 사용자 정보를
//! 프로바이더와 무관한 하나의 형태로 표현합니다.

use sha2::{Digest, Sha256};
use validator::ValidateEmail;

use crate::config::AuthProvider;
use crate::domain::entities::accounts::ProviderLink;
use crate::utils::string_utils::{clean_optional_string, normalize_email};

/// 합성 이메일 전용 도메인 (RFC 2606 `.invalid`)
///
/// 실제 메일 주소로 쓰일 수 없으므로 사용자 입력 이메일과 충돌하지 않습니다.
pub const SYNTHETIC_EMAIL_DOMAIN: &str = "oauth.invalid";

/// 합성 이메일에 쓰이는 해시 접두 길이 (hex 문자 수)
const SYNTHETIC_DIGEST_LEN: usize = 40;

/// 프로바이더 신원 주장
#[derive(Debug, Clone, PartialEq)]
pub struct ProviderIdentity {
    pub provider: AuthProvider,
    pub provider_user_id: String,
    pub email: Option<String>,
    /// 프로바이더가 이메일 소유를 확인했는지 여부
    pub email_verified: bool,
    pub display_name: Option<String>,
}

impl ProviderIdentity {
    pub fn new(provider: AuthProvider, provider_user_id: impl Into<String>) -> Self {
        Self {
            provider,
            provider_user_id: provider_user_id.into(),
            email: None,
            email_verified: false,
            display_name: None,
        }
    }

    pub fn with_email(mut self, email: Option<String>, verified: bool) -> Self {
        self.email = clean_optional_string(email);
        self.email_verified = verified;
        self
    }

    pub fn with_display_name(mut self, display_name: Option<String>) -> Self {
        self.display_name = clean_optional_string(display_name);
        self
    }

    pub fn link(&self) -> ProviderLink {
        ProviderLink::new(self.provider, self.provider_user_id.clone())
    }

    /// 계정 조회/연결에 사용할 이메일
    ///
    /// 정규화한 뒤 형식이 올바른 경우에만 반환합니다.
    /// `require_verified` 가 true 면 검증되지 않은 이메일은 없는 것으로 취급합니다.
    /// 합성 이메일 도메인의 주소는 항상 무시합니다.
    pub fn candidate_email(&self, require_verified: bool) -> Option<String> {
        if require_verified && !self.email_verified {
            return None;
        }

        self.email
            .as_deref()
            .map(normalize_email)
            .filter(|email| email.validate_email())
            .filter(|email| !is_synthetic_email(email))
    }

    /// `(provider, provider_user_id)` 에서 결정적으로 유도한 합성 이메일
    ///
    /// 같은 입력은 항상 같은 주소가 되고, 서로 다른 프로바이더 ID는
    /// 서로 다른 주소가 됩니다.
    pub fn synthetic_email(&self) -> String {
        let digest = identity_digest(self.provider, &self.provider_user_id);
        format!(
            "{}-{}@{}",
            self.provider,
            &digest[..SYNTHETIC_DIGEST_LEN],
            SYNTHETIC_EMAIL_DOMAIN
        )
    }

    /// 표시 이름, 없으면 `{provider}-user-{hash8}` 형태의 자리표시자
    pub fn display_name_or_placeholder(&self) -> String {
        match &self.display_name {
            Some(name) => name.clone(),
            None => {
                let digest = identity_digest(self.provider, &self.provider_user_id);
                format!("{}-user-{}", self.provider, &digest[..8])
            }
        }
    }
}

/// 합성 이메일 도메인의 주소인지 확인
pub fn is_synthetic_email(email: &str) -> bool {
    normalize_email(email).ends_with(&format!("@{}", SYNTHETIC_EMAIL_DOMAIN))
}

fn identity_digest(provider: AuthProvider, provider_user_id: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(provider.as_str().as_bytes());
    hasher.update([0u8]);
    hasher.update(provider_user_id.as_bytes());

    hasher
        .finalize()
        .iter()
        .map(|byte| format!("{:02x}", byte))
        .collect()
}
