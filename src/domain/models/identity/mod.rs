//! 프로바이더 신원 모델
//!
//! Google/GitHub 응답을 [`ProviderIdentity`] 하나로 정규화하여
//! 계정 연결 로직이 프로바이더별 형식을 알 필요가 없도록 합니다.

pub mod provider_identity;

pub use provider_identity::{is_synthetic_email, ProviderIdentity, SYNTHETIC_EMAIL_DOMAIN};
