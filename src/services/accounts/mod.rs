//! 계정 서비스 모듈
//!
//! - [`IdentityReconciler`]: OAuth 신원을 계정 하나로 해석 (기존/연결/생성)
//! - [`CredentialService`]: 로컬 가입과 이메일/비밀번호 로그인
//! - [`AccountService`]: 관리용 조회/수정/삭제
//!
//! 모든 서비스는 `Arc<dyn AccountStore>` 와 명시적인 설정으로 생성됩니다.

pub mod account_service;
pub mod credential_service;
pub mod identity_reconciler;

pub use account_service::AccountService;
pub use credential_service::CredentialService;
pub use identity_reconciler::{IdentityReconciler, Resolution};
