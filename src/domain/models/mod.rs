//! # Domain Models Module
//!
//! 영속화되지 않는 도메인 모델과 값 객체를 정의합니다.
//!
//! ## Entities vs Models 구분
//!
//! - **Entities** (`../entities/`): MongoDB 문서로 저장되는 객체 (`Account`)
//! - **Models** (`./`): 외부 시스템 응답과 값 객체
//!   (`ProviderIdentity`, `GoogleUserInfo`, `SessionClaims` 등)
//!
//! ## 모듈 구조
//!
//! ```text
//! models/
//! ├── identity/  ← ProviderIdentity, 합성 이메일
//! ├── oauth/     ← Google/GitHub 응답 모델
//! └── token/     ← SessionClaims
//! ```

pub mod identity;
pub mod oauth;
pub mod token;

pub use identity::*;
pub use oauth::*;
pub use token::*;
