//! # Domain Entities Module
//!
//! MongoDB 문서와 직접 매핑되는 엔티티들을 정의합니다.
//!
//! ### MongoDB 통합
//! - **BSON 직렬화**: `serde`를 통한 자동 변환
//! - **ObjectId 지원**: MongoDB의 `_id` 필드와 매핑
//! - **유니크 인덱스**: `email`, `link_keys` (`"{provider}:{provider_user_id}"`)
//!
//! ## 모듈 구조
//!
//! ```text
//! entities/
//! └── accounts/
//!     └── account.rs  ← Account, ProviderLink, NewAccount, AccountUpdate
//! ```

pub mod accounts;

pub use accounts::*;
