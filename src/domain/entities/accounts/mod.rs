//! Accounts Entity Module
//!
//! 로컬 인증과 OAuth 인증을 모두 지원하는 [`Account`] 엔티티를 포함합니다.
//!
//! # 사용 예제
//!
//! ```rust,ignore
//! use crate::domain::entities::accounts::{NewAccount, ProviderLink};
//!
//! // 로컬 가입
//! let local = NewAccount::local(name, email, age, password_hash);
//!
//! // 첫 OAuth 로그인
//! let oauth = NewAccount::linked(name, email, ProviderLink::new(AuthProvider::Google, "1234"));
//! ```

pub mod account;

pub use account::{Account, AccountUpdate, NewAccount, ProviderLink};
