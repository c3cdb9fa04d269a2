//! 데이터 액세스 계층을 담당하는 리포지토리 모듈
//!
//! 계정 저장소는 [`accounts::AccountStore`] trait 뒤에 숨겨져 있으며
//! 서버 시작 시 설정(`ACCOUNT_STORE`)에 따라 구현이 선택됩니다.
//!
//! # Examples
//!
//! ```rust,ignore
//! use crate::repositories::accounts::{AccountStore, MongoAccountStore};
//!
//! let store = MongoAccountStore::new(&database);
//! store.create_indexes().await?;
//! let account = store.find_by_email("user@example.com").await?;
//! ```

pub mod accounts;
