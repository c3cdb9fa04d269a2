//! # Domain Layer Module
//!
//! 도메인 계층을 구성하는 핵심 모듈입니다.
//!
//! ## 아키텍처 개요
//!
//! ```text
//! Domain Layer (이 모듈)
//! ├── Entities  - MongoDB 에 저장되는 계정 (Account, ProviderLink)
//! ├── DTOs      - 데이터 전송 객체 (Request/Response)
//! └── Models    - 프로바이더 신원, OAuth 응답, 세션 클레임
//!      │
//!      ▼
//! Application Layer (Services)
//!      │
//!      ▼
//! Infrastructure Layer (Repositories, DB)
//! ```
//!
//! ## OAuth 로그인 플로우
//!
//! ```rust,ignore
//! // 1. 프로바이더 응답 → 공통 신원 모델
//! let identity: ProviderIdentity = google_user.into();
//!
//! // 2. 기존 계정 반환, 연결 추가, 또는 새 계정 생성
//! let account = reconciler.resolve(&identity).await?;
//!
//! // 3. 응답 DTO로 변환
//! let response = UserResponse::from(account);
//! ```

pub mod dto;
pub mod entities;
pub mod models;

pub use dto::*;
pub use entities::*;
pub use models::*;
