//! Authify 계정 서비스 백엔드
//!
//! 이메일/비밀번호 가입과 Google, GitHub OAuth 로그인을 제공하는 계정 서비스입니다.
//! 어떤 경로로 로그인하든 같은 사람은 하나의 계정으로 연결되며,
//! 세션은 HttpOnly 쿠키에 담긴 JWT 로 유지됩니다.
//!
//! # Features
//!
//! - **로컬 계정**: 가입, 로그인, 프로필 조회/수정/삭제
//! - **OAuth 2.0**: Google, GitHub 로그인 (state nonce 검증)
//! - **Identity Reconciler**: 프로바이더 ID → 정확히 하나의 계정
//! - **세션**: HS256 JWT 쿠키
//! - **MongoDB**: 계정 영구 저장 (유니크 인덱스로 중복 방지)
//! - **Redis**: OAuth state nonce 저장
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────┐
//! │   HTTP Routes   │ ← REST API 엔드포인트
//! └─────────────────┘
//!          │
//!          ▼
//! ┌─────────────────┐
//! │    Handlers     │ ← 요청/응답 처리, 쿠키
//! └─────────────────┘
//!          │
//!          ▼
//! ┌─────────────────┐
//! │    Services     │ ← 자격 증명, 계정 조정, OAuth 흐름, 토큰
//! └─────────────────┘
//!          │
//!          ▼
//! ┌─────────────────┐
//! │  Repositories   │ ← AccountStore (MongoDB / 인메모리)
//! └─────────────────┘
//!          │
//!          ▼
//! ┌─────────────────┐
//! │ MongoDB + Redis │ ← 저장소
//! └─────────────────┘
//! ```
//!
//! # Examples
//!
//! ```rust,ignore
//! use authify_backend::core::ServiceRegistry;
//!
//! let registry = ServiceRegistry::build(config, store, states)?;
//! let account = registry.credentials.register("Jane", "jane@example.com", 30, "secret").await?;
//! let token = registry.tokens.issue(&account.id_string().unwrap())?;
//! ```

pub mod core;
pub mod config;
pub mod db;
pub mod caching;
pub mod domain;
pub mod repositories;
pub mod services;
pub mod utils;
pub mod routes;
pub mod handlers;
pub mod errors;
