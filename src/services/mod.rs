//! 비즈니스 로직을 담당하는 서비스 계층 모듈
//!
//! 도메인별로 모듈화되어 계정 관리와 인증/세션 기능을 담당합니다.
//! 모든 서비스는 [`crate::core::registry::ServiceRegistry`] 가 설정으로부터 생성합니다.
//!
//! # Features
//!
//! - 로컬 가입/로그인과 계정 CRUD
//! - OAuth 신원을 계정 하나로 연결
//! - JWT 세션 토큰
//! - Google, GitHub OAuth 2.0 로그인

pub mod accounts;
pub mod auth;
