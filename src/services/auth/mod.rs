//! 인증 및 세션 서비스 모듈
//!
//! 세션 토큰 발급/검증과 OAuth 2.0 소셜 로그인(Google, GitHub)을 담당합니다.
//!
//! # Security
//!
//! - HMAC-SHA256 세션 토큰 서명
//! - CSRF 방지 (일회용 OAuth state, 프로바이더별 바인딩)
//! - 토큰 만료 시간 관리
//!
//! # Examples
//!
//! ```rust,ignore
//! use crate::services::auth::OAuthLoginService;
//!
//! let redirect = oauth.begin(AuthProvider::GitHub).await?;
//! let grant = oauth.complete(AuthProvider::GitHub, &code, &state).await?;
//! let account_id = tokens.verify(&grant.token)?;
//! ```

pub mod github_auth_service;
pub mod google_auth_service;
pub mod identity_provider;
pub mod oauth_login_service;
pub mod token_service;

pub use github_auth_service::GitHubAuthService;
pub use google_auth_service::GoogleAuthService;
pub use identity_provider::IdentityProviderClient;
pub use oauth_login_service::{OAuthLoginService, SessionGrant};
pub use token_service::SessionTokenService;
