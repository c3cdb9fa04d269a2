//! # OAuth 통합 모델
//!
//! 외부 OAuth 프로바이더 응답 모델입니다. 각 프로바이더 모델은
//! [`ProviderIdentity`](crate::domain::models::identity::ProviderIdentity) 로 변환됩니다.
//!
//! ```text
//! oauth/
//! ├── google_oauth_model/  ← GoogleUserInfo
//! ├── github_oauth_model/  ← GitHubUser, GitHubEmail
//! └── token_response.rs    ← OAuthTokenResponse (공통)
//! ```

pub mod github_oauth_model;
pub mod google_oauth_model;
pub mod token_response;

pub use github_oauth_model::{GitHubEmail, GitHubUser};
pub use google_oauth_model::GoogleUserInfo;
pub use token_response::OAuthTokenResponse;
