//! # Google OAuth 2.0 모델
//!
//! Google 인증 코드 플로우에서 주고받는 데이터 모델입니다.
//!
//! ## 인증 플로우
//!
//! ```text
//! 1. /auth/google           → accounts.google.com 동의 화면 (state 포함)
//! 2. /auth/google/callback  ← code, state
//! 3. oauth2.googleapis.com/token       (code → access_token)
//! 4. www.googleapis.com/oauth2/v2/userinfo → GoogleUserInfo → ProviderIdentity
//! ```

pub mod google_user;

pub use google_user::GoogleUserInfo;
