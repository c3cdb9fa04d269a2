//! # GitHub OAuth 모델
//!
//! ```text
//! 1. /auth/github           → github.com/login/oauth/authorize (scope=user:email)
//! 2. /auth/github/callback  ← code, state
//! 3. github.com/login/oauth/access_token (Accept: application/json)
//! 4. api.github.com/user + /user/emails → ProviderIdentity
//! ```

pub mod github_user;

pub use github_user::{GitHubEmail, GitHubUser};
