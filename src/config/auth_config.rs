//! # Authentication Configuration Module
//!
//! OAuth 프로바이더, 세션 토큰(JWT), 세션 쿠키, 계정 연결 정책 등
//! 인증 관련 설정을 관리하는 모듈입니다.
//!
//! ## 필수 환경 변수 설정
//!
//! ### Google / GitHub OAuth 설정
//! ```bash
//! export GOOGLE_CLIENT_ID="your-google-client-id"
//! export GOOGLE_CLIENT_SECRET="your-google-client-secret"
//! export GOOGLE_REDIRECT_URI="http://localhost:5000/auth/google/callback"
//!
//! export GITHUB_CLIENT_ID="your-github-client-id"
//! export GITHUB_CLIENT_SECRET="your-github-client-secret"
//! export GITHUB_REDIRECT_URI="http://localhost:5000/auth/github/callback"
//! ```
//!
//! client id/secret 이 없는 프로바이더는 비활성화되며,
//! 로그인 시도는 실패 페이지로 리디렉션됩니다.
//!
//! ### 세션 토큰 설정
//! ```bash
//! export JWT_SECRET="your-super-secret-jwt-key"
//! export JWT_EXPIRATION_DAYS="7"
//! ```

use std::fmt;
use std::str::FromStr;

use actix_web::cookie::{time::Duration as CookieDuration, Cookie, SameSite};
use serde::{Deserialize, Serialize};

use super::{lookup_bool, lookup_or, lookup_parse, Environment, Lookup};

/// 개발용 기본 JWT 비밀키 (프로덕션에서는 거부됨)
pub const DEFAULT_JWT_SECRET: &str = "your-secret-key";

/// 지원하는 OAuth 인증 프로바이더
///
/// 저장소와 API 응답에는 소문자 문자열(`"google"`, `"github"`)로 직렬화됩니다.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AuthProvider {
    /// Google OAuth 2.0 (OpenID Connect)
    Google,
    /// GitHub OAuth App
    #[serde(rename = "github")]
    GitHub,
}

impl AuthProvider {
    pub const ALL: [AuthProvider; 2] = [AuthProvider::Google, AuthProvider::GitHub];

    pub fn as_str(&self) -> &'static str {
        match self {
            AuthProvider::Google => "google",
            AuthProvider::GitHub => "github",
        }
    }
}

impl fmt::Display for AuthProvider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AuthProvider {
    type Err = String;

    /// 대소문자를 구분하지 않고 프로바이더 이름을 파싱합니다.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "google" => Ok(AuthProvider::Google),
            "github" => Ok(AuthProvider::GitHub),
            _ => Err(format!("Unsupported auth provider: {}", s)),
        }
    }
}

/// 프로바이더별 OAuth 2.0 클라이언트 설정
///
/// 인증 코드 플로우에 필요한 클라이언트 자격 증명과 엔드포인트를 담습니다.
/// 엔드포인트는 기본값이 있어 일반적으로 자격 증명만 설정하면 됩니다.
///
/// ## 보안 고려사항
///
/// - `client_secret`은 로그에 출력하지 않습니다
/// - 프로덕션에서는 HTTPS redirect URI만 사용하세요
#[derive(Clone)]
pub struct OAuthClientConfig {
    pub provider: AuthProvider,
    pub client_id: String,
    pub client_secret: String,
    pub redirect_uri: String,
    pub auth_uri: String,
    pub token_uri: String,
    pub userinfo_uri: String,
    /// GitHub 전용: 사용자 이메일 목록 엔드포인트
    pub emails_uri: Option<String>,
}

impl fmt::Debug for OAuthClientConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OAuthClientConfig")
            .field("provider", &self.provider)
            .field("client_id", &self.client_id)
            .field("client_secret", &"***")
            .field("redirect_uri", &self.redirect_uri)
            .finish()
    }
}

impl OAuthClientConfig {
    /// `{PREFIX}_CLIENT_ID`, `{PREFIX}_CLIENT_SECRET` 이 모두 있을 때만 설정을 생성합니다.
    pub fn from_lookup(lookup: &Lookup, provider: AuthProvider) -> Option<Self> {
        let prefix = match provider {
            AuthProvider::Google => "GOOGLE",
            AuthProvider::GitHub => "GITHUB",
        };
        let key = |suffix: &str| format!("{}_{}", prefix, suffix);

        let client_id = lookup(&key("CLIENT_ID")).filter(|v| !v.trim().is_empty());
        let client_secret = lookup(&key("CLIENT_SECRET")).filter(|v| !v.trim().is_empty());

        let (client_id, client_secret) = match (client_id, client_secret) {
            (Some(id), Some(secret)) => (id, secret),
            _ => {
                log::warn!("⚠️ {} OAuth 자격 증명이 없어 비활성화됩니다", provider);
                return None;
            }
        };

        let default_redirect = format!("http://localhost:5000/auth/{}/callback", provider);

        let config = match provider {
            AuthProvider::Google => Self {
                provider,
                client_id,
                client_secret,
                redirect_uri: lookup_or(lookup, &key("REDIRECT_URI"), &default_redirect),
                auth_uri: lookup_or(
                    lookup,
                    &key("AUTH_URI"),
                    "https://accounts.google.com/o/oauth2/v2/auth",
                ),
                token_uri: lookup_or(lookup, &key("TOKEN_URI"), "https://oauth2.googleapis.com/token"),
                userinfo_uri: lookup_or(
                    lookup,
                    &key("USERINFO_URI"),
                    "https://www.googleapis.com/oauth2/v2/userinfo",
                ),
                emails_uri: None,
            },
            AuthProvider::GitHub => Self {
                provider,
                client_id,
                client_secret,
                redirect_uri: lookup_or(lookup, &key("REDIRECT_URI"), &default_redirect),
                auth_uri: lookup_or(
                    lookup,
                    &key("AUTH_URI"),
                    "https://github.com/login/oauth/authorize",
                ),
                token_uri: lookup_or(
                    lookup,
                    &key("TOKEN_URI"),
                    "https://github.com/login/oauth/access_token",
                ),
                userinfo_uri: lookup_or(lookup, &key("USERINFO_URI"), "https://api.github.com/user"),
                emails_uri: Some(lookup_or(
                    lookup,
                    &key("EMAILS_URI"),
                    "https://api.github.com/user/emails",
                )),
            },
        };

        Some(config)
    }
}

/// 세션 토큰(HS256 JWT) 설정
#[derive(Clone)]
pub struct JwtConfig {
    pub secret: String,
    pub expiration_days: i64,
}

impl fmt::Debug for JwtConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("JwtConfig")
            .field("secret", &"***")
            .field("expiration_days", &self.expiration_days)
            .finish()
    }
}

impl JwtConfig {
    /// # Errors
    ///
    /// 프로덕션 환경에서 `JWT_SECRET`이 없거나 기본값이면 에러를 반환합니다.
    pub fn from_lookup(lookup: &Lookup, environment: &Environment) -> Result<Self, String> {
        let secret = match lookup("JWT_SECRET").filter(|s| !s.is_empty()) {
            Some(secret) => secret,
            None => {
                log::warn!("JWT_SECRET not set, using default (not secure for production!)");
                DEFAULT_JWT_SECRET.to_string()
            }
        };

        if environment.is_production() && secret == DEFAULT_JWT_SECRET {
            return Err("JWT_SECRET must be set in production".to_string());
        }

        let expiration_days = lookup_parse(lookup, "JWT_EXPIRATION_DAYS", 7_i64).max(1);

        Ok(Self { secret, expiration_days })
    }

    pub fn expiration_seconds(&self) -> i64 {
        self.expiration_days * 24 * 60 * 60
    }
}

/// OAuth 플로우 공통 설정
#[derive(Debug, Clone)]
pub struct OAuthConfig {
    /// state nonce 유효 시간 (초)
    pub state_ttl_seconds: u64,
    /// 로그인 성공 후 돌아갈 프론트엔드 주소
    pub frontend_url: String,
    /// 로그인 실패 시 리디렉션 경로
    pub failure_redirect: String,
}

impl OAuthConfig {
    pub fn from_lookup(lookup: &Lookup) -> Self {
        Self {
            state_ttl_seconds: lookup_parse(lookup, "OAUTH_STATE_TTL_SECONDS", 600_u64).max(1),
            frontend_url: lookup_or(lookup, "FRONTEND_URL", "http://localhost:5173")
                .trim_end_matches('/')
                .to_string(),
            failure_redirect: lookup_or(lookup, "OAUTH_FAILURE_REDIRECT", "/auth/failure"),
        }
    }

    pub fn success_redirect(&self) -> String {
        format!("{}/dashboard", self.frontend_url)
    }
}

/// 세션 쿠키 정책
///
/// 로컬 로그인과 모든 OAuth 콜백이 같은 정책으로 쿠키를 발급합니다.
#[derive(Debug, Clone)]
pub struct SessionCookieConfig {
    pub name: String,
    pub secure: bool,
    pub same_site: SameSite,
    pub max_age_seconds: i64,
}

impl SessionCookieConfig {
    pub fn from_lookup(lookup: &Lookup, environment: &Environment, jwt: &JwtConfig) -> Self {
        let same_site = match lookup_or(lookup, "COOKIE_SAME_SITE", "lax").to_lowercase().as_str() {
            "strict" => SameSite::Strict,
            "none" => SameSite::None,
            _ => SameSite::Lax,
        };

        let mut secure = lookup_bool(lookup, "COOKIE_SECURE", environment.is_production());
        if same_site == SameSite::None && !secure {
            log::warn!("⚠️ SameSite=None 쿠키는 Secure 속성이 필요하여 Secure를 강제합니다");
            secure = true;
        }

        Self {
            name: lookup_or(lookup, "SESSION_COOKIE_NAME", "token"),
            secure,
            same_site,
            max_age_seconds: jwt.expiration_seconds(),
        }
    }

    /// 세션 토큰을 담은 쿠키를 생성합니다.
    pub fn session_cookie(&self, token: &str) -> Cookie<'static> {
        Cookie::build(self.name.clone(), token.to_string())
            .path("/")
            .http_only(true)
            .secure(self.secure)
            .same_site(self.same_site)
            .max_age(CookieDuration::seconds(self.max_age_seconds))
            .finish()
    }

    /// 세션 쿠키를 만료시키는 쿠키를 생성합니다.
    pub fn removal_cookie(&self) -> Cookie<'static> {
        let mut cookie = Cookie::build(self.name.clone(), "")
            .path("/")
            .http_only(true)
            .secure(self.secure)
            .same_site(self.same_site)
            .finish();
        cookie.make_removal();
        cookie
    }
}

/// 계정 연결(Identity Reconciliation) 정책
#[derive(Debug, Clone)]
pub struct ReconcilerConfig {
    /// true 면 검증되지 않은 프로바이더 이메일을 없는 것으로 취급합니다.
    pub require_verified_email: bool,
    /// 유니크 제약 충돌 시 재시도 횟수 상한
    pub max_attempts: u32,
}

impl ReconcilerConfig {
    pub fn from_lookup(lookup: &Lookup) -> Self {
        Self {
            require_verified_email: lookup_bool(lookup, "OAUTH_REQUIRE_VERIFIED_EMAIL", true),
            max_attempts: lookup_parse(lookup, "RECONCILE_MAX_ATTEMPTS", 3_u32).max(1),
        }
    }
}

impl Default for ReconcilerConfig {
    fn default() -> Self {
        Self {
            require_verified_email: true,
            max_attempts: 3,
        }
    }
}
