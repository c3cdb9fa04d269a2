//! # OAuth / 세션 핸들러
//!
//! | 메서드 | 경로 | 동작 |
//! |--------|------|------|
//! | GET | `/auth/google`, `/auth/github` | 302 → 프로바이더 동의 화면 |
//! | GET | `/auth/{provider}/callback` | 쿠키 설정 후 302 → `{FRONTEND_URL}/dashboard` |
//! | GET | `/auth/failure` | 401 텍스트 |
//! | GET | `/auth/check` | 세션 쿠키 검증 |
//! | GET | `/auth/logout` | 세션 쿠키 삭제 |
//!
//! OAuth 흐름에서 발생하는 모든 실패는 에러 응답 대신 실패 페이지로 리디렉션됩니다.

use actix_web::{get, http::header, web, HttpRequest, HttpResponse};

use crate::config::{AppConfig, AuthProvider};
use crate::domain::dto::auth::{OAuthCallbackQuery, SessionCheckResponse};
use crate::domain::dto::users::UserResponse;
use crate::errors::{AppError, AppResult};
use crate::services::accounts::AccountService;
use crate::services::auth::{OAuthLoginService, SessionTokenService};

fn redirect(location: &str) -> HttpResponse {
    HttpResponse::Found()
        .append_header((header::LOCATION, location))
        .finish()
}

fn failure_redirect(config: &AppConfig) -> HttpResponse {
    redirect(&config.oauth.failure_redirect)
}

async fn begin_login(
    provider: AuthProvider,
    oauth: &OAuthLoginService,
    config: &AppConfig,
) -> HttpResponse {
    match oauth.begin(provider).await {
        Ok(url) => redirect(&url),
        Err(e) => {
            log::warn!("⚠️ {} 로그인 시작 실패: {}", provider, e);
            failure_redirect(config)
        }
    }
}

async fn finish_login(
    provider: AuthProvider,
    query: OAuthCallbackQuery,
    oauth: &OAuthLoginService,
    config: &AppConfig,
) -> HttpResponse {
    if let Some(error) = &query.error {
        log::warn!(
            "{} OAuth 에러: {} - {}",
            provider,
            error,
            query.error_description.as_deref().unwrap_or("")
        );
        return failure_redirect(config);
    }

    let (Some(code), Some(state)) = (query.code.as_deref(), query.state.as_deref()) else {
        log::warn!("{} 콜백에 code 또는 state 가 없습니다", provider);
        return failure_redirect(config);
    };

    match oauth.complete(provider, code, state).await {
        Ok(grant) => HttpResponse::Found()
            .append_header((header::LOCATION, config.oauth.success_redirect()))
            .cookie(config.session_cookie.session_cookie(&grant.token))
            .finish(),
        Err(e) => {
            log::warn!("⚠️ {} 로그인 실패: {}", provider, e);
            failure_redirect(config)
        }
    }
}

#[get("/google")]
pub async fn google_login(
    oauth: web::Data<OAuthLoginService>,
    config: web::Data<AppConfig>,
) -> HttpResponse {
    begin_login(AuthProvider::Google, &oauth, &config).await
}

#[get("/google/callback")]
pub async fn google_callback(
    query: web::Query<OAuthCallbackQuery>,
    oauth: web::Data<OAuthLoginService>,
    config: web::Data<AppConfig>,
) -> HttpResponse {
    finish_login(AuthProvider::Google, query.into_inner(), &oauth, &config).await
}

#[get("/github")]
pub async fn github_login(
    oauth: web::Data<OAuthLoginService>,
    config: web::Data<AppConfig>,
) -> HttpResponse {
    begin_login(AuthProvider::GitHub, &oauth, &config).await
}

#[get("/github/callback")]
pub async fn github_callback(
    query: web::Query<OAuthCallbackQuery>,
    oauth: web::Data<OAuthLoginService>,
    config: web::Data<AppConfig>,
) -> HttpResponse {
    finish_login(AuthProvider::GitHub, query.into_inner(), &oauth, &config).await
}

#[get("/failure")]
pub async fn login_failure() -> HttpResponse {
    HttpResponse::Unauthorized()
        .content_type("text/plain; charset=utf-8")
        .body("Login Failed. Please try again.")
}

/// 세션 쿠키의 토큰을 검증하고 사용자 정보를 반환합니다.
#[get("/check")]
pub async fn check_session(
    req: HttpRequest,
    tokens: web::Data<SessionTokenService>,
    accounts: web::Data<AccountService>,
    config: web::Data<AppConfig>,
) -> AppResult<HttpResponse> {
    let Some(cookie) = req.cookie(&config.session_cookie.name) else {
        return Ok(HttpResponse::Unauthorized().json(SessionCheckResponse::invalid("No token provided")));
    };

    let Ok(account_id) = tokens.verify(cookie.value()) else {
        return Ok(HttpResponse::Unauthorized().json(SessionCheckResponse::invalid("Invalid token")));
    };

    match accounts.get(&account_id).await {
        Ok(account) => Ok(HttpResponse::Ok().json(SessionCheckResponse::valid(UserResponse::from(account)))),
        // 토큰 발급 후 삭제된 계정
        Err(AppError::NotFound(_)) | Err(AppError::ValidationError(_)) => {
            Ok(HttpResponse::Unauthorized().json(SessionCheckResponse::invalid("Invalid token")))
        }
        Err(e) => Err(e),
    }
}

#[get("/logout")]
pub async fn logout(config: web::Data<AppConfig>) -> HttpResponse {
    HttpResponse::Ok()
        .cookie(config.session_cookie.removal_cookie())
        .content_type("text/plain; charset=utf-8")
        .body("Logged out successfully!")
}
