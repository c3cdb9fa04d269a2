//! API 라우트 설정 모듈
//!
//! 엔드포인트를 기능별로 묶어 등록합니다.
//!
//! # Route Groups
//!
//! - `GET /` - 동작 확인 텍스트
//! - `GET /health` - 헬스체크
//! - `/api/users` - 가입, 로그인, 로그아웃, 사용자 CRUD
//! - `/auth` - Google/GitHub OAuth, 세션 확인, 로그아웃
//!
//! # Examples
//!
//! ```rust,ignore
//! use actix_web::App;
//!
//! let app = App::new()
//!     .configure(|cfg| registry.register(cfg))
//!     .configure(configure_all_routes);
//! ```

use actix_web::{error, get, web, HttpRequest, HttpResponse};
use serde_json::json;

use crate::config::AppConfig;
use crate::errors::AppError;
use crate::handlers;

/// 모든 라우트를 설정합니다
pub fn configure_all_routes(cfg: &mut web::ServiceConfig) {
    cfg.app_data(json_config()).app_data(query_config());

    cfg.service(root).service(health_check);

    configure_user_routes(cfg);
    configure_auth_routes(cfg);
}

/// 사용자 관련 라우트를 설정합니다
///
/// `/login`, `/logout` 은 `/{user_id}` 보다 먼저 등록해야 합니다.
///
/// ```bash
/// curl -X POST http://localhost:5000/api/users \
///   -H "Content-Type: application/json" \
///   -d '{"name":"Jane","email":"jane@example.com","age":30,"password":"secret"}'
///
/// curl -X POST http://localhost:5000/api/users/login -c cookies.txt \
///   -H "Content-Type: application/json" \
///   -d '{"email":"jane@example.com","password":"secret"}'
/// ```
fn configure_user_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/users")
            .service(handlers::users::signup)
            .service(handlers::users::list_users)
            .service(handlers::users::login)
            .service(handlers::users::logout)
            .service(handlers::users::get_user)
            .service(handlers::users::update_user)
            .service(handlers::users::delete_user),
    );
}

/// OAuth 및 세션 라우트를 설정합니다
///
/// 브라우저가 직접 이동하는 경로이므로 모두 GET 입니다.
fn configure_auth_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/auth")
            // Google
            .service(handlers::auth::google_login)
            .service(handlers::auth::google_callback)
            // GitHub
            .service(handlers::auth::github_login)
            .service(handlers::auth::github_callback)
            // 세션
            .service(handlers::auth::login_failure)
            .service(handlers::auth::check_session)
            .service(handlers::auth::logout),
    );
}

/// JSON 본문 구문 오류, 필수 필드 누락을 400 으로 응답합니다.
fn json_config() -> web::JsonConfig {
    web::JsonConfig::default().error_handler(|err, _req: &HttpRequest| {
        log::debug!("JSON 본문 파싱 실패: {}", err);
        error::Error::from(AppError::ValidationError(err.to_string()))
    })
}

fn query_config() -> web::QueryConfig {
    web::QueryConfig::default().error_handler(|err, _req: &HttpRequest| {
        error::Error::from(AppError::ValidationError(err.to_string()))
    })
}

#[get("/")]
async fn root(config: web::Data<AppConfig>) -> HttpResponse {
    HttpResponse::Ok()
        .content_type("text/plain; charset=utf-8")
        .body(format!("✅ Server is running at port {}", config.server.port))
}

/// 서비스 상태를 확인하는 헬스체크 엔드포인트
///
/// ```json
/// {
///   "status": "healthy",
///   "service": "authify",
///   "version": "0.1.0",
///   "timestamp": "2024-01-01T00:00:00Z",
///   "features": { "oauth": ["google", "github"] }
/// }
/// ```
#[get("/health")]
async fn health_check(config: web::Data<AppConfig>) -> HttpResponse {
    let providers: Vec<&str> = [config.google.as_ref(), config.github.as_ref()]
        .into_iter()
        .flatten()
        .map(|client| client.provider.as_str())
        .collect();

    HttpResponse::Ok().json(json!({
        "status": "healthy",
        "service": "authify",
        "version": env!("CARGO_PKG_VERSION"),
        "timestamp": chrono::Utc::now().to_rfc3339(),
        "features": {
            "oauth": providers,
        }
    }))
}
