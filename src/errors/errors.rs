//! 애플리케이션 전역에서 사용하는 에러 시스템
//!
//! 계정 서비스를 위한 통합 에러 처리 시스템입니다.
//! `thiserror`와 `actix_web::ResponseError`를 사용하여 타입 안전하고
//! 일관된 에러 처리를 제공합니다.
//!
//! ## HTTP 응답 매핑
//!
//! | AppError | HTTP Status |
//! |----------|-------------|
//! | `ValidationError` | 400 Bad Request |
//! | `NotFound` | 404 Not Found |
//! | `DuplicateEmail` / `DuplicateIdentity` / `ConflictError` | 409 Conflict |
//! | `InvalidCredentials` / `InvalidToken` / `AuthenticationError` | 401 Unauthorized |
//! | `StoreUnavailable` | 503 Service Unavailable |
//! | `RedisError` / `ExternalServiceError` / `InternalError` | 500 Internal Server Error |
//!
//! ## 사용 예제
//!
//! ```rust,ignore
//! use crate::errors::AppError;
//!
//! async fn register(&self, email: &str) -> Result<Account, AppError> {
//!     if email.is_empty() {
//!         return Err(AppError::ValidationError("Email is required".to_string()));
//!     }
//!
//!     let account = self.store.insert(new_account).await?; // StoreError -> AppError
//!     Ok(account)
//! }
//! ```

use actix_web::http::StatusCode;
use thiserror::Error;

/// 애플리케이션 전역 에러 타입
///
/// 계정 서비스에서 발생할 수 있는 모든 종류의 에러를 포괄하는 열거형입니다.
/// 자동으로 HTTP 응답으로 변환되어 클라이언트에게 전달됩니다.
#[derive(Error, Debug)]
pub enum AppError {
    /// 계정 저장소 장애 (503 Service Unavailable)
    ///
    /// 조회/생성/갱신 실패 시 발생하며 코어 로직은 재시도하지 않습니다.
    #[error("Account store unavailable: {0}")]
    StoreUnavailable(String),

    /// Redis 관련 에러 (500 Internal Server Error)
    #[error("Redis error: {0}")]
    RedisError(String),

    /// 입력값 검증 에러 (400 Bad Request)
    #[error("Validation error: {0}")]
    ValidationError(String),

    /// 리소스 찾을 수 없음 에러 (404 Not Found)
    #[error("Not found: {0}")]
    NotFound(String),

    /// 이미 사용 중인 이메일 (409 Conflict)
    #[error("User already exists")]
    DuplicateEmail,

    /// 이미 다른 계정에 연결된 프로바이더 ID (409 Conflict)
    #[error("Provider identity is already linked to another account")]
    DuplicateIdentity,

    /// 기타 충돌 에러 (409 Conflict)
    #[error("Conflict error: {0}")]
    ConflictError(String),

    /// 로컬 로그인 실패 (401 Unauthorized)
    ///
    /// 이메일이 없는 경우와 비밀번호가 틀린 경우를 구분하지 않습니다.
    #[error("Invalid email or password")]
    InvalidCredentials,

    /// 만료/위조/형식 오류 세션 토큰 (401 Unauthorized)
    #[error("Invalid token")]
    InvalidToken,

    /// 기타 인증 실패 에러 (401 Unauthorized)
    #[error("Authentication error: {0}")]
    AuthenticationError(String),

    /// 외부 서비스 에러 (500 Internal Server Error)
    #[error("External service error: {0}")]
    ExternalServiceError(String),

    /// 내부 서버 에러 (500 Internal Server Error)
    #[error("Internal server error: {0}")]
    InternalError(String),
}

impl actix_web::ResponseError for AppError {
    fn status_code(&self) -> StatusCode {
        match self {
            AppError::ValidationError(_) => StatusCode::BAD_REQUEST,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::DuplicateEmail
            | AppError::DuplicateIdentity
            | AppError::ConflictError(_) => StatusCode::CONFLICT,
            AppError::InvalidCredentials
            | AppError::InvalidToken
            | AppError::AuthenticationError(_) => StatusCode::UNAUTHORIZED,
            AppError::StoreUnavailable(_) => StatusCode::SERVICE_UNAVAILABLE,
            AppError::RedisError(_)
            | AppError::ExternalServiceError(_)
            | AppError::InternalError(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// HTTP 에러 응답을 생성합니다.
    ///
    /// 5xx 에러는 서버 로그에만 상세 정보를 남기고,
    /// 클라이언트에는 일반화된 메시지만 전달합니다.
    fn error_response(&self) -> actix_web::HttpResponse {
        let status = self.status_code();

        let message = if status.is_server_error() {
            log::error!("요청 처리 실패 ({}): {}", status.as_u16(), self);
            match self {
                AppError::StoreUnavailable(_) => "Service temporarily unavailable".to_string(),
                _ => "Internal server error".to_string(),
            }
        } else {
            self.to_string()
        };

        actix_web::HttpResponse::build(status).json(serde_json::json!({
            "error": message
        }))
    }
}

/// 편의성을 위한 Result 타입 별칭
pub type AppResult<T> = Result<T, AppError>;

/// 외부 라이브러리 에러(bcrypt, jsonwebtoken, reqwest)를 `InternalError` 로 변환합니다.
///
/// ```rust,ignore
/// let hash = bcrypt::hash(password, cost).context("비밀번호 해싱 실패")?;
/// ```
pub trait ErrorContext<T> {
    fn context(self, msg: &str) -> AppResult<T>;
}

impl<T, E> ErrorContext<T> for Result<T, E>
where
    E: std::fmt::Display,
{
    fn context(self, msg: &str) -> AppResult<T> {
        self.map_err(|e| AppError::InternalError(format!("{}: {}", msg, e)))
    }
}
