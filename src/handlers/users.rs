//! # 사용자 API 핸들러
//!
//! `/api/users` 아래의 가입, 로그인, 로그아웃, CRUD 엔드포인트입니다.
//!
//! | 메서드 | 경로 | 성공 |
//! |--------|------|------|
//! | POST | `/api/users` | 201 + 사용자 |
//! | POST | `/api/users/login` | 200 + 토큰, 세션 쿠키 |
//! | POST | `/api/users/logout` | 200, 세션 쿠키 삭제 |
//! | GET | `/api/users` | 200 + 사용자 목록 |
//! | GET | `/api/users/{id}` | 200 + 사용자 |
//! | PUT | `/api/users/{id}` | 200 + 수정된 사용자 |
//! | DELETE | `/api/users/{id}` | 200 |

use actix_web::{delete, get, post, put, web, HttpResponse};
use serde_json::json;
use validator::Validate;

use crate::config::AppConfig;
use crate::domain::dto::users::{LoginRequest, LoginResponse, SignupRequest, UpdateUserRequest, UserResponse};
use crate::errors::{AppError, AppResult};
use crate::services::accounts::{AccountService, CredentialService};
use crate::services::auth::SessionTokenService;

#[post("")]
pub async fn signup(
    payload: web::Json<SignupRequest>,
    credentials: web::Data<CredentialService>,
) -> AppResult<HttpResponse> {
    // 유효성 검사
    payload.validate()
        .map_err(|e| AppError::ValidationError(e.to_string()))?;

    let request = payload.into_inner();
    let account = credentials
        .register(&request.name, &request.email, request.age, &request.password)
        .await?;

    Ok(HttpResponse::Created().json(UserResponse::from(account)))
}

#[post("/login")]
pub async fn login(
    payload: web::Json<LoginRequest>,
    credentials: web::Data<CredentialService>,
    tokens: web::Data<SessionTokenService>,
    config: web::Data<AppConfig>,
) -> AppResult<HttpResponse> {
    payload.validate()
        .map_err(|e| AppError::ValidationError(e.to_string()))?;

    let account = credentials
        .authenticate(&payload.email, &payload.password)
        .await?;

    let account_id = account
        .id_string()
        .ok_or_else(|| AppError::InternalError("사용자 ID가 없습니다".to_string()))?;
    let token = tokens.issue(&account_id)?;

    Ok(HttpResponse::Ok()
        .cookie(config.session_cookie.session_cookie(&token))
        .json(LoginResponse::new(account, token)))
}

#[post("/logout")]
pub async fn logout(config: web::Data<AppConfig>) -> HttpResponse {
    HttpResponse::Ok()
        .cookie(config.session_cookie.removal_cookie())
        .json(json!({ "message": "Logged out successfully" }))
}

#[get("")]
pub async fn list_users(accounts: web::Data<AccountService>) -> AppResult<HttpResponse> {
    let users: Vec<UserResponse> = accounts
        .list()
        .await?
        .into_iter()
        .map(UserResponse::from)
        .collect();

    Ok(HttpResponse::Ok().json(users))
}

#[get("/{user_id}")]
pub async fn get_user(
    user_id: web::Path<String>,
    accounts: web::Data<AccountService>,
) -> AppResult<HttpResponse> {
    let account = accounts.get(&user_id).await?;

    Ok(HttpResponse::Ok().json(UserResponse::from(account)))
}

#[put("/{user_id}")]
pub async fn update_user(
    user_id: web::Path<String>,
    payload: web::Json<UpdateUserRequest>,
    accounts: web::Data<AccountService>,
) -> AppResult<HttpResponse> {
    payload.validate()
        .map_err(|e| AppError::ValidationError(e.to_string()))?;

    let account = accounts.update(&user_id, payload.into_inner().into()).await?;

    Ok(HttpResponse::Ok().json(UserResponse::from(account)))
}

#[delete("/{user_id}")]
pub async fn delete_user(
    user_id: web::Path<String>,
    accounts: web::Data<AccountService>,
) -> AppResult<HttpResponse> {
    accounts.delete(&user_id).await?;

    Ok(HttpResponse::Ok().json(json!({ "message": "User deleted successfully" })))
}
