//! HTTP 요청 핸들러 모듈
//!
//! 핸들러는 요청을 검증하고 `web::Data` 로 주입된 서비스를 호출한 뒤
//! 결과를 HTTP 응답으로 변환합니다. 에러는 [`crate::errors::AppError`] 가
//! 상태 코드로 매핑합니다.
//!
//! - [`users`] - `/api/users` 가입, 로그인, CRUD
//! - [`auth`] - `/auth` OAuth 로그인, 세션 확인, 로그아웃

pub mod auth;
pub mod users;
