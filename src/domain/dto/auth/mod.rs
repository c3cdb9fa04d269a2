//! # 인증 관련 DTO
//!
//! OAuth 콜백 쿼리와 세션 확인 응답을 정의합니다.

pub mod oauth_callback;
pub mod session_response;

pub use oauth_callback::OAuthCallbackQuery;
pub use session_response::SessionCheckResponse;
