//! # Data Transfer Objects (DTO) Module
//!
//! API 경계에서 데이터를 전송하기 위한 객체들을 정의하는 모듈입니다.
//!
//! ## 설계 원칙
//!
//! - **명시적 인터페이스**: 클라이언트가 기대할 수 있는 데이터 구조
//! - **유효성 검증 내장**: `validator` derive 로 형식 규칙을 선언
//! - **민감 정보 제외**: 응답에는 비밀번호 해시와 프로바이더 ID가 포함되지 않음
//!
//! ## 모듈 구조
//!
//! ```text
//! dto/
//! ├── users/  # 회원가입, 로그인, 프로필 수정, 사용자 응답
//! └── auth/   # OAuth 콜백 쿼리, 세션 확인 응답
//! ```

pub mod auth;
pub mod users;

pub use auth::*;
pub use users::*;
