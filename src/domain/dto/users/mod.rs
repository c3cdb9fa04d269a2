//! # User Data Transfer Objects Module
//!
//! 사용자 관련 API의 요청/응답 데이터 구조를 정의하는 모듈입니다.
//!
//! ```text
//! users/
//! ├── request/
//! │   ├── signup_request.rs       # 회원가입 (name, email, age, password)
//! │   ├── login_request.rs        # 로그인 (email, password)
//! │   └── update_user_request.rs  # 프로필 수정 (name, email, age)
//! └── response/
//!     └── user_response.rs        # UserResponse, LoginResponse
//! ```

pub mod request;
pub mod response;

pub use request::*;
pub use response::*;
