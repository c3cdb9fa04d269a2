//! # 사용자 관련 응답 DTO 모듈
//!
//! ```json
//! {
//!   "id": "507f1f77bcf86cd799439011",
//!   "name": "Jane Doe",
//!   "email": "jane@example.com",
//!   "age": 30,
//!   "providers": ["google"],
//!   "has_password": true,
//!   "created_at": "2024-01-01T00:00:00Z",
//!   "updated_at": "2024-01-15T10:30:00Z"
//! }
//! ```

pub mod user_response;

pub use user_response::{LoginResponse, UserResponse};
