//! # Core Module
//!
//! 애플리케이션 조립을 담당합니다.
//!
//! ## 모듈 구성
//!
//! ### [`registry`] - 서비스 레지스트리
//! - 설정과 저장소로부터 모든 서비스를 명시적으로 생성
//! - `web::Data` 로 핸들러에 주입
//! - 전역 상태 없음: 테스트마다 독립된 레지스트리를 만들 수 있음

pub mod registry;

pub use registry::ServiceRegistry;
