//! Authify 계정 서비스 메인 애플리케이션
//!
//! 설정을 읽고 저장소를 연결한 뒤 서비스 레지스트리를 만들어
//! Actix-web HTTP 서버를 구동합니다.

use std::io;
use std::sync::Arc;
use std::time::Duration;

use actix_cors::Cors;
use actix_governor::{Governor, GovernorConfigBuilder};
use actix_web::http::header;
use actix_web::{middleware, App, HttpServer};
use dotenv::dotenv;
use env_logger::Env;
use log::{error, info};

use authify_backend::caching::redis::RedisClient;
use authify_backend::caching::{InMemoryOAuthStateStore, OAuthStateStore, RedisOAuthStateStore};
use authify_backend::config::{AppConfig, CorsConfig, StoreBackend};
use authify_backend::core::ServiceRegistry;
use authify_backend::db::Database;
use authify_backend::repositories::accounts::{AccountStore, InMemoryAccountStore, MongoAccountStore};
use authify_backend::routes::configure_all_routes;

#[actix_web::main]
async fn main() -> io::Result<()> {
    // 환경 설정 및 로깅 초기화
    load_env_file();
    init_logging();

    info!("🚀 Authify 계정 서비스 시작중...");

    let config = AppConfig::from_env().map_err(io::Error::other)?;

    // 데이터 스토어 초기화
    let (store, states) = initialize_data_stores(&config).await?;

    let registry = ServiceRegistry::build(config, store, states).map_err(io::Error::other)?;

    info!("✅ 모든 서비스가 성공적으로 초기화되었습니다!");

    // HTTP 서버 시작
    start_http_server(registry).await
}

/// HTTP 서버를 구성하고 실행합니다
///
/// Rate Limiting, CORS, 로깅, 경로 정규화 미들웨어를 포함합니다.
///
/// # Errors
///
/// * `std::io::Error` - 포트 바인딩 실패 또는 서버 실행 오류
async fn start_http_server(registry: ServiceRegistry) -> io::Result<()> {
    let config = registry.config.clone();
    let bind_address = config.server.bind_address();

    info!("🌐 서버가 http://{} 에서 실행중입니다", bind_address);
    info!("📍 Health check: http://{}/health", bind_address);

    let governor_conf = GovernorConfigBuilder::default()
        .requests_per_second(config.rate_limit.per_second)
        .burst_size(config.rate_limit.burst_size)
        .use_headers()
        .finish()
        .ok_or_else(|| io::Error::other("Rate Limiting 설정이 올바르지 않습니다"))?;

    info!(
        "🛡️ Rate Limiting 활성화: 초당 {}요청, 버스트 {}개",
        config.rate_limit.per_second,
        config.rate_limit.burst_size
    );

    let cors_config = config.cors.clone();

    HttpServer::new(move || {
        let registry = registry.clone();

        App::new()
            // Rate Limiting 미들웨어 (가장 먼저 적용)
            .wrap(Governor::new(&governor_conf))
            .wrap(configure_cors(&cors_config))
            .wrap(middleware::Logger::default())
            .wrap(middleware::NormalizePath::trim())
            // 서비스 주입 및 라우트 설정
            .configure(move |cfg| registry.register(cfg))
            .configure(configure_all_routes)
    })
    .bind(bind_address)?
    .workers(config.server.workers)
    .run()
    .await
}

/// 환경별 설정 파일을 로드합니다
///
/// * `PROFILE=dev` - .env.dev 파일 로드 (기본값)
/// * `PROFILE=prod` - .env.prod 파일 로드
/// * 기타 - 기본 .env 파일 로드
fn load_env_file() {
    let profile = std::env::var("PROFILE").unwrap_or_else(|_| "dev".to_string());

    info!("Current profile: {}", profile);

    match profile.as_str() {
        "prod" => match dotenv::from_filename(".env.prod") {
            Ok(_) => info!(".env.prod 파일 로드 됨"),
            Err(e) => error!(".env.prod 파일 로드 실패: {}", e),
        },
        "dev" => match dotenv::from_filename(".env.dev") {
            Ok(_) => info!(".env.dev 파일 로드 됨"),
            Err(e) => error!(".env.dev 파일 로드 실패: {}", e),
        },
        _ => {
            dotenv().ok();
            info!("기본 .env 파일 로드");
        }
    }
}

/// `RUST_LOG` 기반 로깅 초기화 (기본값: "info,actix_web=debug")
fn init_logging() {
    env_logger::init_from_env(Env::default().default_filter_or("info,actix_web=debug"));
}

/// 설정된 백엔드에 따라 계정 저장소와 OAuth state 저장소를 준비합니다
///
/// `ACCOUNT_STORE=memory` 이면 외부 서비스 없이 프로세스 메모리를 사용합니다.
/// MongoDB 를 사용할 때는 시작 시 유니크 인덱스를 보장하고,
/// 인덱스를 만들 수 없으면 서버를 띄우지 않습니다.
async fn initialize_data_stores(
    config: &AppConfig,
) -> io::Result<(Arc<dyn AccountStore>, Arc<dyn OAuthStateStore>)> {
    match config.store_backend {
        StoreBackend::Memory => {
            info!("🧪 인메모리 저장소 사용 (재시작 시 데이터가 사라집니다)");
            Ok((
                Arc::new(InMemoryAccountStore::new()),
                Arc::new(InMemoryOAuthStateStore::new(Duration::from_secs(
                    config.oauth.state_ttl_seconds,
                ))),
            ))
        }
        StoreBackend::MongoDb => {
            info!("📡 데이터베이스 연결 중...");

            let database = Database::connect(&config.database)
                .await
                .map_err(io::Error::other)?;

            let store = MongoAccountStore::new(&database);
            store.create_indexes().await.map_err(io::Error::other)?;

            let redis = RedisClient::connect(&config.redis)
                .await
                .map_err(io::Error::other)?;
            let states = RedisOAuthStateStore::new(redis, config.oauth.state_ttl_seconds);

            Ok((Arc::new(store), Arc::new(states)))
        }
    }
}

/// CORS 설정을 구성합니다
///
/// 세션 쿠키를 주고받아야 하므로 credentials 를 허용하고,
/// 설정된 Origin 만 명시적으로 허용합니다.
fn configure_cors(config: &CorsConfig) -> Cors {
    let cors = config
        .allowed_origins
        .iter()
        .fold(Cors::default(), |cors, origin| cors.allowed_origin(origin));

    cors.allowed_methods(vec!["GET", "POST", "PUT", "DELETE", "OPTIONS"])
        .allowed_headers(vec![
            header::AUTHORIZATION,
            header::ACCEPT,
            header::CONTENT_TYPE,
        ])
        .supports_credentials()
        .max_age(3600)
}
