//! timetrack API 网关
//!
//! 组装两个业务路由（基础数据、工时记录），加载配置并启动 HTTP 服务

mod routing;

use secrecy::ExposeSecret;
use std::net::SocketAddr;
use tower_http::trace::TraceLayer;
use tracing::{info, warn};

use timetrack_adapter_postgres::{create_lazy_pool, PostgresConfig, Store};
use timetrack_config::AppConfig;
use timetrack_telemetry::{init_tracing, init_tracing_json};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();

    // 加载配置
    let config = AppConfig::load("config")?;

    // 初始化 tracing
    if config.is_production() {
        init_tracing_json(&config.telemetry.log_level);
    } else {
        init_tracing(&config.telemetry.log_level);
    }

    // 构建存储句柄
    // 惰性建池：数据库不可达在请求处以 500 暴露，而不是启动失败
    let store = match &config.database {
        Some(db) => {
            let pg = PostgresConfig::new(db.url.expose_secret())
                .with_max_connections(db.max_connections);
            Store::connected(create_lazy_pool(&pg)?)
        }
        None => {
            warn!("DATABASE_URL is not set; data endpoints will report a configuration error");
            Store::unconfigured()
        }
    };

    // 构建路由
    let app = tt_catalog::routes(store.clone())
        .merge(tt_entries::routes(store.clone()))
        .merge(routing::health_routes(store))
        .layer(TraceLayer::new_for_http());

    // 启动服务器
    let addr: SocketAddr = format!("{}:{}", config.server.host, config.server.port).parse()?;
    info!(%addr, app = %config.app_name, "Starting server");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
