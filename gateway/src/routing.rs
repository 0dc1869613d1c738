//! 运维路由

use axum::extract::State;
use axum::routing::get;
use axum::{Json, Router};
use serde::Serialize;

use timetrack_adapter_postgres::{check_connection, Store};

pub fn health_routes(store: Store) -> Router {
    Router::new()
        .route("/health", get(health_check))
        .route("/ready", get(readiness_check))
        .with_state(store)
}

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
}

async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

#[derive(Debug, Serialize)]
pub struct ReadinessResponse {
    pub ready: bool,
    pub checks: Vec<StoreCheck>,
}

#[derive(Debug, Serialize)]
pub struct StoreCheck {
    pub name: String,
    pub healthy: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

async fn readiness_check(State(store): State<Store>) -> Json<ReadinessResponse> {
    let check = match store.pool() {
        Ok(pool) => match check_connection(pool).await {
            Ok(()) => StoreCheck {
                name: "postgres".to_string(),
                healthy: true,
                message: None,
            },
            Err(e) => StoreCheck {
                name: "postgres".to_string(),
                healthy: false,
                message: Some(e.to_string()),
            },
        },
        Err(e) => StoreCheck {
            name: "postgres".to_string(),
            healthy: false,
            message: Some(e.to_string()),
        },
    };

    Json(ReadinessResponse {
        ready: check.healthy,
        checks: vec![check],
    })
}
