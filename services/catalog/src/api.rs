//! 基础数据路由

use axum::extract::State;
use axum::http::Method;
use axum::routing::get;
use axum::{Json, Router};
use serde::Serialize;
use std::time::Duration;
use tower_http::cors::{Any, CorsLayer};
use tracing::debug;

use timetrack_adapter_postgres::Store;
use timetrack_errors::{AppError, AppResult};

use crate::domain::{Activity, Project};
use crate::persistence::CatalogRepository;

/// 基础数据响应
#[derive(Debug, Serialize)]
pub struct CatalogResponse {
    pub projects: Vec<Project>,
    pub activities: Vec<Activity>,
}

/// 构建基础数据路由
///
/// 只读端点，OPTIONS 预检由 CORS 层直接应答
pub fn routes(store: Store) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::OPTIONS])
        .allow_headers([axum::http::header::CONTENT_TYPE])
        .max_age(Duration::from_secs(86400));

    Router::new()
        .route("/projects", get(list_catalog))
        .method_not_allowed_fallback(method_not_allowed)
        .layer(cors)
        .with_state(store)
}

async fn list_catalog(State(store): State<Store>) -> AppResult<Json<CatalogResponse>> {
    let repo = CatalogRepository::new(store.pool()?.clone());

    let projects = repo.list_projects().await?;
    let activities = repo.list_activities().await?;
    debug!(
        projects = projects.len(),
        activities = activities.len(),
        "Catalog fetched"
    );

    Ok(Json(CatalogResponse {
        projects,
        activities,
    }))
}

async fn method_not_allowed() -> AppError {
    AppError::MethodNotAllowed
}
