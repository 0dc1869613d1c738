//! 工时记录端点集成测试
//!
//! 不依赖真实数据库：覆盖身份、方法分发、请求体校验与
//! 存储未配置的错误路径。角色过滤与归属校验的 SQL 行为
//! 依赖真实 Postgres，在仓储层联调环境验证

use axum::body::{to_bytes, Body};
use axum::http::{header, Method, Request, StatusCode};
use tower::ServiceExt;

use timetrack_adapter_postgres::Store;

fn app() -> axum::Router {
    tt_entries::routes(Store::unconfigured())
}

fn request(method: Method, uri: &str) -> axum::http::request::Builder {
    Request::builder().method(method).uri(uri)
}

async fn body_json(body: Body) -> serde_json::Value {
    let bytes = to_bytes(body, usize::MAX).await.unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

#[tokio::test]
async fn test_missing_header_is_unauthorized() {
    let response = app()
        .oneshot(
            request(Method::GET, "/time-entries")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    let json = body_json(response.into_body()).await;
    assert_eq!(json["error"], "Unauthorized: X-User-Id header required");
}

#[tokio::test]
async fn test_header_is_case_insensitive() {
    // 未配置存储：请求穿过了 401 关卡才会走到配置错误
    let response = app()
        .oneshot(
            request(Method::GET, "/time-entries")
                .header("X-USER-ID", "42")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let json = body_json(response.into_body()).await;
    assert_eq!(json["error"], "Database configuration error");
}

#[tokio::test]
async fn test_non_integer_header_is_unauthorized() {
    let response = app()
        .oneshot(
            request(Method::GET, "/time-entries")
                .header("x-user-id", "mallory")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_unsupported_method_with_identity() {
    let response = app()
        .oneshot(
            request(Method::PATCH, "/time-entries")
                .header("x-user-id", "1")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::METHOD_NOT_ALLOWED);
    let json = body_json(response.into_body()).await;
    assert_eq!(json["error"], "Method not allowed");
}

#[tokio::test]
async fn test_unsupported_method_without_identity_is_unauthorized() {
    // 身份校验先于方法分发
    let response = app()
        .oneshot(
            request(Method::PATCH, "/time-entries")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_options_preflight() {
    let response = app()
        .oneshot(
            request(Method::OPTIONS, "/time-entries")
                .header(header::ORIGIN, "http://localhost:3000")
                .header(header::ACCESS_CONTROL_REQUEST_METHOD, "POST")
                .header(header::ACCESS_CONTROL_REQUEST_HEADERS, "x-user-id")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        response
            .headers()
            .get(header::ACCESS_CONTROL_ALLOW_ORIGIN)
            .unwrap(),
        "*"
    );
    let allow_methods = response
        .headers()
        .get(header::ACCESS_CONTROL_ALLOW_METHODS)
        .unwrap()
        .to_str()
        .unwrap()
        .to_string();
    assert!(allow_methods.contains("DELETE"));

    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    assert!(bytes.is_empty());
}

#[tokio::test]
async fn test_malformed_json_body() {
    let response = app()
        .oneshot(
            request(Method::POST, "/time-entries")
                .header("x-user-id", "1")
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from("{broken"))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_json(response.into_body()).await;
    assert_eq!(json["error"], "Invalid JSON");
}

#[tokio::test]
async fn test_empty_body_is_invalid_json() {
    let response = app()
        .oneshot(
            request(Method::POST, "/time-entries")
                .header("x-user-id", "1")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_json(response.into_body()).await;
    assert_eq!(json["error"], "Invalid JSON");
}

#[tokio::test]
async fn test_create_missing_fields() {
    let response = app()
        .oneshot(
            request(Method::POST, "/time-entries")
                .header("x-user-id", "1")
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(r#"{"project_id": 1}"#))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_json(response.into_body()).await;
    assert_eq!(json["error"], "Missing required fields");
}

#[tokio::test]
async fn test_create_zero_hours_rejected() {
    // truthy 判定：hours=0 视同字段缺失
    let body = r#"{"project_id": 1, "activity_id": 2, "entry_date": "2024-03-01", "hours": 0}"#;
    let response = app()
        .oneshot(
            request(Method::POST, "/time-entries")
                .header("x-user-id", "1")
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(body))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_json(response.into_body()).await;
    assert_eq!(json["error"], "Missing required fields");
}

#[tokio::test]
async fn test_valid_create_without_store_is_configuration_error() {
    // 校验全部通过后才触达存储
    let body =
        r#"{"project_id": 1, "activity_id": 2, "entry_date": "2024-03-01", "hours": 7.5}"#;
    let response = app()
        .oneshot(
            request(Method::POST, "/time-entries")
                .header("x-user-id", "1")
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(body))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let json = body_json(response.into_body()).await;
    assert_eq!(json["error"], "Database configuration error");
}

#[tokio::test]
async fn test_update_missing_id() {
    let body = r#"{"project_id": 1, "activity_id": 2, "entry_date": "2024-03-01", "hours": 2}"#;
    let response = app()
        .oneshot(
            request(Method::PUT, "/time-entries")
                .header("x-user-id", "1")
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(body))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_json(response.into_body()).await;
    assert_eq!(json["error"], "Missing required fields");
}

#[tokio::test]
async fn test_delete_missing_id_param() {
    let response = app()
        .oneshot(
            request(Method::DELETE, "/time-entries")
                .header("x-user-id", "1")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_json(response.into_body()).await;
    assert_eq!(json["error"], "Missing entry id");
}

#[tokio::test]
async fn test_delete_without_identity_is_unauthorized() {
    let response = app()
        .oneshot(
            request(Method::DELETE, "/time-entries?id=42")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_responses_are_json_with_cors() {
    let response = app()
        .oneshot(
            request(Method::GET, "/time-entries")
                .header(header::ORIGIN, "http://localhost:3000")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(
        response.headers().get(header::CONTENT_TYPE).unwrap(),
        "application/json"
    );
    assert_eq!(
        response
            .headers()
            .get(header::ACCESS_CONTROL_ALLOW_ORIGIN)
            .unwrap(),
        "*"
    );
}
