//! 工时记录路由
//!
//! 处理顺序：身份（401）→ 请求体/参数校验（400）→ 存储配置（500）→ SQL。
//! 与上游约定一致：必填字段按"truthy"判定，0 与空串视同缺失

use axum::extract::{Query, State};
use axum::http::{HeaderName, Method, StatusCode};
use axum::routing::get;
use axum::{Json, Router};
use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use std::time::Duration;
use tower_http::cors::{Any, CorsLayer};
use tracing::info;

use timetrack_adapter_postgres::Store;
use timetrack_errors::{AppError, AppResult};

use crate::domain::{NewTimeEntry, Role, TimeEntryUpdate, TimeEntryView};
use crate::extract::CallerId;
use crate::persistence::TimeEntryRepository;

/// 构建工时记录路由
pub fn routes(store: Store) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers([
            axum::http::header::CONTENT_TYPE,
            HeaderName::from_static("x-user-id"),
        ])
        .max_age(Duration::from_secs(86400));

    Router::new()
        .route(
            "/time-entries",
            get(list_entries)
                .post(create_entry)
                .put(update_entry)
                .delete(delete_entry),
        )
        .method_not_allowed_fallback(method_not_allowed)
        .layer(cors)
        .with_state(store)
}

/// 列表响应
#[derive(Debug, Serialize)]
pub struct EntryListResponse {
    pub entries: Vec<TimeEntryView>,
}

/// 新建响应
#[derive(Debug, Serialize)]
pub struct CreatedResponse {
    pub success: bool,
    pub id: i32,
}

/// 通用成功响应
#[derive(Debug, Serialize)]
pub struct SuccessResponse {
    pub success: bool,
}

/// 新建请求
#[derive(Debug, Deserialize)]
pub struct CreateEntryRequest {
    pub project_id: Option<i32>,
    pub activity_id: Option<i32>,
    pub entry_date: Option<String>,
    pub hours: Option<Decimal>,
    pub comment: Option<String>,
}

impl CreateEntryRequest {
    fn validate(self) -> AppResult<NewTimeEntry> {
        let (Some(project_id), Some(activity_id), Some(entry_date), Some(hours)) = (
            truthy_id(self.project_id),
            truthy_id(self.activity_id),
            truthy_text(self.entry_date),
            truthy_hours(self.hours),
        ) else {
            return Err(AppError::validation("Missing required fields"));
        };

        Ok(NewTimeEntry {
            project_id,
            activity_id,
            entry_date: parse_entry_date(&entry_date)?,
            hours,
            comment: self.comment.unwrap_or_default(),
        })
    }
}

/// 更新请求
#[derive(Debug, Deserialize)]
pub struct UpdateEntryRequest {
    pub id: Option<i32>,
    pub project_id: Option<i32>,
    pub activity_id: Option<i32>,
    pub entry_date: Option<String>,
    pub hours: Option<Decimal>,
    pub comment: Option<String>,
}

impl UpdateEntryRequest {
    fn validate(self) -> AppResult<TimeEntryUpdate> {
        let (Some(id), Some(project_id), Some(activity_id), Some(entry_date), Some(hours)) = (
            truthy_id(self.id),
            truthy_id(self.project_id),
            truthy_id(self.activity_id),
            truthy_text(self.entry_date),
            truthy_hours(self.hours),
        ) else {
            return Err(AppError::validation("Missing required fields"));
        };

        Ok(TimeEntryUpdate {
            id,
            project_id,
            activity_id,
            entry_date: parse_entry_date(&entry_date)?,
            hours,
            comment: self.comment.unwrap_or_default(),
        })
    }
}

// 必填字段的 truthy 判定：0 与空串视同缺失。
// hours=0 被拒是沿用的上游契约，由测试固化
fn truthy_id(value: Option<i32>) -> Option<i32> {
    value.filter(|v| *v != 0)
}

fn truthy_hours(value: Option<Decimal>) -> Option<Decimal> {
    value.filter(|v| !v.is_zero())
}

fn truthy_text(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.is_empty())
}

fn parse_entry_date(value: &str) -> AppResult<NaiveDate> {
    value
        .parse::<NaiveDate>()
        .map_err(|_| AppError::validation("Invalid entry_date"))
}

/// 请求体解析
///
/// 解析失败（含空请求体）与字段缺失是两种 400
fn parse_body<T: DeserializeOwned>(body: &str) -> AppResult<T> {
    serde_json::from_str(body).map_err(|_| AppError::validation("Invalid JSON"))
}

async fn list_entries(
    State(store): State<Store>,
    caller: CallerId,
) -> AppResult<Json<EntryListResponse>> {
    let repo = TimeEntryRepository::new(store.pool()?.clone());

    let role = repo
        .find_role(caller.0)
        .await?
        .ok_or_else(|| AppError::not_found("User not found"))?;

    let entries = match role {
        Role::Admin => repo.list_all().await?,
        Role::Member => repo.list_for_user(caller.0).await?,
    };

    Ok(Json(EntryListResponse { entries }))
}

async fn create_entry(
    State(store): State<Store>,
    caller: CallerId,
    body: String,
) -> AppResult<(StatusCode, Json<CreatedResponse>)> {
    let request: CreateEntryRequest = parse_body(&body)?;
    let entry = request.validate()?;

    let repo = TimeEntryRepository::new(store.pool()?.clone());
    let id = repo.insert(caller.0, &entry).await?;
    info!(user_id = caller.0, entry_id = id, "Time entry created");

    Ok((StatusCode::CREATED, Json(CreatedResponse { success: true, id })))
}

async fn update_entry(
    State(store): State<Store>,
    caller: CallerId,
    body: String,
) -> AppResult<Json<SuccessResponse>> {
    let request: UpdateEntryRequest = parse_body(&body)?;
    let entry = request.validate()?;

    let repo = TimeEntryRepository::new(store.pool()?.clone());
    repo.update(caller.0, &entry).await?;
    info!(user_id = caller.0, entry_id = entry.id, "Time entry updated");

    Ok(Json(SuccessResponse { success: true }))
}

#[derive(Debug, Deserialize)]
struct DeleteParams {
    id: Option<String>,
}

async fn delete_entry(
    State(store): State<Store>,
    caller: CallerId,
    Query(params): Query<DeleteParams>,
) -> AppResult<Json<SuccessResponse>> {
    let entry_id = params
        .id
        .as_deref()
        .filter(|v| !v.is_empty())
        .ok_or_else(|| AppError::validation("Missing entry id"))?
        .parse::<i32>()
        .map_err(|_| AppError::validation("Invalid entry id"))?;

    let repo = TimeEntryRepository::new(store.pool()?.clone());
    repo.zero_hours(caller.0, entry_id).await?;
    info!(user_id = caller.0, entry_id, "Time entry hours zeroed");

    Ok(Json(SuccessResponse { success: true }))
}

// 身份校验先于方法分发：不带 X-User-Id 的 PATCH 得到 401 而非 405
async fn method_not_allowed(_caller: CallerId) -> AppError {
    AppError::MethodNotAllowed
}
