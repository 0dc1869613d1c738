//! 调用方身份提取器

use axum::extract::FromRequestParts;
use axum::http::request::Parts;

use timetrack_errors::AppError;

/// 调用方用户 ID
///
/// 取自 X-User-Id 头（大小写不敏感）。身份在上游已验证，
/// 本服务直接信任该值。缺失或非整数 → 401，先于任何数据库访问
#[derive(Debug, Clone, Copy)]
pub struct CallerId(pub i32);

impl<S> FromRequestParts<S> for CallerId
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .headers
            .get("x-user-id")
            .and_then(|v| v.to_str().ok())
            .and_then(|v| v.trim().parse::<i32>().ok())
            .map(CallerId)
            .ok_or_else(|| AppError::unauthenticated("X-User-Id header required"))
    }
}
