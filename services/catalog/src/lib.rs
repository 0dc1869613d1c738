//! tt-catalog - 基础数据服务
//!
//! 提供项目与活动类型的只读列表

pub mod api;
pub mod domain;
pub mod persistence;

pub use api::routes;
