//! tt-entries - 工时记录服务
//!
//! 按用户维度的工时 CRUD：管理员可见全部记录，普通成员只见自己的；
//! 修改与删除仅限记录归属人。删除为软删除（工时清零，保留行）

pub mod api;
pub mod domain;
pub mod extract;
pub mod persistence;

pub use api::routes;
