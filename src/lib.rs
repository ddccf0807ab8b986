//! # 商品目录服务
//!
//! 通过 HTTP 提供商品记录的增删改查：
//! - 商品数据模型与两阶段校验（字段约束、跨字段业务规则）
//! - 列表查询：名称过滤、按价格稳定排序、分页
//! - 基于整表读改写的 JSON 文件存储

pub mod app;
pub mod config;
pub mod core;
pub mod infrastructure;

pub use app::{router, AppState};
pub use config::Config;
