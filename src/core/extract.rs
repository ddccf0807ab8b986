//! 核心提取器模块
//!
//! 包装 axum 自带的提取器，使解析失败走统一的 `CoreError` 响应。

use axum::extract::{FromRequest, FromRequestParts};

use super::error::CoreError;

/// JSON 请求体提取器
#[derive(FromRequest)]
#[from_request(via(axum::Json), rejection(CoreError))]
pub struct AppJson<T>(pub T);

/// 查询参数提取器
#[derive(FromRequestParts)]
#[from_request(via(axum::extract::Query), rejection(CoreError))]
pub struct AppQuery<T>(pub T);

/// 路径参数提取器
#[derive(FromRequestParts)]
#[from_request(via(axum::extract::Path), rejection(CoreError))]
pub struct AppPath<T>(pub T);
