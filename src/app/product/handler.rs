//! 商品处理器

use axum::{extract::State, http::StatusCode, response::Json};
use tracing::error;
use uuid::Uuid;

use super::{
    error::CatalogError,
    model::{ProductData, ProductView},
    patch::ProductPatch,
    query::{ListQuery, ProductPage},
};
use crate::app::AppState;
use crate::core::error::CoreError;
use crate::core::extract::{AppJson, AppPath, AppQuery};

/// 商品 id 必须是 36 位标准格式 UUID
fn parse_product_id(raw: &str) -> Result<Uuid, CoreError> {
    if raw.chars().count() != 36 {
        return Err(CoreError::BadRequest(format!(
            "product id must be a 36-character UUID, got {} characters",
            raw.chars().count()
        )));
    }
    Uuid::parse_str(raw)
        .map_err(|e| CoreError::BadRequest(format!("invalid product id {}: {}", raw, e)))
}

pub async fn list_products(
    State(state): State<AppState>,
    AppQuery(query): AppQuery<ListQuery>,
) -> Result<Json<ProductPage>, CoreError> {
    let page = state.product_service.list_products(&query)?;
    Ok(Json(page))
}

pub async fn get_product(
    State(state): State<AppState>,
    AppPath(id): AppPath<String>,
) -> Result<Json<ProductView>, CoreError> {
    let id = parse_product_id(&id)?;
    let product = state.product_service.get_product(id).map_err(|e| match e {
        CatalogError::NotFound(_) => CoreError::NotFound("Product not found!".to_string()),
        other => other.into(),
    })?;
    Ok(Json(product))
}

pub async fn create_product(
    State(state): State<AppState>,
    AppJson(payload): AppJson<ProductData>,
) -> Result<(StatusCode, Json<ProductView>), CoreError> {
    let product = state.product_service.create_product(payload)?;
    Ok((StatusCode::CREATED, Json(product)))
}

pub async fn update_product(
    State(state): State<AppState>,
    AppPath(id): AppPath<String>,
    AppJson(payload): AppJson<ProductPatch>,
) -> Result<Json<ProductView>, CoreError> {
    let id = parse_product_id(&id)?;
    let product = state.product_service.update_product(id, payload)?;
    Ok(Json(product))
}

/// 删除时除 NotFound 外的失败都按 400 返回，并带上底层错误信息
pub async fn delete_product(
    State(state): State<AppState>,
    AppPath(id): AppPath<String>,
) -> Result<Json<ProductView>, CoreError> {
    let id = parse_product_id(&id)?;
    match state.product_service.delete_product(id) {
        Ok(product) => Ok(Json(product)),
        Err(e @ CatalogError::NotFound(_)) => Err(e.into()),
        Err(e) => {
            error!(%id, "delete failed: {}", e);
            Err(CoreError::BadRequest(e.to_string()))
        }
    }
}
