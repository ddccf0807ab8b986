//! 商品领域错误

use uuid::Uuid;

use crate::core::error::{CoreError, FieldViolation};
use crate::infrastructure::storage::StoreError;

#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    #[error("validation failed with {} violation(s)", .0.len())]
    Validation(Vec<FieldViolation>),
    #[error("Product {0} not found")]
    NotFound(Uuid),
    #[error("No product found matching name={}", .0.as_deref().unwrap_or("None"))]
    NoMatch(Option<String>),
    #[error("Product id {0} already exists")]
    DuplicateId(Uuid),
    #[error("storage unavailable: {0}")]
    StorageUnavailable(String),
}

impl From<StoreError> for CatalogError {
    fn from(err: StoreError) -> Self {
        CatalogError::StorageUnavailable(err.to_string())
    }
}

impl From<CatalogError> for CoreError {
    fn from(err: CatalogError) -> Self {
        match err {
            CatalogError::Validation(violations) => CoreError::Validation(violations),
            CatalogError::NotFound(_) | CatalogError::NoMatch(_) => CoreError::NotFound(err.to_string()),
            CatalogError::DuplicateId(_) | CatalogError::StorageUnavailable(_) => {
                CoreError::InternalServerError(err.to_string())
            }
        }
    }
}

pub type CatalogResult<T> = std::result::Result<T, CatalogError>;
