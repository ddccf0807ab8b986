//! 商品业务服务

use std::sync::Arc;

use tracing::{info, warn};
use uuid::Uuid;
use validator::Validate;

use super::error::{CatalogError, CatalogResult};
use super::model::{Product, ProductData, ProductView};
use super::patch::ProductPatch;
use super::query::{self, ListQuery, ProductPage};
use super::repository::{ProductRepository, ProductSource};
use super::rules;

#[derive(Clone)]
pub struct ProductService {
    repo: Arc<ProductRepository>,
    source: Arc<dyn ProductSource>,
}

impl ProductService {
    pub fn new(repo: Arc<ProductRepository>) -> Self {
        let source: Arc<dyn ProductSource> = repo.clone();
        Self { repo, source }
    }

    /// 列表查询使用单独注入的数据源
    pub fn with_source(repo: Arc<ProductRepository>, source: Arc<dyn ProductSource>) -> Self {
        Self { repo, source }
    }

    pub fn list_products(&self, query: &ListQuery) -> CatalogResult<ProductPage> {
        if let Err(errors) = query.validate() {
            return Err(CatalogError::Validation(rules::collect_violations(&errors)));
        }
        let products = self.source.load_all()?;
        query::run(products, query)
    }

    pub fn get_product(&self, id: Uuid) -> CatalogResult<ProductView> {
        self.repo.get_by_id(id).map(ProductView::from)
    }

    pub fn create_product(&self, data: ProductData) -> CatalogResult<ProductView> {
        if let Err(violations) = rules::validate_product(&data) {
            warn!(sku = %data.sku, count = violations.len(), "rejected product create");
            return Err(CatalogError::Validation(violations));
        }

        let product = self.repo.insert(Product::create(data))?;
        info!(id = %product.id, sku = %product.data.sku, "product created");
        Ok(product.into())
    }

    pub fn update_product(&self, id: Uuid, patch: ProductPatch) -> CatalogResult<ProductView> {
        if let Err(errors) = patch.validate() {
            warn!(%id, "rejected product update");
            return Err(CatalogError::Validation(rules::collect_violations(&errors)));
        }

        let product = self.repo.update(id, patch)?;
        info!(%id, "product updated");
        Ok(product.into())
    }

    pub fn delete_product(&self, id: Uuid) -> CatalogResult<ProductView> {
        let product = self.repo.delete(id)?;
        info!(%id, sku = %product.data.sku, "product deleted");
        Ok(product.into())
    }
}
