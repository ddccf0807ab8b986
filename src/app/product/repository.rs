//! 商品仓储
//!
//! 每次写操作都是整表读改写，期间持有进程内唯一的写锁，同一存储的并发写因此串行化。
//! 读操作直接取快照，不经过写锁。

use std::sync::{Arc, Mutex};

use tracing::{error, info};
use uuid::Uuid;

use super::error::{CatalogError, CatalogResult};
use super::model::Product;
use super::patch::ProductPatch;
use super::rules;
use crate::config::StorageConfig;
use crate::infrastructure::storage::{JsonFileStore, RecordStore};

/// 提供当前全部商品的能力，列表查询只依赖它
pub trait ProductSource: Send + Sync {
    fn load_all(&self) -> CatalogResult<Vec<Product>>;
}

pub struct ProductRepository {
    store: Arc<dyn RecordStore>,
    write_gate: Mutex<()>,
}

impl ProductRepository {
    pub fn new(store: Arc<dyn RecordStore>) -> Self {
        Self {
            store,
            write_gate: Mutex::new(()),
        }
    }

    /// 按存储配置创建基于 JSON 文件的仓储
    pub fn from_config(config: &StorageConfig) -> Self {
        Self::new(Arc::new(JsonFileStore::new(config.data_path.clone())))
    }

    pub fn get_by_id(&self, id: Uuid) -> CatalogResult<Product> {
        self.load_all()?
            .into_iter()
            .find(|p| p.id == id)
            .ok_or(CatalogError::NotFound(id))
    }

    pub fn insert(&self, product: Product) -> CatalogResult<Product> {
        self.modify(|records| {
            if records.iter().any(|p| p.id == product.id) {
                return Err(CatalogError::DuplicateId(product.id));
            }
            records.push(product.clone());
            Ok(product)
        })
    }

    /// 硬删除，返回被删除的记录
    pub fn delete(&self, id: Uuid) -> CatalogResult<Product> {
        self.modify(|records| {
            let index = records
                .iter()
                .position(|p| p.id == id)
                .ok_or(CatalogError::NotFound(id))?;
            Ok(records.remove(index))
        })
    }

    /// 合并部分字段并对合并结果重新校验
    pub fn update(&self, id: Uuid, patch: ProductPatch) -> CatalogResult<Product> {
        self.modify(|records| {
            let slot = records
                .iter_mut()
                .find(|p| p.id == id)
                .ok_or(CatalogError::NotFound(id))?;

            let mut merged = slot.data.clone();
            patch.apply_to(&mut merged);
            rules::validate_product(&merged).map_err(CatalogError::Validation)?;

            slot.data = merged;
            Ok(slot.clone())
        })
    }

    /// 整表读改写；闭包返回错误时不写回
    fn modify<T>(&self, f: impl FnOnce(&mut Vec<Product>) -> CatalogResult<T>) -> CatalogResult<T> {
        let _gate = self
            .write_gate
            .lock()
            .map_err(|_| CatalogError::StorageUnavailable("write gate poisoned".to_string()))?;

        let mut records = self.store.read_all()?;
        let out = f(&mut records)?;

        if let Err(e) = self.store.write_all(&records) {
            error!("failed to persist products: {}", e);
            return Err(e.into());
        }

        info!(count = records.len(), "product store rewritten");
        Ok(out)
    }
}

impl ProductSource for ProductRepository {
    fn load_all(&self) -> CatalogResult<Vec<Product>> {
        self.store.read_all().map_err(|e| {
            error!("failed to load products: {}", e);
            e.into()
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::product::model::fixtures::{sample_data, sample_product};
    use crate::infrastructure::storage::{MemoryStore, StoreError};

    fn repo_with(records: Vec<Product>) -> ProductRepository {
        ProductRepository::new(Arc::new(MemoryStore::with_records(records)))
    }

    #[test]
    fn test_insert_and_get() {
        let repo = repo_with(Vec::new());
        let product = Product::create(sample_data());
        repo.insert(product.clone()).unwrap();

        assert_eq!(repo.get_by_id(product.id).unwrap(), product);
        assert_eq!(repo.load_all().unwrap().len(), 1);
    }

    #[test]
    fn test_insert_duplicate_id() {
        let product = sample_product("Energy 3Pcs Gadget", 499.0);
        let repo = repo_with(vec![product.clone()]);
        assert!(matches!(repo.insert(product), Err(CatalogError::DuplicateId(_))));
        assert_eq!(repo.load_all().unwrap().len(), 1);
    }

    #[test]
    fn test_delete_then_get_is_not_found() {
        let product = sample_product("Basic Charger", 299.0);
        let repo = repo_with(vec![product.clone()]);

        let removed = repo.delete(product.id).unwrap();
        assert_eq!(removed.id, product.id);
        assert!(matches!(repo.get_by_id(product.id), Err(CatalogError::NotFound(_))));
        assert!(matches!(repo.delete(product.id), Err(CatalogError::NotFound(_))));
    }

    #[test]
    fn test_update_merges_and_keeps_identity() {
        let product = sample_product("Basic Charger", 299.0);
        let repo = repo_with(vec![product.clone()]);

        let patch = ProductPatch {
            price: Some(349.0),
            ..Default::default()
        };
        let updated = repo.update(product.id, patch).unwrap();

        assert_eq!(updated.id, product.id);
        assert_eq!(updated.created_at, product.created_at);
        assert_eq!(updated.data.price, 349.0);
        assert_eq!(updated.data.name, "Basic Charger");
        assert_eq!(repo.get_by_id(product.id).unwrap(), updated);
    }

    #[test]
    fn test_update_rejected_after_merge_leaves_store_untouched() {
        let product = sample_product("Basic Charger", 299.0);
        let repo = repo_with(vec![product.clone()]);

        let patch = ProductPatch {
            stock: Some(0),
            ..Default::default()
        };
        assert!(matches!(
            repo.update(product.id, patch),
            Err(CatalogError::Validation(_))
        ));
        assert_eq!(repo.get_by_id(product.id).unwrap(), product);
    }

    #[test]
    fn test_update_missing_id() {
        let repo = repo_with(Vec::new());
        let result = repo.update(Uuid::new_v4(), ProductPatch::default());
        assert!(matches!(result, Err(CatalogError::NotFound(_))));
    }

    struct BrokenStore;

    impl RecordStore for BrokenStore {
        fn read_all(&self) -> Result<Vec<Product>, StoreError> {
            Err(StoreError::Poisoned)
        }

        fn write_all(&self, _records: &[Product]) -> Result<(), StoreError> {
            Err(StoreError::Poisoned)
        }
    }

    #[test]
    fn test_unreadable_store_is_unavailable() {
        let repo = ProductRepository::new(Arc::new(BrokenStore));
        assert!(matches!(
            repo.load_all(),
            Err(CatalogError::StorageUnavailable(_))
        ));
        assert!(matches!(
            repo.insert(Product::create(sample_data())),
            Err(CatalogError::StorageUnavailable(_))
        ));
    }
}
