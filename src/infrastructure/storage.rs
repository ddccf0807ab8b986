//! 记录存储基础设施
//!
//! 存储层只提供整表读写，合并、查找等逻辑在仓储层完成。

use std::fs;
use std::io::ErrorKind;
use std::path::PathBuf;
use std::sync::Mutex;

use tracing::debug;

use crate::app::product::model::Product;

/// 存储错误类型
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("failed to write {path}: {source}")]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("corrupt record file {path}: {source}")]
    Decode {
        path: PathBuf,
        source: serde_json::Error,
    },
    #[error("failed to encode records: {0}")]
    Encode(#[from] serde_json::Error),
    #[error("store lock poisoned")]
    Poisoned,
}

/// 整表读写的记录存储
pub trait RecordStore: Send + Sync {
    fn read_all(&self) -> Result<Vec<Product>, StoreError>;
    fn write_all(&self, records: &[Product]) -> Result<(), StoreError>;
}

/// 以单个 JSON 数组文件保存全部记录
///
/// 文件不存在时视为空集合；写入先落到同目录的临时文件再重命名覆盖。
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    fn temp_path(&self) -> PathBuf {
        let mut name = self
            .path
            .file_name()
            .map(|n| n.to_os_string())
            .unwrap_or_default();
        name.push(".tmp");
        self.path.with_file_name(name)
    }
}

impl RecordStore for JsonFileStore {
    fn read_all(&self) -> Result<Vec<Product>, StoreError> {
        let content = match fs::read(&self.path) {
            Ok(content) => content,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                debug!(path = %self.path.display(), "record file missing, starting empty");
                return Ok(Vec::new());
            }
            Err(source) => {
                return Err(StoreError::Read {
                    path: self.path.clone(),
                    source,
                })
            }
        };

        if content.iter().all(|b| b.is_ascii_whitespace()) {
            return Ok(Vec::new());
        }

        serde_json::from_slice(&content).map_err(|source| StoreError::Decode {
            path: self.path.clone(),
            source,
        })
    }

    fn write_all(&self, records: &[Product]) -> Result<(), StoreError> {
        let content = serde_json::to_vec_pretty(records)?;

        let write_err = |source| StoreError::Write {
            path: self.path.clone(),
            source,
        };

        // 确保目录存在
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent).map_err(write_err)?;
            }
        }

        let temp = self.temp_path();
        fs::write(&temp, content).map_err(write_err)?;
        fs::rename(&temp, &self.path).map_err(write_err)?;

        debug!(path = %self.path.display(), count = records.len(), "records written");
        Ok(())
    }
}

/// 内存存储，进程退出即丢失
#[derive(Debug, Default)]
pub struct MemoryStore {
    records: Mutex<Vec<Product>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_records(records: Vec<Product>) -> Self {
        Self {
            records: Mutex::new(records),
        }
    }
}

impl RecordStore for MemoryStore {
    fn read_all(&self) -> Result<Vec<Product>, StoreError> {
        let records = self.records.lock().map_err(|_| StoreError::Poisoned)?;
        Ok(records.clone())
    }

    fn write_all(&self, records: &[Product]) -> Result<(), StoreError> {
        let mut guard = self.records.lock().map_err(|_| StoreError::Poisoned)?;
        *guard = records.to_vec();
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::product::model::fixtures::sample_product;
    use tempfile::tempdir;

    #[test]
    fn test_missing_file_reads_empty() {
        let dir = tempdir().unwrap();
        let store = JsonFileStore::new(dir.path().join("products.json"));
        assert!(store.read_all().unwrap().is_empty());
    }

    #[test]
    fn test_file_store_save_load() {
        let dir = tempdir().unwrap();
        let store = JsonFileStore::new(dir.path().join("data").join("products.json"));

        let records = vec![sample_product("Energy 3Pcs Gadget", 499.0)];
        store.write_all(&records).unwrap();

        let loaded = store.read_all().unwrap();
        assert_eq!(loaded, records);
        assert!(!store.temp_path().exists());
    }

    #[test]
    fn test_corrupt_file_is_an_error() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("products.json");
        fs::write(&path, b"{ not json").unwrap();

        let store = JsonFileStore::new(path);
        assert!(matches!(store.read_all(), Err(StoreError::Decode { .. })));
    }

    #[test]
    fn test_legacy_computed_fields_ignored_on_read() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("products.json");
        let product = sample_product("Basic Charger", 299.0);
        let mut value = serde_json::to_value(vec![&product]).unwrap();
        value[0]["final_price"] = serde_json::json!(1.0);
        value[0]["volume_cm3"] = serde_json::json!(2.0);
        fs::write(&path, serde_json::to_vec(&value).unwrap()).unwrap();

        let loaded = JsonFileStore::new(path).read_all().unwrap();
        assert_eq!(loaded, vec![product]);
    }

    #[test]
    fn test_memory_store_replaces_contents() {
        let store = MemoryStore::with_records(vec![sample_product("Old Item", 10.0)]);
        store.write_all(&[]).unwrap();
        assert!(store.read_all().unwrap().is_empty());
    }
}
