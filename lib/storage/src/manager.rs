use crate::store;
use chemrank_core::{EngineConfig, ProductIndex, ProductRecord, ScoredProduct};
use parking_lot::RwLock;
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// Owns the record file and the current search snapshot.
///
/// Queries run against an `Arc<ProductIndex>` taken from [`snapshot`]; a
/// [`reload`] builds a complete new index off to the side and swaps it in, so
/// in-flight queries finish on the snapshot they started with.
///
/// [`snapshot`]: CatalogManager::snapshot
/// [`reload`]: CatalogManager::reload
pub struct CatalogManager {
    data_path: PathBuf,
    config: EngineConfig,
    index: RwLock<Arc<ProductIndex>>,
}

impl CatalogManager {
    /// Load the record file and build the first index. A missing file gives
    /// an empty catalog.
    pub fn open<P: AsRef<Path>>(data_path: P, config: EngineConfig) -> Self {
        let data_path = data_path.as_ref().to_path_buf();
        let index = Arc::new(ProductIndex::build(store::load(&data_path), &config));
        Self {
            data_path,
            config,
            index: RwLock::new(index),
        }
    }

    pub fn data_path(&self) -> &Path {
        &self.data_path
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Current index snapshot.
    pub fn snapshot(&self) -> Arc<ProductIndex> {
        self.index.read().clone()
    }

    /// Rebuild from the record file and swap the new index in.
    pub fn reload(&self) -> Arc<ProductIndex> {
        let fresh = Arc::new(ProductIndex::build(store::load(&self.data_path), &self.config));
        *self.index.write() = fresh.clone();
        fresh
    }

    /// Append records to the backing file and rebuild.
    pub fn import(&self, records: &[ProductRecord]) -> anyhow::Result<usize> {
        let added = store::append(&self.data_path, records)?;
        self.reload();
        Ok(added)
    }

    pub fn search(&self, query: &str, top_k: usize) -> Vec<ScoredProduct> {
        self.snapshot().search(query, top_k)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn product(slug: &str, name: &str) -> ProductRecord {
        ProductRecord::new(name, format!("https://x.com/tr/urunler/kazan/alt/{}", slug))
            .with_description("Kazan suyu için kireç önleyici.")
    }

    #[test]
    fn test_open_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let manager = CatalogManager::open(dir.path().join("products.jsonl"), EngineConfig::default());
        assert!(manager.snapshot().is_empty());
        assert!(manager.search("kazan", 3).is_empty());
    }

    #[test]
    fn test_import_swaps_snapshot() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("products.jsonl");
        store::append(&path, &[product("maks-200", "MAKS-200 Antiskalant")]).unwrap();

        let manager = CatalogManager::open(&path, EngineConfig::default());
        let before = manager.snapshot();
        assert_eq!(before.len(), 1);

        manager
            .import(&[product("maks-210", "MAKS-210 Antiskalant")])
            .unwrap();

        // The old snapshot is untouched; new queries see the rebuilt index.
        assert_eq!(before.len(), 1);
        assert_eq!(manager.snapshot().len(), 2);
        assert_eq!(manager.search("kireç", 5).len(), 2);
    }
}
