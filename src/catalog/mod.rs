//! カタログ検索
//!
//! 照合処理はカタログの実装を知らず、`CatalogSearch` を通じて読み取り検索のみ行う。

mod json_store;

pub use json_store::JsonCatalog;

use crate::error::Result;
use async_trait::async_trait;
use part_ai_common::{CatalogEntry, CatalogPredicate};

/// カタログ検索機能
#[async_trait]
pub trait CatalogSearch: Send + Sync {
    /// 条件に一致するエントリを最大 `limit` 件返す
    async fn search(&self, predicate: &CatalogPredicate, limit: usize) -> Result<Vec<CatalogEntry>>;
}

/// メモリ上のカタログ
#[derive(Debug, Clone, Default)]
pub struct MemoryCatalog {
    entries: Vec<CatalogEntry>,
}

impl MemoryCatalog {
    pub fn new(entries: Vec<CatalogEntry>) -> Self {
        Self { entries }
    }

    pub fn entries(&self) -> &[CatalogEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[async_trait]
impl CatalogSearch for MemoryCatalog {
    async fn search(&self, predicate: &CatalogPredicate, limit: usize) -> Result<Vec<CatalogEntry>> {
        Ok(self
            .entries
            .iter()
            .filter(|entry| predicate.matches(entry))
            .take(limit)
            .cloned()
            .collect())
    }
}
