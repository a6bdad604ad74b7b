//! JSONファイルのカタログ
//!
//! 読み込み時点のスナップショットを検索する（読み取り専用）。

use super::{CatalogSearch, MemoryCatalog};
use crate::error::{PartAiError, Result};
use async_trait::async_trait;
use part_ai_common::{CatalogEntry, CatalogPredicate};
use std::collections::HashSet;
use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

#[derive(Debug, Clone)]
pub struct JsonCatalog {
    path: PathBuf,
    inner: MemoryCatalog,
}

impl JsonCatalog {
    /// カタログファイル（JSON配列）を読み込み
    ///
    /// IDの重複はエラー。名前が空のエントリは警告を出して読み込む。
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(PartAiError::FileNotFound(path.display().to_string()));
        }

        let reader = BufReader::new(File::open(path)?);
        let entries: Vec<CatalogEntry> = serde_json::from_reader(reader)
            .map_err(|e| PartAiError::InvalidCatalog(format!("JSONパースエラー: {}", e)))?;

        validate_entries(&entries)?;

        debug!(path = %path.display(), entries = entries.len(), "catalog loaded");

        Ok(Self {
            path: path.to_path_buf(),
            inner: MemoryCatalog::new(entries),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn len(&self) -> usize {
        self.inner.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }
}

#[async_trait]
impl CatalogSearch for JsonCatalog {
    async fn search(&self, predicate: &CatalogPredicate, limit: usize) -> Result<Vec<CatalogEntry>> {
        self.inner.search(predicate, limit).await
    }
}

fn validate_entries(entries: &[CatalogEntry]) -> Result<()> {
    let mut seen = HashSet::new();
    for entry in entries {
        if !seen.insert(entry.id.as_str()) {
            return Err(PartAiError::InvalidCatalog(format!("IDが重複しています: {}", entry.id)));
        }
        if entry.name.trim().is_empty() {
            warn!(id = %entry.id, "catalog entry without name");
        }
    }
    Ok(())
}
