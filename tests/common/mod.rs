//! テスト用のカタログ実装

#![allow(dead_code)]

use async_trait::async_trait;
use part_ai_common::{CatalogEntry, CatalogPredicate};
use part_ai_rust::catalog::{CatalogSearch, MemoryCatalog};
use part_ai_rust::error::{PartAiError, Result};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;
use std::time::Duration;

/// 検索回数と検索条件を記録するカタログ
#[derive(Default)]
pub struct CountingCatalog {
    inner: MemoryCatalog,
    calls: AtomicUsize,
    predicates: Mutex<Vec<CatalogPredicate>>,
}

impl CountingCatalog {
    pub fn new(entries: Vec<CatalogEntry>) -> Self {
        Self {
            inner: MemoryCatalog::new(entries),
            ..Default::default()
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn predicates(&self) -> Vec<CatalogPredicate> {
        self.predicates.lock().unwrap().clone()
    }
}

#[async_trait]
impl CatalogSearch for CountingCatalog {
    async fn search(&self, predicate: &CatalogPredicate, limit: usize) -> Result<Vec<CatalogEntry>> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.predicates.lock().unwrap().push(predicate.clone());
        self.inner.search(predicate, limit).await
    }
}

/// 常に失敗するカタログ
pub struct FailingCatalog;

#[async_trait]
impl CatalogSearch for FailingCatalog {
    async fn search(&self, _predicate: &CatalogPredicate, _limit: usize) -> Result<Vec<CatalogEntry>> {
        Err(PartAiError::Io(std::io::Error::new(
            std::io::ErrorKind::ConnectionRefused,
            "catalog store unavailable",
        )))
    }
}

/// 応答が遅いカタログ
pub struct SlowCatalog(pub Duration);

#[async_trait]
impl CatalogSearch for SlowCatalog {
    async fn search(&self, _predicate: &CatalogPredicate, _limit: usize) -> Result<Vec<CatalogEntry>> {
        tokio::time::sleep(self.0).await;
        Ok(Vec::new())
    }
}

pub fn entry(id: &str, name: &str, description: &str) -> CatalogEntry {
    CatalogEntry::new(id, name).with_description(description)
}

pub fn keywords(words: &[&str]) -> Vec<String> {
    words.iter().map(|w| w.to_string()).collect()
}
