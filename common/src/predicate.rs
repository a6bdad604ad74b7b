//! カタログ検索条件
//!
//! 検索は大文字小文字を区別しない部分一致。空の検索語は何にも一致しない。

use crate::types::CatalogEntry;
use serde::{Deserialize, Serialize};

/// カタログ検索条件
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "terms", rename_all = "camelCase")]
pub enum CatalogPredicate {
    /// 部品名に指定語を含む
    NameContains(String),
    /// 部品名または説明文にいずれかの語を含む
    NameOrDescriptionContainsAny(Vec<String>),
}

impl CatalogPredicate {
    pub fn matches(&self, entry: &CatalogEntry) -> bool {
        match self {
            CatalogPredicate::NameContains(term) => contains_ignore_case(&entry.name, term),
            CatalogPredicate::NameOrDescriptionContainsAny(terms) => terms.iter().any(|term| {
                contains_ignore_case(&entry.name, term)
                    || entry
                        .description
                        .as_deref()
                        .is_some_and(|d| contains_ignore_case(d, term))
            }),
        }
    }
}

/// 大文字小文字を区別しない部分一致（空の検索語は不一致）
pub fn contains_ignore_case(haystack: &str, needle: &str) -> bool {
    !needle.is_empty() && haystack.to_lowercase().contains(&needle.to_lowercase())
}
