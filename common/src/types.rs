//! カタログ照合の型定義
//!
//! - CatalogEntry: カタログの部品レコード（読み取り専用）
//! - ScoredCandidate: 類似度付きの照合結果
//! - VisionAnalysis: 画像解析サービスの出力

use serde::{Deserialize, Serialize};

/// カタログの部品レコード
///
/// 元のドキュメント形式（`_id`, `product_name`, `categorieId`, `image_filename`）も
/// そのまま読み込めるようにエイリアスを付けている。
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CatalogEntry {
    #[serde(alias = "_id")]
    pub id: String,

    #[serde(alias = "product_name", alias = "nom")]
    pub name: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    #[serde(default, alias = "categorieId", skip_serializing_if = "Option::is_none")]
    pub category_ref: Option<String>,

    #[serde(default, alias = "image_filename", skip_serializing_if = "Option::is_none")]
    pub image_ref: Option<String>,
}

impl CatalogEntry {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            ..Default::default()
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// 空でない説明文のみ返す
    pub fn description_text(&self) -> Option<&str> {
        self.description.as_deref().filter(|d| !d.is_empty())
    }
}

/// 類似度付きの照合結果
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoredCandidate {
    #[serde(flatten)]
    pub entry: CatalogEntry,

    /// 0.0〜1.0
    pub similarity: f64,

    /// 画像URL（呼び出し側で解決）
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
}

/// 画像解析サービスの出力
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VisionAnalysis {
    pub part_name: String,

    pub description: String,

    pub confidence: f64,

    #[serde(default)]
    pub keywords: Vec<String>,

    #[serde(default)]
    pub category: String,

    #[serde(default)]
    pub possible_brands: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_catalog_entry_original_field_names() {
        let json = r#"{
            "_id": "64f1a",
            "product_name": "Filtre à huile Bosch",
            "description": "Filtre pour moteur diesel",
            "categorieId": "cat-7",
            "image_filename": "filtre.jpg"
        }"#;

        let entry: CatalogEntry = serde_json::from_str(json).unwrap();
        assert_eq!(entry.id, "64f1a");
        assert_eq!(entry.name, "Filtre à huile Bosch");
        assert_eq!(entry.category_ref.as_deref(), Some("cat-7"));
        assert_eq!(entry.image_ref.as_deref(), Some("filtre.jpg"));
    }

    #[test]
    fn test_catalog_entry_minimal() {
        let entry: CatalogEntry =
            serde_json::from_str(r#"{"id": "1", "name": "Bougie"}"#).unwrap();
        assert_eq!(entry.description, None);
        assert_eq!(entry.description_text(), None);
    }

    #[test]
    fn test_description_text_empty_is_none() {
        let entry = CatalogEntry::new("1", "Bougie").with_description("");
        assert_eq!(entry.description_text(), None);
    }

    #[test]
    fn test_scored_candidate_flattens_entry() {
        let candidate = ScoredCandidate {
            entry: CatalogEntry::new("p1", "Disque de frein"),
            similarity: 0.5,
            image_url: None,
        };

        let value = serde_json::to_value(&candidate).unwrap();
        assert_eq!(value["id"], "p1");
        assert_eq!(value["name"], "Disque de frein");
        assert_eq!(value["similarity"], 0.5);
        assert!(value.get("imageUrl").is_none());
    }
}
