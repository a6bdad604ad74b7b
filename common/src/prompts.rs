//! プロンプト生成モジュール
//!
//! 画像解析（部品識別）用プロンプト。出力JSONのキーは VisionAnalysis と対応する。

use crate::query::NOT_IDENTIFIED;

/// 部品識別プロンプト生成
///
/// # Arguments
/// * `image_path` - 解析対象の画像パス（AI CLIに読ませる）
pub fn build_identify_prompt(image_path: &str) -> String {
    format!(
        r#"Read the following image file and analyze it: {image_path}

Vous êtes un expert en pièces automobiles. Analysez cette image et retournez UNIQUEMENT au format JSON :

{{
  "partName": "nom précis de la pièce en français",
  "description": "description détaillée de la pièce avec caractéristiques visibles",
  "confidence": 0.95,
  "keywords": ["mot-clé1", "mot-clé2"],
  "category": "catégorie de la pièce",
  "possibleBrands": ["marque1", "marque2"]
}}

Si ce n'est pas une pièce automobile, retournez:
{{
  "partName": "{NOT_IDENTIFIED}",
  "description": "Cette image ne semble pas contenir une pièce automobile",
  "confidence": 0.0,
  "keywords": [],
  "category": "unknown",
  "possibleBrands": []
}}"#
    )
}
