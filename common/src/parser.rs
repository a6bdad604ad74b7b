//! 画像解析レスポンスパーサー
//!
//! AI CLIのレスポンスからJSONオブジェクトを抽出し、
//! VisionAnalysis にパースする

use crate::error::{Error, Result};
use crate::types::VisionAnalysis;
use serde::Deserialize;

/// APIレスポンスからJSONオブジェクト部分を抽出
///
/// 抽出優先順位:
/// 1. ```json ... ``` ブロック
/// 2. 最初の `{` から最後の `}` まで
/// 3. エラー
///
/// # Examples
/// ```
/// use part_ai_common::extract_json_object;
///
/// let response = "Voici le résultat : {\"partName\": \"Bougie\"}";
/// let json = extract_json_object(response).unwrap();
/// assert_eq!(json, "{\"partName\": \"Bougie\"}");
/// ```
pub fn extract_json_object(response: &str) -> Result<&str> {
    if let Some(start_marker) = response.find("```json") {
        let start = start_marker + "```json".len();
        if let Some(end_offset) = response[start..].find("```") {
            let block = response[start..start + end_offset].trim();
            if block.starts_with('{') {
                return Ok(block);
            }
        }
    }

    if let (Some(start), Some(end)) = (response.find('{'), response.rfind('}')) {
        if end > start {
            return Ok(&response[start..=end]);
        }
    }

    Err(Error::Parse("JSONオブジェクトが見つかりません".into()))
}

/// 必須項目を検証するための中間表現
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawVisionAnalysis {
    part_name: Option<String>,
    description: Option<String>,
    confidence: Option<f64>,
    #[serde(default)]
    keywords: Vec<String>,
    #[serde(default)]
    category: String,
    #[serde(default)]
    possible_brands: Vec<String>,
}

/// 画像解析レスポンスをパース
///
/// `partName`・`description` が空でなく、`confidence` が存在することを要求する。
pub fn parse_vision_response(response: &str) -> Result<VisionAnalysis> {
    let json_str = extract_json_object(response)?;
    let raw: RawVisionAnalysis = serde_json::from_str(json_str)
        .map_err(|e| Error::Parse(format!("解析結果 JSONパースエラー: {}", e)))?;

    let (Some(part_name), Some(description), Some(confidence)) =
        (raw.part_name, raw.description, raw.confidence)
    else {
        return Err(Error::Parse("解析データが不完全です".into()));
    };

    if part_name.trim().is_empty() || description.trim().is_empty() {
        return Err(Error::Parse("解析データが不完全です".into()));
    }

    Ok(VisionAnalysis {
        part_name,
        description,
        confidence,
        keywords: raw.keywords,
        category: raw.category,
        possible_brands: raw.possible_brands,
    })
}
