//! 部品識別ワークフロー
//!
//! 画像解析 → カタログ照合 → レポート生成。
//! 照合の失敗はログに残して「該当商品なし」として扱い、解析結果は返す。

use crate::ai_provider::AiProvider;
use crate::analyzer::{self, CacheFile};
use crate::catalog::CatalogSearch;
use crate::config::Config;
use crate::error::{PartAiError, Result};
use crate::matcher::Matcher;
use crate::scanner::ImageInfo;
use part_ai_common::{MatchQuery, ScoredCandidate, VisionAnalysis};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::{debug, info, warn};

/// 照合失敗時にレポートへ付ける警告
pub const MATCH_FAILED_WARNING: &str = "商品照合中にエラーが発生しました（照合結果なし）";

/// 1枚の画像に対する識別結果
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IdentificationReport {
    pub file_name: String,
    pub analysis: VisionAnalysis,
    pub matched_products: Vec<ScoredCandidate>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub warning: Option<String>,
}

/// 商品画像のURL
pub fn product_image_url(base_url: &str, image_ref: &str) -> String {
    format!("{}/images/products/{}", base_url.trim_end_matches('/'), image_ref)
}

/// 解析結果をカタログと照合してレポートを作る
///
/// 照合がエラー・タイムアウトになっても失敗にはせず、空の照合結果と警告を返す。
pub async fn build_report<C: CatalogSearch>(
    file_name: String,
    analysis: VisionAnalysis,
    matcher: &Matcher<C>,
    image_base_url: Option<&str>,
    timeout: Duration,
) -> IdentificationReport {
    let query = MatchQuery::from_analysis(&analysis);

    let outcome = match tokio::time::timeout(timeout, matcher.match_query(&query)).await {
        Ok(result) => result,
        Err(_) => Err(PartAiError::Timeout(format!(
            "カタログ照合が {}秒以内に終わりませんでした",
            timeout.as_secs()
        ))),
    };

    match outcome {
        Ok(mut products) => {
            if let Some(base) = image_base_url {
                for product in &mut products {
                    product.image_url = product
                        .entry
                        .image_ref
                        .as_deref()
                        .map(|image_ref| product_image_url(base, image_ref));
                }
            }

            info!(file = %file_name, matched = products.len(), "found matching products");

            IdentificationReport {
                file_name,
                analysis,
                matched_products: products,
                warning: None,
            }
        }
        Err(err) => {
            warn!(error = %err, file = %file_name, "error finding matching products");

            IdentificationReport {
                file_name,
                analysis,
                matched_products: Vec::new(),
                warning: Some(MATCH_FAILED_WARNING.to_string()),
            }
        }
    }
}

/// 画像を解析して照合する
///
/// `cache` があればハッシュで解析結果を再利用し、新しい結果は追加する。
/// 画像解析の失敗はエラーとして返す。
pub async fn identify_image<C: CatalogSearch>(
    image: &ImageInfo,
    matcher: &Matcher<C>,
    config: &Config,
    provider: AiProvider,
    cache: Option<&mut CacheFile>,
) -> Result<IdentificationReport> {
    let analysis = match cache {
        Some(cache) => {
            let size = analyzer::validate_image_size(&image.path, config.max_image_bytes)?;
            let hash = analyzer::compute_file_hash(&image.path)?;

            match cache.get(&hash) {
                Some(cached) => {
                    debug!(file = %image.file_name, "analysis cache hit");
                    cached.clone()
                }
                None => {
                    let analysis = analyzer::analyze_image(image, config, provider).await?;
                    cache.insert(hash, image.file_name.clone(), size, analysis.clone());
                    analysis
                }
            }
        }
        None => analyzer::analyze_image(image, config, provider).await?,
    };

    let base_url = config.image_base_url();
    Ok(build_report(
        image.file_name.clone(),
        analysis,
        matcher,
        base_url.as_deref(),
        config.timeout(),
    )
    .await)
}
