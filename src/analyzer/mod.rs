//! 画像解析モジュール
//!
//! AI CLIに画像を読ませて部品を識別する。
//! 結果は部品名・説明・キーワードの組（VisionAnalysis）で、照合処理の入力になる。

pub mod cache;
mod image_prep;
mod runner;

pub use cache::{compute_file_hash, CacheFile};
pub use image_prep::{prepare_image, validate_image_size, work_dir};

use crate::ai_provider::AiProvider;
use crate::config::Config;
use crate::error::Result;
use crate::scanner::ImageInfo;
use part_ai_common::{build_identify_prompt, parse_vision_response, VisionAnalysis};
use tracing::{debug, info};

/// 1枚の画像を解析
pub async fn analyze_image(
    image: &ImageInfo,
    config: &Config,
    provider: AiProvider,
) -> Result<VisionAnalysis> {
    validate_image_size(&image.path, config.max_image_bytes)?;

    // CLIの応答を受け取るまで作業ディレクトリを保持
    let work = work_dir()?;
    let prepared = prepare_image(&image.path, work.path(), config.max_image_size)?;
    let prompt = build_identify_prompt(&prepared.display().to_string().replace('\\', "/"));

    debug!(file = %image.file_name, prompt_len = prompt.len(), "vision prompt built");

    let response = runner::run_ai_cli(provider, &prompt, &config.model, config.timeout()).await?;

    debug!(file = %image.file_name, response_len = response.len(), "vision response received");

    let analysis = parse_vision_response(&response)?;

    info!(
        file = %image.file_name,
        part_name = %analysis.part_name,
        confidence = analysis.confidence,
        "image analysis complete"
    );

    Ok(analysis)
}
