//! 解析前の画像チェックと縮小

use crate::error::{PartAiError, Result};
use image::imageops::FilterType;
use image::GenericImageView;
use std::path::{Path, PathBuf};
use tempfile::TempDir;
use tracing::debug;

/// ファイルサイズが上限以下か確認（サイズを返す）
pub fn validate_image_size(path: &Path, max_bytes: u64) -> Result<u64> {
    if !path.exists() {
        return Err(PartAiError::FileNotFound(path.display().to_string()));
    }

    let size = std::fs::metadata(path)?.len();
    if size > max_bytes {
        return Err(PartAiError::ImageTooLarge { size, max: max_bytes });
    }
    Ok(size)
}

/// AI CLIに渡す作業ディレクトリ（呼び出しごとに作成、drop時に削除）
pub fn work_dir() -> Result<TempDir> {
    Ok(tempfile::Builder::new().prefix("part-ai-").tempdir()?)
}

/// 画像を作業ディレクトリに用意する
///
/// 長辺が `max_size` を超える場合は縮小して `<元のファイル名>.resized.jpg` に保存、
/// それ以外は元のファイル名でコピー。戻り値は絶対パス。
pub fn prepare_image(path: &Path, work_dir: &Path, max_size: u32) -> Result<PathBuf> {
    let img = image::open(path)
        .map_err(|e| PartAiError::ImageLoad(format!("{}: {}", path.display(), e)))?;

    let file_name = path
        .file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_else(|| "image".to_string());

    let (width, height) = img.dimensions();
    let dest = if width.max(height) > max_size {
        let dest = work_dir.join(format!("{}.resized.jpg", file_name));
        let resized = img.resize(max_size, max_size, FilterType::Triangle);
        resized
            .to_rgb8()
            .save(&dest)
            .map_err(|e| PartAiError::ImageLoad(format!("{}: {}", dest.display(), e)))?;
        debug!(width, height, max_size, "image downscaled");
        dest
    } else {
        let dest = work_dir.join(&file_name);
        std::fs::copy(path, &dest)?;
        dest
    };

    Ok(std::fs::canonicalize(&dest)?)
}
