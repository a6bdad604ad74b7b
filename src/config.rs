use crate::error::{PartAiError, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// 画像URLのベースを上書きする環境変数
pub const IMAGE_BASE_URL_ENV: &str = "PART_AI_IMAGE_BASE_URL";

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub model: String,
    pub max_image_bytes: u64,
    pub max_image_size: u32,
    pub timeout_seconds: u64,
    pub catalog_path: Option<PathBuf>,
    pub image_base_url: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            model: "claude-3-haiku-20240307".into(),
            max_image_bytes: 10 * 1024 * 1024,
            max_image_size: 1568,  // Claude Vision推奨サイズ
            timeout_seconds: 120,
            catalog_path: None,
            image_base_url: None,
        }
    }
}

impl Config {
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_path()?)
    }

    pub fn load_from(config_path: &Path) -> Result<Self> {
        if config_path.exists() {
            let content = std::fs::read_to_string(config_path)?;
            let config: Config = serde_json::from_str(&content)?;
            Ok(config)
        } else {
            Ok(Self::default())
        }
    }

    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::config_path()?)
    }

    pub fn save_to(&self, config_path: &Path) -> Result<()> {
        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(config_path, content)?;
        Ok(())
    }

    pub fn config_path() -> Result<PathBuf> {
        let home = dirs::home_dir()
            .ok_or_else(|| PartAiError::Config("ホームディレクトリが見つかりません".into()))?;
        Ok(home.join(".config").join("part-ai").join("config.json"))
    }

    /// 画像URLのベース（環境変数を優先）
    pub fn image_base_url(&self) -> Option<String> {
        std::env::var(IMAGE_BASE_URL_ENV)
            .ok()
            .filter(|v| !v.trim().is_empty())
            .or_else(|| self.image_base_url.clone())
    }

    /// CLI引数 → 設定ファイルの順でカタログパスを決定
    pub fn resolve_catalog_path(&self, cli_path: Option<&Path>) -> Result<PathBuf> {
        cli_path
            .map(Path::to_path_buf)
            .or_else(|| self.catalog_path.clone())
            .ok_or_else(|| {
                PartAiError::Config(
                    "カタログが指定されていません。`--catalog` か `part-ai config --set-catalog` で指定してください".into(),
                )
            })
    }

    pub fn timeout(&self) -> std::time::Duration {
        std::time::Duration::from_secs(self.timeout_seconds)
    }
}
