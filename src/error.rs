use thiserror::Error;

#[derive(Error, Debug)]
pub enum PartAiError {
    #[error("設定エラー: {0}")]
    Config(String),

    #[error("ファイルが見つかりません: {0}")]
    FileNotFound(String),

    #[error("フォルダが見つかりません: {0}")]
    FolderNotFound(String),

    #[error("画像読み込みエラー: {0}")]
    ImageLoad(String),

    #[error("画像が大きすぎます: {size} bytes（上限 {max} bytes）")]
    ImageTooLarge { size: u64, max: u64 },

    #[error("CLI実行エラー: {0}")]
    CliExecution(String),

    #[error("タイムアウト: {0}")]
    Timeout(String),

    #[error("カタログファイルが不正: {0}")]
    InvalidCatalog(String),

    #[error("カタログ検索エラー: {0}")]
    Retrieval(String),

    #[error("画像が見つかりません: {0}")]
    NoImagesFound(String),

    #[error("JSON解析エラー: {0}")]
    JsonParse(#[from] serde_json::Error),

    #[error("IOエラー: {0}")]
    Io(#[from] std::io::Error),

    #[error("APIレスポンスのパースに失敗: {0}")]
    ApiParse(#[from] part_ai_common::Error),
}

pub type Result<T> = std::result::Result<T, PartAiError>;
