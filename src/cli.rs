use clap::{Parser, Subcommand};
use crate::ai_provider::AiProvider;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "part-ai")]
#[command(about = "自動車部品 画像識別・カタログ照合ツール", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// 詳細ログを出力
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// AIプロバイダ (claude/codex/gemini)
    #[arg(long, value_enum, default_value = "claude", global = true)]
    pub ai_provider: AiProvider,
}

#[derive(Subcommand)]
pub enum Commands {
    /// 画像（またはフォルダ内の画像）から部品を識別してカタログと照合
    Identify {
        /// 画像ファイルまたはフォルダのパス
        #[arg(required = true)]
        path: PathBuf,

        /// カタログJSONファイル（省略時は設定値）
        #[arg(short, long)]
        catalog: Option<PathBuf>,

        /// 出力JSONファイル（省略時は標準出力）
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// キャッシュを使用（再解析をスキップ）
        #[arg(long)]
        use_cache: bool,
    },

    /// 部品名・説明・キーワードで直接カタログを照合
    Match {
        /// 部品名
        #[arg(short, long)]
        part_name: Option<String>,

        /// 部品の説明
        #[arg(short, long)]
        description: Option<String>,

        /// キーワード（複数指定可）
        #[arg(short, long = "keyword")]
        keywords: Vec<String>,

        /// カタログJSONファイル（省略時は設定値）
        #[arg(short, long)]
        catalog: Option<PathBuf>,
    },

    /// 設定を表示/編集
    Config {
        /// 設定を表示
        #[arg(long)]
        show: bool,

        /// 画像解析モデルを設定
        #[arg(long)]
        set_model: Option<String>,

        /// 既定のカタログファイルを設定
        #[arg(long)]
        set_catalog: Option<PathBuf>,

        /// 商品画像URLのベースを設定
        #[arg(long)]
        set_image_base_url: Option<String>,
    },

    /// キャッシュ管理
    Cache {
        /// キャッシュを削除
        #[arg(long)]
        clear: bool,

        /// 対象フォルダ（省略時はカレント）
        #[arg(short, long)]
        folder: Option<PathBuf>,

        /// キャッシュ情報を表示
        #[arg(long)]
        info: bool,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_match_with_keywords() {
        let cli = Cli::try_parse_from([
            "part-ai", "match", "--part-name", "Disque de frein",
            "-k", "disque", "-k", "frein",
        ])
        .unwrap();

        match cli.command {
            Commands::Match { part_name, keywords, description, catalog } => {
                assert_eq!(part_name.as_deref(), Some("Disque de frein"));
                assert_eq!(keywords, vec!["disque", "frein"]);
                assert!(description.is_none());
                assert!(catalog.is_none());
            }
            _ => panic!("Expected Match command"),
        }
    }

    #[test]
    fn test_parse_identify_global_flags() {
        let cli = Cli::try_parse_from([
            "part-ai", "identify", "photos", "--use-cache", "--ai-provider", "gemini", "-v",
        ])
        .unwrap();

        assert!(cli.verbose);
        assert_eq!(cli.ai_provider, AiProvider::Gemini);
        assert!(matches!(cli.command, Commands::Identify { use_cache: true, .. }));
    }
}
