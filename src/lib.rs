//! 自動車部品の画像識別とカタログ照合
//!
//! - analyzer: AI CLIによる画像解析とキャッシュ
//! - catalog: カタログ検索機能（注入用トレイトとJSON実装）
//! - matcher: 候補検索・重複除去・スコア順位付け
//! - identify: 解析と照合をつなぐワークフロー

pub mod ai_provider;
pub mod analyzer;
pub mod catalog;
pub mod cli;
pub mod config;
pub mod error;
pub mod identify;
pub mod matcher;
pub mod scanner;
