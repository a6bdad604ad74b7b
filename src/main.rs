use anyhow::Context;
use clap::Parser;
use indicatif::{ProgressBar, ProgressStyle};
use part_ai_rust::{analyzer, catalog, cli, config, identify, matcher, scanner};
use catalog::JsonCatalog;
use cli::{Cli, Commands};
use config::Config;
use matcher::Matcher;
use scanner::ImageInfo;
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let config = Config::load().context("設定の読み込みに失敗しました")?;

    match cli.command {
        Commands::Identify { path, catalog, output, use_cache } => {
            // 進捗はstderr、結果JSONはstdoutへ
            eprintln!("🔍 part-ai - 部品識別\n");

            // 1. 画像の収集
            let (images, cache_dir) = collect_images(&path)?;
            if images.is_empty() {
                return Err(part_ai_rust::error::PartAiError::NoImagesFound(
                    path.display().to_string(),
                ).into());
            }
            eprintln!("[1/3] {}枚の画像を検出", images.len());

            // 2. カタログ読み込み
            let catalog_path = config.resolve_catalog_path(catalog.as_deref())?;
            let catalog = JsonCatalog::load(&catalog_path)
                .with_context(|| format!("カタログを読み込めません: {}", catalog_path.display()))?;
            eprintln!("[2/3] カタログ読み込み完了 ({}件)", catalog.len());
            let matcher = Matcher::new(catalog);

            // 3. 解析・照合
            eprintln!("[3/3] AI解析・照合中...{}", if use_cache { " (キャッシュ有効)" } else { "" });
            let mut cache = use_cache.then(|| analyzer::CacheFile::load(&cache_dir));
            let single = images.len() == 1;

            let progress = ProgressBar::new(images.len() as u64);
            progress.set_style(
                ProgressStyle::with_template("  {bar:30} {pos}/{len} {msg}")
                    .context("プログレスバーの設定に失敗しました")?,
            );

            let mut reports = Vec::new();
            for image in &images {
                progress.set_message(image.file_name.clone());
                match identify::identify_image(image, &matcher, &config, cli.ai_provider, cache.as_mut()).await {
                    Ok(report) => reports.push(report),
                    Err(e) if !single => {
                        tracing::warn!(file = %image.file_name, error = %e, "image skipped");
                        progress.println(format!("⚠ {}: {}", image.file_name, e));
                    }
                    Err(e) => {
                        progress.finish_and_clear();
                        return Err(e).context(format!("画像の識別に失敗しました: {}", image.file_name));
                    }
                }
                progress.inc(1);
            }
            progress.finish_and_clear();

            if let Some(cache) = &cache {
                cache.save(&cache_dir).context("キャッシュの保存に失敗しました")?;
            }

            for report in &reports {
                eprintln!(
                    "✔ {}: {} → {}件{}",
                    report.file_name,
                    report.analysis.part_name,
                    report.matched_products.len(),
                    report.warning.as_deref().map(|w| format!(" ⚠ {}", w)).unwrap_or_default()
                );
            }

            let json = serde_json::to_string_pretty(&reports)?;
            match output {
                Some(output) => {
                    std::fs::write(&output, json)?;
                    eprintln!("✔ 結果を保存: {}", output.display());
                }
                None => println!("{}", json),
            }

            eprintln!("\n✅ 識別完了");
        }

        Commands::Match { part_name, description, keywords, catalog } => {
            let catalog_path = config.resolve_catalog_path(catalog.as_deref())?;
            let catalog = JsonCatalog::load(&catalog_path)
                .with_context(|| format!("カタログを読み込めません: {}", catalog_path.display()))?;
            let matcher = Matcher::new(catalog);

            let mut products = matcher
                .match_product(part_name.as_deref(), description.as_deref(), &keywords)
                .await
                .context("カタログ照合に失敗しました")?;

            if let Some(base) = config.image_base_url() {
                for product in &mut products {
                    product.image_url = product
                        .entry
                        .image_ref
                        .as_deref()
                        .map(|image_ref| identify::product_image_url(&base, image_ref));
                }
            }

            println!("{}", serde_json::to_string_pretty(&products)?);
        }

        Commands::Config { show, set_model, set_catalog, set_image_base_url } => {
            let mut config = config;
            let mut changed = false;

            if let Some(model) = set_model {
                config.model = model;
                changed = true;
            }
            if let Some(path) = set_catalog {
                config.catalog_path = Some(path);
                changed = true;
            }
            if let Some(url) = set_image_base_url {
                config.image_base_url = Some(url);
                changed = true;
            }

            if changed {
                config.save().context("設定の保存に失敗しました")?;
                println!("✔ 設定を保存しました");
            }

            if show || !changed {
                println!("設定:");
                println!("  モデル: {}", config.model);
                println!("  最大画像サイズ: {}px / {} bytes", config.max_image_size, config.max_image_bytes);
                println!("  タイムアウト: {}秒", config.timeout_seconds);
                println!(
                    "  カタログ: {}",
                    config.catalog_path.as_ref().map(|p| p.display().to_string()).unwrap_or_else(|| "未設定".into())
                );
                println!("  画像URLベース: {}", config.image_base_url().unwrap_or_else(|| "未設定".into()));
            }
        }

        Commands::Cache { clear, folder, info } => {
            let target = folder.unwrap_or_else(|| PathBuf::from("."));
            let cache_path = analyzer::CacheFile::cache_path(&target);

            if info || !clear {
                if cache_path.exists() {
                    let cache = analyzer::CacheFile::load(&target);
                    println!("キャッシュ情報:");
                    println!("  パス: {}", cache_path.display());
                    println!("  件数: {}", cache.len());
                    if let Ok(meta) = std::fs::metadata(&cache_path) {
                        println!("  サイズ: {} bytes", meta.len());
                    }
                } else {
                    println!("キャッシュファイルが存在しません: {}", cache_path.display());
                }
            }

            if clear {
                if analyzer::CacheFile::clear(&target)? {
                    println!("✔ キャッシュを削除しました: {}", cache_path.display());
                } else {
                    println!("キャッシュファイルが存在しません");
                }
            }
        }
    }

    Ok(())
}

fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

/// 画像一覧とキャッシュの保存先を決める
fn collect_images(path: &Path) -> part_ai_rust::error::Result<(Vec<ImageInfo>, PathBuf)> {
    if path.is_dir() {
        Ok((scanner::scan_folder(path)?, path.to_path_buf()))
    } else {
        let image = ImageInfo::from_path(path)?;
        let dir = path
            .parent()
            .filter(|p| !p.as_os_str().is_empty())
            .map(Path::to_path_buf)
            .unwrap_or_else(|| PathBuf::from("."));
        Ok((vec![image], dir))
    }
}
