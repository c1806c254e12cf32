use clap::Parser;
use safescan_rust::{cli, config, error, ocr, report, scanner, scoring, segmenter, table, wizard};
use cli::{Cli, Commands};
use config::Config;
use error::Result;
use std::path::PathBuf;
use table::SafetyTable;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = Config::load()?;

    match cli.command {
        Commands::Scan { image, table: table_path, output, use_cache } => {
            println!("🧴 safescan - 成分スキャン\n");

            let table_path = resolve_table_path(table_path, &config);
            let safety_table = SafetyTable::from_path(&table_path)?;
            if cli.verbose {
                println!("  成分表: {} ({}件)", table_path.display(), safety_table.len());
                println!("  OCRエンジン: {}", cli.ocr_provider.label());
            }

            // 1. 画像検証
            println!("[1/3] 画像を確認中...");
            let (width, height) = scanner::validate_image(&image)?;
            println!("✔ {} ({}x{})\n", image.display(), width, height);

            // 2. OCR
            println!("[2/3] OCRでテキストを抽出中...{}", if use_cache { " (キャッシュ有効)" } else { "" });
            let text = if use_cache {
                ocr::extract_text_with_cache(&image, cli.ocr_provider, &config, cli.verbose).await?
            } else {
                ocr::extract_text(&image, cli.ocr_provider, &config, cli.verbose).await?
            };
            let ingredients = segmenter::segment(&text);
            if ingredients.is_empty() {
                return Err(error::SafeScanError::NoIngredients);
            }
            println!("✔ {}個の成分候補を抽出\n", ingredients.len());

            // 3. 照合とスコア算出
            println!("[3/3] 安全性データベースと照合中...");
            let score = scoring::score(&safety_table, &ingredients)?;
            let rows = scoring::assess(&safety_table, &ingredients);
            println!("✔ 照合完了\n");

            let scan_report = report::ScanReport::new(&image, score, rows);
            scan_report.print_breakdown();

            if let Some(output) = output {
                scan_report.save(&output)?;
                println!("\n✔ レポートを保存: {}", output.display());
            }

            println!("\n✅ スキャン完了");
        }

        Commands::Wizard { table: table_path, folder } => {
            let table_path = resolve_table_path(table_path, &config);
            let safety_table = SafetyTable::from_path(&table_path)?;
            let folder = folder.unwrap_or_else(|| PathBuf::from("."));

            wizard::run_wizard(&safety_table, &folder, cli.ocr_provider, &config, cli.verbose).await?;
        }

        Commands::Export { input, format, output, title } => {
            println!("📄 safescan - エクスポート\n");

            let scan_report = report::ScanReport::load(&input)?;
            let output_dir = output.unwrap_or_else(|| PathBuf::from("."));

            report::export_report(&scan_report, &format, &output_dir, &title)?;

            println!("\n✅ エクスポート完了");
        }

        Commands::Table { path } => {
            let table_path = resolve_table_path(path, &config);
            let safety_table = SafetyTable::from_path(&table_path)?;

            println!("📋 成分表情報:");
            println!("  パス: {}", table_path.display());
            println!("  件数: {}", safety_table.len());
            println!("  リスク内訳:");
            for (level, count) in safety_table.risk_counts() {
                if count > 0 {
                    println!("    {}: {}件", level.labeled(), count);
                }
            }
        }

        Commands::Config { set_table, set_ocr_command, set_lang, show } => {
            let mut config = config;

            if let Some(path) = set_table {
                config.set_table_path(path)?;
                println!("✔ 成分表パスを設定しました");
            }

            if let Some(command) = set_ocr_command {
                config.set_ocr_command(command)?;
                println!("✔ OCRコマンドを設定しました");
            }

            if let Some(lang) = set_lang {
                config.set_ocr_lang(lang)?;
                println!("✔ OCR言語を設定しました");
            }

            if show {
                let table_display = config
                    .table_path
                    .as_ref()
                    .map(|p| p.display().to_string())
                    .unwrap_or_else(|| "未設定 (cosmetics.csv)".into());
                println!("設定:");
                println!("  成分表: {}", table_display);
                println!("  OCRコマンド: {}", config.ocr_command);
                println!("  OCR言語: {}", config.ocr_lang);
                println!("  解析前ディレイ: {}ms", config.scan_delay_ms);
            }
        }

        Commands::Cache { clear, folder, info } => {
            let target = folder.unwrap_or_else(|| PathBuf::from("."));
            let cache_path = ocr::CacheFile::cache_path(&target);

            if info || !clear {
                // デフォルトまたは--info: 情報表示
                if cache_path.exists() {
                    let cache = ocr::CacheFile::load(&target);
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
                match ocr::CacheFile::clear(&target) {
                    Ok(true) => println!("✔ キャッシュを削除しました: {}", cache_path.display()),
                    Ok(false) => println!("キャッシュファイルが存在しません"),
                    Err(e) => println!("キャッシュ削除エラー: {}", e),
                }
            }
        }
    }

    Ok(())
}

/// 成分表パスの解決: --table → 設定値 → カレントのcosmetics.csv
fn resolve_table_path(flag: Option<PathBuf>, config: &Config) -> PathBuf {
    flag.or_else(|| config.table_path.clone())
        .unwrap_or_else(|| PathBuf::from("cosmetics.csv"))
}
