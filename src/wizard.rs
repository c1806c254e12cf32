//! 対話式スキャンウィザードモジュール
//!
//! home → upload → loading → done → results の直線的なウィザードを
//! 端末上で進行させる。状態管理は session モジュールに委譲し、
//! ここでは各画面の表示とユーザー入力だけを扱う。

use crate::config::Config;
use crate::error::{Result, SafeScanError};
use crate::ocr;
use crate::ocr_provider::OcrProvider;
use crate::report::ScanReport;
use crate::scanner;
use crate::scoring;
use crate::segmenter;
use crate::session::{ScanSession, WizardStep};
use crate::table::SafetyTable;
use dialoguer::{Confirm, Select};
use indicatif::ProgressBar;
use std::path::Path;
use std::time::Duration;

/// ウィザードを実行する
///
/// ユーザーが「終了」を選ぶまでループする。解析失敗はセッションを
/// homeへ戻すだけで、ウィザード自体は終了しない。
pub async fn run_wizard(
    table: &SafetyTable,
    folder: &Path,
    provider: OcrProvider,
    config: &Config,
    verbose: bool,
) -> Result<()> {
    let mut session = ScanSession::new();

    loop {
        match session.step() {
            WizardStep::Home => {
                print_home();
                let choice = prompt_select("操作を選択", &["画像をアップロード", "終了"])?;
                if choice == 0 {
                    session.start_upload()?;
                } else {
                    break;
                }
            }

            WizardStep::Upload => {
                run_upload_step(&mut session, folder)?;
            }

            WizardStep::Loading => {
                run_loading_step(&mut session, table, provider, config, verbose).await?;
            }

            WizardStep::Done => {
                println!("✔ 解析が完了しました\n");
                let proceed = Confirm::new()
                    .with_prompt("結果を表示しますか？")
                    .default(true)
                    .interact()
                    .map_err(|e| SafeScanError::Prompt(e.to_string()))?;
                if proceed {
                    session.show_results()?;
                }
            }

            WizardStep::Results => {
                if let Some(report) = session.report() {
                    report.print_breakdown();
                }
                println!();
                let choice = prompt_select("操作を選択", &["ホームに戻る", "終了"])?;
                if choice == 0 {
                    session.reset();
                } else {
                    break;
                }
            }
        }
    }

    Ok(())
}

fn print_home() {
    println!("\n🧴 SAFESCAN : 製品安全性スキャナー\n");
    println!("化粧品の成分ラベルを読み取り、有害成分をチェックして");
    println!("0〜10の安全性スコアを算出します。\n");
    println!("使い方:");
    println!("  1. 成分ラベルの写真を選択");
    println!("  2. OCRがテキストを抽出");
    println!("  3. 成分を安全性データベースと照合");
    println!("  4. スコアを算出し、要注意成分を解説");
    println!();
}

/// upload画面: フォルダ内の画像から1枚選んで確認する
fn run_upload_step(session: &mut ScanSession, folder: &Path) -> Result<()> {
    let images = scanner::scan_folder(folder)?;

    if images.is_empty() {
        println!("⚠ {} に画像がありません (jpg/jpeg/png)\n", folder.display());
        session.reset();
        return Ok(());
    }

    let mut items: Vec<String> = images.iter().map(|img| img.file_name.clone()).collect();
    items.push("← 戻る".to_string());

    let choice = prompt_select("成分ラベルの画像を選択", &items)?;
    if choice == items.len() - 1 {
        session.reset();
        return Ok(());
    }

    let selected = &images[choice];
    let (width, height) = match scanner::validate_image(&selected.path) {
        Ok(dims) => dims,
        Err(e) => {
            println!("⚠ {}\n", e);
            return Ok(());  // upload画面のまま再選択
        }
    };

    println!("  {} ({}x{})", selected.file_name, width, height);

    let confirmed = Confirm::new()
        .with_prompt("この画像で解析を開始しますか？")
        .default(true)
        .interact()
        .map_err(|e| SafeScanError::Prompt(e.to_string()))?;

    if confirmed {
        session.attach_image(selected.path.clone())?;
        session.begin_analysis()?;
    }

    Ok(())
}

/// loading画面: 固定ディレイの後にOCR→分割→照合→スコア算出を行う
async fn run_loading_step(
    session: &mut ScanSession,
    table: &SafetyTable,
    provider: OcrProvider,
    config: &Config,
    verbose: bool,
) -> Result<()> {
    let image = session
        .image()
        .ok_or_else(|| SafeScanError::InvalidTransition("loading に画像がありません".into()))?
        .to_path_buf();

    println!("\n🔍 画像を解析中...");
    let spinner = ProgressBar::new_spinner();
    spinner.set_message("OCRとデータ照合を実行中...");
    spinner.enable_steady_tick(Duration::from_millis(100));

    // 演出用の固定ディレイ（タイムアウトやリトライではない）
    tokio::time::sleep(Duration::from_millis(config.scan_delay_ms)).await;

    let outcome = analyze(&image, table, provider, config, verbose).await;
    spinner.finish_and_clear();

    match outcome {
        Ok((ingredients, report)) => {
            session.complete_analysis(ingredients, report)?;
        }
        Err(e) => {
            println!("⚠ 解析に失敗しました: {}\n", e);
            session.reset();
        }
    }

    Ok(())
}

async fn analyze(
    image: &Path,
    table: &SafetyTable,
    provider: OcrProvider,
    config: &Config,
    verbose: bool,
) -> Result<(Vec<String>, ScanReport)> {
    let text = ocr::extract_text(image, provider, config, verbose).await?;

    let ingredients = segmenter::segment(&text);
    if ingredients.is_empty() {
        return Err(SafeScanError::NoIngredients);
    }

    let score = scoring::score(table, &ingredients)?;
    let rows = scoring::assess(table, &ingredients);
    let report = ScanReport::new(image, score, rows);

    Ok((ingredients, report))
}

fn prompt_select<T: ToString>(prompt: &str, items: &[T]) -> Result<usize> {
    Select::new()
        .with_prompt(prompt)
        .items(items)
        .default(0)
        .interact()
        .map_err(|e| SafeScanError::Prompt(e.to_string()))
}
