//! スキャンレポートモジュール
//!
//! スコアと成分内訳をまとめたレポートの保存・表示・エクスポートを行う。

pub mod excel;

use crate::cli::ExportFormat;
use crate::error::{Result, SafeScanError};
use crate::scoring::IngredientAssessment;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

/// 1回のスキャン結果
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScanReport {
    /// スキャン日時
    pub scanned_at: String,
    /// 解析した画像のパス
    pub image: String,
    /// 総合安全性スコア（0〜10）
    pub score: f64,
    /// 成分内訳（抽出順）
    pub rows: Vec<IngredientAssessment>,
}

impl ScanReport {
    pub fn new(image: &Path, score: f64, rows: Vec<IngredientAssessment>) -> Self {
        Self {
            scanned_at: chrono::Local::now().format("%Y-%m-%d %H:%M:%S").to_string(),
            image: image.display().to_string(),
            score,
            rows,
        }
    }

    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(SafeScanError::FileNotFound(path.display().to_string()));
        }
        let content = std::fs::read_to_string(path)?;
        let report: ScanReport = serde_json::from_str(&content)?;
        Ok(report)
    }

    pub fn save(&self, path: &Path) -> Result<()> {
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path, json)?;
        Ok(())
    }

    /// スコアと成分内訳を端末に表示する
    pub fn print_breakdown(&self) {
        println!("📊 総合安全性スコア: {:.1}/10\n", self.score);

        let name_width = self
            .rows
            .iter()
            .map(|r| r.ingredient.chars().count())
            .chain(std::iter::once("成分".chars().count()))
            .max()
            .unwrap_or(4);

        println!("  {:<name_width$}  {:<12}  {}", "成分", "リスク", "説明");
        println!("  {}", "-".repeat(name_width + 40));

        for row in &self.rows {
            println!(
                "  {:<name_width$}  {:<12}  {}",
                row.ingredient,
                row.risk.labeled(),
                row.info
            );
        }
    }
}

fn output_path_for_format(output: &Path, title: &str, extension: &str) -> PathBuf {
    if output.is_dir() || output.extension().is_none() {
        output.join(format!("{}.{}", title, extension))
    } else {
        output.to_path_buf()
    }
}

fn output_paths_for_both(output: &Path, title: &str) -> (PathBuf, PathBuf) {
    if output.is_dir() || output.extension().is_none() {
        let excel_path = output.join(format!("{}.xlsx", title));
        let csv_path = output.join(format!("{}.csv", title));
        (excel_path, csv_path)
    } else {
        let parent = output.parent().unwrap_or_else(|| Path::new("."));
        let stem = output
            .file_stem()
            .and_then(|s| s.to_str())
            .unwrap_or(title);
        let excel_path = parent.join(format!("{}.xlsx", stem));
        let csv_path = parent.join(format!("{}.csv", stem));
        (excel_path, csv_path)
    }
}

/// レポートを指定形式でエクスポートする
pub fn export_report(
    report: &ScanReport,
    format: &ExportFormat,
    output: &Path,
    title: &str,
) -> Result<()> {
    match format {
        ExportFormat::Excel => {
            let output_path = output_path_for_format(output, title, "xlsx");
            println!("- Excelを生成中...");
            excel::generate_excel(report, &output_path, title)?;
            println!("✔ Excel出力: {}", output_path.display());
        }
        ExportFormat::Csv => {
            let output_path = output_path_for_format(output, title, "csv");
            println!("- CSVを生成中...");
            write_csv(report, &output_path)?;
            println!("✔ CSV出力: {}", output_path.display());
        }
        ExportFormat::Both => {
            let (excel_path, csv_path) = output_paths_for_both(output, title);

            println!("- Excelを生成中...");
            excel::generate_excel(report, &excel_path, title)?;
            println!("✔ Excel出力: {}", excel_path.display());

            println!("- CSVを生成中...");
            write_csv(report, &csv_path)?;
            println!("✔ CSV出力: {}", csv_path.display());
        }
    }

    Ok(())
}

/// 成分内訳をCSVに書き出す（UI契約と同じ3列）
fn write_csv(report: &ScanReport, path: &Path) -> Result<()> {
    let mut out = String::from("Ingredient,Info,Risk\n");

    for row in &report.rows {
        out.push_str(&format!(
            "{},{},{}\n",
            csv_field(&row.ingredient),
            csv_field(&row.info),
            csv_field(&row.risk.labeled())
        ));
    }

    std::fs::write(path, out)?;
    Ok(())
}

fn csv_field(value: &str) -> String {
    if value.contains(',') || value.contains('"') || value.contains('\n') {
        format!("\"{}\"", value.replace('"', "\"\""))
    } else {
        value.to_string()
    }
}
