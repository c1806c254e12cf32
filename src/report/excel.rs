//! Excel生成モジュール
//!
//! スコアと成分内訳を1シートのExcelに書き出す。

use crate::error::{Result, SafeScanError};
use crate::report::ScanReport;
use rust_xlsxwriter::{Color, Format, FormatAlign, FormatBorder, Workbook};
use std::path::Path;

pub fn generate_excel(report: &ScanReport, output_path: &Path, title: &str) -> Result<()> {
    let mut workbook = Workbook::new();
    let worksheet = workbook.add_worksheet();

    // フォーマット定義
    let title_format = Format::new().set_bold().set_font_size(14.0);

    let score_format = Format::new()
        .set_bold()
        .set_font_size(12.0)
        .set_num_format("0.0");

    let header_format = Format::new()
        .set_bold()
        .set_font_size(9.0)
        .set_font_color(Color::RGB(0x555555))
        .set_background_color(Color::RGB(0xF5F5F5))
        .set_align(FormatAlign::Center)
        .set_border(FormatBorder::Hair)
        .set_border_color(Color::RGB(0xAAAAAA));

    let value_format = Format::new()
        .set_font_size(11.0)
        .set_align(FormatAlign::Left)
        .set_text_wrap()
        .set_border(FormatBorder::Hair)
        .set_border_color(Color::RGB(0xCCCCCC));

    // 列幅設定
    worksheet
        .set_column_width(0, 28)
        .map_err(|e| SafeScanError::ExcelGeneration(format!("列幅設定エラー: {}", e)))?;
    worksheet
        .set_column_width(1, 48)
        .map_err(|e| SafeScanError::ExcelGeneration(format!("列幅設定エラー: {}", e)))?;
    worksheet
        .set_column_width(2, 14)
        .map_err(|e| SafeScanError::ExcelGeneration(format!("列幅設定エラー: {}", e)))?;

    // タイトルとスコア
    worksheet
        .write_string_with_format(0, 0, title, &title_format)
        .map_err(|e| SafeScanError::ExcelGeneration(format!("タイトル書き込みエラー: {}", e)))?;
    worksheet
        .write_string(1, 0, &format!("画像: {}", report.image))
        .map_err(|e| SafeScanError::ExcelGeneration(format!("書き込みエラー: {}", e)))?;
    worksheet
        .write_string(2, 0, &format!("スキャン日時: {}", report.scanned_at))
        .map_err(|e| SafeScanError::ExcelGeneration(format!("書き込みエラー: {}", e)))?;
    worksheet
        .write_string(3, 0, "総合安全性スコア (0-10)")
        .map_err(|e| SafeScanError::ExcelGeneration(format!("書き込みエラー: {}", e)))?;
    worksheet
        .write_number_with_format(3, 1, report.score, &score_format)
        .map_err(|e| SafeScanError::ExcelGeneration(format!("スコア書き込みエラー: {}", e)))?;

    // ヘッダー行
    let header_row = 5;
    for (col, label) in ["成分", "説明", "リスク"].iter().enumerate() {
        worksheet
            .write_string_with_format(header_row, col as u16, *label, &header_format)
            .map_err(|e| SafeScanError::ExcelGeneration(format!("ヘッダー書き込みエラー: {}", e)))?;
    }

    // 成分内訳
    for (i, row) in report.rows.iter().enumerate() {
        let r = header_row + 1 + i as u32;
        worksheet
            .write_string_with_format(r, 0, &row.ingredient, &value_format)
            .map_err(|e| SafeScanError::ExcelGeneration(format!("成分書き込みエラー: {}", e)))?;
        worksheet
            .write_string_with_format(r, 1, &row.info, &value_format)
            .map_err(|e| SafeScanError::ExcelGeneration(format!("説明書き込みエラー: {}", e)))?;
        worksheet
            .write_string_with_format(r, 2, &row.risk.labeled(), &value_format)
            .map_err(|e| SafeScanError::ExcelGeneration(format!("リスク書き込みエラー: {}", e)))?;
    }

    workbook
        .save(output_path)
        .map_err(|e| SafeScanError::ExcelGeneration(format!("Excel保存エラー: {}", e)))?;

    Ok(())
}
