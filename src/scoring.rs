//! 安全性スコア算出モジュール
//!
//! 抽出した成分ごとにマスタを照合し、リスク重みの平均から
//! 0〜10の総合スコアを算出する。

use crate::error::{Result, SafeScanError};
use crate::table::{RiskLevel, SafetyTable};
use serde::{Deserialize, Serialize};

/// 成分1件の照合結果
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IngredientAssessment {
    /// 抽出された成分名（OCR表記のまま）
    pub ingredient: String,
    /// マスタの説明文（未収載なら `No data available`）
    pub info: String,
    /// リスクレベル
    pub risk: RiskLevel,
}

/// 全成分をマスタと照合する
///
/// 未収載の成分も落とさず (No data available, Unknown) として含める。
pub fn assess(table: &SafetyTable, ingredients: &[String]) -> Vec<IngredientAssessment> {
    ingredients
        .iter()
        .map(|ingredient| {
            let (info, risk) = table.lookup(ingredient);
            IngredientAssessment {
                ingredient: ingredient.clone(),
                info: info.to_string(),
                risk,
            }
        })
        .collect()
}

/// 総合安全性スコアを算出する
///
/// score = round(Σ重み / (2 × 成分数) × 10, 小数1桁)。
/// 成分リストが空の場合はゼロ除算になるため明示的にエラーを返す。
pub fn score(table: &SafetyTable, ingredients: &[String]) -> Result<f64> {
    if ingredients.is_empty() {
        return Err(SafeScanError::NoIngredients);
    }

    let total: u32 = ingredients
        .iter()
        .map(|ingredient| table.lookup(ingredient).1.weight())
        .sum();

    Ok(round1(total as f64 / (2.0 * ingredients.len() as f64) * 10.0))
}

/// 照合済みリストからスコアを算出する（保存済みレポートの再計算用）
pub fn score_assessments(rows: &[IngredientAssessment]) -> Result<f64> {
    if rows.is_empty() {
        return Err(SafeScanError::NoIngredients);
    }

    let total: u32 = rows.iter().map(|row| row.risk.weight()).sum();
    Ok(round1(total as f64 / (2.0 * rows.len() as f64) * 10.0))
}

/// 小数1桁に丸める
fn round1(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}
