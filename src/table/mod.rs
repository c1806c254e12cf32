//! 成分安全性マスタモジュール
//!
//! 成分名・説明・リスクレベルの参照表をCSV/XLSXから読み込み、
//! 正規形キーで照合する。起動時に一度読み込み、以後は不変。

use crate::error::{Result, SafeScanError};
use crate::normalizer::canonicalize;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::Path;

/// 未収載成分に返す説明文
pub const NO_DATA_INFO: &str = "No data available";

/// リスクレベル
///
/// マスタの`Risk`列から読み込み時に一度だけパースする。
/// 表示用の絵文字プレフィックス（`🔴 High`等）は無視される。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RiskLevel {
    Low,
    Medium,
    Moderate,
    High,
    Unknown,
}

impl RiskLevel {
    /// スコア計算用の重み（未収載・不明は中リスク扱い）
    pub fn weight(&self) -> u32 {
        match self {
            RiskLevel::Low => 2,
            RiskLevel::Medium => 1,
            RiskLevel::Moderate => 1,
            RiskLevel::High => 0,
            RiskLevel::Unknown => 1,
        }
    }

    /// 表示用マーカー
    pub fn marker(&self) -> &'static str {
        match self {
            RiskLevel::Low => "🟢",
            RiskLevel::Medium => "🟡",
            RiskLevel::Moderate => "🟠",
            RiskLevel::High => "🔴",
            RiskLevel::Unknown => "⚪",
        }
    }

    /// マーカー付きの表示ラベル（例: `🔴 High`）
    pub fn labeled(&self) -> String {
        format!("{} {}", self.marker(), self)
    }

    /// マスタのリスクラベルをパースする
    ///
    /// 絵文字プレフィックスを許容するため、空白区切りの最後の語を
    /// 大文字小文字を無視して判定する。未知のラベルはUnknown。
    pub fn parse_label(label: &str) -> Self {
        let word = label.split_whitespace().last().unwrap_or("");
        match word.to_lowercase().as_str() {
            "low" => RiskLevel::Low,
            "medium" => RiskLevel::Medium,
            "moderate" => RiskLevel::Moderate,
            "high" => RiskLevel::High,
            _ => RiskLevel::Unknown,
        }
    }
}

impl std::fmt::Display for RiskLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RiskLevel::Low => write!(f, "Low"),
            RiskLevel::Medium => write!(f, "Medium"),
            RiskLevel::Moderate => write!(f, "Moderate"),
            RiskLevel::High => write!(f, "High"),
            RiskLevel::Unknown => write!(f, "Unknown"),
        }
    }
}

/// マスタの1行
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReferenceEntry {
    /// 成分名（マスタ表記のまま）
    pub name: String,
    /// 説明文
    pub info: String,
    /// リスクレベル
    pub risk: RiskLevel,
}

/// 成分安全性マスタ全体
#[derive(Debug, Clone, Default)]
pub struct SafetyTable {
    /// 全行（マスタの行順を保持）
    entries: Vec<ReferenceEntry>,
    /// 正規形成分名 → 最初に出現した行のインデックス
    index: HashMap<String, usize>,
}

impl SafetyTable {
    /// 拡張子に応じてCSV/XLSXを読み込む
    pub fn from_path(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(SafeScanError::FileNotFound(path.display().to_string()));
        }

        let ext = path
            .extension()
            .map(|e| e.to_string_lossy().to_lowercase())
            .unwrap_or_default();

        match ext.as_str() {
            "xlsx" | "xls" | "ods" => Self::from_spreadsheet(path),
            _ => Self::from_csv(path),
        }
    }

    /// CSVファイルから読み込み
    pub fn from_csv(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_csv_str(&content)
    }

    /// CSV文字列から読み込み
    pub fn from_csv_str(content: &str) -> Result<Self> {
        let mut lines = content.lines();

        let header = lines
            .next()
            .ok_or_else(|| SafeScanError::InvalidTable("空のファイルです".into()))?;
        let columns = ColumnMap::from_header(&parse_csv_line(header))?;

        let mut entries = Vec::new();
        for line in lines {
            if line.trim().is_empty() {
                continue;
            }
            let fields = parse_csv_line(line);
            if let Some(entry) = columns.entry_from_fields(&fields) {
                entries.push(entry);
            }
        }

        Ok(Self::from_entries(entries))
    }

    /// XLSX等のスプレッドシートから読み込み（先頭シートのみ）
    fn from_spreadsheet(path: &Path) -> Result<Self> {
        use calamine::{open_workbook_auto, Reader};

        let mut workbook = open_workbook_auto(path)
            .map_err(|e| SafeScanError::InvalidTable(format!("ブックを開けません: {}", e)))?;

        let range = workbook
            .worksheet_range_at(0)
            .ok_or_else(|| SafeScanError::InvalidTable("シートがありません".into()))?
            .map_err(|e| SafeScanError::InvalidTable(format!("シート読み込みエラー: {}", e)))?;

        let mut rows = range.rows();
        let header: Vec<String> = rows
            .next()
            .ok_or_else(|| SafeScanError::InvalidTable("空のシートです".into()))?
            .iter()
            .map(|cell| cell.to_string().trim().to_string())
            .collect();
        let columns = ColumnMap::from_header(&header)?;

        let mut entries = Vec::new();
        for row in rows {
            let fields: Vec<String> = row
                .iter()
                .map(|cell| cell.to_string().trim().to_string())
                .collect();
            if let Some(entry) = columns.entry_from_fields(&fields) {
                entries.push(entry);
            }
        }

        Ok(Self::from_entries(entries))
    }

    /// 行リストからマスタを構築（重複する正規形キーは先勝ち）
    pub fn from_entries(entries: Vec<ReferenceEntry>) -> Self {
        let mut index = HashMap::new();

        for (i, entry) in entries.iter().enumerate() {
            let key = canonicalize(&entry.name);
            if key.is_empty() {
                continue;
            }
            index.entry(key).or_insert(i);
        }

        Self { entries, index }
    }

    /// 成分を照合する
    ///
    /// 問い合わせ側・マスタ側とも正規形キーで比較する。
    /// 未収載なら (`No data available`, Unknown)。
    pub fn lookup(&self, ingredient: &str) -> (&str, RiskLevel) {
        let key = canonicalize(ingredient);
        if key.is_empty() {
            return (NO_DATA_INFO, RiskLevel::Unknown);
        }

        match self.index.get(&key) {
            Some(&i) => (self.entries[i].info.as_str(), self.entries[i].risk),
            None => (NO_DATA_INFO, RiskLevel::Unknown),
        }
    }

    /// 全行を取得
    pub fn entries(&self) -> &[ReferenceEntry] {
        &self.entries
    }

    /// 収載件数
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// リスクレベルごとの収載件数（表示順で返す）
    pub fn risk_counts(&self) -> Vec<(RiskLevel, usize)> {
        let levels = [
            RiskLevel::Low,
            RiskLevel::Medium,
            RiskLevel::Moderate,
            RiskLevel::High,
            RiskLevel::Unknown,
        ];

        levels
            .iter()
            .map(|&level| {
                let count = self.entries.iter().filter(|e| e.risk == level).count();
                (level, count)
            })
            .collect()
    }
}

/// ヘッダー行から各列の位置を解決する
struct ColumnMap {
    ingredient: usize,
    info: usize,
    risk: usize,
}

impl ColumnMap {
    fn from_header<S: AsRef<str>>(header: &[S]) -> Result<Self> {
        let find = |name: &str| {
            header
                .iter()
                .position(|h| h.as_ref().trim().eq_ignore_ascii_case(name))
        };

        let ingredient = find("Ingredient")
            .ok_or_else(|| SafeScanError::InvalidTable("Ingredient列がありません".into()))?;
        let info = find("Info")
            .ok_or_else(|| SafeScanError::InvalidTable("Info列がありません".into()))?;
        let risk = find("Risk")
            .ok_or_else(|| SafeScanError::InvalidTable("Risk列がありません".into()))?;

        Ok(Self { ingredient, info, risk })
    }

    /// 1行分のフィールドからエントリを構築する（成分名が空の行はスキップ）
    fn entry_from_fields<S: AsRef<str>>(&self, fields: &[S]) -> Option<ReferenceEntry> {
        let get = |i: usize| fields.get(i).map(|f| f.as_ref().trim()).unwrap_or("");

        let name = get(self.ingredient);
        if name.is_empty() {
            return None;
        }

        Some(ReferenceEntry {
            name: name.to_string(),
            info: get(self.info).to_string(),
            risk: RiskLevel::parse_label(get(self.risk)),
        })
    }
}

/// CSVの1行をフィールドに分割する（ダブルクォート対応）
fn parse_csv_line(line: &str) -> Vec<String> {
    let mut fields = Vec::new();
    let mut field = String::new();
    let mut in_quotes = false;

    for c in line.chars() {
        match c {
            '"' => in_quotes = !in_quotes,
            ',' if !in_quotes => {
                fields.push(std::mem::take(&mut field));
            }
            _ => field.push(c),
        }
    }
    fields.push(field);

    fields
}
