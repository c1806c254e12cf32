//! エラー型定義
//!
//! `SafeScanError` は本クレート全体で使用する統一エラー型。
//! `Result<T>` はそのエイリアス。

use thiserror::Error;

/// SafeScan 全体で使用するエラー型
#[derive(Error, Debug)]
pub enum SafeScanError {
    #[error("設定エラー: {0}")]
    Config(String),

    #[error("ファイルが見つかりません: {0}")]
    FileNotFound(String),

    #[error("フォルダが見つかりません: {0}")]
    FolderNotFound(String),

    #[error("画像読み込みエラー: {0}")]
    ImageLoad(String),

    #[error("OCR実行エラー: {0}")]
    OcrExecution(String),

    #[error("成分表が不正です: {0}")]
    InvalidTable(String),

    #[error("画像から成分が読み取れませんでした。別の画像を試してください")]
    NoIngredients,

    #[error("画面遷移が不正です: {0}")]
    InvalidTransition(String),

    #[error("入力エラー: {0}")]
    Prompt(String),

    #[error("Excel生成エラー: {0}")]
    ExcelGeneration(String),

    #[error("JSON解析エラー: {0}")]
    JsonParse(#[from] serde_json::Error),

    #[error("IOエラー: {0}")]
    Io(#[from] std::io::Error),
}

/// 本クレート共通の Result エイリアス
pub type Result<T> = std::result::Result<T, SafeScanError>;
