//! エラーケーステスト
//!
//! 各種エラー条件でのエラーハンドリングを検証

use safescan_rust::error::SafeScanError;
use safescan_rust::scanner;
use std::path::Path;
use tempfile::tempdir;

/// 存在しないフォルダをスキャンした場合
#[test]
fn test_scan_nonexistent_folder() {
    let result = scanner::scan_folder(Path::new("/nonexistent/path/12345"));
    assert!(result.is_err());

    let err = result.unwrap_err();
    assert!(matches!(err, SafeScanError::FolderNotFound(_)));
}

/// 空のフォルダをスキャンした場合
#[test]
fn test_scan_empty_folder() {
    let dir = tempdir().expect("Failed to create temp dir");
    let result = scanner::scan_folder(dir.path());

    // 空フォルダはエラーではなく空のVecを返す
    assert!(result.is_ok());
    assert!(result.unwrap().is_empty());
}

/// 画像のないフォルダをスキャンした場合
#[test]
fn test_scan_folder_no_images() {
    let dir = tempdir().expect("Failed to create temp dir");

    std::fs::write(dir.path().join("notes.txt"), "hello").unwrap();
    std::fs::write(dir.path().join("report.json"), "{}").unwrap();

    let result = scanner::scan_folder(dir.path());
    assert!(result.is_ok());
    assert!(result.unwrap().is_empty());
}

/// SafeScanErrorのDisplay実装確認
#[test]
fn test_error_display() {
    let errors = vec![
        SafeScanError::Config("テスト設定エラー".to_string()),
        SafeScanError::FileNotFound("label.jpg".to_string()),
        SafeScanError::FolderNotFound("/path/to/folder".to_string()),
        SafeScanError::ImageLoad("壊れた画像".to_string()),
        SafeScanError::OcrExecution("tesseract失敗".to_string()),
        SafeScanError::InvalidTable("列が足りません".to_string()),
        SafeScanError::NoIngredients,
        SafeScanError::InvalidTransition("home → results".to_string()),
        SafeScanError::ExcelGeneration("保存失敗".to_string()),
    ];

    for err in errors {
        let display = format!("{}", err);
        assert!(!display.is_empty(), "エラーメッセージが空: {:?}", err);
    }
}

/// 成分ゼロ件エラーのメッセージ確認
#[test]
fn test_no_ingredients_message() {
    let err = SafeScanError::NoIngredients;
    let display = format!("{}", err);

    assert!(display.contains("成分"));
    assert!(display.contains("画像"));
}

/// エラーのDebug実装確認
#[test]
fn test_error_debug() {
    let err = SafeScanError::Config("テスト".to_string());
    let debug = format!("{:?}", err);

    assert!(debug.contains("Config"));
    assert!(debug.contains("テスト"));
}

/// IOエラーからの変換
#[test]
fn test_io_error_conversion() {
    let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
    let err: SafeScanError = io_err.into();

    assert!(matches!(err, SafeScanError::Io(_)));
    let display = format!("{}", err);
    assert!(display.contains("IO"));
}

/// JSONエラーからの変換
#[test]
fn test_json_error_conversion() {
    let json_err = serde_json::from_str::<serde_json::Value>("{ invalid }").unwrap_err();
    let err: SafeScanError = json_err.into();

    assert!(matches!(err, SafeScanError::JsonParse(_)));
}
