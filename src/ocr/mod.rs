//! OCR連携モジュール
//!
//! 成分ラベル画像からテキストを抽出する。実体は外部コラボレータで、
//! - tesseract: Tesseract CLIをサブプロセスとして起動
//! - mock: 画像と同名の.txtサイドカーを読む（実エンジンの代替）
//! 出力は信頼できない生テキストとして扱う（空・文字化けあり得る）。

pub mod cache;

pub use cache::CacheFile;

use crate::config::Config;
use crate::error::{Result, SafeScanError};
use crate::ocr_provider::OcrProvider;
use std::path::Path;
use std::process::Command;

/// 画像からテキストを抽出する
pub async fn extract_text(
    image: &Path,
    provider: OcrProvider,
    config: &Config,
    verbose: bool,
) -> Result<String> {
    if !image.exists() {
        return Err(SafeScanError::FileNotFound(image.display().to_string()));
    }

    let text = match provider {
        OcrProvider::Tesseract => {
            run_tesseract(image, &config.ocr_command, &config.ocr_lang)?
        }
        OcrProvider::Mock => read_sidecar(image)?,
    };

    if verbose {
        println!("  [OCR] 出力長: {} chars", text.len());
    }

    Ok(text)
}

/// キャッシュを併用してテキストを抽出する
///
/// 画像ファイルのSHA-256をキーに、同一画像の再OCRをスキップする。
pub async fn extract_text_with_cache(
    image: &Path,
    provider: OcrProvider,
    config: &Config,
    verbose: bool,
) -> Result<String> {
    let folder = image.parent().unwrap_or(Path::new("."));
    let mut cache_file = CacheFile::load(folder);

    let hash = cache::compute_file_hash(image)?;

    if let Some(text) = cache_file.get(&hash) {
        if verbose {
            println!("  [OCR] キャッシュヒット: {}", image.display());
        }
        return Ok(text.to_string());
    }

    let text = extract_text(image, provider, config, verbose).await?;

    let file_name = image
        .file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_default();
    let file_size = std::fs::metadata(image).map(|m| m.len()).unwrap_or(0);

    cache_file.insert(hash, file_name, file_size, text.clone());
    cache_file.save(folder)?;

    Ok(text)
}

fn run_tesseract(image: &Path, command: &str, lang: &str) -> Result<String> {
    let output = Command::new(command)
        .arg(image)
        .arg("stdout")
        .args(["-l", lang])
        .output()
        .map_err(|e| SafeScanError::OcrExecution(format!("{} 起動エラー: {}", command, e)))?;

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        return Err(SafeScanError::OcrExecution(format!(
            "{} failed (code {:?}): {}",
            command,
            output.status.code(),
            stderr.trim()
        )));
    }

    Ok(String::from_utf8_lossy(&output.stdout).to_string())
}

/// 画像と同名の.txtを読む（mockプロバイダ）
fn read_sidecar(image: &Path) -> Result<String> {
    let sidecar = image.with_extension("txt");
    if !sidecar.exists() {
        return Err(SafeScanError::FileNotFound(sidecar.display().to_string()));
    }
    Ok(std::fs::read_to_string(&sidecar)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn test_read_sidecar() {
        let dir = std::env::temp_dir().join("safescan-test-sidecar");
        fs::create_dir_all(&dir).unwrap();

        let image = dir.join("label.jpg");
        fs::write(&image, b"dummy").unwrap();
        fs::write(dir.join("label.txt"), "Water, Parfum").unwrap();

        let text = read_sidecar(&image).unwrap();
        assert_eq!(text, "Water, Parfum");

        fs::remove_dir_all(&dir).ok();
    }

    #[test]
    fn test_read_sidecar_missing() {
        let dir = std::env::temp_dir().join("safescan-test-no-sidecar");
        fs::create_dir_all(&dir).unwrap();

        let image = dir.join("label.jpg");
        fs::write(&image, b"dummy").unwrap();

        let result = read_sidecar(&image);
        assert!(matches!(result, Err(SafeScanError::FileNotFound(_))));

        fs::remove_dir_all(&dir).ok();
    }

    #[test]
    fn test_run_tesseract_missing_binary() {
        let result = run_tesseract(
            Path::new("label.jpg"),
            "safescan-no-such-binary",
            "eng",
        );
        assert!(matches!(result, Err(SafeScanError::OcrExecution(_))));
    }
}
