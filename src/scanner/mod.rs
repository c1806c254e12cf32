//! 画像検出モジュール
//!
//! ウィザードの画像選択用にフォルダ直下の画像を列挙し、
//! OCRにかける前に画像として読めるかを検証する。

use crate::error::{Result, SafeScanError};
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

#[derive(Debug, Clone)]
pub struct ImageInfo {
    pub path: PathBuf,
    pub file_name: String,
}

const IMAGE_EXTENSIONS: &[&str] = &["jpg", "jpeg", "png", "JPG", "JPEG", "PNG"];

pub fn scan_folder(folder: &Path) -> Result<Vec<ImageInfo>> {
    if !folder.exists() {
        return Err(SafeScanError::FolderNotFound(folder.display().to_string()));
    }

    let mut images = Vec::new();

    for entry in WalkDir::new(folder)
        .max_depth(1)  // 直下のみ（再帰しない）
        .into_iter()
        .filter_map(|e| e.ok())
    {
        let path = entry.path();

        if !path.is_file() {
            continue;
        }

        if let Some(ext) = path.extension() {
            let ext_str = ext.to_string_lossy();
            if IMAGE_EXTENSIONS.iter().any(|&e| e == ext_str) {
                let file_name = path
                    .file_name()
                    .map(|n| n.to_string_lossy().to_string())
                    .unwrap_or_default();

                images.push(ImageInfo {
                    path: path.to_path_buf(),
                    file_name,
                });
            }
        }
    }

    // ファイル名でソート
    images.sort_by(|a, b| a.file_name.cmp(&b.file_name));

    Ok(images)
}

/// 画像として読めるか検証し、(幅, 高さ) を返す
pub fn validate_image(path: &Path) -> Result<(u32, u32)> {
    if !path.exists() {
        return Err(SafeScanError::FileNotFound(path.display().to_string()));
    }

    image::image_dimensions(path)
        .map_err(|e| SafeScanError::ImageLoad(format!("{}: {}", path.display(), e)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs::{self, File};
    use std::io::Write;

    #[test]
    fn test_scan_folder_not_found() {
        let result = scan_folder(Path::new("/nonexistent/folder"));
        assert!(result.is_err());
    }

    #[test]
    fn test_scan_folder_filters_and_sorts() {
        let temp_dir = std::env::temp_dir().join("safescan-test-scan");
        fs::create_dir_all(&temp_dir).unwrap();

        File::create(temp_dir.join("b.jpg")).unwrap().write_all(b"dummy").unwrap();
        File::create(temp_dir.join("a.png")).unwrap().write_all(b"dummy").unwrap();
        File::create(temp_dir.join("notes.txt")).unwrap().write_all(b"text").unwrap();

        let result = scan_folder(&temp_dir).unwrap();
        assert_eq!(result.len(), 2);
        assert_eq!(result[0].file_name, "a.png");
        assert_eq!(result[1].file_name, "b.jpg");

        fs::remove_dir_all(&temp_dir).ok();
    }

    #[test]
    fn test_validate_image_rejects_non_image() {
        let temp_dir = std::env::temp_dir().join("safescan-test-validate");
        fs::create_dir_all(&temp_dir).unwrap();

        let path = temp_dir.join("fake.jpg");
        fs::write(&path, b"not an image").unwrap();

        let result = validate_image(&path);
        assert!(matches!(result, Err(SafeScanError::ImageLoad(_))));

        fs::remove_dir_all(&temp_dir).ok();
    }

    #[test]
    fn test_validate_image_missing_file() {
        let result = validate_image(Path::new("/nonexistent/label.jpg"));
        assert!(matches!(result, Err(SafeScanError::FileNotFound(_))));
    }
}
