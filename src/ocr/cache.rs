//! OCR結果キャッシュモジュール
//!
//! 画像ファイルのSHA-256ハッシュをキーにOCRテキストをキャッシュし、
//! 同じ画像の再OCRをスキップする。

use crate::error::Result;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::collections::HashMap;
use std::fs::File;
use std::io::{BufReader, BufWriter};
use std::path::{Path, PathBuf};

const CACHE_FILE_NAME: &str = ".ocr-cache.json";

/// キャッシュファイルの構造
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CacheFile {
    /// バージョン（互換性チェック用）
    version: u32,
    /// ファイルハッシュ → OCR結果のマップ
    entries: HashMap<String, CacheEntry>,
}

/// キャッシュエントリ
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CacheEntry {
    /// ファイル名
    pub file_name: String,
    /// ファイルサイズ
    pub file_size: u64,
    /// OCRで抽出した生テキスト
    pub text: String,
}

impl CacheFile {
    const CURRENT_VERSION: u32 = 1;

    /// キャッシュファイルのパス
    pub fn cache_path(folder: &Path) -> PathBuf {
        folder.join(CACHE_FILE_NAME)
    }

    /// キャッシュファイルを読み込み
    pub fn load(folder: &Path) -> Self {
        let cache_path = Self::cache_path(folder);
        if !cache_path.exists() {
            return Self::default();
        }

        let file = match File::open(&cache_path) {
            Ok(f) => f,
            Err(_) => return Self::default(),
        };

        let reader = BufReader::new(file);
        match serde_json::from_reader::<_, CacheFile>(reader) {
            Ok(cache) => {
                // バージョンチェック
                if cache.version != Self::CURRENT_VERSION {
                    eprintln!("キャッシュバージョン不一致、再生成します");
                    return Self::default();
                }
                cache
            }
            Err(_) => Self::default(),
        }
    }

    /// キャッシュファイルを保存
    pub fn save(&self, folder: &Path) -> Result<()> {
        let cache_path = Self::cache_path(folder);
        let file = File::create(cache_path)?;
        let writer = BufWriter::new(file);
        serde_json::to_writer_pretty(writer, self)?;
        Ok(())
    }

    /// キャッシュファイルを削除。存在した場合はtrueを返す
    pub fn clear(folder: &Path) -> Result<bool> {
        let cache_path = Self::cache_path(folder);
        if !cache_path.exists() {
            return Ok(false);
        }
        std::fs::remove_file(cache_path)?;
        Ok(true)
    }

    /// キャッシュをルックアップ
    pub fn get(&self, hash: &str) -> Option<&str> {
        self.entries.get(hash).map(|e| e.text.as_str())
    }

    /// キャッシュに追加
    pub fn insert(&mut self, hash: String, file_name: String, file_size: u64, text: String) {
        self.entries.insert(
            hash,
            CacheEntry {
                file_name,
                file_size,
                text,
            },
        );
    }

    /// キャッシュ件数
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Default for CacheFile {
    fn default() -> Self {
        Self {
            version: Self::CURRENT_VERSION,
            entries: HashMap::new(),
        }
    }
}

/// 画像ファイルのSHA-256ハッシュを計算する
pub fn compute_file_hash(path: &Path) -> Result<String> {
    let bytes = std::fs::read(path)?;
    let digest = Sha256::digest(&bytes);
    Ok(hex::encode(digest))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_compute_file_hash_is_stable() {
        let dir = std::env::temp_dir().join("safescan-test-hash");
        std::fs::create_dir_all(&dir).unwrap();

        let path = dir.join("label.jpg");
        std::fs::write(&path, b"same bytes").unwrap();

        let first = compute_file_hash(&path).unwrap();
        let second = compute_file_hash(&path).unwrap();
        assert_eq!(first, second);
        assert_eq!(first.len(), 64);

        std::fs::remove_dir_all(&dir).ok();
    }

    #[test]
    fn test_cache_insert_and_get() {
        let mut cache = CacheFile::default();
        assert!(cache.is_empty());

        cache.insert("abc".into(), "label.jpg".into(), 5, "Water, Parfum".into());
        assert_eq!(cache.len(), 1);
        assert_eq!(cache.get("abc"), Some("Water, Parfum"));
        assert_eq!(cache.get("missing"), None);
    }
}
