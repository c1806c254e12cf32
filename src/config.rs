use crate::error::{Result, SafeScanError};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    pub table_path: Option<PathBuf>,
    pub ocr_command: String,
    pub ocr_lang: String,
    pub scan_delay_ms: u64,
}

impl Config {
    pub fn load() -> Result<Self> {
        let config_path = Self::config_path()?;

        if config_path.exists() {
            let content = std::fs::read_to_string(&config_path)?;
            let config: Config = serde_json::from_str(&content)?;
            Ok(config)
        } else {
            Ok(Self::default_config())
        }
    }

    pub fn save(&self) -> Result<()> {
        let config_path = Self::config_path()?;

        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(&config_path, content)?;
        Ok(())
    }

    pub fn config_path() -> Result<PathBuf> {
        let home = dirs::home_dir()
            .ok_or_else(|| SafeScanError::Config("ホームディレクトリが見つかりません".into()))?;
        Ok(home.join(".config").join("safescan").join("config.json"))
    }

    fn default_config() -> Self {
        Self {
            table_path: None,
            ocr_command: "tesseract".into(),
            ocr_lang: "eng".into(),
            scan_delay_ms: 2000,  // 解析前の演出用ディレイ
        }
    }

    pub fn set_table_path(&mut self, path: PathBuf) -> Result<()> {
        self.table_path = Some(path);
        self.save()
    }

    pub fn set_ocr_command(&mut self, command: String) -> Result<()> {
        self.ocr_command = command;
        self.save()
    }

    pub fn set_ocr_lang(&mut self, lang: String) -> Result<()> {
        self.ocr_lang = lang;
        self.save()
    }
}
