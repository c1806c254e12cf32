use crate::ocr_provider::OcrProvider;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "safescan")]
#[command(about = "化粧品成分ラベルOCR・安全性スコア判定ツール", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// 詳細ログを出力
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// OCRエンジン (tesseract/mock)
    #[arg(long, default_value = "tesseract", global = true)]
    pub ocr_provider: OcrProvider,
}

#[derive(Subcommand)]
pub enum Commands {
    /// 成分ラベル画像をスキャンしてスコアを表示
    Scan {
        /// 成分ラベル画像のパス
        #[arg(required = true)]
        image: PathBuf,

        /// 成分表ファイル (CSV/XLSX)
        #[arg(short, long)]
        table: Option<PathBuf>,

        /// レポートJSONの出力先
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// OCRキャッシュを使用（再OCRをスキップ）
        #[arg(long)]
        use_cache: bool,
    },

    /// 対話式ウィザードでスキャン
    Wizard {
        /// 成分表ファイル (CSV/XLSX)
        #[arg(short, long)]
        table: Option<PathBuf>,

        /// 画像を探すフォルダ（省略時はカレント）
        #[arg(short, long)]
        folder: Option<PathBuf>,
    },

    /// 保存済みレポートからExcel/CSVを生成
    Export {
        /// 入力レポートJSON
        #[arg(required = true)]
        input: PathBuf,

        /// 出力形式 (excel/csv/both)
        #[arg(short, long, default_value = "both")]
        format: ExportFormat,

        /// 出力ファイル/ディレクトリ
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// ドキュメントタイトル
        #[arg(short, long, default_value = "成分スキャン結果")]
        title: String,
    },

    /// 成分表の内容を確認
    Table {
        /// 成分表ファイル（省略時は設定値）
        path: Option<PathBuf>,
    },

    /// 設定を表示/編集
    Config {
        /// 既定の成分表パスを設定
        #[arg(long)]
        set_table: Option<PathBuf>,

        /// OCRコマンドを設定
        #[arg(long)]
        set_ocr_command: Option<String>,

        /// OCR言語を設定
        #[arg(long)]
        set_lang: Option<String>,

        /// 設定を表示
        #[arg(long)]
        show: bool,
    },

    /// OCRキャッシュ管理
    Cache {
        /// キャッシュを削除
        #[arg(long)]
        clear: bool,

        /// 対象フォルダ（省略時はカレント）
        #[arg(short, long)]
        folder: Option<PathBuf>,

        /// キャッシュ情報を表示
        #[arg(long)]
        info: bool,
    },
}

#[derive(Clone, Debug, Default)]
pub enum ExportFormat {
    Excel,
    Csv,
    #[default]
    Both,
}

impl std::str::FromStr for ExportFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "excel" | "xlsx" => Ok(ExportFormat::Excel),
            "csv" => Ok(ExportFormat::Csv),
            "both" => Ok(ExportFormat::Both),
            _ => Err(format!("Unknown format: {}. Use excel, csv, or both", s)),
        }
    }
}

impl std::fmt::Display for ExportFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ExportFormat::Excel => write!(f, "excel"),
            ExportFormat::Csv => write!(f, "csv"),
            ExportFormat::Both => write!(f, "both"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_export_format_from_str() {
        assert!(matches!("excel".parse(), Ok(ExportFormat::Excel)));
        assert!(matches!("XLSX".parse(), Ok(ExportFormat::Excel)));
        assert!(matches!("csv".parse(), Ok(ExportFormat::Csv)));
        assert!(matches!("both".parse(), Ok(ExportFormat::Both)));
        assert!("pdf".parse::<ExportFormat>().is_err());
    }
}
