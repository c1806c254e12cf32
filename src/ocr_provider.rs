use clap::ValueEnum;

#[derive(Clone, Copy, Debug, ValueEnum)]
pub enum OcrProvider {
    /// Tesseract CLIを呼び出す
    Tesseract,
    /// 画像と同名の.txtファイルを読む（開発・テスト用）
    Mock,
}

impl OcrProvider {
    pub fn label(&self) -> &'static str {
        match self {
            OcrProvider::Tesseract => "tesseract",
            OcrProvider::Mock => "mock",
        }
    }
}
