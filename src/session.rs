//! スキャンセッションの状態機械モジュール
//!
//! ウィザードの進行状態（home → upload → loading → done → results）を
//! 型付きで管理する。遷移はユーザー操作または同期的な処理完了のみで進み、
//! 解析失敗時はhomeへ戻ってセッション内容を破棄する。

use crate::error::{Result, SafeScanError};
use crate::report::ScanReport;
use std::path::{Path, PathBuf};

/// ウィザードの画面
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum WizardStep {
    /// 初期画面（説明表示）
    #[default]
    Home,
    /// 画像選択
    Upload,
    /// OCR・照合・スコア算出
    Loading,
    /// 解析完了の確認
    Done,
    /// スコアと成分内訳の表示
    Results,
}

impl std::fmt::Display for WizardStep {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            WizardStep::Home => write!(f, "home"),
            WizardStep::Upload => write!(f, "upload"),
            WizardStep::Loading => write!(f, "loading"),
            WizardStep::Done => write!(f, "done"),
            WizardStep::Results => write!(f, "results"),
        }
    }
}

/// 1回のスキャンのセッション状態
#[derive(Debug, Default)]
pub struct ScanSession {
    step: WizardStep,
    image: Option<PathBuf>,
    ingredients: Vec<String>,
    report: Option<ScanReport>,
}

impl ScanSession {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn step(&self) -> WizardStep {
        self.step
    }

    pub fn image(&self) -> Option<&Path> {
        self.image.as_deref()
    }

    pub fn ingredients(&self) -> &[String] {
        &self.ingredients
    }

    pub fn report(&self) -> Option<&ScanReport> {
        self.report.as_ref()
    }

    /// home → upload
    pub fn start_upload(&mut self) -> Result<()> {
        self.expect_step(WizardStep::Home, WizardStep::Upload)?;
        self.step = WizardStep::Upload;
        Ok(())
    }

    /// upload中に画像を設定する（画面は進まない）
    pub fn attach_image(&mut self, path: PathBuf) -> Result<()> {
        if self.step != WizardStep::Upload {
            return Err(SafeScanError::InvalidTransition(format!(
                "{} では画像を選択できません",
                self.step
            )));
        }
        self.image = Some(path);
        Ok(())
    }

    /// upload → loading（画像が選択済みであること）
    pub fn begin_analysis(&mut self) -> Result<()> {
        self.expect_step(WizardStep::Upload, WizardStep::Loading)?;
        if self.image.is_none() {
            return Err(SafeScanError::InvalidTransition(
                "画像が未選択のまま解析へは進めません".into(),
            ));
        }
        self.step = WizardStep::Loading;
        Ok(())
    }

    /// loading → done（解析成功）
    pub fn complete_analysis(
        &mut self,
        ingredients: Vec<String>,
        report: ScanReport,
    ) -> Result<()> {
        self.expect_step(WizardStep::Loading, WizardStep::Done)?;
        self.ingredients = ingredients;
        self.report = Some(report);
        self.step = WizardStep::Done;
        Ok(())
    }

    /// done → results
    pub fn show_results(&mut self) -> Result<()> {
        self.expect_step(WizardStep::Done, WizardStep::Results)?;
        self.step = WizardStep::Results;
        Ok(())
    }

    /// homeへ戻る。セッション内容は破棄する（解析失敗時もこれを使う）
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    fn expect_step(&self, expected: WizardStep, target: WizardStep) -> Result<()> {
        if self.step != expected {
            return Err(SafeScanError::InvalidTransition(format!(
                "{} → {}",
                self.step, target
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::report::ScanReport;

    fn dummy_report() -> ScanReport {
        ScanReport::new(Path::new("label.jpg"), 10.0, Vec::new())
    }

    #[test]
    fn test_full_wizard_flow() {
        let mut session = ScanSession::new();
        assert_eq!(session.step(), WizardStep::Home);

        session.start_upload().unwrap();
        session.attach_image(PathBuf::from("label.jpg")).unwrap();
        session.begin_analysis().unwrap();
        assert_eq!(session.step(), WizardStep::Loading);

        session
            .complete_analysis(vec!["Water".into()], dummy_report())
            .unwrap();
        assert_eq!(session.step(), WizardStep::Done);

        session.show_results().unwrap();
        assert_eq!(session.step(), WizardStep::Results);
        assert!(session.report().is_some());

        session.reset();
        assert_eq!(session.step(), WizardStep::Home);
        assert!(session.image().is_none());
        assert!(session.ingredients().is_empty());
        assert!(session.report().is_none());
    }

    #[test]
    fn test_analysis_requires_image() {
        let mut session = ScanSession::new();
        session.start_upload().unwrap();

        let result = session.begin_analysis();
        assert!(matches!(result, Err(SafeScanError::InvalidTransition(_))));
        assert_eq!(session.step(), WizardStep::Upload);
    }

    #[test]
    fn test_invalid_transitions_rejected() {
        let mut session = ScanSession::new();

        assert!(session.show_results().is_err());
        assert!(session.begin_analysis().is_err());
        assert!(session
            .complete_analysis(Vec::new(), dummy_report())
            .is_err());
        assert_eq!(session.step(), WizardStep::Home);
    }

    #[test]
    fn test_failure_reset_discards_state() {
        let mut session = ScanSession::new();
        session.start_upload().unwrap();
        session.attach_image(PathBuf::from("label.jpg")).unwrap();
        session.begin_analysis().unwrap();

        // 解析失敗 → homeへ戻り、画像も破棄される
        session.reset();
        assert_eq!(session.step(), WizardStep::Home);
        assert!(session.image().is_none());
    }
}
