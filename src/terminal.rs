//! ターミナル用プレゼンター
//!
//! 進捗は indicatif のスピナー、結果と成功は標準出力、エラーは標準エラーに出す。
//! レポートは出力先の指定がなければカレントディレクトリに書き出す。

use dialoguer::Confirm;
use indicatif::{ProgressBar, ProgressStyle};
use qoffea_common::{Error, ErrorKind, ImageArtifact, Presenter, ReportFile, Result, ResultView};
use std::cell::RefCell;
use std::path::{Path, PathBuf};
use std::time::Duration;

pub struct TerminalPresenter {
    spinner: RefCell<Option<ProgressBar>>,
    output: Option<PathBuf>,
    force: bool,
}

impl TerminalPresenter {
    pub fn new(output: Option<PathBuf>, force: bool) -> Self {
        Self {
            spinner: RefCell::new(None),
            output,
            force,
        }
    }

    pub fn report_path(&self, file_name: &str) -> PathBuf {
        report_path(self.output.as_deref(), file_name)
    }
}

/// `output` を優先。ディレクトリならサーバー側のファイル名を付ける
pub fn report_path(output: Option<&Path>, file_name: &str) -> PathBuf {
    match output {
        Some(path) if path.is_dir() => path.join(file_name),
        Some(path) => path.to_path_buf(),
        None => PathBuf::from(file_name),
    }
}

/// `path` に書き込んでよいか判定する。ファイルが存在し `force` でないときだけ
/// `confirm` に問い合わせる
pub fn may_overwrite<F>(path: &Path, force: bool, confirm: F) -> Result<bool>
where
    F: FnOnce(&Path) -> Result<bool>,
{
    if force || !path.exists() {
        return Ok(true);
    }
    confirm(path)
}

fn ask_overwrite(path: &Path) -> Result<bool> {
    Confirm::new()
        .with_prompt(format!("{} sudah ada. Timpa?", path.display()))
        .default(false)
        .interact()
        .map_err(|e| Error::Presentation(e.to_string()))
}

impl Presenter for TerminalPresenter {
    fn show_loading(&self, message: &str) {
        let spinner = ProgressBar::new_spinner();
        spinner.set_style(
            ProgressStyle::with_template("{spinner} {msg}")
                .unwrap_or_else(|_| ProgressStyle::default_spinner()),
        );
        spinner.set_message(message.to_string());
        spinner.enable_steady_tick(Duration::from_millis(100));
        if let Some(previous) = self.spinner.replace(Some(spinner)) {
            previous.finish_and_clear();
        }
    }

    fn hide_loading(&self) {
        if let Some(spinner) = self.spinner.take() {
            spinner.finish_and_clear();
        }
    }

    fn show_preview(&self, image: &ImageArtifact) {
        println!("📷 {} ({} KB)", image.file_name, image.len() / 1024);
    }

    fn render_result(&self, view: &ResultView) {
        println!("\n☕ Hasil analisis ({})", view.analysis_id);
        println!("  Total Biji: {}", view.total_beans);
        println!("  Biji Baik:  {} ({})", view.good_beans, view.good_text);
        println!("  Biji Cacat: {} ({})", view.defect_beans, view.defect_text);
        if let Some(grade) = &view.grade {
            println!("  Grade:      {}", grade);
        }
        if let Some(url) = &view.annotated_image_url {
            println!("  Gambar:     {}", url);
        }
    }

    fn render_error(&self, kind: ErrorKind, message: &str) {
        self.hide_loading();
        tracing::debug!(?kind, "error shown");
        eprintln!("❌ Error: {}", message);
    }

    fn show_success(&self, message: &str) {
        println!("✔ {}", message);
    }

    fn save_report(&self, report: &ReportFile) -> Result<()> {
        let path = self.report_path(&report.file_name);
        // スピナーがプロンプトに重なるため
        self.hide_loading();
        if !may_overwrite(&path, self.force, ask_overwrite)? {
            return Err(Error::Presentation(format!(
                "{} tidak ditimpa",
                path.display()
            )));
        }
        std::fs::write(&path, &report.bytes)
            .map_err(|e| Error::Presentation(format!("{}: {}", path.display(), e)))?;
        println!("📄 {}", path.display());
        Ok(())
    }

    fn reset_view(&self) {
        self.hide_loading();
    }
}
