//! DOMプレゼンター: ワークフローの出力を Leptos のシグナルで描画

use leptos::prelude::*;
use qoffea_common::messages::PREVIEW_PLACEHOLDER;
use qoffea_common::{Error, ErrorKind, ImageArtifact, Presenter, ReportFile, Result, ResultView};
use web_sys::Url;

use crate::browser::{bytes_to_blob, describe_js, save_bytes};

/// ブロッキング通知（アプリ全体のエラー表示方法）
pub fn notify_error(message: &str) {
    gloo::dialogs::alert(&format!("Error: {}", message));
}

#[derive(Clone, Copy)]
pub struct DomPresenter {
    pub loading: RwSignal<Option<String>>,
    pub result: RwSignal<Option<ResultView>>,
    pub preview: RwSignal<String>,
}

impl DomPresenter {
    pub fn new() -> Self {
        Self {
            loading: RwSignal::new(None),
            result: RwSignal::new(None),
            preview: RwSignal::new(PREVIEW_PLACEHOLDER.to_string()),
        }
    }

    fn set_preview(&self, url: String) {
        let previous = self.preview.get_untracked();
        if previous.starts_with("blob:") {
            let _ = Url::revoke_object_url(&previous);
        }
        self.preview.set(url);
    }
}

impl Default for DomPresenter {
    fn default() -> Self {
        Self::new()
    }
}

impl Presenter for DomPresenter {
    fn show_loading(&self, message: &str) {
        self.loading.set(Some(message.to_string()));
    }

    fn hide_loading(&self) {
        self.loading.set(None);
    }

    fn show_preview(&self, image: &ImageArtifact) {
        let url = bytes_to_blob(&image.bytes, image.mime.as_str())
            .and_then(|blob| Url::create_object_url_with_blob(&blob));
        match url {
            Ok(url) => self.set_preview(url),
            Err(e) => gloo::console::error!("preview failed:", describe_js(&e)),
        }
    }

    fn render_result(&self, view: &ResultView) {
        self.result.set(Some(view.clone()));
    }

    fn render_error(&self, kind: ErrorKind, message: &str) {
        gloo::console::error!(format!("{:?}: {}", kind, message));
        notify_error(message);
    }

    fn show_success(&self, message: &str) {
        gloo::dialogs::alert(message);
    }

    fn save_report(&self, report: &ReportFile) -> Result<()> {
        save_bytes(&report.file_name, &report.bytes, "application/pdf")
            .map_err(|e| Error::Presentation(describe_js(&e)))
    }

    fn reset_view(&self) {
        self.result.set(None);
        self.loading.set(None);
        self.set_preview(PREVIEW_PLACEHOLDER.to_string());
    }
}
