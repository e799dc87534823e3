//! アップロード → 表示フロー
//!
//! `Workflow` がセッションを持ち、解析クライアントとプレゼンターをつなぐ。
//! セッションの借用は await をまたがない。

use std::cell::{Ref, RefCell};

use crate::api::{AnalysisClient, Transport};
use crate::error::{Error, Result};
use crate::messages;
use crate::presenter::{Presenter, ResultView};
use crate::session::Session;
use crate::types::{AnalysisResult, ImageArtifact, SourceTag};

pub struct Workflow<T, P> {
    client: AnalysisClient<T>,
    presenter: P,
    session: RefCell<Session>,
}

impl<T: Transport, P: Presenter> Workflow<T, P> {
    pub fn new(client: AnalysisClient<T>, presenter: P) -> Self {
        Self {
            client,
            presenter,
            session: RefCell::new(Session::new()),
        }
    }

    pub fn client(&self) -> &AnalysisClient<T> {
        &self.client
    }

    pub fn presenter(&self) -> &P {
        &self.presenter
    }

    pub fn session(&self) -> Ref<'_, Session> {
        self.session.borrow()
    }

    /// アップロード・レポート以外（検証、カメラ、撮影）で起きたエラーを表示
    pub fn report_error(&self, error: &Error) {
        self.presenter.render_error(error.kind(), &error.to_string());
    }

    /// `image` をアップロードして結果を表示する。
    ///
    /// 処理中に新しいアップロードかリセットがあった場合は、
    /// 画面に触れず `Error::Superseded` を返す。
    pub async fn submit(&self, image: ImageArtifact, source: SourceTag) -> Result<AnalysisResult> {
        self.presenter.show_preview(&image);
        let ticket = self.session.borrow_mut().begin_upload(image.clone());
        self.presenter.show_loading(messages::ANALYZING);

        let outcome = self.client.upload(&image, source).await;
        let finished = self.session.borrow_mut().finish_upload(ticket, outcome);

        match finished {
            Ok(result) => {
                tracing::debug!(analysis_id = %result.analysis_id, "analysis accepted");
                self.presenter.hide_loading();
                self.presenter
                    .render_result(&ResultView::new(&result, self.client.config()));
                Ok(result)
            }
            Err(Error::Superseded) => Err(Error::Superseded),
            Err(error) => {
                self.presenter.hide_loading();
                self.presenter.render_error(
                    error.kind(),
                    &format!("{}{}", messages::ANALYSIS_FAILED_PREFIX, error),
                );
                Err(error)
            }
        }
    }

    /// 現在の解析のレポートをダウンロードして保存
    pub async fn download_report(&self) -> Result<()> {
        let analysis_id = self.session.borrow().analysis_id().map(str::to_string);
        let Some(analysis_id) = analysis_id else {
            let error = Error::NoAnalysis;
            self.report_error(&error);
            return Err(error);
        };
        self.fetch_report(&analysis_id).await
    }

    /// 指定した解析IDのレポートをダウンロードして保存。
    /// セッションは参照も変更もしない
    pub async fn fetch_report(&self, analysis_id: &str) -> Result<()> {
        self.presenter.show_loading(messages::GENERATING_PDF);
        let outcome = match self.client.download_report(analysis_id).await {
            Ok(report) => self.presenter.save_report(&report),
            Err(error) => Err(error),
        };
        self.restore_loading();

        match outcome {
            Ok(()) => {
                self.presenter.show_success(messages::PDF_DOWNLOADED);
                Ok(())
            }
            Err(error) => {
                self.presenter.render_error(
                    error.kind(),
                    &format!("{}{}", messages::PDF_DOWNLOAD_FAILED_PREFIX, error),
                );
                Err(error)
            }
        }
    }

    /// レポートのローディング表示を終える。
    /// アップロード中ならその表示に戻す
    fn restore_loading(&self) {
        if self.session.borrow().is_uploading() {
            self.presenter.show_loading(messages::ANALYZING);
        } else {
            self.presenter.hide_loading();
        }
    }

    pub fn reset(&self) {
        self.session.borrow_mut().reset();
        self.presenter.reset_view();
    }
}
