//! 現在の解析状態
//!
//! 現在の画像と解析結果を1つずつ保持する。アップロードごとにチケットを発行し、
//! 最新のチケットだけが結果を書き戻せる。

use crate::error::{Error, Result};
use crate::types::{AnalysisResult, ImageArtifact};

/// アップロード1件の連番
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UploadTicket(u64);

impl UploadTicket {
    pub fn sequence(&self) -> u64 {
        self.0
    }
}

#[derive(Debug, Default)]
pub struct Session {
    image: Option<ImageArtifact>,
    current: Option<AnalysisResult>,
    next_sequence: u64,
    outstanding: Option<u64>,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn current_image(&self) -> Option<&ImageArtifact> {
        self.image.as_ref()
    }

    pub fn current_result(&self) -> Option<&AnalysisResult> {
        self.current.as_ref()
    }

    pub fn analysis_id(&self) -> Option<&str> {
        self.current.as_ref().map(|r| r.analysis_id.as_str())
    }

    pub fn is_uploading(&self) -> bool {
        self.outstanding.is_some()
    }

    /// `image` を現在の画像にし、以前のものをすべて無効にするチケットを発行
    pub fn begin_upload(&mut self, image: ImageArtifact) -> UploadTicket {
        self.next_sequence += 1;
        self.outstanding = Some(self.next_sequence);
        self.image = Some(image);
        UploadTicket(self.next_sequence)
    }

    /// アップロード結果を反映する。
    ///
    /// 古いチケットの結果は `Error::Superseded` として捨てる。
    /// 失敗時は現在の解析を変更しない。
    pub fn finish_upload(
        &mut self,
        ticket: UploadTicket,
        outcome: Result<AnalysisResult>,
    ) -> Result<AnalysisResult> {
        if self.outstanding != Some(ticket.0) {
            tracing::debug!(ticket = ticket.0, "stale upload response dropped");
            return Err(Error::Superseded);
        }
        self.outstanding = None;
        let result = outcome?;
        self.current = Some(result.clone());
        Ok(result)
    }

    pub fn reset(&mut self) {
        self.image = None;
        self.current = None;
        self.outstanding = None;
    }
}
