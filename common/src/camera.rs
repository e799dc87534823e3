//! カメラ撮影の状態機械
//!
//! `Idle → Requesting → Streaming → Captured`。`Error` へは `Requesting` からのみ遷移する。
//! プラットフォーム側（getUserMedia、canvasエンコード）は非同期で、
//! `stream_acquired` / `stream_failed` / `finish_capture` で結果を返す。
//! セッションを終える経路は `Drop` も含めすべて `release` を通る。

use std::fmt;

use serde::Serialize;

use crate::error::{Error, Result};
use crate::messages;
use crate::types::{ImageArtifact, ImageMime};

pub const IDEAL_WIDTH: u32 = 1280;
pub const IDEAL_HEIGHT: u32 = 720;
pub const JPEG_QUALITY: f64 = 0.9;
pub const CAPTURE_FILE_NAME: &str = "camera_capture.jpg";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum FacingMode {
    /// スマホの背面カメラ
    Environment,
    User,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Ideal {
    pub ideal: u32,
}

/// メディア制約の `video` 部分。ブラウザが期待する形でシリアライズする
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VideoConstraints {
    pub facing_mode: FacingMode,
    pub width: Ideal,
    pub height: Ideal,
}

impl Default for VideoConstraints {
    fn default() -> Self {
        Self {
            facing_mode: FacingMode::Environment,
            width: Ideal { ideal: IDEAL_WIDTH },
            height: Ideal { ideal: IDEAL_HEIGHT },
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CameraErrorKind {
    Unsupported,
    PermissionDenied,
    NotFound,
    Busy,
    Other,
}

impl CameraErrorKind {
    /// getUserMedia の DOMException 名を分類
    pub fn from_dom_name(name: &str) -> Self {
        match name {
            "NotAllowedError" | "PermissionDeniedError" => CameraErrorKind::PermissionDenied,
            "NotFoundError" | "DevicesNotFoundError" => CameraErrorKind::NotFound,
            "NotReadableError" | "TrackStartError" => CameraErrorKind::Busy,
            _ => CameraErrorKind::Other,
        }
    }
}

/// カメラを開けなかった理由
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CameraFailure {
    pub kind: CameraErrorKind,
    /// プラットフォームのメッセージ（`Other` のときのみ表示）
    pub detail: String,
}

impl CameraFailure {
    pub fn new(kind: CameraErrorKind, detail: impl Into<String>) -> Self {
        Self {
            kind,
            detail: detail.into(),
        }
    }

    pub fn from_dom(name: &str, message: &str) -> Self {
        Self::new(CameraErrorKind::from_dom_name(name), message)
    }

    pub fn message(&self) -> String {
        match self.kind {
            CameraErrorKind::Unsupported => messages::CAMERA_UNSUPPORTED.to_string(),
            CameraErrorKind::PermissionDenied => {
                format!("{}{}", messages::CAMERA_FAILED_PREFIX, messages::CAMERA_PERMISSION_DENIED)
            }
            CameraErrorKind::NotFound => {
                format!("{}{}", messages::CAMERA_FAILED_PREFIX, messages::CAMERA_NOT_FOUND)
            }
            CameraErrorKind::Busy => {
                format!("{}{}", messages::CAMERA_FAILED_PREFIX, messages::CAMERA_BUSY)
            }
            CameraErrorKind::Other => format!("{}{}", messages::CAMERA_FAILED_PREFIX, self.detail),
        }
    }
}

impl fmt::Display for CameraFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message())
    }
}

/// 取得済みのメディアストリーム。`release` は全トラックを停止し、
/// プレビュー要素との紐付けを外すこと
pub trait StreamHandle {
    fn release(&self);
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CaptureState {
    Idle,
    Requesting,
    Streaming,
    Captured,
    Error,
}

/// 撮影するビデオフレームの実サイズ
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FrameSize {
    pub width: u32,
    pub height: u32,
}

impl FrameSize {
    /// 0はまだフレームが出ていないことを示す
    pub fn new(width: u32, height: u32) -> Result<Self> {
        if width == 0 || height == 0 {
            return Err(Error::CameraNotReady);
        }
        Ok(Self { width, height })
    }
}

/// `open()` 1回分の識別子。プラットフォームのコールバックに持ち回し、
/// 以前のセッションが要求したストリームを現在のものと区別する
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CameraSession(u64);

impl CameraSession {
    pub fn generation(&self) -> u64 {
        self.0
    }
}

pub struct CaptureController<S: StreamHandle> {
    state: CaptureState,
    stream: Option<S>,
    failure: Option<CameraFailure>,
    generation: u64,
}

impl<S: StreamHandle> Default for CaptureController<S> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S: StreamHandle> CaptureController<S> {
    pub fn new() -> Self {
        Self {
            state: CaptureState::Idle,
            stream: None,
            failure: None,
            generation: 0,
        }
    }

    pub fn state(&self) -> CaptureState {
        self.state
    }

    pub fn stream(&self) -> Option<&S> {
        self.stream.as_ref()
    }

    pub fn failure(&self) -> Option<&CameraFailure> {
        self.failure.as_ref()
    }

    pub fn can_capture(&self) -> bool {
        self.state == CaptureState::Streaming
    }

    /// セッション開始。同時に存在できるのは1つだけ
    pub fn open(&mut self) -> Result<CameraSession> {
        if self.state != CaptureState::Idle {
            return Err(Error::CameraBusy);
        }
        self.generation += 1;
        self.state = CaptureState::Requesting;
        tracing::debug!(generation = self.generation, "camera requesting");
        Ok(CameraSession(self.generation))
    }

    /// `session` が現在のセッションで、ストリーム待ちかどうか
    fn awaits_stream(&self, session: CameraSession) -> bool {
        self.state == CaptureState::Requesting && session.0 == self.generation
    }

    /// `session` 宛てにプラットフォームから返ったストリームを紐付ける。
    ///
    /// 閉じたセッションのストリームは、新しいセッションが待機中でも
    /// その場で解放し、状態は変えない。
    pub fn stream_acquired(&mut self, session: CameraSession, stream: S) -> Result<()> {
        if !self.awaits_stream(session) {
            stream.release();
            tracing::debug!(
                state = ?self.state,
                generation = session.0,
                current = self.generation,
                "late camera stream released"
            );
            return Err(Error::CameraClosed);
        }
        self.stream = Some(stream);
        self.state = CaptureState::Streaming;
        tracing::debug!("camera streaming");
        Ok(())
    }

    /// 取得失敗を記録し、表示するメッセージを返す。
    /// `session` が既に閉じていれば `None`
    pub fn stream_failed(&mut self, session: CameraSession, failure: CameraFailure) -> Option<String> {
        if !self.awaits_stream(session) {
            tracing::debug!(generation = session.0, "stale camera failure ignored");
            return None;
        }
        tracing::debug!(kind = ?failure.kind, "camera failed");
        let message = failure.message();
        self.state = CaptureState::Error;
        self.failure = Some(failure);
        Some(message)
    }

    /// 撮影可能なら紐付いたストリームを返す
    pub fn begin_capture(&self) -> Result<&S> {
        match (&self.state, &self.stream) {
            (CaptureState::Streaming, Some(stream)) => Ok(stream),
            _ => Err(Error::CameraNotReady),
        }
    }

    /// エンコード済みフレームを受け取る。空の出力なら撮影可能なまま
    pub fn finish_capture(&mut self, encoded: Option<Vec<u8>>) -> Result<ImageArtifact> {
        if self.state != CaptureState::Streaming {
            return Err(Error::CameraNotReady);
        }
        let bytes = encoded.filter(|b| !b.is_empty()).ok_or(Error::CaptureEncoding)?;
        self.state = CaptureState::Captured;
        tracing::debug!(bytes = bytes.len(), "frame captured");
        Ok(ImageArtifact::new(CAPTURE_FILE_NAME, ImageMime::Jpeg, bytes))
    }

    /// どの状態からでもセッションを終了する
    pub fn close(&mut self) {
        if let Some(stream) = self.stream.take() {
            stream.release();
        }
        if self.state != CaptureState::Idle {
            tracing::debug!(from = ?self.state, "camera closed");
        }
        self.state = CaptureState::Idle;
        self.failure = None;
    }
}

impl<S: StreamHandle> Drop for CaptureController<S> {
    fn drop(&mut self) {
        self.close();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;
    use std::rc::Rc;

    #[derive(Clone, Default)]
    struct MockStream {
        releases: Rc<Cell<u32>>,
    }

    impl StreamHandle for MockStream {
        fn release(&self) {
            self.releases.set(self.releases.get() + 1);
        }
    }

    fn streaming() -> (CaptureController<MockStream>, Rc<Cell<u32>>) {
        let stream = MockStream::default();
        let releases = stream.releases.clone();
        let mut camera = CaptureController::new();
        let session = camera.open().unwrap();
        camera.stream_acquired(session, stream).unwrap();
        (camera, releases)
    }

    // =============================================
    // 制約 / エラー分類
    // =============================================

    #[test]
    fn test_video_constraints_json() {
        let json = serde_json::to_value(VideoConstraints::default()).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "facingMode": "environment",
                "width": { "ideal": 1280 },
                "height": { "ideal": 720 }
            })
        );
    }

    #[test]
    fn test_error_kind_from_dom_name() {
        assert_eq!(CameraErrorKind::from_dom_name("NotAllowedError"), CameraErrorKind::PermissionDenied);
        assert_eq!(CameraErrorKind::from_dom_name("PermissionDeniedError"), CameraErrorKind::PermissionDenied);
        assert_eq!(CameraErrorKind::from_dom_name("NotFoundError"), CameraErrorKind::NotFound);
        assert_eq!(CameraErrorKind::from_dom_name("DevicesNotFoundError"), CameraErrorKind::NotFound);
        assert_eq!(CameraErrorKind::from_dom_name("NotReadableError"), CameraErrorKind::Busy);
        assert_eq!(CameraErrorKind::from_dom_name("TrackStartError"), CameraErrorKind::Busy);
        assert_eq!(CameraErrorKind::from_dom_name("OverconstrainedError"), CameraErrorKind::Other);
    }

    #[test]
    fn test_failure_messages_are_distinct() {
        let kinds = [
            CameraErrorKind::Unsupported,
            CameraErrorKind::PermissionDenied,
            CameraErrorKind::NotFound,
            CameraErrorKind::Busy,
            CameraErrorKind::Other,
        ];
        let messages: Vec<String> = kinds
            .iter()
            .map(|k| CameraFailure::new(*k, "boom").message())
            .collect();
        for (i, a) in messages.iter().enumerate() {
            for b in &messages[i + 1..] {
                assert_ne!(a, b);
            }
        }
        assert!(messages[4].ends_with("boom"));
    }

    // =============================================
    // 状態機械
    // =============================================

    #[test]
    fn test_open_acquire_capture_close() {
        let (mut camera, releases) = streaming();
        assert_eq!(camera.state(), CaptureState::Streaming);
        assert!(camera.can_capture());
        assert!(camera.begin_capture().is_ok());

        let artifact = camera.finish_capture(Some(vec![0xFF, 0xD8, 0xFF])).unwrap();
        assert_eq!(artifact.file_name, CAPTURE_FILE_NAME);
        assert_eq!(artifact.mime, ImageMime::Jpeg);
        assert_eq!(camera.state(), CaptureState::Captured);

        camera.close();
        assert_eq!(camera.state(), CaptureState::Idle);
        assert!(camera.stream().is_none());
        assert_eq!(releases.get(), 1);
    }

    #[test]
    fn test_second_open_is_refused() {
        let (mut camera, _) = streaming();
        assert!(matches!(camera.open(), Err(Error::CameraBusy)));
        assert_eq!(camera.state(), CaptureState::Streaming);
    }

    #[test]
    fn test_empty_encoding_keeps_streaming() {
        let (mut camera, releases) = streaming();
        assert!(matches!(camera.finish_capture(None), Err(Error::CaptureEncoding)));
        assert!(matches!(camera.finish_capture(Some(vec![])), Err(Error::CaptureEncoding)));
        assert_eq!(camera.state(), CaptureState::Streaming);
        assert_eq!(releases.get(), 0);
        assert!(camera.finish_capture(Some(vec![1])).is_ok());
    }

    #[test]
    fn test_capture_requires_streaming() {
        let mut camera: CaptureController<MockStream> = CaptureController::new();
        assert!(matches!(camera.begin_capture(), Err(Error::CameraNotReady)));
        camera.open().unwrap();
        assert!(matches!(camera.finish_capture(Some(vec![1])), Err(Error::CameraNotReady)));
    }

    #[test]
    fn test_failure_moves_to_error_and_close_recovers() {
        let mut camera: CaptureController<MockStream> = CaptureController::new();
        let session = camera.open().unwrap();
        let message = camera
            .stream_failed(session, CameraFailure::from_dom("NotAllowedError", ""))
            .unwrap();
        assert!(message.contains(messages::CAMERA_PERMISSION_DENIED));
        assert_eq!(camera.state(), CaptureState::Error);
        assert!(!camera.can_capture());
        assert_eq!(camera.failure().map(|f| f.kind), Some(CameraErrorKind::PermissionDenied));

        camera.close();
        assert_eq!(camera.state(), CaptureState::Idle);
        assert!(camera.failure().is_none());
        assert!(camera.open().is_ok());
    }

    #[test]
    fn test_late_stream_is_released() {
        let mut camera: CaptureController<MockStream> = CaptureController::new();
        let session = camera.open().unwrap();
        camera.close();

        let late = MockStream::default();
        let releases = late.releases.clone();
        assert!(matches!(camera.stream_acquired(session, late), Err(Error::CameraClosed)));
        assert_eq!(releases.get(), 1);
        assert_eq!(camera.state(), CaptureState::Idle);
        assert!(camera.stream().is_none());
    }

    #[test]
    fn test_late_stream_of_closed_session_does_not_bind_to_reopened_one() {
        let mut camera: CaptureController<MockStream> = CaptureController::new();
        let first = camera.open().unwrap();
        camera.close();
        let second = camera.open().unwrap();
        assert_ne!(first, second);

        let late = MockStream::default();
        let late_releases = late.releases.clone();
        assert!(matches!(camera.stream_acquired(first, late), Err(Error::CameraClosed)));
        assert_eq!(late_releases.get(), 1);
        assert_eq!(camera.state(), CaptureState::Requesting);
        assert!(camera.stream().is_none());

        let current = MockStream::default();
        let current_releases = current.releases.clone();
        camera.stream_acquired(second, current).unwrap();
        assert_eq!(current_releases.get(), 0);
        assert_eq!(camera.state(), CaptureState::Streaming);
        assert!(camera.can_capture());
    }

    #[test]
    fn test_failure_of_closed_session_is_ignored() {
        let mut camera: CaptureController<MockStream> = CaptureController::new();
        let first = camera.open().unwrap();
        camera.close();
        let _second = camera.open().unwrap();

        assert!(camera
            .stream_failed(first, CameraFailure::from_dom("NotFoundError", ""))
            .is_none());
        assert_eq!(camera.state(), CaptureState::Requesting);
        assert!(camera.failure().is_none());
    }

    #[test]
    fn test_sequences_never_leak_streams() {
        let mut camera: CaptureController<MockStream> = CaptureController::new();
        let mut counters = Vec::new();
        for round in 0..5 {
            let session = camera.open().unwrap();
            let stream = MockStream::default();
            counters.push(stream.releases.clone());
            camera.stream_acquired(session, stream).unwrap();
            if round % 2 == 0 {
                camera.finish_capture(Some(vec![1, 2, 3])).unwrap();
            }
            camera.close();
            camera.close();
        }
        assert!(counters.iter().all(|c| c.get() == 1));
    }

    #[test]
    fn test_drop_releases_stream() {
        let (camera, releases) = streaming();
        drop(camera);
        assert_eq!(releases.get(), 1);
    }

    #[test]
    fn test_frame_size() {
        assert!(FrameSize::new(1280, 720).is_ok());
        assert!(matches!(FrameSize::new(0, 720), Err(Error::CameraNotReady)));
        assert!(matches!(FrameSize::new(640, 0), Err(Error::CameraNotReady)));
    }
}
