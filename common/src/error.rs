//! エラー型
//!
//! Display の文字列はそのままユーザーに表示するメッセージ

use thiserror::Error;

use crate::camera::CameraFailure;
use crate::messages;

#[derive(Error, Debug)]
pub enum Error {
    #[error("{0}")]
    Camera(CameraFailure),

    #[error("Kamera sedang aktif")]
    CameraBusy,

    #[error("Sesi kamera sudah ditutup")]
    CameraClosed,

    #[error("{}", messages::CAMERA_NOT_READY)]
    CameraNotReady,

    #[error("{}", messages::CAPTURE_FAILED)]
    CaptureEncoding,

    #[error("{}", messages::INVALID_FILE_TYPE)]
    UnsupportedType(String),

    #[error("{}", messages::FILE_TOO_LARGE)]
    FileTooLarge(u64),

    #[error("Nilai confidence harus antara 0 dan 1: {0}")]
    InvalidConfidence(f32),

    #[error("{}", messages::NO_ANALYSIS)]
    NoAnalysis,

    #[error("{0}")]
    Remote(String),

    #[error("HTTP {0}")]
    Status(u16),

    #[error("{}", messages::PDF_UNAVAILABLE)]
    ReportUnavailable(u16),

    #[error("Koneksi gagal: {0}")]
    Transport(String),

    #[error("Respons server tidak valid: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Permintaan digantikan oleh unggahan yang lebih baru")]
    Superseded,

    #[error("{0}")]
    Presentation(String),
}

/// メッセージと一緒にプレゼンターへ渡すエラー分類
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Camera,
    Validation,
    Capture,
    Transport,
}

impl Error {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Error::Camera(_) => ErrorKind::Camera,
            Error::UnsupportedType(_)
            | Error::FileTooLarge(_)
            | Error::InvalidConfidence(_)
            | Error::NoAnalysis => ErrorKind::Validation,
            Error::CameraBusy
            | Error::CameraClosed
            | Error::CameraNotReady
            | Error::CaptureEncoding => ErrorKind::Capture,
            Error::Remote(_)
            | Error::Status(_)
            | Error::ReportUnavailable(_)
            | Error::Transport(_)
            | Error::Json(_)
            | Error::Superseded
            | Error::Presentation(_) => ErrorKind::Transport,
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::camera::CameraErrorKind;

    #[test]
    fn test_error_display_validation() {
        assert_eq!(
            Error::UnsupportedType("image/gif".into()).to_string(),
            messages::INVALID_FILE_TYPE
        );
        assert_eq!(Error::FileTooLarge(11 * 1024 * 1024).to_string(), messages::FILE_TOO_LARGE);
    }

    #[test]
    fn test_error_display_remote_passes_server_text() {
        let error = Error::Remote("model unavailable".into());
        assert_eq!(error.to_string(), "model unavailable");
    }

    #[test]
    fn test_error_display_camera() {
        let error = Error::Camera(CameraFailure::new(CameraErrorKind::NotFound, ""));
        assert!(error.to_string().contains(messages::CAMERA_NOT_FOUND));
    }

    #[test]
    fn test_error_from_json() {
        let json_error = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        let error: Error = json_error.into();
        assert!(matches!(error, Error::Json(_)));
        assert_eq!(error.kind(), ErrorKind::Transport);
    }

    #[test]
    fn test_error_kind() {
        assert_eq!(Error::FileTooLarge(1).kind(), ErrorKind::Validation);
        assert_eq!(Error::NoAnalysis.kind(), ErrorKind::Validation);
        assert_eq!(Error::CaptureEncoding.kind(), ErrorKind::Capture);
        assert_eq!(Error::Status(502).kind(), ErrorKind::Transport);
        assert_eq!(
            Error::Camera(CameraFailure::new(CameraErrorKind::Busy, "")).kind(),
            ErrorKind::Camera
        );
    }
}
