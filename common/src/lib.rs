//! Qoffea Common Library
//!
//! ブラウザ(WASM)とターミナルで共有する撮影・選択・アップロードのロジック。
//! DOMやソケットには直接触れない。

pub mod api;
pub mod camera;
pub mod drop_zone;
pub mod error;
pub mod messages;
pub mod presenter;
pub mod selection;
pub mod session;
pub mod types;
pub mod workflow;

pub use api::{AnalysisClient, ApiConfig, HttpReply, Transport, UploadForm, DEFAULT_API_BASE_URL};
pub use camera::{CameraErrorKind, CameraFailure, CameraSession, CaptureController, CaptureState, FrameSize, StreamHandle, VideoConstraints};
pub use drop_zone::DropZone;
pub use error::{Error, ErrorKind, Result};
pub use presenter::{format_percentage, Presenter, ResultView};
pub use selection::{select_from_drop, select_from_picker, CandidateFile, MAX_FILE_SIZE};
pub use session::{Session, UploadTicket};
pub use types::{AnalysisResult, BeanAnalysis, ImageArtifact, ImageMime, ReportFile, SourceTag, UploadResponse};
pub use workflow::Workflow;
