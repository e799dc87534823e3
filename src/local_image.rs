//! ディスク上の画像ファイル

use crate::error::{QoffeaError, Result};
use qoffea_common::{CandidateFile, ImageArtifact, ImageMime};
use std::io::Read;
use std::path::{Path, PathBuf};

/// `image` が判定できるマジックナンバーに十分なバイト数
const SNIFF_LEN: u64 = 64;

/// ブラウザの選択ファイルと同じ形で表したディスク上のファイル:
/// 名前、MIMEタイプ（拡張子ではなく中身から判定）、サイズ
#[derive(Debug, Clone)]
pub struct LocalImage {
    path: PathBuf,
    name: String,
    mime: String,
    size: u64,
}

impl LocalImage {
    pub fn open(path: &Path) -> Result<Self> {
        if !path.is_file() {
            return Err(QoffeaError::FileNotFound(path.display().to_string()));
        }

        let size = std::fs::metadata(path)?.len();
        let mut head = Vec::new();
        std::fs::File::open(path)?
            .take(SNIFF_LEN)
            .read_to_end(&mut head)?;

        let mime = image::guess_format(&head)
            .map(|format| format.to_mime_type().to_string())
            .unwrap_or_default();
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_default();

        Ok(Self {
            path: path.to_path_buf(),
            name,
            mime,
            size,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// ファイル全体を読む。検証後にのみ呼ぶこと
    pub fn read(&self, mime: ImageMime) -> Result<ImageArtifact> {
        let bytes = std::fs::read(&self.path)?;
        Ok(ImageArtifact::new(self.name.clone(), mime, bytes))
    }
}

impl CandidateFile for LocalImage {
    fn name(&self) -> String {
        self.name.clone()
    }

    fn mime(&self) -> String {
        self.mime.clone()
    }

    fn size(&self) -> u64 {
        self.size
    }
}
