//! ブラウザ版とターミナル版で共有する画像・解析結果の型
//!
//! - ImageArtifact: アップロード待ちの画像1枚
//! - UploadResponse: `POST /upload` のレスポンス形式
//! - AnalysisResult: 成功したアップロード1件の解析結果

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::messages;

/// 解析サービスが受け付ける画像形式
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ImageMime {
    #[serde(rename = "image/jpeg")]
    Jpeg,
    #[serde(rename = "image/png")]
    Png,
}

impl ImageMime {
    /// MIME文字列を解析。`image/jpg` はJPEGの別名として扱う
    pub fn parse(mime: &str) -> Option<Self> {
        match mime.trim().to_ascii_lowercase().as_str() {
            "image/jpeg" | "image/jpg" => Some(ImageMime::Jpeg),
            "image/png" => Some(ImageMime::Png),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ImageMime::Jpeg => "image/jpeg",
            ImageMime::Png => "image/png",
        }
    }
}

/// アップロード対象の画像1枚
#[derive(Debug, Clone, PartialEq)]
pub struct ImageArtifact {
    pub file_name: String,
    pub mime: ImageMime,
    pub bytes: Vec<u8>,
}

impl ImageArtifact {
    pub fn new(file_name: impl Into<String>, mime: ImageMime, bytes: Vec<u8>) -> Self {
        Self {
            file_name: file_name.into(),
            mime,
            bytes,
        }
    }

    pub fn len(&self) -> u64 {
        self.bytes.len() as u64
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }
}

/// multipart の `source` フィールド値
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SourceTag {
    Gallery,
    Camera,
}

impl SourceTag {
    pub fn as_str(&self) -> &'static str {
        match self {
            SourceTag::Gallery => "gallery",
            SourceTag::Camera => "camera",
        }
    }
}

/// 画像1枚分の豆の数と割合
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BeanAnalysis {
    pub total_beans: u32,
    pub good_beans: u32,
    pub defect_beans: u32,
    pub good_percentage: f64,
    pub defect_percentage: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub grade: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub grade_description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub confidence_threshold: Option<f64>,
}

/// `POST {base}/upload` のボディ。成功・失敗とも同じ形でパースする
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct UploadResponse {
    pub success: bool,
    pub analysis_id: Option<String>,
    pub analysis: Option<BeanAnalysis>,
    pub annotated_filename: Option<String>,
    pub original_filename: Option<String>,
    pub detections_count: Option<u32>,
    pub error: Option<String>,
}

/// 受理されたアップロード1件分の解析
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AnalysisResult {
    pub analysis_id: String,
    pub analysis: BeanAnalysis,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub annotated_filename: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub original_filename: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub detections_count: Option<u32>,
}

impl UploadResponse {
    /// レスポンスを解析結果に変換する。
    ///
    /// `success = false` ならサーバーのエラー文、
    /// なければ汎用メッセージを返す。`analysis` のない成功応答もエラー。
    pub fn into_result(self) -> Result<AnalysisResult> {
        if !self.success {
            let message = self
                .error
                .filter(|e| !e.trim().is_empty())
                .unwrap_or_else(|| messages::ANALYSIS_FAILED.to_string());
            return Err(Error::Remote(message));
        }

        let analysis_id = self
            .analysis_id
            .filter(|id| !id.is_empty())
            .ok_or_else(|| Error::Remote("analysis_id tidak ditemukan".into()))?;
        // 空の解析を0%の結果として表示しない
        let analysis = self
            .analysis
            .ok_or_else(|| Error::Remote("data analisis tidak ditemukan".into()))?;

        Ok(AnalysisResult {
            analysis_id,
            analysis,
            annotated_filename: self.annotated_filename.filter(|f| !f.is_empty()),
            original_filename: self.original_filename,
            detections_count: self.detections_count,
        })
    }
}

/// 保存待ちのPDFレポート
#[derive(Debug, Clone, PartialEq)]
pub struct ReportFile {
    pub file_name: String,
    pub bytes: Vec<u8>,
}

impl ReportFile {
    pub fn file_name_for(analysis_id: &str) -> String {
        format!("qoffea_report_{}.pdf", analysis_id)
    }
}
