//! 解析サービスとの契約
//!
//! URL組み立て、アップロード応答の処理、`Transport` 境界。
//! ブラウザの fetch と reqwest がそれぞれ `Transport` を実装し、その上は共通。

use crate::error::{Error, Result};
use crate::types::{AnalysisResult, ImageArtifact, ReportFile, SourceTag, UploadResponse};

pub const DEFAULT_API_BASE_URL: &str = "https://qoffea-backend-c26brvbilq-et.a.run.app/api";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiConfig {
    base_url: String,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self::new(DEFAULT_API_BASE_URL)
    }
}

impl ApiConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url = base_url.into();
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn upload_url(&self) -> String {
        format!("{}/upload", self.base_url)
    }

    pub fn report_url(&self, analysis_id: &str) -> String {
        format!("{}/report/{}/download", self.base_url, analysis_id)
    }

    /// 注釈付き画像はAPIルートと並ぶ静的ファイルとして配信される
    pub fn annotated_image_url(&self, filename: &str) -> String {
        format!("{}/uploads/{}", self.base_url.replacen("/api", "", 1), filename)
    }
}

/// HTTP通信1回分のステータスと生ボディ
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpReply {
    pub status: u16,
    pub body: Vec<u8>,
}

impl HttpReply {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// multipart アップロードのフィールド
#[derive(Debug, Clone, Copy)]
pub struct UploadForm<'a> {
    pub image: &'a ImageArtifact,
    pub source: SourceTag,
    pub confidence: Option<f32>,
}

/// 単発のHTTP呼び出し。実装はリトライしない
#[allow(async_fn_in_trait)]
pub trait Transport {
    async fn post_upload(&self, url: &str, form: &UploadForm<'_>) -> Result<HttpReply>;
    async fn get(&self, url: &str) -> Result<HttpReply>;
}

/// アップロード応答を解釈する。JSONはステータスに関係なく読む。
/// 失敗ステータスで読めない場合はステータスを報告する
pub fn parse_upload_reply(reply: &HttpReply) -> Result<AnalysisResult> {
    let response: UploadResponse = match serde_json::from_slice(&reply.body) {
        Ok(response) => response,
        Err(_) if !reply.is_success() => return Err(Error::Status(reply.status)),
        Err(e) => return Err(Error::Json(e)),
    };
    response.into_result()
}

pub fn validate_confidence(confidence: Option<f32>) -> Result<Option<f32>> {
    match confidence {
        Some(c) if !(0.0..=1.0).contains(&c) => Err(Error::InvalidConfidence(c)),
        other => Ok(other),
    }
}

pub struct AnalysisClient<T> {
    config: ApiConfig,
    transport: T,
    confidence: Option<f32>,
}

impl<T: Transport> AnalysisClient<T> {
    pub fn new(config: ApiConfig, transport: T) -> Self {
        Self {
            config,
            transport,
            confidence: None,
        }
    }

    pub fn with_confidence(mut self, confidence: Option<f32>) -> Result<Self> {
        self.confidence = validate_confidence(confidence)?;
        Ok(self)
    }

    pub fn config(&self) -> &ApiConfig {
        &self.config
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    pub async fn upload(&self, image: &ImageArtifact, source: SourceTag) -> Result<AnalysisResult> {
        let form = UploadForm {
            image,
            source,
            confidence: self.confidence,
        };
        tracing::debug!(file = %image.file_name, bytes = image.len(), source = source.as_str(), "uploading");
        let reply = self.transport.post_upload(&self.config.upload_url(), &form).await?;
        parse_upload_reply(&reply)
    }

    /// `analysis_id` のPDFを取得。IDが空ならリクエストせずに失敗
    pub async fn download_report(&self, analysis_id: &str) -> Result<ReportFile> {
        if analysis_id.is_empty() {
            return Err(Error::NoAnalysis);
        }
        let reply = self.transport.get(&self.config.report_url(analysis_id)).await?;
        if !reply.is_success() {
            return Err(Error::ReportUnavailable(reply.status));
        }
        Ok(ReportFile {
            file_name: ReportFile::file_name_for(analysis_id),
            bytes: reply.body,
        })
    }
}
