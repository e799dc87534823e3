//! 解析サービスとの結合テスト
//!
//! QOFFEA_API_BASE_URL と QOFFEA_SAMPLE_IMAGE（コーヒー豆のJPG/PNG）が必要。
//! 未設定ならスキップ

use qoffea::local_image::LocalImage;
use qoffea::transport::ReqwestTransport;
use qoffea_common::{select_from_picker, AnalysisClient, ApiConfig, SourceTag};
use std::path::PathBuf;
use std::time::Duration;

fn env(name: &str) -> Option<String> {
    match std::env::var(name) {
        Ok(value) if !value.trim().is_empty() => Some(value),
        _ => None,
    }
}

#[tokio::test]
async fn live_upload_and_report() {
    let (Some(base_url), Some(sample)) = (env("QOFFEA_API_BASE_URL"), env("QOFFEA_SAMPLE_IMAGE")) else {
        eprintln!("QOFFEA_API_BASE_URL / QOFFEA_SAMPLE_IMAGE not set; skipping integration test");
        return;
    };

    let image = LocalImage::open(&PathBuf::from(sample)).expect("sample image missing");
    let mime = select_from_picker(&image).expect("sample image rejected");
    let artifact = image.read(mime).expect("read failed");

    let transport = ReqwestTransport::new(Duration::from_secs(120)).expect("client");
    let client = AnalysisClient::new(ApiConfig::new(base_url), transport);

    let result = client
        .upload(&artifact, SourceTag::Gallery)
        .await
        .expect("upload failed");
    assert!(!result.analysis_id.is_empty());
    assert!(result.analysis.good_percentage + result.analysis.defect_percentage <= 100.5);

    let report = client
        .download_report(&result.analysis_id)
        .await
        .expect("report failed");
    assert!(report.bytes.starts_with(b"%PDF"));
}
