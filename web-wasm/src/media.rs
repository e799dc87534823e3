//! カメラとファイルへのアクセス
//!
//! getUserMedia、canvasでのフレームエンコード、File読み込み。状態の判断は
//! `qoffea_common::camera` に任せ、ここではブラウザ呼び出しだけを行う。

use js_sys::Promise;
use qoffea_common::camera::JPEG_QUALITY;
use qoffea_common::{
    CameraErrorKind, CameraFailure, CandidateFile, Error, FrameSize, ImageArtifact, ImageMime,
    Result, StreamHandle, VideoConstraints,
};
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::JsFuture;
use web_sys::{
    Blob, CanvasRenderingContext2d, DomException, File, FileList, HtmlCanvasElement,
    HtmlVideoElement, MediaStream, MediaStreamConstraints, MediaStreamTrack,
};

use crate::browser::{blob_bytes, describe_js, js_error};

/// プレビュー要素に紐付いたカメラストリーム
pub struct WebStream {
    stream: MediaStream,
    video: HtmlVideoElement,
}

impl WebStream {
    pub fn new(stream: MediaStream, video: HtmlVideoElement) -> Self {
        Self { stream, video }
    }

    pub fn video(&self) -> &HtmlVideoElement {
        &self.video
    }
}

impl StreamHandle for WebStream {
    fn release(&self) {
        for track in self.stream.get_tracks().iter() {
            if let Ok(track) = track.dyn_into::<MediaStreamTrack>() {
                track.stop();
            }
        }
        self.video.set_src_object(None);
    }
}

pub fn camera_failure(value: &JsValue) -> CameraFailure {
    match value.dyn_ref::<DomException>() {
        Some(exception) => CameraFailure::from_dom(&exception.name(), &exception.message()),
        None => CameraFailure::new(CameraErrorKind::Other, describe_js(value)),
    }
}

pub async fn request_stream(
    constraints: &VideoConstraints,
) -> std::result::Result<MediaStream, CameraFailure> {
    let unsupported = || CameraFailure::new(CameraErrorKind::Unsupported, "");

    let window = web_sys::window().ok_or_else(unsupported)?;
    let devices = window.navigator().media_devices().map_err(|_| unsupported())?;
    if devices.is_undefined()
        || !js_sys::Reflect::has(&devices, &JsValue::from_str("getUserMedia")).unwrap_or(false)
    {
        return Err(unsupported());
    }

    let video = serde_wasm_bindgen::to_value(constraints)
        .map_err(|e| CameraFailure::new(CameraErrorKind::Other, e.to_string()))?;
    let request = MediaStreamConstraints::new();
    request.set_video(&video);

    let promise = devices
        .get_user_media_with_constraints(&request)
        .map_err(|e| camera_failure(&e))?;
    let stream = JsFuture::from(promise).await.map_err(|e| camera_failure(&e))?;
    stream
        .dyn_into::<MediaStream>()
        .map_err(|e| camera_failure(&e))
}

/// 現在のフレームを実サイズで描画してJPEGにエンコードする。
/// `Ok(None)` はエンコーダがblobを返さなかったことを示す
pub async fn encode_frame(video: &HtmlVideoElement) -> Result<Option<Vec<u8>>> {
    let size = FrameSize::new(video.video_width(), video.video_height())?;
    let document = web_sys::window()
        .and_then(|w| w.document())
        .ok_or(Error::CameraNotReady)?;

    let canvas: HtmlCanvasElement = document
        .create_element("canvas")
        .map_err(js_error)?
        .dyn_into()
        .map_err(js_error)?;
    canvas.set_width(size.width);
    canvas.set_height(size.height);

    let context: CanvasRenderingContext2d = canvas
        .get_context("2d")
        .map_err(js_error)?
        .ok_or(Error::CaptureEncoding)?
        .dyn_into()
        .map_err(js_error)?;
    context
        .draw_image_with_html_video_element_and_dw_and_dh(
            video,
            0.0,
            0.0,
            size.width as f64,
            size.height as f64,
        )
        .map_err(js_error)?;

    let promise = Promise::new(&mut |resolve, reject| {
        if let Err(e) = canvas.to_blob_with_type_and_encoder_options(
            &resolve,
            "image/jpeg",
            &JsValue::from_f64(JPEG_QUALITY),
        ) {
            let _ = reject.call1(&JsValue::NULL, &e);
        }
    });
    let value = JsFuture::from(promise).await.map_err(js_error)?;
    if value.is_null() || value.is_undefined() {
        return Ok(None);
    }

    let blob: Blob = value.dyn_into().map_err(js_error)?;
    blob_bytes(&blob).await.map(Some).map_err(js_error)
}

/// 選択ルールから見たブラウザの `File`
pub struct BrowserFile(pub File);

impl CandidateFile for BrowserFile {
    fn name(&self) -> String {
        self.0.name()
    }

    fn mime(&self) -> String {
        self.0.type_()
    }

    fn size(&self) -> u64 {
        self.0.size() as u64
    }
}

pub fn files_from(list: FileList) -> Vec<BrowserFile> {
    (0..list.length())
        .filter_map(|i| list.get(i))
        .map(BrowserFile)
        .collect()
}

pub async fn read_artifact(file: &File, mime: ImageMime) -> Result<ImageArtifact> {
    let bytes = blob_bytes(file).await.map_err(js_error)?;
    Ok(ImageArtifact::new(file.name(), mime, bytes))
}

#[cfg(all(target_arch = "wasm32", test))]
mod wasm_tests {
    use super::*;
    use crate::browser::bytes_to_blob;
    use wasm_bindgen_test::*;

    wasm_bindgen_test_configure!(run_in_browser);

    #[wasm_bindgen_test]
    fn dom_exception_name_maps_to_camera_error() {
        let exception = DomException::new_with_message_and_name("denied", "NotAllowedError")
            .expect("DomException construction failed");
        let failure = camera_failure(&exception.into());
        assert_eq!(failure.kind, CameraErrorKind::PermissionDenied);
    }

    #[wasm_bindgen_test]
    fn plain_js_error_is_other() {
        let failure = camera_failure(&JsValue::from_str("boom"));
        assert_eq!(failure.kind, CameraErrorKind::Other);
        assert_eq!(failure.detail, "boom");
    }

    #[wasm_bindgen_test]
    async fn blob_bytes_returns_original_bytes() {
        let blob = bytes_to_blob(&[1, 2, 3], "image/png").expect("blob construction failed");
        let bytes = blob_bytes(&blob).await.expect("read failed");
        assert_eq!(bytes, vec![1, 2, 3]);
    }
}
