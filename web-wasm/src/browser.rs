//! js-sys / web-sys の小さなヘルパー

use js_sys::{Array, Uint8Array};
use qoffea_common::Error;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::JsFuture;
use web_sys::{Blob, BlobPropertyBag, DomException, HtmlAnchorElement, Url};

/// 投げられたJS値をできる範囲で読める文字列にする
pub fn describe_js(value: &JsValue) -> String {
    if let Some(exception) = value.dyn_ref::<DomException>() {
        return exception.message();
    }
    if let Some(error) = value.dyn_ref::<js_sys::Error>() {
        return String::from(error.message());
    }
    value.as_string().unwrap_or_else(|| format!("{:?}", value))
}

pub fn js_error(value: impl Into<JsValue>) -> Error {
    Error::Transport(describe_js(&value.into()))
}

pub fn bytes_to_blob(bytes: &[u8], mime: &str) -> Result<Blob, JsValue> {
    let parts = Array::of1(&Uint8Array::from(bytes));
    let options = BlobPropertyBag::new();
    options.set_type(mime);
    Blob::new_with_u8_array_sequence_and_options(&parts, &options)
}

pub async fn blob_bytes(blob: &Blob) -> Result<Vec<u8>, JsValue> {
    let buffer = JsFuture::from(blob.array_buffer()).await?;
    Ok(Uint8Array::new(&buffer).to_vec())
}

/// `bytes` をファイルとしてブラウザにダウンロードさせる
pub fn save_bytes(file_name: &str, bytes: &[u8], mime: &str) -> Result<(), JsValue> {
    let document = web_sys::window()
        .and_then(|w| w.document())
        .ok_or_else(|| JsValue::from_str("document tidak tersedia"))?;
    let body = document
        .body()
        .ok_or_else(|| JsValue::from_str("body tidak tersedia"))?;

    let blob = bytes_to_blob(bytes, mime)?;
    let url = Url::create_object_url_with_blob(&blob)?;
    let anchor: HtmlAnchorElement = document.create_element("a")?.dyn_into()?;
    anchor.set_href(&url);
    anchor.set_download(file_name);

    body.append_child(&anchor)?;
    anchor.click();
    Url::revoke_object_url(&url)?;
    body.remove_child(&anchor)?;
    Ok(())
}
