//! ブラウザ fetch API による解析API

use js_sys::Uint8Array;
use qoffea_common::{Error, HttpReply, Result, Transport, UploadForm};
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::JsFuture;
use web_sys::{FormData, Request, RequestInit, RequestMode, Response};

use crate::browser::{bytes_to_blob, js_error};

#[derive(Debug, Clone, Copy, Default)]
pub struct FetchTransport;

async fn send(request: &Request) -> Result<HttpReply> {
    let window = web_sys::window().ok_or_else(|| Error::Transport("window tidak tersedia".into()))?;
    let value = JsFuture::from(window.fetch_with_request(request))
        .await
        .map_err(js_error)?;
    let response: Response = value.dyn_into().map_err(js_error)?;

    let buffer = JsFuture::from(response.array_buffer().map_err(js_error)?)
        .await
        .map_err(js_error)?;

    Ok(HttpReply {
        status: response.status(),
        body: Uint8Array::new(&buffer).to_vec(),
    })
}

impl Transport for FetchTransport {
    async fn post_upload(&self, url: &str, form: &UploadForm<'_>) -> Result<HttpReply> {
        let data = FormData::new().map_err(js_error)?;
        let blob = bytes_to_blob(&form.image.bytes, form.image.mime.as_str()).map_err(js_error)?;
        data.append_with_blob_and_filename("file", &blob, &form.image.file_name)
            .map_err(js_error)?;
        data.append_with_str("source", form.source.as_str())
            .map_err(js_error)?;
        if let Some(confidence) = form.confidence {
            data.append_with_str("confidence", &confidence.to_string())
                .map_err(js_error)?;
        }

        let opts = RequestInit::new();
        opts.set_method("POST");
        opts.set_mode(RequestMode::Cors);
        opts.set_body(&JsValue::from(data));

        let request = Request::new_with_str_and_init(url, &opts).map_err(js_error)?;
        send(&request).await
    }

    async fn get(&self, url: &str) -> Result<HttpReply> {
        let request = Request::new_with_str(url).map_err(js_error)?;
        send(&request).await
    }
}
