//! reqwest による解析API

use crate::error::{QoffeaError, Result};
use qoffea_common::{Error, HttpReply, Transport, UploadForm};
use reqwest::multipart::{Form, Part};
use std::time::Duration;

fn transport_error(e: reqwest::Error) -> Error {
    Error::Transport(e.to_string())
}

pub struct ReqwestTransport {
    client: reqwest::Client,
}

impl ReqwestTransport {
    pub fn new(timeout: Duration) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| QoffeaError::HttpClient(e.to_string()))?;
        Ok(Self { client })
    }

    async fn reply(response: reqwest::Response) -> qoffea_common::Result<HttpReply> {
        let status = response.status().as_u16();
        let body = response.bytes().await.map_err(transport_error)?;
        tracing::debug!(status, bytes = body.len(), "response received");
        Ok(HttpReply {
            status,
            body: body.to_vec(),
        })
    }
}

impl Transport for ReqwestTransport {
    async fn post_upload(&self, url: &str, form: &UploadForm<'_>) -> qoffea_common::Result<HttpReply> {
        let part = Part::bytes(form.image.bytes.clone())
            .file_name(form.image.file_name.clone())
            .mime_str(form.image.mime.as_str())
            .map_err(transport_error)?;
        let mut multipart = Form::new()
            .part("file", part)
            .text("source", form.source.as_str());
        if let Some(confidence) = form.confidence {
            multipart = multipart.text("confidence", confidence.to_string());
        }

        let response = self
            .client
            .post(url)
            .multipart(multipart)
            .send()
            .await
            .map_err(transport_error)?;
        Self::reply(response).await
    }

    async fn get(&self, url: &str) -> qoffea_common::Result<HttpReply> {
        let response = self.client.get(url).send().await.map_err(transport_error)?;
        Self::reply(response).await
    }
}
