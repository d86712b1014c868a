//! The user-facing object store: issues the signed requests over HTTP and
//! interprets the responses.

use bytes::Bytes;
use http::StatusCode;
use log::debug;
use reqwest::header;

use crate::client::build_client;
use crate::config::Config;
use crate::context::Range;
use crate::error::{Error, Result};
use crate::multipart::{complete_upload_body, extract_upload_id, Part};
use crate::request::RequestSetting;
use crate::storage::Storage;

/// An S3-compatible object store bound to one bucket of one vendor.
///
/// All operations are independent; failures bubble to the caller without
/// retries. A response passes when its status is 200 or the operation's
/// expected status (404 additionally for [`has_object`](Self::has_object)),
/// anything else becomes an [`ErrorKind::InvalidStatus`] error carrying the
/// status and body.
///
/// [`ErrorKind::InvalidStatus`]: crate::ErrorKind::InvalidStatus
#[derive(Debug)]
pub struct ObjectStore {
    storage: Storage,
    client: reqwest::Client,
}

impl ObjectStore {
    /// Create a store from the unified configuration.
    pub fn new(config: &Config) -> Result<Self> {
        Ok(Self {
            storage: Storage::new(config)?,
            client: build_client(&config.client)?,
        })
    }

    fn request(&self, set: &RequestSetting) -> reqwest::RequestBuilder {
        debug!("{} {}", set.method, set.url);
        let mut req = self.client.request(set.method.clone(), set.url.as_str());
        for (name, text) in &set.headers {
            req = req.header(name.as_str(), text.as_str());
        }
        req
    }

    async fn ensure_status(rsp: reqwest::Response, expected: StatusCode) -> Result<reqwest::Response> {
        let status = rsp.status();
        if status == StatusCode::OK || status == expected {
            return Ok(rsp);
        }
        let body = rsp.text().await.unwrap_or_default();
        Err(Error::invalid_status(status, &body))
    }

    /// Whether the object exists. A 404 is a negative answer, not an error.
    pub async fn has_object(&self, key: &str) -> Result<bool> {
        let set = self.storage.head_object(key);
        let rsp = self.request(&set).send().await?;

        let status = rsp.status();
        if status != StatusCode::OK && status != StatusCode::NOT_FOUND && status != set.status {
            let body = rsp.text().await.unwrap_or_default();
            return Err(Error::invalid_status(status, &body));
        }
        Ok(status == StatusCode::OK)
    }

    /// Download the object, or a part of it when `range` is given.
    ///
    /// Returns the validated response; use
    /// [`content_length`](reqwest::Response::content_length) and
    /// [`bytes_stream`](reqwest::Response::bytes_stream) to consume the body.
    pub async fn get_object(&self, key: &str, range: Option<Range>) -> Result<reqwest::Response> {
        let set = self.storage.get_object(key, range);
        let rsp = self.request(&set).send().await?;
        Self::ensure_status(rsp, set.status).await
    }

    /// Build a pre-signed download URL valid for `timeout` seconds. No
    /// request is issued.
    pub fn get_object_link(&self, key: &str, timeout: i64) -> String {
        self.storage.get_object_link(key, timeout)
    }

    /// Upload an in-memory object. The server is not asked to verify a
    /// content hash.
    pub async fn put_object_data(&self, key: &str, data: Bytes) -> Result<()> {
        let set = self.storage.put_object(key, None);
        let rsp = self.request(&set).body(data).send().await?;
        Self::ensure_status(rsp, set.status).await?;
        Ok(())
    }

    /// Upload an object from a body. With `content_length` the length is
    /// declared up front; without it the transfer goes out chunked.
    pub async fn put_object(
        &self,
        key: &str,
        content_length: Option<u64>,
        body: reqwest::Body,
    ) -> Result<()> {
        let set = self.storage.put_object(key, None);
        let mut req = self.request(&set);
        if let Some(n) = content_length {
            req = req.header(header::CONTENT_LENGTH, n);
        }
        let rsp = req.body(body).send().await?;
        Self::ensure_status(rsp, set.status).await?;
        Ok(())
    }

    /// Delete the object.
    pub async fn delete_object(&self, key: &str) -> Result<()> {
        let set = self.storage.delete_object(key);
        let rsp = self.request(&set).send().await?;
        Self::ensure_status(rsp, set.status).await?;
        Ok(())
    }

    /// Open a multipart upload and return its upload id.
    ///
    /// An upload left neither completed nor aborted leaks at the vendor.
    pub async fn initiate_multipart_upload(&self, key: &str) -> Result<String> {
        let set = self.storage.initiate_multipart_upload(key);
        let rsp = self.request(&set).send().await?;
        let rsp = Self::ensure_status(rsp, set.status).await?;

        let body = rsp.text().await?;
        extract_upload_id(&body)
    }

    /// Upload one part and return the ETag the vendor assigned to it.
    pub async fn upload_part(
        &self,
        key: &str,
        upload_id: &str,
        part_number: u32,
        data: Bytes,
    ) -> Result<String> {
        let set = self.storage.upload_part(key, upload_id, part_number, None);
        let rsp = self.request(&set).body(data).send().await?;
        let rsp = Self::ensure_status(rsp, set.status).await?;

        match rsp.headers().get(header::ETAG) {
            Some(etag) => Ok(etag
                .to_str()
                .map_err(|e| Error::etag_missing().with_source(e))?
                .to_string()),
            None => Err(Error::etag_missing()),
        }
    }

    /// Close a multipart upload with the manifest of uploaded parts.
    pub async fn complete_multipart_upload(
        &self,
        key: &str,
        upload_id: &str,
        parts: &[Part],
    ) -> Result<()> {
        let set = self.storage.complete_multipart_upload(key, upload_id);
        let body = complete_upload_body(parts)?;
        let rsp = self.request(&set).body(body).send().await?;
        Self::ensure_status(rsp, set.status).await?;
        Ok(())
    }

    /// Abandon a multipart upload, releasing its parts at the vendor.
    pub async fn abort_multipart_upload(&self, key: &str, upload_id: &str) -> Result<()> {
        let set = self.storage.abort_multipart_upload(key, upload_id);
        let rsp = self.request(&set).send().await?;
        Self::ensure_status(rsp, set.status).await?;
        Ok(())
    }
}
