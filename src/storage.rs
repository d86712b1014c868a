//! The signer engine behind a configured client.

use crate::config::{Config, SignatureVersion};
use crate::constants::DEFAULT_CONTENT_TYPE;
use crate::context::Range;
use crate::error::{Error, Result};
use crate::request::RequestSetting;
use crate::v2::V2Signer;
use crate::v4::V4Signer;

/// A signature engine, V2 or V4, owning its precomputed secret material.
///
/// The engine is stateless across calls: every operation borrows a pooled
/// context, signs, and returns a plain [`RequestSetting`] for the transport
/// to execute. It is safe to share one `Storage` across threads.
#[derive(Debug)]
pub enum Storage {
    V2(V2Signer),
    V4(V4Signer),
}

impl Storage {
    /// Build the engine selected by `config.signature` for the configured
    /// vendor.
    pub fn new(config: &Config) -> Result<Self> {
        let vendor = config
            .vendor
            .ok_or_else(|| Error::config_invalid("vendor is not set"))?;
        let profile = vendor.profile();

        let mut storage = config.storage.clone();
        if storage.content_type.is_empty() {
            storage.content_type = DEFAULT_CONTENT_TYPE.to_string();
        }

        Ok(match config.signature {
            SignatureVersion::V2 => {
                Storage::V2(V2Signer::new(&config.prefix, &storage, profile))
            }
            SignatureVersion::V4 => {
                Storage::V4(V4Signer::new(&config.prefix, &storage, profile))
            }
        })
    }

    /// HEAD the object; expects 200.
    pub fn head_object(&self, key: &str) -> RequestSetting {
        match self {
            Storage::V2(s) => s.head_object(key),
            Storage::V4(s) => s.head_object(key),
        }
    }

    /// PUT the object; expects 200. The optional MD5 is signed and sent as
    /// `content-md5`.
    pub fn put_object(&self, key: &str, content_md5: Option<&str>) -> RequestSetting {
        match self {
            Storage::V2(s) => s.put_object(key, content_md5),
            Storage::V4(s) => s.put_object(key, content_md5),
        }
    }

    /// GET the object; expects 200, or 206 when a non-absent range is given.
    pub fn get_object(&self, key: &str, range: Option<Range>) -> RequestSetting {
        match self {
            Storage::V2(s) => s.get_object(key, range),
            Storage::V4(s) => s.get_object(key, range),
        }
    }

    /// Build a pre-signed download URL valid for `timeout` seconds.
    pub fn get_object_link(&self, key: &str, timeout: i64) -> String {
        match self {
            Storage::V2(s) => s.get_object_link(key, timeout),
            Storage::V4(s) => s.get_object_link(key, timeout),
        }
    }

    /// DELETE the object; expects 204.
    pub fn delete_object(&self, key: &str) -> RequestSetting {
        match self {
            Storage::V2(s) => s.delete_object(key),
            Storage::V4(s) => s.delete_object(key),
        }
    }

    /// POST `?uploads=1`; expects 200 with an XML body carrying the upload id.
    pub fn initiate_multipart_upload(&self, key: &str) -> RequestSetting {
        match self {
            Storage::V2(s) => s.initiate_multipart_upload(key),
            Storage::V4(s) => s.initiate_multipart_upload(key),
        }
    }

    /// PUT one part; expects 200 with an `ETag` response header.
    pub fn upload_part(
        &self,
        key: &str,
        upload_id: &str,
        part_number: u32,
        content_md5: Option<&str>,
    ) -> RequestSetting {
        match self {
            Storage::V2(s) => s.upload_part(key, upload_id, part_number, content_md5),
            Storage::V4(s) => s.upload_part(key, upload_id, part_number, content_md5),
        }
    }

    /// POST the part manifest; expects 200.
    pub fn complete_multipart_upload(&self, key: &str, upload_id: &str) -> RequestSetting {
        match self {
            Storage::V2(s) => s.complete_multipart_upload(key, upload_id),
            Storage::V4(s) => s.complete_multipart_upload(key, upload_id),
        }
    }

    /// DELETE the pending upload; expects 204.
    pub fn abort_multipart_upload(&self, key: &str, upload_id: &str) -> RequestSetting {
        match self {
            Storage::V2(s) => s.abort_multipart_upload(key, upload_id),
            Storage::V4(s) => s.abort_multipart_upload(key, upload_id),
        }
    }
}
