//! Multipart upload XML bodies.

use serde::{Deserialize, Serialize};

use crate::error::Result;

/// One uploaded part, identified to the vendor by number and ETag.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Part {
    #[serde(rename = "PartNumber")]
    pub part_number: u32,
    #[serde(rename = "ETag")]
    pub etag: String,
}

/// Initiate response; only the upload id matters here.
#[derive(Debug, Deserialize)]
#[serde(rename = "InitiateMultipartUploadResult")]
struct InitiateMultipartUploadResult {
    #[serde(rename = "UploadId")]
    upload_id: String,
}

/// Manifest posted to complete an upload.
#[derive(Debug, Serialize)]
#[serde(rename = "CompleteMultipartUpload")]
struct CompleteMultipartUpload<'a> {
    #[serde(rename = "Part")]
    parts: &'a [Part],
}

/// Pull the upload id out of an `InitiateMultipartUploadResult` body.
pub fn extract_upload_id(body: &str) -> Result<String> {
    let result: InitiateMultipartUploadResult = quick_xml::de::from_str(body)?;
    Ok(result.upload_id)
}

/// Render the `CompleteMultipartUpload` request body.
pub fn complete_upload_body(parts: &[Part]) -> Result<String> {
    Ok(quick_xml::se::to_string(&CompleteMultipartUpload { parts })?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_extract_upload_id() {
        let body = r#"<?xml version="1.0" encoding="UTF-8"?>
<InitiateMultipartUploadResult xmlns="http://s3.amazonaws.com/doc/2006-03-01/">
  <Bucket>mail</Bucket>
  <Key>a/b.txt</Key>
  <UploadId>0004B9894A22E5B1888A1E29F823</UploadId>
</InitiateMultipartUploadResult>"#;

        assert_eq!(
            extract_upload_id(body).unwrap(),
            "0004B9894A22E5B1888A1E29F823"
        );
    }

    #[test]
    fn test_extract_upload_id_rejects_garbage() {
        assert!(extract_upload_id("not xml at all").is_err());
    }

    #[test]
    fn test_complete_upload_body() {
        let parts = vec![
            Part {
                part_number: 1,
                etag: "etag-1".to_string(),
            },
            Part {
                part_number: 2,
                etag: "etag-2".to_string(),
            },
        ];

        let body = complete_upload_body(&parts).unwrap();
        assert_eq!(
            body,
            "<CompleteMultipartUpload>\
             <Part><PartNumber>1</PartNumber><ETag>etag-1</ETag></Part>\
             <Part><PartNumber>2</PartNumber><ETag>etag-2</ETag></Part>\
             </CompleteMultipartUpload>"
        );
    }
}
