//! Per-vendor dialect descriptors.
//!
//! A [`Profile`] captures everything that differs between the supported
//! vendors: prefix tokens, scope strings, which headers enter the canonical
//! strings, and the query-parameter names of pre-signed URLs. Profiles are
//! immutable and selected once per client.

/// Schemes accepted by profiles.
pub const SCHEMA_HTTP: &str = "http";
pub const SCHEMA_HTTPS: &str = "https";

/// Query parameter names used by V2 pre-signed URLs.
#[derive(Debug, Clone, Copy)]
pub struct V2QueryParams {
    pub access_key_id: &'static str,
    pub expires: &'static str,
    pub signature: &'static str,
}

/// Query parameter names used by V4 pre-signed URLs.
#[derive(Debug, Clone, Copy)]
pub struct V4QueryParams {
    pub algorithm: &'static str,
    pub credential: &'static str,
    pub date: &'static str,
    pub expires: &'static str,
    pub signed_headers: &'static str,
    pub signature: &'static str,
}

/// Immutable descriptor of one vendor's signing dialect.
#[derive(Debug, Clone, Copy)]
pub struct Profile {
    /// Prefix token of the V2 `Authorization` header.
    pub v2_code: &'static str,
    /// Prefix prepended to the secret when deriving the V4 signing key.
    pub v4_code: &'static str,
    /// Service dimension of the V4 scope.
    pub v4_service: &'static str,
    /// Algorithm identifier: `<code>-HMAC-SHA256`.
    pub v4_algorithm: &'static str,
    /// Terminator dimension of the V4 scope.
    pub v4_boundary: &'static str,
    /// URL scheme of the endpoint.
    pub schema: &'static str,
    /// Whether the access URL path begins with `/<bucket>/`.
    pub access_bucket_uri: bool,
    /// Whether the V4 canonical URI begins with `/<bucket>/`.
    pub signed_bucket_uri: bool,
    /// Whether `host` is listed in V4 `SignedHeaders`.
    pub signed_host_header: bool,
    /// Whether the V2 string-to-sign carries the GMT date. When false the
    /// date slot stays empty because the vendor date header already conveys
    /// time.
    pub signed_date_header: bool,
    /// Vendor date header name, lowercase.
    pub date_header: &'static str,
    /// Vendor content-SHA256 header name, lowercase.
    pub content_sha256_header: &'static str,
    /// Extra headers attached (and signed) on PUT and multipart-init.
    pub storage_headers: &'static [(&'static str, &'static str)],
    pub v2_query_params: V2QueryParams,
    pub v4_query_params: V4QueryParams,
}

/// Kingsoft KS3.
pub static KS3: Profile = Profile {
    v2_code: "KSS",
    v4_code: "KSS4",
    v4_service: "ks3",
    v4_algorithm: "KSS4-HMAC-SHA256",
    v4_boundary: "kss4_request",
    schema: SCHEMA_HTTPS,
    access_bucket_uri: false,
    signed_bucket_uri: false,
    signed_host_header: true,
    // KS3 wants the date inside the V2 string-to-sign.
    signed_date_header: true,
    date_header: "x-kss-date",
    content_sha256_header: "x-kss-content-sha256",
    storage_headers: &[
        ("x-kss-server-side-encryption", "AES256"),
        ("x-kss-acl", "private"),
        ("x-kss-auto-compress", "true"),
    ],
    v2_query_params: V2QueryParams {
        access_key_id: "KSSAccessKeyId",
        expires: "Expires",
        signature: "Signature",
    },
    v4_query_params: V4QueryParams {
        algorithm: "X-Kss-Algorithm",
        credential: "X-Kss-Credential",
        date: "X-Kss-Date",
        expires: "X-Kss-Expires",
        signed_headers: "X-Kss-SignedHeaders",
        signature: "X-Kss-Signature",
    },
};

/// Huawei OBS.
pub static OBS: Profile = Profile {
    v2_code: "OBS",
    v4_code: "OBS4",
    v4_service: "obs",
    v4_algorithm: "OBS4-HMAC-SHA256",
    v4_boundary: "obs4_request",
    schema: SCHEMA_HTTPS,
    access_bucket_uri: false,
    signed_bucket_uri: false,
    signed_host_header: true,
    // With x-obs-date present, the V2 date slot must stay empty.
    signed_date_header: false,
    date_header: "x-obs-date",
    content_sha256_header: "x-obs-content-sha256",
    storage_headers: &[
        ("x-obs-server-side-encryption", "AES256"),
        ("x-obs-acl", "private"),
    ],
    v2_query_params: V2QueryParams {
        access_key_id: "AccessKeyId",
        expires: "Expires",
        signature: "Signature",
    },
    v4_query_params: V4QueryParams {
        algorithm: "X-Obs-Algorithm",
        credential: "X-Obs-Credential",
        date: "X-Obs-Date",
        expires: "X-Obs-Expires",
        signed_headers: "X-Obs-SignedHeaders",
        signature: "X-Obs-Signature",
    },
};

/// Amazon S3.
pub static AWS: Profile = Profile {
    v2_code: "AWS",
    v4_code: "AWS4",
    v4_service: "s3",
    v4_algorithm: "AWS4-HMAC-SHA256",
    v4_boundary: "aws4_request",
    schema: SCHEMA_HTTPS,
    access_bucket_uri: false,
    signed_bucket_uri: false,
    signed_host_header: true,
    signed_date_header: true,
    date_header: "x-amz-date",
    content_sha256_header: "x-amz-content-sha256",
    storage_headers: &[
        ("x-amz-server-side-encryption", "AES256"),
        ("x-amz-acl", "private"),
    ],
    v2_query_params: V2QueryParams {
        access_key_id: "AWSAccessKeyId",
        expires: "Expires",
        signature: "Signature",
    },
    v4_query_params: V4QueryParams {
        algorithm: "X-Amz-Algorithm",
        credential: "X-Amz-Credential",
        date: "X-Amz-Date",
        expires: "X-Amz-Expires",
        signed_headers: "X-Amz-SignedHeaders",
        signature: "X-Amz-Signature",
    },
};

/// MinIO speaks the AWS dialect but cannot honor server-side encryption.
pub static MINIO: Profile = Profile {
    v2_code: "AWS",
    v4_code: "AWS4",
    v4_service: "s3",
    v4_algorithm: "AWS4-HMAC-SHA256",
    v4_boundary: "aws4_request",
    schema: SCHEMA_HTTPS,
    access_bucket_uri: false,
    signed_bucket_uri: false,
    signed_host_header: true,
    signed_date_header: true,
    date_header: "x-amz-date",
    content_sha256_header: "x-amz-content-sha256",
    storage_headers: &[("x-amz-acl", "private")],
    v2_query_params: V2QueryParams {
        access_key_id: "AWSAccessKeyId",
        expires: "Expires",
        signature: "Signature",
    },
    v4_query_params: V4QueryParams {
        algorithm: "X-Amz-Algorithm",
        credential: "X-Amz-Credential",
        date: "X-Amz-Date",
        expires: "X-Amz-Expires",
        signed_headers: "X-Amz-SignedHeaders",
        signature: "X-Amz-Signature",
    },
};

/// Alibaba OSS. V4 only in practice; a V2 selection still builds requests
/// but is not expected to authenticate.
pub static OSS: Profile = Profile {
    v2_code: "OSS",
    v4_code: "aliyun_v4",
    v4_service: "oss",
    v4_algorithm: "OSS4-HMAC-SHA256",
    v4_boundary: "aliyun_v4_request",
    schema: SCHEMA_HTTPS,
    access_bucket_uri: false,
    // OSS signs /<bucket>/<key> while accessing /<key>.
    signed_bucket_uri: true,
    // OSS lists extra headers as "additional headers" instead of
    // SignedHeaders, and host is not one of them.
    signed_host_header: false,
    signed_date_header: false,
    date_header: "x-oss-date",
    content_sha256_header: "x-oss-content-sha256",
    storage_headers: &[
        ("x-oss-server-side-encryption", "AES256"),
        ("x-oss-acl", "private"),
    ],
    v2_query_params: V2QueryParams {
        access_key_id: "AccessKeyId",
        expires: "Expires",
        signature: "Signature",
    },
    v4_query_params: V4QueryParams {
        algorithm: "X-Oss-Signature-Version",
        credential: "X-Oss-Credential",
        date: "X-Oss-Date",
        expires: "X-Oss-Expires",
        signed_headers: "X-Oss-Signed-headers",
        signature: "X-Oss-Signature",
    },
};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_algorithm_tokens_follow_code() {
        for p in [&KS3, &OBS, &AWS, &MINIO, &OSS] {
            assert!(p.v4_algorithm.ends_with("-HMAC-SHA256"), "{}", p.v4_algorithm);
            assert!(p.date_header.starts_with("x-"), "{}", p.date_header);
            assert_eq!(p.schema, SCHEMA_HTTPS);
        }
    }

    #[test]
    fn test_oss_is_the_only_bucket_signing_dialect() {
        assert!(OSS.signed_bucket_uri);
        assert!(!OSS.signed_host_header);
        for p in [&KS3, &OBS, &AWS, &MINIO] {
            assert!(!p.signed_bucket_uri);
            assert!(p.signed_host_header);
        }
    }
}
