//! Legacy V2 signing: HMAC-SHA1 over a canonical string, delivered either
//! as an `Authorization` header or as pre-signed query parameters.

use std::collections::HashMap;

use http::{Method, StatusCode};
use log::debug;
use percent_encoding::utf8_percent_encode;

use crate::config::StorageConfig;
use crate::constants::*;
use crate::context::{ProviderContext, Range};
use crate::hash::base64_hmac_sha1;
use crate::pool;
use crate::profile::Profile;
use crate::request::{access_url, RequestSetting};
use crate::time::{format_http_date, now, DateTime};

/// V2 signature engine for one configured bucket.
#[derive(Debug)]
pub struct V2Signer {
    prefix: String,
    config: StorageConfig,
    profile: &'static Profile,
    secret: Vec<u8>,

    time: Option<DateTime>,
}

impl V2Signer {
    /// Create a V2 signer owning its secret material.
    pub fn new(prefix: &str, config: &StorageConfig, profile: &'static Profile) -> Self {
        Self {
            prefix: prefix.to_string(),
            config: config.clone(),
            profile,
            secret: config.secret.as_bytes().to_vec(),
            time: None,
        }
    }

    /// Specify the signing time.
    ///
    /// # Note
    ///
    /// We should always take current time to sign requests.
    /// Only use this function for testing.
    #[cfg(test)]
    pub(crate) fn with_time(mut self, time: DateTime) -> Self {
        self.time = Some(time);
        self
    }

    fn get_time(&self) -> DateTime {
        self.time.unwrap_or_else(now)
    }

    fn prefixed(&self, key: &str) -> String {
        if self.prefix.is_empty() {
            key.to_string()
        } else {
            format!("{}{}", self.prefix, key)
        }
    }

    /// Pre-signed link: reserved auth parameters first, then the remaining
    /// queries, all query-escaped.
    fn link(&self, ctx: &ProviderContext, expires: &str, signature: &str) -> String {
        let mut bf = pool::borrow_buffer();

        bf.push_str(self.profile.schema);
        bf.push_str("://");
        bf.push_str(&self.config.domain);
        bf.push('/');
        if self.profile.access_bucket_uri {
            bf.push_str(&self.config.bucket);
            bf.push('/');
        }
        bf.push_str(&ctx.object_key);
        bf.push('?');
        bf.push_str(self.profile.v2_query_params.access_key_id);
        bf.push('=');
        bf.push_str(&utf8_percent_encode(&self.config.access, &QUERY_ENCODE_SET).to_string());
        bf.push('&');
        bf.push_str(self.profile.v2_query_params.expires);
        bf.push('=');
        bf.push_str(expires);
        bf.push('&');
        bf.push_str(self.profile.v2_query_params.signature);
        bf.push('=');
        bf.push_str(&utf8_percent_encode(signature, &QUERY_ENCODE_SET).to_string());
        for v in ctx.signed_queries.values() {
            bf.push('&');
            bf.push_str(&v.name);
            if !v.text.is_empty() {
                bf.push('=');
                bf.push_str(&utf8_percent_encode(&v.text, &QUERY_ENCODE_SET).to_string());
            }
        }
        bf.clone()
    }

    fn header_map(&self, ctx: &ProviderContext, signature: &str) -> HashMap<String, String> {
        let mut ret = HashMap::new();
        for v in ctx.signed_headers.values() {
            // host must become Host, or stacks that set their own end up
            // sending both spellings.
            if v.name == HEADER_HOST {
                ret.insert("Host".to_string(), v.text.clone());
            } else {
                ret.insert(v.name.clone(), v.text.clone());
            }
        }
        if !ctx.range.is_unset() {
            ret.insert(HEADER_RANGE.to_string(), ctx.range.value());
        }
        if !ctx.content_type.is_empty() {
            ret.insert(HEADER_CONTENT_TYPE.to_string(), ctx.content_type.clone());
        }
        if !ctx.content_md5.is_empty() {
            ret.insert(HEADER_CONTENT_MD5.to_string(), ctx.content_md5.clone());
        }
        ret.insert(
            HEADER_AUTHORIZATION.to_string(),
            format!("{} {}:{}", self.profile.v2_code, self.config.access, signature),
        );
        ret
    }

    /// Canonical string layout:
    ///
    /// ```text
    /// HTTP-Verb + "\n" +
    /// Content-MD5 + "\n" +
    /// Content-Type + "\n" +
    /// Date + "\n" +
    /// CanonicalizedHeaders +
    /// CanonicalizedResource
    /// ```
    ///
    /// The date slot carries the GMT timestamp, the empty string (vendors
    /// whose date header already conveys time) or the expiry epoch for
    /// pre-signed links.
    fn string_to_sign(&self, ctx: &mut ProviderContext, date: &str) -> String {
        let mut bf = pool::borrow_buffer();

        bf.push_str(ctx.method.as_str());
        bf.push('\n');
        bf.push_str(&ctx.content_md5);
        bf.push('\n');
        bf.push_str(&ctx.content_type);
        bf.push('\n');
        bf.push_str(date);
        bf.push('\n');
        for v in ctx.signed_headers.sorted_values() {
            bf.push_str(&v.name);
            bf.push(':');
            bf.push_str(&v.text);
            bf.push('\n');
        }
        bf.push('/');
        bf.push_str(&self.config.bucket);
        bf.push('/');
        bf.push_str(&ctx.object_key);
        if !ctx.signed_queries.is_empty() {
            for (i, v) in ctx.signed_queries.sorted_values().iter().enumerate() {
                bf.push(if i > 0 { '&' } else { '?' });
                bf.push_str(&utf8_percent_encode(&v.name, &PATH_ENCODE_SET).to_string());
                if !v.text.is_empty() {
                    bf.push('=');
                    bf.push_str(&utf8_percent_encode(&v.text, &PATH_ENCODE_SET).to_string());
                }
            }
        }

        bf.clone()
    }

    fn signature(&self, ctx: &mut ProviderContext, date: &str) -> String {
        let string_to_sign = self.string_to_sign(ctx, date);
        debug!("calculated string to sign: {string_to_sign}");

        base64_hmac_sha1(&self.secret, string_to_sign.as_bytes())
    }

    fn date_field<'a>(&self, gmt: &'a str) -> &'a str {
        if self.profile.signed_date_header {
            gmt
        } else {
            ""
        }
    }

    fn into_setting(&self, ctx: &ProviderContext, signature: &str) -> RequestSetting {
        RequestSetting {
            status: ctx.status,
            method: ctx.method.clone(),
            url: access_url(self.profile, &self.config, ctx),
            headers: self.header_map(ctx, signature),
        }
    }

    pub fn head_object(&self, key: &str) -> RequestSetting {
        let key = self.prefixed(key);
        let mut ctx = pool::borrow_context();

        ctx.utc = self.get_time();
        ctx.method = Method::HEAD;
        ctx.object_key = key;
        ctx.status = StatusCode::OK;

        let gmt = format_http_date(ctx.utc);
        ctx.signed_headers.add(self.profile.date_header, gmt.clone());

        let signature = self.signature(&mut ctx, self.date_field(&gmt));
        self.into_setting(&ctx, &signature)
    }

    pub fn put_object(&self, key: &str, content_md5: Option<&str>) -> RequestSetting {
        let key = self.prefixed(key);
        let mut ctx = pool::borrow_context();

        ctx.utc = self.get_time();
        ctx.method = Method::PUT;
        ctx.object_key = key;
        ctx.status = StatusCode::OK;
        ctx.content_md5 = content_md5.unwrap_or_default().to_string();
        ctx.content_type = self.config.content_type.clone();

        let gmt = format_http_date(ctx.utc);
        ctx.signed_headers.add(self.profile.date_header, gmt.clone());
        for (name, text) in self.profile.storage_headers {
            ctx.signed_headers.add(*name, *text);
        }

        let signature = self.signature(&mut ctx, self.date_field(&gmt));
        self.into_setting(&ctx, &signature)
    }

    pub fn get_object(&self, key: &str, range: Option<Range>) -> RequestSetting {
        let key = self.prefixed(key);
        let mut ctx = pool::borrow_context();

        ctx.utc = self.get_time();
        ctx.method = Method::GET;
        ctx.object_key = key;
        match range {
            Some(range) if !range.is_unset() => {
                ctx.status = StatusCode::PARTIAL_CONTENT;
                ctx.range = range;
            }
            _ => ctx.status = StatusCode::OK,
        }

        let gmt = format_http_date(ctx.utc);
        ctx.signed_headers.add(self.profile.date_header, gmt.clone());

        let signature = self.signature(&mut ctx, self.date_field(&gmt));
        self.into_setting(&ctx, &signature)
    }

    /// Pre-signed download URL. The V2 expiry is an absolute Unix epoch,
    /// which also fills the date slot of the string to sign.
    pub fn get_object_link(&self, key: &str, timeout: i64) -> String {
        let key = self.prefixed(key);
        let mut ctx = pool::borrow_context();

        ctx.utc = self.get_time();
        ctx.method = Method::GET;
        ctx.object_key = key;
        ctx.status = StatusCode::OK;

        let expires = (ctx.utc + chrono::TimeDelta::try_seconds(timeout).expect("in bounds"))
            .timestamp()
            .to_string();

        let signature = self.signature(&mut ctx, &expires);
        self.link(&ctx, &expires, &signature)
    }

    pub fn delete_object(&self, key: &str) -> RequestSetting {
        let key = self.prefixed(key);
        let mut ctx = pool::borrow_context();

        ctx.utc = self.get_time();
        ctx.method = Method::DELETE;
        ctx.object_key = key;
        ctx.status = StatusCode::NO_CONTENT;

        let gmt = format_http_date(ctx.utc);
        ctx.signed_headers.add(self.profile.date_header, gmt.clone());

        let signature = self.signature(&mut ctx, self.date_field(&gmt));
        self.into_setting(&ctx, &signature)
    }

    pub fn initiate_multipart_upload(&self, key: &str) -> RequestSetting {
        let key = self.prefixed(key);
        let mut ctx = pool::borrow_context();

        ctx.utc = self.get_time();
        ctx.method = Method::POST;
        ctx.object_key = key;
        ctx.status = StatusCode::OK;

        let gmt = format_http_date(ctx.utc);
        ctx.signed_headers.add(self.profile.date_header, gmt.clone());
        for (name, text) in self.profile.storage_headers {
            ctx.signed_headers.add(*name, *text);
        }
        // Some vendors canonicalize flag parameters as `name=`, others as a
        // bare `name`; the literal `1` satisfies both sides.
        ctx.signed_queries.add("uploads", "1");

        let signature = self.signature(&mut ctx, self.date_field(&gmt));
        self.into_setting(&ctx, &signature)
    }

    pub fn upload_part(
        &self,
        key: &str,
        upload_id: &str,
        part_number: u32,
        content_md5: Option<&str>,
    ) -> RequestSetting {
        let key = self.prefixed(key);
        let mut ctx = pool::borrow_context();

        ctx.utc = self.get_time();
        ctx.method = Method::PUT;
        ctx.object_key = key;
        ctx.status = StatusCode::OK;
        ctx.content_md5 = content_md5.unwrap_or_default().to_string();
        ctx.content_type = self.config.content_type.clone();

        let gmt = format_http_date(ctx.utc);
        ctx.signed_headers.add(self.profile.date_header, gmt.clone());
        ctx.signed_queries.add("partNumber", part_number.to_string());
        ctx.signed_queries.add("uploadId", upload_id);

        let signature = self.signature(&mut ctx, self.date_field(&gmt));
        self.into_setting(&ctx, &signature)
    }

    pub fn complete_multipart_upload(&self, key: &str, upload_id: &str) -> RequestSetting {
        let key = self.prefixed(key);
        let mut ctx = pool::borrow_context();

        ctx.utc = self.get_time();
        ctx.method = Method::POST;
        ctx.object_key = key;
        ctx.status = StatusCode::OK;

        let gmt = format_http_date(ctx.utc);
        ctx.signed_headers.add(self.profile.date_header, gmt.clone());
        ctx.signed_queries.add("uploadId", upload_id);

        let signature = self.signature(&mut ctx, self.date_field(&gmt));
        self.into_setting(&ctx, &signature)
    }

    pub fn abort_multipart_upload(&self, key: &str, upload_id: &str) -> RequestSetting {
        let key = self.prefixed(key);
        let mut ctx = pool::borrow_context();

        ctx.utc = self.get_time();
        ctx.method = Method::DELETE;
        ctx.object_key = key;
        ctx.status = StatusCode::NO_CONTENT;

        let gmt = format_http_date(ctx.utc);
        ctx.signed_headers.add(self.profile.date_header, gmt.clone());
        ctx.signed_queries.add("uploadId", upload_id);

        let signature = self.signature(&mut ctx, self.date_field(&gmt));
        self.into_setting(&ctx, &signature)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::profile;
    use chrono::TimeZone;
    use pretty_assertions::assert_eq;

    fn test_time() -> DateTime {
        chrono::Utc.with_ymd_and_hms(2024, 1, 2, 3, 4, 5).unwrap()
    }

    fn ks3_config() -> StorageConfig {
        StorageConfig {
            access: "ak".to_string(),
            secret: "sk".to_string(),
            region: "cn-beijing-6".to_string(),
            bucket: "mail".to_string(),
            domain: "mail.ks3.example.com".to_string(),
            content_type: "application/octet-stream".to_string(),
        }
    }

    fn ks3_signer() -> V2Signer {
        V2Signer::new("", &ks3_config(), &profile::KS3).with_time(test_time())
    }

    #[test]
    fn test_put_object_signs_ks3_dialect() {
        let _ = env_logger::builder().is_test(true).try_init();

        let set = ks3_signer().put_object("a/b.txt", None);

        assert_eq!(set.method, Method::PUT);
        assert_eq!(set.status, StatusCode::OK);
        assert_eq!(set.url, "https://mail.ks3.example.com/a/b.txt");
        assert_eq!(
            set.headers[HEADER_AUTHORIZATION],
            // HMAC-SHA1 over the canonical string recomputed independently
            // for this fixed timestamp.
            "KSS ak:WFPVTNhdyhb/IVRVAyBARVVCqzU="
        );
        assert_eq!(set.headers["x-kss-date"], "Tue, 02 Jan 2024 03:04:05 GMT");
        assert_eq!(set.headers["x-kss-acl"], "private");
        assert_eq!(set.headers[HEADER_CONTENT_TYPE], "application/octet-stream");
        assert!(!set.headers.contains_key(HEADER_CONTENT_MD5));
    }

    #[test]
    fn test_put_object_signs_content_md5() {
        let set = ks3_signer().put_object("a/b.txt", Some("1B2M2Y8AsgTpgAmY7PhCfg=="));
        assert_eq!(set.headers[HEADER_CONTENT_MD5], "1B2M2Y8AsgTpgAmY7PhCfg==");
    }

    #[test]
    fn test_prefix_is_part_of_key_and_url() {
        let signer = V2Signer::new("mail/", &ks3_config(), &profile::KS3).with_time(test_time());
        let set = signer.put_object("a/b.txt", None);
        assert_eq!(set.url, "https://mail.ks3.example.com/mail/a/b.txt");
    }

    #[test]
    fn test_get_object_with_range() {
        let set = ks3_signer().get_object("a/b.txt", Some(Range { start: 0, end: 1024 }));
        assert_eq!(set.status, StatusCode::PARTIAL_CONTENT);
        assert_eq!(set.headers[HEADER_RANGE], "bytes=0-1024");
    }

    #[test]
    fn test_get_object_start_only_range_is_absent() {
        // End == 0 means "no range", so a start-only range neither changes
        // the expected status nor produces a Range header.
        let set = ks3_signer().get_object("a/b.txt", Some(Range { start: 100, end: 0 }));
        assert_eq!(set.status, StatusCode::OK);
        assert!(!set.headers.contains_key(HEADER_RANGE));
    }

    #[test]
    fn test_head_and_delete_expected_status() {
        assert_eq!(ks3_signer().head_object("a/b.txt").status, StatusCode::OK);
        assert_eq!(
            ks3_signer().delete_object("a/b.txt").status,
            StatusCode::NO_CONTENT
        );
    }

    #[test]
    fn test_initiate_multipart_upload_canonical_query() {
        let signer = ks3_signer();
        let set = signer.initiate_multipart_upload("a/b.txt");
        assert_eq!(set.method, Method::POST);
        assert_eq!(set.url, "https://mail.ks3.example.com/a/b.txt?uploads=1");

        let mut ctx = ProviderContext::default();
        ctx.method = Method::POST;
        ctx.object_key = "a/b.txt".to_string();
        ctx.signed_queries.add("uploads", "1");
        let string_to_sign = signer.string_to_sign(&mut ctx, "");
        assert!(string_to_sign.ends_with("/mail/a/b.txt?uploads=1"));
    }

    #[test]
    fn test_upload_part_queries() {
        let set = ks3_signer().upload_part("a/b.txt", "upload-1", 2, None);
        assert_eq!(
            set.url,
            "https://mail.ks3.example.com/a/b.txt?partNumber=2&uploadId=upload-1"
        );
    }

    #[test]
    fn test_get_object_link_uses_absolute_epoch() {
        let url = ks3_signer().get_object_link("a/b.txt", 600);
        // 2024-01-02T03:04:05Z is epoch 1704164645; the link expires 600s
        // later. The base64 signature is query-escaped.
        assert_eq!(
            url,
            "https://mail.ks3.example.com/a/b.txt\
             ?KSSAccessKeyId=ak&Expires=1704165245&Signature=NWEosenIpmMWdaBlOntLflXjMRM%3D"
        );
    }

    #[test]
    fn test_date_slot_follows_profile() {
        let signer = ks3_signer();
        assert_eq!(signer.date_field("Tue, 02 Jan 2024 03:04:05 GMT"), "Tue, 02 Jan 2024 03:04:05 GMT");

        // OBS conveys time via x-obs-date, so the V2 date slot stays empty.
        let obs = V2Signer::new("", &ks3_config(), &profile::OBS);
        assert_eq!(obs.date_field("Tue, 02 Jan 2024 03:04:05 GMT"), "");
    }

    #[test]
    fn test_canonical_resource_always_carries_bucket() {
        let signer = ks3_signer();
        let mut ctx = ProviderContext::default();
        ctx.method = Method::GET;
        ctx.object_key = "a/b.txt".to_string();
        let string_to_sign = signer.string_to_sign(&mut ctx, "");
        assert!(string_to_sign.ends_with("/mail/a/b.txt"));
    }
}
