//! The request descriptor handed from the signers to the transport.

use std::collections::HashMap;

use http::{Method, StatusCode};

use crate::config::StorageConfig;
use crate::context::ProviderContext;
use crate::profile::Profile;

/// Everything the transport needs to issue one signed request.
///
/// Header names are emitted exactly as they must appear on the wire:
/// lowercase signed names, with `host` re-cased to `Host` so HTTP stacks
/// that add their own `Host` do not end up sending two.
#[derive(Debug, Clone)]
pub struct RequestSetting {
    /// Expected success status of the response.
    pub status: StatusCode,
    pub method: Method,
    pub url: String,
    pub headers: HashMap<String, String>,
}

/// Assemble the access URL: `<schema>://<domain>[/<bucket>]/<key>[?…]`.
///
/// Query names and values are written raw. The signers canonicalize an
/// escaped copy of the same pairs, so both sides of the signature see one
/// consistent spelling.
pub(crate) fn access_url(
    profile: &Profile,
    config: &StorageConfig,
    ctx: &ProviderContext,
) -> String {
    let mut bf = crate::pool::borrow_buffer();

    bf.push_str(profile.schema);
    bf.push_str("://");
    bf.push_str(&config.domain);
    bf.push('/');
    if profile.access_bucket_uri {
        bf.push_str(&config.bucket);
        bf.push('/');
    }
    bf.push_str(&ctx.object_key);
    if !ctx.signed_queries.is_empty() {
        bf.push('?');
        for (i, v) in ctx.signed_queries.values().iter().enumerate() {
            if i > 0 {
                bf.push('&');
            }
            bf.push_str(&v.name);
            if !v.text.is_empty() {
                bf.push('=');
                bf.push_str(&v.text);
            }
        }
    }
    bf.clone()
}
