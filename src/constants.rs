use percent_encoding::AsciiSet;
use percent_encoding::NON_ALPHANUMERIC;

// Headers are kept lowercase everywhere so canonical sorting never re-cases.
pub const HEADER_AUTHORIZATION: &str = "authorization";
pub const HEADER_CONTENT_TYPE: &str = "content-type";
pub const HEADER_CONTENT_MD5: &str = "content-md5";
pub const HEADER_RANGE: &str = "range";
pub const HEADER_HOST: &str = "host";

/// Sentinel body hash declaring that the payload is not bound to the signature.
pub const UNSIGNED_PAYLOAD: &str = "UNSIGNED-PAYLOAD";

/// Content type applied when the storage config leaves it empty.
pub const DEFAULT_CONTENT_TYPE: &str = "application/octet-stream";

/// AsciiSet matching Go's `url.PathEscape`, which the vendors' canonical
/// strings are built with.
///
/// Escapes every byte except the unreserved characters
/// (`A`-`Z`, `a`-`z`, `0`-`9`, `-`, `.`, `_`, `~`) and `$&+:=?@`.
/// Note that `/` IS escaped, which is what turns a V4 credential scope into
/// `access%2Fdate%2Fregion%2Fservice%2Fboundary` inside canonical queries.
pub static PATH_ENCODE_SET: AsciiSet = NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'.')
    .remove(b'_')
    .remove(b'~')
    .remove(b'$')
    .remove(b'&')
    .remove(b'+')
    .remove(b':')
    .remove(b'=')
    .remove(b'?')
    .remove(b'@');

/// AsciiSet matching Go's `url.QueryEscape`, used for pre-signed link output.
///
/// Escapes every byte except the unreserved characters, so the `+`, `/` and
/// `=` of a base64 V2 signature all get percent-encoded.
pub static QUERY_ENCODE_SET: AsciiSet = NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'.')
    .remove(b'_')
    .remove(b'~');
