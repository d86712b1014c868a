//! Reusable per-request signing state.

use http::{Method, StatusCode};

use crate::time::DateTime;

const HEADERS_INIT_CAPACITY: usize = 8;
const QUERIES_INIT_CAPACITY: usize = 2;

/// A single name/text pair carried by [`Values`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Value {
    pub name: String,
    pub text: String,
}

/// An append-only list of pairs with memoized sorting.
///
/// Sorting happens in place on the first sorted read and is remembered;
/// any later [`add`](Values::add) invalidates the memo, so the next sorted
/// read sorts again. Comparison key is `(name, text)` ascending.
#[derive(Debug, Default)]
pub struct Values {
    sorted: bool,
    values: Vec<Value>,
}

impl Values {
    fn with_capacity(capacity: usize) -> Self {
        Self {
            sorted: false,
            values: Vec::with_capacity(capacity),
        }
    }

    /// Append a pair. Names going into canonical strings must already be
    /// lowercase; no re-casing happens during sort.
    pub fn add(&mut self, name: impl Into<String>, text: impl Into<String>) {
        self.sorted = false;
        self.values.push(Value {
            name: name.into(),
            text: text.into(),
        });
    }

    /// The pairs in insertion order (or in sorted order after a sorted read).
    pub fn values(&self) -> &[Value] {
        &self.values
    }

    /// The pairs sorted by `(name, text)`, sorting in place on first call.
    pub fn sorted_values(&mut self) -> &[Value] {
        if !self.sorted {
            self.values
                .sort_unstable_by(|a, b| a.name.cmp(&b.name).then_with(|| a.text.cmp(&b.text)));
            self.sorted = true;
        }
        &self.values
    }

    /// Clear the list, retaining capacity.
    pub fn reset(&mut self) {
        self.sorted = false;
        self.values.clear();
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

/// HTTP `Range` header value.
///
/// `{start: 0, end: 0}` means "no range": requesting strictly byte 0 is not
/// expressible, trading that corner for simpler state.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct Range {
    pub start: u64,
    pub end: u64,
}

impl Range {
    /// Whether this range is the "absent" sentinel.
    pub fn is_unset(&self) -> bool {
        self.start == 0 && self.end == 0
    }

    /// Render as an HTTP header value: `bytes=<start>` or
    /// `bytes=<start>-<end>`.
    pub fn value(&self) -> String {
        if self.end > 0 {
            format!("bytes={}-{}", self.start, self.end)
        } else {
            format!("bytes={}", self.start)
        }
    }
}

/// Mutable per-request state, borrowed from a process-wide pool for the
/// duration of one operation-builder call.
#[derive(Debug)]
pub struct ProviderContext {
    /// Source of both the GMT and the ISO timestamp formats.
    pub utc: DateTime,
    /// Expected success status of the response.
    pub status: StatusCode,
    pub method: Method,
    /// Object key, already carrying the configured prefix.
    pub object_key: String,
    pub content_type: String,
    pub content_md5: String,
    /// Headers participating in the signature; names are lowercase.
    pub signed_headers: Values,
    /// Queries participating in the signature and the final URL.
    pub signed_queries: Values,
    pub range: Range,
}

impl Default for ProviderContext {
    fn default() -> Self {
        Self {
            utc: DateTime::UNIX_EPOCH,
            status: StatusCode::OK,
            method: Method::GET,
            object_key: String::new(),
            content_type: String::new(),
            content_md5: String::new(),
            signed_headers: Values::with_capacity(HEADERS_INIT_CAPACITY),
            signed_queries: Values::with_capacity(QUERIES_INIT_CAPACITY),
            range: Range::default(),
        }
    }
}

impl ProviderContext {
    /// Clear every contextual field; the underlying containers retain their
    /// capacity.
    pub fn reset(&mut self) {
        self.status = StatusCode::OK;
        self.method = Method::GET;
        self.object_key.clear();
        self.content_type.clear();
        self.content_md5.clear();
        self.signed_headers.reset();
        self.signed_queries.reset();
        self.range = Range::default();
    }
}
