use std::fmt;

use http::StatusCode;
use thiserror::Error;

/// The error type for storage operations.
#[derive(Error, Debug)]
#[error("{message}")]
pub struct Error {
    kind: ErrorKind,
    message: String,
    status: Option<StatusCode>,
    #[source]
    source: Option<anyhow::Error>,
}

/// The kind of error that occurred.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Configuration error (missing fields, invalid values)
    ConfigInvalid,

    /// Request cannot be built or signed
    RequestInvalid,

    /// The response status is neither 200 nor the expected status
    InvalidStatus,

    /// The upload-part response carries no `ETag` header
    EtagMissing,

    /// A response body failed to decode as XML
    XmlDecode,

    /// Propagated from the HTTP transport
    Transport,
}

impl Error {
    /// Create a new error with the given kind and message.
    pub fn new(kind: ErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
            status: None,
            source: None,
        }
    }

    /// Add a source error.
    pub fn with_source(mut self, source: impl Into<anyhow::Error>) -> Self {
        self.source = Some(source.into());
        self
    }

    /// Get the error kind.
    pub fn kind(&self) -> ErrorKind {
        self.kind
    }

    /// The HTTP status carried by an [`ErrorKind::InvalidStatus`] error.
    pub fn status(&self) -> Option<StatusCode> {
        self.status
    }
}

// Convenience constructors
impl Error {
    /// Create a config invalid error.
    pub fn config_invalid(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::ConfigInvalid, message)
    }

    /// Create a request invalid error.
    pub fn request_invalid(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::RequestInvalid, message)
    }

    /// Create an invalid status error carrying the response body.
    pub fn invalid_status(status: StatusCode, body: &str) -> Self {
        let mut err = Self::new(
            ErrorKind::InvalidStatus,
            format!("invalid status({}): {}", status.as_u16(), body),
        );
        err.status = Some(status);
        err
    }

    /// Create an etag missing error.
    pub fn etag_missing() -> Self {
        Self::new(ErrorKind::EtagMissing, "Etag not found")
    }

    /// Create an xml decode error.
    pub fn xml_decode(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::XmlDecode, message)
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ErrorKind::ConfigInvalid => write!(f, "invalid configuration"),
            ErrorKind::RequestInvalid => write!(f, "invalid request"),
            ErrorKind::InvalidStatus => write!(f, "invalid status"),
            ErrorKind::EtagMissing => write!(f, "etag missing"),
            ErrorKind::XmlDecode => write!(f, "xml decode failed"),
            ErrorKind::Transport => write!(f, "transport failed"),
        }
    }
}

/// Convenience type alias for Results.
pub type Result<T> = std::result::Result<T, Error>;

impl From<reqwest::Error> for Error {
    fn from(err: reqwest::Error) -> Self {
        Self::new(ErrorKind::Transport, err.to_string()).with_source(anyhow::Error::from(err))
    }
}

impl From<quick_xml::DeError> for Error {
    fn from(err: quick_xml::DeError) -> Self {
        Self::xml_decode(err.to_string()).with_source(anyhow::Error::from(err))
    }
}
