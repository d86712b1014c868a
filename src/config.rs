//! Client, storage and signing configuration.

use std::fmt;
use std::str::FromStr;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::Error;
use crate::profile::{self, Profile};

/// Supported S3-compatible vendors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Vendor {
    /// Kingsoft KS3
    Ks3,
    /// Huawei OBS
    Obs,
    /// Amazon S3
    Aws,
    /// MinIO
    Minio,
    /// Alibaba OSS
    Oss,
}

impl Vendor {
    /// The dialect descriptor of this vendor.
    pub fn profile(&self) -> &'static Profile {
        match self {
            Vendor::Ks3 => &profile::KS3,
            Vendor::Obs => &profile::OBS,
            Vendor::Aws => &profile::AWS,
            Vendor::Minio => &profile::MINIO,
            Vendor::Oss => &profile::OSS,
        }
    }
}

impl FromStr for Vendor {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "ks3" => Ok(Vendor::Ks3),
            "obs" => Ok(Vendor::Obs),
            "aws" => Ok(Vendor::Aws),
            "minio" => Ok(Vendor::Minio),
            "oss" => Ok(Vendor::Oss),
            v => Err(Error::config_invalid(format!("unknown vendor: {v}"))),
        }
    }
}

impl fmt::Display for Vendor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Vendor::Ks3 => "ks3",
            Vendor::Obs => "obs",
            Vendor::Aws => "aws",
            Vendor::Minio => "minio",
            Vendor::Oss => "oss",
        };
        f.write_str(s)
    }
}

/// Signature algorithm selector.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SignatureVersion {
    /// Legacy HMAC-SHA1 signing.
    #[default]
    V2,
    /// AWS-style HMAC-SHA256 signing with scoped key derivation.
    V4,
}

/// Transport tunables for the shared HTTP client.
///
/// Zero durations and sizes fall back to the defaults in [`crate::client`].
/// Connection reuse is disabled by the client builder, so the per-host
/// connection limits and the buffer sizes are carried for config
/// compatibility; the reqwest transport has no equivalent knobs.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ClientConfig {
    /// Connect timeout in seconds (default 20s).
    pub dialer_timeout: u64,
    /// TCP keep-alive interval in seconds (default 20s).
    pub dialer_keep_alive: u64,
    /// TLS handshake timeout in seconds (default 10s).
    pub tls_handshake_timeout: u64,
    /// Max idle connections per host (default 64).
    pub max_idle_conns_per_host: usize,
    /// Max connections per host (default 2048).
    pub max_conns_per_host: usize,
    /// Idle connection timeout in seconds (default 20s).
    pub idle_conn_timeout: u64,
    /// Write buffer size in bytes (default 512 KiB).
    pub write_buffer_size: usize,
    /// Read buffer size in bytes (default 512 KiB).
    pub read_buffer_size: usize,
    /// Skip TLS certificate verification (default false).
    pub insecure_skip_verify: bool,
}

impl ClientConfig {
    pub(crate) fn duration_or(value: u64, default: Duration) -> Duration {
        if value == 0 {
            default
        } else {
            Duration::from_secs(value)
        }
    }
}

/// Per-bucket storage configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct StorageConfig {
    /// Access key id.
    pub access: String,
    /// Secret access key.
    pub secret: String,
    /// Region dimension of the V4 scope.
    pub region: String,
    /// Bucket name.
    pub bucket: String,
    /// Endpoint host the client talks to.
    pub domain: String,
    /// Content type for uploads; defaults to `application/octet-stream`.
    pub content_type: String,
}

/// Unified client configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    #[serde(flatten)]
    pub client: ClientConfig,
    #[serde(flatten)]
    pub storage: StorageConfig,
    /// Signature version; defaults to V2.
    pub signature: SignatureVersion,
    /// Prefix prepended to every object key before signing.
    pub prefix: String,
    /// Vendor dialect selector.
    pub vendor: Option<Vendor>,
}
