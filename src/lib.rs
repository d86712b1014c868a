//! Multi-vendor S3-compatible object storage client.
//!
//! One code path signs requests for five vendor dialects (Amazon S3,
//! Alibaba OSS, Huawei OBS, Kingsoft KS3 and MinIO) with either the legacy
//! V2 algorithm (HMAC-SHA1 over a canonical string) or the V4 algorithm
//! (HMAC-SHA256 with scoped key derivation). Everything a vendor does
//! differently lives in an immutable [`Profile`]; the signers themselves
//! are dialect-free.
//!
//! ## Overview
//!
//! - [`Profile`]: per-vendor dialect descriptor (prefix tokens, scope
//!   strings, canonicalization switches, pre-signed parameter names).
//! - [`Storage`]: the signer engine, V2 or V4, producing a
//!   [`RequestSetting`] per operation.
//! - [`ObjectStore`]: the async façade that issues the signed requests over
//!   reqwest and interprets the responses.
//!
//! ## Example
//!
//! ```no_run
//! use s3kit::{Config, ObjectStore, SignatureVersion, StorageConfig, Vendor};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let store = ObjectStore::new(&Config {
//!         storage: StorageConfig {
//!             access: "access_key_id".to_string(),
//!             secret: "secret_access_key".to_string(),
//!             region: "cn-beijing-6".to_string(),
//!             bucket: "mail".to_string(),
//!             domain: "mail.ks3-cn-beijing-6.ksyuncs.com".to_string(),
//!             ..Default::default()
//!         },
//!         signature: SignatureVersion::V4,
//!         vendor: Some(Vendor::Ks3),
//!         ..Default::default()
//!     })?;
//!
//!     store.put_object_data("greeting.txt", "hello".into()).await?;
//!     println!("{}", store.get_object_link("greeting.txt", 900));
//!     Ok(())
//! }
//! ```
//!
//! ## Contract notes
//!
//! - Object keys are never URL-escaped: signing and URL assembly both use
//!   the raw key, so keys containing `?`, `#` or spaces are out of contract.
//! - All payloads are signed as `UNSIGNED-PAYLOAD`; bodies are not bound to
//!   signatures.
//! - Query escaping is deliberately asymmetric per vendor behavior: raw in
//!   the access URL, path-escaped in canonical strings, query-escaped in
//!   pre-signed link output.

pub mod hash;
pub mod time;

mod constants;
mod pool;

pub mod profile;
pub use profile::{Profile, V2QueryParams, V4QueryParams};

mod config;
pub use config::{ClientConfig, Config, SignatureVersion, StorageConfig, Vendor};

mod context;
pub use context::{ProviderContext, Range, Value, Values};

mod request;
pub use request::RequestSetting;

mod error;
pub use error::{Error, ErrorKind, Result};

mod v2;
pub use v2::V2Signer;
mod v4;
pub use v4::V4Signer;

mod storage;
pub use storage::Storage;

mod multipart;
pub use multipart::Part;

mod client;
mod store;
pub use store::ObjectStore;
