//! Shared HTTP client construction.

use std::time::Duration;

use crate::config::ClientConfig;
use crate::error::{Error, Result};

const DEFAULT_DIALER_TIMEOUT: Duration = Duration::from_secs(20);
const DEFAULT_DIALER_KEEP_ALIVE: Duration = Duration::from_secs(20);
const DEFAULT_IDLE_CONN_TIMEOUT: Duration = Duration::from_secs(20);

/// Build the shared client from the transport tunables.
///
/// Proxy environment variables (`HTTP_PROXY`, `HTTPS_PROXY`, `NO_PROXY`)
/// are honored by reqwest's system proxy detection. Connection reuse is
/// turned off: chunked uploads over a reused connection have surfaced as
/// `UnexpectedEOF` against some vendors, so every request dials fresh.
pub(crate) fn build_client(c: &ClientConfig) -> Result<reqwest::Client> {
    let builder = reqwest::Client::builder()
        .connect_timeout(ClientConfig::duration_or(
            c.dialer_timeout,
            DEFAULT_DIALER_TIMEOUT,
        ))
        .tcp_keepalive(ClientConfig::duration_or(
            c.dialer_keep_alive,
            DEFAULT_DIALER_KEEP_ALIVE,
        ))
        .pool_idle_timeout(ClientConfig::duration_or(
            c.idle_conn_timeout,
            DEFAULT_IDLE_CONN_TIMEOUT,
        ))
        .pool_max_idle_per_host(0)
        .danger_accept_invalid_certs(c.insecure_skip_verify);

    builder.build().map_err(|e| {
        Error::config_invalid(format!("failed to build http client: {e}")).with_source(e)
    })
}
