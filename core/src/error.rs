use std::time::Duration;

use thiserror::Error;

/// Failure kinds for a browser discovery exchange.
///
/// Callers can branch on the variant without string matching, e.g. to retry
/// with backoff on [`BrowserError::Timeout`] (this crate never retries itself).
#[derive(Debug, Error)]
pub enum BrowserError {
    /// The UDP send/receive failed at the transport or OS level: host
    /// unreachable, port refused, or DNS resolution failure.
    #[error("connection to {host} failed: {source}")]
    Connection {
        host: String,
        #[source]
        source: std::io::Error,
    },

    /// No response datagram arrived within the configured wait.
    #[error("no response from {host} within {timeout:?}")]
    Timeout { host: String, timeout: Duration },
}

impl BrowserError {
    pub fn connection(host: &str, source: std::io::Error) -> Self {
        Self::Connection {
            host: host.to_string(),
            source,
        }
    }

    pub fn timeout(host: &str, timeout: Duration) -> Self {
        Self::Timeout {
            host: host.to_string(),
            timeout,
        }
    }
}
