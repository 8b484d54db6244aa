//! # SQL Server Browser Client
//!
//! Performs the single UDP request/response exchange with the SQL Server
//! Browser service. The browser listens on port 1434 and answers discovery
//! queries about named instances, including the TCP port a named instance
//! was dynamically assigned.
//!
//! One call to [`BrowserClient::query`] owns its socket exclusively for the
//! duration of the exchange and releases it on every exit path. There is no
//! connection state, no pooling and no retrying.

use std::time::Duration;

use tokio::net::UdpSocket;
use tokio::time::timeout;
use tracing::{debug, trace};

use crate::error::BrowserError;

pub const DEFAULT_BROWSER_HOST: &str = "localhost";
pub const DEFAULT_BROWSER_PORT: u16 = 1434;
pub const DEFAULT_INSTANCE_NAME: &str = "MSSQLSERVER";

/// Message-type marker for a client discovery request targeting a named instance.
const CLNT_UCAST_INST: u8 = 0x04;

/// Responses larger than this are truncated silently, matching the protocol's
/// practical datagram sizes.
const RECV_BUFFER_SIZE: usize = 1024;

const DEFAULT_RECV_TIMEOUT: Duration = Duration::from_secs(10);

/// Input parameters for one instance lookup.
#[derive(Clone, Debug)]
pub struct InstanceQuery {
    /// Hostname or network address running the SQL Server Browser.
    pub host: String,
    /// Instance name, sent case-sensitively. May be empty; the request is
    /// still framed.
    pub instance: String,
    /// UDP port of the browser service.
    pub port: u16,
}

impl Default for InstanceQuery {
    fn default() -> Self {
        Self {
            host: DEFAULT_BROWSER_HOST.to_string(),
            instance: DEFAULT_INSTANCE_NAME.to_string(),
            port: DEFAULT_BROWSER_PORT,
        }
    }
}

/// Raw datagram bytes received from the browser service.
///
/// Produced by exactly one query and consumed by value by exactly one
/// [`crate::response::parse`] call.
#[derive(Debug)]
pub struct RawResponse(Vec<u8>);

impl RawResponse {
    pub fn into_bytes(self) -> Vec<u8> {
        self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl From<Vec<u8>> for RawResponse {
    fn from(bytes: Vec<u8>) -> Self {
        Self(bytes)
    }
}

/// UDP client for the SQL Server Browser service.
pub struct BrowserClient {
    recv_timeout: Duration,
}

impl BrowserClient {
    pub fn new() -> Self {
        Self {
            recv_timeout: DEFAULT_RECV_TIMEOUT,
        }
    }

    pub fn with_timeout(recv_timeout: Duration) -> Self {
        Self { recv_timeout }
    }

    /// Sends a discovery request for `query.instance` and awaits one response
    /// datagram.
    ///
    /// Fails with [`BrowserError::Connection`] when the socket operation
    /// itself fails (unreachable, refused, DNS) and with
    /// [`BrowserError::Timeout`] when no response arrives within the
    /// configured bound. The socket is dropped before returning in all cases.
    pub async fn query(&self, query: &InstanceQuery) -> Result<RawResponse, BrowserError> {
        let host: &str = query.host.as_str();

        let socket: UdpSocket = UdpSocket::bind("0.0.0.0:0")
            .await
            .map_err(|e| BrowserError::connection(host, e))?;
        socket
            .connect((host, query.port))
            .await
            .map_err(|e| BrowserError::connection(host, e))?;

        let request: Vec<u8> = build_request(&query.instance);
        debug!(host, port = query.port, instance = %query.instance, "sending browser discovery request");
        socket
            .send(&request)
            .await
            .map_err(|e| BrowserError::connection(host, e))?;

        let mut buffer: [u8; RECV_BUFFER_SIZE] = [0u8; RECV_BUFFER_SIZE];
        match timeout(self.recv_timeout, socket.recv(&mut buffer)).await {
            Ok(Ok(received)) => {
                trace!(received, "browser response received");
                Ok(RawResponse(buffer[..received].to_vec()))
            }
            Ok(Err(e)) => Err(BrowserError::connection(host, e)),
            Err(_elapsed) => Err(BrowserError::timeout(host, self.recv_timeout)),
        }
    }
}

impl Default for BrowserClient {
    fn default() -> Self {
        Self::new()
    }
}

/// Frames a discovery request: the `0x04` marker followed by the raw bytes of
/// the instance name. No terminator, no length prefix.
pub fn build_request(instance: &str) -> Vec<u8> {
    let mut request: Vec<u8> = Vec::with_capacity(instance.len() + 1);
    request.push(CLNT_UCAST_INST);
    request.extend_from_slice(instance.as_bytes());
    request
}

// ╔════════════════════════════════════════════╗
// ║ ████████╗███████╗███████╗████████╗███████╗ ║
// ║ ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝ ║
// ║    ██║   █████╗  ███████╗   ██║   ███████╗ ║
// ║    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║ ║
// ║    ██║   ███████╗███████║   ██║   ███████║ ║
// ║    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝ ║
// ╚════════════════════════════════════════════╝
