use std::time::{Duration, Instant};

use mssqlinfo_core::browser::{BrowserClient, InstanceQuery};
use mssqlinfo_core::error::BrowserError;
use mssqlinfo_core::response::{self, InstanceInfo};
use tokio::net::UdpSocket;

const CANNED_REPLY: &[u8] =
    b"\x05\x42\x00ServerName;HOST1;InstanceName;SQLEXPRESS;IsClustered;No;tcp;49812;";

fn loopback_query(instance: &str, port: u16) -> InstanceQuery {
    InstanceQuery {
        host: "127.0.0.1".to_string(),
        instance: instance.to_string(),
        port,
    }
}

/// Binds a one-shot fake browser on loopback that records the request it
/// receives and answers with `CANNED_REPLY`.
async fn spawn_fake_browser() -> (u16, tokio::task::JoinHandle<Vec<u8>>) {
    let socket: UdpSocket = UdpSocket::bind("127.0.0.1:0")
        .await
        .expect("binding fake browser socket");
    let port: u16 = socket.local_addr().expect("local addr").port();

    let handle = tokio::spawn(async move {
        let mut buf = [0u8; 1024];
        let (received, peer) = socket.recv_from(&mut buf).await.expect("receiving request");
        socket
            .send_to(CANNED_REPLY, peer)
            .await
            .expect("sending canned reply");
        buf[..received].to_vec()
    });

    (port, handle)
}

#[tokio::test]
async fn query_sends_framed_request_and_parses_reply() {
    let (port, browser) = spawn_fake_browser().await;

    let client: BrowserClient = BrowserClient::with_timeout(Duration::from_secs(2));
    let raw = client
        .query(&loopback_query("SQLEXPRESS", port))
        .await
        .expect("query against fake browser");

    let request: Vec<u8> = browser.await.expect("fake browser task");
    assert_eq!(request.len(), "SQLEXPRESS".len() + 1);
    assert_eq!(request[0], 0x04);
    assert_eq!(&request[1..], b"SQLEXPRESS");

    let info: InstanceInfo = response::parse(raw);
    assert_eq!(info.get("ServerName"), Some("HOST1"));
    assert_eq!(info.get("InstanceName"), Some("SQLEXPRESS"));
    assert_eq!(info.get("IsClustered"), Some("No"));
    assert_eq!(info.get("tcp"), Some("49812"));
}

#[tokio::test]
async fn empty_instance_name_sends_single_marker_byte() {
    let (port, browser) = spawn_fake_browser().await;

    let client: BrowserClient = BrowserClient::with_timeout(Duration::from_secs(2));
    client
        .query(&loopback_query("", port))
        .await
        .expect("query with empty instance name");

    let request: Vec<u8> = browser.await.expect("fake browser task");
    assert_eq!(request, vec![0x04]);
}

#[tokio::test]
async fn silent_peer_times_out_after_configured_bound() {
    // Bound but never reads or replies.
    let socket: UdpSocket = UdpSocket::bind("127.0.0.1:0").await.expect("binding silent socket");
    let port: u16 = socket.local_addr().expect("local addr").port();

    let bound: Duration = Duration::from_millis(300);
    let client: BrowserClient = BrowserClient::with_timeout(bound);

    let start: Instant = Instant::now();
    let result = client.query(&loopback_query("MSSQLSERVER", port)).await;
    let elapsed: Duration = start.elapsed();

    assert!(
        matches!(result, Err(BrowserError::Timeout { .. })),
        "expected timeout, got {result:?}"
    );
    assert!(elapsed >= bound, "timed out early after {elapsed:?}");
    assert!(
        elapsed < bound * 10,
        "timeout took far too long: {elapsed:?}"
    );
}

#[tokio::test]
#[cfg(target_os = "linux")]
async fn refused_port_fails_fast_with_connection_error() {
    // Grab a free port, then close it again so the query hits a port with no
    // listener. Loopback answers with ICMP port unreachable, which surfaces
    // on the connected socket as a receive error well before the timeout.
    let port: u16 = {
        let probe: UdpSocket = UdpSocket::bind("127.0.0.1:0").await.expect("probing free port");
        probe.local_addr().expect("local addr").port()
    };

    let client: BrowserClient = BrowserClient::with_timeout(Duration::from_secs(10));

    let start: Instant = Instant::now();
    let result = client.query(&loopback_query("MSSQLSERVER", port)).await;
    let elapsed: Duration = start.elapsed();

    assert!(
        matches!(result, Err(BrowserError::Connection { .. })),
        "expected connection error, got {result:?}"
    );
    assert!(
        elapsed < Duration::from_secs(2),
        "refusal should not wait out the timeout, took {elapsed:?}"
    );
}

#[tokio::test]
async fn unresolvable_host_is_a_connection_error() {
    let query = InstanceQuery {
        host: "browser-test.invalid".to_string(),
        instance: "MSSQLSERVER".to_string(),
        port: 1434,
    };

    let client: BrowserClient = BrowserClient::with_timeout(Duration::from_secs(2));
    let result = client.query(&query).await;

    assert!(
        matches!(result, Err(BrowserError::Connection { .. })),
        "expected connection error, got {result:?}"
    );
}
