//! Shared utilities for integration testing.

#![allow(dead_code)]

use std::net::SocketAddr;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use axum::{
    body::{Body, Bytes},
    extract::{Path, State},
    http::{HeaderMap, Method, StatusCode},
    response::{IntoResponse, Response},
    routing::any,
    Router,
};
use cors_relay::{RelayConfig, RelayServer, Shutdown};
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;
use tokio::sync::oneshot;

/// A running relay bound to an ephemeral loopback port.
pub struct TestRelay {
    pub addr: SocketAddr,
    shutdown: Shutdown,
}

impl TestRelay {
    /// Relay URL for the given target.
    pub fn url_for(&self, target: &str) -> String {
        format!("http://{}/?url={}", self.addr, target)
    }
}

impl Drop for TestRelay {
    fn drop(&mut self) {
        self.shutdown.trigger();
    }
}

/// Start a relay with the given configuration.
pub async fn start_relay(config: RelayConfig) -> TestRelay {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let shutdown = Shutdown::new();
    let server = RelayServer::new(config).unwrap();
    let server_shutdown = shutdown.subscribe();

    tokio::spawn(async move {
        let _ = server.run(listener, server_shutdown).await;
    });

    TestRelay { addr, shutdown }
}

/// A mock upstream that counts every request it receives.
pub struct MockUpstream {
    pub addr: SocketAddr,
    pub hits: Arc<AtomicUsize>,
}

impl MockUpstream {
    pub fn url(&self, path: &str) -> String {
        format!("http://{}{}", self.addr, path)
    }

    pub fn hits(&self) -> usize {
        self.hits.load(Ordering::SeqCst)
    }
}

/// Start the mock upstream on an ephemeral loopback port.
///
/// Routes:
/// - `/echo`: body echoed back
/// - `/headers`: received headers as `name: value` lines
/// - `/method`: request method as text
/// - `/status/{code}`: responds with `code`
/// - `/hop-headers`: response carrying hop-by-hop headers
/// - `/cors`: response carrying its own restrictive CORS header
/// - `/redirect/{n}`: endless 302 chain, tagging each hop with `x-hop`
/// - `/chain/{remaining}`: 302 chain ending in `200 done`
/// - `/stream`: chunked body of [`STREAM_CHUNKS`] chunks
/// - `/slow`: answers after three seconds
pub async fn start_upstream() -> MockUpstream {
    let hits = Arc::new(AtomicUsize::new(0));
    let app = Router::new()
        .route("/echo", any(echo))
        .route("/headers", any(dump_headers))
        .route("/method", any(|method: Method| async move { method.to_string() }))
        .route("/status/{code}", any(status))
        .route("/hop-headers", any(hop_headers))
        .route("/cors", any(restrictive_cors))
        .route("/redirect/{n}", any(endless_redirect))
        .route("/chain/{remaining}", any(finite_redirect))
        .route("/stream", any(stream))
        .route("/slow", any(slow))
        .layer(axum::middleware::from_fn_with_state(hits.clone(), count_hits));

    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        let _ = axum::serve(listener, app).await;
    });

    MockUpstream { addr, hits }
}

/// Start a raw backend that answers one request with response headers and a
/// single chunk, then stalls without finishing the body.
///
/// The receiver fires once the peer closes the connection.
pub async fn start_stalling_backend() -> (SocketAddr, oneshot::Receiver<()>) {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let (released_tx, released_rx) = oneshot::channel();

    tokio::spawn(async move {
        let Ok((mut socket, _)) = listener.accept().await else {
            return;
        };

        let mut request = Vec::new();
        let mut buf = [0u8; 1024];
        while !request.windows(4).any(|w| w == b"\r\n\r\n") {
            match socket.read(&mut buf).await {
                Ok(0) | Err(_) => return,
                Ok(n) => request.extend_from_slice(&buf[..n]),
            }
        }

        let _ = socket
            .write_all(b"HTTP/1.1 200 OK\r\nTransfer-Encoding: chunked\r\n\r\n5\r\nfirst\r\n")
            .await;

        loop {
            match socket.read(&mut buf).await {
                Ok(0) | Err(_) => break,
                Ok(_) => {}
            }
        }
        let _ = released_tx.send(());
    });

    (addr, released_rx)
}

/// Client that neither follows redirects nor picks up proxy settings.
pub fn test_client() -> reqwest::Client {
    reqwest::Client::builder()
        .redirect(reqwest::redirect::Policy::none())
        .pool_max_idle_per_host(0)
        .no_proxy()
        .build()
        .unwrap()
}

/// Deterministic payload of `len` bytes.
pub fn payload(len: usize) -> Vec<u8> {
    (0..len).map(|i| (i * 31 % 251) as u8).collect()
}

pub const STREAM_CHUNKS: usize = 5;
pub const STREAM_CHUNK_SIZE: usize = 64 * 1024;

async fn count_hits(
    State(hits): State<Arc<AtomicUsize>>,
    request: axum::extract::Request,
    next: axum::middleware::Next,
) -> Response {
    hits.fetch_add(1, Ordering::SeqCst);
    next.run(request).await
}

async fn echo(body: Bytes) -> Bytes {
    body
}

async fn dump_headers(headers: HeaderMap) -> String {
    headers
        .iter()
        .map(|(name, value)| format!("{}: {}\n", name, value.to_str().unwrap_or("<binary>")))
        .collect()
}

async fn status(Path(code): Path<u16>) -> Response {
    let status = StatusCode::from_u16(code).unwrap_or(StatusCode::OK);
    (status, format!("status {code}")).into_response()
}

async fn hop_headers() -> impl IntoResponse {
    (
        [
            ("keep-alive", "timeout=5"),
            ("proxy-authenticate", "Basic realm=\"upstream\""),
            ("trailers", "x-checksum"),
            ("x-custom", "kept"),
        ],
        "ok",
    )
}

async fn restrictive_cors() -> impl IntoResponse {
    (
        [
            ("access-control-allow-origin", "https://only.example"),
            ("access-control-allow-methods", "GET"),
        ],
        "restricted",
    )
}

async fn endless_redirect(Path(n): Path<u32>) -> impl IntoResponse {
    (
        StatusCode::FOUND,
        [
            ("location", format!("/redirect/{}", n + 1)),
            ("x-hop", n.to_string()),
        ],
    )
}

async fn finite_redirect(Path(remaining): Path<u32>) -> Response {
    if remaining == 0 {
        return "done".into_response();
    }
    (
        StatusCode::FOUND,
        [("location", format!("/chain/{}", remaining - 1))],
    )
        .into_response()
}

async fn stream() -> Response {
    let chunks = (0..STREAM_CHUNKS).map(|i| {
        Ok::<_, std::io::Error>(Bytes::from(vec![i as u8; STREAM_CHUNK_SIZE]))
    });
    Body::from_stream(futures_util::stream::iter(chunks)).into_response()
}

async fn slow() -> &'static str {
    tokio::time::sleep(Duration::from_secs(3)).await;
    "finally"
}
