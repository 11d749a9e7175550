#![allow(dead_code)]

use futures::future::BoxFuture;
use pathprobe::http::{Exchange, Transport, TransportFailure, TransportResponse};
use pathprobe::RequesterBuilder;
use reqwest::header::HeaderMap;
use reqwest::StatusCode;
use std::collections::VecDeque;
use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;

// Common test constants
pub const TEST_URL: &str = "http://example.com:8080/app";
pub const TEST_IP: IpAddr = IpAddr::V4(Ipv4Addr::new(10, 0, 0, 1));
pub const TEST_USER_AGENT: &str = "pathprobe-test-agent";

pub type Outcome = Result<TransportResponse, TransportFailure>;

/// Transport replaying scripted outcomes and recording every exchange.
pub struct ScriptedTransport {
    script: Mutex<VecDeque<Outcome>>,
    then: Outcome,
    exchanges: Mutex<Vec<Exchange>>,
}

impl ScriptedTransport {
    /// Replays `script` in order, then answers every further exchange with `then`.
    pub fn new(script: Vec<Outcome>, then: Outcome) -> Arc<Self> {
        Arc::new(Self {
            script: Mutex::new(script.into()),
            then,
            exchanges: Mutex::new(Vec::new()),
        })
    }

    pub fn always(outcome: Outcome) -> Arc<Self> {
        Self::new(Vec::new(), outcome)
    }

    pub fn exchanges(&self) -> Vec<Exchange> {
        self.exchanges.lock().unwrap().clone()
    }

    pub fn attempts(&self) -> usize {
        self.exchanges.lock().unwrap().len()
    }

    pub fn urls(&self) -> Vec<String> {
        self.exchanges().into_iter().map(|e| e.url).collect()
    }
}

impl Transport for ScriptedTransport {
    fn send(&self, exchange: Exchange) -> BoxFuture<'_, Outcome> {
        self.exchanges.lock().unwrap().push(exchange);
        let outcome = self
            .script
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| self.then.clone());
        Box::pin(async move { outcome })
    }
}

/// A successful outcome with the given status and body.
pub fn ok(status: u16, body: &str) -> Outcome {
    Ok(TransportResponse {
        status: StatusCode::from_u16(status).expect("Invalid status code"),
        headers: HeaderMap::new(),
        body: body.as_bytes().to_vec(),
    })
}

pub fn timeout() -> Outcome {
    Err(TransportFailure::Timeout("read timed out".to_string()))
}

pub fn refused() -> Outcome {
    Err(TransportFailure::Connection("connection refused".to_string()))
}

pub fn tls() -> Outcome {
    Err(TransportFailure::Tls("handshake failure".to_string()))
}

/// Builder targeting [`TEST_URL`] through `transport`, with DNS pinned to [`TEST_IP`].
pub fn scripted_builder(transport: &Arc<ScriptedTransport>) -> RequesterBuilder {
    scripted_builder_for(TEST_URL, transport)
}

pub fn scripted_builder_for(url: &str, transport: &Arc<ScriptedTransport>) -> RequesterBuilder {
    RequesterBuilder::new(url)
        .ip(TEST_IP)
        .transport(transport.clone())
}

// === Local HTTP server helpers ===

/// Request heads received by a [`serve`] server, lowercased.
pub type Received = Arc<Mutex<Vec<String>>>;

/// Serve `response` verbatim to every connection on an ephemeral local port.
///
/// Each connection is read once and then answered, so that clients speaking
/// something other than HTTP still get an answer.
pub async fn serve(response: &'static str) -> (SocketAddr, Received) {
    let listener = TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind test listener");
    let addr = listener.local_addr().expect("Failed to get local address");
    let received: Received = Arc::new(Mutex::new(Vec::new()));

    let log = received.clone();
    tokio::spawn(async move {
        while let Ok((mut stream, _)) = listener.accept().await {
            let log = log.clone();
            tokio::spawn(async move {
                let mut buf = vec![0u8; 16 * 1024];
                let read = stream.read(&mut buf).await.unwrap_or(0);
                log.lock()
                    .unwrap()
                    .push(String::from_utf8_lossy(&buf[..read]).to_ascii_lowercase());
                let _ = stream.write_all(response.as_bytes()).await;
                let _ = stream.shutdown().await;
            });
        }
    });

    (addr, received)
}

/// Accept connections on an ephemeral local port and never answer.
pub async fn serve_silently() -> SocketAddr {
    let listener = TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind test listener");
    let addr = listener.local_addr().expect("Failed to get local address");

    tokio::spawn(async move {
        let mut held = Vec::new();
        while let Ok((stream, _)) = listener.accept().await {
            held.push(stream);
        }
    });

    addr
}

/// A local address nothing listens on.
pub async fn closed_addr() -> SocketAddr {
    let listener = TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind test listener");
    listener.local_addr().expect("Failed to get local address")
}

pub const OK_RESPONSE: &str =
    "HTTP/1.1 200 OK\r\nContent-Length: 5\r\nX-Test: yes\r\nConnection: close\r\n\r\nhello";

pub const REDIRECT_RESPONSE: &str =
    "HTTP/1.1 302 Found\r\nLocation: /loop\r\nContent-Length: 0\r\nConnection: close\r\n\r\n";

/// Short timeout used against local servers.
pub const SHORT_TIMEOUT: Duration = Duration::from_millis(300);
