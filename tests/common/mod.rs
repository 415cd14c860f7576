//! Shared utilities for integration testing.

use std::net::SocketAddr;
use std::time::Duration;

use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::{TcpListener, TcpStream};
use tokio::sync::mpsc;

use model_gateway::config::{BackendConfig, GatewayConfig};
use model_gateway::http::HttpServer;
use model_gateway::lifecycle::Shutdown;

/// Start the gateway on an ephemeral port.
///
/// The returned [`Shutdown`] must be kept alive for the lifetime of the
/// test; dropping it closes the broadcast channel and stops the server.
pub async fn spawn_gateway(config: GatewayConfig) -> (SocketAddr, Shutdown) {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    let shutdown = Shutdown::new();
    let rx = shutdown.subscribe();
    let server = HttpServer::new(config).unwrap();

    tokio::spawn(async move {
        let _ = server.run(listener, rx).await;
    });

    // Give the accept loop a moment to come up.
    tokio::time::sleep(Duration::from_millis(50)).await;

    (addr, shutdown)
}

/// Config with a single model mapped to the given backend address.
pub fn single_backend_config(model: &str, backend: SocketAddr) -> GatewayConfig {
    let mut config = GatewayConfig::default();
    config.backends = vec![BackendConfig {
        model: model.to_string(),
        origin: format!("http://{}", backend),
    }];
    config
}

/// A non-pooling client so each test request uses a fresh connection.
pub fn test_client() -> reqwest::Client {
    reqwest::Client::builder()
        .pool_max_idle_per_host(0)
        .no_proxy()
        .build()
        .unwrap()
}

/// Read one HTTP request (head + content-length body) off a socket.
async fn read_request(socket: &mut TcpStream) -> String {
    let mut buf = Vec::new();
    let mut chunk = [0u8; 4096];

    let head_end = loop {
        let n = socket.read(&mut chunk).await.unwrap();
        if n == 0 {
            break buf.len();
        }
        buf.extend_from_slice(&chunk[..n]);
        if let Some(pos) = find_head_end(&buf) {
            break pos;
        }
    };

    let head = String::from_utf8_lossy(&buf[..head_end]).to_string();
    let content_length = head
        .lines()
        .find_map(|line| {
            let (name, value) = line.split_once(':')?;
            if name.trim().eq_ignore_ascii_case("content-length") {
                value.trim().parse::<usize>().ok()
            } else {
                None
            }
        })
        .unwrap_or(0);

    let body_start = head_end + 4;
    while buf.len() < body_start + content_length {
        let n = socket.read(&mut chunk).await.unwrap();
        if n == 0 {
            break;
        }
        buf.extend_from_slice(&chunk[..n]);
    }

    String::from_utf8_lossy(&buf).to_string()
}

fn find_head_end(buf: &[u8]) -> Option<usize> {
    buf.windows(4).position(|w| w == b"\r\n\r\n")
}

/// Start a mock backend that captures each request and answers 200 "ok".
///
/// Captured requests (head + body, as text) arrive on the returned channel.
/// The response carries an `x-backend` marker header and a
/// `content-encoding` header that the gateway is expected to strip.
pub async fn start_capture_backend() -> (SocketAddr, mpsc::UnboundedReceiver<String>) {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let (tx, rx) = mpsc::unbounded_channel();

    tokio::spawn(async move {
        loop {
            match listener.accept().await {
                Ok((mut socket, _)) => {
                    let tx = tx.clone();
                    tokio::spawn(async move {
                        let captured = read_request(&mut socket).await;
                        let _ = tx.send(captured);

                        let response = "HTTP/1.1 200 OK\r\n\
                             Content-Length: 2\r\n\
                             Content-Type: text/plain\r\n\
                             x-backend: capture\r\n\
                             content-encoding: identity\r\n\
                             Connection: close\r\n\r\nok";
                        let _ = socket.write_all(response.as_bytes()).await;
                        let _ = socket.shutdown().await;
                    });
                }
                Err(_) => break,
            }
        }
    });

    (addr, rx)
}

/// Start a mock backend that streams chunks with delays between them.
pub async fn start_streaming_backend(chunks: Vec<&'static str>) -> SocketAddr {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    tokio::spawn(async move {
        loop {
            match listener.accept().await {
                Ok((mut socket, _)) => {
                    let chunks = chunks.clone();
                    tokio::spawn(async move {
                        let _ = read_request(&mut socket).await;

                        let head = "HTTP/1.1 200 OK\r\n\
                             Content-Type: text/plain\r\n\
                             Transfer-Encoding: chunked\r\n\
                             Connection: close\r\n\r\n";
                        let _ = socket.write_all(head.as_bytes()).await;
                        let _ = socket.flush().await;

                        for chunk in chunks {
                            let frame = format!("{:x}\r\n{}\r\n", chunk.len(), chunk);
                            let _ = socket.write_all(frame.as_bytes()).await;
                            let _ = socket.flush().await;
                            tokio::time::sleep(Duration::from_millis(50)).await;
                        }

                        let _ = socket.write_all(b"0\r\n\r\n").await;
                        let _ = socket.shutdown().await;
                    });
                }
                Err(_) => break,
            }
        }
    });

    addr
}

/// Reserve a port with no listener behind it, for connection-refused tests.
pub async fn unreachable_addr() -> SocketAddr {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    addr
}
