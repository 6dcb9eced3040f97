//! Shared utilities for relay integration tests.

use std::net::SocketAddr;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use api_relay::{RelayConfig, RelayServer, Shutdown};
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::{TcpListener, TcpStream};
use tokio::sync::mpsc;

/// Request lines (`GET /path HTTP/1.1`) seen by a mock upstream.
pub type RequestLog = Arc<Mutex<Vec<String>>>;

/// Start a mock upstream that answers every request with `status` and a
/// chunked body, flushing each chunk separately with a short pause.
pub async fn start_chunked_upstream(
    status: &'static str,
    chunks: Vec<&'static str>,
) -> (SocketAddr, RequestLog) {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let log: RequestLog = Arc::new(Mutex::new(Vec::new()));
    let chunks = Arc::new(chunks);

    let seen = log.clone();
    tokio::spawn(async move {
        loop {
            match listener.accept().await {
                Ok((mut socket, _)) => {
                    let seen = seen.clone();
                    let chunks = chunks.clone();
                    tokio::spawn(async move {
                        let request_line = read_request_head(&mut socket).await;
                        seen.lock().unwrap().push(request_line);

                        let head = format!(
                            "HTTP/1.1 {}\r\nContent-Type: application/json\r\nTransfer-Encoding: chunked\r\nConnection: close\r\n\r\n",
                            status
                        );
                        let _ = socket.write_all(head.as_bytes()).await;
                        for chunk in chunks.iter() {
                            let frame = format!("{:x}\r\n{}\r\n", chunk.len(), chunk);
                            let _ = socket.write_all(frame.as_bytes()).await;
                            let _ = socket.flush().await;
                            tokio::time::sleep(Duration::from_millis(20)).await;
                        }
                        let _ = socket.write_all(b"0\r\n\r\n").await;
                        let _ = socket.shutdown().await;
                    });
                }
                Err(_) => break,
            }
        }
    });

    (addr, log)
}

/// Start a mock upstream that sends headers and one chunk, then drops the
/// connection before finishing the body.
pub async fn start_truncating_upstream() -> SocketAddr {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    tokio::spawn(async move {
        while let Ok((mut socket, _)) = listener.accept().await {
            tokio::spawn(async move {
                read_request_head(&mut socket).await;
                let _ = socket
                    .write_all(b"HTTP/1.1 200 OK\r\nContent-Length: 100\r\nConnection: close\r\n\r\npartial")
                    .await;
                let _ = socket.shutdown().await;
            });
        }
    });

    addr
}

/// How a stalled transfer ended, from the upstream's side.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StalledTransfer {
    /// The relay stayed connected and the rest of the body was sent.
    Completed,
    /// The relay closed or reset the connection mid-body.
    Abandoned,
}

/// Start a mock upstream that sends `first`, then watches the connection
/// for `stall`. If the relay closes it, the transfer is reported as
/// abandoned; otherwise `rest` is sent and the transfer reported completed.
pub async fn start_stalling_upstream(
    first: &'static str,
    rest: &'static str,
    stall: Duration,
) -> (SocketAddr, mpsc::UnboundedReceiver<StalledTransfer>) {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let (tx, rx) = mpsc::unbounded_channel();

    tokio::spawn(async move {
        while let Ok((mut socket, _)) = listener.accept().await {
            let tx = tx.clone();
            tokio::spawn(async move {
                read_request_head(&mut socket).await;

                let head = "HTTP/1.1 200 OK\r\nTransfer-Encoding: chunked\r\nConnection: close\r\n\r\n";
                let frame = format!("{:x}\r\n{}\r\n", first.len(), first);
                let _ = socket.write_all(head.as_bytes()).await;
                let _ = socket.write_all(frame.as_bytes()).await;
                let _ = socket.flush().await;

                // A GET carries no body, so any read completing here is the
                // peer's FIN (Ok(0)) or a reset.
                let mut peek = [0u8; 64];
                let outcome = match tokio::time::timeout(stall, socket.read(&mut peek)).await {
                    Err(_) => {
                        let frame = format!("{:x}\r\n{}\r\n0\r\n\r\n", rest.len(), rest);
                        match socket.write_all(frame.as_bytes()).await {
                            Ok(()) => StalledTransfer::Completed,
                            Err(_) => StalledTransfer::Abandoned,
                        }
                    }
                    Ok(_) => StalledTransfer::Abandoned,
                };
                let _ = socket.shutdown().await;
                let _ = tx.send(outcome);
            });
        }
    });

    (addr, rx)
}

/// Read until the end of the request head and return its first line.
async fn read_request_head(socket: &mut TcpStream) -> String {
    let mut buf = Vec::new();
    let mut byte = [0u8; 1024];
    while !buf.windows(4).any(|w| w == b"\r\n\r\n") {
        match socket.read(&mut byte).await {
            Ok(0) | Err(_) => break,
            Ok(n) => buf.extend_from_slice(&byte[..n]),
        }
    }
    String::from_utf8_lossy(&buf)
        .lines()
        .next()
        .unwrap_or_default()
        .to_string()
}

/// An address nothing is listening on.
pub async fn refused_addr() -> SocketAddr {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    addr
}

/// Start a relay on an ephemeral port.
pub async fn start_relay(config: RelayConfig) -> (SocketAddr, Shutdown) {
    let shutdown = Shutdown::new();
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let server = RelayServer::new(config).unwrap();
    let server_shutdown = shutdown.signal();

    tokio::spawn(async move {
        let _ = server.run(listener, server_shutdown).await;
    });

    (addr, shutdown)
}

/// Caller-side client that never goes through a system proxy.
pub fn client() -> reqwest::Client {
    reqwest::Client::builder()
        .pool_max_idle_per_host(0)
        .no_proxy()
        .build()
        .unwrap()
}

/// Relay URL for `target`.
pub fn relay_url(relay: SocketAddr, target: &str) -> reqwest::Url {
    reqwest::Url::parse_with_params(&format!("http://{}/", relay), &[("url", target)]).unwrap()
}
