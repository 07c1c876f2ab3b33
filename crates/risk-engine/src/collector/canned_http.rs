//! One-shot HTTP/1.1 server for collector tests
//!
//! Answers each accepted connection with the next canned response, in order,
//! and hands back the request heads it saw.

use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;
use tokio::task::JoinHandle;

pub(crate) struct CannedServer {
    pub base_url: String,
    handle: JoinHandle<Vec<String>>,
}

impl CannedServer {
    /// Bind an ephemeral port and serve `responses` as `(status, json body)`
    pub async fn start(responses: Vec<(u16, &'static str)>) -> Self {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let base_url = format!("http://{}", listener.local_addr().unwrap());

        let handle = tokio::spawn(async move {
            let mut heads = Vec::new();
            for (status, body) in responses {
                let (mut socket, _) = listener.accept().await.unwrap();

                let mut raw = Vec::new();
                let mut buf = [0u8; 1024];
                while !raw.windows(4).any(|w| w == b"\r\n\r\n") {
                    let n = socket.read(&mut buf).await.unwrap();
                    if n == 0 {
                        break;
                    }
                    raw.extend_from_slice(&buf[..n]);
                }
                heads.push(String::from_utf8_lossy(&raw).into_owned());

                let response = format!(
                    "HTTP/1.1 {status} Canned\r\ncontent-type: application/json\r\n\
                     content-length: {}\r\nconnection: close\r\n\r\n{body}",
                    body.len()
                );
                socket.write_all(response.as_bytes()).await.unwrap();
                socket.shutdown().await.unwrap();
            }
            heads
        });

        Self { base_url, handle }
    }

    /// Request heads in arrival order; waits until every response was served
    pub async fn requests(self) -> Vec<String> {
        self.handle.await.unwrap()
    }
}

/// First line of a request head, e.g. `GET /path?query HTTP/1.1`
pub(crate) fn request_line(head: &str) -> &str {
    head.lines().next().unwrap_or_default()
}
