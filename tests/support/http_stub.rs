// ABOUTME: Minimal one-shot HTTP server for exercising HTTP clients.
// ABOUTME: Serves a canned response to the first connection and returns the raw request.

use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;
use tokio::task::JoinHandle;

/// A running stub. `base_url` has no trailing slash.
pub struct HttpStub {
    pub base_url: String,
    request: JoinHandle<String>,
}

impl HttpStub {
    /// Serve `status` (e.g. `200 OK`) with a JSON `body` to one request.
    pub async fn serve_once(status: &str, body: &str) -> Self {
        let listener = TcpListener::bind("127.0.0.1:0")
            .await
            .expect("bind stub listener");
        let addr = listener.local_addr().expect("stub address");

        let response = format!(
            "HTTP/1.1 {status}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{body}",
            body.len()
        );

        let request = tokio::spawn(async move {
            let (mut socket, _) = listener.accept().await.expect("accept");
            let mut buf = Vec::new();
            let mut chunk = [0u8; 1024];
            loop {
                let n = socket.read(&mut chunk).await.expect("read request");
                if n == 0 {
                    break;
                }
                buf.extend_from_slice(&chunk[..n]);
                if buf.windows(4).any(|w| w == b"\r\n\r\n") {
                    break;
                }
            }
            socket
                .write_all(response.as_bytes())
                .await
                .expect("write response");
            socket.shutdown().await.ok();
            String::from_utf8_lossy(&buf).to_string()
        });

        Self {
            base_url: format!("http://{addr}"),
            request,
        }
    }

    /// The raw request the stub received.
    pub async fn request(self) -> String {
        self.request.await.expect("stub task")
    }
}

/// URL on which nothing is listening.
pub async fn closed_port_url() -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind");
    let addr = listener.local_addr().expect("address");
    drop(listener);
    format!("http://{addr}")
}
