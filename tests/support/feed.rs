use std::sync::Arc;

use parking_lot::Mutex;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;

/// A local HTTP server answering every request with the same RSS body.
pub struct FeedServer {
    pub base_url: String,
    requests: Arc<Mutex<Vec<String>>>,
}

impl FeedServer {
    pub async fn start(status: u16, body: &str) -> Self {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let requests = Arc::new(Mutex::new(Vec::new()));
        let recorded = Arc::clone(&requests);
        let body = body.to_string();

        tokio::spawn(async move {
            while let Ok((mut socket, _)) = listener.accept().await {
                let mut buf = vec![0u8; 4096];
                let n = socket.read(&mut buf).await.unwrap_or(0);
                let request = String::from_utf8_lossy(&buf[..n]).to_string();
                if let Some(line) = request.lines().next() {
                    recorded.lock().push(line.to_string());
                }
                let reason = if status == 200 { "OK" } else { "Error" };
                let response = format!(
                    "HTTP/1.1 {status} {reason}\r\nContent-Type: application/rss+xml\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{body}",
                    body.len()
                );
                let _ = socket.write_all(response.as_bytes()).await;
                let _ = socket.shutdown().await;
            }
        });

        Self {
            base_url: format!("http://{addr}/RSS.aspx"),
            requests,
        }
    }

    /// Request lines received so far, e.g. `GET /RSS.aspx?... HTTP/1.1`.
    pub fn requests(&self) -> Vec<String> {
        self.requests.lock().clone()
    }
}

/// An RSS document whose first item carries `description`.
pub fn rss(description: &str) -> String {
    format!(
        r#"<?xml version="1.0" encoding="utf-8"?>
<rss version="2.0">
  <channel>
    <title>Betfair Results</title>
    <description>Settled markets</description>
    <item>
      <title>Result</title>
      <description>{description}</description>
    </item>
  </channel>
</rss>"#
    )
}

pub const EMPTY_RSS: &str = r#"<?xml version="1.0" encoding="utf-8"?>
<rss version="2.0"><channel><title>Betfair Results</title></channel></rss>"#;
