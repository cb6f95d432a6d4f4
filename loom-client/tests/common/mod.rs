//! Canned HTTP backend for the client suites
//!
//! Every connection carries one request; the route table answers by
//! method and path (query included) and each request is recorded.

#![allow(dead_code)]

use std::collections::HashMap;
use std::net::SocketAddr;
use std::sync::Arc;

use loom_client::{ClientConfig, HttpClient};
use parking_lot::Mutex;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::{TcpListener, TcpStream};

#[derive(Debug, Clone)]
pub struct Recorded {
    pub method: String,
    pub path: String,
    pub headers: HashMap<String, String>,
    pub body: String,
}

impl Recorded {
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(&name.to_ascii_lowercase()).map(String::as_str)
    }
}

#[derive(Clone)]
pub struct Reply {
    pub status: u16,
    pub body: String,
}

pub fn ok(body: serde_json::Value) -> Reply {
    Reply {
        status: 200,
        body: body.to_string(),
    }
}

/// `{"response": payload}`
pub fn envelope(payload: serde_json::Value) -> Reply {
    ok(serde_json::json!({ "response": payload }))
}

pub fn status(status: u16, body: &str) -> Reply {
    Reply {
        status,
        body: body.to_string(),
    }
}

pub struct CannedBackend {
    pub addr: SocketAddr,
    routes: Arc<Mutex<HashMap<(String, String), Reply>>>,
    requests: Arc<Mutex<Vec<Recorded>>>,
}

impl CannedBackend {
    pub async fn start() -> Self {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let routes: Arc<Mutex<HashMap<(String, String), Reply>>> = Arc::default();
        let requests: Arc<Mutex<Vec<Recorded>>> = Arc::default();

        let (r, q) = (routes.clone(), requests.clone());
        tokio::spawn(async move {
            while let Ok((stream, _)) = listener.accept().await {
                let (r, q) = (r.clone(), q.clone());
                tokio::spawn(async move {
                    let _ = serve(stream, r, q).await;
                });
            }
        });

        Self {
            addr,
            routes,
            requests,
        }
    }

    pub fn route(&self, method: &str, path: &str, reply: Reply) -> &Self {
        self.routes
            .lock()
            .insert((method.to_string(), path.to_string()), reply);
        self
    }

    pub fn base_url(&self) -> String {
        format!("http://{}/api", self.addr)
    }

    pub fn client(&self) -> HttpClient {
        ClientConfig::new(self.base_url())
            .with_timeout(5)
            .build_http_client()
            .unwrap()
    }

    pub fn requests(&self) -> Vec<Recorded> {
        self.requests.lock().clone()
    }

    /// Requests whose path starts with `prefix`
    pub fn hits(&self, prefix: &str) -> usize {
        self.requests
            .lock()
            .iter()
            .filter(|r| r.path.starts_with(prefix))
            .count()
    }
}

async fn serve(
    mut stream: TcpStream,
    routes: Arc<Mutex<HashMap<(String, String), Reply>>>,
    requests: Arc<Mutex<Vec<Recorded>>>,
) -> std::io::Result<()> {
    let mut buf = Vec::new();
    let mut chunk = [0u8; 4096];
    let header_end = loop {
        let n = stream.read(&mut chunk).await?;
        if n == 0 {
            return Ok(());
        }
        buf.extend_from_slice(&chunk[..n]);
        if let Some(pos) = find(&buf, b"\r\n\r\n") {
            break pos + 4;
        }
    };

    let head = String::from_utf8_lossy(&buf[..header_end]).to_string();
    let mut lines = head.split("\r\n");
    let mut request_line = lines.next().unwrap_or_default().split_whitespace();
    let method = request_line.next().unwrap_or_default().to_string();
    let target = request_line.next().unwrap_or_default().to_string();
    let headers: HashMap<String, String> = lines
        .filter_map(|l| l.split_once(':'))
        .map(|(k, v)| (k.trim().to_ascii_lowercase(), v.trim().to_string()))
        .collect();

    let chunked = headers
        .get("transfer-encoding")
        .is_some_and(|v| v.eq_ignore_ascii_case("chunked"));
    let length: usize = headers
        .get("content-length")
        .and_then(|v| v.parse().ok())
        .unwrap_or(0);
    loop {
        let body = &buf[header_end..];
        let done = if chunked {
            body.ends_with(b"0\r\n\r\n")
        } else {
            body.len() >= length
        };
        if done {
            break;
        }
        let n = stream.read(&mut chunk).await?;
        if n == 0 {
            break;
        }
        buf.extend_from_slice(&chunk[..n]);
    }

    let path = target.strip_prefix("/api/").unwrap_or(&target).to_string();
    let recorded = Recorded {
        method: method.clone(),
        path: path.clone(),
        headers,
        body: String::from_utf8_lossy(&buf[header_end..]).to_string(),
    };
    requests.lock().push(recorded);

    let reply = routes
        .lock()
        .get(&(method, path))
        .cloned()
        .unwrap_or_else(|| status(404, r#"{"message":"no such route"}"#));
    let response = format!(
        "HTTP/1.1 {} Canned\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
        reply.status,
        reply.body.len(),
        reply.body
    );
    stream.write_all(response.as_bytes()).await?;
    stream.shutdown().await
}

fn find(haystack: &[u8], needle: &[u8]) -> Option<usize> {
    haystack.windows(needle.len()).position(|w| w == needle)
}

// ── Catalog payloads ────────────────────────────────────────────────

pub fn category_listing() -> serde_json::Value {
    serde_json::json!([
        {
            "id": "g-type", "name": "Fabric Type", "isMandatory": true, "multiSelect": false,
            "child": [
                {"id": "woven", "name": "Woven", "parentId": "g-type", "child": [
                    {"id": "denim", "name": "Denim", "parentId": "woven", "child": []},
                    {"id": "twill", "name": "Twill", "parentId": "woven", "child": null}
                ]},
                {"id": "knit", "name": "Knit", "parentId": "g-type", "child": []}
            ]
        },
        {
            "id": "g-content", "name": "Fabric Content",
            "child": [
                {"id": "cot", "name": "Cotton", "parentId": "g-content"},
                {"id": "pol", "name": "Polyester", "parentId": "g-content"}
            ]
        }
    ])
}

pub fn variant_listing() -> serde_json::Value {
    serde_json::json!([
        {"id": 11, "name": "Colour", "value": "Red"},
        {"id": 12, "name": "Colour", "value": "Blue"},
        {"id": 21, "name": "Size", "value": "S"}
    ])
}

pub fn combination_listing() -> serde_json::Value {
    serde_json::json!([
        {"value": "COT-60% POL-40%", "composition": {"cot": 60, "pol": 40}}
    ])
}

/// Routes for the three catalogs and the two ancestor lookups of "denim"
pub fn seed_catalogs(backend: &CannedBackend) {
    backend
        .route("GET", "product-category?status=ACTIVE", envelope(category_listing()))
        .route("GET", "variant", envelope(variant_listing()))
        .route("GET", "fabric?status=ACTIVE", envelope(combination_listing()))
        .route(
            "GET",
            "product-category/category/woven",
            envelope(serde_json::json!({"id": "woven", "name": "Woven", "parentId": "g-type"})),
        )
        .route(
            "GET",
            "product-category/category/g-type",
            envelope(serde_json::json!({"id": "g-type", "name": "Fabric Type", "parentId": null})),
        );
}
