//! Implements DataGateway against the hosted backend's PostgREST endpoint.
//!
//! Every request carries the anon key both as `apikey` and as a bearer token.

use crate::adapters::gateway::single_row;
use crate::domain::DomainError;
use crate::ports::{DataGateway, Query, Row};
use crate::shared::config::BackendConfig;
use reqwest::{Client, Response};
use tracing::{debug, warn};

const REST_PATH: &str = "rest/v1";

/// HTTP gateway. One shared `reqwest::Client` (connection pool) per process.
pub struct PostgrestGateway {
    client: Client,
    base_url: String,
    anon_key: String,
}

impl PostgrestGateway {
    pub fn new(cfg: &BackendConfig) -> Self {
        Self::with_client(cfg, Client::new())
    }

    /// Gateway over a caller-built client (proxy, TLS or timeout settings).
    pub fn with_client(cfg: &BackendConfig, client: Client) -> Self {
        Self {
            client,
            base_url: cfg.url.trim_end_matches('/').to_string(),
            anon_key: cfg.anon_key.clone(),
        }
    }

    fn table_url(&self, table: &str) -> String {
        format!("{}/{}/{}", self.base_url, REST_PATH, table)
    }

    async fn get_rows(&self, query: &Query, limit: Option<usize>) -> Result<Vec<Row>, DomainError> {
        let mut params = query.to_params();
        if let Some(n) = limit {
            params.push(("limit".to_string(), n.to_string()));
        }
        debug!(table = %query.table, ?params, "select");

        let response = self
            .client
            .get(self.table_url(&query.table))
            .header("apikey", &self.anon_key)
            .bearer_auth(&self.anon_key)
            .query(&params)
            .send()
            .await
            .map_err(|e| DomainError::Gateway(format!("HTTP request failed: {}", e)))?;

        let response = check_status(&query.table, response).await?;
        response
            .json::<Vec<Row>>()
            .await
            .map_err(|e| DomainError::Decode(format!("Failed to parse rows: {}", e)))
    }
}

async fn check_status(table: &str, response: Response) -> Result<Response, DomainError> {
    if response.status().is_success() {
        return Ok(response);
    }
    let status = response.status();
    let text = response.text().await.unwrap_or_default();
    warn!(table, status = %status, body = %text, "backend returned error");
    Err(DomainError::Gateway(format!(
        "API error {}: {}",
        status,
        text.chars().take(200).collect::<String>()
    )))
}

#[async_trait::async_trait]
impl DataGateway for PostgrestGateway {
    async fn select(&self, query: &Query) -> Result<Vec<Row>, DomainError> {
        self.get_rows(query, None).await
    }

    async fn select_single(&self, query: &Query) -> Result<Row, DomainError> {
        // Two is enough to tell "exactly one" from "ambiguous".
        let rows = self.get_rows(query, Some(2)).await?;
        single_row(&query.table, rows)
    }

    async fn insert(&self, table: &str, rows: Vec<Row>) -> Result<(), DomainError> {
        debug!(table, count = rows.len(), "insert");
        let response = self
            .client
            .post(self.table_url(table))
            .header("apikey", &self.anon_key)
            .bearer_auth(&self.anon_key)
            .header("Prefer", "return=minimal")
            .json(&rows)
            .send()
            .await
            .map_err(|e| DomainError::Gateway(format!("HTTP request failed: {}", e)))?;

        check_status(table, response).await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ports::Direction;
    use serde_json::json;
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::TcpListener;
    use tokio::task::JoinHandle;

    /// Serves one canned HTTP response on loopback and returns the raw request it got.
    async fn serve_once(status: &str, body: String) -> (String, JoinHandle<String>) {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let url = format!("http://{}", listener.local_addr().unwrap());
        let status = status.to_string();
        let handle = tokio::spawn(async move {
            let (mut socket, _) = listener.accept().await.unwrap();
            let mut raw = Vec::new();
            let mut buf = [0u8; 4096];
            loop {
                let n = socket.read(&mut buf).await.unwrap();
                if n == 0 {
                    break;
                }
                raw.extend_from_slice(&buf[..n]);
                let text = String::from_utf8_lossy(&raw).to_string();
                if let Some(head_end) = text.find("\r\n\r\n") {
                    let content_length = text[..head_end]
                        .lines()
                        .find_map(|l| {
                            let (name, value) = l.split_once(':')?;
                            name.eq_ignore_ascii_case("content-length")
                                .then(|| value.trim().parse::<usize>().ok())
                                .flatten()
                        })
                        .unwrap_or(0);
                    if raw.len() >= head_end + 4 + content_length {
                        break;
                    }
                }
            }
            let response = format!(
                "HTTP/1.1 {}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
                status,
                body.len(),
                body
            );
            socket.write_all(response.as_bytes()).await.unwrap();
            socket.shutdown().await.ok();
            String::from_utf8_lossy(&raw).to_string()
        });
        (url, handle)
    }

    fn gateway(url: &str) -> PostgrestGateway {
        let client = Client::builder().no_proxy().build().unwrap();
        PostgrestGateway::with_client(
            &BackendConfig {
                url: url.to_string(),
                anon_key: "anon-k".into(),
            },
            client,
        )
    }

    #[test]
    fn test_table_url_joins_rest_path() {
        let gw = PostgrestGateway::new(&BackendConfig {
            url: "https://abc.example.co/".into(),
            anon_key: "k".into(),
        });
        assert_eq!(
            gw.table_url("legacy_profiles"),
            "https://abc.example.co/rest/v1/legacy_profiles"
        );
    }

    #[test]
    fn test_single_row_counts() {
        assert_eq!(
            single_row("t", vec![json!({"id": 1})]).unwrap(),
            json!({"id": 1})
        );
        assert!(matches!(
            single_row("t", vec![]),
            Err(DomainError::NotSingle { found: 0, .. })
        ));
        assert!(matches!(
            single_row("t", vec![json!({}), json!({})]),
            Err(DomainError::NotSingle { found: 2, .. })
        ));
    }

    #[tokio::test]
    async fn test_select_sends_filters_order_and_keys() {
        let (url, server) = serve_once("200 OK", json!([{"id": "f1"}]).to_string()).await;
        let q = Query::table("forum_posts")
            .select("*, legacy_profiles(name)")
            .eq("legacy_profile_id", "p1")
            .order("created_at", Direction::Descending);

        let rows = gateway(&url).select(&q).await.unwrap();
        assert_eq!(rows, vec![json!({"id": "f1"})]);

        let request = server.await.unwrap();
        let request_line = request.lines().next().unwrap();
        assert!(request_line.starts_with("GET /rest/v1/forum_posts?select="));
        assert!(request_line.contains("legacy_profile_id=eq.p1"));
        assert!(request_line.contains("order=created_at.desc"));
        let lower = request.to_lowercase();
        assert!(lower.contains("apikey: anon-k"));
        assert!(lower.contains("authorization: bearer anon-k"));
    }

    #[tokio::test]
    async fn test_two_rows_for_single_is_ambiguous() {
        let body = json!([
            {"username": "twin", "password": "same", "legacy_profile_id": "p1"},
            {"username": "twin", "password": "same", "legacy_profile_id": "p2"}
        ])
        .to_string();
        let (url, server) = serve_once("200 OK", body).await;
        let q = Query::table("legacy_auth")
            .eq("username", "twin")
            .eq("password", "same");

        let result = gateway(&url).select_single(&q).await;
        assert!(matches!(result, Err(DomainError::NotSingle { found: 2, .. })));
        let request = server.await.unwrap();
        assert!(request.lines().next().unwrap().contains("limit=2"));
    }

    #[tokio::test]
    async fn test_error_status_truncates_body() {
        let (url, _server) = serve_once("500 Internal Server Error", "x".repeat(300)).await;

        let err = gateway(&url).select(&Query::table("blogs")).await.unwrap_err();
        let message = match err {
            DomainError::Gateway(message) => message,
            other => panic!("expected gateway error, got {other:?}"),
        };
        assert!(message.contains("500"));
        assert_eq!(message.matches('x').count(), 200);
    }

    #[tokio::test]
    async fn test_insert_posts_json_array() {
        let (url, server) = serve_once("201 Created", String::new()).await;
        let row = json!({"title": "T", "content": "B", "legacy_profile_id": "p1"});

        gateway(&url)
            .insert("forum_posts", vec![row.clone()])
            .await
            .unwrap();

        let request = server.await.unwrap();
        assert!(request.starts_with("POST /rest/v1/forum_posts "));
        assert!(request.to_lowercase().contains("prefer: return=minimal"));
        let body = request.split("\r\n\r\n").nth(1).unwrap();
        let sent: serde_json::Value = serde_json::from_str(body).unwrap();
        assert_eq!(sent, json!([row]));
    }
}
