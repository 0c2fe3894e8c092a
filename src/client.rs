use crate::config::DeckConfig;
use crate::errors::{DeckError, Result};
use crate::models::api::{
    ApiErrorBody, ExportRequest, GenerateRequest, GenerateResponse, SaveRequest, SaveResponse,
};
use log::{debug, info};
use reqwest::header::ACCEPT;
use serde::de::DeserializeOwned;
use serde::Serialize;

const GENERATE_PATH: &str = "/api/generate";
const SAVE_PATH: &str = "/api/save";
const EXPORT_PATH: &str = "/api/export";

/// Thin client for the generation backend's JSON endpoints.
///
/// The client performs no retries and no timeouts; a failure is reported once and
/// the caller hands it to the deck's matching `finish_*` operation.
#[derive(Debug, Clone)]
pub struct DeckApiClient {
    http: reqwest::Client,
    base_url: String,
}

impl DeckApiClient {
    pub fn new(base_url: impl Into<String>, http: reqwest::Client) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self { http, base_url }
    }

    pub fn from_config(config: &DeckConfig) -> Self {
        Self::new(config.api_base_url.clone(), reqwest::Client::new())
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Requests freshly generated slides for a topic.
    ///
    /// # Errors
    /// * [`DeckError::InvalidInput`] for an empty topic or template, before any request.
    /// * [`DeckError::Network`] if the request could not be sent or read.
    /// * [`DeckError::ApiError`] for non-success statuses.
    /// * [`DeckError::Json`] if the response body is not a valid `GenerateResponse`.
    pub async fn generate(&self, request: &GenerateRequest) -> Result<GenerateResponse> {
        if request.topic.trim().is_empty() {
            return Err(DeckError::InvalidInput(
                "Please enter a presentation topic".to_string(),
            ));
        }
        if request.template_id.is_empty() {
            return Err(DeckError::InvalidInput("Please select a template".to_string()));
        }

        let response: GenerateResponse = self.post_json(GENERATE_PATH, request).await?;
        info!(
            "Generated {} slides for topic '{}'",
            response.slides.len(),
            request.topic
        );
        Ok(response)
    }

    /// Saves a presentation. The backend assigns an id on the first save.
    pub async fn save(&self, request: &SaveRequest) -> Result<SaveResponse> {
        let response: SaveResponse = self.post_json(SAVE_PATH, request).await?;
        info!("Saved presentation {}", response.presentation.id);
        Ok(response)
    }

    /// Exports a presentation and returns the file bytes.
    pub async fn export(&self, request: &ExportRequest) -> Result<Vec<u8>> {
        let response = self.send(EXPORT_PATH, request).await?;
        let bytes = response.bytes().await.map_err(DeckError::Network)?;
        info!("Exported presentation file of {} bytes", bytes.len());
        Ok(bytes.to_vec())
    }

    async fn post_json<B, T>(&self, path: &str, body: &B) -> Result<T>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let response = self.send(path, body).await?;
        let bytes = response.bytes().await.map_err(DeckError::Network)?;
        serde_json::from_slice::<T>(&bytes).map_err(|e| {
            let snippet = String::from_utf8_lossy(&bytes[..bytes.len().min(500)]);
            debug!("Failing JSON snippet from {}:\n{}", path, snippet);
            DeckError::Json(e)
        })
    }

    /// Posts `body` as JSON and returns the response if its status is a success.
    async fn send<B>(&self, path: &str, body: &B) -> Result<reqwest::Response>
    where
        B: Serialize + ?Sized,
    {
        let url = self.endpoint(path);
        debug!("POST {}", url);

        let response = self
            .http
            .post(&url)
            .header(ACCEPT, "application/json")
            .json(body)
            .send()
            .await
            .map_err(DeckError::Network)?;

        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        // Handle API-level errors (non-2xx status codes)
        let error_text = response.text().await.map_err(DeckError::Network)?;
        let message = match serde_json::from_str::<ApiErrorBody>(&error_text) {
            Ok(body) => body.error,
            Err(_) => format!("API request failed with status {}: {}", status, error_text),
        };
        Err(DeckError::ApiError { status, message })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::api::SavedPresentation;
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::TcpListener;

    /// Serves one canned HTTP response on a local port and returns the base URL.
    async fn serve_once(status: &'static str, content_type: &'static str, body: &'static str) -> String {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            let (mut socket, _) = listener.accept().await.unwrap();
            // Read the whole request so the client is never reset mid-write.
            let mut request = Vec::new();
            let mut chunk = [0u8; 1024];
            loop {
                let n = socket.read(&mut chunk).await.unwrap();
                if n == 0 {
                    break;
                }
                request.extend_from_slice(&chunk[..n]);
                if let Some(end) = request.windows(4).position(|w| w == b"\r\n\r\n") {
                    let headers = String::from_utf8_lossy(&request[..end]).to_ascii_lowercase();
                    let content_length = headers
                        .lines()
                        .find_map(|line| line.strip_prefix("content-length:"))
                        .and_then(|value| value.trim().parse::<usize>().ok())
                        .unwrap_or(0);
                    if request.len() >= end + 4 + content_length {
                        break;
                    }
                }
            }
            let response = format!(
                "HTTP/1.1 {}\r\nContent-Type: {}\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
                status,
                content_type,
                body.len(),
                body
            );
            socket.write_all(response.as_bytes()).await.unwrap();
            socket.shutdown().await.ok();
        });
        format!("http://{}", addr)
    }

    fn local_client(base_url: String) -> DeckApiClient {
        let http = reqwest::Client::builder().no_proxy().build().unwrap();
        DeckApiClient::new(base_url, http)
    }

    fn save_request() -> SaveRequest {
        SaveRequest {
            id: None,
            topic: "Rust".into(),
            template_id: "minimal".into(),
            slides: vec![],
        }
    }

    fn generate_request() -> GenerateRequest {
        GenerateRequest {
            template_id: "corporate".into(),
            topic: "Rust".into(),
            slide_count: 1,
        }
    }

    #[test]
    fn endpoint_joins_without_double_slash() {
        let client = DeckApiClient::new("http://localhost:5000/", reqwest::Client::new());
        assert_eq!(client.base_url(), "http://localhost:5000");
        assert_eq!(client.endpoint(GENERATE_PATH), "http://localhost:5000/api/generate");
    }

    #[test]
    fn from_config_uses_configured_url() {
        let config = DeckConfig {
            api_base_url: "https://decks.example.com".into(),
            ..DeckConfig::default()
        };
        let client = DeckApiClient::from_config(&config);
        assert_eq!(client.endpoint(EXPORT_PATH), "https://decks.example.com/api/export");
    }

    #[tokio::test]
    async fn generate_rejects_empty_topic_without_network() {
        // Port 9 (discard) is never contacted: validation fails first.
        let client = DeckApiClient::new("http://127.0.0.1:9", reqwest::Client::new());
        let request = GenerateRequest {
            template_id: "corporate".into(),
            topic: "   ".into(),
            slide_count: 3,
        };
        let err = client.generate(&request).await.unwrap_err();
        assert!(matches!(err, DeckError::InvalidInput(ref msg) if msg == "Please enter a presentation topic"));
    }

    #[tokio::test]
    async fn error_body_message_is_used() {
        let base = serve_once(
            "400 Bad Request",
            "application/json",
            r#"{"error": "Missing required fields"}"#,
        )
        .await;
        let err = local_client(base).save(&save_request()).await.unwrap_err();
        match err {
            DeckError::ApiError { status, message } => {
                assert_eq!(status, reqwest::StatusCode::BAD_REQUEST);
                assert_eq!(message, "Missing required fields");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[tokio::test]
    async fn plain_error_body_falls_back_to_raw_text() {
        let base = serve_once("500 Internal Server Error", "text/plain", "model crashed").await;
        let err = local_client(base).generate(&generate_request()).await.unwrap_err();
        match err {
            DeckError::ApiError { status, message } => {
                assert_eq!(status, reqwest::StatusCode::INTERNAL_SERVER_ERROR);
                assert_eq!(
                    message,
                    "API request failed with status 500 Internal Server Error: model crashed"
                );
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[tokio::test]
    async fn generate_decodes_success_body() {
        let base = serve_once(
            "200 OK",
            "application/json",
            r#"{"slides": [{"layout": "quote", "content": {"quote": "Q", "author": "A"}}], "template": "corporate"}"#,
        )
        .await;
        let response = local_client(base).generate(&generate_request()).await.unwrap();
        assert_eq!(response.slides.len(), 1);
        assert_eq!(response.slides[0].layout, "quote");
        assert_eq!(response.template.as_deref(), Some("corporate"));
    }

    #[tokio::test]
    async fn malformed_success_body_is_a_json_error() {
        let base = serve_once("200 OK", "application/json", r#"{"slides": "nope"}"#).await;
        let err = local_client(base).generate(&generate_request()).await.unwrap_err();
        assert!(matches!(err, DeckError::Json(_)), "unexpected error: {err}");
    }

    #[tokio::test]
    async fn save_decodes_presentation() {
        let base = serve_once(
            "200 OK",
            "application/json",
            r#"{"message": "Presentation saved successfully", "presentation": {"id": 12, "topic": "Rust"}}"#,
        )
        .await;
        let response = local_client(base).save(&save_request()).await.unwrap();
        assert_eq!(
            response.presentation,
            SavedPresentation {
                id: 12,
                topic: Some("Rust".into()),
                template_id: None,
                slide_count: None,
                slides: None,
                created_at: None,
                updated_at: None,
            }
        );
    }

    #[tokio::test]
    async fn export_returns_raw_bytes() {
        let base = serve_once("200 OK", "application/octet-stream", "PK-bytes").await;
        let request = ExportRequest {
            slides: vec![],
            template_id: "dark".into(),
            topic: "Rust".into(),
        };
        let bytes = local_client(base).export(&request).await.unwrap();
        assert_eq!(bytes, b"PK-bytes".to_vec());
    }

    #[tokio::test]
    async fn unreachable_backend_is_a_network_error() {
        let client = DeckApiClient::new("http://127.0.0.1:1", reqwest::Client::new());
        let request = SaveRequest {
            id: None,
            topic: "Rust".into(),
            template_id: "minimal".into(),
            slides: vec![],
        };
        let err = client.save(&request).await.unwrap_err();
        assert!(matches!(err, DeckError::Network(_)), "unexpected error: {err}");
    }
}
