//! HTTP backend abstraction for the synthesis API.
//!
//! The production backend is reqwest; tests inject [`testing::FakeBackend`].

use crate::config::TtsClientConfig;
use crate::error::TtsResult;
use async_trait::async_trait;

// ============================================================================
// HTTP Backend Trait
// ============================================================================

/// One POST request with a JSON body.
#[derive(Debug, Clone)]
pub struct PostRequest {
    pub url: String,
    pub api_key: String,
    pub accept: &'static str,
    pub body: serde_json::Value,
}

/// Raw response, fully buffered.
#[derive(Debug, Clone)]
pub struct RawResponse {
    pub status: u16,
    pub content_type: Option<String>,
    pub body: Vec<u8>,
}

impl RawResponse {
    pub const fn is_success(&self) -> bool {
        self.status >= 200 && self.status < 300
    }
}

/// Trait for HTTP backends that can POST JSON and return raw bytes.
#[async_trait]
pub trait HttpBackend: Send + Sync {
    async fn post_json(&self, request: PostRequest) -> TtsResult<RawResponse>;
}

// ============================================================================
// Reqwest Backend
// ============================================================================

/// Production HTTP backend using reqwest. No retries.
pub struct ReqwestBackend {
    client: reqwest::Client,
}

impl ReqwestBackend {
    /// Create a new reqwest backend with the given configuration.
    pub fn new(config: &TtsClientConfig) -> TtsResult<Self> {
        let client = reqwest::Client::builder()
            .timeout(config.timeout)
            .user_agent(config.user_agent.clone())
            .build()?;
        Ok(Self { client })
    }
}

#[async_trait]
impl HttpBackend for ReqwestBackend {
    async fn post_json(&self, request: PostRequest) -> TtsResult<RawResponse> {
        let response = self
            .client
            .post(&request.url)
            .header("xi-api-key", &request.api_key)
            .header(reqwest::header::ACCEPT, request.accept)
            .json(&request.body)
            .send()
            .await?;

        let status = response.status().as_u16();
        let content_type = response
            .headers()
            .get(reqwest::header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string);
        let body = response.bytes().await?.to_vec();

        Ok(RawResponse {
            status,
            content_type,
            body,
        })
    }
}

// ============================================================================
// Test Support
// ============================================================================
