use crate::models::{ChatReply, ChatRequest, ChatResponse, HealthResponse, Result};

pub struct PolicyClient {
    client: reqwest::Client,
    base_url: String,
}

impl PolicyClient {
    pub fn new(base_url: String) -> Self {
        let client = reqwest::Client::builder()
            .pool_idle_timeout(std::time::Duration::from_secs(30))
            .pool_max_idle_per_host(10)
            .build()
            .unwrap_or_else(|_| reqwest::Client::new());

        let base_url = base_url.trim_end_matches('/').to_string();
        Self { client, base_url }
    }

    /// Sends one question to `POST /chat` and interprets the outcome.
    /// The backend reports soft failures in the body (`success: false`),
    /// possibly with a non-2xx status, so the body is decoded regardless
    /// of status code. Undecodable bodies surface as network errors.
    pub async fn ask(&self, question: &str) -> Result<ChatReply> {
        let request = ChatRequest {
            question: question.to_string(),
        };

        let response = self
            .client
            .post(format!("{}/chat", self.base_url))
            .json(&request)
            .send()
            .await?
            .json::<ChatResponse>()
            .await?;

        ChatReply::from_response(response)
    }

    /// One-shot `GET /health`. No retries.
    pub async fn health(&self) -> Result<HealthResponse> {
        let response = self
            .client
            .get(format!("{}/health", self.base_url))
            .send()
            .await?
            .json::<HealthResponse>()
            .await?;

        Ok(response)
    }
}
