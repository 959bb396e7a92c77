use rustyline::error::ReadlineError;
use serde::{Deserialize, Serialize};

/// Request body for `POST /chat`.
#[derive(Debug, Serialize)]
pub struct ChatRequest {
    pub question: String,
}

/// A source reference backing part of an answer. `index` is the 1-based
/// display label assigned by the backend.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Citation {
    pub index: u32,
    pub source: String,
    pub snippet: String,
}

/// Raw payload of `POST /chat`. The backend signals soft failures with
/// `success: false` and an `error` string; on success it sends the
/// answer, citations, and the server-measured latency in seconds.
#[derive(Debug, Deserialize)]
pub struct ChatResponse {
    pub success: bool,
    #[serde(default)]
    pub answer: Option<String>,
    #[serde(default)]
    pub citations: Vec<Citation>,
    #[serde(default)]
    pub latency: Option<f64>,
    #[serde(default)]
    pub error: Option<String>,
}

/// Interpreted outcome of a chat request.
#[derive(Debug, Clone, PartialEq)]
pub enum ChatReply {
    Answer {
        text: String,
        citations: Vec<Citation>,
        /// Server-measured seconds; `None` when the backend omitted it,
        /// in which case no latency readout is shown.
        latency: Option<f64>,
    },
    Failure {
        error: String,
    },
}

impl ChatReply {
    /// Interprets a raw response. A `success: true` payload without an
    /// answer field is malformed and rejected.
    pub fn from_response(response: ChatResponse) -> Result<Self> {
        if response.success {
            let text = response
                .answer
                .ok_or_else(|| Error::Api("response missing answer field".to_string()))?;
            Ok(ChatReply::Answer {
                text,
                citations: response.citations,
                latency: response.latency,
            })
        } else {
            Ok(ChatReply::Failure {
                error: response
                    .error
                    .unwrap_or_else(|| "unknown server error".to_string()),
            })
        }
    }
}

/// Payload of `GET /health`.
#[derive(Debug, Deserialize)]
pub struct HealthResponse {
    pub status: String,
}

impl HealthResponse {
    pub fn is_healthy(&self) -> bool {
        self.status == "healthy"
    }
}

/// Whether a chat request is currently outstanding. One instance,
/// owned by the UI controller.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RequestState {
    Idle,
    Pending,
}

// Error types
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("API error: {0}")]
    Api(String),
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),
    #[error("Environment error: {0}")]
    Environment(#[from] std::env::VarError),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Terminal error: {0}")]
    Terminal(#[from] clearscreen::Error),
    #[error("Readline error: {0}")]
    Readline(String),
}

impl From<ReadlineError> for Error {
    fn from(err: ReadlineError) -> Self {
        Error::Readline(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn success_response_becomes_answer() {
        let json = r#"{
            "success": true,
            "answer": "You get 20 days.",
            "citations": [{"index": 1, "source": "HR Handbook", "snippet": "...leave..."}],
            "latency": 0.42
        }"#;
        let response: ChatResponse = serde_json::from_str(json).unwrap();
        let reply = ChatReply::from_response(response).unwrap();
        assert_eq!(
            reply,
            ChatReply::Answer {
                text: "You get 20 days.".to_string(),
                citations: vec![Citation {
                    index: 1,
                    source: "HR Handbook".to_string(),
                    snippet: "...leave...".to_string(),
                }],
                latency: Some(0.42),
            }
        );
    }

    #[test]
    fn success_without_citations_defaults_empty() {
        let json = r#"{"success": true, "answer": "Yes.", "latency": 1.0}"#;
        let response: ChatResponse = serde_json::from_str(json).unwrap();
        match ChatReply::from_response(response).unwrap() {
            ChatReply::Answer { citations, .. } => assert!(citations.is_empty()),
            other => panic!("expected answer, got {:?}", other),
        }
    }

    #[test]
    fn failure_response_becomes_failure() {
        let json = r#"{"success": false, "error": "retriever not ready"}"#;
        let response: ChatResponse = serde_json::from_str(json).unwrap();
        assert_eq!(
            ChatReply::from_response(response).unwrap(),
            ChatReply::Failure {
                error: "retriever not ready".to_string(),
            }
        );
    }

    #[test]
    fn success_missing_latency_is_preserved_as_absent() {
        let json = r#"{"success": true, "answer": "Yes."}"#;
        let response: ChatResponse = serde_json::from_str(json).unwrap();
        match ChatReply::from_response(response).unwrap() {
            ChatReply::Answer { latency, .. } => assert_eq!(latency, None),
            other => panic!("expected answer, got {:?}", other),
        }
    }

    #[test]
    fn success_missing_answer_is_an_api_error() {
        let json = r#"{"success": true, "latency": 0.1}"#;
        let response: ChatResponse = serde_json::from_str(json).unwrap();
        assert!(matches!(
            ChatReply::from_response(response),
            Err(Error::Api(_))
        ));
    }

    #[test]
    fn health_status_literal_healthy_only() {
        let healthy: HealthResponse = serde_json::from_str(r#"{"status": "healthy"}"#).unwrap();
        assert!(healthy.is_healthy());
        let degraded: HealthResponse = serde_json::from_str(r#"{"status": "degraded"}"#).unwrap();
        assert!(!degraded.is_healthy());
    }

    #[test]
    fn latency_precision_is_preserved() {
        let json = r#"{"success": true, "answer": "ok", "latency": 0.42}"#;
        let response: ChatResponse = serde_json::from_str(json).unwrap();
        if let ChatReply::Answer {
            latency: Some(latency),
            ..
        } = ChatReply::from_response(response).unwrap()
        {
            assert_eq!(format!("Response time: {}s", latency), "Response time: 0.42s");
        } else {
            panic!("expected answer with latency");
        }
    }
}
