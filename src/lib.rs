pub mod client;
pub mod models;
pub mod renderer;
pub mod transcript;
pub mod ui;

pub use client::PolicyClient;
pub use models::{ChatReply, ChatRequest, ChatResponse, Citation, HealthResponse};
pub use transcript::{Message, Transcript};
