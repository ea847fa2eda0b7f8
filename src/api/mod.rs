//! API layer for the bridge.
//!
//! This module contains the HTTP handlers, the request/response models for
//! both sides of the translation, and the downstream gateway.

pub mod handlers;
pub mod models;
pub mod upstream;

// Re-export commonly used types
pub use handlers::{
    chat_completions, completions, engine_completions, generate, list_models, router, AppState,
};
pub use models::{
    ChatCompletionRequest, ChatCompletionResponse, CompletionRequest, CompletionResponse,
    ModelList, Usage,
};
pub use upstream::OllamaGateway;
