//! Ollama OpenAI Bridge - a protocol-translation proxy.
//!
//! This library serves OpenAI-compatible chat/completion endpoints and
//! forwards each request to a locally running Ollama server, reshaping the
//! request and response between the two incompatible JSON schemas:
//!
//! - **Model listing**: `/v1/models` backed by `/api/tags`
//! - **Chat completions**: `/v1/chat/completions` backed by `/api/chat`
//! - **Text completions**: `/v1/completions` simulated over `/api/chat`
//!   with a fill-in-the-middle prompt protocol (plus a per-engine alias
//!   route that pins the model)
//! - **Raw generation**: `/v1/generate` backed by `/api/generate`
//!
//! # Architecture
//!
//! The codebase is organized into three layers:
//!
//! - [`core`]: configuration, error handling and request correlation
//! - [`translator`]: pure, stateless schema mapping in both directions
//! - [`api`]: HTTP handlers and the downstream gateway
//!
//! The bridge is stateless: nothing outlives a single request and nothing
//! is shared across requests apart from the read-only configuration.
//!
//! # Configuration
//!
//! Optional environment variables:
//! - `PORT`: server listen port (default: 3301)

pub mod api;
pub mod core;
pub mod translator;

// Re-export commonly used types for convenience
pub use api::{router, AppState, OllamaGateway};
pub use core::{AppConfig, BridgeError, OwnershipTable, Result};
