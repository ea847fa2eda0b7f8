//! Core functionality for the bridge.
//!
//! This module contains fundamental components used throughout the application:
//! - Configuration management
//! - Error handling
//! - Request correlation and logging helpers

pub mod config;
pub mod error;
pub mod logging;

// Re-export commonly used types
pub use config::{AppConfig, OwnershipTable, ServerConfig, BRIDGE_NAME, OLLAMA_BASE_URL};
pub use error::{BridgeError, Result};
pub use logging::{correlation_id, generate_request_id, log_failure};
