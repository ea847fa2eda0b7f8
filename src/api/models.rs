//! API request and response models.
//!
//! This module defines both sides of the translation: the OpenAI-compatible
//! shapes the bridge serves and the Ollama shapes it consumes. Inbound
//! requests keep unknown fields in a flattened passthrough map so they are
//! forwarded downstream untouched.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashMap;

/// Chat completion request following the OpenAI API format.
///
/// Messages are kept as raw JSON values; the bridge forwards them verbatim
/// and never inspects their content.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatCompletionRequest {
    /// Model identifier; optional so the downstream server may assign its
    /// own default
    #[serde(skip_serializing_if = "Option::is_none")]
    pub model: Option<String>,

    /// Conversation messages, forwarded as-is
    pub messages: Vec<Value>,

    /// Sampling temperature; `f64` so the value survives the JSON
    /// round-trip bit-exactly
    #[serde(skip_serializing_if = "Option::is_none")]
    pub temperature: Option<f64>,

    /// Additional client-supplied parameters, forwarded as-is
    #[serde(flatten)]
    pub extra: HashMap<String, Value>,
}

/// Text completion request for the fill-in-the-middle route.
#[derive(Debug, Clone, Deserialize)]
pub struct CompletionRequest {
    /// Text before the gap to complete
    pub prompt: String,

    /// Text after the gap, when completing a middle section
    #[serde(default)]
    pub suffix: Option<String>,

    /// Model identifier
    #[serde(default)]
    pub model: Option<String>,

    /// Sampling temperature; `f64` so the value survives the JSON
    /// round-trip bit-exactly
    #[serde(default)]
    pub temperature: Option<f64>,

    /// Stop sequences; the first one is echoed back appended to the
    /// completion text and must be present
    #[serde(default)]
    pub stop: Vec<String>,

    /// Extra metadata such as the programming-language hint
    #[serde(default)]
    pub extra: Option<CompletionExtra>,
}

/// Extra metadata on a completion request.
#[derive(Debug, Clone, Deserialize)]
pub struct CompletionExtra {
    /// Programming-language hint for the synthetic system instruction
    #[serde(default)]
    pub language: Option<String>,
}

/// Chat completion response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatCompletionResponse {
    pub id: String,
    pub object: String,
    pub created: i64,
    pub model: String,
    pub choices: Vec<ChatChoice>,
    pub usage: Usage,

    /// Raw downstream body, attached for debugging and forward compatibility
    pub data: Value,
}

/// A single choice in a chat completion response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatChoice {
    pub index: u32,
    /// Downstream message, echoed verbatim
    pub message: Value,
    pub finish_reason: String,
}

/// Text completion response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CompletionResponse {
    pub id: String,
    pub object: String,
    pub created: i64,
    pub model: String,
    pub choices: Vec<CompletionChoice>,
    pub usage: Usage,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub system_fingerprint: Option<String>,
}

/// A single choice in a text completion response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CompletionChoice {
    pub text: String,
    pub index: u32,
    pub finish_reason: String,
}

/// Token usage statistics.
///
/// All counts are optional: only the fill-in-the-middle route populates
/// them, the other routes serialize an empty block.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Usage {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub prompt_tokens: Option<u32>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub completion_tokens: Option<u32>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub total_tokens: Option<u32>,
}

impl Usage {
    /// Usage block with all counts populated; `total_tokens` is always the
    /// sum of the two parts, saturating on absurd downstream counters.
    pub fn counted(prompt_tokens: u32, completion_tokens: u32) -> Self {
        Self {
            prompt_tokens: Some(prompt_tokens),
            completion_tokens: Some(completion_tokens),
            total_tokens: Some(prompt_tokens.saturating_add(completion_tokens)),
        }
    }
}

/// Model information entry.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModelInfo {
    pub id: String,
    pub object: String,
    pub created: i64,
    pub owned_by: String,
}

/// List of available models.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModelList {
    pub object: String,
    pub data: Vec<ModelInfo>,
}

/// Response of the Ollama model listing endpoint (`/api/tags`).
#[derive(Debug, Clone, Deserialize)]
pub struct OllamaTagsResponse {
    #[serde(default)]
    pub models: Vec<OllamaModelTag>,
}

/// One model entry reported by `/api/tags`.
#[derive(Debug, Clone, Deserialize)]
pub struct OllamaModelTag {
    pub name: String,
    pub modified_at: DateTime<Utc>,
}

/// Non-streaming response of the Ollama chat endpoint (`/api/chat`).
#[derive(Debug, Clone, Deserialize)]
pub struct OllamaChatResponse {
    pub model: String,
    pub created_at: DateTime<Utc>,

    /// Assistant message, kept as raw JSON so it can be echoed verbatim
    pub message: Value,

    #[serde(default)]
    pub done: bool,

    #[serde(default)]
    pub prompt_eval_count: u32,

    #[serde(default)]
    pub eval_count: u32,
}

impl OllamaChatResponse {
    /// Text content of the assistant message, empty when absent.
    pub fn message_content(&self) -> &str {
        self.message
            .get("content")
            .and_then(Value::as_str)
            .unwrap_or_default()
    }
}

/// Non-streaming response of the Ollama generate endpoint (`/api/generate`).
#[derive(Debug, Clone, Deserialize)]
pub struct OllamaGenerateResponse {
    pub model: String,
    pub created_at: DateTime<Utc>,

    /// Generated text
    #[serde(default)]
    pub response: String,

    #[serde(default)]
    pub done: bool,

    #[serde(default)]
    pub prompt_eval_count: u32,

    #[serde(default)]
    pub eval_count: u32,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_chat_request_keeps_extra_fields() {
        let raw = json!({
            "model": "llama2",
            "messages": [{"role": "user", "content": "Hello"}],
            "top_p": 0.9,
            "keep_alive": "5m"
        });

        let request: ChatCompletionRequest = serde_json::from_value(raw).unwrap();
        assert_eq!(request.model.as_deref(), Some("llama2"));
        assert_eq!(request.extra.get("top_p"), Some(&json!(0.9)));
        assert_eq!(request.extra.get("keep_alive"), Some(&json!("5m")));

        let round_trip = serde_json::to_value(&request).unwrap();
        assert_eq!(round_trip["top_p"], json!(0.9));
    }

    #[test]
    fn test_chat_request_without_model() {
        let raw = json!({"messages": []});
        let request: ChatCompletionRequest = serde_json::from_value(raw).unwrap();
        assert!(request.model.is_none());

        let serialized = serde_json::to_value(&request).unwrap();
        assert!(serialized.get("model").is_none());
    }

    #[test]
    fn test_completion_request_defaults() {
        let raw = json!({"prompt": "fn main() {"});
        let request: CompletionRequest = serde_json::from_value(raw).unwrap();
        assert!(request.suffix.is_none());
        assert!(request.stop.is_empty());
        assert!(request.extra.is_none());
    }

    #[test]
    fn test_completion_request_with_language() {
        let raw = json!({
            "prompt": "def add(a, b):",
            "suffix": "return c",
            "stop": ["\n"],
            "extra": {"language": "python"}
        });

        let request: CompletionRequest = serde_json::from_value(raw).unwrap();
        assert_eq!(request.stop, vec!["\n"]);
        assert_eq!(
            request.extra.and_then(|e| e.language).as_deref(),
            Some("python")
        );
    }

    #[test]
    fn test_empty_usage_serializes_to_empty_object() {
        let json = serde_json::to_value(Usage::default()).unwrap();
        assert_eq!(json, json!({}));
    }

    #[test]
    fn test_temperature_round_trips_exactly() {
        let raw = json!({"messages": [], "temperature": 0.2});
        let request: ChatCompletionRequest = serde_json::from_value(raw).unwrap();

        let round_trip = serde_json::to_value(&request).unwrap();
        assert_eq!(round_trip["temperature"], json!(0.2));

        let raw = json!({"prompt": "x", "stop": ["\n"], "temperature": 0.7});
        let request: CompletionRequest = serde_json::from_value(raw).unwrap();
        assert_eq!(request.temperature, Some(0.7));
    }

    #[test]
    fn test_counted_usage_saturates_on_overflow() {
        let usage = Usage::counted(u32::MAX, 1);
        assert_eq!(usage.total_tokens, Some(u32::MAX));
    }

    #[test]
    fn test_counted_usage_sums_totals() {
        let usage = Usage::counted(12, 30);
        assert_eq!(usage.total_tokens, Some(42));

        let json = serde_json::to_value(&usage).unwrap();
        assert_eq!(json["prompt_tokens"], 12);
        assert_eq!(json["completion_tokens"], 30);
        assert_eq!(json["total_tokens"], 42);
    }

    #[test]
    fn test_ollama_tags_deserialization() {
        let raw = json!({
            "models": [
                {"name": "llama2:7b", "modified_at": "2024-01-01T00:00:00Z", "size": 3825819519u64}
            ]
        });

        let tags: OllamaTagsResponse = serde_json::from_value(raw).unwrap();
        assert_eq!(tags.models.len(), 1);
        assert_eq!(tags.models[0].name, "llama2:7b");
        assert_eq!(tags.models[0].modified_at.timestamp_millis(), 1704067200000);
    }

    #[test]
    fn test_ollama_chat_response_content() {
        let raw = json!({
            "model": "llama2",
            "created_at": "2024-01-01T00:00:00Z",
            "message": {"role": "assistant", "content": "Hi there"},
            "done": true,
            "prompt_eval_count": 26,
            "eval_count": 7
        });

        let response: OllamaChatResponse = serde_json::from_value(raw).unwrap();
        assert_eq!(response.message_content(), "Hi there");
        assert_eq!(response.prompt_eval_count, 26);
    }

    #[test]
    fn test_ollama_chat_response_missing_counts() {
        let raw = json!({
            "model": "llama2",
            "created_at": "2024-01-01T00:00:00Z",
            "message": {"role": "assistant", "content": ""}
        });

        let response: OllamaChatResponse = serde_json::from_value(raw).unwrap();
        assert_eq!(response.prompt_eval_count, 0);
        assert_eq!(response.eval_count, 0);
        assert!(!response.done);
    }

    #[test]
    fn test_ollama_generate_response() {
        let raw = json!({
            "model": "codellama:13b",
            "created_at": "2024-01-01T00:00:00Z",
            "response": "println!(\"hello\");",
            "done": true
        });

        let response: OllamaGenerateResponse = serde_json::from_value(raw).unwrap();
        assert_eq!(response.response, "println!(\"hello\");");
        assert!(response.done);
    }
}
