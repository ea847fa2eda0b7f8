//! Direct text generation translation (passthrough to `/api/generate`).

use serde_json::Value;

use crate::api::models::{CompletionChoice, CompletionResponse, OllamaGenerateResponse, Usage};
use crate::core::error::Result;

/// Build the downstream `/api/generate` body.
///
/// The inbound payload is forwarded untouched apart from forcing `stream`
/// off; `model` is overridden only when a route supplies a forced one.
pub fn build_generate_body(payload: &Value, forced_model: Option<&str>) -> Value {
    let mut body = payload.clone();

    if let Value::Object(map) = &mut body {
        map.insert("stream".to_string(), Value::Bool(false));

        if let Some(model) = forced_model {
            map.insert("model".to_string(), Value::String(model.to_string()));
        }
    }

    body
}

/// Map a parsed `/api/generate` body into the text completion envelope.
///
/// `finish_reason` is `"stop"` when the server reports the generation as
/// done and `"length"` otherwise. Token counts are left unpopulated.
pub fn map_generate_response(request_id: &str, raw: Value) -> Result<CompletionResponse> {
    let parsed: OllamaGenerateResponse = serde_json::from_value(raw)?;

    let finish_reason = if parsed.done { "stop" } else { "length" };

    Ok(CompletionResponse {
        id: request_id.to_string(),
        object: "text_completion".to_string(),
        created: parsed.created_at.timestamp_millis(),
        model: parsed.model,
        choices: vec![CompletionChoice {
            text: parsed.response,
            index: 0,
            finish_reason: finish_reason.to_string(),
        }],
        usage: Usage::default(),
        system_fingerprint: None,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_build_generate_body_forwards_fields() {
        let payload = json!({
            "model": "codellama:13b",
            "prompt": "fn main() {",
            "raw": true,
            "stream": true
        });

        let body = build_generate_body(&payload, None);
        assert_eq!(body["model"], "codellama:13b");
        assert_eq!(body["prompt"], "fn main() {");
        assert_eq!(body["raw"], json!(true));
        assert_eq!(body["stream"], json!(false));
    }

    #[test]
    fn test_build_generate_body_forced_model_overrides() {
        let payload = json!({"model": "llama2", "prompt": "x"});
        let body = build_generate_body(&payload, Some("codellama"));
        assert_eq!(body["model"], "codellama");
    }

    #[test]
    fn test_build_generate_body_keeps_model_without_override() {
        let payload = json!({"model": "llama2", "prompt": "x"});
        let body = build_generate_body(&payload, None);
        assert_eq!(body["model"], "llama2");
    }

    #[test]
    fn test_map_generate_response_done() {
        let raw = json!({
            "model": "codellama:13b",
            "created_at": "2024-01-01T00:00:00Z",
            "response": "    println!(\"hello\");\n}",
            "done": true
        });

        let response = map_generate_response("req-9", raw).unwrap();
        assert_eq!(response.id, "req-9");
        assert_eq!(response.object, "text_completion");
        assert_eq!(response.created, 1704067200000);
        assert_eq!(response.model, "codellama:13b");
        assert_eq!(response.choices[0].text, "    println!(\"hello\");\n}");
        assert_eq!(response.choices[0].finish_reason, "stop");
        assert!(response.system_fingerprint.is_none());
    }

    #[test]
    fn test_map_generate_response_truncated() {
        let raw = json!({
            "model": "llama2",
            "created_at": "2024-01-01T00:00:00Z",
            "response": "partial",
            "done": false
        });

        let response = map_generate_response("req-9", raw).unwrap();
        assert_eq!(response.choices[0].finish_reason, "length");
    }

    #[test]
    fn test_map_generate_response_usage_is_unpopulated() {
        let raw = json!({
            "model": "llama2",
            "created_at": "2024-01-01T00:00:00Z",
            "response": "x",
            "done": true,
            "prompt_eval_count": 5,
            "eval_count": 3
        });

        let response = map_generate_response("req-9", raw).unwrap();
        assert!(response.usage.prompt_tokens.is_none());
        assert!(response.usage.total_tokens.is_none());
    }
}
