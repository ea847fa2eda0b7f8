//! Chat completion translation (`/v1/chat/completions` to `/api/chat`).

use serde_json::{json, Value};

use crate::api::models::{ChatChoice, ChatCompletionRequest, ChatCompletionResponse, Usage};
use crate::core::error::Result;
use crate::translator::resolve_model;

/// Build the downstream `/api/chat` body for a chat completion request.
///
/// All inbound fields are forwarded as-is; `stream` is forced off, the
/// model is resolved with the client-requested name taking precedence over
/// a route-forced one, and the inbound temperature (including `0`) is
/// mirrored into `options.temperature`.
pub fn build_chat_body(
    request: &ChatCompletionRequest,
    forced_model: Option<&str>,
) -> Result<Value> {
    let mut body = serde_json::to_value(request)?;

    if let Value::Object(map) = &mut body {
        map.insert("stream".to_string(), Value::Bool(false));

        match resolve_model(request.model.as_deref(), forced_model) {
            Some(model) => {
                map.insert("model".to_string(), Value::String(model));
            }
            None => {
                map.remove("model");
            }
        }

        if let Some(temperature) = request.temperature {
            map.insert("options".to_string(), json!({ "temperature": temperature }));
        }
    }

    Ok(body)
}

/// Map a parsed `/api/chat` body into the chat completion envelope.
///
/// `id` echoes the request correlation id, `created` is the downstream
/// creation timestamp in epoch milliseconds and `model` is whatever the
/// server reports it actually ran. Token counts are left unpopulated: the
/// chat endpoint does not report them in a directly mappable form. The raw
/// body rides along under `data`.
pub fn map_chat_response(request_id: &str, raw: Value) -> Result<ChatCompletionResponse> {
    let parsed: crate::api::models::OllamaChatResponse = serde_json::from_value(raw.clone())?;

    Ok(ChatCompletionResponse {
        id: request_id.to_string(),
        object: "chat.completion".to_string(),
        created: parsed.created_at.timestamp_millis(),
        model: parsed.model,
        choices: vec![ChatChoice {
            index: 0,
            message: parsed.message,
            finish_reason: "stop".to_string(),
        }],
        usage: Usage::default(),
        data: raw,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn request(raw: Value) -> ChatCompletionRequest {
        serde_json::from_value(raw).unwrap()
    }

    #[test]
    fn test_build_chat_body_forces_stream_off() {
        let request = request(json!({
            "model": "llama2",
            "messages": [{"role": "user", "content": "Hi"}],
            "stream": true
        }));

        let body = build_chat_body(&request, None).unwrap();
        assert_eq!(body["stream"], json!(false));
        assert_eq!(body["model"], "llama2");
        assert_eq!(body["messages"][0]["content"], "Hi");
    }

    #[test]
    fn test_build_chat_body_requested_model_wins_over_forced() {
        let request = request(json!({"model": "llama2", "messages": []}));
        let body = build_chat_body(&request, Some("codellama")).unwrap();
        assert_eq!(body["model"], "llama2");
    }

    #[test]
    fn test_build_chat_body_forced_model_fills_gap() {
        let request = request(json!({"messages": []}));
        let body = build_chat_body(&request, Some("codellama")).unwrap();
        assert_eq!(body["model"], "codellama");
    }

    #[test]
    fn test_build_chat_body_omits_model_when_unresolved() {
        let request = request(json!({"messages": []}));
        let body = build_chat_body(&request, None).unwrap();
        assert!(body.get("model").is_none());
    }

    #[test]
    fn test_build_chat_body_temperature_zero_is_preserved() {
        let request = request(json!({"messages": [], "temperature": 0.0}));
        let body = build_chat_body(&request, None).unwrap();
        assert_eq!(body["options"]["temperature"], json!(0.0));
    }

    #[test]
    fn test_build_chat_body_temperature_survives_exactly() {
        let request = request(json!({"messages": [], "temperature": 0.2}));
        let body = build_chat_body(&request, None).unwrap();
        // 0.2 must arrive downstream as 0.2, not 0.20000000298023224
        assert_eq!(body["options"]["temperature"], json!(0.2));
        assert_eq!(body["temperature"], json!(0.2));
    }

    #[test]
    fn test_build_chat_body_omits_options_without_temperature() {
        let request = request(json!({"messages": []}));
        let body = build_chat_body(&request, None).unwrap();
        assert!(body.get("options").is_none());
    }

    #[test]
    fn test_build_chat_body_forwards_extra_fields() {
        let request = request(json!({"messages": [], "top_p": 0.9, "seed": 7}));
        let body = build_chat_body(&request, None).unwrap();
        assert_eq!(body["top_p"], json!(0.9));
        assert_eq!(body["seed"], json!(7));
    }

    #[test]
    fn test_map_chat_response() {
        let raw = json!({
            "model": "llama2:7b",
            "created_at": "2024-01-01T00:00:00Z",
            "message": {"role": "assistant", "content": "Hello!"},
            "done": true,
            "prompt_eval_count": 26,
            "eval_count": 9
        });

        let response = map_chat_response("req-123", raw.clone()).unwrap();

        assert_eq!(response.id, "req-123");
        assert_eq!(response.object, "chat.completion");
        assert_eq!(response.created, 1704067200000);
        assert_eq!(response.model, "llama2:7b");
        assert_eq!(response.choices.len(), 1);
        assert_eq!(response.choices[0].index, 0);
        assert_eq!(response.choices[0].finish_reason, "stop");
        assert_eq!(response.choices[0].message, raw["message"]);
        assert_eq!(response.data, raw);
    }

    #[test]
    fn test_map_chat_response_usage_is_unpopulated() {
        let raw = json!({
            "model": "llama2",
            "created_at": "2024-01-01T00:00:00Z",
            "message": {"role": "assistant", "content": "x"},
            "prompt_eval_count": 26,
            "eval_count": 9
        });

        let response = map_chat_response("req-123", raw).unwrap();
        // Counts stay empty even though the server reported some
        assert!(response.usage.prompt_tokens.is_none());
        assert!(response.usage.completion_tokens.is_none());
        assert!(response.usage.total_tokens.is_none());
    }

    #[test]
    fn test_map_chat_response_malformed_body_is_an_error() {
        let raw = json!({"unexpected": true});
        assert!(map_chat_response("req-123", raw).is_err());
    }
}
