//! Fill-in-the-middle simulation over the chat endpoint.
//!
//! Ollama has no native equivalent of the completions-with-suffix
//! semantics, so the gap is marked with a fixed sentinel token and the
//! model is instructed, through a three-message conversation, to reply with
//! only the sentinel's replacement.

use serde_json::{json, Map, Value};

use crate::api::models::{
    CompletionChoice, CompletionRequest, CompletionResponse, OllamaChatResponse, Usage,
};
use crate::core::config::BRIDGE_NAME;
use crate::core::error::{BridgeError, Result};
use crate::translator::resolve_model;

/// Marker inserted into the prompt to denote the gap to be filled.
///
/// Chosen so it cannot collide with plausible code or prose content.
pub const GAP_SENTINEL: &str = "<|fim-gap-7f3a|>";

/// Build the downstream `/api/chat` body simulating a fill-in-the-middle
/// completion.
///
/// Requests without at least one `stop` sequence are rejected here, before
/// any downstream call is made: the first stop sequence is a required part
/// of the response mapping, and silently appending nothing would corrupt
/// the completion the caller stitches back together.
///
/// The route-forced model (engine path segment) takes precedence over the
/// inbound one.
pub fn build_infill_body(
    request: &CompletionRequest,
    forced_model: Option<&str>,
) -> Result<Value> {
    if request.stop.is_empty() {
        return Err(BridgeError::MissingStop);
    }

    let language = request
        .extra
        .as_ref()
        .and_then(|extra| extra.language.as_deref())
        .unwrap_or("text");

    let mut body = Map::new();
    body.insert(
        "messages".to_string(),
        Value::Array(infill_messages(
            &request.prompt,
            request.suffix.as_deref(),
            language,
        )),
    );
    body.insert("stream".to_string(), Value::Bool(false));

    if let Some(model) = resolve_model(forced_model, request.model.as_deref()) {
        body.insert("model".to_string(), Value::String(model));
    }

    if let Some(temperature) = request.temperature {
        body.insert("options".to_string(), json!({ "temperature": temperature }));
    }

    Ok(Value::Object(body))
}

/// The three-message conversation sent downstream.
fn infill_messages(prompt: &str, suffix: Option<&str>, language: &str) -> Vec<Value> {
    let system = format!(
        "You are a {language} completion engine. The user message contains the marker \
         {GAP_SENTINEL}. Reply with only the text that replaces {GAP_SENTINEL} so the \
         surrounding content reads naturally."
    );

    let gap_text = match suffix {
        Some(suffix) => format!("{prompt} {GAP_SENTINEL}\n{suffix}"),
        None => format!("{prompt} {GAP_SENTINEL}"),
    };

    let reminder = format!(
        "Respond with exactly the text that replaces {GAP_SENTINEL}. \
         Do not add quotes, code fences or any commentary."
    );

    vec![
        json!({"role": "system", "content": system}),
        json!({"role": "user", "content": gap_text}),
        json!({"role": "user", "content": reminder}),
    ]
}

/// Map the simulated chat response into the text completion envelope.
///
/// The completion text is the downstream message content with the caller's
/// first stop sequence appended. `finish_reason` is always `"length"`: the
/// simulated operation never carries real stop semantics, and downstream
/// completion status is not meaningful here. This is the one route that
/// populates token counts, straight from the downstream eval counters.
pub fn map_infill_response(
    request_id: &str,
    stop_tail: &str,
    raw: Value,
) -> Result<CompletionResponse> {
    let parsed: OllamaChatResponse = serde_json::from_value(raw)?;

    Ok(CompletionResponse {
        id: request_id.to_string(),
        object: "text_completion".to_string(),
        created: parsed.created_at.timestamp_millis(),
        choices: vec![CompletionChoice {
            text: format!("{}{}", parsed.message_content(), stop_tail),
            index: 0,
            finish_reason: "length".to_string(),
        }],
        usage: Usage::counted(parsed.prompt_eval_count, parsed.eval_count),
        system_fingerprint: Some(format!("{}:{}", BRIDGE_NAME, parsed.model)),
        model: parsed.model,
    })
}
