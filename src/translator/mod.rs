//! Bidirectional schema translation between the OpenAI-compatible surface
//! and the Ollama wire format.
//!
//! Every function in this module tree is pure and stateless: request
//! builders produce the JSON body for one downstream call, response mappers
//! reshape one parsed downstream body into the client-facing schema. No
//! value outlives a single request.

pub mod chat;
pub mod generate;
pub mod infill;
pub mod models;

pub use chat::{build_chat_body, map_chat_response};
pub use generate::{build_generate_body, map_generate_response};
pub use infill::{build_infill_body, map_infill_response, GAP_SENTINEL};
pub use models::map_model_list;

/// Prioritized model resolution.
///
/// Returns the first model name that is present, in the given order.
/// `None` means the downstream body carries no `model` field at all and the
/// inference server assigns its own default; the response then echoes the
/// model the server actually used.
///
/// Chat requests resolve `(requested, forced)` so a client-supplied model
/// wins over a route alias; fill-in-the-middle requests resolve
/// `(forced, requested)` because the engine path segment pins the model.
pub fn resolve_model(first: Option<&str>, second: Option<&str>) -> Option<String> {
    first.or(second).map(str::to_string)
}
