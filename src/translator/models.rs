//! Model listing translation (`/api/tags` to the models envelope).

use crate::api::models::{ModelInfo, ModelList, OllamaTagsResponse};
use crate::core::config::OwnershipTable;

/// Map the Ollama tag listing into the client-facing models envelope.
///
/// `created` is the tag's modification timestamp in epoch milliseconds;
/// `owned_by` comes from the injected ownership table.
pub fn map_model_list(tags: OllamaTagsResponse, ownership: &OwnershipTable) -> ModelList {
    let data = tags
        .models
        .into_iter()
        .map(|tag| ModelInfo {
            owned_by: ownership.owner_for(&tag.name),
            created: tag.modified_at.timestamp_millis(),
            id: tag.name,
            object: "model".to_string(),
        })
        .collect();

    ModelList {
        object: "models".to_string(),
        data,
    }
}
