//! Response parsing utilities.

use anysite_protocols::provider::CompletionResponse;

use crate::api::{ApiResponse, ContentBlock};

/// Parse API response to CompletionResponse. Text blocks are concatenated
/// in order.
pub fn parse_response(response: ApiResponse) -> CompletionResponse {
    let text = response
        .content
        .iter()
        .filter_map(|block| match block {
            ContentBlock::Text { text } => Some(text.as_str()),
            ContentBlock::Other => None,
        })
        .collect::<String>();

    CompletionResponse {
        id: response.id,
        model: response.model,
        text,
    }
}
