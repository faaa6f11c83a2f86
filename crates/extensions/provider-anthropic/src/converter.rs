//! Message conversion utilities.

use anysite_protocols::provider::{Message, MessageRole};

use crate::api::ApiMessage;

/// Convert messages to Anthropic API format.
pub fn convert_messages(messages: &[Message]) -> Vec<ApiMessage> {
    messages
        .iter()
        .map(|m| ApiMessage {
            role: match m.role {
                MessageRole::User => "user".to_string(),
                MessageRole::Assistant => "assistant".to_string(),
            },
            content: m.content.clone(),
        })
        .collect()
}
