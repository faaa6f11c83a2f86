//! Tool definition validation errors.

use thiserror::Error;

use crate::tool::Transport;

#[derive(Debug, Error)]
pub enum DefinitionError {
    #[error("Tool name is empty")]
    EmptyName,

    #[error("Tool \"{tool}\" requires \"{field}\" which is not a declared property")]
    UndeclaredRequired { tool: String, field: String },

    #[error("Tool \"{tool}\" uses the {transport} transport but has no matching config")]
    MissingConfig { tool: String, transport: Transport },

    #[error("Tool \"{0}\" carries both httpConfig and browserConfig")]
    ConflictingConfig(String),

    #[error("Tool \"{tool}\" has invalid url \"{url}\": {reason}")]
    InvalidUrl {
        tool: String,
        url: String,
        reason: String,
    },

    #[error("Tool \"{0}\" has no steps")]
    NoSteps(String),
}
