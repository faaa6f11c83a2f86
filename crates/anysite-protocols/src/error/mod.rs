//! Error types for the AnySite protocol layer.

mod browser;
mod definition;
mod discovery;
mod executor;
mod fetch;
mod provider;

pub use browser::*;
pub use definition::*;
pub use discovery::*;
pub use executor::*;
pub use fetch::*;
pub use provider::*;
