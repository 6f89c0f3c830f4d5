//! Agent tools: web search and a geocode → current-conditions weather lookup.

mod error;
mod executor;
mod registry;
mod types;
pub mod builtin;
pub mod search;
pub mod weather;

pub use error::ToolError;
pub use executor::ToolExecutor;
pub use registry::ToolRegistry;
pub use search::{RunContext, SearchBackend, SearchContext, TavilyClient};
pub use types::*;
