//! Built-in tools.

mod weather;
mod web_search;

pub use weather::WeatherTool;
pub use web_search::WebSearchTool;

use crate::registry::ToolRegistry;
use std::sync::Arc;

/// Build the registry in its fixed order: `web_search`, then `get_weather`.
///
/// A tool passed as `None` is left out.
pub fn default_registry(
    web_search: Option<WebSearchTool>,
    weather: Option<WeatherTool>,
) -> ToolRegistry {
    let mut registry = ToolRegistry::new();
    if let Some(tool) = web_search {
        registry.register(Arc::new(tool));
    }
    if let Some(tool) = weather {
        registry.register(Arc::new(tool));
    }
    registry
}
