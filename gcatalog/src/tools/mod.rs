//! Text-returning tool functions and their registry bindings.
//!
//! Each submodule exposes the pure lookup functions plus a `register_*`
//! function that binds them into a [`gtooling::ToolRegistry`]. Lookup failures
//! are `InvalidArguments` errors, which the runtime renders as `Error: ...`.

pub mod catalog;
pub mod math;
pub mod shipping;
pub mod storefront;
pub mod support;

use std::sync::Arc;

use gtooling::{ToolError, ToolRegistry};

use crate::Storefront;

pub use catalog::register_catalog_tools;
pub use math::register_math_tools;
pub use shipping::register_shipping_tools;
pub use storefront::register_storefront_tools;
pub use support::register_support_tools;

const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M";

/// Storefront and customer-service tools used by the chat backend.
pub fn chat_registry(storefront: Arc<Storefront>) -> Result<ToolRegistry, ToolError> {
    let mut registry = ToolRegistry::new();
    register_storefront_tools(&mut registry, Arc::clone(&storefront))?;
    register_support_tools(&mut registry, storefront)?;
    tracing::debug!(tools = registry.len(), surface = "chat", "tool registry built");
    Ok(registry)
}

/// Tools served by the product catalog MCP server.
pub fn catalog_registry(storefront: Arc<Storefront>) -> Result<ToolRegistry, ToolError> {
    let mut registry = ToolRegistry::new();
    register_catalog_tools(&mut registry, storefront)?;
    tracing::debug!(tools = registry.len(), surface = "catalog", "tool registry built");
    Ok(registry)
}

/// Tools served by the shipping MCP server.
pub fn shipping_registry(storefront: Arc<Storefront>) -> Result<ToolRegistry, ToolError> {
    let mut registry = ToolRegistry::new();
    register_shipping_tools(&mut registry, storefront)?;
    register_math_tools(&mut registry)?;
    tracing::debug!(tools = registry.len(), surface = "shipping", "tool registry built");
    Ok(registry)
}

fn require_non_blank(value: &str, message: &str) -> Result<(), ToolError> {
    if value.trim().is_empty() {
        return Err(ToolError::invalid_arguments(message));
    }

    Ok(())
}
