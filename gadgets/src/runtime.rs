//! Wiring helpers: datasets, tool runtimes, and the chat service.

use std::sync::Arc;

use chrono::Utc;
use gcatalog::Storefront;
use gcatalog::tools::{catalog_registry, chat_registry, shipping_registry};
use gchat::ChatService;
use gobserve::standard_tool_hooks;
use gprovider::ModelProvider;
use gtooling::{DefaultToolRuntime, ToolRegistry, ToolRuntime};

use crate::config::ChatArgs;
use crate::providers::{SetupError, build_provider};

/// Demo datasets stamped with the current UTC time.
pub fn demo_storefront() -> Arc<Storefront> {
    Arc::new(Storefront::demo(Utc::now().naive_utc()))
}

/// Registry-backed runtime with tracing and metrics hooks attached.
pub fn observed_runtime(registry: ToolRegistry) -> Arc<dyn ToolRuntime> {
    Arc::new(
        DefaultToolRuntime::new(Arc::new(registry)).with_hooks(Arc::new(standard_tool_hooks())),
    )
}

/// Chat service with the storefront and customer-service tools attached.
pub fn chat_service(
    provider: Arc<dyn ModelProvider>,
    storefront: Arc<Storefront>,
    max_tool_round_trips: usize,
) -> Result<ChatService, SetupError> {
    let registry = chat_registry(storefront)?;
    Ok(ChatService::builder(provider)
        .tool_runtime(observed_runtime(registry))
        .max_tool_round_trips(max_tool_round_trips)
        .build())
}

/// Builds the backend selected in `args` and the chat service around it.
pub fn chat_service_from_args(
    args: &ChatArgs,
    storefront: Arc<Storefront>,
) -> Result<ChatService, SetupError> {
    let provider = build_provider(&args.backend, Arc::clone(&storefront))?;
    chat_service(provider, storefront, args.max_tool_round_trips)
}

/// The tool sets served by the auxiliary MCP servers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToolSurface {
    Catalog,
    Shipping,
}

impl ToolSurface {
    pub fn server_name(self) -> &'static str {
        match self {
            Self::Catalog => "gadgets-product-catalog",
            Self::Shipping => "gadgets-shipping",
        }
    }

    pub fn registry(self, storefront: Arc<Storefront>) -> Result<ToolRegistry, SetupError> {
        let registry = match self {
            Self::Catalog => catalog_registry(storefront)?,
            Self::Shipping => shipping_registry(storefront)?,
        };

        Ok(registry)
    }

    pub fn runtime(self, storefront: Arc<Storefront>) -> Result<Arc<dyn ToolRuntime>, SetupError> {
        Ok(observed_runtime(self.registry(storefront)?))
    }
}
