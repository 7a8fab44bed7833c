//! GadgetsInc chat backend.
//!
//! This crate wires the workspace together: it reads configuration, selects
//! one completion backend, and serves the chat API and the two MCP tool
//! servers. It also re-exports the member crates so embedders need a single
//! dependency.
//!
//! ```rust
//! use std::sync::Arc;
//!
//! use gadgets::providers::mock_provider;
//! use gadgets::runtime::{chat_service, demo_storefront};
//!
//! # #[tokio::main(flavor = "current_thread")]
//! # async fn main() {
//! let storefront = demo_storefront();
//! let provider = Arc::new(mock_provider(Arc::clone(&storefront), false));
//! let service = chat_service(provider, storefront, 4).expect("tools register once");
//!
//! let reply = service.simple_chat("How much does the tablet cost?").await.expect("mock reply");
//! assert!(reply.contains("Tablet"));
//! # }
//! ```

mod app;

pub mod config;
pub mod prelude;
pub mod providers;
pub mod runtime;
pub mod server;

pub use gcatalog;
pub use gchat;
pub use gcommon;
pub use gobserve;
pub use gprovider;
pub use gtooling;

pub use app::{run, run_chat, run_tool_server};
pub use gchat::{ChatError, ChatErrorKind, ChatFrame, ChatService, ChatServiceBuilder, encode_frames};
pub use gcommon::{BoxFuture, MetadataMap, RequestId};
pub use gprovider::{
    Message, ModelProvider, ModelRequest, ModelResponse, ProviderError, ProviderErrorKind,
    ProviderId, Role, StreamEvent, ToolCall, ToolDefinition, ToolResult,
};
pub use gtooling::{
    DefaultToolRuntime, ToolError, ToolErrorKind, ToolExecutionContext, ToolExecutionResult,
    ToolRegistry, ToolRuntime,
};
pub use providers::{SetupError, SetupErrorKind, build_provider};
