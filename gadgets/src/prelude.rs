//! Common imports for applications embedding the GadgetsInc backend.

pub use crate::config::{Backend, BackendArgs, ChatArgs, Cli, Command, ToolServerArgs};
pub use crate::providers::{SetupError, SetupErrorKind, build_provider, mock_provider};
pub use crate::runtime::{ToolSurface, chat_service, demo_storefront, observed_runtime};
pub use crate::server::{McpHandler, chat_router, mcp_router, serve_stdio, with_common_layers};
pub use crate::{ChatFrame, ChatService, Message, ModelProvider, Role, ToolRegistry, ToolRuntime};
pub use gchat::prelude::CancellationToken;
