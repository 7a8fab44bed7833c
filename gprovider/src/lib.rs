//! Completion backend abstraction for the GadgetsInc chat backend.
//!
//! A [`ModelProvider`] turns a conversation history into either one
//! [`ModelResponse`] or an ordered stream of [`StreamEvent`]s. Backends:
//!
//! - [`adapters::mock::MockProvider`]: keyword rules, no network.
//! - [`adapters::openai_compat::OpenAiCompatProvider`]: Ollama or any hosted
//!   endpoint speaking the chat-completions protocol.

pub mod adapters;
pub mod credentials;
pub mod error;
pub mod model;
pub mod prelude;
pub mod provider;
pub mod stream;

pub use credentials::SecretString;
pub use error::{ProviderError, ProviderErrorKind};
pub use model::{
    Message, ModelRequest, ModelRequestBuilder, ModelResponse, OutputItem, ParameterKind,
    ProviderId, Role, StopReason, TokenUsage, ToolCall, ToolDefinition, ToolParameter, ToolResult,
};
pub use provider::{ModelProvider, ProviderFuture};
pub use stream::{BoxedEventStream, ModelEventStream, StreamEvent, VecEventStream};
