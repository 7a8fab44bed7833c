//! Common `gprovider` imports for downstream crates.

pub use crate::adapters::mock::{MockProvider, ResponseRule, SimulatedLatency, Trigger};
pub use crate::adapters::openai_compat::OpenAiCompatProvider;
pub use crate::{
    BoxedEventStream, Message, ModelProvider, ModelRequest, ModelResponse, ParameterKind,
    ProviderError, ProviderErrorKind, ProviderId, Role, StreamEvent, ToolCall, ToolDefinition,
    ToolResult,
};
pub use gcommon::BoxFuture;
