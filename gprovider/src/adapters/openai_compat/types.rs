//! Adapter-level request, reply, and chunk types for chat-completions backends.

use std::fmt::Formatter;

use serde_json::Value;

use crate::{
    Message, ModelResponse, OutputItem, ProviderId, Role, SecretString, StopReason, StreamEvent,
    TokenUsage, ToolCall, ToolDefinition, ToolResult,
};

#[derive(Debug, Clone, PartialEq)]
pub struct CompatRequest {
    pub model: String,
    pub messages: Vec<CompatMessage>,
    pub tools: Vec<CompatTool>,
    pub temperature: Option<f32>,
    pub max_tokens: Option<u32>,
    pub stream: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompatMessage {
    pub role: Role,
    pub content: String,
    /// Only set on the assistant turn that requested tools.
    pub tool_calls: Vec<ToolCall>,
    /// Only set on tool result turns.
    pub tool_call_id: Option<String>,
}

impl CompatMessage {
    pub(crate) fn tool_request(tool_calls: Vec<ToolCall>) -> Self {
        Self {
            role: Role::Assistant,
            content: String::new(),
            tool_calls,
            tool_call_id: None,
        }
    }

    pub(crate) fn tool_result(result: ToolResult) -> Self {
        Self {
            role: Role::Tool,
            content: result.output,
            tool_calls: Vec::new(),
            tool_call_id: Some(result.tool_call_id),
        }
    }
}

impl From<Message> for CompatMessage {
    fn from(value: Message) -> Self {
        Self {
            role: value.role,
            content: value.content,
            tool_calls: Vec::new(),
            tool_call_id: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct CompatTool {
    pub name: String,
    pub description: String,
    pub parameters: Value,
}

impl From<ToolDefinition> for CompatTool {
    fn from(value: ToolDefinition) -> Self {
        let parameters = value.input_schema();
        Self {
            name: value.name,
            description: value.description,
            parameters,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FinishReason {
    Stop,
    Length,
    ToolCalls,
    Other,
}

impl From<FinishReason> for StopReason {
    fn from(value: FinishReason) -> Self {
        match value {
            FinishReason::Stop => Self::EndTurn,
            FinishReason::Length => Self::MaxTokens,
            FinishReason::ToolCalls => Self::ToolUse,
            FinishReason::Other => Self::Other,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompatReply {
    pub model: String,
    pub content: String,
    pub tool_calls: Vec<ToolCall>,
    pub finish_reason: FinishReason,
    pub usage: TokenUsage,
}

impl CompatReply {
    pub(crate) fn into_model_response(self, provider: ProviderId) -> ModelResponse {
        let mut output = Vec::new();
        if !self.content.is_empty() {
            output.push(OutputItem::Message(Message::assistant(self.content)));
        }
        output.extend(self.tool_calls.into_iter().map(OutputItem::ToolCall));

        ModelResponse {
            provider,
            model: self.model,
            output,
            stop_reason: self.finish_reason.into(),
            usage: self.usage,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CompatChunk {
    Text(String),
    ToolCall(ToolCall),
    Finished(CompatReply),
}

impl CompatChunk {
    /// Maps one adapter chunk onto the provider events it stands for.
    pub(crate) fn into_events(self, provider: ProviderId) -> Vec<StreamEvent> {
        match self {
            Self::Text(delta) => vec![StreamEvent::TextDelta(delta)],
            Self::ToolCall(call) => vec![StreamEvent::ToolCallDelta(call)],
            Self::Finished(reply) => vec![
                StreamEvent::MessageComplete(Message::assistant(reply.content.clone())),
                StreamEvent::ResponseComplete(reply.into_model_response(provider)),
            ],
        }
    }
}

/// Credentials attached to each request.
#[derive(Clone, PartialEq, Eq)]
pub enum CompatAuth {
    /// Local runtimes such as Ollama take no credentials.
    None,
    Bearer(SecretString),
}

impl std::fmt::Debug for CompatAuth {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::None => f.write_str("CompatAuth::None"),
            Self::Bearer(_) => f.write_str("CompatAuth::Bearer([REDACTED])"),
        }
    }
}
