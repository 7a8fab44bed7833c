//! JSON payloads of the `/chat/completions` endpoint and SSE decoding.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::{ProviderError, TokenUsage, ToolCall};

use super::types::{CompatChunk, CompatMessage, CompatReply, CompatRequest, CompatTool, FinishReason};

pub(crate) fn build_wire_request(request: CompatRequest) -> Result<WireRequest, ProviderError> {
    if request.messages.is_empty() {
        return Err(ProviderError::invalid_request(
            "chat completion request requires at least one message",
        ));
    }

    let tools = if request.tools.is_empty() {
        None
    } else {
        Some(request.tools.into_iter().map(WireTool::from).collect())
    };

    Ok(WireRequest {
        model: request.model,
        messages: request.messages.into_iter().map(WireMessage::from).collect(),
        tools,
        temperature: request.temperature,
        max_tokens: request.max_tokens,
        stream: request.stream,
    })
}

pub(crate) fn parse_finish_reason(value: Option<&str>) -> FinishReason {
    match value {
        Some("stop") => FinishReason::Stop,
        Some("length") => FinishReason::Length,
        Some("tool_calls") => FinishReason::ToolCalls,
        _ => FinishReason::Other,
    }
}

pub(crate) fn extract_error_message(body: &str) -> Option<String> {
    let parsed = serde_json::from_str::<WireErrorEnvelope>(body).ok()?;
    Some(parsed.error.message)
}

#[derive(Debug, Deserialize)]
struct WireErrorEnvelope {
    error: WireError,
}

#[derive(Debug, Deserialize)]
struct WireError {
    message: String,
}

#[derive(Debug, Serialize)]
pub(crate) struct WireRequest {
    pub model: String,
    pub messages: Vec<WireMessage>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tools: Option<Vec<WireTool>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub temperature: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_tokens: Option<u32>,
    pub stream: bool,
}

#[derive(Debug, Serialize)]
pub(crate) struct WireMessage {
    pub role: &'static str,
    pub content: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub tool_calls: Vec<WireToolCall>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tool_call_id: Option<String>,
}

impl From<CompatMessage> for WireMessage {
    fn from(value: CompatMessage) -> Self {
        // Assistant turns that only request tools carry `content: null`.
        let content = if value.content.is_empty() && !value.tool_calls.is_empty() {
            None
        } else {
            Some(value.content)
        };

        Self {
            role: value.role.as_str(),
            content,
            tool_calls: value.tool_calls.into_iter().map(WireToolCall::from).collect(),
            tool_call_id: value.tool_call_id,
        }
    }
}

#[derive(Debug, Serialize)]
pub(crate) struct WireToolCall {
    pub id: String,
    pub r#type: &'static str,
    pub function: WireFunctionCall,
}

impl From<ToolCall> for WireToolCall {
    fn from(value: ToolCall) -> Self {
        Self {
            id: value.id,
            r#type: "function",
            function: WireFunctionCall {
                name: value.name,
                arguments: value.arguments,
            },
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub(crate) struct WireFunctionCall {
    pub name: String,
    pub arguments: String,
}

#[derive(Debug, Serialize)]
pub(crate) struct WireTool {
    pub r#type: &'static str,
    pub function: WireFunction,
}

impl From<CompatTool> for WireTool {
    fn from(value: CompatTool) -> Self {
        Self {
            r#type: "function",
            function: WireFunction {
                name: value.name,
                description: value.description,
                parameters: value.parameters,
            },
        }
    }
}

#[derive(Debug, Serialize)]
pub(crate) struct WireFunction {
    pub name: String,
    pub description: String,
    pub parameters: Value,
}

#[derive(Debug, Deserialize)]
pub(crate) struct WireResponse {
    #[serde(default)]
    model: String,
    choices: Vec<WireChoice>,
    usage: Option<WireUsage>,
}

#[derive(Debug, Deserialize)]
struct WireChoice {
    message: WireAssistantMessage,
    finish_reason: Option<String>,
}

#[derive(Debug, Deserialize)]
struct WireAssistantMessage {
    content: Option<String>,
    tool_calls: Option<Vec<WireResponseToolCall>>,
}

#[derive(Debug, Deserialize)]
struct WireResponseToolCall {
    id: String,
    function: WireFunctionCall,
}

#[derive(Debug, Clone, Copy, Deserialize)]
struct WireUsage {
    #[serde(default)]
    prompt_tokens: u32,
    #[serde(default)]
    completion_tokens: u32,
    #[serde(default)]
    total_tokens: u32,
}

impl From<WireUsage> for TokenUsage {
    fn from(value: WireUsage) -> Self {
        Self {
            input_tokens: value.prompt_tokens,
            output_tokens: value.completion_tokens,
            total_tokens: value.total_tokens,
        }
    }
}

impl TryFrom<WireResponse> for CompatReply {
    type Error = ProviderError;

    fn try_from(value: WireResponse) -> Result<Self, Self::Error> {
        let choice = value
            .choices
            .into_iter()
            .next()
            .ok_or_else(|| ProviderError::transport("completion response did not include choices"))?;

        let tool_calls = choice
            .message
            .tool_calls
            .unwrap_or_default()
            .into_iter()
            .map(|call| ToolCall {
                id: call.id,
                name: call.function.name,
                arguments: call.function.arguments,
            })
            .collect();

        Ok(Self {
            model: value.model,
            content: choice.message.content.unwrap_or_default(),
            tool_calls,
            finish_reason: parse_finish_reason(choice.finish_reason.as_deref()),
            usage: value.usage.map(TokenUsage::from).unwrap_or_default(),
        })
    }
}

#[derive(Debug, Deserialize)]
pub(crate) struct WireStreamResponse {
    #[serde(default)]
    model: Option<String>,
    #[serde(default)]
    choices: Vec<WireStreamChoice>,
    usage: Option<WireUsage>,
}

#[derive(Debug, Deserialize)]
struct WireStreamChoice {
    #[serde(default)]
    delta: WireStreamDelta,
    finish_reason: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
struct WireStreamDelta {
    content: Option<String>,
    tool_calls: Option<Vec<WireDeltaToolCall>>,
}

#[derive(Debug, Deserialize)]
struct WireDeltaToolCall {
    index: Option<u32>,
    id: Option<String>,
    function: Option<WireDeltaFunction>,
}

#[derive(Debug, Deserialize)]
struct WireDeltaFunction {
    name: Option<String>,
    arguments: Option<String>,
}

/// One complete `data:` line pulled out of the byte stream.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum SseLine {
    Data(String),
    Done,
}

/// Splits a byte stream into SSE `data:` payloads.
///
/// Bytes are buffered until a full line is available, so multi-byte UTF-8
/// sequences split across network chunks decode correctly.
#[derive(Debug, Default)]
pub(crate) struct SseLineBuffer {
    pending: Vec<u8>,
}

impl SseLineBuffer {
    pub(crate) fn push(&mut self, bytes: &[u8]) -> Vec<SseLine> {
        self.pending.extend_from_slice(bytes);

        let mut lines = Vec::new();
        while let Some(newline) = self.pending.iter().position(|byte| *byte == b'\n') {
            let raw = self.pending.drain(..=newline).collect::<Vec<_>>();
            let line = String::from_utf8_lossy(&raw);
            let line = line.trim();

            let Some(payload) = line.strip_prefix("data:") else {
                continue;
            };

            let payload = payload.trim();
            if payload == "[DONE]" {
                lines.push(SseLine::Done);
            } else if !payload.is_empty() {
                lines.push(SseLine::Data(payload.to_string()));
            }
        }

        lines
    }
}

/// Folds streamed deltas into chunks plus the final assembled reply.
#[derive(Debug)]
pub(crate) struct StreamAccumulator {
    model: String,
    content: String,
    tool_calls: BTreeMap<u32, ToolCall>,
    finish_reason: FinishReason,
    usage: TokenUsage,
}

impl StreamAccumulator {
    pub(crate) fn new(model: impl Into<String>) -> Self {
        Self {
            model: model.into(),
            content: String::new(),
            tool_calls: BTreeMap::new(),
            finish_reason: FinishReason::Other,
            usage: TokenUsage::default(),
        }
    }

    /// Applies one `data:` payload. A payload that is not valid JSON is an error
    /// the caller may skip; the accumulator is left untouched.
    pub(crate) fn apply(&mut self, payload: &str) -> Result<Vec<CompatChunk>, serde_json::Error> {
        let parsed = serde_json::from_str::<WireStreamResponse>(payload)?;
        let mut chunks = Vec::new();

        if let Some(model) = parsed.model
            && !model.is_empty()
        {
            self.model = model;
        }

        if let Some(usage) = parsed.usage {
            self.usage = usage.into();
        }

        let Some(choice) = parsed.choices.into_iter().next() else {
            return Ok(chunks);
        };

        if let Some(delta) = choice.delta.content
            && !delta.is_empty()
        {
            self.content.push_str(&delta);
            chunks.push(CompatChunk::Text(delta));
        }

        for delta_call in choice.delta.tool_calls.unwrap_or_default() {
            let index = delta_call.index.unwrap_or(0);
            let entry = self.tool_calls.entry(index).or_insert_with(|| ToolCall {
                id: format!("tool_call_{index}"),
                name: String::new(),
                arguments: String::new(),
            });

            if let Some(id) = delta_call.id {
                entry.id = id;
            }

            if let Some(function) = delta_call.function {
                if let Some(name) = function.name {
                    entry.name = name;
                }
                if let Some(arguments) = function.arguments {
                    entry.arguments.push_str(&arguments);
                }
            }

            chunks.push(CompatChunk::ToolCall(entry.clone()));
        }

        if choice.finish_reason.is_some() {
            self.finish_reason = parse_finish_reason(choice.finish_reason.as_deref());
        }

        Ok(chunks)
    }

    pub(crate) fn finish(self) -> CompatReply {
        CompatReply {
            model: self.model,
            content: self.content,
            tool_calls: self.tool_calls.into_values().collect(),
            finish_reason: self.finish_reason,
            usage: self.usage,
        }
    }
}
