//! Unit tests for request shaping and stream decoding.

#![cfg(test)]

use std::sync::Arc;

use futures_util::stream;
use serde_json::json;

use crate::{
    Message, ModelRequest, ParameterKind, ProviderError, ProviderFuture, ProviderId, Role,
    StopReason, ToolCall, ToolDefinition, ToolResult,
};

use super::provider::OpenAiCompatProvider;
use super::transport::{ChatCompletionsTransport, CompatChunkStream};
use super::types::{CompatAuth, CompatChunk, CompatReply, CompatRequest, FinishReason};
use super::wire::{SseLine, SseLineBuffer, StreamAccumulator, build_wire_request, parse_finish_reason};

#[derive(Debug)]
struct UnusedTransport;

impl ChatCompletionsTransport for UnusedTransport {
    fn complete<'a>(
        &'a self,
        _request: CompatRequest,
        _auth: CompatAuth,
    ) -> ProviderFuture<'a, Result<CompatReply, ProviderError>> {
        Box::pin(async { Err(ProviderError::other("not used")) })
    }

    fn stream<'a>(
        &'a self,
        _request: CompatRequest,
        _auth: CompatAuth,
    ) -> ProviderFuture<'a, Result<CompatChunkStream<'a>, ProviderError>> {
        Box::pin(async {
            let output = stream::iter(vec![Err(ProviderError::other("not used"))]);
            Ok(Box::pin(output) as CompatChunkStream<'a>)
        })
    }
}

fn provider() -> OpenAiCompatProvider {
    OpenAiCompatProvider::new(
        ProviderId::Ollama,
        Arc::new(UnusedTransport),
        CompatAuth::None,
        "llama3.2",
    )
}

#[test]
fn tool_exchange_is_threaded_after_history() {
    let call = ToolCall {
        id: "call_1".to_string(),
        name: "check_stock".to_string(),
        arguments: "{\"product_name\":\"laptop\"}".to_string(),
    };
    let request = ModelRequest::new("", vec![Message::user("is the laptop in stock?")])
        .with_tool_exchange(
            call,
            ToolResult {
                tool_call_id: "call_1".to_string(),
                output: "laptop: 43 units In Stock".to_string(),
            },
        );

    let built = provider().build_request(request, false);
    assert_eq!(built.model, "llama3.2");
    assert_eq!(built.messages.len(), 3);
    assert_eq!(built.messages[1].role, Role::Assistant);
    assert_eq!(built.messages[1].tool_calls.len(), 1);
    assert_eq!(built.messages[2].role, Role::Tool);
    assert_eq!(built.messages[2].tool_call_id.as_deref(), Some("call_1"));
}

#[test]
fn wire_request_renders_function_tools_and_null_content() {
    let request = ModelRequest::new("llama3.2", vec![Message::user("")])
        .with_tools(vec![
            ToolDefinition::new("get_product", "Look up a product")
                .param("product_no", ParameterKind::Integer, "Product number"),
        ])
        .with_tool_exchange(
            ToolCall {
                id: "call_9".to_string(),
                name: "get_product".to_string(),
                arguments: "{\"product_no\":1001}".to_string(),
            },
            ToolResult {
                tool_call_id: "call_9".to_string(),
                output: "Product Number: 1001".to_string(),
            },
        );

    let wire = build_wire_request(provider().build_request(request, true)).expect("wire request");
    let value = serde_json::to_value(&wire).expect("serializable");

    assert_eq!(value["stream"], true);
    assert_eq!(value["messages"][0], json!({"role": "user", "content": ""}));
    assert_eq!(value["messages"][1]["content"], serde_json::Value::Null);
    assert_eq!(value["messages"][1]["tool_calls"][0]["type"], "function");
    assert_eq!(value["tools"][0]["function"]["name"], "get_product");
    assert_eq!(
        value["tools"][0]["function"]["parameters"]["required"],
        json!(["product_no"])
    );
}

#[test]
fn parse_finish_reason_maps_expected_values() {
    assert_eq!(parse_finish_reason(Some("stop")), FinishReason::Stop);
    assert_eq!(parse_finish_reason(Some("length")), FinishReason::Length);
    assert_eq!(parse_finish_reason(Some("tool_calls")), FinishReason::ToolCalls);
    assert_eq!(parse_finish_reason(Some("unknown")), FinishReason::Other);
    assert_eq!(parse_finish_reason(None), FinishReason::Other);
}

#[test]
fn sse_buffer_waits_for_complete_lines() {
    let mut buffer = SseLineBuffer::default();
    assert!(buffer.push(b"data: {\"a\"").is_empty());
    assert_eq!(
        buffer.push(b":1}\n\n: keep-alive\ndata: [DONE]\n"),
        vec![SseLine::Data("{\"a\":1}".to_string()), SseLine::Done]
    );
}

#[test]
fn sse_buffer_reassembles_split_utf8() {
    let line = "data: {\"content\":\"caf\u{e9}\"}\n".as_bytes();
    let split = line.len() - 4;
    let mut buffer = SseLineBuffer::default();

    assert!(buffer.push(&line[..split]).is_empty());
    assert_eq!(
        buffer.push(&line[split..]),
        vec![SseLine::Data("{\"content\":\"caf\u{e9}\"}".to_string())]
    );
}

#[test]
fn accumulator_assembles_text_and_tool_calls() {
    let mut accumulator = StreamAccumulator::new("requested");

    let first = accumulator
        .apply(r#"{"model":"llama3.2","choices":[{"delta":{"content":"Hello"}}]}"#)
        .expect("valid payload");
    assert_eq!(first, vec![CompatChunk::Text("Hello".to_string())]);

    accumulator
        .apply(r#"{"choices":[{"delta":{"tool_calls":[{"index":0,"id":"call_1","function":{"name":"search_tag","arguments":"{\"search"}}]}}]}"#)
        .expect("valid payload");
    accumulator
        .apply(r#"{"choices":[{"delta":{"tool_calls":[{"index":0,"function":{"arguments":"_tag\":\"gaming\"}"}}]},"finish_reason":"tool_calls"}]}"#)
        .expect("valid payload");

    let reply = accumulator.finish();
    assert_eq!(reply.model, "llama3.2");
    assert_eq!(reply.content, "Hello");
    assert_eq!(reply.finish_reason, FinishReason::ToolCalls);
    assert_eq!(reply.tool_calls[0].arguments, "{\"search_tag\":\"gaming\"}");

    let response = reply.into_model_response(ProviderId::Ollama);
    assert_eq!(response.stop_reason, StopReason::ToolUse);
    assert_eq!(response.tool_calls().len(), 1);
}

#[test]
fn accumulator_rejects_malformed_payload_without_losing_state() {
    let mut accumulator = StreamAccumulator::new("llama3.2");
    accumulator
        .apply(r#"{"choices":[{"delta":{"content":"a"}}]}"#)
        .expect("valid payload");

    assert!(accumulator.apply("{not json").is_err());

    accumulator
        .apply(r#"{"choices":[{"delta":{"content":"b"}}]}"#)
        .expect("valid payload");
    assert_eq!(accumulator.finish().content, "ab");
}
