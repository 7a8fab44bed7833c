use std::sync::{Arc, Mutex};

use chrono::NaiveDate;
use futures_util::StreamExt;
use gcatalog::Storefront;
use gcatalog::tools::chat_registry;
use gchat::prelude::*;
use gprovider::{
    BoxedEventStream, Message, ModelProvider, ModelRequest, ModelResponse, OutputItem,
    ProviderError, ProviderFuture, ProviderId, StopReason, StreamEvent, TokenUsage, ToolCall,
    VecEventStream,
};

/// Asks for one tool on the first round, then echoes the last tool output.
#[derive(Debug)]
struct ToolLoopProvider {
    call: ToolCall,
    requests: Mutex<Vec<ModelRequest>>,
}

impl ToolLoopProvider {
    fn new(name: &str, arguments: &str) -> Self {
        Self {
            call: ToolCall {
                id: "tool_call_1".to_string(),
                name: name.to_string(),
                arguments: arguments.to_string(),
            },
            requests: Mutex::new(Vec::new()),
        }
    }

    fn respond(&self, request: &ModelRequest) -> ModelResponse {
        self.requests.lock().expect("requests lock").push(request.clone());

        match request.tool_results.last() {
            None => ModelResponse {
                provider: ProviderId::OpenAi,
                model: request.model.clone(),
                output: vec![OutputItem::ToolCall(self.call.clone())],
                stop_reason: StopReason::ToolUse,
                usage: TokenUsage::default(),
            },
            Some(result) => ModelResponse::text(
                ProviderId::OpenAi,
                request.model.clone(),
                format!("tool said: {}", result.output),
            ),
        }
    }
}

impl ModelProvider for ToolLoopProvider {
    fn id(&self) -> ProviderId {
        ProviderId::OpenAi
    }

    fn complete<'a>(
        &'a self,
        request: ModelRequest,
    ) -> ProviderFuture<'a, Result<ModelResponse, ProviderError>> {
        Box::pin(async move { Ok(self.respond(&request)) })
    }

    fn stream<'a>(
        &'a self,
        request: ModelRequest,
    ) -> ProviderFuture<'a, Result<BoxedEventStream<'a>, ProviderError>> {
        Box::pin(async move {
            let response = self.respond(&request);
            let mut events = Vec::new();
            for call in response.tool_calls() {
                events.push(Ok(StreamEvent::ToolCallDelta(call)));
            }
            let text = response.assistant_text();
            if !text.is_empty() {
                events.push(Ok(StreamEvent::TextDelta(text)));
            }
            events.push(Ok(StreamEvent::ResponseComplete(response)));

            Ok(Box::pin(VecEventStream::new(events)) as BoxedEventStream<'a>)
        })
    }
}

/// Always requests another tool call.
#[derive(Debug, Default)]
struct RelentlessProvider {
    rounds: Mutex<usize>,
}

impl ModelProvider for RelentlessProvider {
    fn id(&self) -> ProviderId {
        ProviderId::OpenAi
    }

    fn complete<'a>(
        &'a self,
        request: ModelRequest,
    ) -> ProviderFuture<'a, Result<ModelResponse, ProviderError>> {
        Box::pin(async move {
            let mut rounds = self.rounds.lock().expect("rounds lock");
            *rounds += 1;
            Ok(ModelResponse {
                provider: ProviderId::OpenAi,
                model: request.model,
                output: vec![
                    OutputItem::Message(Message::assistant(format!("round {rounds}"))),
                    OutputItem::ToolCall(ToolCall {
                        id: format!("call_{rounds}"),
                        name: "check_stock".to_string(),
                        arguments: r#"{"product_name":"laptop"}"#.to_string(),
                    }),
                ],
                stop_reason: StopReason::ToolUse,
                usage: TokenUsage::default(),
            })
        })
    }

    fn stream<'a>(
        &'a self,
        _request: ModelRequest,
    ) -> ProviderFuture<'a, Result<BoxedEventStream<'a>, ProviderError>> {
        Box::pin(async { Err(ProviderError::other("streaming is not scripted")) })
    }
}

fn runtime() -> Arc<dyn ToolRuntime> {
    let as_of = NaiveDate::from_ymd_opt(2026, 3, 14)
        .and_then(|date| date.and_hms_opt(9, 30, 0))
        .expect("valid timestamp");
    let registry = chat_registry(Arc::new(Storefront::demo(as_of))).expect("tools register");
    Arc::new(DefaultToolRuntime::new(Arc::new(registry)))
}

#[tokio::test]
async fn simple_chat_runs_requested_tool_and_returns_follow_up_text() {
    let provider = Arc::new(ToolLoopProvider::new(
        "check_stock",
        r#"{"product_name":"laptop"}"#,
    ));
    let service = ChatService::builder(provider.clone())
        .tool_runtime(runtime())
        .build();

    let reply = service.simple_chat("is the laptop in stock?").await.expect("chat works");
    assert_eq!(reply, "tool said: laptop: 43 units In Stock");

    let requests = provider.requests.lock().expect("requests lock");
    assert_eq!(requests.len(), 2);
    assert_eq!(requests[0].tools.len(), 6);
    assert_eq!(requests[1].tool_calls, vec![provider.call.clone()]);
    assert_eq!(requests[1].tool_results[0].tool_call_id, "tool_call_1");
}

#[tokio::test]
async fn malformed_tool_arguments_are_reported_inline() {
    let provider = Arc::new(ToolLoopProvider::new("calculate_shipping", "{oops"));
    let service = ChatService::builder(provider).tool_runtime(runtime()).build();

    let reply = service.simple_chat("ship it").await.expect("chat works");
    assert!(reply.starts_with("tool said: Error: invalid JSON arguments"));
}

#[tokio::test]
async fn unknown_tool_becomes_inline_error_and_stream_completes() {
    let provider = Arc::new(ToolLoopProvider::new("get_weather", "{}"));
    let service = ChatService::builder(provider).tool_runtime(runtime()).build();

    let frames: Vec<ChatFrame> = service
        .stream_chat(vec![Message::user("weather?")], CancellationToken::new())
        .collect()
        .await;

    assert_eq!(frames.len(), 2);
    match &frames[0] {
        ChatFrame::Content(text) => {
            assert!(text.starts_with("tool said: Error: tool 'get_weather' is not registered"))
        }
        other => panic!("expected content, got {other:?}"),
    }
    assert_eq!(frames[1], ChatFrame::Done);
}

#[tokio::test]
async fn tool_loop_stops_at_round_trip_limit() {
    let provider = Arc::new(RelentlessProvider::default());
    let service = ChatService::builder(provider.clone())
        .tool_runtime(runtime())
        .max_tool_round_trips(2)
        .build();

    let reply = service.simple_chat("loop forever").await.expect("chat works");
    assert_eq!(reply, "round 3");
    assert_eq!(*provider.rounds.lock().expect("rounds lock"), 3);
}

#[tokio::test]
async fn without_runtime_tool_calls_are_ignored() {
    let provider = Arc::new(RelentlessProvider::default());
    let service = ChatService::builder(provider.clone()).build();

    let reply = service.simple_chat("hi").await.expect("chat works");
    assert_eq!(reply, "round 1");
}
