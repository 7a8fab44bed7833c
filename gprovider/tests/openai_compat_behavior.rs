use std::sync::{Arc, Mutex};

use futures_util::StreamExt;
use gprovider::adapters::openai_compat::{
    ChatCompletionsTransport, CompatAuth, CompatChunk, CompatChunkStream, CompatReply,
    CompatRequest, FinishReason, OpenAiCompatProvider,
};
use gprovider::{
    Message, ModelProvider, ModelRequest, ParameterKind, ProviderError, ProviderErrorKind,
    ProviderFuture, ProviderId, SecretString, StopReason, StreamEvent, TokenUsage, ToolCall,
    ToolDefinition,
};

#[derive(Debug, Default)]
struct FakeTransport {
    calls: Mutex<usize>,
    captured_auth: Mutex<Option<CompatAuth>>,
    captured_request: Mutex<Option<CompatRequest>>,
    fail_with: Option<ProviderError>,
}

impl FakeTransport {
    fn failing(error: ProviderError) -> Self {
        Self {
            fail_with: Some(error),
            ..Self::default()
        }
    }

    fn capture(&self, request: CompatRequest, auth: CompatAuth) -> Result<(), ProviderError> {
        *self.calls.lock().expect("calls lock") += 1;
        *self.captured_request.lock().expect("request lock") = Some(request);
        *self.captured_auth.lock().expect("auth lock") = Some(auth);
        match &self.fail_with {
            Some(error) => Err(error.clone()),
            None => Ok(()),
        }
    }

    fn reply(content: &str) -> CompatReply {
        CompatReply {
            model: "llama3.2".to_string(),
            content: content.to_string(),
            tool_calls: vec![ToolCall {
                id: "call_1".to_string(),
                name: "check_stock".to_string(),
                arguments: "{\"product_name\":\"tablet\"}".to_string(),
            }],
            finish_reason: FinishReason::ToolCalls,
            usage: TokenUsage {
                input_tokens: 4,
                output_tokens: 2,
                total_tokens: 6,
            },
        }
    }
}

impl ChatCompletionsTransport for FakeTransport {
    fn complete<'a>(
        &'a self,
        request: CompatRequest,
        auth: CompatAuth,
    ) -> ProviderFuture<'a, Result<CompatReply, ProviderError>> {
        Box::pin(async move {
            self.capture(request, auth)?;
            Ok(Self::reply("checking stock"))
        })
    }

    fn stream<'a>(
        &'a self,
        request: CompatRequest,
        auth: CompatAuth,
    ) -> ProviderFuture<'a, Result<CompatChunkStream<'a>, ProviderError>> {
        Box::pin(async move {
            self.capture(request, auth)?;
            let chunks = vec![
                Ok(CompatChunk::Text("Hello".to_string())),
                Ok(CompatChunk::Text(" there".to_string())),
                Ok(CompatChunk::Finished(Self::reply("Hello there"))),
            ];
            Ok(Box::pin(futures_util::stream::iter(chunks)) as CompatChunkStream<'a>)
        })
    }
}

fn ollama(transport: Arc<FakeTransport>) -> OpenAiCompatProvider {
    OpenAiCompatProvider::new(ProviderId::Ollama, transport, CompatAuth::None, "llama3.2")
}

#[tokio::test]
async fn complete_maps_reply_and_sends_tools() {
    let transport = Arc::new(FakeTransport::default());
    let provider = ollama(transport.clone());
    let request = ModelRequest::new("", vec![Message::user("is the tablet in stock?")]).with_tools(
        vec![ToolDefinition::new("check_stock", "Check stock").param(
            "product_name",
            ParameterKind::String,
            "Product name",
        )],
    );

    let response = provider.complete(request).await.expect("completion should succeed");
    assert_eq!(response.provider, ProviderId::Ollama);
    assert_eq!(response.stop_reason, StopReason::ToolUse);
    assert_eq!(response.usage.total_tokens, 6);
    assert_eq!(response.assistant_text(), "checking stock");
    assert_eq!(response.tool_calls()[0].name, "check_stock");

    let captured = transport
        .captured_request
        .lock()
        .expect("request lock")
        .clone()
        .expect("request should be captured");
    assert_eq!(captured.model, "llama3.2");
    assert_eq!(captured.tools.len(), 1);
    assert!(!captured.stream);
    assert_eq!(
        transport.captured_auth.lock().expect("auth lock").clone(),
        Some(CompatAuth::None)
    );
}

#[tokio::test]
async fn stream_forwards_deltas_then_completion() {
    let transport = Arc::new(FakeTransport::default());
    let provider = OpenAiCompatProvider::new(
        ProviderId::OpenAi,
        transport.clone(),
        CompatAuth::Bearer(SecretString::new("sk-test")),
        "gpt-4o-mini",
    );
    let request = ModelRequest::new("gpt-4o", vec![Message::user("hi")]);

    let mut stream = provider.stream(request).await.expect("stream should open");
    let mut events = Vec::new();
    while let Some(event) = stream.next().await {
        events.push(event.expect("no stream errors"));
    }

    assert_eq!(events[0], StreamEvent::TextDelta("Hello".to_string()));
    assert_eq!(events[1], StreamEvent::TextDelta(" there".to_string()));
    assert!(matches!(events[2], StreamEvent::MessageComplete(_)));
    match &events[3] {
        StreamEvent::ResponseComplete(response) => {
            assert_eq!(response.provider, ProviderId::OpenAi);
            assert_eq!(response.assistant_text(), "Hello there");
        }
        other => panic!("unexpected terminal event: {other:?}"),
    }

    let captured = transport
        .captured_request
        .lock()
        .expect("request lock")
        .clone()
        .expect("request should be captured");
    assert!(captured.stream);
    assert_eq!(captured.model, "gpt-4o");
    assert!(matches!(
        transport.captured_auth.lock().expect("auth lock").clone(),
        Some(CompatAuth::Bearer(_))
    ));
}

#[tokio::test]
async fn empty_history_skips_the_backend() {
    let transport = Arc::new(FakeTransport::default());
    let provider = ollama(transport.clone());

    let response = provider
        .complete(ModelRequest::new("", Vec::new()))
        .await
        .expect("empty history is accepted");
    assert_eq!(response.assistant_text(), "");

    let mut stream = provider
        .stream(ModelRequest::new("", Vec::new()))
        .await
        .expect("empty history is accepted");
    let mut deltas = 0;
    while let Some(event) = stream.next().await {
        if let StreamEvent::TextDelta(_) = event.expect("no errors") {
            deltas += 1;
        }
    }

    assert_eq!(deltas, 0);
    assert_eq!(*transport.calls.lock().expect("calls lock"), 0);
}

#[tokio::test]
async fn backend_errors_propagate_unchanged() {
    let transport = Arc::new(FakeTransport::failing(ProviderError::unavailable(
        "connection refused",
    )));
    let provider = ollama(transport);

    let err = provider
        .complete(ModelRequest::new("", vec![Message::user("hi")]))
        .await
        .expect_err("backend failure should surface");
    assert_eq!(err.kind, ProviderErrorKind::Unavailable);

    let err = provider
        .stream(ModelRequest::new("", vec![Message::user("hi")]))
        .await
        .err()
        .expect("stream open should fail");
    assert_eq!(err.message, "connection refused");
}

#[test]
fn hosted_backend_requires_api_key() {
    let err = OpenAiCompatProvider::openai(
        SecretString::new(""),
        "gpt-4o-mini",
        "https://api.openai.com/v1",
    )
    .expect_err("empty key is rejected");

    assert_eq!(err.kind, ProviderErrorKind::Authentication);
}
