//! Simple and streaming chat over one completion backend, with an optional
//! tool-calling loop.

use std::collections::BTreeMap;
use std::sync::Arc;

use async_stream::stream;
use futures_util::StreamExt;
use gcommon::RequestId;
use gprovider::{
    Message, ModelProvider, ModelRequest, ProviderId, Role, StreamEvent, ToolCall, ToolResult,
};
use gtooling::{ToolExecutionContext, ToolRuntime};
use tokio_util::sync::CancellationToken;

use crate::{ChatError, ChatErrorKind, ChatFrame, ChatPrompts, FrameStream};

pub const DEFAULT_MAX_TOOL_ROUND_TRIPS: usize = 4;

#[derive(Clone)]
pub struct ChatService {
    provider: Arc<dyn ModelProvider>,
    tool_runtime: Option<Arc<dyn ToolRuntime>>,
    prompts: ChatPrompts,
    model: String,
    max_tool_round_trips: usize,
}

pub struct ChatServiceBuilder {
    provider: Arc<dyn ModelProvider>,
    tool_runtime: Option<Arc<dyn ToolRuntime>>,
    prompts: ChatPrompts,
    model: String,
    max_tool_round_trips: usize,
}

impl ChatServiceBuilder {
    fn new(provider: Arc<dyn ModelProvider>) -> Self {
        Self {
            provider,
            tool_runtime: None,
            prompts: ChatPrompts::default(),
            model: String::new(),
            max_tool_round_trips: DEFAULT_MAX_TOOL_ROUND_TRIPS,
        }
    }

    pub fn tool_runtime(mut self, tool_runtime: Arc<dyn ToolRuntime>) -> Self {
        self.tool_runtime = Some(tool_runtime);
        self
    }

    pub fn prompts(mut self, prompts: ChatPrompts) -> Self {
        self.prompts = prompts;
        self
    }

    /// Model name sent with each request; empty means the backend's default.
    pub fn model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    pub fn max_tool_round_trips(mut self, max_tool_round_trips: usize) -> Self {
        self.max_tool_round_trips = max_tool_round_trips;
        self
    }

    pub fn build(self) -> ChatService {
        ChatService {
            provider: self.provider,
            tool_runtime: self.tool_runtime,
            prompts: self.prompts,
            model: self.model,
            max_tool_round_trips: self.max_tool_round_trips,
        }
    }
}

impl ChatService {
    pub fn builder(provider: Arc<dyn ModelProvider>) -> ChatServiceBuilder {
        ChatServiceBuilder::new(provider)
    }

    pub fn provider_id(&self) -> ProviderId {
        self.provider.id()
    }

    pub fn prompts(&self) -> &ChatPrompts {
        &self.prompts
    }

    /// Answers one message, running requested tools until the backend replies
    /// with text or the round-trip limit is reached.
    pub async fn simple_chat(&self, message: impl Into<String>) -> Result<String, ChatError> {
        let request_id = RequestId::next();
        let history = vec![
            Message::system(self.prompts.simple.clone()),
            Message::user(message),
        ];
        let mut request = self.request(history);
        let mut round_trips = 0;

        tracing::info!(
            phase = "chat",
            event = "simple_start",
            request_id = %request_id,
            provider = %self.provider.id()
        );

        loop {
            let response = self.provider.complete(request.clone()).await.map_err(|err| {
                let err = ChatError::from(err);
                log_failure(&request_id, &err);
                err
            })?;

            let calls = response.tool_calls();
            if calls.is_empty() || !self.may_run_tools(round_trips, &request_id) {
                return Ok(response.assistant_text());
            }

            round_trips += 1;
            request = self.run_tools(request, calls, &request_id).await;
        }
    }

    /// Streams the reply to a conversation as frames.
    ///
    /// Only user and assistant messages are forwarded. The stream ends with
    /// [`ChatFrame::Done`], or with a single [`ChatFrame::Error`] on failure.
    /// Once `cancel` fires no further frame is produced; dropping the stream
    /// has the same effect.
    pub fn stream_chat<'a>(
        &'a self,
        messages: Vec<Message>,
        cancel: CancellationToken,
    ) -> FrameStream<'a> {
        let request_id = RequestId::next();
        let mut history = vec![Message::system(self.prompts.chat.clone())];
        history.extend(
            messages
                .into_iter()
                .filter(|message| matches!(message.role, Role::User | Role::Assistant)),
        );
        let mut request = self.request(history);

        tracing::info!(
            phase = "chat",
            event = "stream_start",
            request_id = %request_id,
            provider = %self.provider.id(),
            messages = request.messages.len()
        );

        Box::pin(stream! {
            let mut round_trips = 0;

            loop {
                let opened = tokio::select! {
                    biased;
                    _ = cancel.cancelled() => None,
                    opened = self.provider.stream(request.clone()) => Some(opened),
                };

                let mut events = match opened {
                    None => {
                        log_cancelled(&request_id);
                        return;
                    }
                    Some(Ok(events)) => events,
                    Some(Err(err)) => {
                        if let Some(frame) = failure_frame(&request_id, err.into()) {
                            yield frame;
                        }
                        return;
                    }
                };

                let mut streamed_calls = BTreeMap::<String, ToolCall>::new();
                let mut final_calls = None::<Vec<ToolCall>>;

                loop {
                    let next = tokio::select! {
                        biased;
                        _ = cancel.cancelled() => None,
                        next = events.next() => Some(next),
                    };

                    match next {
                        None => {
                            log_cancelled(&request_id);
                            return;
                        }
                        Some(None) => break,
                        Some(Some(Err(err))) => {
                            if let Some(frame) = failure_frame(&request_id, err.into()) {
                                yield frame;
                            }
                            return;
                        }
                        Some(Some(Ok(StreamEvent::TextDelta(delta)))) => {
                            if !delta.is_empty() {
                                yield ChatFrame::Content(delta);
                            }
                        }
                        Some(Some(Ok(StreamEvent::ToolCallDelta(call)))) => {
                            streamed_calls.insert(call.id.clone(), call);
                        }
                        Some(Some(Ok(StreamEvent::ResponseComplete(response)))) => {
                            final_calls = Some(response.tool_calls());
                        }
                        Some(Some(Ok(StreamEvent::MessageComplete(_)))) => {}
                    }
                }
                drop(events);

                let calls = final_calls.unwrap_or_else(|| streamed_calls.into_values().collect());
                if calls.is_empty() || !self.may_run_tools(round_trips, &request_id) {
                    break;
                }
                round_trips += 1;

                let next_request = tokio::select! {
                    biased;
                    _ = cancel.cancelled() => None,
                    next = self.run_tools(request, calls, &request_id) => Some(next),
                };
                let Some(next_request) = next_request else {
                    log_cancelled(&request_id);
                    return;
                };
                request = next_request;
            }

            if cancel.is_cancelled() {
                log_cancelled(&request_id);
                return;
            }

            tracing::info!(
                phase = "chat",
                event = "stream_complete",
                request_id = %request_id,
                tool_round_trips = round_trips
            );
            yield ChatFrame::Done;
        })
    }

    fn request(&self, history: Vec<Message>) -> ModelRequest {
        let tools = self
            .tool_runtime
            .as_ref()
            .map(|runtime| runtime.definitions())
            .unwrap_or_default();

        ModelRequest::new(self.model.clone(), history).with_tools(tools)
    }

    fn may_run_tools(&self, round_trips: usize, request_id: &RequestId) -> bool {
        if self.tool_runtime.is_none() {
            tracing::warn!(
                phase = "chat",
                event = "tool_calls_ignored",
                request_id = %request_id,
                "backend requested tools but no tool runtime is configured"
            );
            return false;
        }

        if round_trips >= self.max_tool_round_trips {
            tracing::warn!(
                phase = "chat",
                event = "tool_round_limit",
                request_id = %request_id,
                limit = self.max_tool_round_trips
            );
            return false;
        }

        true
    }

    /// Executes `calls` in order and threads each result into the next request.
    /// Failures become inline `Error: ...` results.
    async fn run_tools(
        &self,
        mut request: ModelRequest,
        calls: Vec<ToolCall>,
        request_id: &RequestId,
    ) -> ModelRequest {
        let Some(runtime) = &self.tool_runtime else {
            return request;
        };

        for call in calls {
            let context = ToolExecutionContext::new(request_id.clone());
            let result = match runtime.execute(call.clone(), context).await {
                Ok(result) => result.into_tool_result(),
                Err(err) => {
                    tracing::warn!(
                        phase = "chat",
                        event = "tool_failed_inline",
                        request_id = %request_id,
                        tool_name = call.name,
                        error = %err
                    );
                    ToolResult {
                        tool_call_id: call.id.clone(),
                        output: err.inline_text(),
                    }
                }
            };

            request = request.with_tool_exchange(call, result);
        }

        request
    }
}

fn log_failure(request_id: &RequestId, err: &ChatError) {
    tracing::error!(
        phase = "chat",
        event = "failure",
        request_id = %request_id,
        error_kind = ?err.kind,
        error = %err
    );
}

fn log_cancelled(request_id: &RequestId) {
    tracing::info!(phase = "chat", event = "cancelled", request_id = %request_id);
}

/// The frame reporting `err`, or `None` when the backend itself saw the cancellation.
fn failure_frame(request_id: &RequestId, err: ChatError) -> Option<ChatFrame> {
    if err.kind == ChatErrorKind::Cancelled {
        log_cancelled(request_id);
        return None;
    }

    log_failure(request_id, &err);
    Some(ChatFrame::Error(err.message))
}
