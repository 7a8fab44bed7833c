//! `ModelProvider` for Ollama and hosted OpenAI-compatible endpoints.

use std::sync::Arc;

use async_stream::try_stream;
use futures_util::StreamExt;

use crate::{
    BoxedEventStream, ModelProvider, ModelRequest, ModelResponse, ProviderError, ProviderFuture,
    ProviderId, SecretString, StreamEvent, VecEventStream,
};

use super::transport::{ChatCompletionsTransport, HttpChatTransport};
use super::types::{CompatAuth, CompatMessage, CompatRequest, CompatTool};

pub const OLLAMA_BASE_URL: &str = "http://localhost:11434/v1";
pub const OLLAMA_DEFAULT_MODEL: &str = "llama3.2";
pub const OPENAI_BASE_URL: &str = "https://api.openai.com/v1";
pub const OPENAI_DEFAULT_MODEL: &str = "gpt-4o-mini";

#[derive(Debug, Clone)]
pub struct OpenAiCompatProvider {
    id: ProviderId,
    transport: Arc<dyn ChatCompletionsTransport>,
    auth: CompatAuth,
    default_model: String,
}

impl OpenAiCompatProvider {
    pub fn new(
        id: ProviderId,
        transport: Arc<dyn ChatCompletionsTransport>,
        auth: CompatAuth,
        default_model: impl Into<String>,
    ) -> Self {
        Self {
            id,
            transport,
            auth,
            default_model: default_model.into(),
        }
    }

    /// Local Ollama runtime; no credentials are sent.
    pub fn ollama(
        base_url: impl Into<String>,
        model: impl Into<String>,
    ) -> Result<Self, ProviderError> {
        let transport = HttpChatTransport::with_default_client(base_url)?;
        Ok(Self::new(
            ProviderId::Ollama,
            Arc::new(transport),
            CompatAuth::None,
            model,
        ))
    }

    /// Hosted endpoint authenticated with a bearer API key.
    pub fn openai(
        api_key: SecretString,
        model: impl Into<String>,
        base_url: impl Into<String>,
    ) -> Result<Self, ProviderError> {
        if api_key.is_empty() {
            return Err(ProviderError::authentication("api key must not be empty"));
        }

        let transport = HttpChatTransport::with_default_client(base_url)?;
        Ok(Self::new(
            ProviderId::OpenAi,
            Arc::new(transport),
            CompatAuth::Bearer(api_key),
            model,
        ))
    }

    pub fn default_model(&self) -> &str {
        &self.default_model
    }

    fn resolve_model(&self, requested: &str) -> String {
        if requested.trim().is_empty() {
            self.default_model.clone()
        } else {
            requested.to_string()
        }
    }

    pub(crate) fn build_request(&self, request: ModelRequest, stream: bool) -> CompatRequest {
        let model = self.resolve_model(&request.model);

        let mut messages = request
            .messages
            .into_iter()
            .map(CompatMessage::from)
            .collect::<Vec<_>>();

        if !request.tool_calls.is_empty() {
            messages.push(CompatMessage::tool_request(request.tool_calls));
        }
        messages.extend(request.tool_results.into_iter().map(CompatMessage::tool_result));

        CompatRequest {
            model,
            messages,
            tools: request.tools.into_iter().map(CompatTool::from).collect(),
            temperature: request.temperature,
            max_tokens: request.max_tokens,
            stream,
        }
    }
}

impl ModelProvider for OpenAiCompatProvider {
    fn id(&self) -> ProviderId {
        self.id
    }

    fn complete<'a>(
        &'a self,
        request: ModelRequest,
    ) -> ProviderFuture<'a, Result<ModelResponse, ProviderError>> {
        Box::pin(async move {
            request.validate()?;
            if request.messages.is_empty() {
                let model = self.resolve_model(&request.model);
                return Ok(ModelResponse::text(self.id, model, ""));
            }

            let compat_request = self.build_request(request, false);
            let reply = self
                .transport
                .complete(compat_request, self.auth.clone())
                .await?;

            Ok(reply.into_model_response(self.id))
        })
    }

    fn stream<'a>(
        &'a self,
        request: ModelRequest,
    ) -> ProviderFuture<'a, Result<BoxedEventStream<'a>, ProviderError>> {
        Box::pin(async move {
            request.validate()?;
            if request.messages.is_empty() {
                let model = self.resolve_model(&request.model);
                let empty = VecEventStream::new(vec![Ok(StreamEvent::ResponseComplete(
                    ModelResponse::text(self.id, model, ""),
                ))]);
                return Ok(Box::pin(empty) as BoxedEventStream<'a>);
            }

            let compat_request = self.build_request(request, true);
            let mut chunks = self
                .transport
                .stream(compat_request, self.auth.clone())
                .await?;
            let id = self.id;

            let stream = try_stream! {
                while let Some(chunk) = chunks.next().await {
                    for event in chunk?.into_events(id) {
                        yield event;
                    }
                }
            };

            Ok(Box::pin(stream) as BoxedEventStream<'a>)
        })
    }
}
