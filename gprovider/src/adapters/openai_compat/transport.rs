//! Transport seam for chat-completions endpoints and its reqwest implementation.

use std::pin::Pin;
use std::time::Duration;

use async_stream::try_stream;
use futures_core::Stream;
use futures_util::StreamExt;
use reqwest::{Client, RequestBuilder, Response, StatusCode};

use crate::{ProviderError, ProviderFuture};

use super::types::{CompatAuth, CompatChunk, CompatReply, CompatRequest};
use super::wire::{
    SseLine, SseLineBuffer, StreamAccumulator, WireResponse, build_wire_request,
    extract_error_message,
};

pub type CompatChunkStream<'a> =
    Pin<Box<dyn Stream<Item = Result<CompatChunk, ProviderError>> + Send + 'a>>;

pub trait ChatCompletionsTransport: Send + Sync + std::fmt::Debug {
    fn complete<'a>(
        &'a self,
        request: CompatRequest,
        auth: CompatAuth,
    ) -> ProviderFuture<'a, Result<CompatReply, ProviderError>>;

    /// Streams chunks; the last item of a successful stream is `CompatChunk::Finished`.
    fn stream<'a>(
        &'a self,
        request: CompatRequest,
        auth: CompatAuth,
    ) -> ProviderFuture<'a, Result<CompatChunkStream<'a>, ProviderError>>;
}

const CONNECT_TIMEOUT: Duration = Duration::from_secs(10);
const COMPLETE_TIMEOUT: Duration = Duration::from_secs(120);

#[derive(Debug, Clone)]
pub struct HttpChatTransport {
    client: Client,
    base_url: String,
}

impl HttpChatTransport {
    pub fn new(client: Client, base_url: impl Into<String>) -> Self {
        Self {
            client,
            base_url: base_url.into(),
        }
    }

    /// Builds a client with the connect timeout applied to every backend call.
    pub fn with_default_client(base_url: impl Into<String>) -> Result<Self, ProviderError> {
        let client = Client::builder()
            .connect_timeout(CONNECT_TIMEOUT)
            .build()
            .map_err(|err| ProviderError::transport(err.to_string()))?;

        Ok(Self::new(client, base_url))
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn endpoint(&self) -> String {
        format!("{}/chat/completions", self.base_url.trim_end_matches('/'))
    }

    fn apply_auth(builder: RequestBuilder, auth: &CompatAuth) -> RequestBuilder {
        match auth {
            CompatAuth::None => builder,
            CompatAuth::Bearer(key) => builder.bearer_auth(key.expose()),
        }
    }

    async fn send(&self, builder: RequestBuilder) -> Result<Response, ProviderError> {
        let response = builder.send().await.map_err(map_send_error)?;
        if !response.status().is_success() {
            return Err(parse_error(response).await);
        }

        Ok(response)
    }
}

fn map_send_error(err: reqwest::Error) -> ProviderError {
    if err.is_timeout() {
        ProviderError::timeout(err.to_string())
    } else if err.is_connect() {
        ProviderError::unavailable(err.to_string())
    } else {
        ProviderError::transport(err.to_string())
    }
}

async fn parse_error(response: Response) -> ProviderError {
    let status = response.status();
    let body = response.text().await.unwrap_or_default();
    let message = extract_error_message(&body)
        .unwrap_or_else(|| format!("chat completion request failed with status {status}"));

    match status {
        StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => ProviderError::authentication(message),
        StatusCode::TOO_MANY_REQUESTS => ProviderError::rate_limited(message),
        StatusCode::REQUEST_TIMEOUT | StatusCode::GATEWAY_TIMEOUT => {
            ProviderError::timeout(message)
        }
        StatusCode::BAD_REQUEST | StatusCode::NOT_FOUND | StatusCode::UNPROCESSABLE_ENTITY => {
            ProviderError::invalid_request(message)
        }
        StatusCode::SERVICE_UNAVAILABLE | StatusCode::BAD_GATEWAY => {
            ProviderError::unavailable(message)
        }
        _ => ProviderError::transport(message),
    }
}

impl ChatCompletionsTransport for HttpChatTransport {
    fn complete<'a>(
        &'a self,
        mut request: CompatRequest,
        auth: CompatAuth,
    ) -> ProviderFuture<'a, Result<CompatReply, ProviderError>> {
        Box::pin(async move {
            request.stream = false;
            let wire = build_wire_request(request)?;
            let builder = self
                .client
                .post(self.endpoint())
                .timeout(COMPLETE_TIMEOUT)
                .json(&wire);
            let response = self.send(Self::apply_auth(builder, &auth)).await?;

            let parsed: WireResponse = response
                .json()
                .await
                .map_err(|err| ProviderError::transport(err.to_string()))?;

            CompatReply::try_from(parsed)
        })
    }

    fn stream<'a>(
        &'a self,
        mut request: CompatRequest,
        auth: CompatAuth,
    ) -> ProviderFuture<'a, Result<CompatChunkStream<'a>, ProviderError>> {
        Box::pin(async move {
            request.stream = true;
            let requested_model = request.model.clone();
            let wire = build_wire_request(request)?;
            let builder = self.client.post(self.endpoint()).json(&wire);
            let response = self.send(Self::apply_auth(builder, &auth)).await?;

            let stream = try_stream! {
                let mut bytes = response.bytes_stream();
                let mut lines = SseLineBuffer::default();
                let mut accumulator = StreamAccumulator::new(requested_model);

                'read: while let Some(item) = bytes.next().await {
                    let item = item.map_err(|err| ProviderError::transport(err.to_string()))?;

                    for line in lines.push(&item) {
                        let payload = match line {
                            SseLine::Done => break 'read,
                            SseLine::Data(payload) => payload,
                        };

                        match accumulator.apply(&payload) {
                            Ok(chunks) => {
                                for chunk in chunks {
                                    yield chunk;
                                }
                            }
                            Err(err) => {
                                tracing::warn!(
                                    error = %err,
                                    payload = %payload,
                                    "skipping malformed stream payload"
                                );
                            }
                        }
                    }
                }

                yield CompatChunk::Finished(accumulator.finish());
            };

            Ok(Box::pin(stream) as CompatChunkStream<'a>)
        })
    }
}
