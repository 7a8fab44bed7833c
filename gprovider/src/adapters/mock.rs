//! Deterministic keyword-rule backend used for demos and tests.
//!
//! The provider inspects the last non-system message, lower-cases it, and
//! walks its rules in order. The first rule whose trigger matches and whose
//! responder produces a reply wins; otherwise the fallback text is returned.
//!
//! ```rust
//! use gprovider::adapters::mock::{MockProvider, ResponseRule, Trigger};
//! use gprovider::{Message, ModelProvider, ModelRequest};
//!
//! # #[tokio::main(flavor = "current_thread")]
//! # async fn main() {
//! let provider = MockProvider::new("How can I help?").with_rule(ResponseRule::new(
//!     "greeting",
//!     Trigger::any(["hello", "hi"]),
//!     |_| Some("Hello there!".to_string()),
//! ));
//!
//! let request = ModelRequest::new("mock", vec![Message::user("Hello")]);
//! let response = provider.complete(request).await.expect("mock never fails");
//! assert_eq!(response.assistant_text(), "Hello there!");
//! # }
//! ```

use std::fmt::{Debug, Formatter};
use std::sync::Arc;
use std::time::Duration;

use async_stream::stream;
use futures_timer::Delay;

use crate::{
    BoxedEventStream, Message, ModelProvider, ModelRequest, ModelResponse, ProviderError,
    ProviderFuture, ProviderId, StreamEvent,
};

const DEFAULT_MODEL: &str = "mock";

/// Builds a reply from the lower-cased user text, or declines with `None`.
pub type Responder = Arc<dyn Fn(&str) -> Option<String> + Send + Sync>;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Trigger {
    /// Matches when at least one keyword occurs.
    Any(Vec<String>),
    /// Matches when every keyword occurs.
    All(Vec<String>),
}

impl Trigger {
    pub fn any<I, S>(keywords: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::Any(keywords.into_iter().map(Into::into).collect())
    }

    pub fn all<I, S>(keywords: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::All(keywords.into_iter().map(Into::into).collect())
    }

    /// `text` must already be lower-cased.
    pub fn matches(&self, text: &str) -> bool {
        match self {
            Self::Any(keywords) => keywords.iter().any(|keyword| text.contains(keyword.as_str())),
            Self::All(keywords) => {
                !keywords.is_empty()
                    && keywords.iter().all(|keyword| text.contains(keyword.as_str()))
            }
        }
    }
}

#[derive(Clone)]
pub struct ResponseRule {
    name: String,
    trigger: Trigger,
    responder: Responder,
}

impl ResponseRule {
    pub fn new(
        name: impl Into<String>,
        trigger: Trigger,
        responder: impl Fn(&str) -> Option<String> + Send + Sync + 'static,
    ) -> Self {
        Self {
            name: name.into(),
            trigger,
            responder: Arc::new(responder),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn trigger(&self) -> &Trigger {
        &self.trigger
    }

    fn respond(&self, text: &str) -> Option<String> {
        if !self.trigger.matches(text) {
            return None;
        }

        (self.responder)(text)
    }
}

impl Debug for ResponseRule {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ResponseRule")
            .field("name", &self.name)
            .field("trigger", &self.trigger)
            .finish_non_exhaustive()
    }
}

/// Artificial delays applied by the mock backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SimulatedLatency {
    /// Delay before a whole completion is returned.
    pub completion: Duration,
    /// Delay before each streamed fragment.
    pub per_chunk: Duration,
}

impl SimulatedLatency {
    pub const fn none() -> Self {
        Self {
            completion: Duration::ZERO,
            per_chunk: Duration::ZERO,
        }
    }

    pub const fn demo() -> Self {
        Self {
            completion: Duration::from_millis(500),
            per_chunk: Duration::from_millis(50),
        }
    }
}

impl Default for SimulatedLatency {
    fn default() -> Self {
        Self::none()
    }
}

#[derive(Debug, Clone)]
pub struct MockProvider {
    rules: Vec<ResponseRule>,
    fallback: String,
    latency: SimulatedLatency,
}

impl MockProvider {
    pub fn new(fallback: impl Into<String>) -> Self {
        Self {
            rules: Vec::new(),
            fallback: fallback.into(),
            latency: SimulatedLatency::none(),
        }
    }

    pub fn with_rule(mut self, rule: ResponseRule) -> Self {
        self.rules.push(rule);
        self
    }

    pub fn with_rules(mut self, rules: impl IntoIterator<Item = ResponseRule>) -> Self {
        self.rules.extend(rules);
        self
    }

    pub fn with_latency(mut self, latency: SimulatedLatency) -> Self {
        self.latency = latency;
        self
    }

    pub fn rules(&self) -> &[ResponseRule] {
        &self.rules
    }

    pub fn fallback(&self) -> &str {
        &self.fallback
    }

    /// The reply for `request`, without any simulated delay.
    pub fn reply(&self, request: &ModelRequest) -> String {
        let Some(turn) = request.last_turn() else {
            return self.fallback.clone();
        };

        let text = turn.content.to_lowercase();
        for rule in &self.rules {
            if let Some(reply) = rule.respond(&text) {
                tracing::debug!(rule = rule.name(), "mock rule matched");
                return reply;
            }
        }

        self.fallback.clone()
    }

    fn model_name(request: &ModelRequest) -> String {
        if request.model.trim().is_empty() {
            DEFAULT_MODEL.to_string()
        } else {
            request.model.clone()
        }
    }
}

impl ModelProvider for MockProvider {
    fn id(&self) -> ProviderId {
        ProviderId::Mock
    }

    fn complete<'a>(
        &'a self,
        request: ModelRequest,
    ) -> ProviderFuture<'a, Result<ModelResponse, ProviderError>> {
        Box::pin(async move {
            let reply = self.reply(&request);
            pause(self.latency.completion).await;
            Ok(ModelResponse::text(
                ProviderId::Mock,
                Self::model_name(&request),
                reply,
            ))
        })
    }

    fn stream<'a>(
        &'a self,
        request: ModelRequest,
    ) -> ProviderFuture<'a, Result<BoxedEventStream<'a>, ProviderError>> {
        Box::pin(async move {
            let reply = self.reply(&request);
            let model = Self::model_name(&request);
            let per_chunk = self.latency.per_chunk;

            let events = stream! {
                for fragment in split_words(&reply) {
                    pause(per_chunk).await;
                    yield Ok::<_, ProviderError>(StreamEvent::TextDelta(fragment));
                }

                yield Ok(StreamEvent::MessageComplete(Message::assistant(reply.clone())));
                yield Ok(StreamEvent::ResponseComplete(ModelResponse::text(
                    ProviderId::Mock,
                    model,
                    reply,
                )));
            };

            Ok(Box::pin(events) as BoxedEventStream<'a>)
        })
    }
}

async fn pause(duration: Duration) {
    if !duration.is_zero() {
        Delay::new(duration).await;
    }
}

/// Splits `text` into word fragments that each keep their trailing whitespace.
///
/// Leading whitespace stays with the first fragment, so the fragments always
/// concatenate back to `text`.
pub fn split_words(text: &str) -> Vec<String> {
    let mut fragments = Vec::new();
    let mut current = String::new();
    let mut after_word = false;

    for ch in text.chars() {
        if ch.is_whitespace() {
            current.push(ch);
            if current.chars().any(|c| !c.is_whitespace()) {
                after_word = true;
            }
            continue;
        }

        if after_word {
            fragments.push(std::mem::take(&mut current));
            after_word = false;
        }
        current.push(ch);
    }

    if !current.is_empty() {
        fragments.push(current);
    }

    fragments
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Role;

    fn provider() -> MockProvider {
        MockProvider::new("fallback")
            .with_rule(ResponseRule::new(
                "phone",
                Trigger::any(["smartphone", "phone"]),
                |_| Some("phone reply".to_string()),
            ))
            .with_rule(ResponseRule::new(
                "shipping",
                Trigger::all(["shipping", "cost"]),
                |text| text.contains("europe").then(|| "europe quote".to_string()),
            ))
            .with_rule(ResponseRule::new("catch", Trigger::any(["cost"]), |_| {
                Some("generic cost".to_string())
            }))
    }

    fn ask(text: &str) -> ModelRequest {
        ModelRequest::new(
            "mock",
            vec![Message::system("ignored"), Message::new(Role::User, text)],
        )
    }

    #[test]
    fn split_words_keeps_trailing_whitespace_with_each_word() {
        assert_eq!(split_words("Hello  big\nworld"), vec!["Hello  ", "big\n", "world"]);
        assert_eq!(split_words("  lead"), vec!["  lead"]);
        assert_eq!(split_words("tail \t"), vec!["tail \t"]);
        assert_eq!(split_words("   "), vec!["   "]);
        assert!(split_words("").is_empty());
    }

    #[test]
    fn split_words_concatenates_back_to_input() {
        let samples = [
            "• Product information (smartphones)\n\nWhat would you like?",
            " \n leading and trailing \n ",
            "Price: $1,299",
        ];

        for sample in samples {
            assert_eq!(split_words(sample).concat(), sample);
        }
    }

    #[test]
    fn first_matching_rule_wins_and_matching_is_case_insensitive() {
        let provider = provider();
        assert_eq!(provider.reply(&ask("Tell me about your SmartPhone")), "phone reply");
        assert_eq!(provider.reply(&ask("Shipping cost to Europe?")), "europe quote");
    }

    #[test]
    fn declining_responder_falls_through_to_later_rules() {
        let provider = provider();
        assert_eq!(provider.reply(&ask("shipping cost to mars")), "generic cost");
    }

    #[test]
    fn empty_history_and_empty_text_use_fallback() {
        let provider = provider();
        assert_eq!(provider.reply(&ModelRequest::new("mock", Vec::new())), "fallback");
        assert_eq!(provider.reply(&ask("")), "fallback");
        assert_eq!(provider.reply(&ask("what's new?")), "fallback");
    }

    #[test]
    fn all_trigger_with_no_keywords_never_matches() {
        assert!(!Trigger::All(Vec::new()).matches("anything"));
        assert!(Trigger::all(["track", "order"]).matches("track my order"));
        assert!(!Trigger::all(["track", "order"]).matches("track my parcel"));
    }

    #[test]
    fn latency_profiles() {
        assert_eq!(SimulatedLatency::default(), SimulatedLatency::none());
        assert_eq!(SimulatedLatency::demo().completion, Duration::from_millis(500));
        assert_eq!(SimulatedLatency::demo().per_chunk, Duration::from_millis(50));
    }
}
