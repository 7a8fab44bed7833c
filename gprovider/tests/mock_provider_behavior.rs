use std::time::{Duration, Instant};

use futures_util::StreamExt;
use gprovider::adapters::mock::{MockProvider, ResponseRule, SimulatedLatency, Trigger};
use gprovider::{Message, ModelProvider, ModelRequest, ProviderId, Role, StreamEvent};

const FALLBACK: &str = "Hello!\n\n• Product information\n• Shipping\n\nWhat would you like to know about?";

fn provider() -> MockProvider {
    MockProvider::new(FALLBACK).with_rule(ResponseRule::new(
        "laptop",
        Trigger::any(["laptop"]),
        |_| Some("GadgetsInc Laptop Pro  -  16GB RAM,\n1TB SSD. Price: $1,299 ".to_string()),
    ))
}

async fn collect_text(provider: &MockProvider, request: ModelRequest) -> (Vec<String>, usize) {
    let mut stream = provider.stream(request).await.expect("mock stream should open");
    let mut deltas = Vec::new();
    let mut completions = 0;

    while let Some(event) = stream.next().await {
        match event.expect("mock never fails") {
            StreamEvent::TextDelta(delta) => deltas.push(delta),
            StreamEvent::ResponseComplete(_) => completions += 1,
            _ => {}
        }
    }

    (deltas, completions)
}

#[tokio::test]
async fn streamed_fragments_concatenate_to_completion() {
    let provider = provider();
    let histories = vec![
        vec![Message::user("Tell me about the laptop")],
        vec![Message::user("hi")],
        Vec::new(),
        vec![Message::system("prompt"), Message::user("")],
    ];

    for history in histories {
        let complete = provider
            .complete(ModelRequest::new("mock", history.clone()))
            .await
            .expect("mock never fails")
            .assistant_text();
        let (deltas, completions) = collect_text(&provider, ModelRequest::new("mock", history)).await;

        assert_eq!(deltas.concat(), complete);
        assert_eq!(completions, 1);
    }
}

#[tokio::test]
async fn identical_requests_produce_identical_output() {
    let provider = provider();
    let request = ModelRequest::new("mock", vec![Message::new(Role::User, "LAPTOP please")]);

    let first = provider.complete(request.clone()).await.expect("complete");
    let second = provider.complete(request).await.expect("complete");

    assert_eq!(first, second);
    assert_eq!(first.provider, ProviderId::Mock);
    assert!(first.assistant_text().starts_with("GadgetsInc Laptop Pro"));
}

#[tokio::test]
async fn fallback_is_used_when_nothing_matches() {
    let response = provider()
        .complete(ModelRequest::new("", vec![Message::user("what's the weather")]))
        .await
        .expect("complete");

    assert_eq!(response.assistant_text(), FALLBACK);
    assert_eq!(response.model, "mock");
}

#[tokio::test]
async fn per_chunk_latency_is_applied_between_fragments() {
    let provider = provider().with_latency(SimulatedLatency {
        completion: Duration::ZERO,
        per_chunk: Duration::from_millis(20),
    });
    let request = ModelRequest::new("mock", vec![Message::user("one two three")]);

    let started = Instant::now();
    let (deltas, _) = collect_text(&provider, request).await;

    assert!(deltas.len() >= 3);
    assert!(started.elapsed() >= Duration::from_millis(20 * deltas.len() as u64));
}

#[tokio::test]
async fn dropping_the_stream_abandons_pending_delays() {
    let provider = provider().with_latency(SimulatedLatency {
        completion: Duration::ZERO,
        per_chunk: Duration::from_secs(30),
    });
    let request = ModelRequest::new("mock", vec![Message::user("laptop")]);

    let stream = provider.stream(request).await.expect("stream should open");
    let outcome = tokio::time::timeout(Duration::from_millis(50), async move {
        let mut stream = stream;
        stream.next().await
    })
    .await;

    assert!(outcome.is_err(), "first fragment should still be pending");
}
