//! Events a backend emits while a reply is being generated.
//!
//! Every backend, mock or remote, hands the chat service a
//! [`BoxedEventStream`]. Fragments arrive as `TextDelta`; a backend that
//! wants tools run reports them as `ToolCallDelta` or inside the final
//! `ResponseComplete`.
//!
//! ```rust
//! use gprovider::{BoxedEventStream, StreamEvent, VecEventStream};
//!
//! let scripted: VecEventStream = ["Shipping ", "is free."]
//!     .into_iter()
//!     .map(|fragment| Ok(StreamEvent::TextDelta(fragment.to_string())))
//!     .collect();
//! let _boxed: BoxedEventStream<'static> = Box::pin(scripted);
//! ```

use std::pin::Pin;
use std::task::{Context, Poll};

use futures_core::Stream;

use crate::{Message, ModelResponse, ProviderError, ToolCall};

type StreamItem = Result<StreamEvent, ProviderError>;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StreamEvent {
    /// Next fragment of assistant text.
    TextDelta(String),
    ToolCallDelta(ToolCall),
    MessageComplete(Message),
    /// Always last when present. Its tool calls win over any streamed deltas.
    ResponseComplete(ModelResponse),
}

/// Ordering rules every backend stream follows:
///
/// - events arrive in the order the backend produced them;
/// - completion events come after the deltas they summarize;
/// - after the first `None` nothing more is yielded;
/// - dropping the stream abandons any pending delay or network read.
pub trait ModelEventStream: Stream<Item = StreamItem> + Send {}

impl<S> ModelEventStream for S where S: Stream<Item = StreamItem> + Send {}

pub type BoxedEventStream<'a> = Pin<Box<dyn ModelEventStream + 'a>>;

/// Replays a fixed list of events, one per poll. Used for empty replies and
/// by test backends.
#[derive(Debug)]
pub struct VecEventStream {
    remaining: std::vec::IntoIter<StreamItem>,
}

impl VecEventStream {
    pub fn new(events: Vec<StreamItem>) -> Self {
        Self {
            remaining: events.into_iter(),
        }
    }
}

impl FromIterator<StreamItem> for VecEventStream {
    fn from_iter<I: IntoIterator<Item = StreamItem>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

impl Stream for VecEventStream {
    type Item = StreamItem;

    fn poll_next(mut self: Pin<&mut Self>, _cx: &mut Context<'_>) -> Poll<Option<StreamItem>> {
        Poll::Ready(self.remaining.next())
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.remaining.size_hint()
    }
}
