//! Frames of the streaming chat response and their wire encoding.
//!
//! ```rust
//! use gchat::ChatFrame;
//!
//! let frame = ChatFrame::Content("Hi \"there\"".to_string());
//! assert_eq!(frame.encode().expect("encodes"), "data: {\"content\":\"Hi \\\"there\\\"\"}\n\n");
//! assert_eq!(ChatFrame::Done.encode().expect("encodes"), "data: [DONE]\n\n");
//! ```

use std::pin::Pin;

use futures_core::Stream;
use futures_util::StreamExt;
use serde::Serialize;

const DONE_LINE: &str = "data: [DONE]\n\n";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChatFrame {
    Content(String),
    /// Terminal: nothing follows an error frame.
    Error(String),
    /// Terminal success sentinel.
    Done,
}

#[derive(Serialize)]
struct ContentPayload<'a> {
    content: &'a str,
}

#[derive(Serialize)]
struct ErrorPayload<'a> {
    error: &'a str,
}

impl ChatFrame {
    /// Renders the frame as one `data: ...` block followed by a blank line.
    pub fn encode(&self) -> Result<String, serde_json::Error> {
        let json = match self {
            Self::Content(content) => serde_json::to_string(&ContentPayload { content })?,
            Self::Error(error) => serde_json::to_string(&ErrorPayload { error })?,
            Self::Done => return Ok(DONE_LINE.to_string()),
        };

        Ok(format!("data: {json}\n\n"))
    }

    pub fn is_terminal(&self) -> bool {
        !matches!(self, Self::Content(_))
    }
}

pub type FrameStream<'a> = Pin<Box<dyn Stream<Item = ChatFrame> + Send + 'a>>;

pub type EncodedStream<'a> = Pin<Box<dyn Stream<Item = String> + Send + 'a>>;

/// Encodes each frame in order. A frame that fails to encode is logged and skipped.
pub fn encode_frames(frames: FrameStream<'_>) -> EncodedStream<'_> {
    Box::pin(frames.filter_map(|frame| {
        let encoded = match frame.encode() {
            Ok(encoded) => Some(encoded),
            Err(err) => {
                tracing::warn!(
                    phase = "chat",
                    event = "frame_encode_failed",
                    error = %err,
                    "skipping frame"
                );
                None
            }
        };
        std::future::ready(encoded)
    }))
}
