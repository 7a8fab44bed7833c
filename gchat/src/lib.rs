//! Chat orchestration for the GadgetsInc backend.
//!
//! [`ChatService`] prepends a system prompt, calls the completion backend,
//! runs any requested tools, and renders the reply either as one string or as
//! a stream of [`ChatFrame`]s terminated by [`ChatFrame::Done`].
//!
//! ```rust
//! use std::sync::Arc;
//!
//! use futures_util::StreamExt;
//! use gchat::{ChatFrame, ChatService};
//! use gprovider::Message;
//! use gprovider::adapters::mock::MockProvider;
//! use tokio_util::sync::CancellationToken;
//!
//! # #[tokio::main(flavor = "current_thread")]
//! # async fn main() {
//! let service = ChatService::builder(Arc::new(MockProvider::new("Hi there"))).build();
//! let frames: Vec<ChatFrame> = service
//!     .stream_chat(vec![Message::user("hello")], CancellationToken::new())
//!     .collect()
//!     .await;
//!
//! assert_eq!(frames.last(), Some(&ChatFrame::Done));
//! # }
//! ```

mod error;
mod frame;
mod prompts;
mod service;

pub mod prelude {
    pub use crate::{
        ChatError, ChatErrorKind, ChatFrame, ChatPrompts, ChatService, ChatServiceBuilder,
        FrameStream, encode_frames,
    };
    pub use gtooling::{DefaultToolRuntime, ToolRegistry, ToolRuntime};
    pub use tokio_util::sync::CancellationToken;
}

pub use error::{ChatError, ChatErrorKind};
pub use frame::{ChatFrame, EncodedStream, FrameStream, encode_frames};
pub use prompts::{CHAT_SYSTEM_PROMPT, ChatPrompts, SIMPLE_SYSTEM_PROMPT};
pub use service::{ChatService, ChatServiceBuilder, DEFAULT_MAX_TOOL_ROUND_TRIPS};
