//! Chat-completions adapter shared by the Ollama and hosted backends.

mod provider;
mod tests;
mod transport;
mod types;
mod wire;

pub use provider::{
    OLLAMA_BASE_URL, OLLAMA_DEFAULT_MODEL, OPENAI_BASE_URL, OPENAI_DEFAULT_MODEL,
    OpenAiCompatProvider,
};
pub use transport::{ChatCompletionsTransport, CompatChunkStream, HttpChatTransport};
pub use types::{
    CompatAuth, CompatChunk, CompatMessage, CompatReply, CompatRequest, CompatTool, FinishReason,
};
