//! Command-line and environment configuration.
//!
//! Every flag falls back to a `GADGETS_*` environment variable, so the same
//! binary can be driven from a shell or from a container manifest.
//!
//! ```rust
//! use clap::Parser;
//! use gadgets::config::{Backend, Cli, Command};
//!
//! let cli = Cli::try_parse_from(["gadgets", "chat", "--backend", "ollama"]).expect("valid args");
//! let Command::Chat(args) = cli.command else { panic!("expected chat") };
//! assert_eq!(args.backend.backend, Backend::Ollama);
//! ```

use std::net::SocketAddr;

use clap::{ArgAction, Args, Parser, Subcommand, ValueEnum};
use gchat::DEFAULT_MAX_TOOL_ROUND_TRIPS;
use gprovider::adapters::openai_compat::{
    OLLAMA_BASE_URL, OLLAMA_DEFAULT_MODEL, OPENAI_BASE_URL, OPENAI_DEFAULT_MODEL,
};

pub const DEFAULT_CHAT_BIND: &str = "127.0.0.1:5080";
pub const DEFAULT_CATALOG_BIND: &str = "127.0.0.1:5081";
pub const DEFAULT_SHIPPING_BIND: &str = "127.0.0.1:5082";

#[derive(Debug, Parser)]
#[command(name = "gadgets", author, version, about = "GadgetsInc chat backend and tool servers")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Serve the chat API backed by one completion backend.
    Chat(ChatArgs),
    /// Serve the product catalog tools over MCP.
    CatalogTools(ToolServerArgs),
    /// Serve the shipping and math tools over MCP.
    ShippingTools(ToolServerArgs),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Backend {
    /// Keyword rules, no network.
    Mock,
    /// Local Ollama runtime.
    Ollama,
    /// Hosted OpenAI-compatible endpoint.
    Openai,
}

#[derive(Debug, Clone, Args)]
pub struct ChatArgs {
    #[arg(long, env = "GADGETS_BIND", default_value = DEFAULT_CHAT_BIND)]
    pub bind: SocketAddr,

    #[command(flatten)]
    pub backend: BackendArgs,

    /// Upper bound on tool-call rounds per request.
    #[arg(long, env = "GADGETS_MAX_TOOL_ROUND_TRIPS", default_value_t = DEFAULT_MAX_TOOL_ROUND_TRIPS)]
    pub max_tool_round_trips: usize,
}

/// Connection settings for the completion backend. Only the fields of the
/// selected backend are read.
#[derive(Debug, Clone, Args)]
pub struct BackendArgs {
    #[arg(long, value_enum, env = "GADGETS_BACKEND", default_value_t = Backend::Mock)]
    pub backend: Backend,

    #[arg(long, env = "GADGETS_OLLAMA_URL", default_value = OLLAMA_BASE_URL)]
    pub ollama_url: String,

    #[arg(long, env = "GADGETS_OLLAMA_MODEL", default_value = OLLAMA_DEFAULT_MODEL)]
    pub ollama_model: String,

    #[arg(long, env = "GADGETS_OPENAI_BASE_URL", default_value = OPENAI_BASE_URL)]
    pub openai_base_url: String,

    #[arg(long, env = "GADGETS_OPENAI_API_KEY", hide_env_values = true)]
    pub openai_api_key: Option<String>,

    #[arg(long, env = "GADGETS_OPENAI_MODEL", default_value = OPENAI_DEFAULT_MODEL)]
    pub openai_model: String,

    /// Simulate backend latency in mock mode (500 ms per reply, 50 ms per word).
    #[arg(long, env = "GADGETS_MOCK_LATENCY", default_value_t = true, action = ArgAction::Set)]
    pub mock_latency: bool,
}

impl Default for BackendArgs {
    fn default() -> Self {
        Self {
            backend: Backend::Mock,
            ollama_url: OLLAMA_BASE_URL.to_string(),
            ollama_model: OLLAMA_DEFAULT_MODEL.to_string(),
            openai_base_url: OPENAI_BASE_URL.to_string(),
            openai_api_key: None,
            openai_model: OPENAI_DEFAULT_MODEL.to_string(),
            mock_latency: true,
        }
    }
}

#[derive(Debug, Clone, Args)]
pub struct ToolServerArgs {
    /// Listen address; each tool server has its own default port.
    #[arg(long, env = "GADGETS_TOOLS_BIND")]
    pub bind: Option<SocketAddr>,

    /// Speak newline-delimited JSON-RPC on stdin/stdout instead of HTTP.
    #[arg(long, env = "GADGETS_STDIO")]
    pub stdio: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Command {
        Cli::try_parse_from(args).expect("arguments should parse").command
    }

    #[test]
    fn chat_defaults_to_mock_backend_with_demo_latency() {
        let Command::Chat(args) = parse(&["gadgets", "chat"]) else {
            panic!("expected chat command");
        };

        assert_eq!(args.bind, DEFAULT_CHAT_BIND.parse::<SocketAddr>().expect("addr"));
        assert_eq!(args.backend.backend, Backend::Mock);
        assert!(args.backend.mock_latency);
        assert_eq!(args.max_tool_round_trips, DEFAULT_MAX_TOOL_ROUND_TRIPS);
    }

    #[test]
    fn hosted_backend_flags_are_read() {
        let Command::Chat(args) = parse(&[
            "gadgets",
            "chat",
            "--backend",
            "openai",
            "--openai-api-key",
            "sk-test",
            "--openai-model",
            "gpt-4o",
            "--mock-latency",
            "false",
        ]) else {
            panic!("expected chat command");
        };

        assert_eq!(args.backend.backend, Backend::Openai);
        assert_eq!(args.backend.openai_api_key.as_deref(), Some("sk-test"));
        assert_eq!(args.backend.openai_model, "gpt-4o");
        assert!(!args.backend.mock_latency);
    }

    #[test]
    fn tool_servers_accept_stdio_and_bind() {
        let Command::CatalogTools(args) = parse(&["gadgets", "catalog-tools", "--stdio"]) else {
            panic!("expected catalog-tools command");
        };
        assert!(args.stdio);
        assert!(args.bind.is_none());

        let Command::ShippingTools(args) =
            parse(&["gadgets", "shipping-tools", "--bind", "0.0.0.0:9000"])
        else {
            panic!("expected shipping-tools command");
        };
        assert!(!args.stdio);
        assert_eq!(args.bind, Some("0.0.0.0:9000".parse().expect("addr")));
    }

    #[test]
    fn unknown_backend_is_rejected() {
        assert!(Cli::try_parse_from(["gadgets", "chat", "--backend", "bard"]).is_err());
    }
}
