//! Entry points for each subcommand.

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::{Context, Result};
use tokio::io::BufReader;

use crate::config::{
    ChatArgs, Cli, Command, DEFAULT_CATALOG_BIND, DEFAULT_SHIPPING_BIND, ToolServerArgs,
};
use crate::runtime::{ToolSurface, chat_service_from_args, demo_storefront};
use crate::server::{McpHandler, chat_router, mcp_router, serve, serve_stdio, with_common_layers};

pub async fn run(cli: Cli) -> Result<()> {
    match cli.command {
        Command::Chat(args) => run_chat(args).await,
        Command::CatalogTools(args) => run_tool_server(ToolSurface::Catalog, args).await,
        Command::ShippingTools(args) => run_tool_server(ToolSurface::Shipping, args).await,
    }
}

pub async fn run_chat(args: ChatArgs) -> Result<()> {
    let service = chat_service_from_args(&args, demo_storefront())
        .context("failed to configure chat backend")?;

    tracing::info!(
        phase = "setup",
        event = "chat_ready",
        provider = %service.provider_id(),
        max_tool_round_trips = args.max_tool_round_trips
    );

    let router = with_common_layers(chat_router(Arc::new(service)));
    serve(router, args.bind)
        .await
        .with_context(|| format!("chat server on {} failed", args.bind))
}

pub async fn run_tool_server(surface: ToolSurface, args: ToolServerArgs) -> Result<()> {
    let runtime = surface
        .runtime(demo_storefront())
        .with_context(|| format!("failed to build {} tools", surface.server_name()))?;
    let handler = McpHandler::new(surface.server_name(), runtime);

    if args.stdio {
        let stdin = BufReader::new(tokio::io::stdin());
        return serve_stdio(&handler, stdin, tokio::io::stdout())
            .await
            .context("stdio transport failed");
    }

    let addr = match args.bind {
        Some(addr) => addr,
        None => default_bind(surface)?,
    };
    let router = with_common_layers(mcp_router(Arc::new(handler)));
    serve(router, addr)
        .await
        .with_context(|| format!("{} server on {addr} failed", surface.server_name()))
}

fn default_bind(surface: ToolSurface) -> Result<SocketAddr> {
    let raw = match surface {
        ToolSurface::Catalog => DEFAULT_CATALOG_BIND,
        ToolSurface::Shipping => DEFAULT_SHIPPING_BIND,
    };

    raw.parse()
        .with_context(|| format!("invalid default bind address {raw}"))
}
