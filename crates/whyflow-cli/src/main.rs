mod cli;
mod config;
mod http;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::info;
use whyflow_core::api::CompetitorSelectionService;

use crate::cli::{Cli, Command, read_document, render_demo, render_inspect};
use crate::config::ServerConfig;
use crate::http::{AppState, router};

#[tokio::main]
async fn main() -> Result<()> {
    // stdout は `demo` / `inspect` の JSON 用、ログは stderr へ
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    match cli.command {
        Command::Demo { compact } => println!("{}", render_demo(compact)?),
        Command::Inspect(args) => {
            let text = read_document(&args.path)?;
            print!("{}", render_inspect(&text, &args)?);
        }
        Command::Serve(args) => serve(args.into()).await?,
    }
    Ok(())
}

async fn serve(config: ServerConfig) -> Result<()> {
    let addr = config.socket_addr().context("invalid listen address")?;
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("failed to bind {addr}"))?;
    info!(%addr, "whyflow API listening");

    let app = router(AppState::new(CompetitorSelectionService::demo()));
    axum::serve(listener, app)
        .with_graceful_shutdown(async {
            let _ = tokio::signal::ctrl_c().await;
            info!("shutting down");
        })
        .await
        .context("server error")?;
    Ok(())
}
