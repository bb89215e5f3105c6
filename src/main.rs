use anyhow::Result;
use clap::Parser;
use std::path::PathBuf;
use tracing::Level;
use tracing_subscriber::FmtSubscriber;
use webcoder::{Config, WebcoderServer};

/// Workspace-sandboxed MCP server for web coding agents.
#[derive(Debug, Parser)]
#[command(name = "webcoder", version, about)]
struct Cli {
    /// Workspace root directory (overrides WEBCODER_WORKSPACE)
    #[arg(long, value_name = "DIR")]
    workspace: Option<PathBuf>,

    /// Path to a webcoder.toml config file
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Stdout carries the MCP transport; logs go to stderr.
    let subscriber = FmtSubscriber::builder()
        .with_max_level(Level::INFO)
        .with_writer(std::io::stderr)
        .with_ansi(false)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    let cli = Cli::parse();
    let mut config = Config::load(cli.config.as_deref())?;
    if let Some(workspace) = cli.workspace {
        config.workspace_dir = workspace;
    }

    let server = WebcoderServer::new(&config)?;
    tracing::info!(
        workspace = %config.workspace_dir.display(),
        tools = server.tool_names().len(),
        "webcoder serving MCP over stdio"
    );
    server.serve_stdio().await
}
