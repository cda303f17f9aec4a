//! Qdo MCP Server - Main Entry Point
//!
//! This is the main entry point for the Qdo MCP server application.
//! The actual implementation is in the `qdo` library.

use anyhow::Result;
use clap::{CommandFactory, Parser};
use mcp_attr::server::serve_stdio;
use qdo::QdoServerHandler;
use std::path::PathBuf;
use tracing::info;
use tracing_subscriber::EnvFilter;

/// Qdo MCP Server - Eisenhower Matrix task management via Model Context Protocol
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Path to the Qdo data file
    #[arg(env = "QDO_FILE")]
    file: Option<PathBuf>,

    /// Log filter written to stderr (e.g. "info", "qdo=debug")
    #[arg(long, env = "QDO_LOG", default_value = "info")]
    log_level: String,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    // Without a data file there is nothing to serve: show help and exit with error code
    let Some(file) = args.file else {
        let mut cmd = Args::command();
        cmd.print_help().ok();
        println!(); // Add a newline after help
        std::process::exit(2);
    };

    // stdout carries the MCP protocol, so logs go to stderr
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(&args.log_level))
        .with_writer(std::io::stderr)
        .with_ansi(false)
        .init();

    info!(path = %file.display(), "starting qdo server");
    let handler = QdoServerHandler::new(&file)?;
    serve_stdio(handler).await?;
    Ok(())
}
