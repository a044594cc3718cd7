//! HTTP service for receipt OCR processing.

mod handlers;
mod pipeline;
mod routes;

use std::net::SocketAddr;
use std::sync::Arc;

use clap::Parser;
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

use recr_core::{ReceiptParser, RecrConfig, RemoteTranscriber, Transcriber};

/// Receipt scanner service - extract merchant, currency and amount from
/// photographed receipts
#[derive(Parser)]
#[command(name = "recr-server")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Path to config file
    #[arg(short, long)]
    config: Option<String>,

    /// Socket address to listen on
    #[arg(short, long, default_value = "127.0.0.1:8080")]
    bind: SocketAddr,
}

/// Shared server state. Everything the pipeline needs is injected here;
/// no process-global configuration.
#[derive(Clone)]
pub struct AppState {
    pub transcriber: Arc<dyn Transcriber>,
    pub parser: Arc<ReceiptParser>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Set up logging based on verbosity
    let level = match cli.verbose {
        0 => Level::WARN,
        1 => Level::INFO,
        2 => Level::DEBUG,
        _ => Level::TRACE,
    };

    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_target(false)
        .finish();

    tracing::subscriber::set_global_default(subscriber)?;

    let mut config = if let Some(path) = &cli.config {
        RecrConfig::from_file(std::path::Path::new(path))?
    } else {
        RecrConfig::default()
    };

    // Environment override so the key never has to live in the config file.
    if let Ok(key) = std::env::var("RECR_API_KEY") {
        config.transcription.api_key = key;
    }

    let transcriber = RemoteTranscriber::new(&config.transcription)?;
    let parser = ReceiptParser::from_config(&config.extraction);

    let state = AppState {
        transcriber: Arc::new(transcriber),
        parser: Arc::new(parser),
    };

    let app = routes::api_routes(state);

    let listener = tokio::net::TcpListener::bind(cli.bind).await?;
    info!("listening on {}", cli.bind);
    axum::serve(listener, app).await?;

    Ok(())
}
