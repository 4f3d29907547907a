//! # sheetgate
//!
//! Natural-language spreadsheet command gateway: serve the HTTP endpoint or
//! run the interactive REPL against a local file.

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use anyhow::Context;
use clap::{Args, Parser, Subcommand};

use agent::LlmResolver;
use gateway::api::routes::{create_router, AppState};
use gateway::config::{ExecutionMode, GatewayConfig, DEFAULT_MODEL, DEFAULT_WORKBOOK};
use gateway::repl;
use llm::remote::GroqClient;
use workbook::DocumentPool;

#[derive(Parser)]
#[command(name = "sheetgate")]
#[command(about = "Natural-language commands for spreadsheets", long_about = None)]
#[command(version)]
struct Cli {
    #[command(flatten)]
    options: Options,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Args)]
struct Options {
    /// Spreadsheet file acted on in local mode
    #[arg(long, env = "WORKBOOK_PATH", default_value = DEFAULT_WORKBOOK)]
    workbook: PathBuf,

    /// Execute locally or emit descriptors for a remote front end
    #[arg(long, value_enum, env = "EXECUTION_MODE", default_value_t = ExecutionMode::Local)]
    mode: ExecutionMode,

    /// HTTP bind host
    #[arg(long, env = "HOST", default_value = "127.0.0.1")]
    host: String,

    /// HTTP bind port
    #[arg(long, env = "PORT", default_value_t = 8000)]
    port: u16,

    /// Model identifier served through Groq
    #[arg(long, env = "GROQ_MODEL", default_value = DEFAULT_MODEL)]
    model: String,

    /// Budget in seconds for one intent-resolution call
    #[arg(long, env = "RESOLVE_TIMEOUT_SECS", default_value_t = 30)]
    resolve_timeout_secs: u64,

    /// Keep documents open between requests
    #[arg(long, env = "POOL_DOCUMENTS")]
    pool: bool,

    /// Idle seconds before a pooled document is evicted
    #[arg(long, env = "POOL_IDLE_SECS", default_value_t = 300)]
    pool_idle_secs: u64,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the HTTP service
    Serve,
    /// Run the interactive loop (local mode only)
    Repl,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let rust_log = std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string());
    tracing_subscriber::fmt().with_env_filter(rust_log).init();

    let cli = Cli::parse();

    let config = GatewayConfig::new(
        cli.options.workbook,
        cli.options.mode,
        cli.options.host,
        cli.options.port,
        cli.options.model,
        Duration::from_secs(cli.options.resolve_timeout_secs),
        cli.options
            .pool
            .then(|| Duration::from_secs(cli.options.pool_idle_secs)),
    )
    .context("configuration")?;

    let model = Arc::new(GroqClient::new(config.llm.clone()));
    let resolver = Arc::new(LlmResolver::new(model).with_timeout(config.resolve_timeout));

    let state = AppState {
        resolver,
        pool: config
            .pool_idle
            .map(|idle| Arc::new(DocumentPool::new(idle))),
        config: Arc::new(config),
    };

    match cli.command {
        Commands::Serve => serve(state).await,
        Commands::Repl => repl::run(&state).await,
    }
}

async fn serve(state: AppState) -> anyhow::Result<()> {
    if let (Some(pool), Some(idle)) = (state.pool.clone(), state.config.pool_idle) {
        let period = idle.max(Duration::from_secs(1));
        tokio::spawn(async move {
            let mut interval = tokio::time::interval(period);
            loop {
                interval.tick().await;
                let evicted = pool.evict_idle().await;
                if evicted > 0 {
                    tracing::debug!(evicted, "document pool sweep");
                }
            }
        });
    }

    let addr = state.config.bind_addr();
    tracing::info!(%addr, mode = ?state.config.mode, "sheetgate listening");

    let app = create_router(state);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("failed to bind {addr}"))?;
    axum::serve(listener, app).await.context("server")?;

    Ok(())
}
