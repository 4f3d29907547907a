//! Gateway configuration.
//!
//! Everything externally supplied lives here: the spreadsheet path, the
//! execution mode, bind address, model selection, and timeouts. The API
//! credential is read from the environment at startup; a missing key is a
//! misconfiguration that aborts before anything listens, never a per-request
//! error.

use std::path::PathBuf;
use std::time::Duration;

use clap::ValueEnum;
use llm::remote::groq::GROQ_BASE_URL;
use llm::RemoteLlmConfig;
use thiserror::Error;

/// Environment variable holding the Groq API key.
pub const API_KEY_ENV: &str = "GROQ_API_KEY";

/// Default spreadsheet file for local execution.
pub const DEFAULT_WORKBOOK: &str = "test.xlsx";

/// Default model served through Groq.
pub const DEFAULT_MODEL: &str = "llama-3.3-70b-versatile";

/// What the gateway does with a resolved action.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ExecutionMode {
    /// Execute against the configured local spreadsheet file and return the
    /// textual result.
    Local,
    /// Return the action serialized as a JSON descriptor; a remote front end
    /// executes it against its live workbook.
    Delegated,
}

impl std::fmt::Display for ExecutionMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ExecutionMode::Local => write!(f, "local"),
            ExecutionMode::Delegated => write!(f, "delegated"),
        }
    }
}

/// Startup configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The resolver credential is absent from the environment.
    #[error("Missing API credential: set {API_KEY_ENV}")]
    MissingApiKey,
}

/// Fully resolved gateway configuration.
#[derive(Debug, Clone)]
pub struct GatewayConfig {
    /// Spreadsheet file acted on in local mode.
    pub workbook_path: PathBuf,
    /// Local execution or descriptor generation.
    pub mode: ExecutionMode,
    /// HTTP bind host.
    pub host: String,
    /// HTTP bind port.
    pub port: u16,
    /// Budget for one intent-resolution call.
    pub resolve_timeout: Duration,
    /// Idle timeout for the document pool; `None` disables pooling and every
    /// request reopens the file.
    pub pool_idle: Option<Duration>,
    /// Provider configuration (credential, base URL, model).
    pub llm: RemoteLlmConfig,
}

impl GatewayConfig {
    /// Assemble a configuration, pulling the API key from the environment.
    pub fn new(
        workbook_path: PathBuf,
        mode: ExecutionMode,
        host: String,
        port: u16,
        model: String,
        resolve_timeout: Duration,
        pool_idle: Option<Duration>,
    ) -> Result<Self, ConfigError> {
        let llm = RemoteLlmConfig::from_env(API_KEY_ENV, GROQ_BASE_URL, model)
            .map_err(|_| ConfigError::MissingApiKey)?;

        Ok(Self {
            workbook_path,
            mode,
            host,
            port,
            resolve_timeout,
            pool_idle,
            llm,
        })
    }

    /// Bind address string, e.g. `127.0.0.1:8000`.
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}
