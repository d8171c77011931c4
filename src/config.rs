use clap::{Args, Parser, ValueEnum};

#[derive(Clone, Debug, Parser)]
#[command(version, about, long_about = None)]
pub struct Config {
    /// Shared secret used to verify webhook signatures. Must be non-empty;
    /// the server refuses to start without it.
    #[arg(long, env = "SMSHOOK_WEBHOOK_SECRET", default_value = "", hide_env_values = true)]
    pub webhook_secret: String,

    /// Database connection URL
    #[arg(long, env = "SMSHOOK_DATABASE_URL", default_value = "sqlite:///data/app.db")]
    pub database_url: String,

    /// How long a connection waits on a locked database before failing
    #[arg(long, env = "SMSHOOK_BUSY_TIMEOUT_MS", default_value_t = 5000)]
    pub busy_timeout_ms: u64,

    #[command(flatten)]
    pub server: ServerConfig,

    #[command(flatten)]
    pub telemetry: TelemetryConfig,
}

#[derive(Clone, Debug, Args)]
pub struct ServerConfig {
    /// Host to listen on
    #[arg(long, env = "SMSHOOK_HOST", default_value = "0.0.0.0")]
    pub host: String,

    /// Port to listen on
    #[arg(long, env = "SMSHOOK_PORT", default_value_t = 8080)]
    pub port: u16,
}

#[derive(Clone, Debug, Args)]
pub struct TelemetryConfig {
    /// Log output format
    #[arg(long, env = "SMSHOOK_LOG_FORMAT", value_enum, default_value_t = LogFormat::Json)]
    pub log_format: LogFormat,

    /// OTLP collector endpoint for traces and metrics (exporting is disabled when unset)
    #[arg(long, env = "SMSHOOK_OTLP_ENDPOINT")]
    pub otlp_endpoint: Option<String>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum LogFormat {
    Text,
    Json,
}

impl Config {
    pub fn load() -> Self {
        Self::parse()
    }
}
