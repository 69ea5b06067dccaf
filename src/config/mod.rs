use std::env;
use std::fmt;
use std::fs;
use std::net::{IpAddr, SocketAddr};
use std::path::PathBuf;

use crate::workflows::career::{BenchmarkConfig, RegenerationPolicy};

/// Distinguishes runtime behavior for different stages of the service.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppEnvironment {
    Development,
    Test,
    Production,
}

impl AppEnvironment {
    fn from_str(value: &str) -> Self {
        match value.trim().to_ascii_lowercase().as_str() {
            "prod" | "production" => Self::Production,
            "test" | "ci" => Self::Test,
            _ => Self::Development,
        }
    }
}

/// Top-level configuration for the application.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub environment: AppEnvironment,
    pub server: ServerConfig,
    pub telemetry: TelemetryConfig,
    pub engine: EngineConfig,
}

impl AppConfig {
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let environment = AppEnvironment::from_str(
            &env::var("APP_ENV").unwrap_or_else(|_| "development".to_string()),
        );

        let host = env::var("APP_HOST").unwrap_or_else(|_| "127.0.0.1".to_string());
        let port = env::var("APP_PORT")
            .unwrap_or_else(|_| "3000".to_string())
            .parse::<u16>()
            .map_err(|_| ConfigError::InvalidPort)?;

        let log_level = env::var("APP_LOG_LEVEL").unwrap_or_else(|_| "info".to_string());

        let scoring = match env::var("APP_SCORING_CONFIG") {
            Ok(path) if !path.trim().is_empty() => load_scoring_config(PathBuf::from(path))?,
            _ => BenchmarkConfig::default(),
        };

        let regeneration = match env::var("APP_PLAN_REGENERATION") {
            Ok(value) => parse_regeneration(&value)?,
            Err(_) => RegenerationPolicy::default(),
        };

        Ok(Self {
            environment,
            server: ServerConfig { host, port },
            telemetry: TelemetryConfig { log_level },
            engine: EngineConfig {
                scoring,
                regeneration,
            },
        })
    }
}

/// Settings controlling the HTTP server binding.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl ServerConfig {
    pub fn socket_addr(&self) -> Result<SocketAddr, ConfigError> {
        if self.host.eq_ignore_ascii_case("localhost") {
            return Ok(SocketAddr::new(IpAddr::from([127, 0, 0, 1]), self.port));
        }

        let ip: IpAddr = self
            .host
            .parse()
            .map_err(|source| ConfigError::InvalidHost { source })?;

        Ok(SocketAddr::new(ip, self.port))
    }
}

/// Tracing controls.
#[derive(Debug, Clone)]
pub struct TelemetryConfig {
    pub log_level: String,
}

/// Scoring tables and plan behavior handed to the career service.
#[derive(Debug, Clone, Default)]
pub struct EngineConfig {
    pub scoring: BenchmarkConfig,
    pub regeneration: RegenerationPolicy,
}

fn load_scoring_config(path: PathBuf) -> Result<BenchmarkConfig, ConfigError> {
    let raw = fs::read_to_string(&path).map_err(|source| ConfigError::ScoringFile {
        path: path.clone(),
        source,
    })?;
    serde_json::from_str(&raw).map_err(|source| ConfigError::ScoringFormat { path, source })
}

fn parse_regeneration(value: &str) -> Result<RegenerationPolicy, ConfigError> {
    match value.trim().to_ascii_lowercase().as_str() {
        "" | "replace" => Ok(RegenerationPolicy::Replace),
        "preserve" | "preserve_progress" => Ok(RegenerationPolicy::PreserveProgress),
        other => Err(ConfigError::InvalidRegenerationPolicy(other.to_string())),
    }
}

#[derive(Debug)]
pub enum ConfigError {
    InvalidPort,
    InvalidHost {
        source: std::net::AddrParseError,
    },
    ScoringFile {
        path: PathBuf,
        source: std::io::Error,
    },
    ScoringFormat {
        path: PathBuf,
        source: serde_json::Error,
    },
    InvalidRegenerationPolicy(String),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::InvalidPort => write!(f, "APP_PORT must be a valid u16"),
            ConfigError::InvalidHost { .. } => {
                write!(f, "APP_HOST must parse to an IPv4 or IPv6 address")
            }
            ConfigError::ScoringFile { path, .. } => {
                write!(f, "unable to read scoring config {}", path.display())
            }
            ConfigError::ScoringFormat { path, .. } => {
                write!(f, "scoring config {} is not valid JSON", path.display())
            }
            ConfigError::InvalidRegenerationPolicy(value) => write!(
                f,
                "APP_PLAN_REGENERATION must be 'replace' or 'preserve', got '{value}'"
            ),
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::InvalidPort | ConfigError::InvalidRegenerationPolicy(_) => None,
            ConfigError::InvalidHost { source } => Some(source),
            ConfigError::ScoringFile { source, .. } => Some(source),
            ConfigError::ScoringFormat { source, .. } => Some(source),
        }
    }
}
