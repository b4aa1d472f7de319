use std::env;
use std::fmt;
use std::net::{IpAddr, SocketAddr};
use std::path::PathBuf;
use std::time::Duration;

use crate::workflows::volunteers::matching::POINTS_PER_PAST_ASSIGNMENT;
use crate::workflows::volunteers::{CatalogError, CategoryCatalog, MatchEngine, MatchWeights};

const DEFAULT_REPORT_CACHE_TTL_SECS: u64 = 300;

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
    pub scoring: ScoringConfig,
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

        let points_per_assignment = match env::var("SCORING_POINTS_PER_ASSIGNMENT") {
            Ok(raw) => raw
                .trim()
                .parse::<u16>()
                .map(i32::from)
                .map_err(|_| ConfigError::InvalidNumber {
                    key: "SCORING_POINTS_PER_ASSIGNMENT",
                })?,
            Err(_) => POINTS_PER_PAST_ASSIGNMENT,
        };
        let report_cache_ttl_secs = match env::var("REPORT_CACHE_TTL_SECS") {
            Ok(raw) => raw
                .trim()
                .parse::<u64>()
                .map_err(|_| ConfigError::InvalidNumber {
                    key: "REPORT_CACHE_TTL_SECS",
                })?,
            Err(_) => DEFAULT_REPORT_CACHE_TTL_SECS,
        };
        let catalog_path = env::var("CATEGORY_CATALOG_PATH")
            .ok()
            .filter(|path| !path.trim().is_empty())
            .map(PathBuf::from);

        Ok(Self {
            environment,
            server: ServerConfig { host, port },
            telemetry: TelemetryConfig { log_level },
            scoring: ScoringConfig {
                points_per_assignment,
                report_cache_ttl: Duration::from_secs(report_cache_ttl_secs),
                catalog_path,
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

/// Tracing and metrics controls.
#[derive(Debug, Clone)]
pub struct TelemetryConfig {
    pub log_level: String,
}

/// Tunables for the matching engine and the report cache.
#[derive(Debug, Clone)]
pub struct ScoringConfig {
    pub points_per_assignment: i32,
    pub report_cache_ttl: Duration,
    /// JSON catalog replacing the built-in category tables.
    pub catalog_path: Option<PathBuf>,
}

impl Default for ScoringConfig {
    fn default() -> Self {
        Self {
            points_per_assignment: POINTS_PER_PAST_ASSIGNMENT,
            report_cache_ttl: Duration::from_secs(DEFAULT_REPORT_CACHE_TTL_SECS),
            catalog_path: None,
        }
    }
}

impl ScoringConfig {
    pub fn load_catalog(&self) -> Result<CategoryCatalog, CatalogError> {
        match &self.catalog_path {
            Some(path) => CategoryCatalog::from_path(path),
            None => Ok(CategoryCatalog::standard()),
        }
    }

    pub fn match_engine(&self) -> Result<MatchEngine, CatalogError> {
        let weights =
            MatchWeights::default().with_points_per_assignment(self.points_per_assignment);
        Ok(MatchEngine::new(weights, self.load_catalog()?))
    }
}

#[derive(Debug)]
pub enum ConfigError {
    InvalidPort,
    InvalidHost { source: std::net::AddrParseError },
    InvalidNumber { key: &'static str },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::InvalidPort => write!(f, "APP_PORT must be a valid u16"),
            ConfigError::InvalidHost { .. } => {
                write!(f, "APP_HOST must parse to an IPv4 or IPv6 address")
            }
            ConfigError::InvalidNumber { key } => {
                write!(f, "{key} must be a non-negative integer")
            }
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::InvalidPort | ConfigError::InvalidNumber { .. } => None,
            ConfigError::InvalidHost { source } => Some(source),
        }
    }
}

/// Serializes tests that mutate process environment variables.
#[cfg(test)]
pub(crate) fn env_guard() -> &'static std::sync::Mutex<()> {
    static GUARD: std::sync::OnceLock<std::sync::Mutex<()>> = std::sync::OnceLock::new();
    GUARD.get_or_init(|| std::sync::Mutex::new(()))
}
