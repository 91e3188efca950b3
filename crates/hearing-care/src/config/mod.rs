use std::env;
use std::fmt;
use std::net::{IpAddr, SocketAddr};

use axum::http::HeaderName;

const DEFAULT_PATIENT_HEADER: &str = "x-patient-id";

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

/// Top-level configuration for the care service.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub environment: AppEnvironment,
    pub server: ServerConfig,
    pub telemetry: TelemetryConfig,
    pub identity: IdentityConfig,
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

        let identity = match env::var("APP_PATIENT_HEADER") {
            Ok(raw) => IdentityConfig::new(&raw)?,
            Err(_) => IdentityConfig::default(),
        };

        Ok(Self {
            environment,
            server: ServerConfig { host, port },
            telemetry: TelemetryConfig { log_level },
            identity,
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

/// Where the upstream auth layer places the signed-in patient's identifier.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IdentityConfig {
    patient_header: HeaderName,
}

impl IdentityConfig {
    pub fn new(header: &str) -> Result<Self, ConfigError> {
        let normalized = header.trim().to_ascii_lowercase();
        let patient_header = HeaderName::from_bytes(normalized.as_bytes())
            .map_err(|_| ConfigError::InvalidPatientHeader(header.to_string()))?;
        Ok(Self { patient_header })
    }

    pub fn patient_header(&self) -> &HeaderName {
        &self.patient_header
    }
}

impl Default for IdentityConfig {
    fn default() -> Self {
        Self {
            patient_header: HeaderName::from_static(DEFAULT_PATIENT_HEADER),
        }
    }
}

#[derive(Debug)]
pub enum ConfigError {
    InvalidPort,
    InvalidHost { source: std::net::AddrParseError },
    InvalidPatientHeader(String),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::InvalidPort => write!(f, "APP_PORT must be a valid u16"),
            ConfigError::InvalidHost { .. } => {
                write!(f, "APP_HOST must parse to an IPv4 or IPv6 address")
            }
            ConfigError::InvalidPatientHeader(value) => {
                write!(f, "APP_PATIENT_HEADER '{value}' is not a valid header name")
            }
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::InvalidPort | ConfigError::InvalidPatientHeader(_) => None,
            ConfigError::InvalidHost { source } => Some(source),
        }
    }
}
