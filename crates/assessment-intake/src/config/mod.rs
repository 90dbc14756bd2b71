use std::env;
use std::fmt;
use std::net::{IpAddr, SocketAddr};

use crate::workflows::intake::catalog::DEFAULT_MAX_UPLOAD_MB;
use crate::workflows::intake::UploadPolicy;

pub const DEFAULT_UPLOAD_URL: &str = "https://assessments-xhy0.onrender.com/upload-file";
pub const DEFAULT_SUBMIT_URL: &str = "https://assessments-xhy0.onrender.com/submit";
const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;

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
    pub endpoints: EndpointConfig,
    pub uploads: UploadConfig,
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
        let public_base_url = optional_url("INTAKE_PUBLIC_BASE_URL")?;

        let log_level = env::var("APP_LOG_LEVEL").unwrap_or_else(|_| "info".to_string());

        let upload_url = url_or_default("INTAKE_UPLOAD_URL", DEFAULT_UPLOAD_URL)?;
        let submit_url = url_or_default("INTAKE_SUBMIT_URL", DEFAULT_SUBMIT_URL)?;
        let request_timeout_secs =
            number_or_default("INTAKE_REQUEST_TIMEOUT_SECS", DEFAULT_REQUEST_TIMEOUT_SECS)?;
        let max_upload_mb = number_or_default("INTAKE_MAX_UPLOAD_MB", DEFAULT_MAX_UPLOAD_MB)?;

        Ok(Self {
            environment,
            server: ServerConfig {
                host,
                port,
                public_base_url,
            },
            telemetry: TelemetryConfig { log_level },
            endpoints: EndpointConfig {
                upload_url,
                submit_url,
                request_timeout_secs,
            },
            uploads: UploadConfig { max_upload_mb },
        })
    }
}

fn is_http_url(value: &str) -> bool {
    reqwest::Url::parse(value)
        .map(|url| matches!(url.scheme(), "http" | "https"))
        .unwrap_or(false)
}

fn optional_url(variable: &'static str) -> Result<Option<String>, ConfigError> {
    match env::var(variable) {
        Ok(value) if is_http_url(&value) => Ok(Some(value)),
        Ok(value) => Err(ConfigError::InvalidUrl { variable, value }),
        Err(_) => Ok(None),
    }
}

fn url_or_default(variable: &'static str, default: &str) -> Result<String, ConfigError> {
    Ok(optional_url(variable)?.unwrap_or_else(|| default.to_string()))
}

fn number_or_default(variable: &'static str, default: u64) -> Result<u64, ConfigError> {
    match env::var(variable) {
        Ok(value) => value
            .trim()
            .parse::<u64>()
            .ok()
            .filter(|parsed| *parsed > 0)
            .ok_or(ConfigError::InvalidNumber { variable }),
        Err(_) => Ok(default),
    }
}

/// Settings controlling the HTTP server binding.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub public_base_url: Option<String>,
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

    /// Base used when the receiver hands out file links.
    pub fn public_base_url(&self) -> String {
        self.public_base_url
            .clone()
            .unwrap_or_else(|| format!("http://{}:{}", self.host, self.port))
    }
}

/// Tracing controls.
#[derive(Debug, Clone)]
pub struct TelemetryConfig {
    pub log_level: String,
}

/// Remote endpoints the form uploads to and submits to.
#[derive(Debug, Clone)]
pub struct EndpointConfig {
    pub upload_url: String,
    pub submit_url: String,
    pub request_timeout_secs: u64,
}

#[derive(Debug, Clone)]
pub struct UploadConfig {
    pub max_upload_mb: u64,
}

impl UploadConfig {
    pub fn policy(&self) -> UploadPolicy {
        UploadPolicy::with_max_megabytes(self.max_upload_mb)
    }
}

#[derive(Debug)]
pub enum ConfigError {
    InvalidPort,
    InvalidHost { source: std::net::AddrParseError },
    InvalidUrl { variable: &'static str, value: String },
    InvalidNumber { variable: &'static str },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::InvalidPort => write!(f, "APP_PORT must be a valid u16"),
            ConfigError::InvalidHost { .. } => {
                write!(f, "APP_HOST must parse to an IPv4 or IPv6 address")
            }
            ConfigError::InvalidUrl { variable, value } => {
                write!(f, "{variable} must be an http(s) URL, found '{value}'")
            }
            ConfigError::InvalidNumber { variable } => {
                write!(f, "{variable} must be a positive integer")
            }
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::InvalidHost { source } => Some(source),
            ConfigError::InvalidPort
            | ConfigError::InvalidUrl { .. }
            | ConfigError::InvalidNumber { .. } => None,
        }
    }
}
