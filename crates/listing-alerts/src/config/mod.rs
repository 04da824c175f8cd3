use std::env;
use std::fmt;
use std::net::{IpAddr, SocketAddr};
use std::path::PathBuf;

use crate::workflows::matching::{MatchConfig, DEFAULT_MATCH_THRESHOLD};

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
    pub matching: MatchConfig,
    pub realworks: RealworksConfig,
    pub whatsapp: WhatsAppConfig,
    pub webhook: WebhookConfig,
    pub profiles_path: Option<PathBuf>,
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

        let threshold = match optional_var("MATCH_THRESHOLD") {
            Some(raw) => parse_threshold(&raw)?,
            None => DEFAULT_MATCH_THRESHOLD,
        };

        let realworks = RealworksConfig {
            api_base: optional_var("REALWORKS_API_BASE"),
            api_token: optional_var("REALWORKS_API_TOKEN").unwrap_or_default(),
        };

        let whatsapp = WhatsAppConfig {
            graph_api_base: optional_var("WHATSAPP_GRAPH_API_BASE")
                .unwrap_or_else(|| "https://graph.facebook.com".to_string()),
            api_version: optional_var("WHATSAPP_API_VERSION")
                .unwrap_or_else(|| "v21.0".to_string()),
            phone_number_id: optional_var("WHATSAPP_PHONE_NUMBER_ID"),
            access_token: optional_var("WHATSAPP_ACCESS_TOKEN"),
            template_name: optional_var("WHATSAPP_TEMPLATE_NAME")
                .unwrap_or_else(|| "aanbod_brochure".to_string()),
            template_language: optional_var("WHATSAPP_TEMPLATE_LANGUAGE")
                .unwrap_or_else(|| "nl".to_string()),
        };

        Ok(Self {
            environment,
            server: ServerConfig { host, port },
            telemetry: TelemetryConfig {
                log_level,
                ansi: environment == AppEnvironment::Development,
            },
            matching: MatchConfig::with_threshold(threshold),
            realworks,
            whatsapp,
            webhook: WebhookConfig {
                verify_token: optional_var("VERIFY_TOKEN"),
            },
            profiles_path: optional_var("PROFILES_PATH").map(PathBuf::from),
        })
    }
}

fn optional_var(name: &str) -> Option<String> {
    env::var(name)
        .ok()
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
}

fn parse_threshold(raw: &str) -> Result<u8, ConfigError> {
    match raw.parse::<u8>() {
        Ok(value) if value <= 100 => Ok(value),
        _ => Err(ConfigError::InvalidThreshold {
            value: raw.to_string(),
        }),
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
    /// Colored output for local terminals; hosted log collectors get plain text.
    pub ansi: bool,
}

/// Access to the Realworks object API.
#[derive(Debug, Clone, Default)]
pub struct RealworksConfig {
    /// When set, webhook object URLs must live under this prefix.
    pub api_base: Option<String>,
    pub api_token: String,
}

/// WhatsApp Cloud API template delivery.
#[derive(Debug, Clone)]
pub struct WhatsAppConfig {
    pub graph_api_base: String,
    pub api_version: String,
    pub phone_number_id: Option<String>,
    pub access_token: Option<String>,
    pub template_name: String,
    pub template_language: String,
}

impl WhatsAppConfig {
    /// Phone number id and access token, when both are configured.
    pub fn credentials(&self) -> Option<(&str, &str)> {
        match (&self.phone_number_id, &self.access_token) {
            (Some(phone_number_id), Some(access_token)) => {
                Some((phone_number_id.as_str(), access_token.as_str()))
            }
            _ => None,
        }
    }
}

/// Meta webhook verification.
#[derive(Debug, Clone, Default)]
pub struct WebhookConfig {
    pub verify_token: Option<String>,
}

#[derive(Debug)]
pub enum ConfigError {
    InvalidPort,
    InvalidHost { source: std::net::AddrParseError },
    InvalidThreshold { value: String },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::InvalidPort => write!(f, "APP_PORT must be a valid u16"),
            ConfigError::InvalidHost { .. } => {
                write!(f, "APP_HOST must parse to an IPv4 or IPv6 address")
            }
            ConfigError::InvalidThreshold { value } => write!(
                f,
                "MATCH_THRESHOLD must be a whole number between 0 and 100, got '{}'",
                value
            ),
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::InvalidPort | ConfigError::InvalidThreshold { .. } => None,
            ConfigError::InvalidHost { source } => Some(source),
        }
    }
}
