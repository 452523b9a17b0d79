use std::env;
use std::fmt;
use std::net::{IpAddr, SocketAddr};

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

    /// Whether programming errors should surface loudly instead of degrading.
    pub const fn is_strict(self) -> bool {
        !matches!(self, Self::Production)
    }
}

/// Top-level configuration for the application.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub environment: AppEnvironment,
    pub server: ServerConfig,
    pub telemetry: TelemetryConfig,
    pub marketplace: MarketplaceConfig,
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

        Ok(Self {
            environment,
            server: ServerConfig { host, port },
            telemetry: TelemetryConfig { log_level },
            marketplace: MarketplaceConfig::from_env()?,
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

/// Marketplace-wide constants, built once at startup and passed by reference.
#[derive(Debug, Clone, PartialEq)]
pub struct MarketplaceConfig {
    pub contact_email: String,
    pub gov_idp_suffix: String,
    pub vendor_idp_suffix: String,
    pub cwu_max_budget: u32,
    pub swu_max_budget: u32,
    /// Decimal places used when rendering percentages.
    pub score_decimals: u32,
    /// Rendered wherever a value is absent or suppressed.
    pub empty_placeholder: String,
    pub copy: MarketplaceCopy,
}

pub const DEFAULT_SCORE_DECIMALS: u32 = 2;
pub const MAX_SCORE_DECIMALS: u32 = 6;

impl Default for MarketplaceConfig {
    fn default() -> Self {
        Self {
            contact_email: "digitalmarketplace@gov.bc.ca".to_string(),
            gov_idp_suffix: "idir".to_string(),
            vendor_idp_suffix: "github".to_string(),
            cwu_max_budget: 50_000,
            swu_max_budget: 50_000,
            score_decimals: DEFAULT_SCORE_DECIMALS,
            empty_placeholder: "-".to_string(),
            copy: MarketplaceCopy::default(),
        }
    }
}

impl MarketplaceConfig {
    fn from_env() -> Result<Self, ConfigError> {
        let defaults = Self::default();

        let score_decimals = parse_var("MARKETPLACE_SCORE_DECIMALS", defaults.score_decimals)?;
        if score_decimals > MAX_SCORE_DECIMALS {
            return Err(ConfigError::InvalidNumber {
                var: "MARKETPLACE_SCORE_DECIMALS",
            });
        }

        Ok(Self {
            contact_email: env::var("MARKETPLACE_CONTACT_EMAIL").unwrap_or(defaults.contact_email),
            gov_idp_suffix: env::var("MARKETPLACE_GOV_IDP_SUFFIX")
                .unwrap_or(defaults.gov_idp_suffix),
            vendor_idp_suffix: env::var("MARKETPLACE_VENDOR_IDP_SUFFIX")
                .unwrap_or(defaults.vendor_idp_suffix),
            cwu_max_budget: parse_var("MARKETPLACE_CWU_MAX_BUDGET", defaults.cwu_max_budget)?,
            swu_max_budget: parse_var("MARKETPLACE_SWU_MAX_BUDGET", defaults.swu_max_budget)?,
            score_decimals,
            empty_placeholder: env::var("MARKETPLACE_EMPTY_PLACEHOLDER")
                .unwrap_or(defaults.empty_placeholder),
            copy: defaults.copy,
        })
    }
}

fn parse_var(var: &'static str, default: u32) -> Result<u32, ConfigError> {
    match env::var(var) {
        Ok(raw) => raw
            .trim()
            .parse::<u32>()
            .map_err(|_| ConfigError::InvalidNumber { var }),
        Err(_) => Ok(default),
    }
}

/// Names used in user-facing copy.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MarketplaceCopy {
    pub gov_name_short: String,
    pub gov_name_long: String,
    pub region_name_short: String,
    pub region_name_long: String,
}

impl Default for MarketplaceCopy {
    fn default() -> Self {
        Self {
            gov_name_short: "B.C. Government".to_string(),
            gov_name_long: "Government of British Columbia".to_string(),
            region_name_short: "B.C.".to_string(),
            region_name_long: "British Columbia".to_string(),
        }
    }
}

#[derive(Debug)]
pub enum ConfigError {
    InvalidPort,
    InvalidHost { source: std::net::AddrParseError },
    InvalidNumber { var: &'static str },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::InvalidPort => write!(f, "APP_PORT must be a valid u16"),
            ConfigError::InvalidHost { .. } => {
                write!(f, "APP_HOST must parse to an IPv4 or IPv6 address")
            }
            ConfigError::InvalidNumber { var } => {
                write!(f, "{var} must be a non-negative integer within range")
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
