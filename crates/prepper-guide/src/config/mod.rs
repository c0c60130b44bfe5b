use crate::checklist::CatalogSource;
use std::env;
use std::fmt;
use std::net::{IpAddr, SocketAddr};
use std::path::PathBuf;

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

    pub fn is_production(self) -> bool {
        matches!(self, Self::Production)
    }
}

/// When a rendered guide is emailed relative to checkout.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeliveryMode {
    /// Email as soon as the checkout session is created.
    Immediate,
    /// Store the guide and email it once the payment webhook confirms.
    OnPayment,
}

impl DeliveryMode {
    fn parse(value: &str) -> Result<Self, ConfigError> {
        match value.trim().to_ascii_lowercase().as_str() {
            "immediate" => Ok(Self::Immediate),
            "on_payment" | "on-payment" => Ok(Self::OnPayment),
            _ => Err(ConfigError::InvalidDeliveryMode(value.to_string())),
        }
    }
}

/// Top-level configuration for the application.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub environment: AppEnvironment,
    pub server: ServerConfig,
    pub telemetry: TelemetryConfig,
    pub catalog: CatalogConfig,
    pub delivery: DeliveryConfig,
    pub payment: PaymentConfig,
    pub mail: MailConfig,
}

fn optional(key: &str) -> Option<String> {
    env::var(key)
        .ok()
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
}

fn or_default(key: &str, default: &str) -> String {
    optional(key).unwrap_or_else(|| default.to_string())
}

impl AppConfig {
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let environment = AppEnvironment::from_str(&or_default("APP_ENV", "development"));

        let host = or_default("APP_HOST", "127.0.0.1");
        let port = or_default("APP_PORT", "3000")
            .parse::<u16>()
            .map_err(|_| ConfigError::InvalidPort)?;

        let cors_origins = optional("APP_CORS_ORIGINS")
            .map(|raw| {
                raw.split(',')
                    .map(str::trim)
                    .filter(|origin| !origin.is_empty())
                    .map(|origin| {
                        if origin.starts_with("http://") || origin.starts_with("https://") {
                            Ok(origin.trim_end_matches('/').to_string())
                        } else {
                            Err(ConfigError::InvalidCorsOrigin(origin.to_string()))
                        }
                    })
                    .collect::<Result<Vec<_>, _>>()
            })
            .transpose()?
            .unwrap_or_default();

        let log_level = or_default("APP_LOG_LEVEL", "info");

        let catalog = CatalogConfig {
            dir: optional("PREPPER_CATALOG_DIR").map(PathBuf::from),
        };

        let delivery = DeliveryConfig {
            mode: DeliveryMode::parse(&or_default("PREPPER_DELIVERY_MODE", "immediate"))?,
            artifact_dir: optional("PREPPER_ARTIFACT_DIR")
                .map(PathBuf::from)
                .unwrap_or_else(env::temp_dir),
        };

        let price_cents = or_default("PREPPER_PRICE_CENTS", "599")
            .parse::<u32>()
            .ok()
            .filter(|cents| *cents > 0)
            .ok_or(ConfigError::InvalidPrice)?;

        let payment = PaymentConfig {
            price_cents,
            success_url: or_default(
                "PREPPER_SUCCESS_URL",
                "https://ultimateprepperguide.org/?success=true",
            ),
            cancel_url: or_default(
                "PREPPER_CANCEL_URL",
                "https://ultimateprepperguide.org/?canceled=true",
            ),
            secret_key: optional("STRIPE_SECRET_KEY"),
            publishable_key: optional("STRIPE_PUBLISHABLE_KEY"),
            webhook_secret: optional("STRIPE_WEBHOOK_SECRET"),
            api_base: or_default("STRIPE_API_BASE", "https://api.stripe.com"),
        };

        let username = optional("MAIL_USERNAME");
        let mail = MailConfig {
            smtp_host: or_default("MAIL_SMTP_HOST", "smtp.gmail.com"),
            smtp_port: or_default("MAIL_SMTP_PORT", "587")
                .parse::<u16>()
                .map_err(|_| ConfigError::InvalidSmtpPort)?,
            from: optional("MAIL_FROM").or_else(|| username.clone()),
            username,
            password: optional("MAIL_PASSWORD"),
        };

        Ok(Self {
            environment,
            server: ServerConfig {
                host,
                port,
                cors_origins,
            },
            telemetry: TelemetryConfig { log_level },
            catalog,
            delivery,
            payment,
            mail,
        })
    }
}

/// Settings controlling the HTTP server binding.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    /// Browser origins allowed to call the API; empty allows any origin.
    pub cors_origins: Vec<String>,
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

/// Where checklist datasets come from; the bundled set unless a directory is given.
#[derive(Debug, Clone, Default)]
pub struct CatalogConfig {
    pub dir: Option<PathBuf>,
}

impl CatalogConfig {
    pub fn source(&self) -> CatalogSource {
        match &self.dir {
            Some(dir) => CatalogSource::Directory(dir.clone()),
            None => CatalogSource::Bundled,
        }
    }
}

#[derive(Debug, Clone)]
pub struct DeliveryConfig {
    pub mode: DeliveryMode,
    pub artifact_dir: PathBuf,
}

#[derive(Debug, Clone)]
pub struct PaymentConfig {
    pub price_cents: u32,
    pub success_url: String,
    pub cancel_url: String,
    pub secret_key: Option<String>,
    pub publishable_key: Option<String>,
    pub webhook_secret: Option<String>,
    pub api_base: String,
}

#[derive(Debug, Clone)]
pub struct MailConfig {
    pub smtp_host: String,
    pub smtp_port: u16,
    pub username: Option<String>,
    pub password: Option<String>,
    pub from: Option<String>,
}

impl MailConfig {
    /// Login, password and sender, when all three are present.
    pub fn credentials(&self) -> Option<(&str, &str, &str)> {
        Some((
            self.username.as_deref()?,
            self.password.as_deref()?,
            self.from.as_deref()?,
        ))
    }
}

#[derive(Debug)]
pub enum ConfigError {
    InvalidPort,
    InvalidHost { source: std::net::AddrParseError },
    InvalidSmtpPort,
    InvalidPrice,
    InvalidDeliveryMode(String),
    InvalidCorsOrigin(String),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::InvalidPort => write!(f, "APP_PORT must be a valid u16"),
            ConfigError::InvalidHost { .. } => {
                write!(f, "APP_HOST must parse to an IPv4 or IPv6 address")
            }
            ConfigError::InvalidSmtpPort => write!(f, "MAIL_SMTP_PORT must be a valid u16"),
            ConfigError::InvalidPrice => {
                write!(f, "PREPPER_PRICE_CENTS must be a positive whole number of cents")
            }
            ConfigError::InvalidDeliveryMode(value) => write!(
                f,
                "PREPPER_DELIVERY_MODE must be `immediate` or `on_payment`, got `{value}`"
            ),
            ConfigError::InvalidCorsOrigin(value) => write!(
                f,
                "APP_CORS_ORIGINS entries must be http(s) origins, got `{value}`"
            ),
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::InvalidHost { source } => Some(source),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::env;
    use std::sync::{Mutex, OnceLock};

    fn env_guard() -> &'static Mutex<()> {
        static GUARD: OnceLock<Mutex<()>> = OnceLock::new();
        GUARD.get_or_init(|| Mutex::new(()))
    }

    const KEYS: [&str; 20] = [
        "APP_ENV",
        "APP_HOST",
        "APP_PORT",
        "APP_CORS_ORIGINS",
        "APP_LOG_LEVEL",
        "PREPPER_CATALOG_DIR",
        "PREPPER_DELIVERY_MODE",
        "PREPPER_ARTIFACT_DIR",
        "PREPPER_PRICE_CENTS",
        "PREPPER_SUCCESS_URL",
        "PREPPER_CANCEL_URL",
        "STRIPE_SECRET_KEY",
        "STRIPE_PUBLISHABLE_KEY",
        "STRIPE_WEBHOOK_SECRET",
        "STRIPE_API_BASE",
        "MAIL_SMTP_HOST",
        "MAIL_SMTP_PORT",
        "MAIL_USERNAME",
        "MAIL_PASSWORD",
        "MAIL_FROM",
    ];

    fn reset_env() {
        for key in KEYS {
            env::remove_var(key);
        }
    }

    #[test]
    fn load_uses_defaults_when_env_missing() {
        let _lock = env_guard().lock().expect("env mutex poisoned");
        reset_env();
        let config = AppConfig::load().expect("config loads with defaults");
        assert_eq!(config.environment, AppEnvironment::Development);
        assert_eq!(config.server.host, "127.0.0.1");
        assert_eq!(config.server.port, 3000);
        assert_eq!(config.telemetry.log_level, "info");
        assert!(matches!(config.catalog.source(), CatalogSource::Bundled));
        assert_eq!(config.delivery.mode, DeliveryMode::Immediate);
        assert_eq!(config.payment.price_cents, 599);
        assert_eq!(config.payment.api_base, "https://api.stripe.com");
        assert!(config.payment.secret_key.is_none());
        assert_eq!(config.mail.smtp_host, "smtp.gmail.com");
        assert_eq!(config.mail.smtp_port, 587);
        assert!(config.mail.credentials().is_none());
    }

    #[test]
    fn accepts_localhost_host() {
        let _lock = env_guard().lock().expect("env mutex poisoned");
        reset_env();
        env::set_var("APP_HOST", "localhost");
        let config = AppConfig::load().expect("config loads");
        let addr = config.server.socket_addr().expect("localhost resolves");
        assert_eq!(addr, SocketAddr::new(IpAddr::from([127, 0, 0, 1]), 3000));
        reset_env();
    }

    #[test]
    fn mail_sender_defaults_to_login() {
        let _lock = env_guard().lock().expect("env mutex poisoned");
        reset_env();
        env::set_var("MAIL_USERNAME", "guides@example.com");
        env::set_var("MAIL_PASSWORD", "app-password");
        let config = AppConfig::load().expect("config loads");
        assert_eq!(config.mail.from.as_deref(), Some("guides@example.com"));
        assert!(config.mail.credentials().is_some());
        reset_env();
    }

    #[test]
    fn rejects_unknown_delivery_mode() {
        let _lock = env_guard().lock().expect("env mutex poisoned");
        reset_env();
        env::set_var("PREPPER_DELIVERY_MODE", "carrier-pigeon");
        let error = AppConfig::load().expect_err("mode is rejected");
        assert!(matches!(error, ConfigError::InvalidDeliveryMode(_)));
        reset_env();
    }

    #[test]
    fn parses_cors_origin_list() {
        let _lock = env_guard().lock().expect("env mutex poisoned");
        reset_env();
        let config = AppConfig::load().expect("config loads");
        assert!(config.server.cors_origins.is_empty());

        env::set_var(
            "APP_CORS_ORIGINS",
            "https://ultimateprepperguide.org/, http://localhost:5173",
        );
        let config = AppConfig::load().expect("config loads");
        assert_eq!(
            config.server.cors_origins,
            vec![
                "https://ultimateprepperguide.org".to_string(),
                "http://localhost:5173".to_string()
            ]
        );

        env::set_var("APP_CORS_ORIGINS", "ultimateprepperguide.org");
        let error = AppConfig::load().expect_err("bare host is rejected");
        assert!(matches!(error, ConfigError::InvalidCorsOrigin(_)));
        reset_env();
    }

    #[test]
    fn parses_on_payment_mode_and_catalog_dir() {
        let _lock = env_guard().lock().expect("env mutex poisoned");
        reset_env();
        env::set_var("PREPPER_DELIVERY_MODE", "on_payment");
        env::set_var("PREPPER_CATALOG_DIR", "/srv/checklists");
        let config = AppConfig::load().expect("config loads");
        assert_eq!(config.delivery.mode, DeliveryMode::OnPayment);
        assert!(matches!(
            config.catalog.source(),
            CatalogSource::Directory(dir) if dir == PathBuf::from("/srv/checklists")
        ));
        reset_env();
    }

    #[test]
    fn rejects_zero_price() {
        let _lock = env_guard().lock().expect("env mutex poisoned");
        reset_env();
        env::set_var("PREPPER_PRICE_CENTS", "0");
        assert!(matches!(AppConfig::load(), Err(ConfigError::InvalidPrice)));
        reset_env();
    }
}
