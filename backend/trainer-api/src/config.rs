use serde::Deserialize;
use std::env;

const DEV_SESSION_SECRET: &str = "dev-session-secret-only-for-local-testing";
const DEV_METRICS_AUTH: &str = "admin:changeme";

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub environment: String,
    pub bind_addr: String,
    pub session_secret: String,
    pub cookie_secure: bool,
    /// `username:password` for HTTP Basic auth on `/metrics`.
    pub metrics_auth: String,
    pub static_dir: String,
    pub otlp_endpoint: Option<String>,
}

impl Config {
    pub fn load() -> Result<Self, config::ConfigError> {
        // Root .env first, then the crate-local one
        let skip_root_env = env::var("SKIP_ROOT_ENV").is_ok();
        if skip_root_env {
            dotenvy::dotenv().ok();
        } else if dotenvy::from_path("../../.env").is_err() {
            dotenvy::dotenv().ok();
        }

        let environment = env::var("APP_ENV").unwrap_or_else(|_| "dev".to_string());
        let is_prod = environment == "prod";

        // config/*.toml + ENV overrides (prefix: APP_)
        let settings = config::Config::builder()
            .add_source(config::File::with_name(&format!("config/{}", environment)).required(false))
            .add_source(config::Environment::with_prefix("APP").separator("__"))
            .build()?;

        let bind_addr = settings
            .get_string("server.bind_addr")
            .or_else(|_| env::var("BIND_ADDR"))
            .unwrap_or_else(|_| "0.0.0.0:5000".to_string());

        let session_secret = match settings
            .get_string("session.secret")
            .or_else(|_| env::var("SESSION_SECRET"))
        {
            Ok(secret) => secret,
            Err(_) if is_prod => {
                return Err(config::ConfigError::Message(
                    "SESSION_SECRET must be set in production".to_string(),
                ));
            }
            Err(_) => {
                eprintln!("WARNING: Using default SESSION_SECRET (dev mode only!)");
                DEV_SESSION_SECRET.to_string()
            }
        };

        let metrics_auth = match settings
            .get_string("metrics.auth")
            .or_else(|_| env::var("METRICS_AUTH"))
        {
            Ok(credentials) => credentials,
            Err(_) if is_prod => {
                return Err(config::ConfigError::Message(
                    "METRICS_AUTH must be set in production".to_string(),
                ));
            }
            Err(_) => {
                eprintln!("WARNING: Using default METRICS_AUTH (dev mode only!)");
                DEV_METRICS_AUTH.to_string()
            }
        };

        let cookie_secure = match settings.get_bool("session.cookie_secure") {
            Ok(value) => value,
            Err(_) => env::var("COOKIE_SECURE")
                .ok()
                .map(|v| matches!(v.as_str(), "1" | "true" | "yes"))
                .unwrap_or(is_prod),
        };

        let static_dir = settings
            .get_string("assets.static_dir")
            .or_else(|_| env::var("STATIC_DIR"))
            .unwrap_or_else(|_| "static".to_string());

        let otlp_endpoint = settings
            .get_string("telemetry.otlp_endpoint")
            .or_else(|_| env::var("OTEL_EXPORTER_OTLP_ENDPOINT"))
            .ok()
            .filter(|v| !v.is_empty());

        Ok(Config {
            environment,
            bind_addr,
            session_secret,
            cookie_secure,
            metrics_auth,
            static_dir,
            otlp_endpoint,
        })
    }
}
