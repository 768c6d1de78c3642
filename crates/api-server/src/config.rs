//! Environment-driven configuration

use std::net::SocketAddr;
use std::path::PathBuf;

use taskdeck_core::auth::User;

use crate::latency::LatencyProfile;

const DEFAULT_USERNAME: &str = "test";
const DEFAULT_PASSWORD: &str = "test123";
const DEFAULT_JWT_SECRET: &str = "dev-jwt-secret-change-me";
const DEFAULT_TOKEN_TTL_HOURS: i64 = 24;
const DEFAULT_PORT: u16 = 8081;

fn env_flag(name: &str, default: bool) -> bool {
    match std::env::var(name) {
        Ok(raw) => match raw.trim().to_ascii_lowercase().as_str() {
            "1" | "true" | "yes" | "on" => true,
            "0" | "false" | "no" | "off" => false,
            _ => default,
        },
        Err(_) => default,
    }
}

fn env_string(name: &str) -> Option<String> {
    std::env::var(name)
        .ok()
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
}

fn env_parse<T: std::str::FromStr>(name: &str) -> Option<T> {
    env_string(name).and_then(|value| value.parse().ok())
}

/// Behaviour of the mock API itself
#[derive(Debug, Clone)]
pub struct ApiConfig {
    /// The single account accepted by `/api/login`
    pub username: String,
    pub password: String,
    pub user: User,
    pub jwt_secret: String,
    pub token_ttl_hours: i64,
    /// When set, bearer tokens must verify as tokens issued by this server
    pub strict_tokens: bool,
    pub latency: LatencyProfile,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            username: DEFAULT_USERNAME.to_string(),
            password: DEFAULT_PASSWORD.to_string(),
            user: User {
                id: "1".to_string(),
                username: DEFAULT_USERNAME.to_string(),
                email: "test@example.com".to_string(),
            },
            jwt_secret: DEFAULT_JWT_SECRET.to_string(),
            token_ttl_hours: DEFAULT_TOKEN_TTL_HOURS,
            strict_tokens: false,
            latency: LatencyProfile::default(),
        }
    }
}

impl ApiConfig {
    /// Defaults overridden by `TASKDECK_*` environment variables
    pub fn from_env() -> Self {
        let mut config = Self::default();

        if let Some(username) = env_string("TASKDECK_USERNAME") {
            config.user.username = username.clone();
            config.username = username;
        }
        if let Some(password) = env_string("TASKDECK_PASSWORD") {
            config.password = password;
        }
        if let Some(secret) = env_string("TASKDECK_JWT_SECRET") {
            config.jwt_secret = secret;
        }
        if let Some(hours) = env_parse::<i64>("TASKDECK_TOKEN_TTL_HOURS") {
            config.token_ttl_hours = hours.max(1);
        }
        if let Some(scale) = env_parse::<f64>("TASKDECK_LATENCY_SCALE") {
            config.latency = LatencyProfile::scaled(scale);
        }
        config.strict_tokens = env_flag("TASKDECK_STRICT_TOKENS", false);

        config
    }

    /// Disable simulated latency
    pub fn without_latency(mut self) -> Self {
        self.latency = LatencyProfile::none();
        self
    }

    /// Require tokens issued by this server
    pub fn with_strict_tokens(mut self) -> Self {
        self.strict_tokens = true;
        self
    }
}

/// Where the standalone server listens and keeps its data
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub data_dir: PathBuf,
    pub port: u16,
}

impl ServerConfig {
    pub fn from_env() -> Self {
        Self {
            data_dir: env_string("TASKDECK_DATA_DIR")
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from(".taskdeck-data")),
            port: env_parse("TASKDECK_PORT").unwrap_or(DEFAULT_PORT),
        }
    }

    pub fn store_path(&self) -> PathBuf {
        self.data_dir.join("store.json")
    }

    pub fn addr(&self) -> SocketAddr {
        SocketAddr::from(([0, 0, 0, 0], self.port))
    }
}
