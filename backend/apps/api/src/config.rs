//! Server configuration from the environment

use std::env;
use std::net::SocketAddr;
use std::str::FromStr;
use std::time::Duration;

use anyhow::{Context, bail};
use auth::AuthConfig;
use platform::crypto;

const DEFAULT_BIND_ADDR: &str = "0.0.0.0:31113";
const DEFAULT_FRONTEND_ORIGINS: &str = "http://localhost:40922,http://127.0.0.1:40922";

/// Storage backend selected with `STORAGE`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StorageKind {
    Postgres,
    Memory,
}

impl FromStr for StorageKind {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "postgres" | "postgresql" => Ok(Self::Postgres),
            "memory" => Ok(Self::Memory),
            other => bail!("Unknown STORAGE backend: {other}"),
        }
    }
}

#[derive(Debug)]
pub struct ApiConfig {
    pub storage: StorageKind,
    pub database_url: Option<String>,
    pub database_max_connections: u32,
    pub auth: AuthConfig,
    pub bind_addr: SocketAddr,
    pub frontend_origins: Vec<String>,
}

impl ApiConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build from an arbitrary key lookup
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> anyhow::Result<Self> {
        let storage = match lookup("STORAGE") {
            Some(value) => value.parse()?,
            None => StorageKind::Postgres,
        };

        let database_url = lookup("DATABASE_URL");
        if storage == StorageKind::Postgres && database_url.is_none() {
            bail!("DATABASE_URL must be set in environment");
        }

        let database_max_connections = parse_or(&lookup, "DATABASE_MAX_CONNECTIONS", 5)?;

        let mut auth = match lookup("JWT_SECRET") {
            Some(secret_b64) => {
                let secret =
                    crypto::from_base64(&secret_b64).context("JWT_SECRET must be base64")?;
                if secret.is_empty() {
                    bail!("JWT_SECRET must not be empty");
                }
                AuthConfig::with_secret(secret)
            }
            None if cfg!(debug_assertions) => {
                tracing::warn!("JWT_SECRET not set, using a random development secret");
                AuthConfig::development()
            }
            None => bail!("JWT_SECRET must be set in production"),
        };
        auth.jwt_expiration = Duration::from_secs(parse_or(&lookup, "JWT_EXPIRATION_SECS", 300)?);
        auth.jwt_refresh_expiration =
            Duration::from_secs(parse_or(&lookup, "JWT_REFRESH_EXPIRATION_SECS", 604_800)?);

        let bind_addr = lookup("BIND_ADDR")
            .unwrap_or_else(|| DEFAULT_BIND_ADDR.to_string())
            .parse()
            .context("BIND_ADDR must be host:port")?;

        let frontend_origins = lookup("FRONTEND_ORIGINS")
            .unwrap_or_else(|| DEFAULT_FRONTEND_ORIGINS.to_string())
            .split(',')
            .map(str::trim)
            .filter(|origin| !origin.is_empty())
            .map(str::to_string)
            .collect();

        Ok(Self {
            storage,
            database_url,
            database_max_connections,
            auth,
            bind_addr,
            frontend_origins,
        })
    }
}

fn parse_or<T>(lookup: &impl Fn(&str) -> Option<String>, key: &str, default: T) -> anyhow::Result<T>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match lookup(key) {
        Some(value) => value
            .trim()
            .parse()
            .with_context(|| format!("{key} has an invalid value")),
        None => Ok(default),
    }
}
