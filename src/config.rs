//! Service configuration read from the environment at startup.
//!
//! Settings are grouped by the component they configure: [`ProviderConfig`],
//! [`StoreConfig`] and [`CacheConfig`], plus listener and logging options on
//! [`Config`] itself. [`load_from_env`] reads and validates everything once.
//!
//! | Variable | Default | |
//! |---|---|---|
//! | `WEATHERAPI_KEY` | required | Provider API key |
//! | `WEATHERAPI_BASE_URL` | `http://api.weatherapi.com/v1` | |
//! | `WEATHERAPI_TIMEOUT_SECONDS` | `10` | Per-request timeout |
//! | `DATABASE_URL` | unset | PostgreSQL override store |
//! | `DB_HOST` `DB_PORT` `DB_USER` `DB_PASSWORD` `DB_NAME` | unset | Used when `DATABASE_URL` is absent and `DB_NAME` is set |
//! | `DB_MAX_CONNECTIONS` / `DB_CONNECT_TIMEOUT` | `10` / `30` | Pool settings |
//! | `REDIS_URL` | unset | Redis cache |
//! | `REDIS_HOST` `REDIS_PORT` `REDIS_PASSWORD` `REDIS_DB` | unset | Used when `REDIS_URL` is absent |
//! | `CACHE_BACKEND` | `redis` if Redis is configured, else `memory` | `redis`, `memory` or `none` |
//! | `CACHE_TTL_SECONDS` | `600` | |
//! | `LISTEN` | `0.0.0.0:3000` | |
//! | `RUST_LOG` | `info` | |
//! | `LOG_FORMAT` | `text` | `text` or `json` |
//!
//! Without a database the override store lives in memory and is lost on restart.

use anyhow::{Context, Result, anyhow, bail};
use std::env;
use std::fmt;
use std::net::SocketAddr;
use std::str::FromStr;
use url::Url;

use crate::infrastructure::provider::DEFAULT_BASE_URL;

/// Cache implementation selected at startup.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CacheBackend {
    Redis,
    Memory,
    None,
}

impl FromStr for CacheBackend {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "redis" => Ok(Self::Redis),
            "memory" => Ok(Self::Memory),
            "none" | "off" | "disabled" => Ok(Self::None),
            other => bail!("CACHE_BACKEND must be 'redis', 'memory' or 'none', got '{other}'"),
        }
    }
}

impl fmt::Display for CacheBackend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Redis => "redis",
            Self::Memory => "memory",
            Self::None => "none",
        })
    }
}

/// Log output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    Text,
    Json,
}

impl FromStr for LogFormat {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "text" => Ok(Self::Text),
            "json" => Ok(Self::Json),
            other => bail!("LOG_FORMAT must be 'text' or 'json', got '{other}'"),
        }
    }
}

/// Weather provider client settings.
#[derive(Debug, Clone)]
pub struct ProviderConfig {
    pub api_key: String,
    pub base_url: String,
    pub timeout_seconds: u64,
}

/// Override store settings. No URL means the in-memory store.
#[derive(Debug, Clone)]
pub struct StoreConfig {
    pub database_url: Option<String>,
    pub max_connections: u32,
    pub connect_timeout_seconds: u64,
}

/// Response cache settings.
#[derive(Debug, Clone)]
pub struct CacheConfig {
    pub backend: CacheBackend,
    pub redis_url: Option<String>,
    pub ttl_seconds: u64,
}

#[derive(Debug, Clone)]
pub struct Config {
    pub listen_addr: SocketAddr,
    pub provider: ProviderConfig,
    pub store: StoreConfig,
    pub cache: CacheConfig,
    /// Filter used when `RUST_LOG` cannot be parsed as an `EnvFilter`.
    pub log_level: String,
    pub log_format: LogFormat,
}

/// Reads `name`, falling back to `default` when unset. Set but unparsable is an error.
fn env_or<T>(name: &str, default: T) -> Result<T>
where
    T: FromStr,
    T::Err: fmt::Display,
{
    match env::var(name) {
        Ok(raw) => raw
            .trim()
            .parse()
            .map_err(|e| anyhow!("{name} has invalid value '{raw}': {e}")),
        Err(_) => Ok(default),
    }
}

impl Config {
    /// Reads the configuration without validating it.
    ///
    /// # Errors
    ///
    /// Fails if `WEATHERAPI_KEY` is unset, a numeric or enum variable cannot be
    /// parsed, or the database is configured by components with credentials missing.
    pub fn from_env() -> Result<Self> {
        let provider = ProviderConfig {
            api_key: env::var("WEATHERAPI_KEY").context("WEATHERAPI_KEY must be set")?,
            base_url: env::var("WEATHERAPI_BASE_URL")
                .unwrap_or_else(|_| DEFAULT_BASE_URL.to_string()),
            timeout_seconds: env_or("WEATHERAPI_TIMEOUT_SECONDS", 10)?,
        };

        let store = StoreConfig {
            database_url: database_url_from_env()?,
            max_connections: env_or("DB_MAX_CONNECTIONS", 10)?,
            connect_timeout_seconds: env_or("DB_CONNECT_TIMEOUT", 30)?,
        };

        let redis_url = redis_url_from_env()?;
        let default_backend = if redis_url.is_some() {
            CacheBackend::Redis
        } else {
            CacheBackend::Memory
        };
        let cache = CacheConfig {
            backend: env_or("CACHE_BACKEND", default_backend)?,
            redis_url,
            ttl_seconds: env_or("CACHE_TTL_SECONDS", 600)?,
        };

        let listen = env::var("LISTEN").unwrap_or_else(|_| "0.0.0.0:3000".to_string());
        let listen_addr = listen
            .parse()
            .with_context(|| format!("LISTEN must be 'host:port', got '{listen}'"))?;

        Ok(Self {
            listen_addr,
            provider,
            store,
            cache,
            log_level: env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
            log_format: env_or("LOG_FORMAT", LogFormat::Text)?,
        })
    }

    /// Checks values that parse but cannot work.
    pub fn validate(&self) -> Result<()> {
        if self.provider.api_key.trim().is_empty() {
            bail!("WEATHERAPI_KEY must not be empty");
        }
        require_scheme(
            "WEATHERAPI_BASE_URL",
            &self.provider.base_url,
            &["http", "https"],
        )?;
        if self.provider.timeout_seconds == 0 {
            bail!("WEATHERAPI_TIMEOUT_SECONDS must be greater than 0");
        }

        if let Some(url) = &self.store.database_url {
            require_scheme("DATABASE_URL", url, &["postgres", "postgresql"])?;
        }
        if self.store.max_connections == 0 {
            bail!("DB_MAX_CONNECTIONS must be at least 1");
        }
        if self.store.connect_timeout_seconds == 0 {
            bail!("DB_CONNECT_TIMEOUT must be greater than 0");
        }

        if let Some(url) = &self.cache.redis_url {
            require_scheme("REDIS_URL", url, &["redis", "rediss"])?;
        }
        if self.cache.backend == CacheBackend::Redis && self.cache.redis_url.is_none() {
            bail!("CACHE_BACKEND=redis requires REDIS_URL or REDIS_HOST");
        }
        if self.cache.ttl_seconds == 0 {
            bail!("CACHE_TTL_SECONDS must be greater than 0");
        }

        Ok(())
    }

    /// Logs the effective configuration with credentials masked.
    pub fn print_summary(&self) {
        tracing::info!("Configuration loaded:");
        tracing::info!("  Listen address: {}", self.listen_addr);
        tracing::info!(
            "  Weather provider: {} (timeout {}s)",
            self.provider.base_url,
            self.provider.timeout_seconds
        );

        match &self.store.database_url {
            Some(url) => tracing::info!("  Override store: {}", mask_password(url)),
            None => tracing::info!("  Override store: in-memory"),
        }

        match (self.cache.backend, &self.cache.redis_url) {
            (CacheBackend::Redis, Some(url)) => tracing::info!(
                "  Cache: redis {} (TTL {}s)",
                mask_password(url),
                self.cache.ttl_seconds
            ),
            (backend, _) => tracing::info!("  Cache: {} (TTL {}s)", backend, self.cache.ttl_seconds),
        }

        tracing::info!("  Log: {} ({:?})", self.log_level, self.log_format);
    }
}

fn require_scheme(name: &str, raw: &str, allowed: &[&str]) -> Result<()> {
    let url = Url::parse(raw).with_context(|| format!("{name} is not a valid URL"))?;
    if !allowed.contains(&url.scheme()) {
        bail!(
            "{name} must use one of {:?}, got '{}'",
            allowed,
            mask_password(raw)
        );
    }
    Ok(())
}

/// `DATABASE_URL`, or a URL assembled from `DB_*` parts when `DB_NAME` is set.
fn database_url_from_env() -> Result<Option<String>> {
    if let Ok(url) = env::var("DATABASE_URL") {
        return Ok(Some(url));
    }
    let Ok(name) = env::var("DB_NAME") else {
        return Ok(None);
    };

    let user = env::var("DB_USER").context("DB_USER must be set when DB_NAME is provided")?;
    let password =
        env::var("DB_PASSWORD").context("DB_PASSWORD must be set when DB_NAME is provided")?;

    let url = build_url(
        "postgres",
        &env::var("DB_HOST").unwrap_or_else(|_| "localhost".to_string()),
        env_or("DB_PORT", 5432)?,
        Some(&user),
        Some(&password),
        &name,
    )?;
    Ok(Some(url))
}

/// `REDIS_URL`, or a URL assembled from `REDIS_*` parts when `REDIS_HOST` is set.
fn redis_url_from_env() -> Result<Option<String>> {
    if let Ok(url) = env::var("REDIS_URL") {
        return Ok(Some(url));
    }
    let Ok(host) = env::var("REDIS_HOST") else {
        return Ok(None);
    };

    let password = env::var("REDIS_PASSWORD").ok().filter(|p| !p.is_empty());
    let db = env::var("REDIS_DB").unwrap_or_else(|_| "0".to_string());

    let url = build_url(
        "redis",
        &host,
        env_or("REDIS_PORT", 6379)?,
        None,
        password.as_deref(),
        &db,
    )?;
    Ok(Some(url))
}

fn build_url(
    scheme: &str,
    host: &str,
    port: u16,
    user: Option<&str>,
    password: Option<&str>,
    path: &str,
) -> Result<String> {
    let mut url = Url::parse(&format!("{scheme}://{host}:{port}"))
        .with_context(|| format!("invalid host '{host}'"))?;
    url.set_path(path);

    let credentials_ok =
        url.set_username(user.unwrap_or("")).is_ok() && url.set_password(password).is_ok();
    if !credentials_ok {
        bail!("cannot set credentials on {scheme} URL");
    }

    Ok(url.to_string())
}

/// Replaces the password of a connection URL with `***`.
fn mask_password(raw: &str) -> String {
    match Url::parse(raw) {
        Ok(mut url) if url.password().is_some() => {
            let _ = url.set_password(Some("***"));
            url.to_string()
        }
        _ => raw.to_string(),
    }
}

/// Reads and validates configuration. Expects `.env` to be loaded already.
pub fn load_from_env() -> Result<Config> {
    let config = Config::from_env()?;
    config.validate()?;
    Ok(config)
}
