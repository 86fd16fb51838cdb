/// Errors raised while reading configuration from the environment.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("{0} must be set")]
    Missing(&'static str),

    #[error("{key} has invalid value '{value}': {reason}")]
    Invalid {
        key: &'static str,
        value: String,
        reason: String,
    },
}

/// Server configuration loaded from environment variables.
///
/// All fields have defaults suitable for local development.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Bind address (default: `0.0.0.0`).
    pub host: String,
    /// Bind port (default: `8001`).
    pub port: u16,
    /// Cross-origin policy, parsed from comma-separated `CORS_ORIGINS`.
    pub cors: CorsPolicy,
    /// HTTP request timeout in seconds (default: `30`).
    pub request_timeout_secs: u64,
    /// Maximum number of entries returned by `GET /api/status` (default: `1000`).
    pub status_list_limit: usize,
    /// Maximum number of days returned by the progress history (default: `365`).
    pub history_limit: usize,
}

/// Document store connection settings.
#[derive(Debug, Clone)]
pub struct DatabaseConfig {
    pub url: String,
    pub name: String,
    pub max_connections: u32,
}

/// Which origins may call the API from a browser.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CorsPolicy {
    /// Any origin, method and header.
    Permissive,
    /// Only origins matching one of the patterns. Credentials allowed.
    AllowList(Vec<OriginPattern>),
}

/// One entry of an origin allow-list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OriginPattern {
    /// Matches the origin exactly, e.g. `http://localhost:3000`.
    Exact(String),
    /// `https://*.vercel.app`: any single or multi-level subdomain.
    Subdomain { scheme: String, suffix: String },
}

impl OriginPattern {
    pub fn parse(raw: &str) -> Result<Self, ConfigError> {
        let invalid = |reason: &str| ConfigError::Invalid {
            key: "CORS_ORIGINS",
            value: raw.to_string(),
            reason: reason.to_string(),
        };

        let (scheme, rest) = raw
            .split_once("://")
            .ok_or_else(|| invalid("origin must include a scheme"))?;
        if scheme.is_empty() || rest.is_empty() {
            return Err(invalid("origin must include a scheme and host"));
        }
        if rest.contains('/') {
            return Err(invalid("origin must not include a path"));
        }

        match rest.strip_prefix("*.") {
            Some(suffix) if !suffix.is_empty() && !suffix.contains('*') => {
                Ok(OriginPattern::Subdomain {
                    scheme: scheme.to_string(),
                    suffix: format!(".{suffix}"),
                })
            }
            Some(_) => Err(invalid("wildcard must be followed by a domain")),
            None if rest.contains('*') => Err(invalid("wildcard only allowed as '*.' prefix")),
            None => Ok(OriginPattern::Exact(raw.to_string())),
        }
    }

    pub fn matches(&self, origin: &str) -> bool {
        match self {
            OriginPattern::Exact(exact) => exact == origin,
            OriginPattern::Subdomain { scheme, suffix } => origin
                .strip_prefix(scheme.as_str())
                .and_then(|rest| rest.strip_prefix("://"))
                .and_then(|host| host.strip_suffix(suffix.as_str()))
                .is_some_and(|sub| !sub.is_empty() && !sub.contains('/')),
        }
    }
}

impl CorsPolicy {
    /// `*` or an empty list means permissive.
    pub fn parse(raw: &str) -> Result<Self, ConfigError> {
        let entries: Vec<&str> = raw
            .split(',')
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .collect();

        if entries.is_empty() || entries.contains(&"*") {
            return Ok(CorsPolicy::Permissive);
        }

        entries
            .into_iter()
            .map(OriginPattern::parse)
            .collect::<Result<Vec<_>, _>>()
            .map(CorsPolicy::AllowList)
    }

    pub fn allows(&self, origin: &str) -> bool {
        match self {
            CorsPolicy::Permissive => true,
            CorsPolicy::AllowList(patterns) => patterns.iter().any(|p| p.matches(origin)),
        }
    }
}

impl ServerConfig {
    /// Load configuration from the process environment.
    ///
    /// | Env Var                | Default   |
    /// |------------------------|-----------|
    /// | `HOST`                 | `0.0.0.0` |
    /// | `PORT`                 | `8001`    |
    /// | `CORS_ORIGINS`         | `*`       |
    /// | `REQUEST_TIMEOUT_SECS` | `30`      |
    /// | `STATUS_LIST_LIMIT`    | `1000`    |
    /// | `HISTORY_LIMIT`        | `365`     |
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_vars(|key| std::env::var(key).ok())
    }

    /// Load configuration through an arbitrary variable lookup.
    pub fn from_vars(var: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let host = var("HOST").unwrap_or_else(|| "0.0.0.0".into());
        let port = parse_or(&var, "PORT", 8001)?;
        let cors = CorsPolicy::parse(&var("CORS_ORIGINS").unwrap_or_else(|| "*".into()))?;
        let request_timeout_secs = parse_or(&var, "REQUEST_TIMEOUT_SECS", 30)?;
        let status_list_limit = parse_or(&var, "STATUS_LIST_LIMIT", 1000)?;
        let history_limit = parse_or(&var, "HISTORY_LIMIT", 365)?;

        Ok(Self {
            host,
            port,
            cors,
            request_timeout_secs,
            status_list_limit,
            history_limit,
        })
    }
}

impl DatabaseConfig {
    /// Load store settings from the process environment.
    ///
    /// | Env Var                    | Default         |
    /// |----------------------------|-----------------|
    /// | `DATABASE_URL`             | required        |
    /// | `DATABASE_NAME`            | `tyria_tracker` |
    /// | `DATABASE_MAX_CONNECTIONS` | `10`            |
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_vars(|key| std::env::var(key).ok())
    }

    pub fn from_vars(var: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let url = var("DATABASE_URL").ok_or(ConfigError::Missing("DATABASE_URL"))?;
        let name = var("DATABASE_NAME").unwrap_or_else(|| "tyria_tracker".into());
        let max_connections = parse_or(&var, "DATABASE_MAX_CONNECTIONS", 10)?;

        Ok(Self {
            url,
            name,
            max_connections,
        })
    }
}

fn parse_or<T>(
    var: &impl Fn(&str) -> Option<String>,
    key: &'static str,
    default: T,
) -> Result<T, ConfigError>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    match var(key) {
        None => Ok(default),
        Some(value) => value.trim().parse().map_err(|e: T::Err| ConfigError::Invalid {
            key,
            reason: e.to_string(),
            value,
        }),
    }
}
