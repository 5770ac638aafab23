use std::env;
use std::fmt;

use sqlx::postgres::PgConnectOptions;

const DEFAULT_HOST: &str = "127.0.0.1";
const DEFAULT_PORT: u16 = 8080;
const DEFAULT_DB_PORT: u16 = 5432;
const DEFAULT_MAX_CONNECTIONS: u32 = 5;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppEnv {
    Dev,
    Qc,
    Prod,
}

impl AppEnv {
    fn parse(value: &str) -> Option<Self> {
        match value.to_lowercase().as_str() {
            "dev" => Some(AppEnv::Dev),
            "qc" => Some(AppEnv::Qc),
            "prod" => Some(AppEnv::Prod),
            _ => None,
        }
    }

    /// Prefix of the per-environment database variables, e.g. `QC_DB_HOST`.
    fn var_prefix(self) -> &'static str {
        match self {
            AppEnv::Dev => "DEV",
            AppEnv::Qc => "QC",
            AppEnv::Prod => "PROD",
        }
    }
}

impl fmt::Display for AppEnv {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.var_prefix().to_lowercase())
    }
}

#[derive(Debug)]
pub enum ConfigError {
    UnknownEnvironment(String),
    Missing(String),
    Invalid { name: String, value: String },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::UnknownEnvironment(env) => write!(f, "Unknown environment: {}", env),
            ConfigError::Missing(name) => write!(f, "{} must be set", name),
            ConfigError::Invalid { name, value } => write!(f, "Invalid value for {}: {}", name, value),
        }
    }
}

impl std::error::Error for ConfigError {}

#[derive(Debug, Clone)]
pub struct Config {
    pub app_env: AppEnv,
    pub connect_options: PgConnectOptions,
    pub host: String,
    pub port: u16,
    pub max_connections: u32,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let app_env = match lookup("APP_ENV") {
            Some(value) => AppEnv::parse(&value).ok_or(ConfigError::UnknownEnvironment(value))?,
            None => AppEnv::Dev,
        };

        let connect_options = match lookup("DATABASE_URL").filter(|url| !url.is_empty()) {
            Some(url) => url.parse::<PgConnectOptions>().map_err(|_| ConfigError::Invalid {
                name: "DATABASE_URL".to_string(),
                value: url,
            })?,
            None => connect_options_for(app_env, &lookup)?,
        };

        let host = lookup("HOST").unwrap_or_else(|| DEFAULT_HOST.to_string());
        let port = parse_or(&lookup, "PORT", DEFAULT_PORT)?;
        let max_connections = parse_or(&lookup, "DB_MAX_CONNECTIONS", DEFAULT_MAX_CONNECTIONS)?;

        Ok(Config {
            app_env,
            connect_options,
            host,
            port,
            max_connections,
        })
    }

    pub fn bind_address(&self) -> (String, u16) {
        (self.host.clone(), self.port)
    }
}

/// Assembles options from the `<ENV>_DB_*` variables. Credentials are passed
/// as-is, never spliced into a URL.
fn connect_options_for<F>(app_env: AppEnv, lookup: &F) -> Result<PgConnectOptions, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    let prefix = app_env.var_prefix();
    let required = |suffix: &str| {
        let name = format!("{}_DB_{}", prefix, suffix);
        lookup(&name).ok_or(ConfigError::Missing(name))
    };

    let user = required("USER")?;
    let password = required("PASSWORD")?;
    let host = required("HOST")?;
    let name = required("NAME")?;
    let port = parse_or(lookup, &format!("{}_DB_PORT", prefix), DEFAULT_DB_PORT)?;

    Ok(PgConnectOptions::new()
        .host(&host)
        .port(port)
        .username(&user)
        .password(&password)
        .database(&name))
}

fn parse_or<F, T>(lookup: &F, name: &str, default: T) -> Result<T, ConfigError>
where
    F: Fn(&str) -> Option<String>,
    T: std::str::FromStr,
{
    match lookup(name) {
        Some(value) => value.parse().map_err(|_| ConfigError::Invalid {
            name: name.to_string(),
            value,
        }),
        None => Ok(default),
    }
}
