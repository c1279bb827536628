use std::fmt;

use config::{Config, ConfigError, Environment, Map};
use serde::Deserialize;

use crate::error::{ArtifactError, Result};

pub const DEFAULT_HOST: &str = "localhost";
pub const DEFAULT_PORT: u16 = 5432;

const ENV_PREFIX: &str = "POSTGRES";

/// Required settings as (config key, environment variable), in reporting order.
const REQUIRED: [(&str, &str); 3] = [
    ("db", "POSTGRES_DB"),
    ("user", "POSTGRES_USER"),
    ("password", "POSTGRES_PASSWORD"),
];

/// Connection parameters for the artifact database.
#[derive(Deserialize, Clone, PartialEq, Eq)]
pub struct DbConfig {
    pub host: String,
    pub port: u16,
    #[serde(rename = "db")]
    pub database: String,
    pub user: String,
    pub password: String,
}

impl fmt::Debug for DbConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DbConfig")
            .field("host", &self.host)
            .field("port", &self.port)
            .field("database", &self.database)
            .field("user", &self.user)
            .field("password", &"<redacted>")
            .finish()
    }
}

impl DbConfig {
    /// Load `POSTGRES_*` settings from the process environment.
    pub fn from_env() -> Result<Self> {
        Self::load(Environment::with_prefix(ENV_PREFIX))
    }

    /// Load settings from an explicit set of variables instead of the process
    /// environment. Keys are full variable names, e.g. `POSTGRES_DB`.
    pub fn from_vars<I, K, V>(vars: I) -> Result<Self>
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        let source: Map<String, String> = vars
            .into_iter()
            .map(|(k, v)| (k.into(), v.into()))
            .collect();
        Self::load(Environment::with_prefix(ENV_PREFIX).source(Some(source)))
    }

    fn load(env: Environment) -> Result<Self> {
        let settings = Config::builder()
            .set_default("host", DEFAULT_HOST)?
            .set_default("port", i64::from(DEFAULT_PORT))?
            .add_source(env)
            .build()?;

        let mut missing = Vec::new();
        for (key, var) in REQUIRED {
            match settings.get_string(key) {
                Ok(_) => {}
                Err(ConfigError::NotFound(_)) => missing.push(var),
                Err(e) => return Err(e.into()),
            }
        }
        if !missing.is_empty() {
            return Err(ArtifactError::MissingEnv(missing));
        }

        let port = settings.get_string("port")?;
        if port.parse::<u16>().is_err() {
            return Err(ArtifactError::InvalidPort {
                var: "POSTGRES_PORT",
                value: port,
            });
        }

        let config: DbConfig = settings.try_deserialize()?;
        tracing::debug!(?config, "database configuration resolved");
        Ok(config)
    }
}
