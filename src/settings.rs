//! Layered configuration: defaults, then an optional file, then `SGPA__*`
//! environment variables.

use config::builder::DefaultState;
use config::{Config, ConfigBuilder, Environment, File, FileFormat};
use serde::Deserialize;

use crate::error::Result;
use crate::persist::PersistenceMode;

pub const CONFIG_PATH_VAR: &str = "SGPA_CONFIG";
pub const DEFAULT_CONFIG_FILE: &str = "sgpa";
pub const IN_MEMORY: &str = ":memory:";

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ServerSettings {
    pub bind: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct DatabaseSettings {
    pub path: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct LogSettings {
    pub filter: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Settings {
    pub server: ServerSettings,
    pub database: DatabaseSettings,
    pub log: LogSettings,
}

fn defaults() -> Result<ConfigBuilder<DefaultState>> {
    Ok(Config::builder()
        .set_default("server.bind", "127.0.0.1:8000")?
        .set_default("database.path", "sgpa.db")?
        .set_default("log.filter", "sgpa=info,tower_http=info")?)
}

impl Settings {
    /// Reads the file named by `SGPA_CONFIG` (or `sgpa.*` in the working
    /// directory) when present, then applies the environment.
    pub fn load() -> Result<Self> {
        let path = std::env::var(CONFIG_PATH_VAR).unwrap_or_else(|_| DEFAULT_CONFIG_FILE.to_string());
        Self::load_from(&path)
    }

    pub fn load_from(path: &str) -> Result<Self> {
        let settings = defaults()?
            .add_source(File::with_name(path).required(false))
            .add_source(Environment::with_prefix("SGPA").prefix_separator("__").separator("__"))
            .build()?
            .try_deserialize()?;
        Ok(settings)
    }

    pub fn from_toml(text: &str) -> Result<Self> {
        let settings = defaults()?
            .add_source(File::from_str(text, FileFormat::Toml))
            .build()?
            .try_deserialize()?;
        Ok(settings)
    }

    pub fn persistence_mode(&self) -> PersistenceMode {
        if self.database.path == IN_MEMORY {
            PersistenceMode::InMemory
        } else {
            PersistenceMode::File(self.database.path.clone())
        }
    }
}
