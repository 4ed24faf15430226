use serde::{Deserialize, Serialize};
use std::env;

use crate::core::strong_types::UserId;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub api: ApiConfig,
    pub server: ServerConfig,
    pub session: SessionConfig,
}

/// Where the views find the resource API.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    pub base_url: String,
}

/// Bind address and seed data of the resource API server.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub seed_path: Option<String>,
}

/// Identity the views act as when creating events.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionConfig {
    pub acting_user: UserId,
}

impl Config {
    pub fn from_env() -> anyhow::Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build from any key lookup; unset keys take their defaults.
    ///
    /// An unparseable `SERVER_PORT` falls back to 3000; an unparseable
    /// `ACTING_USER_ID` is an error.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> anyhow::Result<Self> {
        let acting_user = match lookup("ACTING_USER_ID") {
            Some(raw) => raw
                .trim()
                .parse::<i64>()
                .map(UserId::new)
                .map_err(|e| anyhow::anyhow!("ACTING_USER_ID must be an integer: {}", e))?,
            None => UserId::new(1),
        };

        Ok(Self {
            api: ApiConfig {
                base_url: lookup("EVENTS_API_URL")
                    .unwrap_or_else(|| "http://localhost:3000".to_string()),
            },
            server: ServerConfig {
                host: lookup("SERVER_HOST").unwrap_or_else(|| "127.0.0.1".to_string()),
                port: lookup("SERVER_PORT")
                    .unwrap_or_else(|| "3000".to_string())
                    .parse()
                    .unwrap_or(3000),
                seed_path: lookup("EVENTS_DB_PATH").filter(|p| !p.is_empty()),
            },
            session: SessionConfig { acting_user },
        })
    }

    pub fn server_address(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }
}
