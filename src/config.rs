//! Runtime settings from environment variables (a `.env` file is honoured).

use crate::error::ConfigError;
use std::net::SocketAddr;
use std::path::PathBuf;

pub const DEFAULT_BIND_ADDR: &str = "127.0.0.1:5555";
pub const DEFAULT_MAX_CONNECTIONS: u32 = 5;

#[derive(Clone, Debug)]
pub struct DatabaseSettings {
    pub url: String,
    pub max_connections: u32,
}

/// Which [`crate::store::Store`] backs the API.
#[derive(Clone, Debug)]
pub enum StoreSettings {
    Postgres(DatabaseSettings),
    /// Seed file with restaurants and pizzas, loaded at startup.
    Memory { seed_path: Option<PathBuf> },
}

#[derive(Clone, Debug)]
pub struct Settings {
    pub bind_addr: SocketAddr,
    pub store: StoreSettings,
}

impl Settings {
    /// Read `BIND_ADDR`, `STORE`, `DATABASE_URL`, `DATABASE_MAX_CONNECTIONS` and `SEED_PATH`.
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());

        let bind_addr: SocketAddr = get("BIND_ADDR")
            .unwrap_or_else(|| DEFAULT_BIND_ADDR.into())
            .parse()
            .map_err(|e: std::net::AddrParseError| ConfigError::Invalid {
                key: "BIND_ADDR",
                message: e.to_string(),
            })?;

        let store = match get("STORE").as_deref().unwrap_or("postgres") {
            "postgres" => {
                let url = get("DATABASE_URL").ok_or(ConfigError::Missing("DATABASE_URL"))?;
                let max_connections = match get("DATABASE_MAX_CONNECTIONS") {
                    Some(v) => v.parse().map_err(|e: std::num::ParseIntError| ConfigError::Invalid {
                        key: "DATABASE_MAX_CONNECTIONS",
                        message: e.to_string(),
                    })?,
                    None => DEFAULT_MAX_CONNECTIONS,
                };
                StoreSettings::Postgres(DatabaseSettings { url, max_connections })
            }
            "memory" => StoreSettings::Memory {
                seed_path: get("SEED_PATH").map(PathBuf::from),
            },
            other => {
                return Err(ConfigError::Invalid {
                    key: "STORE",
                    message: format!("{} (expected postgres or memory)", other),
                })
            }
        };

        Ok(Settings { bind_addr, store })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn settings(vars: &[(&str, &str)]) -> Result<Settings, ConfigError> {
        let map: HashMap<String, String> = vars.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect();
        Settings::from_lookup(|k| map.get(k).cloned())
    }

    #[test]
    fn postgres_requires_url() {
        let err = settings(&[]).unwrap_err();
        assert!(matches!(err, ConfigError::Missing("DATABASE_URL")));
    }

    #[test]
    fn postgres_defaults() {
        let s = settings(&[("DATABASE_URL", "postgres://localhost/pizza")]).unwrap();
        assert_eq!(s.bind_addr, DEFAULT_BIND_ADDR.parse::<SocketAddr>().unwrap());
        match s.store {
            StoreSettings::Postgres(db) => {
                assert_eq!(db.url, "postgres://localhost/pizza");
                assert_eq!(db.max_connections, DEFAULT_MAX_CONNECTIONS);
            }
            other => panic!("unexpected store: {:?}", other),
        }
    }

    #[test]
    fn memory_store_with_seed() {
        let s = settings(&[("STORE", "memory"), ("SEED_PATH", "seed.json"), ("BIND_ADDR", "0.0.0.0:8080")]).unwrap();
        assert_eq!(s.bind_addr.port(), 8080);
        match s.store {
            StoreSettings::Memory { seed_path } => assert_eq!(seed_path, Some(PathBuf::from("seed.json"))),
            other => panic!("unexpected store: {:?}", other),
        }
    }

    #[test]
    fn invalid_values_are_reported() {
        assert!(matches!(
            settings(&[("STORE", "redis")]).unwrap_err(),
            ConfigError::Invalid { key: "STORE", .. }
        ));
        assert!(matches!(
            settings(&[("STORE", "memory"), ("BIND_ADDR", "nope")]).unwrap_err(),
            ConfigError::Invalid { key: "BIND_ADDR", .. }
        ));
        assert!(matches!(
            settings(&[("DATABASE_URL", "postgres://x/y"), ("DATABASE_MAX_CONNECTIONS", "many")]).unwrap_err(),
            ConfigError::Invalid {
                key: "DATABASE_MAX_CONNECTIONS",
                ..
            }
        ));
    }
}
