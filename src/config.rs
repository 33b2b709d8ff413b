use std::{env, fmt::Display, str::FromStr};

use tracing::info;

/// Process configuration, loaded once in `main` and handed to the pool
/// constructor. No global database state.
#[derive(Clone, Debug)]
pub struct Config {
    pub database_url: String,
    pub bind_addr: String,
    pub port: u16,
    pub pool_size: u32,
}

impl Config {
    pub fn load() -> Self {
        Self {
            // Development falls back to a local file-backed database.
            database_url: try_load("DATABASE_URL", "development.db"),
            bind_addr: try_load("BIND_ADDR", "0.0.0.0"),
            port: try_load("PORT", "8080"),
            pool_size: try_load("DB_POOL_SIZE", "8"),
        }
    }
}

fn try_load<T: FromStr>(key: &str, default: &str) -> T
where
    T::Err: Display,
{
    env::var(key)
        .unwrap_or_else(|_| {
            info!("{key} not set, using default: {default}");
            default.to_string()
        })
        .parse()
        .unwrap_or_else(|e| panic!("Invalid {key} value: {e}"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_apply_when_env_is_empty() {
        let port: u16 = try_load("EXPLORER_MUSIC_UNSET_PORT", "8080");
        assert_eq!(port, 8080);
    }

    #[test]
    fn load_produces_development_database() {
        if env::var("DATABASE_URL").is_err() {
            let config = Config::load();
            assert_eq!(config.database_url, "development.db");
        }
    }
}
