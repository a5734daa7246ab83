use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{key} must be a port number, got {value:?}")]
    InvalidPort { key: &'static str, value: String },

    #[error("{key} must be a positive integer, got {value:?}")]
    InvalidPageSize { key: &'static str, value: String },
}

/// Server settings, read from the environment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub host: String,
    pub port: u16,
    pub db_path: String,
    pub page_size: usize,
    pub cors_origins: Vec<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 3000,
            db_path: "todos.db".to_string(),
            page_size: 10,
            cors_origins: vec!["*".to_string()],
        }
    }
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from an arbitrary key lookup; unset keys keep their defaults.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let mut config = Self::default();

        if let Some(host) = lookup("TODO_HOST") {
            config.host = host;
        }
        if let Some(value) = lookup("PORT") {
            config.port = value
                .trim()
                .parse()
                .map_err(|_| ConfigError::InvalidPort { key: "PORT", value })?;
        }
        if let Some(path) = lookup("TODO_DB_PATH") {
            config.db_path = path;
        }
        if let Some(value) = lookup("TODO_PAGE_SIZE") {
            config.page_size = match value.trim().parse::<usize>() {
                Ok(size) if size > 0 => size,
                _ => {
                    return Err(ConfigError::InvalidPageSize {
                        key: "TODO_PAGE_SIZE",
                        value,
                    })
                }
            };
        }
        if let Some(origins) = lookup("TODO_CORS_ORIGINS") {
            config.cors_origins = origins
                .split(',')
                .map(str::trim)
                .filter(|o| !o.is_empty())
                .map(String::from)
                .collect();
        }

        Ok(config)
    }

    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn defaults_when_unset() {
        let config = Config::from_lookup(lookup(&[])).unwrap();
        assert_eq!(config, Config::default());
        assert_eq!(config.bind_addr(), "127.0.0.1:3000");
    }

    #[test]
    fn reads_every_key() {
        let config = Config::from_lookup(lookup(&[
            ("TODO_HOST", "0.0.0.0"),
            ("PORT", "8000"),
            ("TODO_DB_PATH", ":memory:"),
            ("TODO_PAGE_SIZE", "25"),
            ("TODO_CORS_ORIGINS", "http://localhost:5173, http://127.0.0.1:5173"),
        ]))
        .unwrap();
        assert_eq!(config.bind_addr(), "0.0.0.0:8000");
        assert_eq!(config.db_path, ":memory:");
        assert_eq!(config.page_size, 25);
        assert_eq!(
            config.cors_origins,
            ["http://localhost:5173", "http://127.0.0.1:5173"]
        );
    }

    #[test]
    fn rejects_bad_numbers() {
        assert_eq!(
            Config::from_lookup(lookup(&[("PORT", "eighty")])).unwrap_err(),
            ConfigError::InvalidPort {
                key: "PORT",
                value: "eighty".to_string()
            }
        );
        assert!(matches!(
            Config::from_lookup(lookup(&[("TODO_PAGE_SIZE", "0")])),
            Err(ConfigError::InvalidPageSize { .. })
        ));
    }
}
