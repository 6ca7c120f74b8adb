use std::env;

pub const DEFAULT_PORT: u16 = 8000;

/// Backend URL that selects the in-process store instead of DynamoDB.
pub const MEMORY_DATABASE_URL: &str = "memory://";

/// Process configuration read from the environment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub port: u16,
    /// DynamoDB endpoint URL, or `memory://`.
    pub database_url: Option<String>,
    /// DynamoDB table name.
    pub database_name: Option<String>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            port: DEFAULT_PORT,
            database_url: None,
            database_name: None,
        }
    }
}

impl AppConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|name| env::var(name).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let non_empty = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());
        Self {
            port: non_empty("PORT")
                .and_then(|v| v.trim().parse::<u16>().ok())
                .unwrap_or(DEFAULT_PORT),
            database_url: non_empty("DATABASE_URL"),
            database_name: non_empty("DATABASE_NAME"),
        }
    }

    /// Both variables are needed before a store connection is attempted.
    pub fn database(&self) -> Option<(&str, &str)> {
        match (&self.database_url, &self.database_name) {
            (Some(url), Some(name)) => Some((url.as_str(), name.as_str())),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config(vars: &[(&str, &str)]) -> AppConfig {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        AppConfig::from_lookup(|name| map.get(name).cloned())
    }

    #[test]
    fn defaults_without_environment() {
        assert_eq!(config(&[]), AppConfig::default());
        assert_eq!(config(&[]).database(), None);
    }

    #[test]
    fn reads_port_and_database() {
        let cfg = config(&[
            ("PORT", "9090"),
            ("DATABASE_URL", "http://localhost:8001"),
            ("DATABASE_NAME", "taskhub"),
        ]);
        assert_eq!(cfg.port, 9090);
        assert_eq!(cfg.database(), Some(("http://localhost:8001", "taskhub")));
    }

    #[test]
    fn bad_port_and_blank_values_fall_back() {
        let cfg = config(&[("PORT", "eighty"), ("DATABASE_URL", " "), ("DATABASE_NAME", "taskhub")]);
        assert_eq!(cfg.port, DEFAULT_PORT);
        assert_eq!(cfg.database_url, None);
        assert_eq!(cfg.database(), None);
    }
}
