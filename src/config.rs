use anyhow::Context;
use serde::Deserialize;

/// Yearly at 11:00 on 20 February (sec min hour day month weekday).
pub const DEFAULT_PURGE_CRON: &str = "0 0 11 20 2 *";

#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    pub database_url: String,
    pub db_max_connections: u32,
    pub host: String,
    pub port: u16,
    /// Seed the food catalog and the current week's menus at startup.
    pub seed_on_startup: bool,
    pub menu_purge_cron: String,
}

impl AppConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(var: impl Fn(&str) -> Option<String>) -> anyhow::Result<Self> {
        let database_url = var("DATABASE_URL").context("DATABASE_URL must be set")?;
        let db_max_connections = match var("DB_MAX_CONNECTIONS") {
            Some(v) => v.parse().context("DB_MAX_CONNECTIONS must be a number")?,
            None => 10,
        };
        let port = match var("APP_PORT") {
            Some(v) => v.parse().context("APP_PORT must be a port number")?,
            None => 8080,
        };
        let seed_on_startup = var("SEED_ON_STARTUP")
            .map(|v| matches!(v.trim().to_ascii_lowercase().as_str(), "1" | "true" | "yes"))
            .unwrap_or(true);

        Ok(Self {
            database_url,
            db_max_connections,
            host: var("APP_HOST").unwrap_or_else(|| "0.0.0.0".into()),
            port,
            seed_on_startup,
            menu_purge_cron: var("MENU_PURGE_CRON").unwrap_or_else(|| DEFAULT_PURGE_CRON.into()),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| vars.get(key).cloned()
    }

    #[test]
    fn defaults_apply_when_only_database_url_is_set() {
        let config = AppConfig::from_lookup(lookup(&[("DATABASE_URL", "postgres://db/kitchen")])).unwrap();
        assert_eq!(config.database_url, "postgres://db/kitchen");
        assert_eq!(config.db_max_connections, 10);
        assert_eq!(config.host, "0.0.0.0");
        assert_eq!(config.port, 8080);
        assert!(config.seed_on_startup);
        assert_eq!(config.menu_purge_cron, DEFAULT_PURGE_CRON);
    }

    #[test]
    fn overrides_are_read() {
        let config = AppConfig::from_lookup(lookup(&[
            ("DATABASE_URL", "postgres://db/kitchen"),
            ("DB_MAX_CONNECTIONS", "3"),
            ("APP_PORT", "9000"),
            ("SEED_ON_STARTUP", "false"),
            ("MENU_PURGE_CRON", "0 0 0 1 1 *"),
        ]))
        .unwrap();
        assert_eq!(config.db_max_connections, 3);
        assert_eq!(config.port, 9000);
        assert!(!config.seed_on_startup);
        assert_eq!(config.menu_purge_cron, "0 0 0 1 1 *");
    }

    #[test]
    fn missing_database_url_or_bad_port_fails() {
        assert!(AppConfig::from_lookup(lookup(&[])).is_err());
        assert!(AppConfig::from_lookup(lookup(&[
            ("DATABASE_URL", "postgres://db/kitchen"),
            ("APP_PORT", "eighty"),
        ]))
        .is_err());
    }
}
