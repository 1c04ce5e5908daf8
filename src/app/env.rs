use std::env;

use serde::Deserialize;

const DEFAULT_PORT: u16 = 3000;
const DEFAULT_MAX_CONNECTIONS: u32 = 10;
const DEFAULT_RATE_LIMIT_PER_SECOND: u64 = 50;

#[derive(Debug, Clone, Deserialize)]
pub struct Envy {
    #[serde(default = "default_app_env")]
    pub app_env: String,
    pub port: Option<u16>,

    pub database_url: Option<String>,
    pub database_max_connections: Option<u32>,
    pub run_migrations: Option<bool>,

    pub rate_limit_per_second: Option<u64>,
}

fn default_app_env() -> String {
    "development".to_string()
}

impl Envy {
    /// Loads `.env.{APP_ENV}` when present, then reads the process environment.
    pub fn load() -> Result<Self, envy::Error> {
        let app_env = env::var("APP_ENV").unwrap_or_else(|_| default_app_env());
        if let Err(e) = dotenvy::from_filename(format!(".env.{}", app_env)) {
            tracing::debug!("no dotenv file loaded for {}: {}", app_env, e);
        }

        envy::from_env::<Envy>()
    }

    pub fn port(&self) -> u16 {
        self.port.unwrap_or(DEFAULT_PORT)
    }

    pub fn database_max_connections(&self) -> u32 {
        self.database_max_connections
            .unwrap_or(DEFAULT_MAX_CONNECTIONS)
    }

    pub fn run_migrations(&self) -> bool {
        self.run_migrations.unwrap_or(true)
    }

    pub fn rate_limit_per_second(&self) -> u64 {
        self.rate_limit_per_second
            .unwrap_or(DEFAULT_RATE_LIMIT_PER_SECOND)
            .max(1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn from_pairs(pairs: &[(&str, &str)]) -> Envy {
        envy::from_iter(
            pairs
                .iter()
                .map(|(k, v)| (k.to_string(), v.to_string())),
        )
        .unwrap()
    }

    #[test]
    fn falls_back_to_defaults() {
        let envy = from_pairs(&[]);

        assert_eq!(envy.app_env, "development");
        assert_eq!(envy.port(), 3000);
        assert!(envy.database_url.is_none());
        assert_eq!(envy.database_max_connections(), 10);
        assert!(envy.run_migrations());
        assert_eq!(envy.rate_limit_per_second(), 50);
    }

    #[test]
    fn reads_uppercase_variables() {
        let envy = from_pairs(&[
            ("APP_ENV", "production"),
            ("PORT", "8080"),
            ("DATABASE_URL", "postgres://localhost/posts"),
            ("RUN_MIGRATIONS", "false"),
            ("RATE_LIMIT_PER_SECOND", "0"),
        ]);

        assert_eq!(envy.app_env, "production");
        assert_eq!(envy.port(), 8080);
        assert_eq!(
            envy.database_url.as_deref(),
            Some("postgres://localhost/posts")
        );
        assert!(!envy.run_migrations());
        assert_eq!(envy.rate_limit_per_second(), 1);
    }
}
