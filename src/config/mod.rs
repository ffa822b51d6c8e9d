use std::env;

/// Config holds all application configuration
#[derive(Debug, Clone)]
pub struct Config {
    pub db_path: String,
    pub db_max_connections: u32,
    pub listen_addr: String,
    /// Insert the demo cabinets and hardware when the store is empty
    pub seed_fixtures: bool,
    /// Legacy PUT behavior: a hardware update without `service_date` clears it
    pub clear_service_date_on_omit: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            db_path: "inventory.db".to_string(),
            db_max_connections: 5,
            listen_addr: "0.0.0.0:5000".to_string(),
            seed_fixtures: true,
            clear_service_date_on_omit: false,
        }
    }
}

impl Config {
    /// Load configuration from environment variables with defaults
    pub fn load() -> Self {
        let defaults = Self::default();
        Self {
            db_path: get_env("DB_PATH", &defaults.db_path),
            db_max_connections: get_env("DB_MAX_CONNECTIONS", "5")
                .parse()
                .unwrap_or(defaults.db_max_connections),
            listen_addr: get_env("LISTEN_ADDR", &defaults.listen_addr),
            seed_fixtures: parse_bool(&get_env("SEED_FIXTURES", ""))
                .unwrap_or(defaults.seed_fixtures),
            clear_service_date_on_omit: parse_bool(&get_env("CLEAR_SERVICE_DATE_ON_OMIT", ""))
                .unwrap_or(defaults.clear_service_date_on_omit),
        }
    }
}

fn get_env(key: &str, default: &str) -> String {
    env::var(key).unwrap_or_else(|_| default.to_string())
}

fn parse_bool(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}
