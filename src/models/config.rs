use serde::Deserialize;

/// Configuration options for the configurator service.
#[derive(Clone, Debug, Deserialize)]
pub struct ServerConfig {
    /// SQLite database path or URL.
    #[serde(default = "default_database_url")]
    pub database_url: String,
    /// Interface the HTTP server binds to.
    #[serde(default = "default_bind_address")]
    pub bind_address: String,
    #[serde(default = "default_port")]
    pub port: u16,
    /// Cookie signing key; a random key is generated when empty (sessions
    /// then reset on restart).
    #[serde(default)]
    pub session_secret: String,
}

fn default_database_url() -> String {
    "rigforge.db".to_string()
}

fn default_bind_address() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    8080
}
