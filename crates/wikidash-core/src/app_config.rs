use std::net::SocketAddr;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Environment {
    Development,
    Test,
    Production,
}

impl std::fmt::Display for Environment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Environment::Development => write!(f, "development"),
            Environment::Test => write!(f, "test"),
            Environment::Production => write!(f, "production"),
        }
    }
}

/// Runtime settings shared by the server and the CLI.
///
/// The two base URLs point at the upstream Wikipedia action API and the
/// Wikimedia per-article pageviews endpoint; tests override them to target a
/// mock server.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub env: Environment,
    pub bind_addr: SocketAddr,
    pub log_level: String,
    pub api_base_url: String,
    pub pageviews_base_url: String,
    pub request_timeout_secs: u64,
    pub user_agent: String,
}
