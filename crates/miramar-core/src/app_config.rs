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

/// Connection settings for the headless CMS.
///
/// Built once at startup and handed to the client; nothing in the retrieval
/// layer reads the process environment.
#[derive(Clone)]
pub struct CmsConfig {
    /// Base URL, e.g. `"http://localhost:1337"`. No trailing slash.
    pub host: String,
    /// Bearer token. Empty in local development, in which case no
    /// `Authorization` header is sent.
    pub token: String,
    /// Per-request timeout. `None` keeps the HTTP client's default behaviour.
    pub timeout_secs: Option<u64>,
    pub user_agent: String,
}

impl CmsConfig {
    /// Config for a local CMS with no token, e.g. a test server.
    #[must_use]
    pub fn local(host: &str) -> Self {
        Self {
            host: host.trim_end_matches('/').to_string(),
            token: String::new(),
            timeout_secs: None,
            user_agent: crate::config::DEFAULT_USER_AGENT.to_string(),
        }
    }

    /// Returns the token if one is configured.
    #[must_use]
    pub fn bearer_token(&self) -> Option<&str> {
        Some(self.token.as_str()).filter(|t| !t.trim().is_empty())
    }
}

impl std::fmt::Debug for CmsConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CmsConfig")
            .field("host", &self.host)
            .field("token", &self.bearer_token().map(|_| "[redacted]"))
            .field("timeout_secs", &self.timeout_secs)
            .field("user_agent", &self.user_agent)
            .finish()
    }
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub env: Environment,
    pub log_level: String,
    pub cms: CmsConfig,
    /// Phone number purchase links open a chat with.
    pub whatsapp_number: String,
    pub search_debounce_ms: u64,
}
