use std::net::SocketAddr;
use std::path::PathBuf;

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

/// Where the canonical product list is read from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DefaultsSource {
    /// An `http://` or `https://` URL fetched once per load.
    Url(String),
    /// A JSON file on local disk.
    File(PathBuf),
}

impl DefaultsSource {
    #[must_use]
    pub fn parse(raw: &str) -> Self {
        let raw = raw.trim();
        if raw.starts_with("http://") || raw.starts_with("https://") {
            DefaultsSource::Url(raw.to_owned())
        } else {
            DefaultsSource::File(PathBuf::from(raw))
        }
    }
}

impl std::fmt::Display for DefaultsSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DefaultsSource::Url(url) => f.write_str(url),
            DefaultsSource::File(path) => write!(f, "{}", path.display()),
        }
    }
}

#[derive(Clone)]
pub struct AppConfig {
    pub env: Environment,
    pub bind_addr: SocketAddr,
    pub log_level: String,
    pub defaults_source: DefaultsSource,
    pub state_dir: PathBuf,
    pub storage_key: String,
    pub contact_endpoint: Option<String>,
    pub contact_email: String,
    pub http_timeout_secs: u64,
    pub user_agent: String,
}

impl std::fmt::Debug for AppConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppConfig")
            .field("env", &self.env)
            .field("bind_addr", &self.bind_addr)
            .field("log_level", &self.log_level)
            .field("defaults_source", &self.defaults_source)
            .field("state_dir", &self.state_dir)
            .field("storage_key", &self.storage_key)
            .field(
                "contact_endpoint",
                &self.contact_endpoint.as_ref().map(|_| "[redacted]"),
            )
            .field("contact_email", &self.contact_email)
            .field("http_timeout_secs", &self.http_timeout_secs)
            .field("user_agent", &self.user_agent)
            .finish()
    }
}
