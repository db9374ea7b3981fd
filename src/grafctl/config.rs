use std::path::PathBuf;

pub const DEFAULT_URL: &str = "http://play.grafana.org";
pub const DEFAULT_PATH: &str = ".";

pub const ENV_URL: &str = "GRAFANA_URL";
pub const ENV_API_KEY: &str = "GRAFANA_API_KEY";
pub const ENV_PATH: &str = "GRAFANA_PATH";
pub const ENV_HEADERS: &str = "GRAFANA_HEADERS";

/// Options that apply to every command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GlobalOptions {
    /// Service base URL
    pub url: String,
    /// API key, or `user:pass` for basic auth
    pub key: String,
    /// Local dashboard repository root
    pub path: PathBuf,
    /// Extra headers, `Name:Value,Name:Value`
    pub headers: String,
    pub verbose: bool,
}

impl Default for GlobalOptions {
    fn default() -> Self {
        Self {
            url: DEFAULT_URL.to_string(),
            key: String::new(),
            path: PathBuf::from(DEFAULT_PATH),
            headers: String::new(),
            verbose: false,
        }
    }
}

impl GlobalOptions {
    /// Fills options still at their default from the environment.
    ///
    /// An option given on the command line with its default value is treated
    /// as unset. Empty variables are ignored.
    pub fn apply_env<F>(mut self, lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |name: &str| lookup(name).filter(|v| !v.is_empty());

        if self.url == DEFAULT_URL {
            if let Some(url) = var(ENV_URL) {
                self.url = url;
            }
        }
        if self.key.is_empty() {
            if let Some(key) = var(ENV_API_KEY) {
                self.key = key;
            }
        }
        if self.headers.is_empty() {
            if let Some(headers) = var(ENV_HEADERS) {
                self.headers = headers;
            }
        }
        if self.path == PathBuf::from(DEFAULT_PATH) {
            if let Some(path) = var(ENV_PATH) {
                self.path = PathBuf::from(path);
            }
        }
        self
    }

    /// Resolves against the process environment.
    pub fn from_env(self) -> Self {
        self.apply_env(|name| std::env::var(name).ok())
    }
}
