use clap::{Parser, ValueEnum};
use grafctl::config::{GlobalOptions, DEFAULT_PATH, DEFAULT_URL};
use std::path::PathBuf;

/// Returns the version string, with git ref and commit date for non-release builds.
/// Format: "0.1.5" for releases, "0.1.5@abc1234 2024-01-15 14:30" otherwise
pub fn get_version() -> &'static str {
    const VERSION: &str = env!("CARGO_PKG_VERSION");
    const GIT_REF: &str = env!("GRAFCTL_GIT_REF");
    const BUILD_DATE: &str = env!("GRAFCTL_BUILD_DATE");
    const IS_RELEASE: &str = env!("GRAFCTL_IS_RELEASE");

    use std::sync::OnceLock;
    static VERSION_STRING: OnceLock<String> = OnceLock::new();

    VERSION_STRING.get_or_init(|| {
        if IS_RELEASE == "true" || GIT_REF.is_empty() {
            VERSION.to_string()
        } else {
            format!("{}@{} {}", VERSION, GIT_REF, BUILD_DATE)
        }
    })
}

/// Global options. Everything from the first positional on belongs to the command.
#[derive(Parser, Debug)]
#[command(
    name = "grafctl",
    bin_name = "grafctl",
    version = get_version(),
    disable_help_flag = true
)]
#[command(about = "Backup/restore utility for Grafana dashboards", long_about = None)]
pub struct Cli {
    /// Turn on verbose output
    #[arg(short, long)]
    pub verbose: bool,

    /// Grafana base URL (or set GRAFANA_URL)
    #[arg(long, value_name = "URL", default_value = DEFAULT_URL)]
    pub url: String,

    /// Grafana API key, or user:pass for basic auth (or set GRAFANA_API_KEY)
    #[arg(long, value_name = "KEY", default_value = "")]
    pub key: String,

    /// Path to local dashboard repository (or set GRAFANA_PATH)
    #[arg(long, value_name = "DIR", default_value = DEFAULT_PATH)]
    pub path: PathBuf,

    /// Comma-separated list of extra headers to pass,
    /// e.g. "X-User:foo,X-Grafana-Org-Id:1" (or set GRAFANA_HEADERS)
    #[arg(long, value_name = "HEADERS", default_value = "")]
    pub headers: String,

    /// Print help
    #[arg(short, long)]
    pub help: bool,

    /// Command to run, followed by its own options and arguments
    #[arg(
        value_name = "COMMAND",
        trailing_var_arg = true,
        allow_hyphen_values = true
    )]
    pub args: Vec<String>,
}

impl Cli {
    pub fn global_options(&self) -> GlobalOptions {
        GlobalOptions {
            url: self.url.clone(),
            key: self.key.clone(),
            path: self.path.clone(),
            headers: self.headers.clone(),
            verbose: self.verbose,
        }
    }
}

#[derive(Parser, Debug)]
#[command(name = "get")]
pub struct GetOptions {
    /// Path to save files in (default is the repository path)
    #[arg(long, value_name = "DIR")]
    pub path: Option<PathBuf>,

    /// Dashboards to retrieve, by slug
    #[arg(value_name = "DASHBOARD")]
    pub dashboards: Vec<String>,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
pub enum ListFormat {
    Short,
    Long,
    Json,
}

#[derive(Parser, Debug)]
#[command(name = "list")]
pub struct ListOptions {
    /// List format
    #[arg(long, value_enum, default_value_t = ListFormat::Short)]
    pub format: ListFormat,
}

#[derive(Parser, Debug)]
#[command(name = "push")]
pub struct PushOptions {
    /// Path to read files from (default is the repository path)
    #[arg(long, value_name = "DIR")]
    pub path: Option<PathBuf>,

    /// Overwrite existing dashboards
    #[arg(long)]
    pub overwrite: bool,

    /// Dashboards to push, by slug
    #[arg(value_name = "DASHBOARD")]
    pub dashboards: Vec<String>,
}

#[derive(Parser, Debug)]
#[command(name = "help")]
pub struct HelpOptions {
    /// Command to describe
    #[arg(value_name = "COMMAND")]
    pub topics: Vec<String>,
}
