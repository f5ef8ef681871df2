use serde::Deserialize;

/// Main configuration structure for Tune-Sieve
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub crawler: CrawlerConfig,
    #[serde(rename = "user-agent", default)]
    pub user_agent: UserAgentConfig,
    #[serde(default)]
    pub metadata: MetadataConfig,
    #[serde(default)]
    pub input: InputConfig,
    #[serde(default)]
    pub output: OutputConfig,
}

/// How tasks within one pipeline stage are scheduled
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ConcurrencyMode {
    /// Every crawl step and every track fetch runs as its own task
    #[default]
    Concurrent,
    /// One network operation at a time, in queue order
    Sequential,
}

/// Crawler behavior configuration
#[derive(Debug, Clone, Deserialize)]
pub struct CrawlerConfig {
    /// Remaining link depth assigned to every seed; 1 means collect-only
    #[serde(rename = "max-depth", default = "default_max_depth")]
    pub max_depth: u32,

    /// Scheduling mode for the crawl and fetch stages
    #[serde(default)]
    pub concurrency: ConcurrencyMode,

    /// Upper bound on in-flight HTTP requests across all tasks
    #[serde(
        rename = "max-concurrent-requests",
        default = "default_max_concurrent_requests"
    )]
    pub max_concurrent_requests: u32,

    /// Per-request timeout in seconds
    #[serde(
        rename = "request-timeout-secs",
        default = "default_request_timeout_secs"
    )]
    pub request_timeout_secs: u64,
}

impl Default for CrawlerConfig {
    fn default() -> Self {
        Self {
            max_depth: default_max_depth(),
            concurrency: ConcurrencyMode::default(),
            max_concurrent_requests: default_max_concurrent_requests(),
            request_timeout_secs: default_request_timeout_secs(),
        }
    }
}

/// Request identity sent with every HTTP request
#[derive(Debug, Clone, Deserialize)]
pub struct UserAgentConfig {
    /// Full User-Agent header value
    #[serde(default = "default_user_agent")]
    pub value: String,
}

impl Default for UserAgentConfig {
    fn default() -> Self {
        Self {
            value: default_user_agent(),
        }
    }
}

/// Partial download settings for audio files
#[derive(Debug, Clone, Deserialize)]
pub struct MetadataConfig {
    /// Number of leading bytes requested from each audio file
    #[serde(rename = "range-bytes", default = "default_range_bytes")]
    pub range_bytes: u64,
}

impl Default for MetadataConfig {
    fn default() -> Self {
        Self {
            range_bytes: default_range_bytes(),
        }
    }
}

/// Where seed URLs come from
#[derive(Debug, Clone, Default, Deserialize)]
pub struct InputConfig {
    /// Optional XML site list; one `<site>` element per seed
    #[serde(rename = "site-list")]
    pub site_list: Option<String>,

    /// Seeds given directly in the config, appended after the site list
    #[serde(default)]
    pub seeds: Vec<String>,
}

/// Output configuration
#[derive(Debug, Clone, Deserialize)]
pub struct OutputConfig {
    /// Path of the XML playlist report
    #[serde(rename = "report-path", default = "default_report_path")]
    pub report_path: String,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            report_path: default_report_path(),
        }
    }
}

fn default_max_depth() -> u32 {
    2
}

fn default_max_concurrent_requests() -> u32 {
    32
}

fn default_request_timeout_secs() -> u64 {
    30
}

fn default_user_agent() -> String {
    "Mozilla/5.0".to_string()
}

fn default_range_bytes() -> u64 {
    4000
}

fn default_report_path() -> String {
    "result.xml".to_string()
}
