use crate::search::client::DEFAULT_API_URL;
use crate::search::types::RESULT_CAP;
use crate::search::FetchSettings;
use clap::Parser;
use std::path::PathBuf;
use std::time::Duration;

/// Exporter configuration, from flags or the environment
#[derive(Debug, Clone, Parser)]
#[command(name = "domain-exporter")]
#[command(about = "Exports Domain listing counts as Prometheus metrics")]
pub struct Config {
    /// Address to listen on; ":port" listens on every interface
    #[arg(long, env = "LISTEN_ADDR", default_value = ":10550")]
    pub listen: String,

    /// Domain API key
    #[arg(long, env = "DOMAIN_API_KEY", hide_env_values = true, value_parser = non_empty)]
    pub api_key: String,

    /// Residential search endpoint
    #[arg(long, env = "DOMAIN_API_URL", default_value = DEFAULT_API_URL)]
    pub api_url: String,

    /// Directory of search criteria documents used on /metrics
    #[arg(long, env = "CRITERIA_DIR", default_value = "criteria")]
    pub criteria_dir: PathBuf,

    /// Maximum listings collected per criteria set
    #[arg(long, env = "RESULT_CAP", default_value_t = RESULT_CAP)]
    pub result_cap: usize,

    /// Timeout for a single page request, in seconds
    #[arg(long, env = "PAGE_TIMEOUT_SECS", default_value_t = 30)]
    pub page_timeout_secs: u64,

    /// Time allowed for all pages of one criteria set, in seconds
    #[arg(long, env = "FETCH_DEADLINE_SECS", default_value_t = 120)]
    pub fetch_deadline_secs: u64,
}

fn non_empty(value: &str) -> Result<String, String> {
    if value.trim().is_empty() {
        Err("must not be empty".to_string())
    } else {
        Ok(value.to_string())
    }
}

impl Config {
    /// Socket address to bind, expanding a bare ":port"
    pub fn bind_addr(&self) -> String {
        if self.listen.starts_with(':') {
            format!("0.0.0.0{}", self.listen)
        } else {
            self.listen.clone()
        }
    }

    pub fn page_timeout(&self) -> Duration {
        Duration::from_secs(self.page_timeout_secs)
    }

    pub fn fetch_settings(&self) -> FetchSettings {
        FetchSettings {
            result_cap: self.result_cap,
            deadline: Duration::from_secs(self.fetch_deadline_secs),
        }
    }
}
