use std::path::PathBuf;
use std::time::Duration;

use serde::Deserialize;

pub const DEFAULT_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 \
     (KHTML, like Gecko) Chrome/131.0.0.0 Safari/537.36";

#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    pub fetch: FetchSettings,
    pub output_root: PathBuf,
    pub page_cache_dir: Option<PathBuf>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct FetchSettings {
    pub max_attempts: u32,
    pub base_backoff_secs: f64,
    pub request_delay_secs: f64,
    pub timeout_secs: f64,
    pub user_agent: String,
    pub disable_proxy: bool,
}

impl FetchSettings {
    pub fn base_backoff(&self) -> Duration {
        Duration::from_secs_f64(self.base_backoff_secs)
    }

    pub fn request_delay(&self) -> Duration {
        Duration::from_secs_f64(self.request_delay_secs)
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs_f64(self.timeout_secs)
    }
}

impl Default for FetchSettings {
    fn default() -> Self {
        Self {
            max_attempts: 3,
            base_backoff_secs: 2.0,
            request_delay_secs: 1.0,
            timeout_secs: 20.0,
            user_agent: DEFAULT_USER_AGENT.to_string(),
            disable_proxy: false,
        }
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            fetch: FetchSettings::default(),
            output_root: PathBuf::from("data"),
            page_cache_dir: None,
        }
    }
}
