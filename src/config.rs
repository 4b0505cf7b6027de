use std::path::PathBuf;
use std::time::Duration;

pub struct Config {
    pub base_url: String,
    pub request_timeout: Duration,
    pub poll_interval: Duration,
    pub max_poll_ticks: u32,
    pub reload_delay: Duration,
    pub auto_refresh: Option<Duration>, // None 表示关闭自动刷新
    pub output_path: Option<PathBuf>,
}

impl Config {
    pub fn new() -> Self {
        Self {
            base_url: "http://localhost:8000".to_string(),
            request_timeout: Duration::from_secs(30),
            poll_interval: Duration::from_secs(1),
            max_poll_ticks: 120,
            reload_delay: Duration::from_secs(1),
            auto_refresh: Some(Duration::from_secs(30)),
            output_path: Some(PathBuf::from("dashboard.html")),
        }
    }

    pub fn with_base_url(mut self, url: &str) -> Self {
        self.base_url = url.trim_end_matches('/').to_string();
        self
    }

    pub fn with_request_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = timeout;
        self
    }

    pub fn with_poll_interval(mut self, interval: Duration) -> Self {
        self.poll_interval = interval;
        self
    }

    pub fn with_max_poll_ticks(mut self, ticks: u32) -> Self {
        self.max_poll_ticks = ticks;
        self
    }

    pub fn with_reload_delay(mut self, delay: Duration) -> Self {
        self.reload_delay = delay;
        self
    }

    pub fn with_auto_refresh(mut self, interval: Option<Duration>) -> Self {
        self.auto_refresh = interval;
        self
    }

    pub fn with_output_path(mut self, path: Option<PathBuf>) -> Self {
        self.output_path = path;
        self
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_dashboard_timings() {
        let config = Config::new();
        assert_eq!(config.poll_interval, Duration::from_secs(1));
        assert_eq!(config.max_poll_ticks, 120);
        assert_eq!(config.auto_refresh, Some(Duration::from_secs(30)));
    }

    #[test]
    fn base_url_drops_trailing_slash() {
        let config = Config::new().with_base_url("http://dash.local:8000/");
        assert_eq!(config.base_url, "http://dash.local:8000");
    }
}
