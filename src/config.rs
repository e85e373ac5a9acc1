use std::time::Duration;

const DEFAULT_API_URL: &str = "http://127.0.0.1:5000";

#[derive(Debug, Clone)]
pub struct Config {
    pub api_base_url: String,
    pub poll_interval_secs: u64,
    pub request_timeout_secs: Option<u64>, // None = no timeout, like the browser fetch
    pub qsa_cache_ttl_secs: u64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_base_url: DEFAULT_API_URL.to_string(),
            poll_interval_secs: 3,
            request_timeout_secs: None,
            qsa_cache_ttl_secs: 3600,
        }
    }
}

impl Config {
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();

        let config = Self {
            api_base_url: validate_base_url(
                std::env::var("DASHBOARD_API_URL")
                    .unwrap_or_else(|_| DEFAULT_API_URL.to_string())
                    .trim()
                    .to_string(),
            )?,
            poll_interval_secs: std::env::var("POLL_INTERVAL_SECS")
                .unwrap_or_else(|_| "3".to_string())
                .parse()
                .map_err(|_| anyhow::anyhow!("POLL_INTERVAL_SECS must be a positive number"))
                .and_then(|secs: u64| {
                    if secs == 0 {
                        anyhow::bail!("POLL_INTERVAL_SECS must be at least 1");
                    }
                    Ok(secs)
                })?,
            request_timeout_secs: std::env::var("REQUEST_TIMEOUT_SECS")
                .ok()
                .filter(|s| !s.trim().is_empty())
                .map(|s| {
                    s.trim().parse::<u64>().map_err(|_| {
                        anyhow::anyhow!("REQUEST_TIMEOUT_SECS must be a positive number")
                    })
                })
                .transpose()?,
            qsa_cache_ttl_secs: std::env::var("QSA_CACHE_TTL_SECS")
                .unwrap_or_else(|_| "3600".to_string())
                .parse()
                .map_err(|_| anyhow::anyhow!("QSA_CACHE_TTL_SECS must be a number of seconds"))?,
        };

        tracing::info!("Configuration loaded successfully");
        tracing::debug!("Dashboard API URL: {}", config.api_base_url);
        tracing::debug!("Poll interval: {}s", config.poll_interval_secs);
        if let Some(timeout) = config.request_timeout_secs {
            tracing::debug!("Request timeout: {}s", timeout);
        }

        Ok(config)
    }

    pub fn poll_interval(&self) -> Duration {
        Duration::from_secs(self.poll_interval_secs)
    }

    pub fn request_timeout(&self) -> Option<Duration> {
        self.request_timeout_secs.map(Duration::from_secs)
    }

    pub fn qsa_cache_ttl(&self) -> Duration {
        Duration::from_secs(self.qsa_cache_ttl_secs)
    }
}

fn validate_base_url(url: String) -> anyhow::Result<String> {
    if url.is_empty() {
        anyhow::bail!("DASHBOARD_API_URL cannot be empty");
    }
    if !url.starts_with("http://") && !url.starts_with("https://") {
        anyhow::bail!("DASHBOARD_API_URL must start with http:// or https://");
    }
    url::Url::parse(&url)
        .map_err(|e| anyhow::anyhow!("DASHBOARD_API_URL is not a valid URL: {}", e))?;
    Ok(url.trim_end_matches('/').to_string())
}
