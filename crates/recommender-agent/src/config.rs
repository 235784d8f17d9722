use anyhow::{bail, Context, Result};
use std::env;

/// Runtime configuration, loaded from the environment.
#[derive(Debug, Clone)]
pub struct AgentConfig {
    pub finnhub_api_key: String,
    pub openai_api_key: String,
    pub openai_api_base: String,
    pub openai_model: String,
    pub news_category: String,
    pub cache_file: String,
    /// Freshness window for the cache file. `None` means the cache never
    /// expires.
    pub cache_max_age_secs: Option<u64>,
    pub top_n: usize,
}

impl AgentConfig {
    pub fn from_env() -> Result<Self> {
        let finnhub_api_key = env::var("FINNHUB_API_KEY")
            .context("FINNHUB_API_KEY is not set; add it to the environment or .env")?;
        let openai_api_key = env::var("OPENAI_API_KEY")
            .context("OPENAI_API_KEY is not set; add it to the environment or .env")?;

        if finnhub_api_key.trim().is_empty() {
            bail!("FINNHUB_API_KEY is empty");
        }
        if openai_api_key.trim().is_empty() {
            bail!("OPENAI_API_KEY is empty");
        }

        let cache_max_age_secs = match env::var("NEWS_CACHE_MAX_AGE_SECS") {
            Ok(v) => Some(
                v.parse()
                    .context("NEWS_CACHE_MAX_AGE_SECS must be a number of seconds")?,
            ),
            Err(_) => None,
        };

        Ok(Self {
            finnhub_api_key,
            openai_api_key,
            openai_api_base: env::var("OPENAI_API_BASE")
                .unwrap_or_else(|_| "https://api.openai.com/v1".to_string()),
            openai_model: env::var("OPENAI_MODEL").unwrap_or_else(|_| "gpt-4o-mini".to_string()),
            news_category: env::var("NEWS_CATEGORY").unwrap_or_else(|_| "general".to_string()),
            cache_file: env::var("NEWS_CACHE_FILE")
                .unwrap_or_else(|_| "news_cache.json".to_string()),
            cache_max_age_secs,
            top_n: env::var("TOP_N")
                .unwrap_or_else(|_| "5".to_string())
                .parse()
                .context("TOP_N must be an integer")?,
        })
    }
}
