//! recommender-agent: fetch financial news, score sentiment, and print the
//! tickers with the most favorable coverage.
//!
//! Usage:
//!   cargo run -p recommender-agent
//!       # ranked tickers from cached/general market news
//!   cargo run -p recommender-agent -- --symbol AAPL --from 2024-01-01
//!       # fetch company news, filter by start date, write filtered_news.json

use anyhow::{Context, Result};
use chrono::{Days, NaiveDate, Utc};
use finnhub_client::FinnhubClient;
use llm_client::{CompletionClient, LlmConfig};
use sentiment_analysis::SentimentAnalyzer;
use std::path::Path;
use std::time::Duration;

mod cache;
mod config;
mod pipeline;

use cache::NewsCache;
use config::AgentConfig;

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    init_tracing();

    // Missing credentials halt the run before any network call.
    let config = AgentConfig::from_env()?;

    let args: Vec<String> = std::env::args().collect();
    let finnhub = FinnhubClient::new(config.finnhub_api_key.clone());

    if let Some(symbol) = flag_value(&args, "--symbol") {
        let from = match flag_value(&args, "--from") {
            Some(raw) => NaiveDate::parse_from_str(&raw, "%Y-%m-%d")
                .context("invalid --from date, use YYYY-MM-DD")?,
            None => Utc::now().date_naive() - Days::new(7),
        };
        let out = flag_value(&args, "--out").unwrap_or_else(|| "filtered_news.json".to_string());
        return save_company_news(&finnhub, &symbol, from, Path::new(&out)).await;
    }

    recommend(&config, &finnhub).await
}

/// Run the full pipeline: cached-or-fetched market news, per-article
/// sentiment, ticker aggregation, ranked list on stdout.
async fn recommend(config: &AgentConfig, finnhub: &FinnhubClient) -> Result<()> {
    let analyzer = SentimentAnalyzer::new();

    let mut llm_config = LlmConfig::new(config.openai_api_key.clone());
    llm_config.api_base = config.openai_api_base.clone();
    llm_config.model = config.openai_model.clone();
    let llm = CompletionClient::new(llm_config);

    let cache = NewsCache::new(
        &config.cache_file,
        config.cache_max_age_secs.map(Duration::from_secs),
    );

    let news = cache
        .get_or_fetch(|| async move {
            tracing::info!(category = %config.news_category, "fetching news from the API");
            pipeline::empty_on_failure(
                finnhub.market_news(&config.news_category).await,
                "news fetch",
            )
        })
        .await;

    if news.is_empty() {
        println!("No news articles fetched.");
        return Ok(());
    }

    let stock_sentiments = pipeline::process_news(&news, &analyzer, &llm).await;
    let ranked = pipeline::suggest_top(&stock_sentiments, config.top_n);

    println!("\nTop {} Stocks Based on Sentiment:", config.top_n);
    for stock in &ranked {
        println!(
            "Stock: {}, Average Sentiment: {:.2}",
            stock.symbol, stock.avg_sentiment
        );
    }

    Ok(())
}

/// Company-news mode: fetch news for one symbol, keep articles published
/// on or after the start date, and write them out pretty-printed.
async fn save_company_news(
    finnhub: &FinnhubClient,
    symbol: &str,
    from: NaiveDate,
    out: &Path,
) -> Result<()> {
    let today = Utc::now().date_naive();
    let news = finnhub.company_news(symbol, from, today).await?;
    let filtered = finnhub_client::filter_published_since(news, from);

    cache::write_json_pretty(out, &filtered)?;
    println!("Saved {} articles to {}", filtered.len(), out.display());

    Ok(())
}

fn init_tracing() {
    let json_logging = std::env::var("RUST_LOG_FORMAT")
        .map(|v| v.eq_ignore_ascii_case("json"))
        .unwrap_or(false);

    if json_logging {
        tracing_subscriber::fmt()
            .json()
            .with_env_filter(
                tracing_subscriber::EnvFilter::try_from_default_env()
                    .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
            )
            .init();
    } else {
        tracing_subscriber::fmt()
            .with_env_filter(
                tracing_subscriber::EnvFilter::try_from_default_env()
                    .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
            )
            .init();
    }
}

fn flag_value(args: &[String], flag: &str) -> Option<String> {
    args.iter()
        .position(|a| a == flag)
        .and_then(|i| args.get(i + 1))
        .cloned()
}
