use chrono::{NaiveDate, NaiveTime};
use recommender_core::{NewsArticle, RecommenderError};
use reqwest::Client;

const BASE_URL: &str = "https://finnhub.io/api/v1";

/// Client for the Finnhub news endpoints.
#[derive(Clone)]
pub struct FinnhubClient {
    api_key: String,
    base_url: String,
    client: Client,
}

impl FinnhubClient {
    pub fn new(api_key: String) -> Self {
        Self {
            api_key,
            base_url: BASE_URL.to_string(),
            client: Client::new(),
        }
    }

    /// Point the client at a different host. Test seam.
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// General market news for a category (general, forex, crypto, merger).
    pub async fn market_news(
        &self,
        category: &str,
    ) -> Result<Vec<NewsArticle>, RecommenderError> {
        let url = format!("{}/news", self.base_url);
        tracing::debug!(category, "fetching market news");

        let response = self
            .client
            .get(&url)
            .query(&[("category", category), ("token", self.api_key.as_str())])
            .send()
            .await
            .map_err(|e| RecommenderError::ApiError(e.to_string()))?;

        Self::parse_articles(response).await
    }

    /// Company news for a symbol within a date range (inclusive).
    pub async fn company_news(
        &self,
        symbol: &str,
        from: NaiveDate,
        to: NaiveDate,
    ) -> Result<Vec<NewsArticle>, RecommenderError> {
        let url = format!("{}/company-news", self.base_url);
        let from = from.format("%Y-%m-%d").to_string();
        let to = to.format("%Y-%m-%d").to_string();
        tracing::debug!(symbol, %from, %to, "fetching company news");

        let response = self
            .client
            .get(&url)
            .query(&[
                ("symbol", symbol),
                ("from", from.as_str()),
                ("to", to.as_str()),
                ("token", self.api_key.as_str()),
            ])
            .send()
            .await
            .map_err(|e| RecommenderError::ApiError(e.to_string()))?;

        Self::parse_articles(response).await
    }

    async fn parse_articles(
        response: reqwest::Response,
    ) -> Result<Vec<NewsArticle>, RecommenderError> {
        if !response.status().is_success() {
            return Err(RecommenderError::ApiError(format!(
                "HTTP {}: {}",
                response.status(),
                response.text().await.unwrap_or_default()
            )));
        }

        response
            .json::<Vec<NewsArticle>>()
            .await
            .map_err(|e| RecommenderError::ApiError(e.to_string()))
    }
}

/// Articles whose publish timestamp falls on or after midnight UTC of
/// `start`. A timestamp exactly on the bound is included; articles without
/// a usable timestamp are dropped.
pub fn filter_published_since(articles: Vec<NewsArticle>, start: NaiveDate) -> Vec<NewsArticle> {
    let bound = start.and_time(NaiveTime::MIN).and_utc();
    articles
        .into_iter()
        .filter(|a| a.published_utc().is_some_and(|ts| ts >= bound))
        .collect()
}
