use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A news article as returned by the news provider (and as stored in the
/// cache file). Every field defaults so partial provider records and older
/// cache files still deserialize.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NewsArticle {
    #[serde(default)]
    pub headline: String,
    #[serde(default)]
    pub summary: String,
    #[serde(default)]
    pub source: String,
    #[serde(default)]
    pub url: String,
    /// Publish time, unix seconds. Zero means the provider sent none.
    #[serde(default)]
    pub datetime: i64,
    /// Comma-separated ticker symbols the provider tagged the story with.
    #[serde(default)]
    pub related: String,
}

impl NewsArticle {
    /// Publish time as UTC. `None` when the timestamp is missing or out
    /// of range.
    pub fn published_utc(&self) -> Option<DateTime<Utc>> {
        if self.datetime == 0 {
            return None;
        }
        DateTime::from_timestamp(self.datetime, 0)
    }

    /// Tickers from the provider's `related` field: split on commas,
    /// trimmed, empty tokens dropped.
    pub fn related_tickers(&self) -> Vec<String> {
        self.related
            .split(',')
            .map(str::trim)
            .filter(|t| !t.is_empty())
            .map(str::to_string)
            .collect()
    }
}

/// One entry of the final ranking.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RankedStock {
    pub symbol: String,
    pub avg_sentiment: f64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_related_tickers_split_and_trim() {
        let article = NewsArticle {
            related: " AAPL, MSFT ,,GOOG,".to_string(),
            ..Default::default()
        };
        assert_eq!(article.related_tickers(), vec!["AAPL", "MSFT", "GOOG"]);
    }

    #[test]
    fn test_related_tickers_empty_field() {
        let article = NewsArticle::default();
        assert!(article.related_tickers().is_empty());
    }

    #[test]
    fn test_partial_provider_record_parses() {
        let article: NewsArticle =
            serde_json::from_str(r#"{"headline": "Fed holds rates", "id": 42}"#).unwrap();
        assert_eq!(article.headline, "Fed holds rates");
        assert_eq!(article.datetime, 0);
        assert!(article.published_utc().is_none());
    }

    #[test]
    fn test_published_utc_from_unix_seconds() {
        let article = NewsArticle {
            datetime: 1_704_067_200, // 2024-01-01T00:00:00Z
            ..Default::default()
        };
        let ts = article.published_utc().unwrap();
        assert_eq!(ts.to_rfc3339(), "2024-01-01T00:00:00+00:00");
    }
}
