use recommender_core::{NewsArticle, RecommenderError};
use serde::Serialize;
use serde_json::ser::PrettyFormatter;
use std::future::Future;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::{info, warn};

/// Flat JSON file cache for fetched news.
///
/// The file holds a single pretty-printed JSON array of articles and is
/// rewritten wholesale on every save. A missing or unparseable file is an
/// empty cache, never an error.
pub struct NewsCache {
    path: PathBuf,
    max_age: Option<Duration>,
}

impl NewsCache {
    pub fn new(path: impl Into<PathBuf>, max_age: Option<Duration>) -> Self {
        Self {
            path: path.into(),
            max_age,
        }
    }

    /// Articles currently on disk. Corruption is demoted to an empty cache.
    pub fn load(&self) -> Vec<NewsArticle> {
        let raw = match std::fs::read_to_string(&self.path) {
            Ok(raw) => raw,
            Err(_) => return Vec::new(),
        };

        match serde_json::from_str(&raw) {
            Ok(articles) => articles,
            Err(e) => {
                warn!(
                    "cache file {} is corrupted, starting fresh: {e}",
                    self.path.display()
                );
                Vec::new()
            }
        }
    }

    /// Overwrite the cache file with the given articles.
    pub fn save(&self, articles: &[NewsArticle]) -> Result<(), RecommenderError> {
        write_json_pretty(&self.path, &articles)
    }

    /// Cached articles when present and fresh, otherwise whatever `fetch`
    /// produces (persisted for the next run when non-empty).
    pub async fn get_or_fetch<F, Fut>(&self, fetch: F) -> Vec<NewsArticle>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Vec<NewsArticle>>,
    {
        let cached = self.load();
        if !cached.is_empty() && self.is_fresh() {
            info!("loaded {} articles from cache", cached.len());
            return cached;
        }

        let fetched = fetch().await;
        if !fetched.is_empty() {
            if let Err(e) = self.save(&fetched) {
                warn!("failed to persist news cache: {e}");
            }
        }
        fetched
    }

    /// Whether the cache file is inside the freshness window. With no
    /// window configured the cache never expires.
    fn is_fresh(&self) -> bool {
        let Some(max_age) = self.max_age else {
            return true;
        };

        std::fs::metadata(&self.path)
            .and_then(|m| m.modified())
            .ok()
            .and_then(|modified| modified.elapsed().ok())
            .is_some_and(|age| age <= max_age)
    }
}

/// Write a serializable value as JSON, pretty-printed with 4-space
/// indentation, overwriting `path`.
pub fn write_json_pretty<T: Serialize>(path: &Path, value: &T) -> Result<(), RecommenderError> {
    let mut buf = Vec::new();
    let formatter = PrettyFormatter::with_indent(b"    ");
    let mut serializer = serde_json::Serializer::with_formatter(&mut buf, formatter);

    value
        .serialize(&mut serializer)
        .map_err(|e| RecommenderError::CacheError(e.to_string()))?;

    std::fs::write(path, buf).map_err(|e| RecommenderError::CacheError(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    fn article(headline: &str, related: &str) -> NewsArticle {
        NewsArticle {
            headline: headline.to_string(),
            summary: "summary".to_string(),
            source: "wire".to_string(),
            url: "https://example.com/story".to_string(),
            datetime: 1_704_067_200,
            related: related.to_string(),
        }
    }

    #[test]
    fn test_load_missing_file_returns_empty() {
        let dir = tempfile::tempdir().unwrap();
        let cache = NewsCache::new(dir.path().join("absent.json"), None);
        assert!(cache.load().is_empty());
    }

    #[test]
    fn test_load_corrupt_file_returns_empty() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("news_cache.json");
        std::fs::write(&path, "{not json").unwrap();

        let cache = NewsCache::new(&path, None);
        assert!(cache.load().is_empty());
    }

    #[test]
    fn test_save_then_load_round_trips() {
        let dir = tempfile::tempdir().unwrap();
        let cache = NewsCache::new(dir.path().join("news_cache.json"), None);

        let articles = vec![article("First", "AAPL,MSFT"), article("Second", "")];
        cache.save(&articles).unwrap();

        assert_eq!(cache.load(), articles);
    }

    #[test]
    fn test_save_writes_four_space_indented_array() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("news_cache.json");
        let cache = NewsCache::new(&path, None);

        cache.save(&[article("Indented", "")]).unwrap();

        let raw = std::fs::read_to_string(&path).unwrap();
        assert!(raw.starts_with("[\n    {"));
        assert!(raw.contains("\n        \"headline\": \"Indented\""));
    }

    #[tokio::test]
    async fn test_get_or_fetch_populates_cache_on_miss() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("news_cache.json");
        let cache = NewsCache::new(&path, None);

        let fetched = cache
            .get_or_fetch(|| async { vec![article("Fresh", "")] })
            .await;

        assert_eq!(fetched.len(), 1);
        assert!(path.exists());
    }

    #[tokio::test]
    async fn test_get_or_fetch_prefers_cached_content() {
        let dir = tempfile::tempdir().unwrap();
        let cache = NewsCache::new(dir.path().join("news_cache.json"), None);
        cache.save(&[article("Cached", "")]).unwrap();

        let fetches = AtomicUsize::new(0);
        let result = cache
            .get_or_fetch(|| {
                fetches.fetch_add(1, Ordering::SeqCst);
                async { vec![article("Remote", "")] }
            })
            .await;

        assert_eq!(result[0].headline, "Cached");
        assert_eq!(fetches.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_get_or_fetch_refetches_when_stale() {
        let dir = tempfile::tempdir().unwrap();
        let cache = NewsCache::new(dir.path().join("news_cache.json"), Some(Duration::ZERO));
        cache.save(&[article("Cached", "")]).unwrap();

        let result = cache
            .get_or_fetch(|| async { vec![article("Remote", "")] })
            .await;

        assert_eq!(result[0].headline, "Remote");
    }

    #[tokio::test]
    async fn test_get_or_fetch_keeps_old_file_on_empty_fetch() {
        let dir = tempfile::tempdir().unwrap();
        let cache = NewsCache::new(dir.path().join("news_cache.json"), Some(Duration::ZERO));
        cache.save(&[article("Cached", "")]).unwrap();

        let result = cache.get_or_fetch(|| async { Vec::new() }).await;

        assert!(result.is_empty());
        assert_eq!(cache.load()[0].headline, "Cached");
    }
}
