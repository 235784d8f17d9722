use crate::{NewsArticle, RecommenderError};
use async_trait::async_trait;

/// Capability to name tickers for an article that carries no ticker
/// metadata of its own. Implemented by the LLM client; stubbed in tests.
#[async_trait]
pub trait TickerInference: Send + Sync {
    async fn infer_tickers(&self, article: &NewsArticle)
        -> Result<Vec<String>, RecommenderError>;
}
