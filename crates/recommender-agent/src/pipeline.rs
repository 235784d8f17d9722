use indexmap::IndexMap;
use recommender_core::{NewsArticle, RankedStock, RecommenderError, TickerInference};
use sentiment_analysis::SentimentAnalyzer;
use tracing::{info, warn};

/// Per-ticker sentiment scores, in first-appearance order. Insertion order
/// breaks average-score ties in the final ranking.
pub type TickerSentimentMap = IndexMap<String, Vec<f64>>;

/// Map a recoverable fetch/inference failure to an empty result, keeping
/// the pipeline running on degraded data. The one place where errors are
/// allowed to disappear.
pub fn empty_on_failure<T>(result: Result<Vec<T>, RecommenderError>, what: &str) -> Vec<T> {
    match result {
        Ok(items) => items,
        Err(e) => {
            warn!("{what} failed, continuing with an empty result: {e}");
            Vec::new()
        }
    }
}

/// Score every article, fold scores into per-ticker lists, and — when the
/// most positive article carries no ticker metadata — ask the inference
/// capability once to name beneficiaries, crediting them with that
/// article's score. Ties for most positive keep the first-seen article.
pub async fn process_news(
    articles: &[NewsArticle],
    analyzer: &SentimentAnalyzer,
    inference: &dyn TickerInference,
) -> TickerSentimentMap {
    let mut stock_sentiments = TickerSentimentMap::new();
    let mut top_article: Option<&NewsArticle> = None;
    let mut top_score = f64::NEG_INFINITY;

    for article in articles {
        let score = analyzer.score_article(article);

        if score > top_score {
            top_score = score;
            top_article = Some(article);
        }

        for ticker in article.related_tickers() {
            stock_sentiments.entry(ticker).or_default().push(score);
        }

        info!(
            headline = %article.headline,
            source = %article.source,
            url = %article.url,
            published = %article
                .published_utc()
                .map(|ts| ts.format("%Y-%m-%d %H:%M:%S").to_string())
                .unwrap_or_else(|| "unknown".to_string()),
            sentiment = score,
            "scored article"
        );
    }

    if let Some(article) = top_article {
        if article.related_tickers().is_empty() {
            info!("most positive article has no tickers, asking the model to infer them");
            let inferred =
                empty_on_failure(inference.infer_tickers(article).await, "ticker inference");
            for ticker in inferred {
                stock_sentiments.entry(ticker).or_default().push(top_score);
            }
        }
    }

    stock_sentiments
}

/// Rank tickers by arithmetic mean sentiment, descending. The sort is
/// stable, so tickers with equal means keep first-appearance order.
pub fn suggest_top(stock_sentiments: &TickerSentimentMap, top_n: usize) -> Vec<RankedStock> {
    let mut ranked: Vec<RankedStock> = stock_sentiments
        .iter()
        .map(|(symbol, scores)| RankedStock {
            symbol: symbol.clone(),
            avg_sentiment: scores.iter().sum::<f64>() / scores.len() as f64,
        })
        .collect();

    ranked.sort_by(|a, b| {
        b.avg_sentiment
            .partial_cmp(&a.avg_sentiment)
            .unwrap_or(std::cmp::Ordering::Equal)
    });
    ranked.truncate(top_n);
    ranked
}
