use recommender_core::NewsArticle;
use vader_sentiment::SentimentIntensityAnalyzer;

/// Lexicon-based sentiment scorer.
///
/// Wraps the VADER valence lexicon (negation- and intensifier-aware).
/// No training, no configuration: identical text always yields the
/// identical compound score.
pub struct SentimentAnalyzer {
    analyzer: SentimentIntensityAnalyzer<'static>,
}

impl SentimentAnalyzer {
    pub fn new() -> Self {
        Self {
            analyzer: SentimentIntensityAnalyzer::new(),
        }
    }

    /// Compound polarity score in [-1, 1]. Empty text scores 0.0.
    pub fn compound(&self, text: &str) -> f64 {
        if text.trim().is_empty() {
            return 0.0;
        }

        let scores = self.analyzer.polarity_scores(text);
        scores["compound"]
    }

    /// Score an article on its headline concatenated with its summary.
    pub fn score_article(&self, article: &NewsArticle) -> f64 {
        self.compound(&format!("{} {}", article.headline, article.summary))
    }
}

impl Default for SentimentAnalyzer {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scoring_is_deterministic() {
        let analyzer = SentimentAnalyzer::new();
        let text = "Shares rally after the company beats expectations";
        assert_eq!(analyzer.compound(text), analyzer.compound(text));
    }

    #[test]
    fn test_polarity_ordering() {
        let analyzer = SentimentAnalyzer::new();

        let positive = analyzer.compound("Great results, investors celebrate a fantastic win");
        let negative = analyzer.compound("Terrible losses spark fear and panic among investors");

        assert!(positive > 0.0, "expected positive compound, got {positive}");
        assert!(negative < 0.0, "expected negative compound, got {negative}");
    }

    #[test]
    fn test_negation_lowers_score() {
        let analyzer = SentimentAnalyzer::new();
        assert!(
            analyzer.compound("The outlook is good") > analyzer.compound("The outlook is not good")
        );
    }

    #[test]
    fn test_compound_stays_in_range() {
        let analyzer = SentimentAnalyzer::new();
        let score = analyzer.compound(
            "Amazing spectacular wonderful record-breaking triumph, best results ever",
        );
        assert!((-1.0..=1.0).contains(&score));
    }

    #[test]
    fn test_empty_text_scores_zero() {
        let analyzer = SentimentAnalyzer::new();
        assert_eq!(analyzer.compound(""), 0.0);
        assert_eq!(analyzer.compound("   "), 0.0);
    }

    #[test]
    fn test_score_article_joins_headline_and_summary() {
        let analyzer = SentimentAnalyzer::new();
        let article = NewsArticle {
            headline: "Chipmaker posts record profit".to_string(),
            summary: "Strong demand drives an impressive quarter".to_string(),
            ..Default::default()
        };

        let expected = analyzer
            .compound("Chipmaker posts record profit Strong demand drives an impressive quarter");
        assert_eq!(analyzer.score_article(&article), expected);
    }
}
