pub mod error;

pub use error::{LlmError, LlmResult};

use async_trait::async_trait;
use recommender_core::{NewsArticle, RecommenderError, TickerInference};
use serde::{Deserialize, Serialize};
use serde_json::json;
use std::time::Duration;

const DEFAULT_API_BASE: &str = "https://api.openai.com/v1";
const DEFAULT_MODEL: &str = "gpt-4o-mini";

const SYSTEM_INSTRUCTION: &str = "Based on the following news article, identify relevant \
stock tickers that may benefit. List only the stock ticker symbols.";

/// Configuration for the chat-completion endpoint.
#[derive(Debug, Clone)]
pub struct LlmConfig {
    pub api_base: String,
    pub api_key: String,
    pub model: String,
    pub timeout: Duration,
}

impl LlmConfig {
    pub fn new(api_key: String) -> Self {
        Self {
            api_base: DEFAULT_API_BASE.to_string(),
            api_key,
            model: DEFAULT_MODEL.to_string(),
            timeout: Duration::from_secs(30),
        }
    }
}

/// Chat-completion client used to name tickers for untagged articles.
#[derive(Clone)]
pub struct CompletionClient {
    client: reqwest::Client,
    config: LlmConfig,
}

impl CompletionClient {
    pub fn new(config: LlmConfig) -> Self {
        let client = reqwest::Client::builder()
            .timeout(config.timeout)
            .build()
            .unwrap_or_else(|_| reqwest::Client::new());

        Self { client, config }
    }

    /// Ask the model which tickers would benefit from the article. The
    /// response is constrained to `{"tickers": [string, ...]}` via a JSON
    /// schema response format.
    pub async fn extract_tickers(&self, article: &NewsArticle) -> LlmResult<Vec<String>> {
        let article_json = serde_json::to_string_pretty(article)?;

        let request = ChatRequest {
            model: &self.config.model,
            messages: vec![
                ChatMessage {
                    role: "system",
                    content: SYSTEM_INSTRUCTION.to_string(),
                },
                ChatMessage {
                    role: "user",
                    content: format!("News article: {article_json}"),
                },
            ],
            response_format: ResponseFormat {
                format_type: "json_schema",
                json_schema: JsonSchemaFormat {
                    name: "ticker_extraction",
                    schema: json!({
                        "type": "object",
                        "properties": {
                            "tickers": {
                                "type": "array",
                                "items": { "type": "string" }
                            }
                        },
                        "required": ["tickers"],
                        "additionalProperties": false
                    }),
                    strict: true,
                },
            },
        };

        let response = self
            .client
            .post(format!("{}/chat/completions", self.config.api_base))
            .bearer_auth(&self.config.api_key)
            .json(&request)
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(LlmError::ServiceUnavailable(format!(
                "Status: {}",
                response.status()
            )));
        }

        let completion = response.json::<ChatResponse>().await?;
        let content = completion
            .choices
            .first()
            .and_then(|c| c.message.content.as_deref())
            .ok_or_else(|| LlmError::InvalidResponse("no completion choices".to_string()))?;

        parse_ticker_content(content)
    }
}

#[async_trait]
impl TickerInference for CompletionClient {
    async fn infer_tickers(
        &self,
        article: &NewsArticle,
    ) -> Result<Vec<String>, RecommenderError> {
        self.extract_tickers(article)
            .await
            .map_err(|e| RecommenderError::InferenceError(e.to_string()))
    }
}

fn parse_ticker_content(content: &str) -> LlmResult<Vec<String>> {
    let extraction: TickerExtraction = serde_json::from_str(content)?;

    Ok(extraction
        .tickers
        .iter()
        .map(|t| t.trim().to_uppercase())
        .filter(|t| !t.is_empty())
        .collect())
}

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage>,
    response_format: ResponseFormat,
}

#[derive(Debug, Serialize)]
struct ChatMessage {
    role: &'static str,
    content: String,
}

#[derive(Debug, Serialize)]
struct ResponseFormat {
    #[serde(rename = "type")]
    format_type: &'static str,
    json_schema: JsonSchemaFormat,
}

#[derive(Debug, Serialize)]
struct JsonSchemaFormat {
    name: &'static str,
    schema: serde_json::Value,
    strict: bool,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatResponseMessage,
}

#[derive(Debug, Deserialize)]
struct ChatResponseMessage {
    content: Option<String>,
}

#[derive(Debug, Deserialize)]
struct TickerExtraction {
    tickers: Vec<String>,
}
