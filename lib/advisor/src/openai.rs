// Chat-completions backed analyzer
use crate::analysis::{parse_analysis, Analysis, AnalysisError, Analyzer};
use chemrank_core::ScoredProduct;
use serde::{Deserialize, Serialize};
use std::fmt::Write;

pub const DEFAULT_MODEL: &str = "gpt-4o-mini";
pub const DEFAULT_BASE_URL: &str = "https://api.openai.com/v1";
pub const API_KEY_ENV: &str = "OPENAI_API_KEY";

const SYSTEM_PROMPT: &str = "Sen bir kimya şirketi için ürün öneren uzman asistanısın. \
Müşterinin ihtiyacına göre önerilen ürünleri analiz et ve yanıtını yalnızca şu JSON \
formatında ver: {\"summary\": \"...\", \"safety\": \"...\", \"follow_up\": \"...\"}. \
Teknik terimleri açıkla, güvenlik konularına özel dikkat göster, Türkçe yanıt ver.";

#[derive(Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
    temperature: f32,
    max_tokens: u32,
}

#[derive(Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Deserialize)]
struct ChatResponse {
    #[serde(default)]
    choices: Vec<ChatChoice>,
}

#[derive(Deserialize)]
struct ChatChoice {
    message: ChatReply,
}

#[derive(Deserialize)]
struct ChatReply {
    #[serde(default)]
    content: Option<String>,
}

/// Analyzer calling an OpenAI-compatible chat-completions endpoint.
#[derive(Debug, Clone)]
pub struct OpenAiAnalyzer {
    client: reqwest::Client,
    api_key: String,
    base_url: String,
    model: String,
    temperature: f32,
    max_tokens: u32,
}

impl OpenAiAnalyzer {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            api_key: api_key.into(),
            base_url: DEFAULT_BASE_URL.to_string(),
            model: DEFAULT_MODEL.to_string(),
            temperature: 0.7,
            max_tokens: 1000,
        }
    }

    /// Build from the `OPENAI_API_KEY` environment variable.
    pub fn from_env() -> Result<Self, AnalysisError> {
        match std::env::var(API_KEY_ENV) {
            Ok(key) if !key.trim().is_empty() => Ok(Self::new(key.trim())),
            _ => Err(AnalysisError::MissingApiKey(API_KEY_ENV.to_string())),
        }
    }

    #[must_use]
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    #[must_use]
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    pub fn model(&self) -> &str {
        &self.model
    }
}

/// User message listing the customer need and each product.
pub fn format_user_prompt(query: &str, products: &[ScoredProduct]) -> String {
    let mut text = format!("Müşteri İhtiyacı: {}\n\nÖnerilen Ürünler:\n", query);
    for (i, product) in products.iter().enumerate() {
        let r = &product.record;
        let _ = write!(
            text,
            "\nÜrün {}: {}\nKategori: {}\nUygulamalar: {}\nÇözülen Problemler: {}\nÖnemli Parametreler: {}\nKısa Açıklama: {}\n",
            i + 1,
            r.product_name,
            r.category,
            r.applications.join(", "),
            r.problems_solved.join(", "),
            r.key_params.join(", "),
            r.short_desc,
        );
    }
    text
}

impl Analyzer for OpenAiAnalyzer {
    async fn analyze(&self, query: &str, products: &[ScoredProduct]) -> Result<Analysis, AnalysisError> {
        let user_prompt = format_user_prompt(query, products);
        let request = ChatRequest {
            model: &self.model,
            messages: vec![
                ChatMessage {
                    role: "system",
                    content: SYSTEM_PROMPT,
                },
                ChatMessage {
                    role: "user",
                    content: &user_prompt,
                },
            ],
            temperature: self.temperature,
            max_tokens: self.max_tokens,
        };

        let url = format!("{}/chat/completions", self.base_url.trim_end_matches('/'));
        let response = self
            .client
            .post(url)
            .bearer_auth(&self.api_key)
            .json(&request)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(AnalysisError::Status {
                status: status.as_u16(),
                body,
            });
        }

        let reply: ChatResponse = response.json().await?;
        let content = reply
            .choices
            .into_iter()
            .next()
            .and_then(|c| c.message.content)
            .filter(|c| !c.trim().is_empty())
            .ok_or(AnalysisError::EmptyResponse)?;

        Ok(parse_analysis(&content))
    }
}
