//! Analysis collaborator contract
//!
//! An analyzer turns the customer's need and the top-ranked products into a
//! short summary, safety notes and a follow-up suggestion. Analyzer failures
//! never reach the customer; callers substitute [`Analysis::fallback`].

use chemrank_core::ScoredProduct;
use serde::{Deserialize, Serialize};
use std::future::Future;
use thiserror::Error;

pub const FALLBACK_SUMMARY: &str = "Ürün analizi tamamlandı.";
pub const FALLBACK_SAFETY: &str = "Güvenlik bilgileri için teknik ekibimizle iletişime geçin.";
pub const FALLBACK_FOLLOW_UP: &str = "Detaylı bilgi ve fiyat teklifi için bize ulaşın.";

// Defaults for keys missing from an otherwise valid JSON answer
const DEFAULT_SUMMARY: &str = "Analiz tamamlandı.";
const DEFAULT_SAFETY: &str = "Güvenlik bilgisi mevcut değil.";
const DEFAULT_FOLLOW_UP: &str = "Detaylı bilgi için iletişime geçin.";

#[derive(Error, Debug)]
pub enum AnalysisError {
    #[error("API key not configured: {0}")]
    MissingApiKey(String),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Analyzer returned status {status}: {body}")]
    Status { status: u16, body: String },

    #[error("Analyzer returned no content")]
    EmptyResponse,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Analysis {
    pub summary: String,
    pub safety: String,
    pub follow_up: String,
}

impl Analysis {
    /// Fixed answer used whenever the analyzer cannot produce one.
    pub fn fallback() -> Self {
        Self {
            summary: FALLBACK_SUMMARY.to_string(),
            safety: FALLBACK_SAFETY.to_string(),
            follow_up: FALLBACK_FOLLOW_UP.to_string(),
        }
    }
}

/// Produces an [`Analysis`] for a query and its ranked products.
pub trait Analyzer: Send + Sync {
    fn analyze(
        &self,
        query: &str,
        products: &[ScoredProduct],
    ) -> impl Future<Output = Result<Analysis, AnalysisError>> + Send;
}

/// Analyzer that always answers with [`Analysis::fallback`].
#[derive(Debug, Clone, Copy, Default)]
pub struct FallbackAnalyzer;

impl Analyzer for FallbackAnalyzer {
    async fn analyze(&self, _query: &str, _products: &[ScoredProduct]) -> Result<Analysis, AnalysisError> {
        Ok(Analysis::fallback())
    }
}

#[derive(Clone, Copy, PartialEq)]
enum Section {
    Summary,
    Safety,
    FollowUp,
}

fn strip_code_fence(content: &str) -> &str {
    let trimmed = content.trim();
    let Some(rest) = trimmed.strip_prefix("```") else {
        return trimmed;
    };
    let rest = rest.strip_prefix("json").unwrap_or(rest);
    rest.strip_suffix("```").unwrap_or(rest).trim()
}

fn clean_value(text: &str) -> &str {
    text.trim().trim_end_matches(',').trim().trim_matches('"')
}

/// Parse an analyzer's free-text answer.
///
/// A JSON object is read field by field, missing keys taking neutral
/// defaults. Anything else is read line by line: a line naming `summary`,
/// `safety` or `follow_up` starts that section, and following lines extend it.
/// Sections that stay empty take the fallback text.
pub fn parse_analysis(content: &str) -> Analysis {
    let body = strip_code_fence(content);

    if let Ok(serde_json::Value::Object(map)) = serde_json::from_str::<serde_json::Value>(body) {
        let field = |key: &str, default: &str| {
            map.get(key)
                .and_then(|v| v.as_str())
                .map(String::from)
                .unwrap_or_else(|| default.to_string())
        };
        return Analysis {
            summary: field("summary", DEFAULT_SUMMARY),
            safety: field("safety", DEFAULT_SAFETY),
            follow_up: field("follow_up", DEFAULT_FOLLOW_UP),
        };
    }

    let mut summary = String::new();
    let mut safety = String::new();
    let mut follow_up = String::new();
    let mut current: Option<Section> = None;

    for line in body.lines().map(str::trim).filter(|l| !l.is_empty()) {
        let lower = line.to_lowercase();
        let header = if lower.contains("summary") {
            Some(Section::Summary)
        } else if lower.contains("safety") {
            Some(Section::Safety)
        } else if lower.contains("follow_up") || lower.contains("follow-up") {
            Some(Section::FollowUp)
        } else {
            None
        };

        match header {
            Some(section) => {
                current = Some(section);
                let value = line.split_once(':').map(|(_, v)| v).unwrap_or(line);
                let target = match section {
                    Section::Summary => &mut summary,
                    Section::Safety => &mut safety,
                    Section::FollowUp => &mut follow_up,
                };
                *target = clean_value(value).to_string();
            }
            None => {
                let Some(section) = current else { continue };
                let target = match section {
                    Section::Summary => &mut summary,
                    Section::Safety => &mut safety,
                    Section::FollowUp => &mut follow_up,
                };
                let value = clean_value(line);
                if !value.is_empty() && !matches!(value, "{" | "}") {
                    if !target.is_empty() {
                        target.push(' ');
                    }
                    target.push_str(value);
                }
            }
        }
    }

    let or_fallback = |s: String, fallback: &str| {
        if s.is_empty() {
            fallback.to_string()
        } else {
            s
        }
    };
    Analysis {
        summary: or_fallback(summary, FALLBACK_SUMMARY),
        safety: or_fallback(safety, FALLBACK_SAFETY),
        follow_up: or_fallback(follow_up, FALLBACK_FOLLOW_UP),
    }
}
