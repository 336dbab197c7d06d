use crate::analysis::{Analysis, Analyzer};
use chemrank_core::ScoredProduct;
use chemrank_storage::CatalogManager;
use serde::Serialize;
use std::sync::Arc;
use thiserror::Error;

/// Products handed to the analyzer per recommendation.
pub const DEFAULT_TOP_K: usize = 3;

#[derive(Error, Debug, PartialEq, Eq)]
pub enum AdvisorError {
    #[error("Query is empty")]
    EmptyQuery,

    #[error("No matching product found")]
    NotFound,
}

/// Answer returned to the customer.
#[derive(Debug, Clone, Serialize)]
pub struct Recommendation {
    pub summary: String,
    pub products: Vec<ScoredProduct>,
    pub safety: String,
    pub follow_up: String,
}

impl Recommendation {
    fn new(products: Vec<ScoredProduct>, analysis: Analysis) -> Self {
        Self {
            summary: analysis.summary,
            products,
            safety: analysis.safety,
            follow_up: analysis.follow_up,
        }
    }
}

/// Search plus analysis: the recommendation flow.
pub struct Advisor<A> {
    catalog: Arc<CatalogManager>,
    analyzer: A,
    top_k: usize,
}

impl<A: Analyzer> Advisor<A> {
    pub fn new(catalog: Arc<CatalogManager>, analyzer: A) -> Self {
        Self {
            catalog,
            analyzer,
            top_k: DEFAULT_TOP_K,
        }
    }

    #[must_use]
    pub fn with_top_k(mut self, top_k: usize) -> Self {
        self.top_k = top_k.max(1);
        self
    }

    pub fn catalog(&self) -> &Arc<CatalogManager> {
        &self.catalog
    }

    /// Rank products for the need and attach an analysis.
    ///
    /// Analyzer errors are logged and replaced with [`Analysis::fallback`].
    pub async fn recommend(&self, query: &str) -> Result<Recommendation, AdvisorError> {
        if query.trim().is_empty() {
            return Err(AdvisorError::EmptyQuery);
        }

        let products = self.catalog.search(query, self.top_k);
        if products.is_empty() {
            return Err(AdvisorError::NotFound);
        }

        let analysis = match self.analyzer.analyze(query, &products).await {
            Ok(analysis) => analysis,
            Err(e) => {
                tracing::warn!(error = %e, "analysis failed, using fallback text");
                Analysis::fallback()
            }
        };

        Ok(Recommendation::new(products, analysis))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::{AnalysisError, FallbackAnalyzer};
    use chemrank_core::{EngineConfig, ProductRecord};

    struct FailingAnalyzer;

    impl Analyzer for FailingAnalyzer {
        async fn analyze(&self, _query: &str, _products: &[ScoredProduct]) -> Result<Analysis, AnalysisError> {
            Err(AnalysisError::EmptyResponse)
        }
    }

    struct CountingAnalyzer;

    impl Analyzer for CountingAnalyzer {
        async fn analyze(&self, query: &str, products: &[ScoredProduct]) -> Result<Analysis, AnalysisError> {
            Ok(Analysis {
                summary: format!("{}: {}", query, products.len()),
                safety: "gözlük".to_string(),
                follow_up: "numune".to_string(),
            })
        }
    }

    fn catalog(dir: &tempfile::TempDir) -> Arc<CatalogManager> {
        let path = dir.path().join("products.jsonl");
        chemrank_storage::append(
            &path,
            &[
                ProductRecord::new("MAKS-200 Antiskalant", "https://x.com/tr/urunler/kazan/alt/maks-200")
                    .with_description("Kazan suyu için kireç önleyici."),
                ProductRecord::new("MAKS-500 Biyosit", "https://x.com/tr/urunler/kule/alt/maks-500")
                    .with_description("Soğutma kulesi için biyosit."),
            ],
        )
        .unwrap();
        Arc::new(CatalogManager::open(&path, EngineConfig::default()))
    }

    #[tokio::test]
    async fn test_recommend_uses_analysis() {
        let dir = tempfile::tempdir().unwrap();
        let advisor = Advisor::new(catalog(&dir), CountingAnalyzer);
        let rec = advisor.recommend("kireç önleyici").await.unwrap();
        assert_eq!(rec.products.len(), 1);
        assert_eq!(rec.summary, "kireç önleyici: 1");
        assert_eq!(rec.safety, "gözlük");
    }

    #[tokio::test]
    async fn test_analyzer_failure_uses_fallback() {
        let dir = tempfile::tempdir().unwrap();
        let advisor = Advisor::new(catalog(&dir), FailingAnalyzer);
        let rec = advisor.recommend("biyosit").await.unwrap();
        let fallback = Analysis::fallback();
        assert_eq!(rec.summary, fallback.summary);
        assert_eq!(rec.safety, fallback.safety);
        assert_eq!(rec.follow_up, fallback.follow_up);
        assert_eq!(rec.products[0].record.product_name, "MAKS-500 Biyosit");
    }

    #[tokio::test]
    async fn test_empty_catalog_not_found() {
        let dir = tempfile::tempdir().unwrap();
        let catalog = Arc::new(CatalogManager::open(dir.path().join("none.jsonl"), EngineConfig::default()));
        let advisor = Advisor::new(catalog, FallbackAnalyzer);
        assert_eq!(advisor.recommend("kazan").await.unwrap_err(), AdvisorError::NotFound);
        assert_eq!(advisor.recommend("   ").await.unwrap_err(), AdvisorError::EmptyQuery);
    }

    #[test]
    fn test_error_messages() {
        assert_eq!(AdvisorError::EmptyQuery.to_string(), "Query is empty");
        assert_eq!(AdvisorError::NotFound.to_string(), "No matching product found");
    }
}
