use crate::config::EngineConfig;
use crate::filter::ValidityFilter;
use crate::normalize::Normalizer;
use crate::record::{ProductRecord, ScoredProduct};
use crate::tfidf::TfidfVectorizer;
use crate::vector::SparseVector;
use serde::Serialize;

/// Summary counters for a built index.
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
pub struct IndexStats {
    /// Records handed to the build.
    pub loaded: usize,
    /// Records dropped by the validity filter.
    pub rejected: usize,
    /// Records in the index.
    pub indexed: usize,
    /// Terms in the vector space.
    pub vocabulary: usize,
}

/// Immutable search snapshot over a product catalog.
///
/// Built in one pass: raw records -> validity filter -> normalizer -> TF-IDF.
/// Nothing mutates an index after construction; to pick up new data, build a
/// new one and swap it in.
#[derive(Debug, Clone)]
pub struct ProductIndex {
    config: EngineConfig,
    filter: ValidityFilter,
    normalizer: Normalizer,
    records: Vec<ProductRecord>,
    vectors: Vec<SparseVector>,
    vectorizer: TfidfVectorizer,
    stats: IndexStats,
}

impl ProductIndex {
    pub fn build(raw: Vec<ProductRecord>, config: &EngineConfig) -> Self {
        let filter = ValidityFilter::from_config(&config.heuristics);
        let normalizer = Normalizer::from_config(&config.heuristics);

        let loaded = raw.len();
        let valid = filter.apply(raw);
        let records = normalizer.normalize(&valid);

        let documents: Vec<String> = records.iter().map(ProductRecord::document_text).collect();
        let (vectorizer, vectors) = TfidfVectorizer::fit_transform(
            &documents,
            config.index.ngram_range,
            config.index.max_features,
        );

        let stats = IndexStats {
            loaded,
            rejected: loaded - records.len(),
            indexed: records.len(),
            vocabulary: vectorizer.vocabulary_size(),
        };
        tracing::info!(
            loaded = stats.loaded,
            rejected = stats.rejected,
            vocabulary = stats.vocabulary,
            "search index built"
        );

        Self {
            config: config.clone(),
            filter,
            normalizer,
            records,
            vectors,
            vectorizer,
            stats,
        }
    }

    /// Rank products for a free-text need. See [`crate::ranker::search`].
    pub fn search(&self, query: &str, top_k: usize) -> Vec<ScoredProduct> {
        crate::ranker::search(self, query, top_k)
    }

    /// Cosine similarity of the query against every indexed product, in index order.
    pub fn similarities(&self, query: &str) -> Vec<f32> {
        let query_vector = self.vectorizer.transform(&query.to_lowercase());
        self.vectors
            .iter()
            .map(|doc| query_vector.cosine_similarity(doc))
            .collect()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    #[inline]
    pub fn get(&self, idx: usize) -> Option<&ProductRecord> {
        self.records.get(idx)
    }

    /// All indexed products, in load order.
    pub fn products(&self) -> &[ProductRecord] {
        &self.records
    }

    /// Products whose category equals `category`, ignoring case.
    pub fn by_category(&self, category: &str) -> Vec<&ProductRecord> {
        let wanted = category.to_lowercase();
        self.records
            .iter()
            .filter(|r| r.category.to_lowercase() == wanted)
            .collect()
    }

    pub fn stats(&self) -> IndexStats {
        self.stats
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn filter(&self) -> &ValidityFilter {
        &self.filter
    }

    pub fn normalizer(&self) -> &Normalizer {
        &self.normalizer
    }

    pub fn vectorizer(&self) -> &TfidfVectorizer {
        &self.vectorizer
    }
}
