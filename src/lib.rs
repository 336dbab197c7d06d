//! # chemrank
//!
//! Lexical product ranking for a water-treatment chemical catalog.
//!
//! chemrank matches a customer's free-text need against scraped product
//! pages and returns the best products, each with a short explanation. It
//! filters out menu and category pages, repairs generic names from the URL
//! slug, and never returns nothing while any product exists.
//!
//! ## Quick Start
//!
//! ### From the command line
//!
//! ```bash
//! chemrank --data data/products.jsonl search "soğutma suyu korozyon önleyici"
//! chemrank recommend "kazanda kireçlenme var"
//! ```
//!
//! ### As a Library
//!
//! ```rust,no_run
//! use chemrank::prelude::*;
//!
//! let catalog = CatalogManager::open("data/products.jsonl", EngineConfig::default());
//! for hit in catalog.search("kazan suyu antiskalant", 3) {
//!     println!("{} ({:.2}) - {}", hit.record.product_name, hit.similarity_score, hit.reason);
//! }
//! ```
//!
//! ## Crate Structure
//!
//! - [`chemrank-core`](https://docs.rs/chemrank-core) - Records, validity filter, normalizer, TF-IDF index, ranker
//! - [`chemrank-storage`](https://docs.rs/chemrank-storage) - JSONL record store, snapshot-swapping catalog
//! - [`chemrank-advisor`](https://docs.rs/chemrank-advisor) - Analysis collaborator and recommendation flow

// Re-export core types
pub use chemrank_core::{
    EngineConfig, HeuristicsConfig, IndexConfig,
    ProductRecord, ScoredProduct,
    ValidityFilter, Normalizer, ProductIndex, IndexStats,
    SearchOutcome, Tier,
    Error, Result,
};

// Re-export storage
pub use chemrank_storage::CatalogManager;

// Re-export advisor
pub use chemrank_advisor::{Advisor, AdvisorError, Analysis, Analyzer, FallbackAnalyzer, OpenAiAnalyzer, Recommendation};

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::{
        EngineConfig, HeuristicsConfig, IndexConfig,
        ProductRecord, ScoredProduct,
        ValidityFilter, Normalizer, ProductIndex, IndexStats,
        SearchOutcome, Tier,
        Error, Result,
        CatalogManager,
        Advisor, AdvisorError, Analysis, Analyzer, FallbackAnalyzer, OpenAiAnalyzer, Recommendation,
    };
}

/// Ranking entry points
pub mod ranker {
    pub use chemrank_core::ranker::{search, search_with_filter, search_with_tier};
}
