//! # chemrank Core
//!
//! Core library for ranking a water-treatment chemical catalog against a
//! free-text customer need.
//!
//! This crate provides the ranking pipeline:
//!
//! - [`ProductRecord`] - A scraped catalog item
//! - [`ValidityFilter`] - URL rule table separating product pages from menu pages
//! - [`Normalizer`] - Generic-name and boilerplate-description cleanup
//! - [`TfidfVectorizer`] - Unigram + bigram TF-IDF vector space
//! - [`ProductIndex`] - Immutable snapshot tying the stages together
//! - [`ranker`] - Cosine ranking with Strict / Relaxed / Forced fallback tiers
//!
//! ## Example
//!
//! ```rust
//! use chemrank_core::{EngineConfig, ProductIndex, ProductRecord};
//!
//! let records = vec![
//!     ProductRecord::new(
//!         "MAKS-310 Korozyon İnhibitörü",
//!         "https://bimaks.com.tr/tr/urunler/su/sogutma/maks-310",
//!     )
//!     .with_description("Soğutma suyu için korozyon önleyici."),
//! ];
//! let index = ProductIndex::build(records, &EngineConfig::default());
//!
//! let results = index.search("korozyon önleyici", 3);
//! assert_eq!(results.len(), 1);
//! assert!(results[0].similarity_score > 0.0);
//! ```

pub mod config;
pub mod error;
pub mod explain;
pub mod filter;
pub mod index;
pub mod normalize;
pub mod ranker;
pub mod record;
pub mod tfidf;
pub mod tokenizer;
pub mod vector;

pub use config::{EngineConfig, HeuristicsConfig, IndexConfig};
pub use error::{Error, Result};
pub use explain::{build_reason, Explanation};
pub use filter::{Filter, UrlRule, ValidityFilter};
pub use index::{IndexStats, ProductIndex};
pub use normalize::{derive_name_from_url, NameRule, Normalizer};
pub use ranker::{search, search_with_filter, search_with_tier, SearchOutcome, Tier};
pub use record::{ProductRecord, ScoredProduct, DEFAULT_CATEGORY};
pub use tfidf::TfidfVectorizer;
pub use vector::SparseVector;
