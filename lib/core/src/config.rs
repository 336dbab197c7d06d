//! Engine configuration
//!
//! The URL and name heuristics are keyword vocabularies tuned against the
//! live catalog, so they are data rather than code. All vocabulary entries
//! are compared against text folded with [`crate::tokenizer::fold`]
//! (lower-case, Turkish letters mapped to ASCII).

use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

/// Vocabularies and thresholds for the validity filter and normalizer.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct HeuristicsConfig {
    /// URL substrings that mark menu, category or informational pages.
    pub banned_url_segments: Vec<String>,
    /// Leaf-segment substrings that rescue a URL one level above `accept_depth`.
    pub product_leaf_tokens: Vec<String>,
    /// Path depth at which a URL is accepted without further checks.
    pub accept_depth: usize,
    /// Names with at most this many characters are generic.
    pub short_name_limit: usize,
    /// Substrings that make a name boilerplate.
    pub boilerplate_names: Vec<String>,
    /// Generic "products" plurals.
    pub plural_product_markers: Vec<String>,
    /// Brand tokens that make a plural name specific.
    pub brand_tokens: Vec<String>,
    /// Category umbrella names that say nothing about a single product.
    pub umbrella_categories: Vec<String>,
    /// Tokens that keep an umbrella name specific.
    pub specific_product_tokens: Vec<String>,
    /// Substrings that make a description boilerplate.
    pub boilerplate_descriptions: Vec<String>,
    /// Descriptions shorter than this (in characters) are replaced by the name.
    pub min_description_len: usize,
}

impl Default for HeuristicsConfig {
    fn default() -> Self {
        Self {
            banned_url_segments: strings(&[
                "urun-gruplari",
                "urun gruplar",
                "hammadde",
                "haberler",
                "etkinlik",
                "teknik-makale",
                "iletisim",
                "e-bulten",
                "nasil",
                "product-groups",
                "raw-materials",
                "news",
                "events",
                "contact",
            ]),
            product_leaf_tokens: strings(&[
                "maks",
                "antiskalant",
                "temizleyici",
                "korozyon",
                "biyosit",
                "urun",
                "kimyasal",
            ]),
            accept_depth: 4,
            short_name_limit: 8,
            boilerplate_names: strings(&[
                "hakkimizda",
                "sertifika",
                "insan kaynaklari",
                "gizlilik politikasi",
                "urun gruplari",
                "urun gruplar",
                "haberler",
                "etkinlikler",
                "teknik makale",
                "e-bulten",
                "about us",
                "certificates",
                "privacy policy",
            ]),
            plural_product_markers: strings(&["urunleri", "urunler"]),
            brand_tokens: strings(&["maks"]),
            umbrella_categories: strings(&[
                "su sartlandirma kimyasallari",
                "su aritma kimyasallari",
                "proses kimyasallari",
                "kazan kimyasallari",
                "sogutma suyu kimyasallari",
                "membran kimyasallari",
            ]),
            specific_product_tokens: strings(&[
                "maks",
                "antiskalant",
                "temizleyici",
                "inhibitor",
                "biyosit",
            ]),
            boilerplate_descriptions: strings(&[
                "hakkimizda",
                "sertifika",
                "gizlilik",
                "kvkk",
                "about us",
                "privacy",
            ]),
            min_description_len: 5,
        }
    }
}

/// Lexical index and ranker parameters.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct IndexConfig {
    /// Vocabulary cap, selected by corpus term frequency.
    pub max_features: usize,
    /// Inclusive n-gram range.
    pub ngram_range: (usize, usize),
    /// Candidate pool is `pool_factor * top_k`.
    pub pool_factor: usize,
    /// Matched query keywords listed in a result's reason.
    pub reason_terms: usize,
}

impl Default for IndexConfig {
    fn default() -> Self {
        Self {
            max_features: 1000,
            ngram_range: (1, 2),
            pool_factor: 5,
            reason_terms: 5,
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct EngineConfig {
    pub heuristics: HeuristicsConfig,
    pub index: IndexConfig,
}

impl EngineConfig {
    /// Load a JSON config file. Omitted keys keep their defaults.
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self> {
        let data = std::fs::read_to_string(path)?;
        let config: Self = serde_json::from_str(&data)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        let (min_n, max_n) = self.index.ngram_range;
        if min_n == 0 || min_n > max_n {
            return Err(Error::InvalidConfig(format!(
                "ngram_range must satisfy 1 <= min <= max, got ({}, {})",
                min_n, max_n
            )));
        }
        if self.index.max_features == 0 {
            return Err(Error::InvalidConfig("max_features must be positive".to_string()));
        }
        if self.index.pool_factor == 0 {
            return Err(Error::InvalidConfig("pool_factor must be positive".to_string()));
        }
        if self.heuristics.accept_depth < 2 {
            return Err(Error::InvalidConfig(format!(
                "accept_depth must be at least 2, got {}",
                self.heuristics.accept_depth
            )));
        }
        Ok(())
    }
}
