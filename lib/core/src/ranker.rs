//! Query ranking with tiered fallback
//!
//! A query is scored against every product, then passed through up to three
//! tiers. Each tier runs only when the previous one produced nothing:
//!
//! ```text
//! Strict ──(empty)──> Relaxed ──(empty)──> Forced
//! ```
//!
//! - **Strict**: positive-score candidates from the widened pool that pass the
//!   validity filter.
//! - **Relaxed**: any positive-score product that passes the validity filter;
//!   generic names are re-derived from the URL.
//! - **Forced**: the raw top `k` by score, unfiltered, every name replaced by
//!   its URL-derived form. Scores of zero (or below) can appear here.

use crate::explain::build_reason;
use crate::filter::Filter;
use crate::index::ProductIndex;
use crate::normalize::derive_name_from_url;
use crate::record::ScoredProduct;
use crate::tokenizer::keywords;
use ordered_float::OrderedFloat;
use std::cmp::Reverse;

/// Fallback tier a result set was produced by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Tier {
    Strict,
    Relaxed,
    Forced,
}

impl Tier {
    /// Tier to try when this one yields no results.
    pub fn next(self) -> Option<Tier> {
        match self {
            Tier::Strict => Some(Tier::Relaxed),
            Tier::Relaxed => Some(Tier::Forced),
            Tier::Forced => None,
        }
    }
}

/// Results of one search plus the tier that produced them.
#[derive(Debug, Clone, PartialEq)]
pub struct SearchOutcome {
    pub tier: Tier,
    pub results: Vec<ScoredProduct>,
}

struct Ranking<'a> {
    index: &'a ProductIndex,
    filter: &'a dyn Filter,
    scores: Vec<f32>,
    // indices by descending score, ties in index order
    order: Vec<usize>,
    pool_size: usize,
    query_keywords: Vec<String>,
    top_k: usize,
}

impl<'a> Ranking<'a> {
    fn new(index: &'a ProductIndex, filter: &'a dyn Filter, query: &str, top_k: usize) -> Self {
        let scores = index.similarities(query);
        let mut order: Vec<usize> = (0..scores.len()).collect();
        order.sort_by_key(|&i| Reverse(OrderedFloat(scores[i])));

        let pool_size = top_k
            .saturating_mul(index.config().index.pool_factor)
            .min(order.len());

        Self {
            index,
            filter,
            scores,
            order,
            pool_size,
            query_keywords: keywords(query),
            top_k,
        }
    }

    fn hit(&self, idx: usize, rename: impl FnOnce(&str) -> Option<String>) -> ScoredProduct {
        let stored = &self.index.products()[idx];
        let score = self.scores[idx];
        let reason = build_reason(
            &self.query_keywords,
            stored,
            score,
            self.index.config().index.reason_terms,
        );
        let mut record = stored.clone();
        if let Some(name) = rename(&stored.product_name) {
            record.product_name = name;
        }
        ScoredProduct {
            record,
            similarity_score: score,
            reason,
        }
    }

    fn eligible(&self, idx: usize) -> bool {
        self.scores[idx] > 0.0 && self.filter.matches(&self.index.products()[idx])
    }

    fn run(&self, tier: Tier) -> Vec<ScoredProduct> {
        match tier {
            Tier::Strict => self.order[..self.pool_size]
                .iter()
                .copied()
                .filter(|&i| self.eligible(i))
                .take(self.top_k)
                .map(|i| self.hit(i, |_| None))
                .collect(),
            Tier::Relaxed => {
                let normalizer = self.index.normalizer();
                self.order
                    .iter()
                    .copied()
                    .filter(|&i| self.eligible(i))
                    .take(self.top_k)
                    .map(|i| {
                        let url = &self.index.products()[i].url;
                        self.hit(i, |name| {
                            if normalizer.is_generic_name(name) {
                                derive_name_from_url(url)
                            } else {
                                None
                            }
                        })
                    })
                    .collect()
            }
            Tier::Forced => self
                .order
                .iter()
                .copied()
                .take(self.top_k)
                .map(|i| {
                    let url = &self.index.products()[i].url;
                    self.hit(i, |_| derive_name_from_url(url))
                })
                .collect(),
        }
    }
}

/// Rank products for a query and report which tier answered.
///
/// Returns an empty result with [`Tier::Forced`] when the index is empty or
/// `top_k` is zero.
pub fn search_with_tier(index: &ProductIndex, query: &str, top_k: usize) -> SearchOutcome {
    search_with_filter(index, index.filter(), query, top_k)
}

/// Like [`search_with_tier`], but the Strict and Relaxed tiers only keep
/// products accepted by `filter` instead of the index's validity filter.
pub fn search_with_filter(
    index: &ProductIndex,
    filter: &dyn Filter,
    query: &str,
    top_k: usize,
) -> SearchOutcome {
    if top_k == 0 || index.is_empty() {
        return SearchOutcome {
            tier: Tier::Forced,
            results: Vec::new(),
        };
    }

    let ranking = Ranking::new(index, filter, query, top_k);
    let mut tier = Tier::Strict;
    loop {
        let results = ranking.run(tier);
        if !results.is_empty() {
            tracing::debug!(?tier, hits = results.len(), "search answered");
            return SearchOutcome { tier, results };
        }
        match tier.next() {
            Some(next) => {
                tracing::debug!(from = ?tier, to = ?next, "tier empty, falling back");
                tier = next;
            }
            None => return SearchOutcome { tier, results },
        }
    }
}

/// Rank products for a free-text need, best first.
///
/// Results are sorted by non-increasing `similarity_score` and are copies of
/// the indexed records; the index is never modified.
pub fn search(index: &ProductIndex, query: &str, top_k: usize) -> Vec<ScoredProduct> {
    search_with_tier(index, query, top_k).results
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::EngineConfig;
    use crate::record::ProductRecord;

    fn product(slug: &str, name: &str, desc: &str) -> ProductRecord {
        ProductRecord::new(name, format!("https://x.com/tr/urunler/grup/alt/{}", slug))
            .with_category("Su Şartlandırma")
            .with_description(desc)
    }

    fn index() -> ProductIndex {
        ProductIndex::build(
            vec![
                product("maks-200", "MAKS-200 Antiskalant", "Kazan suyu için kireç önleyici."),
                product("maks-310", "MAKS-310 Korozyon İnhibitörü", "Soğutma suyu için korozyon önleyici."),
                product("maks-500", "MAKS-500 Biyosit", "Soğutma kulesi için biyosit."),
                product("maks-700", "MAKS-700 Membran Temizleyici", "Ters ozmoz membran temizliği."),
            ],
            &EngineConfig::default(),
        )
    }

    #[test]
    fn test_tier_transitions() {
        assert_eq!(Tier::Strict.next(), Some(Tier::Relaxed));
        assert_eq!(Tier::Relaxed.next(), Some(Tier::Forced));
        assert_eq!(Tier::Forced.next(), None);
    }

    #[test]
    fn test_strict_results_sorted() {
        let outcome = search_with_tier(&index(), "soğutma suyu korozyon", 3);
        assert_eq!(outcome.tier, Tier::Strict);
        assert!(!outcome.results.is_empty());
        assert!(outcome.results.len() <= 3);
        assert_eq!(outcome.results[0].record.product_name, "MAKS-310 Korozyon İnhibitörü");
        for pair in outcome.results.windows(2) {
            assert!(pair[0].similarity_score >= pair[1].similarity_score);
        }
        for hit in &outcome.results {
            assert!(hit.similarity_score > 0.0 && hit.similarity_score <= 1.0);
        }
    }

    #[test]
    fn test_reason_attached() {
        let results = search(&index(), "membran temizleyici", 1);
        assert_eq!(results.len(), 1);
        assert!(results[0].reason.starts_with("matched terms: membran, temizleyici"));
        assert!(results[0].reason.contains("category: Su Şartlandırma"));
        assert!(results[0].reason.ends_with('%'));
    }

    #[test]
    fn test_forced_tier_without_overlap() {
        let outcome = search_with_tier(&index(), "xyzzy plugh", 2);
        assert_eq!(outcome.tier, Tier::Forced);
        assert_eq!(outcome.results.len(), 2);
        assert_eq!(outcome.results[0].record.product_name, "MAKS 200");
        assert_eq!(outcome.results[1].record.product_name, "MAKS 310");
        assert!(outcome.results.iter().all(|r| r.similarity_score == 0.0));
    }

    #[test]
    fn test_empty_query_falls_to_forced() {
        let outcome = search_with_tier(&index(), "", 1);
        assert_eq!(outcome.tier, Tier::Forced);
        assert_eq!(outcome.results.len(), 1);
    }

    #[test]
    fn test_zero_top_k_and_empty_index() {
        assert!(search(&index(), "kazan", 0).is_empty());
        let empty = ProductIndex::build(Vec::new(), &EngineConfig::default());
        assert!(search(&empty, "kazan", 3).is_empty());
    }

    #[test]
    fn test_search_is_idempotent() {
        let index = index();
        let first = search(&index, "soğutma kulesi biyosit", 3);
        let second = search(&index, "soğutma kulesi biyosit", 3);
        assert_eq!(first, second);
        assert_eq!(index.get(0).unwrap().product_name, "MAKS-200 Antiskalant");
    }

    #[test]
    fn test_relaxed_tier_scans_full_ranking() {
        let mut config = EngineConfig::default();
        config.index.pool_factor = 1;
        let index = ProductIndex::build(
            vec![
                product("maks-100", "MAKS-100 Kireç Çözücü", "Asidik kazan temizleyici."),
                product("maks-200", "MAKS-200 Antiskalant", "Kazan suyu için."),
                product("maks-300", "MAKS-300 Biyosit", "Kule suyu için."),
            ],
            &config,
        );
        let ranking = Ranking::new(&index, index.filter(), "kazan", 2);
        assert_eq!(ranking.pool_size, 2);

        let relaxed = ranking.run(Tier::Relaxed);
        assert_eq!(relaxed.len(), 2);
        assert!(relaxed.iter().all(|hit| hit.similarity_score > 0.0));
        assert_eq!(relaxed, ranking.run(Tier::Strict));
    }

    struct RejectAll;

    impl Filter for RejectAll {
        fn matches(&self, _record: &ProductRecord) -> bool {
            false
        }
    }

    struct NameContains(&'static str);

    impl Filter for NameContains {
        fn matches(&self, record: &ProductRecord) -> bool {
            record.product_name.contains(self.0)
        }
    }

    #[test]
    fn test_custom_filter_restricts_tiers() {
        let index = index();
        let outcome = search_with_filter(&index, &NameContains("Biyosit"), "soğutma suyu", 3);
        assert_eq!(outcome.tier, Tier::Strict);
        assert_eq!(outcome.results.len(), 1);
        assert_eq!(outcome.results[0].record.product_name, "MAKS-500 Biyosit");
    }

    #[test]
    fn test_rejecting_filter_forces_fallback() {
        let index = index();
        let outcome = search_with_filter(&index, &RejectAll, "kazan suyu kireç", 2);
        assert_eq!(outcome.tier, Tier::Forced);
        assert_eq!(outcome.results.len(), 2);
        assert_eq!(outcome.results[0].record.product_name, "MAKS 200");
        assert!(outcome.results[0].similarity_score > 0.0);
    }
}
