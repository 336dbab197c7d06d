//! Explainability for ranked results
//!
//! Every search hit carries a short human-readable reason: which query
//! keywords literally occur in the product's own text, the product category,
//! and the similarity as a whole percentage.

use crate::record::ProductRecord;
use crate::tokenizer::keywords;
use std::collections::HashSet;
use std::fmt;

/// Structured form of a result's reason string.
#[derive(Debug, Clone, PartialEq)]
pub struct Explanation {
    /// Query keywords found in the document, in query order.
    pub matched_terms: Vec<String>,
    /// Product category, when the record has one.
    pub category: Option<String>,
    /// Similarity rendered as an integer percentage.
    pub percent: i64,
}

impl Explanation {
    /// Explain why `record` matched a query.
    ///
    /// # Arguments
    /// * `query_keywords` - output of [`keywords`] for the query
    /// * `record` - the product as it will be returned
    /// * `score` - raw cosine similarity
    /// * `max_terms` - cap on listed matched terms
    pub fn new(query_keywords: &[String], record: &ProductRecord, score: f32, max_terms: usize) -> Self {
        let doc_keywords: HashSet<String> = keywords(&record.document_text()).into_iter().collect();
        let matched_terms = query_keywords
            .iter()
            .filter(|kw| doc_keywords.contains(kw.as_str()))
            .take(max_terms)
            .cloned()
            .collect();

        let category = Some(record.category.trim())
            .filter(|c| !c.is_empty())
            .map(String::from);

        Self {
            matched_terms,
            category,
            percent: (score * 100.0).round() as i64,
        }
    }
}

impl fmt::Display for Explanation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut parts = Vec::with_capacity(3);
        if !self.matched_terms.is_empty() {
            parts.push(format!("matched terms: {}", self.matched_terms.join(", ")));
        }
        if let Some(category) = &self.category {
            parts.push(format!("category: {}", category));
        }
        parts.push(format!("similarity: {}%", self.percent));
        write!(f, "{}", parts.join("; "))
    }
}

/// Reason string for a search hit.
pub fn build_reason(query_keywords: &[String], record: &ProductRecord, score: f32, max_terms: usize) -> String {
    Explanation::new(query_keywords, record, score, max_terms).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record() -> ProductRecord {
        ProductRecord::new("MAKS-310 Korozyon İnhibitörü", "https://x.com/a/b/c/maks-310")
            .with_category("Soğutma Suyu")
            .with_description("Soğutma suyu için korozyon önleyici.")
    }

    #[test]
    fn test_full_reason() {
        let kws = keywords("korozyon önleyici soğutma");
        let reason = build_reason(&kws, &record(), 0.573, 5);
        assert_eq!(
            reason,
            "matched terms: korozyon, önleyici, soğutma; category: Soğutma Suyu; similarity: 57%"
        );
    }

    #[test]
    fn test_no_matched_terms() {
        let kws = keywords("zzz yyy");
        let reason = build_reason(&kws, &record(), 0.0, 5);
        assert_eq!(reason, "category: Soğutma Suyu; similarity: 0%");
    }

    #[test]
    fn test_terms_capped() {
        let kws = keywords("maks 310 korozyon soğutma suyu için önleyici");
        let explanation = Explanation::new(&kws, &record(), 0.5, 5);
        assert_eq!(explanation.matched_terms, vec!["maks", "310", "korozyon", "soğutma", "suyu"]);
    }

    #[test]
    fn test_empty_category_omitted() {
        let r = record().with_category("  ");
        let explanation = Explanation::new(&[], &r, 1.0, 5);
        assert_eq!(explanation.category, None);
        assert_eq!(explanation.to_string(), "similarity: 100%");
    }
}
