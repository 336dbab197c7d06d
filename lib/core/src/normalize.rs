//! Name and description normalization
//!
//! Scraped pages often carry a menu label or a boilerplate heading instead of
//! a product name. Generic names are detected with an ordered rule table and
//! replaced by a name derived from the URL slug, which is where the catalog
//! site encodes product identity.

use crate::config::HeuristicsConfig;
use crate::filter::path_segments;
use crate::record::ProductRecord;
use crate::tokenizer::fold;

/// One generic-name heuristic.
#[derive(Debug, Clone, PartialEq)]
pub enum NameRule {
    /// Trimmed length in characters is at most `limit`.
    TooShort { limit: usize },
    /// Name contains a boilerplate label (about us, certificates, ...).
    Boilerplate { terms: Vec<String> },
    /// Name contains a generic "products" plural and no brand token.
    PluralWithoutBrand {
        markers: Vec<String>,
        brands: Vec<String>,
    },
    /// Name is a category umbrella term and has no specific product token.
    UmbrellaCategory {
        categories: Vec<String>,
        specific: Vec<String>,
    },
}

impl NameRule {
    pub fn name(&self) -> &'static str {
        match self {
            NameRule::TooShort { .. } => "too_short",
            NameRule::Boilerplate { .. } => "boilerplate",
            NameRule::PluralWithoutBrand { .. } => "plural_without_brand",
            NameRule::UmbrellaCategory { .. } => "umbrella_category",
        }
    }

    /// Whether the rule flags `name` as generic.
    pub fn flags(&self, name: &str) -> bool {
        let trimmed = name.trim();
        let folded = fold(trimmed);
        match self {
            NameRule::TooShort { limit } => trimmed.chars().count() <= *limit,
            NameRule::Boilerplate { terms } => contains_any(&folded, terms),
            NameRule::PluralWithoutBrand { markers, brands } => {
                contains_any(&folded, markers) && !contains_any(&folded, brands)
            }
            NameRule::UmbrellaCategory {
                categories,
                specific,
            } => categories.iter().any(|c| folded == *c) && !contains_any(&folded, specific),
        }
    }
}

/// Rule tables and thresholds for the normalization stage.
#[derive(Debug, Clone)]
pub struct Normalizer {
    name_rules: Vec<NameRule>,
    description_markers: Vec<String>,
    min_description_len: usize,
}

fn contains_any(text: &str, terms: &[String]) -> bool {
    terms.iter().any(|t| text.contains(t.as_str()))
}

fn folded(items: &[String]) -> Vec<String> {
    items.iter().map(|s| fold(s)).collect()
}

impl Normalizer {
    pub fn from_config(config: &HeuristicsConfig) -> Self {
        Self {
            name_rules: vec![
                NameRule::TooShort {
                    limit: config.short_name_limit,
                },
                NameRule::Boilerplate {
                    terms: folded(&config.boilerplate_names),
                },
                NameRule::PluralWithoutBrand {
                    markers: folded(&config.plural_product_markers),
                    brands: folded(&config.brand_tokens),
                },
                NameRule::UmbrellaCategory {
                    categories: folded(&config.umbrella_categories),
                    specific: folded(&config.specific_product_tokens),
                },
            ],
            description_markers: folded(&config.boilerplate_descriptions),
            min_description_len: config.min_description_len,
        }
    }

    pub fn name_rules(&self) -> &[NameRule] {
        &self.name_rules
    }

    /// First rule that flags the name as generic.
    pub fn generic_rule(&self, name: &str) -> Option<&NameRule> {
        self.name_rules.iter().find(|rule| rule.flags(name))
    }

    pub fn is_generic_name(&self, name: &str) -> bool {
        self.generic_rule(name).is_some()
    }

    /// Return a normalized copy of one record.
    pub fn normalize_record(&self, record: &ProductRecord) -> ProductRecord {
        let mut out = record.clone();

        if let Some(rule) = self.generic_rule(&record.product_name) {
            if let Some(derived) = derive_name_from_url(&record.url) {
                tracing::debug!(
                    from = %record.product_name,
                    to = %derived,
                    rule = rule.name(),
                    "generic name replaced"
                );
                out.product_name = derived;
            }
        }

        let mut desc = record.short_desc.trim().to_string();
        let folded_desc = fold(&desc);
        if contains_any(&folded_desc, &self.description_markers) {
            desc.clear();
        }
        if desc.chars().count() < self.min_description_len {
            desc = out.product_name.clone();
        }
        out.short_desc = desc;

        out
    }

    /// Normalize every record, preserving order.
    pub fn normalize(&self, records: &[ProductRecord]) -> Vec<ProductRecord> {
        records.iter().map(|r| self.normalize_record(r)).collect()
    }
}

impl Default for Normalizer {
    fn default() -> Self {
        Self::from_config(&HeuristicsConfig::default())
    }
}

/// Product name taken from the last path segment of the URL.
///
/// Hyphens become spaces and the result is upper-cased. Returns `None` when
/// the URL has no usable segment.
pub fn derive_name_from_url(url: &str) -> Option<String> {
    let leaf = path_segments(url).pop()?;
    let name = leaf.replace('-', " ").trim().to_uppercase();
    if name.is_empty() {
        None
    } else {
        Some(name)
    }
}
