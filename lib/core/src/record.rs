use serde::{Deserialize, Serialize};

/// Category used when a scraped line carries none.
pub const DEFAULT_CATEGORY: &str = "Bimaks";

fn default_category() -> String {
    DEFAULT_CATEGORY.to_string()
}

/// One catalog item as produced by the scraper.
///
/// Every field is optional on the wire; missing fields fall back to an empty
/// string or sequence, and `category` falls back to [`DEFAULT_CATEGORY`].
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ProductRecord {
    #[serde(default)]
    pub product_name: String,
    #[serde(default = "default_category")]
    pub category: String,
    #[serde(default)]
    pub applications: Vec<String>,
    #[serde(default)]
    pub problems_solved: Vec<String>,
    #[serde(default)]
    pub key_params: Vec<String>,
    #[serde(default)]
    pub short_desc: String,
    #[serde(default)]
    pub url: String,
}

impl Default for ProductRecord {
    fn default() -> Self {
        Self {
            product_name: String::new(),
            category: default_category(),
            applications: Vec::new(),
            problems_solved: Vec::new(),
            key_params: Vec::new(),
            short_desc: String::new(),
            url: String::new(),
        }
    }
}

impl ProductRecord {
    #[inline]
    #[must_use]
    pub fn new(product_name: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            product_name: product_name.into(),
            url: url.into(),
            ..Self::default()
        }
    }

    #[inline]
    #[must_use]
    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = category.into();
        self
    }

    #[inline]
    #[must_use]
    pub fn with_description(mut self, short_desc: impl Into<String>) -> Self {
        self.short_desc = short_desc.into();
        self
    }

    #[must_use]
    pub fn with_applications<I, S>(mut self, items: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.applications = items.into_iter().map(Into::into).collect();
        self
    }

    #[must_use]
    pub fn with_problems_solved<I, S>(mut self, items: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.problems_solved = items.into_iter().map(Into::into).collect();
        self
    }

    #[must_use]
    pub fn with_key_params<I, S>(mut self, items: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.key_params = items.into_iter().map(Into::into).collect();
        self
    }

    /// The searchable document for this record.
    ///
    /// Field order is fixed: name, category, applications, problems solved,
    /// key parameters, description. The result is lower-cased.
    pub fn document_text(&self) -> String {
        let applications = self.applications.join(" ");
        let problems_solved = self.problems_solved.join(" ");
        let key_params = self.key_params.join(" ");
        [
            self.product_name.as_str(),
            self.category.as_str(),
            applications.as_str(),
            problems_solved.as_str(),
            key_params.as_str(),
            self.short_desc.as_str(),
        ]
        .join(" ")
        .to_lowercase()
    }
}

/// A search hit: a copy of the stored record plus per-query annotations.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ScoredProduct {
    #[serde(flatten)]
    pub record: ProductRecord,
    /// Raw cosine similarity, not renormalized.
    pub similarity_score: f32,
    pub reason: String,
}
