// Validity filter: tells product pages apart from menu, category and contact pages
use crate::config::HeuristicsConfig;
use crate::record::ProductRecord;
use crate::tokenizer::fold;
use percent_encoding::percent_decode_str;
use url::Url;

pub trait Filter {
    fn matches(&self, record: &ProductRecord) -> bool;
}

/// One URL heuristic. A record is valid when every rule in the table passes.
#[derive(Debug, Clone, PartialEq)]
pub enum UrlRule {
    /// URL must start with `http://` or `https://`.
    HttpScheme,
    /// URL must not embed an email address.
    NoEmailMarker,
    /// Lower-cased URL must not contain any of the segments.
    NoBannedSegment { segments: Vec<String> },
    /// Depth `>= accept_depth` passes; depth `accept_depth - 1` passes only if
    /// the leaf segment contains one of `leaf_tokens`; anything shallower fails.
    PathDepth {
        accept_depth: usize,
        leaf_tokens: Vec<String>,
    },
}

impl UrlRule {
    pub fn name(&self) -> &'static str {
        match self {
            UrlRule::HttpScheme => "http_scheme",
            UrlRule::NoEmailMarker => "no_email_marker",
            UrlRule::NoBannedSegment { .. } => "no_banned_segment",
            UrlRule::PathDepth { .. } => "path_depth",
        }
    }

    pub fn passes(&self, url: &str) -> bool {
        match self {
            UrlRule::HttpScheme => {
                let lower = url.to_lowercase();
                lower.starts_with("http://") || lower.starts_with("https://")
            }
            UrlRule::NoEmailMarker => !url.contains('@'),
            UrlRule::NoBannedSegment { segments } => {
                let folded = fold(&percent_decode_str(url).decode_utf8_lossy());
                !segments.iter().any(|s| folded.contains(s.as_str()))
            }
            UrlRule::PathDepth {
                accept_depth,
                leaf_tokens,
            } => {
                let segments = path_segments(url);
                let depth = segments.len();
                if depth >= *accept_depth {
                    true
                } else if depth + 1 == *accept_depth {
                    segments
                        .last()
                        .map(|leaf| {
                            let leaf = fold(leaf);
                            leaf_tokens.iter().any(|t| leaf.contains(t.as_str()))
                        })
                        .unwrap_or(false)
                } else {
                    false
                }
            }
        }
    }
}

/// Ordered rule table evaluated against a record's URL.
#[derive(Debug, Clone)]
pub struct ValidityFilter {
    rules: Vec<UrlRule>,
}

impl ValidityFilter {
    pub fn new(rules: Vec<UrlRule>) -> Self {
        Self { rules }
    }

    pub fn from_config(config: &HeuristicsConfig) -> Self {
        Self::new(vec![
            UrlRule::HttpScheme,
            UrlRule::NoEmailMarker,
            UrlRule::NoBannedSegment {
                segments: config.banned_url_segments.iter().map(|s| fold(s)).collect(),
            },
            UrlRule::PathDepth {
                accept_depth: config.accept_depth,
                leaf_tokens: config.product_leaf_tokens.iter().map(|s| fold(s)).collect(),
            },
        ])
    }

    pub fn rules(&self) -> &[UrlRule] {
        &self.rules
    }

    /// First rule the record fails, if any.
    pub fn check(&self, record: &ProductRecord) -> Option<&UrlRule> {
        self.rules.iter().find(|rule| !rule.passes(&record.url))
    }

    pub fn is_valid(&self, record: &ProductRecord) -> bool {
        self.check(record).is_none()
    }

    /// Keep the valid records, in order.
    pub fn apply(&self, records: Vec<ProductRecord>) -> Vec<ProductRecord> {
        records
            .into_iter()
            .filter(|record| match self.check(record) {
                None => true,
                Some(rule) => {
                    tracing::debug!(url = %record.url, rule = rule.name(), "record rejected");
                    false
                }
            })
            .collect()
    }
}

impl Default for ValidityFilter {
    fn default() -> Self {
        Self::from_config(&HeuristicsConfig::default())
    }
}

impl Filter for ValidityFilter {
    fn matches(&self, record: &ProductRecord) -> bool {
        self.is_valid(record)
    }
}

/// Non-empty, percent-decoded path segments of a URL, host excluded.
///
/// Unparseable URLs have no segments.
pub fn path_segments(url: &str) -> Vec<String> {
    Url::parse(url)
        .ok()
        .and_then(|parsed| {
            parsed.path_segments().map(|segments| {
                segments
                    .filter(|s| !s.is_empty())
                    .map(|s| percent_decode_str(s).decode_utf8_lossy().into_owned())
                    .collect()
            })
        })
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(url: &str) -> ProductRecord {
        ProductRecord::new("MAKS-200 Antiskalant", url)
    }

    #[test]
    fn test_path_segments() {
        assert_eq!(path_segments("https://bimaks.com.tr/a/b/c/"), vec!["a", "b", "c"]);
        assert!(path_segments("https://bimaks.com.tr").is_empty());
        assert!(path_segments("not a url").is_empty());
    }

    #[test]
    fn test_path_segments_decoded() {
        assert_eq!(
            path_segments("https://bimaks.com.tr/tr/kule/%C3%BCr%C3%BCn-biyo"),
            vec!["tr", "kule", "ürün-biyo"]
        );
        assert_eq!(
            path_segments("https://bimaks.com.tr/tr/kazan/maks-çözücü"),
            vec!["tr", "kazan", "maks-çözücü"]
        );
    }

    #[test]
    fn test_turkish_leaf_at_depth_three() {
        let filter = ValidityFilter::default();
        assert!(filter.is_valid(&record("https://bimaks.com.tr/tr/kule/ürün-biyo")));
        assert!(filter.is_valid(&record("https://bimaks.com.tr/tr/kule/%C3%BCr%C3%BCn-biyo")));
    }

    #[test]
    fn test_encoded_banned_segment() {
        let filter = ValidityFilter::default();
        let r = record("https://bimaks.com.tr/tr/%C3%BCr%C3%BCn-gruplar%C4%B1/kazan/maks/genel");
        assert_eq!(filter.check(&r).map(UrlRule::name), Some("no_banned_segment"));
    }

    #[test]
    fn test_depth_five_always_valid() {
        let filter = ValidityFilter::default();
        assert!(filter.is_valid(&record("https://bimaks.com.tr/tr/cozumler/sogutma/kule/genel")));
    }

    #[test]
    fn test_depth_two_always_invalid() {
        let filter = ValidityFilter::default();
        let r = record("https://bimaks.com.tr/tr/maks-biyosit");
        assert_eq!(filter.check(&r).map(UrlRule::name), Some("path_depth"));
    }

    #[test]
    fn test_depth_three_needs_product_leaf() {
        let filter = ValidityFilter::default();
        assert!(filter.is_valid(&record("https://bimaks.com.tr/tr/sogutma/oksitleyici-biyosit")));
        assert!(!filter.is_valid(&record("https://bimaks.com.tr/tr/sogutma/genel-bilgi")));
    }

    #[test]
    fn test_scheme_and_email() {
        let filter = ValidityFilter::default();
        let ftp = record("ftp://bimaks.com.tr/a/b/c/d");
        assert_eq!(filter.check(&ftp), Some(&UrlRule::HttpScheme));

        let mail = record("https://bimaks.com.tr/a/b/c/info@bimaks.com.tr");
        assert_eq!(filter.check(&mail), Some(&UrlRule::NoEmailMarker));

        assert!(!filter.is_valid(&record("")));
    }

    #[test]
    fn test_banned_segment() {
        let filter = ValidityFilter::default();
        let r = record("https://bimaks.com.tr/tr/urun-gruplari/kazan/maks/genel");
        assert_eq!(filter.check(&r).map(UrlRule::name), Some("no_banned_segment"));
        assert!(!filter.matches(&record("https://bimaks.com.tr/tr/haberler/2024/ocak/fuar")));
    }

    #[test]
    fn test_apply_keeps_order() {
        let filter = ValidityFilter::default();
        let kept = filter.apply(vec![
            record("https://x.com/a/b/c/first"),
            record("https://x.com/a"),
            record("https://x.com/a/b/c/second"),
        ]);
        let urls: Vec<_> = kept.iter().map(|r| r.url.as_str()).collect();
        assert_eq!(urls, vec!["https://x.com/a/b/c/first", "https://x.com/a/b/c/second"]);
    }
}
