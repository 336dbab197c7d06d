// TF-IDF vector space over word n-grams
use crate::tokenizer::{ngrams, tokenize};
use crate::vector::SparseVector;
use ahash::AHashMap;
use rayon::prelude::*;

#[derive(Debug, Clone)]
pub struct TfidfVectorizer {
    // term -> dimension index, dimensions ordered alphabetically by term
    vocabulary: AHashMap<String, usize>,
    // dimension -> term
    terms: Vec<String>,
    // dimension -> inverse document frequency
    idf: Vec<f32>,
    ngram_range: (usize, usize),
}

impl TfidfVectorizer {
    /// Learn the vocabulary and idf weights from a document set.
    ///
    /// The vocabulary keeps the `max_features` terms with the highest total
    /// count across the corpus; ties go to the lexicographically smaller term.
    pub fn fit(documents: &[String], ngram_range: (usize, usize), max_features: usize) -> Self {
        let n_docs = documents.len() as f32;

        let counted: Vec<AHashMap<String, u32>> = documents
            .par_iter()
            .map(|doc| Self::count_terms(doc, ngram_range))
            .collect();

        // term -> (corpus frequency, document frequency)
        let mut stats: AHashMap<&str, (u64, u32)> = AHashMap::new();
        for counts in &counted {
            for (term, &tf) in counts {
                let entry = stats.entry(term.as_str()).or_insert((0, 0));
                entry.0 += u64::from(tf);
                entry.1 += 1;
            }
        }

        let mut ranked: Vec<(&str, u64, u32)> =
            stats.into_iter().map(|(t, (cf, df))| (t, cf, df)).collect();
        ranked.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(b.0)));
        ranked.truncate(max_features);
        ranked.sort_by(|a, b| a.0.cmp(b.0));

        let mut vocabulary = AHashMap::with_capacity(ranked.len());
        let mut terms = Vec::with_capacity(ranked.len());
        let mut idf = Vec::with_capacity(ranked.len());
        for (idx, (term, _cf, df)) in ranked.into_iter().enumerate() {
            vocabulary.insert(term.to_string(), idx);
            terms.push(term.to_string());
            // Smoothed idf: ln((1 + n) / (1 + df)) + 1
            idf.push(((1.0 + n_docs) / (1.0 + df as f32)).ln() + 1.0);
        }

        Self {
            vocabulary,
            terms,
            idf,
            ngram_range,
        }
    }

    /// Fit on the documents and return their L2-normalized vectors in input order.
    pub fn fit_transform(
        documents: &[String],
        ngram_range: (usize, usize),
        max_features: usize,
    ) -> (Self, Vec<SparseVector>) {
        let vectorizer = Self::fit(documents, ngram_range, max_features);
        let vectors = documents
            .par_iter()
            .map(|doc| vectorizer.transform(doc))
            .collect();
        (vectorizer, vectors)
    }

    /// Project text into the fitted space. Out-of-vocabulary terms are ignored.
    pub fn transform(&self, text: &str) -> SparseVector {
        let counts = Self::count_terms(text, self.ngram_range);
        let pairs = counts
            .into_iter()
            .filter_map(|(term, tf)| {
                self.vocabulary
                    .get(&term)
                    .map(|&idx| (idx, tf as f32 * self.idf[idx]))
            })
            .collect();
        let mut vector = SparseVector::from_pairs(pairs);
        vector.normalize();
        vector
    }

    fn count_terms(text: &str, (min_n, max_n): (usize, usize)) -> AHashMap<String, u32> {
        let tokens = tokenize(text);
        let mut counts = AHashMap::new();
        for term in ngrams(&tokens, min_n, max_n) {
            *counts.entry(term).or_insert(0) += 1;
        }
        counts
    }

    #[inline]
    #[must_use]
    pub fn vocabulary_size(&self) -> usize {
        self.terms.len()
    }

    #[inline]
    pub fn contains(&self, term: &str) -> bool {
        self.vocabulary.contains_key(term)
    }

    /// Term stored at a dimension.
    #[inline]
    pub fn term(&self, idx: usize) -> Option<&str> {
        self.terms.get(idx).map(String::as_str)
    }

    #[inline]
    pub fn idf(&self, term: &str) -> Option<f32> {
        self.vocabulary.get(term).map(|&idx| self.idf[idx])
    }
}
