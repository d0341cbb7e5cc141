//! In-memory inverted index over a catalog.
//!
//! Every text-typed attribute value of a product, together with the product
//! id, forms the product's searchable text. Numeric values are not indexed.

use std::sync::Arc;

use ahash::AHashMap;
use serde::{Deserialize, Serialize};

use crate::analysis::Analyzer;
use crate::catalog::Catalog;
use crate::data::Product;

/// One entry of a posting list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Posting {
    /// The product containing the token.
    pub product_id: String,
    /// Occurrences of the token in the product's searchable text.
    pub term_freq: u32,
}

/// Statistics about a built index.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct InvertedIndexStats {
    pub doc_count: usize,
    pub term_count: usize,
    pub posting_count: usize,
}

/// Token to posting list mapping, derived from a [`Catalog`].
///
/// Posting lists follow catalog insertion order. The document frequency of a
/// token is the length of its posting list, since a product appears at most
/// once per list.
pub struct InvertedIndex {
    postings: AHashMap<String, Vec<Posting>>,
    doc_count: usize,
    analyzer: Arc<dyn Analyzer>,
}

impl std::fmt::Debug for InvertedIndex {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("InvertedIndex")
            .field("doc_count", &self.doc_count)
            .field("term_count", &self.postings.len())
            .field("analyzer", &self.analyzer.name())
            .finish()
    }
}

impl PartialEq for InvertedIndex {
    fn eq(&self, other: &Self) -> bool {
        self.doc_count == other.doc_count && self.postings == other.postings
    }
}

impl InvertedIndex {
    /// Build the index for every product in the catalog.
    pub fn build(catalog: &Catalog, analyzer: Arc<dyn Analyzer>) -> Self {
        let mut postings: AHashMap<String, Vec<Posting>> = AHashMap::new();

        for product in catalog {
            for (token, term_freq) in term_frequencies(product, analyzer.as_ref()) {
                postings.entry(token).or_default().push(Posting {
                    product_id: product.id().to_string(),
                    term_freq,
                });
            }
        }

        let index = Self {
            postings,
            doc_count: catalog.len(),
            analyzer,
        };
        log::debug!(
            "built inverted index: {} documents, {} terms",
            index.doc_count,
            index.postings.len()
        );
        index
    }

    /// The analyzer used at build time. Queries must be analyzed with it.
    pub fn analyzer(&self) -> &dyn Analyzer {
        self.analyzer.as_ref()
    }

    /// Posting list of a token, in catalog order.
    pub fn postings(&self, token: &str) -> Option<&[Posting]> {
        self.postings.get(token).map(Vec::as_slice)
    }

    /// Number of distinct products containing the token.
    pub fn doc_freq(&self, token: &str) -> usize {
        self.postings.get(token).map_or(0, Vec::len)
    }

    /// Total number of indexed products.
    pub fn doc_count(&self) -> usize {
        self.doc_count
    }

    /// Inverse document frequency, `ln(N / df)`. `None` for unknown tokens.
    pub fn idf(&self, token: &str) -> Option<f64> {
        match self.doc_freq(token) {
            0 => None,
            df => Some((self.doc_count as f64 / df as f64).ln()),
        }
    }

    /// Iterate distinct tokens. Order is unspecified.
    pub fn terms(&self) -> impl Iterator<Item = &str> {
        self.postings.keys().map(String::as_str)
    }

    pub fn stats(&self) -> InvertedIndexStats {
        InvertedIndexStats {
            doc_count: self.doc_count,
            term_count: self.postings.len(),
            posting_count: self.postings.values().map(Vec::len).sum(),
        }
    }
}

/// Per-token counts over a product's searchable text, in first-seen order.
fn term_frequencies(product: &Product, analyzer: &dyn Analyzer) -> Vec<(String, u32)> {
    let mut order: Vec<String> = Vec::new();
    let mut counts: AHashMap<String, u32> = AHashMap::new();

    let sources = product.text_values().chain(std::iter::once(product.id()));
    for text in sources {
        for token in analyzer.analyze(text) {
            let count = counts.entry(token.clone()).or_insert(0);
            if *count == 0 {
                order.push(token);
            }
            *count += 1;
        }
    }

    order
        .into_iter()
        .map(|token| {
            let tf = counts.get(&token).copied().unwrap_or(0);
            (token, tf)
        })
        .collect()
}
