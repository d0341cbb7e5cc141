//! Relevance search over an [`InvertedIndex`].
//!
//! Query terms are combined with OR semantics: a product matching any term is
//! a candidate, and its score is the sum of `tf * idf` over the terms it
//! contains.

use std::collections::BTreeSet;

use ahash::AHashMap;
use serde::{Deserialize, Serialize};

use crate::error::{Result, VitrineError};
use crate::lexical::index::InvertedIndex;
use crate::util::rank::{by_score_then_id, top_k};

/// A ranked search result.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchHit {
    pub product_id: String,
    pub score: f64,
    /// Query tokens found in the product.
    pub matched_terms: BTreeSet<String>,
}

/// Runs queries against a built index.
#[derive(Debug, Clone, Copy)]
pub struct LexicalSearcher<'a> {
    index: &'a InvertedIndex,
}

impl<'a> LexicalSearcher<'a> {
    pub fn new(index: &'a InvertedIndex) -> Self {
        Self { index }
    }

    /// Rank products against a free-text query and return at most `limit` hits.
    ///
    /// Fails with [`VitrineError::InvalidQuery`] when the query contains no
    /// tokens. Tokens unknown to the index contribute nothing. Hits are
    /// ordered by descending score, then ascending product id.
    pub fn search(&self, query: &str, limit: usize) -> Result<Vec<SearchHit>> {
        let tokens: BTreeSet<String> = self.index.analyzer().analyze(query).into_iter().collect();
        if tokens.is_empty() {
            return Err(VitrineError::invalid_query(format!(
                "query {query:?} contains no searchable terms"
            )));
        }
        if limit == 0 {
            return Ok(Vec::new());
        }

        let mut accumulated: AHashMap<&str, SearchHit> = AHashMap::new();
        for token in &tokens {
            let (Some(postings), Some(idf)) = (self.index.postings(token), self.index.idf(token))
            else {
                continue;
            };
            for posting in postings {
                let hit = accumulated
                    .entry(posting.product_id.as_str())
                    .or_insert_with(|| SearchHit {
                        product_id: posting.product_id.clone(),
                        score: 0.0,
                        matched_terms: BTreeSet::new(),
                    });
                hit.score += f64::from(posting.term_freq) * idf;
                hit.matched_terms.insert(token.clone());
            }
        }

        log::trace!(
            "query {:?}: {} tokens, {} candidates",
            query,
            tokens.len(),
            accumulated.len()
        );

        let hits: Vec<SearchHit> = accumulated.into_iter().map(|(_, hit)| hit).collect();
        Ok(top_k(hits, limit, |a, b| {
            by_score_then_id(a.score, &a.product_id, b.score, &b.product_id)
        }))
    }
}
