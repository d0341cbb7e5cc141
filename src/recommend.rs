//! Similar-product recommendations.
//!
//! Similarity is the Jaccard index over attribute `(key, value)` pairs: the
//! number of pairs two products share exactly, divided by the number of
//! distinct pairs across both.

use ahash::AHashSet;
use serde::{Deserialize, Serialize};

use crate::catalog::Catalog;
use crate::data::{Product, ValueIdentity};
use crate::error::{Result, VitrineError};
use crate::util::rank::{by_score_then_id, top_k};

/// A recommended product.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Recommendation {
    pub product_id: String,
    /// Jaccard similarity in `[0, 1]`.
    pub similarity: f64,
}

type Pair<'a> = (&'a str, ValueIdentity<'a>);

fn pairs(product: &Product) -> AHashSet<Pair<'_>> {
    product
        .attributes()
        .map(|(key, value)| (key, value.identity()))
        .collect()
}

/// Jaccard similarity of two products' attribute pairs.
///
/// Two products without any attributes have similarity 0.
pub fn jaccard(a: &Product, b: &Product) -> f64 {
    jaccard_pairs(&pairs(a), &pairs(b))
}

fn jaccard_pairs(a: &AHashSet<Pair<'_>>, b: &AHashSet<Pair<'_>>) -> f64 {
    let shared = a.iter().filter(|pair| b.contains(*pair)).count();
    let union = a.len() + b.len() - shared;
    if union == 0 {
        0.0
    } else {
        shared as f64 / union as f64
    }
}

/// Finds the products most similar to a seed product.
#[derive(Debug, Clone, Copy)]
pub struct Recommender<'a> {
    catalog: &'a Catalog,
}

impl<'a> Recommender<'a> {
    pub fn new(catalog: &'a Catalog) -> Self {
        Self { catalog }
    }

    /// Rank every other product by similarity to `seed_id`.
    ///
    /// Fails with [`VitrineError::NotFound`] for an unknown seed. The seed is
    /// never part of the result. Products sharing nothing with the seed are
    /// still candidates, ranked last. Ties are broken by ascending id.
    pub fn recommend(&self, seed_id: &str, limit: usize) -> Result<Vec<Recommendation>> {
        let seed = self
            .catalog
            .get(seed_id)
            .ok_or_else(|| VitrineError::not_found(format!("product '{seed_id}'")))?;
        if limit == 0 {
            return Ok(Vec::new());
        }

        let seed_pairs = pairs(seed);
        let candidates: Vec<Recommendation> = self
            .catalog
            .iter()
            .filter(|product| product.id() != seed.id())
            .map(|product| Recommendation {
                product_id: product.id().to_string(),
                similarity: jaccard_pairs(&seed_pairs, &pairs(product)),
            })
            .collect();

        Ok(top_k(candidates, limit, |a, b| {
            by_score_then_id(a.similarity, &a.product_id, b.similarity, &b.product_id)
        }))
    }
}
