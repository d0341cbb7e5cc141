//! An immutable catalog + index pair.

use std::sync::Arc;

use crate::analysis::Analyzer;
use crate::catalog::Catalog;
use crate::data::{Product, RawRecord};
use crate::error::Result;
use crate::filter::{Filter, FilterEvaluator};
use crate::lexical::{InvertedIndex, LexicalSearcher, SearchHit};
use crate::recommend::{Recommendation, Recommender};
use crate::stats::{self, CatalogProfile, StatsReport};

/// A catalog together with the inverted index derived from it.
///
/// Snapshots never change after construction and can be shared freely
/// between threads. All query methods are read-only.
#[derive(Debug)]
pub struct Snapshot {
    catalog: Catalog,
    index: InvertedIndex,
}

impl Snapshot {
    /// Build a catalog from raw records, then index it.
    pub fn build<I>(records: I, analyzer: Arc<dyn Analyzer>) -> Result<Self>
    where
        I: IntoIterator<Item = RawRecord>,
    {
        let catalog = Catalog::build(records)?;
        Ok(Self::from_catalog(catalog, analyzer))
    }

    /// Index an already built catalog.
    pub fn from_catalog(catalog: Catalog, analyzer: Arc<dyn Analyzer>) -> Self {
        let index = InvertedIndex::build(&catalog, analyzer);
        Self { catalog, index }
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn index(&self) -> &InvertedIndex {
        &self.index
    }

    pub fn search(&self, query: &str, limit: usize) -> Result<Vec<SearchHit>> {
        LexicalSearcher::new(&self.index).search(query, limit)
    }

    pub fn filter(&self, filter: &Filter, strict_attributes: bool) -> Result<Vec<String>> {
        FilterEvaluator::new(&self.catalog)
            .strict_attributes(strict_attributes)
            .evaluate(filter)
    }

    pub fn recommend(&self, seed_id: &str, limit: usize) -> Result<Vec<Recommendation>> {
        Recommender::new(&self.catalog).recommend(seed_id, limit)
    }

    pub fn summarize(&self, top_n: usize) -> StatsReport {
        stats::summarize(&self.catalog, top_n)
    }

    /// Statistics over the products matching `filter`.
    pub fn summarize_filtered(
        &self,
        filter: &Filter,
        strict_attributes: bool,
        top_n: usize,
    ) -> Result<StatsReport> {
        let products: Vec<&Product> = FilterEvaluator::new(&self.catalog)
            .strict_attributes(strict_attributes)
            .matching_products(filter)?;
        Ok(stats::summarize(products, top_n))
    }

    pub fn profile(&self) -> CatalogProfile {
        stats::profile(&self.catalog)
    }
}
