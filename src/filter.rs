//! Attribute filtering.
//!
//! A [`Filter`] maps attribute names to [`Predicate`]s and matches a product
//! only when every predicate holds (logical AND). A product lacking a named
//! attribute, or holding a value of the wrong type for its predicate, simply
//! does not match.

pub mod predicate;

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::catalog::Catalog;
use crate::data::Product;
use crate::error::{Result, VitrineError};

pub use predicate::Predicate;

/// A conjunction of per-attribute predicates.
///
/// An attribute may carry several predicates; all of them must hold. In JSON
/// each attribute maps to either a single predicate or an array of them.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(from = "FilterRepr", into = "FilterRepr")]
pub struct Filter {
    predicates: BTreeMap<String, Vec<Predicate>>,
}

impl Filter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a predicate. Predicates on the same attribute are ANDed.
    pub fn with(mut self, attribute: impl Into<String>, predicate: Predicate) -> Self {
        self.push(attribute.into(), predicate);
        self
    }

    pub fn equals(self, attribute: impl Into<String>, value: impl Into<String>) -> Self {
        self.with(attribute, Predicate::equals(value))
    }

    pub fn contains(self, attribute: impl Into<String>, value: impl Into<String>) -> Self {
        self.with(attribute, Predicate::contains(value))
    }

    pub fn range(self, attribute: impl Into<String>, min: f64, max: f64) -> Self {
        self.with(attribute, Predicate::range(min, max))
    }

    fn push(&mut self, attribute: String, predicate: Predicate) {
        self.predicates.entry(attribute).or_default().push(predicate);
    }

    /// Every `(attribute, predicate)` pair, by attribute then insertion order.
    pub fn predicates(&self) -> impl Iterator<Item = (&str, &Predicate)> {
        self.predicates
            .iter()
            .flat_map(|(k, ps)| ps.iter().map(move |p| (k.as_str(), p)))
    }

    /// Number of predicates, counting each one on a shared attribute.
    pub fn len(&self) -> usize {
        self.predicates.values().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.predicates.is_empty()
    }

    /// Check a single product against every predicate.
    pub fn matches(&self, product: &Product) -> bool {
        self.predicates.iter().all(|(attribute, predicates)| {
            product
                .get(attribute)
                .is_some_and(|value| predicates.iter().all(|p| p.matches(value)))
        })
    }
}

impl FromIterator<(String, Predicate)> for Filter {
    fn from_iter<T: IntoIterator<Item = (String, Predicate)>>(iter: T) -> Self {
        let mut filter = Self::new();
        for (attribute, predicate) in iter {
            filter.push(attribute, predicate);
        }
        filter
    }
}

#[derive(Serialize, Deserialize)]
#[serde(untagged)]
enum Clauses {
    One(Predicate),
    Many(Vec<Predicate>),
}

#[derive(Serialize, Deserialize)]
#[serde(transparent)]
struct FilterRepr(BTreeMap<String, Clauses>);

impl From<FilterRepr> for Filter {
    fn from(repr: FilterRepr) -> Self {
        let predicates = repr
            .0
            .into_iter()
            .filter_map(|(attribute, clauses)| {
                let predicates = match clauses {
                    Clauses::One(p) => vec![p],
                    Clauses::Many(ps) => ps,
                };
                (!predicates.is_empty()).then_some((attribute, predicates))
            })
            .collect();
        Self { predicates }
    }
}

impl From<Filter> for FilterRepr {
    fn from(filter: Filter) -> Self {
        FilterRepr(
            filter
                .predicates
                .into_iter()
                .map(|(attribute, mut predicates)| {
                    let clauses = if predicates.len() == 1 {
                        Clauses::One(predicates.remove(0))
                    } else {
                        Clauses::Many(predicates)
                    };
                    (attribute, clauses)
                })
                .collect(),
        )
    }
}

/// Decode a JSON object of `attribute -> predicate` (or `attribute -> [predicate, ..]`).
///
/// Unknown predicate kinds and missing fields are reported as
/// [`VitrineError::InvalidPredicate`].
pub fn parse_predicates(json: &str) -> Result<Filter> {
    serde_json::from_str(json).map_err(|e| VitrineError::invalid_predicate(e.to_string()))
}

/// Evaluates filters against a catalog.
#[derive(Debug, Clone, Copy)]
pub struct FilterEvaluator<'a> {
    catalog: &'a Catalog,
    strict_attributes: bool,
}

impl<'a> FilterEvaluator<'a> {
    pub fn new(catalog: &'a Catalog) -> Self {
        Self {
            catalog,
            strict_attributes: false,
        }
    }

    /// When set, predicates on attributes outside the catalog vocabulary are
    /// rejected instead of matching nothing.
    pub fn strict_attributes(mut self, strict: bool) -> Self {
        self.strict_attributes = strict;
        self
    }

    /// Ids of matching products, in catalog order.
    pub fn evaluate(&self, filter: &Filter) -> Result<Vec<String>> {
        Ok(self
            .matching_products(filter)?
            .into_iter()
            .map(|product| product.id().to_string())
            .collect())
    }

    /// Matching products, in catalog order.
    pub fn matching_products(&self, filter: &Filter) -> Result<Vec<&'a Product>> {
        self.validate(filter)?;
        let products: Vec<&'a Product> = self
            .catalog
            .iter()
            .filter(|product| filter.matches(product))
            .collect();
        log::trace!(
            "filter with {} predicates matched {} of {} products",
            filter.len(),
            products.len(),
            self.catalog.len()
        );
        Ok(products)
    }

    fn validate(&self, filter: &Filter) -> Result<()> {
        for (attribute, predicate) in filter.predicates() {
            predicate.validate().map_err(|e| match e {
                VitrineError::InvalidPredicate(msg) => {
                    VitrineError::invalid_predicate(format!("{attribute}: {msg}"))
                }
                other => other,
            })?;
            if self.strict_attributes && !self.catalog.has_attribute_key(attribute) {
                return Err(VitrineError::invalid_predicate(format!(
                    "unknown attribute '{attribute}'"
                )));
            }
        }
        Ok(())
    }
}
