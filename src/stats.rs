//! Catalog statistics.
//!
//! All functions take any sequence of products, so they work equally on the
//! full catalog and on a filtered subset. Results are fully ordered and do not
//! depend on hash iteration order.

use std::collections::BTreeMap;

use ahash::AHashMap;
use serde::{Deserialize, Serialize};

use crate::data::{AttributeValue, Product};

/// Default number of values kept per categorical distribution.
pub const DEFAULT_TOP_N: usize = 10;

/// Summary of the numeric occurrences of one attribute.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct NumericSummary {
    pub count: usize,
    pub min: f64,
    pub max: f64,
    pub mean: f64,
    /// Middle value, or the mean of the two middle values for an even count.
    pub median: f64,
}

/// Aggregated attribute statistics.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StatsReport {
    /// Products per attribute key, by descending count then key.
    pub attribute_frequency: Vec<(String, usize)>,
    /// Per key, over products where the key holds a number.
    pub numeric_summary: BTreeMap<String, NumericSummary>,
    /// Per key, the most frequent text values by descending count then value.
    pub categorical_distribution: BTreeMap<String, Vec<(String, usize)>>,
}

impl StatsReport {
    /// Count of products having `key`, if any has it.
    pub fn frequency(&self, key: &str) -> Option<usize> {
        self.attribute_frequency
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, count)| *count)
    }
}

/// Shape of a product sequence: size and attribute spread.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogProfile {
    pub total_products: usize,
    pub unique_attributes: usize,
    pub max_attributes: usize,
    pub min_attributes: usize,
}

struct NumericAccumulator {
    min: f64,
    max: f64,
    mean: f64,
    values: Vec<f64>,
}

impl NumericAccumulator {
    fn new() -> Self {
        Self {
            min: f64::INFINITY,
            max: f64::NEG_INFINITY,
            mean: 0.0,
            values: Vec::new(),
        }
    }

    fn push(&mut self, value: f64) {
        self.values.push(value);
        self.min = self.min.min(value);
        self.max = self.max.max(value);
        // Running mean: a plain sum overflows for large finite values.
        self.mean += (value - self.mean) / self.values.len() as f64;
    }

    fn finish(mut self) -> NumericSummary {
        NumericSummary {
            count: self.values.len(),
            min: self.min,
            max: self.max,
            mean: self.mean,
            median: median(&mut self.values),
        }
    }
}

/// Median by selection. `values` must be non-empty.
fn median(values: &mut [f64]) -> f64 {
    let len = values.len();
    let (lower, upper, _) = values.select_nth_unstable_by(len / 2, f64::total_cmp);
    let upper = *upper;
    if len % 2 == 1 {
        return upper;
    }
    let lower = lower.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    lower + (upper - lower) / 2.0
}

/// Summarize a product sequence in one pass.
///
/// `top_n` caps every categorical distribution.
pub fn summarize<'a, I>(products: I, top_n: usize) -> StatsReport
where
    I: IntoIterator<Item = &'a Product>,
{
    let mut frequency: AHashMap<&str, usize> = AHashMap::new();
    let mut numeric: AHashMap<&str, NumericAccumulator> = AHashMap::new();
    let mut categorical: AHashMap<&str, AHashMap<&str, usize>> = AHashMap::new();

    for product in products {
        for (key, value) in product.attributes() {
            *frequency.entry(key).or_insert(0) += 1;
            match value {
                AttributeValue::Number(n) => numeric
                    .entry(key)
                    .or_insert_with(NumericAccumulator::new)
                    .push(*n),
                AttributeValue::Text(text) => {
                    *categorical
                        .entry(key)
                        .or_default()
                        .entry(text.as_str())
                        .or_insert(0) += 1
                }
            }
        }
    }

    StatsReport {
        attribute_frequency: ranked(frequency, usize::MAX),
        numeric_summary: numeric
            .into_iter()
            .map(|(key, acc)| (key.to_string(), acc.finish()))
            .collect(),
        categorical_distribution: categorical
            .into_iter()
            .map(|(key, counts)| (key.to_string(), ranked(counts, top_n)))
            .collect(),
    }
}

/// Sort counts descending, ties by ascending name, and keep the first `n`.
fn ranked(counts: AHashMap<&str, usize>, n: usize) -> Vec<(String, usize)> {
    let mut entries: Vec<(&str, usize)> = counts.into_iter().collect();
    entries.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(b.0)));
    entries
        .into_iter()
        .take(n)
        .map(|(name, count)| (name.to_string(), count))
        .collect()
}

/// Size and attribute spread of a product sequence.
pub fn profile<'a, I>(products: I) -> CatalogProfile
where
    I: IntoIterator<Item = &'a Product>,
{
    let mut keys: ahash::AHashSet<&str> = ahash::AHashSet::new();
    let mut total = 0;
    let mut max_attributes = 0;
    let mut min_attributes = usize::MAX;

    for product in products {
        total += 1;
        max_attributes = max_attributes.max(product.len());
        min_attributes = min_attributes.min(product.len());
        keys.extend(product.attributes().map(|(key, _)| key));
    }

    CatalogProfile {
        total_products: total,
        unique_attributes: keys.len(),
        max_attributes,
        min_attributes: if total == 0 { 0 } else { min_attributes },
    }
}

/// For each keyword, the number of products with a text value containing it
/// (case-insensitive). Keeps the keyword order given.
pub fn keyword_coverage<'a, I, S>(products: I, keywords: &[S]) -> Vec<(String, usize)>
where
    I: IntoIterator<Item = &'a Product>,
    S: AsRef<str>,
{
    let needles: Vec<String> = keywords.iter().map(|k| k.as_ref().to_lowercase()).collect();
    let mut counts = vec![0usize; needles.len()];

    for product in products {
        let texts: Vec<String> = product.text_values().map(str::to_lowercase).collect();
        for (needle, count) in needles.iter().zip(counts.iter_mut()) {
            if texts.iter().any(|text| text.contains(needle.as_str())) {
                *count += 1;
            }
        }
    }

    keywords
        .iter()
        .map(|k| k.as_ref().to_string())
        .zip(counts)
        .collect()
}
