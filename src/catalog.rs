//! The catalog store: the immutable set of products every engine reads from.

use std::collections::BTreeSet;

use ahash::AHashMap;

use crate::data::{Product, RawRecord};
use crate::error::{Result, VitrineError};

/// An immutable product catalog.
///
/// Products keep their input order; lookups by id go through a position map.
/// The catalog also records the vocabulary of attribute names seen across all
/// products.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    products: Vec<Product>,
    positions: AHashMap<String, usize>,
    attribute_keys: BTreeSet<String>,
}

impl Catalog {
    /// Build a catalog from raw records.
    ///
    /// Fails with [`VitrineError::DuplicateId`] if two records share an id
    /// (after trimming).
    pub fn build<I>(records: I) -> Result<Self>
    where
        I: IntoIterator<Item = RawRecord>,
    {
        let mut products = Vec::new();
        let mut positions = AHashMap::new();
        let mut attribute_keys = BTreeSet::new();

        for record in records {
            let product = Product::from_raw(record);
            if positions.contains_key(product.id()) {
                return Err(VitrineError::duplicate_id(product.id()));
            }
            for (key, _) in product.attributes() {
                if !attribute_keys.contains(key) {
                    attribute_keys.insert(key.to_string());
                }
            }
            positions.insert(product.id().to_string(), products.len());
            products.push(product);
        }

        log::debug!(
            "built catalog with {} products and {} attribute keys",
            products.len(),
            attribute_keys.len()
        );

        Ok(Self {
            products,
            positions,
            attribute_keys,
        })
    }

    /// Get a product by id.
    pub fn get(&self, id: &str) -> Option<&Product> {
        self.position(id).map(|pos| &self.products[pos])
    }

    /// Get the insertion position of a product.
    pub fn position(&self, id: &str) -> Option<usize> {
        self.positions.get(id).copied()
    }

    /// Iterate products in insertion order.
    pub fn iter(&self) -> std::slice::Iter<'_, Product> {
        self.products.iter()
    }

    /// All products in insertion order.
    pub fn products(&self) -> &[Product] {
        &self.products
    }

    /// The set of attribute names seen across the catalog.
    pub fn attribute_keys(&self) -> &BTreeSet<String> {
        &self.attribute_keys
    }

    pub fn has_attribute_key(&self, key: &str) -> bool {
        self.attribute_keys.contains(key)
    }

    pub fn len(&self) -> usize {
        self.products.len()
    }

    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }
}

impl<'a> IntoIterator for &'a Catalog {
    type Item = &'a Product;
    type IntoIter = std::slice::Iter<'a, Product>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
