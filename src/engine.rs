pub mod config;
pub mod snapshot;

use std::sync::Arc;

use parking_lot::RwLock;

use crate::catalog::Catalog;
use crate::data::{Product, RawRecord};
use crate::error::Result;
use crate::filter::Filter;
use crate::lexical::SearchHit;
use crate::recommend::Recommendation;
use crate::stats::{CatalogProfile, StatsReport};

use self::config::EngineConfig;
use self::snapshot::Snapshot;

/// The query engine facade.
///
/// The engine owns the current [`Snapshot`] behind a swappable reference.
/// Every query grabs the current snapshot once and runs against it, so a
/// concurrent [`reload`](Engine::reload) never affects a query in flight.
///
/// ```
/// use vitrine::{Engine, EngineConfig, Filter, RawRecord};
///
/// let engine = Engine::new(
///     vec![
///         RawRecord::new("1").add_field("Type", "Car Vacuum Cleaner"),
///         RawRecord::new("2").add_field("Type", "Blender"),
///     ],
///     EngineConfig::default(),
/// )
/// .unwrap();
///
/// let hits = engine.search("vacuum", 10).unwrap();
/// assert_eq!(hits[0].product_id, "1");
///
/// let ids = engine.filter(&Filter::new().equals("Type", "Blender")).unwrap();
/// assert_eq!(ids, vec!["2"]);
/// ```
pub struct Engine {
    config: EngineConfig,
    current: RwLock<Arc<Snapshot>>,
}

impl std::fmt::Debug for Engine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Engine")
            .field("config", &self.config)
            .field("products", &self.len())
            .finish()
    }
}

impl Engine {
    /// Build an engine from raw records.
    pub fn new<I>(records: I, config: EngineConfig) -> Result<Self>
    where
        I: IntoIterator<Item = RawRecord>,
    {
        config.validate()?;
        let snapshot = Snapshot::build(records, config.analyzer())?;
        Ok(Self::with_snapshot(snapshot, config))
    }

    /// Build an engine over an existing catalog.
    pub fn from_catalog(catalog: Catalog, config: EngineConfig) -> Result<Self> {
        config.validate()?;
        let snapshot = Snapshot::from_catalog(catalog, config.analyzer());
        Ok(Self::with_snapshot(snapshot, config))
    }

    fn with_snapshot(snapshot: Snapshot, config: EngineConfig) -> Self {
        log::info!(
            "engine ready: {} products, {} terms",
            snapshot.catalog().len(),
            snapshot.index().stats().term_count
        );
        Self {
            config,
            current: RwLock::new(Arc::new(snapshot)),
        }
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// The current snapshot. It stays valid for as long as the caller holds it.
    pub fn snapshot(&self) -> Arc<Snapshot> {
        self.current.read().clone()
    }

    /// Rebuild from new records and swap the result in.
    ///
    /// The new snapshot is fully built before the swap. On failure the
    /// current snapshot is left untouched.
    pub fn reload<I>(&self, records: I) -> Result<()>
    where
        I: IntoIterator<Item = RawRecord>,
    {
        let snapshot = Snapshot::build(records, self.config.analyzer())?;
        self.swap(snapshot);
        Ok(())
    }

    /// Swap in a snapshot built elsewhere, returning the previous one.
    pub fn swap(&self, snapshot: Snapshot) -> Arc<Snapshot> {
        let products = snapshot.catalog().len();
        let previous = std::mem::replace(&mut *self.current.write(), Arc::new(snapshot));
        log::info!(
            "swapped snapshot: {} -> {} products",
            previous.catalog().len(),
            products
        );
        previous
    }

    /// Rank products against a free-text query.
    pub fn search(&self, query: &str, limit: usize) -> Result<Vec<SearchHit>> {
        self.snapshot().search(query, limit)
    }

    /// [`search`](Engine::search) with the configured default limit.
    pub fn search_default(&self, query: &str) -> Result<Vec<SearchHit>> {
        self.search(query, self.config.default_search_limit)
    }

    /// Ids of products matching every predicate, in catalog order.
    pub fn filter(&self, filter: &Filter) -> Result<Vec<String>> {
        self.snapshot().filter(filter, self.config.strict_attributes)
    }

    /// Products most similar to `seed_id`.
    pub fn recommend(&self, seed_id: &str, limit: usize) -> Result<Vec<Recommendation>> {
        self.snapshot().recommend(seed_id, limit)
    }

    /// [`recommend`](Engine::recommend) with the configured default limit.
    pub fn recommend_default(&self, seed_id: &str) -> Result<Vec<Recommendation>> {
        self.recommend(seed_id, self.config.default_recommend_limit)
    }

    /// Statistics over the whole catalog.
    pub fn summarize(&self) -> StatsReport {
        self.snapshot().summarize(self.config.stats_top_n)
    }

    /// Statistics over the products matching `filter`.
    pub fn summarize_filtered(&self, filter: &Filter) -> Result<StatsReport> {
        self.snapshot().summarize_filtered(
            filter,
            self.config.strict_attributes,
            self.config.stats_top_n,
        )
    }

    pub fn profile(&self) -> CatalogProfile {
        self.snapshot().profile()
    }

    /// Get a copy of a product by id.
    pub fn get(&self, id: &str) -> Option<Product> {
        self.snapshot().catalog().get(id).cloned()
    }

    pub fn len(&self) -> usize {
        self.snapshot().catalog().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::VitrineError;

    fn records() -> Vec<RawRecord> {
        vec![
            RawRecord::new("P1").add_field("Type", "Car Vacuum Cleaner"),
            RawRecord::new("P2")
                .add_field("Type", "Car Vacuum Cleaner")
                .add_field("Brand", "X"),
            RawRecord::new("P3").add_field("Type", "Blender"),
        ]
    }

    #[test]
    fn test_engine_queries() {
        let engine = Engine::new(records(), EngineConfig::default()).unwrap();

        assert_eq!(engine.len(), 3);
        assert_eq!(engine.search_default("vacuum").unwrap().len(), 2);
        assert_eq!(
            engine
                .filter(&Filter::new().equals("Type", "Blender"))
                .unwrap(),
            vec!["P3"]
        );
        assert_eq!(engine.recommend_default("P1").unwrap()[0].product_id, "P2");
        assert_eq!(engine.summarize().frequency("Type"), Some(3));
        assert_eq!(engine.profile().total_products, 3);
        assert!(engine.get("P2").is_some());
    }

    #[test]
    fn test_reload_swaps_snapshot() {
        let engine = Engine::new(records(), EngineConfig::default()).unwrap();
        let before = engine.snapshot();

        engine
            .reload(vec![RawRecord::new("Q1").add_field("Type", "Toaster")])
            .unwrap();

        // The old snapshot is still usable.
        assert_eq!(before.catalog().len(), 3);
        assert_eq!(before.search("vacuum", 10).unwrap().len(), 2);

        assert_eq!(engine.len(), 1);
        assert!(engine.search("vacuum", 10).unwrap().is_empty());
        assert_eq!(engine.search("toaster", 10).unwrap()[0].product_id, "Q1");
    }

    #[test]
    fn test_failed_reload_keeps_snapshot() {
        let engine = Engine::new(records(), EngineConfig::default()).unwrap();
        let result = engine.reload(vec![RawRecord::new("A"), RawRecord::new("A")]);

        assert!(matches!(result, Err(VitrineError::DuplicateId(_))));
        assert_eq!(engine.len(), 3);
    }

    #[test]
    fn test_strict_attributes() {
        let config = EngineConfig::builder().strict_attributes(true).build();
        let engine = Engine::new(records(), config).unwrap();
        assert!(matches!(
            engine.filter(&Filter::new().equals("Color", "red")),
            Err(VitrineError::InvalidPredicate(_))
        ));
    }

    #[test]
    fn test_summarize_filtered() {
        let engine = Engine::new(records(), EngineConfig::default()).unwrap();
        let report = engine
            .summarize_filtered(&Filter::new().contains("Type", "vacuum"))
            .unwrap();
        assert_eq!(
            report.attribute_frequency,
            vec![("Type".to_string(), 2), ("Brand".to_string(), 1)]
        );
    }

    #[test]
    fn test_invalid_config() {
        let config = EngineConfig::builder().stats_top_n(0).build();
        assert!(matches!(
            Engine::new(records(), config),
            Err(VitrineError::InvalidConfig(_))
        ));
    }
}
