//! # Vitrine
//!
//! An in-memory query engine for static product catalogs.
//!
//! ## Features
//!
//! - Typed product attributes (text or number), decided once at ingestion
//! - TF-IDF relevance search over an inverted index
//! - Typed attribute filters (equality, substring, numeric range)
//! - Attribute-overlap (Jaccard) recommendations
//! - Attribute frequency, numeric and categorical statistics
//! - Immutable snapshots that can be swapped atomically
pub mod analysis;
pub mod catalog;
pub mod data;
pub mod engine;
mod error;
pub mod filter;
pub mod lexical;
pub mod loader;
pub mod recommend;
pub mod stats;
mod util;

// Re-exports for the public API
pub use analysis::{Analyzer, SimpleAnalyzer};
pub use catalog::Catalog;
pub use data::{AttributeValue, Product, RawRecord, RawValue};
pub use engine::Engine;
pub use engine::config::{EngineConfig, EngineConfigBuilder};
pub use engine::snapshot::Snapshot;
pub use error::{Result, VitrineError};
pub use filter::{Filter, FilterEvaluator, Predicate, parse_predicates};
pub use lexical::{InvertedIndex, LexicalSearcher, Posting, SearchHit};
pub use recommend::{Recommendation, Recommender};
pub use stats::{CatalogProfile, NumericSummary, StatsReport};

// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
