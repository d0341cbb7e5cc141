use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::analysis::{Analyzer, SimpleAnalyzer};
use crate::error::{Result, VitrineError};
use crate::stats::DEFAULT_TOP_N;

fn default_search_limit() -> usize {
    10
}

fn default_recommend_limit() -> usize {
    5
}

fn default_stats_top_n() -> usize {
    DEFAULT_TOP_N
}

/// Configuration for the [`Engine`](crate::Engine).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EngineConfig {
    /// Limit used by `search_default`.
    #[serde(default = "default_search_limit")]
    pub default_search_limit: usize,
    /// Limit used by `recommend_default`.
    #[serde(default = "default_recommend_limit")]
    pub default_recommend_limit: usize,
    /// Number of values kept per categorical distribution.
    #[serde(default = "default_stats_top_n")]
    pub stats_top_n: usize,
    /// Reject filter predicates on attributes the catalog has never seen.
    #[serde(default)]
    pub strict_attributes: bool,
    /// Analyzer for indexing and queries. Defaults to [`SimpleAnalyzer`].
    #[serde(skip)]
    pub analyzer: Option<Arc<dyn Analyzer>>,
}

impl EngineConfig {
    pub fn new() -> Self {
        Self {
            default_search_limit: default_search_limit(),
            default_recommend_limit: default_recommend_limit(),
            stats_top_n: default_stats_top_n(),
            strict_attributes: false,
            analyzer: None,
        }
    }

    pub fn builder() -> EngineConfigBuilder {
        EngineConfigBuilder::default()
    }

    /// Decode a JSON configuration document. Missing keys take their defaults.
    pub fn from_json(json: &str) -> Result<Self> {
        let config: EngineConfig =
            serde_json::from_str(json).map_err(|e| VitrineError::invalid_config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.stats_top_n == 0 {
            return Err(VitrineError::invalid_config(
                "stats_top_n must be greater than 0",
            ));
        }
        Ok(())
    }

    /// The configured analyzer, or the default one.
    pub fn analyzer(&self) -> Arc<dyn Analyzer> {
        self.analyzer
            .clone()
            .unwrap_or_else(|| Arc::new(SimpleAnalyzer::new()))
    }
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Default)]
pub struct EngineConfigBuilder {
    default_search_limit: Option<usize>,
    default_recommend_limit: Option<usize>,
    stats_top_n: Option<usize>,
    strict_attributes: bool,
    analyzer: Option<Arc<dyn Analyzer>>,
}

impl EngineConfigBuilder {
    pub fn default_search_limit(mut self, limit: usize) -> Self {
        self.default_search_limit = Some(limit);
        self
    }

    pub fn default_recommend_limit(mut self, limit: usize) -> Self {
        self.default_recommend_limit = Some(limit);
        self
    }

    pub fn stats_top_n(mut self, top_n: usize) -> Self {
        self.stats_top_n = Some(top_n);
        self
    }

    pub fn strict_attributes(mut self, strict: bool) -> Self {
        self.strict_attributes = strict;
        self
    }

    pub fn analyzer(mut self, analyzer: Arc<dyn Analyzer>) -> Self {
        self.analyzer = Some(analyzer);
        self
    }

    pub fn build(self) -> EngineConfig {
        EngineConfig {
            default_search_limit: self
                .default_search_limit
                .unwrap_or_else(default_search_limit),
            default_recommend_limit: self
                .default_recommend_limit
                .unwrap_or_else(default_recommend_limit),
            stats_top_n: self.stats_top_n.unwrap_or_else(default_stats_top_n),
            strict_attributes: self.strict_attributes,
            analyzer: self.analyzer,
        }
    }
}
