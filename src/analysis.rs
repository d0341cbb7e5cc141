//! Text analysis shared by indexing and querying.
//!
//! The same analyzer must be used to build an index and to tokenize queries
//! against it, otherwise query tokens will not line up with index tokens.

use std::fmt::Debug;

/// Turns text into search tokens.
pub trait Analyzer: Send + Sync + Debug {
    /// Analyze text into a sequence of tokens, in order of appearance.
    fn analyze(&self, text: &str) -> Vec<String>;

    /// Name of this analyzer, for diagnostics.
    fn name(&self) -> &'static str;
}

/// Splits on every non-alphanumeric character and lower-cases the pieces.
///
/// ```
/// use vitrine::analysis::{Analyzer, SimpleAnalyzer};
///
/// let tokens = SimpleAnalyzer::new().analyze("Car-Vacuum (12V)");
/// assert_eq!(tokens, vec!["car", "vacuum", "12v"]);
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct SimpleAnalyzer;

impl SimpleAnalyzer {
    pub fn new() -> Self {
        SimpleAnalyzer
    }
}

impl Analyzer for SimpleAnalyzer {
    fn analyze(&self, text: &str) -> Vec<String> {
        text.split(|c: char| !c.is_alphanumeric())
            .filter(|piece| !piece.is_empty())
            .map(str::to_lowercase)
            .collect()
    }

    fn name(&self) -> &'static str {
        "simple"
    }
}
