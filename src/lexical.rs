//! Lexical search: the inverted index and the relevance searcher built on it.

pub mod index;
pub mod search;

pub use index::{InvertedIndex, InvertedIndexStats, Posting};
pub use search::{LexicalSearcher, SearchHit};
