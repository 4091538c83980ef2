//! Structured encoders
//!
//! Recipes that compose bundle, bind and shift into representations of
//! sets, sequences, records, graphs and scalar ranges.

pub mod level;
pub mod structures;

pub use level::{level, level_random, LevelDecoder, LevelEncoder};
pub use structures::{
    bind_sequence, bundle_sequence, cross_product, graph, hash_table, multibind, multiset,
    ngrams, DEFAULT_NGRAM,
};
