//! # RuVector HDC
//!
//! Hyperdimensional computing (vector symbolic architecture) algebra for
//! RuVector. Symbols are represented as very long random vectors; structure
//! is built from three operations:
//!
//! - **bundle** (`+`): superposition, similar to every input
//! - **bind** (`*`): association, dissimilar to its inputs and invertible
//! - **shift**: cyclic permutation, used to encode position
//!
//! Six representations share one [`Hypervector`] interface: [`BinaryHV`],
//! [`BipolarHV`], [`TernaryHV`], [`RealHV`], [`GradedHV`] and
//! [`GradedBipolarHV`]. Generic code works on any of them; [`AnyHypervector`]
//! picks the variant at runtime.
//!
//! Every randomized function takes an explicit generator so results are
//! reproducible under a fixed seed.
//!
//! ## Example
//!
//! ```rust
//! use rand::SeedableRng;
//! use rand::rngs::StdRng;
//! use ruvector_hdc::{bind_pair, hash_table, BipolarHV, Hypervector, ItemMemory};
//!
//! let mut rng = StdRng::seed_from_u64(42);
//! let mut memory = ItemMemory::<BipolarHV>::new(10_000).unwrap();
//!
//! // Encode the record { country: France, capital: Paris }.
//! let keys = vec![
//!     memory.get_or_create("country").unwrap().clone(),
//!     memory.get_or_create("capital").unwrap().clone(),
//! ];
//! let values = vec![
//!     memory.get_or_create("France").unwrap().clone(),
//!     memory.get_or_create("Paris").unwrap().clone(),
//! ];
//! let record = hash_table(&keys, &values, &mut rng).unwrap();
//!
//! // Query the capital: unbind the key and clean up the result.
//! let noisy = bind_pair(&record, &keys[1]).unwrap();
//! assert_eq!(memory.cleanup(&noisy).unwrap().key, "Paris");
//! ```
//!
//! ## Logging
//!
//! The crate emits `tracing` events (bundle/bind at `TRACE`, tie-breaking,
//! level construction and bootstrap statistics at `DEBUG`) and never installs
//! a subscriber.

pub mod config;
pub mod encoding;
pub mod error;
pub mod inference;
pub mod memory;
pub mod operations;
pub mod rng;
pub mod types;

pub use config::{HdcConfig, SignificanceConfig};
pub use encoding::{
    bind_sequence, bundle_sequence, cross_product, graph, hash_table, level, level_random,
    multibind, multiset, ngrams, LevelDecoder, LevelEncoder,
};
pub use error::{HdcError, Result};
pub use inference::{
    nearest_neighbor, nearest_neighbors, similarity, similarity_matrix, similarity_to,
    similarity_with, Neighbor, SignificanceTest, SimilarityMethod,
};
pub use memory::ItemMemory;
pub use operations::{
    bind, bind_pair, bind_refs, bundle, bundle_pair, bundle_refs, perturbate,
    perturbate_in_place, shift, shift_in_place, Perturbation,
};
pub use types::{
    fuzzy_xor, three_pi, AnyHypervector, BinaryHV, BipolarHV, GradedBipolarHV, GradedHV,
    Hypervector, RealHV, TernaryHV, Variant,
};
