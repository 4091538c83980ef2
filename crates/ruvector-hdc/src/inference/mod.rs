//! Similarity, search and significance testing

pub mod search;
pub mod significance;
pub mod similarity;

pub use search::{
    nearest_neighbor, nearest_neighbor_by_key, nearest_neighbors, nearest_neighbors_by_key,
    Neighbor,
};
pub use significance::{
    approx_eq, binomial_lower_tail, binomial_test, bootstrap_test, SignificanceTest,
};
pub use similarity::{
    cosine, hamming, jaccard, similarity, similarity_matrix, similarity_to, similarity_with,
    SimilarityMethod,
};
