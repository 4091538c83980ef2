//! Nearest-neighbour and top-k search
//!
//! Collections are anything that yields `(key, &vector)` pairs: slices are
//! searched by index, `HashMap`/`BTreeMap` references by key. Results are
//! ordered by descending similarity, with equal similarities resolved in
//! favour of the smaller key, so the outcome never depends on map iteration
//! order.

use std::cmp::Ordering;

use crate::error::{HdcError, Result};
use crate::types::{check_same_dimension, Hypervector, CHECKED};

/// One search hit.
#[derive(Debug, Clone, PartialEq)]
pub struct Neighbor<'a, K, H> {
    /// Canonical similarity to the query.
    pub similarity: f32,
    /// Index or key of the hit.
    pub key: K,
    /// The matching vector.
    pub vector: &'a H,
}

/// NaN sorts below every real similarity.
#[inline]
fn rank(similarity: f32) -> f32 {
    if similarity.is_nan() {
        f32::NEG_INFINITY
    } else {
        similarity
    }
}

/// Best-first ordering: higher similarity, then smaller key.
fn best_first<K: Ord, H>(a: &Neighbor<'_, K, H>, b: &Neighbor<'_, K, H>) -> Ordering {
    rank(b.similarity)
        .total_cmp(&rank(a.similarity))
        .then_with(|| a.key.cmp(&b.key))
}

fn score_all<'a, K, H, I>(query: &H, entries: I) -> Result<Vec<Neighbor<'a, K, H>>>
where
    H: Hypervector + 'a,
    I: IntoIterator<Item = (K, &'a H)>,
{
    entries
        .into_iter()
        .map(|(key, vector)| {
            check_same_dimension(query, vector)?;
            Ok(Neighbor {
                similarity: query.similarity_kernel(vector, CHECKED),
                key,
                vector,
            })
        })
        .collect()
}

/// Most similar entry of a keyed collection.
///
/// # Errors
///
/// [`HdcError::EmptyInput`] for an empty collection and
/// [`HdcError::DimensionMismatch`] when an entry's dimension differs from the
/// query's.
///
/// # Example
///
/// ```rust
/// use std::collections::HashMap;
/// use ruvector_hdc::{BipolarHV, Hypervector};
/// use ruvector_hdc::inference::nearest_neighbor_by_key;
///
/// let mut items = HashMap::new();
/// for name in ["red", "green", "blue"] {
///     items.insert(name, BipolarHV::from_seed(name, 2048).unwrap());
/// }
///
/// let query = items["green"].clone();
/// let hit = nearest_neighbor_by_key(&query, items.iter().map(|(k, v)| (*k, v))).unwrap();
/// assert_eq!(hit.key, "green");
/// ```
pub fn nearest_neighbor_by_key<'a, K, H, I>(query: &H, entries: I) -> Result<Neighbor<'a, K, H>>
where
    K: Ord,
    H: Hypervector + 'a,
    I: IntoIterator<Item = (K, &'a H)>,
{
    let mut best: Option<Neighbor<'a, K, H>> = None;
    for hit in score_all(query, entries)? {
        let better = match &best {
            Some(current) => best_first(&hit, current) == Ordering::Less,
            None => true,
        };
        if better {
            best = Some(hit);
        }
    }
    best.ok_or(HdcError::EmptyInput)
}

/// The `k` most similar entries of a keyed collection, best first.
///
/// Returns fewer than `k` hits when the collection is smaller. Only the
/// selected hits are sorted.
///
/// # Errors
///
/// [`HdcError::InvalidParameter`] when `k == 0`, plus the errors of
/// [`nearest_neighbor_by_key`].
pub fn nearest_neighbors_by_key<'a, K, H, I>(
    query: &H,
    entries: I,
    k: usize,
) -> Result<Vec<Neighbor<'a, K, H>>>
where
    K: Ord,
    H: Hypervector + 'a,
    I: IntoIterator<Item = (K, &'a H)>,
{
    if k == 0 {
        return Err(HdcError::InvalidParameter("k must be positive".into()));
    }
    let mut hits = score_all(query, entries)?;
    if hits.is_empty() {
        return Err(HdcError::EmptyInput);
    }
    if k < hits.len() {
        hits.select_nth_unstable_by(k - 1, best_first);
        hits.truncate(k);
    }
    hits.sort_unstable_by(best_first);
    Ok(hits)
}

/// Most similar vector of a slice; the key is its index.
///
/// # Example
///
/// ```rust
/// use ruvector_hdc::{Hypervector, RealHV};
/// use ruvector_hdc::inference::nearest_neighbor;
///
/// let candidates: Vec<_> = (0..10u32).map(|i| RealHV::from_seed(&i, 1024).unwrap()).collect();
/// let hit = nearest_neighbor(&candidates[7], &candidates).unwrap();
/// assert_eq!(hit.key, 7);
/// ```
pub fn nearest_neighbor<'a, H: Hypervector>(
    query: &H,
    candidates: &'a [H],
) -> Result<Neighbor<'a, usize, H>> {
    nearest_neighbor_by_key(query, candidates.iter().enumerate())
}

/// The `k` most similar vectors of a slice, best first.
pub fn nearest_neighbors<'a, H: Hypervector>(
    query: &H,
    candidates: &'a [H],
    k: usize,
) -> Result<Vec<Neighbor<'a, usize, H>>> {
    nearest_neighbors_by_key(query, candidates.iter().enumerate(), k)
}
