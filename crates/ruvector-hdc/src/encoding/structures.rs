//! Composite encoders built from bundle, bind and shift.

use rand::Rng;

use crate::error::{HdcError, Result};
use crate::operations::{bind, bind_pair, bind_refs, bundle, bundle_refs, shift};
use crate::types::Hypervector;

/// Default window length of [`ngrams`].
pub const DEFAULT_NGRAM: usize = 3;

fn require_sequence<H>(operation: &'static str, vectors: &[H]) -> Result<()> {
    if vectors.len() < 2 {
        return Err(HdcError::InsufficientInput {
            operation,
            required: 2,
            actual: vectors.len(),
        });
    }
    Ok(())
}

fn require_paired<A, B>(left: &[A], right: &[B]) -> Result<()> {
    if left.len() != right.len() {
        return Err(HdcError::LengthMismatch {
            left: left.len(),
            right: right.len(),
        });
    }
    Ok(())
}

/// Unordered set of items: the bundle of all of them.
pub fn multiset<H: Hypervector, R: Rng + ?Sized>(vectors: &[H], rng: &mut R) -> Result<H> {
    bundle(vectors, rng)
}

/// Conjunction of items: the bind of all of them.
pub fn multibind<H: Hypervector>(vectors: &[H]) -> Result<H> {
    bind(vectors)
}

/// Ordered sequence as a bundle: item `i` is shifted by `i` first.
///
/// # Errors
///
/// [`HdcError::InsufficientInput`] with fewer than two items.
pub fn bundle_sequence<H: Hypervector, R: Rng + ?Sized>(vectors: &[H], rng: &mut R) -> Result<H> {
    require_sequence("bundle_sequence", vectors)?;
    let shifted: Vec<H> = vectors
        .iter()
        .enumerate()
        .map(|(i, v)| shift(v, i as isize))
        .collect();
    bundle(&shifted, rng)
}

/// Ordered sequence as a bind: item `i` is shifted by `i` first.
///
/// # Errors
///
/// [`HdcError::InsufficientInput`] with fewer than two items.
pub fn bind_sequence<H: Hypervector>(vectors: &[H]) -> Result<H> {
    require_sequence("bind_sequence", vectors)?;
    let shifted: Vec<H> = vectors
        .iter()
        .enumerate()
        .map(|(i, v)| shift(v, i as isize))
        .collect();
    bind(&shifted)
}

/// Key-value record: the bundle of `bind(key, value)` over all pairs.
///
/// Binding a record with a key recovers a noisy copy of its value.
///
/// # Example
///
/// ```rust
/// use rand::SeedableRng;
/// use rand::rngs::StdRng;
/// use ruvector_hdc::{bind_pair, hash_table, BipolarHV, Hypervector};
/// use ruvector_hdc::inference::nearest_neighbor;
///
/// let keys: Vec<_> = ["name", "age", "city"]
///     .iter()
///     .map(|k| BipolarHV::from_seed(k, 10_000).unwrap())
///     .collect();
/// let values: Vec<_> = ["alice", "30", "paris"]
///     .iter()
///     .map(|v| BipolarHV::from_seed(v, 10_000).unwrap())
///     .collect();
///
/// let mut rng = StdRng::seed_from_u64(7);
/// let record = hash_table(&keys, &values, &mut rng).unwrap();
///
/// let noisy_city = bind_pair(&record, &keys[2]).unwrap();
/// assert_eq!(nearest_neighbor(&noisy_city, &values).unwrap().key, 2);
/// ```
///
/// # Errors
///
/// [`HdcError::LengthMismatch`] when `keys` and `values` differ in length,
/// [`HdcError::EmptyInput`] when both are empty.
pub fn hash_table<H: Hypervector, R: Rng + ?Sized>(
    keys: &[H],
    values: &[H],
    rng: &mut R,
) -> Result<H> {
    require_paired(keys, values)?;
    let pairs = keys
        .iter()
        .zip(values)
        .map(|(k, v)| bind_pair(k, v))
        .collect::<Result<Vec<H>>>()?;
    bundle(&pairs, rng)
}

/// Every pairing of `us` with `vs`: `bind(multiset(us), multiset(vs))`.
///
/// The two multisets are not renormalized before binding.
pub fn cross_product<H: Hypervector, R: Rng + ?Sized>(
    us: &[H],
    vs: &[H],
    rng: &mut R,
) -> Result<H> {
    let u = multiset(us, rng)?;
    let v = multiset(vs, rng)?;
    bind_pair(&u, &v)
}

/// Bundle of all length-`n` windows, each encoded as
/// `bind(shift(w[0], 0), shift(w[1], 1), ..)`.
///
/// # Errors
///
/// [`HdcError::InvalidParameter`] when `n == 0`,
/// [`HdcError::InsufficientInput`] when `n` exceeds the number of items.
pub fn ngrams<H: Hypervector, R: Rng + ?Sized>(vectors: &[H], n: usize, rng: &mut R) -> Result<H> {
    if n == 0 {
        return Err(HdcError::InvalidParameter(
            "n-gram length must be positive".to_string(),
        ));
    }
    if n > vectors.len() {
        return Err(HdcError::InsufficientInput {
            operation: "ngrams",
            required: n,
            actual: vectors.len(),
        });
    }

    let grams = vectors
        .windows(n)
        .map(|window| {
            let shifted: Vec<H> = window
                .iter()
                .enumerate()
                .map(|(j, v)| shift(v, j as isize))
                .collect();
            let refs: Vec<&H> = shifted.iter().collect();
            bind_refs(&refs)
        })
        .collect::<Result<Vec<H>>>()?;
    let refs: Vec<&H> = grams.iter().collect();
    bundle_refs(&refs, rng)
}

/// Edge list `source[i] -> target[i]` as a key-value record.
///
/// Directed graphs shift each target by one so `a -> b` and `b -> a` encode
/// differently; undirected graphs do not.
///
/// # Errors
///
/// [`HdcError::LengthMismatch`] when `source` and `target` differ in length.
pub fn graph<H: Hypervector, R: Rng + ?Sized>(
    source: &[H],
    target: &[H],
    directed: bool,
    rng: &mut R,
) -> Result<H> {
    require_paired(source, target)?;
    let k = if directed { 1 } else { 0 };
    let shifted: Vec<H> = target.iter().map(|t| shift(t, k)).collect();
    hash_table(source, &shifted, rng)
}
