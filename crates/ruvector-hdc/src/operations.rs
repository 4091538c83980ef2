//! Hypervector algebra: bundling, binding, shifting, perturbation
//!
//! Every function here validates its operands first and only then computes,
//! so a failed call leaves inputs untouched. The `_in_place` variants mutate
//! their receiver; all other functions allocate a fresh result.

use std::ops::{Add, Mul};

use rand::seq::index;
use rand::Rng;
use tracing::trace;

use crate::error::{HdcError, Result};
use crate::types::{
    check_collection, check_same_dimension, BinaryHV, BipolarHV, GradedBipolarHV, GradedHV,
    Hypervector, Kernels, RealHV, TernaryHV, CHECKED,
};

/// Bundles a collection into one vector similar to every input.
///
/// Binary and bipolar vectors take the per-position majority; on an exact
/// tie (even-sized input) each tied position gets an independent coin flip
/// from `rng`. Seed `rng` when the output must be reproducible.
///
/// # Errors
///
/// [`HdcError::EmptyInput`] for an empty collection,
/// [`HdcError::DimensionMismatch`] for unequal dimensions.
///
/// # Example
///
/// ```rust
/// use rand::SeedableRng;
/// use rand::rngs::StdRng;
/// use ruvector_hdc::{bundle, BinaryHV, Hypervector};
///
/// let v = |bits: &[u8]| {
///     BinaryHV::from_values(&bits.iter().map(|&b| b == 1).collect::<Vec<_>>()).unwrap()
/// };
/// let mut rng = StdRng::seed_from_u64(0);
/// let out = bundle(&[v(&[1, 0, 1]), v(&[1, 1, 0]), v(&[0, 0, 1])], &mut rng).unwrap();
/// assert_eq!(out, v(&[1, 0, 1]));
/// ```
pub fn bundle<H: Hypervector, R: Rng + ?Sized>(vectors: &[H], rng: &mut R) -> Result<H> {
    let refs: Vec<&H> = vectors.iter().collect();
    bundle_refs(&refs, rng)
}

/// [`bundle`] over borrowed operands.
pub fn bundle_refs<H: Hypervector, R: Rng + ?Sized>(vectors: &[&H], rng: &mut R) -> Result<H> {
    let dimension = check_collection(vectors)?;
    trace!(variant = %H::VARIANT, count = vectors.len(), dimension, "bundle");
    Ok(H::bundle_kernel(vectors, rng, CHECKED))
}

/// Bundles exactly two vectors.
pub fn bundle_pair<H: Hypervector, R: Rng + ?Sized>(a: &H, b: &H, rng: &mut R) -> Result<H> {
    bundle_refs(&[a, b], rng)
}

/// Binds a collection by folding pairwise in order.
///
/// # Errors
///
/// [`HdcError::EmptyInput`] for an empty collection,
/// [`HdcError::DimensionMismatch`] for unequal dimensions.
pub fn bind<H: Hypervector>(vectors: &[H]) -> Result<H> {
    let refs: Vec<&H> = vectors.iter().collect();
    bind_refs(&refs)
}

/// [`bind`] over borrowed operands.
pub fn bind_refs<H: Hypervector>(vectors: &[&H]) -> Result<H> {
    let dimension = check_collection(vectors)?;
    trace!(variant = %H::VARIANT, count = vectors.len(), dimension, "bind");
    let mut acc = vectors[0].clone();
    for v in &vectors[1..] {
        acc = acc.bind_kernel(v, CHECKED);
    }
    Ok(acc)
}

/// Binds two vectors.
///
/// ```rust
/// use ruvector_hdc::{bind_pair, BipolarHV, Hypervector};
///
/// let key = BipolarHV::from_seed("key", 1024).unwrap();
/// let value = BipolarHV::from_seed("value", 1024).unwrap();
/// let pair = bind_pair(&key, &value).unwrap();
///
/// // Binding is its own inverse for bipolar vectors.
/// assert_eq!(bind_pair(&pair, &key).unwrap(), value);
/// ```
pub fn bind_pair<H: Hypervector>(a: &H, b: &H) -> Result<H> {
    check_same_dimension(a, b)?;
    Ok(a.bind_kernel(b, CHECKED))
}

#[inline]
fn normalize_shift(k: isize, dimension: usize) -> usize {
    k.rem_euclid(dimension as isize) as usize
}

/// Cyclic shift: element `i` moves to `(i + k) mod dimension`.
///
/// Negative `k` rotates the other way, so `shift(&shift(&v, k), -k) == v`.
pub fn shift<H: Hypervector>(v: &H, k: isize) -> H {
    let mut out = v.clone();
    shift_in_place(&mut out, k);
    out
}

/// In-place form of [`shift`].
pub fn shift_in_place<H: Hypervector>(v: &mut H, k: isize) {
    let k = normalize_shift(k, v.dimension());
    if k != 0 {
        v.rotate_right(k, CHECKED);
    }
}

/// Which elements [`perturbate`] resamples.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Perturbation<'a> {
    /// A fraction `p` in `[0, 1]`; `round(p * dimension)` distinct positions
    /// are chosen at random.
    Fraction(f64),
    /// Explicit positions.
    Indices(&'a [usize]),
    /// Positions whose mask entry is `true`; the mask must span the dimension.
    Mask(&'a [bool]),
}

impl Perturbation<'_> {
    /// Resolves to concrete positions, validating against `dimension`.
    fn positions<R: Rng + ?Sized>(&self, dimension: usize, rng: &mut R) -> Result<Vec<usize>> {
        match *self {
            Perturbation::Fraction(p) => {
                if !(p.is_finite() && (0.0..=1.0).contains(&p)) {
                    return Err(HdcError::InvalidParameter(format!(
                        "perturbation fraction {} outside [0, 1]",
                        p
                    )));
                }
                let amount = ((p * dimension as f64).round() as usize).min(dimension);
                Ok(index::sample(rng, dimension, amount).into_vec())
            }
            Perturbation::Indices(indices) => {
                if let Some(&bad) = indices.iter().find(|&&i| i >= dimension) {
                    return Err(HdcError::InvalidParameter(format!(
                        "perturbation index {} out of range for dimension {}",
                        bad, dimension
                    )));
                }
                Ok(indices.to_vec())
            }
            Perturbation::Mask(mask) => {
                if mask.len() != dimension {
                    return Err(HdcError::DimensionMismatch {
                        expected: dimension,
                        actual: mask.len(),
                    });
                }
                Ok(mask
                    .iter()
                    .enumerate()
                    .filter_map(|(i, &m)| m.then_some(i))
                    .collect())
            }
        }
    }
}

/// Copy of `v` with the selected elements redrawn from the variant's
/// distribution.
///
/// Similarity to `v` decreases roughly linearly with the resampled fraction.
///
/// # Errors
///
/// [`HdcError::InvalidParameter`] for a fraction outside `[0, 1]` or an
/// out-of-range index, [`HdcError::DimensionMismatch`] for a mask of the
/// wrong length.
pub fn perturbate<H: Hypervector, R: Rng + ?Sized>(
    v: &H,
    perturbation: Perturbation<'_>,
    rng: &mut R,
) -> Result<H> {
    let mut out = v.clone();
    perturbate_in_place(&mut out, perturbation, rng)?;
    Ok(out)
}

/// In-place form of [`perturbate`]. On error `v` is unchanged.
pub fn perturbate_in_place<H: Hypervector, R: Rng + ?Sized>(
    v: &mut H,
    perturbation: Perturbation<'_>,
    rng: &mut R,
) -> Result<()> {
    let positions = perturbation.positions(v.dimension(), rng)?;
    v.resample_at(&positions, rng, CHECKED);
    Ok(())
}

/// Operator sugar: `a + b` bundles, `a * b` binds.
///
/// The operators cannot report errors, so they panic on a dimension mismatch.
/// `+` breaks majority ties with the thread-local generator; call
/// [`bundle_pair`] with an explicit generator when the output must be
/// reproducible.
macro_rules! impl_algebra_operators {
    ($($ty:ty),+ $(,)?) => {$(
        impl Add<&$ty> for &$ty {
            type Output = $ty;

            /// Bundles two vectors.
            ///
            /// # Panics
            ///
            /// Panics if the dimensions differ.
            fn add(self, rhs: &$ty) -> $ty {
                assert_eq!(self.dimension(), rhs.dimension(), "dimension mismatch in bundle");
                <$ty>::bundle_kernel(&[self, rhs], &mut rand::thread_rng(), CHECKED)
            }
        }

        impl Add for $ty {
            type Output = $ty;

            fn add(self, rhs: $ty) -> $ty {
                &self + &rhs
            }
        }

        impl Mul<&$ty> for &$ty {
            type Output = $ty;

            /// Binds two vectors.
            ///
            /// # Panics
            ///
            /// Panics if the dimensions differ.
            fn mul(self, rhs: &$ty) -> $ty {
                assert_eq!(self.dimension(), rhs.dimension(), "dimension mismatch in bind");
                self.bind_kernel(rhs, CHECKED)
            }
        }

        impl Mul for $ty {
            type Output = $ty;

            fn mul(self, rhs: $ty) -> $ty {
                &self * &rhs
            }
        }
    )+};
}

impl_algebra_operators!(
    BinaryHV,
    BipolarHV,
    TernaryHV,
    RealHV,
    GradedHV,
    GradedBipolarHV,
);
