//! Hypervector type family.
//!
//! Six concrete representations share the [`Hypervector`] capability set:
//!
//! | Type | Elements | Random draw | Bundle | Bind |
//! |------|----------|-------------|--------|------|
//! | [`BinaryHV`] | `{false, true}` | Bernoulli(0.5) | majority | XOR |
//! | [`BipolarHV`] | `{-1, +1}` | Bernoulli(0.5) | majority | XOR on sign bits |
//! | [`TernaryHV`] | `{-1, 0, +1}` | uniform `{-1, +1}` | sum | product |
//! | [`RealHV`] | `f32` | standard normal | sum / sqrt(m) | product |
//! | [`GradedHV`] | `[0, 1]` | Beta(1, 1) | [`three_pi`] fold | [`fuzzy_xor`] |
//! | [`GradedBipolarHV`] | `[-1, 1]` | affine Beta(1, 1) | mapped `three_pi` | mapped `fuzzy_xor` |
//!
//! Generic functions over `H: Hypervector` can only combine operands of the
//! same type, so mixing variants is a compile error. [`AnyHypervector`] is the
//! closed runtime sum over all six for callers that pick the variant at runtime.

mod any;
mod binary;
mod bipolar;
mod graded;
pub(crate) mod kernel;
mod packed;
mod real;
mod ternary;

use std::fmt;
use std::hash::Hash;

use rand::Rng;
use serde::de::{self, Deserializer};
use serde::{Deserialize, Serialize};

use crate::error::{HdcError, Result};
use crate::rng::{default_rng, rng_from_key};

pub(crate) use kernel::{Checked, Kernels, CHECKED};

pub use any::AnyHypervector;
pub use binary::BinaryHV;
pub use bipolar::BipolarHV;
pub use graded::{fuzzy_xor, three_pi, GradedBipolarHV, GradedHV};
pub use real::RealHV;
pub use ternary::TernaryHV;

/// Tag naming one concrete hypervector representation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Variant {
    Binary,
    Bipolar,
    Ternary,
    Real,
    Graded,
    GradedBipolar,
}

impl Variant {
    /// All variants, in declaration order.
    pub const ALL: [Variant; 6] = [
        Variant::Binary,
        Variant::Bipolar,
        Variant::Ternary,
        Variant::Real,
        Variant::Graded,
        Variant::GradedBipolar,
    ];

    /// Lower-case name used in error messages.
    pub fn name(self) -> &'static str {
        match self {
            Variant::Binary => "binary",
            Variant::Bipolar => "bipolar",
            Variant::Ternary => "ternary",
            Variant::Real => "real",
            Variant::Graded => "graded",
            Variant::GradedBipolar => "graded-bipolar",
        }
    }
}

impl fmt::Display for Variant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Capability set shared by every hypervector representation.
///
/// The trait is sealed: the algebra itself lives in the checked functions of
/// [`crate::operations`] and [`crate::inference`], and only this crate's six
/// types implement it. The per-variant kernels cannot be called from outside
/// the crate, not even through a generic bound:
///
/// ```compile_fail
/// use ruvector_hdc::Hypervector;
///
/// fn raw_bind<H: Hypervector>(a: &H, b: &H) -> H {
///     a.bind_kernel(b)
/// }
/// ```
pub trait Hypervector: Kernels + Clone + PartialEq + fmt::Debug {
    /// Element type exposed by indexing and explicit construction.
    type Elem: Copy + PartialEq + fmt::Debug;

    /// Tag of this representation.
    const VARIANT: Variant;

    /// Number of elements.
    fn dimension(&self) -> usize;

    /// Draws a fresh random hypervector from the variant's distribution.
    fn random<R: Rng + ?Sized>(dimension: usize, rng: &mut R) -> Result<Self>;

    /// Wraps explicit data, clamping (graded variants) or rejecting
    /// (strict variants) out-of-domain elements.
    fn from_values(values: &[Self::Elem]) -> Result<Self>;

    /// Element at `index`, or `None` when out of range.
    fn get(&self, index: usize) -> Option<Self::Elem>;

    /// Copies the raw element sequence out.
    fn values(&self) -> Vec<Self::Elem>;

    /// Element sequence widened to `f32`, for cross-variant metrics and plotting.
    fn to_f32_vec(&self) -> Vec<f32>;

    /// Random hypervector drawn from the thread-local generator.
    fn random_default(dimension: usize) -> Result<Self> {
        Self::random(dimension, &mut default_rng())
    }

    /// Deterministic hypervector derived from a hashable key.
    ///
    /// The same key and dimension always produce the same vector, so symbol
    /// vocabularies can be regenerated without storing them.
    fn from_seed<K: Hash + ?Sized>(key: &K, dimension: usize) -> Result<Self> {
        Self::random(dimension, &mut rng_from_key(key))
    }

    /// Bind identity: `bind(neutral, v) == v`.
    fn neutral(dimension: usize) -> Result<Self> {
        check_dimension(dimension)?;
        Ok(Self::neutral_unchecked(dimension, CHECKED))
    }

    /// Neutral hypervector with the same dimension and variant as `self`.
    fn similar(&self) -> Self {
        Self::neutral_unchecked(self.dimension(), CHECKED)
    }

    /// Variant tag of this value.
    fn variant(&self) -> Variant {
        Self::VARIANT
    }
}

pub(crate) fn check_dimension(dimension: usize) -> Result<()> {
    if dimension == 0 {
        return Err(HdcError::InvalidDimension { dimension });
    }
    Ok(())
}

pub(crate) fn check_same_dimension<A, B>(a: &A, b: &B) -> Result<()>
where
    A: Hypervector,
    B: Hypervector,
{
    if a.dimension() != b.dimension() {
        return Err(HdcError::DimensionMismatch {
            expected: a.dimension(),
            actual: b.dimension(),
        });
    }
    Ok(())
}

/// Validates a non-empty, equally sized collection and returns its dimension.
pub(crate) fn check_collection<H: Hypervector>(vectors: &[&H]) -> Result<usize> {
    let first = vectors.first().ok_or(HdcError::EmptyInput)?;
    let dimension = first.dimension();
    for v in &vectors[1..] {
        if v.dimension() != dimension {
            return Err(HdcError::DimensionMismatch {
                expected: dimension,
                actual: v.dimension(),
            });
        }
    }
    Ok(dimension)
}

/// Wire shape of the element-vector variants: `{"data": [...]}`.
#[derive(Deserialize)]
struct Elements<T> {
    data: Vec<T>,
}

/// Decodes an element vector and hands it to `build`, so deserialized values
/// pass the same checks as explicit construction.
pub(crate) fn deserialize_checked<'de, D, T, H>(
    deserializer: D,
    build: impl FnOnce(Vec<T>) -> Result<H>,
) -> std::result::Result<H, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    let Elements { data } = Elements::deserialize(deserializer)?;
    build(data).map_err(de::Error::custom)
}

/// Shared `Debug` body: dimension plus the first few elements.
pub(crate) fn fmt_preview<T: fmt::Debug>(
    f: &mut fmt::Formatter<'_>,
    name: &str,
    values: &[T],
) -> fmt::Result {
    const PREVIEW: usize = 8;
    let shown = &values[..values.len().min(PREVIEW)];
    write!(f, "{} {{ dimension: {}, values: {:?}", name, values.len(), shown)?;
    if values.len() > PREVIEW {
        write!(f, " ..")?;
    }
    write!(f, " }}")
}
