//! Closed runtime sum over the six hypervector variants.

use std::hash::Hash;

use rand::Rng;
use serde::{Deserialize, Serialize};

use super::{
    BinaryHV, BipolarHV, GradedBipolarHV, GradedHV, Hypervector, RealHV, TernaryHV, Variant,
};
use crate::error::{HdcError, Result};
use crate::inference::similarity::{self, SimilarityMethod};
use crate::operations::{self, Perturbation};

/// A hypervector whose variant is chosen at runtime.
///
/// Operations dispatch with a `match` on the tag. Combining two different
/// variants fails with [`HdcError::VariantMismatch`]; use the generic API on
/// the concrete types to have that checked at compile time instead.
///
/// # Example
///
/// ```rust
/// use ruvector_hdc::{AnyHypervector, HdcError, Variant};
///
/// let a = AnyHypervector::from_seed(Variant::Bipolar, "a", 1000).unwrap();
/// let b = AnyHypervector::from_seed(Variant::Real, "b", 1000).unwrap();
///
/// assert!(matches!(a.bind(&b), Err(HdcError::VariantMismatch { .. })));
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum AnyHypervector {
    Binary(BinaryHV),
    Bipolar(BipolarHV),
    Ternary(TernaryHV),
    Real(RealHV),
    Graded(GradedHV),
    GradedBipolar(GradedBipolarHV),
}

/// Runs `$body` with `$H` aliased to the concrete type of `$variant`.
macro_rules! with_variant {
    ($variant:expr, $H:ident => $body:expr) => {
        match $variant {
            Variant::Binary => {
                type $H = BinaryHV;
                $body
            }
            Variant::Bipolar => {
                type $H = BipolarHV;
                $body
            }
            Variant::Ternary => {
                type $H = TernaryHV;
                $body
            }
            Variant::Real => {
                type $H = RealHV;
                $body
            }
            Variant::Graded => {
                type $H = GradedHV;
                $body
            }
            Variant::GradedBipolar => {
                type $H = GradedBipolarHV;
                $body
            }
        }
    };
}

/// Runs `$body` with `$hv` bound to the concrete value inside `$value`.
macro_rules! dispatch {
    ($value:expr, $hv:ident => $body:expr) => {
        match $value {
            AnyHypervector::Binary($hv) => $body,
            AnyHypervector::Bipolar($hv) => $body,
            AnyHypervector::Ternary($hv) => $body,
            AnyHypervector::Real($hv) => $body,
            AnyHypervector::Graded($hv) => $body,
            AnyHypervector::GradedBipolar($hv) => $body,
        }
    };
}

/// Like [`dispatch!`] for two operands that must share a variant.
macro_rules! dispatch_pair {
    ($a:expr, $b:expr, ($x:ident, $y:ident) => $body:expr) => {
        match ($a, $b) {
            (AnyHypervector::Binary($x), AnyHypervector::Binary($y)) => $body,
            (AnyHypervector::Bipolar($x), AnyHypervector::Bipolar($y)) => $body,
            (AnyHypervector::Ternary($x), AnyHypervector::Ternary($y)) => $body,
            (AnyHypervector::Real($x), AnyHypervector::Real($y)) => $body,
            (AnyHypervector::Graded($x), AnyHypervector::Graded($y)) => $body,
            (AnyHypervector::GradedBipolar($x), AnyHypervector::GradedBipolar($y)) => $body,
            (a, b) => Err(HdcError::VariantMismatch {
                expected: a.variant(),
                actual: b.variant(),
            }),
        }
    };
}

/// Conversion between a concrete type and its [`AnyHypervector`] arm.
trait Member: Hypervector + Into<AnyHypervector> {
    fn extract(any: &AnyHypervector) -> Option<&Self>;
}

macro_rules! impl_member {
    ($($arm:ident => $ty:ty),+ $(,)?) => {$(
        impl From<$ty> for AnyHypervector {
            fn from(hv: $ty) -> Self {
                AnyHypervector::$arm(hv)
            }
        }

        impl Member for $ty {
            fn extract(any: &AnyHypervector) -> Option<&Self> {
                match any {
                    AnyHypervector::$arm(hv) => Some(hv),
                    _ => None,
                }
            }
        }
    )+};
}

impl_member! {
    Binary => BinaryHV,
    Bipolar => BipolarHV,
    Ternary => TernaryHV,
    Real => RealHV,
    Graded => GradedHV,
    GradedBipolar => GradedBipolarHV,
}

/// Borrows every element as `H`, failing on the first foreign variant.
fn unify<H: Member>(vectors: &[AnyHypervector]) -> Result<Vec<&H>> {
    vectors
        .iter()
        .map(|v| {
            H::extract(v).ok_or(HdcError::VariantMismatch {
                expected: H::VARIANT,
                actual: v.variant(),
            })
        })
        .collect()
}

fn exact_integer(index: usize, value: f64, allowed: &[i32], variant: Variant) -> Result<i32> {
    allowed
        .iter()
        .copied()
        .find(|&a| a as f64 == value)
        .ok_or(HdcError::InvalidElement {
            index,
            value,
            variant,
        })
}

fn narrow(values: &[f64]) -> Vec<f32> {
    values.iter().map(|&v| v as f32).collect()
}

impl AnyHypervector {
    /// Random hypervector of the given variant.
    pub fn new<R: Rng + ?Sized>(variant: Variant, dimension: usize, rng: &mut R) -> Result<Self> {
        with_variant!(variant, H => H::random(dimension, rng).map(Into::into))
    }

    /// Deterministic hypervector derived from `key`.
    pub fn from_seed<K: Hash + ?Sized>(
        variant: Variant,
        key: &K,
        dimension: usize,
    ) -> Result<Self> {
        with_variant!(variant, H => H::from_seed(key, dimension).map(Into::into))
    }

    /// Bind identity of the given variant.
    pub fn neutral(variant: Variant, dimension: usize) -> Result<Self> {
        with_variant!(variant, H => H::neutral(dimension).map(Into::into))
    }

    /// Wraps explicit numeric data.
    ///
    /// Binary accepts `0`/`1`, bipolar `-1`/`1`, ternary `-1`/`0`/`1`; any
    /// other value fails with [`HdcError::InvalidElement`]. Real values must
    /// be finite. Graded values are clamped into their interval.
    pub fn from_values(variant: Variant, values: &[f64]) -> Result<Self> {
        match variant {
            Variant::Binary => {
                let bits = values
                    .iter()
                    .enumerate()
                    .map(|(i, &v)| exact_integer(i, v, &[0, 1], variant).map(|x| x == 1))
                    .collect::<Result<Vec<bool>>>()?;
                BinaryHV::from_values(&bits).map(Into::into)
            }
            Variant::Bipolar => {
                let signs = values
                    .iter()
                    .enumerate()
                    .map(|(i, &v)| exact_integer(i, v, &[-1, 1], variant).map(|x| x as i8))
                    .collect::<Result<Vec<i8>>>()?;
                BipolarHV::from_values(&signs).map(Into::into)
            }
            Variant::Ternary => {
                let trits = values
                    .iter()
                    .enumerate()
                    .map(|(i, &v)| exact_integer(i, v, &[-1, 0, 1], variant))
                    .collect::<Result<Vec<i32>>>()?;
                TernaryHV::from_values(&trits).map(Into::into)
            }
            Variant::Real => RealHV::from_values(&narrow(values)).map(Into::into),
            Variant::Graded => GradedHV::from_values(&narrow(values)).map(Into::into),
            Variant::GradedBipolar => {
                GradedBipolarHV::from_values(&narrow(values)).map(Into::into)
            }
        }
    }

    /// Variant tag.
    pub fn variant(&self) -> Variant {
        dispatch!(self, hv => hv.variant())
    }

    /// Number of elements.
    pub fn dimension(&self) -> usize {
        dispatch!(self, hv => hv.dimension())
    }

    /// Element at `index` widened to `f64`.
    pub fn get(&self, index: usize) -> Option<f64> {
        match self {
            AnyHypervector::Binary(hv) => hv.get(index).map(|b| if b { 1.0 } else { 0.0 }),
            AnyHypervector::Bipolar(hv) => hv.get(index).map(f64::from),
            AnyHypervector::Ternary(hv) => hv.get(index).map(f64::from),
            AnyHypervector::Real(hv) => hv.get(index).map(f64::from),
            AnyHypervector::Graded(hv) => hv.get(index).map(f64::from),
            AnyHypervector::GradedBipolar(hv) => hv.get(index).map(f64::from),
        }
    }

    /// Element sequence widened to `f32`.
    pub fn to_f32_vec(&self) -> Vec<f32> {
        dispatch!(self, hv => hv.to_f32_vec())
    }

    /// Neutral element with the same variant and dimension.
    pub fn similar(&self) -> Self {
        dispatch!(self, hv => hv.similar().into())
    }

    /// Bundles a collection of same-variant hypervectors.
    pub fn bundle<R: Rng + ?Sized>(vectors: &[AnyHypervector], rng: &mut R) -> Result<Self> {
        let first = vectors.first().ok_or(HdcError::EmptyInput)?;
        with_variant!(first.variant(), H => {
            let refs = unify::<H>(vectors)?;
            operations::bundle_refs(&refs, rng).map(Into::into)
        })
    }

    /// Binds a collection of same-variant hypervectors.
    pub fn bind_all(vectors: &[AnyHypervector]) -> Result<Self> {
        let first = vectors.first().ok_or(HdcError::EmptyInput)?;
        with_variant!(first.variant(), H => {
            let refs = unify::<H>(vectors)?;
            operations::bind_refs(&refs).map(Into::into)
        })
    }

    /// Binds `self` with `other`.
    pub fn bind(&self, other: &Self) -> Result<Self> {
        dispatch_pair!(self, other, (a, b) => operations::bind_pair(a, b).map(Into::into))
    }

    /// Cyclic shift by `k` positions into a new value.
    pub fn shift(&self, k: isize) -> Self {
        dispatch!(self, hv => operations::shift(hv, k).into())
    }

    /// Cyclic shift by `k` positions in place.
    pub fn shift_in_place(&mut self, k: isize) {
        dispatch!(self, hv => operations::shift_in_place(hv, k))
    }

    /// Randomly resamples part of the elements into a new value.
    pub fn perturbate<R: Rng + ?Sized>(
        &self,
        perturbation: Perturbation<'_>,
        rng: &mut R,
    ) -> Result<Self> {
        dispatch!(self, hv => operations::perturbate(hv, perturbation, rng).map(Into::into))
    }

    /// Randomly resamples part of the elements in place.
    pub fn perturbate_in_place<R: Rng + ?Sized>(
        &mut self,
        perturbation: Perturbation<'_>,
        rng: &mut R,
    ) -> Result<()> {
        dispatch!(self, hv => operations::perturbate_in_place(hv, perturbation, rng))
    }

    /// Canonical similarity; both operands must share a variant.
    pub fn similarity(&self, other: &Self) -> Result<f32> {
        dispatch_pair!(self, other, (a, b) => similarity::similarity(a, b))
    }

    /// Similarity with an explicit method; variants may differ.
    pub fn similarity_with(&self, other: &Self, method: SimilarityMethod) -> Result<f32> {
        dispatch!(self, a => dispatch!(other, b => similarity::similarity_with(a, b, method)))
    }
}
