//! Binary hypervectors over `{false, true}`.

use std::fmt;

use rand::Rng;
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::packed::PackedBits;
use super::{check_dimension, check_same_dimension, Checked, Hypervector, Kernels, Variant};
use crate::error::Result;

/// A binary hypervector, bit-packed into `u64` words.
///
/// Bundling is a per-bit majority vote, binding is XOR and the canonical
/// similarity is Jaccard (`|a AND b| / |a OR b|`), which is about `1/3` for
/// two independent random vectors.
///
/// # Example
///
/// ```rust
/// use ruvector_hdc::{BinaryHV, Hypervector};
///
/// let a = BinaryHV::random_default(10_000).unwrap();
/// let b = BinaryHV::random_default(10_000).unwrap();
///
/// // Self-inverse binding
/// let bound = &a * &b;
/// assert_eq!(&bound * &b, a);
/// ```
#[derive(Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct BinaryHV {
    bits: PackedBits,
}

impl BinaryHV {
    /// Number of set bits.
    pub fn count_ones(&self) -> usize {
        self.bits.count_ones()
    }

    /// Number of positions where `self` and `other` differ.
    pub fn hamming_distance(&self, other: &Self) -> Result<usize> {
        check_same_dimension(self, other)?;
        Ok(self.bits.hamming(&other.bits))
    }

    /// Iterates over the elements in order.
    pub fn iter(&self) -> impl Iterator<Item = bool> + '_ {
        self.bits.iter()
    }

    /// Element-wise complement.
    pub fn invert(&self) -> Self {
        Self {
            bits: PackedBits::from_fn(self.dimension(), |i| !self.bits.get(i)),
        }
    }
}

impl Hypervector for BinaryHV {
    type Elem = bool;
    const VARIANT: Variant = Variant::Binary;

    fn dimension(&self) -> usize {
        self.bits.len()
    }

    fn random<R: Rng + ?Sized>(dimension: usize, rng: &mut R) -> Result<Self> {
        check_dimension(dimension)?;
        Ok(Self {
            bits: PackedBits::random(dimension, rng),
        })
    }

    fn from_values(values: &[bool]) -> Result<Self> {
        check_dimension(values.len())?;
        Ok(Self {
            bits: PackedBits::from_fn(values.len(), |i| values[i]),
        })
    }

    fn get(&self, index: usize) -> Option<bool> {
        (index < self.dimension()).then(|| self.bits.get(index))
    }

    fn values(&self) -> Vec<bool> {
        self.bits.iter().collect()
    }

    fn to_f32_vec(&self) -> Vec<f32> {
        self.bits.iter().map(|b| if b { 1.0 } else { 0.0 }).collect()
    }
}

impl Kernels for BinaryHV {
    fn neutral_unchecked(dimension: usize, _: Checked) -> Self {
        Self {
            bits: PackedBits::zeros(dimension),
        }
    }

    fn bundle_kernel<R: Rng + ?Sized>(vectors: &[&Self], rng: &mut R, _: Checked) -> Self {
        let packed: Vec<&PackedBits> = vectors.iter().map(|v| &v.bits).collect();
        let (bits, ties) = PackedBits::majority(&packed, rng);
        if ties > 0 {
            debug!(ties, count = vectors.len(), "binary majority broke ties at random");
        }
        Self { bits }
    }

    fn bind_kernel(&self, other: &Self, _: Checked) -> Self {
        Self {
            bits: self.bits.xor(&other.bits),
        }
    }

    fn rotate_right(&mut self, shift: usize, _: Checked) {
        self.bits.rotate_right(shift);
    }

    fn resample_at<R: Rng + ?Sized>(&mut self, indices: &[usize], rng: &mut R, _: Checked) {
        for &i in indices {
            self.bits.set(i, rng.gen::<bool>());
        }
    }

    fn similarity_kernel(&self, other: &Self, _: Checked) -> f32 {
        let union = self.bits.or_count(&other.bits);
        if union == 0 {
            // Both vectors are all-false
            1.0
        } else {
            self.bits.and_count(&other.bits) as f32 / union as f32
        }
    }
}

impl fmt::Debug for BinaryHV {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "BinaryHV {{ bits: {} set / {} total }}",
            self.count_ones(),
            self.dimension()
        )
    }
}
