//! Bipolar hypervectors over `{-1, +1}`.

use std::fmt;

use rand::Rng;
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::packed::PackedBits;
use super::{check_dimension, check_same_dimension, Checked, Hypervector, Kernels, Variant};
use crate::error::{HdcError, Result};

/// A bipolar hypervector stored as sign bits: a set bit is `-1`, a clear bit
/// is `+1`.
///
/// With that encoding XOR of the sign bits is exactly element-wise
/// multiplication, so binding costs one XOR per word. Cosine similarity
/// reduces to `1 - 2 * hamming / dimension`.
#[derive(Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct BipolarHV {
    signs: PackedBits,
}

impl BipolarHV {
    /// Number of positions where `self` and `other` differ.
    pub fn hamming_distance(&self, other: &Self) -> Result<usize> {
        check_same_dimension(self, other)?;
        Ok(self.signs.hamming(&other.signs))
    }

    /// Iterates over the elements in order.
    pub fn iter(&self) -> impl Iterator<Item = i8> + '_ {
        self.signs.iter().map(sign)
    }

    /// Element-wise negation.
    pub fn negate(&self) -> Self {
        Self {
            signs: PackedBits::from_fn(self.dimension(), |i| !self.signs.get(i)),
        }
    }
}

#[inline]
fn sign(negative: bool) -> i8 {
    if negative {
        -1
    } else {
        1
    }
}

impl Hypervector for BipolarHV {
    type Elem = i8;
    const VARIANT: Variant = Variant::Bipolar;

    fn dimension(&self) -> usize {
        self.signs.len()
    }

    fn random<R: Rng + ?Sized>(dimension: usize, rng: &mut R) -> Result<Self> {
        check_dimension(dimension)?;
        Ok(Self {
            signs: PackedBits::random(dimension, rng),
        })
    }

    fn from_values(values: &[i8]) -> Result<Self> {
        check_dimension(values.len())?;
        if let Some((index, &value)) = values
            .iter()
            .enumerate()
            .find(|&(_, &v)| v != 1 && v != -1)
        {
            return Err(HdcError::InvalidElement {
                index,
                value: value as f64,
                variant: Variant::Bipolar,
            });
        }
        Ok(Self {
            signs: PackedBits::from_fn(values.len(), |i| values[i] < 0),
        })
    }

    fn get(&self, index: usize) -> Option<i8> {
        (index < self.dimension()).then(|| sign(self.signs.get(index)))
    }

    fn values(&self) -> Vec<i8> {
        self.iter().collect()
    }

    fn to_f32_vec(&self) -> Vec<f32> {
        self.iter().map(f32::from).collect()
    }
}

impl Kernels for BipolarHV {
    fn neutral_unchecked(dimension: usize, _: Checked) -> Self {
        Self {
            signs: PackedBits::zeros(dimension),
        }
    }

    fn bundle_kernel<R: Rng + ?Sized>(vectors: &[&Self], rng: &mut R, _: Checked) -> Self {
        let packed: Vec<&PackedBits> = vectors.iter().map(|v| &v.signs).collect();
        let (signs, ties) = PackedBits::majority(&packed, rng);
        if ties > 0 {
            debug!(ties, count = vectors.len(), "bipolar majority broke ties at random");
        }
        Self { signs }
    }

    fn bind_kernel(&self, other: &Self, _: Checked) -> Self {
        Self {
            signs: self.signs.xor(&other.signs),
        }
    }

    fn rotate_right(&mut self, shift: usize, _: Checked) {
        self.signs.rotate_right(shift);
    }

    fn resample_at<R: Rng + ?Sized>(&mut self, indices: &[usize], rng: &mut R, _: Checked) {
        for &i in indices {
            self.signs.set(i, rng.gen::<bool>());
        }
    }

    fn similarity_kernel(&self, other: &Self, _: Checked) -> f32 {
        let hamming = self.signs.hamming(&other.signs);
        1.0 - (2.0 * hamming as f32 / self.dimension() as f32)
    }
}

impl fmt::Debug for BipolarHV {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        super::fmt_preview(f, "BipolarHV", &self.values())
    }
}
