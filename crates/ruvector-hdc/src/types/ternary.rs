//! Ternary hypervectors over signed integers.

use std::fmt;

use rand::Rng;
use serde::{Deserialize, Deserializer, Serialize};

use super::{check_collection, check_dimension, Checked, Hypervector, Kernels, Variant};
use crate::error::{HdcError, Result};
use crate::inference::similarity::cosine_pairs;

/// A ternary hypervector.
///
/// Explicit construction accepts only `{-1, 0, +1}` and random draws are
/// uniform over `{-1, +1}`. Bundling is a plain element-wise sum, so bundled
/// vectors may hold values outside `[-1, 1]`; call [`TernaryHV::normalized`]
/// or [`TernaryHV::bundle_normalized`] to clamp them back.
#[derive(Clone, PartialEq, Eq, Hash, Serialize)]
pub struct TernaryHV {
    data: Vec<i32>,
}

impl TernaryHV {
    /// Borrows the element sequence.
    pub fn as_slice(&self) -> &[i32] {
        &self.data
    }

    /// Copy with every element clamped to `[-1, 1]`.
    pub fn normalized(&self) -> Self {
        Self {
            data: self.data.iter().map(|&x| x.clamp(-1, 1)).collect(),
        }
    }

    /// Sums `vectors` and clamps the result to `[-1, 1]`.
    ///
    /// # Example
    ///
    /// ```rust
    /// use ruvector_hdc::{Hypervector, TernaryHV};
    ///
    /// let a = TernaryHV::from_values(&[1, 1, 0]).unwrap();
    /// let b = TernaryHV::from_values(&[1, -1, 0]).unwrap();
    /// let c = TernaryHV::from_values(&[1, 1, -1]).unwrap();
    ///
    /// let bundled = TernaryHV::bundle_normalized(&[a, b, c]).unwrap();
    /// assert_eq!(bundled.as_slice(), &[1, 1, -1]);
    /// ```
    pub fn bundle_normalized(vectors: &[Self]) -> Result<Self> {
        let refs: Vec<&Self> = vectors.iter().collect();
        check_collection(&refs)?;
        Ok(Self::sum(&refs).normalized())
    }

    fn sum(vectors: &[&Self]) -> Self {
        let mut data = vectors[0].data.clone();
        for v in &vectors[1..] {
            for (acc, &x) in data.iter_mut().zip(&v.data) {
                *acc += x;
            }
        }
        Self { data }
    }
}

impl Hypervector for TernaryHV {
    type Elem = i32;
    const VARIANT: Variant = Variant::Ternary;

    fn dimension(&self) -> usize {
        self.data.len()
    }

    fn random<R: Rng + ?Sized>(dimension: usize, rng: &mut R) -> Result<Self> {
        check_dimension(dimension)?;
        let data = (0..dimension)
            .map(|_| if rng.gen::<bool>() { 1 } else { -1 })
            .collect();
        Ok(Self { data })
    }

    fn from_values(values: &[i32]) -> Result<Self> {
        check_dimension(values.len())?;
        if let Some((index, &value)) = values
            .iter()
            .enumerate()
            .find(|&(_, &v)| !(-1..=1).contains(&v))
        {
            return Err(HdcError::InvalidElement {
                index,
                value: value as f64,
                variant: Variant::Ternary,
            });
        }
        Ok(Self {
            data: values.to_vec(),
        })
    }

    fn get(&self, index: usize) -> Option<i32> {
        self.data.get(index).copied()
    }

    fn values(&self) -> Vec<i32> {
        self.data.clone()
    }

    fn to_f32_vec(&self) -> Vec<f32> {
        self.data.iter().map(|&x| x as f32).collect()
    }
}

impl Kernels for TernaryHV {
    fn neutral_unchecked(dimension: usize, _: Checked) -> Self {
        Self {
            data: vec![1; dimension],
        }
    }

    fn bundle_kernel<R: Rng + ?Sized>(vectors: &[&Self], _rng: &mut R, _: Checked) -> Self {
        Self::sum(vectors)
    }

    fn bind_kernel(&self, other: &Self, _: Checked) -> Self {
        Self {
            data: self.data.iter().zip(&other.data).map(|(a, b)| a * b).collect(),
        }
    }

    fn rotate_right(&mut self, shift: usize, _: Checked) {
        self.data.rotate_right(shift);
    }

    fn resample_at<R: Rng + ?Sized>(&mut self, indices: &[usize], rng: &mut R, _: Checked) {
        for &i in indices {
            self.data[i] = if rng.gen::<bool>() { 1 } else { -1 };
        }
    }

    fn similarity_kernel(&self, other: &Self, _: Checked) -> f32 {
        cosine_pairs(
            self.data
                .iter()
                .zip(&other.data)
                .map(|(&a, &b)| (a as f64, b as f64)),
        )
    }
}

impl fmt::Debug for TernaryHV {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        super::fmt_preview(f, "TernaryHV", &self.data)
    }
}

impl<'de> Deserialize<'de> for TernaryHV {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        // Unnormalized bundle sums are valid ternary state; only the
        // dimension is checked.
        super::deserialize_checked(deserializer, |data: Vec<i32>| {
            check_dimension(data.len())?;
            Ok(Self { data })
        })
    }
}
