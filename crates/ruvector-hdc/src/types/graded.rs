//! Graded hypervectors over `[0, 1]` and `[-1, 1]`.
//!
//! Both variants aggregate with the [`three_pi`] combinator and bind with
//! [`fuzzy_xor`]. The bipolar variant applies the same rules after mapping
//! `x -> (x + 1) / 2` and maps the result back.

use std::fmt;

use rand::Rng;
use serde::{Deserialize, Deserializer, Serialize};

use super::{check_dimension, Checked, Hypervector, Kernels, Variant};
use crate::error::{HdcError, Result};
use crate::inference::similarity::{cosine, jaccard};

/// Fuzzy-OR-like aggregation on `[0, 1]`.
///
/// Returns `0` on maximal disagreement (`|x - y| == 1`), otherwise
/// `x*y / (x*y + (1-x)*(1-y))`. `0.5` is the identity.
///
/// # Example
///
/// ```rust
/// use ruvector_hdc::three_pi;
///
/// assert_eq!(three_pi(0.0, 1.0), 0.0);
/// assert!((three_pi(0.5, 0.3) - 0.3).abs() < 1e-6);
/// ```
#[inline]
pub fn three_pi(x: f32, y: f32) -> f32 {
    if (x - y).abs() == 1.0 {
        return 0.0;
    }
    let both = x * y;
    both / (both + (1.0 - x) * (1.0 - y))
}

/// Fuzzy XOR on `[0, 1]`: `(1-x)*y + x*(1-y)`. `0` is the identity.
#[inline]
pub fn fuzzy_xor(x: f32, y: f32) -> f32 {
    (1.0 - x) * y + x * (1.0 - y)
}

#[inline]
fn to_unit(x: f32) -> f32 {
    (x + 1.0) / 2.0
}

#[inline]
fn from_unit(u: f32) -> f32 {
    2.0 * u - 1.0
}

fn clamp_into(values: &[f32], lo: f32, hi: f32, variant: Variant) -> Result<Vec<f32>> {
    values
        .iter()
        .enumerate()
        .map(|(index, &v)| {
            if v.is_nan() {
                Err(HdcError::InvalidElement {
                    index,
                    value: v as f64,
                    variant,
                })
            } else {
                Ok(v.clamp(lo, hi))
            }
        })
        .collect()
}

/// A graded hypervector with elements in `[0, 1]`.
///
/// Elements are drawn from Beta(1, 1), i.e. uniform on the unit interval.
/// Out-of-range explicit values are clamped. The canonical similarity is the
/// Jaccard-like `dot(u, v) / sum(u + v - u*v)`.
#[derive(Clone, PartialEq, Serialize)]
pub struct GradedHV {
    data: Vec<f32>,
}

impl GradedHV {
    /// Borrows the element sequence.
    pub fn as_slice(&self) -> &[f32] {
        &self.data
    }
}

impl Hypervector for GradedHV {
    type Elem = f32;
    const VARIANT: Variant = Variant::Graded;

    fn dimension(&self) -> usize {
        self.data.len()
    }

    fn random<R: Rng + ?Sized>(dimension: usize, rng: &mut R) -> Result<Self> {
        check_dimension(dimension)?;
        let data = (0..dimension).map(|_| rng.gen::<f32>()).collect();
        Ok(Self { data })
    }

    fn from_values(values: &[f32]) -> Result<Self> {
        check_dimension(values.len())?;
        Ok(Self {
            data: clamp_into(values, 0.0, 1.0, Variant::Graded)?,
        })
    }

    fn get(&self, index: usize) -> Option<f32> {
        self.data.get(index).copied()
    }

    fn values(&self) -> Vec<f32> {
        self.data.clone()
    }

    fn to_f32_vec(&self) -> Vec<f32> {
        self.data.clone()
    }
}

impl Kernels for GradedHV {
    fn neutral_unchecked(dimension: usize, _: Checked) -> Self {
        Self {
            data: vec![0.0; dimension],
        }
    }

    fn bundle_kernel<R: Rng + ?Sized>(vectors: &[&Self], _rng: &mut R, _: Checked) -> Self {
        let mut data = vectors[0].data.clone();
        for v in &vectors[1..] {
            for (acc, &y) in data.iter_mut().zip(&v.data) {
                *acc = three_pi(*acc, y).clamp(0.0, 1.0);
            }
        }
        Self { data }
    }

    fn bind_kernel(&self, other: &Self, _: Checked) -> Self {
        let data = self
            .data
            .iter()
            .zip(&other.data)
            .map(|(&x, &y)| fuzzy_xor(x, y).clamp(0.0, 1.0))
            .collect();
        Self { data }
    }

    fn rotate_right(&mut self, shift: usize, _: Checked) {
        self.data.rotate_right(shift);
    }

    fn resample_at<R: Rng + ?Sized>(&mut self, indices: &[usize], rng: &mut R, _: Checked) {
        for &i in indices {
            self.data[i] = rng.gen::<f32>();
        }
    }

    fn similarity_kernel(&self, other: &Self, _: Checked) -> f32 {
        jaccard(&self.data, &other.data)
    }
}

/// A graded hypervector with elements in `[-1, 1]`.
///
/// Elements are an affine transform `2u - 1` of Beta(1, 1) draws. Explicit
/// values are clamped. The canonical similarity is cosine.
#[derive(Clone, PartialEq, Serialize)]
pub struct GradedBipolarHV {
    data: Vec<f32>,
}

impl GradedBipolarHV {
    /// Borrows the element sequence.
    pub fn as_slice(&self) -> &[f32] {
        &self.data
    }
}

impl Hypervector for GradedBipolarHV {
    type Elem = f32;
    const VARIANT: Variant = Variant::GradedBipolar;

    fn dimension(&self) -> usize {
        self.data.len()
    }

    fn random<R: Rng + ?Sized>(dimension: usize, rng: &mut R) -> Result<Self> {
        check_dimension(dimension)?;
        let data = (0..dimension)
            .map(|_| from_unit(rng.gen::<f32>()))
            .collect();
        Ok(Self { data })
    }

    fn from_values(values: &[f32]) -> Result<Self> {
        check_dimension(values.len())?;
        Ok(Self {
            data: clamp_into(values, -1.0, 1.0, Variant::GradedBipolar)?,
        })
    }

    fn get(&self, index: usize) -> Option<f32> {
        self.data.get(index).copied()
    }

    fn values(&self) -> Vec<f32> {
        self.data.clone()
    }

    fn to_f32_vec(&self) -> Vec<f32> {
        self.data.clone()
    }
}

impl Kernels for GradedBipolarHV {
    fn neutral_unchecked(dimension: usize, _: Checked) -> Self {
        Self {
            data: vec![-1.0; dimension],
        }
    }

    fn bundle_kernel<R: Rng + ?Sized>(vectors: &[&Self], _rng: &mut R, _: Checked) -> Self {
        let mut unit: Vec<f32> = vectors[0].data.iter().map(|&x| to_unit(x)).collect();
        for v in &vectors[1..] {
            for (acc, &y) in unit.iter_mut().zip(&v.data) {
                *acc = three_pi(*acc, to_unit(y)).clamp(0.0, 1.0);
            }
        }
        Self {
            data: unit.into_iter().map(from_unit).collect(),
        }
    }

    fn bind_kernel(&self, other: &Self, _: Checked) -> Self {
        // from_unit(fuzzy_xor(to_unit(x), to_unit(y))) simplifies to -x*y.
        let data = self
            .data
            .iter()
            .zip(&other.data)
            .map(|(&x, &y)| (-(x * y)).clamp(-1.0, 1.0))
            .collect();
        Self { data }
    }

    fn rotate_right(&mut self, shift: usize, _: Checked) {
        self.data.rotate_right(shift);
    }

    fn resample_at<R: Rng + ?Sized>(&mut self, indices: &[usize], rng: &mut R, _: Checked) {
        for &i in indices {
            self.data[i] = from_unit(rng.gen::<f32>());
        }
    }

    fn similarity_kernel(&self, other: &Self, _: Checked) -> f32 {
        cosine(&self.data, &other.data)
    }
}

impl fmt::Debug for GradedHV {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        super::fmt_preview(f, "GradedHV", &self.data)
    }
}

impl fmt::Debug for GradedBipolarHV {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        super::fmt_preview(f, "GradedBipolarHV", &self.data)
    }
}

impl<'de> Deserialize<'de> for GradedHV {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        super::deserialize_checked(deserializer, |data: Vec<f32>| Self::from_values(&data))
    }
}

impl<'de> Deserialize<'de> for GradedBipolarHV {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        super::deserialize_checked(deserializer, |data: Vec<f32>| Self::from_values(&data))
    }
}
