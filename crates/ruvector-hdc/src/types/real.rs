//! Real-valued hypervectors.

use std::fmt;

use rand::Rng;
use rand_distr::StandardNormal;
use serde::{Deserialize, Deserializer, Serialize};

use super::{check_dimension, Checked, Hypervector, Kernels, Variant};
use crate::error::{HdcError, Result};
use crate::inference::similarity::cosine;

/// A real-valued hypervector with i.i.d. standard normal elements.
///
/// Bundling sums the inputs and divides by `sqrt(m)`, which keeps unit
/// variance when the inputs are independent. Binding is element-wise
/// multiplication.
#[derive(Clone, PartialEq, Serialize)]
pub struct RealHV {
    data: Vec<f32>,
}

impl RealHV {
    /// Borrows the element sequence.
    pub fn as_slice(&self) -> &[f32] {
        &self.data
    }
}

impl Hypervector for RealHV {
    type Elem = f32;
    const VARIANT: Variant = Variant::Real;

    fn dimension(&self) -> usize {
        self.data.len()
    }

    fn random<R: Rng + ?Sized>(dimension: usize, rng: &mut R) -> Result<Self> {
        check_dimension(dimension)?;
        let data = (0..dimension).map(|_| rng.sample(StandardNormal)).collect();
        Ok(Self { data })
    }

    /// Rejects NaN and infinite elements.
    fn from_values(values: &[f32]) -> Result<Self> {
        check_dimension(values.len())?;
        if let Some((index, &value)) = values.iter().enumerate().find(|(_, v)| !v.is_finite()) {
            return Err(HdcError::InvalidElement {
                index,
                value: value as f64,
                variant: Variant::Real,
            });
        }
        Ok(Self {
            data: values.to_vec(),
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

impl Kernels for RealHV {
    fn neutral_unchecked(dimension: usize, _: Checked) -> Self {
        Self {
            data: vec![1.0; dimension],
        }
    }

    fn bundle_kernel<R: Rng + ?Sized>(vectors: &[&Self], _rng: &mut R, _: Checked) -> Self {
        let mut data = vec![0.0f32; vectors[0].dimension()];
        for v in vectors {
            for (acc, &x) in data.iter_mut().zip(&v.data) {
                *acc += x;
            }
        }
        let scale = (vectors.len() as f32).sqrt();
        for x in &mut data {
            *x /= scale;
        }
        Self { data }
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
            self.data[i] = rng.sample(StandardNormal);
        }
    }

    fn similarity_kernel(&self, other: &Self, _: Checked) -> f32 {
        cosine(&self.data, &other.data)
    }
}

impl fmt::Debug for RealHV {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        super::fmt_preview(f, "RealHV", &self.data)
    }
}

impl<'de> Deserialize<'de> for RealHV {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        super::deserialize_checked(deserializer, |data: Vec<f32>| Self::from_values(&data))
    }
}
