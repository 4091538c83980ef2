//! "Similar beyond chance" predicates
//!
//! Binary and bipolar vectors use an exact binomial tail: under the null of
//! independence each position mismatches with probability 1/2. The remaining
//! variants use a bootstrap null built from random pairs of the same variant.
//!
//! These predicates are diagnostic only; no algebra operation calls them.

use rand::Rng;
use tracing::debug;

use crate::config::SignificanceConfig;
use crate::error::Result;
use crate::types::{
    check_same_dimension, BinaryHV, BipolarHV, GradedBipolarHV, GradedHV, Hypervector, RealHV,
    TernaryHV,
};

/// `ln(exp(a) + exp(b))` without overflow.
#[inline]
fn log_add(a: f64, b: f64) -> f64 {
    let (hi, lo) = if a > b { (a, b) } else { (b, a) };
    if lo == f64::NEG_INFINITY {
        return hi;
    }
    hi + (lo - hi).exp().ln_1p()
}

/// `P[X <= k]` for `X ~ Binomial(n, 1/2)`.
///
/// Computed in log space, so it stays accurate for dimensions in the tens of
/// thousands where the individual terms underflow.
pub fn binomial_lower_tail(n: usize, k: usize) -> f64 {
    if k >= n {
        return 1.0;
    }
    let log_half_n = -(n as f64) * std::f64::consts::LN_2;
    let mut log_choose = 0.0f64;
    let mut log_tail = log_half_n;
    for i in 0..k {
        log_choose += ((n - i) as f64).ln() - ((i + 1) as f64).ln();
        log_tail = log_add(log_tail, log_choose + log_half_n);
    }
    log_tail.exp().min(1.0)
}

/// Binomial decision for `mismatches` differing positions out of `dimension`.
///
/// Similar when the mismatch count is at most the absolute threshold, or when
/// so few mismatches are unlikely under independence.
pub fn binomial_test(mismatches: usize, dimension: usize, config: &SignificanceConfig) -> bool {
    if mismatches <= config.atol_for(dimension) {
        return true;
    }
    binomial_lower_tail(dimension, mismatches) < config.ptol
}

fn mean_abs_distance(a: &[f32], b: &[f32]) -> f64 {
    let total: f64 = a
        .iter()
        .zip(b)
        .map(|(&x, &y)| (x as f64 - y as f64).abs())
        .sum();
    total / a.len() as f64
}

/// Bootstrap decision for any variant.
///
/// Draws `config.bootstrap_samples` independent random pairs of the same
/// variant and dimension, and reports similarity when the fraction of null
/// distances at or below the observed mean absolute distance is under
/// `config.ptol`.
pub fn bootstrap_test<H, R>(u: &H, v: &H, config: &SignificanceConfig, rng: &mut R) -> Result<bool>
where
    H: Hypervector,
    R: Rng + ?Sized,
{
    check_same_dimension(u, v)?;
    config.validate()?;

    let dimension = u.dimension();
    let observed = mean_abs_distance(&u.to_f32_vec(), &v.to_f32_vec());

    let mut at_or_below = 0usize;
    let mut null_total = 0.0f64;
    for _ in 0..config.bootstrap_samples {
        let a = H::random(dimension, rng)?;
        let b = H::random(dimension, rng)?;
        let distance = mean_abs_distance(&a.to_f32_vec(), &b.to_f32_vec());
        null_total += distance;
        if distance <= observed {
            at_or_below += 1;
        }
    }

    let samples = config.bootstrap_samples as f64;
    let p_value = at_or_below as f64 / samples;
    debug!(
        variant = %H::VARIANT,
        observed,
        null_mean = null_total / samples,
        p_value,
        "bootstrap significance"
    );
    Ok(p_value < config.ptol)
}

/// Per-variant "is `self` similar to `other` beyond chance?" predicate.
pub trait SignificanceTest: Hypervector {
    /// Runs the variant's significance test.
    fn is_similar_to<R: Rng + ?Sized>(
        &self,
        other: &Self,
        config: &SignificanceConfig,
        rng: &mut R,
    ) -> Result<bool>;
}

impl SignificanceTest for BinaryHV {
    fn is_similar_to<R: Rng + ?Sized>(
        &self,
        other: &Self,
        config: &SignificanceConfig,
        _rng: &mut R,
    ) -> Result<bool> {
        config.validate_ptol()?;
        let mismatches = self.hamming_distance(other)?;
        Ok(binomial_test(mismatches, self.dimension(), config))
    }
}

impl SignificanceTest for BipolarHV {
    fn is_similar_to<R: Rng + ?Sized>(
        &self,
        other: &Self,
        config: &SignificanceConfig,
        _rng: &mut R,
    ) -> Result<bool> {
        config.validate_ptol()?;
        let mismatches = self.hamming_distance(other)?;
        Ok(binomial_test(mismatches, self.dimension(), config))
    }
}

macro_rules! impl_bootstrap_significance {
    ($($ty:ty),+) => {$(
        impl SignificanceTest for $ty {
            fn is_similar_to<R: Rng + ?Sized>(
                &self,
                other: &Self,
                config: &SignificanceConfig,
                rng: &mut R,
            ) -> Result<bool> {
                bootstrap_test(self, other, config, rng)
            }
        }
    )+};
}

impl_bootstrap_significance!(TernaryHV, RealHV, GradedHV, GradedBipolarHV);

/// Free-function form of [`SignificanceTest::is_similar_to`].
///
/// # Example
///
/// ```rust
/// use rand::SeedableRng;
/// use rand::rngs::StdRng;
/// use ruvector_hdc::{BinaryHV, Hypervector, SignificanceConfig};
/// use ruvector_hdc::inference::approx_eq;
///
/// let mut rng = StdRng::seed_from_u64(1);
/// let a = BinaryHV::random(10_000, &mut rng).unwrap();
/// let b = BinaryHV::random(10_000, &mut rng).unwrap();
/// let config = SignificanceConfig::default();
///
/// assert!(approx_eq(&a, &a, &config, &mut rng).unwrap());
/// assert!(!approx_eq(&a, &b, &config, &mut rng).unwrap());
/// ```
pub fn approx_eq<H, R>(u: &H, v: &H, config: &SignificanceConfig, rng: &mut R) -> Result<bool>
where
    H: SignificanceTest,
    R: Rng + ?Sized,
{
    u.is_similar_to(v, config, rng)
}
