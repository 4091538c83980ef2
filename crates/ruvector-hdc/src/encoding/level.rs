//! Level (thermometer) encoding of scalars
//!
//! A level chain is a sequence of hypervectors where each is a perturbed
//! copy of the previous one. Neighbouring levels stay highly similar while
//! the two ends of the chain are close to quasi-orthogonal, so similarity
//! between levels tracks the distance between the scalars they stand for.

use rand::Rng;
use tracing::{debug, warn};

use crate::error::{HdcError, Result};
use crate::inference::nearest_neighbor;
use crate::operations::{perturbate, Perturbation};
use crate::types::Hypervector;

/// Builds a chain of `n` levels starting at `base`.
///
/// Each level resamples a fraction `2 / n` of the previous one.
///
/// # Errors
///
/// [`HdcError::InsufficientInput`] when `n == 0`.
pub fn level<H: Hypervector, R: Rng + ?Sized>(base: &H, n: usize, rng: &mut R) -> Result<Vec<H>> {
    if n == 0 {
        return Err(HdcError::InsufficientInput {
            operation: "level",
            required: 1,
            actual: 0,
        });
    }

    let fraction = (2.0 / n as f64).min(1.0);
    let mut levels = Vec::with_capacity(n);
    levels.push(base.clone());
    for i in 1..n {
        let next = perturbate(&levels[i - 1], Perturbation::Fraction(fraction), rng)?;
        levels.push(next);
    }

    debug!(
        variant = %H::VARIANT,
        levels = n,
        fraction,
        dimension = base.dimension(),
        "built level chain"
    );
    Ok(levels)
}

/// Like [`level`], drawing the base vector from `rng` as well.
pub fn level_random<H: Hypervector, R: Rng + ?Sized>(
    dimension: usize,
    n: usize,
    rng: &mut R,
) -> Result<Vec<H>> {
    let base = H::random(dimension, rng)?;
    level(&base, n, rng)
}

fn check_table<H: Hypervector>(levels: &[H], values: &[f64]) -> Result<()> {
    if levels.len() != values.len() {
        return Err(HdcError::LengthMismatch {
            left: levels.len(),
            right: values.len(),
        });
    }
    if levels.is_empty() {
        return Err(HdcError::EmptyInput);
    }
    if let Some(bad) = values.iter().find(|v| !v.is_finite()) {
        return Err(HdcError::InvalidParameter(format!(
            "level value {} is not finite",
            bad
        )));
    }
    let dimension = levels[0].dimension();
    if let Some(other) = levels.iter().find(|l| l.dimension() != dimension) {
        return Err(HdcError::DimensionMismatch {
            expected: dimension,
            actual: other.dimension(),
        });
    }
    Ok(())
}

/// Maps scalars to the level hypervector of the nearest tabulated value.
///
/// # Example
///
/// ```rust
/// use rand::SeedableRng;
/// use rand::rngs::StdRng;
/// use ruvector_hdc::{BipolarHV, Hypervector, LevelEncoder};
///
/// let mut rng = StdRng::seed_from_u64(3);
/// let base = BipolarHV::random(10_000, &mut rng).unwrap();
/// let encoder = LevelEncoder::from_range(&base, 0.0, 100.0, 11, &mut rng).unwrap();
///
/// let hv = encoder.encode(42.0).clone();
/// let decoded = encoder.decoder().decode(&hv).unwrap();
/// assert_eq!(decoded, 40.0);
/// ```
#[derive(Debug, Clone)]
pub struct LevelEncoder<H> {
    levels: Vec<H>,
    values: Vec<f64>,
}

impl<H: Hypervector> LevelEncoder<H> {
    /// Pairs `levels[i]` with `values[i]`.
    ///
    /// Values should be strictly increasing; otherwise a warning is logged and
    /// equal distances resolve to the first matching entry.
    ///
    /// # Errors
    ///
    /// [`HdcError::LengthMismatch`] for tables of different lengths,
    /// [`HdcError::EmptyInput`] for empty tables and
    /// [`HdcError::InvalidParameter`] for a non-finite value.
    pub fn new(levels: Vec<H>, values: Vec<f64>) -> Result<Self> {
        check_table(&levels, &values)?;
        if values.windows(2).any(|w| w[0] >= w[1]) {
            warn!(levels = values.len(), "level values are not strictly increasing");
        }
        debug!(variant = %H::VARIANT, levels = values.len(), "built level encoder");
        Ok(Self { levels, values })
    }

    /// Tabulates `n` evenly spaced values over `[low, high]` against a level
    /// chain grown from `base`.
    pub fn from_range<R: Rng + ?Sized>(
        base: &H,
        low: f64,
        high: f64,
        n: usize,
        rng: &mut R,
    ) -> Result<Self> {
        let levels = level(base, n, rng)?;
        let values = if n == 1 {
            vec![low]
        } else {
            let step = (high - low) / (n - 1) as f64;
            (0..n).map(|i| low + step * i as f64).collect()
        };
        Self::new(levels, values)
    }

    /// Level vector for the tabulated value nearest to `x`.
    pub fn encode(&self, x: f64) -> &H {
        let mut best = 0;
        let mut best_distance = (self.values[0] - x).abs();
        for (i, &v) in self.values.iter().enumerate().skip(1) {
            let distance = (v - x).abs();
            if distance < best_distance {
                best = i;
                best_distance = distance;
            }
        }
        &self.levels[best]
    }

    /// The level chain.
    pub fn levels(&self) -> &[H] {
        &self.levels
    }

    /// The tabulated values.
    pub fn values(&self) -> &[f64] {
        &self.values
    }

    /// Decoder over the same table.
    pub fn decoder(&self) -> LevelDecoder<H> {
        LevelDecoder {
            levels: self.levels.clone(),
            values: self.values.clone(),
        }
    }
}

/// Maps a hypervector back to the value of its most similar level.
#[derive(Debug, Clone)]
pub struct LevelDecoder<H> {
    levels: Vec<H>,
    values: Vec<f64>,
}

impl<H: Hypervector> LevelDecoder<H> {
    /// Pairs `levels[i]` with `values[i]`; same validation as
    /// [`LevelEncoder::new`].
    pub fn new(levels: Vec<H>, values: Vec<f64>) -> Result<Self> {
        check_table(&levels, &values)?;
        Ok(Self { levels, values })
    }

    /// Value of the level most similar to `query`.
    ///
    /// # Errors
    ///
    /// [`HdcError::DimensionMismatch`] when `query` has a different dimension.
    pub fn decode(&self, query: &H) -> Result<f64> {
        let hit = nearest_neighbor(query, &self.levels)?;
        Ok(self.values[hit.key])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::inference::similarity;
    use crate::types::{BipolarHV, RealHV};
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_level_chain_gradient() {
        let mut rng = StdRng::seed_from_u64(10);
        let levels: Vec<BipolarHV> = level_random(10_000, 20, &mut rng).unwrap();
        assert_eq!(levels.len(), 20);
        for pair in levels.windows(2) {
            assert!(similarity(&pair[0], &pair[1]).unwrap() > 0.8);
        }
        let ends = similarity(&levels[0], &levels[19]).unwrap();
        assert!(ends < 0.3, "ends: {}", ends);
    }

    #[test]
    fn test_level_edge_counts() {
        let mut rng = StdRng::seed_from_u64(11);
        let base = RealHV::random(32, &mut rng).unwrap();
        assert!(matches!(
            level(&base, 0, &mut rng),
            Err(HdcError::InsufficientInput { .. })
        ));
        assert_eq!(level(&base, 1, &mut rng).unwrap(), vec![base.clone()]);
        // n = 2 resamples everything.
        assert_eq!(level(&base, 2, &mut rng).unwrap().len(), 2);
    }

    #[test]
    fn test_encoder_validation() {
        let mut rng = StdRng::seed_from_u64(12);
        let levels: Vec<RealHV> = level_random(16, 3, &mut rng).unwrap();
        assert!(matches!(
            LevelEncoder::new(levels.clone(), vec![0.0, 1.0]),
            Err(HdcError::LengthMismatch { left: 3, right: 2 })
        ));
        assert!(matches!(
            LevelEncoder::new(levels.clone(), vec![0.0, f64::NAN, 2.0]),
            Err(HdcError::InvalidParameter(_))
        ));
        assert!(matches!(
            LevelEncoder::<RealHV>::new(Vec::new(), Vec::new()),
            Err(HdcError::EmptyInput)
        ));
        assert!(LevelEncoder::new(levels, vec![0.0, 1.0, 2.0]).is_ok());
    }

    #[test]
    fn test_encode_nearest_first_on_tie() {
        let mut rng = StdRng::seed_from_u64(13);
        let levels = level_random::<RealHV, _>(64, 3, &mut rng).unwrap();
        let encoder = LevelEncoder::new(levels, vec![0.0, 1.0, 2.0]).unwrap();
        assert_eq!(encoder.encode(0.5), &encoder.levels()[0]);
        assert_eq!(encoder.encode(0.6), &encoder.levels()[1]);
        assert_eq!(encoder.encode(-5.0), &encoder.levels()[0]);
        assert_eq!(encoder.encode(99.0), &encoder.levels()[2]);
    }

    #[test]
    fn test_decode_noisy_query() {
        let mut rng = StdRng::seed_from_u64(14);
        let base = BipolarHV::random(10_000, &mut rng).unwrap();
        let encoder = LevelEncoder::from_range(&base, -1.0, 1.0, 5, &mut rng).unwrap();
        assert_eq!(encoder.values(), &[-1.0, -0.5, 0.0, 0.5, 1.0]);

        let decoder = encoder.decoder();
        for &x in encoder.values() {
            let noisy =
                perturbate(encoder.encode(x), Perturbation::Fraction(0.05), &mut rng).unwrap();
            assert_eq!(decoder.decode(&noisy).unwrap(), x);
        }
    }
}
