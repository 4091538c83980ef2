//! Configuration structs.
//!
//! All configs implement `Default` and can be partially overridden with
//! struct-update syntax:
//!
//! ```rust
//! use ruvector_hdc::config::HdcConfig;
//!
//! let config = HdcConfig {
//!     dimension: 4096,
//!     ..Default::default()
//! };
//! assert!(config.validate().is_ok());
//! ```

use rand::rngs::StdRng;
use rand::SeedableRng;
use serde::{Deserialize, Serialize};

use crate::error::{HdcError, Result};

/// Default hypervector dimension.
pub const DEFAULT_DIMENSION: usize = 10_000;

/// Default p-value threshold of the significance tests.
pub const DEFAULT_PTOL: f64 = 0.01;

/// Default number of null samples drawn by the bootstrap significance test.
pub const DEFAULT_BOOTSTRAP_SAMPLES: usize = 200;

/// Crate-level settings shared by constructors and codebooks.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HdcConfig {
    /// Number of elements per hypervector.
    ///
    /// Default: `10_000`.
    pub dimension: usize,

    /// Seed for the generator returned by [`HdcConfig::rng`]. `None` seeds
    /// from OS entropy.
    ///
    /// Default: `None`.
    pub seed: Option<u64>,
}

impl Default for HdcConfig {
    fn default() -> Self {
        Self {
            dimension: DEFAULT_DIMENSION,
            seed: None,
        }
    }
}

impl HdcConfig {
    /// Creates a configuration for the given dimension.
    pub fn new(dimension: usize) -> Self {
        Self {
            dimension,
            ..Default::default()
        }
    }

    /// Sets a fixed seed so every run draws the same vectors.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Rejects a zero dimension.
    pub fn validate(&self) -> Result<()> {
        if self.dimension == 0 {
            return Err(HdcError::InvalidDimension {
                dimension: self.dimension,
            });
        }
        Ok(())
    }

    /// Generator for this configuration.
    pub fn rng(&self) -> StdRng {
        match self.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        }
    }
}

/// Thresholds for the "similar beyond chance" predicates in
/// [`inference::significance`](crate::inference::significance).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SignificanceConfig {
    /// Mismatch count at or below which two binary/bipolar vectors are
    /// considered similar regardless of the p-value.
    ///
    /// Default: `None`, meaning `dimension / 100`.
    pub atol: Option<usize>,

    /// p-value below which similarity is considered significant.
    ///
    /// Default: `0.01`.
    pub ptol: f64,

    /// Number of random pairs drawn to build the bootstrap null.
    ///
    /// Default: `200`.
    pub bootstrap_samples: usize,
}

impl Default for SignificanceConfig {
    fn default() -> Self {
        Self {
            atol: None,
            ptol: DEFAULT_PTOL,
            bootstrap_samples: DEFAULT_BOOTSTRAP_SAMPLES,
        }
    }
}

impl SignificanceConfig {
    /// Absolute mismatch threshold for a given dimension.
    pub fn atol_for(&self, dimension: usize) -> usize {
        self.atol.unwrap_or(dimension / 100)
    }

    /// Checks `ptol` lies in `(0, 1]` and at least one bootstrap sample is drawn.
    pub fn validate(&self) -> Result<()> {
        self.validate_ptol()?;
        if self.bootstrap_samples == 0 {
            return Err(HdcError::InvalidParameter(
                "bootstrap_samples must be positive".to_string(),
            ));
        }
        Ok(())
    }

    /// Checks only the p-value threshold, which is all the binomial test reads.
    pub(crate) fn validate_ptol(&self) -> Result<()> {
        if !(self.ptol > 0.0 && self.ptol <= 1.0) {
            return Err(HdcError::InvalidParameter(format!(
                "ptol = {} (expected 0 < ptol <= 1)",
                self.ptol
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::Rng;

    #[test]
    fn test_defaults() {
        let config = HdcConfig::default();
        assert_eq!(config.dimension, 10_000);
        assert!(config.seed.is_none());

        let sig = SignificanceConfig::default();
        assert_eq!(sig.atol_for(10_000), 100);
        assert!(sig.validate().is_ok());
    }

    #[test]
    fn test_zero_dimension_rejected() {
        let config = HdcConfig::new(0);
        assert!(matches!(
            config.validate(),
            Err(HdcError::InvalidDimension { dimension: 0 })
        ));
    }

    #[test]
    fn test_seeded_rng_repeatable() {
        let config = HdcConfig::new(64).with_seed(7);
        let a: u64 = config.rng().gen();
        let b: u64 = config.rng().gen();
        assert_eq!(a, b);
    }

    #[test]
    fn test_invalid_ptol() {
        let sig = SignificanceConfig {
            ptol: 0.0,
            ..Default::default()
        };
        assert!(matches!(sig.validate(), Err(HdcError::InvalidParameter(_))));
    }

    #[test]
    fn test_serde_roundtrip() {
        let config = HdcConfig::new(512).with_seed(3);
        let json = serde_json::to_string(&config).unwrap();
        let back: HdcConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(config, back);
    }
}
