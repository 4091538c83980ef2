//! Similarity metrics for hypervectors
//!
//! [`similarity`] applies the canonical metric of the operands' variant:
//! Jaccard-like for binary and graded vectors, cosine for the rest.
//! [`similarity_with`] takes an explicit [`SimilarityMethod`] and accepts
//! operands of different variants.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{HdcError, Result};
use crate::types::{check_same_dimension, Hypervector, CHECKED};

/// Explicitly selectable similarity metric.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SimilarityMethod {
    /// Normalized dot product.
    Cosine,
    /// `dot(u, v) / sum(u + v - u*v)`.
    Jaccard,
    /// `1 - mismatches / dimension`.
    Hamming,
}

impl SimilarityMethod {
    /// Method name as accepted by [`FromStr`].
    pub fn name(self) -> &'static str {
        match self {
            SimilarityMethod::Cosine => "cosine",
            SimilarityMethod::Jaccard => "jaccard",
            SimilarityMethod::Hamming => "hamming",
        }
    }

    /// Applies the metric to two equally long element sequences.
    pub fn apply(self, a: &[f32], b: &[f32]) -> f32 {
        match self {
            SimilarityMethod::Cosine => cosine(a, b),
            SimilarityMethod::Jaccard => jaccard(a, b),
            SimilarityMethod::Hamming => hamming(a, b),
        }
    }
}

impl fmt::Display for SimilarityMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for SimilarityMethod {
    type Err = HdcError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "cosine" => Ok(SimilarityMethod::Cosine),
            "jaccard" => Ok(SimilarityMethod::Jaccard),
            "hamming" => Ok(SimilarityMethod::Hamming),
            _ => Err(HdcError::UnsupportedMethod(s.to_string())),
        }
    }
}

/// Cosine over paired elements, accumulated in `f64`.
///
/// Returns `0.0` when either side has zero norm.
pub(crate) fn cosine_pairs(pairs: impl Iterator<Item = (f64, f64)>) -> f32 {
    let (mut dot, mut norm_a, mut norm_b) = (0.0f64, 0.0f64, 0.0f64);
    for (a, b) in pairs {
        dot += a * b;
        norm_a += a * a;
        norm_b += b * b;
    }
    if norm_a == 0.0 || norm_b == 0.0 {
        return 0.0;
    }
    (dot / (norm_a.sqrt() * norm_b.sqrt())) as f32
}

/// Jaccard-like ratio over paired elements, accumulated in `f64`.
///
/// Two all-zero inputs are identical and score `1.0`.
pub(crate) fn jaccard_pairs(pairs: impl Iterator<Item = (f64, f64)>) -> f32 {
    let (mut dot, mut union) = (0.0f64, 0.0f64);
    for (a, b) in pairs {
        let both = a * b;
        dot += both;
        union += a + b - both;
    }
    if union == 0.0 {
        return 1.0;
    }
    (dot / union) as f32
}

fn widen<'a>(a: &'a [f32], b: &'a [f32]) -> impl Iterator<Item = (f64, f64)> + 'a {
    a.iter().zip(b).map(|(&x, &y)| (x as f64, y as f64))
}

/// Cosine similarity of two slices.
///
/// # Example
///
/// ```rust
/// use ruvector_hdc::inference::cosine;
///
/// assert!((cosine(&[1.0, 0.0], &[1.0, 0.0]) - 1.0).abs() < 1e-6);
/// assert_eq!(cosine(&[1.0, 0.0], &[0.0, 1.0]), 0.0);
/// ```
#[inline]
pub fn cosine(a: &[f32], b: &[f32]) -> f32 {
    cosine_pairs(widen(a, b))
}

/// Jaccard-like similarity `dot(a, b) / sum(a + b - a*b)` of two slices.
#[inline]
pub fn jaccard(a: &[f32], b: &[f32]) -> f32 {
    jaccard_pairs(widen(a, b))
}

/// Fraction of positions holding equal elements.
pub fn hamming(a: &[f32], b: &[f32]) -> f32 {
    let n = a.len().min(b.len());
    if n == 0 {
        return 1.0;
    }
    let mismatches = a.iter().zip(b).filter(|(x, y)| x != y).count();
    1.0 - mismatches as f32 / n as f32
}

/// Canonical similarity of two same-variant hypervectors.
///
/// # Example
///
/// ```rust
/// use ruvector_hdc::{BipolarHV, Hypervector};
/// use ruvector_hdc::inference::similarity;
///
/// let a = BipolarHV::from_seed("a", 1000).unwrap();
/// assert!((similarity(&a, &a).unwrap() - 1.0).abs() < 1e-6);
/// ```
pub fn similarity<H: Hypervector>(a: &H, b: &H) -> Result<f32> {
    check_same_dimension(a, b)?;
    Ok(a.similarity_kernel(b, CHECKED))
}

/// Similarity with an explicit method. The operands may differ in variant;
/// both are compared through their `f32` element sequences.
pub fn similarity_with<A, B>(a: &A, b: &B, method: SimilarityMethod) -> Result<f32>
where
    A: Hypervector,
    B: Hypervector,
{
    check_same_dimension(a, b)?;
    Ok(method.apply(&a.to_f32_vec(), &b.to_f32_vec()))
}

/// Symmetric pairwise similarity matrix.
///
/// Only the upper triangle is computed and mirrored. An empty input yields an
/// empty matrix.
pub fn similarity_matrix<H: Hypervector>(vectors: &[H]) -> Result<Vec<Vec<f32>>> {
    let n = vectors.len();
    if let Some(first) = vectors.first() {
        for v in &vectors[1..] {
            check_same_dimension(first, v)?;
        }
    }

    let mut matrix = vec![vec![0.0; n]; n];
    for i in 0..n {
        matrix[i][i] = vectors[i].similarity_kernel(&vectors[i], CHECKED);
        for j in (i + 1)..n {
            let sim = vectors[i].similarity_kernel(&vectors[j], CHECKED);
            matrix[i][j] = sim;
            matrix[j][i] = sim;
        }
    }
    Ok(matrix)
}

/// Curried form: a closure computing `similarity(query, v)`.
///
/// ```rust
/// use ruvector_hdc::{Hypervector, RealHV};
/// use ruvector_hdc::inference::similarity_to;
///
/// let query = RealHV::from_seed(&0u32, 256).unwrap();
/// let others: Vec<_> = (1..4u32).map(|i| RealHV::from_seed(&i, 256).unwrap()).collect();
///
/// let sims: Vec<f32> = others
///     .iter()
///     .map(similarity_to(&query))
///     .collect::<Result<_, _>>()
///     .unwrap();
/// assert_eq!(sims.len(), 3);
/// ```
pub fn similarity_to<H: Hypervector>(query: &H) -> impl Fn(&H) -> Result<f32> + '_ {
    move |v| similarity(query, v)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{BinaryHV, GradedHV, RealHV, TernaryHV};

    #[test]
    fn test_cosine_zero_norm() {
        assert_eq!(cosine(&[0.0, 0.0], &[1.0, 2.0]), 0.0);
        assert!((cosine(&[1.0, 2.0], &[2.0, 4.0]) - 1.0).abs() < 1e-6);
        assert!((cosine(&[1.0, 0.0], &[-1.0, 0.0]) + 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_jaccard_values() {
        assert_eq!(jaccard(&[0.0, 0.0], &[0.0, 0.0]), 1.0);
        // dot = 1, union = 2 + 2 - 1 = 3
        assert!((jaccard(&[1.0, 1.0, 0.0], &[1.0, 0.0, 1.0]) - 1.0 / 3.0).abs() < 1e-6);
    }

    #[test]
    fn test_hamming_fraction() {
        assert_eq!(hamming(&[1.0, 0.0, 1.0, 1.0], &[1.0, 1.0, 1.0, 0.0]), 0.5);
        assert_eq!(hamming(&[], &[]), 1.0);
    }

    #[test]
    fn test_method_from_str() {
        assert_eq!("cosine".parse::<SimilarityMethod>().unwrap(), SimilarityMethod::Cosine);
        assert_eq!("Jaccard".parse::<SimilarityMethod>().unwrap(), SimilarityMethod::Jaccard);
        assert_eq!(SimilarityMethod::Hamming.to_string(), "hamming");
        assert!(matches!(
            "euclidean".parse::<SimilarityMethod>(),
            Err(HdcError::UnsupportedMethod(m)) if m == "euclidean"
        ));
    }

    #[test]
    fn test_similarity_dimension_mismatch() {
        let a = RealHV::from_seed("a", 10).unwrap();
        let b = RealHV::from_seed("b", 11).unwrap();
        assert!(matches!(
            similarity(&a, &b),
            Err(HdcError::DimensionMismatch {
                expected: 10,
                actual: 11
            })
        ));
    }

    #[test]
    fn test_similarity_with_cross_variant() {
        let bin = BinaryHV::from_values(&[true, false, true, false]).unwrap();
        let ter = TernaryHV::from_values(&[1, 0, 1, 0]).unwrap();
        let sim = similarity_with(&bin, &ter, SimilarityMethod::Cosine).unwrap();
        assert!((sim - 1.0).abs() < 1e-6);
        let sim = similarity_with(&bin, &ter, SimilarityMethod::Hamming).unwrap();
        assert_eq!(sim, 1.0);
    }

    #[test]
    fn test_canonical_metric_per_variant() {
        let a = GradedHV::from_values(&[1.0, 0.5]).unwrap();
        let b = GradedHV::from_values(&[1.0, 0.0]).unwrap();
        // dot = 1, union = (1 + 1 - 1) + (0.5 + 0 - 0) = 1.5
        assert!((similarity(&a, &b).unwrap() - 1.0 / 1.5).abs() < 1e-6);
    }

    #[test]
    fn test_matrix_symmetric() {
        let vectors: Vec<RealHV> = (0..5u32)
            .map(|i| RealHV::from_seed(&i, 500).unwrap())
            .collect();
        let matrix = similarity_matrix(&vectors).unwrap();
        assert_eq!(matrix.len(), 5);
        for i in 0..5 {
            assert!((matrix[i][i] - 1.0).abs() < 1e-5);
            for j in 0..5 {
                assert_eq!(matrix[i][j], matrix[j][i]);
            }
        }
        assert!(similarity_matrix::<RealHV>(&[]).unwrap().is_empty());
    }
}
