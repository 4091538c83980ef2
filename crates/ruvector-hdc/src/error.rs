//! Error types for hypervector construction and algebra.
//!
//! Every fallible operation in this crate returns [`HdcError`]. Failures are
//! raised before any output is produced or any operand is mutated, so a
//! failed call never leaves a half-updated hypervector behind.

use crate::types::Variant;

/// Primary error type for HDC operations.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum HdcError {
    /// A hypervector was requested with a zero dimension.
    #[error("invalid hypervector dimension: {dimension} (must be positive)")]
    InvalidDimension {
        /// The rejected dimension.
        dimension: usize,
    },

    /// An explicit element lies outside the domain of a strict variant.
    #[error("invalid element {value} at index {index} for {variant} hypervector")]
    InvalidElement {
        /// Position of the offending element.
        index: usize,
        /// The offending value.
        value: f64,
        /// Variant whose domain was violated.
        variant: Variant,
    },

    /// Operands of a binary or n-ary operation have different dimensions.
    #[error("dimension mismatch: expected {expected}, got {actual}")]
    DimensionMismatch {
        /// Dimension of the first operand.
        expected: usize,
        /// Dimension of the offending operand.
        actual: usize,
    },

    /// Operands of different variants were combined at runtime.
    ///
    /// Only reachable through [`AnyHypervector`](crate::types::AnyHypervector);
    /// the generic API rejects mixed variants at compile time.
    #[error("variant mismatch: expected {expected}, got {actual}")]
    VariantMismatch {
        /// Variant of the first operand.
        expected: Variant,
        /// Variant of the offending operand.
        actual: Variant,
    },

    /// An encoder received fewer inputs than it needs.
    #[error("{operation} requires at least {required} inputs, got {actual}")]
    InsufficientInput {
        /// Name of the encoder.
        operation: &'static str,
        /// Minimum number of inputs.
        required: usize,
        /// Number of inputs supplied.
        actual: usize,
    },

    /// A similarity method name outside `cosine`, `jaccard`, `hamming`.
    #[error("unsupported similarity method: {0}")]
    UnsupportedMethod(String),

    /// An n-ary operation received an empty collection.
    #[error("empty vector set provided")]
    EmptyInput,

    /// Two collections that must be zipped have different lengths.
    #[error("length mismatch between paired collections: {left} vs {right}")]
    LengthMismatch {
        /// Length of the first collection.
        left: usize,
        /// Length of the second collection.
        right: usize,
    },

    /// A numeric parameter is outside its valid range.
    #[error("invalid parameter: {0}")]
    InvalidParameter(String),
}

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, HdcError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = HdcError::DimensionMismatch {
            expected: 10,
            actual: 12,
        };
        assert_eq!(err.to_string(), "dimension mismatch: expected 10, got 12");

        let err = HdcError::InsufficientInput {
            operation: "bundle_sequence",
            required: 2,
            actual: 1,
        };
        assert!(err.to_string().contains("bundle_sequence"));

        let err = HdcError::VariantMismatch {
            expected: Variant::Binary,
            actual: Variant::Real,
        };
        assert_eq!(err.to_string(), "variant mismatch: expected binary, got real");
    }
}
