//! Unchecked per-variant kernels behind the public algebra.
//!
//! Every method assumes the caller already validated its operands: positive
//! dimension, non-empty collections, equal dimensions, in-range indices.
//! Kernels take a [`Checked`] token that only this crate can build, so code
//! outside it (even generic code bounded on `Hypervector`) reaches them only
//! through the checked functions in [`crate::operations`] and
//! [`crate::inference`].

use rand::Rng;

/// Marker that the operands of a kernel call were validated.
#[derive(Debug, Clone, Copy)]
pub struct Checked(());

pub(crate) const CHECKED: Checked = Checked(());

pub trait Kernels: Sized {
    /// Bind identity of the given dimension.
    fn neutral_unchecked(dimension: usize, checked: Checked) -> Self;

    /// Element-wise aggregation of at least one equally sized vector.
    fn bundle_kernel<R: Rng + ?Sized>(vectors: &[&Self], rng: &mut R, checked: Checked) -> Self;

    /// Element-wise binding of two equally sized vectors.
    fn bind_kernel(&self, other: &Self, checked: Checked) -> Self;

    /// Cyclic rotation moving element `i` to `(i + shift) % dimension`.
    fn rotate_right(&mut self, shift: usize, checked: Checked);

    /// Redraws the elements at `indices` from the variant's distribution.
    fn resample_at<R: Rng + ?Sized>(&mut self, indices: &[usize], rng: &mut R, checked: Checked);

    /// Canonical similarity (cosine or Jaccard-like, per variant).
    fn similarity_kernel(&self, other: &Self, checked: Checked) -> f32;
}
